//! Periodic maintenance spawned by `main`, stopped through a shared
//! `CancellationToken`.

pub mod session_purge;
