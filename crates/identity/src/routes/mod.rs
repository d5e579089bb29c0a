//! Route tables. The public router merges `auth` and `health`; the RPC
//! router serves `rpc` alone.

pub mod auth;
pub mod health;
pub mod rpc;
