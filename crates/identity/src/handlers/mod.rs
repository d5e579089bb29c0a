pub mod auth;
pub mod rpc;
