//! Review gateway daemon: HTTP surface and review orchestration.

pub mod reviewer;
pub mod routes;
pub mod server;
