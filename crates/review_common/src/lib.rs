//! Review Common - Shared types and pure logic for the AI review gateway.
//!
//! The judgment call itself lives behind the completion provider; this crate
//! owns everything deterministic around it: the entity data model, the prompt
//! contract, decision extraction, the provider wire types and the
//! configuration layer.

pub mod config;
pub mod entity;
pub mod parser;
pub mod prompt;
pub mod provider;
pub mod review;

pub use config::*;
pub use entity::*;
pub use parser::*;
pub use prompt::*;
pub use provider::*;
pub use review::*;
