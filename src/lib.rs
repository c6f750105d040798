// ABOUTME: Root module for toolwire - typed Rust functions exposed as agent
// ABOUTME: tools with status-shaped results. Re-exports the main types.

pub mod agent;
pub mod config;
pub mod context;
pub mod error;
pub mod mcp;
pub mod permission;
pub mod prelude;
pub mod tool;
pub mod tools;

pub use config::Config;
pub use error::ToolwireError;
