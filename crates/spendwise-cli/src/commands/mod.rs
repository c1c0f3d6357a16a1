//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `analyze` - Offline analysis commands (tips, summary) and input loading
//! - `serve` - Web server command

pub mod analyze;
pub mod serve;

// Re-export command functions for main.rs
pub use analyze::*;
pub use serve::*;
