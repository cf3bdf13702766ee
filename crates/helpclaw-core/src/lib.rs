//! # HelpClaw Core
//! Shared foundation for the HelpClaw customer support agent:
//! configuration loading and the workspace-wide error taxonomy.

pub mod config;
pub mod error;

pub use config::HelpClawConfig;
pub use error::{HelpClawError, Result};
