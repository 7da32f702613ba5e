//! A3S Forge Core - Forgefile parsing and build dispatch
//!
//! This crate turns a Forgefile (a Dockerfile-like description of a guest
//! VM image) into a validated, ordered list of commands, and hands those
//! commands to the collaborators that build the image.

pub mod cache_key;
pub mod command;
pub mod command_type;
pub mod config;
pub mod definition;
pub mod dispatch;
pub mod enumeration;
pub mod error;
pub mod origin;

// Re-export commonly used types
pub use command::{fingerprint, Command};
pub use command_type::CommandType;
pub use config::{ForgeConfig, LogLevel};
pub use definition::Definition;
pub use dispatch::{dispatch, BuildBackend, BuildSummary, DispatchOptions, PlanBackend, PlannedAction};
pub use enumeration::ClosedEnum;
pub use error::{ForgeError, ParseError, Result};
pub use origin::OriginReference;

#[doc(hidden)]
pub use serde as __serde;

/// A3S Forge version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
