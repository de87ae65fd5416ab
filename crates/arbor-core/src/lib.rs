//! Core utilities shared by the Arbor library and CLI: errors, paths and
//! structured version handling.

pub mod core;

pub use core::error::{ArborError, ArborResult};
pub use core::error_help::{format_error_with_help, ErrorHelp};
