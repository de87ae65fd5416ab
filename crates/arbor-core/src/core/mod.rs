pub mod error;
pub mod error_help;
pub mod path;
pub mod version;

pub use error::{ArborError, ArborResult};
