pub mod config;
pub mod editor;
pub mod environment;
pub mod error;
pub mod exec;
pub mod manifest;
pub mod output;
pub mod patch;
pub mod scaffold;

// Re-export commonly used types
pub use config::Config;
pub use environment::Environment;
pub use error::{BootstrapError, BootstrapResult};
pub use output::Reporter;
pub use patch::{PatchOptions, Patcher};
