//! Physical inventory reads: configuration, input file and logging setup for
//! the `physinv_app` binary.
pub mod config;
pub mod input;
pub mod logging;

pub use config::{CallerConfig, ConfigError};
pub use input::{read_sdc, DocumentInput, InputError, InputSdc, ItemInput};
pub use logging::LogDestination;
