//! Input/output operations and ambient configuration

/// Command-line interface and batch file processing
pub mod cli;
/// Algorithm constants and runtime defaults
pub mod configuration;
/// Error types for all crate operations
pub mod error;
/// PNG export of resolved symbol grids
pub mod image;
/// Tracing subscriber setup
pub mod logging;
/// Progress bars for batch runs
pub mod progress;
/// Animated GIF capture of the collapse process
pub mod visualization;
