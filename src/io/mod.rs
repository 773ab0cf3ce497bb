/// Command-line interface and session runner
pub mod cli;
/// Limits, geometry, colors and timing defaults
pub mod configuration;
/// Error types
pub mod error;
/// PNG rendering and export
pub mod image;
/// Count input validation
pub mod input;
/// Tracing subscriber setup
pub mod logging;
/// Revert progress display
pub mod progress;
/// Session capture and GIF export
pub mod visualization;
