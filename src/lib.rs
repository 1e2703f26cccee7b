//! Terminal busy indicator: animated spinners and wave-text for long-running work.

pub mod cmd;
pub mod config;
pub mod logger;
pub mod spinner;
pub mod task;
pub mod util;

pub use spinner::{Spinner, SpinnerOptions, SpinnerStyle};
