//! Terminal busy indicator.
//!
//! A [`Spinner`] rewrites the current terminal line on a background thread
//! until it is stopped, using either a named glyph style from the catalog or
//! a wave-text animation generated from its message.

mod cancel;
mod catalog;
mod renderer;
mod session;
mod wave;

pub use cancel::CancelToken;
pub use catalog::{
    CatalogError, FrameSet, NAMED_STYLE_COUNT, ParseStyleError, SpinnerStyle, frame_set_for,
    random_style, random_style_with, style_count,
};
pub use renderer::{TermRenderer, TerminalRenderer, clear_sequence};
pub use session::{DEFAULT_CADENCE, DEFAULT_MESSAGE, Spinner, SpinnerOptions, SpinnerState};
pub use wave::wave_frames;
