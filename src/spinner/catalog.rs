//! Named spinner styles and their glyph tables.
//!
//! Style ids are stable: they match the positions in [`STYLE_FRAMES`], with
//! one extra id reserved for [`SpinnerStyle::WaveText`], which derives its
//! frames from the caller's message instead of a table.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

/// Glyph tables for every named style, indexed by style id.
const STYLE_FRAMES: &[&[&str]] = &[
    &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"],
    &["|", "/", "-", "\\"],
    &["◴", "◷", "◶", "◵"],
    &["◐", "◓", "◑", "◒"],
    &["←", "↖", "↑", "↗", "→", "↘", "↓", "↙"],
    &["▁", "▂", "▃", "▄", "▅", "▆", "▇", "█", "▇", "▆", "▅", "▄", "▃", "▁"],
    &["▖", "▘", "▝", "▗"],
    &["┤", "┘", "┴", "└", "├", "┌", "┬", "┐"],
    &["◢", "◣", "◤", "◥"],
    &["⣾", "⣽", "⣻", "⢿", "⡿", "⣟", "⣯", "⣷"],
    &["⠁", "⠂", "⠄", "⡀", "⢀", "⠠", "⠐", "⠈"],
    &["⢎⡰", "⢎⡡", "⢎⡑", "⢎⠱", "⠎⡱", "⢊⡱", "⢌⡱", "⢆⡱"],
    &[".", "o", "O", "@", "*"],
    &["∙∙∙", "●∙∙", "∙●∙", "∙∙●", "∙∙∙"],
    &["🌍", "🌎", "🌏"],
    &["🌑", "🌒", "🌓", "🌔", "🌕", "🌖", "🌗", "🌘"],
    &["⠋", "⠙", "⠚", "⠞", "⠖", "⠦", "⠴", "⠲", "⠳", "⠓"],
    &["⠄", "⠆", "⠇", "⠋", "⠙", "⠸", "⠰", "⠠", "⠰", "⠸", "⠙", "⠋", "⠇", "⠆"],
    &["🧠   ", " 🧠  ", "  🧠 ", "   🧠", "  🧠 ", " 🧠  ", "🧠   "],
    &["💡", "💭", "💡", "💭"],
    &["🤔", "🧐", "🤔", "🧐"],
];

/// Number of styles backed by a glyph table (wave-text excluded).
pub const NAMED_STYLE_COUNT: usize = STYLE_FRAMES.len();

/// Errors from looking up a style directly by id.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("spinner style id {id} is out of range (0..{count})")]
    OutOfRange { id: usize, count: usize },
    #[error("wave-text style has no catalog frames; they are generated from the message")]
    WaveTextMarker,
}

/// Error returned when a style name can't be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown spinner style: {0}")]
pub struct ParseStyleError(pub String);

/// An ordered, non-empty sequence of frames.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameSet {
    frames: Vec<Cow<'static, str>>,
}

impl FrameSet {
    /// Build a frame set, returning None if `frames` is empty.
    pub fn new(frames: Vec<Cow<'static, str>>) -> Option<Self> {
        if frames.is_empty() {
            None
        } else {
            Some(Self { frames })
        }
    }

    /// A set holding exactly one frame.
    pub fn single(frame: String) -> Self {
        Self {
            frames: vec![Cow::Owned(frame)],
        }
    }

    fn from_static(frames: &'static [&'static str]) -> Self {
        Self {
            frames: frames.iter().map(|f| Cow::Borrowed(*f)).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Always false: a frame set holds at least one frame.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Frame at `index`, wrapping around the end of the set.
    pub fn frame(&self, index: usize) -> &str {
        &self.frames[index % self.frames.len()]
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.frames.iter().map(|f| f.as_ref())
    }
}

/// Spinner styles with stable integer ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SpinnerStyle {
    BrailleDots = 0,
    Classic = 1,
    BoxCorners = 2,
    HalfCircles = 3,
    Arrows = 4,
    Blocks = 5,
    Quadrants = 6,
    BoxDrawing = 7,
    Triangles = 8,
    BrailleVertical = 9,
    BrailleDotsSmall = 10,
    BrailleDouble = 11,
    GrowingDot = 12,
    DotWave = 13,
    EarthSpinning = 14,
    MoonPhases = 15,
    BrailleAlt = 16,
    BraillePulse = 17,
    Brain = 18,
    Lightbulb = 19,
    ThinkingFace = 20,
    /// Frames are generated from the message; see [`super::wave`].
    WaveText = 21,
}

impl SpinnerStyle {
    /// Every style in id order, wave-text last.
    pub const ALL: [SpinnerStyle; 22] = [
        SpinnerStyle::BrailleDots,
        SpinnerStyle::Classic,
        SpinnerStyle::BoxCorners,
        SpinnerStyle::HalfCircles,
        SpinnerStyle::Arrows,
        SpinnerStyle::Blocks,
        SpinnerStyle::Quadrants,
        SpinnerStyle::BoxDrawing,
        SpinnerStyle::Triangles,
        SpinnerStyle::BrailleVertical,
        SpinnerStyle::BrailleDotsSmall,
        SpinnerStyle::BrailleDouble,
        SpinnerStyle::GrowingDot,
        SpinnerStyle::DotWave,
        SpinnerStyle::EarthSpinning,
        SpinnerStyle::MoonPhases,
        SpinnerStyle::BrailleAlt,
        SpinnerStyle::BraillePulse,
        SpinnerStyle::Brain,
        SpinnerStyle::Lightbulb,
        SpinnerStyle::ThinkingFace,
        SpinnerStyle::WaveText,
    ];

    pub fn id(self) -> usize {
        self as usize
    }

    pub fn from_id(id: usize) -> Option<Self> {
        Self::ALL.get(id).copied()
    }

    /// Kebab-case name, as accepted by `FromStr` and used in config files.
    pub fn name(self) -> &'static str {
        match self {
            SpinnerStyle::BrailleDots => "braille-dots",
            SpinnerStyle::Classic => "classic",
            SpinnerStyle::BoxCorners => "box-corners",
            SpinnerStyle::HalfCircles => "half-circles",
            SpinnerStyle::Arrows => "arrows",
            SpinnerStyle::Blocks => "blocks",
            SpinnerStyle::Quadrants => "quadrants",
            SpinnerStyle::BoxDrawing => "box-drawing",
            SpinnerStyle::Triangles => "triangles",
            SpinnerStyle::BrailleVertical => "braille-vertical",
            SpinnerStyle::BrailleDotsSmall => "braille-dots-small",
            SpinnerStyle::BrailleDouble => "braille-double",
            SpinnerStyle::GrowingDot => "growing-dot",
            SpinnerStyle::DotWave => "dot-wave",
            SpinnerStyle::EarthSpinning => "earth-spinning",
            SpinnerStyle::MoonPhases => "moon-phases",
            SpinnerStyle::BrailleAlt => "braille-alt",
            SpinnerStyle::BraillePulse => "braille-pulse",
            SpinnerStyle::Brain => "brain",
            SpinnerStyle::Lightbulb => "lightbulb",
            SpinnerStyle::ThinkingFace => "thinking-face",
            SpinnerStyle::WaveText => "wave-text",
        }
    }

    /// Human-readable description for listings.
    pub fn description(self) -> &'static str {
        match self {
            SpinnerStyle::BrailleDots => "Braille dots",
            SpinnerStyle::Classic => "Classic",
            SpinnerStyle::BoxCorners => "Box corners",
            SpinnerStyle::HalfCircles => "Half circles",
            SpinnerStyle::Arrows => "Arrows",
            SpinnerStyle::Blocks => "Blocks",
            SpinnerStyle::Quadrants => "Quadrants",
            SpinnerStyle::BoxDrawing => "Box drawing",
            SpinnerStyle::Triangles => "Triangles",
            SpinnerStyle::BrailleVertical => "Braille vertical",
            SpinnerStyle::BrailleDotsSmall => "Braille dots small",
            SpinnerStyle::BrailleDouble => "Braille double",
            SpinnerStyle::GrowingDot => "Growing dot",
            SpinnerStyle::DotWave => "Dot wave",
            SpinnerStyle::EarthSpinning => "Earth spinning",
            SpinnerStyle::MoonPhases => "Moon phases",
            SpinnerStyle::BrailleAlt => "Braille alt",
            SpinnerStyle::BraillePulse => "Braille pulse",
            SpinnerStyle::Brain => "Brain thinking",
            SpinnerStyle::Lightbulb => "Lightbulb/thought",
            SpinnerStyle::ThinkingFace => "Thinking faces",
            SpinnerStyle::WaveText => "Wave text",
        }
    }

    pub fn is_wave_text(self) -> bool {
        self == SpinnerStyle::WaveText
    }
}

impl fmt::Display for SpinnerStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SpinnerStyle {
    type Err = ParseStyleError;

    /// Accepts the kebab-case name (any case) or the numeric id.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(id) = s.parse::<usize>() {
            return Self::from_id(id).ok_or_else(|| ParseStyleError(s.to_string()));
        }
        Self::ALL
            .iter()
            .copied()
            .find(|style| style.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseStyleError(s.to_string()))
    }
}

/// Total number of style ids, including the wave-text marker.
pub fn style_count() -> usize {
    SpinnerStyle::ALL.len()
}

/// Frames for a named style id.
pub fn frame_set_for(id: usize) -> Result<FrameSet, CatalogError> {
    if id == SpinnerStyle::WaveText.id() {
        return Err(CatalogError::WaveTextMarker);
    }
    STYLE_FRAMES
        .get(id)
        .map(|frames| FrameSet::from_static(*frames))
        .ok_or(CatalogError::OutOfRange {
            id,
            count: style_count(),
        })
}

/// Frames for `style`, for callers that already hold a typed style.
///
/// Wave-text has no table (its frames come from the message), so it gets
/// the braille-dots table here; callers generate wave frames themselves.
pub(crate) fn named_frames(style: SpinnerStyle) -> FrameSet {
    let frames: &'static [&'static str] = match STYLE_FRAMES.get(style.id()) {
        Some(frames) => *frames,
        None => STYLE_FRAMES[0],
    };
    FrameSet::from_static(frames)
}

/// Pick a named style uniformly at random. Never returns wave-text.
///
/// Uses the calling thread's own generator, so sessions constructed
/// concurrently on different threads don't share random state.
pub fn random_style() -> SpinnerStyle {
    random_style_with(&mut rand::thread_rng())
}

/// Like [`random_style`], drawing from the given generator.
pub fn random_style_with<R: Rng + ?Sized>(rng: &mut R) -> SpinnerStyle {
    let id = rng.gen_range(0..NAMED_STYLE_COUNT);
    // ids below NAMED_STYLE_COUNT always map to a named style
    SpinnerStyle::from_id(id).unwrap_or(SpinnerStyle::BrailleDots)
}
