//! The spinner session: a background render loop plus ordered shutdown.
//!
//! # Lifecycle
//! 1. `Created`: frames are resolved from the style (wave-text, then an
//!    explicit style, then a random one)
//! 2. `Running`: the cursor is hidden and the render thread starts
//! 3. `StopRequested`: [`Spinner::stop`] cancels the render thread
//! 4. `Stopped`: the render thread has been joined, then the line is cleared
//!    and the cursor restored
//!
//! The renderer is shared between the render thread and the session, but the
//! two never write at the same time: the session only touches it before the
//! thread is spawned and after it has been joined.

use std::sync::{Arc, Mutex, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{debug, warn};

use super::cancel::CancelToken;
use super::catalog::{self, FrameSet, SpinnerStyle};
use super::renderer::{TermRenderer, TerminalRenderer};
use super::wave::wave_frames;

/// Default message shown after the spinner glyph.
pub const DEFAULT_MESSAGE: &str = "Processing";

/// Default time between frames.
pub const DEFAULT_CADENCE: Duration = Duration::from_millis(80);

type SharedRenderer = Arc<Mutex<Box<dyn TerminalRenderer>>>;

/// Construction parameters for a [`Spinner`].
#[derive(Debug, Clone)]
pub struct SpinnerOptions {
    pub message: String,
    /// `None` picks a random named style (never wave-text).
    pub style: Option<SpinnerStyle>,
    pub cadence: Duration,
}

impl Default for SpinnerOptions {
    fn default() -> Self {
        Self {
            message: DEFAULT_MESSAGE.to_string(),
            style: None,
            cadence: DEFAULT_CADENCE,
        }
    }
}

impl SpinnerOptions {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Self::default()
        }
    }

    pub fn style(mut self, style: SpinnerStyle) -> Self {
        self.style = Some(style);
        self
    }

    pub fn cadence(mut self, cadence: Duration) -> Self {
        self.cadence = cadence;
        self
    }
}

/// Session lifecycle states. `Stopped` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpinnerState {
    /// Only held while the constructor resolves frames; a spinner returned
    /// from [`Spinner::with_options`] is always `Running` or `Stopped`.
    Created,
    Running,
    StopRequested,
    Stopped,
}

/// Frames and suffix resolved once at construction.
#[derive(Debug, Clone)]
struct Animation {
    style: SpinnerStyle,
    frames: FrameSet,
    /// `" {message}..."`, or None for wave-text where the frames carry the message.
    suffix: Option<String>,
}

impl Animation {
    fn resolve(message: &str, style: Option<SpinnerStyle>) -> Self {
        let style = style.unwrap_or_else(catalog::random_style);
        if style.is_wave_text() {
            return Self {
                style,
                frames: wave_frames(message),
                suffix: None,
            };
        }

        Self {
            style,
            frames: catalog::named_frames(style),
            suffix: Some(format!(" {}...", message)),
        }
    }

    fn compose(&self, index: usize) -> String {
        match &self.suffix {
            Some(suffix) => format!("{}{}", self.frames.frame(index), suffix),
            None => self.frames.frame(index).to_string(),
        }
    }
}

/// A running terminal spinner.
///
/// Starts animating on construction and stops when [`Spinner::stop`] is
/// called or the value is dropped.
///
/// ```no_run
/// use busyline::spinner::{Spinner, SpinnerStyle};
///
/// let mut spinner = Spinner::start("Fetching", Some(SpinnerStyle::MoonPhases));
/// // ... long-running work ...
/// spinner.stop();
/// ```
pub struct Spinner {
    style: SpinnerStyle,
    state: SpinnerState,
    renderer: SharedRenderer,
    cancel: Option<CancelToken>,
    worker: Option<JoinHandle<()>>,
    interactive: bool,
}

impl Spinner {
    /// Start a spinner on stdout.
    pub fn start(message: impl Into<String>, style: Option<SpinnerStyle>) -> Self {
        let options = SpinnerOptions {
            message: message.into(),
            style,
            ..SpinnerOptions::default()
        };
        Self::with_options(options, Box::new(TermRenderer::stdout()))
    }

    /// Start a spinner that draws through `renderer`.
    ///
    /// If the renderer isn't interactive, the message is written once as a
    /// plain line and no render thread is started.
    pub fn with_options(options: SpinnerOptions, renderer: Box<dyn TerminalRenderer>) -> Self {
        let animation = Animation::resolve(&options.message, options.style);
        let interactive = renderer.is_interactive();
        let mut spinner = Self {
            style: animation.style,
            state: SpinnerState::Created,
            renderer: Arc::new(Mutex::new(renderer)),
            cancel: None,
            worker: None,
            interactive,
        };

        if interactive {
            spinner.launch(animation, options.cadence);
        } else {
            spinner.announce(&options.message);
        }
        spinner
    }

    fn launch(&mut self, animation: Animation, cadence: Duration) {
        if let Err(e) = lock(&self.renderer).hide_cursor() {
            debug!(error = %e, "spinner:hide cursor failed");
        }

        let cancel = CancelToken::new();
        let worker_cancel = cancel.clone();
        let renderer = Arc::clone(&self.renderer);
        let frame_count = animation.frames.len();

        let spawned = thread::Builder::new()
            .name("busyline-render".to_string())
            .spawn(move || render_loop(&renderer, &animation, cadence, &worker_cancel));

        match spawned {
            Ok(handle) => {
                debug!(style = %self.style, frames = frame_count, "spinner:running");
                self.cancel = Some(cancel);
                self.worker = Some(handle);
                self.state = SpinnerState::Running;
            }
            Err(e) => {
                // Nothing is animating, so put the cursor back right away
                warn!(error = %e, "spinner:failed to spawn render thread");
                if let Err(e) = lock(&self.renderer).show_cursor() {
                    debug!(error = %e, "spinner:show cursor failed");
                }
                self.state = SpinnerState::Stopped;
            }
        }
    }

    fn announce(&mut self, message: &str) {
        let line = if self.style.is_wave_text() {
            message.to_string()
        } else {
            format!("{}...", message)
        };
        if let Err(e) = lock(&self.renderer).write_plain(&line) {
            debug!(error = %e, "spinner:plain write failed");
        }
        debug!(style = %self.style, "spinner:non-interactive output, animation disabled");
        self.state = SpinnerState::Stopped;
    }

    /// The style that was resolved at construction.
    pub fn style(&self) -> SpinnerStyle {
        self.style
    }

    pub fn state(&self) -> SpinnerState {
        self.state
    }

    /// Whether the spinner is animating (as opposed to the plain fallback).
    pub fn is_interactive(&self) -> bool {
        self.interactive
    }

    /// Stop the render thread and restore the terminal.
    ///
    /// Blocks until the render thread has exited, so no frame can land after
    /// the line has been cleared. Calling it again is a no-op.
    pub fn stop(&mut self) {
        let Some(worker) = self.worker.take() else {
            return;
        };

        self.state = SpinnerState::StopRequested;
        if let Some(cancel) = &self.cancel {
            cancel.cancel();
        }

        if worker.join().is_err() {
            warn!(style = %self.style, "spinner:render thread panicked");
        }

        let mut renderer = lock(&self.renderer);
        if let Err(e) = renderer.clear_line() {
            debug!(error = %e, "spinner:clear line failed");
        }
        if let Err(e) = renderer.show_cursor() {
            debug!(error = %e, "spinner:show cursor failed");
        }
        drop(renderer);

        self.cancel = None;
        self.state = SpinnerState::Stopped;
        debug!(style = %self.style, "spinner:stopped");
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Lock the renderer, recovering it if the render thread panicked mid-write.
fn lock(renderer: &SharedRenderer) -> std::sync::MutexGuard<'_, Box<dyn TerminalRenderer>> {
    renderer.lock().unwrap_or_else(PoisonError::into_inner)
}

fn render_loop(
    renderer: &SharedRenderer,
    animation: &Animation,
    cadence: Duration,
    cancel: &CancelToken,
) {
    let mut index = 0;
    while !cancel.is_cancelled() {
        let line = animation.compose(index);
        if let Err(e) = lock(renderer).write_line(&line) {
            debug!(error = %e, "spinner:frame write failed");
        }
        index = next_index(index, animation.frames.len());

        if cancel.wait_timeout(cadence) {
            break;
        }
    }
}

/// Advance a frame index, wrapping at `len`.
fn next_index(index: usize, len: usize) -> usize {
    (index + 1) % len.max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spinner::renderer::recording::{RecordingRenderer, RenderEvent};

    const FAST: Duration = Duration::from_millis(2);

    fn start_recorded(options: SpinnerOptions) -> (Spinner, RecordingRenderer) {
        let recorder = RecordingRenderer::new();
        let spinner = Spinner::with_options(options, Box::new(recorder.clone()));
        (spinner, recorder)
    }

    fn fast(message: &str, style: SpinnerStyle) -> SpinnerOptions {
        SpinnerOptions::new(message).style(style).cadence(FAST)
    }

    fn wait_for_lines(recorder: &RecordingRenderer, count: usize) {
        for _ in 0..500 {
            if recorder.lines().len() >= count {
                return;
            }
            thread::sleep(Duration::from_millis(5));
        }
        panic!("render loop produced fewer than {count} lines");
    }

    #[test]
    fn test_default_options() {
        let options = SpinnerOptions::default();
        assert_eq!(options.message, "Processing");
        assert_eq!(options.style, None);
        assert_eq!(options.cadence, Duration::from_millis(80));
    }

    #[test]
    fn test_frames_are_written_with_message_suffix() {
        let (mut spinner, recorder) = start_recorded(fast("Working", SpinnerStyle::Classic));
        wait_for_lines(&recorder, 6);
        spinner.stop();

        let lines = recorder.lines();
        let expected = ["| Working...", "/ Working...", "- Working...", "\\ Working..."];
        for (i, line) in lines.iter().enumerate() {
            assert_eq!(line, expected[i % expected.len()]);
        }
    }

    #[test]
    fn test_wave_text_has_no_suffix() {
        let (mut spinner, recorder) = start_recorded(fast("AB CD", SpinnerStyle::WaveText));
        wait_for_lines(&recorder, 8);
        spinner.stop();

        let expected = ["aB CD", "Ab CD", "AB cD", "AB Cd", "AB cD", "Ab CD"];
        for (i, line) in recorder.lines().iter().enumerate() {
            assert_eq!(line, expected[i % expected.len()]);
        }
    }

    #[test]
    fn test_stop_clears_line_and_shows_cursor_last() {
        let (mut spinner, recorder) = start_recorded(fast("Busy", SpinnerStyle::Arrows));
        wait_for_lines(&recorder, 3);
        spinner.stop();

        let events = recorder.events();
        assert_eq!(events.first(), Some(&RenderEvent::HideCursor));
        let n = events.len();
        assert_eq!(&events[n - 2..], &[RenderEvent::Clear, RenderEvent::ShowCursor]);
        assert!(
            events[1..n - 2]
                .iter()
                .all(|e| matches!(e, RenderEvent::Line(_)))
        );
    }

    #[test]
    fn test_no_writes_after_stop() {
        let (mut spinner, recorder) = start_recorded(fast("Busy", SpinnerStyle::Blocks));
        wait_for_lines(&recorder, 2);
        spinner.stop();
        let after_stop = recorder.events().len();
        thread::sleep(Duration::from_millis(30));
        assert_eq!(recorder.events().len(), after_stop);
        assert_eq!(spinner.state(), SpinnerState::Stopped);
    }

    #[test]
    fn test_stop_is_idempotent() {
        let (mut spinner, recorder) = start_recorded(fast("Busy", SpinnerStyle::Classic));
        wait_for_lines(&recorder, 1);
        spinner.stop();
        let after_first = recorder.events();
        spinner.stop();
        drop(spinner);
        assert_eq!(recorder.events(), after_first);
    }

    #[test]
    fn test_drop_stops_spinner() {
        let recorder = RecordingRenderer::new();
        {
            let _spinner =
                Spinner::with_options(fast("Busy", SpinnerStyle::Classic), Box::new(recorder.clone()));
            wait_for_lines(&recorder, 1);
        }
        assert_eq!(recorder.events().last(), Some(&RenderEvent::ShowCursor));
    }

    #[test]
    fn test_stop_interrupts_long_cadence() {
        let (mut spinner, recorder) = start_recorded(
            SpinnerOptions::new("Slow")
                .style(SpinnerStyle::Classic)
                .cadence(Duration::from_secs(30)),
        );
        wait_for_lines(&recorder, 1);
        let start = std::time::Instant::now();
        spinner.stop();
        assert!(start.elapsed() < Duration::from_secs(5));
        assert_eq!(recorder.lines(), vec!["| Slow..."]);
    }

    #[test]
    fn test_state_transitions() {
        let (mut spinner, _recorder) = start_recorded(fast("Busy", SpinnerStyle::Classic));
        assert_ne!(spinner.state(), SpinnerState::Created);
        assert_eq!(spinner.state(), SpinnerState::Running);
        spinner.stop();
        assert_eq!(spinner.state(), SpinnerState::Stopped);
    }

    #[test]
    fn test_constructed_spinner_is_never_in_created_state() {
        for style in SpinnerStyle::ALL {
            let (spinner, _recorder) = start_recorded(fast("Busy", style));
            assert_eq!(spinner.state(), SpinnerState::Running, "{style}");
        }
        let non_interactive = Spinner::with_options(
            fast("Busy", SpinnerStyle::Classic),
            Box::new(RecordingRenderer::non_interactive()),
        );
        assert_eq!(non_interactive.state(), SpinnerState::Stopped);
    }

    #[test]
    fn test_every_named_style_renders_its_catalog_frames() {
        for style in SpinnerStyle::ALL.iter().filter(|s| !s.is_wave_text()) {
            let (mut spinner, recorder) = start_recorded(fast("Busy", *style));
            wait_for_lines(&recorder, 1);
            spinner.stop();
            let first = catalog::frame_set_for(style.id()).unwrap().frame(0).to_string();
            assert_eq!(recorder.lines()[0], format!("{first} Busy..."), "{style}");
        }
    }

    #[test]
    fn test_random_style_is_never_wave_text() {
        for _ in 0..50 {
            let (spinner, _recorder) = start_recorded(SpinnerOptions::new("x").cadence(FAST));
            assert_ne!(spinner.style(), SpinnerStyle::WaveText);
        }
    }

    #[test]
    fn test_non_interactive_prints_once() {
        let recorder = RecordingRenderer::non_interactive();
        let mut spinner = Spinner::with_options(
            SpinnerOptions::new("Loading").style(SpinnerStyle::Classic),
            Box::new(recorder.clone()),
        );
        assert!(!spinner.is_interactive());
        assert_eq!(spinner.state(), SpinnerState::Stopped);
        spinner.stop();
        assert_eq!(
            recorder.events(),
            vec![RenderEvent::Plain("Loading...".to_string())]
        );
    }

    #[test]
    fn test_non_interactive_wave_text_prints_message() {
        let recorder = RecordingRenderer::non_interactive();
        let _spinner = Spinner::with_options(
            SpinnerOptions::new("Loading").style(SpinnerStyle::WaveText),
            Box::new(recorder.clone()),
        );
        assert_eq!(
            recorder.events(),
            vec![RenderEvent::Plain("Loading".to_string())]
        );
    }

    #[test]
    fn test_write_errors_are_contained() {
        let recorder = RecordingRenderer::failing_writes();
        let mut spinner =
            Spinner::with_options(fast("Busy", SpinnerStyle::Classic), Box::new(recorder.clone()));
        wait_for_lines(&recorder, 3);
        spinner.stop();
        assert_eq!(recorder.events().last(), Some(&RenderEvent::ShowCursor));
    }

    #[test]
    fn test_next_index_cycles() {
        for len in [1, 100] {
            let mut index = 0;
            for _ in 0..len * 3 {
                index = next_index(index, len);
                assert!(index < len);
            }
            // after len advances the cycle is back at the first frame
            let mut index = 0;
            for _ in 0..len {
                index = next_index(index, len);
            }
            assert_eq!(index, 0);
        }
    }

    #[test]
    fn test_single_frame_repeats() {
        let (mut spinner, recorder) = start_recorded(fast("x", SpinnerStyle::WaveText));
        wait_for_lines(&recorder, 4);
        spinner.stop();
        assert!(recorder.lines().iter().all(|line| line == "x"));
    }
}
