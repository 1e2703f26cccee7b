//! Wave-text animation derived from a message.
//!
//! Every non-blank character is uppercased except one, which is lowercased.
//! The lowercase position sweeps forward across the message and back again:
//! `"AB CD"` animates as `aB CD`, `Ab CD`, `AB cD`, `AB Cd`, `AB cD`, `Ab CD`.

use std::borrow::Cow;

use super::catalog::FrameSet;

const BLANK: char = ' ';

/// Generate the wave frames for `message`.
///
/// With L non-blank characters this yields 2L-2 frames for L >= 2. Messages
/// with fewer than two non-blank characters can't sweep, so they yield a
/// single frame equal to the message.
pub fn wave_frames(message: &str) -> FrameSet {
    let sweep_len = message.chars().filter(|c| *c != BLANK).count();

    if sweep_len < 2 {
        return FrameSet::single(message.to_string());
    }

    // Backward pass skips both endpoints so they aren't shown twice in a row
    let frames: Vec<Cow<'static, str>> = (0..sweep_len)
        .chain((1..sweep_len - 1).rev())
        .map(|position| Cow::Owned(wave_frame(message, position)))
        .collect();

    FrameSet::new(frames).unwrap_or_else(|| FrameSet::single(message.to_string()))
}

/// Build one frame with the non-blank character at `position` lowercased.
fn wave_frame(message: &str, position: usize) -> String {
    let mut non_blank = 0;
    message
        .chars()
        .map(|c| {
            if c == BLANK {
                return c;
            }
            let mapped = if non_blank == position {
                single_char(c.to_lowercase()).unwrap_or(c)
            } else {
                single_char(c.to_uppercase()).unwrap_or(c)
            };
            non_blank += 1;
            mapped
        })
        .collect()
}

/// Case mappings that expand (e.g. 'ß' -> "SS") would change the frame
/// length, so those characters are left as they are.
fn single_char(mut mapping: impl Iterator<Item = char>) -> Option<char> {
    let first = mapping.next()?;
    match mapping.next() {
        None => Some(first),
        Some(_) => None,
    }
}
