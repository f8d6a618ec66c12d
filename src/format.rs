//! Labels and export names for recorded clips.

/// Digits used for clip ids in export names.
pub const DEFAULT_PAD_DIGITS: usize = 5;

/// Length of a recording session's countdown, in milliseconds.
pub const SESSION_TIME_LIMIT_MS: u64 = 900_000;

/// Left-pad the decimal rendering of `number` with `'0'` up to `digits` characters.
///
/// Longer renderings are returned unchanged. The sign is part of the rendering,
/// so `pad_zeroes(-7, 4)` is `"00-7"`.
pub fn pad_zeroes(number: i64, digits: usize) -> String {
    pad_rendered(number.to_string(), digits)
}

fn pad_rendered(rendered: String, digits: usize) -> String {
    if rendered.len() >= digits {
        return rendered;
    }
    let mut padded = "0".repeat(digits - rendered.len());
    padded.push_str(&rendered);
    padded
}

/// Export name for a single-word clip: `{uid}_{id:05}_{word}_{file_name}`.
pub fn clip_display_name(uid: &str, id: u64, word: &str, file_name: &str) -> String {
    format!(
        "{uid}_{}_{word}_{file_name}",
        pad_rendered(id.to_string(), DEFAULT_PAD_DIGITS)
    )
}

/// Export name for a whole-session recording; the words are joined with `&`.
pub fn session_display_name<S: AsRef<str>>(
    uid: &str,
    id: u64,
    words: &[S],
    file_name: &str,
) -> String {
    let joined = words
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join("&");
    clip_display_name(uid, id, &joined, file_name)
}

/// `MM:SS` label for a countdown with `remaining_ms` left.
///
/// The partial second counts as a whole one, so 59_001 ms reads `01:00`
/// and the label never shows `00:00` while time remains.
pub fn countdown_label(remaining_ms: u64) -> String {
    let seconds = (remaining_ms / 1000 + 1) as i64;
    format!("{}:{}", pad_zeroes(seconds / 60, 2), pad_zeroes(seconds % 60, 2))
}
