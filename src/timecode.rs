/*!
 * SRT timecode conversion.
 *
 * Timecodes have the form `HH:MM:SS,mmm`. Hours are two or more digits so that
 * long-form media (100 hours and beyond) is accepted; minutes and seconds are
 * exactly two digits and milliseconds exactly three.
 */

use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::FormatError;

/// Pattern fragment shared with the block grammar in `subtitle_processor`
pub(crate) const TIMECODE_PATTERN: &str = r"[0-9]{2,}:[0-9]{2}:[0-9]{2},[0-9]{3}";

static TIMECODE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-9]{2,}):([0-9]{2}):([0-9]{2}),([0-9]{3})$").expect("Invalid timecode regex")
});

/// Parse a timecode into seconds.
///
/// The value is computed in whole milliseconds and divided once, so
/// `parse("01:02:03,456")` is exactly `3723.456`.
pub fn parse(text: &str) -> Result<f64, FormatError> {
    parse_millis(text).map(|ms| ms as f64 / 1000.0)
}

/// Parse a timecode into whole milliseconds
pub fn parse_millis(text: &str) -> Result<u64, FormatError> {
    let caps = TIMECODE_REGEX
        .captures(text)
        .ok_or_else(|| FormatError::InvalidTimecode(text.to_string()))?;

    let hours = parse_field(&caps[1], "hours")?;
    let minutes = parse_field(&caps[2], "minutes")?;
    let seconds = parse_field(&caps[3], "seconds")?;
    let millis = parse_field(&caps[4], "milliseconds")?;

    hours
        .checked_mul(3_600_000)
        .and_then(|total| total.checked_add(minutes * 60_000 + seconds * 1_000 + millis))
        .ok_or_else(|| FormatError::InvalidNumber {
            field: "hours",
            value: caps[1].to_string(),
        })
}

/// Format seconds as `HH:MM:SS,mmm`, rounded to the nearest millisecond
pub fn format(seconds: f64) -> String {
    let ms = (seconds * 1000.0).round().max(0.0) as u64;
    let hours = ms / 3_600_000;
    let minutes = (ms % 3_600_000) / 60_000;
    let secs = (ms % 60_000) / 1_000;
    let millis = ms % 1_000;

    format!("{:02}:{:02}:{:02},{:03}", hours, minutes, secs, millis)
}

fn parse_field(value: &str, field: &'static str) -> Result<u64, FormatError> {
    value.parse::<u64>().map_err(|_| FormatError::InvalidNumber {
        field,
        value: value.to_string(),
    })
}
