//! Time parsing and formatting utilities

use std::fmt::Write;

/// Frame rate substituted when a caller passes `0`
pub const DEFAULT_FPS: f64 = 23.997;

const NANOS_PER_SEC: u64 = 1_000_000_000;

/// Resolve a caller-supplied frame rate, mapping `0` to [`DEFAULT_FPS`]
pub fn effective_fps(fps: f64) -> f64 {
    if fps == 0.0 {
        DEFAULT_FPS
    } else {
        fps
    }
}

/// Format seconds as a compact elapsed duration such as `1h2m3.5s`.
///
/// Whole hours and minutes are only printed when non-zero leading units
/// require them (`1h0m0s`, `1m30s`). Values under one second switch to
/// `ms`, `µs` or `ns`. Zero is `0s`.
pub fn format_elapsed(seconds: f64) -> String {
    let nanos = (seconds * NANOS_PER_SEC as f64).round() as i64;
    if nanos == 0 {
        return "0s".to_string();
    }

    let mut out = String::new();
    if nanos < 0 {
        out.push('-');
    }
    let nanos = nanos.unsigned_abs();

    if nanos < NANOS_PER_SEC {
        let (scale, unit) = if nanos < 1_000 {
            (1, "ns")
        } else if nanos < 1_000_000 {
            (1_000, "µs")
        } else {
            (1_000_000, "ms")
        };
        out.push_str(&decimal(nanos, scale));
        out.push_str(unit);
        return out;
    }

    let whole = nanos / NANOS_PER_SEC;
    let hours = whole / 3600;
    let minutes = (whole / 60) % 60;
    let secs = whole % 60;

    if hours > 0 {
        let _ = write!(out, "{}h", hours);
    }
    if hours > 0 || minutes > 0 {
        let _ = write!(out, "{}m", minutes);
    }
    out.push_str(&decimal(secs * NANOS_PER_SEC + nanos % NANOS_PER_SEC, NANOS_PER_SEC));
    out.push('s');
    out
}

/// Render `value / scale` with trailing fractional zeros trimmed
fn decimal(value: u64, scale: u64) -> String {
    let whole = value / scale;
    let frac = value % scale;
    if frac == 0 {
        return whole.to_string();
    }
    let width = scale.ilog10() as usize;
    let digits = format!("{:0width$}", frac, width = width);
    format!("{}.{}", whole, digits.trim_end_matches('0'))
}

/// Format seconds as `HH:MM:SS:FF`.
///
/// The frame field is always `00`; `fps` is accepted for the eventual frame
/// computation but not used yet. Negative input formats as zero.
// TODO: derive FF from the fractional second once callers pass real frame rates.
pub fn format_timecode(seconds: f64, _fps: f64) -> String {
    let whole = if seconds.is_finite() && seconds > 0.0 {
        seconds.trunc() as u64
    } else {
        0
    };
    let hours = whole / 3600;
    let minutes = (whole / 60) % 60;
    let secs = whole % 60;
    format!("{:02}:{:02}:{:02}:{:02}", hours, minutes, secs, 0)
}

/// Scan up to four colon-delimited integer fields from timecode text.
///
/// A `;` is read as a `:` so drop-frame notation scans the same way.
/// Scanning stops at the first field without leading digits or at the first
/// field not followed by a colon. Returns the fields and how many were read.
pub fn scan_timecode_fields(text: &str) -> ([u64; 4], usize) {
    let normalized = text.trim().replace(';', ":");
    let mut fields = [0u64; 4];
    let mut count = 0;
    let mut rest = normalized.as_str();

    for slot in fields.iter_mut() {
        let end = rest
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(rest.len());
        let Ok(value) = rest[..end].parse::<u64>() else {
            break;
        };
        *slot = value;
        count += 1;
        match rest[end..].strip_prefix(':') {
            Some(next) => rest = next,
            None => break,
        }
    }

    (fields, count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_fps() {
        assert_eq!(effective_fps(0.0), DEFAULT_FPS);
        assert_eq!(effective_fps(25.0), 25.0);
    }

    #[test]
    fn test_format_elapsed_whole_units() {
        assert_eq!(format_elapsed(0.0), "0s");
        assert_eq!(format_elapsed(5.0), "5s");
        assert_eq!(format_elapsed(90.0), "1m30s");
        assert_eq!(format_elapsed(3600.0), "1h0m0s");
        assert_eq!(format_elapsed(3723.5), "1h2m3.5s");
    }

    #[test]
    fn test_format_elapsed_sub_second() {
        assert_eq!(format_elapsed(0.5), "500ms");
        assert_eq!(format_elapsed(0.0015), "1.5ms");
        assert_eq!(format_elapsed(0.000002), "2µs");
        assert_eq!(format_elapsed(-1.25), "-1.25s");
    }

    #[test]
    fn test_format_timecode_zero_frames() {
        assert_eq!(format_timecode(3723.5, 24.0), "01:02:03:00");
        assert_eq!(format_timecode(0.0, 0.0), "00:00:00:00");
        assert_eq!(format_timecode(360000.0, 30.0), "100:00:00:00");
        assert_eq!(format_timecode(-4.0, 30.0), "00:00:00:00");
    }

    #[test]
    fn test_scan_timecode_fields() {
        assert_eq!(scan_timecode_fields("01:02:03:12"), ([1, 2, 3, 12], 4));
        assert_eq!(scan_timecode_fields("01:02:03;12"), ([1, 2, 3, 12], 4));
        assert_eq!(scan_timecode_fields(" 01:02:03 "), ([1, 2, 3, 0], 3));
        assert_eq!(scan_timecode_fields("01:02:03.5"), ([1, 2, 3, 0], 3));
        assert_eq!(scan_timecode_fields("01:xx:03").1, 1);
        assert_eq!(scan_timecode_fields("bad").1, 0);
        assert_eq!(scan_timecode_fields("").1, 0);
    }
}
