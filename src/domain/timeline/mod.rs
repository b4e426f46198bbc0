// Timeline models - Time ranges and splices of a source asset
//
// Ranges and splices keep a hand-written text codec: ranges encode as a
// literal `[start,end]` with fixed-point floats, splices as an array of those.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::de::Error as _;
use serde::ser::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::value::RawValue;
use tracing::debug;

use crate::domain::errors::DomainError;
use crate::utils::time::{effective_fps, format_elapsed, format_timecode, scan_timecode_fields};
use crate::utils::{abs_diff, max, min};

/// A time interval in seconds. Endpoints are not required to be ordered.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Range {
    pub start: f64,
    pub end: f64,
}

impl Range {
    /// The empty range at zero
    pub const ZERO: Range = Range {
        start: 0.0,
        end: 0.0,
    };

    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// Same interval with `start <= end`
    pub fn canon(self) -> Self {
        if self.start > self.end {
            Self::new(self.end, self.start)
        } else {
            self
        }
    }

    /// Length in seconds, always non-negative
    pub fn span(&self) -> f64 {
        abs_diff(self.end, self.start)
    }

    /// Length as a duration. Non-finite lengths are reported as zero.
    pub fn size(&self) -> Duration {
        Duration::try_from_secs_f64(self.span()).unwrap_or_default()
    }

    /// Total order: ascending start, then ascending duration
    pub fn order(&self, other: &Range) -> Ordering {
        self.start
            .total_cmp(&other.start)
            .then_with(|| self.span().total_cmp(&other.span()))
    }

    /// True when `other` lies entirely inside this range
    pub fn encloses(&self, other: &Range) -> bool {
        other.start >= self.start && other.end <= self.end
    }

    /// End point as `HH:MM:SS:FF`. The frame field is always `00`.
    pub fn timecode(&self, fps: f64) -> String {
        format_timecode(self.end, fps)
    }

    /// Both endpoints as `HH:MM:SS:FF`
    pub fn timecodes(&self, fps: f64) -> (String, String) {
        (format_timecode(self.start, fps), format_timecode(self.end, fps))
    }

    /// Parse `HH:MM:SS:FF`, `HH:MM:SS;FF` or `HH:MM:SS` into an elapsed range.
    ///
    /// The result is anchored at zero: `Range { 0, total }`. A frame rate of
    /// `0` falls back to the default 23.997 fps. The drop-frame `;` marker is
    /// accepted but frames are counted the same way.
    pub fn parse(text: &str, fps: f64) -> Result<Self, DomainError> {
        let fps = effective_fps(fps);
        let (fields, count) = scan_timecode_fields(text);
        if count < 3 {
            return Err(DomainError::InvalidTimecode {
                text: text.to_string(),
            });
        }

        let [hours, minutes, seconds, frames] = fields.map(|v| v as f64);
        let total = hours * 3600.0 + minutes * 60.0 + seconds + frames / fps;
        debug!(text, fps, total, "parsed timecode");
        Ok(Self::new(0.0, total))
    }

    /// Wire form `[start,end]`, never using exponent notation
    pub fn encode(&self) -> String {
        format!("[{},{}]", self.start, self.end)
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}-{})",
            format_elapsed(self.start),
            format_elapsed(self.end)
        )
    }
}

impl Serialize for Range {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let raw = RawValue::from_string(self.encode()).map_err(S::Error::custom)?;
        raw.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Range {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let [start, end] = <[f64; 2]>::deserialize(deserializer)?;
        Ok(Self::new(start, end))
    }
}

/// Ordered collection of source ranges
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Splice(Vec<Range>);

impl Splice {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, range: Range) {
        self.0.push(range);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Range> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Range] {
        &self.0
    }

    /// Sum of member durations. Overlapping members are counted twice.
    ///
    /// Saturates at [`Duration::MAX`].
    pub fn size(&self) -> Duration {
        self.0
            .iter()
            .map(Range::size)
            .fold(Duration::ZERO, Duration::saturating_add)
    }

    /// Smallest range spanning every member, or [`Range::ZERO`] when empty
    pub fn union(&self) -> Range {
        let Some((first, rest)) = self.0.split_first() else {
            return Range::ZERO;
        };
        rest.iter().fold(*first, |acc, r| {
            Range::new(min(acc.start, r.start), max(acc.end, r.end))
        })
    }

    /// True when every member lies inside `bound`; vacuously true when empty
    pub fn within(&self, bound: Range) -> bool {
        self.0.iter().all(|r| bound.encloses(r))
    }

    /// Whether members already follow [`Range::order`]
    pub fn is_sorted(&self) -> bool {
        self.0
            .windows(2)
            .all(|pair| pair[0].order(&pair[1]) != Ordering::Greater)
    }

    /// Stable sort by [`Range::order`]
    pub fn sort(&mut self) {
        self.0.sort_by(Range::order);
    }

    /// Decode `[[a,b],...]` into this splice.
    ///
    /// Blank input and `null` decode to an empty splice. Rows longer than two
    /// numbers are truncated to the first two. On error `self` is unchanged.
    pub fn decode(&mut self, data: &[u8]) -> Result<(), DomainError> {
        if data.iter().all(u8::is_ascii_whitespace) {
            self.0.clear();
            return Ok(());
        }

        let rows: Option<Vec<Vec<f64>>> =
            serde_json::from_slice(data).map_err(|e| DomainError::SpliceDecode(e.to_string()))?;
        let ranges = ranges_from_rows(rows.unwrap_or_default()).map_err(DomainError::SpliceDecode)?;

        debug!(members = ranges.len(), "decoded splice");
        self.0 = ranges;
        Ok(())
    }

    /// Decode a splice from its text form
    pub fn from_json(text: &str) -> Result<Self, DomainError> {
        let mut splice = Self::new();
        splice.decode(text.as_bytes())?;
        Ok(splice)
    }

    /// Wire form `[[a,b],[c,d]]`
    pub fn encode(&self) -> String {
        let members: Vec<String> = self.0.iter().map(Range::encode).collect();
        format!("[{}]", members.join(","))
    }
}

fn ranges_from_rows(rows: Vec<Vec<f64>>) -> Result<Vec<Range>, String> {
    rows.into_iter()
        .enumerate()
        .map(|(i, row)| match row.as_slice() {
            [start, end, ..] => Ok(Range::new(*start, *end)),
            _ => Err(format!("row {} has {} values, expected 2", i, row.len())),
        })
        .collect()
}

impl From<Vec<Range>> for Splice {
    fn from(ranges: Vec<Range>) -> Self {
        Self(ranges)
    }
}

impl FromIterator<Range> for Splice {
    fn from_iter<I: IntoIterator<Item = Range>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for Splice {
    type Item = Range;
    type IntoIter = std::vec::IntoIter<Range>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Splice {
    type Item = &'a Range;
    type IntoIter = std::slice::Iter<'a, Range>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for Splice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl FromStr for Splice {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_json(s)
    }
}

impl Serialize for Splice {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let raw = RawValue::from_string(self.encode()).map_err(S::Error::custom)?;
        raw.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Splice {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let rows = Option::<Vec<Vec<f64>>>::deserialize(deserializer)?;
        ranges_from_rows(rows.unwrap_or_default())
            .map(Splice)
            .map_err(D::Error::custom)
    }
}
