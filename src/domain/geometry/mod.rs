// Frame geometry - Crop insets and aspect-preserving scaling
//
// Rectangles are half-open pixel boxes `[min, max)`. Operations never fail:
// inverted or out-of-frame input is canonicalized and clipped instead, and
// coordinate arithmetic saturates at the i64 bounds.

use std::fmt;
use std::ops::{Add, Neg, Sub};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::utils::{ceil_div, gcd, max, min};

/// Integer pixel coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i64,
    pub y: i64,
}

impl Point {
    pub const ZERO: Point = Point { x: 0, y: 0 };

    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x.saturating_add(rhs.x), self.y.saturating_add(rhs.y))
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x.saturating_sub(rhs.x), self.y.saturating_sub(rhs.y))
    }
}

impl Neg for Point {
    type Output = Point;

    fn neg(self) -> Point {
        Point::new(self.x.saturating_neg(), self.y.saturating_neg())
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

/// Rectangle spanned by two corner points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rect {
    pub min: Point,
    pub max: Point,
}

impl Rect {
    pub const ZERO: Rect = Rect {
        min: Point::ZERO,
        max: Point::ZERO,
    };

    /// Rectangle from raw corners, kept exactly as given
    pub fn new(x0: i64, y0: i64, x1: i64, y1: i64) -> Self {
        Self {
            min: Point::new(x0, y0),
            max: Point::new(x1, y1),
        }
    }

    /// `width x height` frame anchored at the origin
    pub fn from_size(width: i64, height: i64) -> Self {
        Self::new(0, 0, width, height)
    }

    pub fn width(&self) -> i64 {
        self.max.x.saturating_sub(self.min.x)
    }

    pub fn height(&self) -> i64 {
        self.max.y.saturating_sub(self.min.y)
    }

    /// Encloses no pixels (zero or negative extent on either axis)
    pub fn is_empty(&self) -> bool {
        self.min.x >= self.max.x || self.min.y >= self.max.y
    }

    /// Same rectangle with `min <= max` on both axes
    pub fn canon(self) -> Self {
        Self::new(
            min(self.min.x, self.max.x),
            min(self.min.y, self.max.y),
            max(self.min.x, self.max.x),
            max(self.min.y, self.max.y),
        )
    }

    /// Overlap of two rectangles. An empty overlap is [`Rect::ZERO`].
    pub fn intersect(self, other: Rect) -> Self {
        let r = Self::new(
            max(self.min.x, other.min.x),
            max(self.min.y, other.min.y),
            min(self.max.x, other.max.x),
            min(self.max.y, other.max.y),
        );
        if r.is_empty() {
            Self::ZERO
        } else {
            r
        }
    }

    pub fn translate(self, by: Point) -> Self {
        Self {
            min: self.min + by,
            max: self.max + by,
        }
    }

    /// Midpoint, rounded toward negative infinity
    pub fn center(&self) -> Point {
        Point::new(
            midpoint(self.min.x, self.max.x),
            midpoint(self.min.y, self.max.y),
        )
    }

    /// True when `other` lies inside this rectangle
    pub fn contains(&self, other: &Rect) -> bool {
        other.min.x >= self.min.x
            && other.min.y >= self.min.y
            && other.max.x <= self.max.x
            && other.max.y <= self.max.y
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.min, self.max)
    }
}

/// Pixel insets trimmed from each edge of a source frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Crop {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl Crop {
    pub fn new(left: u32, top: u32, right: u32, bottom: u32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// No edge is trimmed
    pub fn is_empty(&self) -> bool {
        self.left == 0 && self.top == 0 && self.right == 0 && self.bottom == 0
    }

    /// Rectangle left after trimming `source` by these insets.
    ///
    /// The result never extends past `source`; insets that overlap collapse
    /// it to [`Rect::ZERO`].
    pub fn rect(&self, source: Rect) -> Rect {
        let source = source.canon();
        Rect::new(
            source.min.x.saturating_add(i64::from(self.left)),
            source.min.y.saturating_add(i64::from(self.top)),
            source.max.x.saturating_sub(i64::from(self.right)),
            source.max.y.saturating_sub(i64::from(self.bottom)),
        )
        .intersect(source)
        .canon()
    }

    /// Insets that reproduce `crop` (clipped to `source`) through [`Crop::rect`]
    pub fn from_rect(source: Rect, crop: Rect) -> Crop {
        let source = source.canon();
        let clipped = crop.canon().intersect(source);

        if clipped.is_empty() {
            // Trimming the full extent from the near edges empties the frame.
            return Crop::new(inset(source.width()), inset(source.height()), 0, 0);
        }

        Crop::new(
            inset(clipped.min.x.saturating_sub(source.min.x)),
            inset(clipped.min.y.saturating_sub(source.min.y)),
            inset(source.max.x.saturating_sub(clipped.max.x)),
            inset(source.max.y.saturating_sub(clipped.max.y)),
        )
    }

    /// Insets of this crop after scaling it to the source aspect ratio
    pub fn scale(&self, source: Rect) -> Crop {
        Crop::from_rect(source, scale(source, self.rect(source)))
    }
}

impl fmt::Display for Crop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{},{},{}",
            self.left, self.top, self.right, self.bottom
        )
    }
}

/// `floor((a + b) / 2)` without overflowing
fn midpoint(a: i64, b: i64) -> i64 {
    (a >> 1) + (b >> 1) + (a & b & 1)
}

fn inset(v: i64) -> u32 {
    u32::try_from(v.max(0)).unwrap_or(u32::MAX)
}

/// Width and height of `rect` reduced to lowest terms.
///
/// Returns [`Point::ZERO`] when either dimension is zero.
pub fn aspect(rect: Rect) -> Point {
    let rect = rect.canon();
    let (w, h) = (rect.width(), rect.height());
    if w == 0 || h == 0 {
        return Point::ZERO;
    }
    let d = gcd(w, h);
    Point::new(w / d, h / d)
}

/// Shrink `crop` to the aspect ratio of `source`, keeping its center.
///
/// `crop` is first clipped to `source`. The result is the largest whole
/// multiple of the reduced aspect ratio that fits inside the clipped crop,
/// centered where the clipped crop was. A `source` with a zero dimension has no
/// ratio, so the clipped crop comes back unchanged.
pub fn scale(source: Rect, crop: Rect) -> Rect {
    let source = source.canon();
    let clipped = crop.canon().intersect(source);

    let ar = aspect(source);
    if ar.x == 0 || ar.y == 0 {
        return clipped;
    }

    let center = clipped.center();
    let local = clipped.translate(-clipped.min);
    let (w, h) = (local.max.x, local.max.y);

    // Smallest ar-proportioned envelope covering the crop, in ar units.
    let units = max(ceil_div(w, ar.x), ceil_div(h, ar.y));
    let envelope = Point::new(units.saturating_mul(ar.x), units.saturating_mul(ar.y));

    // Whole units each axis must give up to fit; the larger wins on both axes.
    let trim_x = ceil_div(envelope.x.saturating_sub(w), ar.x);
    let trim_y = ceil_div(envelope.y.saturating_sub(h), ar.y);
    let trim = max(trim_x, trim_y);

    let far = envelope - Point::new(trim.saturating_mul(ar.x), trim.saturating_mul(ar.y));
    let half = Point::new(far.x / 2, far.y / 2);
    let scaled = Rect {
        min: Point::ZERO,
        max: far,
    }
    .translate(center - half);

    debug!(%source, %clipped, %scaled, "scaled crop to {}:{}", ar.x, ar.y);
    scaled
}
