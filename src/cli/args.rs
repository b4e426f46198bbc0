//! Command-line argument definitions

use clap::Args;

use crate::adapters::DRY_RUN;
use crate::domain::geometry::{Crop, Rect};
use crate::domain::timeline::Range;

/// Arguments for the timecode command
#[derive(Args, Debug)]
pub struct TimecodeArgs {
    /// Timecode (HH:MM:SS:FF, HH:MM:SS;FF or HH:MM:SS)
    pub text: String,

    /// Frame rate; 0 selects 23.997 (default: config timecode.fps)
    #[arg(long)]
    pub fps: Option<f64>,
}

/// Arguments for the splice command
#[derive(Args, Debug)]
pub struct SpliceArgs {
    /// Splice as [[start,end],...] in seconds
    pub splice: String,

    /// Asset bound as [start,end]; reports whether every segment fits
    #[arg(long, value_parser = parse_range)]
    pub bound: Option<Range>,
}

/// Arguments for the crop command
#[derive(Args, Debug)]
pub struct CropArgs {
    /// Source frame size (WIDTHxHEIGHT)
    #[arg(long, value_parser = parse_size)]
    pub source: Rect,

    /// Insets as left,top,right,bottom
    #[arg(long, value_parser = parse_crop)]
    pub insets: Crop,
}

/// Arguments for the scale command
#[derive(Args, Debug)]
pub struct ScaleArgs {
    /// Source frame size (WIDTHxHEIGHT)
    #[arg(long, value_parser = parse_size)]
    pub source: Rect,

    /// Crop rectangle as x0,y0,x1,y1
    #[arg(long, value_parser = parse_rect)]
    pub rect: Rect,
}

/// Arguments for the prepare command
#[derive(Args, Debug)]
pub struct PrepareArgs {
    /// Source asset location
    #[arg(short, long)]
    pub input: String,

    /// Output destination
    #[arg(short, long)]
    pub output: String,

    /// Job identifier (default: generated)
    #[arg(long)]
    pub id: Option<String>,

    /// Splice as [[start,end],...]; empty keeps the whole asset
    #[arg(long, default_value = "")]
    pub splice: String,

    /// Asset duration as a timecode, bounds the splice
    #[arg(long)]
    pub duration: Option<String>,

    /// Source frame size (WIDTHxHEIGHT)
    #[arg(long, value_parser = parse_size)]
    pub size: Rect,

    /// Insets as left,top,right,bottom
    #[arg(long, value_parser = parse_crop, default_value = "0,0,0,0")]
    pub crop: Crop,

    /// Shrink the crop to the source aspect ratio
    #[arg(long)]
    pub keep_aspect: bool,

    /// Frame rate; 0 selects 23.997 (default: config timecode.fps)
    #[arg(long)]
    pub fps: Option<f64>,

    /// Provider to submit to
    #[arg(long, default_value = DRY_RUN)]
    pub provider: String,
}

/// Parse `WIDTHxHEIGHT` into a frame anchored at the origin
pub fn parse_size(s: &str) -> Result<Rect, String> {
    let (w, h) = s
        .split_once(|c: char| c == 'x' || c == 'X')
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got {:?}", s))?;
    let width = parse_int(w)?;
    let height = parse_int(h)?;
    Ok(Rect::from_size(width, height))
}

/// Parse `left,top,right,bottom` insets
pub fn parse_crop(s: &str) -> Result<Crop, String> {
    let [left, top, right, bottom] = parse_four(s)?;
    let inset = |v: i64| u32::try_from(v).map_err(|_| format!("inset {} out of range", v));
    Ok(Crop::new(inset(left)?, inset(top)?, inset(right)?, inset(bottom)?))
}

/// Parse `x0,y0,x1,y1` corners
pub fn parse_rect(s: &str) -> Result<Rect, String> {
    let [x0, y0, x1, y1] = parse_four(s)?;
    Ok(Rect::new(x0, y0, x1, y1))
}

/// Parse a range in its `[start,end]` wire form
pub fn parse_range(s: &str) -> Result<Range, String> {
    serde_json::from_str(s).map_err(|e| format!("expected [start,end]: {}", e))
}

fn parse_four(s: &str) -> Result<[i64; 4], String> {
    let values = s
        .split(',')
        .map(parse_int)
        .collect::<Result<Vec<_>, _>>()?;
    <[i64; 4]>::try_from(values).map_err(|v| format!("expected 4 values, got {}", v.len()))
}

fn parse_int(s: &str) -> Result<i64, String> {
    s.trim()
        .parse()
        .map_err(|e| format!("invalid number {:?}: {}", s.trim(), e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_size() {
        assert_eq!(parse_size("1920x1080").unwrap(), Rect::from_size(1920, 1080));
        assert_eq!(parse_size("640X480").unwrap(), Rect::from_size(640, 480));
        assert!(parse_size("1920").is_err());
        assert!(parse_size("wide x tall").is_err());
    }

    #[test]
    fn test_parse_crop() {
        assert_eq!(parse_crop("1, 2,3,4").unwrap(), Crop::new(1, 2, 3, 4));
        assert!(parse_crop("1,2,3").is_err());
        assert!(parse_crop("-1,0,0,0").is_err());
    }

    #[test]
    fn test_parse_rect() {
        assert_eq!(parse_rect("10,20,-5,40").unwrap(), Rect::new(10, 20, -5, 40));
        assert!(parse_rect("1,2,3,4,5").is_err());
    }

    #[test]
    fn test_parse_range() {
        assert_eq!(parse_range("[0,12.5]").unwrap(), Range::new(0.0, 12.5));
        assert!(parse_range("0-12").is_err());
    }
}
