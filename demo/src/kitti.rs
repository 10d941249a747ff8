//! Loader for KITTI tracking labels.
//!
//! Each row is `frame track_id type truncated occluded alpha left top right
//! bottom h w l x y z rot_y [score]`. Object positions and headings are shifted
//! into the positive range and scaled into 6-D integer points grouped by frame.

use std::{
    collections::BTreeMap,
    fs::File,
    io::{BufRead, BufReader},
    path::{Path, PathBuf},
};

use conv::{ApproxFrom, RoundToZero};
use tracing::{info, warn};

pub const DIMENSION: usize = 6;

pub type Frames = BTreeMap<u32, Vec<[u32; DIMENSION]>>;

const POSITION_OFFSET: f32 = 50.0;
// The labels are shifted by exactly 3.14, not by pi.
#[allow(clippy::approx_constant)]
const HEADING_OFFSET: f32 = 3.14;
const MIN_FIELDS: usize = 17;

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("line {line}: {reason}")]
    Malformed { line: usize, reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Label {
    frame: u32,
    x: f32,
    y: f32,
    z: f32,
    rot_y: f32,
}

impl Label {
    // None if a scaled value does not fit a u32 coordinate.
    fn to_point(self, scale: f32) -> Option<[u32; DIMENSION]> {
        let quantize = |value: f32| <u32 as ApproxFrom<f32, RoundToZero>>::approx_from(value * scale).ok();
        Some([
            quantize(self.x + POSITION_OFFSET)?,
            quantize(self.y + POSITION_OFFSET)?,
            quantize(self.z + POSITION_OFFSET)?,
            quantize(self.rot_y + HEADING_OFFSET)?,
            0,
            0,
        ])
    }
}

/// Read every labelled object of `path` into points grouped by frame.
///
/// # Errors
///
/// I/O failures and rows that do not parse. Rows whose scaled values do not
/// fit a coordinate are skipped with a warning.
pub fn load(path: &Path, scale: f32) -> Result<Frames, LoadError> {
    let io_error = |source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    };
    let file = File::open(path).map_err(io_error)?;

    let mut frames = Frames::new();
    let mut skipped = 0;
    for (number, line) in BufReader::new(file).lines().enumerate() {
        let line = line.map_err(io_error)?;
        let label = parse_line(&line).map_err(|reason| LoadError::Malformed {
            line: number + 1,
            reason,
        })?;
        let Some(label) = label else { continue };
        match label.to_point(scale) {
            Some(point) => frames.entry(label.frame).or_default().push(point),
            None => {
                warn!(line = number + 1, "label out of coordinate range, skipped");
                skipped += 1;
            }
        }
    }
    info!(frames = frames.len(), skipped, path = %path.display(), "loaded tracking labels");
    Ok(frames)
}

// Ok(None) for blank lines and `DontCare` rows.
fn parse_line(line: &str) -> Result<Option<Label>, String> {
    let fields = line.split_whitespace().collect::<Vec<_>>();
    if fields.is_empty() || fields.get(2) == Some(&"DontCare") {
        return Ok(None);
    }
    if fields.len() < MIN_FIELDS {
        return Err(format!("expected {MIN_FIELDS} fields, found {}", fields.len()));
    }
    let frame = fields[0]
        .parse::<u32>()
        .map_err(|e| format!("invalid frame {:?}: {e}", fields[0]))?;
    let number = |i: usize| {
        fields[i]
            .parse::<f32>()
            .map_err(|e| format!("invalid field {i} {:?}: {e}", fields[i]))
    };
    Ok(Some(Label {
        frame,
        x: number(13)?,
        y: number(14)?,
        z: number(15)?,
        rot_y: number(16)?,
    }))
}
