//! Replay of recorded detector output from CSV.
//!
//! One row per detected tag, no header, `#` starts a comment:
//!
//! ```text
//! frame,id,t0,t1,t2,r00,r01,r02,r10,r11,r12,r20,r21,r22
//! ```
//!
//! Rows sharing a frame index form one frame. Missing frame indices become
//! empty frames so tick numbering matches the recording; gaps are produced
//! while replaying rather than stored.

use std::collections::VecDeque;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result, bail};
use csv::{ReaderBuilder, StringRecord};
use nalgebra::{Matrix3, Vector3};
use tracing::{debug, info};

use super::observation::TagObservation;
use super::source::ObservationSource;

const COLUMNS: usize = 14;

/// Recorded frames handed out in frame-index order.
#[derive(Debug, Default)]
pub struct ReplaySource {
    frames: VecDeque<(u64, Vec<TagObservation>)>,
    /// Index of the next frame to hand out.
    next_index: u64,
}

impl ReplaySource {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let rdr = Self::builder()
            .from_path(path)
            .with_context(|| format!("Failed to open {}", path.display()))?;
        let source = Self::from_csv(rdr).with_context(|| format!("Failed to load {}", path.display()))?;
        info!(
            "Loaded {} recorded frames ({} to replay) from {}",
            source.frames.len(),
            source.remaining(),
            path.display()
        );
        Ok(source)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Self::from_csv(Self::builder().from_reader(reader))
    }

    // Comment rows are dropped in `from_csv` so record positions match file lines.
    fn builder() -> ReaderBuilder {
        let mut builder = ReaderBuilder::new();
        builder.has_headers(false).flexible(true);
        builder
    }

    fn from_csv<R: Read>(mut rdr: csv::Reader<R>) -> Result<Self> {
        let mut frames: VecDeque<(u64, Vec<TagObservation>)> = VecDeque::new();

        for rec in rdr.records() {
            let rec = rec?;
            let line = rec.position().map_or(0, |pos| pos.line());
            if rec.get(0).is_some_and(|field| field.trim_start().starts_with('#')) {
                continue;
            }
            if rec.len() < COLUMNS {
                debug!("Skipping line {} with {} columns", line, rec.len());
                continue;
            }
            if rec.len() > COLUMNS {
                bail!("Line {} has {} columns, expected {}", line, rec.len(), COLUMNS);
            }

            let (frame, observation) = parse_row(&rec, line)?;
            match frames.back_mut() {
                Some((prev, _)) if frame < *prev => {
                    bail!("Frame index went backwards on line {}: {} after {}", line, frame, prev);
                }
                Some((prev, observations)) if frame == *prev => observations.push(observation),
                _ => frames.push_back((frame, vec![observation])),
            }
        }

        let next_index = frames.front().map_or(0, |(index, _)| *index);
        Ok(Self { frames, next_index })
    }

    /// Frames not yet handed out, counting empty frames for gaps.
    pub fn remaining(&self) -> u64 {
        match self.frames.back() {
            Some((last, _)) => last - self.next_index + 1,
            None => 0,
        }
    }
}

fn parse_row(rec: &StringRecord, line: u64) -> Result<(u64, TagObservation)> {
    let frame: u64 = rec[0]
        .trim()
        .parse()
        .with_context(|| format!("Bad frame index on line {}", line))?;
    let id: i32 = rec[1]
        .trim()
        .parse()
        .with_context(|| format!("Bad tag id on line {}", line))?;

    let mut values = [0.0f64; COLUMNS - 2];
    for (i, slot) in values.iter_mut().enumerate() {
        *slot = rec[i + 2]
            .trim()
            .parse()
            .with_context(|| format!("Bad value in column {} on line {}", i + 3, line))?;
    }
    let translation = Vector3::new(values[0], values[1], values[2]);
    let rotation = Matrix3::from_row_slice(&values[3..]);
    Ok((frame, TagObservation::new(id, translation, rotation)))
}

impl ObservationSource for ReplaySource {
    fn next_frame(&mut self) -> Result<Option<Vec<TagObservation>>> {
        let Some((index, _)) = self.frames.front() else {
            return Ok(None);
        };
        let frame = if *index > self.next_index {
            Vec::new()
        } else {
            self.frames.pop_front().map(|(_, observations)| observations).unwrap_or_default()
        };
        self.next_index += 1;
        Ok(Some(frame))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::io::Write;

    const RECORDING: &str = "\
# frame,id,t0,t1,t2,r00..r22
0,3,1,2,3,1,0,0,0,1,0,0,0,1
0,5,0.5,0,2,1,0,0,0,1,0,0,0,1
1,3,1,2,4,1,0,0,0,1,0,0,0,1
3,5,0.5,0,2.5,0,-1,0,1,0,0,0,0,1
";

    #[test]
    fn test_groups_rows_into_frames() {
        let mut source = ReplaySource::from_reader(RECORDING.as_bytes()).unwrap();
        assert_eq!(source.remaining(), 4);

        let f0 = source.next_frame().unwrap().unwrap();
        assert_eq!(f0.iter().map(|o| o.id.0).collect::<Vec<_>>(), vec![3, 5]);
        assert_relative_eq!(f0[0].translation, Vector3::new(1.0, 2.0, 3.0));

        let f1 = source.next_frame().unwrap().unwrap();
        assert_eq!(f1.len(), 1);
        assert_relative_eq!(f1[0].translation.z, 4.0);

        // Frame 2 was never recorded
        assert!(source.next_frame().unwrap().unwrap().is_empty());

        let f3 = source.next_frame().unwrap().unwrap();
        assert_eq!(f3[0].rotation[(0, 1)], -1.0);
        assert_eq!(f3[0].rotation[(1, 0)], 1.0);

        assert!(source.next_frame().unwrap().is_none());
    }

    #[test]
    fn test_skips_short_rows() {
        let source = ReplaySource::from_reader("0,1,2,3\n0,3,1,2,3,1,0,0,0,1,0,0,0,1\n".as_bytes()).unwrap();
        assert_eq!(source.remaining(), 1);
    }

    #[test]
    fn test_rejects_bad_numbers() {
        let result = ReplaySource::from_reader("0,3,1,x,3,1,0,0,0,1,0,0,0,1\n".as_bytes());
        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_backwards_frames() {
        let data = "2,3,1,2,3,1,0,0,0,1,0,0,0,1\n1,3,1,2,3,1,0,0,0,1,0,0,0,1\n";
        assert!(ReplaySource::from_reader(data.as_bytes()).is_err());
    }

    #[test]
    fn test_large_gap_is_not_materialized() {
        let data = "0,3,1,2,3,1,0,0,0,1,0,0,0,1\n20000000,3,1,2,4,1,0,0,0,1,0,0,0,1\n";
        let mut source = ReplaySource::from_reader(data.as_bytes()).unwrap();
        assert_eq!(source.frames.len(), 2);
        assert_eq!(source.remaining(), 20_000_001);

        assert_eq!(source.next_frame().unwrap().unwrap().len(), 1);
        assert!(source.next_frame().unwrap().unwrap().is_empty());
        assert_eq!(source.remaining(), 19_999_999);
    }

    #[test]
    fn test_recording_may_start_after_zero() {
        let data = "7,3,1,2,3,1,0,0,0,1,0,0,0,1\n8,3,1,2,4,1,0,0,0,1,0,0,0,1\n";
        let mut source = ReplaySource::from_reader(data.as_bytes()).unwrap();
        assert_eq!(source.remaining(), 2);
        assert_eq!(source.next_frame().unwrap().unwrap().len(), 1);
        assert_eq!(source.next_frame().unwrap().unwrap().len(), 1);
        assert!(source.next_frame().unwrap().is_none());
        assert_eq!(source.remaining(), 0);
    }

    #[test]
    fn test_rejects_long_rows() {
        let data = "0,3,1,2,3,1,0,0,0,1,0,0,0,1,9\n";
        let err = ReplaySource::from_reader(data.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("15 columns"));
    }

    #[test]
    fn test_errors_report_file_line() {
        let data = "# recorded 2024-05-01\n# frame,id,...\n0,3,1,2,3,1,0,0,0,1,0,0,0,1\n1,3,1,x,3,1,0,0,0,1,0,0,0,1\n";
        let err = ReplaySource::from_reader(data.as_bytes()).unwrap_err();
        assert_eq!(err.to_string(), "Bad value in column 4 on line 4");
    }

    #[test]
    fn test_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(RECORDING.as_bytes()).unwrap();
        let source = ReplaySource::from_path(file.path()).unwrap();
        assert_eq!(source.remaining(), 4);

        assert!(ReplaySource::from_path("/nonexistent/recording.csv").is_err());
    }
}
