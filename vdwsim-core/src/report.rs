//! Trajectory output
//!
//! The text dump writes one line per particle per report:
//! time (8.4), particle index (4), x (12.6), y (12.6). Plotting tooling
//! reads it as whitespace-separated columns, so the layout must not change.

use crate::error::{Error, Result};
use glam::DVec2;
use std::io::Write;

/// Borrowed view of the system at one report
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    pub time: f64,
    pub positions: &'a [DVec2],
    /// Half-step velocities, lagging `time` by dt/2
    pub velocities: &'a [DVec2],
}

/// Owned copy of one report's positions
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub time: f64,
    pub positions: Vec<DVec2>,
}

impl From<&Snapshot<'_>> for Frame {
    fn from(snapshot: &Snapshot<'_>) -> Self {
        Self {
            time: snapshot.time,
            positions: snapshot.positions.to_vec(),
        }
    }
}

/// Receives a snapshot after every group of substeps
pub trait ReportSink {
    fn report(&mut self, snapshot: &Snapshot<'_>) -> Result<()>;
}

/// Format one line of the text dump (without the newline)
pub fn format_line(time: f64, index: usize, position: DVec2) -> String {
    format!("{:8.4}{:4}{:12.6}{:12.6}", time, index, position.x, position.y)
}

/// Writes snapshots in the fixed-width text layout
pub struct TextReporter<W: Write> {
    out: W,
}

impl<W: Write> TextReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ReportSink for TextReporter<W> {
    fn report(&mut self, snapshot: &Snapshot<'_>) -> Result<()> {
        for (i, pos) in snapshot.positions.iter().enumerate() {
            writeln!(self.out, "{}", format_line(snapshot.time, i, *pos))?;
        }
        self.out.flush()?;
        Ok(())
    }
}

/// Keeps every snapshot in memory
#[derive(Debug, Default)]
pub struct TrajectoryRecorder {
    pub frames: Vec<Frame>,
}

impl TrajectoryRecorder {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ReportSink for TrajectoryRecorder {
    fn report(&mut self, snapshot: &Snapshot<'_>) -> Result<()> {
        self.frames.push(Frame::from(snapshot));
        Ok(())
    }
}

/// Read a text dump back into frames.
///
/// A line with particle index 0 starts a new frame; indices within a frame
/// must be consecutive.
pub fn parse_text_dump(text: &str) -> Result<Vec<Frame>> {
    let mut frames: Vec<Frame> = Vec::new();

    for (line_idx, line) in text.lines().enumerate() {
        let line_no = line_idx + 1;
        if line.trim().is_empty() {
            continue;
        }
        let malformed = |message: String| Error::MalformedDump {
            line: line_no,
            message,
        };

        let cols: Vec<&str> = line.split_whitespace().collect();
        if cols.len() != 4 {
            return Err(malformed(format!("expected 4 columns, found {}", cols.len())));
        }
        let time: f64 = cols[0]
            .parse()
            .map_err(|e| malformed(format!("bad time '{}': {}", cols[0], e)))?;
        let index: usize = cols[1]
            .parse()
            .map_err(|e| malformed(format!("bad index '{}': {}", cols[1], e)))?;
        let x: f64 = cols[2]
            .parse()
            .map_err(|e| malformed(format!("bad x '{}': {}", cols[2], e)))?;
        let y: f64 = cols[3]
            .parse()
            .map_err(|e| malformed(format!("bad y '{}': {}", cols[3], e)))?;

        if index == 0 {
            frames.push(Frame {
                time,
                positions: Vec::new(),
            });
        }
        let frame = match frames.last_mut() {
            Some(frame) if frame.positions.len() == index => frame,
            _ => {
                return Err(malformed(format!("unexpected particle index {}", index)));
            }
        };
        frame.positions.push(DVec2::new(x, y));
    }

    Ok(frames)
}
