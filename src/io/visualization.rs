//! Session capture and animated GIF export
//!
//! The controller records every shape generation, mark and unmark together with
//! the virtual time it happened at. Export replays the log onto a cell grid and
//! emits one frame per event, each shown until the next event.

use std::path::Path;
use std::time::Duration;

use image::{Delay, Frame};

use crate::io::configuration::{FINAL_FRAME_HOLD, GIF_FRAME_DELAY_MS, VIEWER_MIN_FRAME_DELAY_MS};
use crate::io::error::{Result, ShapeError, create_dir_error, invalid_parameter};
use crate::io::image::render_grid;
use crate::layout::{CellId, Shape};
use crate::spatial::CellGrid;

/// What happened at one point of a session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEventKind {
    /// A new shape replaced the board
    Generated(Shape),
    /// A cell was marked by a click
    Marked(CellId),
    /// A cell was unmarked by the revert sequence
    Unmarked(CellId),
}

/// A recorded event with its virtual timestamp
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionEvent {
    /// Virtual time of the event
    pub at: Duration,
    /// The event itself
    pub kind: SessionEventKind,
}

/// Records board changes for visualization
#[derive(Debug, Clone, Default)]
pub struct SessionCapture {
    events: Vec<SessionEvent>,
}

impl SessionCapture {
    /// Create an empty capture
    pub const fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Records a freshly generated shape
    pub fn record_generation(&mut self, at: Duration, shape: &Shape) {
        self.events.push(SessionEvent {
            at,
            kind: SessionEventKind::Generated(shape.clone()),
        });
    }

    /// Records a mark
    pub fn record_mark(&mut self, at: Duration, id: CellId) {
        self.events.push(SessionEvent {
            at,
            kind: SessionEventKind::Marked(id),
        });
    }

    /// Records an unmark
    pub fn record_unmark(&mut self, at: Duration, id: CellId) {
        self.events.push(SessionEvent {
            at,
            kind: SessionEventKind::Unmarked(id),
        });
    }

    /// Returns all recorded events
    pub fn events(&self) -> &[SessionEvent] {
        &self.events
    }

    /// Returns the total number of recorded events
    pub const fn event_count(&self) -> usize {
        self.events.len()
    }

    /// Replay the log into one grid snapshot per event
    ///
    /// Mark and unmark events recorded before the first generation are skipped.
    pub fn snapshots(&self) -> Vec<(Duration, CellGrid)> {
        let mut grid: Option<CellGrid> = None;
        let mut snapshots = Vec::with_capacity(self.events.len());

        for event in &self.events {
            match &event.kind {
                SessionEventKind::Generated(shape) => grid = Some(CellGrid::from_shape(shape)),
                SessionEventKind::Marked(id) => {
                    if let Some(g) = grid.as_mut() {
                        g.set_marked(*id, true);
                    }
                }
                SessionEventKind::Unmarked(id) => {
                    if let Some(g) = grid.as_mut() {
                        g.set_marked(*id, false);
                    }
                }
            }
            if let Some(g) = &grid {
                snapshots.push((event.at, g.clone()));
            }
        }

        snapshots
    }

    /// Export the session as an animated GIF
    ///
    /// Each frame lasts until the next event, clamped below by
    /// `VIEWER_MIN_FRAME_DELAY_MS`. Simultaneous events use `GIF_FRAME_DELAY_MS`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No shape was recorded
    /// - File system operations fail
    /// - GIF encoding fails
    pub fn export_gif(&self, output_path: &Path) -> Result<()> {
        let snapshots = self.snapshots();
        if snapshots.is_empty() {
            return Err(invalid_parameter(
                "session",
                &"empty",
                &"no shape captured for visualization",
            ));
        }

        let canvas = snapshots.iter().fold((0, 0), |(w, h), (_, grid)| {
            let (gw, gh) = grid.pixel_size();
            (w.max(gw), h.max(gh))
        });

        let mut frames = Vec::with_capacity(snapshots.len());
        let mut times = snapshots.iter().map(|(at, _)| *at).skip(1);
        for (at, grid) in &snapshots {
            let delay_ms = times.next().map_or(
                GIF_FRAME_DELAY_MS * FINAL_FRAME_HOLD,
                |next| frame_delay_ms(next.saturating_sub(*at)),
            );
            frames.push(Frame::from_parts(
                render_grid(grid, canvas),
                0,
                0,
                Delay::from_numer_denom_ms(delay_ms, 1),
            ));
        }

        if let Some(parent) = output_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| create_dir_error(parent, e))?;
        }

        let file = std::fs::File::create(output_path).map_err(|e| ShapeError::FileSystem {
            path: output_path.to_path_buf(),
            operation: "create file",
            source: e,
        })?;

        let mut encoder = image::codecs::gif::GifEncoder::new(file);
        encoder
            .encode_frames(frames)
            .map_err(|e| ShapeError::ImageExport {
                path: output_path.to_path_buf(),
                source: e,
            })?;

        tracing::info!(
            path = %output_path.display(),
            frames = snapshots.len(),
            "exported session animation"
        );
        Ok(())
    }
}

fn frame_delay_ms(gap: Duration) -> u32 {
    if gap.is_zero() {
        return GIF_FRAME_DELAY_MS;
    }
    let millis = u32::try_from(gap.as_millis()).unwrap_or(u32::MAX);
    millis.max(VIEWER_MIN_FRAME_DELAY_MS)
}
