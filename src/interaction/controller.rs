//! Click marking and reverse-order unmarking state machine
//!
//! The controller owns the current shape, the marked set and the click log.
//! Once every cell is marked it waits a fixed delay, then unmarks the cells in
//! exact reverse click order, one per step, and returns to accepting clicks.
//! All timing runs on the scheduler's virtual clock, advanced through
//! [`Controller::tick`].

use std::time::Duration;

use crate::interaction::marks::{MarkLedger, MarkOutcome};
use crate::interaction::scheduler::{Scheduler, TaskHandle};
use crate::io::configuration::{
    REVERT_SETTLE_DELAY_MS, REVERT_START_DELAY_MS, REVERT_STEP_DELAY_MS,
};
use crate::io::error::{Result, ShapeError};
use crate::io::input::{Count, parse_count};
use crate::io::visualization::SessionCapture;
use crate::layout::{CellId, Shape, generate_shape};
use crate::spatial::CellGrid;

/// Delays of the revert sequence
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RevertTiming {
    /// Pause between completion and the first unmark
    pub start_delay: Duration,
    /// Interval between consecutive unmarks
    pub step: Duration,
    /// Pause after the last unmark before returning to idle
    pub settle: Duration,
}

impl Default for RevertTiming {
    fn default() -> Self {
        Self {
            start_delay: Duration::from_millis(REVERT_START_DELAY_MS),
            step: Duration::from_millis(REVERT_STEP_DELAY_MS),
            settle: Duration::from_millis(REVERT_SETTLE_DELAY_MS),
        }
    }
}

impl RevertTiming {
    /// Use the same delay for the start pause, every step and the settle pause
    pub const fn uniform(delay: Duration) -> Self {
        Self {
            start_delay: delay,
            step: delay,
            settle: delay,
        }
    }

    /// Virtual time from completion back to idle when `cells` cells are unmarked
    pub fn total(&self, cells: usize) -> Duration {
        let steps = u32::try_from(cells.saturating_sub(1)).unwrap_or(u32::MAX);
        self.start_delay
            .saturating_add(self.step.saturating_mul(steps))
            .saturating_add(self.settle)
    }
}

/// Controller state
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// No shape, or a shape with no marks after a finished revert
    Idle,
    /// Shape present and accepting clicks
    Active,
    /// Every cell marked; waiting for the revert to start
    Complete,
    /// Unmarking in reverse click order
    Reverting,
}

impl Phase {
    /// True when clicks can change state
    pub const fn accepts_clicks(self) -> bool {
        matches!(self, Self::Idle | Self::Active)
    }
}

/// Result of a click; none of these are errors
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Cell marked, more cells remain
    Marked,
    /// Cell marked and it was the last one
    Completed,
    /// Cell was already marked; nothing changed
    AlreadyMarked,
    /// Clicks are ignored while complete or reverting
    Locked,
    /// Id does not name a cell of the current shape
    UnknownCell,
}

/// Observable step of the revert sequence
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RevertEvent {
    /// Revert began; clicks are locked
    Started,
    /// A cell was unmarked
    Unmarked(CellId),
    /// Revert finished; the click log is empty and clicks are accepted again
    Finished,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum RevertTask {
    Begin,
    Unmark(CellId),
    Finish,
}

#[derive(Debug, Clone)]
struct Board {
    shape: Shape,
    marks: MarkLedger,
}

/// Owns the shape and its interaction state
#[derive(Debug)]
pub struct Controller {
    timing: RevertTiming,
    phase: Phase,
    board: Option<Board>,
    scheduler: Scheduler<RevertTask>,
    pending: Vec<TaskHandle>,
    generation: u64,
    /// Session capture, present once recording is enabled
    pub recording: Option<SessionCapture>,
}

impl Default for Controller {
    fn default() -> Self {
        Self::new(RevertTiming::default())
    }
}

impl Controller {
    /// Create an idle controller with no shape
    pub const fn new(timing: RevertTiming) -> Self {
        Self {
            timing,
            phase: Phase::Idle,
            board: None,
            scheduler: Scheduler::new(),
            pending: Vec::new(),
            generation: 0,
            recording: None,
        }
    }

    /// Start capturing board changes for visualization
    ///
    /// A shape already on the board is recorded as the first event.
    pub fn enable_recording(&mut self) {
        let mut capture = SessionCapture::new();
        if let Some(board) = &self.board {
            capture.record_generation(self.scheduler.now(), &board.shape);
        }
        self.recording = Some(capture);
    }

    /// Validate submitted text and, on success, replace the shape
    ///
    /// # Errors
    ///
    /// Returns the input validation error; the current shape and interaction
    /// state are left untouched.
    pub fn submit(&mut self, text: &str) -> Result<&Shape> {
        let count = parse_count(text).inspect_err(|e| {
            tracing::debug!(input = text, error = %e, "rejected submission");
        })?;
        self.submit_count(count)
    }

    /// Replace the shape with a fresh one for `count` cells
    ///
    /// Pending revert tasks are cancelled and the interaction state is reset.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeError::OutOfRange`] if the layout engine rejects the count.
    pub fn submit_count(&mut self, count: Count) -> Result<&Shape> {
        let shape = generate_shape(count.get()).map_err(ShapeError::into_input_error)?;

        let cancelled = self.cancel_pending();
        if cancelled > 0 {
            tracing::info!(cancelled, "cancelled pending revert tasks");
        }

        if let Some(capture) = self.recording.as_mut() {
            capture.record_generation(self.scheduler.now(), &shape);
        }

        self.generation += 1;
        self.phase = Phase::Active;
        tracing::info!(
            count = count.get(),
            rows = shape.row_count(),
            generation = self.generation,
            "new shape"
        );

        let board = self.board.insert(Board {
            marks: MarkLedger::for_shape(&shape),
            shape,
        });
        Ok(&board.shape)
    }

    /// Handle a click on a cell
    pub fn click(&mut self, id: CellId) -> ClickOutcome {
        if !self.phase.accepts_clicks() {
            tracing::trace!(cell = %id, phase = ?self.phase, "click ignored");
            return ClickOutcome::Locked;
        }
        let Some(board) = self.board.as_mut() else {
            return ClickOutcome::UnknownCell;
        };

        match board.marks.mark(id) {
            MarkOutcome::Unknown => ClickOutcome::UnknownCell,
            MarkOutcome::AlreadyMarked => ClickOutcome::AlreadyMarked,
            MarkOutcome::Marked => {
                let complete = board.marks.is_complete();
                if let Some(capture) = self.recording.as_mut() {
                    capture.record_mark(self.scheduler.now(), id);
                }
                tracing::debug!(cell = %id, marked = board.marks.marked_count(), "marked");

                if complete {
                    self.phase = Phase::Complete;
                    let handle = self
                        .scheduler
                        .schedule(self.timing.start_delay, RevertTask::Begin);
                    self.pending.push(handle);
                    tracing::info!(revert_at = ?handle.due(), "all cells marked");
                    ClickOutcome::Completed
                } else {
                    self.phase = Phase::Active;
                    ClickOutcome::Marked
                }
            }
        }
    }

    /// Advance the virtual clock, running every revert task that falls due
    ///
    /// Tasks run one at a time in due order. Returns the revert steps taken.
    pub fn tick(&mut self, dt: Duration) -> Vec<RevertEvent> {
        let until = self.scheduler.now().saturating_add(dt);
        let mut events = Vec::new();
        while let Some(task) = self.scheduler.pop_due(until) {
            if let Some(event) = self.run_task(task) {
                events.push(event);
            }
        }
        self.scheduler.settle(until);
        self.pending
            .retain(|&handle| self.scheduler.is_pending(handle));
        events
    }

    fn run_task(&mut self, task: RevertTask) -> Option<RevertEvent> {
        let board = self.board.as_mut()?;
        match task {
            RevertTask::Begin => {
                self.phase = Phase::Reverting;
                let reversed: Vec<CellId> = board.marks.order().iter().rev().copied().collect();
                for (step, &id) in reversed.iter().enumerate() {
                    let delay = self
                        .timing
                        .step
                        .saturating_mul(u32::try_from(step).unwrap_or(u32::MAX));
                    self.pending
                        .push(self.scheduler.schedule(delay, RevertTask::Unmark(id)));
                }
                let finish_after = self.timing.step.saturating_mul(
                    u32::try_from(reversed.len().saturating_sub(1)).unwrap_or(u32::MAX),
                );
                self.pending.push(self.scheduler.schedule(
                    finish_after.saturating_add(self.timing.settle),
                    RevertTask::Finish,
                ));
                tracing::info!(cells = reversed.len(), "revert started");
                Some(RevertEvent::Started)
            }
            RevertTask::Unmark(id) => {
                if !board.marks.unmark(id) {
                    return None;
                }
                if let Some(capture) = self.recording.as_mut() {
                    capture.record_unmark(self.scheduler.now(), id);
                }
                tracing::debug!(cell = %id, remaining = board.marks.marked_count(), "unmarked");
                Some(RevertEvent::Unmarked(id))
            }
            RevertTask::Finish => {
                board.marks.clear_order();
                self.phase = Phase::Idle;
                tracing::info!("revert finished");
                Some(RevertEvent::Finished)
            }
        }
    }

    fn cancel_pending(&mut self) -> usize {
        let mut cancelled = 0;
        for handle in self.pending.drain(..) {
            if self.scheduler.cancel(handle).is_some() {
                cancelled += 1;
            }
        }
        cancelled
    }

    /// Current phase
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Revert delays in use
    pub const fn timing(&self) -> RevertTiming {
        self.timing
    }

    /// Current shape, if any was submitted
    pub fn shape(&self) -> Option<&Shape> {
        self.board.as_ref().map(|board| &board.shape)
    }

    /// Number of successful submissions so far
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Check whether a cell of the current shape is marked
    pub fn is_marked(&self, id: CellId) -> bool {
        self.board
            .as_ref()
            .is_some_and(|board| board.marks.is_marked(id))
    }

    /// Number of marked cells
    pub fn marked_count(&self) -> usize {
        self.board
            .as_ref()
            .map_or(0, |board| board.marks.marked_count())
    }

    /// Marked cells in row-major order
    pub fn marked_cells(&self) -> Vec<CellId> {
        self.board
            .as_ref()
            .map_or_else(Vec::new, |board| board.marks.marked())
    }

    /// Cells in the order they were marked
    pub fn click_order(&self) -> &[CellId] {
        self.board
            .as_ref()
            .map(|board| board.marks.order())
            .unwrap_or_default()
    }

    /// Grid snapshot of the current shape and marks
    pub fn grid(&self) -> Option<CellGrid> {
        self.board
            .as_ref()
            .map(|board| CellGrid::with_marks(&board.shape, board.marks.marked()))
    }

    /// Number of revert tasks waiting to fire
    pub fn pending_tasks(&self) -> usize {
        self.scheduler.pending()
    }

    /// Virtual time until the next revert task, if any is pending
    pub fn time_to_next_task(&self) -> Option<Duration> {
        self.scheduler.time_to_next()
    }

    /// Current virtual time
    pub const fn now(&self) -> Duration {
        self.scheduler.now()
    }
}
