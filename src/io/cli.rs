//! Command-line interface driving a marking session
//!
//! The count argument goes through the same validation as the interactive
//! field. Clicks come from an explicit list, a seeded shuffle of every cell, or
//! standard input in interactive mode. The revert sequence runs on the virtual
//! clock, or against wall-clock time with `--realtime`.

use crate::interaction::{ClickOutcome, Controller, Phase, RevertTiming};
use crate::io::configuration::{DEFAULT_SEED, REALTIME_TICK_MS};
use crate::io::error::{Result, invalid_parameter};
use crate::io::image::export_grid_as_png;
use crate::io::progress::RevertProgress;
use crate::layout::CellId;
use clap::Parser;
use rand::{SeedableRng, rngs::StdRng, seq::SliceRandom};
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "cshape")]
#[command(
    author,
    version,
    about = "Lay out boxes in a C shape, mark them, and watch the marks revert"
)]
/// Command-line arguments for a marking session
// Independent switches for output, timing and display
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Number of boxes (5-25), validated like the input field
    #[arg(value_name = "COUNT")]
    pub count: Option<String>,

    /// Cells to click in order, as row-col ids (e.g. 0-0,1-0)
    #[arg(short, long, value_delimiter = ',')]
    pub clicks: Vec<String>,

    /// Cells to click by pixel position on the rendered board, e.g. 60,115
    ///
    /// Applied after --clicks. Points on a gap or outside the shape are ignored.
    #[arg(long, value_name = "X,Y", conflicts_with = "shuffle")]
    pub click_at: Vec<String>,

    /// Click every cell in a seeded random order
    #[arg(long, conflicts_with = "clicks")]
    pub shuffle: bool,

    /// Random seed for --shuffle
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Write a PNG of the board after the clicks are applied
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Write an animated GIF of the whole session
    #[arg(short, long)]
    pub animate: Option<PathBuf>,

    /// Run the revert sequence against wall-clock time
    #[arg(short, long)]
    pub realtime: bool,

    /// Use one delay in milliseconds for every revert pause and step
    #[arg(long, value_name = "MS")]
    pub step_ms: Option<u64>,

    /// Read counts and cell ids from standard input, one per line
    #[arg(short, long)]
    pub interactive: bool,

    /// Suppress board and progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Revert timing selected by the flags
    pub fn timing(&self) -> RevertTiming {
        self.step_ms.map_or_else(RevertTiming::default, |ms| {
            RevertTiming::uniform(Duration::from_millis(ms))
        })
    }

    /// Check if board and progress output should be displayed
    pub const fn should_show_output(&self) -> bool {
        !self.quiet
    }
}

/// Outcome of a finished session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSummary {
    /// Cell count of the last accepted shape
    pub count: Option<usize>,
    /// Row count of the last accepted shape
    pub rows: Option<usize>,
    /// Clicks that marked a cell
    pub clicks_applied: usize,
    /// Revert sequences run to completion
    pub reverts_completed: usize,
    /// Controller phase at the end
    pub phase: Phase,
}

/// Runs one session according to the CLI arguments
pub struct SessionRunner {
    cli: Cli,
    controller: Controller,
    clicks_applied: usize,
    reverts_completed: usize,
}

impl SessionRunner {
    /// Create a runner with a fresh controller
    pub fn new(cli: Cli) -> Self {
        let mut controller = Controller::new(cli.timing());
        if cli.animate.is_some() {
            controller.enable_recording();
        }
        Self {
            cli,
            controller,
            clicks_applied: 0,
            reverts_completed: 0,
        }
    }

    /// The controller driven by this runner
    pub const fn controller(&self) -> &Controller {
        &self.controller
    }

    /// Run a non-interactive session
    ///
    /// # Errors
    ///
    /// Returns an error if the count is rejected, a click id is malformed, or
    /// an export fails.
    pub fn run(&mut self) -> Result<SessionSummary> {
        let text = self.cli.count.clone().unwrap_or_default();
        self.controller.submit(&text)?;
        self.show_board();

        for id in self.click_plan()? {
            self.apply_click(id);
        }

        self.export_board()?;

        if self.controller.phase() == Phase::Complete {
            self.drive_revert();
        }

        self.finish()
    }

    /// Run an interactive session over lines of input
    ///
    /// A line that parses as a cell id is a click; any other line is submitted
    /// as a count. Rejected counts are reported and the board is kept.
    ///
    /// # Errors
    ///
    /// Returns an error if reading input or an export fails.
    pub fn run_interactive(&mut self, input: impl BufRead) -> Result<SessionSummary> {
        if let Some(text) = self.cli.count.clone() {
            self.submit_line(&text);
        }

        for line in input.lines() {
            let line = line?;
            if let Ok(id) = line.parse::<CellId>() {
                self.apply_click(id);
                if self.controller.phase() == Phase::Complete {
                    self.drive_revert();
                }
            } else {
                self.submit_line(&line);
            }
        }

        self.export_board()?;
        self.finish()
    }

    fn export_board(&self) -> Result<()> {
        if let (Some(path), Some(grid)) = (&self.cli.output, self.controller.grid()) {
            export_grid_as_png(&grid, path)?;
        }
        Ok(())
    }

    // Allow print for inline field feedback
    #[allow(clippy::print_stderr)]
    fn submit_line(&mut self, text: &str) {
        let accepted = self.controller.submit(text).map(|_| ());
        match accepted {
            Ok(()) => self.show_board(),
            Err(e) if !self.cli.quiet => eprintln!("{e}"),
            Err(_) => {}
        }
    }

    fn click_plan(&self) -> Result<Vec<CellId>> {
        if self.cli.shuffle {
            let mut ids: Vec<CellId> = self
                .controller
                .shape()
                .map(|shape| shape.cell_ids().collect())
                .unwrap_or_default();
            let mut rng = StdRng::seed_from_u64(self.cli.seed);
            ids.shuffle(&mut rng);
            return Ok(ids);
        }

        let mut ids = self
            .cli
            .clicks
            .iter()
            .map(|text| text.parse())
            .collect::<Result<Vec<CellId>>>()?;

        let grid = self.controller.grid();
        for text in &self.cli.click_at {
            let (x, y) = parse_point(text)?;
            match grid.as_ref().and_then(|g| g.hit_test(x, y)) {
                Some(id) => ids.push(id),
                None => tracing::warn!(x, y, "no cell at pointer position"),
            }
        }
        Ok(ids)
    }

    fn apply_click(&mut self, id: CellId) {
        match self.controller.click(id) {
            ClickOutcome::Marked | ClickOutcome::Completed => {
                self.clicks_applied += 1;
                self.show_board();
            }
            outcome => tracing::warn!(cell = %id, ?outcome, "click had no effect"),
        }
    }

    fn drive_revert(&mut self) {
        let cells = self.controller.marked_count();
        let progress = if self.cli.should_show_output() {
            RevertProgress::new(cells)
        } else {
            RevertProgress::hidden(cells)
        };

        while let Some(wait) = self.controller.time_to_next_task() {
            let dt = if self.cli.realtime {
                let tick = Duration::from_millis(REALTIME_TICK_MS);
                std::thread::sleep(tick.min(wait));
                tick.min(wait)
            } else {
                wait
            };
            for event in self.controller.tick(dt) {
                progress.observe(&event);
            }
        }

        progress.clear();
        if self.controller.phase() == Phase::Idle {
            self.reverts_completed += 1;
        }
        self.show_board();
    }

    fn finish(&self) -> Result<SessionSummary> {
        if let (Some(path), Some(capture)) = (&self.cli.animate, &self.controller.recording) {
            capture.export_gif(path)?;
        }

        let shape = self.controller.shape();
        Ok(SessionSummary {
            count: shape.map(crate::layout::Shape::cell_count),
            rows: shape.map(crate::layout::Shape::row_count),
            clicks_applied: self.clicks_applied,
            reverts_completed: self.reverts_completed,
            phase: self.controller.phase(),
        })
    }

    // Allow print for the board display
    #[allow(clippy::print_stdout)]
    fn show_board(&self) {
        if !self.cli.should_show_output() {
            return;
        }
        if let Some(grid) = self.controller.grid() {
            println!("{grid}");
        }
    }
}

/// Parse an `x,y` pixel position
///
/// # Errors
///
/// Returns [`crate::ShapeError::InvalidParameter`] unless both coordinates are
/// non-negative integers.
pub fn parse_point(text: &str) -> Result<(u32, u32)> {
    let trimmed = text.trim();
    let (x, y) = trimmed
        .split_once(',')
        .ok_or_else(|| invalid_parameter("click-at", &trimmed, &"expected 'x,y'"))?;
    let x = x
        .trim()
        .parse()
        .map_err(|e| invalid_parameter("click-at", &trimmed, &format!("bad x: {e}")))?;
    let y = y
        .trim()
        .parse()
        .map_err(|e| invalid_parameter("click-at", &trimmed, &format!("bad y: {e}")))?;
    Ok((x, y))
}

/// Run a whole command-line session and map the outcome to an exit code
///
/// `input` feeds interactive mode. A failure is written to `errors` as its
/// user-facing message.
pub fn run_cli(cli: Cli, input: impl BufRead, errors: &mut impl Write) -> ExitCode {
    let interactive = cli.interactive;
    let mut runner = SessionRunner::new(cli);
    let outcome = if interactive {
        runner.run_interactive(input)
    } else {
        runner.run()
    };

    match outcome {
        Ok(summary) => {
            tracing::info!(?summary, "session finished");
            ExitCode::SUCCESS
        }
        Err(e) => {
            // Nothing left to report to if stderr itself fails
            let _ = writeln!(errors, "{e}");
            ExitCode::FAILURE
        }
    }
}
