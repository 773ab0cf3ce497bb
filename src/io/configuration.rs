//! Layout limits, rendering geometry and revert timing defaults

// Accepted input range
/// Smallest count accepted from user input and by the layout engine
pub const MIN_COUNT: usize = 5;
/// Largest count accepted from user input
pub const MAX_COUNT: usize = 25;

/// Fewest rows a C shape can have (top arm, one spine row, bottom arm)
pub const MIN_ROWS: usize = 3;

// Box geometry in pixels
/// Edge length of a rendered box
pub const BOX_SIZE_PX: u32 = 50;
/// Space between neighbouring boxes
pub const BOX_GAP_PX: u32 = 5;
/// Border thickness drawn inside each box
pub const BORDER_PX: u32 = 2;

// Box colors (RGBA)
/// Fill of an unmarked box
pub const UNMARKED_FILL: [u8; 4] = [0xd3, 0x2f, 0x2f, 0xff];
/// Border of an unmarked box
pub const UNMARKED_BORDER: [u8; 4] = [0xb7, 0x1c, 0x1c, 0xff];
/// Fill of a marked box
pub const MARKED_FILL: [u8; 4] = [0x4c, 0xaf, 0x50, 0xff];
/// Border of a marked box
pub const MARKED_BORDER: [u8; 4] = [0x2e, 0x7d, 0x32, 0xff];
/// Background behind and between boxes
pub const BACKGROUND: [u8; 4] = [0, 0, 0, 0];

// Revert sequence timing
/// Pause between the last mark and the first unmark
pub const REVERT_START_DELAY_MS: u64 = 1000;
/// Interval between consecutive unmarks
pub const REVERT_STEP_DELAY_MS: u64 = 1000;
/// Pause after the last unmark before clicks are accepted again
pub const REVERT_SETTLE_DELAY_MS: u64 = 1000;

/// Clock granularity used when the CLI drives a session in real time
pub const REALTIME_TICK_MS: u64 = 50;

/// Fixed seed for reproducible shuffled click orders
pub const DEFAULT_SEED: u64 = 42;

// Animation export
/// Delay used for frames whose successor happens at the same instant
pub const GIF_FRAME_DELAY_MS: u32 = 250;
/// Minimum frame delay that viewers reliably support (in milliseconds)
pub const VIEWER_MIN_FRAME_DELAY_MS: u32 = 50;
/// Multiplier applied to the delay of the final frame
pub const FINAL_FRAME_HOLD: u32 = 4;

/// Width of the revert progress bar in characters
pub const PROGRESS_BAR_WIDTH: u16 = 30;
