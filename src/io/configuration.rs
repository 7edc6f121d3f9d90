//! Algorithm constants and runtime configuration defaults

// Default values for configurable parameters
/// Fixed seed for reproducible generation
pub const DEFAULT_SEED: u64 = 42;

/// Side length of the square output when no width or height is given
pub const DEFAULT_OUTPUT_SIZE: usize = 10;

/// Side length of extracted patterns
pub const DEFAULT_PATTERN_SIZE: usize = 2;

// Safety limit to prevent excessive memory allocation
/// Maximum allowed output dimension
pub const MAX_GRID_DIMENSION: usize = 10_000;

// Symbol rendering for thresholded samples
/// Channel value written for symbol 1
pub const BRIGHT_VALUE: u8 = 255;
/// Channel value written for symbol 0
pub const DARK_VALUE: u8 = 0;

// Progress bar display settings
/// Threshold for switching to batch progress mode
pub const MAX_INDIVIDUAL_PROGRESS_BARS: usize = 5;
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 30;

// Output settings
/// Suffix added to output filenames
pub const OUTPUT_SUFFIX: &str = "_result";
/// Suffix added to visualization filenames
pub const VISUALIZATION_SUFFIX: &str = "_visualization";
/// Delay between GIF animation frames
pub const GIF_FRAME_DELAY_MS: u32 = 40;
/// Minimum frame delay that viewers reliably support (in milliseconds)
pub const VIEWER_MIN_FRAME_DELAY_MS: u32 = 20;
/// Upper bound on captured frames, regardless of output size
pub const MAX_VISUALIZATION_FRAMES: usize = 250;
/// Frames are upscaled until their longer side reaches at least this many pixels
pub const VISUALIZATION_MIN_SIDE: u32 = 256;

// Logging
/// Filter used when `RUST_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "warn";
/// Filter used with `--verbose` when `RUST_LOG` is unset
pub const VERBOSE_LOG_FILTER: &str = "wavetile=debug,info";
