//! Command-line interface for batch synthesis of PNG samples

use crate::algorithm::compatibility::AdjacencyRule;
use crate::algorithm::executor::{Solver, SolverConfig, StepOutcome};
use crate::algorithm::propagation::ConflictPolicy;
use crate::analysis::patterns::{ImageProcessor, SymbolMode};
use crate::analysis::statistics::SymbolStatistics;
use crate::io::configuration::{
    DEFAULT_OUTPUT_SIZE, DEFAULT_PATTERN_SIZE, DEFAULT_SEED, GIF_FRAME_DELAY_MS, OUTPUT_SUFFIX,
    VISUALIZATION_SUFFIX,
};
use crate::io::error::{Result, invalid_path};
use crate::io::image::export_grid_as_png;
use crate::io::progress::ProgressManager;
use clap::Parser;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "wavetile")]
#[command(
    author,
    version,
    about = "Synthesize images from a sample with overlapping wave function collapse"
)]
/// Command-line arguments for the synthesis tool
// CLI tools commonly need multiple boolean flags for various features and user preferences
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Input PNG file or directory to process
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Random seed for reproducible generation
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Side length of the square output grid
    #[arg(short = 'n', long, default_value_t = DEFAULT_OUTPUT_SIZE)]
    pub size: usize,

    /// Output width in cells (overrides size)
    #[arg(short = 'w', long)]
    pub width: Option<usize>,

    /// Output height in cells (overrides size)
    #[arg(short = 'H', long)]
    pub height: Option<usize>,

    /// Side length of extracted patterns
    #[arg(short, long, default_value_t = DEFAULT_PATTERN_SIZE)]
    pub pattern_size: usize,

    /// Use offset-aware overlap adjacency instead of the diagonal rule
    #[arg(short, long)]
    pub overlap: bool,

    /// Fail on contradictions instead of keeping the first candidate
    #[arg(long)]
    pub strict: bool,

    /// Map each distinct colour to its own symbol
    #[arg(short = 'c', long)]
    pub palette: bool,

    /// Enable visualization output as animated GIF
    #[arg(short, long)]
    pub visualize: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Process files even if output exists
    #[arg(short = 'N', long)]
    pub no_skip: bool,

    /// Log solver progress at debug level
    #[arg(long)]
    pub verbose: bool,
}

impl Cli {
    /// Check if existing output files should be skipped
    pub const fn skip_existing(&self) -> bool {
        !self.no_skip
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// How pixel colours become symbols
    pub const fn symbol_mode(&self) -> SymbolMode {
        if self.palette {
            SymbolMode::Palette
        } else {
            SymbolMode::Threshold
        }
    }

    /// Solver configuration built from the flags
    pub fn solver_config(&self) -> SolverConfig {
        SolverConfig {
            output_width: self.width.unwrap_or(self.size),
            output_height: self.height.unwrap_or(self.size),
            pattern_size: self.pattern_size,
            seed: self.seed,
            adjacency: if self.overlap {
                AdjacencyRule::Overlap
            } else {
                AdjacencyRule::Diagonal
            },
            conflict_policy: if self.strict {
                ConflictPolicy::Fail
            } else {
                ConflictPolicy::KeepFirst
            },
        }
    }
}

/// Orchestrates batch processing of PNG files with progress tracking
pub struct FileProcessor {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl FileProcessor {
    /// Create a new file processor with the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
        }
    }

    /// Process files according to CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if target validation or file processing fails
    pub fn process(&mut self) -> Result<()> {
        let files = self.collect_files()?;

        if files.is_empty() {
            return Ok(());
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(files.len());
        }

        for (index, file) in files.iter().enumerate() {
            self.process_file(file, index)?;
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.finish();
        }

        Ok(())
    }

    fn collect_files(&self) -> Result<Vec<PathBuf>> {
        let target = &self.cli.target;
        if target.is_file() {
            if !is_png(target) {
                return Err(invalid_path(target, "target file must be a PNG image"));
            }
            if self.should_process_file(target) {
                Ok(vec![target.clone()])
            } else {
                Ok(vec![])
            }
        } else if target.is_dir() {
            let mut files = Vec::new();
            for entry in std::fs::read_dir(target)? {
                let path = entry?.path();
                // Skip our own outputs so reruns don't feed results back in
                if is_png(&path) && !is_generated(&path) && self.should_process_file(&path) {
                    files.push(path);
                }
            }
            files.sort();
            Ok(files)
        } else {
            Err(invalid_path(target, "target must be a PNG file or directory"))
        }
    }

    fn should_process_file(&self, input_path: &Path) -> bool {
        if !self.cli.skip_existing() {
            return true;
        }

        let output_path = Self::get_output_path(input_path);
        if output_path.exists() {
            // Allow print for user feedback for progress messages
            #[allow(clippy::print_stderr)]
            if !self.cli.quiet {
                eprintln!("Skipping: {} (output exists)", input_path.display());
            }
            false
        } else {
            true
        }
    }

    fn process_file(&mut self, input_path: &Path, index: usize) -> Result<()> {
        let start_time = Instant::now();
        let output_path = Self::get_output_path(input_path);

        let (sample, palette) =
            ImageProcessor::from_png_file(input_path, self.cli.symbol_mode())?.into_parts();
        let mut solver = Solver::new(&sample, self.cli.solver_config())?;

        if self.cli.visualize {
            solver.enable_visualization(palette.clone());
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.start_file(index, input_path, solver.grid().len());
        }

        while solver.step()? != StepOutcome::Complete {
            if let Some(ref mut pm) = self.progress_manager {
                pm.update_collapsed(index, solver.grid().collapsed_count());
            }
        }
        let result = solver.run()?;

        export_grid_as_png(&result, &palette, &output_path)?;

        if self.cli.visualize {
            solver.export_visualization(
                &Self::get_visualization_path(input_path),
                GIF_FRAME_DELAY_MS,
            )?;
        }

        let deviation = SymbolStatistics::from_grid(&sample)
            .max_ratio_deviation(&SymbolStatistics::from_grid(&result));
        let stats = solver.stats();
        info!(
            input = %input_path.display(),
            output = %output_path.display(),
            patterns = solver.catalog().len(),
            collapses = stats.collapses,
            conflicts = stats.conflicts_resolved,
            symbol_deviation = deviation,
            elapsed_ms = start_time.elapsed().as_millis() as u64,
            "wrote result"
        );

        if let Some(ref mut pm) = self.progress_manager {
            pm.complete_file(index, start_time.elapsed());
        }

        Ok(())
    }

    fn get_output_path(input_path: &Path) -> PathBuf {
        sibling_path(input_path, OUTPUT_SUFFIX, "png")
    }

    fn get_visualization_path(input_path: &Path) -> PathBuf {
        sibling_path(input_path, VISUALIZATION_SUFFIX, "gif")
    }
}

fn is_png(path: &Path) -> bool {
    path.extension().and_then(|s| s.to_str()) == Some("png")
}

fn is_generated(path: &Path) -> bool {
    path.file_stem()
        .and_then(|s| s.to_str())
        .is_some_and(|stem| stem.ends_with(OUTPUT_SUFFIX))
}

/// `<dir>/<stem><suffix>.<extension>` next to the input
fn sibling_path(input_path: &Path, suffix: &str, extension: &str) -> PathBuf {
    let stem = input_path.file_stem().unwrap_or_default();
    let name = format!("{}{suffix}.{extension}", stem.to_string_lossy());

    if let Some(parent) = input_path.parent() {
        parent.join(name)
    } else {
        PathBuf::from(name)
    }
}
