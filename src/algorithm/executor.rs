use crate::{
    algorithm::compatibility::{AdjacencyRule, CompatibilityRules},
    algorithm::propagation::{ConflictPolicy, propagate},
    algorithm::selection::{collapse_cell, select_cell},
    analysis::patterns::SymbolPalette,
    io::configuration::{
        DEFAULT_OUTPUT_SIZE, DEFAULT_PATTERN_SIZE, DEFAULT_SEED, MAX_GRID_DIMENSION,
    },
    io::error::{AlgorithmError, Result, WithContext, invalid_parameter},
    io::visualization::VisualizationCapture,
    math::probability::RandomSelector,
    spatial::grid::{GridPosition, OutputGrid},
    spatial::tiles::{PatternCatalog, PatternId, Symbol},
};
use ndarray::Array2;
use std::path::Path;
use tracing::{debug, info};

/// Solver parameters for a single run
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SolverConfig {
    /// Output columns
    pub output_width: usize,
    /// Output rows
    pub output_height: usize,
    /// Side length of extracted patterns
    pub pattern_size: usize,
    /// Seed for the weighted collapse choices
    pub seed: u64,
    /// Predicate used between neighbouring cells
    pub adjacency: AdjacencyRule,
    /// Behaviour when a cell would lose every candidate
    pub conflict_policy: ConflictPolicy,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self::square(DEFAULT_OUTPUT_SIZE, DEFAULT_PATTERN_SIZE, DEFAULT_SEED)
    }
}

impl SolverConfig {
    /// Square output with default adjacency and conflict handling
    pub const fn square(output_size: usize, pattern_size: usize, seed: u64) -> Self {
        Self {
            output_width: output_size,
            output_height: output_size,
            pattern_size,
            seed,
            adjacency: AdjacencyRule::Diagonal,
            conflict_policy: ConflictPolicy::KeepFirst,
        }
    }

    /// Check the configuration against a sample before anything is allocated
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The sample has zero area
    /// - The pattern size is zero or exceeds either sample dimension
    /// - An output dimension is zero or exceeds the maximum grid dimension
    pub fn validate(&self, sample: &Array2<Symbol>) -> Result<()> {
        let (sample_height, sample_width) = sample.dim();
        if sample.is_empty() {
            return Err(AlgorithmError::EmptySample {
                dimensions: (sample_height, sample_width),
            });
        }

        if self.pattern_size < 1 {
            return Err(invalid_parameter(
                "pattern_size",
                &self.pattern_size,
                &"must be at least 1",
            ));
        }
        if self.pattern_size > sample_width.min(sample_height) {
            return Err(invalid_parameter(
                "pattern_size",
                &self.pattern_size,
                &format!("exceeds sample dimensions {sample_width}x{sample_height}"),
            ));
        }

        for (parameter, value) in [
            ("output_width", self.output_width),
            ("output_height", self.output_height),
        ] {
            if value < 1 {
                return Err(invalid_parameter(parameter, &value, &"must be at least 1"));
            }
            if value > MAX_GRID_DIMENSION {
                return Err(invalid_parameter(
                    parameter,
                    &value,
                    &format!("exceeds maximum of {MAX_GRID_DIMENSION}"),
                ));
            }
        }

        Ok(())
    }
}

/// Result of one select/collapse/propagate cycle
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// A cell was collapsed and its constraints propagated
    Collapsed {
        /// Cell that was collapsed
        position: GridPosition,
        /// Pattern it was collapsed to
        pattern: PatternId,
    },
    /// Every cell already holds exactly one candidate
    Complete,
}

/// Running totals for a solver run
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SolverStats {
    /// Cells collapsed by weighted choice
    pub collapses: usize,
    /// Worklist entries processed during propagation
    pub propagation_steps: usize,
    /// Candidates removed by propagation
    pub candidates_removed: usize,
    /// Cells rescued by the first-candidate fallback
    pub conflicts_resolved: usize,
}

/// Wave function collapse solver over overlapping sample patterns
///
/// Owns the output grid for the duration of one run. Call [`Solver::step`]
/// to advance one collapse at a time (a host can stop between steps), or
/// [`Solver::run`] to finish the grid.
pub struct Solver {
    catalog: PatternCatalog,
    rules: CompatibilityRules,
    grid: OutputGrid,
    selector: RandomSelector,
    config: SolverConfig,
    stats: SolverStats,
    /// Optional frame capture for GIF export
    pub visualization: Option<VisualizationCapture>,
}

impl Solver {
    /// Validate the configuration, extract patterns and initialise the grid
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration fails [`SolverConfig::validate`]
    pub fn new(sample: &Array2<Symbol>, config: SolverConfig) -> Result<Self> {
        config.validate(sample)?;

        let catalog = PatternCatalog::build(sample, config.pattern_size);
        let rules = CompatibilityRules::build(&catalog, config.adjacency);
        let grid = OutputGrid::initialize(&catalog, config.output_width, config.output_height);

        info!(
            patterns = catalog.len(),
            pattern_size = config.pattern_size,
            width = config.output_width,
            height = config.output_height,
            "initialised solver"
        );

        Ok(Self {
            catalog,
            rules,
            grid,
            selector: RandomSelector::new(config.seed),
            config,
            stats: SolverStats::default(),
            visualization: None,
        })
    }

    /// Perform one select, collapse and propagate cycle
    ///
    /// # Errors
    ///
    /// Returns [`AlgorithmError::Contradiction`] if the selected cell has no
    /// candidate, or if propagation empties a cell under
    /// [`ConflictPolicy::Fail`]
    pub fn step(&mut self) -> Result<StepOutcome> {
        let Some(position) = select_cell(&mut self.grid, &self.catalog) else {
            return Ok(StepOutcome::Complete);
        };

        let pattern = collapse_cell(&mut self.grid, &self.catalog, position, &mut self.selector)
            .ok_or(AlgorithmError::Contradiction {
                position: [position.x, position.y],
                iteration: self.stats.collapses,
            })?;
        self.stats.collapses += 1;

        let report = propagate(
            &mut self.grid,
            &self.rules,
            position,
            self.config.conflict_policy,
        )
        .with_iteration(self.stats.collapses)?;

        self.stats.propagation_steps += report.visited;
        self.stats.candidates_removed += report.removed;
        self.stats.conflicts_resolved += report.conflicts;

        debug!(
            x = position.x,
            y = position.y,
            pattern,
            removed = report.removed,
            conflicts = report.conflicts,
            "collapsed cell"
        );

        if let Some(capture) = &mut self.visualization {
            capture.record(&self.grid, &self.catalog);
        }

        Ok(StepOutcome::Collapsed { position, pattern })
    }

    /// Collapse until every cell is determined, then resolve symbols
    ///
    /// # Errors
    ///
    /// Propagates any error from [`Solver::step`]
    pub fn run(&mut self) -> Result<Array2<Symbol>> {
        while self.step()? != StepOutcome::Complete {}
        self.finish();
        Ok(self.result())
    }

    /// Collapse at most `max_collapses` cells
    ///
    /// Returns `true` if the grid is complete.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`Solver::step`]
    pub fn run_with_budget(&mut self, max_collapses: usize) -> Result<bool> {
        for _ in 0..max_collapses {
            if self.step()? == StepOutcome::Complete {
                self.finish();
                return Ok(true);
            }
        }

        let complete = self.grid.is_fully_collapsed();
        if complete {
            self.finish();
        }
        Ok(complete)
    }

    fn finish(&mut self) {
        if let Some(capture) = &mut self.visualization {
            capture.finish(&self.grid, &self.catalog);
        }
        info!(
            collapses = self.stats.collapses,
            propagation_steps = self.stats.propagation_steps,
            conflicts = self.stats.conflicts_resolved,
            "solver finished"
        );
    }

    /// Leading symbol of each cell's first remaining candidate
    pub fn result(&self) -> Array2<Symbol> {
        self.grid.resolve(&self.catalog)
    }

    /// Every cell holds exactly one candidate
    pub fn is_complete(&self) -> bool {
        self.grid.is_fully_collapsed()
    }

    /// Start capturing frames for GIF export
    pub fn enable_visualization(&mut self, palette: SymbolPalette) {
        self.visualization = Some(VisualizationCapture::new(palette, self.grid.len()));
    }

    /// Export captured frames as an animated GIF
    ///
    /// # Errors
    ///
    /// Returns an error if visualization was never enabled or the export fails
    pub fn export_visualization(&self, output_path: &Path, frame_delay_ms: u32) -> Result<()> {
        self.visualization
            .as_ref()
            .ok_or_else(|| AlgorithmError::InvalidSourceData {
                reason: "Visualization was not enabled".to_string(),
            })?
            .export_gif(output_path, frame_delay_ms)
    }

    /// Patterns extracted from the sample
    pub const fn catalog(&self) -> &PatternCatalog {
        &self.catalog
    }

    /// Current output grid
    pub const fn grid(&self) -> &OutputGrid {
        &self.grid
    }

    /// Precomputed compatibility rules
    pub const fn rules(&self) -> &CompatibilityRules {
        &self.rules
    }

    /// Configuration this solver was built with
    pub const fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Totals gathered so far
    pub const fn stats(&self) -> &SolverStats {
        &self.stats
    }
}

/// Synthesize a square grid from a sample in one call
///
/// # Errors
///
/// Returns an error if the sample is empty or the sizes are invalid
pub fn solve(
    sample: &Array2<Symbol>,
    output_size: usize,
    pattern_size: usize,
    seed: u64,
) -> Result<Array2<Symbol>> {
    Solver::new(sample, SolverConfig::square(output_size, pattern_size, seed))?.run()
}
