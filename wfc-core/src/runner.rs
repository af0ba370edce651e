use crate::entropy::{EntropyCalculator, MinimumRemainingValues};
use crate::generation::{Generation, GenerationStatus, IncompleteReason};
use crate::grid::{Grid, GridError};
use crate::propagator::{BreadthFirstPropagator, ConstraintPropagator, PropagationStats};
use crate::{ProgressInfo, WfcError};
use log::{debug, error, info, warn};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::fmt;
use std::time::Instant;
use wfc_rules::{generate_adjacency, AdjacencyRules, EdgeCompatibilityTable, TileCatalog, TileId};

/// Alias for the progress callback function type.
pub type ProgressCallback = Box<dyn Fn(&ProgressInfo) + Send + Sync>;

/// Configuration options for a generation run.
#[derive(Default)]
pub struct WfcConfig {
    /// Overrides the default cap of `width * height * 10` iterations.
    pub max_iterations: Option<u64>,
    /// Seed for the random source used by [`generate`].
    pub seed: Option<u64>,
    /// Called after every iteration.
    pub progress_callback: Option<ProgressCallback>,
}

impl WfcConfig {
    /// Creates a new builder for `WfcConfig`.
    pub fn builder() -> WfcConfigBuilder {
        WfcConfigBuilder::default()
    }
}

impl fmt::Debug for WfcConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WfcConfig")
            .field("max_iterations", &self.max_iterations)
            .field("seed", &self.seed)
            .field("progress_callback", &self.progress_callback.is_some())
            .finish()
    }
}

/// Builder for `WfcConfig`.
#[derive(Default)]
pub struct WfcConfigBuilder {
    max_iterations: Option<u64>,
    seed: Option<u64>,
    progress_callback: Option<ProgressCallback>,
}

impl WfcConfigBuilder {
    /// Sets the maximum number of iterations allowed.
    pub fn max_iterations(mut self, max: u64) -> Self {
        self.max_iterations = Some(max);
        self
    }

    /// Sets the seed for the random number generator.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the progress callback function.
    pub fn progress_callback(mut self, callback: ProgressCallback) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    pub fn build(self) -> WfcConfig {
        WfcConfig {
            max_iterations: self.max_iterations,
            seed: self.seed,
            progress_callback: self.progress_callback,
        }
    }
}

/// Result of a single [`WfcEngine::step`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// A cell was collapsed and its consequences propagated.
    Collapsed {
        index: usize,
        tile: TileId,
        stats: PropagationStats,
    },
    /// Every cell is collapsed.
    Finished,
    /// The run cannot make progress.
    Stalled(IncompleteReason),
}

/// Collapses cell `index` to one of its candidates, chosen uniformly.
///
/// Fails without touching the grid if the cell is out of range, already
/// collapsed, or has no candidate left.
pub fn collapse_cell<R: Rng + ?Sized>(
    grid: &mut Grid,
    index: usize,
    rng: &mut R,
) -> Result<TileId, GridError> {
    let cell = grid.cell(index).ok_or(GridError::IndexOutOfBounds {
        index,
        len: grid.len(),
    })?;
    if cell.is_collapsed() {
        return Err(GridError::AlreadyCollapsed { index });
    }
    let candidates: Vec<TileId> = cell.possible_tiles().collect();
    let tile = *candidates
        .choose(rng)
        .ok_or(GridError::Contradicted { index })?;
    grid.collapse_to(index, tile)?;
    Ok(tile)
}

/// Select-collapse-propagate state machine over a single grid.
///
/// Construction validates the rules and allocates the grid; [`Self::step`]
/// advances one iteration and [`Self::run`] drives it to a terminal state.
pub struct WfcEngine<R: Rng> {
    grid: Grid,
    rules: AdjacencyRules,
    rng: R,
    entropy_calculator: Box<dyn EntropyCalculator + Send + Sync>,
    propagator: Box<dyn ConstraintPropagator>,
    progress_callback: Option<ProgressCallback>,
    iteration_limit: u64,
    iterations: u64,
    collapsed_cells: usize,
    contradicted_cells: usize,
    seed: Option<u64>,
    start_time: Instant,
}

impl<R: Rng> WfcEngine<R> {
    /// Validates `table` against `catalog`, then builds a grid of
    /// `width x height` cells in full superposition.
    ///
    /// No grid is allocated when validation or the dimension check fails.
    pub fn new(
        catalog: &TileCatalog,
        table: &EdgeCompatibilityTable,
        width: usize,
        height: usize,
        config: WfcConfig,
        rng: R,
    ) -> Result<Self, WfcError> {
        let report = table.validate(catalog);
        if !report.is_valid() {
            error!("Refusing to generate: {report}");
            return Err(WfcError::InvalidRules(report));
        }

        let total_cells = match width.checked_mul(height) {
            Some(total) if total > 0 => total,
            _ => return Err(WfcError::InvalidDimensions { width, height }),
        };

        let rules = generate_adjacency(catalog, table);
        let iteration_limit = config
            .max_iterations
            .unwrap_or_else(|| (total_cells as u64).saturating_mul(10));
        debug!(
            "Initialised {width}x{height} grid over {} tiles, iteration limit {iteration_limit}",
            catalog.len()
        );

        Ok(Self {
            grid: Grid::new(width, height, catalog.len()),
            rules,
            rng,
            entropy_calculator: Box::new(MinimumRemainingValues::new()),
            propagator: Box::new(BreadthFirstPropagator::new()),
            progress_callback: config.progress_callback,
            iteration_limit,
            iterations: 0,
            collapsed_cells: 0,
            contradicted_cells: 0,
            seed: None,
            start_time: Instant::now(),
        })
    }

    pub fn with_entropy_calculator(
        mut self,
        calculator: Box<dyn EntropyCalculator + Send + Sync>,
    ) -> Self {
        self.entropy_calculator = calculator;
        self
    }

    pub fn with_propagator(mut self, propagator: Box<dyn ConstraintPropagator>) -> Self {
        self.propagator = propagator;
        self
    }

    fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    pub const fn rules(&self) -> &AdjacencyRules {
        &self.rules
    }

    pub const fn iterations(&self) -> u64 {
        self.iterations
    }

    fn progress(&self) -> ProgressInfo {
        ProgressInfo {
            collapsed_cells: self.collapsed_cells,
            contradicted_cells: self.contradicted_cells,
            total_cells: self.grid.len(),
            iterations: self.iterations,
            elapsed_time: self.start_time.elapsed(),
        }
    }

    /// Performs one iteration: select the lowest-entropy cell, collapse it,
    /// propagate.
    pub fn step(&mut self) -> Result<StepOutcome, WfcError> {
        if self.collapsed_cells == self.grid.len() {
            return Ok(StepOutcome::Finished);
        }
        if self.iterations >= self.iteration_limit {
            return Ok(StepOutcome::Stalled(IncompleteReason::IterationLimit));
        }
        let Some(index) = self.entropy_calculator.find_lowest_entropy(&self.grid) else {
            return Ok(StepOutcome::Stalled(IncompleteReason::Stalled));
        };

        self.iterations += 1;
        let tile = collapse_cell(&mut self.grid, index, &mut self.rng)?;
        debug!("Iter {}: collapsed cell {index} to tile {tile}", self.iterations);

        let stats = self
            .propagator
            .propagate(&mut self.grid, index, &self.rules)?;
        self.collapsed_cells += 1 + stats.forced_collapses;
        self.contradicted_cells += stats.contradictions.len();

        if let Some(callback) = &self.progress_callback {
            callback(&self.progress());
        }
        Ok(StepOutcome::Collapsed { index, tile, stats })
    }

    /// Steps until the grid is fully collapsed or no progress is possible.
    pub fn run(mut self) -> Result<Generation, WfcError> {
        info!(
            "Starting generation on a {}x{} grid",
            self.grid.width(),
            self.grid.height()
        );
        let status = loop {
            match self.step()? {
                StepOutcome::Collapsed { .. } => {}
                StepOutcome::Finished => break GenerationStatus::Success,
                StepOutcome::Stalled(reason) => break GenerationStatus::Incomplete(reason),
            }
        };

        let elapsed = self.start_time.elapsed();
        match status {
            GenerationStatus::Success => info!(
                "Generation finished in {elapsed:?} after {} iterations",
                self.iterations
            ),
            GenerationStatus::Incomplete(reason) => warn!(
                "Generation incomplete ({reason:?}) after {} iterations: {} of {} cells collapsed, {} contradicted",
                self.iterations,
                self.collapsed_cells,
                self.grid.len(),
                self.contradicted_cells
            ),
        }

        Ok(Generation {
            status,
            grid: self.grid,
            iterations: self.iterations,
            seed: self.seed,
            elapsed,
        })
    }
}

/// Runs a full generation with a [`StdRng`] seeded from `config.seed`, or
/// from OS entropy when no seed is given.
///
/// # Errors
///
/// [`WfcError::InvalidRules`] when the table does not validate against the
/// catalog, [`WfcError::InvalidDimensions`] for an empty or oversized grid.
/// Contradictions and stalls are not errors; see [`Generation::status`].
pub fn generate(
    catalog: &TileCatalog,
    table: &EdgeCompatibilityTable,
    width: usize,
    height: usize,
    config: WfcConfig,
) -> Result<Generation, WfcError> {
    let seed = config.seed;
    let rng = seed.map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);
    WfcEngine::new(catalog, table, width, height, config, rng)?
        .with_seed(seed)
        .run()
}

/// Like [`generate`], drawing randomness from `rng` instead.
pub fn generate_with_rng<R: Rng>(
    catalog: &TileCatalog,
    table: &EdgeCompatibilityTable,
    width: usize,
    height: usize,
    config: WfcConfig,
    rng: R,
) -> Result<Generation, WfcError> {
    WfcEngine::new(catalog, table, width, height, config, rng)?.run()
}
