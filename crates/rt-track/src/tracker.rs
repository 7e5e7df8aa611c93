use serde::Serialize;

use crate::boundary::BoundaryLines;
use crate::config::{ConfigError, TrackerConfig, validate_raster};
use crate::grid::{ConnectivityGrid, OccupancyGrid};
use crate::predicate::{OccupancyQuery, RegionPredicate};
use crate::propagate::{find_seeds, grow, shrink};
use crate::resample::resample;
use crate::stack::CandidateStack;
use crate::trace::trace_boundary;

/// Counters describing one tracking step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StepReport {
    /// 1-based index of the step since construction or the last reset.
    pub step: u64,
    pub seeds: usize,
    pub grown: usize,
    /// Net pixels removed by the shrink pass.
    pub eroded: usize,
    pub region_size: usize,
    /// Pixels with at least one boundary edge.
    pub frontier: usize,
    pub raw_lines: usize,
    pub raw_points: usize,
    pub resampled_lines: usize,
}

/// Incremental tracker for one region of a fixed-size raster.
///
/// Each [`track`](Self::track) call shrinks the region away from pixels the
/// predicate no longer accepts, seeds and grows into newly accepted pixels,
/// and re-extracts the boundary. Only the previous frontier and the pixels
/// that changed are revisited.
#[derive(Debug)]
pub struct RegionTracker<P> {
    config: TrackerConfig,
    predicate: P,
    occupancy: OccupancyGrid,
    connectivity: ConnectivityGrid,
    growth: CandidateStack,
    frontier: CandidateStack,
    raw: BoundaryLines,
    resampled: BoundaryLines,
    steps: u64,
    last: StepReport,
}

impl<P: RegionPredicate> RegionTracker<P> {
    pub fn new(
        width: usize,
        height: usize,
        config: TrackerConfig,
        predicate: P,
    ) -> Result<Self, ConfigError> {
        validate_raster(width, height)?;
        config.validate()?;

        let pixels = width * height;
        Ok(Self {
            occupancy: OccupancyGrid::new(width, height, config.region_id),
            connectivity: ConnectivityGrid::new(width, height),
            growth: CandidateStack::new(pixels),
            frontier: CandidateStack::new(pixels),
            raw: BoundaryLines::new(),
            resampled: BoundaryLines::new(),
            steps: 0,
            last: StepReport::default(),
            config,
            predicate,
        })
    }

    /// Runs one tracking step against the predicate's current state.
    pub fn track(&mut self) -> StepReport {
        let before = self.occupancy.count();

        let eroded = shrink(
            &mut self.occupancy,
            &mut self.growth,
            &mut self.frontier,
            &self.predicate,
        );
        let seeds = find_seeds(
            &mut self.occupancy,
            &mut self.growth,
            &self.predicate,
            self.config.seed_stride_x,
            self.config.seed_stride_y,
        );
        let grown = grow(
            &mut self.occupancy,
            &mut self.connectivity,
            &mut self.growth,
            &mut self.frontier,
            &self.predicate,
        );
        let raw_lines = trace_boundary(
            &mut self.connectivity,
            &self.frontier,
            self.config.decimation,
            &mut self.raw,
        );
        let resampled_lines = resample(
            &self.raw,
            self.config.resample_target,
            self.config.min_resample_points,
            &mut self.resampled,
        );

        self.predicate.observe(&self.occupancy);
        self.steps += 1;

        let report = StepReport {
            step: self.steps,
            seeds,
            grown,
            eroded,
            region_size: self.occupancy.count(),
            frontier: self.frontier.len(),
            raw_lines,
            raw_points: self.raw.num_points(),
            resampled_lines,
        };

        tracing::debug!(
            "step {}: {} seeds, +{} / -{} px, size {}, frontier {}, {} lines ({} resampled)",
            report.step,
            report.seeds,
            report.grown,
            report.eroded,
            report.region_size,
            report.frontier,
            report.raw_lines,
            report.resampled_lines
        );
        if before > 0 && report.region_size == 0 {
            tracing::warn!(
                "step {}: tracked region vanished ({} px before)",
                report.step,
                before
            );
        }

        self.last = report;
        report
    }

    /// Drops the region and all per-step state. Buffers keep their size.
    pub fn reset(&mut self) {
        self.occupancy.clear();
        self.connectivity.clear();
        self.growth.clear();
        self.frontier.clear();
        self.raw.clear();
        self.resampled.clear();
        self.steps = 0;
        self.last = StepReport::default();
    }
}

impl<P> RegionTracker<P> {
    pub fn width(&self) -> usize {
        self.occupancy.width()
    }

    pub fn height(&self) -> usize {
        self.occupancy.height()
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    pub fn region_size(&self) -> usize {
        self.occupancy.count()
    }

    pub fn step_count(&self) -> u64 {
        self.steps
    }

    pub fn last_report(&self) -> &StepReport {
        &self.last
    }

    pub fn occupancy(&self) -> &OccupancyGrid {
        &self.occupancy
    }

    pub fn connectivity(&self) -> &ConnectivityGrid {
        &self.connectivity
    }

    /// Pixels carrying boundary edges after the last step, in growth order.
    pub fn frontier(&self) -> &CandidateStack {
        &self.frontier
    }

    pub fn raw_boundary(&self) -> &BoundaryLines {
        &self.raw
    }

    pub fn resampled_boundary(&self) -> &BoundaryLines {
        &self.resampled
    }

    pub fn predicate(&self) -> &P {
        &self.predicate
    }

    pub fn predicate_mut(&mut self) -> &mut P {
        &mut self.predicate
    }

    pub fn into_predicate(self) -> P {
        self.predicate
    }
}

impl<P> OccupancyQuery for RegionTracker<P> {
    fn width(&self) -> usize {
        self.occupancy.width()
    }

    fn height(&self) -> usize {
        self.occupancy.height()
    }

    fn is_occupied(&self, x: usize, y: usize) -> bool {
        self.occupancy.is_occupied(x, y)
    }

    fn is_occupied_by(&self, x: usize, y: usize, id: u16) -> bool {
        self.occupancy.is_occupied_by(x, y, id)
    }
}
