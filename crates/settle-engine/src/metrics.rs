//! Per-iteration performance counters for the solver.
//!
//! [`IterationMetrics`] captures one sweep/exchange/merge cycle;
//! [`SolveStats`] accumulates them over a whole solve. Workers keep
//! their own counters and the driver reports worker 0's view, which
//! matches every other worker's on everything except wall-clock times.

/// Timing and progress counters for a single iteration of one worker.
///
/// All durations are in microseconds.
#[derive(Clone, Debug, Default)]
pub struct IterationMetrics {
    /// Iteration these counters describe (1-based).
    pub iteration: u64,
    /// Wall-clock time relaxing the worker's block, in microseconds.
    pub sweep_us: u64,
    /// Wall-clock time in the collective exchange, in microseconds.
    pub exchange_us: u64,
    /// Wall-clock time merging gathered blocks, in microseconds.
    pub merge_us: u64,
    /// Interior cells the sweep refreshed in the worker's block.
    pub cells_updated: usize,
    /// Interior cells the merge copied, over the whole grid.
    pub cells_merged: usize,
}

/// Accumulated counters for a whole solve, as seen by one worker.
#[derive(Clone, Debug, Default)]
pub struct SolveStats {
    /// Iterations completed, including the converging one.
    pub iterations: u64,
    /// Workers that participated.
    pub workers: usize,
    /// Total sweep time, in microseconds.
    pub sweep_us: u64,
    /// Total exchange time, in microseconds.
    pub exchange_us: u64,
    /// Total merge time, in microseconds.
    pub merge_us: u64,
    /// Total interior cell refreshes in this worker's block.
    pub cells_updated: u64,
    /// Total interior cells merged, over the whole grid. Zero for a
    /// solve whose seed was already settled.
    pub cells_merged: u64,
    /// Bytes held by each worker's padded grid copy.
    pub grid_bytes_per_worker: usize,
}

impl SolveStats {
    /// Fold one iteration's counters into the totals.
    pub fn record(&mut self, m: &IterationMetrics) {
        self.iterations += 1;
        self.sweep_us += m.sweep_us;
        self.exchange_us += m.exchange_us;
        self.merge_us += m.merge_us;
        self.cells_updated += m.cells_updated as u64;
        self.cells_merged += m.cells_merged as u64;
    }
}
