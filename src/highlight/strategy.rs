//! Series vs. parallel selection.

use std::fmt;
use std::num::NonZeroUsize;

/// Below this many characters, parallel dispatch costs more than it saves.
pub const PARALLEL_MIN_CHARS: usize = 500_000;

/// Above this many characters, four CPUs are enough to go parallel.
pub const LARGE_INPUT_CHARS: usize = 3_000_000;

/// How rows are colorized.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Every row on the calling thread.
    Series,
    /// Rows distributed across a worker pool.
    Parallel,
}

impl Strategy {
    /// Lowercase name used in progress labels and logs.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Series => "series",
            Self::Parallel => "parallel",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Caller preference for the execution strategy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ExecutionMode {
    /// Decide with [`choose`].
    #[default]
    Auto,
    /// Always run in series.
    Series,
    /// Always run in parallel.
    Parallel,
}

impl ExecutionMode {
    /// Resolve to a concrete strategy for the given workload.
    #[must_use]
    pub fn resolve(self, n_chars: usize, n_rows: usize, cpu_count: Option<usize>) -> Strategy {
        match self {
            Self::Auto => choose(n_chars, n_rows, cpu_count),
            Self::Series => Strategy::Series,
            Self::Parallel => Strategy::Parallel,
        }
    }
}

/// Pick a strategy from input size and CPU count.
///
/// Small inputs, inputs of at most two rows, and hosts with an unknown CPU
/// count always run in series. Otherwise six CPUs suffice, or four when the
/// input exceeds [`LARGE_INPUT_CHARS`].
#[must_use]
pub const fn choose(n_chars: usize, n_rows: usize, cpu_count: Option<usize>) -> Strategy {
    let Some(cpus) = cpu_count else {
        return Strategy::Series;
    };
    if n_chars < PARALLEL_MIN_CHARS || n_rows <= 2 {
        return Strategy::Series;
    }
    if cpus >= 6 || (cpus >= 4 && n_chars > LARGE_INPUT_CHARS) {
        Strategy::Parallel
    } else {
        Strategy::Series
    }
}

/// Number of CPUs available to this process, if it can be determined.
#[must_use]
pub fn available_cpus() -> Option<usize> {
    std::thread::available_parallelism()
        .ok()
        .map(NonZeroUsize::get)
}
