use crate::foundation::error::{AlphablendError, AlphablendResult};

/// Execution strategy for buffer-level blends.
///
/// Output bytes never depend on these settings; they only decide how the per-pixel work is
/// scheduled.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BlendThreading {
    /// Split large blends into row chunks on rayon.
    pub parallel: bool,
    /// Dedicated worker count. `None` runs on rayon's global pool.
    ///
    /// `Some(n)` builds a fresh pool of `n` workers for every blend call and drops it afterwards.
    /// Callers issuing many small blends should prefer `None` and size the global pool instead.
    pub threads: Option<usize>,
    /// Blends touching fewer pixels than this stay on the calling thread.
    pub min_parallel_pixels: usize,
    /// Rows handed to a worker at a time. `0` is treated as `1`; values beyond the surface
    /// height put the whole surface in one chunk.
    pub rows_per_chunk: usize,
}

impl Default for BlendThreading {
    fn default() -> Self {
        Self {
            parallel: true,
            threads: None,
            min_parallel_pixels: 16 * 1024,
            rows_per_chunk: 16,
        }
    }
}

impl BlendThreading {
    /// Single-threaded settings.
    pub fn sequential() -> Self {
        Self {
            parallel: false,
            ..Self::default()
        }
    }

    /// Reject settings that cannot be honored.
    pub fn validate(&self) -> AlphablendResult<()> {
        if let Some(n) = self.threads
            && n == 0
        {
            return Err(AlphablendError::validation(
                "blend threading 'threads' must be >= 1 when set",
            ));
        }
        Ok(())
    }

    pub(crate) fn wants_parallel(&self, pixels: u64) -> bool {
        self.parallel && pixels >= self.min_parallel_pixels as u64
    }

    pub(crate) fn rows_per_chunk(&self) -> usize {
        self.rows_per_chunk.max(1)
    }

    /// Run `op` on the configured pool. With `threads` set, the pool lives only for this call.
    pub(crate) fn install<R, F>(&self, op: F) -> AlphablendResult<R>
    where
        F: FnOnce() -> R + Send,
        R: Send,
    {
        match self.threads {
            None => Ok(op()),
            Some(n) => Ok(build_thread_pool(n)?.install(op)),
        }
    }
}

fn build_thread_pool(threads: usize) -> AlphablendResult<rayon::ThreadPool> {
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()
        .map_err(|e| AlphablendError::threading(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/composite/threading.rs"]
mod tests;
