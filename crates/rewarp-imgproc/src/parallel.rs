use rayon::prelude::*;
use thiserror::Error;

/// Errors that can occur during parallel execution.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParallelError {
    /// The thread pool failed to build.
    #[error("failed to build thread pool: {0}")]
    BuildError(String),

    /// The requested thread count is invalid.
    #[error("thread count must be > 0, got {0}")]
    InvalidThreadCount(usize),
}

/// Controls how the rows of a destination buffer are processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExecutionStrategy {
    /// Run sequentially on the current thread.
    ///
    /// Useful for small images, debugging, or when the overhead of parallelization
    /// outweighs the benefits.
    Serial,

    /// Use the global Rayon thread pool to process rows in parallel.
    #[default]
    ParallelRows,

    /// Run on a local thread pool with `n` threads.
    ///
    /// # Warning
    /// Creates a new thread pool on every call, which has significant overhead.
    /// Use this primarily for benchmarking or specific isolation needs.
    Fixed(usize),
}

// runs `op` under the strategy; `op` receives whether it may use rayon
fn run_with<R: Send>(
    strategy: ExecutionStrategy,
    op: impl FnOnce(bool) -> R + Send,
) -> Result<R, ParallelError> {
    match strategy {
        ExecutionStrategy::Serial => Ok(op(false)),
        ExecutionStrategy::ParallelRows => Ok(op(true)),
        ExecutionStrategy::Fixed(n) => {
            if n == 0 {
                return Err(ParallelError::InvalidThreadCount(n));
            }
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(n)
                .build()
                .map_err(|e| ParallelError::BuildError(e.to_string()))?;
            Ok(pool.install(|| op(true)))
        }
    }
}

/// Apply a function to every row of a buffer, passing the row index.
///
/// # Arguments
///
/// * `dst` - The row-major buffer to fill.
/// * `stride` - The number of elements per row.
/// * `strategy` - How the rows are scheduled.
/// * `f` - Called once per row with `(row_index, row)`.
///
/// # Errors
///
/// If the strategy asks for an invalid thread pool.
pub fn par_iter_rows_indexed<T: Send>(
    dst: &mut [T],
    stride: usize,
    strategy: ExecutionStrategy,
    f: impl Fn(usize, &mut [T]) + Send + Sync,
) -> Result<(), ParallelError> {
    if stride == 0 || dst.is_empty() {
        return run_with(strategy, |_| ());
    }
    run_with(strategy, |parallel| {
        if parallel {
            dst.par_chunks_exact_mut(stride)
                .enumerate()
                .for_each(|(y, row)| f(y, row));
        } else {
            dst.chunks_exact_mut(stride)
                .enumerate()
                .for_each(|(y, row)| f(y, row));
        }
    })
}

/// Apply a function to every row of two buffers in lockstep, passing the row index.
///
/// Both buffers must hold the same number of rows, `dst.len() / dst_stride`
/// and `aux.len() / aux_stride`; extra rows of the longer buffer are left untouched.
///
/// # Errors
///
/// If the strategy asks for an invalid thread pool.
pub fn par_iter_rows_indexed_two<T: Send, U: Send>(
    dst: &mut [T],
    dst_stride: usize,
    aux: &mut [U],
    aux_stride: usize,
    strategy: ExecutionStrategy,
    f: impl Fn(usize, &mut [T], &mut [U]) + Send + Sync,
) -> Result<(), ParallelError> {
    if dst_stride == 0 || aux_stride == 0 || dst.is_empty() || aux.is_empty() {
        return run_with(strategy, |_| ());
    }
    run_with(strategy, |parallel| {
        if parallel {
            dst.par_chunks_exact_mut(dst_stride)
                .zip(aux.par_chunks_exact_mut(aux_stride))
                .enumerate()
                .for_each(|(y, (row, aux_row))| f(y, row, aux_row));
        } else {
            dst.chunks_exact_mut(dst_stride)
                .zip(aux.chunks_exact_mut(aux_stride))
                .enumerate()
                .for_each(|(y, (row, aux_row))| f(y, row, aux_row));
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill(strategy: ExecutionStrategy) -> Result<Vec<usize>, ParallelError> {
        let mut dst = vec![0; 12];
        par_iter_rows_indexed(&mut dst, 4, strategy, |y, row| {
            row.iter_mut().enumerate().for_each(|(x, v)| *v = y * 10 + x)
        })?;
        Ok(dst)
    }

    #[test]
    fn test_rows_serial() -> Result<(), ParallelError> {
        assert_eq!(
            fill(ExecutionStrategy::Serial)?,
            vec![0, 1, 2, 3, 10, 11, 12, 13, 20, 21, 22, 23]
        );
        Ok(())
    }

    #[test]
    fn test_rows_strategies_agree() -> Result<(), ParallelError> {
        let serial = fill(ExecutionStrategy::Serial)?;
        assert_eq!(fill(ExecutionStrategy::ParallelRows)?, serial);
        assert_eq!(fill(ExecutionStrategy::Fixed(2))?, serial);
        Ok(())
    }

    #[test]
    fn test_rows_fixed_error() {
        let res = fill(ExecutionStrategy::Fixed(0));
        assert_eq!(res, Err(ParallelError::InvalidThreadCount(0)));
    }

    #[test]
    fn test_rows_empty() -> Result<(), ParallelError> {
        let mut dst: Vec<u8> = vec![];
        par_iter_rows_indexed(&mut dst, 0, ExecutionStrategy::ParallelRows, |_, _| {})?;
        assert!(dst.is_empty());
        Ok(())
    }

    #[test]
    fn test_rows_two() -> Result<(), ParallelError> {
        let mut dst = vec![0u8; 6];
        let mut aux = vec![0.0f32; 3];
        par_iter_rows_indexed_two(
            &mut dst,
            2,
            &mut aux,
            1,
            ExecutionStrategy::Fixed(3),
            |y, row, aux_row| {
                row.fill(y as u8);
                aux_row[0] = y as f32 * 0.5;
            },
        )?;
        assert_eq!(dst, vec![0, 0, 1, 1, 2, 2]);
        assert_eq!(aux, vec![0.0, 0.5, 1.0]);
        Ok(())
    }
}
