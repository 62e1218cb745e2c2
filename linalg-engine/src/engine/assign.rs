use itertools::iproduct;
use log::debug;

use crate::engine::{MatrixEngine, MatrixEngineMut, VectorEngine, VectorEngineMut};
use crate::error::{EngineError, Result};

/// Fails unless a fixed destination of shape `expected` can take a source of shape `found` as is.
#[inline]
pub(crate) fn check_fixed_shape(expected: (usize, usize), found: (usize, usize)) -> Result<()> {
    if expected != found {
        debug!(
            "rejecting assignment of a {}x{} source into a fixed {}x{} engine",
            found.0, found.1, expected.0, expected.1
        );
        return Err(EngineError::invalid_size(expected, found));
    }
    Ok(())
}

/// Copies elements `[0, min(dst.size(), src.size()))`.
pub(crate) fn copy_vector<D, S>(dst: &mut D, src: &S)
where
    D: VectorEngineMut,
    S: VectorEngine,
    S::Element: Into<D::Element>,
{
    for (d, s) in dst.iter_mut().zip(src.iter()) {
        *d = (*s).into();
    }
}

/// Copies the block `[0, min(rows)) x [0, min(columns))`.
pub(crate) fn copy_matrix<D, S>(dst: &mut D, src: &S)
where
    D: MatrixEngineMut,
    S: MatrixEngine,
    S::Element: Into<D::Element>,
{
    let rows = dst.rows().min(src.rows());
    let columns = dst.columns().min(src.columns());
    for (i, j) in iproduct!(0..rows, 0..columns) {
        *dst.get_mut(i, j) = (*src.get(i, j)).into();
    }
}
