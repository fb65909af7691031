use std::ops::Range;

use ndarray::{s, ArrayView2, ArrayViewMut2};

use crate::Error;

/// Check that blocks of shape `block` tile the diagonal of a matrix of the
/// given `shape`, returning the number of blocks.
fn check_tiling(shape: (usize, usize), block: (usize, usize)) -> Result<usize, Error> {
    let (rows, columns) = shape;
    let (n, m) = block;

    if n == 0 || m == 0 {
        return Err(Error::InvalidBlockConfiguration(format!(
            "block shape must be positive, got ({}, {})", n, m
        )));
    }

    if rows % n != 0 {
        return Err(Error::InvalidBlockConfiguration(format!(
            "{} rows can not be split in blocks of {} rows", rows, n
        )));
    }

    if columns % m != 0 {
        return Err(Error::InvalidBlockConfiguration(format!(
            "{} columns can not be split in blocks of {} columns", columns, m
        )));
    }

    if rows / n != columns / m {
        return Err(Error::InvalidBlockConfiguration(format!(
            "blocks of shape ({}, {}) give {} blocks along the rows but {} \
            blocks along the columns of a ({}, {}) matrix",
            n, m, rows / n, columns / m, rows, columns
        )));
    }

    return Ok(rows / n);
}

/// Get a view over the diagonal blocks of shape `(n, m)` of `matrix`.
///
/// For a matrix of shape `(R, C)`, the view contains `R / n` blocks, and the
/// element `(k, i, j)` of the view is the element `(k * n + i, k * m + j)` of
/// the matrix. The view borrows the matrix mutably, writing through the view
/// modifies the matrix in place.
///
/// This fails with [`Error::InvalidBlockConfiguration`] if the blocks do not
/// tile both dimensions of the matrix with the same number of blocks.
pub fn blocks_of<A>(matrix: ArrayViewMut2<'_, A>, n: usize, m: usize) -> Result<DiagonalBlocksMut<'_, A>, Error> {
    let count = check_tiling(matrix.dim(), (n, m))?;
    return Ok(DiagonalBlocksMut {
        matrix: matrix,
        block: (n, m),
        count: count,
    });
}

/// Mutable view over the diagonal blocks of a matrix, created by
/// [`blocks_of`].
#[derive(Debug)]
pub struct DiagonalBlocksMut<'a, A> {
    matrix: ArrayViewMut2<'a, A>,
    block: (usize, usize),
    count: usize,
}

impl<'a, A> DiagonalBlocksMut<'a, A> {
    /// Get the shape of this view as `(number of blocks, n, m)`
    pub fn shape(&self) -> (usize, usize, usize) {
        (self.count, self.block.0, self.block.1)
    }

    /// Get the number of blocks in this view
    pub fn len(&self) -> usize {
        self.count
    }

    /// Is this view empty? This only happens for empty matrices.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    fn block_ranges(&self, k: usize) -> (Range<usize>, Range<usize>) {
        assert!(k < self.count, "block index {} is out of bounds for {} blocks", k, self.count);
        let (n, m) = self.block;
        return (k * n..(k + 1) * n, k * m..(k + 1) * m);
    }

    /// Get a view of the block `k`
    ///
    /// # Panics
    ///
    /// If `k` is larger than the number of blocks
    pub fn block(&self, k: usize) -> ArrayView2<'_, A> {
        let (rows, columns) = self.block_ranges(k);
        self.matrix.slice(s![rows, columns])
    }

    /// Get a mutable view of the block `k`
    ///
    /// # Panics
    ///
    /// If `k` is larger than the number of blocks
    pub fn block_mut(&mut self, k: usize) -> ArrayViewMut2<'_, A> {
        let (rows, columns) = self.block_ranges(k);
        self.matrix.slice_mut(s![rows, columns])
    }

    /// Get the element `(i, j)` of block `k`, or `None` if any index is out
    /// of bounds.
    pub fn get(&self, k: usize, i: usize, j: usize) -> Option<&A> {
        let (n, m) = self.block;
        if k >= self.count || i >= n || j >= m {
            return None;
        }
        return self.matrix.get((k * n + i, k * m + j));
    }

    /// Get a mutable reference to the element `(i, j)` of block `k`, or
    /// `None` if any index is out of bounds.
    pub fn get_mut(&mut self, k: usize, i: usize, j: usize) -> Option<&mut A> {
        let (n, m) = self.block;
        if k >= self.count || i >= n || j >= m {
            return None;
        }
        return self.matrix.get_mut((k * n + i, k * m + j));
    }

    /// Call `function` with `(k, i, j, &mut value)` for all elements in all
    /// blocks of this view
    pub fn for_each_mut(&mut self, mut function: impl FnMut(usize, usize, usize, &mut A)) {
        for k in 0..self.count {
            for ((i, j), value) in self.block_mut(k).indexed_iter_mut() {
                function(k, i, j, value);
            }
        }
    }
}

impl<'a, A: Clone> DiagonalBlocksMut<'a, A> {
    /// Set all the elements in the diagonal blocks to `value`
    pub fn fill(&mut self, value: A) {
        for k in 0..self.count {
            self.block_mut(k).fill(value.clone());
        }
    }
}

/// Description of diagonal exclusion blocks for a matrix of a given shape.
///
/// This stores the validated block configuration, and creates
/// [`DiagonalBlocksMut`] views over matrices with the right shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExclusionBlocks {
    shape: (usize, usize),
    block: (usize, usize),
    count: usize,
}

impl ExclusionBlocks {
    /// Create exclusion blocks of shape `block` for a matrix of shape
    /// `shape`, checking that the blocks tile the matrix.
    pub fn new(shape: (usize, usize), block: (usize, usize)) -> Result<ExclusionBlocks, Error> {
        let count = check_tiling(shape, block)?;
        return Ok(ExclusionBlocks {
            shape: shape,
            block: block,
            count: count,
        });
    }

    /// Get the shape of a single block
    pub fn block_shape(&self) -> (usize, usize) {
        self.block
    }

    /// Get the number of blocks
    pub fn count(&self) -> usize {
        self.count
    }

    /// Get the total number of matrix entries covered by the blocks
    pub fn excluded(&self) -> usize {
        self.count * self.block.0 * self.block.1
    }

    /// Create a view of the exclusion blocks in `matrix`
    pub fn view<'a, A>(&self, matrix: ArrayViewMut2<'a, A>) -> Result<DiagonalBlocksMut<'a, A>, Error> {
        if matrix.dim() != self.shape {
            return Err(Error::InvalidParameter(format!(
                "exclusion blocks were created for a {:?} matrix, got a {:?} matrix",
                self.shape, matrix.dim()
            )));
        }
        return blocks_of(matrix, self.block.0, self.block.1);
    }
}
