//! Lazy enumeration of cartesian-product row positions.

/// Mixed-radix counter over a list of dimension lengths.
///
/// Yields every index tuple of the product in row-major order: the first
/// dimension varies slowest. Zero dimensions yield a single empty tuple; any
/// zero-length dimension yields nothing. The iterator is finite and
/// [`RowIndex::restart`] rewinds it.
#[derive(Debug, Clone)]
pub struct RowIndex {
    lengths: Vec<usize>,
    current: Vec<usize>,
    remaining: usize,
}

impl RowIndex {
    /// Create a counter over the given dimension lengths.
    pub fn new(lengths: Vec<usize>) -> Self {
        let remaining: usize = lengths.iter().product();
        Self {
            current: vec![0; lengths.len()],
            lengths,
            remaining,
        }
    }

    /// Total number of index tuples.
    pub fn total(&self) -> usize {
        self.lengths.iter().product()
    }

    /// Rewind to the first index tuple.
    pub fn restart(&mut self) {
        self.current.iter_mut().for_each(|i| *i = 0);
        self.remaining = self.total();
    }

    fn advance(&mut self) {
        for (pos, len) in self.current.iter_mut().zip(&self.lengths).rev() {
            *pos += 1;
            if *pos < *len {
                return;
            }
            *pos = 0;
        }
    }
}

impl Iterator for RowIndex {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let item = self.current.clone();
        self.remaining -= 1;
        self.advance();
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for RowIndex {}
