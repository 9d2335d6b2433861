//! Combinatorial helpers for factor recombination.

/// Generates the `k`-element subsets of `{0, ..., n-1}` in lexicographic order,
/// without allocating for every subset.
///
/// ```
/// use polyrad::combinatorics::CombinationIterator;
///
/// let mut c = CombinationIterator::new(4, 3);
/// let mut combinations = vec![];
/// while let Some(a) = c.next() {
///     combinations.push(a.to_vec());
/// }
///
/// assert_eq!(combinations, [[0, 1, 2], [0, 1, 3], [0, 2, 3], [1, 2, 3]]);
/// ```
pub struct CombinationIterator {
    n: usize,
    indices: Vec<usize>,
    init: bool,
}

impl CombinationIterator {
    pub fn new(n: usize, k: usize) -> CombinationIterator {
        CombinationIterator {
            indices: (0..k).collect(),
            n,
            init: false,
        }
    }

    /// Advance to the next subset.
    pub fn next(&mut self) -> Option<&[usize]> {
        if self.indices.is_empty() || self.indices.len() > self.n {
            return None;
        }

        if !self.init {
            self.init = true;
            return Some(&self.indices);
        }

        let k = self.indices.len();
        let i = (0..k).rev().find(|&i| self.indices[i] < self.n - k + i)?;

        let a = self.indices[i] + 1;
        for (p, v) in self.indices[i..].iter_mut().enumerate() {
            *v = a + p;
        }

        Some(&self.indices)
    }
}

#[cfg(test)]
mod test {
    use super::CombinationIterator;

    #[test]
    fn subsets() {
        let mut c = CombinationIterator::new(5, 2);
        let mut count = 0;
        while let Some(s) = c.next() {
            assert!(s[0] < s[1] && s[1] < 5);
            count += 1;
        }
        assert_eq!(count, 10);

        assert!(CombinationIterator::new(2, 3).next().is_none());
        assert!(CombinationIterator::new(3, 0).next().is_none());
    }
}
