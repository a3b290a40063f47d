/// Sparse N×V matrix of TF-IDF weights
///
/// Each row holds `(column, weight)` pairs sorted by column with no zero
/// weights. Rows are L2-normalized; an empty document is an empty row.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureMatrix {
    rows: Vec<Vec<(usize, f64)>>,
    columns: usize,
}

impl FeatureMatrix {
    pub(crate) fn new(rows: Vec<Vec<(usize, f64)>>, columns: usize) -> Self {
        FeatureMatrix { rows, columns }
    }

    /// All-zero matrix with `n` rows and no columns
    pub(crate) fn empty(n: usize) -> Self {
        FeatureMatrix {
            rows: vec![Vec::new(); n],
            columns: 0,
        }
    }

    /// Number of rows (documents)
    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns (vocabulary terms)
    pub fn n_columns(&self) -> usize {
        self.columns
    }

    pub fn row(&self, index: usize) -> &[(usize, f64)] {
        self.rows.get(index).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn rows(&self) -> impl Iterator<Item = &[(usize, f64)]> {
        self.rows.iter().map(Vec::as_slice)
    }

    /// True if the row has no non-zero weight
    pub fn is_zero_row(&self, index: usize) -> bool {
        self.row(index).is_empty()
    }

    /// Stored non-zero entries across all rows
    pub fn nnz(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }

    /// Weight at `(row, column)`, zero when absent
    pub fn get(&self, row: usize, column: usize) -> f64 {
        let entries = self.row(row);
        match entries.binary_search_by_key(&column, |&(c, _)| c) {
            Ok(pos) => entries[pos].1,
            Err(_) => 0.0,
        }
    }

    /// Dot product of two rows by merging their sorted columns
    pub fn dot(&self, a: usize, b: usize) -> f64 {
        sparse_dot(self.row(a), self.row(b))
    }
}

/// Dot product of two column-sorted sparse vectors
pub(crate) fn sparse_dot(a: &[(usize, f64)], b: &[(usize, f64)]) -> f64 {
    let (mut i, mut j) = (0, 0);
    let mut sum = 0.0;

    while i < a.len() && j < b.len() {
        let (col_a, w_a) = a[i];
        let (col_b, w_b) = b[j];
        match col_a.cmp(&col_b) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                sum += w_a * w_b;
                i += 1;
                j += 1;
            }
        }
    }

    sum
}

/// Scale a sparse row to unit Euclidean length; zero rows are left alone
pub(crate) fn l2_normalize(row: &mut [(usize, f64)]) {
    let norm = row.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
    if norm > 0.0 {
        for (_, w) in row.iter_mut() {
            *w /= norm;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sparse_dot_merges_columns() {
        let a = [(0, 1.0), (2, 2.0), (5, 3.0)];
        let b = [(2, 4.0), (3, 1.0), (5, 1.0)];
        assert_eq!(sparse_dot(&a, &b), 11.0);
        assert_eq!(sparse_dot(&a, &[]), 0.0);
    }

    #[test]
    fn test_l2_normalize() {
        let mut row = vec![(0, 3.0), (1, 4.0)];
        l2_normalize(&mut row);
        assert_eq!(row, vec![(0, 0.6), (1, 0.8)]);

        let mut empty: Vec<(usize, f64)> = vec![];
        l2_normalize(&mut empty);
        assert!(empty.is_empty());
    }

    #[test]
    fn test_get_and_zero_rows() {
        let m = FeatureMatrix::new(vec![vec![(1, 0.5)], vec![]], 3);
        assert_eq!(m.get(0, 1), 0.5);
        assert_eq!(m.get(0, 2), 0.0);
        assert_eq!(m.get(7, 0), 0.0);
        assert!(m.is_zero_row(1));
        assert!(!m.is_zero_row(0));
        assert_eq!(m.nnz(), 1);
        assert_eq!(m.n_columns(), 3);
    }
}
