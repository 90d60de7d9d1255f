use serde::{Deserialize, Serialize};

/// Sparse matrix in compressed sparse row layout.
///
/// Row `r` owns `indices[indptr[r]..indptr[r + 1]]` and the matching slice of
/// `data`. Column indices within a row are strictly increasing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CsrMatrix {
    cols: usize,
    indptr: Vec<usize>,
    indices: Vec<usize>,
    data: Vec<f64>,
}

impl CsrMatrix {
    pub fn new(cols: usize) -> Self {
        CsrMatrix {
            cols,
            indptr: vec![0],
            indices: Vec::new(),
            data: Vec::new(),
        }
    }

    /// Appends a row. `entries` must be sorted by column with no duplicates.
    pub fn push_row(&mut self, entries: &[(usize, f64)]) {
        debug_assert!(entries.windows(2).all(|w| w[0].0 < w[1].0));
        debug_assert!(entries.iter().all(|(c, _)| *c < self.cols));
        for &(col, val) in entries {
            self.indices.push(col);
            self.data.push(val);
        }
        self.indptr.push(self.indices.len());
    }

    pub fn rows(&self) -> usize {
        self.indptr.len() - 1
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn nnz(&self) -> usize {
        self.data.len()
    }

    pub fn density(&self) -> f64 {
        let cells = self.rows() * self.cols;
        if cells == 0 {
            0.0
        } else {
            self.nnz() as f64 / cells as f64
        }
    }

    pub fn row(&self, r: usize) -> (&[usize], &[f64]) {
        let span = self.indptr[r]..self.indptr[r + 1];
        (&self.indices[span.clone()], &self.data[span])
    }

    #[cfg(test)]
    pub fn get(&self, r: usize, c: usize) -> f64 {
        let (indices, data) = self.row(r);
        indices
            .binary_search(&c)
            .map(|pos| data[pos])
            .unwrap_or(0.0)
    }

    /// Multiplies every stored value in column `c` by `weights[c]`.
    pub fn scale_columns(&mut self, weights: &[f64]) {
        for (col, val) in self.indices.iter().zip(self.data.iter_mut()) {
            *val *= weights[*col];
        }
    }

    pub fn map_values<F>(&mut self, f: F)
    where
        F: Fn(f64) -> f64,
    {
        for val in self.data.iter_mut() {
            *val = f(*val);
        }
    }

    /// Scales each row to unit Euclidean length. All-zero rows are left as is.
    pub fn normalize_rows_l2(&mut self) {
        for r in 0..self.rows() {
            let span = self.indptr[r]..self.indptr[r + 1];
            let row = &mut self.data[span];
            let norm = row.iter().map(|v| v * v).sum::<f64>().sqrt();
            if norm > 0.0 {
                row.iter_mut().for_each(|v| *v /= norm);
            }
        }
    }
}
