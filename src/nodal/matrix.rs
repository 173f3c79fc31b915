//! Conductance matrix assembly and solving.

use crate::error::{ReduceError, Result};

/// Pivots smaller than this, relative to the largest matrix entry, are
/// treated as zero.
pub const PIVOT_EPSILON: f64 = 1e-12;

/// Nodal system `G v = i`.
#[derive(Debug)]
pub struct ConductanceMatrix {
    /// Conductance matrix G (row-major)
    pub g: Vec<f64>,
    /// Injected current vector i
    pub i: Vec<f64>,
    /// Solution vector v (node voltages)
    pub v: Vec<f64>,
    /// Matrix dimension
    pub size: usize,
    /// LU decomposition of G
    lu: Vec<f64>,
    /// Pivot indices for LU decomposition
    pivots: Vec<usize>,
    /// Absolute zero-pivot threshold of the current factorization
    tolerance: f64,
}

impl ConductanceMatrix {
    /// Create a zeroed system for `size` non-reference nodes.
    pub fn new(size: usize) -> Self {
        Self {
            g: vec![0.0; size * size],
            i: vec![0.0; size],
            v: vec![0.0; size],
            size,
            lu: vec![0.0; size * size],
            pivots: vec![0; size],
            tolerance: 0.0,
        }
    }

    /// Get matrix element at (row, col).
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.g[row * self.size + col]
    }

    /// Add to matrix element at (row, col).
    pub fn add(&mut self, row: usize, col: usize, value: f64) {
        self.g[row * self.size + col] += value;
    }

    /// Stamp a conductance between two nodes. `None` is the reference node.
    ///
    /// For a conductance G between nodes n1 and n2:
    ///   G[n1,n1] += G
    ///   G[n2,n2] += G
    ///   G[n1,n2] -= G
    ///   G[n2,n1] -= G
    pub fn stamp_conductance(&mut self, n1: Option<usize>, n2: Option<usize>, g: f64) {
        if let Some(i) = n1 {
            self.add(i, i, g);
        }
        if let Some(j) = n2 {
            self.add(j, j, g);
        }
        if let (Some(i), Some(j)) = (n1, n2) {
            self.add(i, j, -g);
            self.add(j, i, -g);
        }
    }

    /// Stamp a current source between two nodes.
    /// Current flows from n+ to n- through the source, so it enters n-.
    pub fn stamp_current_source(&mut self, n_pos: Option<usize>, n_neg: Option<usize>, current: f64) {
        if let Some(i) = n_pos {
            self.i[i] -= current;
        }
        if let Some(j) = n_neg {
            self.i[j] += current;
        }
    }

    /// Factor G in place into `P G = L U`, choosing the largest remaining
    /// entry of each column as pivot.
    ///
    /// A pivot is treated as zero when it is below [`PIVOT_EPSILON`] times
    /// the largest entry of G, so the test does not depend on the absolute
    /// scale of the resistances.
    pub fn factor(&mut self) -> Result<()> {
        let n = self.size;
        self.lu.copy_from_slice(&self.g);
        self.pivots.iter_mut().enumerate().for_each(|(k, p)| *p = k);

        let scale = self.g.iter().map(|x| x.abs()).fold(0.0, f64::max);
        self.tolerance = PIVOT_EPSILON * scale;

        for k in 0..n {
            let (best, magnitude) = (k..n)
                .map(|row| (row, self.lu[row * n + k].abs()))
                .fold((k, -1.0), |acc, cand| if cand.1 > acc.1 { cand } else { acc });
            if magnitude <= self.tolerance {
                return Err(ReduceError::SingularMatrix);
            }
            if best != k {
                self.pivots.swap(k, best);
                for col in 0..n {
                    self.lu.swap(k * n + col, best * n + col);
                }
            }

            // rows above the split are finished; the pivot row ends the head
            let (head, tail) = self.lu.split_at_mut((k + 1) * n);
            let pivot_row = &head[k * n..];
            for row in tail.chunks_exact_mut(n) {
                let factor = row[k] / pivot_row[k];
                row[k] = factor;
                for (x, &p) in row[k + 1..].iter_mut().zip(&pivot_row[k + 1..]) {
                    *x -= factor * p;
                }
            }
        }

        Ok(())
    }

    /// Solve for `v` using the factors from [`factor`](Self::factor).
    pub fn solve(&mut self) -> Result<()> {
        let n = self.size;
        let mut y: Vec<f64> = self.pivots.iter().map(|&p| self.i[p]).collect();

        for row in 0..n {
            let lower = &self.lu[row * n..row * n + row];
            let acc: f64 = lower.iter().zip(&y[..row]).map(|(l, y)| l * y).sum();
            y[row] -= acc;
        }

        for row in (0..n).rev() {
            let upper = &self.lu[row * n + row + 1..(row + 1) * n];
            let acc: f64 = upper.iter().zip(&y[row + 1..]).map(|(u, y)| u * y).sum();
            let diag = self.lu[row * n + row];
            if diag.abs() <= self.tolerance {
                return Err(ReduceError::SingularMatrix);
            }
            y[row] = (y[row] - acc) / diag;
        }

        self.v = y;
        Ok(())
    }

    /// Get the voltage at a node (0 for the reference node).
    pub fn voltage(&self, node: Option<usize>) -> f64 {
        node.map_or(0.0, |i| self.v[i])
    }
}
