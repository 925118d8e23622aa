//! Validated bin edges for one mixing axis.

use evmix_core::{Error, Result};

/// Where a value falls relative to one axis's edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisStatus {
    /// Inside `[edges[0], edges[last])`, in the given bin.
    InRange(usize),
    /// Below the first edge.
    Underflow,
    /// At or above the last edge.
    Overflow,
    /// Value absent for this event, or NaN.
    Missing,
}

impl AxisStatus {
    /// Bin index if the value was in range.
    #[inline]
    pub fn bin(self) -> Option<usize> {
        match self {
            AxisStatus::InRange(b) => Some(b),
            _ => None,
        }
    }
}

/// Strictly increasing, finite bin edges (length = n_bins + 1).
///
/// Bins are half-open: bin `i` covers `[edges[i], edges[i + 1])`. A value
/// exactly on an inner edge lands in the upper of the two adjacent bins,
/// and the last edge itself is outside the axis.
#[derive(Debug, Clone, PartialEq)]
pub struct BinEdges {
    edges: Vec<f64>,
}

impl BinEdges {
    /// Validate and wrap an edge sequence.
    pub fn new(edges: Vec<f64>) -> Result<Self> {
        if edges.len() < 2 {
            return Err(Error::Validation(format!(
                "bin edges require at least 2 entries, got {}",
                edges.len()
            )));
        }
        for (i, &e) in edges.iter().enumerate() {
            if !e.is_finite() {
                return Err(Error::Validation(format!("bin_edges[{i}] must be finite, got {e}")));
            }
            if i > 0 && edges[i - 1] >= e {
                return Err(Error::Validation(format!(
                    "bin edges must be strictly increasing, got edges[{}]={} and edges[{}]={}",
                    i - 1,
                    edges[i - 1],
                    i,
                    e
                )));
            }
        }
        Ok(Self { edges })
    }

    /// `n_bins` equal-width bins spanning `[lo, hi]`.
    pub fn uniform(lo: f64, hi: f64, n_bins: usize) -> Result<Self> {
        if n_bins == 0 {
            return Err(Error::Validation("uniform binning requires n_bins > 0".to_string()));
        }
        if !(lo.is_finite() && hi.is_finite() && lo < hi) {
            return Err(Error::Validation(format!(
                "uniform binning requires finite lo < hi, got lo={lo}, hi={hi}"
            )));
        }
        let width = (hi - lo) / n_bins as f64;
        let mut edges: Vec<f64> = (0..n_bins).map(|i| lo + width * i as f64).collect();
        // Pin the upper edge exactly; accumulated rounding must not move it.
        edges.push(hi);
        Self::new(edges)
    }

    /// Number of bins (radix of this axis).
    #[inline]
    pub fn n_bins(&self) -> usize {
        self.edges.len() - 1
    }

    /// Edge values.
    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.edges
    }

    /// Lower edge of the first bin.
    #[inline]
    pub fn lower(&self) -> f64 {
        self.edges[0]
    }

    /// Upper edge of the last bin (excluded from the axis).
    #[inline]
    pub fn upper(&self) -> f64 {
        self.edges[self.edges.len() - 1]
    }

    /// Locate `x` on this axis.
    #[inline]
    pub fn locate(&self, x: f64) -> AxisStatus {
        if x.is_nan() {
            return AxisStatus::Missing;
        }
        // `k` is the number of edges <= x, so bin index is k-1.
        let k = self.edges.partition_point(|e| *e <= x);
        if k == 0 {
            AxisStatus::Underflow
        } else if k == self.edges.len() {
            AxisStatus::Overflow
        } else {
            AxisStatus::InRange(k - 1)
        }
    }

    /// `[lo, hi)` bounds of `bin`.
    #[inline]
    pub fn bin_bounds(&self, bin: usize) -> Option<(f64, f64)> {
        if bin >= self.n_bins() {
            return None;
        }
        Some((self.edges[bin], self.edges[bin + 1]))
    }

    /// Midpoint of `bin`, always inside `[lo, hi)`.
    ///
    /// Falls back to `lo` when the bin is too narrow for the midpoint to
    /// round below `hi`.
    #[inline]
    pub fn bin_center(&self, bin: usize) -> Option<f64> {
        let (lo, hi) = self.bin_bounds(bin)?;
        let width = hi - lo;
        let mid = if width.is_finite() { lo + 0.5 * width } else { 0.5 * lo + 0.5 * hi };
        if mid.is_finite() && lo <= mid && mid < hi { Some(mid) } else { Some(lo) }
    }

    /// Consume into the raw edge vector.
    pub fn into_vec(self) -> Vec<f64> {
        self.edges
    }
}

impl TryFrom<Vec<f64>> for BinEdges {
    type Error = Error;

    fn try_from(edges: Vec<f64>) -> Result<Self> {
        Self::new(edges)
    }
}
