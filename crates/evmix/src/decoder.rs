//! Category → per-axis bin decoding (inverse of the mixed-radix encoding).

use evmix_core::{Category, VariableId};

use crate::binning::MixingBinning;

impl MixingBinning {
    /// Bin index of variable `id` encoded in `category`.
    ///
    /// Returns `None` if no axis is configured, `id` is not configured, or
    /// `category` is outside `[0, total_categories())`. When `id` names more
    /// than one axis, the last one is decoded.
    ///
    /// A category produced by a different binning decodes to a plausible but
    /// meaningless bin; this cannot be detected here.
    pub fn bin_from_category(&self, id: VariableId, category: Category) -> Option<usize> {
        if self.variables.is_empty() || category >= self.total {
            return None;
        }
        let axis = self.find_variable_index(id)?;
        Some(self.digit(axis, category))
    }

    /// Bin indices of every axis, in axis order.
    pub fn bins_from_category(&self, category: Category) -> Option<Vec<usize>> {
        if self.variables.is_empty() || category >= self.total {
            return None;
        }
        Some((0..self.variables.len()).map(|axis| self.digit(axis, category)).collect())
    }

    /// `[lo, hi)` bounds of every axis for `category`, in axis order.
    pub fn category_bounds(&self, category: Category) -> Option<Vec<(f64, f64)>> {
        let bins = self.bins_from_category(category)?;
        self.variables.iter().zip(bins).map(|(v, b)| v.edges.bin_bounds(b)).collect()
    }

    /// One in-range value per axis (the bin midpoint) for `category`.
    ///
    /// Feeding the result back through [`find_category`](Self::find_category)
    /// reproduces `category` when variable ids are unique.
    pub fn representative_values(&self, category: Category) -> Option<Vec<(VariableId, f64)>> {
        let bins = self.bins_from_category(category)?;
        self.variables
            .iter()
            .zip(bins)
            .map(|(v, b)| v.edges.bin_center(b).map(|x| (v.id, x)))
            .collect()
    }

    #[inline]
    fn digit(&self, axis: usize, category: Category) -> usize {
        (category / self.strides[axis]) % self.variables[axis].n_bins()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn two_axis_scenario() {
        let mut b = MixingBinning::builder();
        b.add_variable(0, vec![0.0, 10.0, 20.0]).add_variable(1, vec![0.0, 5.0]);
        let m = b.build().unwrap();
        assert_eq!(m.bin_from_category(1, 1), Some(0));
        assert_eq!(m.bin_from_category(0, 1), Some(1));
        assert_eq!(m.bin_from_category(0, 0), Some(0));
        assert_eq!(m.bin_from_category(0, 2), None);
        assert_eq!(m.bin_from_category(3, 0), None);
    }

    #[test]
    fn empty_binning_decodes_nothing() {
        let m = MixingBinning::builder().build().unwrap();
        assert_eq!(m.bin_from_category(0, 0), None);
        assert_eq!(m.bins_from_category(0), None);
        assert_eq!(m.representative_values(0), None);
    }

    #[test]
    fn decode_matches_direct_search() {
        let mut b = MixingBinning::builder();
        b.add_variable(4, vec![0.0, 10.0, 30.0, 50.0, 90.0])
            .add_variable(1, vec![-10.0, -5.0, 0.0, 5.0, 10.0])
            .add_variable(9, vec![0.0, 1.0, 2.0]);
        let m = b.build().unwrap();

        let events = [[35.0, 4.9, 0.0], [0.0, -10.0, 1.99], [89.9, 0.0, 1.0], [12.0, -7.0, 0.5]];
        for e in events {
            let values: HashMap<VariableId, f64> = [(4, e[0]), (1, e[1]), (9, e[2])].into();
            let c = m.find_category(&values).unwrap();
            for v in m.variables() {
                let direct = v.edges.locate(values[&v.id]).bin();
                assert_eq!(m.bin_from_category(v.id, c), direct, "variable {}", v.id);
            }
        }
    }

    #[test]
    fn duplicate_id_decodes_last_axis() {
        let mut b = MixingBinning::builder();
        b.add_variable(2, vec![0.0, 1.0, 2.0, 3.0]).add_variable(2, vec![0.0, 3.0]);
        let m = b.build().unwrap();
        // Axis 0 in bin 2, axis 1 in bin 0; lookups resolve to axis 1.
        let c = m.category_from_bins(&[2, 0]).unwrap();
        assert_eq!(c, 2);
        assert_eq!(m.bin_from_category(2, c), Some(0));
        assert_eq!(m.bins_from_category(c), Some(vec![2, 0]));
    }

    #[test]
    fn bounds_and_representatives() {
        let mut b = MixingBinning::builder();
        b.add_variable(0, vec![0.0, 10.0, 20.0]).add_variable(3, vec![-1.0, 0.0, 1.0]);
        let m = b.build().unwrap();
        let c = m.category_from_bins(&[1, 0]).unwrap();
        assert_eq!(m.category_bounds(c), Some(vec![(10.0, 20.0), (-1.0, 0.0)]));
        assert_eq!(m.representative_values(c), Some(vec![(0, 15.0), (3, -0.5)]));
    }

    #[test]
    fn representatives_round_trip_on_extreme_edges() {
        let mut b = MixingBinning::builder();
        b.add_variable(0, vec![1e308, 1.7e308])
            .add_variable(1, vec![1.0 + f64::EPSILON, 1.0 + 2.0 * f64::EPSILON])
            .add_variable(2, vec![-f64::MAX, 0.0, f64::MAX]);
        let m = b.build().unwrap();
        for c in 0..m.total_categories() {
            let values: HashMap<VariableId, f64> =
                m.representative_values(c).unwrap().into_iter().collect();
            assert_eq!(m.find_category(&values), Some(c));
        }
    }
}
