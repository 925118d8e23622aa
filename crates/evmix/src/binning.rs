//! Mixing-variable configuration: an append-only builder and the sealed binning it produces.
//!
//! Axis order is significant. It fixes the digit order of the mixed-radix
//! category (axis 0 is the most significant digit) and the lookup order
//! used to resolve a variable id to an axis.

use std::collections::HashSet;

use evmix_core::{Error, Result, VariableId};

use crate::edges::BinEdges;

/// What `build()` does when the same variable id is configured twice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DuplicatePolicy {
    /// Keep every axis; lookups by id resolve to the last one added.
    #[default]
    LastWins,
    /// Fail with [`Error::DuplicateVariable`].
    Reject,
}

/// One configured axis of a sealed binning.
#[derive(Debug, Clone, PartialEq)]
pub struct MixingVariable {
    /// Variable id (index into the per-event value table).
    pub id: VariableId,
    /// Optional display name.
    pub name: Option<String>,
    /// Bin edges of this axis.
    pub edges: BinEdges,
}

impl MixingVariable {
    /// Number of bins on this axis.
    #[inline]
    pub fn n_bins(&self) -> usize {
        self.edges.n_bins()
    }

    /// Display label: the name if set, otherwise `var<id>`.
    pub fn label(&self) -> String {
        match &self.name {
            Some(n) => n.clone(),
            None => format!("var{}", self.id),
        }
    }
}

#[derive(Debug, Clone)]
struct PendingVariable {
    id: VariableId,
    name: Option<String>,
    edges: Vec<f64>,
}

/// Open configuration: variables can be appended until [`build`](Self::build).
#[derive(Debug, Clone, Default)]
pub struct MixingBinningBuilder {
    variables: Vec<PendingVariable>,
    duplicate_policy: DuplicatePolicy,
}

impl MixingBinningBuilder {
    /// Empty builder with [`DuplicatePolicy::LastWins`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an axis. Edges are validated in [`build`](Self::build).
    pub fn add_variable(&mut self, id: VariableId, edges: impl Into<Vec<f64>>) -> &mut Self {
        self.variables.push(PendingVariable { id, name: None, edges: edges.into() });
        self
    }

    /// Append a named axis.
    pub fn add_named_variable(
        &mut self,
        id: VariableId,
        name: impl Into<String>,
        edges: impl Into<Vec<f64>>,
    ) -> &mut Self {
        self.variables.push(PendingVariable { id, name: Some(name.into()), edges: edges.into() });
        self
    }

    /// Set the duplicate-id policy applied at build time.
    pub fn duplicate_policy(&mut self, policy: DuplicatePolicy) -> &mut Self {
        self.duplicate_policy = policy;
        self
    }

    /// Number of axes added so far.
    pub fn len(&self) -> usize {
        self.variables.len()
    }

    /// `true` if no axis was added.
    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    /// Position of the last added axis with this id.
    pub fn find_variable_index(&self, id: VariableId) -> Option<usize> {
        self.variables.iter().rposition(|v| v.id == id)
    }

    /// Product of bin counts over the axes added so far (1 if none).
    ///
    /// Edges are not validated yet: an axis with fewer than two edges
    /// contributes zero bins, and the product saturates at `usize::MAX`.
    pub fn total_categories(&self) -> usize {
        self.variables
            .iter()
            .fold(1usize, |acc, v| acc.saturating_mul(v.edges.len().saturating_sub(1)))
    }

    /// Validate the configuration and seal it.
    pub fn build(&self) -> Result<MixingBinning> {
        let mut variables = Vec::with_capacity(self.variables.len());
        for (axis, v) in self.variables.iter().enumerate() {
            let edges = BinEdges::new(v.edges.clone()).map_err(|e| match e {
                Error::Validation(msg) => {
                    Error::Validation(format!("axis {axis} (variable {}): {msg}", v.id))
                }
                other => other,
            })?;
            variables.push(MixingVariable { id: v.id, name: v.name.clone(), edges });
        }
        MixingBinning::from_variables(variables, self.duplicate_policy)
    }
}

/// Sealed, immutable binning. Cheap to share across threads.
#[derive(Debug, Clone, PartialEq)]
pub struct MixingBinning {
    pub(crate) variables: Vec<MixingVariable>,
    /// Product of bin counts of all axes strictly after axis `i`.
    pub(crate) strides: Vec<usize>,
    pub(crate) total: usize,
}

impl MixingBinning {
    /// Start an open configuration.
    pub fn builder() -> MixingBinningBuilder {
        MixingBinningBuilder::new()
    }

    /// Seal already-validated axes.
    pub fn from_variables(
        variables: Vec<MixingVariable>,
        duplicate_policy: DuplicatePolicy,
    ) -> Result<Self> {
        let mut seen = HashSet::with_capacity(variables.len());
        for v in &variables {
            if !seen.insert(v.id) {
                match duplicate_policy {
                    DuplicatePolicy::Reject => return Err(Error::DuplicateVariable(v.id)),
                    DuplicatePolicy::LastWins => {
                        tracing::warn!(
                            variable = v.id,
                            label = %v.label(),
                            "mixing variable configured more than once; lookups use the last axis"
                        );
                    }
                }
            }
        }

        let n = variables.len();
        let mut strides = vec![1usize; n];
        let mut total = 1usize;
        for i in (0..n).rev() {
            strides[i] = total;
            total = total
                .checked_mul(variables[i].n_bins())
                .ok_or(Error::CategoryOverflow { axes: n })?;
        }

        if n == 0 {
            tracing::warn!("mixing binning has no variables; every event will be rejected");
        } else {
            tracing::debug!(
                axes = n,
                total_categories = total,
                bins = ?variables.iter().map(|v| v.n_bins()).collect::<Vec<_>>(),
                "mixing binning sealed"
            );
        }

        Ok(Self { variables, strides, total })
    }

    /// Configured axes in digit order.
    #[inline]
    pub fn variables(&self) -> &[MixingVariable] {
        &self.variables
    }

    /// Number of axes.
    #[inline]
    pub fn n_variables(&self) -> usize {
        self.variables.len()
    }

    /// `true` if no axis is configured.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    /// Size of the category space: product of bin counts (1 if no axes).
    #[inline]
    pub fn total_categories(&self) -> usize {
        self.total
    }

    /// Position of the last configured axis with this id.
    #[inline]
    pub fn find_variable_index(&self, id: VariableId) -> Option<usize> {
        self.variables.iter().rposition(|v| v.id == id)
    }

    /// Bin edges of the axis `id` resolves to.
    pub fn variable_edges(&self, id: VariableId) -> Option<&BinEdges> {
        self.find_variable_index(id).map(|i| &self.variables[i].edges)
    }

    /// Category stride of axis `axis`: product of bin counts of later axes.
    #[inline]
    pub fn stride(&self, axis: usize) -> Option<usize> {
        self.strides.get(axis).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_queries_before_build() {
        let mut b = MixingBinning::builder();
        assert!(b.is_empty());
        assert_eq!(b.total_categories(), 1);

        b.add_variable(3, vec![0.0, 10.0, 20.0]).add_variable(5, [0.0, 1.0, 2.0, 3.0]);
        assert_eq!(b.len(), 2);
        assert_eq!(b.total_categories(), 6);
        assert_eq!(b.find_variable_index(5), Some(1));
        assert_eq!(b.find_variable_index(4), None);

        b.add_variable(9, vec![1.0]);
        assert_eq!(b.total_categories(), 0);
    }

    #[test]
    fn build_computes_strides() {
        let mut b = MixingBinning::builder();
        b.add_variable(0, vec![0.0, 1.0, 2.0])
            .add_variable(1, vec![0.0, 1.0, 2.0, 3.0])
            .add_variable(2, vec![0.0, 1.0, 2.0, 3.0, 4.0]);
        let m = b.build().unwrap();
        assert_eq!(m.total_categories(), 24);
        assert_eq!(m.stride(0), Some(12));
        assert_eq!(m.stride(1), Some(4));
        assert_eq!(m.stride(2), Some(1));
        assert_eq!(m.stride(3), None);
    }

    #[test]
    fn empty_binning_has_unit_space() {
        let m = MixingBinning::builder().build().unwrap();
        assert!(m.is_empty());
        assert_eq!(m.total_categories(), 1);
    }

    #[test]
    fn build_reports_bad_axis() {
        let mut b = MixingBinning::builder();
        b.add_variable(0, vec![0.0, 1.0]).add_variable(7, vec![2.0, 1.0]);
        let err = b.build().unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("axis 1"), "{msg}");
        assert!(msg.contains("variable 7"), "{msg}");
    }

    #[test]
    fn duplicates_last_wins_by_default() {
        let mut b = MixingBinning::builder();
        b.add_variable(4, vec![0.0, 1.0, 2.0]).add_variable(4, vec![0.0, 5.0, 10.0, 15.0]);
        let m = b.build().unwrap();
        assert_eq!(m.n_variables(), 2);
        assert_eq!(m.find_variable_index(4), Some(1));
        assert_eq!(m.variable_edges(4).unwrap().n_bins(), 3);
        assert_eq!(m.total_categories(), 6);
    }

    #[test]
    fn duplicates_rejected_on_request() {
        let mut b = MixingBinning::builder();
        b.duplicate_policy(DuplicatePolicy::Reject)
            .add_variable(4, vec![0.0, 1.0])
            .add_variable(2, vec![0.0, 1.0])
            .add_variable(4, vec![0.0, 1.0]);
        match b.build() {
            Err(Error::DuplicateVariable(4)) => {}
            other => panic!("expected duplicate error, got {other:?}"),
        }
    }

    #[test]
    fn overflow_is_reported() {
        let edges: Vec<f64> = (0..=u16::MAX as usize).map(|i| i as f64).collect();
        let mut b = MixingBinning::builder();
        for id in 0..5 {
            b.add_variable(id, edges.clone());
        }
        assert!(matches!(b.build(), Err(Error::CategoryOverflow { axes: 5 })));
        assert_eq!(b.total_categories(), usize::MAX);
    }

    #[test]
    fn labels() {
        let mut b = MixingBinning::builder();
        b.add_named_variable(1, "centrality", vec![0.0, 90.0]).add_variable(2, vec![0.0, 1.0]);
        let m = b.build().unwrap();
        assert_eq!(m.variables()[0].label(), "centrality");
        assert_eq!(m.variables()[1].label(), "var2");
    }

    #[test]
    fn sealed_binning_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<MixingBinning>();
    }
}
