//! Core traits for evmix
//!
//! The categorization engine never owns event data. Per-event values are
//! read through [`VariableValues`], so the collaborator can hand over a
//! dense value table, a sparse map, or a row view over columns.

use std::collections::{BTreeMap, HashMap};

use crate::types::VariableId;

/// Read access to one event's observed values, keyed by variable id.
///
/// Returning `None` means the value is not available for this event. The
/// encoder treats an absent value like an out-of-range one.
pub trait VariableValues {
    /// Observed value of `variable`, if present.
    fn value(&self, variable: VariableId) -> Option<f64>;
}

impl VariableValues for [f64] {
    #[inline]
    fn value(&self, variable: VariableId) -> Option<f64> {
        self.get(variable).copied()
    }
}

impl VariableValues for [f32] {
    #[inline]
    fn value(&self, variable: VariableId) -> Option<f64> {
        self.get(variable).map(|&v| f64::from(v))
    }
}

impl VariableValues for Vec<f64> {
    #[inline]
    fn value(&self, variable: VariableId) -> Option<f64> {
        self.as_slice().value(variable)
    }
}

impl VariableValues for Vec<f32> {
    #[inline]
    fn value(&self, variable: VariableId) -> Option<f64> {
        self.as_slice().value(variable)
    }
}

impl<const N: usize> VariableValues for [f64; N] {
    #[inline]
    fn value(&self, variable: VariableId) -> Option<f64> {
        self.as_slice().value(variable)
    }
}

impl VariableValues for HashMap<VariableId, f64> {
    #[inline]
    fn value(&self, variable: VariableId) -> Option<f64> {
        self.get(&variable).copied()
    }
}

impl VariableValues for BTreeMap<VariableId, f64> {
    #[inline]
    fn value(&self, variable: VariableId) -> Option<f64> {
        self.get(&variable).copied()
    }
}

impl<T: VariableValues + ?Sized> VariableValues for &T {
    #[inline]
    fn value(&self, variable: VariableId) -> Option<f64> {
        (**self).value(variable)
    }
}
