//! Event → category encoding.
//!
//! Each axis is located by binary search, then the per-axis bins are combined
//! as digits of a mixed-radix number:
//!
//! `category = Σ_i bin[i] * Π_{j>i} n_bins[j]`
//!
//! An event is categorized only if every axis is in range. There is no
//! partial category.

use std::collections::{BTreeMap, HashMap};

use rayon::prelude::*;

use evmix_core::{Category, Error, Result, VariableId, VariableValues, category_or_sentinel};

use crate::binning::MixingBinning;
use crate::edges::AxisStatus;

impl MixingBinning {
    /// Per-axis position of one event, in axis order.
    pub fn locate<V>(&self, values: &V) -> Vec<AxisStatus>
    where
        V: VariableValues + ?Sized,
    {
        self.variables
            .iter()
            .map(|v| match values.value(v.id) {
                Some(x) => v.edges.locate(x),
                None => AxisStatus::Missing,
            })
            .collect()
    }

    /// Category of one event, or `None` if any axis is out of range, a value
    /// is missing, or no axis is configured.
    pub fn find_category<V>(&self, values: &V) -> Option<Category>
    where
        V: VariableValues + ?Sized,
    {
        if self.variables.is_empty() {
            return None;
        }
        let mut category = 0usize;
        for (v, &stride) in self.variables.iter().zip(&self.strides) {
            let bin = v.edges.locate(values.value(v.id)?).bin()?;
            category += bin * stride;
        }
        Some(category)
    }

    /// Like [`find_category`](Self::find_category) but returns `-1` for
    /// rejected events.
    #[inline]
    pub fn find_category_or_sentinel<V>(&self, values: &V) -> i64
    where
        V: VariableValues + ?Sized,
    {
        category_or_sentinel(self.find_category(values))
    }

    /// Encode explicit per-axis bin indices.
    ///
    /// Returns `None` if `bins` does not have one entry per axis, if any bin
    /// is out of its axis range, or if no axis is configured.
    pub fn category_from_bins(&self, bins: &[usize]) -> Option<Category> {
        if self.variables.is_empty() || bins.len() != self.variables.len() {
            return None;
        }
        let mut category = 0usize;
        for ((v, &stride), &bin) in self.variables.iter().zip(&self.strides).zip(bins) {
            if bin >= v.n_bins() {
                return None;
            }
            category += bin * stride;
        }
        Some(category)
    }

    /// Categorize columnar event data in parallel.
    ///
    /// `columns` maps variable ids to per-event values. Every configured
    /// variable needs a column, and all columns used must have the same
    /// length. Extra columns are ignored.
    pub fn categorize_columns(
        &self,
        columns: &HashMap<VariableId, Vec<f64>>,
    ) -> Result<Vec<Option<Category>>> {
        let mut cols: Vec<&[f64]> = Vec::with_capacity(self.variables.len());
        for v in &self.variables {
            let col = columns.get(&v.id).ok_or_else(|| {
                Error::Validation(format!("missing column for mixing variable '{}'", v.label()))
            })?;
            cols.push(col.as_slice());
        }

        let n_events = cols.first().map(|c| c.len()).unwrap_or(0);
        for (v, col) in self.variables.iter().zip(&cols) {
            if col.len() != n_events {
                return Err(Error::Validation(format!(
                    "column length mismatch for mixing variable '{}': expected {}, got {}",
                    v.label(),
                    n_events,
                    col.len()
                )));
            }
        }

        let categories: Vec<Option<Category>> = (0..n_events)
            .into_par_iter()
            .map(|row| self.category_at_row(&cols, row))
            .collect();

        if tracing::enabled!(tracing::Level::DEBUG) {
            let summary = CategorizationSummary::from_categories(&categories);
            tracing::debug!(
                events = summary.n_events,
                accepted = summary.n_accepted,
                rejected = summary.n_rejected(),
                occupied = summary.occupancy.len(),
                "categorized event columns"
            );
        }

        Ok(categories)
    }

    /// Encode row `row` of columns aligned one-to-one with the axes.
    #[inline]
    fn category_at_row(&self, cols: &[&[f64]], row: usize) -> Option<Category> {
        if self.variables.is_empty() {
            return None;
        }
        let mut category = 0usize;
        for ((v, &stride), col) in self.variables.iter().zip(&self.strides).zip(cols) {
            let bin = v.edges.locate(*col.get(row)?).bin()?;
            category += bin * stride;
        }
        Some(category)
    }
}

/// Accepted/rejected counts and per-category occupancy of a batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategorizationSummary {
    /// Number of events seen.
    pub n_events: usize,
    /// Events that received a category.
    pub n_accepted: usize,
    /// Events per category, only for occupied categories.
    pub occupancy: BTreeMap<Category, usize>,
}

impl CategorizationSummary {
    /// Tally a batch of categorization results.
    pub fn from_categories(categories: &[Option<Category>]) -> Self {
        let mut summary = Self { n_events: categories.len(), ..Self::default() };
        for c in categories.iter().flatten() {
            summary.n_accepted += 1;
            *summary.occupancy.entry(*c).or_insert(0) += 1;
        }
        summary
    }

    /// Events rejected by the binning.
    #[inline]
    pub fn n_rejected(&self) -> usize {
        self.n_events - self.n_accepted
    }
}
