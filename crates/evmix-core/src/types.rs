//! Common identifiers shared across evmix crates.

/// Identifier of one observable.
///
/// Ids are drawn from the collaborator's variable enumeration and double as
/// indices into dense per-event value arrays.
pub type VariableId = usize;

/// Event category: one combination of per-axis bin indices.
pub type Category = usize;

/// Signed "no category" marker for collaborators storing categories in
/// signed integer columns.
pub const NO_CATEGORY: i64 = -1;

/// Convert an optional category into its signed column form.
///
/// `None` maps to [`NO_CATEGORY`]. Categories beyond `i64::MAX` cannot come
/// out of a validated binning on 64-bit targets and also map to the sentinel.
#[inline]
pub fn category_or_sentinel(category: Option<Category>) -> i64 {
    category.and_then(|c| i64::try_from(c).ok()).unwrap_or(NO_CATEGORY)
}
