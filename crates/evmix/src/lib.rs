//! # evmix
//!
//! Multi-dimensional event categorization for event mixing.
//!
//! Events are bucketed by several continuous observables, each split into
//! analyst-defined bins. Every combination of per-axis bins gets one integer
//! category (mixed-radix encoding, first axis most significant), and any
//! single axis can be recovered from a category without the raw values.
//!
//! ## Example
//!
//! ```
//! use evmix::MixingBinning;
//!
//! const CENTRALITY: usize = 0;
//! const VTX_Z: usize = 1;
//!
//! let mut builder = MixingBinning::builder();
//! builder
//!     .add_named_variable(CENTRALITY, "centrality", vec![0.0, 10.0, 30.0, 50.0, 90.0])
//!     .add_named_variable(VTX_Z, "vtx_z", vec![-10.0, -5.0, 0.0, 5.0, 10.0]);
//! let binning = builder.build().unwrap();
//! assert_eq!(binning.total_categories(), 16);
//!
//! let category = binning.find_category(&[35.0, 1.2]).unwrap();
//! assert_eq!(category, 10);
//! assert_eq!(binning.bin_from_category(CENTRALITY, category), Some(2));
//! assert_eq!(binning.bin_from_category(VTX_Z, category), Some(2));
//!
//! // Outside the configured range on any axis: no category.
//! assert_eq!(binning.find_category(&[35.0, 10.0]), None);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod binning;
pub mod decoder;
pub mod edges;
pub mod encoder;
pub mod spec;

pub use binning::{DuplicatePolicy, MixingBinning, MixingBinningBuilder, MixingVariable};
pub use edges::{AxisStatus, BinEdges};
pub use encoder::CategorizationSummary;
pub use evmix_core::{
    Category, Error, NO_CATEGORY, Result, VariableId, VariableValues, category_or_sentinel,
};
pub use spec::{
    BINNING_SPEC_V0, BinningSpec, DuplicatePolicySpec, UniformSpec, VariableSpec,
    parse_binning_spec, read_binning_spec, write_binning_spec,
};
