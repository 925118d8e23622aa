//! Binning definition files (YAML/JSON).
//!
//! A definition records the axes of a [`MixingBinning`] verbatim, in order,
//! so that categories stay reproducible across runs:
//!
//! ```yaml
//! schema_version: evmix_binning_v0
//! variables:
//!   - id: 3
//!     name: centrality
//!     edges: [0.0, 10.0, 30.0, 50.0, 90.0]
//!   - id: 7
//!     uniform: { lo: -10.0, hi: 10.0, n_bins: 4 }
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use evmix_core::VariableId;

use crate::binning::{DuplicatePolicy, MixingBinning, MixingVariable};
use crate::edges::BinEdges;

/// Schema identifier written to and required from every definition.
pub const BINNING_SPEC_V0: &str = "evmix_binning_v0";

/// Serialized binning definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BinningSpec {
    /// Must equal [`BINNING_SPEC_V0`].
    pub schema_version: String,
    /// Handling of repeated variable ids.
    #[serde(default)]
    pub duplicate_policy: DuplicatePolicySpec,
    /// Axes in digit order (most significant first).
    pub variables: Vec<VariableSpec>,
}

/// Serialized [`DuplicatePolicy`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicySpec {
    /// See [`DuplicatePolicy::LastWins`].
    #[default]
    LastWins,
    /// See [`DuplicatePolicy::Reject`].
    Reject,
}

impl From<DuplicatePolicySpec> for DuplicatePolicy {
    fn from(p: DuplicatePolicySpec) -> Self {
        match p {
            DuplicatePolicySpec::LastWins => DuplicatePolicy::LastWins,
            DuplicatePolicySpec::Reject => DuplicatePolicy::Reject,
        }
    }
}

/// One axis of a definition. Exactly one of `edges` / `uniform` must be set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VariableSpec {
    /// Variable id.
    pub id: VariableId,
    /// Optional display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Explicit bin edges.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edges: Option<Vec<f64>>,
    /// Equal-width binning.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uniform: Option<UniformSpec>,
}

/// Equal-width binning over `[lo, hi]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UniformSpec {
    /// Lower edge.
    pub lo: f64,
    /// Upper edge.
    pub hi: f64,
    /// Number of bins.
    pub n_bins: usize,
}

impl VariableSpec {
    fn to_edges(&self) -> Result<BinEdges> {
        let edges = match (&self.edges, &self.uniform) {
            (Some(e), None) => BinEdges::new(e.clone()),
            (None, Some(u)) => BinEdges::uniform(u.lo, u.hi, u.n_bins),
            (Some(_), Some(_)) => {
                anyhow::bail!("variable {}: set either 'edges' or 'uniform', not both", self.id)
            }
            (None, None) => {
                anyhow::bail!("variable {}: one of 'edges' or 'uniform' is required", self.id)
            }
        };
        edges.with_context(|| format!("variable {}: invalid binning", self.id))
    }
}

impl BinningSpec {
    /// Record a sealed binning with explicit edges.
    pub fn from_binning(binning: &MixingBinning) -> Self {
        Self {
            schema_version: BINNING_SPEC_V0.to_string(),
            duplicate_policy: DuplicatePolicySpec::LastWins,
            variables: binning
                .variables()
                .iter()
                .map(|v| VariableSpec {
                    id: v.id,
                    name: v.name.clone(),
                    edges: Some(v.edges.as_slice().to_vec()),
                    uniform: None,
                })
                .collect(),
        }
    }

    /// Validate and seal into a [`MixingBinning`].
    pub fn compile(&self) -> Result<MixingBinning> {
        check_schema_version(&self.schema_version)?;
        let variables = self
            .variables
            .iter()
            .map(|v| {
                Ok(MixingVariable { id: v.id, name: v.name.clone(), edges: v.to_edges()? })
            })
            .collect::<Result<Vec<_>>>()?;
        let binning = MixingBinning::from_variables(variables, self.duplicate_policy.into())?;
        Ok(binning)
    }

    /// Pretty JSON rendering.
    pub fn to_json_pretty(&self) -> evmix_core::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Parse a definition from YAML or JSON text.
pub fn parse_binning_spec(text: &str) -> Result<BinningSpec> {
    let spec: BinningSpec =
        serde_yaml_ng::from_str(text).context("failed to parse binning spec (YAML/JSON)")?;
    check_schema_version(&spec.schema_version)?;
    Ok(spec)
}

fn check_schema_version(version: &str) -> Result<()> {
    if version != BINNING_SPEC_V0 {
        anyhow::bail!("unsupported schema_version: {} (expected {})", version, BINNING_SPEC_V0);
    }
    Ok(())
}

/// Read a definition file (YAML or JSON).
pub fn read_binning_spec(path: &Path) -> Result<BinningSpec> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    parse_binning_spec(&text).with_context(|| format!("in binning spec {}", path.display()))
}

/// Write a definition as pretty JSON.
pub fn write_binning_spec(path: &Path, spec: &BinningSpec) -> evmix_core::Result<()> {
    let json = spec.to_json_pretty()?;
    std::fs::write(path, json + "\n")?;
    tracing::debug!(path = %path.display(), axes = spec.variables.len(), "wrote binning spec");
    Ok(())
}
