//! Resource documents
//!
//! An apply action carries an opaque YAML document. It is templated first
//! and parsed second, so the document only needs to be valid YAML after the
//! event's values have been substituted in.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A declared resource, parsed from a templated apply document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceDocument {
    /// API version, e.g. `v1` or `batch/v1`
    #[serde(default)]
    pub api_version: String,

    /// Resource kind
    #[serde(default)]
    pub kind: String,

    /// Resource metadata
    #[serde(default)]
    pub metadata: ResourceMetadata,

    /// Everything else in the document, carried through untouched
    #[serde(flatten)]
    pub body: serde_yaml::Mapping,
}

/// The metadata block of a resource document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceMetadata {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub generate_name: String,

    #[serde(default)]
    pub namespace: String,

    #[serde(default)]
    pub labels: BTreeMap<String, String>,
}

impl ResourceDocument {
    /// Parse a rendered apply document.
    pub fn parse(rendered: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(rendered)
    }

    /// The declared name, falling back to the generate-name prefix.
    pub fn display_name(&self) -> &str {
        if self.metadata.name.is_empty() {
            &self.metadata.generate_name
        } else {
            &self.metadata.name
        }
    }
}
