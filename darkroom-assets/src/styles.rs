//! Style catalog: named resize profiles.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One resize profile.
///
/// Variants are aspect-filled: the source is scaled to fully cover the
/// box, then center-cropped to exactly `width x height`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Style {
    /// Target width in pixels.
    pub width: u32,
    /// Target height in pixels.
    pub height: u32,
}

impl Style {
    /// Create a style.
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// The named styles configured for the whole pipeline.
///
/// An asset's variant set is always a subset of this catalog; a missing
/// variant means generation failed or never ran, never that it was
/// renamed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StyleCatalog(BTreeMap<String, Style>);

impl StyleCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a style.
    pub fn with_style(mut self, name: impl Into<String>, width: u32, height: u32) -> Self {
        self.0.insert(name.into(), Style::new(width, height));
        self
    }

    /// Look up a style by name.
    pub fn get(&self, name: &str) -> Option<Style> {
        self.0.get(name).copied()
    }

    /// Iterate over the styles in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Style)> {
        self.0.iter()
    }

    /// Number of styles.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// How variant generation aggregates per-style failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VariantPolicy {
    /// Failures are logged and reported per style; the batch always
    /// completes and the asset keeps every style that succeeded. The
    /// default.
    #[default]
    BestEffort,
    /// The first style failure is returned to the caller after the batch
    /// settles. Styles that already succeeded stay recorded; additive
    /// mutations are never rolled back.
    FailFast,
}
