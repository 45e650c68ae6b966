//! Deterministic colors for categorical point labels.
//!
//! Mapping runs in two passes. The first collects the sorted [`LabelSet`] and
//! binds every unique label to a color; the second looks each point's label up
//! in that table. Colors therefore depend only on the set of labels present,
//! never on the order points arrive in.

use std::collections::HashMap;

use glam::Vec4;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};
use crate::label::{display_name, validate_labels, LabelSet, DEFAULT_SENTINEL};
use crate::palette::{hue_palette, neutral_grey, SENTINEL_LEGEND_ALPHA, SENTINEL_POINT_ALPHA};

/// Per-point RGBA colors, parallel to the input labels.
pub type ColorTable = Vec<Vec4>;

/// One row of the legend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendEntry {
    pub label: String,
    pub color: Vec4,
    pub display_name: String,
}

impl LegendEntry {
    fn new(label: &str, color: Vec4) -> Self {
        Self {
            label: label.to_owned(),
            color,
            display_name: display_name(label),
        }
    }
}

/// Output of [`CategoricalColorMapper::map`].
#[derive(Debug, Clone, PartialEq)]
pub struct CategoricalColors {
    /// One color per input point.
    pub colors: ColorTable,
    /// Non-sentinel entries in palette order, sentinel last.
    pub legend: Vec<LegendEntry>,
    label_set: LabelSet,
}

impl CategoricalColors {
    /// The unique labels the colors were derived from.
    #[must_use]
    pub fn label_set(&self) -> &LabelSet {
        &self.label_set
    }

    /// Legend color of `label`, if it occurred in the input.
    #[must_use]
    pub fn color_of(&self, label: &str) -> Option<Vec4> {
        self.legend
            .iter()
            .find(|entry| entry.label == label)
            .map(|entry| entry.color)
    }

    /// Number of points colored.
    #[must_use]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

/// Maps categorical labels to evenly spaced hues, with a grey sentinel bucket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoricalColorMapper {
    sentinel: String,
}

impl Default for CategoricalColorMapper {
    fn default() -> Self {
        Self::with_sentinel(DEFAULT_SENTINEL)
    }
}

impl CategoricalColorMapper {
    /// Creates a mapper using the default `"others"` sentinel.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a mapper with a custom sentinel label.
    pub fn with_sentinel(sentinel: impl Into<String>) -> Self {
        Self {
            sentinel: sentinel.into(),
        }
    }

    #[must_use]
    pub fn sentinel(&self) -> &str {
        &self.sentinel
    }

    /// Colors every label and builds the legend.
    ///
    /// Fails with [`CoreError::InvalidLabel`](crate::CoreError::InvalidLabel)
    /// if any label is empty; nothing is produced in that case.
    pub fn map<S: AsRef<str>>(&self, labels: &[S]) -> Result<CategoricalColors> {
        validate_labels(labels)?;

        let label_set = LabelSet::from_labels(labels, &self.sentinel);
        let palette = hue_palette(label_set.num_categories());

        let mut point_colors: HashMap<&str, Vec4> = label_set
            .categories()
            .iter()
            .map(String::as_str)
            .zip(palette.iter().copied())
            .collect();
        let mut legend: Vec<LegendEntry> = label_set
            .categories()
            .iter()
            .zip(&palette)
            .map(|(label, color)| LegendEntry::new(label, *color))
            .collect();

        if label_set.has_sentinel() {
            point_colors.insert(&self.sentinel, neutral_grey(SENTINEL_POINT_ALPHA));
            legend.push(LegendEntry::new(
                &self.sentinel,
                neutral_grey(SENTINEL_LEGEND_ALPHA),
            ));
        }

        let colors = labels
            .iter()
            .enumerate()
            .map(|(index, label)| {
                point_colors
                    .get(label.as_ref())
                    .copied()
                    .ok_or(CoreError::InvalidLabel { index })
            })
            .collect::<Result<ColorTable>>()?;

        log::debug!(
            "mapped {} points onto {} hues (sentinel present: {})",
            colors.len(),
            label_set.num_categories(),
            label_set.has_sentinel()
        );

        Ok(CategoricalColors {
            colors,
            legend,
            label_set,
        })
    }
}
