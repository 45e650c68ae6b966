//! Categorical labels and the sorted set of unique labels.

use std::collections::BTreeSet;

use crate::error::{CoreError, Result};

/// Label value that always renders in the neutral grey.
pub const DEFAULT_SENTINEL: &str = "others";

/// Checks that every label is a non-empty string.
///
/// Returns the index of the first offending label as [`CoreError::InvalidLabel`].
pub fn validate_labels<S: AsRef<str>>(labels: &[S]) -> Result<()> {
    match labels.iter().position(|label| label.as_ref().is_empty()) {
        Some(index) => Err(CoreError::InvalidLabel { index }),
        None => Ok(()),
    }
}

/// Checks that a point source supplies exactly one label per coordinate.
pub fn check_lengths(coordinates: usize, labels: usize) -> Result<()> {
    if coordinates == labels {
        Ok(())
    } else {
        Err(CoreError::InputLengthMismatch {
            coordinates,
            labels,
        })
    }
}

/// Human readable form of a label: underscores become spaces.
#[must_use]
pub fn display_name(label: &str) -> String {
    label.replace('_', " ")
}

/// Unique labels in ascending order, with the sentinel tracked separately.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelSet {
    /// Non-sentinel labels, sorted.
    categories: Vec<String>,
    sentinel: String,
    has_sentinel: bool,
}

impl LabelSet {
    /// Collects the unique labels of `labels`.
    pub fn from_labels<S: AsRef<str>>(labels: &[S], sentinel: &str) -> Self {
        let unique: BTreeSet<&str> = labels.iter().map(|label| label.as_ref()).collect();
        let has_sentinel = unique.contains(sentinel);
        let categories = unique
            .into_iter()
            .filter(|label| *label != sentinel)
            .map(str::to_owned)
            .collect();

        Self {
            categories,
            sentinel: sentinel.to_owned(),
            has_sentinel,
        }
    }

    /// Non-sentinel labels in ascending order.
    #[must_use]
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Number of distinct non-sentinel labels; this is the hue count.
    #[must_use]
    pub fn num_categories(&self) -> usize {
        self.categories.len()
    }

    /// Whether any point carries the sentinel label.
    #[must_use]
    pub fn has_sentinel(&self) -> bool {
        self.has_sentinel
    }

    /// The sentinel label value.
    #[must_use]
    pub fn sentinel(&self) -> &str {
        &self.sentinel
    }

    /// Total number of unique labels, sentinel included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.categories.len() + usize::from(self.has_sentinel)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
