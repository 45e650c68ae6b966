//! Point coordinates and labels loaded from files.
//!
//! Coordinates are a JSON array of `[x, y, z]` triples, or a `.npy` array of
//! shape `(n, 3)`. Labels are a JSON array of records, each either a plain
//! string or an array of strings whose first column is the category.

use std::path::Path;

use glam::Vec3;
use serde::Deserialize;

use cloudspin_core::{check_lengths, CoreError};

use crate::error::{CloudspinError, Result};

/// One label record; only the first column is used for coloring.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum LabelRecord {
    Single(String),
    Columns(Vec<String>),
}

impl LabelRecord {
    /// The category column, if the record has one.
    #[must_use]
    pub fn category(&self) -> Option<&str> {
        match self {
            Self::Single(label) => Some(label),
            Self::Columns(columns) => columns.first().map(String::as_str),
        }
    }
}

/// Parallel coordinates and category labels.
#[derive(Debug, Clone, PartialEq)]
pub struct PointSource {
    pub coordinates: Vec<Vec3>,
    pub labels: Vec<String>,
}

impl PointSource {
    /// Pairs coordinates with labels; both must have the same length.
    pub fn new(coordinates: Vec<Vec3>, labels: Vec<String>) -> Result<Self> {
        check_lengths(coordinates.len(), labels.len())?;
        Ok(Self {
            coordinates,
            labels,
        })
    }

    /// Builds a source from raw coordinate triples and label records.
    pub fn from_records(coordinates: Vec<[f32; 3]>, records: Vec<LabelRecord>) -> Result<Self> {
        check_lengths(coordinates.len(), records.len())?;
        let labels = records
            .iter()
            .enumerate()
            .map(|(index, record)| {
                record
                    .category()
                    .map(str::to_owned)
                    .ok_or(CoreError::InvalidLabel { index })
            })
            .collect::<std::result::Result<Vec<_>, _>>()?;
        let coordinates = coordinates.into_iter().map(Vec3::from_array).collect();
        Self::new(coordinates, labels)
    }

    /// Parses coordinates and labels from JSON text.
    pub fn from_json_str(coordinates: &str, labels: &str) -> Result<Self> {
        let coordinates: Vec<[f32; 3]> = serde_json::from_str(coordinates)?;
        let records: Vec<LabelRecord> = serde_json::from_str(labels)?;
        Self::from_records(coordinates, records)
    }

    /// Loads coordinates (`.npy` or JSON) and JSON labels.
    pub fn load(coordinates: &Path, labels: &Path) -> Result<Self> {
        let is_npy = coordinates
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("npy"));
        let triples = if is_npy {
            coordinates_from_npy(&std::fs::read(coordinates)?)?
        } else {
            serde_json::from_str(&std::fs::read_to_string(coordinates)?)?
        };
        let records: Vec<LabelRecord> = serde_json::from_str(&std::fs::read_to_string(labels)?)?;
        let source = Self::from_records(triples, records)?;
        log::info!(
            "loaded {} points from {} and {}",
            source.len(),
            coordinates.display(),
            labels.display()
        );
        Ok(source)
    }

    /// Number of points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.coordinates.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.coordinates.is_empty()
    }
}

/// Reads an `(n, 3)` C-order array of `f32` or `f64` from `.npy` bytes.
#[allow(clippy::cast_possible_truncation)]
pub fn coordinates_from_npy(bytes: &[u8]) -> Result<Vec<[f32; 3]>> {
    let npy = npyz::NpyFile::new(bytes)?;
    let shape = npy.shape().to_vec();
    if shape.len() != 2 || shape[1] != 3 {
        return Err(CloudspinError::Data(format!(
            "coordinates must have shape (n, 3), got {shape:?}"
        )));
    }
    if matches!(npy.order(), npyz::Order::Fortran) {
        return Err(CloudspinError::Data(
            "Fortran-ordered coordinate arrays are not supported".into(),
        ));
    }

    let values: Vec<f32> = match npy.into_vec::<f32>() {
        Ok(values) => values,
        Err(_) => npyz::NpyFile::new(bytes)?
            .into_vec::<f64>()?
            .into_iter()
            .map(|v| v as f32)
            .collect(),
    };
    Ok(values
        .chunks_exact(3)
        .map(|xyz| [xyz[0], xyz[1], xyz[2]])
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_first_label_column_used() {
        let source = PointSource::from_json_str(
            "[[0, 0, 0], [1, 2, 3]]",
            r#"[["mito", "ENSG01"], ["others", "ENSG02"]]"#,
        )
        .unwrap();
        assert_eq!(source.labels, ["mito", "others"]);
        assert_eq!(source.coordinates[1], Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_plain_string_labels() {
        let source = PointSource::from_json_str("[[0, 0, 0]]", r#"["er"]"#).unwrap();
        assert_eq!(source.labels, ["er"]);
        assert_eq!(source.len(), 1);
    }

    #[test]
    fn test_length_mismatch() {
        let err = PointSource::from_json_str("[[0, 0, 0], [1, 1, 1]]", r#"["er"]"#).unwrap_err();
        assert!(matches!(
            err,
            CloudspinError::Core(CoreError::InputLengthMismatch {
                coordinates: 2,
                labels: 1
            })
        ));
    }

    #[test]
    fn test_empty_record_is_invalid_label() {
        let err = PointSource::from_json_str("[[0, 0, 0], [1, 1, 1]]", r#"["er", []]"#).unwrap_err();
        assert!(matches!(
            err,
            CloudspinError::Core(CoreError::InvalidLabel { index: 1 })
        ));
    }

    #[test]
    fn test_null_label_rejected() {
        let err = PointSource::from_json_str("[[0, 0, 0]]", "[null]").unwrap_err();
        assert!(matches!(err, CloudspinError::Json(_)));
    }

    #[test]
    fn test_empty_source() {
        let source = PointSource::from_json_str("[]", "[]").unwrap();
        assert!(source.is_empty());
    }

    /// Builds a version 1.0 `.npy` file around raw little-endian data.
    fn npy_bytes(descr: &str, shape: &str, data: &[u8]) -> Vec<u8> {
        let mut header =
            format!("{{'descr': '{descr}', 'fortran_order': False, 'shape': {shape}, }}");
        while (10 + header.len() + 1) % 64 != 0 {
            header.push(' ');
        }
        header.push('\n');

        let mut bytes = b"\x93NUMPY\x01\x00".to_vec();
        bytes.extend_from_slice(&u16::try_from(header.len()).unwrap().to_le_bytes());
        bytes.extend_from_slice(header.as_bytes());
        bytes.extend_from_slice(data);
        bytes
    }

    #[test]
    fn test_npy_f32_coordinates() {
        let data: Vec<u8> = [0.0_f32, 1.0, 2.0, 3.0, 4.0, 5.0]
            .iter()
            .flat_map(|v| v.to_le_bytes())
            .collect();
        let coordinates = coordinates_from_npy(&npy_bytes("<f4", "(2, 3)", &data)).unwrap();
        assert_eq!(coordinates, [[0.0, 1.0, 2.0], [3.0, 4.0, 5.0]]);
    }

    #[test]
    fn test_npy_f64_coordinates() {
        let data: Vec<u8> = [0.5_f64, -1.0, 2.0]
            .iter()
            .flat_map(|v| v.to_le_bytes())
            .collect();
        let coordinates = coordinates_from_npy(&npy_bytes("<f8", "(1, 3)", &data)).unwrap();
        assert_eq!(coordinates, [[0.5, -1.0, 2.0]]);
    }

    #[test]
    fn test_npy_wrong_shape() {
        let data: Vec<u8> = [0.0_f32; 4].iter().flat_map(|v| v.to_le_bytes()).collect();
        let err = coordinates_from_npy(&npy_bytes("<f4", "(2, 2)", &data)).unwrap_err();
        assert!(matches!(err, CloudspinError::Data(_)));
    }

    #[test]
    fn test_load_npy_coordinates_with_json_labels() {
        let dir = std::env::temp_dir().join("cloudspin_source_npy");
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        let data: Vec<u8> = [1.0_f32, 2.0, 3.0].iter().flat_map(|v| v.to_le_bytes()).collect();
        std::fs::write(dir.join("umap.npy"), npy_bytes("<f4", "(1, 3)", &data)).unwrap();
        std::fs::write(dir.join("labels.json"), r#"[["golgi", "GENE1"]]"#).unwrap();

        let source = PointSource::load(&dir.join("umap.npy"), &dir.join("labels.json")).unwrap();
        assert_eq!(source.coordinates, [Vec3::new(1.0, 2.0, 3.0)]);
        assert_eq!(source.labels, ["golgi"]);
        let _ = std::fs::remove_dir_all(&dir);
    }

    proptest! {
        #[test]
        fn first_column_always_taken(
            rows in prop::collection::vec(
                prop::collection::vec("[a-z]{1,6}", 1..4),
                0..32,
            ),
        ) {
            let coordinates = vec![[0.0_f32; 3]; rows.len()];
            let records = rows.iter().cloned().map(LabelRecord::Columns).collect();
            let source = PointSource::from_records(coordinates, records).unwrap();
            prop_assert_eq!(source.len(), rows.len());
            for (label, row) in source.labels.iter().zip(&rows) {
                prop_assert_eq!(label, &row[0]);
            }
        }
    }
}
