//! Reshape of the nested analytical result into flat records.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::response::AnalyticalResponse;

/// Errors produced while decoding an analytical result.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DecodeError {
    /// The response body is not valid JSON or not the expected result shape.
    #[error("result payload does not match the expected shape: {0}")]
    InvalidPayload(String),

    /// Dimension 0 is absent or does not carry the requested header group.
    #[error("result is missing header group {group} in dimension 0")]
    MissingHeaderGroup { group: usize },

    /// The data length is not an exact multiple of one of the label axes.
    #[error(
        "data length {rows} does not tile evenly over {attributes} attribute label(s) and {time_periods} time label(s)"
    )]
    ShapeMismatch {
        rows: usize,
        attributes: usize,
        time_periods: usize,
    },

    /// A data row carries fewer measure values than the decoder requires.
    #[error("data row {row} has {actual} measure value(s), decoder requires {required}")]
    InsufficientMeasures {
        row: usize,
        required: usize,
        actual: usize,
    },
}

/// One flat output record: a category/time-period pair with its measures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecodedRow {
    pub category: String,
    pub time_period: String,
    pub measures: Vec<f64>,
}

/// Decoder from the nested analytical result into flat [`DecodedRow`]s.
///
/// The decoder assumes a specific dimension layout inherited from the source
/// system's response shape, not a general pivot-table algorithm: the flat
/// `data` array is tiled with the attribute axis (header group 0) OUTER and
/// the time axis (header group 1) INNER. Attribute labels are block-repeated
/// (each label covers `data.len() / attributes` consecutive rows) and time
/// labels cycle within each block. With attributes `[A, B]`, time periods
/// `[Q1..Q4]` and 8 data rows, rows pair `A,A,A,A,B,B,B,B` with
/// `Q1,Q2,Q3,Q4,Q1,Q2,Q3,Q4`. Both repetition factors must be exact; any
/// remainder is a [`DecodeError::ShapeMismatch`].
#[derive(Debug, Clone)]
pub struct Decoder {
    measure_indices: Vec<usize>,
}

impl Default for Decoder {
    fn default() -> Self {
        // The source system emits four measure columns per row.
        Self::new(vec![0, 1, 2, 3])
    }
}

impl Decoder {
    /// Create a decoder extracting the given measure columns, in order.
    #[must_use]
    pub fn new(measure_indices: Vec<usize>) -> Self {
        Self { measure_indices }
    }

    /// Measure columns this decoder extracts.
    #[must_use]
    pub fn measure_indices(&self) -> &[usize] {
        &self.measure_indices
    }

    /// Number of measure columns a data row must carry at minimum.
    fn required_columns(&self) -> usize {
        self.measure_indices.iter().map(|&i| i + 1).max().unwrap_or(0)
    }

    /// Decode a typed analytical result into flat records.
    ///
    /// A result with zero data rows decodes to an empty vector. Otherwise
    /// every data row yields exactly one [`DecodedRow`]; errors produce no
    /// rows at all.
    ///
    /// # Errors
    ///
    /// - [`DecodeError::MissingHeaderGroup`] if either label axis is absent.
    /// - [`DecodeError::ShapeMismatch`] if the data length is not an exact
    ///   multiple of both axes' label counts.
    /// - [`DecodeError::InsufficientMeasures`] if any data row is shorter
    ///   than the configured measure columns require. No truncation and no
    ///   padding is performed.
    pub fn decode(&self, response: &AnalyticalResponse) -> Result<Vec<DecodedRow>, DecodeError> {
        let attributes = response.axis_labels(0)?;
        let time_periods = response.axis_labels(1)?;

        let rows = response.data.len();
        if rows == 0 {
            return Ok(Vec::new());
        }

        if attributes.is_empty()
            || time_periods.is_empty()
            || rows % attributes.len() != 0
            || rows % time_periods.len() != 0
        {
            return Err(DecodeError::ShapeMismatch {
                rows,
                attributes: attributes.len(),
                time_periods: time_periods.len(),
            });
        }

        // Attribute axis is outer: each label spans a contiguous block.
        let block = rows / attributes.len();
        let required = self.required_columns();

        let mut decoded = Vec::with_capacity(rows);
        for (index, values) in response.data.iter().enumerate() {
            if values.len() < required {
                return Err(DecodeError::InsufficientMeasures {
                    row: index,
                    required,
                    actual: values.len(),
                });
            }

            decoded.push(DecodedRow {
                category: attributes[index / block].clone(),
                time_period: time_periods[index % time_periods.len()].clone(),
                measures: self.measure_indices.iter().map(|&i| values[i]).collect(),
            });
        }

        Ok(decoded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::response::{AttributeHeader, DimensionHeader, Header, HeaderGroup};

    fn group(labels: &[&str]) -> HeaderGroup {
        HeaderGroup {
            headers: labels
                .iter()
                .map(|l| Header {
                    attribute_header: AttributeHeader {
                        label_value: l.to_string(),
                    },
                })
                .collect(),
        }
    }

    fn response(attributes: &[&str], time_periods: &[&str], data: Vec<Vec<f64>>) -> AnalyticalResponse {
        AnalyticalResponse {
            dimension_headers: vec![DimensionHeader {
                header_groups: vec![group(attributes), group(time_periods)],
            }],
            data,
        }
    }

    #[test]
    fn test_decode_pairs_outer_attributes_with_cycling_time_periods() {
        let data = vec![vec![1.0, 2.0, 3.0, 4.0]; 8];
        let resp = response(&["A", "B"], &["Q1", "Q2", "Q3", "Q4"], data);

        let rows = Decoder::default().decode(&resp).unwrap();

        assert_eq!(rows.len(), 8);
        let categories: Vec<&str> = rows.iter().map(|r| r.category.as_str()).collect();
        let periods: Vec<&str> = rows.iter().map(|r| r.time_period.as_str()).collect();
        assert_eq!(categories, ["A", "A", "A", "A", "B", "B", "B", "B"]);
        assert_eq!(periods, ["Q1", "Q2", "Q3", "Q4", "Q1", "Q2", "Q3", "Q4"]);
        assert!(rows.iter().all(|r| r.measures == [1.0, 2.0, 3.0, 4.0]));
    }

    #[test]
    fn test_decode_zero_rows_yields_empty() {
        let resp = response(&["A", "B"], &["Q1"], vec![]);
        let rows = Decoder::default().decode(&resp).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_decode_rejects_non_divisible_attribute_axis() {
        let data = vec![vec![1.0, 2.0, 3.0, 4.0]; 8];
        let resp = response(&["A", "B", "C"], &["Q1", "Q2", "Q3", "Q4"], data);

        let err = Decoder::default().decode(&resp).unwrap_err();
        assert_eq!(
            err,
            DecodeError::ShapeMismatch {
                rows: 8,
                attributes: 3,
                time_periods: 4,
            }
        );
    }

    #[test]
    fn test_decode_rejects_non_divisible_time_axis() {
        let data = vec![vec![1.0, 2.0, 3.0, 4.0]; 4];
        let resp = response(&["A", "B"], &["Q1", "Q2", "Q3"], data);

        let err = Decoder::default().decode(&resp).unwrap_err();
        assert!(matches!(err, DecodeError::ShapeMismatch { rows: 4, .. }));
    }

    #[test]
    fn test_decode_rejects_empty_label_axis() {
        let data = vec![vec![1.0, 2.0, 3.0, 4.0]; 4];
        let resp = response(&[], &["Q1", "Q2"], data);

        let err = Decoder::default().decode(&resp).unwrap_err();
        assert!(matches!(err, DecodeError::ShapeMismatch { .. }));
    }

    #[test]
    fn test_decode_rejects_short_measure_row() {
        let mut data = vec![vec![1.0, 2.0, 3.0, 4.0]; 4];
        data[2] = vec![1.0, 2.0, 3.0];
        let resp = response(&["A", "B"], &["Q1", "Q2"], data);

        let err = Decoder::default().decode(&resp).unwrap_err();
        assert_eq!(
            err,
            DecodeError::InsufficientMeasures {
                row: 2,
                required: 4,
                actual: 3,
            }
        );
    }

    #[test]
    fn test_decode_with_configured_measure_columns() {
        let data = vec![vec![10.0, 20.0, 30.0], vec![40.0, 50.0, 60.0]];
        let resp = response(&["A", "B"], &["Q1"], data);

        let rows = Decoder::new(vec![2, 0]).decode(&resp).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].measures, [30.0, 10.0]);
        assert_eq!(rows[1].measures, [60.0, 40.0]);
        assert_eq!(rows[0].time_period, "Q1");
        assert_eq!(rows[1].time_period, "Q1");
    }

    #[test]
    fn test_decode_missing_time_axis() {
        let resp = AnalyticalResponse {
            dimension_headers: vec![DimensionHeader {
                header_groups: vec![group(&["A"])],
            }],
            data: vec![vec![1.0, 2.0, 3.0, 4.0]],
        };

        let err = Decoder::default().decode(&resp).unwrap_err();
        assert_eq!(err, DecodeError::MissingHeaderGroup { group: 1 });
    }
}
