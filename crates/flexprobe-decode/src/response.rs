//! Wire types for the AFM execution result payload.
//!
//! The result retrieval endpoint returns a nested JSON document; these types
//! decode it at the boundary so the rest of the pipeline works with typed
//! structures instead of untyped maps. Label strings live at
//! `dimensionHeaders[0].headerGroups[g].headers[h].attributeHeader.labelValue`
//! and the measure values in the flat `data` matrix.

use serde::{Deserialize, Serialize};

use crate::decoder::DecodeError;

/// Decoded wire payload of a retrieved execution result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticalResponse {
    /// Ordered header groups per dimension; group 0 of dimension 0 carries
    /// the attribute axis labels, group 1 the time axis labels.
    pub dimension_headers: Vec<DimensionHeader>,
    /// Flat matrix of measure values, one inner vector per result row.
    pub data: Vec<Vec<f64>>,
}

/// One dimension's worth of header groups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DimensionHeader {
    pub header_groups: Vec<HeaderGroup>,
}

/// An ordered sequence of labels along one axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderGroup {
    pub headers: Vec<Header>,
}

/// A single header entry wrapping an attribute label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Header {
    pub attribute_header: AttributeHeader,
}

/// The label value for one position on an axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeHeader {
    pub label_value: String,
}

impl AnalyticalResponse {
    /// Parse a raw response body into the typed wire shape.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::InvalidPayload`] if the body is not valid JSON
    /// or does not match the expected result shape.
    pub fn from_json(body: &str) -> Result<Self, DecodeError> {
        serde_json::from_str(body).map_err(|e| DecodeError::InvalidPayload(e.to_string()))
    }

    /// Label values of header group `group` in dimension 0, in axis order.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::MissingHeaderGroup`] if dimension 0 or the
    /// requested group is absent.
    pub fn axis_labels(&self, group: usize) -> Result<Vec<String>, DecodeError> {
        let dimension = self
            .dimension_headers
            .first()
            .ok_or(DecodeError::MissingHeaderGroup { group })?;

        let header_group = dimension
            .header_groups
            .get(group)
            .ok_or(DecodeError::MissingHeaderGroup { group })?;

        Ok(header_group
            .headers
            .iter()
            .map(|h| h.attribute_header.label_value.clone())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn label(value: &str) -> Header {
        Header {
            attribute_header: AttributeHeader {
                label_value: value.to_string(),
            },
        }
    }

    #[test]
    fn test_from_json_parses_wire_shape() {
        let body = r#"{
            "dimensionHeaders": [
                {
                    "headerGroups": [
                        {"headers": [
                            {"attributeHeader": {"labelValue": "Electronics"}},
                            {"attributeHeader": {"labelValue": "Clothing"}}
                        ]},
                        {"headers": [
                            {"attributeHeader": {"labelValue": "Q1"}},
                            {"attributeHeader": {"labelValue": "Q2"}}
                        ]}
                    ]
                }
            ],
            "data": [[1.0, 2.0, 3.0, 4.0], [5.0, 6.0, 7.0, 8.0]]
        }"#;

        let response = AnalyticalResponse::from_json(body).unwrap();
        assert_eq!(
            response.axis_labels(0).unwrap(),
            vec!["Electronics", "Clothing"]
        );
        assert_eq!(response.axis_labels(1).unwrap(), vec!["Q1", "Q2"]);
        assert_eq!(response.data.len(), 2);
    }

    #[test]
    fn test_from_json_rejects_invalid_json() {
        let err = AnalyticalResponse::from_json("not json").unwrap_err();
        assert!(matches!(err, DecodeError::InvalidPayload(_)));
    }

    #[test]
    fn test_from_json_rejects_wrong_shape() {
        let err = AnalyticalResponse::from_json(r#"{"rows": []}"#).unwrap_err();
        assert!(matches!(err, DecodeError::InvalidPayload(_)));
    }

    #[test]
    fn test_axis_labels_missing_group() {
        let response = AnalyticalResponse {
            dimension_headers: vec![DimensionHeader {
                header_groups: vec![HeaderGroup {
                    headers: vec![label("A")],
                }],
            }],
            data: vec![],
        };

        let err = response.axis_labels(1).unwrap_err();
        assert_eq!(err, DecodeError::MissingHeaderGroup { group: 1 });
    }

    #[test]
    fn test_axis_labels_missing_dimension() {
        let response = AnalyticalResponse {
            dimension_headers: vec![],
            data: vec![],
        };

        let err = response.axis_labels(0).unwrap_err();
        assert_eq!(err, DecodeError::MissingHeaderGroup { group: 0 });
    }
}
