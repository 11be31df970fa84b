//! Analytical result decoding for flexprobe.
//!
//! This crate owns the wire types for an AFM execution result and the reshape
//! from the platform's nested response (dimension headers + flat data matrix)
//! into a flat tabular record set. It is a leaf crate with no knowledge of
//! HTTP or session state.

mod decoder;
mod response;

pub use decoder::{DecodeError, DecodedRow, Decoder};
pub use response::{AnalyticalResponse, AttributeHeader, DimensionHeader, Header, HeaderGroup};
