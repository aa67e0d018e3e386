//! Primitive schema types: data types, field roles, aggregations.
//!
//! Parsing is deliberately permissive: wire callers send these as plain
//! strings, and an unrecognized token falls back to a neutral default
//! instead of failing the request.

use serde::{Deserialize, Serialize};

/// Primitive data type of a logical column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DataType {
    String,
    Numeric,
    Date,
    Boolean,
    Binary,
    Unknown,
}

impl DataType {
    /// Uppercase wire name of this type.
    pub fn name(self) -> &'static str {
        match self {
            DataType::String => "STRING",
            DataType::Numeric => "NUMERIC",
            DataType::Date => "DATE",
            DataType::Boolean => "BOOLEAN",
            DataType::Binary => "BINARY",
            DataType::Unknown => "UNKNOWN",
        }
    }

    /// Parse a wire token case-insensitively. Unrecognized tokens map to
    /// `Unknown` rather than failing.
    pub fn parse(token: &str) -> DataType {
        match token.trim().to_uppercase().as_str() {
            "STRING" => DataType::String,
            "NUMERIC" | "NUMBER" => DataType::Numeric,
            "DATE" => DataType::Date,
            "BOOLEAN" => DataType::Boolean,
            "BINARY" => DataType::Binary,
            _ => DataType::Unknown,
        }
    }
}

impl Default for DataType {
    fn default() -> Self {
        DataType::Unknown
    }
}

/// Role a column plays within its model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FieldType {
    Attribute,
    Fact,
    Key,
    Other,
}

impl FieldType {
    pub fn name(self) -> &'static str {
        match self {
            FieldType::Attribute => "ATTRIBUTE",
            FieldType::Fact => "FACT",
            FieldType::Key => "KEY",
            FieldType::Other => "OTHER",
        }
    }
}

/// Aggregation applied to a column in a selection or condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AggregationType {
    None,
    Sum,
    Average,
    Count,
    CountDistinct,
    Minimum,
    Maximum,
}

impl AggregationType {
    /// Uppercase wire name, as it appears in column references
    /// (`[cat.col.MINIMUM]`) and thin-model aggregation lists.
    pub fn name(self) -> &'static str {
        match self {
            AggregationType::None => "NONE",
            AggregationType::Sum => "SUM",
            AggregationType::Average => "AVERAGE",
            AggregationType::Count => "COUNT",
            AggregationType::CountDistinct => "COUNT_DISTINCT",
            AggregationType::Minimum => "MINIMUM",
            AggregationType::Maximum => "MAXIMUM",
        }
    }

    /// Parse a wire token case-insensitively. Returns `None` for tokens
    /// that name no known aggregation, letting callers pick a default.
    pub fn parse(token: &str) -> Option<AggregationType> {
        match token.trim().to_uppercase().as_str() {
            "NONE" => Some(AggregationType::None),
            "SUM" => Some(AggregationType::Sum),
            "AVERAGE" | "AVG" => Some(AggregationType::Average),
            "COUNT" => Some(AggregationType::Count),
            "COUNT_DISTINCT" | "DISTINCT_COUNT" => Some(AggregationType::CountDistinct),
            "MINIMUM" | "MIN" => Some(AggregationType::Minimum),
            "MAXIMUM" | "MAX" => Some(AggregationType::Maximum),
            _ => None,
        }
    }
}

impl Default for AggregationType {
    fn default() -> Self {
        AggregationType::None
    }
}
