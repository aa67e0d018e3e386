//! Wire model: the compact, serialization-friendly structures exchanged with
//! callers.
//!
//! Every structure carries a `class` discriminator field naming the
//! originating structure. Several siblings share field names (`category`,
//! `column`), so the discriminator is what lets a consumer tell them apart;
//! its literal value is checked at decode time and round-trips on encode.

use serde::{Deserialize, Serialize};

// =============================================================================
// Errors
// =============================================================================

/// Decode failure for wire JSON.
#[derive(Debug, thiserror::Error)]
pub enum WireError {
    #[error("Malformed wire JSON: {0}")]
    Malformed(String),

    #[error("Unexpected discriminator '{found}' (expected '{expected}')")]
    UnexpectedClass {
        expected: &'static str,
        found: String,
    },
}

// =============================================================================
// Shared enums
// =============================================================================

/// How a condition combines with its siblings, in declaration order.
/// There is no precedence grouping beyond this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CombinationType {
    And,
    Or,
}

impl Default for CombinationType {
    fn default() -> Self {
        CombinationType::And
    }
}

/// Sort direction for an order clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl Default for SortDirection {
    fn default() -> Self {
        SortDirection::Asc
    }
}

/// Kind of a flattened thin-model element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ElementType {
    Category,
    Column,
}

// =============================================================================
// Query structures
// =============================================================================

/// A thin analytical query as received from a caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireQuery {
    #[serde(rename = "class", default = "query_class")]
    pub class: String,
    pub domain_id: String,
    pub model_id: String,
    #[serde(default)]
    pub columns: Vec<WireElement>,
    #[serde(default)]
    pub conditions: Vec<WireCondition>,
    #[serde(default)]
    pub orders: Vec<WireOrder>,
    #[serde(default)]
    pub parameters: Vec<WireParameter>,
    #[serde(default)]
    pub disable_distinct: bool,
}

impl WireQuery {
    pub const CLASS: &'static str = "Query";

    pub fn new(domain_id: impl Into<String>, model_id: impl Into<String>) -> Self {
        Self {
            class: query_class(),
            domain_id: domain_id.into(),
            model_id: model_id.into(),
            columns: Vec::new(),
            conditions: Vec::new(),
            orders: Vec::new(),
            parameters: Vec::new(),
            disable_distinct: false,
        }
    }
}

fn query_class() -> String {
    WireQuery::CLASS.to_string()
}

/// A selected column.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireElement {
    #[serde(rename = "class", default = "element_class")]
    pub class: String,
    /// Owning category id.
    pub category: String,
    /// Column id.
    pub id: String,
    /// Chosen aggregation name. Absent means the column default applies;
    /// an explicit `"NONE"` means no aggregation.
    pub selected_aggregation: Option<String>,
    /// Optional display-name override.
    pub name: Option<String>,
}

impl WireElement {
    pub const CLASS: &'static str = "Element";

    pub fn new(category: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            class: element_class(),
            category: category.into(),
            id: id.into(),
            selected_aggregation: None,
            name: None,
        }
    }

    pub fn with_aggregation(mut self, aggregation: impl Into<String>) -> Self {
        self.selected_aggregation = Some(aggregation.into());
        self
    }
}

fn element_class() -> String {
    WireElement::CLASS.to_string()
}

/// A filter condition.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireCondition {
    #[serde(rename = "class", default = "condition_class")]
    pub class: String,
    /// Owning category id, used verbatim in the compiled column reference.
    pub category: String,
    /// Target column id.
    pub column: String,
    #[serde(default)]
    pub combination_type: CombinationType,
    /// Operator token, matched case-insensitively against the alias table.
    /// Absent (or unrecognized) means EQUAL.
    pub operator: Option<String>,
    /// Operand values. When `parameterized` is set, the first entry is a
    /// parameter name rather than a literal.
    #[serde(default)]
    pub value: Vec<String>,
    #[serde(default)]
    pub parameterized: bool,
    /// Aggregation qualifier name; anything other than `"NONE"` is inserted
    /// into the column reference.
    pub aggregation: Option<String>,
}

impl WireCondition {
    pub const CLASS: &'static str = "Condition";

    pub fn new(category: impl Into<String>, column: impl Into<String>) -> Self {
        Self {
            class: condition_class(),
            category: category.into(),
            column: column.into(),
            combination_type: CombinationType::And,
            operator: None,
            value: Vec::new(),
            parameterized: false,
            aggregation: None,
        }
    }

    pub fn with_operator(mut self, operator: impl Into<String>) -> Self {
        self.operator = Some(operator.into());
        self
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value.push(value.into());
        self
    }

    pub fn with_aggregation(mut self, aggregation: impl Into<String>) -> Self {
        self.aggregation = Some(aggregation.into());
        self
    }

    pub fn parameterized(mut self) -> Self {
        self.parameterized = true;
        self
    }
}

fn condition_class() -> String {
    WireCondition::CLASS.to_string()
}

/// A sort clause. Must reference a selected column; unresolved references
/// are dropped during translation, not failed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireOrder {
    #[serde(rename = "class", default = "order_class")]
    pub class: String,
    pub category: String,
    pub column: String,
    #[serde(default)]
    pub direction: SortDirection,
}

impl WireOrder {
    pub const CLASS: &'static str = "Order";

    pub fn new(category: impl Into<String>, column: impl Into<String>) -> Self {
        Self {
            class: order_class(),
            category: category.into(),
            column: column.into(),
            direction: SortDirection::Asc,
        }
    }

    pub fn descending(mut self) -> Self {
        self.direction = SortDirection::Desc;
        self
    }
}

fn order_class() -> String {
    WireOrder::CLASS.to_string()
}

/// A bind parameter consulted when a paired condition is parameterized.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireParameter {
    #[serde(rename = "class", default = "parameter_class")]
    pub class: String,
    /// Parameter name; defaults to the column id when absent.
    pub name: Option<String>,
    pub column: String,
    #[serde(default)]
    pub value: Vec<String>,
    #[serde(default)]
    pub default_value: Vec<String>,
}

impl WireParameter {
    pub const CLASS: &'static str = "Parameter";

    pub fn new(column: impl Into<String>) -> Self {
        Self {
            class: parameter_class(),
            name: None,
            column: column.into(),
            value: Vec::new(),
            default_value: Vec::new(),
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value.push(value.into());
        self
    }
}

fn parameter_class() -> String {
    WireParameter::CLASS.to_string()
}

// =============================================================================
// Model discovery structures
// =============================================================================

/// Summary row returned by model listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireModelSummary {
    #[serde(rename = "class", default = "summary_class")]
    pub class: String,
    /// Composite id: `provider~domain~model`.
    pub model_id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl WireModelSummary {
    pub const CLASS: &'static str = "ModelSummary";
}

fn summary_class() -> String {
    WireModelSummary::CLASS.to_string()
}

/// A full thin model: flattened categories and columns.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireModel {
    #[serde(rename = "class", default = "model_class")]
    pub class: String,
    /// Composite id: `provider~domain~model`.
    pub model_id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub elements: Vec<WireModelElement>,
}

impl WireModel {
    pub const CLASS: &'static str = "Model";
}

fn model_class() -> String {
    WireModel::CLASS.to_string()
}

/// One flattened thin-model entry: a category pseudo-element or a column.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireModelElement {
    #[serde(rename = "class", default = "model_element_class")]
    pub class: String,
    pub id: String,
    pub element_type: ElementType,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Owning category id; set for columns only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Uppercase data-type name; columns only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_type: Option<String>,
    /// Field-type name, or `"UNKNOWN"` when the column carries none.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub horizontal_alignment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format_mask: Option<String>,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub available_aggregations: Vec<String>,
}

impl WireModelElement {
    pub const CLASS: &'static str = "ModelElement";
}

fn model_element_class() -> String {
    WireModelElement::CLASS.to_string()
}

// =============================================================================
// Decoding
// =============================================================================

/// Decode a wire query, checking every discriminator in the tree.
pub fn decode_query(json: &str) -> Result<WireQuery, WireError> {
    let query: WireQuery =
        serde_json::from_str(json).map_err(|error| WireError::Malformed(error.to_string()))?;

    check_class(WireQuery::CLASS, &query.class)?;
    for element in &query.columns {
        check_class(WireElement::CLASS, &element.class)?;
    }
    for condition in &query.conditions {
        check_class(WireCondition::CLASS, &condition.class)?;
    }
    for order in &query.orders {
        check_class(WireOrder::CLASS, &order.class)?;
    }
    for parameter in &query.parameters {
        check_class(WireParameter::CLASS, &parameter.class)?;
    }
    Ok(query)
}

fn check_class(expected: &'static str, found: &str) -> Result<(), WireError> {
    if found == expected {
        Ok(())
    } else {
        Err(WireError::UnexpectedClass {
            expected,
            found: found.to_string(),
        })
    }
}
