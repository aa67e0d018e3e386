//! Logical schema objects: domains, models, categories, columns.
//!
//! These are loaded once by the backing repository and treated as immutable
//! for the duration of a request. Identifiers are stable ASCII keys; display
//! names and descriptions are locale-keyed maps resolved through
//! [`crate::schema::accessor`].

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::types::{AggregationType, DataType, FieldType};

/// Free-form column property: horizontal alignment (`"left"` / `"right"`).
pub const PROP_ALIGNMENT: &str = "alignment";
/// Free-form column property: display format mask.
pub const PROP_MASK: &str = "mask";
/// Free-form column property: hidden flag (`"true"` hides the column).
pub const PROP_HIDDEN: &str = "hidden";

/// Top-level namespace grouping one or more logical models.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Domain {
    pub id: String,
    #[serde(default)]
    pub models: Vec<Model>,
}

impl Domain {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            models: Vec::new(),
        }
    }

    pub fn with_model(mut self, model: Model) -> Self {
        self.models.push(model);
        self
    }
}

/// A logical view over a data source, composed of categories.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Model {
    pub id: String,
    #[serde(default)]
    pub names: HashMap<String, String>,
    #[serde(default)]
    pub descriptions: HashMap<String, String>,
    /// Locale used when no available locale matches a request.
    #[serde(default = "default_locale")]
    pub default_locale: String,
    #[serde(default)]
    pub categories: Vec<Category>,
}

fn default_locale() -> String {
    "en".to_string()
}

impl Model {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            names: HashMap::new(),
            descriptions: HashMap::new(),
            default_locale: default_locale(),
            categories: Vec::new(),
        }
    }

    pub fn with_name(mut self, locale: impl Into<String>, name: impl Into<String>) -> Self {
        self.names.insert(locale.into(), name.into());
        self
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.categories.push(category);
        self
    }

    /// Find a column by id, searching categories in declaration order.
    pub fn find_column(&self, column_id: &str) -> Option<&Column> {
        self.categories
            .iter()
            .flat_map(|category| category.columns.iter())
            .find(|column| column.id == column_id)
    }

    /// Find the category owning a column.
    ///
    /// If the schema is malformed and a column id appears in more than one
    /// category, the first declared category wins. That ambiguity is part of
    /// the lookup contract, not an error.
    pub fn find_category_of(&self, column_id: &str) -> Option<&Category> {
        self.categories
            .iter()
            .find(|category| category.columns.iter().any(|column| column.id == column_id))
    }
}

/// A named grouping of columns within a model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    #[serde(default)]
    pub names: HashMap<String, String>,
    #[serde(default)]
    pub descriptions: HashMap<String, String>,
    #[serde(default)]
    pub columns: Vec<Column>,
}

impl Category {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            names: HashMap::new(),
            descriptions: HashMap::new(),
            columns: Vec::new(),
        }
    }

    pub fn with_name(mut self, locale: impl Into<String>, name: impl Into<String>) -> Self {
        self.names.insert(locale.into(), name.into());
        self
    }

    pub fn with_description(
        mut self,
        locale: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        self.descriptions.insert(locale.into(), description.into());
        self
    }

    pub fn with_column(mut self, column: Column) -> Self {
        self.columns.push(column);
        self
    }
}

/// A queryable logical field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Column {
    pub id: String,
    #[serde(default)]
    pub names: HashMap<String, String>,
    #[serde(default)]
    pub descriptions: HashMap<String, String>,
    #[serde(default)]
    pub data_type: DataType,
    pub field_type: Option<FieldType>,
    /// Permitted aggregations, in discovery order.
    #[serde(default)]
    pub aggregations: Vec<AggregationType>,
    #[serde(default)]
    pub default_aggregation: AggregationType,
    /// Free-form presentation properties (see `PROP_*` keys).
    #[serde(default)]
    pub properties: HashMap<String, String>,
}

impl Column {
    pub fn new(id: impl Into<String>, data_type: DataType) -> Self {
        Self {
            id: id.into(),
            names: HashMap::new(),
            descriptions: HashMap::new(),
            data_type,
            field_type: None,
            aggregations: Vec::new(),
            default_aggregation: AggregationType::None,
            properties: HashMap::new(),
        }
    }

    pub fn with_name(mut self, locale: impl Into<String>, name: impl Into<String>) -> Self {
        self.names.insert(locale.into(), name.into());
        self
    }

    pub fn with_field_type(mut self, field_type: FieldType) -> Self {
        self.field_type = Some(field_type);
        self
    }

    pub fn with_aggregations(
        mut self,
        aggregations: Vec<AggregationType>,
        default: AggregationType,
    ) -> Self {
        self.aggregations = aggregations;
        self.default_aggregation = default;
        self
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// Whether the hidden property is set.
    pub fn is_hidden(&self) -> bool {
        self.properties
            .get(PROP_HIDDEN)
            .is_some_and(|value| value == "true")
    }
}
