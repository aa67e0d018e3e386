//! Logical schema: domains, models, categories, columns, and lookups.

pub mod accessor;
pub mod model;
pub mod repository;
pub mod types;

pub use accessor::{closest_locale, find_model, localized};
pub use model::{Category, Column, Domain, Model, PROP_ALIGNMENT, PROP_HIDDEN, PROP_MASK};
pub use repository::{InMemorySchemaRepository, SchemaRepository};
pub use types::{AggregationType, DataType, FieldType};
