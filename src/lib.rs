//! # Strata
//!
//! Thin-query translation and condition-formula compilation over a logical
//! metadata model.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │              Wire Query (JSON from caller)               │
//! │  (selections, conditions, orders, parameters)            │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [wire]
//! ┌─────────────────────────────────────────────────────────┐
//! │                  WireQuery (Rust Types)                  │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [translate + formula]
//! ┌─────────────────────────────────────────────────────────┐
//! │        ResolvedQuery (bound to the logical schema,       │
//! │        conditions compiled to formula strings)           │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [executor - external engine]
//! ┌─────────────────────────────────────────────────────────┐
//! │                     TabularResult                        │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [encode]
//! ┌─────────────────────────────────────────────────────────┐
//! │           JSON (generic nested or flat grid)             │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! The logical schema (domains → models → categories → columns) is loaded
//! once by an external repository and read-only here; each request builds
//! its own private `ResolvedQuery`, so no locking is needed anywhere in the
//! core.

pub mod config;
pub mod encode;
pub mod executor;
pub mod formula;
pub mod schema;
pub mod service;
pub mod translate;
pub mod wire;

/// Re-exports for convenient usage.
pub mod prelude {
    pub use crate::config::ServiceSettings;
    pub use crate::encode::{encode, encode_grid};
    pub use crate::executor::{QueryExecutor, ResultColumn, TabularResult};
    pub use crate::formula::{compile, Operator};
    pub use crate::schema::{
        closest_locale, find_model, AggregationType, Category, Column, DataType, Domain,
        FieldType, InMemorySchemaRepository, Model, SchemaRepository,
    };
    pub use crate::service::{QueryService, ServiceError};
    pub use crate::translate::{build_thin_model, resolve, ResolvedQuery};
    pub use crate::wire::{
        WireCondition, WireElement, WireModel, WireOrder, WireParameter, WireQuery,
    };
}

// Also export the main entry points at the crate root for convenience.
pub use service::QueryService;
pub use translate::{resolve, ResolvedQuery};
