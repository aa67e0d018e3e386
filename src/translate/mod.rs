//! Translation of thin wire queries into resolved queries.
//!
//! A resolved query binds every wire reference to a live schema object:
//! selections to column+category pairs, constraints to compiled formula
//! strings, orders to selection indexes, parameters to column data types.
//! It is built per request and discarded after execution.

use serde::Serialize;
use tracing::debug;

use crate::formula::{self, FormulaError};
use crate::schema::model::{Category, Column, Model};
use crate::schema::types::{AggregationType, DataType};
use crate::wire::{CombinationType, SortDirection, WireQuery};

pub mod thin;

pub use thin::build_thin_model;

// =============================================================================
// Errors
// =============================================================================

/// Translation error. A wire reference that cannot bind has no safe default,
/// so any of these fails the whole query.
#[derive(Debug, Clone)]
pub enum TranslateError {
    /// A selection, condition, or parameter names a column the model lacks.
    UnknownColumn { column: String },
    /// A condition could not compile.
    Formula(FormulaError),
}

impl std::fmt::Display for TranslateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TranslateError::UnknownColumn { column } => {
                write!(f, "Unknown column: '{}'", column)
            }
            TranslateError::Formula(error) => write!(f, "{}", error),
        }
    }
}

impl std::error::Error for TranslateError {}

impl From<FormulaError> for TranslateError {
    fn from(error: FormulaError) -> Self {
        TranslateError::Formula(error)
    }
}

// =============================================================================
// Resolved query
// =============================================================================

/// A selection bound to live schema objects.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Selection<'a> {
    pub category: &'a Category,
    pub column: &'a Column,
    pub aggregation: AggregationType,
}

/// A compiled constraint: combination tag plus formula string.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Constraint {
    pub combination: CombinationType,
    pub formula: String,
}

/// An order bound to a selection by index.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedOrder {
    pub selection: usize,
    pub direction: SortDirection,
}

/// A parameter bound to its column's data type.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedParameter {
    pub name: String,
    pub data_type: DataType,
    pub value: Vec<String>,
    pub default_value: Vec<String>,
}

/// A fully resolved query, ready for the execution engine.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedQuery<'a> {
    /// Bound selections, in wire order. Selection order determines output
    /// column order.
    pub selections: Vec<Selection<'a>>,
    /// Compiled constraints, in wire order.
    pub constraints: Vec<Constraint>,
    pub orders: Vec<ResolvedOrder>,
    pub parameters: Vec<ResolvedParameter>,
    pub disable_distinct: bool,
}

// =============================================================================
// Resolution
// =============================================================================

/// Resolve a wire query against a model.
pub fn resolve<'a>(query: &WireQuery, model: &'a Model) -> Result<ResolvedQuery<'a>, TranslateError> {
    let mut selections = Vec::with_capacity(query.columns.len());
    for element in &query.columns {
        let column = model
            .find_column(&element.id)
            .ok_or_else(|| TranslateError::UnknownColumn {
                column: element.id.clone(),
            })?;
        let category =
            model
                .find_category_of(&element.id)
                .ok_or_else(|| TranslateError::UnknownColumn {
                    column: element.id.clone(),
                })?;
        let aggregation = element
            .selected_aggregation
            .as_deref()
            .and_then(AggregationType::parse)
            .unwrap_or(column.default_aggregation);
        if aggregation != AggregationType::None
            && aggregation != column.default_aggregation
            && !column.aggregations.contains(&aggregation)
        {
            debug!(
                column = %column.id,
                aggregation = aggregation.name(),
                "selected aggregation is not in the column's permitted list"
            );
        }
        selections.push(Selection {
            category,
            column,
            aggregation,
        });
    }

    let mut constraints = Vec::with_capacity(query.conditions.len());
    for condition in &query.conditions {
        let column = model
            .find_column(&condition.column)
            .ok_or_else(|| TranslateError::UnknownColumn {
                column: condition.column.clone(),
            })?;
        // An explicitly named parameter on the same column wins; otherwise
        // the compiler falls back to the condition's first operand, then
        // the column id.
        let param_name = if condition.parameterized {
            query
                .parameters
                .iter()
                .find(|parameter| parameter.column == condition.column)
                .and_then(|parameter| parameter.name.clone())
        } else {
            None
        };
        let formula = formula::compile(
            condition,
            column.data_type,
            condition.parameterized,
            param_name.as_deref(),
        )?;
        constraints.push(Constraint {
            combination: condition.combination_type,
            formula,
        });
    }

    let mut orders = Vec::new();
    for order in &query.orders {
        match selections
            .iter()
            .position(|selection| selection.column.id == order.column)
        {
            Some(selection) => orders.push(ResolvedOrder {
                selection,
                direction: order.direction,
            }),
            // An order on an unselected column is a no-op, not an error.
            None => debug!(column = %order.column, "order references an unselected column; dropped"),
        }
    }

    let mut parameters = Vec::with_capacity(query.parameters.len());
    for parameter in &query.parameters {
        let column =
            model
                .find_column(&parameter.column)
                .ok_or_else(|| TranslateError::UnknownColumn {
                    column: parameter.column.clone(),
                })?;
        parameters.push(ResolvedParameter {
            name: parameter
                .name
                .clone()
                .unwrap_or_else(|| parameter.column.clone()),
            data_type: column.data_type,
            value: parameter.value.clone(),
            default_value: parameter.default_value.clone(),
        });
    }

    Ok(ResolvedQuery {
        selections,
        constraints,
        orders,
        parameters,
        disable_distinct: query.disable_distinct,
    })
}
