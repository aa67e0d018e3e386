//! Condition formula compilation.
//!
//! Translates one wire condition into the textual formula understood by the
//! execution engine. The output syntax depends on four inputs: operator,
//! column data type, aggregation qualifier, and parameterization.
//!
//! Two behaviors are preserved verbatim for compatibility with existing
//! formula consumers, even though they read oddly:
//!
//! - `<` compiles to `>` and `<=` to `>=`.
//! - An unrecognized (or absent) operator token compiles as EQUAL.

use once_cell::sync::Lazy;
use std::collections::HashMap;

use crate::schema::types::{AggregationType, DataType};
use crate::wire::WireCondition;

// =============================================================================
// Operators
// =============================================================================

/// A recognized condition operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Equal,
    GreaterThan,
    LessThan,
    GreaterOrEqual,
    LessOrEqual,
    ExactlyMatches,
    Contains,
    DoesNotContain,
    BeginsWith,
    EndsWith,
    IsNull,
    IsNotNull,
}

/// Alias table mapping normalized (trimmed, uppercased) operator tokens to
/// operators. Tokens outside this table fall back to EQUAL.
static OPERATOR_ALIASES: Lazy<HashMap<&'static str, Operator>> = Lazy::new(|| {
    let mut aliases = HashMap::new();
    aliases.insert("EQUAL", Operator::Equal);
    aliases.insert("=", Operator::Equal);
    aliases.insert(">", Operator::GreaterThan);
    aliases.insert("<", Operator::LessThan);
    aliases.insert(">=", Operator::GreaterOrEqual);
    aliases.insert("<=", Operator::LessOrEqual);
    aliases.insert("EXACTLY MATCHES", Operator::ExactlyMatches);
    aliases.insert("CONTAINS", Operator::Contains);
    aliases.insert("DOES NOT CONTAIN", Operator::DoesNotContain);
    aliases.insert("BEGINS WITH", Operator::BeginsWith);
    aliases.insert("BEGINSWITH", Operator::BeginsWith);
    aliases.insert("ENDS WITH", Operator::EndsWith);
    aliases.insert("ENDSWITH", Operator::EndsWith);
    aliases.insert("IS NULL", Operator::IsNull);
    aliases.insert("ISNA", Operator::IsNull);
    aliases.insert("IS NOT NULL", Operator::IsNotNull);
    aliases
});

impl Operator {
    /// Resolve an operator token. Absent and unrecognized tokens both yield
    /// `Equal` (permissive default, not an error).
    pub fn parse(token: Option<&str>) -> Operator {
        match token {
            Some(token) => {
                let normalized = token.trim().to_uppercase();
                OPERATOR_ALIASES
                    .get(normalized.as_str())
                    .copied()
                    .unwrap_or(Operator::Equal)
            }
            None => Operator::Equal,
        }
    }

    /// Canonical name, for diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            Operator::Equal => "EQUAL",
            Operator::GreaterThan => ">",
            Operator::LessThan => "<",
            Operator::GreaterOrEqual => ">=",
            Operator::LessOrEqual => "<=",
            Operator::ExactlyMatches => "EXACTLY MATCHES",
            Operator::Contains => "CONTAINS",
            Operator::DoesNotContain => "DOES NOT CONTAIN",
            Operator::BeginsWith => "BEGINS WITH",
            Operator::EndsWith => "ENDS WITH",
            Operator::IsNull => "IS NULL",
            Operator::IsNotNull => "IS NOT NULL",
        }
    }

    /// Whether the operator needs at least one operand.
    pub fn requires_value(self) -> bool {
        !matches!(self, Operator::IsNull | Operator::IsNotNull)
    }
}

// =============================================================================
// Compilation
// =============================================================================

/// Formula compilation failure.
#[derive(Debug, Clone, thiserror::Error)]
pub enum FormulaError {
    #[error("Operator '{operator}' requires an operand for column '{column}'")]
    MissingOperand { operator: String, column: String },
}

/// Compile one condition into a formula string.
///
/// `data_type` is the target column's type and controls literal formatting:
/// STRING literals are double-quoted, DATE literals are wrapped in
/// `DATEVALUE("...")`, everything else passes through bare.
///
/// When `parameterized` is set the literal slot becomes `[param:NAME]`,
/// where NAME is `param_name` if given, else the condition's first operand,
/// else the column id.
pub fn compile(
    condition: &WireCondition,
    data_type: DataType,
    parameterized: bool,
    param_name: Option<&str>,
) -> Result<String, FormulaError> {
    let operator = Operator::parse(condition.operator.as_deref());
    let aggregation = condition
        .aggregation
        .as_deref()
        .and_then(AggregationType::parse);
    let reference = column_ref(&condition.category, &condition.column, aggregation);

    if operator.requires_value() && !parameterized && condition.value.is_empty() {
        return Err(FormulaError::MissingOperand {
            operator: operator.name().to_string(),
            column: condition.column.clone(),
        });
    }

    // Value token for single-operand templates.
    let primary = if parameterized {
        let name = param_name
            .map(str::to_string)
            .or_else(|| condition.value.first().cloned())
            .unwrap_or_else(|| condition.column.clone());
        param_token(data_type, &name)
    } else {
        condition
            .value
            .first()
            .map(|raw| literal_token(data_type, raw))
            .unwrap_or_default()
    };

    let formula = match operator {
        Operator::Equal => equality(&reference, &primary, data_type),
        Operator::ExactlyMatches => {
            if parameterized || condition.value.len() == 1 {
                equality(&reference, &primary, data_type)
            } else {
                let clauses: Vec<String> = condition
                    .value
                    .iter()
                    .map(|raw| equality(&reference, &literal_token(data_type, raw), data_type))
                    .collect();
                format!("({})", clauses.join(" OR "))
            }
        }
        // `<` compiles to `>` and `<=` to `>=`; kept as-is for compatibility.
        Operator::GreaterThan | Operator::LessThan => format!("{reference} >{primary}"),
        Operator::GreaterOrEqual | Operator::LessOrEqual => format!("{reference} >={primary}"),
        Operator::Contains => format!("CONTAINS({reference};{primary})"),
        Operator::DoesNotContain => format!("NOT(CONTAINS({reference};{primary}))"),
        Operator::BeginsWith => format!("BEGINSWITH({reference};{primary})"),
        Operator::EndsWith => format!("ENDSWITH({reference};{primary})"),
        Operator::IsNull => format!("ISNA({reference})"),
        Operator::IsNotNull => format!("NOT(ISNA({reference}))"),
    };
    Ok(formula)
}

/// Column reference: `[cat.col]`, or `[cat.col.AGG]` when a non-NONE
/// aggregation qualifier is present.
fn column_ref(category: &str, column: &str, aggregation: Option<AggregationType>) -> String {
    match aggregation {
        Some(aggregation) if aggregation != AggregationType::None => {
            format!("[{category}.{column}.{}]", aggregation.name())
        }
        _ => format!("[{category}.{column}]"),
    }
}

/// Equality clause. DATE values abut the `=` (`[c.c] =DATEVALUE(...)`);
/// everything else gets a space (`[c.c] = "v"`).
fn equality(reference: &str, value: &str, data_type: DataType) -> String {
    if data_type == DataType::Date {
        format!("{reference} ={value}")
    } else {
        format!("{reference} = {value}")
    }
}

fn literal_token(data_type: DataType, raw: &str) -> String {
    match data_type {
        DataType::String => format!("\"{raw}\""),
        DataType::Date => format!("DATEVALUE(\"{raw}\")"),
        _ => raw.to_string(),
    }
}

fn param_token(data_type: DataType, name: &str) -> String {
    // The parameter reference is itself the token, so the DATE form carries
    // no surrounding quotes.
    match data_type {
        DataType::Date => format!("DATEVALUE([param:{name}])"),
        _ => format!("[param:{name}]"),
    }
}
