use serde_json::{json, Value};
use strata::config::ServiceSettings;
use strata::executor::{ExecuteError, QueryExecutor, ResultColumn, TabularResult};
use strata::schema::{
    AggregationType, Category, Column, DataType, Domain, InMemorySchemaRepository, Model,
};
use strata::service::{codes, error_payload, QueryService, ServiceError};
use strata::translate::ResolvedQuery;
use strata::wire::{WireCondition, WireElement, WireQuery};

// =============================================================================
// Fixtures
// =============================================================================

fn repository() -> InMemorySchemaRepository {
    let model = Model::new("orders")
        .with_name("en", "Orders")
        .with_name("de", "Bestellungen")
        .with_category(
            Category::new("customer").with_column(
                Column::new("country", DataType::String)
                    .with_aggregations(vec![AggregationType::Count], AggregationType::None),
            ),
        );
    InMemorySchemaRepository::new().with_domain(Domain::new("steel-wheels").with_model(model))
}

fn settings(provider: &str) -> ServiceSettings {
    ServiceSettings {
        provider_id: provider.to_string(),
        ..ServiceSettings::default()
    }
}

/// Fixture engine over a fixed country list. It understands just enough of
/// the formula contract to honor equality constraints: any double-quoted
/// literal in a constraint is an allowed value.
struct CountryExecutor {
    countries: Vec<&'static str>,
}

impl CountryExecutor {
    fn new() -> Self {
        Self {
            countries: vec!["Switzerland", "France", "Austria", "Japan"],
        }
    }
}

fn quoted_literals(formula: &str) -> Vec<String> {
    let mut literals = Vec::new();
    let mut rest = formula;
    while let Some(start) = rest.find('"') {
        let Some(end) = rest[start + 1..].find('"') else {
            break;
        };
        literals.push(rest[start + 1..start + 1 + end].to_string());
        rest = &rest[start + 1 + end + 1..];
    }
    literals
}

impl QueryExecutor for CountryExecutor {
    fn execute(
        &self,
        query: &ResolvedQuery<'_>,
        row_limit: Option<u32>,
    ) -> Result<Option<TabularResult>, ExecuteError> {
        let mut rows: Vec<&str> = self.countries.clone();
        for constraint in &query.constraints {
            let allowed = quoted_literals(&constraint.formula);
            if !allowed.is_empty() {
                rows.retain(|country| allowed.iter().any(|value| value == country));
            }
        }
        rows.sort_unstable();
        if let Some(limit) = row_limit {
            rows.truncate(limit as usize);
        }

        let mut result = TabularResult::new(vec![
            ResultColumn::new("country", DataType::String).with_label("en", "Country")
        ]);
        for country in rows {
            result.push_row(vec![json!(country)]);
        }
        Ok(Some(result))
    }
}

/// Engine that reports "no result".
struct NullExecutor;

impl QueryExecutor for NullExecutor {
    fn execute(
        &self,
        _query: &ResolvedQuery<'_>,
        _row_limit: Option<u32>,
    ) -> Result<Option<TabularResult>, ExecuteError> {
        Ok(None)
    }
}

// =============================================================================
// Model discovery
// =============================================================================

#[test]
fn test_get_model_by_composite_id() {
    let service = QueryService::new(repository(), NullExecutor, settings("P"));

    let model = service.get_model("P~steel-wheels~orders", "en").unwrap();
    assert_eq!(model.model_id, "P~steel-wheels~orders");
    assert_eq!(model.name, "Orders");
    assert_eq!(model.elements.len(), 2);
}

#[test]
fn test_get_model_bad_composite_ids_return_none() {
    let service = QueryService::new(repository(), NullExecutor, settings("P"));

    assert!(service.get_model("P~steel-wheels", "en").is_none());
    assert!(service.get_model("P", "en").is_none());
    assert!(service.get_model("P~steel-wheels~bogus", "en").is_none());
    assert!(service.get_model("other~steel-wheels~orders", "en").is_none());
}

#[test]
fn test_list_models() {
    let service = QueryService::new(repository(), NullExecutor, settings("metadata"));

    let all = service.list_models(None, None, None, "en");
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].model_id, "metadata~steel-wheels~orders");
    assert_eq!(all[0].name, "Orders");

    let localized = service.list_models(None, None, None, "de_DE");
    assert_eq!(localized[0].name, "Bestellungen");
}

#[test]
fn test_list_models_filters() {
    let service = QueryService::new(repository(), NullExecutor, settings("metadata"));

    assert_eq!(service.list_models(Some("other"), None, None, "en").len(), 0);
    assert_eq!(service.list_models(None, Some("bogus"), None, "en").len(), 0);
    assert_eq!(service.list_models(None, None, Some("ORD"), "en").len(), 1);
    assert_eq!(service.list_models(None, None, Some("zzz"), "en").len(), 0);
}

// =============================================================================
// Query execution
// =============================================================================

fn exactly_matches_query() -> String {
    let mut query = WireQuery::new("steel-wheels", "orders");
    query.columns.push(WireElement::new("customer", "country"));
    query.conditions.push(
        WireCondition::new("customer", "country")
            .with_operator("exactly matches")
            .with_value("Switzerland")
            .with_value("Austria"),
    );
    serde_json::to_string(&query).unwrap()
}

#[test]
fn test_query_grid_exactly_matches() {
    let service = QueryService::new(repository(), CountryExecutor::new(), settings("metadata"));

    let payload = service
        .query_grid(&exactly_matches_query(), None, "en")
        .unwrap()
        .unwrap();
    let value: Value = serde_json::from_str(&payload).unwrap();

    let resultset = value["resultset"].as_array().unwrap();
    assert_eq!(resultset.len(), 2);
    assert_eq!(resultset[0], json!(["Austria"]));
    assert_eq!(resultset[1], json!(["Switzerland"]));
    assert_eq!(value["metadata"][0]["colLabel"], json!("Country"));
}

#[test]
fn test_query_generic_shape() {
    let service = QueryService::new(repository(), CountryExecutor::new(), settings("metadata"));

    let payload = service
        .query(&exactly_matches_query(), None, "en")
        .unwrap()
        .unwrap();
    let value: Value = serde_json::from_str(&payload).unwrap();

    assert_eq!(
        value["query"]["constraints"][0]["formula"],
        json!("([customer.country] = \"Switzerland\" OR [customer.country] = \"Austria\")")
    );
    assert_eq!(value["result"]["rows"].as_array().unwrap().len(), 2);
}

#[test]
fn test_query_row_limit_forwarded() {
    let service = QueryService::new(repository(), CountryExecutor::new(), settings("metadata"));

    let mut query = WireQuery::new("steel-wheels", "orders");
    query.columns.push(WireElement::new("customer", "country"));
    let json_query = serde_json::to_string(&query).unwrap();

    let payload = service.query_grid(&json_query, Some(2), "en").unwrap().unwrap();
    let value: Value = serde_json::from_str(&payload).unwrap();
    assert_eq!(value["resultset"].as_array().unwrap().len(), 2);
}

#[test]
fn test_null_executor_result_propagates_as_none() {
    let service = QueryService::new(repository(), NullExecutor, settings("metadata"));

    let mut query = WireQuery::new("steel-wheels", "orders");
    query.columns.push(WireElement::new("customer", "country"));
    let json_query = serde_json::to_string(&query).unwrap();

    assert_eq!(service.query(&json_query, None, "en").unwrap(), None);
    assert_eq!(service.query_grid(&json_query, None, "en").unwrap(), None);
}

#[test]
fn test_query_unknown_model_fails() {
    let service = QueryService::new(repository(), NullExecutor, settings("metadata"));
    let query = serde_json::to_string(&WireQuery::new("steel-wheels", "bogus")).unwrap();

    let error = service.query(&query, None, "en").unwrap_err();
    assert!(matches!(error, ServiceError::UnknownModel { .. }));
    assert_eq!(error.code(), codes::UNKNOWN_MODEL);
}

// =============================================================================
// Error payloads
// =============================================================================

#[test]
fn test_error_payload_is_structured_and_localized() {
    let service = QueryService::new(repository(), NullExecutor, settings("metadata"));

    let error = service.query("{not json", None, "en").unwrap_err();
    assert_eq!(error.code(), codes::MALFORMED_QUERY);

    let payload: Value = serde_json::from_str(&error_payload(&error, "en")).unwrap();
    assert_eq!(payload["code"], json!(codes::MALFORMED_QUERY));
    assert_eq!(payload["message"], json!("The query could not be read."));

    let payload: Value = serde_json::from_str(&error_payload(&error, "de_AT")).unwrap();
    assert_eq!(
        payload["message"],
        json!("Die Abfrage konnte nicht gelesen werden.")
    );
}

#[test]
fn test_unresolved_reference_code() {
    let service = QueryService::new(repository(), NullExecutor, settings("metadata"));

    let mut query = WireQuery::new("steel-wheels", "orders");
    query.columns.push(WireElement::new("customer", "bogus"));
    let json_query = serde_json::to_string(&query).unwrap();

    let error = service.query(&json_query, None, "en").unwrap_err();
    assert_eq!(error.code(), codes::UNRESOLVED_REFERENCE);
}
