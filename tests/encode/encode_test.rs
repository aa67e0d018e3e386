use serde_json::{json, Value};
use strata::encode::{encode, encode_grid};
use strata::executor::{ResultColumn, TabularResult};
use strata::schema::{Category, Column, DataType, Model};
use strata::translate::resolve;
use strata::wire::{WireElement, WireQuery};

fn model() -> Model {
    Model::new("orders").with_category(
        Category::new("customer")
            .with_column(Column::new("country", DataType::String))
            .with_column(Column::new("population", DataType::Numeric)),
    )
}

fn result() -> TabularResult {
    let mut result = TabularResult::new(vec![
        ResultColumn::new("country", DataType::String)
            .with_label("en", "Country")
            .with_label("de", "Land"),
        ResultColumn::new("population", DataType::Numeric),
    ]);
    result.push_row(vec![json!("Austria"), json!(9_000_000)]);
    result.push_row(vec![json!("Switzerland"), json!(8_700_000)]);
    result
}

#[test]
fn test_grid_null_result_yields_none() {
    assert_eq!(encode_grid(None, "en").unwrap(), None);
}

#[test]
fn test_grid_fully_empty_result_yields_none() {
    let empty = TabularResult::new(Vec::new());
    assert_eq!(encode_grid(Some(&empty), "en").unwrap(), None);
}

#[test]
fn test_grid_shape() {
    let json = encode_grid(Some(&result()), "en").unwrap().unwrap();
    let value: Value = serde_json::from_str(&json).unwrap();

    let object = value.as_object().unwrap();
    assert_eq!(object.len(), 2, "exactly two top-level fields");

    let metadata = value["metadata"].as_array().unwrap();
    assert_eq!(metadata.len(), 2);
    assert_eq!(metadata[0]["colIndex"], json!(0));
    assert_eq!(metadata[0]["colName"], json!("country"));
    assert_eq!(metadata[0]["colType"], json!("STRING"));
    assert_eq!(metadata[0]["colLabel"], json!("Country"));
    assert_eq!(metadata[1]["colIndex"], json!(1));
    assert_eq!(metadata[1]["colType"], json!("NUMERIC"));
    // No label available: the field is omitted, not null.
    assert!(metadata[1].get("colLabel").is_none());

    let resultset = value["resultset"].as_array().unwrap();
    assert_eq!(resultset.len(), 2);
    assert_eq!(resultset[0], json!(["Austria", 9_000_000]));
    assert_eq!(resultset[1], json!(["Switzerland", 8_700_000]));
}

#[test]
fn test_grid_localizes_labels() {
    let json = encode_grid(Some(&result()), "de_AT").unwrap().unwrap();
    let value: Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["metadata"][0]["colLabel"], json!("Land"));
}

#[test]
fn test_grid_empty_rows_keep_metadata() {
    let result = TabularResult::new(vec![ResultColumn::new("country", DataType::String)]);
    let json = encode_grid(Some(&result), "en").unwrap().unwrap();
    let value: Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["metadata"].as_array().unwrap().len(), 1);
    assert!(value["resultset"].as_array().unwrap().is_empty());
}

#[test]
fn test_generic_null_result_yields_none() {
    let model = model();
    let mut query = WireQuery::new("d", "orders");
    query.columns.push(WireElement::new("customer", "country"));
    let resolved = resolve(&query, &model).unwrap();

    assert_eq!(encode(&resolved, None).unwrap(), None);
}

#[test]
fn test_generic_shape_mirrors_data_model() {
    let model = model();
    let mut query = WireQuery::new("d", "orders");
    query.columns.push(WireElement::new("customer", "country"));
    query.disable_distinct = true;
    let resolved = resolve(&query, &model).unwrap();

    let json = encode(&resolved, Some(&result())).unwrap().unwrap();
    let value: Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["query"]["disableDistinct"], json!(true));
    assert_eq!(
        value["query"]["selections"][0]["column"]["id"],
        json!("country")
    );
    assert_eq!(
        value["query"]["selections"][0]["category"]["id"],
        json!("customer")
    );
    assert_eq!(value["result"]["rows"].as_array().unwrap().len(), 2);
    assert_eq!(value["result"]["columns"][0]["name"], json!("country"));
}
