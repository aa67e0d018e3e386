use strata::schema::{
    closest_locale, find_model, localized, AggregationType, Category, Column, DataType, Domain,
    InMemorySchemaRepository, Model, SchemaRepository,
};

fn repository() -> InMemorySchemaRepository {
    let model = Model::new("orders")
        .with_name("en", "Orders")
        .with_name("de", "Bestellungen")
        .with_category(
            Category::new("customer").with_column(
                Column::new("country", DataType::String)
                    .with_aggregations(vec![AggregationType::Count], AggregationType::None),
            ),
        )
        .with_category(
            // Malformed on purpose: duplicates a column id from "customer".
            Category::new("shipping")
                .with_column(Column::new("country", DataType::String))
                .with_column(Column::new("carrier", DataType::String)),
        );
    InMemorySchemaRepository::new().with_domain(Domain::new("steel-wheels").with_model(model))
}

#[test]
fn test_find_model() {
    let repository = repository();
    assert!(find_model(&repository, "steel-wheels", "orders").is_some());
    assert!(find_model(&repository, "steel-wheels", "bogus").is_none());
    assert!(find_model(&repository, "bogus", "orders").is_none());
}

#[test]
fn test_domain_ids_stable_order() {
    let repository = repository();
    assert_eq!(repository.domain_ids(), vec!["steel-wheels".to_string()]);
}

#[test]
fn test_find_column_and_category() {
    let repository = repository();
    let model = find_model(&repository, "steel-wheels", "orders").unwrap();

    let column = model.find_column("carrier").unwrap();
    assert_eq!(column.id, "carrier");
    assert_eq!(model.find_category_of("carrier").unwrap().id, "shipping");

    assert!(model.find_column("bogus").is_none());
    assert!(model.find_category_of("bogus").is_none());
}

// When a column id is duplicated across categories, the first declared
// category wins. Documented ambiguity, not an error.
#[test]
fn test_duplicate_column_first_category_wins() {
    let repository = repository();
    let model = find_model(&repository, "steel-wheels", "orders").unwrap();
    assert_eq!(model.find_category_of("country").unwrap().id, "customer");
}

#[test]
fn test_closest_locale_prefix_fallback() {
    let available = ["en", "de"];
    assert_eq!(closest_locale("de_AT", available.iter().copied()), Some("de"));
    assert_eq!(closest_locale("de", available.iter().copied()), Some("de"));
    assert_eq!(closest_locale("fr", available.iter().copied()), None);
}

#[test]
fn test_localized_falls_back_to_default_locale() {
    let repository = repository();
    let model = find_model(&repository, "steel-wheels", "orders").unwrap();

    assert_eq!(localized(&model.names, "de_DE", "en"), Some("Bestellungen"));
    // Nothing matches French, so the model default locale applies.
    assert_eq!(localized(&model.names, "fr_FR", "en"), Some("Orders"));
    assert_eq!(localized(&model.names, "fr_FR", "ja"), None);
}
