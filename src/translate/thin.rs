//! Thin-model building: the discovery direction of translation.
//!
//! Flattens a model's categories and columns into a single ordered list of
//! wire elements - each category as a pseudo-element, immediately followed
//! by its columns.

use crate::schema::accessor::localized;
use crate::schema::model::{Category, Column, Model, PROP_ALIGNMENT, PROP_MASK};
use crate::schema::types::{DataType, FieldType};
use crate::wire::{ElementType, WireModel, WireModelElement};

/// Build the thin representation of a model.
///
/// `provider_id` and `domain_id` form the composite id
/// (`provider~domain~model`) callers use to fetch the model again.
pub fn build_thin_model(
    model: &Model,
    provider_id: &str,
    domain_id: &str,
    locale: &str,
) -> WireModel {
    let mut elements = Vec::new();
    for category in &model.categories {
        elements.push(category_element(category, model, locale));
        for column in &category.columns {
            elements.push(column_element(column, category, model, locale));
        }
    }

    WireModel {
        class: WireModel::CLASS.to_string(),
        model_id: format!("{provider_id}~{domain_id}~{}", model.id),
        name: display_name(&model.names, &model.id, model, locale),
        description: description(&model.descriptions, &model.id, model, locale),
        elements,
    }
}

fn category_element(category: &Category, model: &Model, locale: &str) -> WireModelElement {
    WireModelElement {
        class: WireModelElement::CLASS.to_string(),
        id: category.id.clone(),
        element_type: ElementType::Category,
        name: display_name(&category.names, &category.id, model, locale),
        description: description(&category.descriptions, &category.id, model, locale),
        category: None,
        data_type: None,
        field_type: None,
        horizontal_alignment: None,
        format_mask: None,
        hidden: false,
        available_aggregations: Vec::new(),
    }
}

fn column_element(
    column: &Column,
    category: &Category,
    model: &Model,
    locale: &str,
) -> WireModelElement {
    WireModelElement {
        class: WireModelElement::CLASS.to_string(),
        id: column.id.clone(),
        element_type: ElementType::Column,
        name: display_name(&column.names, &column.id, model, locale),
        description: description(&column.descriptions, &column.id, model, locale),
        category: Some(category.id.clone()),
        data_type: Some(column.data_type.name().to_string()),
        field_type: Some(
            column
                .field_type
                .map(FieldType::name)
                .unwrap_or("UNKNOWN")
                .to_string(),
        ),
        horizontal_alignment: Some(alignment(column)),
        format_mask: column.properties.get(PROP_MASK).cloned(),
        hidden: column.is_hidden(),
        available_aggregations: available_aggregations(column),
    }
}

fn display_name(
    names: &std::collections::HashMap<String, String>,
    id: &str,
    model: &Model,
    locale: &str,
) -> String {
    localized(names, locale, &model.default_locale)
        .unwrap_or(id)
        .to_string()
}

/// Resolve a description, clearing it when it merely echoes the id - that
/// means no real description was set and the repository returned the key.
fn description(
    descriptions: &std::collections::HashMap<String, String>,
    id: &str,
    model: &Model,
    locale: &str,
) -> Option<String> {
    localized(descriptions, locale, &model.default_locale)
        .filter(|text| *text != id)
        .map(str::to_string)
}

/// Horizontal alignment: the explicit property when present, else right for
/// FACT fields and for OTHER fields of NUMERIC type, else left.
fn alignment(column: &Column) -> String {
    if let Some(explicit) = column.properties.get(PROP_ALIGNMENT) {
        return explicit.clone();
    }
    let right = match column.field_type {
        Some(FieldType::Fact) => true,
        Some(FieldType::Other) => column.data_type == DataType::Numeric,
        _ => false,
    };
    if right { "right" } else { "left" }.to_string()
}

/// The permitted aggregation list, with the default appended when the list
/// does not already contain it. Discovery order is preserved.
fn available_aggregations(column: &Column) -> Vec<String> {
    let mut aggregations: Vec<String> = column
        .aggregations
        .iter()
        .map(|aggregation| aggregation.name().to_string())
        .collect();
    let default_name = column.default_aggregation.name().to_string();
    if !aggregations.contains(&default_name) {
        aggregations.push(default_name);
    }
    aggregations
}
