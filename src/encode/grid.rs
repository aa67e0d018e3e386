//! Flat grid encoder, consumed by the charting front end.
//!
//! Output carries exactly two top-level fields: `metadata` (one entry per
//! column) and `resultset` (row-major value arrays).

use serde::Serialize;
use serde_json::Value;

use crate::executor::TabularResult;
use crate::schema::accessor::closest_locale;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GridColumn<'a> {
    col_index: usize,
    col_name: &'a str,
    col_type: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    col_label: Option<&'a str>,
}

#[derive(Serialize)]
struct Grid<'a> {
    metadata: Vec<GridColumn<'a>>,
    resultset: &'a [Vec<Value>],
}

/// Encode a tabular result into the grid shape.
///
/// An absent result, or one with neither columns nor rows, yields `None` -
/// "no data", never an error. Column labels are localized against the
/// requested locale and omitted when no label is available.
pub fn encode_grid(
    result: Option<&TabularResult>,
    locale: &str,
) -> Result<Option<String>, serde_json::Error> {
    let Some(result) = result else {
        return Ok(None);
    };
    if result.is_empty() {
        return Ok(None);
    }

    let metadata = result
        .columns
        .iter()
        .enumerate()
        .map(|(col_index, column)| {
            let col_label =
                closest_locale(locale, column.labels.keys().map(String::as_str))
                    .and_then(|tag| column.labels.get(tag))
                    .map(String::as_str);
            GridColumn {
                col_index,
                col_name: &column.name,
                col_type: column.data_type.name(),
                col_label,
            }
        })
        .collect();

    let grid = Grid {
        metadata,
        resultset: &result.rows,
    };
    Ok(Some(serde_json::to_string(&grid)?))
}
