//! Derived aggregates over numeric fields.
//!
//! Everything here is recomputed from the records on each call. Errors are
//! returned rather than folded into `0` or `NaN`:
//! - `SchemaMismatch` when the field is not designated numeric, or a record
//!   holds a non-number / nothing for it
//! - `DivisionUndefined` when a mean is requested over zero records

use serde::{Deserialize, Serialize};

use salesboard_core::{CollectionSchema, FieldValue, QueryError, Record};

/// Aggregate kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "field", rename_all = "lowercase")]
pub enum Aggregate {
    /// Arithmetic total of a numeric field.
    Sum(String),
    /// `sum / count` of a numeric field.
    Mean(String),
    /// Number of records, independent of any field.
    Count,
}

impl Aggregate {
    pub fn sum(field: impl Into<String>) -> Self {
        Aggregate::Sum(field.into())
    }

    pub fn mean(field: impl Into<String>) -> Self {
        Aggregate::Mean(field.into())
    }

    /// The field this aggregate reads, if any.
    pub fn field(&self) -> Option<&str> {
        match self {
            Aggregate::Sum(f) | Aggregate::Mean(f) => Some(f),
            Aggregate::Count => None,
        }
    }
}

/// Compute one aggregate over `records`.
pub fn aggregate<'a, I>(
    records: I,
    schema: &CollectionSchema,
    kind: &Aggregate,
) -> Result<f64, QueryError>
where
    I: IntoIterator<Item = &'a Record>,
{
    match kind {
        Aggregate::Count => Ok(records.into_iter().count() as f64),
        Aggregate::Sum(field) => {
            let values = numeric_values(records, schema, field)?;
            Ok(values.iter().sum())
        }
        Aggregate::Mean(field) => {
            let values = numeric_values(records, schema, field)?;
            if values.is_empty() {
                return Err(QueryError::DivisionUndefined {
                    field: field.clone(),
                });
            }
            Ok(values.iter().sum::<f64>() / values.len() as f64)
        }
    }
}

/// Count, total and mean of one numeric field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub field: String,
    pub count: usize,
    pub sum: f64,
    /// `None` over zero records.
    pub mean: Option<f64>,
}

/// Summarize a numeric field for KPI display.
///
/// Shares validation with `aggregate`; an empty set yields `mean: None`
/// instead of `DivisionUndefined`.
pub fn summarize<'a, I>(
    records: I,
    schema: &CollectionSchema,
    field: &str,
) -> Result<Summary, QueryError>
where
    I: IntoIterator<Item = &'a Record>,
{
    let values = numeric_values(records, schema, field)?;
    let sum: f64 = values.iter().sum();
    let mean = if values.is_empty() {
        None
    } else {
        Some(sum / values.len() as f64)
    };

    Ok(Summary {
        field: field.to_string(),
        count: values.len(),
        sum,
        mean,
    })
}

/// Read `field` from every record as a number, enforcing the schema.
pub(crate) fn numeric_values<'a, I>(
    records: I,
    schema: &CollectionSchema,
    field: &str,
) -> Result<Vec<f64>, QueryError>
where
    I: IntoIterator<Item = &'a Record>,
{
    if !schema.is_numeric(field) {
        return Err(QueryError::SchemaMismatch {
            field: field.to_string(),
            reason: format!("not a numeric field of {}", schema.kind),
        });
    }

    records
        .into_iter()
        .map(|record| numeric_value(record, schema, field))
        .collect()
}

/// Read one numeric value, naming the record on failure.
pub(crate) fn numeric_value(
    record: &Record,
    schema: &CollectionSchema,
    field: &str,
) -> Result<f64, QueryError> {
    let id = || record.text(&schema.id_field).unwrap_or("?").to_string();
    match record.get(field) {
        Some(FieldValue::Number(n)) => Ok(*n),
        Some(other) => Err(QueryError::SchemaMismatch {
            field: field.to_string(),
            reason: format!("record '{}' holds a {} value", id(), other.type_name()),
        }),
        None => Err(QueryError::SchemaMismatch {
            field: field.to_string(),
            reason: format!("record '{}' has no value", id()),
        }),
    }
}
