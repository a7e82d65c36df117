//! Report views: distributions, group summaries, top-N and threshold listings.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use salesboard_core::{CollectionSchema, QueryError, Record};

use crate::aggregate::numeric_values;

/// Count records per distinct value of `field`, in first-seen order.
///
/// Records without the field are skipped.
pub fn count_by<'a, I>(records: I, field: &str) -> Vec<(String, usize)>
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut counts: Vec<(String, usize)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for value in records.into_iter().filter_map(|r| r.get(field)) {
        let key = value.to_string();
        match index.get(&key) {
            Some(&slot) => counts[slot].1 += 1,
            None => {
                index.insert(key.clone(), counts.len());
                counts.push((key, 1));
            }
        }
    }

    counts
}

/// Per-key totals for one numeric field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupSummary {
    pub key: String,
    pub count: usize,
    pub total: f64,
    pub mean: f64,
}

/// Group records by `key_field` and total `value_field` per group.
///
/// Groups are sorted by total, highest first; ties keep first-seen order.
pub fn group_by<'a, I>(
    records: I,
    schema: &CollectionSchema,
    key_field: &str,
    value_field: &str,
) -> Result<Vec<GroupSummary>, QueryError>
where
    I: IntoIterator<Item = &'a Record>,
{
    let records: Vec<&Record> = records.into_iter().collect();
    let values = numeric_values(records.iter().copied(), schema, value_field)?;

    let mut groups: Vec<GroupSummary> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for (record, value) in records.iter().zip(values) {
        let key = record
            .get(key_field)
            .map(ToString::to_string)
            .ok_or_else(|| QueryError::UnknownField {
                kind: schema.kind,
                field: key_field.to_string(),
            })?;

        let slot = *index.entry(key.clone()).or_insert_with(|| {
            groups.push(GroupSummary {
                key,
                count: 0,
                total: 0.0,
                mean: 0.0,
            });
            groups.len() - 1
        });

        let group = &mut groups[slot];
        group.count += 1;
        group.total += value;
    }

    for group in &mut groups {
        group.mean = group.total / group.count as f64;
    }
    groups.sort_by(|a, b| b.total.total_cmp(&a.total));

    Ok(groups)
}

/// The `n` records with the highest `field`, highest first.
///
/// Ties keep source order.
pub fn top_n<'a, I>(
    records: I,
    schema: &CollectionSchema,
    field: &str,
    n: usize,
) -> Result<Vec<&'a Record>, QueryError>
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut ranked = valued(records, schema, field)?;
    ranked.sort_by(|a, b| b.0.total_cmp(&a.0));

    Ok(ranked.into_iter().take(n).map(|(_, r)| r).collect())
}

/// Records whose `field` is at most `threshold`, lowest first.
///
/// Ties keep source order. Used for low-stock alerts.
pub fn below<'a, I>(
    records: I,
    schema: &CollectionSchema,
    field: &str,
    threshold: f64,
) -> Result<Vec<&'a Record>, QueryError>
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut low: Vec<(f64, &Record)> = valued(records, schema, field)?
        .into_iter()
        .filter(|(value, _)| *value <= threshold)
        .collect();
    low.sort_by(|a, b| a.0.total_cmp(&b.0));

    Ok(low.into_iter().map(|(_, r)| r).collect())
}

fn valued<'a, I>(
    records: I,
    schema: &CollectionSchema,
    field: &str,
) -> Result<Vec<(f64, &'a Record)>, QueryError>
where
    I: IntoIterator<Item = &'a Record>,
{
    let records: Vec<&Record> = records.into_iter().collect();
    let values = numeric_values(records.iter().copied(), schema, field)?;
    Ok(values.into_iter().zip(records).collect())
}

/// Ratio of two numeric totals as a percentage, e.g. outstanding / credit limit.
///
/// A zero denominator is `DivisionUndefined` on the denominator field.
pub fn percent_of<'a, I>(
    records: I,
    schema: &CollectionSchema,
    numerator: &str,
    denominator: &str,
) -> Result<f64, QueryError>
where
    I: IntoIterator<Item = &'a Record>,
{
    let records: Vec<&Record> = records.into_iter().collect();
    let top: f64 = numeric_values(records.iter().copied(), schema, numerator)?
        .iter()
        .sum();
    let bottom: f64 = numeric_values(records.iter().copied(), schema, denominator)?
        .iter()
        .sum();

    if bottom == 0.0 {
        return Err(QueryError::DivisionUndefined {
            field: denominator.to_string(),
        });
    }
    Ok(top / bottom * 100.0)
}
