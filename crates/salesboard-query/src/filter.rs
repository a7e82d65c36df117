//! Stable filtering over a record slice.

use salesboard_core::{CollectionSchema, FilterCriteria, Record};

/// Return the records admitted by `criteria`, in source order.
///
/// A record is admitted when:
/// - the term is empty, or its lower-cased form is a substring of at least one
///   searchable field (also lower-cased), and
/// - the status constraint is `All`, or equals the categorical field exactly, and
/// - no date range is set, or the date field falls inside it, and
/// - `active_only` is unset, or the schema marks the record active.
///
/// The source slice is never modified.
pub fn filter<'a>(
    records: &'a [Record],
    schema: &CollectionSchema,
    criteria: &FilterCriteria,
) -> Vec<&'a Record> {
    if criteria.is_unrestricted() {
        return records.iter().collect();
    }

    let term = criteria.term.to_lowercase();
    records
        .iter()
        .filter(|record| admits(record, schema, criteria, &term))
        .collect()
}

/// Check a single record against criteria. `term` must already be lower-cased.
fn admits(
    record: &Record,
    schema: &CollectionSchema,
    criteria: &FilterCriteria,
    term: &str,
) -> bool {
    if !matches_term(record, schema, term) {
        return false;
    }

    if criteria.active_only && !schema.is_active(record) {
        return false;
    }

    let status = schema.categorical.as_deref().and_then(|f| record.text(f));
    if !criteria.status.admits(status) {
        return false;
    }

    match (&criteria.dates, schema.date_field.as_deref()) {
        (None, _) => true,
        (Some(range), Some(field)) => record.text(field).is_some_and(|raw| range.contains(raw)),
        (Some(_), None) => false,
    }
}

/// Case-insensitive substring test over the schema's searchable fields.
///
/// `term` must already be lower-cased. Non-text fields are never matched.
pub fn matches_term(record: &Record, schema: &CollectionSchema, term: &str) -> bool {
    term.is_empty()
        || schema.searchable.iter().any(|field| {
            record
                .text(field)
                .is_some_and(|value| value.to_lowercase().contains(term))
        })
}
