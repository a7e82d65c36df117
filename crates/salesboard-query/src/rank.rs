//! Relevance-ranked search.

use salesboard_core::{CollectionSchema, FilterCriteria, Record};

use crate::filter::filter;

/// Filter by `term`, then order by relevance on the title field:
/// 1. exact (case-insensitive) title match
/// 2. title contains the term
/// 3. title as written (case-sensitive)
///
/// Matches found only in other searchable fields sort after title hits.
pub fn rank<'a>(records: &'a [Record], schema: &CollectionSchema, term: &str) -> Vec<&'a Record> {
    let needle = term.to_lowercase();
    let mut hits = filter(records, schema, &FilterCriteria::new().with_term(term));

    hits.sort_by_cached_key(|record| {
        let title = record.text(&schema.title_field).unwrap_or_default();
        let folded = title.to_lowercase();
        (folded != needle, !folded.contains(&needle), title.to_string())
    });

    hits
}

#[cfg(test)]
mod tests {
    use super::*;
    use salesboard_core::CollectionKind;

    fn product(id: &str, name: &str, brand: &str, description: &str) -> Record {
        Record::new()
            .with("id", id)
            .with("name", name)
            .with("brand", brand)
            .with("category", "Beverages")
            .with("description", description)
            .with("price", 80)
            .with("stock", 10)
    }

    fn names(records: &[&Record]) -> Vec<String> {
        records
            .iter()
            .map(|r| r.text("name").unwrap_or_default().to_string())
            .collect()
    }

    #[test]
    fn test_rank_exact_title_first() {
        let records = vec![
            product("1", "Pepsi 1.5L", "Pepsi", "Family size"),
            product("2", "Mirinda", "Pepsi", "Orange soda"),
            product("3", "pepsi", "Pepsi", "Can"),
            product("4", "Diet Pepsi", "Pepsi", "Zero sugar"),
        ];
        let schema = CollectionSchema::builtin(CollectionKind::Products);

        let ranked = rank(&records, &schema, "Pepsi");
        assert_eq!(names(&ranked), vec!["pepsi", "Diet Pepsi", "Pepsi 1.5L", "Mirinda"]);
    }

    #[test]
    fn test_rank_tie_break_is_case_sensitive() {
        let records = vec![
            product("1", "diet pepsi", "Pepsi", "Can"),
            product("2", "Pepsi Max", "Pepsi", "Zero sugar"),
        ];
        let schema = CollectionSchema::builtin(CollectionKind::Products);

        // Uppercase sorts before lowercase.
        let ranked = rank(&records, &schema, "pepsi");
        assert_eq!(names(&ranked), vec!["Pepsi Max", "diet pepsi"]);
    }

    #[test]
    fn test_rank_excludes_non_matches() {
        let records = vec![
            product("1", "Aquafina", "Aquafina", "Water"),
            product("2", "7UP", "7UP", "Lemon-lime"),
        ];
        let schema = CollectionSchema::builtin(CollectionKind::Products);

        assert_eq!(names(&rank(&records, &schema, "lemon")), vec!["7UP"]);
        assert!(rank(&records, &schema, "cola").is_empty());
    }
}
