//! Collection kinds and their schema table.
//!
//! Orders, outlets, promotions and products differ only in which fields are
//! searched, which field is categorical and which fields are numeric. That
//! difference lives here so `filter` and `aggregate` stay generic.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::QueryError;
use crate::record::{FieldValue, Record};

/// Text value of an active flag stored as a status.
pub const ACTIVE_STATUS: &str = "Active";

/// Which sample table a query targets.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum CollectionKind {
    #[default]
    Orders,
    Outlets,
    Promotions,
    Products,
}

impl CollectionKind {
    /// Every kind, in display order.
    pub const ALL: [CollectionKind; 4] = [
        CollectionKind::Orders,
        CollectionKind::Outlets,
        CollectionKind::Promotions,
        CollectionKind::Products,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CollectionKind::Orders => "orders",
            CollectionKind::Outlets => "outlets",
            CollectionKind::Promotions => "promotions",
            CollectionKind::Products => "products",
        }
    }
}

impl fmt::Display for CollectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CollectionKind {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CollectionKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| QueryError::UnknownKind(s.to_string()))
    }
}

/// Field roles for one collection kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionSchema {
    /// Kind this schema describes.
    pub kind: CollectionKind,

    /// Unique identifier field.
    pub id_field: String,

    /// Primary display field, used for relevance ranking.
    pub title_field: String,

    /// Fields the free-text term is matched against.
    pub searchable: Vec<String>,

    /// Field the status constraint is compared with.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categorical: Option<String>,

    /// Fields that may be aggregated.
    #[serde(default)]
    pub numeric: Vec<String>,

    /// `YYYY-MM-DD...` field the date range applies to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_field: Option<String>,

    /// Field marking a record live: `true`, or the text `"Active"`.
    /// Without one, every record counts as active.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_field: Option<String>,
}

impl CollectionSchema {
    /// The built-in schema for a kind.
    pub fn builtin(kind: CollectionKind) -> Self {
        match kind {
            CollectionKind::Orders => Self {
                kind,
                id_field: "id".to_string(),
                title_field: "id".to_string(),
                searchable: strings(&["id", "outlet", "customer"]),
                categorical: Some("status".to_string()),
                numeric: strings(&["amount", "items"]),
                date_field: Some("created".to_string()),
                active_field: None,
            },
            CollectionKind::Outlets => Self {
                kind,
                id_field: "id".to_string(),
                title_field: "name".to_string(),
                searchable: strings(&["name", "manager", "address"]),
                categorical: Some("status".to_string()),
                numeric: strings(&["sales", "performance", "credit_limit", "outstanding"]),
                date_field: None,
                active_field: Some("status".to_string()),
            },
            CollectionKind::Promotions => Self {
                kind,
                id_field: "id".to_string(),
                title_field: "title".to_string(),
                searchable: strings(&["title", "description"]),
                categorical: Some("status".to_string()),
                numeric: strings(&["discount", "min_amount"]),
                date_field: None,
                active_field: Some("status".to_string()),
            },
            CollectionKind::Products => Self {
                kind,
                id_field: "id".to_string(),
                title_field: "name".to_string(),
                searchable: strings(&["name", "description", "category", "brand"]),
                categorical: Some("category".to_string()),
                numeric: strings(&["price", "stock"]),
                date_field: None,
                active_field: Some("active".to_string()),
            },
        }
    }

    /// Check if `field` is designated numeric.
    pub fn is_numeric(&self, field: &str) -> bool {
        self.numeric.iter().any(|f| f == field)
    }

    /// Check if `field` is matched by the free-text term.
    pub fn is_searchable(&self, field: &str) -> bool {
        self.searchable.iter().any(|f| f == field)
    }

    /// Check whether a record is live under this schema's active flag.
    pub fn is_active(&self, record: &Record) -> bool {
        let Some(field) = self.active_field.as_deref() else {
            return true;
        };
        match record.get(field) {
            Some(FieldValue::Bool(active)) => *active,
            Some(FieldValue::Text(status)) => status == ACTIVE_STATUS,
            _ => false,
        }
    }

    /// Every field the schema assigns a role to.
    pub fn designated_fields(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.id_field.as_str())
            .chain(std::iter::once(self.title_field.as_str()))
            .chain(self.searchable.iter().map(String::as_str))
            .chain(self.categorical.as_deref())
            .chain(self.numeric.iter().map(String::as_str))
            .chain(self.date_field.as_deref())
            .chain(self.active_field.as_deref())
    }
}

fn strings(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| n.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_str() {
        assert_eq!("orders".parse::<CollectionKind>(), Ok(CollectionKind::Orders));
        assert_eq!(" Outlets ".parse::<CollectionKind>(), Ok(CollectionKind::Outlets));
        assert!(matches!(
            "invoices".parse::<CollectionKind>(),
            Err(QueryError::UnknownKind(_))
        ));
    }

    #[test]
    fn test_builtin_searchable_fields() {
        let orders = CollectionSchema::builtin(CollectionKind::Orders);
        assert!(orders.is_searchable("customer"));
        assert!(!orders.is_searchable("status"));

        let promotions = CollectionSchema::builtin(CollectionKind::Promotions);
        assert_eq!(promotions.searchable, vec!["title", "description"]);
    }

    #[test]
    fn test_builtin_numeric_fields() {
        let outlets = CollectionSchema::builtin(CollectionKind::Outlets);
        assert!(outlets.is_numeric("sales"));
        assert!(!outlets.is_numeric("name"));
    }

    #[test]
    fn test_designated_fields_include_roles() {
        let orders = CollectionSchema::builtin(CollectionKind::Orders);
        let fields: Vec<&str> = orders.designated_fields().collect();
        assert!(fields.contains(&"status"));
        assert!(fields.contains(&"created"));
        assert!(fields.contains(&"amount"));
    }

    #[test]
    fn test_is_active() {
        let outlets = CollectionSchema::builtin(CollectionKind::Outlets);
        assert!(outlets.is_active(&Record::new().with("status", "Active")));
        assert!(!outlets.is_active(&Record::new().with("status", "Inactive")));
        assert!(!outlets.is_active(&Record::new()));

        let products = CollectionSchema::builtin(CollectionKind::Products);
        assert!(products.is_active(&Record::new().with("active", true)));
        assert!(!products.is_active(&Record::new().with("active", false)));

        // Orders carry no flag.
        let orders = CollectionSchema::builtin(CollectionKind::Orders);
        assert!(orders.is_active(&Record::new()));
    }
}
