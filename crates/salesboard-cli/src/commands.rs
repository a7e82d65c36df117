//! Subcommand handlers.
//!
//! Each handler returns the text to print, so that output can be tested
//! without a terminal.

use serde::Serialize;

use salesboard_core::{
    AppConfig, CollectionKind, CollectionSchema, DateRange, FilterCriteria, QueryConfig,
    QueryError, Record, StatusFilter,
};
use salesboard_query::{Aggregate, GroupSummary, QueryEngine};

use crate::error::CliError;
use crate::render;

/// Shared state for one invocation.
pub struct Context {
    pub engine: QueryEngine,
    pub config: AppConfig,
    pub json: bool,
}

impl Context {
    fn kind(&self, kind: Option<CollectionKind>) -> CollectionKind {
        kind.unwrap_or(self.config.query.default_kind)
    }

    fn emit<T: Serialize>(
        &self,
        value: &T,
        text: impl FnOnce() -> String,
    ) -> Result<String, CliError> {
        if self.json {
            Ok(serde_json::to_string_pretty(value)? + "\n")
        } else {
            Ok(text())
        }
    }
}

/// Arguments of `list`.
#[derive(Debug, Default)]
pub struct ListArgs {
    pub kind: Option<CollectionKind>,
    pub search: Option<String>,
    pub status: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
}

pub fn list(ctx: &Context, args: ListArgs) -> Result<String, CliError> {
    let kind = ctx.kind(args.kind);
    let mut criteria = FilterCriteria::new();
    if let Some(term) = args.search {
        criteria = criteria.with_term(term);
    }
    if let Some(status) = args.status {
        criteria = criteria.with_status(StatusFilter::from_label(&status));
    }
    match (args.from, args.to) {
        (Some(from), Some(to)) => criteria = criteria.with_dates(DateRange::parse(&from, &to)?),
        (None, None) => {}
        _ => return Err(CliError::Usage("--from and --to must be given together".to_string())),
    }

    let result = ctx.engine.search(kind, &criteria)?;
    ctx.emit(&result, || {
        let rows: Vec<&Record> = result.records.iter().collect();
        let schema = CollectionSchema::builtin(kind);
        format!(
            "{}Showing {} of {} {}\n",
            render::table(&rows, &render::columns(&schema)),
            result.len(),
            result.total,
            kind
        )
    })
}

pub fn rank(ctx: &Context, kind: Option<CollectionKind>, term: &str) -> Result<String, CliError> {
    let kind = ctx.kind(kind);
    let ranked = ctx.engine.rank(kind, term)?;
    ctx.emit(&ranked, || {
        let rows: Vec<&Record> = ranked.iter().collect();
        render::table(&rows, &render::columns(&CollectionSchema::builtin(kind)))
    })
}

pub fn summary(
    ctx: &Context,
    kind: Option<CollectionKind>,
    field: &str,
) -> Result<String, CliError> {
    let summary = ctx.engine.summarize(ctx.kind(kind), field)?;
    ctx.emit(&summary, || render::summary(&summary))
}

/// Highest values of `field`. Inactive records are left out unless
/// `include_inactive` is set.
pub fn top(
    ctx: &Context,
    kind: Option<CollectionKind>,
    field: &str,
    limit: Option<usize>,
    include_inactive: bool,
) -> Result<String, CliError> {
    let kind = ctx.kind(kind);
    let limit = limit.unwrap_or(ctx.config.query.top_limit);
    let records = if include_inactive {
        ctx.engine.top(kind, field, limit)?
    } else {
        ctx.engine
            .top_filtered(kind, &FilterCriteria::new().with_active_only(), field, limit)?
    };
    ctx.emit(&records, || {
        let schema = CollectionSchema::builtin(kind);
        let mut columns = vec![schema.title_field.as_str()];
        if field != schema.title_field {
            columns.push(field);
        }
        let rows: Vec<&Record> = records.iter().collect();
        render::table(&rows, &columns)
    })
}

pub fn distribution(
    ctx: &Context,
    kind: Option<CollectionKind>,
    field: Option<&str>,
) -> Result<String, CliError> {
    let kind = ctx.kind(kind);
    let schema = CollectionSchema::builtin(kind);
    let field = match field.or(schema.categorical.as_deref()) {
        Some(field) => field,
        None => {
            return Err(CliError::Usage(format!(
                "{} has no status field; pass --field",
                kind
            )))
        }
    };
    let counts = ctx.engine.distribution(kind, field)?;
    ctx.emit(&counts, || render::counts(&counts))
}

// =============================================================================
// Dashboard report
// =============================================================================

/// The dashboard's headline numbers.
///
/// Outlet figures cover active outlets only.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardReport {
    pub total_sales: f64,
    pub average_performance: Option<f64>,
    pub active_outlets: usize,
    pub active_products: usize,
    pub order_count: usize,
    pub order_value: f64,
    pub active_promotions: usize,
    pub credit_limit: f64,
    pub outstanding: f64,
    /// Outstanding balance as a percentage of credit limit; `None` without credit.
    pub credit_utilization: Option<f64>,
    /// Active products at or below the low-stock threshold, lowest first.
    pub low_stock: Vec<Record>,
    pub order_status: Vec<(String, usize)>,
    pub outlet_orders: Vec<GroupSummary>,
}

pub fn dashboard(engine: &QueryEngine, config: &QueryConfig) -> Result<DashboardReport, CliError> {
    let outlets = CollectionKind::Outlets;
    let orders = CollectionKind::Orders;
    let active = FilterCriteria::new().with_active_only();

    let sales = engine.summarize_filtered(outlets, &active, "sales")?;
    let performance = engine.summarize_filtered(outlets, &active, "performance")?;
    let credit = engine.summarize_filtered(outlets, &active, "credit_limit")?;
    let outstanding = engine.summarize_filtered(outlets, &active, "outstanding")?;
    let credit_utilization =
        match engine.percent_of_filtered(outlets, &active, "outstanding", "credit_limit") {
            Ok(percent) => Some(percent),
            Err(QueryError::DivisionUndefined { .. }) => None,
            Err(e) => return Err(e.into()),
        };

    let threshold = config.low_stock_threshold;
    let low_stock = engine.below(CollectionKind::Products, &active, "stock", threshold)?;

    Ok(DashboardReport {
        total_sales: sales.sum,
        average_performance: performance.mean,
        active_outlets: sales.count,
        active_products: engine.search(CollectionKind::Products, &active)?.len(),
        order_count: engine.aggregate(orders, &Aggregate::Count)? as usize,
        order_value: engine.aggregate(orders, &Aggregate::sum("amount"))?,
        active_promotions: engine.search(CollectionKind::Promotions, &active)?.len(),
        credit_limit: credit.sum,
        outstanding: outstanding.sum,
        credit_utilization,
        low_stock,
        order_status: engine.distribution(orders, "status")?,
        outlet_orders: engine.group(orders, "outlet", "amount")?,
    })
}

pub fn report(ctx: &Context) -> Result<String, CliError> {
    let report = dashboard(&ctx.engine, &ctx.config.query)?;
    ctx.emit(&report, || {
        let percent = |value: Option<f64>| {
            value
                .map(|v| format!("{}%", render::number(v)))
                .unwrap_or_else(|| "n/a".to_string())
        };
        let low_stock = if report.low_stock.is_empty() {
            "None\n".to_string()
        } else {
            let rows: Vec<&Record> = report.low_stock.iter().collect();
            render::table(&rows, &["name", "stock"])
        };

        format!(
            "Total sales:         {}\n\
             Average performance: {}\n\
             Active outlets:      {}\n\
             Active products:     {}\n\
             Orders:              {} (value {})\n\
             Active promotions:   {}\n\
             Credit limit:        {}\n\
             Outstanding:         {}\n\
             Credit utilization:  {}\n\
             \nLow stock (at or below {})\n{}\
             \nOrder status\n{}\nOrders by outlet\n{}",
            render::number(report.total_sales),
            percent(report.average_performance),
            report.active_outlets,
            report.active_products,
            report.order_count,
            render::number(report.order_value),
            report.active_promotions,
            render::number(report.credit_limit),
            render::number(report.outstanding),
            percent(report.credit_utilization),
            render::number(ctx.config.query.low_stock_threshold),
            low_stock,
            render::counts(&report.order_status),
            render::groups(&report.outlet_orders),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use salesboard_query::samples;
    use std::sync::Arc;

    fn context(json: bool) -> Context {
        Context {
            engine: QueryEngine::new(Arc::new(samples::registry().unwrap())),
            config: AppConfig::default(),
            json,
        }
    }

    fn dashboard_report() -> DashboardReport {
        let ctx = context(false);
        dashboard(&ctx.engine, &ctx.config.query).unwrap()
    }

    #[test]
    fn test_dashboard_numbers() {
        let report = dashboard_report();
        assert_eq!(report.order_count, 6);
        assert_eq!(report.order_value, 67150.0);
        assert_eq!(report.active_promotions, 3);
        assert_eq!(report.active_products, 5);
        assert_eq!(report.outlet_orders[0].key, "Metro Mart");
    }

    #[test]
    fn test_dashboard_outlets_exclude_inactive() {
        let report = dashboard_report();
        assert_eq!(report.active_outlets, 3);
        assert_eq!(report.total_sales, 115000.0);
        assert_eq!(report.average_performance, Some(85.0));
        assert_eq!(report.credit_limit, 235000.0);
        assert_eq!(report.outstanding, 78000.0);

        let utilization = report.credit_utilization.unwrap();
        assert!((utilization - 33.19).abs() < 0.01, "{}", utilization);
    }

    #[test]
    fn test_dashboard_low_stock() {
        let report = dashboard_report();
        let names: Vec<&str> = report.low_stock.iter().filter_map(|r| r.text("name")).collect();
        assert_eq!(names, vec!["7UP 500ml", "Aquafina 1.5L"]);

        let mut ctx = context(false);
        ctx.config.query.low_stock_threshold = 6.0;
        let report = dashboard(&ctx.engine, &ctx.config.query).unwrap();
        assert_eq!(report.low_stock.len(), 1);

        let out = report_text();
        assert!(out.contains("Low stock (at or below 10)"));
        assert!(out.contains("7UP 500ml"));
    }

    fn report_text() -> String {
        report(&context(false)).unwrap()
    }

    #[test]
    fn test_list_defaults_to_orders() {
        let out = list(&context(false), ListArgs::default()).unwrap();
        assert!(out.ends_with("Showing 6 of 6 orders\n"));
    }

    #[test]
    fn test_list_status_and_dates() {
        let args = ListArgs {
            status: Some("Delivered".to_string()),
            from: Some("2025-07-01".to_string()),
            to: Some("2025-07-10".to_string()),
            ..ListArgs::default()
        };
        let out = list(&context(false), args).unwrap();
        assert!(out.contains("ORD-1001"));
        assert!(!out.contains("ORD-1006"));
    }

    #[test]
    fn test_list_half_date_range() {
        let args = ListArgs {
            from: Some("2025-07-01".to_string()),
            ..ListArgs::default()
        };
        assert!(matches!(list(&context(false), args), Err(CliError::Usage(_))));
    }

    #[test]
    fn test_summary_json() {
        let out = summary(&context(true), Some(CollectionKind::Outlets), "sales").unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["sum"], 143000.0);
        assert_eq!(value["count"], 4);
    }

    #[test]
    fn test_top_uses_config_limit() {
        let ctx = context(false);
        let out = top(&ctx, Some(CollectionKind::Products), "stock", None, false).unwrap();
        // Header plus the five products.
        assert_eq!(out.lines().count(), 6);
        assert!(out.lines().nth(1).unwrap().starts_with("Lays Classic 50g"));
    }

    #[test]
    fn test_top_skips_inactive_outlets() {
        let ctx = context(false);
        let kind = Some(CollectionKind::Outlets);

        let active = top(&ctx, kind, "outstanding", None, false).unwrap();
        assert!(active.lines().nth(1).unwrap().starts_with("City Corner Store"));
        assert!(!active.contains("Sunrise Superstore"));

        let all = top(&ctx, kind, "outstanding", None, true).unwrap();
        assert!(all.lines().nth(1).unwrap().starts_with("Sunrise Superstore"));
    }

    #[test]
    fn test_distribution_default_field() {
        let out = distribution(&context(false), Some(CollectionKind::Outlets), None).unwrap();
        assert!(out.contains("Active"));
        assert!(out.contains("Inactive"));
    }

    #[test]
    fn test_summary_text_field_error() {
        let result = summary(&context(false), Some(CollectionKind::Products), "brand");
        assert!(matches!(result, Err(CliError::Query(_))));
    }
}
