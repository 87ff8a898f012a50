//! Presto.
//!
//! Presto declares no epoch conversion. Its table metadata exposes the
//! partitioning of Hive-style tables.

use std::sync::Arc;

use serde_json::{json, Map, Value};

use crate::dttm::DttmStyle;
use crate::engine::EngineSpec;
use crate::grain::GrainSpec;
use crate::metadata::{TableMetadataProvider, TableRef};

use super::time_column;

pub fn spec() -> EngineSpec {
    let mut grains = vec![time_column()];
    for unit in ["second", "minute", "hour", "day", "week", "month", "quarter"] {
        grains.push(GrainSpec::new(
            unit,
            &format!("date_trunc('{unit}', CAST({{col}} AS TIMESTAMP))"),
        ));
    }
    grains.push(GrainSpec::new(
        "week_ending_saturday",
        "date_add('day', 5, date_trunc('week', date_add('day', 1, CAST({col} AS TIMESTAMP))))",
    ));
    grains.push(GrainSpec::new(
        "week_start_sunday",
        "date_add('day', -1, date_trunc('week', date_add('day', 1, CAST({col} AS TIMESTAMP))))",
    ));

    EngineSpec::new("presto")
        .dttm_style(DttmStyle::Presto)
        .escape_percent(true)
        .time_grains(grains)
        .table_metadata(Arc::new(PrestoPartitions))
}

/// Reports partition columns, the latest partition and the query listing
/// partitions.
///
/// Keys: `partitions.cols`, `partitions.latest`, `partitions.partitionQuery`.
/// Unpartitioned tables get an empty map.
#[derive(Debug, Default, Clone, Copy)]
pub struct PrestoPartitions;

impl TableMetadataProvider for PrestoPartitions {
    fn extra_table_metadata(&self, table: &TableRef) -> Map<String, Value> {
        let Some(first) = table.partition_columns.first() else {
            return Map::new();
        };

        let mut latest = Map::new();
        latest.insert(
            first.clone(),
            table
                .latest_partition
                .as_ref()
                .map_or(Value::Null, |v| Value::String(v.clone())),
        );

        let mut out = Map::new();
        out.insert(
            "partitions".to_string(),
            json!({
                "cols": table.partition_columns,
                "latest": latest,
                "partitionQuery": partition_query(&table.full_name(), 0, &[], &[]),
            }),
        );
        out
    }
}

/// Build a `SHOW PARTITIONS` query.
///
/// `limit` of 0 means no limit; `order_by` pairs are (field, descending);
/// `filters` are equality filters joined with AND.
pub fn partition_query(
    table_name: &str,
    limit: usize,
    order_by: &[(&str, bool)],
    filters: &[(&str, &str)],
) -> String {
    let limit_clause = if limit > 0 {
        format!("LIMIT {limit}")
    } else {
        String::new()
    };

    let order_by_clause = if order_by.is_empty() {
        String::new()
    } else {
        let fields: Vec<String> = order_by
            .iter()
            .map(|(field, desc)| {
                if *desc {
                    format!("{field} DESC")
                } else {
                    field.to_string()
                }
            })
            .collect();
        format!("ORDER BY {}", fields.join(", "))
    };

    let where_clause = if filters.is_empty() {
        String::new()
    } else {
        let preds: Vec<String> = filters
            .iter()
            .map(|(field, value)| format!("{field} = '{}'", value.replace('\'', "''")))
            .collect();
        format!("WHERE {}", preds.join(" AND "))
    };

    format!("SHOW PARTITIONS FROM {table_name}\n{where_clause}\n{order_by_clause}\n{limit_clause}\n")
}

/// Query returning the latest value of `partition_column`.
pub fn latest_partition_query(table_name: &str, partition_column: &str) -> String {
    partition_query(table_name, 1, &[(partition_column, true)], &[])
}
