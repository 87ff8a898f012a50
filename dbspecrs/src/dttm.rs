//! Datetime literals and time column formats.

use chrono::{NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

/// How a dialect spells a datetime literal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DttmStyle {
    /// `'YYYY-MM-DD HH:MM:SS'`
    #[default]
    Quoted,
    Sqlite,
    Mysql,
    Presto,
    Mssql,
}

impl DttmStyle {
    /// Render `dttm` as a literal for a column of `target_type`.
    pub fn convert(&self, target_type: &str, dttm: &NaiveDateTime) -> String {
        match self {
            DttmStyle::Quoted => quoted(dttm),
            DttmStyle::Sqlite => format!("'{}'", dttm.format("%Y-%m-%d %H:%M:%S%.6f")),
            DttmStyle::Mysql => {
                let tt = target_type.to_ascii_uppercase();
                if tt == "DATETIME" || tt == "DATE" {
                    format!(
                        "STR_TO_DATE('{}', '%Y-%m-%d %H:%i:%s')",
                        dttm.format("%Y-%m-%d %H:%M:%S")
                    )
                } else {
                    quoted(dttm)
                }
            }
            DttmStyle::Presto => match target_type.to_ascii_uppercase().as_str() {
                "DATE" => format!("from_iso8601_date('{}')", dttm.format("%Y-%m-%d")),
                "TIMESTAMP" => format!("from_iso8601_timestamp('{}')", isoformat(dttm)),
                _ => quoted(dttm),
            },
            DttmStyle::Mssql => format!("CONVERT(DATETIME, '{}', 126)", isoformat(dttm)),
        }
    }
}

fn quoted(dttm: &NaiveDateTime) -> String {
    format!("'{}'", dttm.format("%Y-%m-%d %H:%M:%S"))
}

/// ISO 8601 with a `T` separator; microseconds only when non-zero.
pub fn isoformat(dttm: &NaiveDateTime) -> String {
    if dttm.nanosecond() / 1_000 == 0 {
        dttm.format("%Y-%m-%dT%H:%M:%S").to_string()
    } else {
        dttm.format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
    }
}

/// How result rows are limited for a dialect.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LimitMethod {
    #[default]
    FetchMany,
    WrapSql,
}

/// Storage format of a time column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeFormat {
    /// A native date/timestamp column.
    #[default]
    Datetime,
    /// Integer seconds since 1970-01-01.
    EpochSeconds,
    /// Integer milliseconds since 1970-01-01.
    EpochMillis,
}

impl TimeFormat {
    /// Map a column's date format string (`epoch_s`, `epoch_ms`, or a strftime
    /// pattern) to a format.
    pub fn from_column_format(format: Option<&str>) -> Self {
        match format {
            Some("epoch_s") => TimeFormat::EpochSeconds,
            Some("epoch_ms") => TimeFormat::EpochMillis,
            _ => TimeFormat::Datetime,
        }
    }

    /// Number of (milli)seconds since the epoch for epoch formats.
    pub fn epoch_literal(&self, dttm: &NaiveDateTime) -> Option<String> {
        let micros = dttm.and_utc().timestamp_micros() as f64;
        match self {
            TimeFormat::Datetime => None,
            TimeFormat::EpochSeconds => Some(format!("{:?}", micros / 1_000_000.0)),
            TimeFormat::EpochMillis => Some(format!("{:?}", micros / 1_000.0)),
        }
    }
}
