//! Dialect-specific table metadata.
//!
//! The core never inspects a database. Callers describe the table they already
//! know about with a [`TableRef`]; providers turn that into extra, opaque keys.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Caller-supplied description of a table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct TableRef {
    pub name: String,
    #[serde(default)]
    pub schema: Option<String>,
    /// Partition key columns in declaration order.
    #[serde(default)]
    pub partition_columns: Vec<String>,
    /// Latest value of the first partition column, when the caller looked it up.
    #[serde(default)]
    pub latest_partition: Option<String>,
}

impl TableRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    pub fn with_partitions<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.partition_columns = columns.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_latest_partition(mut self, value: impl Into<String>) -> Self {
        self.latest_partition = Some(value.into());
        self
    }

    /// `schema.name` when a schema is set and the name is not already qualified.
    pub fn full_name(&self) -> String {
        match &self.schema {
            Some(schema) if !self.name.contains('.') => format!("{schema}.{}", self.name),
            _ => self.name.clone(),
        }
    }
}

/// Produces extra metadata for a table. Must return a fresh map on every call.
pub trait TableMetadataProvider: Send + Sync + fmt::Debug {
    fn extra_table_metadata(&self, table: &TableRef) -> Map<String, Value>;
}

/// Default provider: no extra metadata.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoTableMetadata;

impl TableMetadataProvider for NoTableMetadata {
    fn extra_table_metadata(&self, _table: &TableRef) -> Map<String, Value> {
        Map::new()
    }
}
