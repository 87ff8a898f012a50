//! Builtin dialect declarations.
//!
//! Each dialect lives in its own file and exposes a `spec()` returning its
//! [`EngineSpec`]. [`builtin_specs`] is the complete declaration set the
//! builtin registry is built from.

use crate::engine::EngineSpec;
use crate::grain::GrainSpec;

mod mssql;
mod mysql;
mod postgres;
pub mod presto;
mod redshift;
mod sqlite;
mod vertica;

pub use presto::PrestoPartitions;

/// Identity grain present in every builtin dialect.
pub(crate) fn time_column() -> GrainSpec {
    GrainSpec::new("Time Column", "{col}")
}

pub fn builtin_specs() -> Vec<EngineSpec> {
    vec![
        postgres::spec(),
        sqlite::spec(),
        mysql::spec(),
        presto::spec(),
        mssql::spec(),
        redshift::spec(),
        vertica::spec(),
    ]
}
