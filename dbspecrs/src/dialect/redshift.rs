//! Amazon Redshift: PostgreSQL templates unchanged.

use crate::engine::EngineSpec;

pub fn spec() -> EngineSpec {
    EngineSpec::new("redshift").inherits("postgres")
}
