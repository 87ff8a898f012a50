//! Vertica: PostgreSQL templates unchanged.

use crate::engine::EngineSpec;

pub fn spec() -> EngineSpec {
    EngineSpec::new("vertica").inherits("postgres")
}
