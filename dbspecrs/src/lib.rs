pub mod config;
pub mod dialect;
pub mod dttm;
pub mod engine;
pub mod error;
pub mod grain;
pub mod labels;
pub mod metadata;
pub mod registry;
pub mod template;

use crate::error::Result;

/// Look up a builtin engine by dialect id.
pub fn engine(dialect_id: &str) -> Result<&'static EngineDescriptor> {
    EngineRegistry::builtin().get(dialect_id)
}

pub use config::DbSpecConfig;
pub use dttm::{DttmStyle, LimitMethod, TimeFormat};
pub use engine::{EngineDescriptor, EngineSpec};
pub use error::DbSpecError;
pub use grain::{Grain, GrainSpec};
pub use labels::{IdentityTranslator, LabelCatalog, LabelTranslator};
pub use metadata::{TableMetadataProvider, TableRef};
pub use registry::EngineRegistry;
pub use template::Template;
