use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::fs;
use std::path::Path;

use glob::{glob, Pattern};
use once_cell::sync::Lazy;
use serde::Serialize;

use crate::config::DbSpecConfig;
use crate::dialect::builtin_specs;
use crate::dttm::{DttmStyle, LimitMethod};
use crate::engine::{EngineDescriptor, EngineSpec};
use crate::error::{DbSpecError, Result};
use crate::grain::Grain;

static BUILTIN: Lazy<EngineRegistry> = Lazy::new(|| {
    EngineRegistry::from_specs(builtin_specs())
        .unwrap_or_else(|e| panic!("invalid builtin engine declarations: {e}"))
});

/// Read-only map from dialect id to resolved engine descriptor.
#[derive(Debug, Clone, Default)]
pub struct EngineRegistry {
    engines: BTreeMap<String, EngineDescriptor>,
    aliases: HashMap<String, String>,
}

/// Serializable view of one engine.
#[derive(Debug, Clone, Serialize)]
pub struct EngineSummary<'a> {
    pub dialect_id: &'a str,
    pub inherits_from: Option<&'a str>,
    pub aliases: &'a [String],
    pub epoch_to_dttm: Option<&'a str>,
    pub epoch_ms_to_dttm: Option<String>,
    pub time_grains: &'a [Grain],
    pub dttm_style: DttmStyle,
    pub limit_method: LimitMethod,
    pub time_groupby_inline: bool,
}

impl EngineRegistry {
    /// The process-wide registry of builtin dialects.
    ///
    /// Panics on first use if a builtin declaration is invalid.
    pub fn builtin() -> &'static EngineRegistry {
        &BUILTIN
    }

    /// Validate `specs` and resolve inheritance.
    ///
    /// Parents may be declared after their children. Any invalid declaration
    /// fails the whole registry.
    pub fn from_specs(specs: Vec<EngineSpec>) -> Result<Self> {
        let mut by_id: HashMap<&str, &EngineSpec> = HashMap::new();
        for spec in &specs {
            if spec.dialect_id.trim().is_empty() {
                return Err(DbSpecError::EmptyDialectId);
            }
            if by_id.insert(spec.dialect_id.as_str(), spec).is_some() {
                return Err(DbSpecError::DuplicateDialect(spec.dialect_id.clone()));
            }
        }

        let mut aliases: HashMap<String, String> = HashMap::new();
        for spec in &specs {
            for alias in &spec.aliases {
                if by_id.contains_key(alias.as_str()) || aliases.contains_key(alias) {
                    return Err(DbSpecError::DuplicateDialect(alias.clone()));
                }
                aliases.insert(alias.clone(), spec.dialect_id.clone());
            }
        }

        let mut engines = BTreeMap::new();
        let mut visiting = HashSet::new();
        for spec in &specs {
            resolve_one(
                &spec.dialect_id,
                &by_id,
                &aliases,
                &mut engines,
                &mut visiting,
            )?;
        }

        tracing::debug!(
            engines = engines.len(),
            aliases = aliases.len(),
            "engine registry built"
        );
        Ok(Self { engines, aliases })
    }

    /// Builtin dialects plus `extra` declarations.
    pub fn with_specs(extra: Vec<EngineSpec>) -> Result<Self> {
        let mut specs = builtin_specs();
        specs.extend(extra);
        Self::from_specs(specs)
    }

    /// Builtin dialects plus the engines declared in `config`.
    pub fn from_config(config: &DbSpecConfig) -> Result<Self> {
        let mut extra = config.engines.clone();
        if let Some(dir) = &config.engine_dir {
            extra.extend(Self::load_specs_from_dir(dir)?);
        }
        Self::with_specs(extra)
    }

    /// Read every `*.yml` / `*.yaml` file in `dir` as one engine declaration.
    pub fn load_specs_from_dir<P: AsRef<Path>>(dir: P) -> Result<Vec<EngineSpec>> {
        let dir = dir.as_ref();
        if !dir.exists() {
            return Err(DbSpecError::Config(format!(
                "engine directory not found: {}",
                dir.display()
            )));
        }
        let base = Pattern::escape(&dir.to_string_lossy());
        let mut specs = Vec::new();
        for ext in ["yml", "yaml"] {
            let pattern = format!("{base}/*.{ext}");
            let paths = glob(&pattern).map_err(|e| DbSpecError::Config(e.to_string()))?;
            for path in paths.flatten() {
                let contents = fs::read_to_string(&path)?;
                let spec: EngineSpec = serde_yaml::from_str(&contents)?;
                tracing::info!(
                    path = %path.display(),
                    dialect = %spec.dialect_id,
                    "loaded engine declaration"
                );
                specs.push(spec);
            }
        }
        Ok(specs)
    }

    pub fn get(&self, dialect_id: &str) -> Result<&EngineDescriptor> {
        self.engines
            .get(dialect_id)
            .ok_or_else(|| DbSpecError::UnknownDialect(dialect_id.to_string()))
    }

    /// Look up by dialect id or alias.
    pub fn resolve(&self, name: &str) -> Result<&EngineDescriptor> {
        let id = self.aliases.get(name).map(String::as_str).unwrap_or(name);
        self.get(id)
            .map_err(|_| DbSpecError::UnknownDialect(name.to_string()))
    }

    /// Pick the engine for a database URI such as `postgresql+psycopg2://host/db`.
    ///
    /// The scheme is lowercased and any `+driver` suffix dropped before lookup.
    pub fn for_uri(&self, uri: &str) -> Result<&EngineDescriptor> {
        let scheme = uri.split_once("://").map_or(uri, |(scheme, _)| scheme);
        let backend = scheme
            .split_once('+')
            .map_or(scheme, |(backend, _)| backend)
            .to_ascii_lowercase();
        self.resolve(&backend)
            .map_err(|_| DbSpecError::UnknownDialect(uri.to_string()))
    }

    pub fn dialects(&self) -> BTreeSet<&str> {
        self.engines.keys().map(String::as_str).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &EngineDescriptor> {
        self.engines.values()
    }

    pub fn len(&self) -> usize {
        self.engines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.engines.is_empty()
    }

    pub fn summaries(&self) -> Vec<EngineSummary<'_>> {
        self.engines.values().map(summarize).collect()
    }

    pub fn summary(&self, dialect_id: &str) -> Result<EngineSummary<'_>> {
        self.get(dialect_id).map(summarize)
    }
}

fn summarize(engine: &EngineDescriptor) -> EngineSummary<'_> {
    EngineSummary {
        dialect_id: engine.dialect_id(),
        inherits_from: engine.parent(),
        aliases: engine.aliases(),
        epoch_to_dttm: engine.epoch_to_dttm().map(|t| t.as_str()),
        epoch_ms_to_dttm: engine.epoch_ms_to_dttm().map(|t| t.to_string()),
        time_grains: engine.grains(),
        dttm_style: engine.dttm_style(),
        limit_method: engine.limit_method(),
        time_groupby_inline: engine.time_groupby_inline(),
    }
}

/// Resolve `id` after its ancestors; `visiting` tracks the current chain.
///
/// A parent may be named by id or by alias.
fn resolve_one(
    id: &str,
    by_id: &HashMap<&str, &EngineSpec>,
    aliases: &HashMap<String, String>,
    engines: &mut BTreeMap<String, EngineDescriptor>,
    visiting: &mut HashSet<String>,
) -> Result<()> {
    if engines.contains_key(id) {
        return Ok(());
    }
    if !visiting.insert(id.to_string()) {
        return Err(DbSpecError::InheritanceCycle(id.to_string()));
    }
    let spec = by_id[id];

    let parent_id = match &spec.inherits_from {
        Some(parent) => {
            let parent_id = aliases
                .get(parent)
                .map(String::as_str)
                .unwrap_or(parent.as_str());
            if !by_id.contains_key(parent_id) {
                return Err(DbSpecError::UnknownParent {
                    dialect: id.to_string(),
                    parent: parent.clone(),
                });
            }
            resolve_one(parent_id, by_id, aliases, engines, visiting)?;
            Some(parent_id)
        }
        None => None,
    };

    let parent = parent_id.and_then(|p| engines.get(p));
    let descriptor = EngineDescriptor::resolve(spec, parent)?;
    tracing::debug!(
        dialect = %id,
        parent = ?parent_id,
        grains = descriptor.grains().len(),
        "registered engine"
    );

    visiting.remove(id);
    engines.insert(id.to_string(), descriptor);
    Ok(())
}
