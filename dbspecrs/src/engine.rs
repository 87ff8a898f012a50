//! Engine declarations and resolved engine descriptors.
//!
//! An [`EngineSpec`] is what a dialect declares: every field except the id is
//! optional, and unset fields are taken from the `inherits_from` parent when
//! there is one. The registry turns specs into [`EngineDescriptor`]s, which are
//! validated and immutable.

use std::borrow::Cow;
use std::collections::HashSet;
use std::sync::Arc;

use chrono::NaiveDateTime;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::dttm::{DttmStyle, LimitMethod, TimeFormat};
use crate::error::{DbSpecError, Result};
use crate::grain::{Grain, GrainSpec};
use crate::metadata::{NoTableMetadata, TableMetadataProvider, TableRef};
use crate::template::Template;

static PERCENT: Lazy<Regex> = Lazy::new(|| Regex::new("%%|%").expect("valid percent regex"));

/// Declaration of one dialect.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct EngineSpec {
    pub dialect_id: String,
    /// Parent dialect, by id or alias.
    pub inherits_from: Option<String>,
    /// Extra lookup names (e.g. URI schemes). Not inherited.
    pub aliases: Vec<String>,
    pub epoch_to_dttm: Option<String>,
    /// Replaces the parent's grains wholesale when set.
    pub time_grains: Option<Vec<GrainSpec>>,
    pub dttm_style: Option<DttmStyle>,
    pub limit_method: Option<LimitMethod>,
    pub time_groupby_inline: Option<bool>,
    pub escape_percent: Option<bool>,
    #[serde(skip)]
    pub table_metadata: Option<Arc<dyn TableMetadataProvider>>,
}

impl EngineSpec {
    pub fn new(dialect_id: impl Into<String>) -> Self {
        Self {
            dialect_id: dialect_id.into(),
            ..Self::default()
        }
    }

    pub fn inherits(mut self, parent: impl Into<String>) -> Self {
        self.inherits_from = Some(parent.into());
        self
    }

    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    pub fn epoch_to_dttm(mut self, template: impl Into<String>) -> Self {
        self.epoch_to_dttm = Some(template.into());
        self
    }

    pub fn time_grains(mut self, grains: Vec<GrainSpec>) -> Self {
        self.time_grains = Some(grains);
        self
    }

    pub fn dttm_style(mut self, style: DttmStyle) -> Self {
        self.dttm_style = Some(style);
        self
    }

    pub fn limit_method(mut self, method: LimitMethod) -> Self {
        self.limit_method = Some(method);
        self
    }

    pub fn time_groupby_inline(mut self, inline: bool) -> Self {
        self.time_groupby_inline = Some(inline);
        self
    }

    pub fn escape_percent(mut self, escape: bool) -> Self {
        self.escape_percent = Some(escape);
        self
    }

    pub fn table_metadata(mut self, provider: Arc<dyn TableMetadataProvider>) -> Self {
        self.table_metadata = Some(provider);
        self
    }
}

/// A resolved dialect: inheritance applied, templates validated.
#[derive(Debug, Clone)]
pub struct EngineDescriptor {
    dialect_id: String,
    parent: Option<String>,
    aliases: Vec<String>,
    epoch_to_dttm: Option<Template>,
    time_grains: Vec<Grain>,
    dttm_style: DttmStyle,
    limit_method: LimitMethod,
    time_groupby_inline: bool,
    escape_percent: bool,
    table_metadata: Arc<dyn TableMetadataProvider>,
}

impl EngineDescriptor {
    /// Resolve `spec` against its already resolved parent.
    ///
    /// The caller is responsible for passing the descriptor named by
    /// `spec.inherits_from`.
    pub fn resolve(spec: &EngineSpec, parent: Option<&EngineDescriptor>) -> Result<Self> {
        let id = spec.dialect_id.as_str();
        if id.trim().is_empty() {
            return Err(DbSpecError::EmptyDialectId);
        }

        let epoch_to_dttm = match &spec.epoch_to_dttm {
            Some(sql) => Some(Template::new(format!("epoch_to_dttm of {id}"), sql.as_str())?),
            None => parent.and_then(|p| p.epoch_to_dttm.clone()),
        };

        let time_grains = match &spec.time_grains {
            Some(specs) => {
                let mut seen = HashSet::new();
                let mut grains = Vec::with_capacity(specs.len());
                for grain_spec in specs {
                    if !seen.insert(grain_spec.name.as_str()) {
                        return Err(DbSpecError::DuplicateGrain {
                            dialect: id.to_string(),
                            grain: grain_spec.name.clone(),
                        });
                    }
                    grains.push(grain_spec.build()?);
                }
                grains
            }
            None => parent.map(|p| p.time_grains.clone()).unwrap_or_default(),
        };

        let table_metadata = match (&spec.table_metadata, parent) {
            (Some(provider), _) => provider.clone(),
            (None, Some(p)) => p.table_metadata.clone(),
            (None, None) => Arc::new(NoTableMetadata),
        };

        Ok(Self {
            dialect_id: id.to_string(),
            parent: parent.map(|p| p.dialect_id.clone()),
            aliases: spec.aliases.clone(),
            epoch_to_dttm,
            time_grains,
            dttm_style: spec
                .dttm_style
                .or(parent.map(|p| p.dttm_style))
                .unwrap_or_default(),
            limit_method: spec
                .limit_method
                .or(parent.map(|p| p.limit_method))
                .unwrap_or_default(),
            time_groupby_inline: spec
                .time_groupby_inline
                .or(parent.map(|p| p.time_groupby_inline))
                .unwrap_or(false),
            escape_percent: spec
                .escape_percent
                .or(parent.map(|p| p.escape_percent))
                .unwrap_or(false),
            table_metadata,
        })
    }

    pub fn dialect_id(&self) -> &str {
        &self.dialect_id
    }

    /// Dialect this descriptor inherits from, if any.
    pub fn parent(&self) -> Option<&str> {
        self.parent.as_deref()
    }

    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    pub fn epoch_to_dttm(&self) -> Option<&Template> {
        self.epoch_to_dttm.as_ref()
    }

    /// Milliseconds variant of [`Self::epoch_to_dttm`], derived on each call.
    pub fn epoch_ms_to_dttm(&self) -> Option<Template> {
        self.epoch_to_dttm.as_ref().map(Template::millis)
    }

    pub fn epoch_seconds_sql(&self, column_expression: &str) -> Result<String> {
        self.epoch_to_dttm
            .as_ref()
            .map(|t| t.render(column_expression))
            .ok_or_else(|| DbSpecError::UnsupportedConversion(self.dialect_id.clone()))
    }

    pub fn epoch_millis_sql(&self, column_expression: &str) -> Result<String> {
        self.epoch_ms_to_dttm()
            .map(|t| t.render(column_expression))
            .ok_or_else(|| DbSpecError::UnsupportedConversion(self.dialect_id.clone()))
    }

    pub fn grain(&self, name: &str) -> Result<&Grain> {
        self.time_grains
            .iter()
            .find(|g| g.name == name)
            .ok_or_else(|| DbSpecError::UnknownGrain {
                dialect: self.dialect_id.clone(),
                grain: name.to_string(),
            })
    }

    /// Grains in presentation order.
    pub fn grains(&self) -> &[Grain] {
        &self.time_grains
    }

    pub fn grain_names(&self) -> impl Iterator<Item = &str> {
        self.time_grains.iter().map(|g| g.name.as_str())
    }

    pub fn extra_table_metadata(&self, table: &TableRef) -> Map<String, Value> {
        self.table_metadata.extra_table_metadata(table)
    }

    pub fn dttm_style(&self) -> DttmStyle {
        self.dttm_style
    }

    pub fn convert_dttm(&self, target_type: &str, dttm: &NaiveDateTime) -> String {
        self.dttm_style.convert(target_type, dttm)
    }

    pub fn limit_method(&self) -> LimitMethod {
        self.limit_method
    }

    pub fn time_groupby_inline(&self) -> bool {
        self.time_groupby_inline
    }

    /// Double every `%` for drivers using pyformat-style parameters.
    pub fn escape_sql<'a>(&self, sql: &'a str) -> Cow<'a, str> {
        if self.escape_percent {
            PERCENT.replace_all(sql, "%%")
        } else {
            Cow::Borrowed(sql)
        }
    }

    /// Datetime expression for a time column: epoch conversion first, then the
    /// optional grain.
    pub fn time_expression(
        &self,
        column_expression: &str,
        format: TimeFormat,
        grain: Option<&str>,
    ) -> Result<String> {
        let dttm = match format {
            TimeFormat::Datetime => column_expression.to_string(),
            TimeFormat::EpochSeconds => self.epoch_seconds_sql(column_expression)?,
            TimeFormat::EpochMillis => self.epoch_millis_sql(column_expression)?,
        };
        match grain {
            Some(name) => Ok(self.grain(name)?.render(&dttm)),
            None => Ok(dttm),
        }
    }

    /// Literal comparable against a time column stored in `format`.
    pub fn dttm_sql_literal(
        &self,
        dttm: &NaiveDateTime,
        format: TimeFormat,
        target_type: &str,
    ) -> String {
        format
            .epoch_literal(dttm)
            .unwrap_or_else(|| self.convert_dttm(target_type, dttm))
    }
}
