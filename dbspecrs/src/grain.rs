//! Time grains: named rules truncating a time column to a resolution.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::labels::LabelTranslator;
use crate::template::Template;

/// A validated time grain. Lookups go by `name`; `label` is display text only.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Grain {
    pub name: String,
    pub label: String,
    pub template: Template,
}

impl Grain {
    pub fn new(
        name: impl Into<String>,
        label: impl Into<String>,
        template: impl Into<String>,
    ) -> Result<Self> {
        let name = name.into();
        let template = Template::new(format!("grain {name}"), template)?;
        Ok(Self {
            name,
            label: label.into(),
            template,
        })
    }

    /// Substitute `column_expression` for every `{col}` in the template.
    pub fn render(&self, column_expression: &str) -> String {
        self.template.render(column_expression)
    }

    pub fn localized_label<'a>(&'a self, translator: &'a dyn LabelTranslator) -> Cow<'a, str> {
        translator.translate(&self.label)
    }
}

/// Unvalidated grain declaration, as written in code or config.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct GrainSpec {
    pub name: String,
    /// Defaults to `name` when omitted.
    #[serde(default)]
    pub label: Option<String>,
    pub template: String,
}

impl GrainSpec {
    /// Declare a grain whose label is its name.
    pub fn new(name: &str, template: &str) -> Self {
        Self {
            name: name.to_string(),
            label: None,
            template: template.to_string(),
        }
    }

    pub fn build(&self) -> Result<Grain> {
        let label = self.label.clone().unwrap_or_else(|| self.name.clone());
        Grain::new(self.name.clone(), label, self.template.clone())
    }
}
