//! Label localization hook.
//!
//! Grain labels are opaque to the core. A host application that translates
//! them plugs in a [`LabelTranslator`]; lookups always use grain names.

use std::borrow::Cow;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

pub trait LabelTranslator: Send + Sync {
    fn translate<'a>(&'a self, label: &'a str) -> Cow<'a, str>;
}

/// Returns labels unchanged.
#[derive(Debug, Default, Clone, Copy)]
pub struct IdentityTranslator;

impl LabelTranslator for IdentityTranslator {
    fn translate<'a>(&'a self, label: &'a str) -> Cow<'a, str> {
        Cow::Borrowed(label)
    }
}

/// Static label → text table. Unknown labels pass through.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct LabelCatalog {
    entries: HashMap<String, String>,
}

impl LabelCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, label: impl Into<String>, text: impl Into<String>) {
        self.entries.insert(label.into(), text.into());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, String)> for LabelCatalog {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl LabelTranslator for LabelCatalog {
    fn translate<'a>(&'a self, label: &'a str) -> Cow<'a, str> {
        match self.entries.get(label) {
            Some(text) => Cow::Borrowed(text.as_str()),
            None => Cow::Borrowed(label),
        }
    }
}
