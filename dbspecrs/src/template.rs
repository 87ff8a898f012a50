//! Column-substitution templates.
//!
//! A template is a SQL fragment holding one or more `{col}` tokens. Rendering
//! is plain textual replacement: no quoting, no parsing, and the substituted
//! text is never scanned again, so other brace sequences stay literal.

use std::fmt;

use serde::Serialize;

use crate::error::{DbSpecError, Result};

/// The placeholder token replaced by the column expression.
pub const COL: &str = "{col}";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Template(String);

impl Template {
    /// Validate and wrap a template. `context` names the declaration in errors.
    pub fn new(context: impl Into<String>, sql: impl Into<String>) -> Result<Self> {
        let sql = sql.into();
        if !sql.contains(COL) {
            return Err(DbSpecError::BadTemplate {
                context: context.into(),
                template: sql,
            });
        }
        Ok(Self(sql))
    }

    pub fn render(&self, column_expression: &str) -> String {
        self.0.replace(COL, column_expression)
    }

    /// Rewrite the template so the column is divided by 1000 before use.
    pub fn millis(&self) -> Template {
        Template(self.0.replace(COL, "({col}/1000.0)"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_template_without_placeholder() {
        let err = Template::new("test", "DATE(ts)").unwrap_err();
        assert!(matches!(err, DbSpecError::BadTemplate { .. }));
    }

    #[test]
    fn replaces_every_occurrence() {
        let t = Template::new("test", "DATE({col}, -strftime('%w', {col}))").unwrap();
        assert_eq!(t.render("dt"), "DATE(dt, -strftime('%w', dt))");
    }

    #[test]
    fn substituted_text_is_not_rescanned() {
        let t = Template::new("test", "f({col})").unwrap();
        assert_eq!(t.render("g({col})"), "f(g({col}))");
        assert_eq!(t.render("{col}"), "f({col})");
    }

    #[test]
    fn other_braces_stay_literal() {
        let t = Template::new("test", "x{0} {col} {}").unwrap();
        assert_eq!(t.render("c"), "x{0} c {}");
    }

    #[test]
    fn millis_wraps_column() {
        let t = Template::new("test", "from_unixtime({col})").unwrap();
        assert_eq!(t.millis().as_str(), "from_unixtime(({col}/1000.0))");
        assert_eq!(t.millis().render("ms"), "from_unixtime((ms/1000.0))");
    }
}
