use thiserror::Error;

pub type Result<T> = std::result::Result<T, DbSpecError>;

#[derive(Debug, Error)]
pub enum DbSpecError {
    #[error("bad template for {context}: {template:?} has no {{col}} placeholder")]
    BadTemplate { context: String, template: String },
    #[error("unknown dialect {0}")]
    UnknownDialect(String),
    #[error("unknown time grain {grain} for dialect {dialect}")]
    UnknownGrain { dialect: String, grain: String },
    #[error("dialect {0} does not support epoch to datetime conversion")]
    UnsupportedConversion(String),
    #[error("engine declared with an empty dialect id")]
    EmptyDialectId,
    #[error("dialect {0} is declared more than once")]
    DuplicateDialect(String),
    #[error("time grain {grain} is declared more than once for dialect {dialect}")]
    DuplicateGrain { dialect: String, grain: String },
    #[error("dialect {dialect} inherits from undeclared dialect {parent}")]
    UnknownParent { dialect: String, parent: String },
    #[error("inheritance cycle through dialect {0}")]
    InheritanceCycle(String),
    #[error("config error: {0}")]
    Config(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("yaml parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
