use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("duplicate column '{column}' in observation table")]
    DuplicateColumn { column: String },

    #[error("column '{column}' has {found} values, expected {expected}")]
    ColumnLength {
        column: String,
        expected: usize,
        found: usize,
    },

    #[error("column '{column}' not found in observation table")]
    MissingColumn { column: String },
}

pub type Result<T> = std::result::Result<T, ModelError>;
