use std::path::PathBuf;

/// Errors that can occur when creating a board.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("invalid board dimensions {rows}x{cols} (each must be in 1..=64)")]
    InvalidDimensions { rows: usize, cols: usize },

    #[error("evaluator '{name}' cannot score a {rows}x{cols} board")]
    UnsupportedEvaluator {
        name: String,
        rows: usize,
        cols: usize,
    },
}

/// Errors that can occur when loading a probability table.
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    #[error("failed to read probability table {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse probability table: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("probability table has {actual} weights, expected {expected} for a {rows}x{cols} board")]
    ShapeMismatch {
        rows: usize,
        cols: usize,
        expected: usize,
        actual: usize,
    },

    #[error("probability table is {table_rows}x{table_cols}, board is {rows}x{cols}")]
    DimensionMismatch {
        table_rows: usize,
        table_cols: usize,
        rows: usize,
        cols: usize,
    },

    #[error("probability table weight at index {0} is not finite")]
    NonFinite(usize),
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_error_display() {
        let err = BoardError::InvalidDimensions { rows: 0, cols: 7 };
        assert_eq!(
            err.to_string(),
            "invalid board dimensions 0x7 (each must be in 1..=64)"
        );
    }

    #[test]
    fn test_table_error_display() {
        let err = TableError::ShapeMismatch {
            rows: 6,
            cols: 7,
            expected: 42,
            actual: 9,
        };
        assert_eq!(
            err.to_string(),
            "probability table has 9 weights, expected 42 for a 6x7 board"
        );
    }

    #[test]
    fn test_dimension_mismatch_display() {
        let err = TableError::DimensionMismatch {
            table_rows: 7,
            table_cols: 6,
            rows: 6,
            cols: 7,
        };
        assert_eq!(err.to_string(), "probability table is 7x6, board is 6x7");
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::Validation("search.depth must be >= 1".to_string());
        assert_eq!(
            err.to_string(),
            "config validation error: search.depth must be >= 1"
        );
    }
}
