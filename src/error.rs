//! Error types
//!
//! Only caller mistakes end up here. Dying, drowning and bumping into rock
//! are ordinary game outcomes and never surface as errors.

/// Contract violations by the host or by misconfigured settings.
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    /// Settings failed validation.
    #[error("invalid settings: {0}")]
    InvalidSettings(String),

    /// Settings document could not be parsed.
    #[error("config parse error: {0}")]
    Config(#[from] serde_json::Error),

    /// Tile query outside the field.
    #[error("column {column} out of range for field width {width}")]
    ColumnOutOfRange { column: i32, width: i32 },

    /// Row does not have one tile per column.
    #[error("row {row} has {got} tiles, field width is {expected}")]
    RowWidthMismatch { row: i32, expected: i32, got: usize },

    /// A live row was generated a second time.
    #[error("row {0} already generated")]
    RowAlreadyGenerated(i32),
}
