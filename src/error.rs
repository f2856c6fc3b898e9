use thiserror::Error;

/// Validation failures surfaced to callers before any sampling happens.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TessellationError {
    #[error("Dimension must be 2 or 3, got {0}")]
    InvalidDimension(usize),

    #[error("Direction matrix row {row} has {found} columns, expected {expected}")]
    DirectionColumnMismatch {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("Direction matrix row {row} contains a non-finite entry")]
    NonFiniteDirection { row: usize },

    #[error("Direction matrix has no rows with positive weight")]
    NoPositiveDirections,

    #[error("Sampling parameter must be a positive finite number, got {0}")]
    InvalidParameter(f64),

    #[error("Invalid domain: {0}")]
    InvalidDomain(String),

    #[error("Unknown process kind: {0}")]
    UnknownProcess(String),
}

/// Failures of the geometry kernel.
///
/// These never leave the engine: a split that fails is treated exactly like
/// a split that produced fewer than two parts, and the cell is kept whole.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GeometryError {
    #[error("Hyperplane normal has zero length")]
    DegenerateNormal,

    #[error("Non-finite coordinate in split input")]
    NonFiniteInput,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_dimension_display() {
        let e = TessellationError::InvalidDimension(4);
        assert_eq!(e.to_string(), "Dimension must be 2 or 3, got 4");
    }

    #[test]
    fn column_mismatch_display() {
        let e = TessellationError::DirectionColumnMismatch {
            row: 1,
            expected: 3,
            found: 2,
        };
        assert_eq!(
            e.to_string(),
            "Direction matrix row 1 has 2 columns, expected 3"
        );
    }

    #[test]
    fn invalid_parameter_display() {
        let e = TessellationError::InvalidParameter(-1.5);
        assert!(e.to_string().contains("-1.5"));
    }

    #[test]
    fn unknown_process_display() {
        let e = TessellationError::UnknownProcess("voronoi".to_string());
        assert_eq!(e.to_string(), "Unknown process kind: voronoi");
    }

    #[test]
    fn geometry_error_display() {
        assert_eq!(
            GeometryError::DegenerateNormal.to_string(),
            "Hyperplane normal has zero length"
        );
    }

    #[test]
    fn error_equality() {
        assert_eq!(
            TessellationError::NoPositiveDirections,
            TessellationError::NoPositiveDirections
        );
        assert_ne!(
            TessellationError::NoPositiveDirections,
            TessellationError::InvalidDimension(1)
        );
    }
}
