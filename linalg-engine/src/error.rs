use displaydoc::Display;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Display)]
pub enum EngineError {
    /// invalid size: destination is fixed at {expected_rows}x{expected_columns}, source is {found_rows}x{found_columns}
    InvalidSize {
        expected_rows: usize,
        expected_columns: usize,
        found_rows: usize,
        found_columns: usize,
    },
    /// invalid data: shape requires {expected} elements, buffer holds {found}
    InvalidData { expected: usize, found: usize },
}

impl std::error::Error for EngineError {}

impl EngineError {
    /// Size mismatch between a fixed destination of shape `expected` and a source of shape `found`.
    pub fn invalid_size(expected: (usize, usize), found: (usize, usize)) -> Self {
        EngineError::InvalidSize {
            expected_rows: expected.0,
            expected_columns: expected.1,
            found_rows: found.0,
            found_columns: found.1,
        }
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = EngineError::invalid_size((1, 3), (1, 4));
        assert_eq!(
            err.to_string(),
            "invalid size: destination is fixed at 1x3, source is 1x4"
        );
        let err = EngineError::InvalidData {
            expected: 6,
            found: 5,
        };
        assert_eq!(
            err.to_string(),
            "invalid data: shape requires 6 elements, buffer holds 5"
        );
    }
}
