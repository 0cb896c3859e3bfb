//! Compilation errors.

use toolbridge_core::TypeId;

/// Error compiling a custom type into a schema.
///
/// All variants are terminal: the stored graph will not change without an
/// explicit edit, so retrying cannot help.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CompileError {
    /// Referenced custom type does not exist
    #[error("custom type not found: {id}")]
    TypeNotFound {
        /// Missing type
        id: TypeId,
    },

    /// A `custom` field or parameter has no reference
    #[error("custom type field ref is required: {field}")]
    MissingReference {
        /// Field or parameter name
        field: String,
    },

    /// Reference chain nests deeper than the bound, cyclic or not
    #[error("maximum recursion depth exceeded (limit {limit})")]
    RecursionLimitExceeded {
        /// Bound that tripped
        limit: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CompileError::TypeNotFound { id: TypeId::new(9) };
        assert_eq!(err.to_string(), "custom type not found: type_9");

        let err = CompileError::MissingReference {
            field: "owner".to_string(),
        };
        assert_eq!(err.to_string(), "custom type field ref is required: owner");

        let err = CompileError::RecursionLimitExceeded { limit: 10 };
        assert_eq!(err.to_string(), "maximum recursion depth exceeded (limit 10)");
    }
}
