use thiserror::Error;

/// Errors raised by the strict parsers, configuration loading and the JSON API.
///
/// The layout path itself never fails: malformed positional metadata degrades
/// to a default placement instead of surfacing here.
#[derive(Error, Debug)]
pub enum LayoutError {
    #[error("Invalid grid token: {token:?}")]
    InvalidGrid { token: String },

    #[error("Invalid formation: {0:?}")]
    InvalidFormation(String),

    #[error("Invalid layout config: {0}")]
    InvalidConfig(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl LayoutError {
    /// Input problems the caller can fix by resubmitting different data.
    pub fn is_input_error(&self) -> bool {
        match self {
            LayoutError::InvalidGrid { .. } => true,
            LayoutError::InvalidFormation(_) => true,
            LayoutError::InvalidConfig(_) => true,
            LayoutError::Deserialization(_) => true,
            LayoutError::Yaml(_) => true,
            LayoutError::Serialization(_) => false,
        }
    }
}

impl From<serde_json::Error> for LayoutError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_data() || err.is_syntax() || err.is_eof() {
            LayoutError::Deserialization(err.to_string())
        } else {
            LayoutError::Serialization(err.to_string())
        }
    }
}

pub type Result<T> = std::result::Result<T, LayoutError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_syntax_error_maps_to_deserialization() {
        let err: LayoutError = serde_json::from_str::<serde_json::Value>("{not json")
            .expect_err("malformed json")
            .into();
        assert!(matches!(err, LayoutError::Deserialization(_)));
        assert!(err.is_input_error());
    }

    #[test]
    fn test_display_messages() {
        let err = LayoutError::InvalidGrid { token: "x:1".to_string() };
        assert_eq!(err.to_string(), "Invalid grid token: \"x:1\"");

        let err = LayoutError::InvalidFormation("4--4".to_string());
        assert_eq!(err.to_string(), "Invalid formation: \"4--4\"");
    }
}
