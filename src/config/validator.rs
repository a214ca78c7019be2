use thiserror::Error;

use crate::config::{GeneratorSettings, Settings};

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

pub struct ConfigValidator;

impl ConfigValidator {
    /// Collects every problem instead of stopping at the first.
    pub fn validate(settings: &Settings) -> Result<(), Vec<ConfigError>> {
        let mut errors = Vec::new();

        if let Err(e) = Self::validate_generator(&settings.generator) {
            errors.extend(e);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn validate_generator(generator: &GeneratorSettings) -> Result<(), Vec<ConfigError>> {
        let mut errors = Vec::new();

        if generator.default_string_length == 0 {
            errors.push(ConfigError::InvalidValue {
                field: "generator.default_string_length".to_string(),
                reason: "Length must be greater than 0".to_string(),
            });
        }

        if generator.integer_span <= 0 {
            errors.push(ConfigError::InvalidValue {
                field: "generator.integer_span".to_string(),
                reason: "Span must be greater than 0".to_string(),
            });
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(ConfigValidator::validate(&Settings::default()).is_ok());
    }

    #[test]
    fn test_all_generator_errors_reported() {
        let mut settings = Settings::default();
        settings.generator.default_string_length = 0;
        settings.generator.integer_span = -5;

        let errors = ConfigValidator::validate(&settings).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors[0].to_string().contains("generator.default_string_length"));
        assert!(errors[1].to_string().contains("generator.integer_span"));
    }
}
