//! Structural validation of settings, run before the settings are first used.
use crate::error::*;
use crate::hawk::HawkSettings;
use crate::hmac_scheme::HmacSettings;

/// The outcome of validating a settings value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    Success,
    Failure(String),
}

impl ValidationResult {
    pub fn succeeded(&self) -> bool {
        *self == ValidationResult::Success
    }

    /// The description of why validation failed, if it did.
    pub fn failure_message(&self) -> Option<&str> {
        match self {
            ValidationResult::Success => None,
            ValidationResult::Failure(msg) => Some(msg),
        }
    }

    pub fn into_result(self) -> Result<()> {
        match self {
            ValidationResult::Success => Ok(()),
            ValidationResult::Failure(msg) => Err(Error::InvalidSettings(msg)),
        }
    }
}

/// Validates a config value of type `T`.
pub trait ConfigValidator<T> {
    fn validate(&self, config: &T) -> ValidationResult;
}

/// Collects every failing check rather than stopping at the first.
#[derive(Default)]
struct Checks(Vec<String>);

impl Checks {
    fn not_blank(mut self, field: &str, value: &str) -> Self {
        if value.trim().is_empty() {
            self.0.push(format!("{} must not be empty or whitespace.", field));
        }
        self
    }

    fn finish(self) -> ValidationResult {
        if self.0.is_empty() {
            ValidationResult::Success
        } else {
            ValidationResult::Failure(self.0.join(" "))
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct HawkConfigValidator;

impl ConfigValidator<HawkSettings> for HawkConfigValidator {
    fn validate(&self, settings: &HawkSettings) -> ValidationResult {
        Checks::default()
            .not_blank("auth_id", &settings.auth_id)
            .not_blank("auth_key", &settings.auth_key)
            .not_blank("hmac_algorithm", &settings.hmac_algorithm)
            .not_blank("hash_algorithm", &settings.hash_algorithm)
            .finish()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct HmacConfigValidator;

impl ConfigValidator<HmacSettings> for HmacConfigValidator {
    fn validate(&self, settings: &HmacSettings) -> ValidationResult {
        Checks::default()
            .not_blank("app_id", &settings.app_id)
            .not_blank("app_key", &settings.app_key)
            .not_blank("hmac_algorithm", &settings.hmac_algorithm)
            .not_blank("hash_algorithm", &settings.hash_algorithm)
            .finish()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn message(result: ValidationResult) -> String {
        assert!(!result.succeeded());
        result.failure_message().unwrap().to_string()
    }

    #[test]
    fn test_hawk_valid() {
        let settings = HawkSettings::new("id123", "3@uo45er?");
        assert_eq!(HawkConfigValidator.validate(&settings), ValidationResult::Success);
        assert!(HawkConfigValidator.validate(&settings).into_result().is_ok());
    }

    #[test]
    fn test_hawk_blank_fields() {
        let settings = HawkSettings::new(" ", "3@uo45er?");
        let msg = message(HawkConfigValidator.validate(&settings));
        assert!(msg.contains("auth_id"));
        assert!(!msg.contains("auth_key"));

        let settings = HawkSettings::new("id123", "");
        assert!(message(HawkConfigValidator.validate(&settings)).contains("auth_key"));

        let mut settings = HawkSettings::new("id123", "key");
        settings.hmac_algorithm = String::new();
        assert!(message(HawkConfigValidator.validate(&settings)).contains("hmac_algorithm"));

        let mut settings = HawkSettings::new("id123", "key");
        settings.hash_algorithm = "\t".to_string();
        assert!(message(HawkConfigValidator.validate(&settings)).contains("hash_algorithm"));
    }

    #[test]
    fn test_hawk_accumulates() {
        let mut settings = HawkSettings::new("", "");
        settings.hmac_algorithm = String::new();
        settings.hash_algorithm = String::new();
        let msg = message(HawkConfigValidator.validate(&settings));
        for field in &["auth_id", "auth_key", "hmac_algorithm", "hash_algorithm"] {
            assert!(msg.contains(field), "{} not reported in {:?}", field, msg);
        }
    }

    #[test]
    fn test_hmac_blank_fields() {
        assert!(HmacConfigValidator
            .validate(&HmacSettings::new("id123", "3@uo45er?"))
            .succeeded());

        let msg = message(HmacConfigValidator.validate(&HmacSettings::new("", "3@uo45er?")));
        assert!(msg.contains("app_id"));

        let msg = message(HmacConfigValidator.validate(&HmacSettings::new("id123", " ")));
        assert!(msg.contains("app_key"));

        let mut settings = HmacSettings::new("id123", "key");
        settings.hash_algorithm = String::new();
        let msg = message(HmacConfigValidator.validate(&settings));
        assert!(msg.contains("hash_algorithm"));
        assert!(!msg.contains("hmac_algorithm"));
    }

    #[test]
    fn test_into_result() {
        match ValidationResult::Failure("nope".to_string()).into_result() {
            Err(Error::InvalidSettings(msg)) => assert_eq!(msg, "nope"),
            _ => panic!("expected InvalidSettings"),
        }
    }
}
