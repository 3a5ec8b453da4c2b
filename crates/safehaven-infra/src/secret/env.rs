//! Environment variable credential source.
//!
//! Read-only: the value is looked up on every `resolve()` call, so exporting
//! the variable mid-session takes effect on the next turn.

use secrecy::SecretString;

use safehaven_core::chat::CredentialSource;

/// Reads the model API key from an environment variable.
pub struct EnvCredential {
    var: String,
}

impl EnvCredential {
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

impl CredentialSource for EnvCredential {
    fn name(&self) -> &str {
        &self.var
    }

    fn resolve(&self) -> Option<SecretString> {
        match std::env::var(&self.var) {
            Ok(val) if !val.trim().is_empty() => Some(SecretString::from(val)),
            Ok(_) => None,
            Err(std::env::VarError::NotPresent) => None,
            // Present but not valid Unicode; unusable as a bearer token.
            Err(std::env::VarError::NotUnicode(_)) => {
                tracing::warn!(var = %self.var, "Credential variable is not valid Unicode");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use secrecy::ExposeSecret;

    use super::*;

    #[test]
    fn test_missing_var_resolves_to_none() {
        let source = EnvCredential::new("SAFEHAVEN_TEST_CREDENTIAL_THAT_IS_NEVER_SET");
        assert!(source.resolve().is_none());
        assert_eq!(source.name(), "SAFEHAVEN_TEST_CREDENTIAL_THAT_IS_NEVER_SET");
    }

    #[test]
    fn test_present_var_resolves() {
        // PATH is set in every test environment and never blank.
        let source = EnvCredential::new("PATH");
        let value = source.resolve().unwrap();
        assert!(!value.expose_secret().is_empty());
    }
}
