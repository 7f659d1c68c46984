//! Identity of the school issuing student credentials.

use std::env;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InstitutionConfig {
    /// Display name, e.g. `"CETIS 27"`
    pub name: String,
    /// Prefix of generated QR codes, e.g. `"CETIS27"`
    pub code: String,
}

impl Default for InstitutionConfig {
    fn default() -> Self {
        Self {
            name: "CETIS 27".to_string(),
            code: "CETIS27".to_string(),
        }
    }
}

impl InstitutionConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            name: env::var("INSTITUTION_NAME")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .unwrap_or(defaults.name),
            code: env::var("INSTITUTION_CODE")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .unwrap_or(defaults.code),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_identity() {
        let config = InstitutionConfig::default();
        assert_eq!(config.name, "CETIS 27");
        assert_eq!(config.code, "CETIS27");
    }
}
