//! Generation configuration
//!
//! A [`Config`] is an immutable snapshot validated once, before any
//! enumeration begins. The active enumeration mode is an explicit tagged
//! union rather than a precedence dance between optional fields; the old
//! pattern-over-fields-over-charset precedence survives only in
//! [`GenerationMode::from_parts`], used at the CLI boundary where the three
//! inputs are still independent flags.

use serde::{Deserialize, Serialize};

use crate::error::{ForgeError, Result};

/// Which candidate enumerator drives the run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum GenerationMode {
    /// All strings over a charset, for each length in the configured range
    Charset {
        /// Named charset, custom charset string, or None for lowercase
        #[serde(default)]
        charset: Option<String>,
        /// Enumerate permutations without repetition instead of the product
        #[serde(default)]
        permutations_only: bool,
    },
    /// Crunch-style placeholder pattern at the pattern's fixed length
    Pattern {
        pattern: String,
        /// Characters excluded from placeholder expansion
        #[serde(default)]
        literal_chars: Option<String>,
    },
    /// Cartesian product of named field example lists
    Fields {
        enabled: Vec<String>,
        /// Joiner between field values; direct concatenation if None
        #[serde(default)]
        separator: Option<String>,
    },
}

impl Default for GenerationMode {
    fn default() -> Self {
        Self::Charset {
            charset: None,
            permutations_only: false,
        }
    }
}

impl GenerationMode {
    /// Build a mode from independent optional inputs, applying the
    /// pattern > fields > charset precedence.
    pub fn from_parts(
        charset: Option<String>,
        pattern: Option<String>,
        literal_chars: Option<String>,
        fields: Vec<String>,
        separator: Option<String>,
        permutations_only: bool,
    ) -> Self {
        if let Some(pattern) = pattern {
            Self::Pattern {
                pattern,
                literal_chars,
            }
        } else if !fields.is_empty() {
            Self::Fields {
                enabled: fields,
                separator,
            }
        } else {
            Self::Charset {
                charset,
                permutations_only,
            }
        }
    }
}

/// Filter thresholds for the acceptance pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    pub min_len: usize,
    pub max_len: usize,
    /// Every character of an accepted token must be in this set, if set
    pub charset_filter: Option<String>,
    pub min_entropy: f64,
    pub max_entropy: f64,
    /// Regex the token must (or must not) match somewhere
    pub regex: Option<String>,
    /// Polarity for the regex filter: true = must match
    pub regex_must_match: bool,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            min_len: 1,
            max_len: 100,
            charset_filter: None,
            min_entropy: 0.0,
            max_entropy: 100.0,
            regex: None,
            regex_must_match: true,
        }
    }
}

/// Main configuration for one generation run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub min_length: usize,
    pub max_length: usize,

    pub mode: GenerationMode,

    pub prefix: Option<String>,
    pub suffix: Option<String>,

    /// Transform chain, applied left to right
    pub transforms: Vec<String>,

    pub filters: FilterConfig,

    /// Suppress repeat emissions within the run. The dedupe set grows
    /// unboundedly with run length; for unlimited runs this is a
    /// caller-managed memory tradeoff.
    pub dedupe: bool,

    /// Reject tokens ordering lexicographically before this string
    pub start_string: Option<String>,
    /// Reject tokens ordering lexicographically after this string
    pub end_string: Option<String>,

    /// Emission cap; generation stops entirely once reached
    pub max_lines: Option<u64>,

    /// Seed for the randomized transforms; omit for a per-run seed
    pub seed: Option<u64>,

    /// Advertised worker count. The engine itself is sequential; this only
    /// informs collaborators.
    pub workers: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            min_length: 1,
            max_length: 10,
            mode: GenerationMode::default(),
            prefix: None,
            suffix: None,
            transforms: Vec::new(),
            filters: FilterConfig::default(),
            dedupe: false,
            start_string: None,
            end_string: None,
            max_lines: None,
            seed: None,
            workers: 1,
        }
    }
}

impl Config {
    /// Fail-fast validation of configuration shape.
    ///
    /// Mode-level problems (empty pattern, empty field list) are checked at
    /// engine construction instead, surfacing as generation errors.
    pub fn validate(&self) -> Result<()> {
        if self.min_length < 1 {
            return Err(ForgeError::Config("min_length must be at least 1".into()));
        }
        if self.max_length < self.min_length {
            return Err(ForgeError::Config(format!(
                "max_length ({}) must be >= min_length ({})",
                self.max_length, self.min_length
            )));
        }
        if self.workers < 1 {
            return Err(ForgeError::Config("workers must be at least 1".into()));
        }
        if self.filters.max_len < self.filters.min_len {
            return Err(ForgeError::Config(format!(
                "filter max_len ({}) must be >= min_len ({})",
                self.filters.max_len, self.filters.min_len
            )));
        }
        if self.filters.min_entropy < 0.0 {
            return Err(ForgeError::Config("min_entropy must be >= 0".into()));
        }
        if self.filters.max_entropy < self.filters.min_entropy {
            return Err(ForgeError::Config(format!(
                "max_entropy ({}) must be >= min_entropy ({})",
                self.filters.max_entropy, self.filters.min_entropy
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_invalid_length_bounds() {
        let config = Config {
            min_length: 5,
            max_length: 3,
            ..Config::default()
        };
        assert!(matches!(config.validate(), Err(ForgeError::Config(_))));

        let config = Config {
            min_length: 0,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_entropy_bounds() {
        let mut config = Config::default();
        config.filters.min_entropy = 5.0;
        config.filters.max_entropy = 2.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_mode_precedence() {
        // Pattern wins over fields and charset
        let mode = GenerationMode::from_parts(
            Some("abc".into()),
            Some("%%".into()),
            None,
            vec!["dev_handles".into()],
            None,
            false,
        );
        assert!(matches!(mode, GenerationMode::Pattern { .. }));

        // Fields win over charset
        let mode = GenerationMode::from_parts(
            Some("abc".into()),
            None,
            None,
            vec!["dev_handles".into()],
            None,
            false,
        );
        assert!(matches!(mode, GenerationMode::Fields { .. }));

        // Charset is the default
        let mode = GenerationMode::from_parts(None, None, None, vec![], None, false);
        assert!(matches!(mode, GenerationMode::Charset { charset: None, .. }));
    }

    #[test]
    fn test_config_json_roundtrip() {
        let config = Config {
            min_length: 4,
            max_length: 8,
            mode: GenerationMode::Pattern {
                pattern: "pass%%".into(),
                literal_chars: None,
            },
            transforms: vec!["leet_basic".into()],
            dedupe: true,
            ..Config::default()
        };

        let json = serde_json::to_string(&config).unwrap();
        let back: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(back.mode, config.mode);
        assert_eq!(back.transforms, config.transforms);
        assert!(back.dedupe);
    }
}
