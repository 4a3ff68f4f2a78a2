//! Token filtering and scoring
//!
//! A [`FilterPipeline`] is built once per run from a [`FilterConfig`]; every
//! predicate must pass for a token to be accepted. Regex patterns are
//! compiled at construction so a malformed pattern fails the run up front
//! instead of erroring per token.

use hashbrown::HashSet;
use regex::Regex;

use crate::config::FilterConfig;
use crate::error::{ForgeError, Result};

/// Shannon entropy over character frequencies, in bits.
/// Defined as 0.0 for the empty string.
pub fn shannon_entropy(token: &str) -> f64 {
    if token.is_empty() {
        return 0.0;
    }

    let mut freq: hashbrown::HashMap<char, usize> = hashbrown::HashMap::new();
    let mut length = 0usize;
    for ch in token.chars() {
        *freq.entry(ch).or_insert(0) += 1;
        length += 1;
    }

    let length = length as f64;
    freq.values()
        .map(|&count| {
            let p = count as f64 / length;
            -p * p.log2()
        })
        .sum()
}

/// Composite quality score in [0, 1]: 40% length, 30% character diversity,
/// 30% normalized entropy.
pub fn quality_score(token: &str) -> f64 {
    if token.is_empty() {
        return 0.0;
    }

    let length = token.chars().count();
    let length_score = if length < 4 {
        length as f64 / 4.0
    } else if length <= 16 {
        1.0
    } else {
        (1.0 - (length - 16) as f64 / 32.0).max(0.5)
    };

    let unique_chars = token.chars().collect::<HashSet<_>>().len();
    let diversity_score = (unique_chars as f64 / 10.0).min(1.0);

    let max_entropy = (unique_chars as f64).log2();
    let entropy_score = if max_entropy > 0.0 {
        shannon_entropy(token) / max_entropy
    } else {
        0.0
    };

    length_score * 0.4 + diversity_score * 0.3 + entropy_score * 0.3
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum CharKind {
    Vowel,
    Consonant,
    Other,
}

fn char_kind(ch: char) -> CharKind {
    if "aeiouAEIOU".contains(ch) {
        CharKind::Vowel
    } else if ch.is_ascii_alphabetic() {
        CharKind::Consonant
    } else {
        CharKind::Other
    }
}

/// Score how pronounceable a token looks, in [0, 1].
///
/// Long single-kind runs are penalized 0.2 per character past three;
/// otherwise the score follows the vowel ratio, with [0.3, 0.5] as the
/// full-score band.
pub fn pronounceability(token: &str) -> f64 {
    if token.is_empty() {
        return 0.0;
    }

    let mut max_run = 0usize;
    let mut run = 0usize;
    let mut prev = CharKind::Other;
    let mut vowels = 0usize;
    let mut consonants = 0usize;

    for ch in token.chars() {
        let kind = char_kind(ch);
        match kind {
            CharKind::Vowel => vowels += 1,
            CharKind::Consonant => consonants += 1,
            CharKind::Other => {}
        }

        if kind == prev && kind != CharKind::Other {
            run += 1;
            max_run = max_run.max(run);
        } else {
            run = 1;
        }
        prev = kind;
    }

    if max_run > 3 {
        return (1.0 - (max_run - 3) as f64 * 0.2).max(0.0);
    }

    let total = vowels + consonants;
    if total == 0 {
        return 0.0;
    }

    let ratio = vowels as f64 / total as f64;
    if (0.3..=0.5).contains(&ratio) {
        1.0
    } else if ratio < 0.3 {
        (ratio / 0.3).max(0.0)
    } else {
        (1.0 - (ratio - 0.5) / 0.5).max(0.0)
    }
}

/// Composable acceptance predicates, combined by logical AND
pub struct FilterPipeline {
    min_len: usize,
    max_len: usize,
    allowed_chars: Option<HashSet<char>>,
    entropy_bounds: Option<(f64, f64)>,
    regex: Option<(Regex, bool)>,
    min_quality: Option<f64>,
}

impl FilterPipeline {
    /// Build the pipeline. The entropy predicate only engages when the
    /// configured bounds are narrower than the defaults.
    pub fn new(config: &FilterConfig) -> Result<Self> {
        let allowed_chars = config
            .charset_filter
            .as_ref()
            .map(|cs| cs.chars().collect::<HashSet<_>>());

        let entropy_bounds = (config.min_entropy > 0.0 || config.max_entropy < 100.0)
            .then_some((config.min_entropy, config.max_entropy));

        let regex = match &config.regex {
            Some(pattern) => {
                let compiled = Regex::new(pattern).map_err(|source| ForgeError::FilterRegex {
                    pattern: pattern.clone(),
                    source,
                })?;
                Some((compiled, config.regex_must_match))
            }
            None => None,
        };

        Ok(Self {
            min_len: config.min_len,
            max_len: config.max_len,
            allowed_chars,
            entropy_bounds,
            regex,
            min_quality: None,
        })
    }

    /// Add the optional quality predicate; not part of the default pipeline.
    pub fn with_min_quality(mut self, min_quality: f64) -> Self {
        self.min_quality = Some(min_quality);
        self
    }

    /// True if the token passes every configured predicate
    pub fn accepts(&self, token: &str) -> bool {
        let length = token.chars().count();
        if length < self.min_len || length > self.max_len {
            return false;
        }

        if let Some(allowed) = &self.allowed_chars {
            if !token.chars().all(|c| allowed.contains(&c)) {
                return false;
            }
        }

        if let Some((min_entropy, max_entropy)) = self.entropy_bounds {
            let entropy = shannon_entropy(token);
            if entropy < min_entropy || entropy > max_entropy {
                return false;
            }
        }

        if let Some((regex, must_match)) = &self.regex {
            if regex.is_match(token) != *must_match {
                return false;
            }
        }

        if let Some(min_quality) = self.min_quality {
            if quality_score(token) < min_quality {
                return false;
            }
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entropy_boundaries() {
        assert_eq!(shannon_entropy(""), 0.0);
        assert_eq!(shannon_entropy("aaaa"), 0.0);
        // Two equiprobable symbols carry exactly one bit
        assert!((shannon_entropy("abab") - 1.0).abs() < 1e-9);
        assert!(shannon_entropy("abcd") > shannon_entropy("aabb"));
    }

    #[test]
    fn test_length_filter() {
        let config = FilterConfig {
            min_len: 3,
            max_len: 5,
            ..FilterConfig::default()
        };
        let pipeline = FilterPipeline::new(&config).unwrap();
        assert!(!pipeline.accepts("ab"));
        assert!(pipeline.accepts("abc"));
        assert!(pipeline.accepts("abcde"));
        assert!(!pipeline.accepts("abcdef"));
    }

    #[test]
    fn test_charset_whitelist() {
        let config = FilterConfig {
            charset_filter: Some("abc".to_string()),
            ..FilterConfig::default()
        };
        let pipeline = FilterPipeline::new(&config).unwrap();
        assert!(pipeline.accepts("abba"));
        assert!(!pipeline.accepts("abd"));
    }

    #[test]
    fn test_entropy_filter() {
        let config = FilterConfig {
            min_entropy: 1.5,
            ..FilterConfig::default()
        };
        let pipeline = FilterPipeline::new(&config).unwrap();
        assert!(!pipeline.accepts("aaaa"));
        assert!(pipeline.accepts("abcd"));
    }

    #[test]
    fn test_regex_filter_polarity() {
        let config = FilterConfig {
            regex: Some("[0-9]".to_string()),
            regex_must_match: true,
            ..FilterConfig::default()
        };
        let pipeline = FilterPipeline::new(&config).unwrap();
        assert!(pipeline.accepts("pass1"));
        assert!(!pipeline.accepts("pass"));

        let config = FilterConfig {
            regex: Some("[0-9]".to_string()),
            regex_must_match: false,
            ..FilterConfig::default()
        };
        let pipeline = FilterPipeline::new(&config).unwrap();
        assert!(!pipeline.accepts("pass1"));
        assert!(pipeline.accepts("pass"));
    }

    #[test]
    fn test_malformed_regex_fails_at_construction() {
        let config = FilterConfig {
            regex: Some("[unclosed".to_string()),
            ..FilterConfig::default()
        };
        assert!(matches!(
            FilterPipeline::new(&config),
            Err(ForgeError::FilterRegex { .. })
        ));
    }

    #[test]
    fn test_quality_score_components() {
        assert_eq!(quality_score(""), 0.0);
        // One distinct character: zero diversity-adjusted entropy
        let monotone = quality_score("aaaaaaaa");
        let diverse = quality_score("a8Xk2pQ!");
        assert!(diverse > monotone);
        assert!(diverse <= 1.0);
        // Short tokens are docked on length
        assert!(quality_score("ab") < quality_score("abcdefgh"));
    }

    #[test]
    fn test_quality_filter_opt_in() {
        let config = FilterConfig::default();
        let pipeline = FilterPipeline::new(&config).unwrap().with_min_quality(0.5);
        assert!(!pipeline.accepts("aa"));
        assert!(pipeline.accepts("diverse123"));
    }

    #[test]
    fn test_pronounceability() {
        assert_eq!(pronounceability(""), 0.0);
        assert_eq!(pronounceability("1234"), 0.0);
        // Balanced vowel ratio lands in the full-score band
        assert_eq!(pronounceability("banana"), 1.0);
        // Long consonant run gets the run penalty: 1 - 0.2 * (6 - 3)
        assert!((pronounceability("bcdfgh") - 0.4).abs() < 1e-9);
        // All vowels, short run: ratio 1.0 falls off linearly to zero
        assert_eq!(pronounceability("aa"), 0.0);
    }
}
