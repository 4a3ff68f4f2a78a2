//! Core generation engine
//!
//! Turns a validated [`Config`] into a single lazy sequence of accepted
//! tokens. Enumeration never materializes the candidate space: every mode
//! walks an explicit index cursor in constant memory, so a `10^18`-candidate
//! charset run costs the same per step as a toy one. The consumer stops a
//! run by ceasing to pull; the emission cap is the only intrinsic stop.

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::charset::{dedup_chars, get_charset, is_named_charset, pattern_positions, CHARSET_LOWERCASE};
use crate::config::{Config, GenerationMode};
use crate::dedup::DedupSet;
use crate::error::{ForgeError, Result};
use crate::fields::resolve_examples;
use crate::filters::FilterPipeline;
use crate::transforms::{self, Transform};

/// Odometer over per-position symbol lists, rightmost position fastest.
/// This is the product order: for axes `[ab, ab]` it walks aa ab ba bb.
struct ProductCursor {
    axes: Vec<Vec<char>>,
    indices: Vec<usize>,
    done: bool,
}

impl ProductCursor {
    fn new(axes: Vec<Vec<char>>) -> Self {
        let done = axes.iter().any(|axis| axis.is_empty());
        let indices = vec![0; axes.len()];
        Self { axes, indices, done }
    }

    fn next(&mut self) -> Option<String> {
        if self.done {
            return None;
        }

        let token: String = self
            .indices
            .iter()
            .zip(&self.axes)
            .map(|(&i, axis)| axis[i])
            .collect();

        // Advance the odometer
        let mut pos = self.axes.len();
        loop {
            if pos == 0 {
                self.done = true;
                break;
            }
            pos -= 1;
            self.indices[pos] += 1;
            if self.indices[pos] < self.axes[pos].len() {
                break;
            }
            self.indices[pos] = 0;
        }

        Some(token)
    }
}

/// K-permutations of a charset without repetition, as lexicographically
/// ordered tuples of distinct charset indices.
struct PermutationCursor {
    chars: Vec<char>,
    selected: Vec<usize>,
    done: bool,
}

impl PermutationCursor {
    fn new(chars: Vec<char>, length: usize) -> Self {
        // Lengths beyond the charset size contribute nothing
        let done = length > chars.len() || length == 0;
        let selected = (0..length).collect();
        Self { chars, selected, done }
    }

    fn next(&mut self) -> Option<String> {
        if self.done {
            return None;
        }
        let token = self.selected.iter().map(|&i| self.chars[i]).collect();
        self.advance();
        Some(token)
    }

    fn advance(&mut self) {
        let n = self.chars.len();
        let k = self.selected.len();
        let mut pos = k;

        while pos > 0 {
            pos -= 1;

            let mut used = vec![false; n];
            for &i in &self.selected[..pos] {
                used[i] = true;
            }

            // Smallest unused index greater than the current one
            let mut candidate = self.selected[pos] + 1;
            while candidate < n && used[candidate] {
                candidate += 1;
            }

            if candidate < n {
                self.selected[pos] = candidate;
                used[candidate] = true;

                // Reset the tail to the smallest unused indices, ascending
                for p in pos + 1..k {
                    let smallest = (0..n).find(|&j| !used[j]).expect("k <= n");
                    self.selected[p] = smallest;
                    used[smallest] = true;
                }
                return;
            }
        }

        self.done = true;
    }
}

/// Odometer over field example lists
struct FieldCursor {
    axes: Vec<Vec<String>>,
    separator: Option<String>,
    indices: Vec<usize>,
    done: bool,
}

impl FieldCursor {
    fn new(axes: Vec<Vec<String>>, separator: Option<String>) -> Self {
        let done = axes.iter().any(|axis| axis.is_empty());
        let indices = vec![0; axes.len()];
        Self {
            axes,
            separator,
            indices,
            done,
        }
    }

    fn next(&mut self) -> Option<String> {
        if self.done {
            return None;
        }

        let parts: Vec<&str> = self
            .indices
            .iter()
            .zip(&self.axes)
            .map(|(&i, axis)| axis[i].as_str())
            .collect();
        let token = match &self.separator {
            Some(sep) => parts.join(sep),
            None => parts.concat(),
        };

        let mut pos = self.axes.len();
        loop {
            if pos == 0 {
                self.done = true;
                break;
            }
            pos -= 1;
            self.indices[pos] += 1;
            if self.indices[pos] < self.axes[pos].len() {
                break;
            }
            self.indices[pos] = 0;
        }

        Some(token)
    }
}

/// Fixed-length enumerator for one charset length
enum FixedLenCursor {
    Product(ProductCursor),
    Permutation(PermutationCursor),
}

impl FixedLenCursor {
    fn new(chars: &[char], length: usize, permutations_only: bool) -> Self {
        if permutations_only {
            Self::Permutation(PermutationCursor::new(chars.to_vec(), length))
        } else {
            Self::Product(ProductCursor::new(vec![chars.to_vec(); length]))
        }
    }

    fn next(&mut self) -> Option<String> {
        match self {
            Self::Product(cursor) => cursor.next(),
            Self::Permutation(cursor) => cursor.next(),
        }
    }
}

/// Raw candidate enumerator, one of the three modes
enum RawCursor {
    /// Sweeps lengths min..=max, rebuilding the inner cursor per length
    Charset {
        chars: Vec<char>,
        permutations_only: bool,
        current_length: usize,
        max_length: usize,
        inner: FixedLenCursor,
    },
    Pattern(ProductCursor),
    Fields(FieldCursor),
}

impl RawCursor {
    fn new(config: &Config) -> Result<Self> {
        match &config.mode {
            GenerationMode::Pattern {
                pattern,
                literal_chars,
            } => {
                if pattern.is_empty() {
                    return Err(ForgeError::Generation("no pattern specified".into()));
                }
                let axes = pattern_positions(pattern, literal_chars.as_deref());
                Ok(Self::Pattern(ProductCursor::new(axes)))
            }
            GenerationMode::Fields { enabled, separator } => {
                if enabled.is_empty() {
                    return Err(ForgeError::Generation("no fields enabled".into()));
                }
                let axes = enabled.iter().map(|id| resolve_examples(id)).collect();
                Ok(Self::Fields(FieldCursor::new(axes, separator.clone())))
            }
            GenerationMode::Charset {
                charset,
                permutations_only,
            } => {
                let chars: Vec<char> = resolve_charset(charset.as_deref()).chars().collect();
                let inner = FixedLenCursor::new(&chars, config.min_length, *permutations_only);
                Ok(Self::Charset {
                    chars,
                    permutations_only: *permutations_only,
                    current_length: config.min_length,
                    max_length: config.max_length,
                    inner,
                })
            }
        }
    }

    fn next(&mut self) -> Option<String> {
        match self {
            Self::Pattern(cursor) => cursor.next(),
            Self::Fields(cursor) => cursor.next(),
            Self::Charset {
                chars,
                permutations_only,
                current_length,
                max_length,
                inner,
            } => loop {
                if let Some(token) = inner.next() {
                    return Some(token);
                }
                if *current_length >= *max_length {
                    return None;
                }
                *current_length += 1;
                *inner = FixedLenCursor::new(chars, *current_length, *permutations_only);
            },
        }
    }
}

/// Resolve the charset selector: a known name, a custom charset string
/// (de-duplicated, first occurrence wins), or the lowercase default.
fn resolve_charset(selector: Option<&str>) -> String {
    match selector {
        Some(name) if is_named_charset(name) => get_charset(name),
        Some(custom) => dedup_chars(custom),
        None => CHARSET_LOWERCASE.to_string(),
    }
}

/// Theoretical candidate count for a configuration, computed analytically.
///
/// A configured emission cap wins outright. Counts saturate rather than
/// overflow; combinatorial spaces get astronomically large long before u128.
pub fn estimate_count(config: &Config) -> u128 {
    if let Some(cap) = config.max_lines {
        return cap as u128;
    }

    match &config.mode {
        GenerationMode::Charset {
            charset,
            permutations_only,
        } => {
            let n = resolve_charset(charset.as_deref()).chars().count() as u128;
            let mut total = 0u128;
            for length in config.min_length..=config.max_length {
                let count = if *permutations_only {
                    if length as u128 <= n {
                        // Falling factorial n * (n-1) * ... * (n-length+1)
                        (0..length as u128).fold(1u128, |acc, i| acc.saturating_mul(n - i))
                    } else {
                        0
                    }
                } else {
                    n.saturating_pow(length as u32)
                };
                total = total.saturating_add(count);
            }
            total
        }
        GenerationMode::Pattern {
            pattern,
            literal_chars,
        } => pattern_positions(pattern, literal_chars.as_deref())
            .iter()
            .fold(1u128, |acc, axis| acc.saturating_mul(axis.len() as u128)),
        GenerationMode::Fields { enabled, .. } => enabled
            .iter()
            .fold(1u128, |acc, id| {
                acc.saturating_mul(resolve_examples(id).len() as u128)
            }),
    }
}

/// Snapshot of run progress, for reporting only
#[derive(Debug, Clone)]
pub struct GeneratorStats {
    pub tokens_generated: u64,
    pub estimated_total: u128,
    pub dedup_cache_size: usize,
    pub dedup_memory_bytes: usize,
    pub config: Config,
}

/// The generation engine. Implements [`Iterator`]; the token stream is
/// consumable exactly once and is not restartable mid-run.
pub struct Generator {
    config: Config,
    chain: Vec<Transform>,
    filters: FilterPipeline,
    rng: StdRng,
    cursor: RawCursor,
    dedup: Option<DedupSet>,
    accepted: u64,
    halted: bool,
}

impl Generator {
    /// Validate the configuration and set up the run. Everything that can
    /// fail does so here, before the first candidate exists: bad bounds,
    /// an empty pattern or field list, an unknown transform name, or a
    /// malformed filter regex.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;

        let chain = transforms::parse_chain(&config.transforms)?;
        let filters = FilterPipeline::new(&config.filters)?;
        let cursor = RawCursor::new(&config)?;

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        let dedup = config.dedupe.then(DedupSet::new);

        log::debug!(
            "generator ready: mode={:?} lengths={}..={} transforms={:?}",
            std::mem::discriminant(&config.mode),
            config.min_length,
            config.max_length,
            config.transforms,
        );

        Ok(Self {
            config,
            chain,
            filters,
            rng,
            cursor,
            dedup,
            accepted: 0,
            halted: false,
        })
    }

    /// Theoretical candidate count for this run's configuration
    pub fn estimate_count(&self) -> u128 {
        estimate_count(&self.config)
    }

    /// Progress snapshot; not usable for resuming
    pub fn stats(&self) -> GeneratorStats {
        GeneratorStats {
            tokens_generated: self.accepted,
            estimated_total: self.estimate_count(),
            dedup_cache_size: self.dedup.as_ref().map_or(0, DedupSet::len),
            dedup_memory_bytes: self.dedup.as_ref().map_or(0, DedupSet::memory_usage),
            config: self.config.clone(),
        }
    }

    /// Run one raw candidate through the acceptance pipeline:
    /// affixes, transform chain, filters, range bounds, dedupe.
    fn process(&mut self, raw: String) -> Option<String> {
        let mut token = raw;

        if let Some(prefix) = &self.config.prefix {
            token.insert_str(0, prefix);
        }
        if let Some(suffix) = &self.config.suffix {
            token.push_str(suffix);
        }

        token = transforms::apply_chain(&token, &self.chain, &mut self.rng);

        if !self.filters.accepts(&token) {
            return None;
        }

        if let Some(start) = &self.config.start_string {
            if token.as_str() < start.as_str() {
                return None;
            }
        }
        if let Some(end) = &self.config.end_string {
            if token.as_str() > end.as_str() {
                return None;
            }
        }

        if let Some(dedup) = &mut self.dedup {
            if !dedup.insert(&token) {
                return None;
            }
        }

        self.accepted += 1;
        Some(token)
    }
}

impl Iterator for Generator {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if self.halted {
            return None;
        }

        // The cap halts the whole run; there is no point walking the
        // remaining space just to reject each candidate individually.
        if let Some(cap) = self.config.max_lines {
            if self.accepted >= cap {
                self.halted = true;
                return None;
            }
        }

        while let Some(raw) = self.cursor.next() {
            if let Some(token) = self.process(raw) {
                return Some(token);
            }
        }

        self.halted = true;
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FilterConfig;

    fn charset_config(charset: &str, min: usize, max: usize) -> Config {
        Config {
            min_length: min,
            max_length: max,
            mode: GenerationMode::Charset {
                charset: Some(charset.to_string()),
                permutations_only: false,
            },
            ..Config::default()
        }
    }

    #[test]
    fn test_charset_raw_count() {
        // |{a,b}|^2 + |{a,b}|^3 = 4 + 8
        let tokens: Vec<_> = Generator::new(charset_config("ab", 2, 3)).unwrap().collect();
        assert_eq!(tokens.len(), 12);
        assert_eq!(
            &tokens[..4],
            &["aa", "ab", "ba", "bb"].map(String::from)
        );
        assert_eq!(tokens[4], "aaa");
        assert_eq!(tokens[11], "bbb");
    }

    #[test]
    fn test_charset_order_rightmost_fastest() {
        let tokens: Vec<_> = Generator::new(charset_config("abc", 2, 2)).unwrap().collect();
        assert_eq!(
            tokens,
            ["aa", "ab", "ac", "ba", "bb", "bc", "ca", "cb", "cc"].map(String::from)
        );
    }

    #[test]
    fn test_permutations_mode() {
        let config = Config {
            min_length: 2,
            max_length: 2,
            mode: GenerationMode::Charset {
                charset: Some("abc".to_string()),
                permutations_only: true,
            },
            ..Config::default()
        };
        let tokens: Vec<_> = Generator::new(config).unwrap().collect();
        assert_eq!(
            tokens,
            ["ab", "ac", "ba", "bc", "ca", "cb"].map(String::from)
        );
    }

    #[test]
    fn test_permutations_skip_lengths_beyond_charset() {
        let config = Config {
            min_length: 2,
            max_length: 4,
            mode: GenerationMode::Charset {
                charset: Some("abc".to_string()),
                permutations_only: true,
            },
            ..Config::default()
        };
        // P(3,2) + P(3,3) + 0
        let tokens: Vec<_> = Generator::new(config).unwrap().collect();
        assert_eq!(tokens.len(), 12);
    }

    #[test]
    fn test_custom_charset_is_deduplicated() {
        let tokens: Vec<_> = Generator::new(charset_config("aab", 1, 1)).unwrap().collect();
        assert_eq!(tokens, ["a", "b"].map(String::from));
    }

    #[test]
    fn test_pattern_mode_positional() {
        let config = Config {
            mode: GenerationMode::Pattern {
                pattern: "pass%%".to_string(),
                literal_chars: None,
            },
            ..Config::default()
        };
        let tokens: Vec<_> = Generator::new(config).unwrap().collect();
        assert_eq!(tokens.len(), 100);
        assert!(tokens.iter().all(|t| t.starts_with("pass")));
        assert_eq!(tokens[0], "pass00");
        assert_eq!(tokens[99], "pass99");
    }

    #[test]
    fn test_pattern_mode_requires_pattern() {
        let config = Config {
            mode: GenerationMode::Pattern {
                pattern: String::new(),
                literal_chars: None,
            },
            ..Config::default()
        };
        assert!(matches!(
            Generator::new(config),
            Err(ForgeError::Generation(_))
        ));
    }

    #[test]
    fn test_field_mode_product() {
        let config = Config {
            mode: GenerationMode::Fields {
                enabled: vec!["dev_handles".into(), "programming_language".into()],
                separator: None,
            },
            ..Config::default()
        };
        let tokens: Vec<_> = Generator::new(config).unwrap().collect();
        assert_eq!(tokens.len(), 25);
        assert_eq!(tokens[0], "adminpython");
        assert_eq!(tokens[1], "adminjava");
        assert_eq!(tokens[24], "devrust");
    }

    #[test]
    fn test_field_mode_separator() {
        let config = Config {
            mode: GenerationMode::Fields {
                enabled: vec!["dev_handles".into(), "birth_year".into()],
                separator: Some("-".into()),
            },
            ..Config::default()
        };
        let first = Generator::new(config).unwrap().next().unwrap();
        assert_eq!(first, "admin-1990");
    }

    #[test]
    fn test_field_mode_unknown_id_fallback() {
        let config = Config {
            mode: GenerationMode::Fields {
                enabled: vec!["dev_handles".into(), "acme".into()],
                separator: None,
            },
            ..Config::default()
        };
        let tokens: Vec<_> = Generator::new(config).unwrap().collect();
        assert_eq!(tokens.len(), 5);
        assert!(tokens.iter().all(|t| t.ends_with("acme")));
    }

    #[test]
    fn test_field_mode_requires_fields() {
        let config = Config {
            mode: GenerationMode::Fields {
                enabled: vec![],
                separator: None,
            },
            ..Config::default()
        };
        assert!(matches!(
            Generator::new(config),
            Err(ForgeError::Generation(_))
        ));
    }

    #[test]
    fn test_unknown_transform_aborts_before_enumeration() {
        let mut config = charset_config("ab", 1, 1);
        config.transforms = vec!["md5sum".into()];
        assert!(matches!(
            Generator::new(config),
            Err(ForgeError::UnknownTransform(_))
        ));
    }

    #[test]
    fn test_prefix_suffix_applied_before_filters() {
        let mut config = charset_config("ab", 1, 1);
        config.prefix = Some("pre_".into());
        config.suffix = Some("_end".into());
        // 9 chars with affixes; a bare candidate would fail this bound
        config.filters = FilterConfig {
            min_len: 9,
            ..FilterConfig::default()
        };
        let tokens: Vec<_> = Generator::new(config).unwrap().collect();
        assert_eq!(tokens, ["pre_a_end", "pre_b_end"].map(String::from));
    }

    #[test]
    fn test_start_end_bounds() {
        let mut config = charset_config("ab", 2, 2);
        config.start_string = Some("ab".into());
        config.end_string = Some("ba".into());
        let tokens: Vec<_> = Generator::new(config).unwrap().collect();
        assert_eq!(tokens, ["ab", "ba"].map(String::from));
    }

    #[test]
    fn test_dedupe_suppresses_repeats() {
        let mut config = charset_config("aA", 1, 1);
        config.transforms = vec!["lowercase".into()];
        config.dedupe = true;
        let tokens: Vec<_> = Generator::new(config).unwrap().collect();
        assert_eq!(tokens, vec!["a".to_string()]);
    }

    #[test]
    fn test_emission_cap_halts_run() {
        let mut config = charset_config("ab", 1, 8);
        config.max_lines = Some(5);
        let mut generator = Generator::new(config).unwrap();
        let tokens: Vec<_> = generator.by_ref().collect();
        assert_eq!(tokens.len(), 5);
        // Exhausted for good, not just paused
        assert!(generator.next().is_none());
    }

    #[test]
    fn test_seeded_run_is_reproducible() {
        let make = || {
            let mut config = charset_config("ab", 2, 2);
            config.transforms = vec!["leet_full".into(), "append_numbers_2".into()];
            config.seed = Some(99);
            Generator::new(config).unwrap().collect::<Vec<_>>()
        };
        assert_eq!(make(), make());
    }

    #[test]
    fn test_estimator_matches_exhaustive_enumeration() {
        let config = charset_config("abc", 1, 2);
        let generator = Generator::new(config).unwrap();
        let estimated = generator.estimate_count();
        let produced = generator.count() as u128;
        assert_eq!(estimated, produced);
        assert_eq!(estimated, 3 + 9);
    }

    #[test]
    fn test_estimator_cap_wins() {
        let mut config = charset_config("abc", 1, 10);
        config.max_lines = Some(42);
        assert_eq!(estimate_count(&config), 42);
    }

    #[test]
    fn test_estimator_permutations() {
        let config = Config {
            min_length: 2,
            max_length: 4,
            mode: GenerationMode::Charset {
                charset: Some("abc".to_string()),
                permutations_only: true,
            },
            ..Config::default()
        };
        assert_eq!(estimate_count(&config), 6 + 6);
    }

    #[test]
    fn test_estimator_pattern() {
        let config = Config {
            mode: GenerationMode::Pattern {
                pattern: "pass%%".to_string(),
                literal_chars: None,
            },
            ..Config::default()
        };
        assert_eq!(estimate_count(&config), 100);
    }

    #[test]
    fn test_estimator_fields() {
        let config = Config {
            mode: GenerationMode::Fields {
                enabled: vec!["dev_handles".into(), "programming_language".into()],
                separator: None,
            },
            ..Config::default()
        };
        assert_eq!(estimate_count(&config), 25);
    }

    #[test]
    fn test_stats_snapshot() {
        let mut config = charset_config("ab", 2, 2);
        config.dedupe = true;
        let mut generator = Generator::new(config).unwrap();
        generator.by_ref().take(3).for_each(drop);

        let stats = generator.stats();
        assert_eq!(stats.tokens_generated, 3);
        assert_eq!(stats.estimated_total, 4);
        assert_eq!(stats.dedup_cache_size, 3);
    }

    #[test]
    fn test_default_charset_is_lowercase() {
        let config = Config {
            min_length: 1,
            max_length: 1,
            ..Config::default()
        };
        let tokens: Vec<_> = Generator::new(config).unwrap().collect();
        assert_eq!(tokens.len(), 26);
        assert_eq!(tokens[0], "a");
        assert_eq!(tokens[25], "z");
    }
}
