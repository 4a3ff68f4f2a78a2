//! Command-line interface definition for wordlist-forge
//!
//! Argument parsing and the translation from CLI flags to a [`Config`].

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::{Config, GenerationMode};
use crate::error::Result;
use crate::presets::PresetManager;

/// Candidate wordlist generator for penetration testing
///
/// Enumerate charset products, Crunch-style patterns, or field combinations,
/// mutate candidates through a transform chain, and filter the stream before
/// it ever touches disk.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "wordlist-forge",
    author = "m0h1nd4",
    version,
    about = "Candidate wordlist generator for penetration testing",
    long_about = r#"
Generate targeted wordlists instead of filtering giant ones. Three
enumeration modes feed one acceptance pipeline:

    charset    all strings over a charset, per length in --min..--max
    pattern    Crunch-style placeholders at a fixed length
    fields     cartesian product of themed example lists

EXAMPLES:
    # All lowercase strings of length 1-4
    wordlist-forge generate --max 4

    # Digits-only PINs, written to a file
    wordlist-forge generate --charset digits --min 4 --max 6 -o pins.txt

    # Crunch-style pattern: 'pass' + two digits
    wordlist-forge generate --pattern 'pass%%'

    # Combine field lists with leetspeak and a year suffix
    wordlist-forge generate --fields dev_handles,birth_year \
        --transform leet_basic --transform append_year

    # Sample a preset without writing anything
    wordlist-forge preview --preset pentest_default -n 25

PATTERN PLACEHOLDERS:
    @  lowercase letter        ,  uppercase letter
    %  digit                   ^  symbol
    Any other character is kept literally.
"#,
    after_help = "For more information, visit: https://github.com/m0h1nd4/wordlist-forge"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Quiet mode - minimal output
    #[arg(short, long, global = true, default_value_t = false)]
    pub quiet: bool,

    /// Verbose mode - detailed logging
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Generate a wordlist to a file or stdout
    Generate(GenerateArgs),

    /// Print a sample of candidates without writing anything
    Preview(PreviewArgs),

    /// Browse the available field lists
    Fields(FieldsArgs),

    /// List, inspect, and delete presets
    Presets {
        #[command(subcommand)]
        action: PresetAction,
    },

    /// List the available transforms
    Transforms,
}

#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    /// Minimum token length
    #[arg(long, value_name = "LEN")]
    pub min: Option<usize>,

    /// Maximum token length
    #[arg(long, value_name = "LEN")]
    pub max: Option<usize>,

    /// Named charset (lowercase, uppercase, digits, symbols, hex-lower,
    /// hex-upper, alphanumeric, all) or a literal character string
    #[arg(short, long, value_name = "CHARSET")]
    pub charset: Option<String>,

    /// Crunch-style pattern: @ lowercase, , uppercase, % digit, ^ symbol
    #[arg(short, long, value_name = "PATTERN")]
    pub pattern: Option<String>,

    /// Characters kept literal inside the pattern even if they are
    /// placeholder characters
    #[arg(long, value_name = "CHARS")]
    pub literal_chars: Option<String>,

    /// Field ids to combine (comma-separated or repeated)
    #[arg(short, long, value_name = "ID", value_delimiter = ',')]
    pub fields: Vec<String>,

    /// Separator between combined field values
    #[arg(long, value_name = "SEP")]
    pub separator: Option<String>,

    /// Enumerate charset permutations without repetition
    #[arg(long, default_value_t = false)]
    pub permutations: bool,

    /// Prefix prepended to every candidate
    #[arg(long, value_name = "STRING")]
    pub prefix: Option<String>,

    /// Suffix appended to every candidate
    #[arg(long, value_name = "STRING")]
    pub suffix: Option<String>,

    /// Transform to apply, left to right (repeatable)
    #[arg(short = 't', long = "transform", value_name = "NAME")]
    pub transforms: Vec<String>,

    /// Suppress repeated tokens within the run
    #[arg(long, default_value_t = false)]
    pub dedupe: bool,

    /// Drop tokens that order lexicographically before this string
    #[arg(long, value_name = "STRING")]
    pub start: Option<String>,

    /// Drop tokens that order lexicographically after this string
    #[arg(long, value_name = "STRING")]
    pub end: Option<String>,

    /// Stop after emitting this many tokens
    #[arg(short, long, value_name = "N")]
    pub limit: Option<u64>,

    /// Seed for randomized transforms; omit for a fresh seed per run
    #[arg(long, value_name = "SEED")]
    pub seed: Option<u64>,

    /// Minimum accepted token length (after affixes and transforms)
    #[arg(long, value_name = "LEN")]
    pub filter_min_len: Option<usize>,

    /// Maximum accepted token length
    #[arg(long, value_name = "LEN")]
    pub filter_max_len: Option<usize>,

    /// Accept only tokens drawn entirely from these characters
    #[arg(long, value_name = "CHARS")]
    pub filter_charset: Option<String>,

    /// Minimum Shannon entropy in bits
    #[arg(long, value_name = "BITS")]
    pub min_entropy: Option<f64>,

    /// Maximum Shannon entropy in bits
    #[arg(long, value_name = "BITS")]
    pub max_entropy: Option<f64>,

    /// Regex the token must match
    #[arg(long, value_name = "REGEX")]
    pub filter_regex: Option<String>,

    /// Invert the regex filter: reject tokens that match
    #[arg(long, default_value_t = false)]
    pub regex_reject: bool,

    /// Start from a preset, then apply any explicit flags on top
    #[arg(long, value_name = "NAME")]
    pub preset: Option<String>,

    /// Output file (stdout when omitted)
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

impl GenerateArgs {
    /// Resolve the preset base (if any) and layer explicit flags on top.
    /// Flags the user did not pass leave the base value untouched.
    pub fn build_config(&self, presets: &PresetManager) -> Result<Config> {
        let mut config = match &self.preset {
            Some(name) => presets.get_config(name)?,
            None => Config::default(),
        };

        if let Some(min) = self.min {
            config.min_length = min;
        }
        if let Some(max) = self.max {
            config.max_length = max;
        }

        // Any mode flag replaces the base mode wholesale
        if self.pattern.is_some()
            || !self.fields.is_empty()
            || self.charset.is_some()
            || self.permutations
        {
            config.mode = GenerationMode::from_parts(
                self.charset.clone(),
                self.pattern.clone(),
                self.literal_chars.clone(),
                self.fields.clone(),
                self.separator.clone(),
                self.permutations,
            );
        }

        if self.prefix.is_some() {
            config.prefix = self.prefix.clone();
        }
        if self.suffix.is_some() {
            config.suffix = self.suffix.clone();
        }
        if !self.transforms.is_empty() {
            config.transforms = self.transforms.clone();
        }
        if self.dedupe {
            config.dedupe = true;
        }
        if self.start.is_some() {
            config.start_string = self.start.clone();
        }
        if self.end.is_some() {
            config.end_string = self.end.clone();
        }
        if self.limit.is_some() {
            config.max_lines = self.limit;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }

        if let Some(min_len) = self.filter_min_len {
            config.filters.min_len = min_len;
        }
        if let Some(max_len) = self.filter_max_len {
            config.filters.max_len = max_len;
        }
        if self.filter_charset.is_some() {
            config.filters.charset_filter = self.filter_charset.clone();
        }
        if let Some(min_entropy) = self.min_entropy {
            config.filters.min_entropy = min_entropy;
        }
        if let Some(max_entropy) = self.max_entropy {
            config.filters.max_entropy = max_entropy;
        }
        if self.filter_regex.is_some() {
            config.filters.regex = self.filter_regex.clone();
            config.filters.regex_must_match = !self.regex_reject;
        }

        Ok(config)
    }
}

#[derive(Args, Debug, Clone)]
pub struct PreviewArgs {
    #[command(flatten)]
    pub generate: GenerateArgs,

    /// Number of sample tokens to print
    #[arg(short = 'n', long, default_value_t = 20, value_name = "N")]
    pub count: u64,
}

#[derive(Args, Debug, Clone)]
pub struct FieldsArgs {
    /// List the field categories instead of the fields
    #[arg(long, default_value_t = false)]
    pub categories: bool,

    /// List the fields in one category
    #[arg(long, value_name = "NAME")]
    pub category: Option<String>,

    /// Search fields by id, category, or group
    #[arg(long, value_name = "TERM")]
    pub search: Option<String>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum PresetAction {
    /// List built-in and custom presets
    List,

    /// Show one preset in full
    Show {
        /// Preset name
        name: String,
    },

    /// Delete a custom preset
    Delete {
        /// Preset name
        name: String,
    },
}
