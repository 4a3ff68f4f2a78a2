//! # Wordlist Forge
//!
//! Candidate wordlist generator for penetration testing.
//!
//! ## Features
//!
//! - **Charset mode**: every string over a charset for each length in a range,
//!   as the full product or as permutations without repetition
//! - **Pattern mode**: Crunch-style placeholder patterns (`@` lowercase,
//!   `,` uppercase, `%` digits, `^` symbols)
//! - **Field mode**: cartesian products of themed example lists (names,
//!   handles, years, ...)
//! - **Transforms**: leetspeak, homoglyphs, case mutations, number and year
//!   suffixes, and more, chained in order
//! - **Filters**: length, charset whitelist, Shannon entropy, and regex
//!   predicates applied before anything is emitted
//! - **Constant memory**: the candidate space is walked with explicit
//!   cursors and never materialized
//!
//! ## Usage
//!
//! ```bash
//! # All lowercase strings of length 1-4
//! wordlist-forge generate --max 4
//!
//! # 'pass' followed by two digits
//! wordlist-forge generate --pattern 'pass%%'
//!
//! # Field combinations with leetspeak, deduplicated
//! wordlist-forge generate --fields dev_handles,birth_year -t leet_basic --dedupe
//! ```
//!
//! ## Example
//!
//! ```rust
//! use wordlist_forge::config::{Config, GenerationMode};
//! use wordlist_forge::generator::Generator;
//!
//! let config = Config {
//!     min_length: 2,
//!     max_length: 3,
//!     mode: GenerationMode::Charset {
//!         charset: Some("digits".to_string()),
//!         permutations_only: false,
//!     },
//!     max_lines: Some(50),
//!     ..Config::default()
//! };
//!
//! let generator = Generator::new(config).unwrap();
//! let tokens: Vec<String> = generator.collect();
//! assert_eq!(tokens.len(), 50);
//! ```

pub mod charset;
pub mod cli;
pub mod config;
pub mod dedup;
pub mod error;
pub mod fields;
pub mod filters;
pub mod generator;
pub mod output;
pub mod presets;
pub mod progress;
pub mod transforms;

pub use config::{Config, FilterConfig, GenerationMode};
pub use error::{ForgeError, Result};
pub use generator::{estimate_count, Generator, GeneratorStats};
