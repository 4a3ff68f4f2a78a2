//! Transform registry
//!
//! A closed table of string transforms composed into an ordered chain. Pure
//! transforms depend only on their input; randomized transforms draw from an
//! explicit RNG passed by the caller, so a whole run is reproducible from a
//! seed. There is no hidden global randomness anywhere in this module.

use rand::seq::IndexedRandom;
use rand::Rng;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::error::{ForgeError, Result};

/// Leet substitutions; the first entry of each list is the canonical one
const LEET_MAP: &[(char, &[&str])] = &[
    ('a', &["4", "@"]),
    ('e', &["3", "€"]),
    ('i', &["1", "!", "|"]),
    ('o', &["0", "()"]),
    ('s', &["5", "$", "z"]),
    ('t', &["7", "+"]),
    ('l', &["1", "|"]),
    ('g', &["9", "&", "6"]),
    ('z', &["2", "~"]),
    ('b', &["8", "|3", "ß"]),
    ('x', &["*"]),
];

/// Visually-confusable codepoint substitutions
const HOMOGLYPH_MAP: &[(char, &[&str])] = &[
    ('a', &["а", "ɑ", "α", "ａ"]),
    ('e', &["е", "ε", "ｅ"]),
    ('o', &["о", "ο", "ｏ"]),
    ('p', &["р", "ρ", "ｐ"]),
    ('c', &["с", "ϲ", "ｃ"]),
    ('x', &["х", "χ", "ｘ"]),
    ('h', &["һ", "ｈ"]),
    ('n', &["ո", "ｎ"]),
];

/// QWERTY-adjacent keys for fat-finger simulation
const KEYBOARD_SHIFT_MAP: &[(char, &[&str])] = &[
    ('a', &["q", "s"]),
    ('e', &["r", "w", "d"]),
    ('i', &["u", "o", "k"]),
    ('o', &["i", "p", "l"]),
    ('s', &["a", "d", "w", "x"]),
    ('t', &["r", "y", "f", "g"]),
];

const EMOJIS: &[&str] = &[
    "😀", "😃", "😄", "😁", "😆", "😅", "🤣", "😂", "🙂", "🙃", "😉", "😊", "😇", "❤️", "💕",
    "💖", "💗", "💙", "💚", "💛", "🔥", "✨", "⭐", "🌟", "💫", "🎉", "🎊", "🎈", "🎁", "🏆",
];

const IRREGULAR_PLURALS: &[(&str, &str)] = &[
    ("man", "men"),
    ("woman", "women"),
    ("child", "children"),
    ("person", "people"),
    ("foot", "feet"),
    ("tooth", "teeth"),
    ("mouse", "mice"),
    ("goose", "geese"),
];

fn table_lookup<'a>(table: &'a [(char, &'a [&'a str])], ch: char) -> Option<&'a [&'a str]> {
    table.iter().find(|(key, _)| *key == ch).map(|(_, subs)| *subs)
}

/// A single named transform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transform {
    Uppercase,
    Lowercase,
    Capitalize,
    TitleCase,
    ToggleCase,
    Reverse,
    LeetBasic,
    LeetFull,
    HomoglyphSingle,
    HomoglyphRandom,
    KeyboardShift,
    AppendNumbers4,
    AppendNumbers2,
    AppendYear,
    EmojiInsertion,
    Pluralization,
    DiacriticsStrip,
}

impl Transform {
    pub const ALL: &'static [Transform] = &[
        Transform::Uppercase,
        Transform::Lowercase,
        Transform::Capitalize,
        Transform::TitleCase,
        Transform::ToggleCase,
        Transform::Reverse,
        Transform::LeetBasic,
        Transform::LeetFull,
        Transform::HomoglyphSingle,
        Transform::HomoglyphRandom,
        Transform::KeyboardShift,
        Transform::AppendNumbers4,
        Transform::AppendNumbers2,
        Transform::AppendYear,
        Transform::EmojiInsertion,
        Transform::Pluralization,
        Transform::DiacriticsStrip,
    ];

    /// Resolve a transform name. Unknown names are an error; a chain is
    /// shared by every candidate, so a bad name aborts the whole run.
    pub fn parse(name: &str) -> Result<Self> {
        match name {
            "uppercase" => Ok(Self::Uppercase),
            "lowercase" => Ok(Self::Lowercase),
            "capitalize" => Ok(Self::Capitalize),
            "title_case" => Ok(Self::TitleCase),
            "toggle_case" => Ok(Self::ToggleCase),
            "reverse" => Ok(Self::Reverse),
            "leet_basic" => Ok(Self::LeetBasic),
            "leet_full" => Ok(Self::LeetFull),
            "homoglyph_single" => Ok(Self::HomoglyphSingle),
            "homoglyph_random" => Ok(Self::HomoglyphRandom),
            "keyboard_shift" => Ok(Self::KeyboardShift),
            "append_numbers_4" => Ok(Self::AppendNumbers4),
            "append_numbers_2" => Ok(Self::AppendNumbers2),
            "append_year" => Ok(Self::AppendYear),
            "emoji_insertion" => Ok(Self::EmojiInsertion),
            "pluralization" => Ok(Self::Pluralization),
            "diacritics_strip" => Ok(Self::DiacriticsStrip),
            other => Err(ForgeError::UnknownTransform(other.to_string())),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Uppercase => "uppercase",
            Self::Lowercase => "lowercase",
            Self::Capitalize => "capitalize",
            Self::TitleCase => "title_case",
            Self::ToggleCase => "toggle_case",
            Self::Reverse => "reverse",
            Self::LeetBasic => "leet_basic",
            Self::LeetFull => "leet_full",
            Self::HomoglyphSingle => "homoglyph_single",
            Self::HomoglyphRandom => "homoglyph_random",
            Self::KeyboardShift => "keyboard_shift",
            Self::AppendNumbers4 => "append_numbers_4",
            Self::AppendNumbers2 => "append_numbers_2",
            Self::AppendYear => "append_year",
            Self::EmojiInsertion => "emoji_insertion",
            Self::Pluralization => "pluralization",
            Self::DiacriticsStrip => "diacritics_strip",
        }
    }

    /// Whether this transform consumes randomness
    pub fn is_randomized(&self) -> bool {
        matches!(
            self,
            Self::LeetFull
                | Self::HomoglyphRandom
                | Self::KeyboardShift
                | Self::AppendNumbers4
                | Self::AppendNumbers2
                | Self::AppendYear
                | Self::EmojiInsertion
        )
    }

    /// Apply this transform. Pure transforms ignore the RNG.
    pub fn apply<R: Rng>(&self, token: &str, rng: &mut R) -> String {
        match self {
            Self::Uppercase => token.to_uppercase(),
            Self::Lowercase => token.to_lowercase(),
            Self::Capitalize => capitalize(token),
            Self::TitleCase => title_case(token),
            Self::ToggleCase => toggle_case(token),
            Self::Reverse => token.chars().rev().collect(),
            Self::LeetBasic => leet_basic(token),
            Self::LeetFull => leet_full(token, rng),
            Self::HomoglyphSingle => homoglyph_single(token),
            Self::HomoglyphRandom => homoglyph_random(token, rng),
            Self::KeyboardShift => keyboard_shift(token, rng),
            Self::AppendNumbers4 => format!("{}{:04}", token, rng.random_range(0..=9999)),
            Self::AppendNumbers2 => format!("{}{:02}", token, rng.random_range(0..=99)),
            Self::AppendYear => format!("{}{}", token, rng.random_range(1900..=2099)),
            Self::EmojiInsertion => emoji_insertion(token, rng),
            Self::Pluralization => pluralize(token),
            Self::DiacriticsStrip => strip_diacritics(token),
        }
    }
}

/// Resolve a chain of transform names, erroring on the first unknown name
/// without partially resolving the rest.
pub fn parse_chain(names: &[String]) -> Result<Vec<Transform>> {
    names.iter().map(|name| Transform::parse(name)).collect()
}

/// Apply a resolved chain left to right
pub fn apply_chain<R: Rng>(token: &str, chain: &[Transform], rng: &mut R) -> String {
    let mut result = token.to_string();
    for transform in chain {
        result = transform.apply(&result, rng);
    }
    result
}

/// Apply a chain of transform names, resolving them first.
/// No transform is applied if any name in the chain is unknown.
pub fn apply_transforms<R: Rng>(token: &str, names: &[String], rng: &mut R) -> Result<String> {
    let chain = parse_chain(names)?;
    Ok(apply_chain(token, &chain, rng))
}

/// All transform names, sorted
pub fn list_transforms() -> Vec<&'static str> {
    let mut names: Vec<_> = Transform::ALL.iter().map(|t| t.name()).collect();
    names.sort_unstable();
    names
}

fn capitalize(token: &str) -> String {
    let mut chars = token.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

fn title_case(token: &str) -> String {
    let mut result = String::with_capacity(token.len());
    let mut at_word_start = true;
    for ch in token.chars() {
        if ch.is_alphabetic() {
            if at_word_start {
                result.extend(ch.to_uppercase());
            } else {
                result.extend(ch.to_lowercase());
            }
            at_word_start = false;
        } else {
            result.push(ch);
            at_word_start = true;
        }
    }
    result
}

fn toggle_case(token: &str) -> String {
    token
        .chars()
        .flat_map(|ch| {
            if ch.is_uppercase() {
                ch.to_lowercase().collect::<Vec<_>>()
            } else {
                ch.to_uppercase().collect::<Vec<_>>()
            }
        })
        .collect()
}

fn leet_basic(token: &str) -> String {
    let mut result = String::with_capacity(token.len());
    for ch in token.to_lowercase().chars() {
        match table_lookup(LEET_MAP, ch) {
            Some(subs) => result.push_str(subs[0]),
            None => result.push(ch),
        }
    }
    result
}

fn leet_full<R: Rng>(token: &str, rng: &mut R) -> String {
    let mut result = String::with_capacity(token.len());
    for ch in token.to_lowercase().chars() {
        match table_lookup(LEET_MAP, ch) {
            Some(subs) => result.push_str(subs.choose(rng).unwrap_or(&subs[0])),
            None => result.push(ch),
        }
    }
    result
}

fn homoglyph_single(token: &str) -> String {
    let mut result = String::with_capacity(token.len());
    let mut replaced = false;
    for ch in token.to_lowercase().chars() {
        match table_lookup(HOMOGLYPH_MAP, ch) {
            Some(subs) if !replaced => {
                result.push_str(subs[0]);
                replaced = true;
            }
            _ => result.push(ch),
        }
    }
    result
}

fn homoglyph_random<R: Rng>(token: &str, rng: &mut R) -> String {
    let mut result = String::with_capacity(token.len());
    for ch in token.to_lowercase().chars() {
        match table_lookup(HOMOGLYPH_MAP, ch) {
            Some(subs) if rng.random::<f64>() < 0.3 => {
                result.push_str(subs.choose(rng).unwrap_or(&subs[0]));
            }
            _ => result.push(ch),
        }
    }
    result
}

fn keyboard_shift<R: Rng>(token: &str, rng: &mut R) -> String {
    let mut result = String::with_capacity(token.len());
    for ch in token.to_lowercase().chars() {
        match table_lookup(KEYBOARD_SHIFT_MAP, ch) {
            Some(subs) if rng.random::<f64>() < 0.2 => {
                result.push_str(subs.choose(rng).unwrap_or(&subs[0]));
            }
            _ => result.push(ch),
        }
    }
    result
}

fn emoji_insertion<R: Rng>(token: &str, rng: &mut R) -> String {
    if token.is_empty() {
        return String::new();
    }
    let chars: Vec<char> = token.chars().collect();
    let pos = rng.random_range(0..=chars.len());
    let emoji = EMOJIS.choose(rng).unwrap_or(&EMOJIS[0]);

    let mut result = String::with_capacity(token.len() + emoji.len());
    result.extend(&chars[..pos]);
    result.push_str(emoji);
    result.extend(&chars[pos..]);
    result
}

fn pluralize(token: &str) -> String {
    if token.is_empty() {
        return String::new();
    }

    let lower = token.to_lowercase();
    if let Some((_, plural)) = IRREGULAR_PLURALS.iter().find(|(word, _)| *word == lower) {
        return plural.to_string();
    }

    let chars: Vec<char> = token.chars().collect();
    let drop_last = |n: usize| chars[..chars.len() - n].iter().collect::<String>();

    if ["s", "x", "z", "ch", "sh"].iter().any(|end| lower.ends_with(end)) {
        format!("{}es", token)
    } else if lower.ends_with('y')
        && chars.len() > 1
        && !matches!(lower.chars().nth_back(1), Some('a' | 'e' | 'i' | 'o' | 'u'))
    {
        format!("{}ies", drop_last(1))
    } else if lower.ends_with("fe") {
        format!("{}ves", drop_last(2))
    } else if lower.ends_with('f') {
        format!("{}ves", drop_last(1))
    } else {
        format!("{}s", token)
    }
}

/// Canonical decomposition, then drop combining marks. Covers accented
/// Latin; characters without a decomposition pass through unchanged.
fn strip_diacritics(token: &str) -> String {
    token.nfd().filter(|ch| !is_combining_mark(*ch)).collect()
}
