//! Character set definitions and Crunch-style pattern expansion
//!
//! Named charsets are fixed; custom charsets are passed through as-is with
//! first-occurrence de-duplication.

/// Lowercase ASCII letters
pub const CHARSET_LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";

/// Uppercase ASCII letters
pub const CHARSET_UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Decimal digits
pub const CHARSET_DIGITS: &str = "0123456789";

/// Common keyboard symbols
pub const CHARSET_SYMBOLS: &str = "!@#$%^&*()-_=+[]{}\\|;:'\",.<>?/`~";

/// Lowercase hex digits
pub const CHARSET_HEX_LOWER: &str = "0123456789abcdef";

/// Uppercase hex digits
pub const CHARSET_HEX_UPPER: &str = "0123456789ABCDEF";

/// Names accepted by [`get_charset`]
pub const NAMED_CHARSETS: &[&str] = &[
    "lowercase",
    "uppercase",
    "digits",
    "symbols",
    "hex-lower",
    "hex-upper",
    "alphanumeric",
    "all",
];

/// Look up a predefined charset by name.
///
/// Unknown names silently fall back to the lowercase charset; this mirrors
/// long-standing behavior that downstream presets rely on. A debug log line
/// records the fallback so runs can be audited.
pub fn get_charset(name: &str) -> String {
    let lower = name.to_lowercase();
    match lower.as_str() {
        "lowercase" => CHARSET_LOWERCASE.to_string(),
        "uppercase" => CHARSET_UPPERCASE.to_string(),
        "digits" => CHARSET_DIGITS.to_string(),
        "symbols" => CHARSET_SYMBOLS.to_string(),
        "hex-lower" => CHARSET_HEX_LOWER.to_string(),
        "hex-upper" => CHARSET_HEX_UPPER.to_string(),
        "alphanumeric" => {
            format!("{}{}{}", CHARSET_LOWERCASE, CHARSET_UPPERCASE, CHARSET_DIGITS)
        }
        "all" => format!(
            "{}{}{}{}",
            CHARSET_LOWERCASE, CHARSET_UPPERCASE, CHARSET_DIGITS, CHARSET_SYMBOLS
        ),
        _ => {
            log::debug!("unknown charset name '{}', falling back to lowercase", name);
            CHARSET_LOWERCASE.to_string()
        }
    }
}

/// Check whether a name refers to a predefined charset
pub fn is_named_charset(name: &str) -> bool {
    NAMED_CHARSETS.contains(&name.to_lowercase().as_str())
}

/// De-duplicate a charset string, keeping the first occurrence of each char
pub fn dedup_chars(charset: &str) -> String {
    let mut seen = hashbrown::HashSet::new();
    charset.chars().filter(|c| seen.insert(*c)).collect()
}

/// Expand a Crunch-style pattern into a single merged charset.
///
/// Placeholders: `@` lowercase, `,` uppercase, `%` digits, `^` symbols.
/// Characters listed in `literal_chars` are kept as literals even if they
/// are placeholders; any other character maps to itself. The result is
/// de-duplicated preserving first occurrence. An empty pattern yields the
/// lowercase charset.
pub fn expand_pattern(pattern: &str, literal_chars: Option<&str>) -> String {
    if pattern.is_empty() {
        return CHARSET_LOWERCASE.to_string();
    }

    let mut charset = String::new();
    for ch in pattern.chars() {
        charset.push_str(&placeholder_charset(ch, literal_chars));
    }
    dedup_chars(&charset)
}

/// Expand a pattern into one sub-charset per position.
///
/// This is the positional (true Crunch) view: each placeholder position
/// ranges over its own set, literal positions are single-character sets.
/// Enumerating the cartesian product of these positions yields candidates
/// that share the pattern's literal characters at their positions.
pub fn pattern_positions(pattern: &str, literal_chars: Option<&str>) -> Vec<Vec<char>> {
    pattern
        .chars()
        .map(|ch| placeholder_charset(ch, literal_chars).chars().collect())
        .collect()
}

fn placeholder_charset(ch: char, literal_chars: Option<&str>) -> String {
    if literal_chars.is_some_and(|lits| lits.contains(ch)) {
        return ch.to_string();
    }
    match ch {
        '@' => CHARSET_LOWERCASE.to_string(),
        ',' => CHARSET_UPPERCASE.to_string(),
        '%' => CHARSET_DIGITS.to_string(),
        '^' => CHARSET_SYMBOLS.to_string(),
        other => other.to_string(),
    }
}

/// Merge charsets, removing duplicates while preserving first occurrence
pub fn merge_charsets(charsets: &[&str]) -> String {
    dedup_chars(&charsets.concat())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_charset_named() {
        assert_eq!(get_charset("lowercase"), CHARSET_LOWERCASE);
        assert_eq!(get_charset("DIGITS"), CHARSET_DIGITS);
        assert_eq!(get_charset("alphanumeric").len(), 26 + 26 + 10);
    }

    #[test]
    fn test_get_charset_unknown_falls_back() {
        assert_eq!(get_charset("klingon"), CHARSET_LOWERCASE);
    }

    #[test]
    fn test_expand_pattern_placeholders() {
        assert_eq!(expand_pattern("%%", None), CHARSET_DIGITS);
        assert_eq!(expand_pattern("@", None), CHARSET_LOWERCASE);
        // Merged expansion folds literals into one charset
        assert_eq!(expand_pattern("ab%", None), "ab0123456789");
    }

    #[test]
    fn test_expand_pattern_empty() {
        assert_eq!(expand_pattern("", None), CHARSET_LOWERCASE);
    }

    #[test]
    fn test_expand_pattern_literal_override() {
        // '%' escaped as a literal, so no digit expansion
        assert_eq!(expand_pattern("a%", Some("%")), "a%");
    }

    #[test]
    fn test_expand_pattern_dedup_order() {
        // 'a' appears both as literal and inside the lowercase expansion;
        // first occurrence wins
        let expanded = expand_pattern("a@", None);
        assert_eq!(expanded, CHARSET_LOWERCASE);
        assert!(expanded.starts_with('a'));
    }

    #[test]
    fn test_pattern_positions() {
        let positions = pattern_positions("pass%%", None);
        assert_eq!(positions.len(), 6);
        assert_eq!(positions[0], vec!['p']);
        assert_eq!(positions[3], vec!['s']);
        assert_eq!(positions[4].len(), 10);
        assert_eq!(positions[5].len(), 10);
    }

    #[test]
    fn test_merge_charsets() {
        assert_eq!(merge_charsets(&["abc", "bcd"]), "abcd");
        assert_eq!(merge_charsets(&["", "xy", "yx"]), "xy");
    }
}
