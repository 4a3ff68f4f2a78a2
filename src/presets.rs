//! Preset management
//!
//! Ships a handful of built-in configurations and lets users persist their
//! own as JSON files under `~/.wordlist-forge/presets`. Built-ins shadow
//! custom presets with the same name and cannot be deleted.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::{Config, FilterConfig, GenerationMode};
use crate::error::{ForgeError, Result};

/// Names of the built-in presets, in display order
pub const BUILTIN_NAMES: &[&str] = &[
    "pentest_default",
    "meme_humor_pack",
    "api_dev_wordlist",
    "social_media_usernames",
    "pattern_basic",
];

/// A named, described configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Preset {
    pub name: String,
    pub description: String,
    pub config: Config,
}

fn field_mode(fields: &[&str], separator: Option<&str>) -> GenerationMode {
    GenerationMode::Fields {
        enabled: fields.iter().map(|s| s.to_string()).collect(),
        separator: separator.map(str::to_string),
    }
}

/// The built-in presets
pub fn builtin_presets() -> Vec<Preset> {
    vec![
        Preset {
            name: "pentest_default".into(),
            description: "Standard pentesting wordlist".into(),
            config: Config {
                min_length: 6,
                max_length: 16,
                mode: field_mode(
                    &[
                        "company_name",
                        "dev_handles",
                        "first_name_male_0",
                        "birth_year",
                    ],
                    None,
                ),
                transforms: vec!["leet_basic".into(), "append_numbers_4".into()],
                filters: FilterConfig {
                    min_len: 6,
                    max_len: 32,
                    ..FilterConfig::default()
                },
                dedupe: true,
                ..Config::default()
            },
        },
        Preset {
            name: "meme_humor_pack".into(),
            description: "Creative wordlist with humor".into(),
            config: Config {
                min_length: 3,
                max_length: 20,
                mode: field_mode(
                    &[
                        "fav_meme_format",
                        "favorite_joke",
                        "favorite_pun",
                        "go_to_reaction_emoji",
                    ],
                    None,
                ),
                transforms: vec!["emoji_insertion".into(), "capitalize".into()],
                filters: FilterConfig {
                    min_len: 3,
                    max_len: 50,
                    ..FilterConfig::default()
                },
                ..Config::default()
            },
        },
        Preset {
            name: "api_dev_wordlist".into(),
            description: "API endpoint patterns".into(),
            config: Config {
                min_length: 4,
                max_length: 20,
                mode: field_mode(
                    &["dev_handles", "programming_language", "database_name"],
                    None,
                ),
                transforms: vec!["lowercase".into(), "capitalize".into()],
                prefix: Some("/api/".into()),
                filters: FilterConfig {
                    min_len: 4,
                    max_len: 50,
                    ..FilterConfig::default()
                },
                ..Config::default()
            },
        },
        Preset {
            name: "social_media_usernames".into(),
            description: "Social media handles".into(),
            config: Config {
                min_length: 3,
                max_length: 15,
                mode: field_mode(
                    &["first_name_male_0", "first_name_female_0", "last_name_0"],
                    None,
                ),
                transforms: vec!["lowercase".into(), "append_numbers_2".into()],
                filters: FilterConfig {
                    min_len: 3,
                    max_len: 20,
                    ..FilterConfig::default()
                },
                ..Config::default()
            },
        },
        Preset {
            name: "pattern_basic".into(),
            description: "Crunch-style pattern examples".into(),
            config: Config {
                min_length: 4,
                max_length: 8,
                mode: GenerationMode::Pattern {
                    // pass + 2 digits
                    pattern: "pass%%".into(),
                    literal_chars: None,
                },
                filters: FilterConfig {
                    min_len: 4,
                    max_len: 10,
                    ..FilterConfig::default()
                },
                ..Config::default()
            },
        },
    ]
}

fn builtin(name: &str) -> Option<Preset> {
    builtin_presets().into_iter().find(|p| p.name == name)
}

/// Loads, saves, and lists presets in a directory
pub struct PresetManager {
    preset_dir: PathBuf,
}

impl PresetManager {
    /// Manager over the default preset directory, created if missing
    pub fn new() -> Result<Self> {
        let home = std::env::var_os("HOME")
            .ok_or_else(|| ForgeError::Preset("cannot determine home directory".into()))?;
        Self::with_dir(PathBuf::from(home).join(".wordlist-forge").join("presets"))
    }

    /// Manager over an explicit directory, created if missing
    pub fn with_dir(preset_dir: impl Into<PathBuf>) -> Result<Self> {
        let preset_dir = preset_dir.into();
        fs::create_dir_all(&preset_dir)?;
        Ok(Self { preset_dir })
    }

    pub fn preset_dir(&self) -> &Path {
        &self.preset_dir
    }

    /// All preset names, built-in and custom, sorted
    pub fn list_presets(&self) -> Vec<String> {
        let mut names: Vec<String> = BUILTIN_NAMES.iter().map(|s| s.to_string()).collect();

        if let Ok(entries) = fs::read_dir(&self.preset_dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().and_then(|e| e.to_str()) != Some("json") {
                    continue;
                }
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    if !names.iter().any(|n| n == stem) {
                        names.push(stem.to_string());
                    }
                }
            }
        }

        names.sort();
        names
    }

    /// Look up a preset, built-ins first
    pub fn get_preset(&self, name: &str) -> Result<Preset> {
        if let Some(preset) = builtin(name) {
            return Ok(preset);
        }

        let path = self.preset_path(name);
        if path.exists() {
            let raw = fs::read_to_string(&path).map_err(|source| ForgeError::PresetRead {
                path: path.clone(),
                source,
            })?;
            return serde_json::from_str(&raw)
                .map_err(|source| ForgeError::PresetParse { path, source });
        }

        Err(ForgeError::Preset(format!("preset not found: {name}")))
    }

    /// Resolve a preset straight to its configuration
    pub fn get_config(&self, name: &str) -> Result<Config> {
        Ok(self.get_preset(name)?.config)
    }

    /// Persist a custom preset as pretty-printed JSON
    pub fn save_preset(&self, name: &str, description: &str, config: &Config) -> Result<()> {
        let preset = Preset {
            name: name.to_string(),
            description: description.to_string(),
            config: config.clone(),
        };

        let path = self.preset_path(name);
        let json = serde_json::to_string_pretty(&preset)
            .map_err(|e| ForgeError::Preset(format!("cannot serialize preset {name}: {e}")))?;
        fs::write(&path, json)?;
        log::info!("saved preset {} to {}", name, path.display());
        Ok(())
    }

    /// Remove a custom preset. Built-ins are not deletable.
    pub fn delete_preset(&self, name: &str) -> Result<()> {
        if BUILTIN_NAMES.contains(&name) {
            return Err(ForgeError::Preset(format!(
                "cannot delete built-in preset: {name}"
            )));
        }

        let path = self.preset_path(name);
        if !path.exists() {
            return Err(ForgeError::Preset(format!("preset not found: {name}")));
        }
        fs::remove_file(&path)?;
        Ok(())
    }

    /// Human-readable rendering of one preset
    pub fn show_preset(&self, name: &str) -> Result<String> {
        let preset = self.get_preset(name)?;
        let config = serde_json::to_string_pretty(&preset.config)
            .map_err(|e| ForgeError::Preset(format!("cannot render preset {name}: {e}")))?;
        Ok(format!(
            "Preset: {}\nDescription: {}\n\nConfiguration:\n{}",
            preset.name, preset.description, config
        ))
    }

    fn preset_path(&self, name: &str) -> PathBuf {
        self.preset_dir.join(format!("{name}.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_builtins_listed_and_loadable() {
        let dir = tempdir().unwrap();
        let manager = PresetManager::with_dir(dir.path()).unwrap();

        let names = manager.list_presets();
        for builtin in BUILTIN_NAMES {
            assert!(names.iter().any(|n| n == builtin));
        }

        let preset = manager.get_preset("pentest_default").unwrap();
        assert!(preset.config.dedupe);
        assert_eq!(preset.config.min_length, 6);
    }

    #[test]
    fn test_builtin_configs_validate() {
        for preset in builtin_presets() {
            assert!(preset.config.validate().is_ok(), "{}", preset.name);
        }
    }

    #[test]
    fn test_save_and_reload_roundtrip() {
        let dir = tempdir().unwrap();
        let manager = PresetManager::with_dir(dir.path()).unwrap();

        let config = Config {
            min_length: 5,
            max_length: 9,
            transforms: vec!["uppercase".into()],
            ..Config::default()
        };
        manager.save_preset("custom", "my preset", &config).unwrap();

        let back = manager.get_preset("custom").unwrap();
        assert_eq!(back.description, "my preset");
        assert_eq!(back.config.min_length, 5);
        assert_eq!(back.config.transforms, vec!["uppercase".to_string()]);
        assert!(manager.list_presets().iter().any(|n| n == "custom"));
    }

    #[test]
    fn test_delete_rules() {
        let dir = tempdir().unwrap();
        let manager = PresetManager::with_dir(dir.path()).unwrap();

        assert!(manager.delete_preset("pentest_default").is_err());
        assert!(manager.delete_preset("ghost").is_err());

        manager
            .save_preset("doomed", "temp", &Config::default())
            .unwrap();
        manager.delete_preset("doomed").unwrap();
        assert!(manager.get_preset("doomed").is_err());
    }

    #[test]
    fn test_unknown_preset_error() {
        let dir = tempdir().unwrap();
        let manager = PresetManager::with_dir(dir.path()).unwrap();
        assert!(matches!(
            manager.get_preset("nope"),
            Err(ForgeError::Preset(_))
        ));
    }

    #[test]
    fn test_show_preset_contains_description() {
        let dir = tempdir().unwrap();
        let manager = PresetManager::with_dir(dir.path()).unwrap();
        let shown = manager.show_preset("pattern_basic").unwrap();
        assert!(shown.contains("Crunch-style pattern examples"));
        assert!(shown.contains("pass%%"));
    }
}
