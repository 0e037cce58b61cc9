use crate::settings::LifeSettings;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// A named preset containing simulation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Preset {
    pub name: String,
    pub description: String,
    pub settings: LifeSettings,
}

impl Preset {
    pub fn new(name: impl Into<String>, description: impl Into<String>, settings: LifeSettings) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            settings,
        }
    }
}

/// Manager for built-in and user presets
pub struct PresetManager {
    /// Built-in presets that ship with the app
    pub builtin: Vec<Preset>,
    /// User-created presets loaded from disk
    pub user: Vec<Preset>,
}

impl Default for PresetManager {
    fn default() -> Self {
        Self::new()
    }
}

impl PresetManager {
    pub fn new() -> Self {
        let mut manager = Self::builtin_only();
        if let Some(dir) = Self::presets_dir() {
            manager.load_user_presets(&dir);
        }
        manager
    }

    /// Manager with just the shipped presets
    pub fn builtin_only() -> Self {
        let mut manager = Self {
            builtin: Vec::new(),
            user: Vec::new(),
        };
        manager.load_builtin_presets();
        manager
    }

    /// Load the built-in presets
    fn load_builtin_presets(&mut self) {
        self.builtin = vec![
            Preset::new(
                "drifting",
                "Gliders drift in from off-screen every few seconds",
                LifeSettings::default(),
            ),
            Preset::new(
                "calm",
                "Sparser fill, faster clock, no glider injection",
                LifeSettings::calm(),
            ),
        ];
    }

    /// Get the presets directory path
    fn presets_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("glider-life").join("presets"))
    }

    /// Load user presets from a directory of JSON files. Unreadable files are skipped.
    pub fn load_user_presets(&mut self, dir: &Path) {
        let Ok(entries) = fs::read_dir(dir) else {
            return;
        };

        for entry in entries.flatten() {
            let path = entry.path();
            if !path.extension().is_some_and(|e| e == "json") {
                continue;
            }
            let parsed = fs::read_to_string(&path)
                .map_err(|e| e.to_string())
                .and_then(|content| serde_json::from_str::<Preset>(&content).map_err(|e| e.to_string()));
            match parsed {
                Ok(preset) => {
                    log::debug!("loaded preset {} from {}", preset.name, path.display());
                    self.user.push(preset);
                }
                Err(err) => log::warn!("skipping preset {}: {}", path.display(), err),
            }
        }
    }

    /// Get all presets (builtin + user)
    pub fn all_presets(&self) -> impl Iterator<Item = &Preset> {
        self.builtin.iter().chain(self.user.iter())
    }

    /// Find a preset by name
    pub fn find(&self, name: &str) -> Option<&Preset> {
        self.all_presets().find(|p| p.name.eq_ignore_ascii_case(name))
    }

    /// Get preset names for display
    pub fn preset_names(&self) -> Vec<&str> {
        self.all_presets().map(|p| p.name.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_builtin_presets_match_variants() {
        let manager = PresetManager::builtin_only();
        let drifting = manager.find("drifting").unwrap();
        assert!(drifting.settings.glider_spawning);
        assert_eq!(drifting.settings.density, 0.3);

        let calm = manager.find("calm").unwrap();
        assert!(!calm.settings.glider_spawning);
        assert_eq!(calm.settings.density, 0.2);
    }

    #[test]
    fn test_find_is_case_insensitive() {
        let manager = PresetManager::builtin_only();
        assert!(manager.find("CALM").is_some());
        assert!(manager.find("Drifting").is_some());
        assert!(manager.find("missing").is_none());
    }

    #[test]
    fn test_load_user_presets_skips_bad_files() {
        let dir = TempDir::new().unwrap();
        let preset = Preset::new(
            "slow",
            "One step a second",
            LifeSettings {
                step_interval_ms: 1000,
                ..LifeSettings::default()
            },
        );
        fs::write(
            dir.path().join("slow.json"),
            serde_json::to_string_pretty(&preset).unwrap(),
        )
        .unwrap();
        fs::write(dir.path().join("broken.json"), "{").unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let mut manager = PresetManager::builtin_only();
        manager.load_user_presets(dir.path());

        assert_eq!(manager.user.len(), 1);
        assert_eq!(manager.find("slow").unwrap().settings.step_interval_ms, 1000);
        assert_eq!(manager.preset_names(), vec!["drifting", "calm", "slow"]);
    }

    #[test]
    fn test_missing_presets_dir_is_ignored() {
        let mut manager = PresetManager::builtin_only();
        manager.load_user_presets(Path::new("/nonexistent/glider-life/presets"));
        assert!(manager.user.is_empty());
    }
}
