use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{PettyError, Result};
use crate::matcher::DEFAULT_THRESHOLD;
use crate::vendors::{load_vendor_file, VendorDirectory};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_threshold")]
    pub threshold: u8,
    #[serde(default)]
    pub vendors_file: Option<String>,
    /// Extra `token -> vendor` aliases, applied after the curated table.
    #[serde(default)]
    pub aliases: BTreeMap<String, String>,
}

fn default_threshold() -> u8 {
    DEFAULT_THRESHOLD
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
            vendors_file: None,
            aliases: BTreeMap::new(),
        }
    }
}

impl Settings {
    /// Flag value if given, else the saved default.
    pub fn threshold_or(&self, flag: Option<u8>) -> u8 {
        flag.unwrap_or(self.threshold).min(100)
    }

    /// Vendor directory for this run: `--vendors` beats the saved vendor file,
    /// which beats the built-in list. Saved aliases are layered on last.
    pub fn vendor_directory(&self, flag: Option<&str>) -> Result<VendorDirectory> {
        let path = flag.map(str::to_string).or_else(|| self.vendors_file.clone());
        let mut directory = match path {
            Some(p) => VendorDirectory::new(&load_vendor_file(Path::new(&shellexpand_path(&p)))?),
            None => VendorDirectory::builtin(),
        };
        directory.extend_aliases(&self.aliases);
        Ok(directory)
    }
}

fn config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("petty")
}

pub fn settings_path() -> PathBuf {
    config_dir().join("settings.json")
}

pub fn load_settings() -> Settings {
    let path = settings_path();
    if !path.exists() {
        return Settings::default();
    }
    let content = std::fs::read_to_string(&path).unwrap_or_default();
    serde_json::from_str(&content).unwrap_or_else(|e| {
        warn!(path = %path.display(), error = %e, "unreadable settings, using defaults");
        Settings::default()
    })
}

pub fn save_settings(settings: &Settings) -> Result<()> {
    let dir = config_dir();
    std::fs::create_dir_all(&dir)?;
    let json = serde_json::to_string_pretty(settings)
        .map_err(|e| PettyError::Settings(e.to_string()))?;
    std::fs::write(settings_path(), format!("{json}\n"))?;
    Ok(())
}

pub fn shellexpand_path(path: &str) -> String {
    if path.starts_with('~') {
        if let Some(home) = dirs::home_dir() {
            return path.replacen('~', &home.to_string_lossy(), 1);
        }
    }
    std::fs::canonicalize(path)
        .unwrap_or_else(|_| PathBuf::from(path))
        .to_string_lossy()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let mut settings = Settings {
            threshold: 90,
            vendors_file: Some("/tmp/vendors.txt".to_string()),
            aliases: BTreeMap::new(),
        };
        settings.aliases.insert("jh".to_string(), "Nairobi Java House Limited".to_string());
        let json = serde_json::to_string_pretty(&settings).unwrap();
        std::fs::write(&path, &json).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        let loaded: Settings = serde_json::from_str(&content).unwrap();
        assert_eq!(loaded.threshold, 90);
        assert_eq!(loaded.vendors_file.as_deref(), Some("/tmp/vendors.txt"));
        assert_eq!(loaded.aliases["jh"], "Nairobi Java House Limited");
    }

    #[test]
    fn test_defaults() {
        let s = Settings::default();
        assert_eq!(s.threshold, 86);
        assert!(s.vendors_file.is_none());
        assert!(s.aliases.is_empty());
    }

    #[test]
    fn test_load_merges_with_defaults() {
        let s: Settings = serde_json::from_str(r#"{"vendors_file": "/tmp/v.txt"}"#).unwrap();
        assert_eq!(s.threshold, 86);
        assert_eq!(s.vendors_file.as_deref(), Some("/tmp/v.txt"));
    }

    #[test]
    fn test_threshold_flag_overrides() {
        let s = Settings::default();
        assert_eq!(s.threshold_or(None), 86);
        assert_eq!(s.threshold_or(Some(70)), 70);
    }

    #[test]
    fn test_vendor_directory_from_flag_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vendors.txt");
        std::fs::write(&path, "Green Valley Farm\nGreen Hill Farm\n").unwrap();
        let mut s = Settings::default();
        s.aliases.insert("gvf".to_string(), "Green Valley Farm".to_string());
        let directory = s.vendor_directory(path.to_str()).unwrap();
        assert_eq!(directory.vendors().len(), 2);
        assert_eq!(directory.lookup_alias("gvf"), Some("Green Valley Farm"));
    }

    #[test]
    fn test_vendor_directory_defaults_to_builtin() {
        let directory = Settings::default().vendor_directory(None).unwrap();
        assert!(directory.lookup_alias("dtb").is_some());
    }
}
