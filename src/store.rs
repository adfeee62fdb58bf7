use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::models::JobApplication;

/// Outcome of reading the application list from disk. An absent file is
/// normal first-run state; a present-but-unreadable file is reported
/// separately so callers can warn instead of silently dropping data.
#[derive(Debug)]
pub enum Loaded {
    Empty,
    List(Vec<JobApplication>),
    Corrupt { error: String },
}

/// Holds the whole application list in a single JSON file. Every
/// mutation rewrites the file in full; there is no partial update.
/// One writer is assumed (concurrent processes are last-write-wins).
pub struct JobStore {
    path: PathBuf,
}

impl JobStore {
    pub fn open() -> Result<Self> {
        Ok(Self {
            path: data_dir()?.join("jobs.json"),
        })
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Loaded {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Loaded::Empty,
            Err(e) => {
                return Loaded::Corrupt {
                    error: e.to_string(),
                };
            }
        };
        match serde_json::from_str(&text) {
            Ok(list) => Loaded::List(list),
            Err(e) => Loaded::Corrupt {
                error: e.to_string(),
            },
        }
    }

    pub fn save(&self, list: &[JobApplication]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let text = serde_json::to_string_pretty(list)?;
        // Write-then-rename so a crash mid-write never clobbers the list.
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, text).with_context(|| format!("Failed to write {}", tmp.display()))?;
        fs::rename(&tmp, &self.path)
            .with_context(|| format!("Failed to replace {}", self.path.display()))?;
        Ok(())
    }
}

pub const KEY_API_KEY: &str = "gemini_api_key";
pub const KEY_USER_NAME: &str = "user_name";
pub const KEY_TARGET_ROLE: &str = "target_role";
pub const KEY_BACKEND_URL: &str = "backend_url";

/// Flat string key/value settings, one JSON object on disk. A missing
/// or unreadable file just means no settings yet; every value can be
/// re-entered from the Settings panel.
pub struct Settings {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl Settings {
    pub fn open() -> Result<Self> {
        Ok(Self::at(data_dir()?.join("settings.json")))
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = fs::read_to_string(&path)
            .ok()
            .and_then(|text| serde_json::from_str(&text).ok())
            .unwrap_or_default();
        Self { path, values }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        if value.is_empty() {
            self.values.remove(key);
        } else {
            self.values.insert(key.to_string(), value.to_string());
        }
        self.save()
    }

    pub fn clear(&mut self) -> Result<()> {
        self.values.clear();
        self.save()
    }

    pub fn api_key(&self) -> &str {
        self.get(KEY_API_KEY).unwrap_or_default()
    }

    pub fn user_name(&self) -> &str {
        self.get(KEY_USER_NAME).unwrap_or_default()
    }

    pub fn target_role(&self) -> &str {
        self.get(KEY_TARGET_ROLE).unwrap_or_default()
    }

    pub fn backend_url(&self) -> &str {
        self.get(KEY_BACKEND_URL)
            .unwrap_or(crate::ai::DEFAULT_BASE_URL)
    }

    fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let text = serde_json::to_string_pretty(&self.values)?;
        fs::write(&self.path, text)
            .with_context(|| format!("Failed to write {}", self.path.display()))?;
        Ok(())
    }
}

fn data_dir() -> Result<PathBuf> {
    // XDG data directory or fallback to the current directory
    if let Some(proj_dirs) = directories::ProjectDirs::from("", "", "careeros") {
        Ok(proj_dirs.data_dir().to_path_buf())
    } else {
        Ok(PathBuf::from("."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Status;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("careeros-{}-{}.json", name, uuid::Uuid::new_v4()))
    }

    #[test]
    fn test_load_absent_file_is_empty() {
        let store = JobStore::at(temp_path("absent"));
        assert!(matches!(store.load(), Loaded::Empty));
    }

    #[test]
    fn test_save_load_round_trip_preserves_order() {
        let path = temp_path("roundtrip");
        let store = JobStore::at(&path);
        let list = vec![
            JobApplication::new("Engineer", "Acme", Some("NYC"), None, Status::Applied),
            JobApplication::new("PM", "Globex", None, Some("$120k"), Status::Offer),
        ];
        store.save(&list).unwrap();

        match store.load() {
            Loaded::List(loaded) => assert_eq!(loaded, list),
            other => panic!("expected list, got {:?}", other),
        }
        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_malformed_file_is_reported_corrupt() {
        let path = temp_path("corrupt");
        fs::write(&path, "{ not json").unwrap();
        let store = JobStore::at(&path);
        assert!(matches!(store.load(), Loaded::Corrupt { .. }));
        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_save_overwrites_whole_list() {
        let path = temp_path("overwrite");
        let store = JobStore::at(&path);
        let first = vec![JobApplication::new(
            "Engineer",
            "Acme",
            None,
            None,
            Status::Applied,
        )];
        store.save(&first).unwrap();
        store.save(&[]).unwrap();

        match store.load() {
            Loaded::List(loaded) => assert!(loaded.is_empty()),
            other => panic!("expected empty list, got {:?}", other),
        }
        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_settings_set_get_clear() {
        let path = temp_path("settings");
        let mut settings = Settings::at(&path);
        settings.set(KEY_API_KEY, "abc123").unwrap();
        settings.set(KEY_USER_NAME, "Sam").unwrap();
        assert_eq!(settings.api_key(), "abc123");
        assert_eq!(settings.user_name(), "Sam");

        // Values survive a reopen
        let reopened = Settings::at(&path);
        assert_eq!(reopened.api_key(), "abc123");

        let mut settings = reopened;
        settings.clear().unwrap();
        assert_eq!(settings.api_key(), "");
        assert_eq!(settings.user_name(), "");
        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_settings_empty_value_removes_key() {
        let path = temp_path("settings-remove");
        let mut settings = Settings::at(&path);
        settings.set(KEY_TARGET_ROLE, "Embedded Engineer").unwrap();
        settings.set(KEY_TARGET_ROLE, "").unwrap();
        assert_eq!(settings.get(KEY_TARGET_ROLE), None);
        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_settings_malformed_file_starts_empty() {
        let path = temp_path("settings-corrupt");
        fs::write(&path, "not json at all").unwrap();
        let settings = Settings::at(&path);
        assert_eq!(settings.api_key(), "");
        fs::remove_file(&path).ok();
    }
}
