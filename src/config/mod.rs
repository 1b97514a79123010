use crate::error::{GenError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// gen 사용자 설정
///
/// 설정 파일은 ~/.tinykit/gen-config 에 JSON으로 저장됩니다.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// 선호 provider (`None`이면 auto-detect)
    #[serde(default)]
    pub provider: Option<String>,

    /// Provider별 설정 (예약된 영역)
    #[serde(default)]
    pub providers: serde_json::Map<String, serde_json::Value>,
}

/// Persisted provider preference.
///
/// A missing or unreadable file means "no preference"; the tool keeps working
/// in auto-detect mode rather than failing.
#[derive(Debug, Clone)]
pub struct PreferenceStore {
    path: PathBuf,
}

impl PreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `~/.tinykit/gen-config`
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or_else(|| {
            GenError::ConfigPersistFailed("Could not find home directory".to_string())
        })?;
        Ok(home.join(".tinykit").join("gen-config"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 설정 파일에서 로드 (없거나 손상되었으면 기본값 사용)
    pub fn load(&self) -> Settings {
        match self.try_load() {
            Ok(settings) => settings,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Could not load config file, using defaults");
                Settings::default()
            }
        }
    }

    fn try_load(&self) -> Result<Settings> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no config file");
            return Ok(Settings::default());
        }

        let content = fs::read_to_string(&self.path)
            .map_err(|e| GenError::ConfigLoadCorrupt(e.to_string()))?;
        serde_json::from_str(&content).map_err(|e| GenError::ConfigLoadCorrupt(e.to_string()))
    }

    /// Stored provider name, or `None` for auto-detect.
    pub fn get(&self) -> Option<String> {
        self.load().provider
    }

    /// Store a provider name (`None` = auto-detect).
    ///
    /// The whole document is rewritten; any existing `providers` table is kept.
    pub fn set(&self, provider: Option<String>) -> Result<()> {
        let mut settings = self.load();
        settings.provider = provider;
        self.save(&settings)
    }

    /// 설정을 파일에 저장 (임시 파일에 쓴 뒤 rename)
    pub fn save(&self, settings: &Settings) -> Result<()> {
        let persist_err = |e: std::io::Error| GenError::ConfigPersistFailed(e.to_string());

        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir).map_err(persist_err)?;
            }
        }

        let json = serde_json::to_string_pretty(settings)
            .map_err(|e| GenError::ConfigPersistFailed(e.to_string()))?;

        let tmp_path = self.tmp_path();
        fs::write(&tmp_path, json).map_err(persist_err)?;
        if let Err(e) = fs::rename(&tmp_path, &self.path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(persist_err(e));
        }

        debug!(path = %self.path.display(), provider = ?settings.provider, "saved config");
        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "gen-config".into());
        name.push(format!(".{}.tmp", std::process::id()));
        self.path.with_file_name(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store(dir: &TempDir) -> PreferenceStore {
        PreferenceStore::new(dir.path().join(".tinykit").join("gen-config"))
    }

    #[test]
    fn test_missing_file_is_auto() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        assert_eq!(store.get(), None);
        assert_eq!(store.load(), Settings::default());
    }

    #[test]
    fn test_round_trip() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);

        store.set(Some("gemini".to_string())).unwrap();
        assert_eq!(store.get(), Some("gemini".to_string()));

        store.set(None).unwrap();
        assert_eq!(store.get(), None);
    }

    #[test]
    fn test_file_format() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        store.set(Some("gh".to_string())).unwrap();

        let raw = fs::read_to_string(store.path()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value, serde_json::json!({"provider": "gh", "providers": {}}));

        store.set(None).unwrap();
        let raw = fs::read_to_string(store.path()).unwrap();
        assert!(raw.contains("\"provider\": null"));
    }

    #[test]
    fn test_corrupt_file_falls_back_to_auto() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(store.path(), "{ provider: gemini,,").unwrap();

        assert_eq!(store.get(), None);

        // 손상된 파일도 set으로 복구 가능
        store.set(Some("gemini".to_string())).unwrap();
        assert_eq!(store.get(), Some("gemini".to_string()));
    }

    #[test]
    fn test_partial_document_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(store.path(), r#"{"provider": "gh"}"#).unwrap();

        let settings = store.load();
        assert_eq!(settings.provider.as_deref(), Some("gh"));
        assert!(settings.providers.is_empty());
    }

    #[test]
    fn test_set_keeps_provider_settings() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(
            store.path(),
            r#"{"provider": null, "providers": {"gh": {"model": "openai/gpt-4.1"}}}"#,
        )
        .unwrap();

        store.set(Some("gh".to_string())).unwrap();
        let settings = store.load();
        assert_eq!(settings.provider.as_deref(), Some("gh"));
        assert_eq!(settings.providers["gh"]["model"], "openai/gpt-4.1");
    }

    #[test]
    fn test_no_temp_file_left_behind() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        store.set(Some("gh".to_string())).unwrap();

        let entries: Vec<_> = fs::read_dir(store.path().parent().unwrap())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(entries, vec![std::ffi::OsString::from("gen-config")]);
    }

    #[test]
    fn test_unwritable_location_is_persist_error() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "").unwrap();
        let store = PreferenceStore::new(blocker.join("gen-config"));

        let result = store.set(Some("gh".to_string()));
        assert!(matches!(result, Err(GenError::ConfigPersistFailed(_))));
    }
}
