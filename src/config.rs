//! Persisted settings: the resolved `adb` path and the preferred device.
//!
//! The file is an open JSON object. Only `adbPath` and `device` are
//! interpreted; any other key is carried through updates untouched.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

use crate::error::{AdbiError, Result};

/// Environment variable overriding the config file location.
pub const CONFIG_ENV: &str = "ADBI_CONFIG";

const ADB_PATH_KEY: &str = "adbPath";
const DEVICE_KEY: &str = "device";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Config {
    /// Path to the `adb` binary. Stored as a string, or `false` when unknown.
    #[serde(rename = "adbPath", default, deserialize_with = "string_or_none")]
    pub adb_path: Option<PathBuf>,

    /// Device remembered from an earlier `-d` or interactive choice.
    #[serde(default, deserialize_with = "string_or_none")]
    pub device: Option<String>,
}

impl Config {
    fn from_map(map: &Map<String, Value>) -> Self {
        serde_json::from_value(Value::Object(map.clone())).unwrap_or_default()
    }

    /// Returns the configured `adb` path if it still exists on disk.
    pub fn existing_adb_path(&self) -> Option<&Path> {
        self.adb_path.as_deref().filter(|p| p.is_file())
    }
}

fn string_or_none<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: From<String>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) if !s.is_empty() => Some(T::from(s)),
        _ => None,
    })
}

/// A set of fields to merge over the persisted config. Unset fields are left
/// as they are on disk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartialConfig {
    pub adb_path: Option<PathBuf>,
    pub device: Option<String>,
}

impl PartialConfig {
    pub fn adb_path(path: impl Into<PathBuf>) -> Self {
        Self {
            adb_path: Some(path.into()),
            ..Default::default()
        }
    }

    pub fn device(device: impl Into<String>) -> Self {
        Self {
            device: Some(device.into()),
            ..Default::default()
        }
    }

    fn apply(self, map: &mut Map<String, Value>) {
        if let Some(path) = self.adb_path {
            map.insert(
                ADB_PATH_KEY.to_string(),
                Value::String(path.to_string_lossy().into_owned()),
            );
        }
        if let Some(device) = self.device {
            map.insert(DEVICE_KEY.to_string(), Value::String(device));
        }
    }
}

fn default_map() -> Map<String, Value> {
    let mut map = Map::new();
    map.insert(ADB_PATH_KEY.to_string(), Value::Bool(false));
    map
}

/// Read-modify-write access to the config file.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Resolve the config location: explicit flag, then `ADBI_CONFIG`, then
    /// the platform config directory.
    pub fn locate(flag: Option<&Path>) -> Result<Self> {
        Self::locate_with(flag, |name| std::env::var(name).ok())
    }

    fn locate_with(flag: Option<&Path>, env: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(path) = flag {
            return Ok(Self::at(path));
        }

        if let Some(path) = env(CONFIG_ENV).filter(|p| !p.trim().is_empty()) {
            return Ok(Self::at(shellexpand::tilde(&path).into_owned()));
        }

        Ok(Self::at(Self::default_path()?))
    }

    pub fn default_path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|p| p.join("adbi").join("config.json"))
            .ok_or_else(|| AdbiError::Config("Could not determine config directory".into()))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the config, creating the file with defaults when it is missing.
    ///
    /// Malformed content is replaced with defaults so that a valid file
    /// always exists afterwards. A file that cannot be read is left alone
    /// and the error is returned.
    pub fn load(&self) -> Result<Config> {
        let raw = self.load_raw()?;
        Ok(Config::from_map(&raw))
    }

    /// Merge `partial` over the persisted record and write it back.
    pub fn update(&self, partial: PartialConfig) -> Result<Config> {
        let mut raw = self.load_raw()?;
        partial.apply(&mut raw);
        self.write_raw(&raw)?;
        tracing::debug!("Updated config at {}", self.path.display());
        Ok(Config::from_map(&raw))
    }

    fn load_raw(&self) -> Result<Map<String, Value>> {
        match self.read_raw() {
            Ok(Some(map)) => Ok(map),
            Ok(None) => {
                tracing::debug!("Creating default config at {}", self.path.display());
                let defaults = default_map();
                self.write_raw(&defaults)?;
                Ok(defaults)
            }
            Err(e @ AdbiError::ConfigParse(_)) => {
                tracing::warn!("{}; resetting {} to defaults", e, self.path.display());
                let defaults = default_map();
                self.write_raw(&defaults)?;
                Ok(defaults)
            }
            Err(e) => Err(e),
        }
    }

    fn read_raw(&self) -> Result<Option<Map<String, Value>>> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            // not UTF-8
            Err(e) if e.kind() == ErrorKind::InvalidData => {
                return Err(AdbiError::ConfigParse(e.to_string()))
            }
            Err(e) => return Err(AdbiError::Io(e)),
        };

        match serde_json::from_str::<Value>(&content) {
            Ok(Value::Object(map)) => Ok(Some(map)),
            Ok(_) => Err(AdbiError::ConfigParse("expected a JSON object".into())),
            Err(e) => Err(AdbiError::ConfigParse(e.to_string())),
        }
    }

    /// Write-to-temp-then-rename so readers never observe a half-written file.
    fn write_raw(&self, map: &Map<String, Value>) -> Result<()> {
        let dir = match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
            _ => PathBuf::from("."),
        };
        std::fs::create_dir_all(&dir)?;

        let file_name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "config.json".to_string());
        let temp_file = dir.join(format!(".{}.{}.tmp", file_name, std::process::id()));

        let content = serde_json::to_string_pretty(map)?;
        std::fs::write(&temp_file, content)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&temp_file, std::fs::Permissions::from_mode(0o600))?;
        }

        std::fs::rename(&temp_file, &self.path).map_err(|e| {
            let _ = std::fs::remove_file(&temp_file);
            AdbiError::Io(e)
        })?;

        Ok(())
    }
}
