//! Locating or downloading the Android platform tools.
//!
//! Unless a refresh is forced, an `adb` already on this machine is reused:
//! `ADBI_ADB`, then `PATH`, then the SDK pointed to by `ANDROID_HOME` or
//! `ANDROID_SDK_ROOT`. Otherwise the official platform-tools archive is
//! downloaded and unpacked into the local data directory.

use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::error::{AdbiError, Result};

/// Environment variable pointing at an `adb` binary to use as-is.
pub const ADB_ENV: &str = "ADBI_ADB";

const DEFAULT_BASE_URL: &str = "https://dl.google.com/android/repository";

const SDK_ENVS: [&str; 2] = ["ANDROID_HOME", "ANDROID_SDK_ROOT"];

type EnvLookup = Box<dyn Fn(&str) -> Option<String> + Send + Sync>;

#[async_trait]
pub trait ToolProvisioner: Send + Sync {
    /// Return the path of a usable `adb` binary. `force` skips reuse of
    /// binaries found on the system and always fetches a fresh copy.
    async fn provision(&self, force: bool) -> Result<PathBuf>;
}

pub struct PlatformTools {
    client: Client,
    base_url: String,
    install_dir: PathBuf,
    env: EnvLookup,
}

impl PlatformTools {
    pub fn new() -> Result<Self> {
        let install_dir = dirs::data_local_dir()
            .map(|p| p.join("adbi"))
            .ok_or_else(|| AdbiError::Config("Could not determine data directory".into()))?;
        Self::with_base_url(DEFAULT_BASE_URL, install_dir)
    }

    pub fn with_base_url(base_url: &str, install_dir: impl Into<PathBuf>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(300))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            install_dir: install_dir.into(),
            env: Box::new(|name: &str| std::env::var(name).ok()),
        })
    }

    /// Replace the process environment used to find an existing `adb`.
    #[cfg(test)]
    pub fn with_env(
        mut self,
        env: impl Fn(&str) -> Option<String> + Send + Sync + 'static,
    ) -> Self {
        self.env = Box::new(env);
        self
    }

    pub fn archive_url(&self) -> String {
        format!("{}/platform-tools-latest-{}.zip", self.base_url, host_os())
    }

    /// Where the downloaded `adb` ends up.
    pub fn installed_adb(&self) -> PathBuf {
        self.install_dir.join("platform-tools").join(adb_binary_name())
    }

    fn var(&self, name: &str) -> Option<String> {
        (self.env)(name).filter(|value| !value.trim().is_empty())
    }

    fn locate_existing(&self) -> Option<PathBuf> {
        if let Some(path) = self.var(ADB_ENV) {
            let path = PathBuf::from(shellexpand::tilde(&path).into_owned());
            if path.is_file() {
                tracing::debug!("Using adb from {}", ADB_ENV);
                return Some(path);
            }
            tracing::warn!("{} points to {}, which does not exist", ADB_ENV, path.display());
        }

        if let Some(paths) = self.var("PATH") {
            if let Ok(path) = which::which_in(adb_binary_name(), Some(paths), ".") {
                tracing::debug!("Using adb from PATH");
                return Some(path);
            }
        }

        SDK_ENVS
            .iter()
            .filter_map(|name| self.var(name))
            .map(|root| sdk_adb(Path::new(&root)))
            .find(|path| path.is_file())
    }

    async fn download(&self) -> Result<PathBuf> {
        let url = self.archive_url();
        tracing::info!("Downloading platform tools from {}", url);

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(AdbiError::Other(anyhow::anyhow!(
                "{} returned {}",
                url,
                response.status()
            )));
        }

        let bytes = response.bytes().await?.to_vec();
        tracing::debug!("Downloaded {} bytes", bytes.len());

        let dir = self.install_dir.clone();
        tokio::task::spawn_blocking(move || extract_archive(&bytes, &dir))
            .await
            .map_err(anyhow::Error::from)??;

        let adb = self.installed_adb();
        if !adb.is_file() {
            return Err(AdbiError::Other(anyhow::anyhow!(
                "archive did not contain {}",
                adb.display()
            )));
        }

        Ok(adb)
    }
}

#[async_trait]
impl ToolProvisioner for PlatformTools {
    async fn provision(&self, force: bool) -> Result<PathBuf> {
        if !force {
            if let Some(path) = self.locate_existing() {
                return Ok(path);
            }
        }

        self.download()
            .await
            .map_err(|e| AdbiError::ToolProvisioning(format!("couldn't download adb: {}", e)))
    }
}

fn extract_archive(bytes: &[u8], dest: &Path) -> Result<()> {
    std::fs::create_dir_all(dest)?;

    let mut archive = zip::ZipArchive::new(std::io::Cursor::new(bytes))?;
    archive.extract(dest)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let adb = dest.join("platform-tools").join(adb_binary_name());
        if adb.is_file() {
            std::fs::set_permissions(&adb, std::fs::Permissions::from_mode(0o755))?;
        }
    }

    Ok(())
}

fn sdk_adb(root: &Path) -> PathBuf {
    root.join("platform-tools").join(adb_binary_name())
}

fn adb_binary_name() -> &'static str {
    if cfg!(windows) {
        "adb.exe"
    } else {
        "adb"
    }
}

fn host_os() -> &'static str {
    if cfg!(windows) {
        "windows"
    } else if cfg!(target_os = "macos") {
        "darwin"
    } else {
        "linux"
    }
}
