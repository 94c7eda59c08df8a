//! Persisted configuration and the profile store
//!
//! The store is the single source of truth for margin presets and a few
//! session preferences. Every mutation rewrites the config file immediately
//! (write-implies-persist), so the on-disk state is never more than one
//! change behind memory. Saves go through a temp file and rename so a
//! subsequent load observes either the old or the new content, never a
//! truncated mix.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::config::profile::{Profile, default_profiles};
use crate::error::ConfigError;

/// Top-level persisted state
///
/// All fields carry serde defaults so files written by older versions
/// deserialize with sensible values for anything they are missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Last directory a PDF was opened from
    #[serde(default = "default_last_dir")]
    pub last_dir: PathBuf,

    /// Index into `profiles` of the profile active at last shutdown
    #[serde(default)]
    pub last_profile: usize,

    /// Ordered profile list; order is the index space every selection
    /// operation (and `last_profile`) refers to
    #[serde(default = "default_profiles")]
    pub profiles: Vec<Profile>,

    /// Override path for the converter binary; `None` means $PATH lookup
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub converter_path: Option<PathBuf>,
}

fn default_last_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("."))
}

impl Default for Config {
    fn default() -> Self {
        Self {
            last_dir: default_last_dir(),
            last_profile: 0,
            profiles: default_profiles(),
            converter_path: None,
        }
    }
}

/// A top-level configuration value, for keyed access via [`ProfileStore::get`]
/// and [`ProfileStore::set`]
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Path(PathBuf),
    Index(usize),
    Profiles(Vec<Profile>),
    OptionalPath(Option<PathBuf>),
}

fn expected_type(key: &str) -> &'static str {
    match key {
        "last_dir" => "path",
        "last_profile" => "index",
        "profiles" => "profile list",
        "converter_path" => "optional path",
        _ => "unknown",
    }
}

/// Owns the in-memory [`Config`] and the file it persists to
pub struct ProfileStore {
    path: PathBuf,
    config: Config,
}

impl ProfileStore {
    /// Per-user config file location
    pub fn default_path() -> PathBuf {
        let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push(crate::constants::config::APP_DIR);
        path.push(crate::constants::config::FILENAME);
        path
    }

    /// Open the store at the default per-user path
    pub fn open() -> Self {
        Self::open_at(Self::default_path())
    }

    /// Open the store against an explicit file path
    ///
    /// A missing, unreadable, or unparsable file is never fatal: the store
    /// starts from a fresh default config instead so a broken file can't
    /// block the user from using the tool.
    pub fn open_at(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let config = Self::load_from(&path);
        let mut store = Self { path, config };
        store.repair();
        store
    }

    fn load_from(path: &Path) -> Config {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                info!(path = %path.display(), "no config file, starting from defaults");
                return Config::default();
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to read config, starting from defaults");
                return Config::default();
            }
        };

        match serde_json::from_str::<Config>(&contents) {
            Ok(config) => {
                info!(path = %path.display(), profiles = config.profiles.len(), "loaded config");
                config
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to parse config, starting from defaults");
                Config::default()
            }
        }
    }

    /// Restore the invariants a hand-edited file may have broken:
    /// at least one profile, `last_profile` in range.
    fn repair(&mut self) {
        if self.config.profiles.is_empty() {
            warn!("config has no profiles, restoring the built-in default");
            self.config.profiles = default_profiles();
        }
        let last_valid = self.config.profiles.len() - 1;
        if self.config.last_profile > last_valid {
            warn!(
                last_profile = self.config.last_profile,
                clamped_to = last_valid,
                "last_profile out of range, clamping"
            );
            self.config.last_profile = last_valid;
        }
    }

    /// Write the full config to disk
    ///
    /// Creates the parent directory if needed, then writes to a temp file in
    /// the same directory and renames it over the target. A failure leaves
    /// the in-memory state intact; the caller decides whether to retry.
    pub fn save(&self) -> Result<(), ConfigError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let contents = serde_json::to_string_pretty(&self.config)?;

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, contents).map_err(|source| ConfigError::Io {
            path: tmp.clone(),
            source,
        })?;
        fs::rename(&tmp, &self.path).map_err(|source| ConfigError::Io {
            path: self.path.clone(),
            source,
        })?;

        info!(path = %self.path.display(), "saved config");
        Ok(())
    }

    /// Keyed read of a top-level field; unknown keys yield `None`, never an error
    pub fn get(&self, key: &str) -> Option<Value> {
        match key {
            "last_dir" => Some(Value::Path(self.config.last_dir.clone())),
            "last_profile" => Some(Value::Index(self.config.last_profile)),
            "profiles" => Some(Value::Profiles(self.config.profiles.clone())),
            "converter_path" => Some(Value::OptionalPath(self.config.converter_path.clone())),
            _ => None,
        }
    }

    /// Keyed write of a top-level field, persisted immediately
    pub fn set(&mut self, key: &str, value: Value) -> Result<(), ConfigError> {
        match (key, value) {
            ("last_dir", Value::Path(path)) => self.config.last_dir = path,
            ("last_profile", Value::Index(index)) => {
                if index >= self.config.profiles.len() {
                    return Err(ConfigError::ProfileIndexOutOfRange(index));
                }
                self.config.last_profile = index;
            }
            ("profiles", Value::Profiles(profiles)) => {
                if profiles.is_empty() {
                    return Err(ConfigError::CannotDeleteLastProfile);
                }
                self.config.profiles = profiles;
                let last_valid = self.config.profiles.len() - 1;
                if self.config.last_profile > last_valid {
                    self.config.last_profile = last_valid;
                }
            }
            ("converter_path", Value::OptionalPath(path)) => self.config.converter_path = path,
            ("last_dir" | "last_profile" | "profiles" | "converter_path", _) => {
                return Err(ConfigError::WrongValueType {
                    key: key.to_string(),
                    expected: expected_type(key),
                });
            }
            (_, _) => return Err(ConfigError::UnknownKey(key.to_string())),
        }
        self.save()
    }

    /// Append a profile to the end of the list
    pub fn add_profile(&mut self, profile: Profile) -> Result<(), ConfigError> {
        self.config.profiles.push(profile);
        self.save()
    }

    /// Delete the profile at `index`
    ///
    /// Deleting the last remaining profile is rejected without mutating
    /// anything; `last_profile` is clamped back into range afterwards.
    pub fn delete_profile(&mut self, index: usize) -> Result<(), ConfigError> {
        if index >= self.config.profiles.len() {
            return Err(ConfigError::ProfileIndexOutOfRange(index));
        }
        if self.config.profiles.len() == 1 {
            return Err(ConfigError::CannotDeleteLastProfile);
        }
        self.config.profiles.remove(index);
        let last_valid = self.config.profiles.len() - 1;
        if self.config.last_profile > last_valid {
            self.config.last_profile = last_valid;
        }
        self.save()
    }

    /// Rename the profile at `index`
    pub fn rename_profile(&mut self, index: usize, name: impl Into<String>) -> Result<(), ConfigError> {
        let profile = self
            .config
            .profiles
            .get_mut(index)
            .ok_or(ConfigError::ProfileIndexOutOfRange(index))?;
        profile.name = name.into();
        self.save()
    }

    /// Edit the fields of the profile at `index` in place
    pub fn update_profile(
        &mut self,
        index: usize,
        edit: impl FnOnce(&mut Profile),
    ) -> Result<(), ConfigError> {
        let profile = self
            .config
            .profiles
            .get_mut(index)
            .ok_or(ConfigError::ProfileIndexOutOfRange(index))?;
        edit(profile);
        self.save()
    }

    /// Mark the profile at `index` as the active one
    pub fn select_profile(&mut self, index: usize) -> Result<(), ConfigError> {
        if index >= self.config.profiles.len() {
            return Err(ConfigError::ProfileIndexOutOfRange(index));
        }
        self.config.last_profile = index;
        self.save()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn profiles(&self) -> &[Profile] {
        &self.config.profiles
    }

    pub fn selected_index(&self) -> usize {
        self.config.last_profile
    }

    /// The profile `last_profile` points at; always valid after `repair`
    pub fn selected_profile(&self) -> &Profile {
        &self.config.profiles[self.config.last_profile]
    }

    pub fn last_dir(&self) -> &Path {
        &self.config.last_dir
    }

    pub fn set_last_dir(&mut self, dir: PathBuf) -> Result<(), ConfigError> {
        self.config.last_dir = dir;
        self.save()
    }

    pub fn converter_path(&self) -> Option<&Path> {
        self.config.converter_path.as_deref()
    }

    pub fn set_converter_path(&mut self, path: Option<PathBuf>) -> Result<(), ConfigError> {
        self.config.converter_path = path;
        self.save()
    }
}
