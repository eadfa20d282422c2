use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::accels::Accelerator;
use crate::actions::{self, APP_ACTIONS};
use crate::error::{AppError, Result};

/// Accelerators per application action, as stored in `accels.json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccelConfig {
    pub accels: BTreeMap<String, Vec<String>>,
}

impl Default for AccelConfig {
    fn default() -> Self {
        let mut accels = BTreeMap::new();
        accels.insert(actions::QUIT.to_string(), vec!["<Ctrl>q".to_string()]);
        accels.insert(actions::ABOUT.to_string(), Vec::new());
        accels.insert(actions::SHORTCUTS.to_string(), vec!["<Ctrl>question".to_string()]);
        accels.insert(actions::PREFERENCES.to_string(), vec!["<Ctrl>comma".to_string()]);
        Self { accels }
    }
}

impl AccelConfig {
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => {
                log::warn!("no config directory available, using default accelerators");
                Self::default()
            }
        }
    }

    fn config_path() -> Option<PathBuf> {
        let config_dir = dirs::config_dir()?.join("iplan");
        if let Err(e) = fs::create_dir_all(&config_dir) {
            log::warn!("cannot create {}: {e}", config_dir.display());
        }
        Some(config_dir.join("accels.json"))
    }

    /// Read `path`, writing the defaults there if it does not exist yet.
    /// Any problem with the file falls back to the defaults.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            let config = Self::default();
            if let Err(e) = config.save_to(path) {
                log::warn!("{e}");
            }
            return config;
        }

        match Self::read(path) {
            Ok(config) => config.validated(),
            Err(e) => {
                log::warn!("{e}, using default accelerators");
                Self::default()
            }
        }
    }

    fn read(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| AppError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| AppError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(|source| AppError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        fs::write(path, json).map_err(|source| AppError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Merge the user's entries over the defaults, dropping unknown actions
    /// and any action list with an accelerator that does not parse.
    fn validated(self) -> Self {
        let mut merged = Self::default();
        for (name, list) in self.accels {
            if actions::title_for(&name).is_none() {
                log::warn!("ignoring accelerators for unknown action {name:?}");
                continue;
            }
            match list.iter().map(|s| Accelerator::parse(s)).collect::<Result<Vec<_>>>() {
                Ok(_) => {
                    merged.accels.insert(name, list);
                }
                Err(e) => log::warn!("{e} for action {name:?}, keeping defaults"),
            }
        }
        merged
    }

    /// Parsed accelerators for `name`. Entries were checked on load, so
    /// anything that fails here is skipped.
    pub fn accels_for(&self, name: &str) -> Vec<Accelerator> {
        self.accels
            .get(name)
            .map(|list| list.iter().filter_map(|s| Accelerator::parse(s).ok()).collect())
            .unwrap_or_default()
    }

    /// Actions in declaration order paired with their accelerators
    pub fn bindings(&self) -> Vec<(&'static str, Vec<Accelerator>)> {
        APP_ACTIONS
            .iter()
            .map(|(name, _)| (*name, self.accels_for(name)))
            .collect()
    }
}
