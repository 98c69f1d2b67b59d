use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::{ConfigError, Settings};

const TMP_SUFFIX: &str = "tmp";

/// Handles persistence of the [`Settings`] document.
#[derive(Debug, Clone)]
pub struct SettingsManager {
    settings_path: PathBuf,
}

impl SettingsManager {
    pub fn new(settings_path: PathBuf) -> Self {
        Self { settings_path }
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self, ConfigError> {
        let config_dir = base.join("config");
        fs::create_dir_all(&config_dir)?;
        Ok(Self::new(config_dir.join("settings.json")))
    }

    pub fn settings_path(&self) -> &Path {
        &self.settings_path
    }

    /// Loads the stored settings, or the defaults when nothing has been saved yet.
    pub fn load(&self) -> Result<Settings, ConfigError> {
        if self.settings_path.exists() {
            let data = fs::read_to_string(&self.settings_path)?;
            serde_json::from_str(&data).map_err(|err| ConfigError::Serde(err.to_string()))
        } else {
            Ok(Settings::default())
        }
    }

    pub fn save(&self, settings: &Settings) -> Result<(), ConfigError> {
        if let Some(parent) = self.settings_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(settings)
            .map_err(|err| ConfigError::Serde(err.to_string()))?;
        let tmp = tmp_path(&self.settings_path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.settings_path)?;
        Ok(())
    }

    pub fn clear(&self) -> Result<(), ConfigError> {
        if self.settings_path.exists() {
            fs::remove_file(&self.settings_path)?;
        }
        Ok(())
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<(), ConfigError> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
