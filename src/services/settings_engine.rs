// SearchView Settings Engine
// Loads and saves the client settings (origin and endpoint paths) as a JSON file.
// The SEARCHVIEW_ORIGIN environment variable overrides the stored origin.

use std::fs;
use std::path::Path;

use log::warn;
use url::Url;

use crate::types::errors::SettingsError;
use crate::types::settings::ClientSettings;

/// Environment variable overriding `ClientSettings::origin`.
pub const ORIGIN_ENV: &str = "SEARCHVIEW_ORIGIN";

const DEFAULT_CONFIG_FILE: &str = "searchview.json";

/// Trait defining the settings engine interface.
pub trait SettingsEngineTrait {
    fn load(&mut self) -> Result<ClientSettings, SettingsError>;
    fn save(&self) -> Result<(), SettingsError>;
    fn get_settings(&self) -> &ClientSettings;
    fn set_value(&mut self, key: &str, value: serde_json::Value) -> Result<(), SettingsError>;
    fn reset(&mut self) -> Result<(), SettingsError>;
    fn get_config_path(&self) -> &str;
}

/// Settings engine implementation that persists settings as JSON on disk.
pub struct SettingsEngine {
    config_path: String,
    settings: ClientSettings,
}

impl SettingsEngine {
    /// Creates a new SettingsEngine.
    ///
    /// If `path_override` is `None`, `searchview.json` in the working directory is used.
    pub fn new(path_override: Option<String>) -> Self {
        Self {
            config_path: path_override.unwrap_or_else(|| DEFAULT_CONFIG_FILE.to_string()),
            settings: ClientSettings::default(),
        }
    }

    /// Replaces the origin with `value` when present.
    pub fn apply_origin_override(&mut self, value: Option<String>) -> Result<(), SettingsError> {
        if let Some(origin) = value.filter(|v| !v.trim().is_empty()) {
            self.settings.origin = normalize_origin(&origin)?;
        }
        Ok(())
    }

    fn validate(settings: &mut ClientSettings) -> Result<(), SettingsError> {
        settings.origin = normalize_origin(&settings.origin)?;
        for endpoint in [&settings.search_endpoint, &settings.session_endpoint] {
            if !endpoint.starts_with('/') {
                return Err(SettingsError::InvalidValue(format!(
                    "endpoint must start with '/': {}",
                    endpoint
                )));
            }
        }
        Ok(())
    }
}

/// Reduces `input` to `scheme://host[:port]`, rejecting non-HTTP URLs.
pub fn normalize_origin(input: &str) -> Result<String, SettingsError> {
    let url = Url::parse(input.trim())
        .map_err(|e| SettingsError::InvalidValue(format!("invalid origin '{}': {}", input, e)))?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(SettingsError::InvalidValue(format!(
            "origin must be http or https: {}",
            input
        )));
    }
    if url.host_str().is_none() {
        return Err(SettingsError::InvalidValue(format!(
            "origin has no host: {}",
            input
        )));
    }
    Ok(url.origin().ascii_serialization())
}

impl SettingsEngineTrait for SettingsEngine {
    /// Loads settings from the JSON config file, then applies the environment override.
    ///
    /// A missing file yields defaults; a malformed file is a serialization error.
    fn load(&mut self) -> Result<ClientSettings, SettingsError> {
        let path = Path::new(&self.config_path);

        let mut settings = if path.exists() {
            let content = fs::read_to_string(path).map_err(|e| {
                SettingsError::IoError(format!("Failed to read config file: {}", e))
            })?;
            serde_json::from_str(&content).map_err(|e| {
                SettingsError::SerializationError(format!("Failed to parse config file: {}", e))
            })?
        } else {
            ClientSettings::default()
        };
        Self::validate(&mut settings)?;
        self.settings = settings;

        if let Err(e) = self.apply_origin_override(std::env::var(ORIGIN_ENV).ok()) {
            warn!("ignoring {}: {}", ORIGIN_ENV, e);
        }
        Ok(self.settings.clone())
    }

    /// Saves the current settings, creating parent directories as needed.
    fn save(&self) -> Result<(), SettingsError> {
        let path = Path::new(&self.config_path);

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                SettingsError::IoError(format!("Failed to create config directory: {}", e))
            })?;
        }

        let json = serde_json::to_string_pretty(&self.settings).map_err(|e| {
            SettingsError::SerializationError(format!("Failed to serialize settings: {}", e))
        })?;

        fs::write(path, json)
            .map_err(|e| SettingsError::IoError(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    fn get_settings(&self) -> &ClientSettings {
        &self.settings
    }

    /// Updates one top-level setting (`origin`, `search_endpoint`,
    /// `session_endpoint`), validates it, and saves to disk.
    fn set_value(&mut self, key: &str, value: serde_json::Value) -> Result<(), SettingsError> {
        if key.is_empty() {
            return Err(SettingsError::InvalidKey("Key cannot be empty".to_string()));
        }

        let mut json_value = serde_json::to_value(&self.settings).map_err(|e| {
            SettingsError::SerializationError(format!("Failed to serialize settings: {}", e))
        })?;

        match json_value.as_object_mut() {
            Some(map) if map.contains_key(key) => {
                map.insert(key.to_string(), value);
            }
            _ => {
                return Err(SettingsError::InvalidKey(format!(
                    "Key '{}' not found in settings",
                    key
                )));
            }
        }

        let mut new_settings: ClientSettings = serde_json::from_value(json_value).map_err(|e| {
            SettingsError::InvalidValue(format!("Invalid value for key '{}': {}", key, e))
        })?;
        Self::validate(&mut new_settings)?;

        self.settings = new_settings;
        self.save()
    }

    /// Resets all settings to defaults and saves to disk.
    fn reset(&mut self) -> Result<(), SettingsError> {
        self.settings = ClientSettings::default();
        self.save()
    }

    fn get_config_path(&self) -> &str {
        &self.config_path
    }
}
