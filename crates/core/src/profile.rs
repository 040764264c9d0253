//! YAML profile loading.
//!
//! A profile is a YAML mapping stored at `<root>/config/<name>.yaml`. Only a handful of keys
//! are ever consumed, so the mapping is kept untyped and queried by key.

use crate::{SettingsError, SettingsResult};
use serde_yaml::{Mapping, Value};
use std::path::{Path, PathBuf};

/// A parsed profile mapping together with the file it was read from.
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    path: PathBuf,
    values: Mapping,
}

impl Profile {
    /// An empty profile attributed to `path`.
    pub fn empty(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            values: Mapping::new(),
        }
    }

    /// Build a profile from an already parsed mapping.
    pub fn from_mapping(path: impl Into<PathBuf>, values: Mapping) -> Self {
        Self {
            path: path.into(),
            values,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn values(&self) -> &Mapping {
        &self.values
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the string stored under `key`.
    ///
    /// An absent key, or one explicitly set to null, is [`SettingsError::MissingKey`].
    /// Any other non-string value is [`SettingsError::InvalidValue`].
    pub fn required_str(&self, key: &str) -> SettingsResult<&str> {
        self.optional_str(key)?
            .ok_or_else(|| SettingsError::MissingKey {
                key: key.to_owned(),
                path: self.path.clone(),
            })
    }

    /// Returns the string stored under `key`, or `None` if it is absent or null.
    pub fn optional_str(&self, key: &str) -> SettingsResult<Option<&str>> {
        match self.values.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(value)) => Ok(Some(value.as_str())),
            Some(_) => Err(SettingsError::InvalidValue {
                key: key.to_owned(),
                path: self.path.clone(),
            }),
        }
    }
}

/// Load the profile at `path`.
///
/// A missing file yields an empty profile. An empty or null document is also treated as an
/// empty mapping. No schema validation is performed.
///
/// # Errors
///
/// - [`SettingsError::FileRead`] if the file exists but cannot be read.
/// - [`SettingsError::YamlDeserialization`] if the content is not valid YAML.
/// - [`SettingsError::ProfileNotMapping`] if the top-level document is a list or scalar.
pub fn load_profile(path: &Path) -> SettingsResult<Profile> {
    if !path.exists() {
        tracing::debug!("profile not found, using empty mapping: {}", path.display());
        return Ok(Profile::empty(path));
    }

    let contents = std::fs::read_to_string(path).map_err(|source| SettingsError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    if contents.trim().is_empty() {
        return Ok(Profile::empty(path));
    }

    let document: Value =
        serde_yaml::from_str(&contents).map_err(SettingsError::YamlDeserialization)?;

    let values = match document {
        Value::Mapping(values) => values,
        Value::Null => Mapping::new(),
        _ => {
            return Err(SettingsError::ProfileNotMapping {
                path: path.to_path_buf(),
            })
        }
    };

    tracing::debug!("loaded profile {} ({} keys)", path.display(), values.len());
    Ok(Profile::from_mapping(path, values))
}
