use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("failed to read current working directory: {0}")]
    CurrentDir(std::io::Error),
    #[error("failed to read profile file {path}: {source}", path = path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to deserialize YAML: {0}")]
    YamlDeserialization(serde_yaml::Error),
    #[error("profile {path} must be a YAML mapping", path = path.display())]
    ProfileNotMapping { path: PathBuf },
    #[error("missing required key `{key}` in profile {path}", path = path.display())]
    MissingKey { key: String, path: PathBuf },
    #[error("key `{key}` in profile {path} must be a string", path = path.display())]
    InvalidValue { key: String, path: PathBuf },
    #[error("unknown dataset layout: {0}")]
    UnknownLayout(String),
}

pub type SettingsResult<T> = std::result::Result<T, SettingsError>;
