//! # XRH Core
//!
//! Settings resolution for MIMIC-IV based projects.
//!
//! This crate contains pure path construction:
//! - Project root discovery by walking up to `.git` or `config/`
//! - YAML profile loading from `<root>/config/<profile>.yaml`
//! - An immutable [`Settings`] record of database and dataset CSV paths
//!
//! **No data access**: opening the database or reading the CSV files belongs to downstream code
//! that consumes [`Settings`].

pub mod config;
pub mod constants;
pub mod error;
pub mod paths;
pub mod profile;
pub mod settings;

pub use config::{locate_project_root, resolve_project_root};
pub use error::{SettingsError, SettingsResult};
pub use paths::mimic::{DatasetCategory, DatasetLayout, DatasetTable};
pub use profile::{load_profile, Profile};
pub use settings::{load_settings, load_settings_with_layout, DatasetFile, Settings};
