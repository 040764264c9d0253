//! Constants used throughout the XRH core crate.
//!
//! This module contains directory names, profile keys and defaults so that
//! every on-disk name and YAML key is spelled in exactly one place.

/// Directory name holding the YAML profiles, relative to the project root.
pub const CONFIG_DIR_NAME: &str = "config";

/// Version-control marker used to recognise a project root.
pub const GIT_DIR_NAME: &str = ".git";

/// Directory name for database files, relative to the project root.
pub const DATABASES_DIR_NAME: &str = "databases";

/// Profile loaded when the caller does not name one.
pub const DEFAULT_PROFILE: &str = "default";

/// Extension of profile files inside the config directory.
pub const PROFILE_EXTENSION: &str = "yaml";

/// Extension of every dataset file.
pub const CSV_EXTENSION: &str = "csv";

/// Profile key holding the database filename.
pub const DB_NAME_KEY: &str = "DB_name";

/// Profile key holding the dataset root directory.
pub const MIMIC_ROOT_KEY: &str = "MIMIC_root";

/// Optional profile key selecting the dataset layout by name.
pub const LAYOUT_KEY: &str = "layout";
