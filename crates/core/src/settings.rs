//! Settings construction.
//!
//! [`load_settings`] turns a project root and a profile name into an immutable [`Settings`]
//! record. Every call re-reads the profile from disk, so edits to the profile are visible to
//! the next call without any invalidation step.

use crate::config::profile_path;
use crate::constants::{
    DATABASES_DIR_NAME, DB_NAME_KEY, DEFAULT_PROFILE, LAYOUT_KEY, MIMIC_ROOT_KEY,
};
use crate::paths::mimic::DatasetLayout;
use crate::profile::{load_profile, Profile};
use crate::SettingsResult;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// A single dataset file on the settings record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatasetFile {
    field: &'static str,
    path: PathBuf,
}

impl DatasetFile {
    pub fn field(&self) -> &'static str {
        self.field
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Resolved filesystem paths for one profile.
///
/// This is a snapshot of the profile at load time and cannot be mutated after construction.
/// Files are kept in the declaration order of the layout table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Settings {
    db_path: PathBuf,
    dataset_root: PathBuf,
    layout: &'static DatasetLayout,
    files: Vec<DatasetFile>,
}

impl Settings {
    /// Build settings from an already loaded profile.
    ///
    /// `DB_name` and `MIMIC_root` are required, in that order. The layout is taken from
    /// `layout` if given, else from the profile's `layout` key, else the default layout.
    /// A relative `MIMIC_root` is resolved against `root`.
    ///
    /// # Errors
    ///
    /// - [`crate::SettingsError::MissingKey`] if a required key is absent.
    /// - [`crate::SettingsError::InvalidValue`] if a key holds a non-string value.
    /// - [`crate::SettingsError::UnknownLayout`] if the profile names an unknown layout.
    pub fn from_profile(
        root: &Path,
        profile: &Profile,
        layout: Option<&'static DatasetLayout>,
    ) -> SettingsResult<Self> {
        let db_name = profile.required_str(DB_NAME_KEY)?;
        let mimic_root = profile.required_str(MIMIC_ROOT_KEY)?;

        let layout = match layout {
            Some(layout) => layout,
            None => match profile.optional_str(LAYOUT_KEY)? {
                Some(name) => DatasetLayout::from_name(name)?,
                None => DatasetLayout::default_layout(),
            },
        };

        let dataset_root = root.join(mimic_root);
        let files = layout
            .tables()
            .iter()
            .map(|table| DatasetFile {
                field: table.field,
                path: dataset_root.join(layout.relative_path(table)),
            })
            .collect();

        Ok(Self {
            db_path: root.join(DATABASES_DIR_NAME).join(db_name),
            dataset_root,
            layout,
            files,
        })
    }

    /// Database file: `<root>/databases/<DB_name>`
    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    pub fn dataset_root(&self) -> &Path {
        &self.dataset_root
    }

    pub fn layout(&self) -> &'static DatasetLayout {
        self.layout
    }

    pub fn files(&self) -> &[DatasetFile] {
        &self.files
    }

    /// Path of the dataset file exposed as `field`, e.g. `patients_csv`.
    pub fn file(&self, field: &str) -> Option<&Path> {
        self.files
            .iter()
            .find(|file| file.field == field)
            .map(DatasetFile::path)
    }
}

/// Load settings for `profile` (or `"default"`) under `root`.
pub fn load_settings(root: &Path, profile: Option<&str>) -> SettingsResult<Settings> {
    load_settings_with_layout(root, profile, None)
}

/// Load settings with an explicit layout that takes precedence over the profile's `layout` key.
///
/// Reads `<root>/config/<profile>.yaml`; a missing file behaves as an empty profile and so
/// fails on the first required key.
pub fn load_settings_with_layout(
    root: &Path,
    profile: Option<&str>,
    layout: Option<&'static DatasetLayout>,
) -> SettingsResult<Settings> {
    let profile_name = profile.unwrap_or(DEFAULT_PROFILE);
    let path = profile_path(root, profile_name);
    let profile = load_profile(&path)?;

    let settings = Settings::from_profile(root, &profile, layout)?;
    tracing::debug!(
        "settings loaded for profile {} with layout {} ({} files)",
        profile_name,
        settings.layout(),
        settings.files().len()
    );
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paths::mimic::{LEGACY, MIMIC_IV_3_1};
    use crate::SettingsError;
    use std::fs;
    use tempfile::TempDir;

    fn write_profile(root: &Path, name: &str, contents: &str) {
        let config = root.join("config");
        fs::create_dir_all(&config).expect("Failed to create config dir");
        fs::write(config.join(format!("{name}.yaml")), contents).expect("Failed to write profile");
    }

    fn assert_missing_key(result: SettingsResult<Settings>, expected: &str) {
        match result {
            Err(SettingsError::MissingKey { key, .. }) => assert_eq!(key, expected),
            other => panic!("expected MissingKey({expected}), got {other:?}"),
        }
    }

    #[test]
    fn test_load_default_profile_legacy_layout() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        write_profile(
            root,
            "default",
            "DB_name: mimic.duckdb\nMIMIC_root: /data/mimic-iv\n",
        );

        let settings = load_settings(root, None).unwrap();

        assert_eq!(settings.db_path(), root.join("databases/mimic.duckdb"));
        assert_eq!(settings.dataset_root(), Path::new("/data/mimic-iv"));
        assert_eq!(settings.layout(), &LEGACY);
        assert_eq!(settings.files().len(), 20);
        assert_eq!(
            settings.file("admissions_csv").unwrap(),
            Path::new("/data/mimic-iv/core/admissions.csv")
        );
        assert_eq!(
            settings.file("patients_csv").unwrap(),
            Path::new("/data/mimic-iv/core/patients.csv")
        );
        assert_eq!(
            settings.file("services_csv").unwrap(),
            Path::new("/data/mimic-iv/hosp/services.csv")
        );
        for (file, table) in settings.files().iter().zip(LEGACY.tables()) {
            assert_eq!(file.field(), table.field);
            assert_eq!(
                file.path(),
                Path::new("/data/mimic-iv")
                    .join(table.category.dir_name())
                    .join(format!("{}.csv", table.stem))
            );
        }
    }

    #[test]
    fn test_load_named_profile_with_layout_key() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        write_profile(
            root,
            "ward",
            "DB_name: ward.db\nMIMIC_root: /mnt/physionet\nlayout: mimiciv-3.1\n",
        );

        let settings = load_settings(root, Some("ward")).unwrap();

        assert_eq!(settings.layout(), &MIMIC_IV_3_1);
        assert_eq!(settings.files().len(), 25);
        assert_eq!(
            settings.file("chartevents_csv").unwrap(),
            Path::new("/mnt/physionet/physionet.org/files/mimiciv/3.1/icu/chartevents.csv")
        );
        assert_eq!(
            settings.file("admissions_csv").unwrap(),
            Path::new("/mnt/physionet/physionet.org/files/mimiciv/3.1/hosp/admissions.csv")
        );
        assert_eq!(settings.db_path(), root.join("databases").join("ward.db"));
    }

    #[test]
    fn test_explicit_layout_overrides_profile_key() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        write_profile(
            root,
            "default",
            "DB_name: mimic.db\nMIMIC_root: /data\nlayout: mimiciv-3.1\n",
        );

        let settings = load_settings_with_layout(root, None, Some(&LEGACY)).unwrap();

        assert_eq!(settings.layout(), &LEGACY);
        assert!(settings.file("chartevents_csv").is_none());
    }

    #[test]
    fn test_unknown_layout_key() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        write_profile(
            root,
            "default",
            "DB_name: mimic.db\nMIMIC_root: /data\nlayout: mimic-iii\n",
        );

        let result = load_settings(root, None);

        assert!(matches!(result, Err(SettingsError::UnknownLayout(name)) if name == "mimic-iii"));
    }

    #[test]
    fn test_missing_profile_fails_on_first_key() {
        let temp = TempDir::new().unwrap();

        assert_missing_key(load_settings(temp.path(), Some("absent")), "DB_name");
    }

    #[test]
    fn test_missing_db_name() {
        let temp = TempDir::new().unwrap();
        write_profile(temp.path(), "default", "MIMIC_root: /data/mimic-iv\n");

        assert_missing_key(load_settings(temp.path(), None), "DB_name");
    }

    #[test]
    fn test_missing_mimic_root() {
        let temp = TempDir::new().unwrap();
        write_profile(temp.path(), "default", "DB_name: mimic.db\n");

        assert_missing_key(load_settings(temp.path(), None), "MIMIC_root");
    }

    #[test]
    fn test_malformed_profile_propagates() {
        let temp = TempDir::new().unwrap();
        write_profile(temp.path(), "default", "DB_name: [unterminated\n");

        let result = load_settings(temp.path(), None);

        assert!(matches!(result, Err(SettingsError::YamlDeserialization(_))));
    }

    #[test]
    fn test_relative_mimic_root_resolves_against_root() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        write_profile(root, "default", "DB_name: mimic.db\nMIMIC_root: data/mimic\n");

        let settings = load_settings(root, None).unwrap();

        assert_eq!(settings.dataset_root(), root.join("data/mimic"));
        assert_eq!(
            settings.file("labevents_csv").unwrap(),
            root.join("data/mimic/hosp/labevents.csv")
        );
    }

    #[test]
    fn test_repeated_loads_are_equal_and_not_cached() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        write_profile(root, "default", "DB_name: first.db\nMIMIC_root: /data/a\n");

        let first = load_settings(root, None).unwrap();
        let second = load_settings(root, None).unwrap();
        assert_eq!(first, second);

        write_profile(root, "default", "DB_name: second.db\nMIMIC_root: /data/b\n");
        let third = load_settings(root, None).unwrap();

        assert_ne!(first, third);
        assert_eq!(third.db_path(), root.join("databases/second.db"));
        assert_eq!(
            third.file("poe_csv").unwrap(),
            Path::new("/data/b/hosp/poe.csv")
        );
    }

    #[test]
    fn test_from_profile_without_filesystem() {
        let profile: serde_yaml::Mapping =
            serde_yaml::from_str("DB_name: x.db\nMIMIC_root: /m\n").unwrap();
        let profile = Profile::from_mapping("/nowhere/config/default.yaml", profile);

        let settings =
            Settings::from_profile(Path::new("/srv/xrh"), &profile, Some(&MIMIC_IV_3_1)).unwrap();

        assert_eq!(settings.db_path(), Path::new("/srv/xrh/databases/x.db"));
        assert_eq!(
            settings.file("d_items_csv").unwrap(),
            Path::new("/m/physionet.org/files/mimiciv/3.1/icu/d_items.csv")
        );
    }

    #[test]
    fn test_settings_serialize_layout_by_name() {
        let profile: serde_yaml::Mapping =
            serde_yaml::from_str("DB_name: x.db\nMIMIC_root: /m\n").unwrap();
        let profile = Profile::from_mapping("/cfg/default.yaml", profile);
        let settings = Settings::from_profile(Path::new("/srv"), &profile, None).unwrap();

        let json = serde_json::to_value(&settings).unwrap();

        assert_eq!(json["layout"], "legacy");
        assert_eq!(json["db_path"], "/srv/databases/x.db");
        assert_eq!(json["files"][0]["field"], "admissions_csv");
        assert_eq!(json["files"][0]["path"], "/m/core/admissions.csv");
    }
}
