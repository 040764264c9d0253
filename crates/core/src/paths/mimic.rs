//! MIMIC-IV dataset layouts.
//!
//! A layout is a declarative table describing where each CSV file lives relative to the
//! dataset root. Two layouts are known:
//!
//! ```text
//! legacy/                         mimiciv-3.1/
//!     core/                           physionet.org/files/mimiciv/3.1/
//!         admissions.csv                  hosp/
//!         ...                                 admissions.csv
//!     hosp/                                   ...
//!         labevents.csv                   icu/
//!         ...                                 chartevents.csv
//!                                             ...
//! ```
//!
//! Settings construction joins each table onto the dataset root; this module never touches
//! the filesystem.

use crate::constants::CSV_EXTENSION;
use crate::{SettingsError, SettingsResult};
use std::path::PathBuf;

/// Pre-3.0 module holding admissions, patients and transfers.
#[derive(Debug, Clone, Copy)]
pub struct CoreDir;

impl CoreDir {
    pub const NAME: &'static str = "core";
}

/// Hospital-wide module.
#[derive(Debug, Clone, Copy)]
pub struct HospDir;

impl HospDir {
    pub const NAME: &'static str = "hosp";
}

/// Intensive care module.
#[derive(Debug, Clone, Copy)]
pub struct IcuDir;

impl IcuDir {
    pub const NAME: &'static str = "icu";
}

/// Category subdirectory a dataset file belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetCategory {
    Core,
    Hosp,
    Icu,
}

impl DatasetCategory {
    pub const fn dir_name(self) -> &'static str {
        match self {
            DatasetCategory::Core => CoreDir::NAME,
            DatasetCategory::Hosp => HospDir::NAME,
            DatasetCategory::Icu => IcuDir::NAME,
        }
    }
}

/// One row of a layout table: `(field, category, stem)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatasetTable {
    /// Name of the field exposed on the settings record.
    pub field: &'static str,
    pub category: DatasetCategory,
    /// Filename without the `.csv` extension.
    pub stem: &'static str,
}

impl DatasetTable {
    const fn new(field: &'static str, category: DatasetCategory, stem: &'static str) -> Self {
        Self {
            field,
            category,
            stem,
        }
    }

    pub fn file_name(&self) -> String {
        format!("{}.{CSV_EXTENSION}", self.stem)
    }
}

/// A named set of dataset tables plus the version prefix they live under.
#[derive(Debug, PartialEq, Eq)]
pub struct DatasetLayout {
    name: &'static str,
    prefix: &'static [&'static str],
    tables: &'static [DatasetTable],
}

impl DatasetLayout {
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Path segments between the dataset root and the category directories.
    pub fn prefix(&self) -> &'static [&'static str] {
        self.prefix
    }

    pub fn tables(&self) -> &'static [DatasetTable] {
        self.tables
    }

    pub fn table(&self, field: &str) -> Option<&'static DatasetTable> {
        self.tables.iter().find(|table| table.field == field)
    }

    /// Relative path of `table`: `<prefix...>/<category>/<stem>.csv`
    pub fn relative_path(&self, table: &DatasetTable) -> PathBuf {
        let mut path: PathBuf = self.prefix.iter().collect();
        path.push(table.category.dir_name());
        path.push(table.file_name());
        path
    }

    /// Layout used when neither the caller nor the profile picks one.
    pub fn default_layout() -> &'static DatasetLayout {
        &LEGACY
    }

    /// Look up a known layout by name.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::UnknownLayout`] if no layout carries `name`.
    pub fn from_name(name: &str) -> SettingsResult<&'static DatasetLayout> {
        let wanted = name.trim();
        LAYOUTS
            .iter()
            .copied()
            .find(|layout| layout.name.eq_ignore_ascii_case(wanted))
            .ok_or_else(|| SettingsError::UnknownLayout(name.to_owned()))
    }
}

impl std::fmt::Display for DatasetLayout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl serde::Serialize for DatasetLayout {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.name)
    }
}

use DatasetCategory::{Core, Hosp, Icu};

const LEGACY_TABLES: &[DatasetTable] = &[
    DatasetTable::new("admissions_csv", Core, "admissions"),
    DatasetTable::new("patients_csv", Core, "patients"),
    DatasetTable::new("transfers_csv", Core, "transfers"),
    DatasetTable::new("d_hcpcs_csv", Hosp, "d_hcpcs"),
    DatasetTable::new("d_icd_diagnoses_csv", Hosp, "d_icd_diagnoses"),
    DatasetTable::new("d_icd_procedures_csv", Hosp, "d_icd_procedures"),
    DatasetTable::new("d_labitems_csv", Hosp, "d_labitems"),
    DatasetTable::new("diagnoses_icd_csv", Hosp, "diagnoses_icd"),
    DatasetTable::new("drgcodes_csv", Hosp, "drgcodes"),
    DatasetTable::new("emar_csv", Hosp, "emar"),
    DatasetTable::new("emar_detail_csv", Hosp, "emar_detail"),
    DatasetTable::new("hcpcsevents_csv", Hosp, "hcpcsevents"),
    DatasetTable::new("labevents_csv", Hosp, "labevents"),
    DatasetTable::new("microbiologyevents_csv", Hosp, "microbiologyevents"),
    DatasetTable::new("pharmacy_csv", Hosp, "pharmacy"),
    DatasetTable::new("poe_csv", Hosp, "poe"),
    DatasetTable::new("poe_detail_csv", Hosp, "poe_detail"),
    DatasetTable::new("prescriptions_csv", Hosp, "prescriptions"),
    DatasetTable::new("procedures_icd_csv", Hosp, "procedures_icd"),
    DatasetTable::new("services_csv", Hosp, "services"),
];

// 3.x folded the core module into hosp and published the icu module alongside it.
const MIMIC_IV_3_1_TABLES: &[DatasetTable] = &[
    DatasetTable::new("admissions_csv", Hosp, "admissions"),
    DatasetTable::new("patients_csv", Hosp, "patients"),
    DatasetTable::new("transfers_csv", Hosp, "transfers"),
    DatasetTable::new("d_hcpcs_csv", Hosp, "d_hcpcs"),
    DatasetTable::new("d_icd_diagnoses_csv", Hosp, "d_icd_diagnoses"),
    DatasetTable::new("d_icd_procedures_csv", Hosp, "d_icd_procedures"),
    DatasetTable::new("d_labitems_csv", Hosp, "d_labitems"),
    DatasetTable::new("diagnoses_icd_csv", Hosp, "diagnoses_icd"),
    DatasetTable::new("drgcodes_csv", Hosp, "drgcodes"),
    DatasetTable::new("emar_csv", Hosp, "emar"),
    DatasetTable::new("emar_detail_csv", Hosp, "emar_detail"),
    DatasetTable::new("hcpcsevents_csv", Hosp, "hcpcsevents"),
    DatasetTable::new("labevents_csv", Hosp, "labevents"),
    DatasetTable::new("microbiologyevents_csv", Hosp, "microbiologyevents"),
    DatasetTable::new("pharmacy_csv", Hosp, "pharmacy"),
    DatasetTable::new("poe_csv", Hosp, "poe"),
    DatasetTable::new("poe_detail_csv", Hosp, "poe_detail"),
    DatasetTable::new("prescriptions_csv", Hosp, "prescriptions"),
    DatasetTable::new("procedures_icd_csv", Hosp, "procedures_icd"),
    DatasetTable::new("services_csv", Hosp, "services"),
    DatasetTable::new("caregiver_csv", Icu, "caregiver"),
    DatasetTable::new("chartevents_csv", Icu, "chartevents"),
    DatasetTable::new("d_items_csv", Icu, "d_items"),
    DatasetTable::new("inputevents_csv", Icu, "inputevents"),
    DatasetTable::new("outputevents_csv", Icu, "outputevents"),
];

/// Flat layout: `<root>/<core|hosp>/<file>.csv`
pub static LEGACY: DatasetLayout = DatasetLayout {
    name: "legacy",
    prefix: &[],
    tables: LEGACY_TABLES,
};

/// PhysioNet download layout: `<root>/physionet.org/files/mimiciv/3.1/<hosp|icu>/<file>.csv`
pub static MIMIC_IV_3_1: DatasetLayout = DatasetLayout {
    name: "mimiciv-3.1",
    prefix: &["physionet.org", "files", "mimiciv", "3.1"],
    tables: MIMIC_IV_3_1_TABLES,
};

/// Every known layout, default first.
pub static LAYOUTS: [&DatasetLayout; 2] = [&LEGACY, &MIMIC_IV_3_1];
