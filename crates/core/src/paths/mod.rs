//! On-disk path definitions for external datasets.
//!
//! This module defines relative filesystem paths inside a dataset root.
//! It contains **no I/O logic** - only typed path construction.

pub mod mimic;
