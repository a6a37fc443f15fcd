//! Master config merging
//!
//! Loads the optional INI master config and folds its sections into a
//! namespaced environment map, keeping whatever was there first.

pub mod master;
pub mod merge;

pub use master::{ConfigMerger, SECTIONS_OF_INTEREST};
pub use merge::{namespaced_key, EnvMap, ENV_PREFIX};
