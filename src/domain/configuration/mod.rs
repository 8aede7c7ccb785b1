//! Portal configuration domain module.
//!
//! Runtime key/value settings grouped by feature area, read through an
//! immutable snapshot.

pub mod keys;
mod setting;
mod snapshot;

pub use keys::PeriodSettings;
pub use setting::ConfigurationSetting;
pub use snapshot::{ConfigurationError, ConfigurationSnapshot};
