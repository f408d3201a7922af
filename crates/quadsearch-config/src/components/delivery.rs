//! Patch delivery configuration

use serde::{Deserialize, Serialize};

/// How a mutating store call relates to listener processing of its patch.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryMode {
    /// The mutating call returns only after every listener has finished
    /// handling the patch it produced. Writes made by a listener back into
    /// the store it listens on are delivered detached, since waiting for
    /// them would wait on that listener itself.
    Synchronous,
    /// The patch is queued for each listener and the mutating call returns
    /// immediately. Owners call `drain()` before shutdown or assertions.
    #[default]
    Detached,
}

impl DeliveryMode {
    /// Get the mode name as used in configuration files
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Synchronous => "synchronous",
            Self::Detached => "detached",
        }
    }
}

/// Delivery section of the configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeliveryConfig {
    /// Delivery mode for every change-capture instance built from this config
    pub mode: DeliveryMode,
}
