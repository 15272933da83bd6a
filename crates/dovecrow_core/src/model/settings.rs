//! Application settings record.

use serde::{Deserialize, Serialize};

/// UI theme preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    Light,
    Dark,
    /// Follow the platform preference.
    Auto,
}

/// User-tunable application settings, persisted as a single record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppSettings {
    pub theme: Theme,
    /// Whether drafts are saved automatically while composing.
    pub auto_save: bool,
    /// Auto-save cadence in seconds.
    pub auto_save_interval_secs: u32,
    /// Whether destructive actions ask for confirmation first.
    pub show_confirmation: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            theme: Theme::Auto,
            auto_save: true,
            auto_save_interval_secs: 30,
            show_confirmation: true,
        }
    }
}
