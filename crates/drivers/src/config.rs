use std::path::PathBuf;

use lite_booth_adapters::{TEST_PATTERN_HEIGHT, TEST_PATTERN_WIDTH};
use lite_booth_application::SessionSettings;
use lite_booth_domain::DEFAULT_COUNTDOWN_SECONDS;
use log::warn;

pub const EXPORT_DIR_VAR: &str = "LITE_BOOTH_EXPORT_DIR";
pub const COUNTDOWN_VAR: &str = "LITE_BOOTH_COUNTDOWN";
pub const MIRROR_VAR: &str = "LITE_BOOTH_MIRROR";

const MAX_COUNTDOWN_SECONDS: u32 = 60;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub export_dir: PathBuf,
    pub export_file_name: String,
    pub countdown_seconds: u32,
    pub mirror: bool,
    pub test_pattern_width: u32,
    pub test_pattern_height: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            export_dir: PathBuf::from("."),
            export_file_name: "captured-photo.png".to_string(),
            countdown_seconds: DEFAULT_COUNTDOWN_SECONDS,
            mirror: true,
            test_pattern_width: TEST_PATTERN_WIDTH,
            test_pattern_height: TEST_PATTERN_HEIGHT,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Applies overrides from `lookup`; values that do not parse are skipped.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(dir) = lookup(EXPORT_DIR_VAR) {
            let dir = dir.trim();
            if dir.is_empty() {
                warn!("ignoring empty {EXPORT_DIR_VAR}");
            } else {
                config.export_dir = PathBuf::from(dir);
            }
        }

        if let Some(raw) = lookup(COUNTDOWN_VAR) {
            match raw.trim().parse::<u32>() {
                Ok(seconds) if seconds <= MAX_COUNTDOWN_SECONDS => {
                    config.countdown_seconds = seconds
                }
                _ => warn!("ignoring invalid {COUNTDOWN_VAR}={raw:?}"),
            }
        }

        if let Some(raw) = lookup(MIRROR_VAR) {
            match parse_flag(&raw) {
                Some(mirror) => config.mirror = mirror,
                None => warn!("ignoring invalid {MIRROR_VAR}={raw:?}"),
            }
        }

        config
    }

    pub fn export_path(&self) -> PathBuf {
        self.export_dir.join(&self.export_file_name)
    }

    pub fn session_settings(&self) -> SessionSettings {
        SessionSettings {
            countdown_seconds: self.countdown_seconds,
            mirror: self.mirror,
        }
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
