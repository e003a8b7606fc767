use std::{env, fs, path::Path, time::Duration};

use serde::Deserialize;

pub const SETTINGS_FILE: &str = "pingpong.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkSettings {
    pub port_name: String,
    pub baud_rate: u32,
    pub read_timeout_ms: u64,
}

impl Default for LinkSettings {
    fn default() -> Self {
        Self {
            port_name: "COM4".into(),
            baud_rate: 9600,
            read_timeout_ms: 100,
        }
    }
}

impl LinkSettings {
    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }

    /// Applies command-line overrides on top of file and environment settings.
    pub fn with_overrides(mut self, port_name: Option<String>, baud_rate: Option<u32>) -> Self {
        if let Some(port_name) = port_name {
            self.port_name = port_name;
        }
        if let Some(baud_rate) = baud_rate {
            self.baud_rate = baud_rate;
        }
        self
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    port_name: Option<String>,
    baud_rate: Option<u32>,
    read_timeout_ms: Option<u64>,
}

pub fn load_settings() -> LinkSettings {
    load_settings_from(Path::new(SETTINGS_FILE), |key| env::var(key).ok())
}

pub fn load_settings_from(path: &Path, lookup: impl Fn(&str) -> Option<String>) -> LinkSettings {
    let mut settings = LinkSettings::default();

    if let Ok(raw) = fs::read_to_string(path) {
        match toml::from_str::<FileSettings>(&raw) {
            Ok(file_cfg) => {
                if let Some(v) = file_cfg.port_name {
                    settings.port_name = v;
                }
                if let Some(v) = file_cfg.baud_rate {
                    settings.baud_rate = v;
                }
                if let Some(v) = file_cfg.read_timeout_ms.filter(|v| *v > 0) {
                    settings.read_timeout_ms = v;
                }
            }
            Err(err) => {
                tracing::warn!(path = %path.display(), "ignoring unreadable settings file: {err}");
            }
        }
    }

    if let Some(v) = lookup("PINGPONG_PORT") {
        settings.port_name = v;
    }
    if let Some(v) = lookup("APP__PORT_NAME") {
        settings.port_name = v;
    }

    for key in ["PINGPONG_BAUD", "APP__BAUD_RATE"] {
        if let Some(parsed) = lookup(key).and_then(|v| v.trim().parse::<u32>().ok()) {
            settings.baud_rate = parsed;
        }
    }

    // Zero is ignored; the reader expects each read to block for the timeout.
    if let Some(parsed) = lookup("APP__READ_TIMEOUT_MS")
        .and_then(|v| v.trim().parse::<u64>().ok())
        .filter(|v| *v > 0)
    {
        settings.read_timeout_ms = parsed;
    }

    settings
}
