use serde::{Deserialize, Serialize};
use std::io;
use std::path::Path;

use crate::delay_map::{DelayMap, DelayMapConfig, ParamSnapshot};
use vfx_core::FrameSize;

pub const PRESET_VERSION: u32 = 1;

/// On-disk delay map preset: construction settings plus parameter values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preset {
    pub version: u32,
    pub effect: String,
    pub config: DelayMapConfig,
    pub params: ParamSnapshot,
}

impl Preset {
    /// Capture the current state of `fx`.
    pub fn capture(fx: &DelayMap) -> Self {
        Self {
            version: PRESET_VERSION,
            effect: crate::delay_map::INFO.name.to_string(),
            config: *fx.config(),
            params: fx.params().snapshot(),
        }
    }

    /// Build a fresh instance for `size` from this preset.
    pub fn instantiate(&self, size: FrameSize) -> Result<DelayMap, String> {
        if self.effect != crate::delay_map::INFO.name {
            return Err(format!("preset is for effect '{}'", self.effect));
        }
        let fx = DelayMap::with_config(size, self.config)?;
        fx.params().restore(&self.params);
        Ok(fx)
    }
}

/// Save a preset to disk as JSON.
pub fn save_preset(path: &Path, preset: &Preset) -> io::Result<()> {
    let json = serde_json::to_string_pretty(preset)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    std::fs::write(path, json)
}

/// Load a preset from disk.
pub fn load_preset(path: &Path) -> io::Result<Preset> {
    let json = std::fs::read_to_string(path)?;
    let preset: Preset =
        serde_json::from_str(&json).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    if preset.version > PRESET_VERSION {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("preset version {} is newer than {}", preset.version, PRESET_VERSION),
        ));
    }
    Ok(preset)
}
