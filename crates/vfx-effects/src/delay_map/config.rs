use serde::{Deserialize, Serialize};
use vfx_core::CHANNELS;

/// Frames of history kept when no capacity is given.
pub const DEFAULT_CAPACITY: usize = 180;

/// Which control channel drives the delay of each output channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ControlSampling {
    /// Each output channel reads its delay from the same channel of the map,
    /// so a colored map shifts channels through time independently.
    #[default]
    PerChannel,
    /// One map channel (0..=3, in surface byte order) delays all four output
    /// channels together.
    Single(usize),
}

impl ControlSampling {
    /// Map channel that drives output channel `c`.
    #[inline]
    pub fn control_channel(&self, c: usize) -> usize {
        match *self {
            ControlSampling::PerChannel => c,
            ControlSampling::Single(channel) => channel,
        }
    }
}

/// Construction-time settings for a delay map instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelayMapConfig {
    /// Number of past frames held. Fixed for the life of the instance.
    pub capacity: usize,
    #[serde(default)]
    pub sampling: ControlSampling,
}

impl Default for DelayMapConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            sampling: ControlSampling::PerChannel,
        }
    }
}

impl DelayMapConfig {
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn with_sampling(mut self, sampling: ControlSampling) -> Self {
        self.sampling = sampling;
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.capacity == 0 {
            return Err("capacity must be at least 1 frame".to_string());
        }
        if let ControlSampling::Single(channel) = self.sampling {
            if channel >= CHANNELS {
                return Err(format!("control channel {channel} out of range 0..{CHANNELS}"));
            }
        }
        Ok(())
    }
}
