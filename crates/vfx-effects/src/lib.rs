pub mod delay_map;
pub mod preset;
pub mod registry;

pub use delay_map::{ControlSampling, DelayMap, DelayMapConfig, DelayMapParams, ParamSnapshot};
pub use preset::{load_preset, save_preset, Preset};
pub use registry::{build_registry, find_effect, EffectEntry};
