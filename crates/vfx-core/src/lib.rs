pub mod frame;
pub mod effect;
pub mod parameter;

pub use frame::{FrameSize, FrameView, FrameViewMut, CHANNELS};
pub use effect::{
    wrap_index, ColorModel, MixerEffect, PluginInfo, PluginType, SkipReason, UpdateStatus,
};
pub use parameter::{ParamInfo, ParamKind, ParamValue};
