use vfx_core::{FrameSize, MixerEffect, ParamInfo, PluginInfo};

/// An entry in the effect registry, containing a constructor and parameter definitions.
pub struct EffectEntry {
    pub id: &'static str,
    pub info: &'static PluginInfo,
    pub constructor: fn(FrameSize) -> Result<Box<dyn MixerEffect>, String>,
    pub parameters: fn() -> Vec<ParamInfo>,
}

impl EffectEntry {
    pub fn name(&self) -> &'static str {
        self.info.name
    }

    /// Build an instance for frames of `size`.
    pub fn construct(&self, size: FrameSize) -> Result<Box<dyn MixerEffect>, String> {
        (self.constructor)(size)
    }
}

/// Build the complete registry of all available effects.
///
/// Each effect is identified by a unique string ID, matching the name it
/// reports to hosts.
pub fn build_registry() -> Vec<EffectEntry> {
    vec![
        EffectEntry {
            id: "delay_map",
            info: &crate::delay_map::INFO,
            constructor: |size| {
                crate::delay_map::DelayMap::new(size).map(|fx| Box::new(fx) as Box<dyn MixerEffect>)
            },
            parameters: crate::delay_map::params::param_info,
        },
    ]
}

/// Look up an effect entry by its ID.
pub fn find_effect(id: &str) -> Option<&'static EffectEntry> {
    static REGISTRY: std::sync::OnceLock<Vec<EffectEntry>> = std::sync::OnceLock::new();
    let entries = REGISTRY.get_or_init(build_registry);
    entries.iter().find(|e| e.id == id)
}
