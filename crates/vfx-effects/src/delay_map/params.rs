use crossbeam::atomic::AtomicCell;
use serde::{Deserialize, Serialize};
use vfx_core::{ParamInfo, ParamValue};

pub const PARAM_SCALE: usize = 0;
pub const PARAM_OFFSET: usize = 1;
pub const PARAM_INVERT: usize = 2;
pub const PARAM_USE_COLOR: usize = 3;
pub const PARAM_COUNT: usize = 4;

pub const DEFAULT_SCALE: f64 = 1.0;
pub const DEFAULT_OFFSET: f64 = 0.0;

/// Plain copy of every delay map parameter, read once per frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParamSnapshot {
    pub scale: f64,
    pub offset: f64,
    pub invert: bool,
    /// Accepted and reported, never read by the compositor.
    pub use_color: bool,
}

impl Default for ParamSnapshot {
    fn default() -> Self {
        Self {
            scale: DEFAULT_SCALE,
            offset: DEFAULT_OFFSET,
            invert: false,
            use_color: true,
        }
    }
}

/// Lock-free parameter store shared between the host control thread and
/// the render call.
///
/// Each field is its own atomic cell. A frame may see `scale` from one host
/// call and `offset` from the previous one; no cross-field ordering exists.
/// Values are stored exactly as given: out-of-range scale and offset are
/// absorbed by the slot wraparound rather than clamped.
#[derive(Debug)]
pub struct DelayMapParams {
    scale: AtomicCell<f64>,
    offset: AtomicCell<f64>,
    invert: AtomicCell<bool>,
    use_color: AtomicCell<bool>,
}

impl Default for DelayMapParams {
    fn default() -> Self {
        Self::from_snapshot(&ParamSnapshot::default())
    }
}

impl DelayMapParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_snapshot(snapshot: &ParamSnapshot) -> Self {
        Self {
            scale: AtomicCell::new(snapshot.scale),
            offset: AtomicCell::new(snapshot.offset),
            invert: AtomicCell::new(snapshot.invert),
            use_color: AtomicCell::new(snapshot.use_color),
        }
    }

    pub fn scale(&self) -> f64 {
        self.scale.load()
    }

    pub fn set_scale(&self, value: f64) {
        self.scale.store(value);
    }

    pub fn offset(&self) -> f64 {
        self.offset.load()
    }

    pub fn set_offset(&self, value: f64) {
        self.offset.store(value);
    }

    pub fn invert(&self) -> bool {
        self.invert.load()
    }

    pub fn set_invert(&self, value: bool) {
        self.invert.store(value);
    }

    pub fn use_color(&self) -> bool {
        self.use_color.load()
    }

    pub fn set_use_color(&self, value: bool) {
        self.use_color.store(value);
    }

    /// Store a host value by parameter index. Returns `false` for unknown
    /// indices, which are otherwise ignored.
    pub fn set_indexed(&self, index: usize, value: ParamValue) -> bool {
        match index {
            PARAM_SCALE => self.set_scale(value.as_f64()),
            PARAM_OFFSET => self.set_offset(value.as_f64()),
            PARAM_INVERT => self.set_invert(value.as_bool()),
            PARAM_USE_COLOR => self.set_use_color(value.as_bool()),
            _ => return false,
        }
        true
    }

    pub fn get_indexed(&self, index: usize) -> Option<ParamValue> {
        match index {
            PARAM_SCALE => Some(ParamValue::Double(self.scale())),
            PARAM_OFFSET => Some(ParamValue::Double(self.offset())),
            PARAM_INVERT => Some(ParamValue::Bool(self.invert())),
            PARAM_USE_COLOR => Some(ParamValue::Bool(self.use_color())),
            _ => None,
        }
    }

    /// Read every field once. Fields are loaded independently.
    pub fn snapshot(&self) -> ParamSnapshot {
        ParamSnapshot {
            scale: self.scale(),
            offset: self.offset(),
            invert: self.invert(),
            use_color: self.use_color(),
        }
    }

    pub fn restore(&self, snapshot: &ParamSnapshot) {
        self.set_scale(snapshot.scale);
        self.set_offset(snapshot.offset);
        self.set_invert(snapshot.invert);
        self.set_use_color(snapshot.use_color);
    }
}

/// Host-facing descriptors, in index order.
pub fn param_info() -> Vec<ParamInfo> {
    vec![
        ParamInfo::double("Scale", "Multiplier applied to the map value before it picks a past frame.", "scale", DEFAULT_SCALE, 0.0, 1.0),
        ParamInfo::double("Offset", "Constant added to the scaled map value.", "offset", DEFAULT_OFFSET, 0.0, 1.0),
        ParamInfo::boolean("Invert", "Reverse the direction map values walk through the history.", "invert", false),
        ParamInfo::boolean("Use Color", "Reserved. Stored but has no effect on the output.", "useColor", true),
    ]
}
