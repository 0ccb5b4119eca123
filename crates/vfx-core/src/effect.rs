use serde::{Deserialize, Serialize};

use crate::frame::FrameSize;
use crate::parameter::{ParamInfo, ParamValue};

/// How many input frames an effect consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PluginType {
    /// Two inputs: the frame to delay and the control map.
    Mixer2,
}

/// Byte layout of host surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColorModel {
    Bgra8888,
}

/// Static description an effect publishes to its host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PluginInfo {
    pub name: &'static str,
    pub author: &'static str,
    pub plugin_type: PluginType,
    pub color_model: ColorModel,
    pub major_version: u32,
    pub minor_version: u32,
    pub explanation: &'static str,
}

/// Why a frame was not rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Width or height is zero.
    EmptyFrame,
    /// A required input or the output buffer was not supplied.
    MissingBuffer,
    /// A supplied buffer is shorter than one frame.
    ShortBuffer,
}

/// Outcome of one `update` call. Hosts are free to ignore it; nothing here
/// is an error from their point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateStatus {
    /// Every output pixel was written.
    Rendered,
    /// Nothing was read or written, the output is left as it was.
    Skipped(SkipReason),
    /// An internal index check tripped after `filled` output bytes were
    /// written. The remainder of the output is left as it was.
    Aborted { filled: usize },
}

/// The per-instance plugin contract.
///
/// A host constructs one instance per output size, pushes parameter values
/// between frames and calls [`update`](Self::update) once per output frame.
/// Implementations must never panic out of any of these calls.
pub trait MixerEffect: Send {
    /// Render one output frame. `inputs` holds up to three host frames of
    /// the instance size; unused slots are `None`. `time` is the host
    /// timestamp in seconds.
    fn update(&mut self, time: f64, inputs: [Option<&[u8]>; 3], output: &mut [u8]) -> UpdateStatus;

    /// Assign parameter `index`. Unknown indices are ignored.
    fn set_param(&mut self, index: usize, value: ParamValue);

    /// Last value stored for parameter `index`.
    fn get_param(&self, index: usize) -> Option<ParamValue>;

    fn param_info(&self) -> Vec<ParamInfo>;

    fn info(&self) -> &PluginInfo;

    fn size(&self) -> FrameSize;

    /// Effect name for display.
    fn name(&self) -> &str {
        self.info().name
    }
}

/// Wrap `base + offset` into `[0, len)`.
///
/// `offset` may be any signed value; the Euclidean remainder keeps negative
/// sums in range. Returns 0 when `len` is 0.
pub fn wrap_index(base: usize, offset: i64, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    let len_i = len as i64;
    let base = (base % len) as i64;
    // Reduce the offset first so the sum cannot overflow.
    (base + offset.rem_euclid(len_i)).rem_euclid(len_i) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_index_negative() {
        assert_eq!(wrap_index(0, -2, 4), 2);
        assert_eq!(wrap_index(1, -1, 4), 0);
        assert_eq!(wrap_index(0, -4, 4), 0);
        assert_eq!(wrap_index(3, -7, 4), 0);
    }

    #[test]
    fn test_wrap_index_positive() {
        assert_eq!(wrap_index(3, 1, 4), 0);
        assert_eq!(wrap_index(2, 9, 4), 3);
    }

    #[test]
    fn test_wrap_index_extremes() {
        assert!(wrap_index(5, i64::MIN, 7) < 7);
        assert!(wrap_index(5, i64::MAX, 7) < 7);
        assert_eq!(wrap_index(10, 0, 0), 0);
    }

    #[test]
    fn test_wrap_index_always_in_range() {
        for cap in 1..=9usize {
            for cursor in 0..cap {
                for offset in -40i64..=40 {
                    let slot = wrap_index(cursor, offset, cap);
                    assert!(slot < cap, "cap={cap} cursor={cursor} offset={offset}");
                    let expected = (((cursor as i64 + offset) % cap as i64) + cap as i64) % cap as i64;
                    assert_eq!(slot as i64, expected);
                }
            }
        }
    }

    #[test]
    fn test_descriptor_serde() {
        let json = serde_json::to_string(&(PluginType::Mixer2, ColorModel::Bgra8888)).unwrap();
        assert_eq!(json, r#"["Mixer2","Bgra8888"]"#);
    }
}
