use vfx_core::wrap_index;

use super::params::ParamSnapshot;

/// Signed distance in frames selected by one control byte.
///
/// The map value is scaled into `[0, capacity - 1]` for the default
/// parameters, so black selects the newest frame and white the oldest one
/// the ring can hold. `invert` flips the sign. Anything outside that range
/// (large scale, negative offset) wraps around later in [`resolve_slot`].
/// Non-finite parameters yield 0.
pub fn temporal_offset(sample: u8, params: &ParamSnapshot, capacity: usize) -> i64 {
    let direction = if params.invert { 1.0 } else { -1.0 };
    let normalized = params.scale * (f64::from(sample) / 255.0) + params.offset;
    let span = capacity.saturating_sub(1) as f64;
    let frames = (span * normalized).round();
    if !frames.is_finite() {
        return 0;
    }
    // Saturating float-to-int cast; the wrap reduces it anyway.
    (direction * frames) as i64
}

/// Absolute ring slot for one control byte, relative to `anchor`.
///
/// Always in `[0, capacity)` for `capacity >= 1`.
#[inline]
pub fn resolve_slot(sample: u8, params: &ParamSnapshot, anchor: usize, capacity: usize) -> usize {
    wrap_index(anchor, temporal_offset(sample, params, capacity), capacity)
}

/// Slot lookup for all 256 control values.
///
/// Parameters are fixed for a whole frame, so the compositor resolves each
/// possible byte once instead of once per pixel.
#[derive(Debug, Clone)]
pub struct SlotTable {
    slots: [usize; 256],
}

impl SlotTable {
    pub fn build(params: &ParamSnapshot, anchor: usize, capacity: usize) -> Self {
        let mut slots = [0usize; 256];
        for (sample, slot) in slots.iter_mut().enumerate() {
            *slot = resolve_slot(sample as u8, params, anchor, capacity);
        }
        Self { slots }
    }

    #[inline]
    pub fn slot(&self, sample: u8) -> usize {
        self.slots[sample as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(scale: f64, offset: f64, invert: bool) -> ParamSnapshot {
        ParamSnapshot { scale, offset, invert, use_color: true }
    }

    /// Age of `slot` counted back from `anchor`.
    fn age(anchor: usize, slot: usize, capacity: usize) -> usize {
        (anchor + capacity - slot) % capacity
    }

    #[test]
    fn test_black_is_newest_white_is_oldest() {
        let p = params(1.0, 0.0, false);
        for capacity in [2usize, 4, 180] {
            let anchor = capacity / 2;
            let newest = resolve_slot(0, &p, anchor, capacity);
            let oldest = resolve_slot(255, &p, anchor, capacity);
            assert_eq!(age(anchor, newest, capacity), 0);
            assert_eq!(age(anchor, oldest, capacity), capacity - 1);
            assert_ne!(newest, oldest);
        }
    }

    #[test]
    fn test_single_slot_capacity() {
        let p = params(1.0, 0.0, false);
        assert_eq!(resolve_slot(0, &p, 0, 1), 0);
        assert_eq!(resolve_slot(255, &p, 0, 1), 0);
    }

    #[test]
    fn test_zero_scale_is_passthrough() {
        let p = params(0.0, 0.0, false);
        for sample in 0..=255u8 {
            assert_eq!(temporal_offset(sample, &p, 180), 0);
            assert_eq!(resolve_slot(sample, &p, 17, 180), 17);
        }
    }

    #[test]
    fn test_offset_rounds() {
        // span 3, 0.5 * 3 = 1.5 rounds away from zero.
        let p = params(0.0, 0.5, false);
        assert_eq!(temporal_offset(0, &p, 4), -2);
        let p = params(0.0, 0.3, false);
        assert_eq!(temporal_offset(0, &p, 4), -1);
    }

    #[test]
    fn test_invert_mirrors_age() {
        let normal = params(0.7, 0.1, false);
        let inverted = params(0.7, 0.1, true);
        let capacity = 180;
        let anchor = 42;
        for sample in 0..=255u8 {
            let a = resolve_slot(sample, &normal, anchor, capacity);
            let b = resolve_slot(sample, &inverted, anchor, capacity);
            let age_a = age(anchor, a, capacity);
            let age_b = age(anchor, b, capacity);
            assert_eq!((age_a + age_b) % capacity, 0, "sample {sample}");
            assert_eq!(
                temporal_offset(sample, &normal, capacity),
                -temporal_offset(sample, &inverted, capacity)
            );
        }
    }

    #[test]
    fn test_out_of_range_params_alias() {
        let capacity = 10;
        for (scale, offset) in [(5.0, 0.0), (-3.0, 0.2), (1.0, -7.5), (1e12, 1e12), (-1e300, 0.0)] {
            let p = params(scale, offset, false);
            for sample in [0u8, 1, 127, 200, 255] {
                assert!(resolve_slot(sample, &p, 3, capacity) < capacity);
            }
        }
    }

    #[test]
    fn test_non_finite_params() {
        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let p = params(bad, 0.0, false);
            assert_eq!(temporal_offset(200, &p, 8), 0);
            assert_eq!(resolve_slot(200, &p, 5, 8), 5);
        }
    }

    #[test]
    fn test_slot_table_matches_resolver() {
        let p = params(0.8, 0.05, true);
        let table = SlotTable::build(&p, 11, 30);
        for sample in 0..=255u8 {
            assert_eq!(table.slot(sample), resolve_slot(sample, &p, 11, 30));
        }
    }
}
