//! Per-pixel delay map.
//!
//! Every frame the primary input is pushed into a fixed ring of past frames.
//! Each output byte is then copied from the frame whose age is encoded by the
//! matching byte of the control image: black picks the frame just submitted,
//! white (with default parameters) the oldest frame still in the ring.

pub mod config;
pub mod params;
pub mod resolver;
pub mod ring;

use std::sync::Arc;
use std::time::Instant;

use vfx_core::{
    ColorModel, FrameSize, FrameView, FrameViewMut, MixerEffect, ParamInfo, ParamValue,
    PluginInfo, PluginType, SkipReason, UpdateStatus, CHANNELS,
};

pub use config::{ControlSampling, DelayMapConfig, DEFAULT_CAPACITY};
pub use params::{DelayMapParams, ParamSnapshot};
pub use resolver::{resolve_slot, temporal_offset, SlotTable};
pub use ring::FrameRing;

pub const INFO: PluginInfo = PluginInfo {
    name: "delay_map",
    author: "Lucas Walter",
    plugin_type: PluginType::Mixer2,
    color_model: ColorModel::Bgra8888,
    major_version: 0,
    minor_version: 2,
    explanation: "Uses an image input as a per pixel map of delay times in output",
};

/// One delay map instance: history ring, shared parameters and the sizes
/// fixed at construction.
#[derive(Debug)]
pub struct DelayMap {
    size: FrameSize,
    config: DelayMapConfig,
    ring: FrameRing,
    params: Arc<DelayMapParams>,
    last_time: f64,
}

impl DelayMap {
    /// Instance with the default 180 frame history.
    pub fn new(size: FrameSize) -> Result<Self, String> {
        Self::with_config(size, DelayMapConfig::default())
    }

    pub fn with_config(size: FrameSize, config: DelayMapConfig) -> Result<Self, String> {
        config.validate()?;
        let frame_len = size
            .checked_byte_len()
            .ok_or_else(|| format!("frame size {}x{} overflows", size.width, size.height))?;
        let ring = FrameRing::new(frame_len, config.capacity)?;

        log::info!(
            "delay map {}x{}, {} frames, {} bytes of history",
            size.width,
            size.height,
            config.capacity,
            frame_len * config.capacity
        );

        Ok(Self {
            size,
            config,
            ring,
            params: Arc::new(DelayMapParams::new()),
            last_time: 0.0,
        })
    }

    /// Shared handle to the parameter store. Writes through it are picked
    /// up by the next frame.
    pub fn params(&self) -> Arc<DelayMapParams> {
        Arc::clone(&self.params)
    }

    pub fn config(&self) -> &DelayMapConfig {
        &self.config
    }

    pub fn capacity(&self) -> usize {
        self.ring.capacity()
    }

    /// Ring slot the next input frame will overwrite.
    pub fn cursor(&self) -> usize {
        self.ring.cursor()
    }

    pub fn frames_written(&self) -> u64 {
        self.ring.frames_written()
    }

    /// Timestamp passed to the most recent update.
    pub fn last_time(&self) -> f64 {
        self.last_time
    }

    /// Switch control sampling. Takes effect on the next frame.
    pub fn set_sampling(&mut self, sampling: ControlSampling) -> Result<(), String> {
        let config = self.config.with_sampling(sampling);
        config.validate()?;
        self.config = config;
        Ok(())
    }

    /// Forget all history. The ring reads as black until refilled.
    pub fn reset(&mut self) {
        self.ring.clear();
    }

    /// Two-input convenience over [`MixerEffect::update`].
    pub fn update_frames(
        &mut self,
        time: f64,
        input: &[u8],
        control: &[u8],
        output: &mut [u8],
    ) -> UpdateStatus {
        self.update(time, [Some(input), Some(control), None], output)
    }

    fn render(
        &mut self,
        input: FrameView<'_>,
        control: FrameView<'_>,
        output: &mut FrameViewMut<'_>,
    ) -> UpdateStatus {
        // Write first so an offset of zero selects the frame just submitted.
        let Some(anchor) = self.ring.write(input.bytes()) else {
            return UpdateStatus::Skipped(SkipReason::ShortBuffer);
        };

        let params = self.params.snapshot();
        let table = SlotTable::build(&params, anchor, self.ring.capacity());
        let sampling = self.config.sampling;

        let pixels = output
            .bytes_mut()
            .chunks_exact_mut(CHANNELS)
            .zip(control.bytes().chunks_exact(CHANNELS))
            .enumerate();

        for (pixel, (dst, map)) in pixels {
            let base = pixel * CHANNELS;
            for (c, out) in dst.iter_mut().enumerate() {
                let slot = map
                    .get(sampling.control_channel(c))
                    .map(|&sample| table.slot(sample));
                match slot.and_then(|slot| self.ring.sample(slot, base + c)) {
                    Some(v) => *out = v,
                    None => {
                        log::error!(
                            "delay map index out of range: pixel {}, channel {}, slot {:?} (age {:?}), newest slot {}, capacity {}, frame bytes {}",
                            pixel,
                            c,
                            slot,
                            slot.map(|slot| self.ring.age_of(slot)),
                            self.ring.latest_slot(),
                            self.ring.capacity(),
                            self.ring.frame_len()
                        );
                        return UpdateStatus::Aborted { filled: base + c };
                    }
                }
            }
        }

        UpdateStatus::Rendered
    }
}

impl MixerEffect for DelayMap {
    fn update(&mut self, time: f64, inputs: [Option<&[u8]>; 3], output: &mut [u8]) -> UpdateStatus {
        let started = Instant::now();
        self.last_time = time;

        if self.size.is_empty() {
            log::debug!("delay map skipped: empty {}x{} frame", self.size.width, self.size.height);
            return UpdateStatus::Skipped(SkipReason::EmptyFrame);
        }
        let [Some(input), Some(control), _] = inputs else {
            log::debug!("delay map skipped: missing input");
            return UpdateStatus::Skipped(SkipReason::MissingBuffer);
        };
        let (Some(input), Some(control), Some(mut output)) = (
            FrameView::new(input, self.size),
            FrameView::new(control, self.size),
            FrameViewMut::new(output, self.size),
        ) else {
            log::debug!("delay map skipped: buffer shorter than {} bytes", self.size.byte_len());
            return UpdateStatus::Skipped(SkipReason::ShortBuffer);
        };

        let status = self.render(input, control, &mut output);
        log::debug!(
            "delay map update at t={:.3}: {:.2} ms",
            time,
            started.elapsed().as_secs_f64() * 1000.0
        );
        status
    }

    fn set_param(&mut self, index: usize, value: ParamValue) {
        if !self.params.set_indexed(index, value) {
            log::warn!("delay map: ignoring unknown parameter index {index}");
        }
    }

    fn get_param(&self, index: usize) -> Option<ParamValue> {
        self.params.get_indexed(index)
    }

    fn param_info(&self) -> Vec<ParamInfo> {
        params::param_info()
    }

    fn info(&self) -> &PluginInfo {
        &INFO
    }

    fn size(&self) -> FrameSize {
        self.size
    }
}
