//! Hue rotation.

use super::{Effect, EffectCore, EffectError, EffectKind};
use crate::frame::Frame;
use crate::imgproc::{hsv_to_rgb, rgb_to_hsv};
use crate::layout::{ControlDescriptor, EffectLayout};
use crate::params::{Param, ParamManager};

/// Rotates every pixel's hue by a fixed number of degrees. Always emits a
/// 3-channel frame; alpha is dropped before the color-space round trip.
pub struct HueEffect {
    core: EffectCore,
}

impl HueEffect {
    pub fn new() -> Result<Self, EffectError> {
        let params = ParamManager::new(vec![Param::float("hue_shift", 0.0)?
            .range(-180.0, 180.0)?
            .step(1.0)]);
        Ok(Self {
            core: EffectCore::new(EffectKind::Hue.display_name(), params),
        })
    }
}

impl Effect for HueEffect {
    fn core(&self) -> &EffectCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut EffectCore {
        &mut self.core
    }

    fn kind_name(&self) -> &'static str {
        EffectKind::Hue.display_name()
    }

    fn layout(&self) -> EffectLayout {
        EffectLayout::new(
            self.name(),
            vec![ControlDescriptor::slider("hue_shift", "Shift", -180.0, 180.0, 1.0)],
        )
    }

    fn apply(&mut self, frame: &Frame) -> Result<Frame, EffectError> {
        let shift = self.core.params.get_f64("hue_shift")? as f32;
        let c = frame.channels() as usize;
        let mut out = Vec::with_capacity(frame.width() as usize * frame.height() as usize * 3);
        for px in frame.data().chunks_exact(c) {
            let (r, g, b) = (
                px[0] as f32 / 255.0,
                px[1] as f32 / 255.0,
                px[2] as f32 / 255.0,
            );
            let (h, s, v) = rgb_to_hsv(r, g, b);
            let (r, g, b) = hsv_to_rgb(h + shift, s, v);
            out.push(r * 255.0);
            out.push(g * 255.0);
            out.push(b * 255.0);
        }
        Ok(Frame::from_f32(frame.width(), frame.height(), 3, &out)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::ParamValue;

    #[test]
    fn test_zero_shift_preserves_rgb() {
        let mut fx = HueEffect::new().unwrap();
        let frame = Frame::new(1, 1, 3, vec![200, 50, 50]).unwrap();
        assert_eq!(fx.apply(&frame).unwrap(), frame);
    }

    #[test]
    fn test_shift_rotates_red_to_green() {
        let mut fx = HueEffect::new().unwrap();
        fx.set_param("hue_shift", ParamValue::Float(120.0)).unwrap();
        let red = Frame::new(1, 1, 3, vec![255, 0, 0]).unwrap();
        let out = fx.apply(&red).unwrap();
        assert_eq!(out.pixel(0, 0), &[0, 255, 0]);
    }

    #[test]
    fn test_rgba_input_drops_alpha() {
        let mut fx = HueEffect::new().unwrap();
        let frame = Frame::new(1, 1, 4, vec![10, 20, 30, 128]).unwrap();
        assert_eq!(fx.apply(&frame).unwrap().channels(), 3);
    }
}
