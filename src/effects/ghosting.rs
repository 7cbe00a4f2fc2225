//! VHS-style ghost image.

use super::{Effect, EffectCore, EffectError, EffectKind};
use crate::frame::Frame;
use crate::imgproc::{gaussian_blur_ksize, roll};
use crate::layout::{ControlDescriptor, EffectLayout};
use crate::params::{Param, ParamManager};

/// Adds an offset, blurred copy of the frame back onto itself. Operates on
/// the color channels only; a 4-channel input comes back as 3-channel.
pub struct GhostingEffect {
    core: EffectCore,
}

impl GhostingEffect {
    pub fn new() -> Result<Self, EffectError> {
        let params = ParamManager::new(vec![
            Param::float("strength", 0.15)?.range(0.0, 1.0)?.step(0.01),
            Param::int("offset_x", 8)?.range(-20.0, 20.0)?.step(1.0),
            Param::int("offset_y", 4)?.range(-20.0, 20.0)?.step(1.0),
            Param::int("blur_radius", 5)?.range(0.0, 21.0)?.step(2.0),
        ]);
        Ok(Self {
            core: EffectCore::new(EffectKind::Ghosting.display_name(), params),
        })
    }
}

impl Effect for GhostingEffect {
    fn core(&self) -> &EffectCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut EffectCore {
        &mut self.core
    }

    fn kind_name(&self) -> &'static str {
        EffectKind::Ghosting.display_name()
    }

    fn layout(&self) -> EffectLayout {
        EffectLayout::new(
            self.name(),
            vec![
                ControlDescriptor::slider("strength", "Ghost strength", 0.0, 1.0, 0.01),
                ControlDescriptor::spinbox("offset_x", "Offset X", -20, 20, 1),
                ControlDescriptor::spinbox("offset_y", "Offset Y", -20, 20, 1),
                ControlDescriptor::spinbox("blur_radius", "Blur radius", 0, 21, 2),
            ],
        )
    }

    fn apply(&mut self, frame: &Frame) -> Result<Frame, EffectError> {
        let strength = self.core.params.get_f64("strength")? as f32;
        let offset_x = self.core.params.get_i64("offset_x")? as i32;
        let offset_y = self.core.params.get_i64("offset_y")? as i32;
        let mut blur_radius = self.core.params.get_i64("blur_radius")? as u32;

        if strength <= 0.0 {
            return Ok(frame.clone());
        }

        let (w, h) = (frame.width(), frame.height());
        let c = frame.channels() as usize;
        let base: Vec<f32> = frame
            .data()
            .chunks_exact(c)
            .flat_map(|px| px[..3].iter().map(|&v| v as f32))
            .collect();

        if blur_radius % 2 == 0 && blur_radius > 0 {
            blur_radius += 1;
        }
        let ghost = roll(&base, w, h, 3, offset_x, offset_y);
        let ghost = gaussian_blur_ksize(&ghost, w, h, 3, blur_radius.max(1));

        let out: Vec<f32> = base
            .iter()
            .zip(&ghost)
            .map(|(&b, &g)| b + g * strength)
            .collect();
        Ok(Frame::from_f32(w, h, 3, &out)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::ParamValue;

    #[test]
    fn test_zero_strength_is_identity() {
        let mut fx = GhostingEffect::new().unwrap();
        fx.set_param("strength", ParamValue::Float(0.0)).unwrap();
        let frame = Frame::new(2, 2, 4, vec![8; 16]).unwrap();
        let out = fx.apply(&frame).unwrap();
        // Early out keeps the original channel count too.
        assert_eq!(out, frame);
    }

    #[test]
    fn test_flat_frame_brightens_by_strength() {
        let mut fx = GhostingEffect::new().unwrap();
        fx.set_param("strength", ParamValue::Float(0.5)).unwrap();
        let frame = Frame::filled(16, 16, 3, 100).unwrap();
        let out = fx.apply(&frame).unwrap();
        // Ghost of a flat frame is the frame itself: 100 + 100 * 0.5.
        assert_eq!(out.pixel(8, 8), &[150, 150, 150]);
    }

    #[test]
    fn test_ghost_lands_at_offset() {
        let mut fx = GhostingEffect::new().unwrap();
        fx.set_param("strength", ParamValue::Float(1.0)).unwrap();
        fx.set_param("offset_x", ParamValue::Int(2)).unwrap();
        fx.set_param("offset_y", ParamValue::Int(0)).unwrap();
        fx.set_param("blur_radius", ParamValue::Int(0)).unwrap();
        let mut data = vec![0u8; 8 * 1 * 3];
        data[0] = 200;
        let frame = Frame::new(8, 1, 3, data).unwrap();
        let out = fx.apply(&frame).unwrap();
        assert_eq!(out.pixel(2, 0)[0], 200);
        assert_eq!(out.pixel(0, 0)[0], 200);
    }
}
