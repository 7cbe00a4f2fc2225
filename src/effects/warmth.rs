//! Color temperature adjustment.

use super::{Effect, EffectCore, EffectError, EffectKind};
use crate::frame::Frame;
use crate::layout::{ControlDescriptor, EffectLayout};
use crate::params::{Param, ParamManager};

/// Scales the red channel up and the blue channel down for positive warmth
/// (and the reverse for negative values). Green and alpha are untouched.
pub struct WarmthEffect {
    core: EffectCore,
}

impl WarmthEffect {
    pub fn new() -> Result<Self, EffectError> {
        let params = ParamManager::new(vec![Param::float("warmth", 0.0)?
            .range(-50.0, 50.0)?
            .step(1.0)]);
        Ok(Self {
            core: EffectCore::new(EffectKind::Warmth.display_name(), params),
        })
    }
}

impl Effect for WarmthEffect {
    fn core(&self) -> &EffectCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut EffectCore {
        &mut self.core
    }

    fn kind_name(&self) -> &'static str {
        EffectKind::Warmth.display_name()
    }

    fn layout(&self) -> EffectLayout {
        EffectLayout::new(
            self.name(),
            vec![ControlDescriptor::slider("warmth", "Warmth", -50.0, 50.0, 1.0)],
        )
    }

    fn apply(&mut self, frame: &Frame) -> Result<Frame, EffectError> {
        let warmth = self.core.params.get_f64("warmth")? as f32 / 100.0;
        let c = frame.channels() as usize;
        let mut data = frame.to_f32();
        for px in data.chunks_exact_mut(c) {
            px[0] *= 1.0 + warmth;
            px[2] *= 1.0 - warmth;
        }
        Ok(Frame::from_f32(
            frame.width(),
            frame.height(),
            frame.channels(),
            &data,
        )?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::ParamValue;

    #[test]
    fn test_positive_warmth_boosts_red_cuts_blue() {
        let mut fx = WarmthEffect::new().unwrap();
        fx.set_param("warmth", ParamValue::Float(50.0)).unwrap();
        let frame = Frame::new(1, 1, 3, vec![100, 100, 100]).unwrap();
        let out = fx.apply(&frame).unwrap();
        assert_eq!(out.pixel(0, 0), &[150, 100, 50]);
    }

    #[test]
    fn test_zero_warmth_is_identity() {
        let mut fx = WarmthEffect::new().unwrap();
        let frame = Frame::new(1, 1, 3, vec![10, 20, 30]).unwrap();
        assert_eq!(fx.apply(&frame).unwrap(), frame);
    }
}
