//! Exposure adjustment.

use super::{Effect, EffectCore, EffectError, EffectKind};
use crate::frame::Frame;
use crate::layout::{ControlDescriptor, EffectLayout};
use crate::params::{Param, ParamManager};

/// Multiplies every channel by the exposure factor and clips to 0-255.
pub struct ExposureEffect {
    core: EffectCore,
}

impl ExposureEffect {
    pub fn new() -> Result<Self, EffectError> {
        let params = ParamManager::new(vec![Param::float("exposure", 1.0)?
            .range(0.5, 2.0)?
            .step(0.05)]);
        Ok(Self {
            core: EffectCore::new(EffectKind::Exposure.display_name(), params),
        })
    }
}

impl Effect for ExposureEffect {
    fn core(&self) -> &EffectCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut EffectCore {
        &mut self.core
    }

    fn kind_name(&self) -> &'static str {
        EffectKind::Exposure.display_name()
    }

    fn layout(&self) -> EffectLayout {
        EffectLayout::new(
            self.name(),
            vec![ControlDescriptor::slider("exposure", "Exposure", 0.5, 2.0, 0.05)],
        )
    }

    fn apply(&mut self, frame: &Frame) -> Result<Frame, EffectError> {
        let exposure = self.core.params.get_f64("exposure")? as f32;
        let data: Vec<f32> = frame.to_f32().iter().map(|&v| v * exposure).collect();
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
    fn test_default_exposure_is_identity() {
        let mut fx = ExposureEffect::new().unwrap();
        let frame = Frame::filled(4, 4, 3, 200).unwrap();
        let out = fx.apply(&frame).unwrap();
        assert_eq!(out.pixel(0, 0), &[200, 200, 200]);
    }

    #[test]
    fn test_scaling_and_clipping() {
        let mut fx = ExposureEffect::new().unwrap();
        let frame = Frame::filled(2, 2, 3, 200).unwrap();

        fx.set_param("exposure", ParamValue::Float(1.2)).unwrap();
        assert_eq!(fx.apply(&frame).unwrap().pixel(0, 0), &[240, 240, 240]);

        fx.set_param("exposure", ParamValue::Float(2.0)).unwrap();
        // 400 clips to 255.
        assert_eq!(fx.apply(&frame).unwrap().pixel(0, 0), &[255, 255, 255]);
    }
}
