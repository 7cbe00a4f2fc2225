//! Combined contrast and brightness adjustment.

use super::{Effect, EffectCore, EffectError, EffectKind};
use crate::frame::Frame;
use crate::layout::{ControlDescriptor, EffectLayout};
use crate::params::{Param, ParamManager};

/// Scales each channel around the 127.5 midpoint, then adds brightness.
pub struct ContrastBrightnessEffect {
    core: EffectCore,
}

impl ContrastBrightnessEffect {
    pub fn new() -> Result<Self, EffectError> {
        let params = ParamManager::new(vec![
            Param::float("contrast", 1.0)?.range(0.5, 3.0)?.step(0.1),
            Param::float("brightness", 0.0)?.range(-100.0, 100.0)?.step(1.0),
        ]);
        Ok(Self {
            core: EffectCore::new(EffectKind::ContrastBrightness.display_name(), params),
        })
    }
}

impl Effect for ContrastBrightnessEffect {
    fn core(&self) -> &EffectCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut EffectCore {
        &mut self.core
    }

    fn kind_name(&self) -> &'static str {
        EffectKind::ContrastBrightness.display_name()
    }

    fn layout(&self) -> EffectLayout {
        EffectLayout::new(
            self.name(),
            vec![
                ControlDescriptor::slider("contrast", "Contrast", 0.5, 3.0, 0.1),
                ControlDescriptor::slider("brightness", "Brightness", -100.0, 100.0, 1.0),
            ],
        )
    }

    fn apply(&mut self, frame: &Frame) -> Result<Frame, EffectError> {
        let contrast = self.core.params.get_f64("contrast")? as f32;
        let brightness = self.core.params.get_f64("brightness")? as f32;
        let data: Vec<f32> = frame
            .to_f32()
            .iter()
            .map(|&v| (v - 127.5) * contrast + 127.5 + brightness)
            .collect();
        Ok(Frame::from_f32(
            frame.width(),
            frame.height(),
            frame.channels(),
            &data,
        )?)
    }
}
