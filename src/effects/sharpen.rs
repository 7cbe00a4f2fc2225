//! Unsharp-mask sharpening.

use super::{Effect, EffectCore, EffectError, EffectKind};
use crate::frame::Frame;
use crate::imgproc::gaussian_blur_ksize;
use crate::layout::{ControlDescriptor, EffectLayout};
use crate::params::{Param, ParamManager};

/// Classic unsharp mask: subtract a Gaussian-blurred copy to isolate detail,
/// then add the detail back scaled by `amount`.
pub struct SharpenEffect {
    core: EffectCore,
}

impl SharpenEffect {
    pub fn new() -> Result<Self, EffectError> {
        let params = ParamManager::new(vec![
            Param::float("amount", 1.0)?.range(0.0, 3.0)?.step(0.1),
            Param::int("radius", 1)?.range(1.0, 10.0)?.step(1.0),
        ]);
        Ok(Self {
            core: EffectCore::new(EffectKind::Sharpen.display_name(), params),
        })
    }
}

impl Effect for SharpenEffect {
    fn core(&self) -> &EffectCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut EffectCore {
        &mut self.core
    }

    fn kind_name(&self) -> &'static str {
        EffectKind::Sharpen.display_name()
    }

    fn layout(&self) -> EffectLayout {
        EffectLayout::new(
            self.name(),
            vec![
                ControlDescriptor::slider("amount", "Amount", 0.0, 3.0, 0.1),
                ControlDescriptor::slider("radius", "Radius", 1.0, 10.0, 1.0),
            ],
        )
    }

    fn apply(&mut self, frame: &Frame) -> Result<Frame, EffectError> {
        let amount = self.core.params.get_f64("amount")? as f32;
        let mut ksize = self.core.params.get_i64("radius")? as u32;
        if ksize % 2 == 0 {
            ksize += 1;
        }

        let data = frame.to_f32();
        let blurred = gaussian_blur_ksize(
            &data,
            frame.width(),
            frame.height(),
            frame.channels(),
            ksize,
        );
        let sharpened: Vec<f32> = data
            .iter()
            .zip(&blurred)
            .map(|(&v, &b)| v + amount * (v - b))
            .collect();
        Ok(Frame::from_f32(
            frame.width(),
            frame.height(),
            frame.channels(),
            &sharpened,
        )?)
    }
}
