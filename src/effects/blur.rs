//! GPU directional blur.

use super::{Effect, EffectCore, EffectError, EffectKind};
use crate::blend::{blend_rgba, BlendMode, BLEND_MODE_OPTIONS};
use crate::frame::Frame;
use crate::gpu::ShaderProcessor;
use crate::layout::{ControlDescriptor, EffectLayout};
use crate::params::{Param, ParamManager};

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct BlurUniforms {
    amount: f32,
    angle: f32,
    _pad: [f32; 2],
}

/// Directional blur rendered on the GPU, composited back over the input with
/// a blend mode and opacity. The shader processor is created on the first
/// apply that needs it; parameter-only use never touches the GPU.
pub struct BlurEffect {
    core: EffectCore,
    processor: Option<ShaderProcessor>,
}

impl BlurEffect {
    pub fn new() -> Result<Self, EffectError> {
        let params = ParamManager::new(vec![
            Param::float("amount", 0.0)?.range(0.0, 100.0)?.step(1.0),
            Param::float("angle", 0.0)?.range(-180.0, 180.0)?.step(1.0),
            Param::float("opacity", 1.0)?.range(0.0, 1.0)?.step(0.05),
            Param::choice("blend_mode", "lighten_only", BLEND_MODE_OPTIONS)?,
        ]);
        Ok(Self {
            core: EffectCore::new(EffectKind::Blur.display_name(), params),
            processor: None,
        })
    }
}

impl Effect for BlurEffect {
    fn core(&self) -> &EffectCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut EffectCore {
        &mut self.core
    }

    fn kind_name(&self) -> &'static str {
        EffectKind::Blur.display_name()
    }

    fn layout(&self) -> EffectLayout {
        EffectLayout::new(
            self.name(),
            vec![
                ControlDescriptor::slider("amount", "Blur amount", 0.0, 100.0, 1.0),
                ControlDescriptor::slider("angle", "Blur angle", -180.0, 180.0, 1.0),
                ControlDescriptor::slider("opacity", "Opacity", 0.0, 1.0, 0.05),
                ControlDescriptor::dropdown("blend_mode", "Blend mode", BLEND_MODE_OPTIONS),
            ],
        )
    }

    fn apply(&mut self, frame: &Frame) -> Result<Frame, EffectError> {
        let amount = self.core.params.get_f64("amount")? as f32;
        if amount <= 0.0 {
            return Ok(frame.clone());
        }
        let angle = (self.core.params.get_f64("angle")? as f32).to_radians();
        let opacity = self.core.params.get_f64("opacity")? as f32;
        let mode = BlendMode::from_code(self.core.params.get_str("blend_mode")?)
            .unwrap_or(BlendMode::Normal);

        let uniforms = BlurUniforms {
            amount,
            angle,
            _pad: [0.0; 2],
        };
        let mut processor = match self.processor.take() {
            Some(p) => p,
            None => ShaderProcessor::new(
                "blur",
                include_str!("../gpu/shaders/blur.wgsl"),
                std::mem::size_of::<BlurUniforms>() as u64,
            )?,
        };
        let rendered = processor.process(frame, bytemuck::bytes_of(&uniforms));
        self.processor = Some(processor);
        let blurred = rendered?;

        let base = frame.to_rgba().to_f32();
        let blended = blend_rgba(&base, &blurred.to_f32(), mode, opacity);
        Ok(Frame::from_f32(frame.width(), frame.height(), 4, &blended)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gpu::GpuContext;
    use crate::params::ParamValue;

    #[test]
    fn test_zero_amount_skips_gpu() {
        let mut fx = BlurEffect::new().unwrap();
        let frame = Frame::filled(4, 4, 3, 60).unwrap();
        assert_eq!(fx.apply(&frame).unwrap(), frame);
        assert!(fx.processor.is_none());
    }

    #[test]
    fn test_blur_softens_edge() {
        // GPU-dependent; skip when no adapter is available.
        if GpuContext::new_blocking().is_err() {
            return;
        }
        let mut fx = BlurEffect::new().unwrap();
        fx.set_param("amount", ParamValue::Float(20.0)).unwrap();
        fx.set_param("blend_mode", ParamValue::Choice("normal".into()))
            .unwrap();

        let mut data = vec![0u8; 64 * 64 * 3];
        for y in 0..64usize {
            for x in 32..64usize {
                let i = (y * 64 + x) * 3;
                data[i..i + 3].copy_from_slice(&[255, 255, 255]);
            }
        }
        let frame = Frame::new(64, 64, 3, data).unwrap();
        let out = fx.apply(&frame).unwrap();
        let edge = out.pixel(32, 32)[0];
        assert!(
            edge > 10 && edge < 245,
            "edge pixel should be a mix, got {edge}"
        );
    }
}
