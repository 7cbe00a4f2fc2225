//! GPU bloom.

use super::{Effect, EffectCore, EffectError, EffectKind};
use crate::blend::{blend_rgba, BlendMode, BLEND_MODE_OPTIONS};
use crate::frame::Frame;
use crate::gpu::ShaderProcessor;
use crate::layout::{ControlDescriptor, EffectLayout};
use crate::params::{Param, ParamManager};

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct GlowUniforms {
    sigma: f32,
    intensity: f32,
    threshold: f32,
    _pad: f32,
}

/// Bloom around highlights: the GPU kernel isolates pixels above a luminance
/// threshold, blurs them and scales the result; the layer is then composited
/// over the input on the CPU. The shader processor is created on the first
/// apply that needs it.
pub struct GlowEffect {
    core: EffectCore,
    processor: Option<ShaderProcessor>,
}

impl GlowEffect {
    pub fn new() -> Result<Self, EffectError> {
        let params = ParamManager::new(vec![
            Param::float("radius", 5.0)?.range(0.0, 100.0)?.step(1.0),
            Param::float("intensity", 1.0)?.range(0.0, 5.0)?.step(0.1),
            Param::float("light_threshold", 0.7)?.range(0.0, 1.0)?.step(0.01),
            Param::float("opacity", 1.0)?.range(0.0, 1.0)?.step(0.05),
            Param::choice("blend_mode", "lighten_only", BLEND_MODE_OPTIONS)?,
        ]);
        Ok(Self {
            core: EffectCore::new(EffectKind::Glow.display_name(), params),
            processor: None,
        })
    }
}

impl Effect for GlowEffect {
    fn core(&self) -> &EffectCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut EffectCore {
        &mut self.core
    }

    fn kind_name(&self) -> &'static str {
        EffectKind::Glow.display_name()
    }

    fn layout(&self) -> EffectLayout {
        EffectLayout::new(
            self.name(),
            vec![
                ControlDescriptor::slider("radius", "Glow radius", 0.0, 100.0, 1.0),
                ControlDescriptor::slider("intensity", "Glow intensity", 0.0, 5.0, 0.1),
                ControlDescriptor::slider("light_threshold", "Light threshold", 0.0, 1.0, 0.01),
                ControlDescriptor::slider("opacity", "Opacity", 0.0, 1.0, 0.05),
                ControlDescriptor::dropdown("blend_mode", "Blend mode", BLEND_MODE_OPTIONS),
            ],
        )
    }

    fn apply(&mut self, frame: &Frame) -> Result<Frame, EffectError> {
        let radius = self.core.params.get_f64("radius")? as f32;
        let intensity = self.core.params.get_f64("intensity")? as f32;
        if radius <= 0.0 || intensity <= 0.0 {
            return Ok(frame.clone());
        }
        let threshold = self.core.params.get_f64("light_threshold")? as f32;
        let opacity = self.core.params.get_f64("opacity")? as f32;
        let mode = BlendMode::from_code(self.core.params.get_str("blend_mode")?)
            .unwrap_or(BlendMode::LightenOnly);

        let uniforms = GlowUniforms {
            sigma: radius,
            intensity,
            threshold,
            _pad: 0.0,
        };
        let mut processor = match self.processor.take() {
            Some(p) => p,
            None => ShaderProcessor::new(
                "glow",
                include_str!("../gpu/shaders/glow.wgsl"),
                std::mem::size_of::<GlowUniforms>() as u64,
            )?,
        };
        let rendered = processor.process(frame, bytemuck::bytes_of(&uniforms));
        self.processor = Some(processor);
        let glow = rendered?;

        let base = frame.to_rgba().to_f32();
        let blended = blend_rgba(&base, &glow.to_f32(), mode, opacity);
        Ok(Frame::from_f32(frame.width(), frame.height(), 4, &blended)?)
    }
}
