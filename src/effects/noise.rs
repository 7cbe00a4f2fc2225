//! Synthetic sensor noise.

use rand::Rng;

use super::{Effect, EffectCore, EffectError, EffectKind};
use crate::blend::{blend_rgba, BlendMode, BLEND_MODE_OPTIONS};
use crate::frame::Frame;
use crate::imgproc::sample_normal;
use crate::layout::{ControlDescriptor, EffectLayout};
use crate::params::{ChoiceOption, Param, ParamManager};

pub const NOISE_TYPE_OPTIONS: &[ChoiceOption] = &[
    ChoiceOption { code: "gaussian", label: "Gaussian" },
    ChoiceOption { code: "salt", label: "Salt" },
    ChoiceOption { code: "pepper", label: "Pepper" },
    ChoiceOption { code: "speckle", label: "Speckle" },
];

/// Generates a noise layer of the selected type and composites it over the
/// frame with a blend mode and opacity. Non-deterministic across calls.
pub struct NoiseEffect {
    core: EffectCore,
}

impl NoiseEffect {
    pub fn new() -> Result<Self, EffectError> {
        let params = ParamManager::new(vec![
            Param::float("strength", 0.0)?.range(0.0, 100.0)?.step(1.0),
            Param::float("opacity", 1.0)?.range(0.0, 1.0)?.step(0.05),
            Param::choice("type", "gaussian", NOISE_TYPE_OPTIONS)?,
            Param::choice("blend_mode", "lighten_only", BLEND_MODE_OPTIONS)?,
        ]);
        Ok(Self {
            core: EffectCore::new(EffectKind::Noise.display_name(), params),
        })
    }
}

impl Effect for NoiseEffect {
    fn core(&self) -> &EffectCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut EffectCore {
        &mut self.core
    }

    fn kind_name(&self) -> &'static str {
        EffectKind::Noise.display_name()
    }

    fn layout(&self) -> EffectLayout {
        EffectLayout::new(
            self.name(),
            vec![
                ControlDescriptor::slider("strength", "Noise strength", 0.0, 100.0, 1.0),
                ControlDescriptor::slider("opacity", "Opacity", 0.0, 1.0, 0.05),
                ControlDescriptor::dropdown("type", "Noise type", NOISE_TYPE_OPTIONS),
                ControlDescriptor::dropdown("blend_mode", "Blend mode", BLEND_MODE_OPTIONS),
            ],
        )
    }

    fn apply(&mut self, frame: &Frame) -> Result<Frame, EffectError> {
        let strength = self.core.params.get_f64("strength")? as f32;
        if strength <= 0.0 {
            return Ok(frame.clone());
        }
        let opacity = self.core.params.get_f64("opacity")? as f32;
        let mode = BlendMode::from_code(self.core.params.get_str("blend_mode")?)
            .unwrap_or(BlendMode::Normal);

        let (w, h) = (frame.width() as usize, frame.height() as usize);
        let c = frame.channels() as usize;
        let mut rng = rand::rng();
        let mut noise = vec![0.0f32; w * h * 3];

        match self.core.params.get_str("type")? {
            "salt" | "pepper" => {
                let is_salt = self.core.params.get_str("type")? == "salt";
                let density = (strength / 100.0).clamp(0.0, 1.0);
                let count = (density * (w * h) as f32) as usize;
                // Sampled with replacement, matching the nominal density only
                // approximately.
                for _ in 0..count {
                    let x = rng.random_range(0..w);
                    let y = rng.random_range(0..h);
                    let i = (y * w + x) * 3;
                    let v = if is_salt { 255.0 } else { 0.0 };
                    noise[i..i + 3].fill(v);
                }
            }
            "speckle" => {
                let speckle = strength / 255.0;
                for (i, n) in noise.iter_mut().enumerate() {
                    let px = i / 3;
                    let ch = i % 3;
                    let v = frame.data()[px * c + ch] as f32;
                    *n = v * sample_normal(&mut rng, speckle);
                }
            }
            _ => {
                for n in &mut noise {
                    *n = sample_normal(&mut rng, strength);
                }
            }
        }

        // Opaque alpha on the noise layer, so opacity alone sets the mix.
        let mut overlay = Vec::with_capacity(w * h * 4);
        for px in noise.chunks_exact(3) {
            overlay.extend_from_slice(px);
            overlay.push(255.0);
        }
        let base = frame.to_rgba().to_f32();
        let blended = blend_rgba(&base, &overlay, mode, opacity);
        Ok(Frame::from_f32(frame.width(), frame.height(), 4, &blended)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::ParamValue;

    #[test]
    fn test_zero_strength_is_identity() {
        let mut fx = NoiseEffect::new().unwrap();
        let frame = Frame::filled(4, 4, 3, 90).unwrap();
        assert_eq!(fx.apply(&frame).unwrap(), frame);
    }

    #[test]
    fn test_gaussian_noise_perturbs_pixels() {
        let mut fx = NoiseEffect::new().unwrap();
        fx.set_param("strength", ParamValue::Float(50.0)).unwrap();
        fx.set_param("blend_mode", ParamValue::Choice("addition".into()))
            .unwrap();
        let frame = Frame::filled(16, 16, 3, 100).unwrap();
        let out = fx.apply(&frame).unwrap();
        let changed = out
            .data()
            .chunks_exact(4)
            .filter(|px| px[0] != 100)
            .count();
        assert!(changed > 0, "noise should alter at least some pixels");
    }

    #[test]
    fn test_pepper_darkens_only() {
        let mut fx = NoiseEffect::new().unwrap();
        fx.set_param("strength", ParamValue::Float(80.0)).unwrap();
        fx.set_param("type", ParamValue::Choice("pepper".into())).unwrap();
        fx.set_param("blend_mode", ParamValue::Choice("darken_only".into()))
            .unwrap();
        let frame = Frame::filled(16, 16, 3, 200).unwrap();
        let out = fx.apply(&frame).unwrap();
        assert!(out.data().chunks_exact(4).all(|px| px[0] <= 200));
        assert!(out.data().chunks_exact(4).any(|px| px[0] == 0));
    }

    #[test]
    fn test_unknown_noise_type_rejected() {
        let mut fx = NoiseEffect::new().unwrap();
        assert!(fx
            .set_param("type", ParamValue::Choice("perlin".into()))
            .is_err());
    }
}
