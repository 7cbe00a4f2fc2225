//! CCD vertical smear.
//!
//! Old CCD sensors bleed charge along a column when a highlight overloads it,
//! drawing a vertical streak through bright light sources.

use rand::Rng;

use super::{Effect, EffectCore, EffectError, EffectKind};
use crate::frame::Frame;
use crate::imgproc::{gaussian_blur_ksize, luminance};
use crate::layout::{ControlDescriptor, EffectLayout};
use crate::params::{Param, ParamManager};

pub struct CcdSmearEffect {
    core: EffectCore,
}

impl CcdSmearEffect {
    pub fn new() -> Result<Self, EffectError> {
        let params = ParamManager::new(vec![
            Param::int("smear_threshold", 220)?.range(0.0, 255.0)?.step(1.0),
            Param::float("smear_strength", 0.3)?.range(0.0, 1.0)?.step(0.01),
            Param::int("smear_h_blur", 3)?.range(0.0, 21.0)?.step(2.0),
            Param::int("smear_color_r", 255)?.range(0.0, 255.0)?.step(1.0),
            Param::int("smear_color_g", 255)?.range(0.0, 255.0)?.step(1.0),
            Param::int("smear_color_b", 200)?.range(0.0, 255.0)?.step(1.0),
            Param::float("smear_falloff", 0.8)?.range(0.0, 1.0)?.step(0.01),
            Param::bool("use_mask", false)?,
        ]);
        Ok(Self {
            core: EffectCore::new(EffectKind::CcdSmear.display_name(), params),
        })
    }
}

impl Effect for CcdSmearEffect {
    fn core(&self) -> &EffectCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut EffectCore {
        &mut self.core
    }

    fn kind_name(&self) -> &'static str {
        EffectKind::CcdSmear.display_name()
    }

    fn layout(&self) -> EffectLayout {
        EffectLayout::new(
            self.name(),
            vec![
                ControlDescriptor::slider("smear_threshold", "Threshold", 0.0, 255.0, 1.0),
                ControlDescriptor::slider("smear_strength", "Smear Strength", 0.0, 1.0, 0.01),
                ControlDescriptor::slider("smear_h_blur", "Horizontal Blur", 0.0, 21.0, 2.0),
                ControlDescriptor::slider("smear_color_r", "Smear Color R", 0.0, 255.0, 1.0),
                ControlDescriptor::slider("smear_color_g", "Smear Color G", 0.0, 255.0, 1.0),
                ControlDescriptor::slider("smear_color_b", "Smear Color B", 0.0, 255.0, 1.0),
                ControlDescriptor::slider("smear_falloff", "Smear Falloff", 0.0, 1.0, 0.01),
                ControlDescriptor::checkbox("use_mask", "Use Mask"),
            ],
        )
    }

    fn apply(&mut self, frame: &Frame) -> Result<Frame, EffectError> {
        let threshold = self.core.params.get_i64("smear_threshold")? as f32;
        let strength = self.core.params.get_f64("smear_strength")? as f32;
        let h_blur = self.core.params.get_i64("smear_h_blur")? as u32;
        let color = [
            self.core.params.get_i64("smear_color_r")? as f32,
            self.core.params.get_i64("smear_color_g")? as f32,
            self.core.params.get_i64("smear_color_b")? as f32,
        ];
        let falloff = self.core.params.get_f64("smear_falloff")? as f32;
        let use_mask = self.core.params.get_bool("use_mask")?;

        let (w, h) = (frame.width() as usize, frame.height() as usize);
        let c = frame.channels() as usize;
        let base: Vec<f32> = frame
            .data()
            .chunks_exact(c)
            .flat_map(|px| px[..3].iter().map(|&v| v as f32))
            .collect();

        let mut smear = vec![0.0f32; w * h * 3];
        let denom = h as f32 * falloff / 2.0;
        let mut rng = rand::rng();

        for col in 0..w {
            // Rows in this column whose luminance exceeds the threshold.
            let bright: Vec<usize> = (0..h)
                .filter(|&row| {
                    let i = (row * w + col) * 3;
                    luminance(base[i], base[i + 1], base[i + 2]) > threshold
                })
                .collect();
            if bright.is_empty() {
                continue;
            }
            let center = bright.iter().sum::<usize>() as f32 / bright.len() as f32;

            let mask = use_mask.then(|| {
                let angle = rng.random::<f32>() * std::f32::consts::PI;
                let jitter = (rng.random::<f32>() * 2.0 - 1.0) * angle.cos() * 0.1;
                (angle.sin(), jitter)
            });

            for row in 0..h {
                let fall = if denom > 0.0 {
                    let d = (row as f32 - center) / denom;
                    (-d * d).exp()
                } else {
                    0.0
                };
                let mut scale = strength * fall;
                if let Some((sin_a, jitter)) = mask {
                    let y_norm = row as f32 / (h - 1).max(1) as f32 * 2.0 - 1.0;
                    let gradient = (1.0 - (y_norm * sin_a + jitter).abs()).clamp(0.0, 1.0);
                    scale *= gradient;
                }
                let i = (row * w + col) * 3;
                for ch in 0..3 {
                    smear[i + ch] = color[ch] * scale;
                }
            }
        }

        // Feather the streaks across neighbouring columns.
        if h_blur > 1 && h_blur % 2 != 0 {
            smear = gaussian_blur_ksize(&smear, frame.width(), frame.height(), 3, h_blur);
        }

        let out: Vec<f32> = base.iter().zip(&smear).map(|(&b, &s)| b + s).collect();
        Ok(Frame::from_f32(frame.width(), frame.height(), 3, &out)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::ParamValue;

    #[test]
    fn test_dark_frame_untouched() {
        let mut fx = CcdSmearEffect::new().unwrap();
        let frame = Frame::filled(8, 8, 3, 40).unwrap();
        assert_eq!(fx.apply(&frame).unwrap(), frame);
    }

    #[test]
    fn test_highlight_column_streaks_vertically() {
        let mut fx = CcdSmearEffect::new().unwrap();
        fx.set_param("smear_h_blur", ParamValue::Int(0)).unwrap();
        let mut data = vec![20u8; 8 * 8 * 3];
        // One blown-out pixel at (3, 4).
        let i = (4 * 8 + 3) * 3;
        data[i..i + 3].copy_from_slice(&[255, 255, 255]);
        let frame = Frame::new(8, 8, 3, data).unwrap();
        let out = fx.apply(&frame).unwrap();
        // Other rows of the bright column pick up smear color.
        assert!(out.pixel(3, 3)[0] > 20);
        // Columns without highlights stay untouched.
        assert_eq!(out.pixel(6, 4), &[20, 20, 20]);
    }

    #[test]
    fn test_zero_strength_adds_nothing() {
        let mut fx = CcdSmearEffect::new().unwrap();
        fx.set_param("smear_strength", ParamValue::Float(0.0)).unwrap();
        let frame = Frame::filled(4, 4, 3, 250).unwrap();
        assert_eq!(fx.apply(&frame).unwrap(), frame);
    }
}
