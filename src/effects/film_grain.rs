//! Analog film grain.

use image::imageops::{self, FilterType};
use image::{ImageBuffer, Rgb, Rgba};
use rand::Rng;

use super::{Effect, EffectCore, EffectError, EffectKind};
use crate::frame::Frame;
use crate::imgproc::{gaussian_blur_ksize, sample_normal};
use crate::layout::{ControlDescriptor, EffectLayout};
use crate::params::{Param, ParamManager};

/// Additive Gaussian grain. Larger grain sizes generate the noise field at a
/// reduced resolution and upscale it, producing soft clumps instead of
/// per-pixel speckle. Non-deterministic across calls.
pub struct FilmGrainEffect {
    core: EffectCore,
}

impl FilmGrainEffect {
    pub fn new() -> Result<Self, EffectError> {
        let params = ParamManager::new(vec![
            Param::float("grain_strength", 10.0)?.range(0.0, 100.0)?.step(1.0),
            Param::float("grain_size", 1.5)?.range(0.5, 5.0)?.step(0.1),
            Param::bool("color_grain", true)?,
        ]);
        Ok(Self {
            core: EffectCore::new(EffectKind::FilmGrain.display_name(), params),
        })
    }
}

/// Gaussian noise field; monochrome grain replicates one sample per pixel
/// across all channels.
fn noise_field(rng: &mut impl Rng, w: usize, h: usize, c: usize, std_dev: f32, color: bool) -> Vec<f32> {
    let mut field = vec![0.0f32; w * h * c];
    if color {
        for v in &mut field {
            *v = sample_normal(rng, std_dev);
        }
    } else {
        for px in field.chunks_exact_mut(c) {
            px.fill(sample_normal(rng, std_dev));
        }
    }
    field
}

fn resize_field(field: &[f32], w: u32, h: u32, c: u8, new_w: u32, new_h: u32) -> Vec<f32> {
    match c {
        4 => ImageBuffer::<Rgba<f32>, Vec<f32>>::from_raw(w, h, field.to_vec())
            .map(|img| imageops::resize(&img, new_w, new_h, FilterType::CatmullRom).into_raw()),
        _ => ImageBuffer::<Rgb<f32>, Vec<f32>>::from_raw(w, h, field.to_vec())
            .map(|img| imageops::resize(&img, new_w, new_h, FilterType::CatmullRom).into_raw()),
    }
    .unwrap_or_else(|| field.to_vec())
}

impl Effect for FilmGrainEffect {
    fn core(&self) -> &EffectCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut EffectCore {
        &mut self.core
    }

    fn kind_name(&self) -> &'static str {
        EffectKind::FilmGrain.display_name()
    }

    fn layout(&self) -> EffectLayout {
        EffectLayout::new(
            self.name(),
            vec![
                ControlDescriptor::slider("grain_strength", "Grain Strength", 0.0, 100.0, 1.0),
                ControlDescriptor::slider("grain_size", "Grain Size", 0.5, 5.0, 0.1),
                ControlDescriptor::checkbox("color_grain", "Color Grain"),
            ],
        )
    }

    fn apply(&mut self, frame: &Frame) -> Result<Frame, EffectError> {
        let strength = self.core.params.get_f64("grain_strength")? as f32;
        let size = self.core.params.get_f64("grain_size")? as f32;
        let color = self.core.params.get_bool("color_grain")?;

        if strength <= 0.0 {
            return Ok(frame.clone());
        }
        let std_dev = strength / 100.0 * 50.0;

        let (w, h) = (frame.width(), frame.height());
        let c = frame.channels();
        let mut rng = rand::rng();

        let noise = if size > 0.0 {
            let factor = (size as u32).max(1);
            let scaled_w = (w / factor).max(1);
            let scaled_h = (h / factor).max(1);
            let field = noise_field(
                &mut rng,
                scaled_w as usize,
                scaled_h as usize,
                c as usize,
                std_dev,
                color,
            );
            let upscaled = resize_field(&field, scaled_w, scaled_h, c, w, h);

            let mut ksize = (size * 0.5) as u32;
            if ksize % 2 == 0 {
                ksize += 1;
            }
            gaussian_blur_ksize(&upscaled, w, h, c, ksize.max(1))
        } else {
            noise_field(&mut rng, w as usize, h as usize, c as usize, std_dev, color)
        };

        let out: Vec<f32> = frame
            .to_f32()
            .iter()
            .zip(&noise)
            .map(|(&v, &n)| v + n)
            .collect();
        Ok(Frame::from_f32(w, h, c, &out)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::ParamValue;

    #[test]
    fn test_zero_strength_is_identity() {
        let mut fx = FilmGrainEffect::new().unwrap();
        fx.set_param("grain_strength", ParamValue::Float(0.0)).unwrap();
        let frame = Frame::filled(8, 8, 3, 77).unwrap();
        assert_eq!(fx.apply(&frame).unwrap(), frame);
    }

    #[test]
    fn test_grain_perturbs_midtones() {
        let mut fx = FilmGrainEffect::new().unwrap();
        fx.set_param("grain_strength", ParamValue::Float(60.0)).unwrap();
        let frame = Frame::filled(32, 32, 3, 128).unwrap();
        let out = fx.apply(&frame).unwrap();
        assert_eq!((out.width(), out.height(), out.channels()), (32, 32, 3));
        let changed = out.data().iter().filter(|&&v| v != 128).count();
        assert!(changed > 0, "grain should alter at least some pixels");
    }

    #[test]
    fn test_mono_grain_is_channel_correlated() {
        let mut fx = FilmGrainEffect::new().unwrap();
        fx.set_param("grain_strength", ParamValue::Float(40.0)).unwrap();
        fx.set_param("grain_size", ParamValue::Float(0.5)).unwrap();
        fx.set_param("color_grain", ParamValue::Bool(false)).unwrap();
        let frame = Frame::filled(16, 16, 3, 128).unwrap();
        let out = fx.apply(&frame).unwrap();
        for px in out.data().chunks_exact(3) {
            assert!(px[0] == px[1] && px[1] == px[2], "mono grain must stay gray");
        }
    }
}
