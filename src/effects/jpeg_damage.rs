//! JPEG recompression artifacts.

use image::codecs::jpeg::JpegEncoder;
use image::{ExtendedColorType, GenericImageView};

use super::{Effect, EffectCore, EffectError, EffectKind};
use crate::frame::Frame;
use crate::layout::{ControlDescriptor, EffectLayout};
use crate::params::{Param, ParamManager};

/// Encodes the frame as a JPEG at the chosen quality and decodes it again,
/// baking in block and ringing artifacts. Output is always 4-channel.
pub struct JpegDamageEffect {
    core: EffectCore,
}

impl JpegDamageEffect {
    pub fn new() -> Result<Self, EffectError> {
        let params =
            ParamManager::new(vec![Param::int("quality", 75)?.range(1.0, 100.0)?.step(1.0)]);
        Ok(Self {
            core: EffectCore::new(EffectKind::JpegDamage.display_name(), params),
        })
    }
}

impl Effect for JpegDamageEffect {
    fn core(&self) -> &EffectCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut EffectCore {
        &mut self.core
    }

    fn kind_name(&self) -> &'static str {
        EffectKind::JpegDamage.display_name()
    }

    fn layout(&self) -> EffectLayout {
        EffectLayout::new(
            self.name(),
            vec![ControlDescriptor::spinbox("quality", "Quality", 1, 100, 1)],
        )
    }

    fn apply(&mut self, frame: &Frame) -> Result<Frame, EffectError> {
        let quality = self.core.params.get_i64("quality")? as u8;
        let (w, h) = (frame.width(), frame.height());

        // JPEG has no alpha; strip it before encoding.
        let rgb: Vec<u8> = frame
            .data()
            .chunks_exact(frame.channels() as usize)
            .flat_map(|px| px[..3].iter().copied())
            .collect();

        let mut encoded = Vec::new();
        JpegEncoder::new_with_quality(&mut encoded, quality).encode(
            &rgb,
            w,
            h,
            ExtendedColorType::Rgb8,
        )?;

        let decoded = image::load_from_memory(&encoded)?;
        debug_assert_eq!(decoded.dimensions(), (w, h));
        Ok(Frame::new(w, h, 4, decoded.to_rgba8().into_raw())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::ParamValue;

    #[test]
    fn test_round_trip_keeps_dimensions() {
        let mut fx = JpegDamageEffect::new().unwrap();
        let frame = Frame::filled(17, 9, 3, 128).unwrap();
        let out = fx.apply(&frame).unwrap();
        assert_eq!((out.width(), out.height(), out.channels()), (17, 9, 4));
    }

    #[test]
    fn test_low_quality_distorts_more_than_high() {
        let mut fx = JpegDamageEffect::new().unwrap();
        // Checkerboard, worst case for the DCT.
        let mut data = vec![0u8; 32 * 32 * 3];
        for y in 0..32usize {
            for x in 0..32usize {
                if (x + y) % 2 == 0 {
                    let i = (y * 32 + x) * 3;
                    data[i..i + 3].copy_from_slice(&[255, 255, 255]);
                }
            }
        }
        let frame = Frame::new(32, 32, 3, data).unwrap();

        let err = |out: &Frame| -> u64 {
            out.data()
                .chunks_exact(4)
                .zip(frame.data().chunks_exact(3))
                .map(|(o, i)| (o[0] as i64 - i[0] as i64).unsigned_abs())
                .sum()
        };

        fx.set_param("quality", ParamValue::Int(95)).unwrap();
        let high = err(&fx.apply(&frame).unwrap());
        fx.set_param("quality", ParamValue::Int(5)).unwrap();
        let low = err(&fx.apply(&frame).unwrap());
        assert!(low > high, "low quality {low} should distort more than {high}");
    }

    #[test]
    fn test_quality_bounds_enforced() {
        let mut fx = JpegDamageEffect::new().unwrap();
        assert!(fx.set_param("quality", ParamValue::Int(0)).is_err());
        assert!(fx.set_param("quality", ParamValue::Int(101)).is_err());
    }
}
