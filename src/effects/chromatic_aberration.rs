//! Channel-split chromatic aberration.

use super::{Effect, EffectCore, EffectError, EffectKind};
use crate::frame::Frame;
use crate::layout::{ControlDescriptor, EffectLayout};
use crate::params::{ChoiceOption, Param, ParamManager};

pub const AB_TYPE_OPTIONS: &[ChoiceOption] = &[
    ChoiceOption { code: "rb", label: "Red + Blue" },
    ChoiceOption { code: "rg", label: "Red + Green" },
    ChoiceOption { code: "gb", label: "Green + Blue" },
];

/// Shifts a selected pair of color channels along a rotatable axis with
/// wraparound, leaving the third channel in place.
pub struct ChromaticAberrationEffect {
    core: EffectCore,
}

impl ChromaticAberrationEffect {
    pub fn new() -> Result<Self, EffectError> {
        let params = ParamManager::new(vec![
            Param::float("shift", 0.0)?.range(-20.0, 20.0)?.step(1.0),
            Param::float("rotation", 0.0)?.range(0.0, 360.0)?.step(1.0),
            Param::choice("ab_type", "rb", AB_TYPE_OPTIONS)?,
        ]);
        Ok(Self {
            core: EffectCore::new(EffectKind::ChromaticAberration.display_name(), params),
        })
    }
}

/// Circularly shift one channel plane by (dx, dy).
fn roll_channel(data: &mut [u8], w: usize, h: usize, c: usize, ch: usize, dx: i32, dy: i32) {
    let mut plane = vec![0u8; w * h];
    for y in 0..h {
        let sy = (y as i32 - dy).rem_euclid(h as i32) as usize;
        for x in 0..w {
            let sx = (x as i32 - dx).rem_euclid(w as i32) as usize;
            plane[y * w + x] = data[(sy * w + sx) * c + ch];
        }
    }
    for (i, &v) in plane.iter().enumerate() {
        data[i * c + ch] = v;
    }
}

impl Effect for ChromaticAberrationEffect {
    fn core(&self) -> &EffectCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut EffectCore {
        &mut self.core
    }

    fn kind_name(&self) -> &'static str {
        EffectKind::ChromaticAberration.display_name()
    }

    fn layout(&self) -> EffectLayout {
        EffectLayout::new(
            self.name(),
            vec![
                ControlDescriptor::slider("shift", "Shift", -20.0, 20.0, 1.0),
                ControlDescriptor::slider("rotation", "Rotation", 0.0, 360.0, 1.0),
                ControlDescriptor::dropdown("ab_type", "Channel combo", AB_TYPE_OPTIONS),
            ],
        )
    }

    fn apply(&mut self, frame: &Frame) -> Result<Frame, EffectError> {
        let shift = self.core.params.get_f64("shift")? as f32;
        let angle = (self.core.params.get_f64("rotation")? as f32).to_radians();
        let channels: &[usize] = match self.core.params.get_str("ab_type")? {
            "rg" => &[0, 1],
            "gb" => &[1, 2],
            _ => &[0, 2],
        };

        let dx = (angle.cos() * shift) as i32;
        let dy = (angle.sin() * shift) as i32;
        if dx == 0 && dy == 0 {
            return Ok(frame.clone());
        }

        let (w, h, c) = (
            frame.width() as usize,
            frame.height() as usize,
            frame.channels() as usize,
        );
        let mut data = frame.data().to_vec();
        for &ch in channels {
            roll_channel(&mut data, w, h, c, ch, dx, dy);
        }
        Ok(Frame::new(frame.width(), frame.height(), frame.channels(), data)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::ParamValue;

    #[test]
    fn test_zero_shift_is_identity() {
        let mut fx = ChromaticAberrationEffect::new().unwrap();
        let frame = Frame::new(2, 1, 3, vec![10, 20, 30, 40, 50, 60]).unwrap();
        assert_eq!(fx.apply(&frame).unwrap(), frame);
    }

    #[test]
    fn test_rb_shift_moves_red_and_blue_only() {
        let mut fx = ChromaticAberrationEffect::new().unwrap();
        fx.set_param("shift", ParamValue::Float(1.0)).unwrap();
        // rotation 0: shift is purely horizontal.
        let frame = Frame::new(2, 1, 3, vec![10, 20, 30, 40, 50, 60]).unwrap();
        let out = fx.apply(&frame).unwrap();
        // Red and blue wrap from the other pixel; green stays.
        assert_eq!(out.pixel(0, 0), &[40, 20, 60]);
        assert_eq!(out.pixel(1, 0), &[10, 50, 30]);
    }

    #[test]
    fn test_gb_combo_leaves_red_alone() {
        let mut fx = ChromaticAberrationEffect::new().unwrap();
        fx.set_param("shift", ParamValue::Float(1.0)).unwrap();
        fx.set_param("ab_type", ParamValue::Choice("gb".into())).unwrap();
        let frame = Frame::new(2, 1, 3, vec![10, 20, 30, 40, 50, 60]).unwrap();
        let out = fx.apply(&frame).unwrap();
        assert_eq!(out.pixel(0, 0), &[10, 50, 60]);
    }

    #[test]
    fn test_vertical_shift_at_90_degrees() {
        let mut fx = ChromaticAberrationEffect::new().unwrap();
        fx.set_param("shift", ParamValue::Float(1.0)).unwrap();
        fx.set_param("rotation", ParamValue::Float(90.0)).unwrap();
        let frame = Frame::new(1, 2, 3, vec![10, 20, 30, 40, 50, 60]).unwrap();
        let out = fx.apply(&frame).unwrap();
        assert_eq!(out.pixel(0, 0), &[40, 20, 60]);
    }
}
