//! Downscale/upscale to a preset resolution.

use image::imageops::{self, FilterType};
use image::{ImageBuffer, Rgb, Rgba};

use super::{Effect, EffectCore, EffectError, EffectKind};
use crate::frame::Frame;
use crate::layout::{ControlDescriptor, EffectLayout};
use crate::params::{ChoiceOption, Param, ParamManager};

/// Preset resolutions, retro-leaning, in menu order.
pub const RESOLUTION_OPTIONS: &[ChoiceOption] = &[
    ChoiceOption { code: "128x96", label: "128 x 96 (QCIF)" },
    ChoiceOption { code: "160x120", label: "160 x 120 (QQVGA)" },
    ChoiceOption { code: "176x144", label: "176 x 144 (QCIF)" },
    ChoiceOption { code: "240x160", label: "240 x 160 (HQVGA)" },
    ChoiceOption { code: "320x240", label: "320 x 240 (QVGA)" },
    ChoiceOption { code: "352x288", label: "352 x 288 (CIF)" },
    ChoiceOption { code: "400x240", label: "400 x 240 (WQVGA)" },
    ChoiceOption { code: "480x320", label: "480 x 320 (HVGA)" },
    ChoiceOption { code: "640x480", label: "640 x 480 (VGA)" },
    ChoiceOption { code: "720x480", label: "720 x 480 (NTSC)" },
    ChoiceOption { code: "800x480", label: "800 x 480 (WVGA)" },
    ChoiceOption { code: "800x600", label: "800 x 600 (SVGA)" },
    ChoiceOption { code: "960x640", label: "960 x 640" },
    ChoiceOption { code: "1024x600", label: "1024 x 600 (WSVGA)" },
    ChoiceOption { code: "1024x768", label: "1024 x 768 (XGA)" },
    ChoiceOption { code: "1152x864", label: "1152 x 864" },
    ChoiceOption { code: "1280x720", label: "1280 x 720 (HD)" },
    ChoiceOption { code: "1280x960", label: "1280 x 960" },
    ChoiceOption { code: "1280x1024", label: "1280 x 1024 (SXGA)" },
    ChoiceOption { code: "1400x1050", label: "1400 x 1050 (SXGA+)" },
    ChoiceOption { code: "1600x1200", label: "1600 x 1200 (UXGA)" },
    ChoiceOption { code: "1920x1080", label: "1920 x 1080 (Full HD)" },
    ChoiceOption { code: "2048x1536", label: "2048 x 1536 (QXGA)" },
    ChoiceOption { code: "2560x1920", label: "2560 x 1920 (5 MP)" },
];

/// Resizes the frame to fit inside a preset box while keeping its aspect
/// ratio. With `adaptive` set, the box is rotated to match the frame's
/// orientation first.
pub struct RescaleEffect {
    core: EffectCore,
}

impl RescaleEffect {
    pub fn new() -> Result<Self, EffectError> {
        let params = ParamManager::new(vec![
            Param::choice("resolution", "640x480", RESOLUTION_OPTIONS)?,
            Param::bool("adaptive", false)?,
        ]);
        Ok(Self {
            core: EffectCore::new(EffectKind::Rescale.display_name(), params),
        })
    }
}

fn parse_resolution(code: &str) -> Option<(u32, u32)> {
    let (w, h) = code.split_once('x')?;
    Some((w.parse().ok()?, h.parse().ok()?))
}

/// Largest size with the source aspect ratio fitting inside the target box.
fn contain_size(w: u32, h: u32, target_w: u32, target_h: u32) -> (u32, u32) {
    let scale = (target_w as f64 / w as f64).min(target_h as f64 / h as f64);
    let new_w = ((w as f64 * scale).round() as u32).max(1);
    let new_h = ((h as f64 * scale).round() as u32).max(1);
    (new_w, new_h)
}

impl Effect for RescaleEffect {
    fn core(&self) -> &EffectCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut EffectCore {
        &mut self.core
    }

    fn kind_name(&self) -> &'static str {
        EffectKind::Rescale.display_name()
    }

    fn layout(&self) -> EffectLayout {
        EffectLayout::new(
            self.name(),
            vec![
                ControlDescriptor::dropdown("resolution", "Resolution", RESOLUTION_OPTIONS),
                ControlDescriptor::checkbox("adaptive", "Adaptive orientation"),
            ],
        )
    }

    fn apply(&mut self, frame: &Frame) -> Result<Frame, EffectError> {
        let code = self.core.params.get_str("resolution")?;
        let adaptive = self.core.params.get_bool("adaptive")?;

        let Some((mut target_w, mut target_h)) = parse_resolution(code) else {
            return Ok(frame.clone());
        };

        let (w, h) = (frame.width(), frame.height());
        if adaptive {
            let frame_portrait = h > w;
            let preset_portrait = target_h > target_w;
            if frame_portrait != preset_portrait {
                std::mem::swap(&mut target_w, &mut target_h);
            }
        }

        let (new_w, new_h) = contain_size(w, h, target_w, target_h);
        // Frame validates its buffer length, so from_raw cannot fail here.
        let data = match frame.channels() {
            4 => ImageBuffer::<Rgba<u8>, Vec<u8>>::from_raw(w, h, frame.data().to_vec())
                .map(|img| imageops::resize(&img, new_w, new_h, FilterType::CatmullRom).into_raw()),
            _ => ImageBuffer::<Rgb<u8>, Vec<u8>>::from_raw(w, h, frame.data().to_vec())
                .map(|img| imageops::resize(&img, new_w, new_h, FilterType::CatmullRom).into_raw()),
        }
        .unwrap_or_default();
        Ok(Frame::new(new_w, new_h, frame.channels(), data)?)
    }
}
