//! Blend-mode compositing for effect layers.
//!
//! Several effects render an overlay (blur, glow, noise) and composite it
//! over the input with a user-selected blend mode and opacity. Inputs are
//! RGBA f32 buffers on the 0-255 scale; the mix factor is the overlay's
//! alpha multiplied by the opacity, and the base alpha is preserved.

use crate::params::ChoiceOption;

/// The supported blend modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlendMode {
    Normal,
    Multiply,
    DarkenOnly,
    LightenOnly,
    Addition,
    Subtract,
    Difference,
    Divide,
    Dodge,
    Overlay,
    HardLight,
    SoftLight,
    GrainExtract,
    GrainMerge,
}

impl BlendMode {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Multiply => "multiply",
            Self::DarkenOnly => "darken_only",
            Self::LightenOnly => "lighten_only",
            Self::Addition => "addition",
            Self::Subtract => "subtract",
            Self::Difference => "difference",
            Self::Divide => "divide",
            Self::Dodge => "dodge",
            Self::Overlay => "overlay",
            Self::HardLight => "hard_light",
            Self::SoftLight => "soft_light",
            Self::GrainExtract => "grain_extract",
            Self::GrainMerge => "grain_merge",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::Multiply => "Multiply",
            Self::DarkenOnly => "Darken Only",
            Self::LightenOnly => "Lighten Only",
            Self::Addition => "Addition",
            Self::Subtract => "Subtract",
            Self::Difference => "Difference",
            Self::Divide => "Divide",
            Self::Dodge => "Dodge",
            Self::Overlay => "Overlay",
            Self::HardLight => "Hard Light",
            Self::SoftLight => "Soft Light",
            Self::GrainExtract => "Grain Extract",
            Self::GrainMerge => "Grain Merge",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::all().iter().copied().find(|m| m.code() == code)
    }

    pub fn all() -> &'static [Self] {
        &[
            Self::SoftLight,
            Self::LightenOnly,
            Self::Dodge,
            Self::Addition,
            Self::DarkenOnly,
            Self::Multiply,
            Self::HardLight,
            Self::Difference,
            Self::Subtract,
            Self::GrainExtract,
            Self::GrainMerge,
            Self::Divide,
            Self::Overlay,
            Self::Normal,
        ]
    }

    fn apply(&self, b: f32, f: f32) -> f32 {
        match self {
            Self::Normal => f,
            Self::Multiply => b * f,
            Self::DarkenOnly => b.min(f),
            Self::LightenOnly => b.max(f),
            Self::Addition => b + f,
            Self::Subtract => b - f,
            Self::Difference => (b - f).abs(),
            Self::Divide => b / f.max(1.0 / 255.0),
            Self::Dodge => b / (1.0 - f).max(1.0 / 255.0),
            Self::Overlay => {
                if b < 0.5 {
                    2.0 * b * f
                } else {
                    1.0 - 2.0 * (1.0 - b) * (1.0 - f)
                }
            }
            Self::HardLight => Self::Overlay.apply(f, b),
            Self::SoftLight => (1.0 - 2.0 * f) * b * b + 2.0 * f * b,
            Self::GrainExtract => b - f + 0.5,
            Self::GrainMerge => b + f - 0.5,
        }
    }
}

/// Dropdown options for blend-mode parameters, in the original menu order.
pub const BLEND_MODE_OPTIONS: &[ChoiceOption] = &[
    ChoiceOption { code: "soft_light", label: "Soft Light" },
    ChoiceOption { code: "lighten_only", label: "Lighten Only" },
    ChoiceOption { code: "dodge", label: "Dodge" },
    ChoiceOption { code: "addition", label: "Addition" },
    ChoiceOption { code: "darken_only", label: "Darken Only" },
    ChoiceOption { code: "multiply", label: "Multiply" },
    ChoiceOption { code: "hard_light", label: "Hard Light" },
    ChoiceOption { code: "difference", label: "Difference" },
    ChoiceOption { code: "subtract", label: "Subtract" },
    ChoiceOption { code: "grain_extract", label: "Grain Extract" },
    ChoiceOption { code: "grain_merge", label: "Grain Merge" },
    ChoiceOption { code: "divide", label: "Divide" },
    ChoiceOption { code: "overlay", label: "Overlay" },
    ChoiceOption { code: "normal", label: "Normal" },
];

/// Composite `overlay` onto `base`. Both are RGBA f32 buffers of equal
/// dimensions on the 0-255 scale; the result keeps the base alpha.
pub fn blend_rgba(base: &[f32], overlay: &[f32], mode: BlendMode, opacity: f32) -> Vec<f32> {
    debug_assert_eq!(base.len(), overlay.len());
    let opacity = opacity.clamp(0.0, 1.0);
    let mut out = Vec::with_capacity(base.len());
    for (bp, fp) in base.chunks_exact(4).zip(overlay.chunks_exact(4)) {
        let ratio = (fp[3] / 255.0) * opacity;
        for c in 0..3 {
            let b = bp[c] / 255.0;
            let f = fp[c] / 255.0;
            let blended = mode.apply(b, f).clamp(0.0, 1.0);
            out.push((b + (blended - b) * ratio) * 255.0);
        }
        out.push(bp[3]);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_round_trip() {
        for mode in BlendMode::all() {
            assert_eq!(BlendMode::from_code(mode.code()), Some(*mode));
        }
        assert_eq!(BlendMode::from_code("bogus"), None);
    }

    #[test]
    fn test_normal_full_opacity_replaces_base() {
        let base = [10.0, 20.0, 30.0, 255.0];
        let over = [100.0, 110.0, 120.0, 255.0];
        let out = blend_rgba(&base, &over, BlendMode::Normal, 1.0);
        assert_eq!(&out[..3], &[100.0, 110.0, 120.0]);
        assert_eq!(out[3], 255.0);
    }

    #[test]
    fn test_zero_opacity_keeps_base() {
        let base = [10.0, 20.0, 30.0, 255.0];
        let over = [200.0, 200.0, 200.0, 255.0];
        let out = blend_rgba(&base, &over, BlendMode::Addition, 0.0);
        assert_eq!(&out[..3], &[10.0, 20.0, 30.0]);
    }

    #[test]
    fn test_lighten_only_takes_max() {
        let base = [100.0, 200.0, 50.0, 255.0];
        let over = [150.0, 100.0, 50.0, 255.0];
        let out = blend_rgba(&base, &over, BlendMode::LightenOnly, 1.0);
        assert!((out[0] - 150.0).abs() < 0.5);
        assert!((out[1] - 200.0).abs() < 0.5);
    }
}
