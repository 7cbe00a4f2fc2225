//! Static effect registry: category → display name → constructor.
//!
//! Populated at compile time and never mutated. Serves both UI menu
//! population (category iteration) and preset deserialization (display-name
//! resolution). An unresolved display name during preset loading aborts the
//! whole pipeline reconstruction.

use super::{
    BlurEffect, CcdSmearEffect, ChromaticAberrationEffect, ContrastBrightnessEffect, Effect,
    EffectError, ExposureEffect, FilmGrainEffect, GhostingEffect, GlowEffect, HueEffect,
    JpegDamageEffect, NoiseEffect, RescaleEffect, SharpenEffect, VibranceEffect, WarmthEffect,
};

/// All registered effect kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EffectKind {
    Exposure,
    ContrastBrightness,
    Hue,
    Warmth,
    Vibrance,
    Rescale,
    Sharpen,
    ChromaticAberration,
    Ghosting,
    CcdSmear,
    JpegDamage,
    Glow,
    Blur,
    FilmGrain,
    Noise,
}

/// Category table in menu order.
static CATEGORIES: &[(&str, &[EffectKind])] = &[
    (
        "Color",
        &[
            EffectKind::Exposure,
            EffectKind::ContrastBrightness,
            EffectKind::Hue,
            EffectKind::Warmth,
            EffectKind::Vibrance,
        ],
    ),
    ("Basic", &[EffectKind::Rescale, EffectKind::Sharpen]),
    (
        "Distort",
        &[
            EffectKind::ChromaticAberration,
            EffectKind::Ghosting,
            EffectKind::CcdSmear,
            EffectKind::JpegDamage,
        ],
    ),
    (
        "Artistic",
        &[
            EffectKind::Glow,
            EffectKind::Blur,
            EffectKind::FilmGrain,
            EffectKind::Noise,
        ],
    ),
];

impl EffectKind {
    /// Registry display name, also the preset `type` field.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Exposure => "Exposure",
            Self::ContrastBrightness => "Contrast/Brightness",
            Self::Hue => "HUE",
            Self::Warmth => "Warmth",
            Self::Vibrance => "Vibrance",
            Self::Rescale => "Rescale",
            Self::Sharpen => "Sharpen",
            Self::ChromaticAberration => "Chromatic Aberration",
            Self::Ghosting => "Ghosting",
            Self::CcdSmear => "CCD Smear",
            Self::JpegDamage => "JPEG Damage",
            Self::Glow => "Glow",
            Self::Blur => "Blur",
            Self::FilmGrain => "Film Grain",
            Self::Noise => "Noise",
        }
    }

    /// Category this kind is listed under.
    pub fn category(&self) -> &'static str {
        CATEGORIES
            .iter()
            .find(|(_, kinds)| kinds.contains(self))
            .map(|(cat, _)| *cat)
            .unwrap_or("Other")
    }

    /// Resolve a display name back to a kind.
    pub fn from_display_name(name: &str) -> Option<Self> {
        Self::all().iter().copied().find(|k| k.display_name() == name)
    }

    pub fn all() -> &'static [Self] {
        &[
            Self::Exposure,
            Self::ContrastBrightness,
            Self::Hue,
            Self::Warmth,
            Self::Vibrance,
            Self::Rescale,
            Self::Sharpen,
            Self::ChromaticAberration,
            Self::Ghosting,
            Self::CcdSmear,
            Self::JpegDamage,
            Self::Glow,
            Self::Blur,
            Self::FilmGrain,
            Self::Noise,
        ]
    }

    /// Construct a default instance of this kind.
    pub fn create(&self) -> Result<Box<dyn Effect>, EffectError> {
        Ok(match self {
            Self::Exposure => Box::new(ExposureEffect::new()?),
            Self::ContrastBrightness => Box::new(ContrastBrightnessEffect::new()?),
            Self::Hue => Box::new(HueEffect::new()?),
            Self::Warmth => Box::new(WarmthEffect::new()?),
            Self::Vibrance => Box::new(VibranceEffect::new()?),
            Self::Rescale => Box::new(RescaleEffect::new()?),
            Self::Sharpen => Box::new(SharpenEffect::new()?),
            Self::ChromaticAberration => Box::new(ChromaticAberrationEffect::new()?),
            Self::Ghosting => Box::new(GhostingEffect::new()?),
            Self::CcdSmear => Box::new(CcdSmearEffect::new()?),
            Self::JpegDamage => Box::new(JpegDamageEffect::new()?),
            Self::Glow => Box::new(GlowEffect::new()?),
            Self::Blur => Box::new(BlurEffect::new()?),
            Self::FilmGrain => Box::new(FilmGrainEffect::new()?),
            Self::Noise => Box::new(NoiseEffect::new()?),
        })
    }
}

/// Iterate categories in menu order for UI population.
pub fn categories() -> impl Iterator<Item = (&'static str, &'static [EffectKind])> {
    CATEGORIES.iter().copied()
}
