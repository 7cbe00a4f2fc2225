//! Effect system.
//!
//! An effect is one parameterized, named frame transform. Concrete kinds live
//! in this module's submodules, one file per kind, grouped by registry
//! category:
//! - Color: Exposure, Contrast/Brightness, HUE, Warmth, Vibrance
//! - Basic: Rescale, Sharpen
//! - Distort: Chromatic Aberration, Ghosting, CCD Smear, JPEG Damage
//! - Artistic: Glow, Blur, Film Grain, Noise

mod blur;
mod ccd_smear;
mod chromatic_aberration;
mod contrast_brightness;
mod exposure;
mod film_grain;
mod ghosting;
mod glow;
mod hue;
mod jpeg_damage;
mod noise;
mod registry;
mod rescale;
mod sharpen;
mod vibrance;
mod warmth;

pub use blur::BlurEffect;
pub use ccd_smear::CcdSmearEffect;
pub use chromatic_aberration::ChromaticAberrationEffect;
pub use contrast_brightness::ContrastBrightnessEffect;
pub use exposure::ExposureEffect;
pub use film_grain::FilmGrainEffect;
pub use ghosting::GhostingEffect;
pub use glow::GlowEffect;
pub use hue::HueEffect;
pub use jpeg_damage::JpegDamageEffect;
pub use noise::NoiseEffect;
pub use registry::{categories, EffectKind};
pub use rescale::RescaleEffect;
pub use sharpen::SharpenEffect;
pub use vibrance::VibranceEffect;
pub use warmth::WarmthEffect;

use serde_json::{json, Value};

use crate::frame::{Frame, FrameError};
use crate::gpu::GpuError;
use crate::layout::EffectLayout;
use crate::params::{ParamError, ParamManager, ParamValue};

/// Errors raised while constructing or applying an effect.
#[derive(Debug, thiserror::Error)]
pub enum EffectError {
    #[error(transparent)]
    Param(#[from] ParamError),
    #[error("GPU error: {0}")]
    Gpu(#[from] GpuError),
    #[error("frame error: {0}")]
    Frame(#[from] FrameError),
    #[error("codec error: {0}")]
    Codec(#[from] image::ImageError),
    #[error("effect '{0}' does not implement apply")]
    Unimplemented(String),
    #[error("no callback registered for '{0}'")]
    UnknownCallback(String),
}

/// State shared by every effect kind: instance label, enabled flag, and the
/// parameter set declared at construction.
#[derive(Debug, Clone)]
pub struct EffectCore {
    pub name: String,
    pub enabled: bool,
    pub params: ParamManager,
}

impl EffectCore {
    pub fn new(name: &str, params: ParamManager) -> Self {
        Self {
            name: name.to_string(),
            enabled: true,
            params,
        }
    }
}

/// One parameterized frame transform.
///
/// `apply` reads the current parameter values and returns a new frame; it
/// never mutates its input. Kinds that use randomness (Noise, Film Grain,
/// CCD Smear with masking) are intentionally non-deterministic across calls.
pub trait Effect {
    fn core(&self) -> &EffectCore;

    fn core_mut(&mut self) -> &mut EffectCore;

    /// Registry display name of this kind (`"Exposure"`, `"Blur"`, ...).
    fn kind_name(&self) -> &'static str;

    /// Declarative UI description for this instance.
    fn layout(&self) -> EffectLayout;

    /// Transform a frame. The default body preserves the abstract-base
    /// contract: an effect kind that fails to provide a transform is a
    /// programming error surfaced as [`EffectError::Unimplemented`].
    fn apply(&mut self, _frame: &Frame) -> Result<Frame, EffectError> {
        Err(EffectError::Unimplemented(self.core().name.clone()))
    }

    /// Invoke a named UI callback. Callback state is strictly per instance;
    /// the default rejects every name.
    fn trigger(&mut self, callback: &str) -> Result<(), EffectError> {
        Err(EffectError::UnknownCallback(callback.to_string()))
    }

    fn name(&self) -> &str {
        &self.core().name
    }

    fn set_name(&mut self, name: &str) {
        self.core_mut().name = name.to_string();
    }

    fn enabled(&self) -> bool {
        self.core().enabled
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.core_mut().enabled = enabled;
    }

    fn params(&self) -> &ParamManager {
        &self.core().params
    }

    /// Validating pass-through to the parameter manager.
    fn set_param(&mut self, name: &str, value: ParamValue) -> Result<(), ParamError> {
        self.core_mut().params.set(name, value)
    }

    fn get_param(&self, name: &str) -> Result<&ParamValue, ParamError> {
        self.core().params.get(name)
    }

    /// Serialize kind identity, instance name, enabled flag, and parameter
    /// values (preset entry form).
    fn to_value(&self) -> Value {
        json!({
            "type": self.kind_name(),
            "name": self.core().name,
            "enabled": self.core().enabled,
            "params": Value::Object(self.core().params.to_serial()),
        })
    }
}

/// Overlay a serialized preset entry onto a freshly constructed effect.
/// Unknown param keys are ignored (logged); invalid values abort.
pub(crate) fn overlay_value(effect: &mut dyn Effect, entry: &Value) -> Result<(), EffectError> {
    if let Some(name) = entry.get("name").and_then(Value::as_str) {
        effect.set_name(name);
    }
    if let Some(enabled) = entry.get("enabled").and_then(Value::as_bool) {
        effect.set_enabled(enabled);
    }
    if let Some(params) = entry.get("params").and_then(Value::as_object) {
        effect.core_mut().params.merge_serial(params)?;
    }
    Ok(())
}
