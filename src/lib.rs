//! RetroFX Core
//!
//! Retro image and video effect engine: a validated parameter system, a
//! registry of composable effects, and an ordered processing pipeline with
//! identity-based result caching.
//!
//! # Features
//!
//! - 15 effect kinds across Color, Basic, Distort and Artistic categories
//! - Typed, range-validated parameters with JSON preset round-tripping
//! - GPU kernels via wgpu (Metal on macOS, Vulkan on Linux) for blur and glow
//! - Declarative UI layout descriptors, decoupled from any widget toolkit
//! - Lazy streaming over frame sequences for video processing

pub mod blend;
pub mod effects;
pub mod frame;
pub mod gpu;
pub mod imgproc;
pub mod layout;
pub mod params;
pub mod pipeline;

// Re-export commonly used types
pub use blend::{blend_rgba, BlendMode, BLEND_MODE_OPTIONS};
pub use effects::{
    categories, BlurEffect, CcdSmearEffect, ChromaticAberrationEffect, ContrastBrightnessEffect,
    Effect, EffectCore, EffectError, EffectKind, ExposureEffect, FilmGrainEffect, GhostingEffect,
    GlowEffect, HueEffect, JpegDamageEffect, NoiseEffect, RescaleEffect, SharpenEffect,
    VibranceEffect, WarmthEffect,
};
pub use frame::{Frame, FrameError, FrameToken};
pub use gpu::{GpuContext, GpuError, ShaderProcessor};
pub use layout::{ControlDescriptor, EffectLayout};
pub use params::{ChoiceOption, Param, ParamError, ParamManager, ParamValue};
pub use pipeline::{PipelineError, ProcessingPipeline};
