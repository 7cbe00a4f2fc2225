//! GPU shader processing.
//!
//! [`GpuContext`] acquires a headless device; [`ShaderProcessor`] runs one
//! effect kernel over a full-frame quad with synchronous readback. Each
//! processor owns its resources exclusively; nothing here is safe to share
//! across concurrent pipeline runs.

pub mod context;
pub mod processor;

pub use context::{GpuContext, GpuError};
pub use processor::ShaderProcessor;
