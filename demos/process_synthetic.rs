//! Example: process a synthetic test frame through an effect chain.
//!
//! Builds a gradient frame with a few highlights, runs it through a
//! retro-leaning pipeline and writes the result as a PNG.
//!
//! Run with:
//!     cargo run --example process_synthetic

use anyhow::Result;
use retrofx::{
    ContrastBrightnessEffect, Effect, EffectKind, Frame, GhostingEffect, NoiseEffect, ParamValue,
    ProcessingPipeline, WarmthEffect,
};

fn synthetic_frame(width: u32, height: u32) -> Result<Frame> {
    let mut data = Vec::with_capacity((width * height * 3) as usize);
    for y in 0..height {
        for x in 0..width {
            data.push((x * 255 / width) as u8);
            data.push((y * 255 / height) as u8);
            data.push(128);
        }
    }
    // A few blown-out highlights for smear/glow style effects to chew on.
    for &(hx, hy) in &[(width / 4, height / 3), (width * 3 / 4, height / 2)] {
        for dy in 0..4u32 {
            for dx in 0..4u32 {
                let i = (((hy + dy) * width + hx + dx) * 3) as usize;
                data[i..i + 3].copy_from_slice(&[255, 255, 255]);
            }
        }
    }
    Ok(Frame::new(width, height, 3, data)?)
}

fn main() -> Result<()> {
    env_logger::init();

    println!("RetroFX - Synthetic Frame Example");
    println!("=================================\n");

    let frame = synthetic_frame(640, 480)?;
    println!("Input: {}x{} RGB", frame.width(), frame.height());

    let mut pipeline = ProcessingPipeline::new();

    let mut warmth = WarmthEffect::new()?;
    warmth.set_param("warmth", ParamValue::Float(20.0))?;
    pipeline.add_effect(Box::new(warmth));

    let mut cb = ContrastBrightnessEffect::new()?;
    cb.set_param("contrast", ParamValue::Float(1.3))?;
    pipeline.add_effect(Box::new(cb));

    let mut ghosting = GhostingEffect::new()?;
    ghosting.set_param("strength", ParamValue::Float(0.25))?;
    pipeline.add_effect(Box::new(ghosting));

    let mut noise = NoiseEffect::new()?;
    noise.set_param("strength", ParamValue::Float(12.0))?;
    noise.set_param("blend_mode", ParamValue::Choice("grain_merge".into()))?;
    pipeline.add_effect(Box::new(noise));

    // CCD smear straight from the registry, with its defaults.
    pipeline.add_effect(EffectKind::CcdSmear.create()?);

    println!("Chain:");
    for effect in pipeline.effects() {
        println!("  - {}", effect.name());
    }

    let output = pipeline.apply_once(&frame)?;
    println!(
        "\nOutput: {}x{} ({} channels)",
        output.width(),
        output.height(),
        output.channels()
    );

    let path = "process_synthetic.png";
    image::save_buffer(
        path,
        output.data(),
        output.width(),
        output.height(),
        match output.channels() {
            4 => image::ExtendedColorType::Rgba8,
            _ => image::ExtendedColorType::Rgb8,
        },
    )?;
    println!("Wrote {path}");

    let preset_path = "process_synthetic_preset.json";
    pipeline.save_preset(preset_path)?;
    println!("Wrote {preset_path}");

    Ok(())
}
