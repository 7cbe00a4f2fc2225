//! Integration tests for the processing pipeline: caching, streaming,
//! ordering and preset round trips.

use std::cell::Cell;
use std::rc::Rc;

use retrofx::{
    ContrastBrightnessEffect, Effect, EffectCore, EffectError, EffectLayout, ExposureEffect,
    Frame, ParamManager, ParamValue, PipelineError, ProcessingPipeline,
};

/// Identity transform that counts how many times it runs.
struct CountingEffect {
    core: EffectCore,
    applies: Rc<Cell<usize>>,
}

impl CountingEffect {
    fn new(applies: Rc<Cell<usize>>) -> Self {
        Self {
            core: EffectCore::new("counter", ParamManager::default()),
            applies,
        }
    }
}

impl Effect for CountingEffect {
    fn core(&self) -> &EffectCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut EffectCore {
        &mut self.core
    }

    fn kind_name(&self) -> &'static str {
        "Counter"
    }

    fn layout(&self) -> EffectLayout {
        EffectLayout::new(self.name(), vec![])
    }

    fn apply(&mut self, frame: &Frame) -> Result<Frame, EffectError> {
        self.applies.set(self.applies.get() + 1);
        Ok(frame.clone())
    }
}

#[test]
fn test_cache_hit_on_same_frame_identity() {
    let applies = Rc::new(Cell::new(0));
    let mut pipeline = ProcessingPipeline::new();
    pipeline.add_effect(Box::new(CountingEffect::new(applies.clone())));

    let frame = Frame::filled(8, 8, 3, 50).unwrap();
    let first = pipeline.apply_once(&frame).unwrap();
    let second = pipeline.apply_once(&frame).unwrap();
    assert_eq!(applies.get(), 1, "second submit must be served from cache");
    assert_eq!(first, second);
}

#[test]
fn test_cache_miss_on_value_equal_clone() {
    let applies = Rc::new(Cell::new(0));
    let mut pipeline = ProcessingPipeline::new();
    pipeline.add_effect(Box::new(CountingEffect::new(applies.clone())));

    let frame = Frame::filled(8, 8, 3, 50).unwrap();
    let copy = frame.clone();
    assert_eq!(frame, copy);

    pipeline.apply_once(&frame).unwrap();
    pipeline.apply_once(&copy).unwrap();
    assert_eq!(applies.get(), 2, "a clone carries a fresh identity");
}

#[test]
fn test_stream_bypasses_cache_and_preserves_order() {
    let applies = Rc::new(Cell::new(0));
    let mut pipeline = ProcessingPipeline::new();
    pipeline.add_effect(Box::new(CountingEffect::new(applies.clone())));

    let frames: Vec<Frame> = (0u8..4)
        .map(|i| Frame::filled(4, 4, 3, i * 10).unwrap())
        .collect();
    let outputs = pipeline.apply_frames(&frames).unwrap();
    assert_eq!(outputs.len(), 4);
    for (input, output) in frames.iter().zip(&outputs) {
        assert_eq!(input, output);
    }
    assert_eq!(applies.get(), 4);

    // Same frames again: streaming never consults the cache.
    pipeline.apply_frames(&frames).unwrap();
    assert_eq!(applies.get(), 8);
}

#[test]
fn test_stream_is_lazy() {
    let applies = Rc::new(Cell::new(0));
    let mut pipeline = ProcessingPipeline::new();
    pipeline.add_effect(Box::new(CountingEffect::new(applies.clone())));

    let frames: Vec<Frame> = (0..3).map(|_| Frame::filled(4, 4, 3, 1).unwrap()).collect();
    let mut stream = pipeline.apply_stream(&frames);
    assert_eq!(applies.get(), 0, "nothing runs before the first pull");
    stream.next().unwrap().unwrap();
    assert_eq!(applies.get(), 1);
    drop(stream);
    assert_eq!(applies.get(), 1, "dropping the iterator runs nothing more");
}

#[test]
fn test_disabled_effects_are_skipped() {
    let mut pipeline = ProcessingPipeline::new();
    let mut exposure = ExposureEffect::new().unwrap();
    exposure
        .set_param("exposure", ParamValue::Float(2.0))
        .unwrap();
    exposure.set_enabled(false);
    pipeline.add_effect(Box::new(exposure));

    let frame = Frame::filled(4, 4, 3, 100).unwrap();
    let out = pipeline.apply_once(&frame).unwrap();
    assert_eq!(out, frame);
}

#[test]
fn test_chain_applies_in_order() {
    let mut pipeline = ProcessingPipeline::new();

    let mut exposure = ExposureEffect::new().unwrap();
    exposure
        .set_param("exposure", ParamValue::Float(1.2))
        .unwrap();
    pipeline.add_effect(Box::new(exposure));

    let mut cb = ContrastBrightnessEffect::new().unwrap();
    cb.set_param("brightness", ParamValue::Float(10.0)).unwrap();
    pipeline.add_effect(Box::new(cb));

    let frame = Frame::filled(4, 4, 3, 100).unwrap();
    let out = pipeline.apply_once(&frame).unwrap();
    // 100 * 1.2 = 120, then + 10 brightness.
    assert_eq!(out.pixel(0, 0), &[130, 130, 130]);
}

#[test]
fn test_move_effect_changes_result() {
    // Exposure then brightness differs from brightness then exposure.
    let build = || {
        let mut exposure = ExposureEffect::new().unwrap();
        exposure
            .set_param("exposure", ParamValue::Float(2.0))
            .unwrap();
        let mut cb = ContrastBrightnessEffect::new().unwrap();
        cb.set_param("brightness", ParamValue::Float(50.0)).unwrap();
        (exposure, cb)
    };

    let (exposure, cb) = build();
    let mut pipeline = ProcessingPipeline::new();
    pipeline.add_effect(Box::new(exposure));
    pipeline.add_effect(Box::new(cb));

    let frame = Frame::filled(2, 2, 3, 60).unwrap();
    let before = pipeline.apply_once(&frame).unwrap();
    // 60 * 2 + 50 = 170.
    assert_eq!(before.pixel(0, 0)[0], 170);

    pipeline.move_effect(1, 0);
    let fresh = frame.clone();
    let after = pipeline.apply_once(&fresh).unwrap();
    // (60 + 50) * 2 = 220.
    assert_eq!(after.pixel(0, 0)[0], 220);
}

#[test]
fn test_remove_out_of_range_is_noop() {
    let mut pipeline = ProcessingPipeline::new();
    pipeline.add_effect(Box::new(ExposureEffect::new().unwrap()));
    assert!(pipeline.remove_effect(5).is_none());
    assert_eq!(pipeline.len(), 1);
    assert!(pipeline.remove_effect(0).is_some());
    assert!(pipeline.is_empty());
}

#[test]
fn test_preset_round_trip_through_file() {
    let mut pipeline = ProcessingPipeline::new();
    let mut exposure = ExposureEffect::new().unwrap();
    exposure
        .set_param("exposure", ParamValue::Float(1.4))
        .unwrap();
    exposure.set_name("punchy");
    exposure.set_enabled(false);
    pipeline.add_effect(Box::new(exposure));

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("preset.json");
    pipeline.save_preset(&path).unwrap();

    let restored = ProcessingPipeline::load_preset(&path).unwrap();
    assert_eq!(restored.len(), 1);
    let effect = &restored.effects()[0];
    assert_eq!(effect.name(), "punchy");
    assert!(!effect.enabled());
    assert_eq!(
        effect.get_param("exposure").unwrap(),
        &ParamValue::Float(1.4)
    );
}

#[test]
fn test_preset_with_unknown_type_aborts_load() {
    let doc = serde_json::json!({
        "pipeline": [
            { "type": "Exposure", "name": "ok", "enabled": true, "params": {} },
            { "type": "Sparkle", "name": "bad", "enabled": true, "params": {} },
        ]
    });
    let err = ProcessingPipeline::from_value(&doc).unwrap_err();
    assert!(matches!(err, PipelineError::UnknownEffectKind(name) if name == "Sparkle"));
}

#[test]
fn test_preset_with_invalid_param_aborts_load() {
    let doc = serde_json::json!({
        "pipeline": [
            { "type": "Exposure", "params": { "exposure": 99.0 } },
        ]
    });
    assert!(ProcessingPipeline::from_value(&doc).is_err());
}

#[test]
fn test_preset_ignores_unknown_param_keys() {
    let doc = serde_json::json!({
        "pipeline": [
            { "type": "Exposure", "params": { "exposure": 1.5, "legacy_knob": 7 } },
        ]
    });
    let pipeline = ProcessingPipeline::from_value(&doc).unwrap();
    assert_eq!(
        pipeline.effects()[0].get_param("exposure").unwrap(),
        &ParamValue::Float(1.5)
    );
}
