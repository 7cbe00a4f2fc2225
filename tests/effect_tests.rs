//! Integration tests for effect construction, semantics and serialization.

use retrofx::{
    categories, ContrastBrightnessEffect, Effect, EffectKind, ExposureEffect, Frame, HueEffect,
    ParamValue, RescaleEffect,
};

#[test]
fn test_registry_instantiates_every_kind() {
    for kind in EffectKind::all() {
        let effect = kind.create().expect("default construction must succeed");
        assert_eq!(effect.kind_name(), kind.display_name());
        assert!(effect.enabled());
    }
}

#[test]
fn test_category_menu_order() {
    let names: Vec<&str> = categories().map(|(name, _)| name).collect();
    assert_eq!(names, ["Color", "Basic", "Distort", "Artistic"]);
}

#[test]
fn test_layouts_reference_declared_params() {
    use retrofx::ControlDescriptor;
    for kind in EffectKind::all() {
        let effect = kind.create().unwrap();
        for control in effect.layout().controls {
            let name = match &control {
                ControlDescriptor::Slider { name, .. }
                | ControlDescriptor::SpinBox { name, .. }
                | ControlDescriptor::CheckBox { name, .. }
                | ControlDescriptor::Dropdown { name, .. } => name.clone(),
                _ => continue,
            };
            assert!(
                effect.params().param(&name).is_some(),
                "{}: control '{name}' has no backing parameter",
                kind.display_name()
            );
        }
    }
}

#[test]
fn test_exposure_brightens_midtones() {
    let mut fx = ExposureEffect::new().unwrap();
    fx.set_param("exposure", ParamValue::Float(1.2)).unwrap();
    let frame = Frame::filled(8, 8, 3, 200).unwrap();
    let out = fx.apply(&frame).unwrap();
    assert_eq!(out.pixel(4, 4), &[240, 240, 240]);
}

#[test]
fn test_hue_full_rotation_is_identity() {
    let mut fx = HueEffect::new().unwrap();
    fx.set_param("hue_shift", ParamValue::Float(180.0)).unwrap();
    let frame = Frame::new(1, 1, 3, vec![255, 0, 0]).unwrap();
    let half = fx.apply(&frame).unwrap();
    // 180 degrees turns red into cyan.
    assert_eq!(half.pixel(0, 0), &[0, 255, 255]);
    let back = fx.apply(&half).unwrap();
    assert_eq!(back.pixel(0, 0), &[255, 0, 0]);
}

#[test]
fn test_disabled_flag_survives_serialization() {
    let mut fx = ContrastBrightnessEffect::new().unwrap();
    fx.set_enabled(false);
    fx.set_name("my contrast");
    fx.set_param("brightness", ParamValue::Float(25.0)).unwrap();

    let value = fx.to_value();
    assert_eq!(value["type"], "Contrast/Brightness");
    assert_eq!(value["name"], "my contrast");
    assert_eq!(value["enabled"], false);
    assert_eq!(value["params"]["brightness"], 25.0);
    assert_eq!(value["params"]["contrast"], 1.0);
}

#[test]
fn test_rescale_serializes_choice_as_code() {
    let mut fx = RescaleEffect::new().unwrap();
    fx.set_param("resolution", ParamValue::Choice("1280x720".into()))
        .unwrap();
    let value = fx.to_value();
    assert_eq!(value["params"]["resolution"], "1280x720");
    assert_eq!(value["params"]["adaptive"], false);
}

#[test]
fn test_set_param_rejects_out_of_range_and_keeps_prior() {
    let mut fx = ExposureEffect::new().unwrap();
    fx.set_param("exposure", ParamValue::Float(1.5)).unwrap();
    assert!(fx.set_param("exposure", ParamValue::Float(5.0)).is_err());
    assert_eq!(fx.get_param("exposure").unwrap(), &ParamValue::Float(1.5));
}

#[test]
fn test_unknown_param_name_errors() {
    let mut fx = ExposureEffect::new().unwrap();
    assert!(fx.set_param("gain", ParamValue::Float(1.0)).is_err());
}
