//! Declarative UI control descriptors.
//!
//! Effects expose their editing surface as data: a list of control
//! descriptors the UI layer turns into sliders, spinboxes, checkboxes and
//! dropdowns. Descriptors carry no processing logic; callbacks are referenced
//! by name only and dispatched through [`crate::effects::Effect::trigger`].

use serde::Serialize;

use crate::params::ChoiceOption;

/// One UI control bound to a parameter (or a free-standing button/separator).
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "widget", rename_all = "snake_case")]
pub enum ControlDescriptor {
    Slider {
        name: String,
        label: String,
        min: f64,
        max: f64,
        step: f64,
        #[serde(skip_serializing_if = "Option::is_none")]
        hint: Option<String>,
    },
    SpinBox {
        name: String,
        label: String,
        min: i64,
        max: i64,
        step: i64,
        #[serde(skip_serializing_if = "Option::is_none")]
        hint: Option<String>,
    },
    CheckBox {
        name: String,
        label: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        hint: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        callback: Option<String>,
    },
    Dropdown {
        name: String,
        label: String,
        /// Display labels, parallel to `values`.
        options: Vec<String>,
        /// Underlying option codes (what presets store).
        values: Vec<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        hint: Option<String>,
    },
    Button {
        label: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        hint: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        callback: Option<String>,
    },
    Separator,
}

impl ControlDescriptor {
    pub fn slider(name: &str, label: &str, min: f64, max: f64, step: f64) -> Self {
        Self::Slider {
            name: name.to_string(),
            label: label.to_string(),
            min,
            max,
            step,
            hint: None,
        }
    }

    pub fn spinbox(name: &str, label: &str, min: i64, max: i64, step: i64) -> Self {
        Self::SpinBox {
            name: name.to_string(),
            label: label.to_string(),
            min,
            max,
            step,
            hint: None,
        }
    }

    pub fn checkbox(name: &str, label: &str) -> Self {
        Self::CheckBox {
            name: name.to_string(),
            label: label.to_string(),
            hint: None,
            callback: None,
        }
    }

    pub fn dropdown(name: &str, label: &str, options: &[ChoiceOption]) -> Self {
        Self::Dropdown {
            name: name.to_string(),
            label: label.to_string(),
            options: options.iter().map(|o| o.label.to_string()).collect(),
            values: options.iter().map(|o| o.code.to_string()).collect(),
            hint: None,
        }
    }
}

/// The complete UI-facing description of one effect instance.
#[derive(Debug, Clone, Serialize)]
pub struct EffectLayout {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    pub controls: Vec<ControlDescriptor>,
}

impl EffectLayout {
    pub fn new(name: &str, controls: Vec<ControlDescriptor>) -> Self {
        Self {
            name: name.to_string(),
            hint: None,
            controls,
        }
    }
}
