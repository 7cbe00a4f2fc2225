//! Typed, validated effect parameters.
//!
//! A [`Param`] is one named value with kind-specific constraints; a
//! [`ParamManager`] is the ordered collection owned by a single effect.
//! Validation runs at construction, on every [`Param::set_value`], and when
//! overlaying serialized presets; a rejected mutation leaves the prior value
//! untouched.

use serde_json::Value;

/// One option of a choice parameter: stable code plus display label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChoiceOption {
    pub code: &'static str,
    pub label: &'static str,
}

/// A parameter value. `Choice` carries the underlying option code, never the
/// display label. `Action` is an inert marker for trigger-style controls.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Int(i64),
    Float(f64),
    Bool(bool),
    Str(String),
    Choice(String),
    Action,
}

impl ParamValue {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Int(_) => "integer",
            Self::Float(_) => "float",
            Self::Bool(_) => "boolean",
            Self::Str(_) => "string",
            Self::Choice(_) => "choice",
            Self::Action => "action",
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(v) => Some(*v),
            Self::Int(v) => Some(*v as f64),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(v) | Self::Choice(v) => Some(v),
            _ => None,
        }
    }
}

/// Errors raised by parameter validation and lookup.
#[derive(Debug, thiserror::Error)]
pub enum ParamError {
    #[error("invalid value for '{name}': {reason}")]
    InvalidValue { name: String, reason: String },
    #[error("unknown parameter: {0}")]
    UnknownParam(String),
}

impl ParamError {
    fn invalid(name: &str, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}

/// A single named, typed, validated value.
#[derive(Debug, Clone)]
pub struct Param {
    name: String,
    value: ParamValue,
    default: ParamValue,
    min: Option<f64>,
    max: Option<f64>,
    step: Option<f64>,
    options: &'static [ChoiceOption],
}

impl Param {
    /// Canonical validated constructor. `default` falls back to `value`.
    pub fn new(
        name: &str,
        value: ParamValue,
        default: Option<ParamValue>,
    ) -> Result<Self, ParamError> {
        let param = Self {
            name: name.to_string(),
            default: default.unwrap_or_else(|| value.clone()),
            value,
            min: None,
            max: None,
            step: None,
            options: &[],
        };
        param.check(&param.value)?;
        param.check(&param.default)?;
        Ok(param)
    }

    pub fn float(name: &str, value: f64) -> Result<Self, ParamError> {
        Self::new(name, ParamValue::Float(value), None)
    }

    pub fn int(name: &str, value: i64) -> Result<Self, ParamError> {
        Self::new(name, ParamValue::Int(value), None)
    }

    pub fn bool(name: &str, value: bool) -> Result<Self, ParamError> {
        Self::new(name, ParamValue::Bool(value), None)
    }

    pub fn text(name: &str, value: &str) -> Result<Self, ParamError> {
        Self::new(name, ParamValue::Str(value.to_string()), None)
    }

    pub fn action(name: &str) -> Result<Self, ParamError> {
        Self::new(name, ParamValue::Action, None)
    }

    /// Choice parameter; the initial value must be one of `options`.
    pub fn choice(
        name: &str,
        value: &str,
        options: &'static [ChoiceOption],
    ) -> Result<Self, ParamError> {
        let param = Self {
            name: name.to_string(),
            value: ParamValue::Choice(value.to_string()),
            default: ParamValue::Choice(value.to_string()),
            min: None,
            max: None,
            step: None,
            options,
        };
        param.check(&param.value)?;
        Ok(param)
    }

    /// Constrain a numeric parameter to `[min, max]`, re-validating the
    /// current value and default.
    pub fn range(mut self, min: f64, max: f64) -> Result<Self, ParamError> {
        self.min = Some(min);
        self.max = Some(max);
        self.check(&self.value)?;
        self.check(&self.default)?;
        Ok(self)
    }

    /// UI stepping hint; carries no validation semantics.
    pub fn step(mut self, step: f64) -> Self {
        self.step = Some(step);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &ParamValue {
        &self.value
    }

    pub fn default(&self) -> &ParamValue {
        &self.default
    }

    pub fn min(&self) -> Option<f64> {
        self.min
    }

    pub fn max(&self) -> Option<f64> {
        self.max
    }

    pub fn step_hint(&self) -> Option<f64> {
        self.step
    }

    /// Option table, empty for non-choice kinds.
    pub fn options(&self) -> &'static [ChoiceOption] {
        self.options
    }

    fn check(&self, value: &ParamValue) -> Result<(), ParamError> {
        match (&self.value, value) {
            (ParamValue::Choice(_), ParamValue::Choice(code)) => {
                if !self.options.is_empty() && !self.options.iter().any(|o| o.code == code) {
                    let codes: Vec<&str> = self.options.iter().map(|o| o.code).collect();
                    return Err(ParamError::invalid(
                        &self.name,
                        format!("must be one of: {codes:?}"),
                    ));
                }
                Ok(())
            }
            (ParamValue::Int(_), ParamValue::Int(v)) => self.check_bounds(*v as f64),
            (ParamValue::Float(_), ParamValue::Float(v)) => self.check_bounds(*v),
            (ParamValue::Bool(_), ParamValue::Bool(_))
            | (ParamValue::Str(_), ParamValue::Str(_))
            | (ParamValue::Action, ParamValue::Action) => Ok(()),
            (expected, got) => Err(ParamError::invalid(
                &self.name,
                format!("expected {}, got {}", expected.kind_name(), got.kind_name()),
            )),
        }
    }

    fn check_bounds(&self, v: f64) -> Result<(), ParamError> {
        if let Some(min) = self.min {
            if v < min {
                return Err(ParamError::invalid(
                    &self.name,
                    format!("{v} is below minimum {min}"),
                ));
            }
        }
        if let Some(max) = self.max {
            if v > max {
                return Err(ParamError::invalid(
                    &self.name,
                    format!("{v} is above maximum {max}"),
                ));
            }
        }
        Ok(())
    }

    /// Replace the value after validation. On failure the previous value is
    /// left intact.
    pub fn set_value(&mut self, value: ParamValue) -> Result<(), ParamError> {
        self.check(&value)?;
        self.value = value;
        Ok(())
    }

    /// Reset to the declared default.
    pub fn reset(&mut self) {
        self.value = self.default.clone();
    }

    /// Bare serialized form (choice → code string, action → null).
    pub fn to_serial(&self) -> Value {
        match &self.value {
            ParamValue::Int(v) => Value::from(*v),
            ParamValue::Float(v) => Value::from(*v),
            ParamValue::Bool(v) => Value::from(*v),
            ParamValue::Str(v) | ParamValue::Choice(v) => Value::from(v.clone()),
            ParamValue::Action => Value::Null,
        }
    }

    /// Validate a raw serialized value against this parameter's kind and
    /// constraints, then update in place.
    pub fn from_serial(&mut self, raw: &Value) -> Result<(), ParamError> {
        let value = self.coerce(raw)?;
        self.set_value(value)
    }

    fn coerce(&self, raw: &Value) -> Result<ParamValue, ParamError> {
        let mismatch = || {
            ParamError::invalid(
                &self.name,
                format!("{raw} is not a valid {}", self.value.kind_name()),
            )
        };
        match &self.value {
            ParamValue::Int(_) => raw.as_i64().map(ParamValue::Int).ok_or_else(mismatch),
            ParamValue::Float(_) => raw.as_f64().map(ParamValue::Float).ok_or_else(mismatch),
            ParamValue::Bool(_) => raw.as_bool().map(ParamValue::Bool).ok_or_else(mismatch),
            ParamValue::Str(_) => raw
                .as_str()
                .map(|s| ParamValue::Str(s.to_string()))
                .ok_or_else(mismatch),
            ParamValue::Choice(_) => raw
                .as_str()
                .map(|s| ParamValue::Choice(s.to_string()))
                .ok_or_else(mismatch),
            ParamValue::Action => Ok(ParamValue::Action),
        }
    }
}

/// Ordered collection of parameters owned by one effect. Declaration order is
/// preserved for serialization and UI rendering.
#[derive(Debug, Clone, Default)]
pub struct ParamManager {
    params: Vec<Param>,
}

impl ParamManager {
    pub fn new(params: Vec<Param>) -> Self {
        Self { params }
    }

    pub fn add(&mut self, param: Param) {
        self.params.push(param);
    }

    pub fn param(&self, name: &str) -> Option<&Param> {
        self.params.iter().find(|p| p.name() == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Param> {
        self.params.iter()
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Current value of a parameter.
    pub fn get(&self, name: &str) -> Result<&ParamValue, ParamError> {
        self.param(name)
            .map(Param::value)
            .ok_or_else(|| ParamError::UnknownParam(name.to_string()))
    }

    /// Validate and update a parameter value.
    pub fn set(&mut self, name: &str, value: ParamValue) -> Result<(), ParamError> {
        let param = self
            .params
            .iter_mut()
            .find(|p| p.name() == name)
            .ok_or_else(|| ParamError::UnknownParam(name.to_string()))?;
        param.set_value(value)
    }

    pub fn get_f64(&self, name: &str) -> Result<f64, ParamError> {
        let value = self.get(name)?;
        value
            .as_f64()
            .ok_or_else(|| ParamError::UnknownParam(name.to_string()))
    }

    pub fn get_i64(&self, name: &str) -> Result<i64, ParamError> {
        let value = self.get(name)?;
        value
            .as_i64()
            .ok_or_else(|| ParamError::UnknownParam(name.to_string()))
    }

    pub fn get_bool(&self, name: &str) -> Result<bool, ParamError> {
        let value = self.get(name)?;
        value
            .as_bool()
            .ok_or_else(|| ParamError::UnknownParam(name.to_string()))
    }

    pub fn get_str(&self, name: &str) -> Result<&str, ParamError> {
        let value = self.get(name)?;
        value
            .as_str()
            .ok_or_else(|| ParamError::UnknownParam(name.to_string()))
    }

    /// Serialize all parameters to a flat name→value map.
    pub fn to_serial(&self) -> serde_json::Map<String, Value> {
        self.params
            .iter()
            .map(|p| (p.name().to_string(), p.to_serial()))
            .collect()
    }

    /// Overlay serialized values onto the declared parameters. Unknown keys
    /// are ignored with a warning; invalid values fail the whole merge.
    pub fn merge_serial(&mut self, map: &serde_json::Map<String, Value>) -> Result<(), ParamError> {
        for (name, raw) in map {
            match self.params.iter_mut().find(|p| p.name() == name.as_str()) {
                Some(param) => param.from_serial(raw)?,
                None => log::warn!("ignoring unknown preset parameter '{name}'"),
            }
        }
        Ok(())
    }
}
