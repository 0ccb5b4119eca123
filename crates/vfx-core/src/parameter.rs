use serde::{Deserialize, Serialize};

/// Threshold at which a host double is read as a true boolean.
pub const BOOL_THRESHOLD: f64 = 0.5;

/// Parameter types a host can exchange with an effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParamKind {
    Bool,
    Double,
}

/// A parameter value crossing the host boundary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ParamValue {
    Bool(bool),
    Double(f64),
}

impl ParamValue {
    /// Read as a boolean. Hosts that only speak doubles send `>= 0.5` for true.
    pub fn as_bool(&self) -> bool {
        match *self {
            ParamValue::Bool(b) => b,
            ParamValue::Double(v) => v >= BOOL_THRESHOLD,
        }
    }

    pub fn as_f64(&self) -> f64 {
        match *self {
            ParamValue::Bool(b) => {
                if b {
                    1.0
                } else {
                    0.0
                }
            }
            ParamValue::Double(v) => v,
        }
    }
}

/// Host-facing description of one effect parameter.
///
/// The range is advisory: hosts use it to lay out sliders, effects decide
/// for themselves whether to clamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamInfo {
    pub id: String,
    pub name: String,
    pub description: String,
    pub kind: ParamKind,
    pub default_value: ParamValue,
    pub min: f64,
    pub max: f64,
}

impl ParamInfo {
    pub fn double(
        name: impl Into<String>,
        description: impl Into<String>,
        id: impl Into<String>,
        value: f64,
        min: f64,
        max: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            kind: ParamKind::Double,
            default_value: ParamValue::Double(value),
            min,
            max,
        }
    }

    pub fn boolean(
        name: impl Into<String>,
        description: impl Into<String>,
        id: impl Into<String>,
        value: bool,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            kind: ParamKind::Bool,
            default_value: ParamValue::Bool(value),
            min: 0.0,
            max: 1.0,
        }
    }
}
