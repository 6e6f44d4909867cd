use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Name of the "no preset / no shape template" selection.
pub const CUSTOM: &str = "Custom";

/// Every named parameter of a mold object.
///
/// Declaration order of [`ParamId::ALL`] is dependency order: a parameter's
/// bounds only ever read parameters listed before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ParamId {
    MoldCoreWidth,
    MoldCoreHeight,
    MoldBaseWidth,
    MoldBaseHeight,
    MoldCornerRadius,
    GuideDiameter,
    AddFillet,
    SideLocks,
    BoardWidth,
    TubWidth,
    Wheelbase,
    ConcaveDrop,
    ConcaveLength,
    ConcaveStyle,
    VeneerThickness,
    MoldGap,
    KickGap,
    NoseLength,
    TailLength,
    NoseAngle,
    TailAngle,
    TransitionLength,
    TransitionSmoothness,
    TruckHoleDiam,
    TruckHoleDistL,
    TruckHoleDistW,
    TotalLengthCheck,
    MoldLength,
    NoseHeightCheck,
    TailHeightCheck,
    ShaperHeight,
    NoseFlatness,
    TailFlatness,
    NoseTaperStart,
    TailTaperStart,
    NoseShape,
    TailShape,
    Preset,
}

/// How a parameter is stored and who may write it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    /// Bounded number.
    Number,
    Flag,
    /// Free-form selection name (concave style, preset, shape template).
    Choice,
    /// Derived number written back by recompute only.
    Info,
}

impl ParamId {
    pub const ALL: [ParamId; 38] = [
        ParamId::MoldCoreWidth,
        ParamId::MoldCoreHeight,
        ParamId::MoldBaseWidth,
        ParamId::MoldBaseHeight,
        ParamId::MoldCornerRadius,
        ParamId::GuideDiameter,
        ParamId::AddFillet,
        ParamId::SideLocks,
        ParamId::BoardWidth,
        ParamId::TubWidth,
        ParamId::Wheelbase,
        ParamId::ConcaveDrop,
        ParamId::ConcaveLength,
        ParamId::ConcaveStyle,
        ParamId::VeneerThickness,
        ParamId::MoldGap,
        ParamId::KickGap,
        ParamId::NoseLength,
        ParamId::TailLength,
        ParamId::NoseAngle,
        ParamId::TailAngle,
        ParamId::TransitionLength,
        ParamId::TransitionSmoothness,
        ParamId::TruckHoleDiam,
        ParamId::TruckHoleDistL,
        ParamId::TruckHoleDistW,
        ParamId::TotalLengthCheck,
        ParamId::MoldLength,
        ParamId::NoseHeightCheck,
        ParamId::TailHeightCheck,
        ParamId::ShaperHeight,
        ParamId::NoseFlatness,
        ParamId::TailFlatness,
        ParamId::NoseTaperStart,
        ParamId::TailTaperStart,
        ParamId::NoseShape,
        ParamId::TailShape,
        ParamId::Preset,
    ];

    /// Host property name.
    pub fn name(self) -> &'static str {
        match self {
            ParamId::MoldCoreWidth => "MoldCoreWidth",
            ParamId::MoldCoreHeight => "MoldCoreHeight",
            ParamId::MoldBaseWidth => "MoldBaseWidth",
            ParamId::MoldBaseHeight => "MoldBaseHeight",
            ParamId::MoldCornerRadius => "MoldCornerRadius",
            ParamId::GuideDiameter => "GuideDiameter",
            ParamId::AddFillet => "AddFillet",
            ParamId::SideLocks => "SideLocks",
            ParamId::BoardWidth => "BoardWidth",
            ParamId::TubWidth => "TubWidth",
            ParamId::Wheelbase => "Wheelbase",
            ParamId::ConcaveDrop => "ConcaveDrop",
            ParamId::ConcaveLength => "ConcaveLength",
            ParamId::ConcaveStyle => "ConcaveStyle",
            ParamId::VeneerThickness => "VeneerThickness",
            ParamId::MoldGap => "MoldGap",
            ParamId::KickGap => "KickGap",
            ParamId::NoseLength => "NoseLength",
            ParamId::TailLength => "TailLength",
            ParamId::NoseAngle => "NoseAngle",
            ParamId::TailAngle => "TailAngle",
            ParamId::TransitionLength => "TransitionLength",
            ParamId::TransitionSmoothness => "TransitionSmoothness",
            ParamId::TruckHoleDiam => "TruckHoleDiam",
            ParamId::TruckHoleDistL => "TruckHoleDistL",
            ParamId::TruckHoleDistW => "TruckHoleDistW",
            ParamId::TotalLengthCheck => "TotalLengthCheck",
            ParamId::MoldLength => "MoldLength",
            ParamId::NoseHeightCheck => "NoseHeightCheck",
            ParamId::TailHeightCheck => "TailHeightCheck",
            ParamId::ShaperHeight => "ShaperHeight",
            ParamId::NoseFlatness => "NoseFlatness",
            ParamId::TailFlatness => "TailFlatness",
            ParamId::NoseTaperStart => "NoseTaperStart",
            ParamId::TailTaperStart => "TailTaperStart",
            ParamId::NoseShape => "NoseShape",
            ParamId::TailShape => "TailShape",
            ParamId::Preset => "Preset",
        }
    }

    pub fn kind(self) -> ParamKind {
        match self {
            ParamId::AddFillet | ParamId::SideLocks => ParamKind::Flag,
            ParamId::ConcaveStyle | ParamId::NoseShape | ParamId::TailShape | ParamId::Preset => {
                ParamKind::Choice
            }
            ParamId::TotalLengthCheck | ParamId::NoseHeightCheck | ParamId::TailHeightCheck => {
                ParamKind::Info
            }
            _ => ParamKind::Number,
        }
    }

    pub fn is_read_only(self) -> bool {
        self.kind() == ParamKind::Info
    }

    /// Whether an interactive edit of this parameter detaches the object
    /// from its named preset.
    pub fn invalidates_preset(self) -> bool {
        !matches!(
            self,
            ParamId::Preset | ParamId::NoseShape | ParamId::TailShape | ParamId::AddFillet
        ) && !self.is_read_only()
    }
}

impl fmt::Display for ParamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ParamId {
    type Err = ParamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ParamId::ALL
            .iter()
            .copied()
            .find(|id| id.name() == s)
            .ok_or_else(|| ParamError::UnknownParameter {
                name: s.to_string(),
            })
    }
}

/// A dynamically typed parameter value, as written by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Number(f64),
    Flag(bool),
    Text(String),
}

impl ParamValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            ParamValue::Number(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_flag(&self) -> Option<bool> {
        match self {
            ParamValue::Flag(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ParamValue::Text(v) => Some(v),
            _ => None,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            ParamValue::Number(_) => "number",
            ParamValue::Flag(_) => "flag",
            ParamValue::Text(_) => "text",
        }
    }
}

impl From<f64> for ParamValue {
    fn from(v: f64) -> Self {
        ParamValue::Number(v)
    }
}

impl From<bool> for ParamValue {
    fn from(v: bool) -> Self {
        ParamValue::Flag(v)
    }
}

impl From<&str> for ParamValue {
    fn from(v: &str) -> Self {
        ParamValue::Text(v.to_string())
    }
}

/// Lofting policy for the deck surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ConcaveStyle {
    /// Tail, center and nose lofted separately; the center loft is ruled.
    #[default]
    Flat,
    /// One continuous loft through every slice.
    Organic,
}

impl FromStr for ConcaveStyle {
    type Err = ParamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Flat" => Ok(ConcaveStyle::Flat),
            "Organic" => Ok(ConcaveStyle::Organic),
            other => Err(ParamError::InvalidChoice {
                param: ParamId::ConcaveStyle,
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for ConcaveStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ConcaveStyle::Flat => "Flat",
            ConcaveStyle::Organic => "Organic",
        })
    }
}

/// Which solid the assembler produces. A transient selector, not a stored
/// parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MoldVariant {
    #[default]
    #[serde(rename = "Board_Preview")]
    BoardPreview,
    #[serde(rename = "Male_Mold")]
    MaleMold,
    #[serde(rename = "Female_Mold")]
    FemaleMold,
    #[serde(rename = "Shaper_Template")]
    ShaperTemplate,
}

impl MoldVariant {
    pub const ALL: [MoldVariant; 4] = [
        MoldVariant::BoardPreview,
        MoldVariant::MaleMold,
        MoldVariant::FemaleMold,
        MoldVariant::ShaperTemplate,
    ];

    pub fn name(self) -> &'static str {
        match self {
            MoldVariant::BoardPreview => "Board_Preview",
            MoldVariant::MaleMold => "Male_Mold",
            MoldVariant::FemaleMold => "Female_Mold",
            MoldVariant::ShaperTemplate => "Shaper_Template",
        }
    }
}

impl fmt::Display for MoldVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MoldVariant {
    type Err = ParamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MoldVariant::ALL
            .iter()
            .copied()
            .find(|v| v.name() == s)
            .ok_or_else(|| ParamError::UnknownVariant {
                name: s.to_string(),
            })
    }
}

/// One end of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KickSide {
    Nose,
    Tail,
}

impl KickSide {
    pub fn taper_start(self) -> ParamId {
        match self {
            KickSide::Nose => ParamId::NoseTaperStart,
            KickSide::Tail => ParamId::TailTaperStart,
        }
    }
}

/// Whether a write is a user edit or part of a bulk application.
///
/// Bulk writes run the same clamp rules but never touch the preset marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyMode {
    Interactive,
    Bulk,
}

/// A value that was corrected to fit its bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct RangeWarning {
    pub param: ParamId,
    pub requested: f64,
    pub applied: f64,
    pub message: String,
}

/// Outcome of one write through the propagation engine.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChangeReport {
    /// Parameters whose stored value differs from before the write.
    pub changed: Vec<ParamId>,
    pub warnings: Vec<RangeWarning>,
    /// True when the owning object should rebuild its solid.
    pub recompute: bool,
    /// Non-range problems worth surfacing (skipped preset keys, missing names).
    pub notes: Vec<String>,
}

impl ChangeReport {
    pub fn merge(&mut self, other: ChangeReport) {
        for id in other.changed {
            if !self.changed.contains(&id) {
                self.changed.push(id);
            }
        }
        self.warnings.extend(other.warnings);
        self.notes.extend(other.notes);
        self.recompute |= other.recompute;
    }

    pub fn changed(&self, id: ParamId) -> bool {
        self.changed.contains(&id)
    }
}

/// Errors from parameter writes.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParamError {
    #[error("unknown parameter: {name}")]
    UnknownParameter { name: String },

    #[error("parameter {param} expects a {expected} value, got {got}")]
    TypeMismatch {
        param: ParamId,
        expected: &'static str,
        got: &'static str,
    },

    #[error("parameter {param} is read-only")]
    ReadOnly { param: ParamId },

    #[error("parameter {param} cannot be set to a non-finite value")]
    NonFinite { param: ParamId },

    #[error("invalid choice {value:?} for {param}")]
    InvalidChoice { param: ParamId, value: String },

    #[error("unknown mold variant: {name}")]
    UnknownVariant { name: String },
}

impl ParamError {
    pub(crate) fn mismatch(param: ParamId, expected: &'static str, got: &ParamValue) -> Self {
        ParamError::TypeMismatch {
            param,
            expected,
            got: got.type_name(),
        }
    }
}
