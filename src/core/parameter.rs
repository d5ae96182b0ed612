//! Tunable filter parameters.
//!
//! A filter accepts some subset of the three recognized parameter kinds.
//! Each kind has a fixed range that every stored value must satisfy; the
//! slider step is only a UI hint.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the three recognized numeric controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterKind {
    /// Effect strength, 0 to 1.
    Intensity,
    /// Spatial radius in pixels, 0 to 1000.
    Radius,
    /// Scale factor, 0 to 100.
    Scale,
}

impl ParameterKind {
    /// All parameter kinds in slider order.
    pub fn all() -> &'static [ParameterKind] {
        &[ParameterKind::Intensity, ParameterKind::Scale, ParameterKind::Radius]
    }

    /// Lowercase identifier.
    pub fn id(&self) -> &'static str {
        match self {
            ParameterKind::Intensity => "intensity",
            ParameterKind::Radius => "radius",
            ParameterKind::Scale => "scale",
        }
    }

    /// The declared definition (range, default, step) for this kind.
    pub fn definition(&self) -> ParameterDefinition {
        match self {
            ParameterKind::Intensity => ParameterDefinition::new(*self, 0.0, 1.0, 0.0)
                .with_description("Strength of the effect")
                .with_ui_hint(UiHint::Slider { step: None }),
            ParameterKind::Scale => ParameterDefinition::new(*self, 0.0, 100.0, 50.0)
                .with_description("Size of the effect's cells or blocks")
                .with_ui_hint(UiHint::Slider { step: Some(10.0) }),
            ParameterKind::Radius => ParameterDefinition::new(*self, 0.0, 1000.0, 500.0)
                .with_description("Reach of the effect in pixels")
                .with_ui_hint(UiHint::Slider { step: Some(50.0) }),
        }
    }

    /// Value a session resets this parameter to when a filter is selected.
    pub fn default_value(&self) -> f64 {
        self.definition().default_value
    }
}

impl fmt::Display for ParameterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl std::str::FromStr for ParameterKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "intensity" => Ok(ParameterKind::Intensity),
            "radius" => Ok(ParameterKind::Radius),
            "scale" => Ok(ParameterKind::Scale),
            other => Err(format!("unknown parameter '{}'", other)),
        }
    }
}

/// UI hints for parameter display.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(tag = "widget", content = "options")]
pub enum UiHint {
    /// Default input widget
    Default,
    /// Slider, optionally snapping to a step
    Slider {
        /// Step granularity; `None` is continuous
        step: Option<f64>,
    },
}

/// Declared range and default of a parameter kind.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParameterDefinition {
    /// Which parameter this describes
    pub kind: ParameterKind,
    /// Inclusive lower bound
    pub min: f64,
    /// Inclusive upper bound
    pub max: f64,
    /// Value used when a filter is (re)selected
    pub default_value: f64,
    /// Description for documentation
    pub description: String,
    /// UI widget hint
    pub ui_hint: UiHint,
}

impl ParameterDefinition {
    /// Create a definition with an inclusive range.
    pub fn new(kind: ParameterKind, min: f64, max: f64, default_value: f64) -> Self {
        Self {
            kind,
            min,
            max,
            default_value,
            description: String::new(),
            ui_hint: UiHint::Default,
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the UI hint.
    pub fn with_ui_hint(mut self, hint: UiHint) -> Self {
        self.ui_hint = hint;
        self
    }

    /// Check a value against the declared range.
    pub fn validate(&self, value: f64) -> Result<(), String> {
        if !value.is_finite() {
            return Err(format!("{} must be a finite number", self.kind));
        }
        if value < self.min || value > self.max {
            return Err(format!(
                "{} must be between {} and {}, got {}",
                self.kind, self.min, self.max, value
            ));
        }
        Ok(())
    }
}

/// Values for a set of parameter kinds. Keys are unique and equality
/// ignores insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParameterSet {
    values: IndexMap<ParameterKind, f64>,
}

impl ParameterSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults for exactly the given kinds.
    pub fn defaults_for<'a>(kinds: impl IntoIterator<Item = &'a ParameterKind>) -> Self {
        kinds.into_iter().map(|k| (*k, k.default_value())).collect()
    }

    /// Get a value.
    pub fn get(&self, kind: ParameterKind) -> Option<f64> {
        self.values.get(&kind).copied()
    }

    /// Insert or replace a value, returning the previous one.
    pub fn insert(&mut self, kind: ParameterKind, value: f64) -> Option<f64> {
        self.values.insert(kind, value)
    }

    /// Whether a value is present for `kind`.
    pub fn contains(&self, kind: ParameterKind) -> bool {
        self.values.contains_key(&kind)
    }

    /// Iterate over entries.
    pub fn iter(&self) -> impl Iterator<Item = (ParameterKind, f64)> + '_ {
        self.values.iter().map(|(k, v)| (*k, *v))
    }

    /// The sub-mapping whose keys are in `kinds`.
    pub fn restricted_to<'a>(&self, kinds: impl IntoIterator<Item = &'a ParameterKind>) -> Self {
        kinds
            .into_iter()
            .filter_map(|k| self.get(*k).map(|v| (*k, v)))
            .collect()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the set has no entries.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl FromIterator<(ParameterKind, f64)> for ParameterSet {
    fn from_iter<I: IntoIterator<Item = (ParameterKind, f64)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for ParameterSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (kind, value)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", kind, value)?;
        }
        write!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declared_ranges() {
        let intensity = ParameterKind::Intensity.definition();
        assert_eq!((intensity.min, intensity.max, intensity.default_value), (0.0, 1.0, 0.0));

        let scale = ParameterKind::Scale.definition();
        assert_eq!((scale.min, scale.max, scale.default_value), (0.0, 100.0, 50.0));
        assert_eq!(scale.ui_hint, UiHint::Slider { step: Some(10.0) });

        let radius = ParameterKind::Radius.definition();
        assert_eq!((radius.min, radius.max, radius.default_value), (0.0, 1000.0, 500.0));
    }

    #[test]
    fn test_validate_bounds() {
        let radius = ParameterKind::Radius.definition();
        assert!(radius.validate(0.0).is_ok());
        assert!(radius.validate(1000.0).is_ok());
        assert!(radius.validate(1500.0).is_err());
        assert!(radius.validate(-0.5).is_err());
        assert!(radius.validate(f64::NAN).is_err());

        let scale = ParameterKind::Scale.definition();
        assert!(scale.validate(0.0).is_ok());
        assert!(scale.validate(100.0).is_ok());
        assert!(scale.validate(100.001).is_err());
        assert!(scale.validate(-0.001).is_err());
    }

    #[test]
    fn test_equality_ignores_order() {
        let a: ParameterSet = [(ParameterKind::Intensity, 0.5), (ParameterKind::Radius, 10.0)]
            .into_iter()
            .collect();
        let b: ParameterSet = [(ParameterKind::Radius, 10.0), (ParameterKind::Intensity, 0.5)]
            .into_iter()
            .collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_restricted_to() {
        let set = ParameterSet::defaults_for(ParameterKind::all());
        let restricted = set.restricted_to(&[ParameterKind::Scale]);

        assert_eq!(restricted.len(), 1);
        assert_eq!(restricted.get(ParameterKind::Scale), Some(50.0));
        assert!(!restricted.contains(ParameterKind::Radius));
    }

    #[test]
    fn test_parse_kind() {
        assert_eq!("Radius".parse::<ParameterKind>(), Ok(ParameterKind::Radius));
        assert!("angle".parse::<ParameterKind>().is_err());
    }
}
