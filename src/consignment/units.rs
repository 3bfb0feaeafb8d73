//! Dimension units and the unit-change conversion.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Linear unit the package dimensions are entered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Unit {
    #[default]
    Centimeters,
    Millimeters,
}

impl Unit {
    pub const ALL: [Unit; 2] = [Unit::Centimeters, Unit::Millimeters];

    /// Wire / display name
    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::Centimeters => "Centimeters",
            Unit::Millimeters => "Millimeters",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Unit {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Centimeters" => Ok(Unit::Centimeters),
            "Millimeters" => Ok(Unit::Millimeters),
            _ => Err(()),
        }
    }
}

/// Rescale a stored dimension for a newly selected unit.
///
/// Switching to millimeters multiplies by 10, switching to anything else
/// divides by 10. The live value is converted on every change; no original
/// value is remembered and nothing is rounded, so repeated toggles compound
/// whatever floating point error the arithmetic produces.
pub fn convert(unit: Unit, value: f64) -> f64 {
    match unit {
        Unit::Millimeters => value * 10.0,
        Unit::Centimeters => value / 10.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_millimeters_multiplies() {
        assert_eq!(convert(Unit::Millimeters, 4.0), 40.0);
        assert_eq!(convert(Unit::Millimeters, 0.0), 0.0);
        assert_eq!(convert(Unit::Millimeters, -1.5), -15.0);
    }

    #[test]
    fn test_to_centimeters_divides() {
        assert_eq!(convert(Unit::Centimeters, 40.0), 4.0);
        assert_eq!(convert(Unit::Centimeters, 5.0), 0.5);
    }

    #[test]
    fn test_repeated_same_direction_compounds() {
        let once = convert(Unit::Millimeters, 2.0);
        let twice = convert(Unit::Millimeters, once);
        assert_eq!(twice, 200.0);
    }

    #[test]
    fn test_parse_and_display() {
        for unit in Unit::ALL {
            assert_eq!(unit.as_str().parse::<Unit>(), Ok(unit));
            assert_eq!(unit.to_string(), unit.as_str());
        }
        assert!("Inches".parse::<Unit>().is_err());
        assert!("centimeters".parse::<Unit>().is_err());
    }

    #[test]
    fn test_serde_uses_variant_names() {
        assert_eq!(
            serde_json::to_string(&Unit::Millimeters).unwrap(),
            "\"Millimeters\""
        );
        let unit: Unit = serde_json::from_str("\"Centimeters\"").unwrap();
        assert_eq!(unit, Unit::Centimeters);
        assert_eq!(Unit::default(), Unit::Centimeters);
    }
}
