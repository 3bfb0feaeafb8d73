//! Field validation
//!
//! A fixed rule table consulted by pure functions. Validation never fails
//! with an error value; it yields a message per invalid field.

use std::collections::BTreeMap;
use std::fmt;

use super::types::ConsignmentDraft;

// ============================================================================
// Fields
// ============================================================================

/// Form field identifiers, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Source,
    Destination,
    Weight,
    Width,
    Height,
    Depth,
    Units,
}

impl Field {
    pub const ALL: [Field; 7] = [
        Field::Source,
        Field::Destination,
        Field::Weight,
        Field::Width,
        Field::Height,
        Field::Depth,
        Field::Units,
    ];

    pub const DIMENSIONS: [Field; 3] = [Field::Width, Field::Height, Field::Depth];

    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Source => "source",
            Field::Destination => "destination",
            Field::Weight => "weight",
            Field::Width => "width",
            Field::Height => "height",
            Field::Depth => "depth",
            Field::Units => "units",
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            Field::Weight | Field::Width | Field::Height | Field::Depth
        )
    }

    /// Fields whose cross-field rule must be re-checked when this one changes
    pub fn dependents(&self) -> &'static [Field] {
        match self {
            Field::Source => &[Field::Destination],
            Field::Destination => &[Field::Source],
            _ => &[],
        }
    }

    fn numeric_value(&self, draft: &ConsignmentDraft) -> Option<f64> {
        match self {
            Field::Weight => Some(draft.weight),
            Field::Width => Some(draft.width),
            Field::Height => Some(draft.height),
            Field::Depth => Some(draft.depth),
            _ => None,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// Rule table
// ============================================================================

/// Numeric range, exclusive lower and inclusive upper
#[derive(Debug, Clone, Copy)]
pub struct Bounds {
    pub min_exclusive: f64,
    pub max_inclusive: f64,
    pub too_small: &'static str,
    pub too_large: &'static str,
}

/// Validation rule for one field
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub field: Field,
    pub required: &'static str,
    pub bounds: Option<Bounds>,
    /// Must differ from the other location field
    pub distinct_location: bool,
}

const SAME_LOCATION: &str = "Source and destination cannot be the same";

const DIMENSION_MAX: f64 = 12.0;
const WEIGHT_MAX_KG: f64 = 1000.0;

const RULES: [Rule; 7] = [
    Rule {
        field: Field::Source,
        required: "Source is required",
        bounds: None,
        distinct_location: true,
    },
    Rule {
        field: Field::Destination,
        required: "Destination is required",
        bounds: None,
        distinct_location: true,
    },
    Rule {
        field: Field::Weight,
        required: "Weight is required",
        bounds: Some(Bounds {
            min_exclusive: 0.0,
            max_inclusive: WEIGHT_MAX_KG,
            too_small: "Weight must be more than 0",
            too_large: "Weight must be less than 1000",
        }),
        distinct_location: false,
    },
    Rule {
        field: Field::Width,
        required: "Width is required",
        bounds: Some(Bounds {
            min_exclusive: 0.0,
            max_inclusive: DIMENSION_MAX,
            too_small: "Width must be more than 0",
            too_large: "Width must be less than 12",
        }),
        distinct_location: false,
    },
    Rule {
        field: Field::Height,
        required: "Height is required",
        bounds: Some(Bounds {
            min_exclusive: 0.0,
            max_inclusive: DIMENSION_MAX,
            too_small: "Height must be more than 0",
            too_large: "Height must be less than 12",
        }),
        distinct_location: false,
    },
    Rule {
        field: Field::Depth,
        required: "Depth is required",
        bounds: Some(Bounds {
            min_exclusive: 0.0,
            max_inclusive: DIMENSION_MAX,
            too_small: "Depth must be more than 0",
            too_large: "Depth must be less than 12",
        }),
        distinct_location: false,
    },
    Rule {
        field: Field::Units,
        required: "Units are required",
        bounds: None,
        distinct_location: false,
    },
];

/// Look up the rule for a field
pub fn rule(field: Field) -> &'static Rule {
    // RULES is indexed in `Field` declaration order
    &RULES[field as usize]
}

// ============================================================================
// Evaluation
// ============================================================================

/// Validate a single field against the current draft.
///
/// Returns the message to show, or `None` when the field is valid.
pub fn validate_field(draft: &ConsignmentDraft, field: Field) -> Option<&'static str> {
    let rule = rule(field);

    match field {
        Field::Source | Field::Destination => {
            let (value, other) = if field == Field::Source {
                (&draft.source, &draft.destination)
            } else {
                (&draft.destination, &draft.source)
            };
            if value.is_empty() {
                return Some(rule.required);
            }
            if rule.distinct_location && value == other {
                return Some(SAME_LOCATION);
            }
            None
        }
        // The enum always holds a selection; free-text input is rejected at parse time
        Field::Units => None,
        _ => {
            let value = field.numeric_value(draft)?;
            if !value.is_finite() {
                return Some(rule.required);
            }
            let bounds = rule.bounds?;
            if value <= bounds.min_exclusive {
                Some(bounds.too_small)
            } else if value > bounds.max_inclusive {
                Some(bounds.too_large)
            } else {
                None
            }
        }
    }
}

/// Validate every field; empty result means the draft is valid
pub fn validate_all(draft: &ConsignmentDraft) -> FieldErrors {
    let mut errors = FieldErrors::default();
    for field in Field::ALL {
        errors.apply(field, validate_field(draft, field));
    }
    errors
}

// ============================================================================
// FieldErrors
// ============================================================================

/// Messages for invalid fields; absence of a field means valid
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<Field, &'static str>);

impl FieldErrors {
    pub fn get(&self, field: Field) -> Option<&'static str> {
        self.0.get(&field).copied()
    }

    pub fn contains(&self, field: Field) -> bool {
        self.0.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &'static str)> + '_ {
        self.0.iter().map(|(f, m)| (*f, *m))
    }

    /// Record or clear the outcome of validating `field`
    pub fn apply(&mut self, field: Field, outcome: Option<&'static str>) {
        match outcome {
            Some(message) => {
                self.0.insert(field, message);
            }
            None => {
                self.0.remove(&field);
            }
        }
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{}: {}", field, message)?;
            first = false;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consignment::units::Unit;

    fn valid_draft() -> ConsignmentDraft {
        ConsignmentDraft {
            source: "Perth".into(),
            destination: "Sydney".into(),
            weight: 80.0,
            width: 4.0,
            height: 4.0,
            depth: 2.0,
            units: Unit::Centimeters,
        }
    }

    #[test]
    fn test_rule_table_order_matches_fields() {
        for field in Field::ALL {
            assert_eq!(rule(field).field, field);
        }
    }

    #[test]
    fn test_valid_draft_has_no_errors() {
        assert!(validate_all(&valid_draft()).is_empty());
    }

    #[test]
    fn test_default_draft_is_invalid() {
        let errors = validate_all(&ConsignmentDraft::default());
        assert_eq!(errors.get(Field::Source), Some("Source is required"));
        assert_eq!(
            errors.get(Field::Destination),
            Some("Destination is required")
        );
        assert_eq!(errors.get(Field::Weight), Some("Weight must be more than 0"));
        assert_eq!(errors.get(Field::Width), Some("Width must be more than 0"));
        assert!(!errors.contains(Field::Units));
    }

    #[test]
    fn test_weight_bounds() {
        let mut draft = valid_draft();

        draft.weight = 1200.0;
        assert_eq!(
            validate_field(&draft, Field::Weight),
            Some("Weight must be less than 1000")
        );

        draft.weight = 1000.0;
        assert_eq!(validate_field(&draft, Field::Weight), None);

        draft.weight = 0.0;
        assert_eq!(
            validate_field(&draft, Field::Weight),
            Some("Weight must be more than 0")
        );

        draft.weight = 0.1;
        assert_eq!(validate_field(&draft, Field::Weight), None);
    }

    #[test]
    fn test_dimension_bounds() {
        let mut draft = valid_draft();

        draft.width = 20.0;
        assert_eq!(
            validate_field(&draft, Field::Width),
            Some("Width must be less than 12")
        );

        draft.height = -12.0;
        assert_eq!(
            validate_field(&draft, Field::Height),
            Some("Height must be more than 0")
        );

        draft.depth = 12.0;
        assert_eq!(validate_field(&draft, Field::Depth), None);
    }

    #[test]
    fn test_non_finite_number_is_missing() {
        let mut draft = valid_draft();
        draft.depth = f64::NAN;
        assert_eq!(validate_field(&draft, Field::Depth), Some("Depth is required"));
        draft.weight = f64::INFINITY;
        assert_eq!(
            validate_field(&draft, Field::Weight),
            Some("Weight is required")
        );
    }

    #[test]
    fn test_same_location_flags_both_fields() {
        let mut draft = valid_draft();
        draft.destination = "Perth".into();

        let errors = validate_all(&draft);
        assert_eq!(
            errors.get(Field::Source),
            Some("Source and destination cannot be the same")
        );
        assert_eq!(
            errors.get(Field::Destination),
            Some("Source and destination cannot be the same")
        );
    }

    #[test]
    fn test_empty_location_reports_required_not_same() {
        let mut draft = valid_draft();
        draft.source.clear();
        draft.destination.clear();
        assert_eq!(validate_field(&draft, Field::Source), Some("Source is required"));
    }

    #[test]
    fn test_dependents_are_symmetric() {
        assert_eq!(Field::Source.dependents(), &[Field::Destination]);
        assert_eq!(Field::Destination.dependents(), &[Field::Source]);
        assert!(Field::Weight.dependents().is_empty());
    }

    #[test]
    fn test_field_errors_apply_and_display() {
        let mut errors = FieldErrors::default();
        errors.apply(Field::Weight, Some("Weight must be less than 1000"));
        errors.apply(Field::Source, Some("Source is required"));
        assert_eq!(errors.len(), 2);
        assert_eq!(
            errors.to_string(),
            "source: Source is required; weight: Weight must be less than 1000"
        );

        errors.apply(Field::Weight, None);
        assert!(!errors.contains(Field::Weight));
        errors.clear();
        assert!(errors.is_empty());
    }
}
