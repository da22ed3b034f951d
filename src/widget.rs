//! UI tool catalog and contract validator.
//!
//! The widget catalog is a closed set of input-collection component types,
//! each declaring the props it requires. Validation is advisory: callers log
//! a failed contract and keep the turn, since the conversation must continue
//! even with an imperfect widget.

use serde::{Deserialize, Serialize};

/// The closed catalog of input widget types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WidgetType {
    TextInput,
    SingleSelect,
    MultiSelect,
    YesNo,
    RangeSlider,
    CurrencyRange,
    ChipSelect,
    ScaleRating,
}

impl WidgetType {
    /// All widget types in the catalog.
    pub const ALL: &[WidgetType] = &[
        WidgetType::TextInput,
        WidgetType::SingleSelect,
        WidgetType::MultiSelect,
        WidgetType::YesNo,
        WidgetType::RangeSlider,
        WidgetType::CurrencyRange,
        WidgetType::ChipSelect,
        WidgetType::ScaleRating,
    ];

    /// Parse a wire-format type name. `None` means the name is outside the
    /// catalog.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "text_input" => Some(Self::TextInput),
            "single_select" => Some(Self::SingleSelect),
            "multi_select" => Some(Self::MultiSelect),
            "yes_no" => Some(Self::YesNo),
            "range_slider" => Some(Self::RangeSlider),
            "currency_range" => Some(Self::CurrencyRange),
            "chip_select" => Some(Self::ChipSelect),
            "scale_rating" => Some(Self::ScaleRating),
            _ => None,
        }
    }

    /// The props the type's contract requires.
    pub fn required_props(&self) -> &'static [&'static str] {
        match self {
            Self::TextInput => &["prompt"],
            Self::SingleSelect => &["prompt", "options"],
            Self::MultiSelect => &["prompt", "options"],
            Self::YesNo => &["prompt"],
            Self::RangeSlider => &["prompt", "min", "max"],
            Self::CurrencyRange => &["prompt", "currency"],
            Self::ChipSelect => &["prompt", "options"],
            Self::ScaleRating => &["prompt", "min_label", "max_label"],
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::TextInput => "text_input",
            Self::SingleSelect => "single_select",
            Self::MultiSelect => "multi_select",
            Self::YesNo => "yes_no",
            Self::RangeSlider => "range_slider",
            Self::CurrencyRange => "currency_range",
            Self::ChipSelect => "chip_select",
            Self::ScaleRating => "scale_rating",
        }
    }
}

impl std::fmt::Display for WidgetType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A proposed input widget: a type name from the catalog and a structured
/// prop bag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WidgetSpec {
    #[serde(rename = "type")]
    pub widget_type: String,
    #[serde(default)]
    pub props: serde_json::Map<String, serde_json::Value>,
}

impl WidgetSpec {
    pub fn new(widget_type: WidgetType, props: serde_json::Value) -> Self {
        Self {
            widget_type: widget_type.name().to_string(),
            props: props.as_object().cloned().unwrap_or_default(),
        }
    }
}

/// Outcome of validating a widget spec against its contract.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<String>,
}

/// Check a proposed widget spec against the catalog.
///
/// An unknown type name yields a single "unknown tool" error; otherwise one
/// error per missing required prop. Props present but null count as missing.
pub fn validate(spec: &WidgetSpec) -> ValidationReport {
    let Some(widget_type) = WidgetType::parse(&spec.widget_type) else {
        return ValidationReport {
            valid: false,
            errors: vec![format!("Unknown tool type: {}", spec.widget_type)],
        };
    };

    let errors: Vec<String> = widget_type
        .required_props()
        .iter()
        .filter(|prop| !spec.props.get(**prop).is_some_and(|v| !v.is_null()))
        .map(|prop| format!("{widget_type} is missing required prop: {prop}"))
        .collect();

    ValidationReport {
        valid: errors.is_empty(),
        errors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unknown_type_is_single_error() {
        let spec = WidgetSpec {
            widget_type: "hologram".to_string(),
            props: serde_json::Map::new(),
        };
        let report = validate(&spec);
        assert!(!report.valid);
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].contains("Unknown tool"));
    }

    #[test]
    fn missing_props_one_error_each() {
        let spec = WidgetSpec {
            widget_type: "range_slider".to_string(),
            props: json!({"prompt": "How many?"}).as_object().cloned().unwrap(),
        };
        let report = validate(&spec);
        assert!(!report.valid);
        assert_eq!(report.errors.len(), 2); // min and max
    }

    #[test]
    fn null_prop_counts_as_missing() {
        let spec = WidgetSpec {
            widget_type: "text_input".to_string(),
            props: json!({"prompt": null}).as_object().cloned().unwrap(),
        };
        assert!(!validate(&spec).valid);
    }

    #[test]
    fn complete_spec_is_valid() {
        let spec = WidgetSpec::new(
            WidgetType::SingleSelect,
            json!({"prompt": "Pay type?", "options": ["hourly", "salaried"]}),
        );
        let report = validate(&spec);
        assert!(report.valid, "errors: {:?}", report.errors);
    }

    #[test]
    fn parse_and_name_roundtrip() {
        for &widget_type in WidgetType::ALL {
            assert_eq!(WidgetType::parse(widget_type.name()), Some(widget_type));
        }
        assert_eq!(WidgetType::parse("nonsense"), None);
    }

    #[test]
    fn serde_name_matches_wire_name() {
        for &widget_type in WidgetType::ALL {
            let json = serde_json::to_string(&widget_type).unwrap();
            assert_eq!(json, format!("\"{}\"", widget_type.name()));
        }
    }
}
