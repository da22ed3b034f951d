//! Field relevance filter — partitions the candidate field list into ask
//! vs skip for an archetype, with human-readable skip reasons.

use serde::{Deserialize, Serialize};

use super::archetype::Archetype;
use super::table::{self, Relevance};

/// A field routed to the skip side, with its justification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkippedField {
    pub field: String,
    pub reason: String,
}

/// Result of partitioning a candidate field list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FieldPartition {
    /// Fields worth asking, all required before all optional, each group in
    /// its original relative order.
    pub relevant: Vec<String>,
    pub skipped: Vec<SkippedField>,
}

/// Relevance of a field path for an archetype.
///
/// The path is normalized to its first two dot-segments (its category)
/// before lookup; unknown categories default to `Optional`.
pub fn relevance_of(field_path: &str, archetype: Archetype) -> Relevance {
    let prefix = category_prefix(field_path);
    table::lookup(&prefix, archetype)
}

fn category_prefix(field_path: &str) -> String {
    field_path.split('.').take(2).collect::<Vec<_>>().join(".")
}

/// Partition `fields` into relevant and skipped for `archetype`.
///
/// `Skip` relevance routes a field to `skipped`; `Required` always routes to
/// `relevant`; `Optional` routes to `relevant` only when `include_optional`.
/// The relevant side is a stable partition: required fields first, then
/// optional, each preserving input order.
pub fn partition(fields: &[&str], archetype: Archetype, include_optional: bool) -> FieldPartition {
    let mut required = Vec::new();
    let mut optional = Vec::new();
    let mut skipped = Vec::new();

    for &field in fields {
        match relevance_of(field, archetype) {
            Relevance::Required => required.push(field.to_string()),
            Relevance::Optional => {
                if include_optional {
                    optional.push(field.to_string());
                } else {
                    skipped.push(SkippedField {
                        field: field.to_string(),
                        reason: "Optional field excluded from this pass".to_string(),
                    });
                }
            }
            Relevance::Skip => skipped.push(SkippedField {
                field: field.to_string(),
                reason: explain_skip(field, archetype),
            }),
        }
    }

    required.extend(optional);
    FieldPartition {
        relevant: required,
        skipped,
    }
}

/// Human-readable justification for skipping a field, by pattern-matching on
/// the field name. Fields with no specific pattern get a generic reason
/// naming the archetype.
pub fn explain_skip(field: &str, archetype: Archetype) -> String {
    let name = field.to_lowercase();
    if name.contains("equity") || name.contains("vesting") {
        return format!(
            "Equity is not typically offered for {} roles",
            archetype.label()
        );
    }
    if name.contains("revenue") || name.contains("funding") {
        return format!(
            "Company financials rarely factor into {} hiring",
            archetype.label()
        );
    }
    if name.contains("remote") || name.contains("hybrid") || name.contains("work_model") {
        return format!("{} work is usually tied to a site", capitalize(archetype.label()));
    }
    if name.contains("travel") {
        return format!("Travel is uncommon for {} roles", archetype.label());
    }
    if name.contains("turnover") || name.contains("tenure") {
        return format!(
            "Tenure questions don't apply to {} engagements",
            archetype.label()
        );
    }
    if name.contains("benefits") || name.contains("pto") {
        return format!("Benefits rarely attach to {} work", archetype.label());
    }
    format!("Not usually relevant for a {} role", archetype.label())
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::FIELD_CATALOG;
    use std::collections::HashSet;

    #[test]
    fn relevance_normalizes_to_two_segments() {
        // The leaf segment beyond the category prefix doesn't change lookup.
        assert_eq!(
            relevance_of("financial_reality.equity.offered", Archetype::HourlyService),
            Relevance::Skip
        );
        assert_eq!(
            relevance_of("financial_reality.equity.vesting", Archetype::HourlyService),
            Relevance::Skip
        );
    }

    #[test]
    fn unknown_category_is_optional() {
        assert_eq!(
            relevance_of("mystery.section.leaf", Archetype::TechStartup),
            Relevance::Optional
        );
    }

    #[test]
    fn partition_is_exhaustive_and_disjoint() {
        for &archetype in Archetype::ALL {
            let result = partition(FIELD_CATALOG, archetype, true);
            let relevant: HashSet<&str> = result.relevant.iter().map(String::as_str).collect();
            let skipped: HashSet<&str> =
                result.skipped.iter().map(|s| s.field.as_str()).collect();
            assert!(
                relevant.is_disjoint(&skipped),
                "{archetype}: field in both partitions"
            );
            let all: HashSet<&str> = FIELD_CATALOG.iter().copied().collect();
            let combined: HashSet<&str> = relevant.union(&skipped).copied().collect();
            assert_eq!(combined, all, "{archetype}: partition lost a field");
        }
    }

    #[test]
    fn required_precede_optional_preserving_order() {
        let fields = [
            "position_basics.title",           // required everywhere
            "culture_environment.social.team_rituals", // optional for hourly-service
            "position_basics.category",        // required everywhere
            "growth_trajectory.promotion.timeline", // optional for hourly-service
        ];
        let result = partition(&fields, Archetype::HourlyService, true);
        assert_eq!(
            result.relevant,
            vec![
                "position_basics.title",
                "position_basics.category",
                "culture_environment.social.team_rituals",
                "growth_trajectory.promotion.timeline",
            ]
        );
    }

    #[test]
    fn exclude_optional_routes_to_skipped() {
        let fields = ["culture_environment.social.team_rituals"];
        let result = partition(&fields, Archetype::HourlyService, false);
        assert!(result.relevant.is_empty());
        assert_eq!(result.skipped.len(), 1);
    }

    #[test]
    fn equity_skip_reason_mentions_equity() {
        let reason = explain_skip("financial_reality.equity.offered", Archetype::HourlyService);
        assert!(reason.contains("Equity"), "got: {reason}");
        assert!(reason.contains("hourly service"), "got: {reason}");
    }

    #[test]
    fn generic_skip_reason_names_archetype() {
        let reason = explain_skip("team_structure.collaboration.cross_team", Archetype::HourlyService);
        assert!(reason.contains("hourly service"), "got: {reason}");
    }
}
