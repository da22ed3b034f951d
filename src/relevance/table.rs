//! Static relevance table: (category prefix, archetype) → relevance.
//!
//! Loaded once at process start into an immutable map; no mutation path
//! exists. Prefixes are the first two dot-segments of a field path. Any
//! prefix not in the table is `Optional`.

use std::collections::HashMap;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use super::archetype::Archetype;

/// Whether a field is worth asking for a given archetype.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Relevance {
    Required,
    Optional,
    Skip,
}

/// One row of the static table: a category prefix and its relevance for
/// every archetype, in `Archetype::ALL` order.
struct TableRow {
    prefix: &'static str,
    // [HourlyService, HourlySkilled, EntrySalaried, ProfessionalSalaried,
    //  TechStartup, Executive, GigContract]
    by_archetype: [Relevance; 7],
}

use Relevance::{Optional as O, Required as R, Skip as S};

static TABLE_ROWS: &[TableRow] = &[
    TableRow { prefix: "position_basics.title", by_archetype: [R, R, R, R, R, R, R] },
    TableRow { prefix: "position_basics.category", by_archetype: [R, R, R, R, R, R, R] },
    TableRow { prefix: "position_basics.summary", by_archetype: [O, O, R, R, R, R, O] },
    TableRow { prefix: "position_basics.openings", by_archetype: [R, O, O, O, O, S, R] },
    TableRow { prefix: "position_basics.urgency", by_archetype: [R, R, O, O, O, O, R] },
    TableRow { prefix: "position_basics.reason_for_opening", by_archetype: [O, O, O, R, R, R, S] },
    TableRow { prefix: "role_reality.day_to_day", by_archetype: [R, R, R, R, R, O, R] },
    TableRow { prefix: "role_reality.expectations", by_archetype: [O, O, R, R, R, R, O] },
    TableRow { prefix: "role_reality.challenges", by_archetype: [O, O, O, R, R, R, O] },
    TableRow { prefix: "role_reality.turnover", by_archetype: [R, O, O, O, O, O, S] },
    TableRow { prefix: "financial_reality.compensation", by_archetype: [R, R, R, R, R, R, R] },
    TableRow { prefix: "financial_reality.equity", by_archetype: [S, S, S, O, R, R, S] },
    TableRow { prefix: "financial_reality.benefits", by_archetype: [R, R, R, R, R, R, S] },
    TableRow { prefix: "financial_reality.revenue", by_archetype: [S, S, O, O, R, R, S] },
    TableRow { prefix: "growth_trajectory.promotion", by_archetype: [O, O, R, R, R, O, S] },
    TableRow { prefix: "growth_trajectory.skills", by_archetype: [O, R, R, R, R, O, O] },
    TableRow { prefix: "growth_trajectory.ceiling", by_archetype: [O, O, R, R, R, R, S] },
    TableRow { prefix: "culture_environment.pace", by_archetype: [R, O, R, R, R, R, O] },
    TableRow { prefix: "culture_environment.values", by_archetype: [O, O, O, R, R, R, S] },
    TableRow { prefix: "culture_environment.social", by_archetype: [O, S, O, O, O, S, S] },
    TableRow { prefix: "culture_environment.physical", by_archetype: [R, R, O, O, S, S, O] },
    TableRow { prefix: "team_structure.manager", by_archetype: [R, R, R, R, R, S, O] },
    TableRow { prefix: "team_structure.team", by_archetype: [O, O, R, R, R, R, S] },
    TableRow { prefix: "team_structure.collaboration", by_archetype: [S, S, O, R, R, R, S] },
    TableRow { prefix: "logistics.work_model", by_archetype: [S, S, R, R, R, R, O] },
    TableRow { prefix: "logistics.location", by_archetype: [R, R, R, O, O, O, O] },
    TableRow { prefix: "logistics.schedule", by_archetype: [R, R, O, O, S, S, R] },
    TableRow { prefix: "logistics.travel", by_archetype: [S, O, O, O, O, R, O] },
    TableRow { prefix: "hiring_process.stages", by_archetype: [R, R, R, R, R, R, R] },
    TableRow { prefix: "hiring_process.timeline", by_archetype: [R, R, R, R, R, R, R] },
    TableRow { prefix: "hiring_process.interviewers", by_archetype: [S, S, O, R, R, R, S] },
    TableRow { prefix: "hiring_process.assessment", by_archetype: [S, O, O, O, R, O, O] },
];

static RELEVANCE_TABLE: LazyLock<HashMap<&'static str, [Relevance; 7]>> =
    LazyLock::new(|| {
        TABLE_ROWS
            .iter()
            .map(|row| (row.prefix, row.by_archetype))
            .collect()
    });

/// Look up the relevance of a category prefix for an archetype.
/// Unknown prefixes are `Optional`.
pub fn lookup(prefix: &str, archetype: Archetype) -> Relevance {
    match RELEVANCE_TABLE.get(prefix) {
        Some(row) => row[archetype.ordinal()],
        None => Relevance::Optional,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::FIELD_CATALOG;

    #[test]
    fn equity_is_skipped_for_non_equity_archetypes() {
        for archetype in [
            Archetype::HourlyService,
            Archetype::HourlySkilled,
            Archetype::EntrySalaried,
            Archetype::GigContract,
        ] {
            assert_eq!(
                lookup("financial_reality.equity", archetype),
                Relevance::Skip,
                "{archetype} should skip equity"
            );
        }
        assert_eq!(
            lookup("financial_reality.equity", Archetype::TechStartup),
            Relevance::Required
        );
    }

    #[test]
    fn unknown_prefix_defaults_to_optional() {
        assert_eq!(
            lookup("no_such.category", Archetype::Executive),
            Relevance::Optional
        );
    }

    #[test]
    fn compensation_required_for_everyone() {
        for &archetype in Archetype::ALL {
            assert_eq!(
                lookup("financial_reality.compensation", archetype),
                Relevance::Required
            );
        }
    }

    #[test]
    fn every_catalogued_prefix_has_a_row() {
        // Every two-segment prefix in the field catalog should be covered so
        // the Optional default only ever applies to genuinely unknown paths.
        for field in FIELD_CATALOG {
            let segments: Vec<&str> = field.split('.').collect();
            if segments.len() < 2 {
                continue;
            }
            let prefix = format!("{}.{}", segments[0], segments[1]);
            assert!(
                TABLE_ROWS.iter().any(|row| row.prefix == prefix),
                "no table row for prefix {prefix}"
            );
        }
    }
}
