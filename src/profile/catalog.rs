//! Static field catalog for the position profile.
//!
//! Eight fixed top-level categories, ~60 dot-addressed fields. The catalog
//! is the candidate list the relevance filter partitions every turn; it is
//! read-only and defined once here.

/// The fixed top-level categories of the profile document.
pub const CATEGORIES: &[&str] = &[
    "position_basics",
    "role_reality",
    "financial_reality",
    "growth_trajectory",
    "culture_environment",
    "team_structure",
    "logistics",
    "hiring_process",
];

/// Every field the interview can ask about, as dot-addressed paths.
///
/// Order matters only within a category: it is the order fields are offered
/// to the model when equally relevant.
pub const FIELD_CATALOG: &[&str] = &[
    // position_basics
    "position_basics.title",
    "position_basics.category",
    "position_basics.summary",
    "position_basics.openings",
    "position_basics.urgency",
    "position_basics.reason_for_opening",
    // role_reality
    "role_reality.day_to_day.core_tasks",
    "role_reality.day_to_day.typical_day",
    "role_reality.day_to_day.tools_used",
    "role_reality.expectations.first_90_days",
    "role_reality.expectations.success_metrics",
    "role_reality.challenges.hardest_part",
    "role_reality.challenges.common_failure_modes",
    "role_reality.turnover.last_person_outcome",
    "role_reality.turnover.average_tenure",
    // financial_reality
    "financial_reality.compensation.pay_type",
    "financial_reality.compensation.base_min",
    "financial_reality.compensation.base_max",
    "financial_reality.compensation.currency",
    "financial_reality.compensation.bonus_structure",
    "financial_reality.compensation.commission",
    "financial_reality.compensation.overtime_policy",
    "financial_reality.equity.offered",
    "financial_reality.equity.range",
    "financial_reality.equity.vesting",
    "financial_reality.benefits.health",
    "financial_reality.benefits.retirement",
    "financial_reality.benefits.pto",
    "financial_reality.revenue.company_stage",
    "financial_reality.revenue.funding_status",
    // growth_trajectory
    "growth_trajectory.promotion.typical_path",
    "growth_trajectory.promotion.timeline",
    "growth_trajectory.skills.development_budget",
    "growth_trajectory.skills.mentorship",
    "growth_trajectory.ceiling.where_this_leads",
    // culture_environment
    "culture_environment.pace.work_intensity",
    "culture_environment.pace.after_hours_expectations",
    "culture_environment.values.what_gets_rewarded",
    "culture_environment.values.what_gets_penalized",
    "culture_environment.social.team_rituals",
    "culture_environment.physical.dress_code",
    "culture_environment.physical.workspace_type",
    // team_structure
    "team_structure.manager.style",
    "team_structure.manager.tenure",
    "team_structure.team.size",
    "team_structure.team.seniority_mix",
    "team_structure.collaboration.cross_team",
    "team_structure.collaboration.meeting_load",
    // logistics
    "logistics.work_model.remote_allowed",
    "logistics.work_model.hybrid_days",
    "logistics.location.address",
    "logistics.location.commute_notes",
    "logistics.schedule.shift_pattern",
    "logistics.schedule.weekend_work",
    "logistics.schedule.flexibility",
    "logistics.travel.percentage",
    // hiring_process
    "hiring_process.stages.count",
    "hiring_process.stages.description",
    "hiring_process.timeline.target_start",
    "hiring_process.timeline.decision_speed",
    "hiring_process.interviewers.who",
    "hiring_process.assessment.work_sample",
];

/// Housekeeping keys stripped by `compact` before the document is handed to
/// the model boundary. Never pruned from the persisted document.
pub const HOUSEKEEPING_KEYS: &[&str] = &[
    "created_at",
    "updated_at",
    "session_id",
    "subject_id",
    "_meta",
];

/// Paths the archetype classifier reads its signals from.
pub mod signal_paths {
    pub const TITLE: &str = "position_basics.title";
    pub const CATEGORY_HINT: &str = "position_basics.category";
    pub const PAY_TYPE: &str = "financial_reality.compensation.pay_type";
    pub const REMOTE_ALLOWED: &str = "logistics.work_model.remote_allowed";
    pub const EQUITY_OFFERED: &str = "financial_reality.equity.offered";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_field_belongs_to_a_category() {
        for field in FIELD_CATALOG {
            let top = field.split('.').next().unwrap();
            assert!(
                CATEGORIES.contains(&top),
                "{field} has unknown top-level category {top}"
            );
        }
    }

    #[test]
    fn signal_paths_are_catalogued() {
        for path in [
            signal_paths::TITLE,
            signal_paths::CATEGORY_HINT,
            signal_paths::PAY_TYPE,
            signal_paths::REMOTE_ALLOWED,
            signal_paths::EQUITY_OFFERED,
        ] {
            assert!(FIELD_CATALOG.contains(&path), "{path} missing from catalog");
        }
    }

    #[test]
    fn catalog_has_no_duplicates() {
        let mut seen = std::collections::HashSet::new();
        for field in FIELD_CATALOG {
            assert!(seen.insert(field), "duplicate field {field}");
        }
    }
}
