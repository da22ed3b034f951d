//! Archetype classification — a coarse category of the position used to
//! decide which fields are worth asking about.

use serde::{Deserialize, Serialize};

use crate::profile::{ProfileDocument, signal_paths};

/// How the position pays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayType {
    Hourly,
    Salaried,
    Contract,
}

impl PayType {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "hourly" | "hour" | "wage" => Some(Self::Hourly),
            "salaried" | "salary" | "annual" => Some(Self::Salaried),
            "contract" | "gig" | "freelance" | "1099" => Some(Self::Contract),
            _ => None,
        }
    }
}

/// The closed set of position archetypes.
///
/// Variant order is the canonical enumeration order and doubles as the
/// classifier tie-break: on equal scores the earlier variant wins. That
/// tie-break is deterministic but otherwise arbitrary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Archetype {
    HourlyService,
    HourlySkilled,
    EntrySalaried,
    ProfessionalSalaried,
    TechStartup,
    Executive,
    GigContract,
}

impl Archetype {
    /// All archetypes in canonical enumeration order.
    pub const ALL: &[Archetype] = &[
        Archetype::HourlyService,
        Archetype::HourlySkilled,
        Archetype::EntrySalaried,
        Archetype::ProfessionalSalaried,
        Archetype::TechStartup,
        Archetype::Executive,
        Archetype::GigContract,
    ];

    /// Position in the canonical enumeration order.
    pub(crate) fn ordinal(&self) -> usize {
        match self {
            Self::HourlyService => 0,
            Self::HourlySkilled => 1,
            Self::EntrySalaried => 2,
            Self::ProfessionalSalaried => 3,
            Self::TechStartup => 4,
            Self::Executive => 5,
            Self::GigContract => 6,
        }
    }

    /// A short human-readable label, used in skip explanations.
    pub fn label(&self) -> &'static str {
        match self {
            Self::HourlyService => "hourly service",
            Self::HourlySkilled => "skilled trade",
            Self::EntrySalaried => "entry-level salaried",
            Self::ProfessionalSalaried => "professional salaried",
            Self::TechStartup => "tech/startup",
            Self::Executive => "executive",
            Self::GigContract => "gig/contract",
        }
    }

    fn keywords(&self) -> &'static [&'static str] {
        match self {
            Self::HourlyService => &[
                "cashier", "server", "barista", "retail", "cleaner", "driver",
                "warehouse", "crew", "host", "line cook", "stocker",
            ],
            Self::HourlySkilled => &[
                "technician", "electrician", "plumber", "mechanic", "welder",
                "hvac", "machinist", "carpenter", "installer",
            ],
            Self::EntrySalaried => &[
                "coordinator", "assistant", "junior", "trainee", "clerk",
                "associate", "receptionist",
            ],
            Self::ProfessionalSalaried => &[
                "manager", "accountant", "analyst", "nurse", "teacher",
                "specialist", "attorney", "marketer",
            ],
            Self::TechStartup => &[
                "engineer", "developer", "software", "startup", "product",
                "data scientist", "devops", "designer", "founding",
            ],
            Self::Executive => &[
                "chief", "director", "vp", "vice president", "president",
                "head of", "executive", "ceo", "cfo", "cto", "coo",
            ],
            Self::GigContract => &[
                "freelance", "contract", "gig", "courier", "rideshare",
                "delivery", "consultant", "contractor",
            ],
        }
    }

    fn expected_pay(&self) -> PayType {
        match self {
            Self::HourlyService | Self::HourlySkilled => PayType::Hourly,
            Self::EntrySalaried
            | Self::ProfessionalSalaried
            | Self::TechStartup
            | Self::Executive => PayType::Salaried,
            Self::GigContract => PayType::Contract,
        }
    }

    /// A pay type that is plausible but not the archetype's primary one.
    fn soft_pay(&self) -> Option<PayType> {
        match self {
            Self::HourlySkilled => Some(PayType::Contract),
            Self::EntrySalaried => Some(PayType::Hourly),
            Self::TechStartup => Some(PayType::Contract),
            Self::GigContract => Some(PayType::Hourly),
            _ => None,
        }
    }

    /// Whether equity signals say anything about this archetype at all.
    pub fn equity_relevant(&self) -> bool {
        matches!(self, Self::TechStartup | Self::Executive)
    }

    fn expects_remote(&self) -> Option<bool> {
        match self {
            Self::HourlyService | Self::HourlySkilled => Some(false),
            Self::TechStartup => Some(true),
            _ => None,
        }
    }
}

impl std::fmt::Display for Archetype {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::HourlyService => "hourly_service",
            Self::HourlySkilled => "hourly_skilled",
            Self::EntrySalaried => "entry_salaried",
            Self::ProfessionalSalaried => "professional_salaried",
            Self::TechStartup => "tech_startup",
            Self::Executive => "executive",
            Self::GigContract => "gig_contract",
        };
        write!(f, "{s}")
    }
}

/// The signals the classifier scores. All optional except the two text
/// fields, which default to empty.
#[derive(Debug, Clone, Default)]
pub struct ClassifierSignals {
    pub title: String,
    pub category_hint: String,
    pub pay_type: Option<PayType>,
    pub remote_allowed: Option<bool>,
    pub equity_offered: Option<bool>,
}

impl ClassifierSignals {
    /// Read signals off the current profile document at their fixed paths.
    ///
    /// This is the single conversion boundary between the generic document
    /// tree and the typed classifier input.
    pub fn from_profile(profile: &ProfileDocument) -> Self {
        let text_at = |path: &str| {
            profile
                .get(path)
                .and_then(|v| v.as_str())
                .unwrap_or_default()
                .to_string()
        };
        Self {
            title: text_at(signal_paths::TITLE),
            category_hint: text_at(signal_paths::CATEGORY_HINT),
            pay_type: profile
                .get(signal_paths::PAY_TYPE)
                .and_then(|v| v.as_str())
                .and_then(PayType::parse),
            remote_allowed: profile
                .get(signal_paths::REMOTE_ALLOWED)
                .and_then(|v| v.as_bool()),
            equity_offered: profile
                .get(signal_paths::EQUITY_OFFERED)
                .and_then(|v| v.as_bool()),
        }
    }
}

/// Classify the position from accumulated signals.
///
/// Pure and deterministic: identical signals always yield the identical
/// archetype. Safe to re-run every turn as signals accumulate; the result
/// may be cached in session metadata but is never authoritative there.
pub fn classify(signals: &ClassifierSignals) -> Archetype {
    let title = signals.title.to_lowercase();
    let hint = signals.category_hint.to_lowercase();

    let mut best = Archetype::ALL[0];
    let mut best_score = i32::MIN;

    for &archetype in Archetype::ALL {
        let mut score = 0;

        for keyword in archetype.keywords() {
            if title.contains(keyword) {
                score += 2;
            }
            if hint.contains(keyword) {
                score += 1;
            }
        }

        if let Some(pay) = signals.pay_type {
            if pay == archetype.expected_pay() {
                score += 3;
            } else if archetype.soft_pay() == Some(pay) {
                score += 1;
            }
        }

        if archetype.equity_relevant() {
            match signals.equity_offered {
                Some(true) => score += 3,
                Some(false) => score -= 2,
                None => {}
            }
        }

        if let (Some(expected), Some(actual)) =
            (archetype.expects_remote(), signals.remote_allowed)
            && expected == actual
        {
            score += 1;
        }

        // Strictly-greater keeps enumeration-order tie-break.
        if score > best_score {
            best_score = score;
            best = archetype;
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signals(title: &str) -> ClassifierSignals {
        ClassifierSignals {
            title: title.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn classify_is_deterministic() {
        let s = ClassifierSignals {
            title: "Software Engineer".to_string(),
            category_hint: "engineering".to_string(),
            pay_type: Some(PayType::Salaried),
            remote_allowed: Some(true),
            equity_offered: Some(true),
        };
        let first = classify(&s);
        for _ in 0..10 {
            assert_eq!(classify(&s), first);
        }
    }

    #[test]
    fn startup_engineer_with_equity() {
        let s = ClassifierSignals {
            title: "Senior Software Engineer".to_string(),
            category_hint: String::new(),
            pay_type: Some(PayType::Salaried),
            remote_allowed: Some(true),
            equity_offered: Some(true),
        };
        assert_eq!(classify(&s), Archetype::TechStartup);
    }

    #[test]
    fn barista_is_hourly_service() {
        let s = ClassifierSignals {
            title: "Barista".to_string(),
            pay_type: Some(PayType::Hourly),
            ..Default::default()
        };
        assert_eq!(classify(&s), Archetype::HourlyService);
    }

    #[test]
    fn electrician_is_hourly_skilled() {
        assert_eq!(classify(&signals("Journeyman Electrician")), Archetype::HourlySkilled);
    }

    #[test]
    fn director_with_equity_is_executive() {
        let s = ClassifierSignals {
            title: "Director of Operations".to_string(),
            pay_type: Some(PayType::Salaried),
            equity_offered: Some(true),
            ..Default::default()
        };
        assert_eq!(classify(&s), Archetype::Executive);
    }

    #[test]
    fn freelance_contract_pay() {
        let s = ClassifierSignals {
            title: "Freelance Courier".to_string(),
            pay_type: Some(PayType::Contract),
            ..Default::default()
        };
        assert_eq!(classify(&s), Archetype::GigContract);
    }

    #[test]
    fn no_equity_penalizes_equity_archetypes() {
        // "engineer" alone scores TechStartup, but an explicit no-equity
        // signal plus hourly pay should pull toward the skilled trade.
        let s = ClassifierSignals {
            title: "Service Engineer Technician".to_string(),
            pay_type: Some(PayType::Hourly),
            equity_offered: Some(false),
            remote_allowed: Some(false),
            ..Default::default()
        };
        assert_eq!(classify(&s), Archetype::HourlySkilled);
    }

    #[test]
    fn empty_signals_fall_back_to_first_variant() {
        // All scores zero: enumeration-order tie-break picks the first.
        assert_eq!(classify(&ClassifierSignals::default()), Archetype::HourlyService);
    }

    #[test]
    fn signals_from_profile_reads_fixed_paths() {
        let profile = ProfileDocument(serde_json::json!({
            "position_basics": {"title": "Staff Engineer", "category": "software"},
            "financial_reality": {
                "compensation": {"pay_type": "salaried"},
                "equity": {"offered": true}
            },
            "logistics": {"work_model": {"remote_allowed": true}}
        }));
        let s = ClassifierSignals::from_profile(&profile);
        assert_eq!(s.title, "Staff Engineer");
        assert_eq!(s.pay_type, Some(PayType::Salaried));
        assert_eq!(s.remote_allowed, Some(true));
        assert_eq!(s.equity_offered, Some(true));
        assert_eq!(classify(&s), Archetype::TechStartup);
    }

    #[test]
    fn ordinal_matches_enumeration_order() {
        for (idx, &archetype) in Archetype::ALL.iter().enumerate() {
            assert_eq!(archetype.ordinal(), idx);
        }
    }

    #[test]
    fn display_matches_serde() {
        for &archetype in Archetype::ALL {
            let display = format!("{archetype}");
            let json = serde_json::to_string(&archetype).unwrap();
            assert_eq!(format!("\"{display}\""), json);
        }
    }
}
