//! Field relevance — deciding which of the catalogued fields are worth
//! asking for a given subject archetype.
//!
//! `archetype` classifies the subject from accumulated signals, `table` is
//! the static (category prefix, archetype) → relevance lookup, and `filter`
//! partitions the candidate field list into ask/skip with human-readable
//! skip reasons.

pub mod archetype;
pub mod filter;
pub mod table;

pub use archetype::{Archetype, ClassifierSignals, PayType, classify};
pub use filter::{FieldPartition, SkippedField, explain_skip, partition, relevance_of};
pub use table::Relevance;
