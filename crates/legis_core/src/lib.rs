//! Legis core: pure normalization and classification of scraped legislative text.
mod action;
mod bill;
mod ca_tables;
mod chamber;
mod committee;
mod error;
mod record;
mod text;
mod vote;

pub use action::{ActionAnalysis, ActionClassifier, ActionRule, Pattern, RuleSet};
pub use bill::{bill_type, BillType, SponsorType};
pub use chamber::Chamber;
pub use committee::{normalize_abbreviation, CommitteeRecord, CommitteeTable};
pub use error::{BillIdError, LookupMiss};
pub use record::{
    AgendaItem, Bill, BillAction, Event, EventParticipant, PersonVote, Record, Sponsorship,
    VoteCounts, VoteEvent,
};
pub use text::{clean_id, collapse_whitespace, format_bill_id, split_name_list, TextNormalizer};
pub use vote::{motion_classification, parse_voters, VoteResult, VoteTally, VoteValue};
