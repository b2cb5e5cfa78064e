//! Records handed to the output sink, one per scraped bill, vote or event.

use std::collections::BTreeSet;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::{BillType, Chamber, SponsorType, VoteResult, VoteTally, VoteValue};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sponsorship {
    pub name: String,
    pub classification: SponsorType,
    pub primary: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillAction {
    pub description: String,
    pub date: NaiveDate,
    pub chamber: Chamber,
    pub classification: BTreeSet<String>,
    pub committees: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bill {
    pub identifier: String,
    pub legislative_session: String,
    pub chamber: Chamber,
    pub classification: BillType,
    pub title: String,
    pub sponsorships: Vec<Sponsorship>,
    pub actions: Vec<BillAction>,
    pub sources: Vec<String>,
}

impl Bill {
    pub fn new(
        identifier: &str,
        legislative_session: &str,
        chamber: Chamber,
        classification: BillType,
        title: &str,
    ) -> Self {
        Self {
            identifier: identifier.to_string(),
            legislative_session: legislative_session.to_string(),
            chamber,
            classification,
            title: title.to_string(),
            sponsorships: Vec::new(),
            actions: Vec::new(),
            sources: Vec::new(),
        }
    }

    pub fn add_source(&mut self, url: &str) {
        if !self.sources.iter().any(|s| s == url) {
            self.sources.push(url.to_string());
        }
    }

    pub fn add_sponsorship(&mut self, name: &str, classification: SponsorType) {
        let name = name.trim();
        if name.is_empty() {
            return;
        }
        self.sponsorships.push(Sponsorship {
            name: name.to_string(),
            classification,
            primary: classification.is_primary(),
        });
    }

    pub fn add_action(&mut self, action: BillAction) {
        self.actions.push(action);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VoteCounts {
    pub yes: u32,
    pub no: u32,
    pub other: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonVote {
    pub voter_name: String,
    pub option: VoteValue,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteEvent {
    pub bill_identifier: String,
    pub legislative_session: String,
    pub chamber: Chamber,
    /// Where the vote was taken, as printed: a floor session or a committee.
    pub location: String,
    pub motion_text: String,
    pub start_date: NaiveDate,
    pub result: VoteResult,
    pub classification: String,
    pub counts: VoteCounts,
    pub votes: Vec<PersonVote>,
    pub sources: Vec<String>,
}

impl VoteEvent {
    pub fn from_tally(
        bill: &Bill,
        chamber: Chamber,
        location: &str,
        motion_text: &str,
        start_date: NaiveDate,
        result: VoteResult,
        tally: &VoteTally,
    ) -> Self {
        Self {
            bill_identifier: bill.identifier.clone(),
            legislative_session: bill.legislative_session.clone(),
            chamber,
            location: location.to_string(),
            motion_text: motion_text.to_string(),
            start_date,
            result,
            classification: crate::motion_classification(motion_text).to_string(),
            counts: tally.counts(),
            votes: tally
                .votes()
                .map(|(name, option)| PersonVote {
                    voter_name: name.to_string(),
                    option,
                })
                .collect(),
            sources: Vec::new(),
        }
    }

    pub fn add_source(&mut self, url: &str) {
        if !self.sources.iter().any(|s| s == url) {
            self.sources.push(url.to_string());
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventParticipant {
    pub name: String,
    pub entity_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AgendaItem {
    pub description: String,
    pub bills: Vec<String>,
}

impl AgendaItem {
    pub fn add_bill(&mut self, identifier: &str) {
        if !self.bills.iter().any(|b| b == identifier) {
            self.bills.push(identifier.to_string());
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub name: String,
    pub start_date: NaiveDateTime,
    /// IANA zone the local `start_date` is expressed in.
    pub timezone: String,
    pub location_name: String,
    pub participants: Vec<EventParticipant>,
    pub agenda: Vec<AgendaItem>,
    pub sources: Vec<String>,
    pub dedupe_key: Option<String>,
}

impl Event {
    pub fn new(name: &str, start_date: NaiveDateTime, timezone: &str, location_name: &str) -> Self {
        Self {
            name: name.to_string(),
            start_date,
            timezone: timezone.to_string(),
            location_name: location_name.to_string(),
            participants: Vec::new(),
            agenda: Vec::new(),
            sources: Vec::new(),
            dedupe_key: None,
        }
    }

    pub fn add_source(&mut self, url: &str) {
        if !self.sources.iter().any(|s| s == url) {
            self.sources.push(url.to_string());
        }
    }

    pub fn add_participant(&mut self, name: &str, entity_type: &str) {
        self.participants.push(EventParticipant {
            name: name.to_string(),
            entity_type: entity_type.to_string(),
        });
    }

    pub fn add_agenda_item(&mut self, description: &str) -> &mut AgendaItem {
        self.agenda.push(AgendaItem {
            description: description.to_string(),
            bills: Vec::new(),
        });
        let last = self.agenda.len() - 1;
        &mut self.agenda[last]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Record {
    Bill(Bill),
    VoteEvent(VoteEvent),
    Event(Event),
}

impl Record {
    pub fn kind(&self) -> &'static str {
        match self {
            Record::Bill(_) => "bill",
            Record::VoteEvent(_) => "vote_event",
            Record::Event(_) => "event",
        }
    }

    /// Human-readable identity, stable across runs for the same source data.
    pub fn key(&self) -> String {
        match self {
            Record::Bill(bill) => format!("{} {}", bill.legislative_session, bill.identifier),
            Record::VoteEvent(vote) => format!(
                "{} {} {} {} {} {}",
                vote.legislative_session,
                vote.bill_identifier,
                vote.start_date,
                vote.chamber,
                vote.location,
                vote.motion_text
            ),
            Record::Event(event) => event
                .dedupe_key
                .clone()
                .unwrap_or_else(|| format!("{} {}", event.name, event.start_date)),
        }
    }
}
