use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{split_name_list, VoteCounts};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteValue {
    Yes,
    No,
    Other,
}

impl VoteValue {
    /// Reads a roll-call row label such as `"Ayes"`, `"Noes"` or `"NVR"`.
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label
            .trim()
            .trim_end_matches(':')
            .trim()
            .to_ascii_lowercase();
        match label.as_str() {
            "aye" | "ayes" | "yea" | "yeas" | "yes" | "y" => Some(VoteValue::Yes),
            "no" | "noes" | "nay" | "nays" | "n" => Some(VoteValue::No),
            "nvr" | "no vote recorded" | "not voting" | "absent" | "abs" | "excused"
            | "abstain" | "abstaining" | "other" => Some(VoteValue::Other),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            VoteValue::Yes => "yes",
            VoteValue::No => "no",
            VoteValue::Other => "other",
        }
    }
}

impl fmt::Display for VoteValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Each name in a comma-separated roll-call block, attributed to `value`;
/// see [`split_name_list`].
pub fn parse_voters(raw_block: &str, value: VoteValue) -> BTreeMap<String, VoteValue> {
    split_name_list(raw_block)
        .into_iter()
        .map(|name| (name.to_string(), value))
        .collect()
}

/// Voter attribution and counts for one vote block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VoteTally {
    votes: BTreeMap<String, VoteValue>,
    reported: BTreeMap<VoteValue, u32>,
}

impl VoteTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attributes every name in `raw_block` to `value`; returns how many names were read.
    ///
    /// A name already attributed elsewhere in this block is moved to `value`.
    pub fn record(&mut self, raw_block: &str, value: VoteValue) -> usize {
        let voters = parse_voters(raw_block, value);
        let read = voters.len();
        self.votes.extend(voters);
        read
    }

    /// Records a count printed by the source, which may not list names.
    pub fn set_count(&mut self, value: VoteValue, count: u32) {
        self.reported.insert(value, count);
    }

    pub fn voters(&self, value: VoteValue) -> BTreeSet<&str> {
        self.votes
            .iter()
            .filter(|(_, v)| **v == value)
            .map(|(name, _)| name.as_str())
            .collect()
    }

    pub fn value_of(&self, name: &str) -> Option<VoteValue> {
        self.votes.get(name).copied()
    }

    /// The reported count, or the number of attributed names when none was reported.
    pub fn count(&self, value: VoteValue) -> u32 {
        self.reported
            .get(&value)
            .copied()
            .unwrap_or_else(|| self.voters(value).len() as u32)
    }

    pub fn counts(&self) -> VoteCounts {
        VoteCounts {
            yes: self.count(VoteValue::Yes),
            no: self.count(VoteValue::No),
            other: self.count(VoteValue::Other),
        }
    }

    /// Reported counts agree with the names listed, wherever both exist.
    pub fn is_consistent(&self) -> bool {
        self.reported.iter().all(|(value, count)| {
            let listed = self.voters(*value).len() as u32;
            listed == 0 || listed == *count
        })
    }

    pub fn is_empty(&self) -> bool {
        self.votes.is_empty() && self.reported.is_empty()
    }

    pub fn votes(&self) -> impl Iterator<Item = (&str, VoteValue)> {
        self.votes.iter().map(|(name, value)| (name.as_str(), *value))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteResult {
    Pass,
    Fail,
}

impl VoteResult {
    /// Reads result text such as `"(PASS)"`, `"FAIL"` or `"Do pass as amended"`.
    pub fn from_text(text: &str) -> Option<Self> {
        let lowered = text.to_lowercase();
        if lowered.contains("fail") || lowered.contains("not adopted") {
            Some(VoteResult::Fail)
        } else if lowered.contains("pass") || lowered.contains("adopt") {
            Some(VoteResult::Pass)
        } else {
            None
        }
    }

    /// Falls back to a simple majority of the tally when the text is inconclusive.
    pub fn resolve(text: &str, tally: &VoteTally) -> Self {
        Self::from_text(text).unwrap_or_else(|| {
            let counts = tally.counts();
            if counts.yes > counts.no {
                VoteResult::Pass
            } else {
                VoteResult::Fail
            }
        })
    }

    pub fn as_str(self) -> &'static str {
        match self {
            VoteResult::Pass => "pass",
            VoteResult::Fail => "fail",
        }
    }
}

/// Vote classification from the motion text.
pub fn motion_classification(motion: &str) -> &'static str {
    let lowered = motion.to_lowercase();
    if lowered.contains("veto") {
        "veto-override"
    } else if lowered.contains("concur") {
        "concurrence"
    } else if lowered.contains("amend") && !lowered.contains("as amended") {
        "amendment"
    } else if lowered.contains("do pass") || lowered.contains("committee") {
        "committee-passage"
    } else {
        "passage"
    }
}
