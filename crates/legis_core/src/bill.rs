use std::fmt;

use serde::{Deserialize, Serialize};

use crate::Chamber;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BillType {
    #[serde(rename = "bill")]
    Bill,
    #[serde(rename = "constitutional amendment")]
    ConstitutionalAmendment,
    #[serde(rename = "concurrent resolution")]
    ConcurrentResolution,
    #[serde(rename = "joint resolution")]
    JointResolution,
    #[serde(rename = "resolution")]
    Resolution,
}

impl BillType {
    pub fn as_str(self) -> &'static str {
        match self {
            BillType::Bill => "bill",
            BillType::ConstitutionalAmendment => "constitutional amendment",
            BillType::ConcurrentResolution => "concurrent resolution",
            BillType::JointResolution => "joint resolution",
            BillType::Resolution => "resolution",
        }
    }
}

impl fmt::Display for BillType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Longest prefixes first: "SCA 1" must not be read through a shorter prefix.
const PREFIXES: &[(&str, Chamber, BillType)] = &[
    ("ACA", Chamber::Lower, BillType::ConstitutionalAmendment),
    ("ACR", Chamber::Lower, BillType::ConcurrentResolution),
    ("AJR", Chamber::Lower, BillType::JointResolution),
    ("SCA", Chamber::Upper, BillType::ConstitutionalAmendment),
    ("SCR", Chamber::Upper, BillType::ConcurrentResolution),
    ("SJR", Chamber::Upper, BillType::JointResolution),
    ("AB", Chamber::Lower, BillType::Bill),
    ("HR", Chamber::Lower, BillType::Resolution),
    ("SB", Chamber::Upper, BillType::Bill),
    ("SR", Chamber::Upper, BillType::Resolution),
];

/// Originating chamber and bill type from a California bill identifier.
pub fn bill_type(identifier: &str) -> Option<(Chamber, BillType)> {
    let upper = identifier.trim().to_ascii_uppercase();
    PREFIXES
        .iter()
        .find(|(prefix, _, _)| upper.starts_with(prefix))
        .map(|(_, chamber, kind)| (*chamber, *kind))
}

/// Authorship role as printed on status pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SponsorType {
    #[serde(rename = "author")]
    LeadAuthor,
    #[serde(rename = "coauthor")]
    Coauthor,
    #[serde(rename = "principal coauthor")]
    PrincipalCoauthor,
}

impl SponsorType {
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_uppercase().as_str() {
            "LEAD_AUTHOR" => Some(SponsorType::LeadAuthor),
            "COAUTHOR" => Some(SponsorType::Coauthor),
            "PRINCIPAL_COAUTHOR" => Some(SponsorType::PrincipalCoauthor),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SponsorType::LeadAuthor => "author",
            SponsorType::Coauthor => "coauthor",
            SponsorType::PrincipalCoauthor => "principal coauthor",
        }
    }

    pub fn is_primary(self) -> bool {
        matches!(self, SponsorType::LeadAuthor)
    }
}
