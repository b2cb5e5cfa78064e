use std::collections::HashMap;

use regex::Regex;

use crate::{Chamber, LookupMiss};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitteeRecord {
    pub name: String,
    pub code: String,
    pub abbreviations: Vec<String>,
}

impl CommitteeRecord {
    pub fn new(name: &str, code: &str, abbreviations: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            code: code.to_string(),
            abbreviations: abbreviations.iter().map(|a| a.to_string()).collect(),
        }
    }
}

/// Committee names keyed by code and by per-chamber abbreviation.
///
/// Immutable once built. Abbreviation lookups fall back to the other chamber,
/// but an entry in the requested chamber always wins over the fallback.
#[derive(Debug, Clone)]
pub struct CommitteeTable {
    upper: HashMap<String, String>,
    lower: HashMap<String, String>,
    by_code: HashMap<String, String>,
    mentions: Option<Regex>,
}

impl CommitteeTable {
    pub fn new(upper: Vec<CommitteeRecord>, lower: Vec<CommitteeRecord>) -> Self {
        let mut by_code = HashMap::new();
        for record in upper.iter().chain(lower.iter()) {
            by_code.insert(record.code.clone(), record.name.clone());
        }
        let mentions = build_mention_regex(upper.iter().chain(lower.iter()));

        Self {
            upper: abbreviation_map(&upper),
            lower: abbreviation_map(&lower),
            by_code,
            mentions,
        }
    }

    pub fn resolve(&self, chamber: Chamber, abbreviation: &str) -> Result<&str, LookupMiss> {
        let key = normalize_abbreviation(abbreviation);
        self.chamber_map(chamber)
            .get(&key)
            .or_else(|| self.chamber_map(chamber.other()).get(&key))
            .map(String::as_str)
            .ok_or_else(|| LookupMiss::Abbreviation {
                chamber,
                abbreviation: abbreviation.to_string(),
            })
    }

    pub fn code_to_name(&self, code: &str) -> Result<&str, LookupMiss> {
        self.by_code
            .get(code.trim())
            .map(String::as_str)
            .ok_or_else(|| LookupMiss::Code(code.to_string()))
    }

    /// Raw abbreviation mentions in `text`, in order of appearance.
    pub fn find_abbreviations<'t>(&self, text: &'t str) -> Vec<&'t str> {
        match &self.mentions {
            Some(re) => re.find_iter(text).map(|m| m.as_str()).collect(),
            None => Vec::new(),
        }
    }

    /// Canonical names of the committees mentioned in `text`, deduplicated.
    ///
    /// Mentions that fail to resolve are skipped.
    pub fn committees_in(&self, chamber: Chamber, text: &str) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for mention in self.find_abbreviations(text) {
            if let Ok(name) = self.resolve(chamber, mention) {
                if !names.contains(&name) {
                    names.push(name);
                }
            }
        }
        names
    }

    pub fn len(&self) -> usize {
        self.by_code.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_code.is_empty()
    }

    fn chamber_map(&self, chamber: Chamber) -> &HashMap<String, String> {
        match chamber {
            Chamber::Upper => &self.upper,
            Chamber::Lower => &self.lower,
        }
    }
}

/// Lookup key for an abbreviation: whitespace, commas and periods removed, lowercased.
pub fn normalize_abbreviation(abbreviation: &str) -> String {
    abbreviation
        .chars()
        .filter(|c| !c.is_whitespace() && !matches!(c, ',' | '.'))
        .flat_map(char::to_lowercase)
        .collect()
}

fn abbreviation_map(records: &[CommitteeRecord]) -> HashMap<String, String> {
    let mut map = HashMap::new();
    for record in records {
        for abbr in &record.abbreviations {
            map.insert(normalize_abbreviation(abbr), record.name.clone());
        }
    }
    map
}

/// One alternation over every abbreviation, longest first so `HIGHER ED.`
/// is preferred over `ED.`. Spaces match any run of spaces and commas.
fn build_mention_regex<'a>(records: impl Iterator<Item = &'a CommitteeRecord>) -> Option<Regex> {
    let mut abbreviations: Vec<&str> = records
        .flat_map(|r| r.abbreviations.iter().map(String::as_str))
        .collect();
    abbreviations.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
    abbreviations.dedup();
    if abbreviations.is_empty() {
        return None;
    }

    let alternatives: Vec<String> = abbreviations
        .iter()
        .map(|abbr| {
            abbr.replace(',', "")
                .split(' ')
                .filter(|part| !part.is_empty())
                .map(regex::escape)
                .collect::<Vec<_>>()
                .join(r"[\s,]*")
        })
        .collect();
    Regex::new(&format!(r"\b(?:{})", alternatives.join("|"))).ok()
}

#[cfg(test)]
mod tests {
    use super::normalize_abbreviation;

    #[test]
    fn normalization_drops_separators() {
        assert_eq!(normalize_abbreviation("B., P., & C.P."), "bp&cp");
        assert_eq!(normalize_abbreviation("GOV. & F."), "gov&f");
        assert_eq!(normalize_abbreviation("Gov. & F."), "gov&f");
        assert_eq!(normalize_abbreviation("W., P.,\n&\tW."), "wp&w");
    }
}
