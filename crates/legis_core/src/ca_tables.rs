//! California static tables: committee codes/abbreviations and action rules.

use crate::{ActionClassifier, ActionRule, CommitteeRecord, CommitteeTable, RuleSet};

const UPPER_COMMITTEES: &[(&str, &str, &[&str])] = &[
    ("Standing Committee on Governance and Finance", "CS73", &["GOV. & F.", "Gov. & F."]),
    ("Standing Committee on Energy, Utilities and Communications", "CS71", &["E., U., & C."]),
    ("Standing Committee on Education", "CS44", &["ED."]),
    ("Standing Committee on Appropriations", "CS61", &["APPR."]),
    ("Standing Committee on Labor and Industrial Relations", "CS51", &["L. & I.R."]),
    ("Standing Committee on Elections and Constitutional Amendments", "CS45", &["E. & C.A."]),
    ("Standing Committee on Environmental Quality", "CS64", &["E.Q."]),
    ("Standing Committee on Natural Resources And Water", "CS55", &["N.R. & W."]),
    ("Standing Committee on Public Employment and Retirement", "CS56", &["P.E. & R."]),
    ("Standing Committee on Governmental Organization", "CS48", &["G.O."]),
    ("Standing Committee on Insurance", "CS70", &["INS."]),
    ("Standing Committee on Public Safety", "CS72", &["PUB. S."]),
    ("Standing Committee on Judiciary", "CS53", &["JUD."]),
    ("Standing Committee on Health", "CS60", &["HEALTH"]),
    ("Standing Committee on Transportation and Housing", "CS59", &["T. & H."]),
    ("Standing Committee on Business, Professions and Economic Development", "CS42", &["B., P. & E.D."]),
    ("Standing Committee on Agriculture", "CS40", &["AGRI."]),
    ("Standing Committee on Banking and Financial Institutions", "CS69", &["B. & F.I."]),
    ("Standing Committee on Veterans Affairs", "CS66", &["V.A."]),
    ("Standing Committee on Budget and Fiscal Review", "CS62", &["B. & F.R."]),
    ("Standing Committee on Human Services", "CS74", &["HUM. S.", "HUMAN S."]),
    ("Standing Committee on Rules", "CS58", &["RLS."]),
    ("Extraordinary Committee on Transportation and Infrastructure Development", "CS67", &["T. & I.D."]),
];

const LOWER_COMMITTEES: &[(&str, &str, &[&str])] = &[
    ("Standing Committee on Rules", "CX20", &["RLS."]),
    ("Standing Committee on Revenue and Taxation", "CX19", &["REV. & TAX"]),
    ("Standing Committee on Natural Resources", "CX16", &["NAT. RES."]),
    ("Standing Committee on Appropriations", "CX25", &["APPR."]),
    ("Standing Committee on Insurance", "CX28", &["INS."]),
    ("Standing Committee on Utilities and Commerce", "CX23", &["U. & C."]),
    ("Standing Committee on Education", "CX03", &["ED."]),
    ("Standing Committee on Public Safety", "CX18", &["PUB. S."]),
    ("Standing Committee on Elections and Redistricting", "CX04", &["E. & R."]),
    ("Standing Committee on Judiciary", "CX13", &["JUD."]),
    ("Standing Committee on Higher Education", "CX09", &["HIGHER ED."]),
    ("Standing Committee on Health", "CX08", &["HEALTH"]),
    ("Standing Committee on Human Services", "CX11", &["HUM. S.", "HUMAN S."]),
    ("Standing Committee on Arts, Entertainment, Sports, Tourism, and Internet Media", "CX37", &["A., E., S., T., & I.M."]),
    ("Standing Committee on Transportation", "CX22", &["TRANS."]),
    ("Standing Committee on Business, Professions and Consumer Protection", "CX33", &["B., P., & C.P.", "B. & P."]),
    ("Standing Committee on Water, Parks and Wildlife", "CX24", &["W., P., & W."]),
    ("Standing Committee on Local Government", "CX15", &["L. GOV.", "L. Gov."]),
    ("Standing Committee on Aging and Long Term Care", "CX31", &["AGING & L.T.C."]),
    ("Standing Committee on Labor and Employment", "CX14", &["L. & E."]),
    ("Standing Committee on Governmental Organization", "CX07", &["G.O."]),
    ("Standing Committee on Public Employees, Retirement and Social Security", "CX17", &["P.E., R., & S.S."]),
    ("Standing Committee on Veterans Affairs", "CX38", &["V.A."]),
    ("Standing Committee on Housing and Community Development", "CX10", &["H. & C.D."]),
    ("Standing Committee on Environmental Safety and Toxic Materials", "CX05", &["E.S. & T.M."]),
    ("Standing Committee on Agriculture", "CX01", &["AGRI."]),
    ("Standing Committee on Banking and Finance", "CX27", &["B. & F."]),
    ("Standing Committee on Jobs, Economic Development and the Economy", "CX34", &["J., E.D., & E."]),
    ("Standing Committee on Accountability and Administrative Review", "CX02", &["A. & A.R."]),
    ("Standing Committee on Budget", "CX29", &["BUDGET"]),
    ("Standing Committee on Privacy and Consumer Protection", "CX32", &["P. & C.P."]),
    ("Extraordinary Committee on Finance", "CX35", &["FINANCE"]),
    ("Extraordinary Committee on Public Health and Developmental Services", "CX30", &["P.H. & D.S."]),
];

fn records(rows: &[(&str, &str, &[&str])]) -> Vec<CommitteeRecord> {
    rows.iter()
        .map(|(name, code, abbrs)| CommitteeRecord::new(name, code, abbrs))
        .collect()
}

impl CommitteeTable {
    pub fn california() -> Self {
        Self::new(records(UPPER_COMMITTEES), records(LOWER_COMMITTEES))
    }
}

fn regex_rule(pattern: &str, tags: &[&str]) -> ActionRule {
    ActionRule::regex(pattern, tags).expect("static California action pattern")
}

impl ActionClassifier {
    /// Rules for California bill history lines.
    pub fn california() -> Self {
        Self::new(vec![
            RuleSet::new(vec![
                ActionRule::substring("Introduced", &["introduction"]),
                ActionRule::substring("Read first time", &["introduction"]).with_priority(1),
            ]),
            RuleSet::new(vec![
                ActionRule::substring("Read third time. Passed", &["reading-3", "passage"]),
                ActionRule::substring("Read third time and amended", &["reading-3"]),
                ActionRule::substring("Read third time", &["reading-3"]),
                ActionRule::substring("Read second time", &["reading-2"]),
                ActionRule::substring("Read first time", &["reading-1"]),
            ]),
            RuleSet::new(vec![
                regex_rule(
                    r"from committee[^:]*:\s*(do pass|be adopted|be ordered)",
                    &["committee-passage", "committee-passage-favorable"],
                ),
                regex_rule(
                    r"from committee[^:]*:.*without recommendation",
                    &["committee-passage"],
                ),
                ActionRule::substring("Re-referred to", &["referral-committee"]),
                ActionRule::substring("Referred to", &["referral-committee"]),
            ]),
            RuleSet::new(vec![
                ActionRule::substring("amendments concurred in", &["concurrence"]),
                ActionRule::substring("author's amendments", &["amendment-introduction"]),
                regex_rule(r"\bamended\b", &["amendment-passage"]),
            ]),
            RuleSet::new(vec![
                ActionRule::substring("Enrolled and presented to the Governor", &["executive-receipt"]),
                ActionRule::substring("Approved by the Governor", &["executive-signature"]),
                regex_rule(r"vetoed by (the )?governor", &["executive-veto"]),
                ActionRule::substring("Chaptered by Secretary of State", &["became-law"]),
            ]),
            RuleSet::new(vec![
                ActionRule::substring("Failed passage in committee", &["committee-failure"]),
                ActionRule::substring("Withdrawn from", &["withdrawal"]),
                ActionRule::substring("Failed passage", &["failure"]).with_priority(1),
                regex_rule(r"\bdied\b", &["failure"]).with_priority(1),
            ]),
        ])
    }
}
