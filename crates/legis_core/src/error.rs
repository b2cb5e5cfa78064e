use thiserror::Error;

use crate::Chamber;

/// A committee code or abbreviation absent from every table consulted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupMiss {
    #[error("no committee with code {0:?}")]
    Code(String),
    #[error("no committee abbreviated {abbreviation:?} in {chamber} or {other}", other = .chamber.other())]
    Abbreviation { chamber: Chamber, abbreviation: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("not a bill identifier: {0:?}")]
pub struct BillIdError(pub String);
