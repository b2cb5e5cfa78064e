use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Chamber {
    Upper,
    Lower,
}

impl Chamber {
    pub const BOTH: [Chamber; 2] = [Chamber::Upper, Chamber::Lower];

    pub fn other(self) -> Self {
        match self {
            Chamber::Upper => Chamber::Lower,
            Chamber::Lower => Chamber::Upper,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Chamber::Upper => "upper",
            Chamber::Lower => "lower",
        }
    }
}

impl fmt::Display for Chamber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
