//! Canned demonstration scenarios

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scenario {
    /// Login, list, upload, verify, sign, verify again, download, logout
    Full,
    /// Login, list documents, logout
    Simple,
    /// Login, upload, verify, logout
    Upload,
}

impl Scenario {
    pub fn as_str(&self) -> &'static str {
        match self {
            Scenario::Full => "full",
            Scenario::Simple => "simple",
            Scenario::Upload => "upload",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Scenario::Full => "Full ICP-Brasil API walkthrough",
            Scenario::Simple => "Simple example - login and document listing",
            Scenario::Upload => "Document upload example",
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Scenario {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "full" | "completo" => Ok(Scenario::Full),
            "simple" | "simples" => Ok(Scenario::Simple),
            "upload" => Ok(Scenario::Upload),
            _ => Err(format!(
                "Unknown scenario: {} (expected full, simple or upload)",
                s
            )),
        }
    }
}
