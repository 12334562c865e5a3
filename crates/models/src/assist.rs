use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

/// What the text-assist collaborator should do with a draft.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssistMode {
    Proofread,
    Expand,
}

impl AssistMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssistMode::Proofread => "proofread",
            AssistMode::Expand => "expand",
        }
    }
}

impl fmt::Display for AssistMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssistMode {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "proofread" => Ok(AssistMode::Proofread),
            "expand" => Ok(AssistMode::Expand),
            other => Err(ModelError::Validation(format!("unknown assist mode: {other}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_serializes_lowercase() {
        assert_eq!("expand".parse::<AssistMode>().unwrap(), AssistMode::Expand);
        assert!("rewrite".parse::<AssistMode>().is_err());
        assert_eq!(serde_json::to_string(&AssistMode::Proofread).unwrap(), "\"proofread\"");
    }
}
