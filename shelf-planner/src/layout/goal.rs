use std::{fmt, str::FromStr};

use displaydoc::Display;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The spatial goal of an assignment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Goal {
    /// Cluster strongly associated categories around the center of the layout.
    Maximize,
    /// Spread strongly associated categories over alternating shelves.
    Minimize,
}

impl Goal {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Maximize => "maximize",
            Self::Minimize => "minimize",
        }
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown goal {0:?}, expected "maximize" or "minimize"
#[derive(Clone, Debug, Display, Error, PartialEq)]
pub struct GoalError(String);

impl FromStr for Goal {
    type Err = GoalError;

    fn from_str(goal: &str) -> Result<Self, Self::Err> {
        match goal {
            "maximize" => Ok(Self::Maximize),
            "minimize" => Ok(Self::Minimize),
            _ => Err(GoalError(goal.to_string())),
        }
    }
}
