//! Status codes reported by the Battlecode backend and their display labels
//!
//! Submissions, scrimmages and queued matches all carry a short status code.
//! Codes are parsed into [`StatusCode`]; anything the client does not know
//! yet lands in [`StatusCode::Unknown`] so rendering never fails when the
//! backend grows a new status.

use serde::{Deserialize, Serialize};
use std::{convert::Infallible, fmt, str::FromStr};

/// Placeholder shown in the score column when a match has no result
pub const NO_SCORE: &str = " - ";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum StatusCode {
    New,
    Queued,
    Running,
    Retry,
    Success,
    Error,
    Cancelled,
    // Scrimmage requests and results
    Pending,
    Rejected,
    BlueWon,
    RedWon,
    /// Raw code as received
    Unknown(String),
}

/// Display variant used to pick a colour or icon
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    Success,
    Failure,
    Pending,
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLabel {
    pub text: &'static str,
    pub variant: Variant,
}

/// Map a status code to its label. Total: every code, including unknown ones,
/// yields a label with non-empty text.
pub fn label_for(code: &StatusCode) -> StatusLabel {
    let (text, variant) = match code {
        StatusCode::New => ("Created", Variant::Pending),
        StatusCode::Queued => ("Queued", Variant::Pending),
        StatusCode::Running => ("Running", Variant::Pending),
        StatusCode::Retry => ("Will retry", Variant::Pending),
        StatusCode::Success => ("Success", Variant::Success),
        StatusCode::Error => ("Failed", Variant::Failure),
        StatusCode::Cancelled => ("Cancelled", Variant::Failure),
        StatusCode::Pending => ("Pending", Variant::Pending),
        StatusCode::Rejected => ("Rejected", Variant::Failure),
        StatusCode::BlueWon => ("Blue won", Variant::Success),
        StatusCode::RedWon => ("Red won", Variant::Success),
        StatusCode::Unknown(_) => ("Unknown", Variant::Unknown),
    };

    StatusLabel { text, variant }
}

impl StatusCode {
    /// Canonical long name, also used when serializing
    pub fn as_str(&self) -> &str {
        match self {
            StatusCode::New => "NEW",
            StatusCode::Queued => "QUEUED",
            StatusCode::Running => "RUNNING",
            StatusCode::Retry => "RETRY",
            StatusCode::Success => "SUCCESS",
            StatusCode::Error => "ERROR",
            StatusCode::Cancelled => "CANCELLED",
            StatusCode::Pending => "PENDING",
            StatusCode::Rejected => "REJECTED",
            StatusCode::BlueWon => "BLUE_WON",
            StatusCode::RedWon => "RED_WON",
            StatusCode::Unknown(raw) => raw,
        }
    }

    /// True while the backend may still change the status
    pub fn is_in_progress(&self) -> bool {
        matches!(label_for(self).variant, Variant::Pending)
    }
}

impl FromStr for StatusCode {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .map(|c| c.to_ascii_uppercase())
            .collect();

        let code = match normalized.as_str() {
            "NEW" => StatusCode::New,
            "QUEUED" | "QUE" => StatusCode::Queued,
            "RUNNING" | "RUN" => StatusCode::Running,
            "RETRY" | "TRY" => StatusCode::Retry,
            "SUCCESS" | "OK!" | "OK" => StatusCode::Success,
            "ERROR" | "ERR" => StatusCode::Error,
            "CANCELLED" | "CANCELED" | "CAN" => StatusCode::Cancelled,
            "PENDING" | "P" => StatusCode::Pending,
            "REJECTED" | "N" => StatusCode::Rejected,
            "BLUEWON" => StatusCode::BlueWon,
            "REDWON" => StatusCode::RedWon,
            _ => StatusCode::Unknown(s.to_string()),
        };

        Ok(code)
    }
}

impl From<String> for StatusCode {
    fn from(raw: String) -> Self {
        match raw.parse() {
            Ok(code) => code,
            Err(never) => match never {},
        }
    }
}

impl From<StatusCode> for String {
    fn from(code: StatusCode) -> Self {
        code.as_str().to_string()
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(label_for(self).text)
    }
}

/// Which side of a match the viewing team played
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Red,
    Blue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Won,
    Lost,
}

impl Outcome {
    pub fn label(&self) -> &'static str {
        match self {
            Outcome::Won => "Won",
            Outcome::Lost => "Lost",
        }
    }
}

/// Result of a match as seen by one team
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchOutcome {
    pub outcome: Option<Outcome>,
    pub score: String,
}

/// Derive the viewing team's outcome and score string.
///
/// Only finished matches (`BlueWon`/`RedWon`) have an outcome. The score is
/// `"<winscore> - <losescore>"` when the viewer won and
/// `"<losescore> - <winscore>"` when they lost, otherwise [`NO_SCORE`].
pub fn match_outcome(code: &StatusCode, side: Side, winscore: u32, losescore: u32) -> MatchOutcome {
    let winner = match code {
        StatusCode::BlueWon => Side::Blue,
        StatusCode::RedWon => Side::Red,
        _ => {
            return MatchOutcome {
                outcome: None,
                score: NO_SCORE.to_string(),
            };
        }
    };

    if winner == side {
        MatchOutcome {
            outcome: Some(Outcome::Won),
            score: format!("{} - {}", winscore, losescore),
        }
    } else {
        MatchOutcome {
            outcome: Some(Outcome::Lost),
            score: format!("{} - {}", losescore, winscore),
        }
    }
}
