//! Records returned by the list endpoints
//!
//! Only the fields the client shows are modelled; everything else in the
//! backend's JSON is ignored.

use bc_pager::{ListItem, MatchOutcome, Side, StatusCode, match_outcome, status::NO_SCORE};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamRef {
    pub id: u64,
    pub name: String,
}

/// A compiled bot uploaded by the team
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    pub id: u64,
    pub status: StatusCode,
    #[serde(rename = "created")]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub package: String,
    #[serde(default)]
    pub accepted: bool,
    #[serde(default, rename = "username")]
    pub uploaded_by: Option<String>,
}

/// A practice match between two teams
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scrimmage {
    pub id: u64,
    pub status: StatusCode,
    #[serde(rename = "created")]
    pub created_at: DateTime<Utc>,
    pub red_team: TeamRef,
    pub blue_team: TeamRef,
    #[serde(default)]
    pub winscore: Option<u32>,
    #[serde(default)]
    pub losescore: Option<u32>,
    #[serde(default)]
    pub ranked: bool,
    #[serde(default)]
    pub replay: Option<String>,
}

impl Scrimmage {
    pub fn side_of(&self, team_id: u64) -> Option<Side> {
        if self.red_team.id == team_id {
            Some(Side::Red)
        } else if self.blue_team.id == team_id {
            Some(Side::Blue)
        } else {
            None
        }
    }

    /// The other team, from `team_id`'s point of view
    pub fn opponent_of(&self, team_id: u64) -> Option<&TeamRef> {
        match self.side_of(team_id)? {
            Side::Red => Some(&self.blue_team),
            Side::Blue => Some(&self.red_team),
        }
    }

    /// Won/lost and score as seen by `team_id`
    pub fn outcome_for(&self, team_id: u64) -> MatchOutcome {
        scored_outcome(
            &self.status,
            self.side_of(team_id),
            self.winscore,
            self.losescore,
        )
    }
}

/// A match in the run queue (scrimmage or tournament game)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub id: u64,
    pub status: StatusCode,
    #[serde(rename = "created")]
    pub created_at: DateTime<Utc>,
    pub red_team: TeamRef,
    pub blue_team: TeamRef,
    #[serde(default)]
    pub tournament_round: Option<String>,
    #[serde(default)]
    pub winscore: Option<u32>,
    #[serde(default)]
    pub losescore: Option<u32>,
}

impl Match {
    /// Score line from the red side's point of view
    pub fn score(&self) -> String {
        scored_outcome(&self.status, Some(Side::Red), self.winscore, self.losescore).score
    }
}

/// A row of the rankings table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamRanking {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub wins: u32,
    #[serde(default)]
    pub losses: u32,
    #[serde(default)]
    pub members: Vec<String>,
    #[serde(default)]
    pub quote: String,
}

fn scored_outcome(
    status: &StatusCode,
    side: Option<Side>,
    winscore: Option<u32>,
    losescore: Option<u32>,
) -> MatchOutcome {
    match (side, winscore, losescore) {
        (Some(side), Some(win), Some(lose)) => match_outcome(status, side, win, lose),
        _ => MatchOutcome {
            outcome: None,
            score: NO_SCORE.to_string(),
        },
    }
}

impl ListItem for Submission {
    fn id(&self) -> u64 {
        self.id
    }

    fn status(&self) -> Option<&StatusCode> {
        Some(&self.status)
    }

    fn created_at(&self) -> Option<DateTime<Utc>> {
        Some(self.created_at)
    }
}

impl ListItem for Scrimmage {
    fn id(&self) -> u64 {
        self.id
    }

    fn status(&self) -> Option<&StatusCode> {
        Some(&self.status)
    }

    fn created_at(&self) -> Option<DateTime<Utc>> {
        Some(self.created_at)
    }
}

impl ListItem for Match {
    fn id(&self) -> u64 {
        self.id
    }

    fn status(&self) -> Option<&StatusCode> {
        Some(&self.status)
    }

    fn created_at(&self) -> Option<DateTime<Utc>> {
        Some(self.created_at)
    }
}

impl ListItem for TeamRanking {
    fn id(&self) -> u64 {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bc_pager::Outcome;

    fn scrimmage(status: &str, winscore: Option<u32>, losescore: Option<u32>) -> Scrimmage {
        serde_json::from_value(serde_json::json!({
            "id": 1,
            "status": status,
            "created": "2024-01-10T12:00:00Z",
            "red_team": { "id": 7, "name": "bots" },
            "blue_team": { "id": 9, "name": "rivals" },
            "winscore": winscore,
            "losescore": losescore,
        }))
        .unwrap()
    }

    #[test]
    fn test_submission_from_json() {
        let submission: Submission = serde_json::from_value(serde_json::json!({
            "id": 12,
            "status": "OK!",
            "created": "2024-01-10T12:00:00Z",
            "description": "rush strategy",
            "package": "examplefuncsplayer",
            "accepted": true,
            "extra_field": [1, 2, 3]
        }))
        .unwrap();

        assert_eq!(submission.status, StatusCode::Success);
        assert_eq!(submission.description, "rush strategy");
        assert!(submission.accepted);
        assert_eq!(submission.uploaded_by, None);
    }

    #[test]
    fn test_unknown_status_still_parses() {
        let s = scrimmage("ARCHIVED", None, None);
        assert_eq!(s.status, StatusCode::Unknown("ARCHIVED".into()));
    }

    #[test]
    fn test_outcome_for_losing_red_team() {
        let s = scrimmage("BLUE_WON", Some(10), Some(3));
        let outcome = s.outcome_for(7);
        assert_eq!(outcome.outcome, Some(Outcome::Lost));
        assert_eq!(outcome.score, "3 - 10");
        assert_eq!(s.opponent_of(7).map(|t| t.name.as_str()), Some("rivals"));
    }

    #[test]
    fn test_outcome_for_winning_blue_team() {
        let s = scrimmage("bluewon", Some(10), Some(3));
        let outcome = s.outcome_for(9);
        assert_eq!(outcome.outcome, Some(Outcome::Won));
        assert_eq!(outcome.score, "10 - 3");
    }

    #[test]
    fn test_outcome_for_bystander_or_missing_scores() {
        let s = scrimmage("RED_WON", Some(2), Some(1));
        assert_eq!(s.outcome_for(1234).score, NO_SCORE);

        let unscored = scrimmage("RED_WON", None, None);
        assert_eq!(unscored.outcome_for(7).outcome, None);
    }

    #[test]
    fn test_match_score_from_red_side() {
        let m: Match = serde_json::from_value(serde_json::json!({
            "id": 3,
            "status": "RED_WON",
            "created": "2024-01-10T12:00:00Z",
            "red_team": { "id": 7, "name": "bots" },
            "blue_team": { "id": 9, "name": "rivals" },
            "winscore": 3,
            "losescore": 2
        }))
        .unwrap();
        assert_eq!(m.score(), "3 - 2");
    }
}
