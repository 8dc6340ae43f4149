use bc_api::{Match, Scrimmage, Submission, TeamRanking};
use bc_pager::{Outcome, Pager, StatusCode, Variant, display_ranks, label_for};

use crate::state::{ListsState, Screen};

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// View model for the table of the selected list - all presentation data pre-computed
#[derive(Debug, Clone)]
pub struct ListTableViewModel {
    pub title: String,
    pub headers: &'static [&'static str],
    /// Column widths in percent, one per header
    pub widths: &'static [u16],
    pub rows: Vec<Vec<CellViewModel>>,
    /// Shown instead of rows when there are none
    pub placeholder: Option<String>,
    pub footer: FooterViewModel,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CellViewModel {
    pub text: String,
    pub style: CellStyle,
}

/// Semantic cell colour, resolved against the theme by the view
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CellStyle {
    Normal,
    Muted,
    Highlight,
    Status(Variant),
    Outcome(Option<Outcome>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct FooterViewModel {
    /// "Page 2 of 5", or "Page 2" while the limit is unknown
    pub page_text: String,
    /// Spinner frame while a request is in flight
    pub spinner: Option<&'static str>,
    pub error: Option<String>,
}

/// Per-record cells of a table row
trait TableRow {
    const HEADERS: &'static [&'static str];
    const WIDTHS: &'static [u16];

    fn cells(&self, team_id: Option<u64>, rank: Option<u64>) -> Vec<CellViewModel>;

    /// Ordering key used for tie-aware rank numbers
    fn rank_score(&self) -> Option<f64> {
        None
    }
}

fn cell(text: impl Into<String>, style: CellStyle) -> CellViewModel {
    CellViewModel {
        text: text.into(),
        style,
    }
}

fn status_cell(status: &StatusCode) -> CellViewModel {
    let label = label_for(status);
    cell(label.text, CellStyle::Status(label.variant))
}

impl TableRow for Submission {
    const HEADERS: &'static [&'static str] = &["ID", "Status", "Uploaded", "Description", "By"];
    const WIDTHS: &'static [u16] = &[8, 14, 20, 43, 15];

    fn cells(&self, _team_id: Option<u64>, _rank: Option<u64>) -> Vec<CellViewModel> {
        vec![
            cell(format!("#{}", self.id), CellStyle::Muted),
            status_cell(&self.status),
            cell(
                self.created_at.format("%Y-%m-%d %H:%M").to_string(),
                CellStyle::Normal,
            ),
            cell(self.description.clone(), CellStyle::Normal),
            cell(
                self.uploaded_by.clone().unwrap_or_default(),
                CellStyle::Muted,
            ),
        ]
    }
}

impl TableRow for Scrimmage {
    const HEADERS: &'static [&'static str] =
        &["Opponent", "Status", "Result", "Score", "Ranked", "Created"];
    const WIDTHS: &'static [u16] = &[30, 14, 10, 12, 10, 24];

    fn cells(&self, team_id: Option<u64>, _rank: Option<u64>) -> Vec<CellViewModel> {
        // Without a known team there is no point of view to show
        let (opponent, outcome) = match team_id {
            Some(team_id) => (
                self.opponent_of(team_id)
                    .map(|team| team.name.clone())
                    .unwrap_or_else(|| format!("{} vs {}", self.red_team.name, self.blue_team.name)),
                Some(self.outcome_for(team_id)),
            ),
            None => (
                format!("{} vs {}", self.red_team.name, self.blue_team.name),
                None,
            ),
        };

        let (result, score) = match outcome {
            Some(outcome) => (
                cell(
                    outcome.outcome.map(|o| o.label()).unwrap_or("-"),
                    CellStyle::Outcome(outcome.outcome),
                ),
                cell(outcome.score, CellStyle::Normal),
            ),
            None => (
                cell("-", CellStyle::Muted),
                cell(bc_pager::status::NO_SCORE, CellStyle::Muted),
            ),
        };

        vec![
            cell(opponent, CellStyle::Highlight),
            status_cell(&self.status),
            result,
            score,
            cell(if self.ranked { "yes" } else { "no" }, CellStyle::Muted),
            cell(
                self.created_at.format("%Y-%m-%d %H:%M").to_string(),
                CellStyle::Normal,
            ),
        ]
    }
}

impl TableRow for Match {
    const HEADERS: &'static [&'static str] = &["ID", "Red", "Blue", "Status", "Score", "Round"];
    const WIDTHS: &'static [u16] = &[8, 24, 24, 14, 12, 18];

    fn cells(&self, team_id: Option<u64>, _rank: Option<u64>) -> Vec<CellViewModel> {
        let team_style = |id: u64| {
            if Some(id) == team_id {
                CellStyle::Highlight
            } else {
                CellStyle::Normal
            }
        };

        vec![
            cell(format!("#{}", self.id), CellStyle::Muted),
            cell(self.red_team.name.clone(), team_style(self.red_team.id)),
            cell(self.blue_team.name.clone(), team_style(self.blue_team.id)),
            status_cell(&self.status),
            cell(self.score(), CellStyle::Normal),
            cell(
                self.tournament_round.clone().unwrap_or_else(|| "scrimmage".into()),
                CellStyle::Muted,
            ),
        ]
    }
}

impl TableRow for TeamRanking {
    const HEADERS: &'static [&'static str] = &["Rank", "Team", "Rating", "W/L", "Members", "Quote"];
    const WIDTHS: &'static [u16] = &[7, 25, 10, 10, 23, 25];

    fn cells(&self, team_id: Option<u64>, rank: Option<u64>) -> Vec<CellViewModel> {
        let name_style = if Some(self.id) == team_id {
            CellStyle::Highlight
        } else {
            CellStyle::Normal
        };

        vec![
            cell(
                rank.map(|r| r.to_string()).unwrap_or_default(),
                CellStyle::Muted,
            ),
            cell(self.name.clone(), name_style),
            cell(format!("{:.0}", self.rating), CellStyle::Normal),
            cell(format!("{}/{}", self.wins, self.losses), CellStyle::Muted),
            cell(self.members.join(", "), CellStyle::Muted),
            cell(self.quote.clone(), CellStyle::Muted),
        ]
    }

    fn rank_score(&self) -> Option<f64> {
        Some(self.rating)
    }
}

impl ListTableViewModel {
    /// Build view model for the selected screen
    pub fn from_state(lists: &ListsState, spinner_frame: usize) -> Self {
        let screen = lists.selected;
        let team_id = lists.team_id;

        let mut vm = match screen {
            Screen::Submissions => Self::from_pager(&lists.submissions, team_id, spinner_frame),
            Screen::Scrimmages => Self::from_pager(&lists.scrimmages, team_id, spinner_frame),
            Screen::MatchQueue => Self::from_pager(&lists.matches, team_id, spinner_frame),
            Screen::Rankings => Self::from_pager(&lists.rankings, team_id, spinner_frame),
        };

        vm.title = match screen {
            Screen::Rankings if !lists.search.is_empty() => {
                format!(" {} matching \"{}\" ", screen.title(), lists.search)
            }
            _ => format!(" {} ", screen.title()),
        };
        if screen == Screen::Scrimmages && team_id.is_none() {
            vm.title.push_str("(set team_id to see results) ");
        }

        vm
    }

    fn from_pager<T: TableRow + Clone>(
        pager: &Pager<T>,
        team_id: Option<u64>,
        spinner_frame: usize,
    ) -> Self {
        let items = pager.items();

        let scores: Option<Vec<f64>> = items.iter().map(TableRow::rank_score).collect();
        let ranks = scores.map(|scores| display_ranks(pager.offset(), &scores));

        let rows = items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let rank = ranks.as_ref().and_then(|ranks| ranks.get(i).copied());
                item.cells(team_id, rank)
            })
            .collect::<Vec<_>>();

        let placeholder = if !rows.is_empty() {
            None
        } else if pager.is_loading() {
            Some("Loading...".to_string())
        } else if pager.error().is_some() {
            Some("Could not load this page. Press r to retry.".to_string())
        } else {
            Some("Nothing here yet.".to_string())
        };

        Self {
            title: String::new(),
            headers: T::HEADERS,
            widths: T::WIDTHS,
            rows,
            placeholder,
            footer: FooterViewModel::from_pager(pager, spinner_frame),
        }
    }
}

impl FooterViewModel {
    fn from_pager<T: Clone>(pager: &Pager<T>, spinner_frame: usize) -> Self {
        let page_text = if pager.page_limit() > 0 {
            format!("Page {} of {}", pager.current_page(), pager.page_limit())
        } else {
            format!("Page {}", pager.current_page())
        };

        Self {
            page_text,
            spinner: pager
                .is_loading()
                .then(|| SPINNER[spinner_frame % SPINNER.len()]),
            error: pager.error().map(str::to_string),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bc_pager::{Page, PageRequest};

    fn ranking(id: u64, rating: f64) -> TeamRanking {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "name": format!("team{}", id),
            "rating": rating,
        }))
        .unwrap()
    }

    fn scrimmage(status: &str, winscore: u32, losescore: u32) -> Scrimmage {
        serde_json::from_value(serde_json::json!({
            "id": 1,
            "status": status,
            "created": "2024-01-10T12:00:00Z",
            "red_team": {"id": 7, "name": "us"},
            "blue_team": {"id": 8, "name": "them"},
            "winscore": winscore,
            "losescore": losescore,
        }))
        .unwrap()
    }

    #[test]
    fn test_rankings_show_tied_ranks_with_offset() {
        let mut lists = ListsState {
            selected: Screen::Rankings,
            ..ListsState::default()
        };
        let request = lists.rankings.request_page(1).unwrap();
        lists.rankings.apply(
            &request,
            Ok(Page {
                items: vec![ranking(1, 1500.0), ranking(2, 1400.0)],
                page_limit: 3,
            }),
        );
        let request = lists.rankings.next_page().unwrap();
        lists.rankings.apply(
            &request,
            Ok(Page {
                items: vec![ranking(3, 1300.0), ranking(4, 1300.0), ranking(5, 1200.0)],
                page_limit: 3,
            }),
        );

        let vm = ListTableViewModel::from_state(&lists, 0);
        let ranks: Vec<&str> = vm.rows.iter().map(|row| row[0].text.as_str()).collect();
        assert_eq!(ranks, vec!["11", "11", "13"]);
        assert_eq!(vm.footer.page_text, "Page 2 of 3");
        assert_eq!(vm.footer.spinner, None);
    }

    #[test]
    fn test_scrimmage_outcome_from_team_point_of_view() {
        let mut lists = ListsState {
            selected: Screen::Scrimmages,
            team_id: Some(7),
            ..ListsState::default()
        };
        let request = PageRequest::new("scrimmages", 1);
        lists.scrimmages.request_page(1);
        lists.scrimmages.apply(
            &request,
            Ok(Page {
                items: vec![scrimmage("BLUE_WON", 10, 3)],
                page_limit: 1,
            }),
        );

        let vm = ListTableViewModel::from_state(&lists, 0);
        let row = &vm.rows[0];
        assert_eq!(row[0].text, "them");
        assert_eq!(row[2].text, "Lost");
        assert_eq!(row[2].style, CellStyle::Outcome(Some(Outcome::Lost)));
        assert_eq!(row[3].text, "3 - 10");
    }

    #[test]
    fn test_loading_footer_and_placeholder() {
        let mut lists = ListsState::default();
        lists.submissions.request_page(1);

        let vm = ListTableViewModel::from_state(&lists, 3);
        assert_eq!(vm.footer.page_text, "Page 1");
        assert_eq!(vm.footer.spinner, Some(SPINNER[3]));
        assert_eq!(vm.placeholder.as_deref(), Some("Loading..."));
        assert_eq!(vm.headers.len(), vm.widths.len());
    }
}
