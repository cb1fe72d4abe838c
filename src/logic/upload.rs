// Bulk game import from CSV text.
//
// The first line is a header naming the columns, in any order:
// date, home, away, home_goals, away_goals, and optionally walkover,
// home_adjustment and away_adjustment. Players are named by id or by full name.
// A goal cell of "w/o" marks that side as forfeiting.
use std::collections::HashMap;

use csv::{ReaderBuilder, StringRecord, Trim};

use crate::logic::{
    game::{GameInput, Walkover},
    person::{name_key, Player},
    time::string_to_date,
    tournament::Tournament,
    types::{Goals, PlayerId, Points},
};

// Column positions in the header.
struct Columns {
    date: usize,
    home: usize,
    away: usize,
    home_goals: usize,
    away_goals: usize,
    walkover: Option<usize>,
    home_adjustment: Option<usize>,
    away_adjustment: Option<usize>,
}

impl Columns {
    const REQUIRED: [&'static str; 5] = ["date", "home", "away", "home_goals", "away_goals"];

    fn build(headers: &StringRecord) -> Result<Self, Vec<String>> {
        let positions: HashMap<String, usize> = headers.iter()
            .enumerate()
            .map(|(i, h)| (h.trim().to_lowercase().replace([' ', '-'], "_"), i))
            .collect();

        let missing: Vec<String> = Self::REQUIRED.iter()
            .filter(|name| !positions.contains_key(**name))
            .map(|name| format!("Line 1: missing column \"{name}\"."))
            .collect();
        if !missing.is_empty() { return Err(missing); }

        Ok(Self {
            date: positions["date"],
            home: positions["home"],
            away: positions["away"],
            home_goals: positions["home_goals"],
            away_goals: positions["away_goals"],
            walkover: positions.get("walkover").copied(),
            home_adjustment: positions.get("home_adjustment").copied(),
            away_adjustment: positions.get("away_adjustment").copied(),
        })
    }
}

// Participants looked up by id or by normalised full name.
struct Roster {
    ids: Vec<PlayerId>,
    names: HashMap<String, Vec<PlayerId>>,
}

impl Roster {
    fn build(participants: &[Player]) -> Self {
        let mut names: HashMap<String, Vec<PlayerId>> = HashMap::new();
        for player in participants {
            names.entry(name_key(&player.full_name())).or_default().push(player.id);
        }

        Self {
            ids: participants.iter().map(|p| p.id).collect(),
            names,
        }
    }

    fn find(&self, cell: &str) -> Result<PlayerId, String> {
        if cell.is_empty() {
            return Err("player is missing".to_string());
        }
        if let Ok(id) = cell.parse::<PlayerId>() {
            return match self.ids.contains(&id) {
                true => Ok(id),
                false => Err(format!("no participant has id {id}")),
            };
        }
        match self.names.get(&name_key(cell)).map(Vec::as_slice) {
            Some([id]) => Ok(*id),
            Some(_) => Err(format!("\"{cell}\" matches more than one participant, use the player id")),
            None => Err(format!("\"{cell}\" is not a participant")),
        }
    }
}

#[derive(Debug, PartialEq)]
enum GoalCell {
    Empty,
    Forfeit,
    Goals(Goals),
}

impl GoalCell {
    fn parse(cell: &str) -> Result<Self, String> {
        match cell.to_ascii_lowercase().as_str() {
            "" => Ok(GoalCell::Empty),
            "w/o" | "wo" => Ok(GoalCell::Forfeit),
            s => s.parse::<Goals>()
                .map(GoalCell::Goals)
                .map_err(|_| format!("\"{cell}\" is not a number of goals")),
        }
    }
}

// Parse an optional signed adjustment, where empty means zero.
fn parse_adjustment(cell: &str) -> Result<Points, String> {
    match cell {
        "" => Ok(0),
        s => s.parse::<Points>().map_err(|_| format!("\"{cell}\" is not a whole number of points")),
    }
}

fn cell<'a>(record: &'a StringRecord, index: usize) -> &'a str {
    record.get(index).unwrap_or("")
}

fn optional_cell<'a>(record: &'a StringRecord, index: Option<usize>) -> &'a str {
    index.map(|i| cell(record, i)).unwrap_or("")
}

// Parse a single data row. Returns every problem found on it.
fn parse_row(record: &StringRecord, columns: &Columns, roster: &Roster, tournament: &Tournament) -> Result<GameInput, Vec<String>> {
    let mut errors = Vec::new();

    let date = string_to_date(cell(record, columns.date)).map_err(|e| errors.push(e)).ok();
    let home = roster.find(cell(record, columns.home)).map_err(|e| errors.push(format!("home: {e}"))).ok();
    let away = roster.find(cell(record, columns.away)).map_err(|e| errors.push(format!("away: {e}"))).ok();
    let home_cell = GoalCell::parse(cell(record, columns.home_goals)).map_err(|e| errors.push(format!("home_goals: {e}"))).ok();
    let away_cell = GoalCell::parse(cell(record, columns.away_goals)).map_err(|e| errors.push(format!("away_goals: {e}"))).ok();
    let walkover_cell = optional_cell(record, columns.walkover);
    let walkover = Walkover::from_key(walkover_cell)
        .ok_or_else(|| errors.push(format!("walkover: \"{walkover_cell}\" should be empty, home, away or both")))
        .ok();
    let home_adjustment = parse_adjustment(optional_cell(record, columns.home_adjustment))
        .map_err(|e| errors.push(format!("home_adjustment: {e}"))).ok();
    let away_adjustment = parse_adjustment(optional_cell(record, columns.away_adjustment))
        .map_err(|e| errors.push(format!("away_adjustment: {e}"))).ok();

    let (Some(date), Some(home), Some(away), Some(home_cell), Some(away_cell), Some(walkover), Some(home_adjustment), Some(away_adjustment))
        = (date, home, away, home_cell, away_cell, walkover, home_adjustment, away_adjustment) else {
        return Err(errors);
    };

    // Forfeits can come from the walkover column, the goal cells, or both.
    let walkover = Walkover::build(
        walkover.home_forfeits() || home_cell == GoalCell::Forfeit,
        walkover.away_forfeits() || away_cell == GoalCell::Forfeit,
    );

    let goals = |goal_cell: &GoalCell, side: &str, errors: &mut Vec<String>| -> Goals {
        match goal_cell {
            GoalCell::Goals(g) => *g,
            _ if walkover.is_walkover() => 0,
            _ => {
                errors.push(format!("{side}_goals is missing"));
                0
            },
        }
    };
    let home_goals = goals(&home_cell, "home", &mut errors);
    let away_goals = goals(&away_cell, "away", &mut errors);

    let mut game = GameInput::build(date, home, away, home_goals, away_goals);
    game.walkover = walkover;
    game.home_adjustment = home_adjustment;
    game.away_adjustment = away_adjustment;

    let participant_ids = roster.ids.as_slice();
    errors.extend(game.validate(tournament, participant_ids));

    match errors.is_empty() {
        true => Ok(game.resolve(tournament.walkover_goals)),
        false => Err(errors),
    }
}

// Parse an upload into games ready to record, or every problem found in it.
// Errors are prefixed with their 1-based line number, the header being line 1.
pub fn parse_upload(text: &str, tournament: &Tournament, participants: &[Player]) -> Result<Vec<GameInput>, Vec<String>> {
    if text.trim().is_empty() {
        return Err(vec!["The upload is empty.".to_string()]);
    }

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(text.as_bytes());

    let headers = reader.headers().map_err(|e| vec![format!("Line 1: {e}")])?.clone();
    let columns = Columns::build(&headers)?;
    let roster = Roster::build(participants);

    let mut games = Vec::new();
    let mut errors = Vec::new();
    for record in reader.records() {
        let record = match record {
            Ok(r) => r,
            Err(e) => {
                let line = e.position().map(|p| p.line()).unwrap_or_default();
                errors.push(format!("Line {line}: {e}"));
                continue;
            },
        };

        // Rows of only commas count as blank.
        if record.iter().all(str::is_empty) { continue; }

        let line = record.position().map(|p| p.line()).unwrap_or_default();
        match parse_row(&record, &columns, &roster, tournament) {
            Ok(game) => games.push(game),
            Err(row_errors) => errors.extend(row_errors.into_iter().map(|e| format!("Line {line}: {e}"))),
        }
    }

    if !errors.is_empty() { return Err(errors); }
    if games.is_empty() {
        return Err(vec!["No games found in the upload.".to_string()]);
    }

    return Ok(games);
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use super::*;
    use crate::logic::person::role::Role;

    fn player(id: PlayerId, forename: &str, surname: &str) -> Player {
        Player {
            id,
            club_id: 1,
            forename: forename.to_string(),
            surname: surname.to_string(),
            email: None,
            roles: vec![Role::Player],
        }
    }

    fn setup() -> (Tournament, Vec<Player>) {
        let tournament = Tournament {
            id: 1,
            name: "League".to_string(),
            start_date: date!(2025-03-01),
            end_date: Some(date!(2025-03-31)),
            walkover_goals: 3,
            ..Default::default()
        };
        let players = vec![player(1, "Ada", "Lovelace"), player(2, "Alan", "Turing"), player(3, "Grace", "Hopper")];
        (tournament, players)
    }

    #[test]
    fn parses_names_ids_and_any_column_order() {
        let (t, p) = setup();
        let text = "home,away,Date,Home Goals,away_goals\n\
                    ada lovelace,2,2025-03-02,2,1\n\
                    3,  Alan   Turing ,2025-03-03,0,0\n";
        let games = parse_upload(text, &t, &p).unwrap();
        assert_eq!(games.len(), 2);
        assert_eq!(games[0], GameInput::build(date!(2025-03-02), 1, 2, 2, 1));
        assert_eq!((games[1].home_id, games[1].away_id), (3, 2));
    }

    #[test]
    fn walkovers_from_column_and_goal_cells() {
        let (t, p) = setup();
        let text = "date,home,away,home_goals,away_goals,walkover\n\
                    2025-03-02,1,2,,,away\n\
                    2025-03-03,1,3,w/o,,\n\
                    2025-03-04,2,3,WO,wo,\n";
        let games = parse_upload(text, &t, &p).unwrap();

        assert_eq!(games[0].walkover, Walkover::Away);
        assert_eq!((games[0].home_goals, games[0].away_goals), (3, 0));
        assert_eq!(games[1].walkover, Walkover::Home);
        assert_eq!((games[1].home_goals, games[1].away_goals), (0, 3));
        assert_eq!(games[2].walkover, Walkover::Both);
        assert_eq!((games[2].home_goals, games[2].away_goals), (0, 0));
    }

    #[test]
    fn adjustments_are_optional_and_signed() {
        let (t, p) = setup();
        let text = "date,home,away,home_goals,away_goals,home_adjustment,away_adjustment\n\
                    2025-03-02,1,2,1,1,-2,\n";
        let games = parse_upload(text, &t, &p).unwrap();
        assert_eq!((games[0].home_adjustment, games[0].away_adjustment), (-2, 0));
    }

    #[test]
    fn huge_adjustments_are_line_errors() {
        let (t, p) = setup();
        let text = "date,home,away,home_goals,away_goals,home_adjustment\n\
                    2025-03-02,1,2,1,0,9223372036854775807\n";
        let errors = parse_upload(text, &t, &p).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].starts_with("Line 2: Home adjustment"));
    }

    #[test]
    fn errors_carry_line_numbers_and_nothing_is_returned() {
        let (t, p) = setup();
        let text = "date,home,away,home_goals,away_goals\n\
                    2025-03-02,1,2,1,0\n\
                    \n\
                    2025-13-01,Nobody,2,x,1\n\
                    2025-03-05,1,1,2,\n";
        let errors = parse_upload(text, &t, &p).unwrap_err();

        assert!(errors.iter().any(|e| e.starts_with("Line 4:") && e.contains("2025-13-01")));
        assert!(errors.iter().any(|e| e.starts_with("Line 4:") && e.contains("Nobody")));
        assert!(errors.iter().any(|e| e.starts_with("Line 4:") && e.contains("\"x\"")));
        assert!(errors.iter().any(|e| e.starts_with("Line 5:") && e.contains("away_goals is missing")));
        assert!(errors.iter().any(|e| e.starts_with("Line 5:") && e.contains("themselves")));
        assert!(!errors.iter().any(|e| e.starts_with("Line 2:")));
    }

    #[test]
    fn missing_columns_are_named() {
        let (t, p) = setup();
        let errors = parse_upload("date,home,away\n2025-03-02,1,2\n", &t, &p).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors[0].contains("home_goals"));
        assert!(errors[1].contains("away_goals"));
    }

    #[test]
    fn ambiguous_names_need_an_id() {
        let (t, mut p) = setup();
        p.push(player(4, "Ada", "Lovelace"));
        let errors = parse_upload("date,home,away,home_goals,away_goals\n2025-03-02,Ada Lovelace,2,1,0\n", &t, &p).unwrap_err();
        assert!(errors[0].contains("more than one participant"));
    }

    #[test]
    fn dates_outside_the_tournament_are_rejected() {
        let (t, p) = setup();
        let errors = parse_upload("date,home,away,home_goals,away_goals\n2025-04-01,1,2,1,0\n", &t, &p).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].starts_with("Line 2:"));
    }

    #[test]
    fn empty_uploads_are_rejected() {
        let (t, p) = setup();
        assert_eq!(parse_upload("  \n", &t, &p).unwrap_err(), vec!["The upload is empty.".to_string()]);
        assert_eq!(
            parse_upload("date,home,away,home_goals,away_goals\n,,,,\n", &t, &p).unwrap_err(),
            vec!["No games found in the upload.".to_string()]
        );
    }
}
