//! Statement templates for the two stores.
//!
//! Every template is fully parameterized. Path values are bound positionally
//! and never spliced into the statement text.

// ==================== Play-by-play ====================

pub const ALL_PLAYS: &str = "SELECT * FROM wnba_pbp";

pub const PLAYS_BY_GAME: &str = "SELECT * FROM wnba_pbp WHERE game_id = ?1";

pub const PLAYS_BY_DATE: &str = "SELECT * FROM wnba_pbp WHERE game_date = ?1";

pub const PLAYS_BY_DATE_AND_GAME: &str =
    "SELECT * FROM wnba_pbp WHERE game_date = ?1 AND game_id = ?2";

// ==================== Schedule ====================

pub const ALL_GAMES: &str = "SELECT * FROM wnba_schedule";

pub const GAME_BY_ID: &str = "SELECT * FROM wnba_schedule WHERE id = ?1";

pub const GAMES_BY_HOME_TEAM: &str =
    "SELECT * FROM wnba_schedule WHERE home_short_display_name = ?1";

pub const GAMES_BY_AWAY_TEAM: &str =
    "SELECT * FROM wnba_schedule WHERE away_short_display_name = ?1";

pub const GAMES_BY_STATUS: &str = "SELECT * FROM wnba_schedule WHERE status_type_name = ?1";

/// `date` holds a full timestamp; compare on the calendar day only.
pub const GAMES_BY_DATE: &str = "SELECT * FROM wnba_schedule WHERE date(date) = ?1";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_templates_target_known_tables() {
        for sql in [ALL_PLAYS, PLAYS_BY_GAME, PLAYS_BY_DATE, PLAYS_BY_DATE_AND_GAME] {
            assert!(sql.contains("FROM wnba_pbp"));
            assert!(sql.starts_with("SELECT"));
        }
        for sql in [
            ALL_GAMES,
            GAME_BY_ID,
            GAMES_BY_HOME_TEAM,
            GAMES_BY_AWAY_TEAM,
            GAMES_BY_STATUS,
            GAMES_BY_DATE,
        ] {
            assert!(sql.contains("FROM wnba_schedule"));
            assert!(sql.starts_with("SELECT"));
        }
    }
}
