//! In-memory stores seeded with a handful of rows for tests
//!
//! Tables:
//! - wnba_pbp: two games on 2024-05-14, one on 2024-05-15
//! - wnba_schedule: one final game, one scheduled game

use rusqlite::Connection;

use super::Store;

/// Play-by-play store: game 401620001 has 3 plays, 401620002 has 2, 401620003 has 1
pub fn plays_store() -> Store {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        r#"
        CREATE TABLE wnba_pbp (
            game_id INTEGER NOT NULL,
            game_date TEXT NOT NULL,
            sequence_number INTEGER NOT NULL,
            period INTEGER,
            clock TEXT,
            text TEXT,
            score_value REAL
        );
        INSERT INTO wnba_pbp VALUES
            (401620001, '2024-05-14', 1, 1, '10:00', 'Jump ball won by Aces', 0),
            (401620001, '2024-05-14', 2, 1, '9:41', 'A''ja Wilson makes layup', 2),
            (401620001, '2024-05-14', 3, 1, '9:12', 'Breanna Stewart makes three', 3),
            (401620002, '2024-05-14', 1, 1, '10:00', 'Jump ball won by Lynx', 0),
            (401620002, '2024-05-14', 2, 1, '9:30', 'Napheesa Collier makes jumper', 2),
            (401620003, '2024-05-15', 1, 1, '10:00', 'Jump ball won by Sky', 0);
        "#,
    )
    .unwrap();
    Store::from_connection("plays", conn)
}

/// Play-by-play store with the table but no rows
pub fn empty_plays_store() -> Store {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        r#"
        CREATE TABLE wnba_pbp (
            game_id INTEGER NOT NULL,
            game_date TEXT NOT NULL,
            sequence_number INTEGER NOT NULL
        );
        "#,
    )
    .unwrap();
    Store::from_connection("plays", conn)
}

/// Schedule store: 401620001 final on 2024-05-14, 401620099 scheduled on 2024-05-20
pub fn schedule_store() -> Store {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        r#"
        CREATE TABLE wnba_schedule (
            id INTEGER PRIMARY KEY,
            date TEXT NOT NULL,
            home_short_display_name TEXT,
            away_short_display_name TEXT,
            status_type_name TEXT
        );
        INSERT INTO wnba_schedule VALUES
            (401620001, '2024-05-14 19:30:00', 'Aces', 'Liberty', 'STATUS_FINAL'),
            (401620099, '2024-05-20 23:00:00', 'Liberty', 'Sky', 'STATUS_SCHEDULED');
        "#,
    )
    .unwrap();
    Store::from_connection("schedule", conn)
}
