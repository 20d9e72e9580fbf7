//! SQL schema for the two Wayline SQLite stores.
//!
//! Executed once at connection startup. Each service owns its own
//! database file, and there is deliberately no foreign key between the
//! two schemas — `positions.name` and `history.username` correlate by
//! value only.

/// Current-position table, one row per name. Idempotent thanks to
/// `CREATE TABLE IF NOT EXISTS`.
pub const POSITIONS_SCHEMA: &str = "
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS positions (
    name        TEXT PRIMARY KEY,
    latitude    REAL NOT NULL,
    longitude   REAL NOT NULL,
    updated_at  TEXT NOT NULL    -- ISO 8601 UTC; server-assigned
);

PRAGMA user_version = 1;
";

/// Append-only position log.
pub const HISTORY_SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- The log is strictly append-only.
-- No UPDATE or DELETE is ever issued against this table.
CREATE TABLE IF NOT EXISTS history (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    username    TEXT NOT NULL,
    latitude    REAL NOT NULL,
    longitude   REAL NOT NULL,
    recorded_at TEXT NOT NULL    -- ISO 8601 UTC
);

CREATE INDEX IF NOT EXISTS history_user_time_idx
    ON history(username, recorded_at);

PRAGMA user_version = 1;
";
