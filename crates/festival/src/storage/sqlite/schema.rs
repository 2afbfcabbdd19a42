//! SQLite schema definitions and SQL query constants.
//!
//! Pure data, no I/O. Join tables carry a `position` column so band and
//! member collections come back in insertion order.

/// SQL statement to create all tables.
pub const CREATE_TABLES: &str = r#"
PRAGMA foreign_keys = ON;

-- Events table
CREATE TABLE IF NOT EXISTS events (
    id INTEGER PRIMARY KEY,
    title TEXT,
    img_url TEXT,
    nb_stars INTEGER,
    comment TEXT
);

-- Bands table
CREATE TABLE IF NOT EXISTS bands (
    id INTEGER PRIMARY KEY,
    name TEXT
);

-- Members table
CREATE TABLE IF NOT EXISTS members (
    id INTEGER PRIMARY KEY,
    name TEXT
);

-- Event line-ups
CREATE TABLE IF NOT EXISTS event_bands (
    event_id INTEGER NOT NULL,
    band_id INTEGER NOT NULL,
    position INTEGER NOT NULL,
    PRIMARY KEY (event_id, band_id),
    FOREIGN KEY (event_id) REFERENCES events(id) ON DELETE CASCADE,
    FOREIGN KEY (band_id) REFERENCES bands(id) ON DELETE CASCADE
);

-- Band members
CREATE TABLE IF NOT EXISTS band_members (
    band_id INTEGER NOT NULL,
    member_id INTEGER NOT NULL,
    position INTEGER NOT NULL,
    PRIMARY KEY (band_id, member_id),
    FOREIGN KEY (band_id) REFERENCES bands(id) ON DELETE CASCADE,
    FOREIGN KEY (member_id) REFERENCES members(id) ON DELETE CASCADE
);

CREATE INDEX IF NOT EXISTS idx_event_bands_band_id ON event_bands(band_id);
CREATE INDEX IF NOT EXISTS idx_band_members_member_id ON band_members(member_id);
"#;

// Event queries
pub const SELECT_ALL_EVENTS: &str = r#"
SELECT id, title, img_url, nb_stars, comment
FROM events
ORDER BY id ASC
"#;

pub const SELECT_EVENT_BY_ID: &str = r#"
SELECT id, title, img_url, nb_stars, comment
FROM events
WHERE id = ?1
"#;

pub const UPSERT_EVENT: &str = r#"
INSERT INTO events (id, title, img_url, nb_stars, comment)
VALUES (?1, ?2, ?3, ?4, ?5)
ON CONFLICT(id) DO UPDATE SET
    title = excluded.title,
    img_url = excluded.img_url,
    nb_stars = excluded.nb_stars,
    comment = excluded.comment
"#;

/// Overwrites only the columns whose parameter is non-null.
pub const PATCH_EVENT: &str = r#"
UPDATE events SET
    title = COALESCE(?2, title),
    img_url = COALESCE(?3, img_url),
    nb_stars = COALESCE(?4, nb_stars),
    comment = COALESCE(?5, comment)
WHERE id = ?1
"#;

pub const DELETE_EVENT: &str = r#"
DELETE FROM events
WHERE id = ?1
"#;

// Band queries
pub const SELECT_ALL_EVENT_BANDS: &str = r#"
SELECT eb.event_id, b.id, b.name
FROM event_bands eb
INNER JOIN bands b ON b.id = eb.band_id
ORDER BY eb.event_id ASC, eb.position ASC
"#;

pub const SELECT_EVENT_BANDS_BY_EVENT: &str = r#"
SELECT eb.event_id, b.id, b.name
FROM event_bands eb
INNER JOIN bands b ON b.id = eb.band_id
WHERE eb.event_id = ?1
ORDER BY eb.position ASC
"#;

pub const UPSERT_BAND: &str = r#"
INSERT INTO bands (id, name)
VALUES (?1, ?2)
ON CONFLICT(id) DO UPDATE SET name = excluded.name
"#;

pub const DELETE_EVENT_BANDS: &str = r#"
DELETE FROM event_bands
WHERE event_id = ?1
"#;

pub const INSERT_EVENT_BAND: &str = r#"
INSERT OR IGNORE INTO event_bands (event_id, band_id, position)
VALUES (?1, ?2, ?3)
"#;

// Member queries
pub const SELECT_ALL_BAND_MEMBERS: &str = r#"
SELECT bm.band_id, m.id, m.name
FROM band_members bm
INNER JOIN members m ON m.id = bm.member_id
ORDER BY bm.band_id ASC, bm.position ASC
"#;

pub const SELECT_BAND_MEMBERS_BY_EVENT: &str = r#"
SELECT bm.band_id, m.id, m.name
FROM band_members bm
INNER JOIN members m ON m.id = bm.member_id
WHERE bm.band_id IN (SELECT band_id FROM event_bands WHERE event_id = ?1)
ORDER BY bm.band_id ASC, bm.position ASC
"#;

pub const UPSERT_MEMBER: &str = r#"
INSERT INTO members (id, name)
VALUES (?1, ?2)
ON CONFLICT(id) DO UPDATE SET name = excluded.name
"#;

pub const DELETE_BAND_MEMBERS: &str = r#"
DELETE FROM band_members
WHERE band_id = ?1
"#;

pub const INSERT_BAND_MEMBER: &str = r#"
INSERT OR IGNORE INTO band_members (band_id, member_id, position)
VALUES (?1, ?2, ?3)
"#;
