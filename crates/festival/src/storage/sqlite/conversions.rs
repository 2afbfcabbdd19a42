//! SQLite row conversion functions.
//!
//! Pure functions for converting SQLite rows into domain types and for
//! stitching association rows back onto their owners. Testable without a
//! database.

use std::collections::HashMap;
use std::sync::Arc;

use festival_core::event::{Band, Event, Member, Members};
use rusqlite::Row;

/// Convert a SQLite row to an Event without its bands.
///
/// Expected columns: id, title, img_url, nb_stars, comment
pub fn row_to_event(row: &Row) -> rusqlite::Result<Event> {
    Ok(Event {
        id: row.get(0)?,
        title: row.get(1)?,
        img_url: row.get(2)?,
        nb_stars: row.get(3)?,
        comment: row.get(4)?,
        bands: None,
    })
}

/// Convert a line-up row to the owning event ID and a Band without members.
///
/// Expected columns: event_id, band id, band name
pub fn row_to_linked_band(row: &Row) -> rusqlite::Result<(i64, Band)> {
    let event_id: i64 = row.get(0)?;
    let band = Band {
        id: row.get(1)?,
        name: row.get(2)?,
        members: None,
    };
    Ok((event_id, band))
}

/// Convert a band member row to the owning band ID and a Member.
///
/// Expected columns: band_id, member id, member name
pub fn row_to_linked_member(row: &Row) -> rusqlite::Result<(i64, Member)> {
    let band_id: i64 = row.get(0)?;
    let member = Member {
        id: row.get(1)?,
        name: row.get(2)?,
    };
    Ok((band_id, member))
}

/// Attach bands and members to their events.
///
/// Rows must already be in insertion order. A band appearing in several
/// events shares one member collection. Events and bands without rows get
/// empty collections.
pub fn assemble_events(
    events: Vec<Event>,
    bands: Vec<(i64, Band)>,
    members: Vec<(i64, Member)>,
) -> Vec<Event> {
    let mut members_by_band: HashMap<i64, Vec<Option<Member>>> = HashMap::new();
    for (band_id, member) in members {
        members_by_band
            .entry(band_id)
            .or_default()
            .push(Some(member));
    }
    let members_by_band: HashMap<i64, Members> = members_by_band
        .into_iter()
        .map(|(band_id, members)| (band_id, Arc::new(members)))
        .collect();

    let mut bands_by_event: HashMap<i64, Vec<Option<Band>>> = HashMap::new();
    for (event_id, mut band) in bands {
        band.members = Some(members_by_band.get(&band.id).cloned().unwrap_or_default());
        bands_by_event.entry(event_id).or_default().push(Some(band));
    }

    events
        .into_iter()
        .map(|mut event| {
            event.bands = Some(bands_by_event.remove(&event.id).unwrap_or_default());
            event
        })
        .collect()
}
