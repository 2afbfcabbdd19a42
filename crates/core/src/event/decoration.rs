//! Display decoration and member-name filtering for events.
//!
//! This is part of the Functional Core: every function here is pure and
//! returns freshly built events. Inputs are never mutated. Absent
//! collections, absent elements and absent names are treated as empty.

use super::types::{Band, Event};

/// Returns true when the query is absent, empty, or whitespace only.
///
/// Non-breaking spaces (U+00A0, U+2007, U+202F) count as content, so a
/// query made of them still filters.
pub fn is_blank_query(query: Option<&str>) -> bool {
    query.is_none_or(|q| q.chars().all(is_blank_char))
}

fn is_blank_char(c: char) -> bool {
    match c {
        '\u{a0}' | '\u{2007}' | '\u{202f}' | '\u{85}' => false,
        '\u{1c}'..='\u{1f}' => true,
        c => c.is_whitespace(),
    }
}

/// Returns true when any member of any band of the event has a name that
/// contains `lowered_query` once lower-cased.
///
/// The caller lower-cases the query once up front.
pub fn matches_member_name(event: &Event, lowered_query: &str) -> bool {
    event.bands().iter().flatten().any(|band| {
        band.members()
            .iter()
            .flatten()
            .filter_map(|member| member.name.as_deref())
            .any(|name| name.to_lowercase().contains(lowered_query))
    })
}

/// Filters events by member name, then decorates the survivors.
///
/// Absent entries in `events` are dropped. A blank query keeps every event.
/// Otherwise the query is matched case-insensitively as a plain substring
/// (not trimmed, not tokenized) against member names. Output order follows
/// input order.
///
/// # Examples
///
/// ```
/// use festival_core::event::{filter_and_decorate, Band, Event, Member};
///
/// let events = vec![
///     Event::new(1, "GrasPop").with_bands([
///         Band::new(1, "Metallica").with_members([Member::new(1, "Queen Anika Walsh")]),
///     ]),
///     Event::new(2, "Quiet Night"),
/// ];
///
/// let decorated = filter_and_decorate(&events, Some("wa"));
///
/// assert_eq!(decorated.len(), 1);
/// assert_eq!(decorated[0].title.as_deref(), Some("GrasPop [1]"));
/// ```
pub fn filter_and_decorate<'a, I>(events: I, query: Option<&str>) -> Vec<Event>
where
    I: IntoIterator,
    I::Item: Into<Option<&'a Event>>,
{
    let lowered = match query {
        Some(q) if !is_blank_query(query) => Some(q.to_lowercase()),
        _ => None,
    };

    events
        .into_iter()
        .filter_map(Into::<Option<&'a Event>>::into)
        .filter(|event| {
            lowered
                .as_deref()
                .is_none_or(|q| matches_member_name(event, q))
        })
        .map(decorate)
        .collect()
}

/// Builds a display copy of an event with child counts appended.
///
/// The title becomes `"<title> [<band count>]"` and each band name becomes
/// `"<name> [<member count>]"`. Absent titles and names read as empty
/// strings. Absent bands are skipped. Decorated bands share the source
/// band's member collection; an absent one becomes a new empty collection.
///
/// Applying this twice appends the suffixes twice.
pub fn decorate(event: &Event) -> Event {
    let bands: Vec<Option<Band>> = event
        .bands()
        .iter()
        .flatten()
        .map(|band| Some(decorate_band(band)))
        .collect();

    Event {
        id: event.id,
        title: Some(with_count(event.title.as_deref(), bands.len())),
        img_url: event.img_url.clone(),
        nb_stars: event.nb_stars,
        comment: event.comment.clone(),
        bands: Some(bands),
    }
}

fn decorate_band(band: &Band) -> Band {
    let members = band.members.clone().unwrap_or_default();
    let name = with_count(band.name.as_deref(), members.len());

    Band {
        id: band.id,
        name: Some(name),
        members: Some(members),
    }
}

fn with_count(label: Option<&str>, count: usize) -> String {
    format!("{} [{count}]", label.unwrap_or_default())
}
