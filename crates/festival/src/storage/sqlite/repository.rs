//! SQLite repository implementation.
//!
//! Implements `EventRepository` from `festival_core::storage` using SQLite.

use async_trait::async_trait;
use tokio_rusqlite::Connection;

use festival_core::event::{Event, EventPatch};
use festival_core::storage::{EventRepository, RepositoryError, Result};

use super::conversions::{assemble_events, row_to_event, row_to_linked_band, row_to_linked_member};
use super::error::map_tokio_rusqlite_error;
use super::schema;

/// Helper to wrap rusqlite errors for tokio_rusqlite closures.
fn wrap_err(e: rusqlite::Error) -> tokio_rusqlite::Error {
    tokio_rusqlite::Error::Rusqlite(e)
}

/// Runs a prepared query and collects every mapped row.
fn query_all<T, P, F>(
    conn: &rusqlite::Connection,
    sql: &str,
    params: P,
    map: F,
) -> std::result::Result<Vec<T>, tokio_rusqlite::Error>
where
    P: rusqlite::Params,
    F: FnMut(&rusqlite::Row<'_>) -> rusqlite::Result<T>,
{
    let mut stmt = conn.prepare(sql).map_err(wrap_err)?;
    let rows = stmt.query_map(params, map).map_err(wrap_err)?;
    rows.collect::<rusqlite::Result<Vec<T>>>().map_err(wrap_err)
}

/// Loads one event with its line-up and members.
fn load_event(
    conn: &rusqlite::Connection,
    id: i64,
) -> std::result::Result<Option<Event>, tokio_rusqlite::Error> {
    let events = query_all(conn, schema::SELECT_EVENT_BY_ID, [id], row_to_event)?;
    if events.is_empty() {
        return Ok(None);
    }
    let bands = query_all(conn, schema::SELECT_EVENT_BANDS_BY_EVENT, [id], row_to_linked_band)?;
    let members = query_all(
        conn,
        schema::SELECT_BAND_MEMBERS_BY_EVENT,
        [id],
        row_to_linked_member,
    )?;
    Ok(assemble_events(events, bands, members).into_iter().next())
}

/// SQLite-based event repository.
///
/// Events, bands and members live in their own tables; line-ups and band
/// memberships are join tables ordered by insertion position.
pub struct SqliteRepository {
    conn: Connection,
}

impl SqliteRepository {
    /// Creates a new repository with a file-based database.
    ///
    /// The database file will be created if it doesn't exist.
    /// Schema tables are created automatically.
    pub async fn new(path: &str) -> Result<Self> {
        let conn = Connection::open(path)
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Self::init_schema(&conn).await?;

        Ok(Self { conn })
    }

    /// Creates a new repository with an in-memory database.
    ///
    /// Data is lost when the connection is dropped.
    #[cfg_attr(not(test), allow(dead_code))]
    pub async fn new_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Self::init_schema(&conn).await?;

        Ok(Self { conn })
    }

    /// Initialize the database schema.
    async fn init_schema(conn: &Connection) -> Result<()> {
        conn.call(|conn| {
            conn.execute_batch(schema::CREATE_TABLES)
                .map_err(wrap_err)?;
            Ok(())
        })
        .await
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))
    }
}

#[async_trait]
impl EventRepository for SqliteRepository {
    async fn find_all(&self) -> Result<Vec<Event>> {
        self.conn
            .call(|conn| {
                let events = query_all(conn, schema::SELECT_ALL_EVENTS, [], row_to_event)?;
                let bands = query_all(conn, schema::SELECT_ALL_EVENT_BANDS, [], row_to_linked_band)?;
                let members =
                    query_all(conn, schema::SELECT_ALL_BAND_MEMBERS, [], row_to_linked_member)?;
                Ok(assemble_events(events, bands, members))
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Event", "*"))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Event>> {
        self.conn
            .call(move |conn| load_event(conn, id))
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Event", id.to_string()))
    }

    async fn save(&self, event: &Event) -> Result<Event> {
        let event = event.clone();
        let event_id = event.id;

        self.conn
            .call(move |conn| {
                let tx = conn.transaction().map_err(wrap_err)?;

                tx.execute(
                    schema::UPSERT_EVENT,
                    rusqlite::params![
                        event.id,
                        event.title,
                        event.img_url,
                        event.nb_stars,
                        event.comment
                    ],
                )
                .map_err(wrap_err)?;

                if let Some(bands) = &event.bands {
                    tx.execute(schema::DELETE_EVENT_BANDS, [event.id])
                        .map_err(wrap_err)?;

                    for (position, band) in bands.iter().flatten().enumerate() {
                        tx.execute(schema::UPSERT_BAND, rusqlite::params![band.id, band.name])
                            .map_err(wrap_err)?;
                        tx.execute(
                            schema::INSERT_EVENT_BAND,
                            rusqlite::params![event.id, band.id, position as i64],
                        )
                        .map_err(wrap_err)?;

                        let Some(members) = &band.members else {
                            continue;
                        };
                        tx.execute(schema::DELETE_BAND_MEMBERS, [band.id])
                            .map_err(wrap_err)?;
                        for (position, member) in members.iter().flatten().enumerate() {
                            tx.execute(
                                schema::UPSERT_MEMBER,
                                rusqlite::params![member.id, member.name],
                            )
                            .map_err(wrap_err)?;
                            tx.execute(
                                schema::INSERT_BAND_MEMBER,
                                rusqlite::params![band.id, member.id, position as i64],
                            )
                            .map_err(wrap_err)?;
                        }
                    }
                }

                tx.commit().map_err(wrap_err)?;
                Ok(event)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Event", event_id.to_string()))
    }

    async fn apply_patch(&self, id: i64, patch: &EventPatch) -> Result<Event> {
        let patch = patch.clone();

        self.conn
            .call(move |conn| {
                let tx = conn.transaction().map_err(wrap_err)?;

                let rows = tx
                    .execute(
                        schema::PATCH_EVENT,
                        rusqlite::params![
                            id,
                            patch.title,
                            patch.img_url,
                            patch.nb_stars,
                            patch.comment
                        ],
                    )
                    .map_err(wrap_err)?;
                if rows == 0 {
                    return Err(wrap_err(rusqlite::Error::QueryReturnedNoRows));
                }

                let event = load_event(&tx, id)?
                    .ok_or_else(|| wrap_err(rusqlite::Error::QueryReturnedNoRows))?;

                tx.commit().map_err(wrap_err)?;
                Ok(event)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Event", id.to_string()))
    }

    async fn delete_by_id(&self, id: i64) -> Result<()> {
        self.conn
            .call(move |conn| {
                let rows = conn.execute(schema::DELETE_EVENT, [id]).map_err(wrap_err)?;
                if rows == 0 {
                    tracing::debug!(event_id = id, "Delete of unknown event ignored");
                }
                Ok(())
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Event", id.to_string()))
    }
}
