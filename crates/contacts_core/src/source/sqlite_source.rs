//! SQLite address-book source.
//!
//! # Responsibility
//! - Read contacts from an address-book database into domain values.
//! - Derive channel tags from social profiles, phone and email presence.
//!
//! # Invariants
//! - The database is opened read-only; a missing or unmigrated file is
//!   reported as unavailable and is never created.
//! - Contacts are returned in `position, id` order.
//! - Only the first phone and first email (by position) are kept.
//! - Unknown social services are ignored rather than rejected.

use crate::db::{open_db_read_only, DbError};
use crate::model::contact::{parse_channel_tag, Avatar, ChannelTag, Contact};
use crate::source::contact_source::{ContactSource, SourceError, SourceResult};
use log::{error, info};
use rusqlite::Connection;
use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};
use std::time::Instant;

const CONTACT_SELECT_SQL: &str = "SELECT
    c.id,
    c.given_name,
    c.family_name,
    c.thumbnail,
    (SELECT p.value FROM contact_phones p
        WHERE p.contact_id = c.id ORDER BY p.position LIMIT 1) AS phone,
    (SELECT e.value FROM contact_emails e
        WHERE e.contact_id = c.id ORDER BY e.position LIMIT 1) AS email
FROM contacts c
ORDER BY c.position ASC, c.id ASC;";

/// Address-book source backed by a SQLite file.
///
/// Opens a fresh connection per load so the source stays `Send + Sync`.
#[derive(Debug, Clone)]
pub struct SqliteContactSource {
    path: PathBuf,
}

impl SqliteContactSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn open(&self) -> SourceResult<Connection> {
        if !self.path.is_file() {
            return Err(SourceError::Unavailable(format!(
                "no address book at `{}`",
                self.path.display()
            )));
        }

        open_db_read_only(&self.path).map_err(|err| match err {
            DbError::SchemaNotReady { .. } => SourceError::Unavailable(format!(
                "`{}` is not an address book: {err}",
                self.path.display()
            )),
            other => SourceError::Db(other),
        })
    }
}

impl ContactSource for SqliteContactSource {
    fn source_name(&self) -> &str {
        "sqlite"
    }

    fn load_contacts(&self) -> SourceResult<Vec<Contact>> {
        let started_at = Instant::now();
        let result = self.open().and_then(|conn| read_contacts(&conn));

        match &result {
            Ok(contacts) => info!(
                "event=source_read module=source status=ok source=sqlite count={} duration_ms={}",
                contacts.len(),
                started_at.elapsed().as_millis()
            ),
            Err(err) => error!(
                "event=source_read module=source status=error source=sqlite duration_ms={} error={}",
                started_at.elapsed().as_millis(),
                err
            ),
        }
        result
    }
}

/// Reads every contact from an already-migrated connection.
pub fn read_contacts(conn: &Connection) -> SourceResult<Vec<Contact>> {
    let mut channels_by_contact = read_social_channels(conn)?;

    let mut stmt = conn.prepare(CONTACT_SELECT_SQL)?;
    let mut rows = stmt.query([])?;
    let mut contacts = Vec::new();

    while let Some(row) = rows.next()? {
        let row_id: i64 = row.get("id")?;
        let phone = non_blank(row.get("phone")?);
        let email = non_blank(row.get("email")?);

        let mut channels = channels_by_contact.remove(&row_id).unwrap_or_default();
        if phone.is_some() {
            channels.insert(ChannelTag::Phone);
        }
        if email.is_some() {
            channels.insert(ChannelTag::Email);
        }

        contacts.push(Contact {
            given_name: row.get("given_name")?,
            family_name: row.get("family_name")?,
            avatar: Avatar::from_thumbnail(row.get("thumbnail")?),
            phone,
            email,
            channels,
        });
    }

    Ok(contacts)
}

/// Maps a platform social service name to a messaging channel.
///
/// Platform names may carry punctuation or invisible marks, so only
/// alphanumeric characters are compared.
pub fn parse_social_service(service: &str) -> Option<ChannelTag> {
    let compact: String = service
        .chars()
        .filter(|ch| ch.is_alphanumeric())
        .collect();
    parse_channel_tag(&compact)
        .ok()
        .filter(|tag| tag.is_messaging_app())
}

fn read_social_channels(conn: &Connection) -> SourceResult<HashMap<i64, BTreeSet<ChannelTag>>> {
    let mut stmt = conn.prepare("SELECT contact_id, service FROM contact_social_profiles;")?;
    let mut rows = stmt.query([])?;
    let mut channels: HashMap<i64, BTreeSet<ChannelTag>> = HashMap::new();

    while let Some(row) = rows.next()? {
        let contact_id: i64 = row.get(0)?;
        let service: String = row.get(1)?;
        if let Some(tag) = parse_social_service(&service) {
            channels.entry(contact_id).or_default().insert(tag);
        }
    }

    Ok(channels)
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.trim().is_empty())
}
