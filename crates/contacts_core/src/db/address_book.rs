//! Address-book write path.
//!
//! # Responsibility
//! - Insert contacts into the address-book schema for imports and fixtures.
//!
//! # Invariants
//! - New contacts are appended after every existing contact.
//! - Only messaging-app channels are stored as social profiles; phone and
//!   email channels are implied by the presence of those values.

use crate::db::DbResult;
use crate::model::contact::{Avatar, Contact};
use rusqlite::{params, Connection};

/// Appends one contact and returns its row id.
pub fn insert_contact(conn: &mut Connection, contact: &Contact) -> DbResult<i64> {
    let tx = conn.transaction()?;

    let position: i64 = tx.query_row(
        "SELECT COALESCE(MAX(position), -1) + 1 FROM contacts;",
        [],
        |row| row.get(0),
    )?;
    let thumbnail = match &contact.avatar {
        Avatar::Thumbnail(bytes) => Some(bytes.as_slice()),
        Avatar::Placeholder => None,
    };
    tx.execute(
        "INSERT INTO contacts (given_name, family_name, thumbnail, position)
         VALUES (?1, ?2, ?3, ?4);",
        params![
            contact.given_name.as_str(),
            contact.family_name.as_str(),
            thumbnail,
            position
        ],
    )?;
    let contact_id = tx.last_insert_rowid();

    if let Some(phone) = contact.phone.as_deref() {
        tx.execute(
            "INSERT INTO contact_phones (contact_id, position, value) VALUES (?1, 0, ?2);",
            params![contact_id, phone],
        )?;
    }
    if let Some(email) = contact.email.as_deref() {
        tx.execute(
            "INSERT INTO contact_emails (contact_id, position, value) VALUES (?1, 0, ?2);",
            params![contact_id, email],
        )?;
    }
    for tag in contact.channels.iter().filter(|tag| tag.is_messaging_app()) {
        tx.execute(
            "INSERT INTO contact_social_profiles (contact_id, service) VALUES (?1, ?2);",
            params![contact_id, tag.as_str()],
        )?;
    }

    tx.commit()?;
    Ok(contact_id)
}

/// Appends every contact in order and returns how many were written.
pub fn insert_contacts(conn: &mut Connection, contacts: &[Contact]) -> DbResult<usize> {
    for contact in contacts {
        insert_contact(conn, contact)?;
    }
    Ok(contacts.len())
}
