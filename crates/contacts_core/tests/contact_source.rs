use contacts_core::db::address_book::{insert_contact, insert_contacts};
use contacts_core::db::open_db;
use contacts_core::{
    Avatar, ChannelTag, Contact, ContactListService, ContactLoader, ContactSource, LoadError,
    SourceError, SourceResult, SqliteContactSource,
};
use rusqlite::params;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// In-memory stand-in for a platform address book.
struct FixedSource {
    result: Mutex<Option<SourceResult<Vec<Contact>>>>,
    delay: Duration,
}

impl FixedSource {
    fn ok(contacts: Vec<Contact>) -> Self {
        Self {
            result: Mutex::new(Some(Ok(contacts))),
            delay: Duration::ZERO,
        }
    }

    fn failing(reason: &str) -> Self {
        Self {
            result: Mutex::new(Some(Err(SourceError::Unavailable(reason.to_string())))),
            delay: Duration::ZERO,
        }
    }

    fn slow(contacts: Vec<Contact>, delay: Duration) -> Self {
        Self {
            result: Mutex::new(Some(Ok(contacts))),
            delay,
        }
    }
}

impl ContactSource for FixedSource {
    fn source_name(&self) -> &str {
        "fixed"
    }

    fn load_contacts(&self) -> SourceResult<Vec<Contact>> {
        std::thread::sleep(self.delay);
        self.result
            .lock()
            .unwrap()
            .take()
            .unwrap_or_else(|| Ok(Vec::new()))
    }
}

fn seeded_address_book() -> (tempfile::TempDir, std::path::PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("address_book.sqlite3");
    let mut conn = open_db(&path).unwrap();
    insert_contacts(
        &mut conn,
        &[
            Contact::new("Ann", "Lee")
                .with_phone("+1 555 0100")
                .with_channels([ChannelTag::Telegram]),
            Contact::new("Bob", "Ng")
                .with_email("bob@example.com")
                .with_avatar(Avatar::Thumbnail(vec![0xff, 0xd8, 0xff])),
            Contact::new("Cid", "Oz"),
        ],
    )
    .unwrap();
    (dir, path)
}

#[test]
fn sqlite_source_reads_contacts_in_position_order() {
    let (_dir, path) = seeded_address_book();
    let contacts = SqliteContactSource::new(&path).load_contacts().unwrap();

    assert_eq!(contacts.len(), 3);
    assert_eq!(
        contacts[0],
        Contact::new("Ann", "Lee")
            .with_phone("+1 555 0100")
            .with_channels([ChannelTag::Telegram, ChannelTag::Phone])
    );
    assert_eq!(
        contacts[1],
        Contact::new("Bob", "Ng")
            .with_email("bob@example.com")
            .with_avatar(Avatar::Thumbnail(vec![0xff, 0xd8, 0xff]))
            .with_channels([ChannelTag::Email])
    );
    assert_eq!(contacts[2], Contact::new("Cid", "Oz"));
    assert!(contacts[2].avatar.is_placeholder());
}

#[test]
fn sqlite_source_keeps_first_phone_and_maps_platform_services() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("raw.sqlite3");
    let mut conn = open_db(&path).unwrap();
    let id = insert_contact(&mut conn, &Contact::new("Dana", "Kim")).unwrap();

    conn.execute(
        "INSERT INTO contact_phones (contact_id, position, value) VALUES (?1, 1, '222'), (?1, 0, '111');",
        params![id],
    )
    .unwrap();
    for service in ["\u{200e}WhatsApp", "Viber,", "Signal,", "Myspace"] {
        conn.execute(
            "INSERT INTO contact_social_profiles (contact_id, service) VALUES (?1, ?2);",
            params![id, service],
        )
        .unwrap();
    }
    conn.execute(
        "INSERT INTO contact_emails (contact_id, position, value) VALUES (?1, 0, '   ');",
        params![id],
    )
    .unwrap();
    drop(conn);

    let contacts = SqliteContactSource::new(&path).load_contacts().unwrap();
    assert_eq!(contacts.len(), 1);
    let dana = &contacts[0];
    assert_eq!(dana.phone.as_deref(), Some("111"));
    assert_eq!(dana.email, None);
    assert_eq!(
        dana.channels.iter().copied().collect::<Vec<_>>(),
        vec![
            ChannelTag::WhatsApp,
            ChannelTag::Viber,
            ChannelTag::Signal,
            ChannelTag::Phone
        ]
    );
}

#[test]
fn sqlite_source_reports_unsupported_schema() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.sqlite3");
    let conn = rusqlite::Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 42;").unwrap();
    drop(conn);

    let err = SqliteContactSource::new(&path).load_contacts().unwrap_err();
    assert!(matches!(err, SourceError::Db(_)));
}

#[test]
fn sqlite_source_reports_missing_file_without_creating_it() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("typo.sqlite3");

    let err = SqliteContactSource::new(&path).load_contacts().unwrap_err();
    assert!(matches!(err, SourceError::Unavailable(_)), "{err}");
    assert!(!path.exists());
}

#[test]
fn sqlite_source_rejects_unmigrated_file_without_writing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.sqlite3");
    std::fs::write(&path, b"").unwrap();

    let err = SqliteContactSource::new(&path).load_contacts().unwrap_err();
    assert!(matches!(err, SourceError::Unavailable(_)), "{err}");
    assert_eq!(std::fs::metadata(&path).unwrap().len(), 0);
}

#[test]
fn sqlite_source_read_leaves_file_unchanged() {
    let (_dir, path) = seeded_address_book();
    let before = std::fs::read(&path).unwrap();

    SqliteContactSource::new(&path).load_contacts().unwrap();
    assert_eq!(std::fs::read(&path).unwrap(), before);
}

#[test]
fn import_then_read_derives_phone_and_email_from_values() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("round_trip.sqlite3");
    let mut conn = open_db(&path).unwrap();
    insert_contacts(
        &mut conn,
        &[
            // Tags without values are not stored.
            Contact::new("Eve", "Ito").with_channels([ChannelTag::Phone, ChannelTag::Email]),
            // Values without tags gain them on read.
            Contact::new("Fay", "Ju")
                .with_phone("333")
                .with_email("fay@example.com")
                .with_channels([ChannelTag::Signal]),
        ],
    )
    .unwrap();
    drop(conn);

    let contacts = SqliteContactSource::new(&path).load_contacts().unwrap();
    assert!(contacts[0].channels.is_empty());
    assert_eq!(
        contacts[1].channels.iter().copied().collect::<Vec<_>>(),
        vec![ChannelTag::Signal, ChannelTag::Phone, ChannelTag::Email]
    );
}

#[tokio::test]
async fn loader_delivers_source_contacts() {
    let (_dir, path) = seeded_address_book();
    let task = ContactLoader::spawn(Arc::new(SqliteContactSource::new(&path)));
    let contacts = task.join().await.unwrap();
    assert_eq!(contacts.len(), 3);
}

#[tokio::test]
async fn loader_failure_becomes_empty_list() {
    let task = ContactLoader::spawn(Arc::new(FixedSource::failing("access denied")));
    assert!(task.contacts_or_empty().await.is_empty());

    let task = ContactLoader::spawn(Arc::new(FixedSource::failing("access denied")));
    let err = task.join().await.unwrap_err();
    assert!(matches!(
        err,
        LoadError::Source(SourceError::Unavailable(ref reason)) if reason == "access denied"
    ));
}

#[tokio::test]
async fn cancelled_load_reports_cancelled() {
    let source = FixedSource::slow(vec![Contact::new("Ann", "Lee")], Duration::from_millis(300));
    let task = ContactLoader::spawn(Arc::new(source));
    task.cancel();

    let err = task.join().await.unwrap_err();
    assert!(matches!(err, LoadError::Cancelled));
}

#[tokio::test]
async fn finished_task_reports_finished() {
    let task = ContactLoader::spawn(Arc::new(FixedSource::ok(Vec::new())));
    for _ in 0..200 {
        if task.is_finished() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    assert!(task.is_finished());
    assert!(task.join().await.unwrap().is_empty());
}

#[tokio::test]
async fn service_load_populates_store() {
    let mut service = ContactListService::new();
    let view = service
        .load_from(Arc::new(FixedSource::ok(vec![
            Contact::new("Ann", "Lee"),
            Contact::new("Bob", "Ng"),
        ])))
        .await;
    assert_eq!(view.len(), 2);
    assert_eq!(service.store().len(), 2);

    let mut failed = ContactListService::new();
    let view = failed
        .load_from(Arc::new(FixedSource::failing("no permission")))
        .await;
    assert!(view.is_empty());
    assert!(failed.store().is_empty());
}

#[tokio::test]
async fn service_try_load_reports_reason_and_keeps_empty_list() {
    let mut service = ContactListService::new();
    service.load(vec![Contact::new("Old", "Entry")]);

    let err = service
        .try_load_from(Arc::new(FixedSource::failing("no permission")))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        LoadError::Source(SourceError::Unavailable(ref reason)) if reason == "no permission"
    ));
    assert!(service.store().is_empty());

    let view = service
        .try_load_from(Arc::new(FixedSource::ok(vec![Contact::new("Ann", "Lee")])))
        .await
        .unwrap();
    assert_eq!(view.len(), 1);
}
