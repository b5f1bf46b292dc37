use contacts_core::{Avatar, ChannelTag, Contact, Filter, SortDirection, SortKey, SortSpec};
use serde_json::json;

#[test]
fn contact_serializes_with_stable_wire_fields() {
    let contact = Contact::new("Ann", "Lee")
        .with_phone("+1 555 0100")
        .with_channels([ChannelTag::Email, ChannelTag::WhatsApp]);

    let value = serde_json::to_value(&contact).unwrap();
    assert_eq!(value["given_name"], "Ann");
    assert_eq!(value["family_name"], "Lee");
    assert_eq!(value["avatar"], json!({ "kind": "placeholder" }));
    assert_eq!(value["phone"], "+1 555 0100");
    assert_eq!(value["email"], serde_json::Value::Null);
    assert_eq!(value["channels"], json!(["whatsapp", "email"]));

    let decoded: Contact = serde_json::from_value(value).unwrap();
    assert_eq!(decoded, contact);
}

#[test]
fn contact_import_shape_defaults_optional_fields() {
    let decoded: Contact = serde_json::from_value(json!({
        "given_name": "Bob",
        "family_name": "Ng",
        "phone": null,
        "email": "bob@example.com"
    }))
    .unwrap();

    assert_eq!(decoded.avatar, Avatar::Placeholder);
    assert!(decoded.channels.is_empty());
    assert_eq!(decoded.email.as_deref(), Some("bob@example.com"));
}

#[test]
fn contacts_with_identical_fields_are_equal() {
    let left = Contact::new("Sam", "Roe").with_channels([ChannelTag::Viber]);
    let right = Contact::new("Sam", "Roe").with_channels([ChannelTag::Viber]);
    assert_eq!(left, right);
    assert_ne!(left, right.with_email("sam@example.com"));
}

#[test]
fn sort_spec_serializes_key_and_direction() {
    let spec = SortSpec::new(SortKey::FamilyName, SortDirection::Descending);
    assert_eq!(
        serde_json::to_value(spec).unwrap(),
        json!({ "key": "family_name", "direction": "descending" })
    );
}

#[test]
fn filter_matches_by_channel_tag() {
    let filter = Filter::for_tag(ChannelTag::Phone);
    assert!(filter.matches(&Contact::new("Ann", "Lee").with_channels([ChannelTag::Phone])));
    assert!(!filter.matches(&Contact::new("Ann", "Lee").with_phone("111")));
}
