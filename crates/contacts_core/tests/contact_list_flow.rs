use contacts_core::{
    ChannelTag, Contact, ContactListService, ContactRecord, Filter, SortDirection, SortKey,
    SortSpec,
};

fn given_names(view: &[ContactRecord]) -> Vec<&str> {
    view.iter()
        .map(|record| record.contact.given_name.as_str())
        .collect()
}

fn service_with_contacts() -> ContactListService {
    let mut service = ContactListService::new();
    service.load(vec![
        Contact::new("Cid", "Oz").with_channels([ChannelTag::Telegram]),
        Contact::new("Ann", "Lee").with_channels([ChannelTag::Telegram, ChannelTag::Phone]),
        Contact::new("Bob", "Ng").with_channels([ChannelTag::Phone]),
    ]);
    service
}

#[test]
fn sort_editor_opens_on_applied_sort_and_applies_draft() {
    let mut service = service_with_contacts();

    let mut editor = service.sort_editor();
    assert_eq!(editor.selected(), None);
    assert!(!editor.is_changed());

    let desc = SortSpec::new(SortKey::GivenName, SortDirection::Descending);
    editor.select(desc);
    assert!(editor.is_changed());
    let view = service.apply_sort_editor(editor);
    assert_eq!(given_names(&view), vec!["Cid", "Bob", "Ann"]);

    let reopened = service.sort_editor();
    assert!(reopened.is_selected(desc));
    assert!(!reopened.is_changed());
}

#[test]
fn filter_editor_round_trip_through_store() {
    let mut service = service_with_contacts();

    let mut editor = service.filter_editor();
    editor.toggle(ChannelTag::Telegram);
    editor.toggle(ChannelTag::Phone);
    let view = service.apply_filter_editor(editor);
    assert_eq!(given_names(&view), vec!["Ann"]);

    let mut reopened = service.filter_editor();
    assert!(reopened.is_selected(ChannelTag::Telegram));
    assert!(reopened.is_selected(ChannelTag::Phone));
    reopened.reset();
    let view = service.apply_filter_editor(reopened);
    assert_eq!(view.len(), 3);
}

#[test]
fn apply_all_filters_hides_contacts_missing_any_channel() {
    let mut service = service_with_contacts();

    let mut editor = service.filter_editor();
    editor.toggle_all();
    assert!(editor.all_selected());
    let view = service.apply_filter_editor(editor);
    assert!(view.is_empty());
}

#[test]
fn delete_through_service_uses_displayed_index() {
    let mut service = service_with_contacts();
    let mut editor = service.sort_editor();
    editor.select(SortSpec::new(SortKey::GivenName, SortDirection::Ascending));
    service.apply_sort_editor(editor);

    let view = service.delete_at(0).unwrap();
    assert_eq!(given_names(&view), vec!["Bob", "Cid"]);
    assert!(service.delete_at(2).is_err());
    assert_eq!(service.view(), view);
}

#[test]
fn service_sort_and_filters_feed_editors() {
    let mut service = service_with_contacts();
    let desc = SortSpec::new(SortKey::FamilyName, SortDirection::Descending);

    service.set_sort(Some(desc));
    let view = service.set_filters([Filter::for_tag(ChannelTag::Telegram)]);
    assert_eq!(given_names(&view), vec!["Cid", "Ann"]);

    assert!(service.sort_editor().is_selected(desc));
    assert!(service.filter_editor().is_selected(ChannelTag::Telegram));
    assert_eq!(service.view(), view);
}
