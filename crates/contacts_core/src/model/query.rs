//! Query parameters applied to the contact list.
//!
//! # Responsibility
//! - Define `Filter` and `SortSpec` values chosen by the user.
//! - Provide the fixed filter and sort catalogs shown by editor screens.
//!
//! # Invariants
//! - `Filter` equality, hashing and ordering use the channel tag only.
//! - Descending order is the reverse of the ascending comparator output.

use crate::model::contact::{ChannelTag, Contact};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::hash::{Hash, Hasher};

/// Channel filter with display metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Filter {
    pub tag: ChannelTag,
    pub label: String,
    /// Asset name of the filter icon.
    pub icon: String,
}

impl Filter {
    pub fn new(tag: ChannelTag, label: impl Into<String>, icon: impl Into<String>) -> Self {
        Self {
            tag,
            label: label.into(),
            icon: icon.into(),
        }
    }

    /// Catalog filter for `tag`.
    pub fn for_tag(tag: ChannelTag) -> Self {
        let (label, icon) = match tag {
            ChannelTag::Telegram => ("Telegram", "TelegramFilter"),
            ChannelTag::WhatsApp => ("WhatsApp", "WhatsAppFilter"),
            ChannelTag::Viber => ("Viber", "ViberFilter"),
            ChannelTag::Signal => ("Signal", "SignalFilter"),
            ChannelTag::Threema => ("Threema", "ThreemaFilter"),
            ChannelTag::Phone => ("Phone number", "PhoneFilter"),
            ChannelTag::Email => ("E-mail", "EmailFilter"),
        };
        Self::new(tag, label, icon)
    }

    /// Whether `contact` passes this filter.
    pub fn matches(&self, contact: &Contact) -> bool {
        contact.has_channel(self.tag)
    }
}

impl PartialEq for Filter {
    fn eq(&self, other: &Self) -> bool {
        self.tag == other.tag
    }
}

impl Eq for Filter {}

impl Hash for Filter {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.tag.hash(state);
    }
}

impl PartialOrd for Filter {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Filter {
    fn cmp(&self, other: &Self) -> Ordering {
        self.tag.cmp(&other.tag)
    }
}

/// Every catalog filter in tag display order.
pub fn filter_catalog() -> Vec<Filter> {
    ChannelTag::ALL.into_iter().map(Filter::for_tag).collect()
}

/// Contact field a sort compares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    GivenName,
    FamilyName,
}

impl SortKey {
    fn field(self, contact: &Contact) -> &str {
        match self {
            Self::GivenName => contact.given_name.as_str(),
            Self::FamilyName => contact.family_name.as_str(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Single-key sort order.
///
/// The store keeps `Option<SortSpec>`; `None` preserves load order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortSpec {
    pub key: SortKey,
    pub direction: SortDirection,
}

/// Stable code for given name ascending.
pub const SORT_GIVEN_NAME_ASC: &str = "given_name_asc";
/// Stable code for given name descending.
pub const SORT_GIVEN_NAME_DESC: &str = "given_name_desc";
/// Stable code for family name ascending.
pub const SORT_FAMILY_NAME_ASC: &str = "family_name_asc";
/// Stable code for family name descending.
pub const SORT_FAMILY_NAME_DESC: &str = "family_name_desc";

impl SortSpec {
    pub const fn new(key: SortKey, direction: SortDirection) -> Self {
        Self { key, direction }
    }

    /// Compares two contacts on the chosen field.
    ///
    /// Uses plain `str` ordering (code point order). Descending reverses the
    /// ascending result rather than using a second comparator.
    pub fn compare(&self, left: &Contact, right: &Contact) -> Ordering {
        let ascending = self.key.field(left).cmp(self.key.field(right));
        match self.direction {
            SortDirection::Ascending => ascending,
            SortDirection::Descending => ascending.reverse(),
        }
    }

    /// Stable string code used across FFI and CLI boundaries.
    pub fn code(&self) -> &'static str {
        match (self.key, self.direction) {
            (SortKey::GivenName, SortDirection::Ascending) => SORT_GIVEN_NAME_ASC,
            (SortKey::GivenName, SortDirection::Descending) => SORT_GIVEN_NAME_DESC,
            (SortKey::FamilyName, SortDirection::Ascending) => SORT_FAMILY_NAME_ASC,
            (SortKey::FamilyName, SortDirection::Descending) => SORT_FAMILY_NAME_DESC,
        }
    }

    /// User-facing catalog label.
    pub fn label(&self) -> &'static str {
        match (self.key, self.direction) {
            (SortKey::GivenName, SortDirection::Ascending) => "By given name (A-Z)",
            (SortKey::GivenName, SortDirection::Descending) => "By given name (Z-A)",
            (SortKey::FamilyName, SortDirection::Ascending) => "By family name (A-Z)",
            (SortKey::FamilyName, SortDirection::Descending) => "By family name (Z-A)",
        }
    }
}

/// The four catalog sorts in screen order.
pub const SORT_CATALOG: [SortSpec; 4] = [
    SortSpec::new(SortKey::GivenName, SortDirection::Ascending),
    SortSpec::new(SortKey::GivenName, SortDirection::Descending),
    SortSpec::new(SortKey::FamilyName, SortDirection::Ascending),
    SortSpec::new(SortKey::FamilyName, SortDirection::Descending),
];

/// Parses a sort spec from its stable code.
pub fn parse_sort_spec(value: &str) -> Result<SortSpec, SortSpecParseError> {
    let normalized = value.trim().to_ascii_lowercase().replace('-', "_");
    if normalized.is_empty() {
        return Err(SortSpecParseError::Empty);
    }

    SORT_CATALOG
        .into_iter()
        .find(|spec| spec.code() == normalized)
        .ok_or_else(|| SortSpecParseError::Unsupported(value.trim().to_string()))
}

/// Sort code parse errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SortSpecParseError {
    Empty,
    Unsupported(String),
}

impl Display for SortSpecParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "sort code cannot be empty"),
            Self::Unsupported(value) => write!(
                f,
                "unsupported sort code `{value}`; expected given_name_asc|given_name_desc|family_name_asc|family_name_desc"
            ),
        }
    }
}

impl Error for SortSpecParseError {}

#[cfg(test)]
mod tests {
    use super::{
        filter_catalog, parse_sort_spec, Filter, SortDirection, SortKey, SortSpec,
        SortSpecParseError, SORT_CATALOG,
    };
    use crate::model::contact::{ChannelTag, Contact};
    use std::cmp::Ordering;
    use std::collections::HashSet;

    #[test]
    fn filters_compare_by_tag_only() {
        let catalog = Filter::for_tag(ChannelTag::Viber);
        let custom = Filter::new(ChannelTag::Viber, "Something else", "OtherIcon");
        assert_eq!(catalog, custom);

        let set: HashSet<Filter> = [catalog, custom].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn filter_catalog_follows_tag_order() {
        let tags: Vec<ChannelTag> = filter_catalog().into_iter().map(|f| f.tag).collect();
        assert_eq!(tags, ChannelTag::ALL.to_vec());
    }

    #[test]
    fn descending_is_reverse_of_ascending() {
        let ann = Contact::new("Ann", "Lee");
        let bob = Contact::new("Bob", "Ng");
        let asc = SortSpec::new(SortKey::GivenName, SortDirection::Ascending);
        let desc = SortSpec::new(SortKey::GivenName, SortDirection::Descending);
        assert_eq!(asc.compare(&ann, &bob), Ordering::Less);
        assert_eq!(desc.compare(&ann, &bob), Ordering::Greater);
        assert_eq!(desc.compare(&ann, &ann), Ordering::Equal);
    }

    #[test]
    fn comparison_is_code_point_order() {
        let upper = Contact::new("Zed", "");
        let lower = Contact::new("adam", "");
        let asc = SortSpec::new(SortKey::GivenName, SortDirection::Ascending);
        assert_eq!(asc.compare(&upper, &lower), Ordering::Less);
    }

    #[test]
    fn sort_codes_parse_back() {
        for spec in SORT_CATALOG {
            assert_eq!(parse_sort_spec(spec.code()), Ok(spec));
        }
        assert_eq!(
            parse_sort_spec("family-name-desc"),
            Ok(SortSpec::new(SortKey::FamilyName, SortDirection::Descending))
        );
        assert_eq!(parse_sort_spec(""), Err(SortSpecParseError::Empty));
        assert!(matches!(
            parse_sort_spec("age_asc"),
            Err(SortSpecParseError::Unsupported(_))
        ));
    }
}
