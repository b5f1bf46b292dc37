//! Contact domain model.
//!
//! # Responsibility
//! - Define the canonical contact value loaded from the address book.
//! - Define channel tags used by filters and channel icon rendering.
//!
//! # Invariants
//! - `Contact` equality is structural; it carries no external identity.
//! - `ChannelTag` declaration order is the fixed display order.
//! - `ContactId` is assigned by the store at load time and never reused.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Synthetic identifier assigned to every contact when it is loaded.
pub type ContactId = Uuid;

/// Reachability channel a contact can carry.
///
/// `Ord` follows declaration order, which is also the icon display order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ChannelTag {
    Telegram,
    #[serde(rename = "whatsapp")]
    WhatsApp,
    Viber,
    Signal,
    Threema,
    Phone,
    Email,
}

/// Stable id for the Telegram channel.
pub const CHANNEL_TELEGRAM: &str = "telegram";
/// Stable id for the WhatsApp channel.
pub const CHANNEL_WHATSAPP: &str = "whatsapp";
/// Stable id for the Viber channel.
pub const CHANNEL_VIBER: &str = "viber";
/// Stable id for the Signal channel.
pub const CHANNEL_SIGNAL: &str = "signal";
/// Stable id for the Threema channel.
pub const CHANNEL_THREEMA: &str = "threema";
/// Stable id for the phone channel.
pub const CHANNEL_PHONE: &str = "phone";
/// Stable id for the email channel.
pub const CHANNEL_EMAIL: &str = "email";

impl ChannelTag {
    /// Every tag in display order.
    pub const ALL: [ChannelTag; 7] = [
        Self::Telegram,
        Self::WhatsApp,
        Self::Viber,
        Self::Signal,
        Self::Threema,
        Self::Phone,
        Self::Email,
    ];

    /// Stable string id used across FFI and storage boundaries.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Telegram => CHANNEL_TELEGRAM,
            Self::WhatsApp => CHANNEL_WHATSAPP,
            Self::Viber => CHANNEL_VIBER,
            Self::Signal => CHANNEL_SIGNAL,
            Self::Threema => CHANNEL_THREEMA,
            Self::Phone => CHANNEL_PHONE,
            Self::Email => CHANNEL_EMAIL,
        }
    }

    /// Whether this tag names a messaging app rather than phone/email.
    pub fn is_messaging_app(self) -> bool {
        !matches!(self, Self::Phone | Self::Email)
    }
}

impl Display for ChannelTag {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses one channel tag from its stable string id.
///
/// Input is trimmed and matched case-insensitively.
pub fn parse_channel_tag(value: &str) -> Result<ChannelTag, ChannelTagParseError> {
    let normalized = value.trim().to_ascii_lowercase();
    if normalized.is_empty() {
        return Err(ChannelTagParseError::Empty);
    }

    match normalized.as_str() {
        CHANNEL_TELEGRAM => Ok(ChannelTag::Telegram),
        CHANNEL_WHATSAPP => Ok(ChannelTag::WhatsApp),
        CHANNEL_VIBER => Ok(ChannelTag::Viber),
        CHANNEL_SIGNAL => Ok(ChannelTag::Signal),
        CHANNEL_THREEMA => Ok(ChannelTag::Threema),
        CHANNEL_PHONE => Ok(ChannelTag::Phone),
        CHANNEL_EMAIL => Ok(ChannelTag::Email),
        _ => Err(ChannelTagParseError::Unsupported(value.trim().to_string())),
    }
}

/// Channel tag parse errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelTagParseError {
    Empty,
    Unsupported(String),
}

impl Display for ChannelTagParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "channel tag cannot be empty"),
            Self::Unsupported(value) => write!(
                f,
                "unsupported channel tag `{value}`; expected telegram|whatsapp|viber|signal|threema|phone|email"
            ),
        }
    }
}

impl Error for ChannelTagParseError {}

/// Avatar image handle as delivered by the contact source.
///
/// Decoding is left to the presentation layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "data")]
pub enum Avatar {
    /// Raw thumbnail bytes from the platform store.
    Thumbnail(Vec<u8>),
    /// No thumbnail; render the placeholder asset.
    #[default]
    Placeholder,
}

impl Avatar {
    /// Builds a handle from optional thumbnail bytes.
    ///
    /// Missing or empty data resolves to `Placeholder`.
    pub fn from_thumbnail(data: Option<Vec<u8>>) -> Self {
        match data {
            Some(bytes) if !bytes.is_empty() => Self::Thumbnail(bytes),
            _ => Self::Placeholder,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, Self::Placeholder)
    }
}

/// One address-book entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Contact {
    pub given_name: String,
    pub family_name: String,
    #[serde(default)]
    pub avatar: Avatar,
    pub phone: Option<String>,
    pub email: Option<String>,
    /// Ordered by `ChannelTag` display order.
    #[serde(default)]
    pub channels: BTreeSet<ChannelTag>,
}

impl Contact {
    /// Creates a contact with placeholder avatar and no channels.
    pub fn new(given_name: impl Into<String>, family_name: impl Into<String>) -> Self {
        Self {
            given_name: given_name.into(),
            family_name: family_name.into(),
            avatar: Avatar::Placeholder,
            phone: None,
            email: None,
            channels: BTreeSet::new(),
        }
    }

    /// Sets the phone number and returns the contact.
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    /// Sets the email address and returns the contact.
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Adds channel tags and returns the contact.
    pub fn with_channels(mut self, channels: impl IntoIterator<Item = ChannelTag>) -> Self {
        self.channels.extend(channels);
        self
    }

    pub fn with_avatar(mut self, avatar: Avatar) -> Self {
        self.avatar = avatar;
        self
    }

    /// Whether the contact carries `tag`.
    pub fn has_channel(&self, tag: ChannelTag) -> bool {
        self.channels.contains(&tag)
    }

    /// Display name as `given family`, skipping empty parts.
    pub fn display_name(&self) -> String {
        [self.given_name.trim(), self.family_name.trim()]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// A loaded contact paired with its store-assigned identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactRecord {
    pub id: ContactId,
    pub contact: Contact,
}

impl ContactRecord {
    pub fn new(contact: Contact) -> Self {
        Self {
            id: Uuid::new_v4(),
            contact,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_channel_tag, Avatar, ChannelTag, ChannelTagParseError, Contact};

    #[test]
    fn channel_tags_parse_from_their_ids() {
        for tag in ChannelTag::ALL {
            assert_eq!(parse_channel_tag(tag.as_str()), Ok(tag));
        }
        assert_eq!(parse_channel_tag(" WhatsApp "), Ok(ChannelTag::WhatsApp));
    }

    #[test]
    fn channel_tag_parse_rejects_empty_and_unknown() {
        assert_eq!(parse_channel_tag("  "), Err(ChannelTagParseError::Empty));
        assert_eq!(
            parse_channel_tag("icq"),
            Err(ChannelTagParseError::Unsupported("icq".to_string()))
        );
    }

    #[test]
    fn channel_tag_order_matches_display_order() {
        let mut shuffled = vec![ChannelTag::Email, ChannelTag::Telegram, ChannelTag::Phone];
        shuffled.sort();
        assert_eq!(
            shuffled,
            vec![ChannelTag::Telegram, ChannelTag::Phone, ChannelTag::Email]
        );
    }

    #[test]
    fn avatar_from_empty_thumbnail_is_placeholder() {
        assert!(Avatar::from_thumbnail(None).is_placeholder());
        assert!(Avatar::from_thumbnail(Some(Vec::new())).is_placeholder());
        assert!(!Avatar::from_thumbnail(Some(vec![1, 2])).is_placeholder());
    }

    #[test]
    fn display_name_skips_blank_parts() {
        assert_eq!(Contact::new("Ann", "Lee").display_name(), "Ann Lee");
        assert_eq!(Contact::new("", "Lee").display_name(), "Lee");
    }
}
