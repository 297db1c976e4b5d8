//! Business profile settings that travel together with working hours:
//! location and the recipient filters used by business automations.

use enumset::{EnumSet, EnumSetType};
use serde::{Deserialize, Serialize};

use crate::hours::WorkingHours;

/// Kinds of private chats a business automation can target.
#[derive(Debug, EnumSetType)]
pub enum BusinessChatType {
    /// Chats started for the first time.
    NewChats,
    /// Chats that already have history.
    ExistingChats,
    /// Chats with users in the contact list.
    Contacts,
    /// Chats with users outside the contact list.
    NonContacts,
}

pub type BusinessChatTypes = EnumSet<BusinessChatType>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub u64);

/// What an automation knows about the chat it is deciding on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChatContext {
    pub user: UserId,
    pub is_new: bool,
    pub is_contact: bool,
}

impl ChatContext {
    /// The chat types describing this chat: always one of new/existing and
    /// one of contact/non-contact.
    pub fn types(&self) -> BusinessChatTypes {
        let history = if self.is_new {
            BusinessChatType::NewChats
        } else {
            BusinessChatType::ExistingChats
        };
        let relation = if self.is_contact {
            BusinessChatType::Contacts
        } else {
            BusinessChatType::NonContacts
        };
        history | relation
    }
}

/// A selection of chats: whole categories plus individually picked users.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BusinessChats {
    #[serde(default)]
    pub types: BusinessChatTypes,
    #[serde(default)]
    pub list: Vec<UserId>,
}

impl BusinessChats {
    pub fn matches(&self, chat: &ChatContext) -> bool {
        self.list.contains(&chat.user) || !self.types.is_disjoint(chat.types())
    }
}

/// Who an automation applies to.
///
/// With `all_but_excluded` every chat not matching `excluded` is a recipient;
/// otherwise only chats matching `included` are.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BusinessRecipients {
    #[serde(default)]
    pub included: BusinessChats,
    #[serde(default)]
    pub excluded: BusinessChats,
    #[serde(default)]
    pub all_but_excluded: bool,
}

impl BusinessRecipients {
    pub fn includes(&self, chat: &ChatContext) -> bool {
        if self.all_but_excluded {
            !self.excluded.matches(chat)
        } else {
            self.included.matches(chat)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LocationPoint {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BusinessLocation {
    pub address: String,
    #[serde(default)]
    pub point: Option<LocationPoint>,
}

impl BusinessLocation {
    pub fn is_set(&self) -> bool {
        !self.address.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BusinessDetails {
    #[serde(default)]
    pub hours: WorkingHours,
    #[serde(default)]
    pub location: BusinessLocation,
}

impl BusinessDetails {
    pub fn is_set(&self) -> bool {
        self.hours.is_set() || self.location.is_set()
    }
}
