//! Inbound Bot API objects.
//!
//! Only the fields the client reads are modelled; everything else in the
//! service's JSON is ignored so new Bot API fields never break decoding.

use serde::Deserialize;

use crate::domain::ChatId;

/// One inbound event from `getUpdates`.
///
/// `update_id` is unique and increases across updates; the remaining fields
/// are mutually exclusive variant bodies.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Update {
    pub update_id: i64,
    #[serde(default)]
    pub message: Option<Message>,
    #[serde(default)]
    pub edited_message: Option<Message>,
    #[serde(default)]
    pub channel_post: Option<Message>,
    #[serde(default)]
    pub callback_query: Option<CallbackQuery>,
}

/// Borrowed view of an update's body.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum UpdateKind<'a> {
    Message(&'a Message),
    EditedMessage(&'a Message),
    ChannelPost(&'a Message),
    CallbackQuery(&'a CallbackQuery),
    /// A variant this client does not model (polls, joins, reactions...).
    Other,
}

impl Update {
    pub fn kind(&self) -> UpdateKind<'_> {
        if let Some(m) = &self.message {
            UpdateKind::Message(m)
        } else if let Some(m) = &self.edited_message {
            UpdateKind::EditedMessage(m)
        } else if let Some(m) = &self.channel_post {
            UpdateKind::ChannelPost(m)
        } else if let Some(q) = &self.callback_query {
            UpdateKind::CallbackQuery(q)
        } else {
            UpdateKind::Other
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Message {
    pub message_id: i64,
    #[serde(default)]
    pub from: Option<User>,
    pub chat: Chat,
    #[serde(default)]
    pub date: i64,
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Chat {
    pub id: ChatId,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct User {
    pub id: i64,
    #[serde(default)]
    pub is_bot: bool,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
}

impl From<Chat> for User {
    fn from(chat: Chat) -> Self {
        Self {
            id: chat.id.0,
            is_bot: false,
            first_name: chat.first_name.unwrap_or_default(),
            last_name: chat.last_name,
            username: chat.username,
        }
    }
}

/// A press on an inline keyboard button.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct CallbackQuery {
    pub id: String,
    pub from: User,
    #[serde(default)]
    pub message: Option<Message>,
    /// Opaque token attached by [`crate::payload::InlineKeyboardButton::callback`].
    #[serde(default)]
    pub data: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_kind_picks_present_body_and_ignores_unknown_fields() {
        let raw = r#"{
            "update_id": 7,
            "message": {
                "message_id": 1,
                "date": 1700000000,
                "chat": {"id": 42, "type": "private", "first_name": "Ada"},
                "from": {"id": 42, "is_bot": false, "first_name": "Ada"},
                "text": "hi",
                "entities": []
            },
            "something_new": {"x": 1}
        }"#;
        let u: Update = serde_json::from_str(raw).unwrap();
        match u.kind() {
            UpdateKind::Message(m) => {
                assert_eq!(m.chat.id, ChatId(42));
                assert_eq!(m.text.as_deref(), Some("hi"));
            }
            other => panic!("unexpected kind: {other:?}"),
        }
    }

    #[test]
    fn update_without_modelled_body_is_other() {
        let u: Update =
            serde_json::from_str(r#"{"update_id": 3, "poll": {"id": "p"}}"#).unwrap();
        assert_eq!(u.kind(), UpdateKind::Other);
    }

    #[test]
    fn chat_projects_into_user() {
        let chat: Chat = serde_json::from_str(
            r#"{"id": 5, "type": "private", "first_name": "Grace", "last_name": "Hopper", "username": "gh"}"#,
        )
        .unwrap();
        let user = User::from(chat);
        assert_eq!(user.id, 5);
        assert_eq!(user.first_name, "Grace");
        assert_eq!(user.last_name.as_deref(), Some("Hopper"));
        assert_eq!(user.username.as_deref(), Some("gh"));
    }
}
