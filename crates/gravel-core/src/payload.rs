//! Outbound command payloads and keyboard builders.
//!
//! Everything here is pure data construction; the transport serializes these
//! structures as the JSON body of `sendMessage` and friends.

use serde::Serialize;

use crate::domain::{ChatId, ChatTarget};

/// Body of a `sendMessage` call.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SendMessage {
    pub chat_id: ChatTarget,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_markup: Option<ReplyMarkup>,
}

/// Body of an `answerCallbackQuery` call.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AnswerCallbackQuery {
    pub callback_query_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ReplyMarkup {
    Remove(ReplyKeyboardRemove),
    Keyboard(ReplyKeyboardMarkup),
    Inline(InlineKeyboardMarkup),
}

/// Tells the client to drop whatever reply keyboard the chat currently shows.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ReplyKeyboardRemove {
    remove_keyboard: bool,
}

impl Default for ReplyKeyboardRemove {
    fn default() -> Self {
        Self {
            remove_keyboard: true,
        }
    }
}

/// Reply keyboard that replaces the user's input field for the whole chat.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ReplyKeyboardMarkup {
    pub resize_keyboard: bool,
    pub keyboard: Vec<Vec<KeyboardButton>>,
}

impl ReplyKeyboardMarkup {
    pub fn new(keyboard: Vec<Vec<KeyboardButton>>) -> Self {
        Self {
            resize_keyboard: true,
            keyboard,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct KeyboardButton {
    pub text: String,
}

impl KeyboardButton {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Keyboard attached to a single message; presses arrive as callback queries.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct InlineKeyboardMarkup {
    pub inline_keyboard: Vec<Vec<InlineKeyboardButton>>,
}

impl InlineKeyboardMarkup {
    pub fn new(inline_keyboard: Vec<Vec<InlineKeyboardButton>>) -> Self {
        Self { inline_keyboard }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct InlineKeyboardButton {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub callback_data: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl InlineKeyboardButton {
    /// Button that sends `data` back as an opaque callback token.
    pub fn callback(label: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            text: label.into(),
            callback_data: Some(data.into()),
            url: None,
        }
    }

    /// Button that opens `url` instead of producing a callback.
    pub fn url(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            text: label.into(),
            callback_data: None,
            url: Some(url.into()),
        }
    }
}

/// Collect buttons into a row. Empty rows are passed through unchanged.
pub fn keyboard_row<B>(buttons: impl IntoIterator<Item = B>) -> Vec<B> {
    buttons.into_iter().collect()
}

/// Collect rows into a grid. An empty grid is valid.
pub fn keyboard_grid<B>(rows: impl IntoIterator<Item = Vec<B>>) -> Vec<Vec<B>> {
    rows.into_iter().collect()
}

/// Plain text message that also clears any reply keyboard left in the chat.
pub fn plain_message(chat_id: ChatId, text: impl Into<String>) -> SendMessage {
    SendMessage {
        chat_id: chat_id.into(),
        text: text.into(),
        reply_markup: Some(ReplyMarkup::Remove(ReplyKeyboardRemove::default())),
    }
}

pub fn message_with_reply_keyboard(
    chat_id: ChatId,
    text: impl Into<String>,
    keyboard: ReplyKeyboardMarkup,
) -> SendMessage {
    SendMessage {
        chat_id: chat_id.into(),
        text: text.into(),
        reply_markup: Some(ReplyMarkup::Keyboard(keyboard)),
    }
}

pub fn message_with_inline_keyboard(
    chat_id: ChatId,
    text: impl Into<String>,
    keyboard: InlineKeyboardMarkup,
) -> SendMessage {
    SendMessage {
        chat_id: chat_id.into(),
        text: text.into(),
        reply_markup: Some(ReplyMarkup::Inline(keyboard)),
    }
}

/// Channel post addressed by `@username` or numeric id string; carries no markup.
pub fn channel_message(channel_id: &str, text: impl Into<String>) -> SendMessage {
    SendMessage {
        chat_id: ChatTarget::Username(channel_id.to_string()),
        text: text.into(),
        reply_markup: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn plain_message_clears_keyboard() {
        let v = serde_json::to_value(plain_message(ChatId(42), "hi")).unwrap();
        assert_eq!(
            v,
            json!({"chat_id": 42, "text": "hi", "reply_markup": {"remove_keyboard": true}})
        );
    }

    #[test]
    fn reply_keyboard_is_resized_grid_of_text_buttons() {
        let grid = keyboard_grid([
            keyboard_row([KeyboardButton::new("Yes"), KeyboardButton::new("No")]),
            keyboard_row([KeyboardButton::new("Maybe")]),
        ]);
        let msg = message_with_reply_keyboard(ChatId(1), "pick", ReplyKeyboardMarkup::new(grid));
        let v = serde_json::to_value(msg).unwrap();
        assert_eq!(
            v["reply_markup"],
            json!({
                "resize_keyboard": true,
                "keyboard": [[{"text": "Yes"}, {"text": "No"}], [{"text": "Maybe"}]]
            })
        );
    }

    #[test]
    fn inline_keyboard_carries_callback_tokens() {
        let kb = InlineKeyboardMarkup::new(keyboard_grid([keyboard_row([
            InlineKeyboardButton::callback("Red", "color:red"),
            InlineKeyboardButton::url("Docs", "https://core.telegram.org/bots/api"),
        ])]));
        let v = serde_json::to_value(message_with_inline_keyboard(ChatId(9), "t", kb)).unwrap();
        assert_eq!(
            v["reply_markup"],
            json!({"inline_keyboard": [[
                {"text": "Red", "callback_data": "color:red"},
                {"text": "Docs", "url": "https://core.telegram.org/bots/api"}
            ]]})
        );
    }

    #[test]
    fn empty_rows_and_grids_pass_through() {
        let empty: Vec<Vec<KeyboardButton>> = keyboard_grid(Vec::new());
        assert!(empty.is_empty());

        let grid = keyboard_grid([keyboard_row(Vec::<KeyboardButton>::new())]);
        let v = serde_json::to_value(ReplyKeyboardMarkup::new(grid)).unwrap();
        assert_eq!(v, json!({"resize_keyboard": true, "keyboard": [[]]}));
    }

    #[test]
    fn channel_message_has_no_markup() {
        let v = serde_json::to_value(channel_message("@news", "hello")).unwrap();
        assert_eq!(v, json!({"chat_id": "@news", "text": "hello"}));
    }
}
