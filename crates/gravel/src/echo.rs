//! Demo handler: echoes text and shows off both keyboard kinds.

use gravel_core::{
    domain::ChatId,
    payload::{
        keyboard_grid, keyboard_row, InlineKeyboardButton, InlineKeyboardMarkup, KeyboardButton,
        ReplyKeyboardMarkup,
    },
    types::{Update, UpdateKind},
    Client, Result,
};

/// What the bot should do in response to one update.
#[derive(Clone, Debug, PartialEq)]
pub enum Reply {
    Text {
        chat_id: ChatId,
        text: String,
    },
    Keyboard {
        chat_id: ChatId,
        text: String,
        keyboard: ReplyKeyboardMarkup,
    },
    Inline {
        chat_id: ChatId,
        text: String,
        keyboard: InlineKeyboardMarkup,
    },
    Callback {
        callback_id: String,
        chat_id: Option<ChatId>,
        data: String,
    },
}

pub fn reply_for(update: &Update) -> Option<Reply> {
    match update.kind() {
        UpdateKind::Message(msg) => {
            let text = msg.text.as_deref()?;
            let chat_id = msg.chat.id;
            let reply = match text.split_whitespace().next().unwrap_or("") {
                "/start" => Reply::Text {
                    chat_id,
                    text: "Hi! Send me anything and I'll echo it. Try /keyboard or /inline."
                        .to_string(),
                },
                "/keyboard" => Reply::Keyboard {
                    chat_id,
                    text: "Pick one:".to_string(),
                    keyboard: ReplyKeyboardMarkup::new(keyboard_grid([
                        keyboard_row([KeyboardButton::new("Yes"), KeyboardButton::new("No")]),
                        keyboard_row([KeyboardButton::new("Maybe")]),
                    ])),
                },
                "/inline" => Reply::Inline {
                    chat_id,
                    text: "Pick a colour:".to_string(),
                    keyboard: InlineKeyboardMarkup::new(keyboard_grid([keyboard_row([
                        InlineKeyboardButton::callback("Red", "colour:red"),
                        InlineKeyboardButton::callback("Blue", "colour:blue"),
                    ])])),
                },
                _ => Reply::Text {
                    chat_id,
                    text: text.to_string(),
                },
            };
            Some(reply)
        }
        UpdateKind::CallbackQuery(q) => Some(Reply::Callback {
            callback_id: q.id.clone(),
            chat_id: q.message.as_ref().map(|m| m.chat.id),
            data: q.data.clone().unwrap_or_default(),
        }),
        UpdateKind::EditedMessage(_) | UpdateKind::ChannelPost(_) | UpdateKind::Other => None,
    }
}

pub async fn dispatch(client: &Client, reply: Reply) -> Result<()> {
    match reply {
        Reply::Text { chat_id, text } => {
            client.send_message(chat_id, &text).await?;
        }
        Reply::Keyboard {
            chat_id,
            text,
            keyboard,
        } => {
            client.send_markup(chat_id, &text, keyboard).await?;
        }
        Reply::Inline {
            chat_id,
            text,
            keyboard,
        } => {
            client.send_inline_keyboard(chat_id, &text, keyboard).await?;
        }
        Reply::Callback {
            callback_id,
            chat_id,
            data,
        } => {
            client.answer_callback_query(&callback_id, None).await?;
            if let Some(chat_id) = chat_id {
                client
                    .send_message(chat_id, &format!("You chose {data}"))
                    .await?;
            }
        }
    }
    Ok(())
}
