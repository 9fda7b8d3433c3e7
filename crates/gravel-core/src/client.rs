//! Bot API client: outbound commands plus the update poller.

use std::{fmt, sync::Arc};

use serde::de::DeserializeOwned;

use crate::{
    config::Config,
    cursor::Cursor,
    domain::ChatId,
    envelope,
    payload::{self, AnswerCallbackQuery, InlineKeyboardMarkup, ReplyKeyboardMarkup, SendMessage},
    transport::{HttpBackend, Transport},
    types::{Chat, Message, Update, User},
    Result,
};

pub const DEFAULT_API_URL: &str = "https://api.telegram.org";

#[derive(Clone, Debug)]
pub struct ClientOptions {
    /// Service root without the `/bot<token>` suffix.
    pub api_base_url: String,
    /// Emit outbound payloads and inbound status/body through `tracing`.
    pub log_traffic: bool,
    /// Long-poll window in seconds passed as `timeout` to `getUpdates`.
    pub long_poll_timeout: Option<u32>,
    pub initial_offset: i64,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            log_traffic: false,
            long_poll_timeout: None,
            initial_offset: 0,
        }
    }
}

impl From<&Config> for ClientOptions {
    fn from(cfg: &Config) -> Self {
        Self {
            api_base_url: cfg.api_base_url.clone(),
            log_traffic: cfg.log_traffic,
            long_poll_timeout: cfg.long_poll_timeout,
            initial_offset: cfg.initial_offset,
        }
    }
}

/// Telegram Bot API client.
///
/// Send operations take `&self`; [`Client::get_updates`] takes `&mut self`, so
/// the borrow checker guarantees one in-flight poll per client.
pub struct Client {
    base_url: String,
    transport: Transport,
    cursor: Cursor,
    long_poll_timeout: Option<u32>,
}

impl Client {
    pub fn new(token: &str, backend: Arc<dyn HttpBackend>, opts: ClientOptions) -> Self {
        let root = opts.api_base_url.trim_end_matches('/');
        Self {
            base_url: format!("{root}/bot{token}"),
            transport: Transport::new(backend, opts.log_traffic),
            cursor: Cursor::new(opts.initial_offset),
            long_poll_timeout: opts.long_poll_timeout,
        }
    }

    /// Next `update_id` the poller will ask for.
    pub fn offset(&self) -> i64 {
        self.cursor.current()
    }

    fn url(&self, method: &str) -> String {
        format!("{}/{method}", self.base_url)
    }

    /// Fetch the next batch of updates and move the cursor past it.
    ///
    /// An empty batch is not an error. On any failure the cursor is left
    /// untouched, so the call can simply be repeated.
    pub async fn get_updates(&mut self) -> Result<Vec<Update>> {
        let mut url = format!("{}?offset={}", self.url("getUpdates"), self.cursor.current());
        if let Some(t) = self.long_poll_timeout {
            url.push_str(&format!("&timeout={t}"));
        }

        let raw = self.transport.get("getUpdates", url).await?;
        let updates: Vec<Update> = envelope::decode(&raw)?;
        self.cursor.advance(&updates);

        tracing::debug!(count = updates.len(), offset = self.cursor.current(), "fetched updates");
        Ok(updates)
    }

    /// Plain text message; clears any reply keyboard in the chat.
    pub async fn send_message(&self, chat_id: ChatId, text: &str) -> Result<Message> {
        self.send(&payload::plain_message(chat_id, text)).await
    }

    pub async fn send_markup(
        &self,
        chat_id: ChatId,
        text: &str,
        keyboard: ReplyKeyboardMarkup,
    ) -> Result<Message> {
        self.send(&payload::message_with_reply_keyboard(chat_id, text, keyboard))
            .await
    }

    pub async fn send_inline_keyboard(
        &self,
        chat_id: ChatId,
        text: &str,
        keyboard: InlineKeyboardMarkup,
    ) -> Result<Message> {
        self.send(&payload::message_with_inline_keyboard(chat_id, text, keyboard))
            .await
    }

    pub async fn send_message_to_channel(&self, channel_id: &str, text: &str) -> Result<Message> {
        self.send(&payload::channel_message(channel_id, text)).await
    }

    async fn send(&self, msg: &SendMessage) -> Result<Message> {
        let raw = self
            .transport
            .post("sendMessage", self.url("sendMessage"), msg)
            .await?;
        envelope::decode(&raw)
    }

    /// Stop the loading indicator on an inline button press.
    pub async fn answer_callback_query(&self, callback_id: &str, text: Option<&str>) -> Result<()> {
        let body = AnswerCallbackQuery {
            callback_query_id: callback_id.to_string(),
            text: text.map(str::to_string),
        };
        let raw = self
            .transport
            .post("answerCallbackQuery", self.url("answerCallbackQuery"), &body)
            .await?;
        let _: bool = envelope::decode(&raw)?;
        Ok(())
    }

    /// The bot's own account.
    pub async fn get_me(&self) -> Result<User> {
        self.fetch("getMe", self.url("getMe")).await
    }

    pub async fn get_chat(&self, chat_id: ChatId) -> Result<Chat> {
        let url = format!("{}?chat_id={chat_id}", self.url("getChat"));
        self.fetch("getChat", url).await
    }

    /// `getChat` projected onto the user fields of a private chat.
    pub async fn get_user_info(&self, chat_id: ChatId) -> Result<User> {
        let user = User::from(self.get_chat(chat_id).await?);
        tracing::debug!(user_id = user.id, "fetched user info");
        Ok(user)
    }

    async fn fetch<T: DeserializeOwned>(&self, label: &str, url: String) -> Result<T> {
        let raw = self.transport.get(label, url).await?;
        envelope::decode(&raw)
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("cursor", &self.cursor)
            .field("long_poll_timeout", &self.long_poll_timeout)
            .finish_non_exhaustive()
    }
}
