use std::sync::Arc;

use anyhow::Context;
use tokio_util::sync::CancellationToken;

use gravel_core::{config::Config, Client, ClientOptions};
use gravel_http::ReqwestBackend;

mod echo;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    gravel_core::logging::init("gravel")?;

    let cfg = Config::load()?;
    let backend = Arc::new(ReqwestBackend::new(cfg.request_timeout)?);
    let mut client = Client::new(&cfg.bot_token, backend, ClientOptions::from(&cfg));

    let me = client.get_me().await.context("getMe failed")?;
    tracing::info!(
        bot = me.username.as_deref().unwrap_or(&me.first_name),
        offset = client.offset(),
        "polling for updates"
    );

    let cancel = CancellationToken::new();
    tokio::spawn({
        let cancel = cancel.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                cancel.cancel();
            }
        }
    });

    loop {
        let polled = tokio::select! {
            _ = cancel.cancelled() => break,
            r = client.get_updates() => r,
        };

        let updates = match polled {
            Ok(u) => u,
            Err(e) => {
                tracing::warn!(error = %e, offset = client.offset(), "poll failed");
                Vec::new()
            }
        };

        if updates.is_empty() {
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = tokio::time::sleep(cfg.poll_interval) => {}
            }
            continue;
        }

        for update in &updates {
            let Some(reply) = echo::reply_for(update) else {
                continue;
            };
            if let Err(e) = echo::dispatch(&client, reply).await {
                tracing::warn!(update_id = update.update_id, error = %e, "reply failed");
            }
        }
    }

    tracing::info!(offset = client.offset(), "shutting down");
    Ok(())
}
