//! reqwest-backed [`HttpBackend`] for gravel.

use std::time::Duration;

use async_trait::async_trait;

use gravel_core::{
    errors::Error,
    transport::{HttpBackend, HttpRequest, HttpResponse, Method},
    Result,
};

#[derive(Clone, Debug)]
pub struct ReqwestBackend {
    http: reqwest::Client,
}

impl ReqwestBackend {
    /// `timeout` bounds the whole round-trip, including a long-poll wait.
    pub fn new(timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Config(format!("failed to build http client: {e}")))?;
        Ok(Self { http })
    }
}

#[async_trait]
impl HttpBackend for ReqwestBackend {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse> {
        let builder = match req.method {
            Method::Get => self.http.get(&req.url),
            Method::Post => self.http.post(&req.url),
        };
        let builder = match req.body {
            Some(body) => builder
                .header(reqwest::header::CONTENT_TYPE, "application/json")
                .body(body),
            None => builder,
        };

        let resp = builder.send().await.map_err(map_err)?;
        let status = resp.status().as_u16();
        let body = resp.bytes().await.map_err(map_err)?;

        Ok(HttpResponse {
            status,
            body: body.to_vec(),
        })
    }
}

// reqwest errors embed the request URL, which carries the bot token.
fn map_err(e: reqwest::Error) -> Error {
    let kind = if e.is_timeout() {
        "timed out"
    } else if e.is_connect() {
        "connection failed"
    } else if e.is_body() || e.is_decode() {
        "failed to read response body"
    } else {
        "request failed"
    };
    Error::Transport(format!("{kind}: {}", e.without_url()))
}

#[cfg(test)]
mod tests {
    use tokio::{
        io::{AsyncReadExt, AsyncWriteExt},
        net::TcpListener,
    };

    use gravel_core::ErrorKind;

    use super::*;

    /// Serve exactly one canned HTTP response and return the raw request.
    async fn serve_once(
        status_line: &'static str,
        body: &'static str,
    ) -> (String, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            let (mut sock, _) = listener.accept().await.unwrap();
            let mut buf = vec![0u8; 8192];
            let n = sock.read(&mut buf).await.unwrap();
            let resp = format!(
                "HTTP/1.1 {status_line}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            sock.write_all(resp.as_bytes()).await.unwrap();
            sock.shutdown().await.unwrap();
            String::from_utf8_lossy(&buf[..n]).into_owned()
        });
        (format!("http://{addr}"), handle)
    }

    #[tokio::test]
    async fn non_success_status_and_body_are_passed_through() {
        let (base, server) = serve_once("429 Too Many Requests", r#"{"ok":false}"#).await;
        let backend = ReqwestBackend::new(Duration::from_secs(5)).unwrap();

        let resp = backend
            .send(HttpRequest {
                method: Method::Get,
                url: format!("{base}/botT/getUpdates?offset=10"),
                body: None,
            })
            .await
            .unwrap();

        assert_eq!(resp.status, 429);
        assert_eq!(resp.body, br#"{"ok":false}"#.to_vec());

        let raw = server.await.unwrap();
        assert!(raw.starts_with("GET /botT/getUpdates?offset=10 HTTP/1.1"));
    }

    #[tokio::test]
    async fn post_sends_json_content_type() {
        let (base, server) = serve_once("200 OK", r#"{"ok":true,"result":true}"#).await;
        let backend = ReqwestBackend::new(Duration::from_secs(5)).unwrap();

        let resp = backend
            .send(HttpRequest {
                method: Method::Post,
                url: format!("{base}/botT/sendMessage"),
                body: Some(br#"{"chat_id":1,"text":"hi"}"#.to_vec()),
            })
            .await
            .unwrap();
        assert_eq!(resp.status, 200);

        let raw = server.await.unwrap().to_lowercase();
        assert!(raw.starts_with("post /bott/sendmessage http/1.1"));
        assert!(raw.contains("content-type: application/json"));
    }

    #[tokio::test]
    async fn refused_connection_is_transport_error_without_token() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let backend = ReqwestBackend::new(Duration::from_secs(5)).unwrap();
        let err = backend
            .send(HttpRequest {
                method: Method::Get,
                url: format!("http://{addr}/bot123:secret/getMe"),
                body: None,
            })
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Transport);
        assert!(!err.to_string().contains("secret"));
    }
}
