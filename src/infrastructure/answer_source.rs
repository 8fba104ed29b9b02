//! Answer service client
//!
//! Provides a common interface over the upstream streaming answer service
//! so the ask handler can pump lines without knowing the transport.

use async_trait::async_trait;
use futures::StreamExt;
use thiserror::Error;
use tokio::sync::mpsc;

use crate::domain::models::AskRequest;

/// Errors that can occur while streaming an answer
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Failed to reach answer service: {0}")]
    ConnectFailed(String),

    #[error("Answer service returned {status}")]
    UpstreamStatus { status: u16, body: String },

    #[error("Stream read error: {0}")]
    ReadError(String),
}

/// A live answer stream yielding raw NDJSON lines
pub struct AnswerStream {
    pub(crate) line_rx: mpsc::Receiver<Result<String, SourceError>>,
}

impl AnswerStream {
    pub fn from_channel(line_rx: mpsc::Receiver<Result<String, SourceError>>) -> Self {
        Self { line_rx }
    }

    /// Receive the next line from the stream
    pub async fn recv(&mut self) -> Option<Result<String, SourceError>> {
        self.line_rx.recv().await
    }
}

/// Trait for answer sources
#[async_trait]
pub trait AnswerSource: Send + Sync {
    /// Start streaming an answer for the given request
    async fn stream_answer(&self, request: AskRequest) -> Result<AnswerStream, SourceError>;
}

/// Production source: the upstream HTTP answer service
#[derive(Clone)]
pub struct HttpAnswerSource {
    url: String,
    api_key: Option<String>,
    client: reqwest::Client,
}

impl HttpAnswerSource {
    pub fn new(url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            url: url.into(),
            api_key,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl AnswerSource for HttpAnswerSource {
    async fn stream_answer(&self, request: AskRequest) -> Result<AnswerStream, SourceError> {
        let mut builder = self.client.post(&self.url).json(&request);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| SourceError::ConnectFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SourceError::UpstreamStatus {
                status: status.as_u16(),
                body,
            });
        }

        // Split the byte stream into NDJSON lines
        let (tx, rx) = mpsc::channel::<Result<String, SourceError>>(100);
        let mut bytes = response.bytes_stream();

        tokio::spawn(async move {
            let mut buffer = String::new();

            while let Some(chunk) = bytes.next().await {
                match chunk {
                    Ok(data) => {
                        buffer.push_str(&String::from_utf8_lossy(&data));
                        while let Some(pos) = buffer.find('\n') {
                            let line = buffer[..pos].trim().to_string();
                            buffer.drain(..=pos);
                            if line.is_empty() {
                                continue;
                            }
                            if tx.send(Ok(line)).await.is_err() {
                                return;
                            }
                        }
                    }
                    Err(e) => {
                        let _ = tx.send(Err(SourceError::ReadError(e.to_string()))).await;
                        return;
                    }
                }
            }

            // Flush a trailing line that arrived without a newline
            let line = buffer.trim().to_string();
            if !line.is_empty() {
                let _ = tx.send(Ok(line)).await;
            }
        });

        Ok(AnswerStream::from_channel(rx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_answer_stream_yields_lines_in_order() {
        let (tx, rx) = mpsc::channel(10);
        tx.send(Ok("first".to_string())).await.unwrap();
        tx.send(Ok("second".to_string())).await.unwrap();
        drop(tx);

        let mut stream = AnswerStream::from_channel(rx);
        assert_eq!(stream.recv().await.unwrap().unwrap(), "first");
        assert_eq!(stream.recv().await.unwrap().unwrap(), "second");
        assert!(stream.recv().await.is_none());
    }

    #[tokio::test]
    async fn test_answer_stream_surfaces_read_errors() {
        let (tx, rx) = mpsc::channel(10);
        tx.send(Err(SourceError::ReadError("connection reset".to_string())))
            .await
            .unwrap();
        drop(tx);

        let mut stream = AnswerStream::from_channel(rx);
        match stream.recv().await.unwrap() {
            Err(SourceError::ReadError(msg)) => assert!(msg.contains("connection reset")),
            other => panic!("unexpected item: {:?}", other.map(|_| ())),
        }
    }
}
