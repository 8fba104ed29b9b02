//! Streaming ask handler
//!
//! Forwards a question to the upstream answer service and re-emits its
//! NDJSON events. Every line is re-validated as a StreamEvent before it is
//! sent to the client; the stream always terminates with `complete` or
//! `error`.

use axum::{
    body::Body,
    extract::Json,
    http::{HeaderMap, StatusCode},
    response::Response,
    Extension,
};
use serde::Deserialize;
use std::sync::Arc;
use tokio_stream::wrappers::ReceiverStream;
use uuid::Uuid;

use super::auth::require_bearer;
use super::require_field;
use crate::domain::models::{AskRequest, HistoryEntry, QuestionKind, StreamEvent};
use crate::infrastructure::answer_source::{AnswerSource, HttpAnswerSource, SourceError};
use crate::shared::constants::MAX_HISTORY_MESSAGES;
use crate::shared::logging::{
    log_answer_stream_complete, log_answer_stream_error, log_answer_stream_start,
};

/// Ask request payload (fields optional so validation can answer 400)
#[derive(Debug, Deserialize)]
pub struct AskBody {
    #[serde(default)]
    pub question: Option<String>,
    #[serde(default)]
    pub kind: Option<QuestionKind>,
    #[serde(default)]
    pub history: Vec<HistoryEntry>,
    #[serde(default)]
    pub specialties: Vec<String>,
}

/// Ask handler application state
#[derive(Clone)]
pub struct AnswerServiceState {
    pub source: Arc<dyn AnswerSource>,
}

impl AnswerServiceState {
    pub fn new(url: &str, api_key: Option<String>) -> Self {
        Self {
            source: Arc::new(HttpAnswerSource::new(url, api_key)),
        }
    }

    pub fn with_source(source: Arc<dyn AnswerSource>) -> Self {
        Self { source }
    }
}

/// POST /api/ask
/// Stream a cited answer for one question
pub async fn ask_handler(
    Extension(state): Extension<AnswerServiceState>,
    headers: HeaderMap,
    Json(body): Json<AskBody>,
) -> Result<Response, (StatusCode, String)> {
    require_bearer(&headers)
        .map_err(|status| (status, "Missing bearer identity".to_string()))?;

    let question = require_field(body.question, "question")?;
    let kind = body.kind.unwrap_or_default();

    let request_id = Uuid::new_v4().to_string();
    log_answer_stream_start(&request_id, kind.as_str(), question.chars().count());

    let mut request = AskRequest::new(question)
        .with_kind(kind)
        .with_history(body.history)
        .with_specialties(body.specialties);
    request.cap_history(MAX_HISTORY_MESSAGES);

    let mut upstream = state
        .source
        .stream_answer(request)
        .await
        .map_err(map_source_error)?;

    // Create response stream
    let (tx, rx) = tokio::sync::mpsc::channel::<Result<String, std::io::Error>>(100);

    // Spawn task to pump upstream events to the client
    let req_id_clone = request_id.clone();
    tokio::spawn(async move {
        let mut chunk_count = 0usize;
        let mut terminated = false;

        while let Some(result) = upstream.recv().await {
            match result {
                Ok(line) => {
                    let Some(event) = revalidate_line(&line) else {
                        tracing::warn!(
                            request_id = %req_id_clone,
                            "Skipping malformed stream line: {}",
                            line
                        );
                        continue;
                    };

                    if matches!(event, StreamEvent::Chunk { .. }) {
                        chunk_count += 1;
                    }
                    terminated = matches!(
                        event,
                        StreamEvent::Complete { .. } | StreamEvent::Error { .. }
                    );

                    if let Ok(ndjson) = event.to_ndjson() {
                        if tx.send(Ok(format!("{}\n", ndjson))).await.is_err() {
                            tracing::debug!(request_id = %req_id_clone, "Client disconnected");
                            return;
                        }
                    }

                    if terminated {
                        break;
                    }
                }
                Err(e) => {
                    log_answer_stream_error(&req_id_clone, &e.to_string());
                    if let Ok(ndjson) = StreamEvent::error(e.to_string()).to_ndjson() {
                        let _ = tx.send(Ok(format!("{}\n", ndjson))).await;
                    }
                    terminated = true;
                    break;
                }
            }
        }

        // Upstream closed without a terminal event
        if !terminated {
            let event = StreamEvent::error("Answer service ended the stream prematurely");
            if let Ok(ndjson) = event.to_ndjson() {
                let _ = tx.send(Ok(format!("{}\n", ndjson))).await;
            }
        }

        log_answer_stream_complete(&req_id_clone, chunk_count);
    });

    // Build streaming response
    let stream = ReceiverStream::new(rx);
    let body = Body::from_stream(stream);

    let response = Response::builder()
        .status(StatusCode::OK)
        .header("Content-Type", "application/x-ndjson")
        .header("Transfer-Encoding", "chunked")
        .header("X-Request-Id", request_id)
        .header("Cache-Control", "no-cache")
        .body(body)
        .map_err(|e| {
            tracing::error!("Failed to build response: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to build response".to_string(),
            )
        })?;

    Ok(response)
}

/// Parse one upstream line back into a stream event.
/// Lines that do not speak the protocol are dropped by the pump.
fn revalidate_line(line: &str) -> Option<StreamEvent> {
    serde_json::from_str(line).ok()
}

/// 502 when the service cannot be reached, 503 when it failed before any
/// event was emitted; its 4xx statuses and bodies pass through
fn map_source_error(error: SourceError) -> (StatusCode, String) {
    match error {
        SourceError::ConnectFailed(msg) => {
            tracing::error!("Answer service unreachable: {}", msg);
            (
                StatusCode::BAD_GATEWAY,
                "Answer service unreachable".to_string(),
            )
        }
        SourceError::UpstreamStatus { status, body } if status >= 500 => {
            (StatusCode::SERVICE_UNAVAILABLE, body)
        }
        SourceError::UpstreamStatus { status, body } => (
            StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY),
            body,
        ),
        SourceError::ReadError(msg) => (StatusCode::BAD_GATEWAY, msg),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::answer_source::AnswerStream;

    /// Source that replays a fixed script of NDJSON lines
    struct ScriptedSource {
        lines: Vec<&'static str>,
    }

    #[async_trait::async_trait]
    impl AnswerSource for ScriptedSource {
        async fn stream_answer(&self, _request: AskRequest) -> Result<AnswerStream, SourceError> {
            let (tx, rx) = tokio::sync::mpsc::channel(16);
            let lines: Vec<String> = self.lines.iter().map(|l| l.to_string()).collect();
            tokio::spawn(async move {
                for line in lines {
                    if tx.send(Ok(line)).await.is_err() {
                        return;
                    }
                }
            });
            Ok(AnswerStream::from_channel(rx))
        }
    }

    async fn run_handler(
        lines: Vec<&'static str>,
        question: Option<&str>,
    ) -> Result<Response, (StatusCode, String)> {
        let state = AnswerServiceState::with_source(Arc::new(ScriptedSource { lines }));
        let mut headers = HeaderMap::new();
        headers.insert("authorization", "Bearer session-1".parse().unwrap());
        let body = AskBody {
            question: question.map(|q| q.to_string()),
            kind: None,
            history: vec![],
            specialties: vec![],
        };
        ask_handler(Extension(state), headers, Json(body)).await
    }

    async fn body_lines(response: Response) -> Vec<String> {
        let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec())
            .unwrap()
            .lines()
            .map(|l| l.to_string())
            .collect()
    }

    #[tokio::test]
    async fn test_ask_handler_drops_malformed_lines() {
        let lines = vec![
            "not json",
            r#"{"status":"chunk","content":"Beta"}"#,
            r#"{"status":"complete","answer":{"text":"Beta blockers [1]."}}"#,
        ];
        let response = run_handler(lines, Some("Role of beta blockers in HF?"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key("x-request-id"));

        let sent = body_lines(response).await;
        assert_eq!(sent.len(), 2);
        assert!(sent[0].contains(r#""status":"chunk""#));
        assert!(sent[1].contains(r#""status":"complete""#));
    }

    #[tokio::test]
    async fn test_ask_handler_synthesizes_error_on_premature_end() {
        let lines = vec![r#"{"status":"chunk","content":"Beta"}"#];
        let response = run_handler(lines, Some("q")).await.unwrap();

        let sent = body_lines(response).await;
        assert_eq!(sent.len(), 2);
        assert!(sent[1].contains(r#""status":"error""#));
        assert!(sent[1].contains("ended the stream prematurely"));
    }

    #[tokio::test]
    async fn test_ask_handler_rejects_missing_question() {
        match run_handler(vec![], None).await {
            Err((status, _)) => assert_eq!(status, StatusCode::BAD_REQUEST),
            Ok(_) => panic!("expected validation failure"),
        }
    }

    #[tokio::test]
    async fn test_ask_handler_requires_bearer() {
        let state = AnswerServiceState::with_source(Arc::new(ScriptedSource { lines: vec![] }));
        let body = AskBody {
            question: Some("q".to_string()),
            kind: None,
            history: vec![],
            specialties: vec![],
        };
        match ask_handler(Extension(state), HeaderMap::new(), Json(body)).await {
            Err((status, _)) => assert_eq!(status, StatusCode::UNAUTHORIZED),
            Ok(_) => panic!("expected auth failure"),
        }
    }

    #[test]
    fn test_revalidate_accepts_protocol_lines() {
        let event = revalidate_line(r#"{"status":"chunk","content":"text"}"#);
        assert!(matches!(event, Some(StreamEvent::Chunk { .. })));
    }

    #[test]
    fn test_revalidate_drops_garbage() {
        assert!(revalidate_line("not json at all").is_none());
        assert!(revalidate_line(r#"{"status":"heartbeat"}"#).is_none());
    }

    #[test]
    fn test_connect_failure_maps_to_bad_gateway() {
        let (status, _) = map_source_error(SourceError::ConnectFailed("refused".to_string()));
        assert_eq!(status, StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_upstream_5xx_maps_to_service_unavailable() {
        let (status, body) = map_source_error(SourceError::UpstreamStatus {
            status: 500,
            body: "overloaded".to_string(),
        });
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body, "overloaded");
    }

    #[test]
    fn test_upstream_4xx_passes_through() {
        let (status, body) = map_source_error(SourceError::UpstreamStatus {
            status: 429,
            body: "rate limited".to_string(),
        });
        assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(body, "rate limited");
    }
}
