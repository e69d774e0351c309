//! Drive loop connecting a transport byte stream to the session.
//!
//! Each chunk is fully processed -- every complete frame extracted and
//! merged -- before the next chunk is awaited, so fragments render strictly
//! in arrival order. The loop is generic over the transport stream, which
//! keeps it testable without a network.

use futures_util::{Stream, StreamExt};
use std::fmt;
use tokio_util::sync::CancellationToken;

use silk_types::gateway::GatewayError;

use crate::chat::session::ChatSession;
use crate::sse::{FrameEvent, SseDecoder};

/// How a pumped exchange ended, with the accumulated assistant text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PumpOutcome {
    /// The stream finished (sentinel or end of data).
    Completed(String),
    /// The caller cancelled the exchange; partial text is kept in place.
    Cancelled(String),
}

/// Consume a byte stream through the decoder into the session.
///
/// On success or cancellation the session's gate is released and the
/// accumulated text returned. On a transport failure the in-progress
/// placeholder is retracted, the gate released, and the error propagated
/// for the caller to surface as a transient notice.
pub async fn pump_stream<S, B, E>(
    mut stream: S,
    session: &mut ChatSession,
    cancel: &CancellationToken,
) -> Result<PumpOutcome, GatewayError>
where
    S: Stream<Item = Result<B, E>> + Unpin,
    B: AsRef<[u8]>,
    E: fmt::Display,
{
    let mut decoder = SseDecoder::new();

    loop {
        tokio::select! {
            biased;

            _ = cancel.cancelled() => {
                tracing::debug!("stream cancelled by caller, keeping partial text");
                return Ok(PumpOutcome::Cancelled(session.cancel_exchange()));
            }

            next = stream.next() => match next {
                Some(Ok(chunk)) => {
                    for event in decoder.feed(chunk.as_ref()) {
                        match event {
                            FrameEvent::Delta(fragment) => session.apply_fragment(&fragment),
                            FrameEvent::Done => {
                                return Ok(PumpOutcome::Completed(session.complete_exchange()));
                            }
                        }
                    }
                }
                Some(Err(err)) => {
                    session.fail_exchange();
                    return Err(GatewayError::Transport(err.to_string()));
                }
                None => {
                    return Ok(PumpOutcome::Completed(session.complete_exchange()));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::stream;

    fn ok_chunk(s: &str) -> Result<Vec<u8>, String> {
        Ok(s.as_bytes().to_vec())
    }

    #[tokio::test]
    async fn test_pump_completes_hello_scenario() {
        let chunks = vec![
            ok_chunk("data: {\"choices\":[{\"delta\":{\"content\":\"Hel\"}}]}\n"),
            ok_chunk("data: {\"choices\":[{\"delta\":{\"content\":\"lo\"}}]}\n\ndata: [DONE]\n"),
        ];

        let mut session = ChatSession::new();
        assert!(session.begin_exchange("hi"));

        let outcome = pump_stream(
            stream::iter(chunks),
            &mut session,
            &CancellationToken::new(),
        )
        .await
        .unwrap();

        assert_eq!(outcome, PumpOutcome::Completed("Hello".to_string()));
        assert!(!session.pending());
        assert_eq!(session.messages().last().unwrap().content, "Hello");
    }

    #[tokio::test]
    async fn test_pump_completes_on_end_of_data_without_sentinel() {
        let chunks = vec![ok_chunk(
            "data: {\"choices\":[{\"delta\":{\"content\":\"ok\"}}]}\n",
        )];

        let mut session = ChatSession::new();
        session.begin_exchange("hi");

        let outcome = pump_stream(
            stream::iter(chunks),
            &mut session,
            &CancellationToken::new(),
        )
        .await
        .unwrap();

        assert_eq!(outcome, PumpOutcome::Completed("ok".to_string()));
        assert!(!session.pending());
    }

    #[tokio::test]
    async fn test_transport_error_retracts_placeholder() {
        let chunks: Vec<Result<Vec<u8>, String>> = vec![
            ok_chunk("data: {\"choices\":[{\"delta\":{\"content\":\"par\"}}]}\n"),
            Err("connection reset".to_string()),
        ];

        let mut session = ChatSession::new();
        session.begin_exchange("hi");

        let err = pump_stream(
            stream::iter(chunks),
            &mut session,
            &CancellationToken::new(),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, GatewayError::Transport(_)));
        assert!(!session.pending());
        // Only the user message remains.
        assert_eq!(session.messages().len(), 1);
    }

    #[tokio::test]
    async fn test_cancellation_keeps_partial_and_releases_gate() {
        let first: Vec<Result<Vec<u8>, String>> =
            vec![ok_chunk("data: {\"choices\":[{\"delta\":{\"content\":\"par\"}}]}\n")];
        // A stream that yields one chunk and then never finishes.
        let never_ending = stream::iter(first).chain(stream::pending());

        let mut session = ChatSession::new();
        session.begin_exchange("hi");

        let cancel = CancellationToken::new();
        let pump = pump_stream(never_ending, &mut session, &cancel);
        tokio::pin!(pump);

        // Let the first chunk through, then cancel.
        let outcome = tokio::select! {
            out = &mut pump => out,
            _ = async {
                tokio::task::yield_now().await;
                cancel.cancel();
                std::future::pending::<()>().await
            } => unreachable!(),
        }
        .unwrap();

        match outcome {
            PumpOutcome::Cancelled(text) => assert_eq!(text, "par"),
            other => panic!("expected cancellation, got {other:?}"),
        }
        assert!(!session.pending());
        assert_eq!(session.messages().last().unwrap().content, "par");
    }

    #[tokio::test]
    async fn test_malformed_frame_mid_stream_recovers() {
        let chunks = vec![
            ok_chunk("data: {\"choices\":[{\"delta\":{\"content\":\"a\"}}]}\n"),
            ok_chunk("data: {broken\n"),
            ok_chunk("data: {\"choices\":[{\"delta\":{\"content\":\"b\"}}]}\ndata: [DONE]\n"),
        ];

        let mut session = ChatSession::new();
        session.begin_exchange("hi");

        let outcome = pump_stream(
            stream::iter(chunks),
            &mut session,
            &CancellationToken::new(),
        )
        .await
        .unwrap();

        assert_eq!(outcome, PumpOutcome::Completed("ab".to_string()));
    }
}
