//! 流式读取：增量解码事件流响应，逐个回调事件。
//!
//! # Stream Reader
//!
//! Opens the streaming endpoint and turns its line-oriented body into typed
//! events, one at a time, in arrival order.
//!
//! ```text
//! Init ──(first poll)──▶ Reading ──(data: [DONE] | peer closed)──▶ Done
//!                           │
//!                           └──(transport error)──▶ Error
//! ```
//!
//! Streaming calls are never retried. A non-success initial status is
//! classified and returned by [`ChatRoutesClient::open_stream`] before any
//! [`EventStream`] exists; a failure once `Reading` has begun ends the stream.
//!
//! Two ways to consume a stream:
//!
//! - push: [`ChatRoutesClient::stream`] invokes a callback per event;
//! - pull: [`ChatRoutesClient::open_stream`] returns an [`EventStream`]
//!   implementing [`futures::Stream`].
//!
//! Either way the response body is owned by the call and released on every
//! exit path, including an error returned from the callback.

pub mod decode;

pub use decode::{EventDecoder, Frame, DATA_PREFIX, DONE_SENTINEL};

use crate::client::error_classification::classify_text;
use crate::client::request::ApiRequest;
use crate::client::ChatRoutesClient;
use crate::error::ApiError;
use crate::transport::TransportError;
use crate::Result;
use bytes::Bytes;
use futures::{ready, Stream, StreamExt, TryStreamExt};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::pin::Pin;
use std::task::{Context, Poll};
use tracing::{debug, info};
use uuid::Uuid;

type ByteStream = Pin<Box<dyn Stream<Item = std::result::Result<Bytes, TransportError>> + Send>>;

/// Lifecycle of a streaming call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamState {
    /// Opened, nothing read from the body yet.
    Init,
    Reading,
    Done,
    Error,
}

/// A finite, non-restartable sequence of decoded events.
///
/// Yields `Ok(event)` per parsed data line, at most one `Err` (a classified
/// network error) and then ends. Dropping it closes the connection.
pub struct EventStream<T> {
    body: Option<ByteStream>,
    decoder: EventDecoder<T>,
    state: StreamState,
    client_request_id: Option<String>,
    events: u64,
}

impl<T> EventStream<T> {
    /// Decode events from an arbitrary byte source.
    pub fn new<S>(body: S) -> Self
    where
        S: Stream<Item = std::result::Result<Bytes, TransportError>> + Send + 'static,
    {
        Self {
            body: Some(Box::pin(body)),
            decoder: EventDecoder::new(),
            state: StreamState::Init,
            client_request_id: None,
            events: 0,
        }
    }

    fn with_request_id(mut self, id: String) -> Self {
        self.client_request_id = Some(id);
        self
    }

    pub fn state(&self) -> StreamState {
        self.state
    }

    /// Number of events delivered so far.
    pub fn events_delivered(&self) -> u64 {
        self.events
    }

    /// Number of malformed fragments skipped so far.
    pub fn fragments_skipped(&self) -> u64 {
        self.decoder.skipped()
    }

    fn close(&mut self, state: StreamState) {
        self.state = state;
        self.body = None;
        debug!(
            state = ?state,
            events = self.events,
            skipped = self.decoder.skipped(),
            client_request_id = self.client_request_id.as_deref().unwrap_or(""),
            "chatroutes stream closed"
        );
    }
}

impl<T: DeserializeOwned> Stream for EventStream<T> {
    type Item = Result<T>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        if this.state == StreamState::Init {
            this.state = StreamState::Reading;
        }

        loop {
            if matches!(this.state, StreamState::Done | StreamState::Error) {
                return Poll::Ready(None);
            }

            match this.decoder.next_frame() {
                Some(Frame::Event(event)) => {
                    this.events += 1;
                    return Poll::Ready(Some(Ok(event)));
                }
                Some(Frame::Done) => {
                    this.close(StreamState::Done);
                    return Poll::Ready(None);
                }
                None => {}
            }

            let Some(body) = this.body.as_mut() else {
                this.close(StreamState::Done);
                return Poll::Ready(None);
            };

            match ready!(body.poll_next_unpin(cx)) {
                Some(Ok(chunk)) => this.decoder.feed(&chunk),
                Some(Err(e)) => {
                    this.close(StreamState::Error);
                    return Poll::Ready(Some(Err(ApiError::from(e).into())));
                }
                None => {
                    // Peer closed without the sentinel: flush and finish cleanly.
                    let last = this.decoder.finish();
                    this.close(StreamState::Done);
                    if let Some(Frame::Event(event)) = last {
                        this.events += 1;
                        return Poll::Ready(Some(Ok(event)));
                    }
                    return Poll::Ready(None);
                }
            }
        }
    }
}

impl ChatRoutesClient {
    /// Open the streaming endpoint at `path` and return its events as a stream.
    ///
    /// A non-success initial status is classified and returned before any
    /// event is produced. Waiting for the initial response is bounded by the
    /// configured timeout; reading the body is not.
    pub async fn open_stream<T, B>(&self, path: &str, body: &B) -> Result<EventStream<T>>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let request = ApiRequest::post(path).json(body)?;
        let client_request_id = Uuid::new_v4().to_string();
        let timeout = self.config.timeout;

        let resp = match tokio::time::timeout(
            timeout,
            self.transport.send_stream(&request, &client_request_id),
        )
        .await
        {
            Ok(Ok(resp)) => resp,
            Ok(Err(e)) => return Err(ApiError::from(e).into()),
            Err(_) => {
                return Err(ApiError::network(format!(
                    "stream request timed out after {} ms",
                    timeout.as_millis()
                ))
                .into())
            }
        };

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            let err = classify_text(status.as_u16(), &text);
            info!(
                http_status = status.as_u16(),
                error_kind = err.kind().name(),
                path,
                client_request_id = client_request_id.as_str(),
                "chatroutes stream request failed"
            );
            return Err(err.into());
        }

        debug!(
            http_status = status.as_u16(),
            path,
            client_request_id = client_request_id.as_str(),
            "chatroutes stream opened"
        );

        let bytes = resp.bytes_stream().map_err(TransportError::from_reqwest);
        Ok(EventStream::new(bytes).with_request_id(client_request_id))
    }

    /// Open the streaming endpoint at `path` and call `on_event` for every
    /// event, in order, until the stream ends.
    ///
    /// Returns `Ok(())` on the sentinel or when the server closes the
    /// connection. An error from `on_event` stops reading and is returned
    /// unchanged.
    pub async fn stream<T, B, F>(&self, path: &str, body: &B, mut on_event: F) -> Result<()>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
        F: FnMut(T) -> Result<()>,
    {
        let mut events = self.open_stream::<T, B>(path, body).await?;
        while let Some(event) = events.next().await {
            on_event(event?)?;
        }
        Ok(())
    }
}
