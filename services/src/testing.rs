//! Scripted collaborators for tests. Enabled with the `test-utils` feature.

use crate::store::{KeyValueStore, MemoryStore, StoreError, StoredValue};
use crate::transport::{HttpRequest, HttpResponse, Transport, TransportError};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

struct ScriptedReply {
    delay: Option<Duration>,
    result: Result<HttpResponse, TransportError>,
}

/// [`Transport`] that answers from a queue of scripted replies and records
/// every request it receives. An exhausted queue answers with a
/// [`TransportError::RequestFailed`].
#[derive(Default)]
pub struct MockTransport {
    replies: Mutex<VecDeque<ScriptedReply>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_response(&self, status: u16, body: impl Into<String>) -> &Self {
        self.push(None, Ok(HttpResponse::new(status, body.into())))
    }

    pub fn push_json(&self, status: u16, body: &serde_json::Value) -> &Self {
        self.push_response(status, body.to_string())
    }

    /// Queues a reply that is only delivered after `delay`.
    pub fn push_delayed_json(&self, delay: Duration, status: u16, body: &serde_json::Value) -> &Self {
        self.push(
            Some(delay),
            Ok(HttpResponse::new(status, body.to_string())),
        )
    }

    pub fn push_error(&self, error: TransportError) -> &Self {
        self.push(None, Err(error))
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn last_request(&self) -> Option<HttpRequest> {
        self.requests.lock().unwrap().last().cloned()
    }

    fn push(&self, delay: Option<Duration>, result: Result<HttpResponse, TransportError>) -> &Self {
        self.replies
            .lock()
            .unwrap()
            .push_back(ScriptedReply { delay, result });
        self
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let url = request.url.clone();
        self.requests.lock().unwrap().push(request);

        let reply = self.replies.lock().unwrap().pop_front();
        match reply {
            Some(ScriptedReply { delay, result }) => {
                if let Some(delay) = delay {
                    tokio::time::sleep(delay).await;
                }
                result
            }
            None => Err(TransportError::RequestFailed {
                url,
                reason: "no scripted response left".to_string(),
            }),
        }
    }
}

/// [`MemoryStore`] whose first `failures` writes fail.
pub struct FlakyStore {
    inner: MemoryStore,
    remaining_failures: AtomicUsize,
    write_attempts: AtomicUsize,
}

impl FlakyStore {
    pub fn failing(failures: usize) -> Self {
        Self {
            inner: MemoryStore::new(),
            remaining_failures: AtomicUsize::new(failures),
            write_attempts: AtomicUsize::new(0),
        }
    }

    pub fn write_attempts(&self) -> usize {
        self.write_attempts.load(Ordering::SeqCst)
    }

    fn check_write(&self) -> Result<(), StoreError> {
        self.write_attempts.fetch_add(1, Ordering::SeqCst);
        let failed = self
            .remaining_failures
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |left| left.checked_sub(1))
            .is_ok();
        if failed {
            Err(StoreError::Io {
                path: "flaky-store".into(),
                source: std::io::Error::other("simulated write failure"),
            })
        } else {
            Ok(())
        }
    }
}

impl KeyValueStore for FlakyStore {
    fn get(&self, key: &str) -> Result<Option<StoredValue>, StoreError> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: StoredValue) -> Result<(), StoreError> {
        self.check_write()?;
        self.inner.set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.check_write()?;
        self.inner.remove(key)
    }
}
