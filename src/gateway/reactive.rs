//! Subscribable fetch handles.
//!
//! A [`FetchHandle`] runs the same request path as [`Gateway::request`] in a
//! background task and publishes its state on a `watch` channel. Nothing is
//! retried automatically; call [`FetchHandle::refresh`] to run it again.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde::de::DeserializeOwned;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::gateway::client::Gateway;
use crate::gateway::error::{RawError, RawErrorKind};
use crate::gateway::request::RequestOptions;
use crate::gateway::result::RequestResult;

/// Current state of a watched request.
#[derive(Debug)]
pub enum FetchState<T> {
    Pending,
    Ready(Arc<RequestResult<T>>),
}

impl<T> FetchState<T> {
    pub fn is_ready(&self) -> bool {
        matches!(self, FetchState::Ready(_))
    }

    pub fn result(&self) -> Option<&Arc<RequestResult<T>>> {
        match self {
            FetchState::Ready(result) => Some(result),
            FetchState::Pending => None,
        }
    }
}

impl<T> Clone for FetchState<T> {
    fn clone(&self) -> Self {
        match self {
            FetchState::Pending => FetchState::Pending,
            FetchState::Ready(result) => FetchState::Ready(Arc::clone(result)),
        }
    }
}

/// Live handle to a request that can be observed and re-run.
pub struct FetchHandle<T> {
    gateway: Gateway,
    path: Arc<str>,
    options: RequestOptions,
    state: Arc<watch::Sender<FetchState<T>>>,
    generation: Arc<AtomicU64>,
}

impl<T> FetchHandle<T>
where
    T: DeserializeOwned + Send + Sync + 'static,
{
    pub(crate) fn spawn(gateway: Gateway, path: String, options: RequestOptions) -> Self {
        let (tx, _rx) = watch::channel(FetchState::Pending);
        let handle = Self {
            gateway,
            path: Arc::from(path),
            options,
            state: Arc::new(tx),
            generation: Arc::new(AtomicU64::new(0)),
        };
        handle.refresh();
        handle
    }

    /// Re-run the request. Only the latest run may publish its result.
    pub fn refresh(&self) -> JoinHandle<()> {
        // Bumped under the channel lock so a finishing run cannot interleave.
        let mut generation = 0;
        self.state.send_modify(|state| {
            generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
            *state = FetchState::Pending;
        });

        let gateway = self.gateway.clone();
        let path = Arc::clone(&self.path);
        let options = self.options.clone();
        let state = Arc::clone(&self.state);
        let latest = Arc::clone(&self.generation);

        tokio::spawn(async move {
            let result = gateway.request::<T>(&path, options).await;
            let published = state.send_if_modified(|current| {
                if latest.load(Ordering::SeqCst) != generation {
                    return false;
                }
                *current = FetchState::Ready(Arc::new(result));
                true
            });
            if !published {
                tracing::debug!(path = %path, generation, "Discarding superseded fetch result");
            }
        })
    }

    pub fn subscribe(&self) -> watch::Receiver<FetchState<T>> {
        self.state.subscribe()
    }

    pub fn state(&self) -> FetchState<T> {
        self.state.borrow().clone()
    }

    /// Wait for the current run to finish.
    pub async fn ready(&self) -> Arc<RequestResult<T>> {
        let mut rx = self.subscribe();
        if let Ok(state) = rx.wait_for(FetchState::is_ready).await {
            if let Some(result) = state.result() {
                return Arc::clone(result);
            }
        }
        Arc::new(RequestResult::failure(RawError::new(
            RawErrorKind::Network,
            None,
            format!("fetch of \"{}\" was dropped before completing", self.path),
            None,
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_clone_shares_result() {
        let result = Arc::new(RequestResult::success(1u8));
        let state = FetchState::Ready(Arc::clone(&result));
        let cloned = state.clone();
        assert!(Arc::ptr_eq(cloned.result().unwrap(), &result));
        assert!(!FetchState::<u8>::Pending.is_ready());
    }
}
