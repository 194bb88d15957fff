//! Uniform `{data, error}` result of a gateway call.

use serde::ser::{Serialize, SerializeStruct, Serializer};

use crate::gateway::error::RawError;

/// Outcome of one gateway call. Exactly one of `data` / `error` is set.
///
/// Serializes as `{"data": ..., "error": ...}` with the unused side `null`.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestResult<T> {
    inner: Result<T, RawError>,
}

impl<T> RequestResult<T> {
    pub fn success(data: T) -> Self {
        Self { inner: Ok(data) }
    }

    pub fn failure(error: RawError) -> Self {
        Self { inner: Err(error) }
    }

    pub fn data(&self) -> Option<&T> {
        self.inner.as_ref().ok()
    }

    pub fn error(&self) -> Option<&RawError> {
        self.inner.as_ref().err()
    }

    pub fn is_success(&self) -> bool {
        self.inner.is_ok()
    }

    pub fn into_parts(self) -> (Option<T>, Option<RawError>) {
        match self.inner {
            Ok(data) => (Some(data), None),
            Err(error) => (None, Some(error)),
        }
    }

    pub fn into_result(self) -> Result<T, RawError> {
        self.inner
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> RequestResult<U> {
        RequestResult {
            inner: self.inner.map(f),
        }
    }
}

impl<T: Serialize> Serialize for RequestResult<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("RequestResult", 2)?;
        state.serialize_field("data", &self.data())?;
        state.serialize_field("error", &self.error())?;
        state.end()
    }
}
