//! Caller-supplied refresh operation and the settle path around it.

use crate::model::Release;
use crate::state::PullTracker;
use crate::util::cwarn;
use futures_util::FutureExt;
use futures_util::future::LocalBoxFuture;
use std::cell::RefCell;
use std::fmt;
use std::future::Future;
use std::rc::Rc;
use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RefreshError {
    #[error("refresh failed: {0}")]
    Failed(String),
    #[error("refresh promise rejected: {0}")]
    Js(String),
}

impl RefreshError {
    pub fn failed(msg: impl Into<String>) -> Self {
        RefreshError::Failed(msg.into())
    }
}

impl From<JsValue> for RefreshError {
    fn from(value: JsValue) -> Self {
        let msg = value
            .as_string()
            .or_else(|| {
                js_sys::Reflect::get(&value, &JsValue::from_str("message"))
                    .ok()
                    .and_then(|m| m.as_string())
            })
            .unwrap_or_else(|| "unknown error".to_string());
        RefreshError::Js(msg)
    }
}

pub type RefreshResult = Result<(), RefreshError>;

type RefreshFn = dyn Fn() -> LocalBoxFuture<'static, RefreshResult>;

/// Refresh operation handed to the tracker. Equality is by identity so it
/// can sit in component props.
#[derive(Clone)]
pub struct RefreshCallback {
    inner: Rc<RefreshFn>,
}

impl RefreshCallback {
    /// Wraps an async operation.
    pub fn new<F, Fut>(f: F) -> Self
    where
        F: Fn() -> Fut + 'static,
        Fut: Future<Output = RefreshResult> + 'static,
    {
        Self {
            inner: Rc::new(move || f().boxed_local()),
        }
    }

    /// Wraps a synchronous operation; it completes on the first poll.
    pub fn from_sync<F>(f: F) -> Self
    where
        F: Fn() -> RefreshResult + 'static,
    {
        Self::new(move || futures_util::future::ready(f()))
    }

    pub fn invoke(&self) -> LocalBoxFuture<'static, RefreshResult> {
        (self.inner)()
    }
}

impl PartialEq for RefreshCallback {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for RefreshCallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RefreshCallback")
    }
}

/// Returns the tracker to idle when dropped: after completion, on error,
/// on panic unwind, or when the future owning it is dropped, polled or not.
struct SettleGuard {
    tracker: Rc<RefCell<PullTracker>>,
}

impl Drop for SettleGuard {
    fn drop(&mut self) {
        match self.tracker.try_borrow_mut() {
            Ok(mut t) => t.finish_refresh(),
            Err(_) => {
                cwarn("pull tracker busy while settling refresh; retrying");
                retry_finish(self.tracker.clone());
            }
        }
    }
}

// The borrow holder is on the current stack; a queued task runs after it unwinds.
#[cfg(target_arch = "wasm32")]
fn retry_finish(tracker: Rc<RefCell<PullTracker>>) {
    wasm_bindgen_futures::spawn_local(async move {
        tracker.borrow_mut().finish_refresh();
    });
}

#[cfg(not(target_arch = "wasm32"))]
fn retry_finish(tracker: Rc<RefCell<PullTracker>>) {
    let _ = tracker;
}

/// Runs `op` for a tracker already in `Refreshing` and settles it afterwards.
/// Errors from `op` are passed through untouched. The tracker is settled even
/// if the returned future is dropped before its first poll.
pub fn settle(
    tracker: Rc<RefCell<PullTracker>>,
    op: RefreshCallback,
) -> impl Future<Output = RefreshResult> + 'static {
    let guard = SettleGuard { tracker };
    async move {
        let _guard = guard;
        op.invoke().await
    }
}

/// Ends the gesture and, when the threshold was reached, runs the refresh.
pub async fn release(
    tracker: &Rc<RefCell<PullTracker>>,
    op: &RefreshCallback,
) -> Result<Release, RefreshError> {
    let outcome = tracker.borrow_mut().touch_end();
    if outcome == Release::Refresh {
        settle(tracker.clone(), op.clone()).await?;
    }
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn callbacks_compare_by_identity() {
        let a = RefreshCallback::from_sync(|| Ok(()));
        let b = RefreshCallback::from_sync(|| Ok(()));
        assert_eq!(a, a.clone());
        assert_ne!(a, b);
    }

    #[test]
    fn sync_callback_completes_on_first_poll() {
        let op = RefreshCallback::from_sync(|| Err(RefreshError::failed("nope")));
        let out = op.invoke().now_or_never();
        assert_eq!(out, Some(Err(RefreshError::Failed("nope".into()))));
    }

    #[test]
    fn error_messages() {
        assert_eq!(
            RefreshError::failed("timeout").to_string(),
            "refresh failed: timeout"
        );
        assert_eq!(
            RefreshError::Js("aborted".into()).to_string(),
            "refresh promise rejected: aborted"
        );
    }
}
