use crate::model::{PullConfig, PullPhase, PullSnapshot, Release};
use crate::refresh::{RefreshCallback, RefreshError, settle};
use crate::state::{PullTracker, TouchState, touch_points};
use crate::util::{clog, cwarn};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen_futures::spawn_local;
use web_sys::{AddEventListenerOptions, Element, HtmlElement, TouchEvent};
use yew::prelude::*;

/// Marks an inner element whose scroll offset gates the pull.
pub const SCROLLABLE_ATTR: &str = "data-pull-scrollable";

#[derive(Clone, PartialEq)]
pub struct UsePullToRefreshHandle {
    /// Attach to the element that receives the touches.
    pub container_ref: NodeRef,
    pub phase: PullPhase,
    pub is_refreshing: bool,
    pub pull_distance: f64,
    pub pull_progress: f64,
}

impl UsePullToRefreshHandle {
    /// Element whose scroll offset must be at the top for a pull to start.
    pub fn scroll_element(&self) -> Option<Element> {
        let container = self.container_ref.cast::<HtmlElement>()?;
        Some(monitored_element(&container))
    }
}

fn monitored_element(container: &HtmlElement) -> Element {
    container
        .query_selector(&format!("[{}]", SCROLLABLE_ATTR))
        .ok()
        .flatten()
        .unwrap_or_else(|| container.clone().into())
}

#[hook]
pub fn use_pull_to_refresh(
    on_refresh: RefreshCallback,
    config: PullConfig,
    on_error: Option<Callback<RefreshError>>,
) -> UsePullToRefreshHandle {
    let container_ref = use_node_ref();
    let tracker = use_mut_ref(|| PullTracker::new(config));
    let touch = use_mut_ref(TouchState::default);
    let snapshot = use_state_eq(PullSnapshot::default);
    // Listeners are attached once; they read the latest callbacks through these.
    let refresh_ref = use_mut_ref(|| on_refresh.clone());
    let on_error_ref = use_mut_ref(|| on_error.clone());
    *refresh_ref.borrow_mut() = on_refresh;
    *on_error_ref.borrow_mut() = on_error;

    {
        let tracker = tracker.clone();
        let touch = touch.clone();
        let setter = snapshot.setter();
        use_effect_with(config, move |config| {
            let snap = {
                let mut t = tracker.borrow_mut();
                t.set_config(*config);
                if !t.phase().is_active() {
                    touch.borrow_mut().clear();
                }
                t.snapshot()
            };
            setter.set(snap);
            || ()
        });
    }

    {
        let container_ref = container_ref.clone();
        let setter = snapshot.setter();

        use_effect_with((), move |_| {
            let container = container_ref.cast::<HtmlElement>();

            let touch_start_cb = {
                let tracker = tracker.clone();
                let touch = touch.clone();
                let setter = setter.clone();
                let container = container.clone();
                Closure::wrap(Box::new(move |e: TouchEvent| {
                    let Some(container) = container.as_ref() else {
                        return;
                    };
                    let points = touch_points(&e.touches());
                    let scroll_top = monitored_element(container).scroll_top() as f64;
                    let snap = {
                        let mut t = tracker.borrow_mut();
                        if !touch.borrow_mut().start(&points, scroll_top, &mut t) {
                            return;
                        }
                        t.snapshot()
                    };
                    setter.set(snap);
                }) as Box<dyn FnMut(_)>)
            };

            let touch_move_cb = {
                let tracker = tracker.clone();
                let touch = touch.clone();
                let setter = setter.clone();
                Closure::wrap(Box::new(move |e: TouchEvent| {
                    let points = touch_points(&e.touches());
                    let snap = {
                        let mut t = tracker.borrow_mut();
                        if touch.borrow().track_move(&points, e.cancelable(), &mut t) {
                            e.prevent_default();
                        }
                        t.snapshot()
                    };
                    setter.set(snap);
                }) as Box<dyn FnMut(_)>)
            };

            let touch_end_cb = {
                let tracker = tracker.clone();
                let touch = touch.clone();
                let setter = setter.clone();
                Closure::wrap(Box::new(move |e: TouchEvent| {
                    let points = touch_points(&e.touches());
                    let (outcome, snap) = {
                        let mut t = tracker.borrow_mut();
                        let Some(outcome) = touch.borrow_mut().end(&points, &mut t) else {
                            return;
                        };
                        (outcome, t.snapshot())
                    };
                    setter.set(snap);
                    if outcome != Release::Refresh {
                        return;
                    }
                    let tracker = tracker.clone();
                    let setter = setter.clone();
                    let op = refresh_ref.borrow().clone();
                    let on_error = on_error_ref.borrow().clone();
                    spawn_local(async move {
                        let result = settle(tracker.clone(), op).await;
                        let snap = tracker.borrow().snapshot();
                        setter.set(snap);
                        match result {
                            Ok(()) => clog("pull refresh settled"),
                            Err(err) => {
                                cwarn(&err.to_string());
                                if let Some(cb) = on_error {
                                    cb.emit(err);
                                }
                            }
                        }
                    });
                }) as Box<dyn FnMut(_)>)
            };

            let touch_cancel_cb = {
                let tracker = tracker.clone();
                let touch = touch.clone();
                let setter = setter.clone();
                Closure::wrap(Box::new(move |e: TouchEvent| {
                    let points = touch_points(&e.touches());
                    let snap = {
                        let mut t = tracker.borrow_mut();
                        if !touch.borrow_mut().cancel(&points, &mut t) {
                            return;
                        }
                        t.snapshot()
                    };
                    setter.set(snap);
                }) as Box<dyn FnMut(_)>)
            };

            if let Some(el) = container.as_ref() {
                // touchmove must be non-passive or prevent_default is ignored.
                let active = AddEventListenerOptions::new();
                active.set_passive(false);
                el.add_event_listener_with_callback("touchstart", touch_start_cb.as_ref().unchecked_ref())
                    .ok();
                el.add_event_listener_with_callback_and_add_event_listener_options(
                    "touchmove",
                    touch_move_cb.as_ref().unchecked_ref(),
                    &active,
                )
                .ok();
                el.add_event_listener_with_callback("touchend", touch_end_cb.as_ref().unchecked_ref())
                    .ok();
                el.add_event_listener_with_callback("touchcancel", touch_cancel_cb.as_ref().unchecked_ref())
                    .ok();
            } else {
                cwarn("pull-to-refresh container not mounted; touch listeners skipped");
            }

            move || {
                if let Some(el) = container {
                    el.remove_event_listener_with_callback("touchstart", touch_start_cb.as_ref().unchecked_ref())
                        .ok();
                    el.remove_event_listener_with_callback("touchmove", touch_move_cb.as_ref().unchecked_ref())
                        .ok();
                    el.remove_event_listener_with_callback("touchend", touch_end_cb.as_ref().unchecked_ref())
                        .ok();
                    el.remove_event_listener_with_callback("touchcancel", touch_cancel_cb.as_ref().unchecked_ref())
                        .ok();
                }
                drop(touch_start_cb);
                drop(touch_move_cb);
                drop(touch_end_cb);
                drop(touch_cancel_cb);
            }
        });
    }

    UsePullToRefreshHandle {
        container_ref,
        phase: snapshot.phase,
        is_refreshing: snapshot.is_refreshing,
        pull_distance: snapshot.pull_distance,
        pull_progress: snapshot.pull_progress,
    }
}
