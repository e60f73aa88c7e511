use super::{install_banner::InstallBanner, pull_to_refresh::PullToRefresh};
use crate::refresh::{RefreshCallback, RefreshError, RefreshResult};
use crate::state::{DismissalStore, LocalStorageDismissalStore};
use crate::util::clog;
use std::rc::Rc;
use wasm_bindgen_futures::JsFuture;
use yew::prelude::*;

const DISMISS_KEY: &str = "pr_install_dismissed";

#[derive(Clone, PartialEq)]
struct MealEntry {
    name: &'static str,
    kcal: u32,
}

const MEALS: [MealEntry; 6] = [
    MealEntry { name: "Oatmeal with berries", kcal: 320 },
    MealEntry { name: "Chicken salad", kcal: 480 },
    MealEntry { name: "Greek yogurt", kcal: 150 },
    MealEntry { name: "Salmon and rice", kcal: 610 },
    MealEntry { name: "Protein shake", kcal: 210 },
    MealEntry { name: "Apple", kcal: 95 },
];

async fn sleep_ms(ms: i32) -> RefreshResult {
    let promise = js_sys::Promise::new(&mut |resolve, _reject| {
        if let Some(win) = web_sys::window() {
            let _ = win.set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms);
        }
    });
    JsFuture::from(promise).await.map(|_| ()).map_err(RefreshError::from)
}

#[function_component(App)]
pub fn app() -> Html {
    let refreshes = use_state(|| 0u32);
    let reload_count = use_mut_ref(|| 0u32);
    let disabled = use_state(|| false);
    let error = use_state(|| None::<String>);
    let store = use_memo((), |_| {
        Rc::new(LocalStorageDismissalStore::new(DISMISS_KEY)) as Rc<dyn DismissalStore>
    });

    // Every third reload fails so the error path stays visible in the demo.
    let on_refresh = {
        let refreshes = refreshes.clone();
        let error = error.clone();
        use_memo((), move |_| {
            RefreshCallback::new(move || {
                let refreshes = refreshes.clone();
                let reload_count = reload_count.clone();
                let error = error.clone();
                async move {
                    sleep_ms(900).await?;
                    let n = {
                        let mut count = reload_count.borrow_mut();
                        *count += 1;
                        *count
                    };
                    refreshes.set(n);
                    if n % 3 == 0 {
                        return Err(RefreshError::failed("meal log unavailable"));
                    }
                    error.set(None);
                    Ok::<(), RefreshError>(())
                }
            })
        })
    };
    let on_error = {
        let error = error.clone();
        Callback::from(move |err: RefreshError| error.set(Some(err.to_string())))
    };
    let toggle_disabled = {
        let disabled = disabled.clone();
        Callback::from(move |_| disabled.set(!*disabled))
    };
    let on_install = Callback::from(|_: ()| clog("install requested"));

    let offset = (*refreshes as usize) % MEALS.len();
    let rows = MEALS
        .iter()
        .cycle()
        .skip(offset)
        .take(MEALS.len())
        .map(|m| {
            html! {
                <li style="display:flex; justify-content:space-between; padding:12px 16px; border-bottom:1px solid #21262d;">
                    <span>{ m.name }</span>
                    <span style="opacity:0.7;">{ format!("{} kcal", m.kcal) }</span>
                </li>
            }
        })
        .collect::<Html>();

    html! {
        <div id="root" style="display:flex; flex-direction:column; height:100vh; background:#0e1116; color:#c9d1d9;">
            <InstallBanner store={(*store).clone()} on_install={on_install} />
            <div id="top-bar" style="display:flex; align-items:center; gap:8px; padding:10px 16px; border-bottom:1px solid #30363d;">
                <h3 style="margin:0; flex:1; font-size:16px;">{ format!("Meal log (reloaded {}x)", *refreshes) }</h3>
                <label style="display:flex; align-items:center; gap:6px; font-size:12px;">
                    <input type="checkbox" checked={*disabled} onclick={toggle_disabled} />
                    <span>{"Lock refresh"}</span>
                </label>
            </div>
            if let Some(msg) = (*error).clone() {
                <div style="padding:8px 16px; background:#3d1d20; color:#f85149; font-size:12px;">{ msg }</div>
            }
            <div style="flex:1; min-height:0;">
                <PullToRefresh on_refresh={(*on_refresh).clone()} disabled={*disabled} on_error={on_error}>
                    <ul style="list-style:none; margin:0; padding:0;">{ rows }</ul>
                </PullToRefresh>
            </div>
        </div>
    }
}
