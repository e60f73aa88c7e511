use crate::state::{DismissalPolicy, DismissalStore};
use crate::util::now_ms;
use std::rc::Rc;
use yew::prelude::*;

#[derive(Properties, Clone)]
pub struct InstallBannerProps {
    pub store: Rc<dyn DismissalStore>,
    #[prop_or_default]
    pub policy: DismissalPolicy,
    pub on_install: Callback<()>,
}

impl PartialEq for InstallBannerProps {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.store, &other.store)
            && self.policy == other.policy
            && self.on_install == other.on_install
    }
}

#[function_component]
pub fn InstallBanner(props: &InstallBannerProps) -> Html {
    let visible = {
        let store = props.store.clone();
        let policy = props.policy;
        use_state(move || policy.should_prompt(store.as_ref(), now_ms()))
    };
    if !*visible {
        return html! {};
    }

    let dismiss_cb = {
        let store = props.store.clone();
        let policy = props.policy;
        let visible = visible.clone();
        Callback::from(move |_| {
            policy.dismiss(store.as_ref(), now_ms());
            visible.set(false);
        })
    };
    let install_cb = {
        let cb = props.on_install.clone();
        let visible = visible.clone();
        Callback::from(move |_| {
            cb.emit(());
            visible.set(false);
        })
    };

    html! {
        <div style="display:flex; align-items:center; gap:10px; padding:10px 14px; background:#161b22; border-bottom:1px solid #30363d; font-size:13px;">
            <span style="flex:1;">{"Install the tracker for quicker meal logging."}</span>
            <button onclick={install_cb}>{"Install"}</button>
            <button onclick={dismiss_cb} style="opacity:0.7;">{"Not now"}</button>
        </div>
    }
}
