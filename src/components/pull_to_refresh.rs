use super::pull_indicator::PullIndicator;
use crate::hooks::use_pull_to_refresh;
use crate::model::{DEFAULT_THRESHOLD, PullConfig, PullPhase};
use crate::refresh::{RefreshCallback, RefreshError};
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct PullToRefreshProps {
    pub on_refresh: RefreshCallback,
    #[prop_or(DEFAULT_THRESHOLD)]
    pub threshold: f64,
    #[prop_or_default]
    pub disabled: bool,
    /// Overrides the damping fields; `threshold`/`disabled` props win over it.
    #[prop_or_default]
    pub config: Option<PullConfig>,
    #[prop_or_default]
    pub on_error: Option<Callback<RefreshError>>,
    #[prop_or_default]
    pub class: Classes,
    #[prop_or_default]
    pub children: Html,
}

#[function_component]
pub fn PullToRefresh(props: &PullToRefreshProps) -> Html {
    let config = PullConfig {
        threshold: props.threshold,
        disabled: props.disabled,
        ..props.config.unwrap_or_default()
    };
    let pull = use_pull_to_refresh(props.on_refresh.clone(), config, props.on_error.clone());

    let offset = if pull.is_refreshing {
        config.threshold
    } else {
        pull.pull_distance
    };
    // Snap back with a transition once the finger is gone.
    let transition = if pull.phase.is_active() {
        "none"
    } else {
        "transform 0.2s ease-out"
    };

    html! {
        <div ref={pull.container_ref.clone()} class={props.class.clone()} style="position:relative; height:100%; overflow-y:auto; overscroll-behavior-y:contain;">
            <PullIndicator phase={pull.phase} progress={pull.pull_progress} offset={offset} />
            <div style={format!("transform:translateY({:.1}px); transition:{};", offset, transition)}
                 aria-busy={if pull.phase == PullPhase::Refreshing { "true" } else { "false" }}>
                { props.children.clone() }
            </div>
        </div>
    }
}
