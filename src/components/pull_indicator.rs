use crate::model::PullPhase;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct PullIndicatorProps {
    pub phase: PullPhase,
    pub progress: f64,
    /// Height the indicator occupies; follows the pull, parks at threshold while refreshing.
    pub offset: f64,
}

#[function_component]
pub fn PullIndicator(props: &PullIndicatorProps) -> Html {
    if props.phase == PullPhase::Idle {
        return html! {};
    }
    let label = match props.phase {
        PullPhase::Releasing => "Release to refresh",
        PullPhase::Refreshing => "Refreshing…",
        _ => "Pull to refresh",
    };
    let spin = if props.phase == PullPhase::Refreshing {
        "animation:ptr-spin 0.8s linear infinite;".to_string()
    } else {
        format!("transform:rotate({:.0}deg);", props.progress * 270.0)
    };
    let opacity = if props.phase == PullPhase::Refreshing {
        1.0
    } else {
        props.progress.max(0.2)
    };
    html! {
        <div style={format!("position:absolute; top:0; left:0; right:0; height:{:.1}px; display:flex; align-items:center; justify-content:center; gap:8px; overflow:hidden; opacity:{:.2}; font-size:12px; color:#8b949e;", props.offset, opacity)}>
            <style>{"@keyframes ptr-spin { from { transform:rotate(0deg); } to { transform:rotate(360deg); } }"}</style>
            <div style={format!("width:18px; height:18px; border:2px solid #30363d; border-top-color:#58a6ff; border-radius:50%; {}", spin)}></div>
            <span>{ label }</span>
        </div>
    }
}
