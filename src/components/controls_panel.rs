use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct ControlsPanelProps {
    pub muted: bool,
    pub on_toggle_mute: Callback<()>,
}

#[function_component]
pub fn ControlsPanel(props: &ControlsPanelProps) -> Html {
    let mute_cb = {
        let cb = props.on_toggle_mute.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let label = if props.muted { "Unmute Sound" } else { "Mute Sound" };
    html! {<div style="display:flex; gap:8px; align-items:center; justify-content:center; margin-top:8px;">
        <button id="muteButton" onclick={mute_cb}>{ label }</button>
        <div style="font-size:11px; opacity:0.7;">{"Arrows or joystick to move, 'M' to mute"}</div>
    </div>}
}
