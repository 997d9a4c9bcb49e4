use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct NameFormProps {
    pub remembered: Option<String>,
    pub on_submit: Callback<String>,
}

// Identity entry. Validation happens in `GameSession::submit_name`.
#[function_component(NameForm)]
pub fn name_form(props: &NameFormProps) -> Html {
    let input_ref = use_node_ref();
    let onsubmit = {
        let input_ref = input_ref.clone();
        let cb = props.on_submit.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if let Some(input) = input_ref.cast::<HtmlInputElement>() {
                let value = input.value();
                input.set_value("");
                cb.emit(value);
            }
        })
    };
    html! {
        <form id="nameForm" onsubmit={onsubmit} style="display:flex; flex-direction:column; gap:10px; align-items:center; margin-top:48px;">
            <h1 style="margin:0; color:#2f7a34;">{"Tree Energy"}</h1>
            <input
                ref={input_ref}
                id="nameInput"
                type="text"
                placeholder="Enter your name"
                value={props.remembered.clone().unwrap_or_default()}
            />
            <button type="submit">{"Start Game"}</button>
        </form>
    }
}
