use crate::model::{GamePhase, LossCause};
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct GameOverOverlayProps {
    pub phase: GamePhase,
    pub trees: u32,
    pub total_trees: u32,
    pub restart: Callback<()>,
}

pub fn outcome_text(phase: GamePhase) -> Option<(&'static str, &'static str)> {
    match phase {
        GamePhase::Won => Some(("You Won!", "You collected all trees! The Ancient Tree lives again.")),
        GamePhase::Lost(LossCause::Defeated) => Some(("You Lost", "The enemy killed you!")),
        GamePhase::Lost(LossCause::TimeUp) => Some(("You Lost", "Time's up!")),
        _ => None,
    }
}

#[function_component]
pub fn GameOverOverlay(props: &GameOverOverlayProps) -> Html {
    let Some((title, detail)) = outcome_text(props.phase) else {
        return html! {};
    };
    let accent = if props.phase == GamePhase::Won { "#2ea043" } else { "#f85149" };
    let restart_cb = props.restart.clone();
    let restart_btn = Callback::from(move |_| restart_cb.emit(()));
    html! {
        <div style={format!("position:absolute; top:50%; left:50%; transform:translate(-50%, -50%); background:rgba(0,0,0,0.85); border:2px solid {accent}; padding:24px 32px; border-radius:12px; text-align:center; min-width:280px; color:#fff;")}>
            <h2 style={format!("margin:0 0 12px 0; color:{accent};")}>{ title }</h2>
            <p style="margin:4px 0;">{ detail }</p>
            <p style="margin:4px 0;">{ format!("Trees collected: {}/{}", props.trees, props.total_trees) }</p>
            <div style="margin-top:16px; display:flex; gap:12px; justify-content:center;">
                <button onclick={restart_btn}>{"Play Again"}</button>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_terminal_phase_has_its_own_message() {
        assert!(outcome_text(GamePhase::NotStarted).is_none());
        assert!(outcome_text(GamePhase::Playing).is_none());
        let defeated = outcome_text(GamePhase::Lost(LossCause::Defeated)).unwrap();
        let time_up = outcome_text(GamePhase::Lost(LossCause::TimeUp)).unwrap();
        assert_ne!(defeated.1, time_up.1);
        assert_eq!(outcome_text(GamePhase::Won).unwrap().0, "You Won!");
    }
}
