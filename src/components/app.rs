use std::rc::Rc;
use yew::prelude::*;

use super::{
    Shared, controls_panel::ControlsPanel, game_over_overlay::GameOverOverlay,
    game_view::GameView, name_form::NameForm,
};
use crate::audio::{AudioBank, AudioCue};
use crate::config::{AssetPaths, GameConfig, LevelData};
use crate::model::{GamePhase, LossCause};
use crate::session::GameSession;
use crate::storage::SessionStore;

const STORY: &str = "You are the last creature on a dying planet, and only you can save it. \
The Ancient Tree, the source of life, needs its magical leaves to grow strong again. \
Use the joystick or arrow keys to collect the leaves, but watch out: dead remains will drain your energy. \
Gather energy orbs to stay strong and move quickly. \
Save the Tree, bring life back, and restore the planet before it's too late!";

const WON_TINT: &str = "#BFD8B8";

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Screen {
    NameEntry,
    Playing,
    Finished(GamePhase),
}

#[derive(Clone, Debug, PartialEq)]
pub struct AppState {
    pub screen: Screen,
    pub player: Option<String>,
    pub greeting: Option<String>,
    pub trees: u32,
    pub muted: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            screen: Screen::NameEntry,
            player: None,
            greeting: None,
            trees: 0,
            muted: false,
        }
    }
}

pub enum AppAction {
    Remembered(String),
    Started(String),
    Finished { phase: GamePhase, trees: u32 },
    Retry,
    SetMuted(bool),
}

impl Reducible for AppState {
    type Action = AppAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            AppAction::Remembered(name) => {
                if next.screen != Screen::NameEntry || next.player.is_some() {
                    return self;
                }
                next.greeting = Some(format!("Welcome back, {name}!"));
                next.player = Some(name);
            }
            AppAction::Started(name) => {
                if next.screen != Screen::NameEntry {
                    return self;
                }
                next.greeting = Some(format!("Hello, {name}!"));
                next.player = Some(name);
                next.trees = 0;
                next.screen = Screen::Playing;
            }
            AppAction::Finished { phase, trees } => {
                if next.screen != Screen::Playing || !phase.is_terminal() {
                    return self;
                }
                next.screen = Screen::Finished(phase);
                next.trees = trees;
            }
            AppAction::Retry => {
                if !matches!(next.screen, Screen::Finished(_)) {
                    return self;
                }
                next.screen = Screen::NameEntry;
            }
            AppAction::SetMuted(muted) => next.muted = muted,
        }
        Rc::new(next)
    }
}

fn new_session() -> GameSession {
    let config = GameConfig::default();
    // The bundled level is compiled in and covered by tests.
    let level = LevelData::bundled(&config).expect("bundled level data is valid");
    GameSession::new(SessionStore::browser(), config, level)
}

fn alert(msg: &str) {
    if let Some(win) = web_sys::window() {
        let _ = win.alert_with_message(msg);
    }
}

fn set_body_tint(color: Option<&str>) {
    let Some(body) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.body())
    else {
        return;
    };
    let style = body.style();
    let res = match color {
        Some(c) => style.set_property("background-color", c),
        None => style.remove_property("background-color").map(|_| ()),
    };
    if res.is_err() {
        log::warn!("could not update page background");
    }
}

#[function_component(App)]
pub fn app() -> Html {
    let session = use_mut_ref(new_session);
    let audio = use_mut_ref(|| AudioBank::load(&AssetPaths::default()));
    let app_state = use_reducer(AppState::default);

    {
        let session = session.clone();
        let app_state = app_state.clone();
        use_effect_with((), move |_| {
            let remembered = session.borrow().remembered_player();
            if let Some(name) = remembered {
                app_state.dispatch(AppAction::Remembered(name));
            }
            || ()
        });
    }

    let on_submit = {
        let session = session.clone();
        let audio = audio.clone();
        let app_state = app_state.clone();
        Callback::from(move |raw: String| {
            let result = session.borrow_mut().submit_name(&raw);
            match result {
                Ok(name) => {
                    alert(STORY);
                    audio.borrow().play(AudioCue::BackgroundLoop);
                    app_state.dispatch(AppAction::Started(name));
                }
                Err(e) => alert(&e.to_string()),
            }
        })
    };

    let on_finished = {
        let session = session.clone();
        let audio = audio.clone();
        let app_state = app_state.clone();
        Callback::from(move |phase: GamePhase| {
            audio.borrow().stop(AudioCue::BackgroundLoop);
            let trees = session.borrow().game().collected_trees;
            log::info!("run finished: {phase:?} with {trees} trees");
            match phase {
                GamePhase::Won => set_body_tint(Some(WON_TINT)),
                GamePhase::Lost(LossCause::Defeated) => alert("The enemy killed you! You lost!"),
                GamePhase::Lost(LossCause::TimeUp) => alert("Time's up! You lost!"),
                _ => {}
            }
            app_state.dispatch(AppAction::Finished { phase, trees });
        })
    };

    let on_retry = {
        let session = session.clone();
        let app_state = app_state.clone();
        Callback::from(move |_: ()| {
            session.borrow_mut().retry();
            set_body_tint(None);
            app_state.dispatch(AppAction::Retry);
        })
    };

    let on_toggle_mute = {
        let audio = audio.clone();
        let app_state = app_state.clone();
        Callback::from(move |_: ()| {
            let muted = audio.borrow_mut().toggle_mute();
            app_state.dispatch(AppAction::SetMuted(muted));
        })
    };

    let state = &*app_state;
    let total_trees = session.borrow().game().config.total_trees;
    let greeting = match &state.greeting {
        Some(g) => html! { <p id="greeting" style="margin:8px 0;">{ g.clone() }</p> },
        None => html! {},
    };
    let stage = match state.screen {
        Screen::NameEntry => html! {
            <NameForm remembered={state.player.clone()} on_submit={on_submit} />
        },
        Screen::Playing | Screen::Finished(_) => {
            let phase = match state.screen {
                Screen::Finished(p) => p,
                _ => GamePhase::Playing,
            };
            // Same element position for both screens keeps the canvas mounted
            // so the final frame stays visible under the overlay.
            html! {
                <div style="position:relative; display:inline-block;">
                    <GameView
                        session={Shared(session.clone())}
                        audio={Shared(audio.clone())}
                        on_finished={on_finished}
                        on_toggle_mute={on_toggle_mute.clone()}
                    />
                    <GameOverOverlay
                        phase={phase}
                        trees={state.trees}
                        total_trees={total_trees}
                        restart={on_retry}
                    />
                </div>
            }
        }
    };

    html! {
        <div id="root" style="font-family:Arial, sans-serif; text-align:center;">
            { greeting }
            { stage }
            <ControlsPanel muted={state.muted} on_toggle_mute={on_toggle_mute} />
        </div>
    }
}
