use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent, TouchEvent};
use yew::prelude::*;

use super::Shared;
use crate::audio::{AudioBank, AudioCue};
use crate::config::AssetPaths;
use crate::model::GamePhase;
use crate::render::{Sprites, draw_frame};
use crate::session::GameSession;
use crate::state::{InputCommand, Key, TouchJoystick};
use crate::util::js_err;

#[derive(Properties, PartialEq, Clone)]
pub struct GameViewProps {
    pub session: Shared<GameSession>,
    pub audio: Shared<AudioBank>,
    pub on_finished: Callback<GamePhase>,
    pub on_toggle_mute: Callback<()>,
}

// Touch position in canvas pixels, compensating for CSS scaling.
fn touch_point(canvas: &HtmlCanvasElement, e: &TouchEvent) -> Option<(f64, f64)> {
    let t = e.touches().item(0)?;
    let rect = canvas.get_bounding_client_rect();
    let sx = canvas.width() as f64 / rect.width().max(1.0);
    let sy = canvas.height() as f64 / rect.height().max(1.0);
    Some((
        (t.client_x() as f64 - rect.left()) * sx,
        (t.client_y() as f64 - rect.top()) * sy,
    ))
}

#[function_component(GameView)]
pub fn game_view(props: &GameViewProps) -> Html {
    let canvas_ref = use_node_ref();
    let joystick = use_mut_ref(TouchJoystick::default);

    {
        let canvas_ref = canvas_ref.clone();
        let session = props.session.clone();
        let audio = props.audio.clone();
        let on_finished = props.on_finished.clone();
        let on_toggle_mute = props.on_toggle_mute.clone();
        let joystick = joystick.clone();

        use_effect_with((), move |_| {
            let window = web_sys::window().expect("no global `window` exists");
            let canvas: HtmlCanvasElement = canvas_ref
                .cast::<HtmlCanvasElement>()
                .expect("canvas_ref not attached to a canvas element");
            let viewport = session.0.borrow().game().config.viewport;
            canvas.set_width(viewport.width as u32);
            canvas.set_height(viewport.height as u32);
            let ctx: Option<CanvasRenderingContext2d> = canvas
                .get_context("2d")
                .ok()
                .flatten()
                .and_then(|c| c.dyn_into().ok());
            if ctx.is_none() {
                log::error!("2d canvas context unavailable; the game will run without drawing");
            }
            let sprites = Rc::new(Sprites::load(&AssetPaths::default()));

            // Countdown: independent of frame rate.
            let timer_id: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
            let second_tick = {
                let session = session.clone();
                let timer_id = timer_id.clone();
                let window = window.clone();
                Closure::wrap(Box::new(move || {
                    if session.0.borrow_mut().second().is_some() {
                        if let Some(id) = timer_id.take() {
                            window.clear_interval_with_handle(id);
                        }
                    }
                }) as Box<dyn FnMut()>)
            };
            match window.set_interval_with_callback_and_timeout_and_arguments_0(
                second_tick.as_ref().unchecked_ref(),
                1000,
            ) {
                Ok(id) => timer_id.set(Some(id)),
                Err(e) => log::error!("countdown could not start: {}", js_err(&e)),
            }

            // RAF loop: one game tick per display frame until the run ends.
            let raf_id: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
            let closure_cell: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> =
                Rc::new(RefCell::new(None));
            {
                let closure_cell_loop = closure_cell.clone();
                let raf_id_loop = raf_id.clone();
                let window_loop = window.clone();
                let timer_id = timer_id.clone();
                let session = session.clone();
                let audio = audio.clone();
                let joystick = joystick.clone();
                let sprites = sprites.clone();
                let last_ts = Cell::new(None::<f64>);
                *closure_cell.borrow_mut() = Some(Closure::wrap(Box::new(move |ts: f64| {
                    let dt = last_ts.replace(Some(ts)).map_or(0.0, |prev| ts - prev);
                    let events = session.0.borrow_mut().frame(dt);
                    {
                        let audio = audio.0.borrow();
                        for cue in events.iter().filter_map(AudioCue::for_event) {
                            audio.play(cue);
                        }
                    }
                    let s = session.0.borrow();
                    if let Some(ctx) = &ctx {
                        draw_frame(ctx, &sprites, s.game(), &joystick.borrow());
                    }
                    if s.game().is_over() {
                        if let Some(id) = timer_id.take() {
                            window_loop.clear_interval_with_handle(id);
                        }
                        raf_id_loop.set(None);
                        let phase = s.phase();
                        drop(s);
                        on_finished.emit(phase);
                        return;
                    }
                    drop(s);
                    if let Some(cb) = closure_cell_loop.borrow().as_ref() {
                        if let Ok(id) = window_loop.request_animation_frame(cb.as_ref().unchecked_ref()) {
                            raf_id_loop.set(Some(id));
                        }
                    }
                }) as Box<dyn FnMut(f64)>));
            }
            if let Some(cb) = closure_cell.borrow().as_ref() {
                if let Ok(id) = window.request_animation_frame(cb.as_ref().unchecked_ref()) {
                    raf_id.set(Some(id));
                }
            }

            // Keyboard: arrows queue movement, M toggles sound.
            let keydown_cb = {
                let session = session.clone();
                Closure::wrap(Box::new(move |e: KeyboardEvent| {
                    let key = e.key();
                    if key == "m" || key == "M" {
                        if !e.repeat() {
                            on_toggle_mute.emit(());
                        }
                        return;
                    }
                    if let Some(k) = Key::from_dom(&key) {
                        e.prevent_default();
                        session.0.borrow_mut().queue_input(InputCommand::KeyDown(k));
                    }
                }) as Box<dyn FnMut(_)>)
            };
            let keyup_cb = {
                let session = session.clone();
                Closure::wrap(Box::new(move |e: KeyboardEvent| {
                    if let Some(k) = Key::from_dom(&e.key()) {
                        session.0.borrow_mut().queue_input(InputCommand::KeyUp(k));
                    }
                }) as Box<dyn FnMut(_)>)
            };
            let blur_cb = {
                let session = session.clone();
                Closure::wrap(Box::new(move |_e: web_sys::Event| {
                    session.0.borrow_mut().queue_input(InputCommand::ReleaseAll);
                }) as Box<dyn FnMut(_)>)
            };
            window
                .add_event_listener_with_callback("keydown", keydown_cb.as_ref().unchecked_ref())
                .ok();
            window
                .add_event_listener_with_callback("keyup", keyup_cb.as_ref().unchecked_ref())
                .ok();
            window
                .add_event_listener_with_callback("blur", blur_cb.as_ref().unchecked_ref())
                .ok();

            // Virtual joystick on the canvas.
            let touch_start_cb = {
                let canvas_tc = canvas.clone();
                let joystick = joystick.clone();
                Closure::wrap(Box::new(move |e: TouchEvent| {
                    e.prevent_default();
                    if let Some((x, y)) = touch_point(&canvas_tc, &e) {
                        joystick.borrow_mut().begin(x, y);
                    }
                }) as Box<dyn FnMut(_)>)
            };
            let touch_move_cb = {
                let canvas_tc = canvas.clone();
                let joystick = joystick.clone();
                let session = session.clone();
                Closure::wrap(Box::new(move |e: TouchEvent| {
                    e.prevent_default();
                    let Some((x, y)) = touch_point(&canvas_tc, &e) else {
                        return;
                    };
                    let changed = joystick.borrow_mut().drag(x, y);
                    if let Some(dir) = changed {
                        session.0.borrow_mut().queue_input(InputCommand::Joystick(dir));
                    }
                }) as Box<dyn FnMut(_)>)
            };
            let touch_end_cb = {
                let joystick = joystick.clone();
                let session = session.clone();
                Closure::wrap(Box::new(move |_e: TouchEvent| {
                    let dir = joystick.borrow_mut().end();
                    session.0.borrow_mut().queue_input(InputCommand::Joystick(dir));
                }) as Box<dyn FnMut(_)>)
            };
            for (name, cb) in [
                ("touchstart", &touch_start_cb),
                ("touchmove", &touch_move_cb),
                ("touchend", &touch_end_cb),
                ("touchcancel", &touch_end_cb),
            ] {
                canvas
                    .add_event_listener_with_callback(name, cb.as_ref().unchecked_ref())
                    .ok();
            }

            // Leaving the page keeps the running game's progress.
            let unload_cb = {
                let session = session.clone();
                Closure::wrap(Box::new(move |_e: web_sys::Event| {
                    session.0.borrow().save_now();
                }) as Box<dyn FnMut(_)>)
            };
            window
                .add_event_listener_with_callback("beforeunload", unload_cb.as_ref().unchecked_ref())
                .ok();

            move || {
                let _ = window.remove_event_listener_with_callback(
                    "keydown",
                    keydown_cb.as_ref().unchecked_ref(),
                );
                let _ = window
                    .remove_event_listener_with_callback("keyup", keyup_cb.as_ref().unchecked_ref());
                let _ = window
                    .remove_event_listener_with_callback("blur", blur_cb.as_ref().unchecked_ref());
                let _ = window.remove_event_listener_with_callback(
                    "beforeunload",
                    unload_cb.as_ref().unchecked_ref(),
                );
                for (name, cb) in [
                    ("touchstart", &touch_start_cb),
                    ("touchmove", &touch_move_cb),
                    ("touchend", &touch_end_cb),
                    ("touchcancel", &touch_end_cb),
                ] {
                    let _ = canvas
                        .remove_event_listener_with_callback(name, cb.as_ref().unchecked_ref());
                }
                if let Some(id) = timer_id.take() {
                    window.clear_interval_with_handle(id);
                }
                if let Some(id) = raf_id.take() {
                    let _ = window.cancel_animation_frame(id);
                }
                // Breaks the closure's reference to its own cell.
                closure_cell.borrow_mut().take();
                let _keep_alive = (
                    &second_tick,
                    &keydown_cb,
                    &keyup_cb,
                    &blur_cb,
                    &touch_start_cb,
                    &touch_move_cb,
                    &touch_end_cb,
                    &unload_cb,
                );
            }
        });
    }

    html! {
        <div style="position:relative; display:inline-block;">
            <canvas ref={canvas_ref} id="myCanvas" style="display:block; border:2px solid #5b3a1a; touch-action:none; max-width:100vw;"></canvas>
        </div>
    }
}
