mod audio;
mod components;
mod config;
mod model;
mod render;
mod session;
mod state;
mod storage;
mod util;

use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;

use crate::util::{init_logging, js_err};

// Offline cache. The worker script is served next to index.html.
fn register_service_worker() {
    let Some(window) = web_sys::window() else {
        return;
    };
    let navigator = window.navigator();
    let supported = js_sys::Reflect::has(&navigator, &JsValue::from_str("serviceWorker"))
        .unwrap_or(false);
    if !supported {
        log::debug!("service workers unsupported; skipping offline cache");
        return;
    }
    let on_ok = Closure::wrap(Box::new(|_: JsValue| {
        log::info!("service worker registered");
    }) as Box<dyn FnMut(JsValue)>);
    let on_err = Closure::wrap(Box::new(|e: JsValue| {
        log::warn!("service worker registration failed: {}", js_err(&e));
    }) as Box<dyn FnMut(JsValue)>);
    let _ = navigator
        .service_worker()
        .register("sw.js")
        .then2(&on_ok, &on_err);
    // Registration settles once; the handlers live for the page.
    on_ok.forget();
    on_err.forget();
}

fn main() {
    init_logging();
    register_service_worker();
    yew::Renderer::<components::app::App>::new().render();
}
