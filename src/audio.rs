use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;
use web_sys::HtmlAudioElement;

use crate::config::AssetPaths;
use crate::model::GameEvent;
use crate::util::js_err;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AudioCue {
    BackgroundLoop,
    Pickup,
    Damage,
    TreeCollected,
}

impl AudioCue {
    pub const ALL: [AudioCue; 4] = [
        AudioCue::BackgroundLoop,
        AudioCue::Pickup,
        AudioCue::Damage,
        AudioCue::TreeCollected,
    ];

    pub fn name(self) -> &'static str {
        match self {
            AudioCue::BackgroundLoop => "background-loop",
            AudioCue::Pickup => "pickup",
            AudioCue::Damage => "damage",
            AudioCue::TreeCollected => "tree-collected",
        }
    }

    pub fn for_event(ev: &GameEvent) -> Option<AudioCue> {
        match ev {
            GameEvent::EnergyCollected { .. } => Some(AudioCue::Pickup),
            GameEvent::Damaged { .. } => Some(AudioCue::Damage),
            GameEvent::TreeCollected { .. } => Some(AudioCue::TreeCollected),
            _ => None,
        }
    }

    fn src(self, paths: &AssetPaths) -> &'static str {
        match self {
            AudioCue::BackgroundLoop => paths.music,
            AudioCue::Pickup => paths.pickup,
            AudioCue::Damage => paths.damage,
            AudioCue::TreeCollected => paths.tree_collected,
        }
    }
}

/// One `<audio>` element per cue plus a shared mute flag. Playback problems
/// (autoplay policy, missing files) are logged and otherwise ignored.
pub struct AudioBank {
    tracks: Vec<(AudioCue, HtmlAudioElement)>,
    muted: bool,
    on_error: Closure<dyn FnMut(JsValue)>,
}

impl AudioBank {
    pub fn load(paths: &AssetPaths) -> Self {
        let mut tracks = Vec::new();
        for cue in AudioCue::ALL {
            match HtmlAudioElement::new_with_src(cue.src(paths)) {
                Ok(el) => {
                    el.set_loop(cue == AudioCue::BackgroundLoop);
                    tracks.push((cue, el));
                }
                Err(e) => log::warn!("audio `{}` unavailable: {}", cue.name(), js_err(&e)),
            }
        }
        let on_error = Closure::wrap(Box::new(move |e: JsValue| {
            log::warn!("error playing sound: {}", js_err(&e));
        }) as Box<dyn FnMut(JsValue)>);
        Self {
            tracks,
            muted: false,
            on_error,
        }
    }

    fn track(&self, cue: AudioCue) -> Option<&HtmlAudioElement> {
        self.tracks.iter().find(|(c, _)| *c == cue).map(|(_, el)| el)
    }

    pub fn play(&self, cue: AudioCue) {
        let Some(el) = self.track(cue) else {
            return;
        };
        // Restart one-shots so rapid pickups each get heard.
        if cue != AudioCue::BackgroundLoop {
            el.set_current_time(0.0);
        }
        match el.play() {
            Ok(promise) => {
                let _ = promise.catch(&self.on_error);
            }
            Err(e) => log::warn!("error playing `{}`: {}", cue.name(), js_err(&e)),
        }
    }

    pub fn stop(&self, cue: AudioCue) {
        if let Some(el) = self.track(cue) {
            let _ = el.pause();
        }
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        for (_, el) in &self.tracks {
            el.set_muted(muted);
        }
    }

    pub fn toggle_mute(&mut self) -> bool {
        self.set_muted(!self.muted);
        self.muted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cue_names_match_the_audio_contract() {
        let names: Vec<&str> = AudioCue::ALL.iter().map(|c| c.name()).collect();
        assert_eq!(names, ["background-loop", "pickup", "damage", "tree-collected"]);
    }

    #[test]
    fn events_map_to_cues() {
        assert_eq!(
            AudioCue::for_event(&GameEvent::EnergyCollected { index: 0, energy: 50 }),
            Some(AudioCue::Pickup)
        );
        assert_eq!(
            AudioCue::for_event(&GameEvent::Damaged { index: 2, energy: 10 }),
            Some(AudioCue::Damage)
        );
        assert_eq!(
            AudioCue::for_event(&GameEvent::TreeCollected { index: 0, collected: 1 }),
            Some(AudioCue::TreeCollected)
        );
        assert_eq!(AudioCue::for_event(&GameEvent::Won), None);
        assert_eq!(AudioCue::for_event(&GameEvent::TimeUp), None);
    }
}
