//! Audio Manager - bridges the player store to the page's `<audio>` element.
//! The element does the decoding; this component only mirrors state into it
//! and reports its playback events back to the store.
use crate::components::{PlaybackProgress, PlayerSnapshot, ProgressSignal, VolumeSignal};
use crate::player::{MediaEvent, PlayerStore};
use dioxus::prelude::*;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;
#[cfg(target_arch = "wasm32")]
use web_sys::{window, HtmlAudioElement};

pub const AUDIO_ELEMENT_ID: &str = "podplayer-audio";

#[component]
pub fn AudioController() -> Element {
    let store = use_context::<PlayerStore>();
    let snapshot = use_context::<PlayerSnapshot>().0;
    let volume = use_context::<VolumeSignal>().0;
    let mut progress = use_context::<ProgressSignal>().0;

    use_effect(move || sync_playback(snapshot().is_playing()));
    use_effect(move || set_volume(volume()));

    let state = snapshot();
    let Some(episode) = state.current_episode() else {
        return rsx! {};
    };
    let src = episode.url().to_string();
    let looping = state.is_looping();

    let on_play = {
        let store = store.clone();
        move |_| store.handle_media_event(MediaEvent::Started)
    };
    let on_pause = {
        let store = store.clone();
        move |_| store.handle_media_event(MediaEvent::Paused)
    };
    // With `loop` set the element never fires `ended`.
    let on_ended = {
        let store = store.clone();
        move |_| {
            progress.set(PlaybackProgress::default());
            store.handle_media_event(MediaEvent::Ended);
        }
    };
    let on_time_update = move |_| {
        spawn(async move {
            if let Some(current) = read_progress().await {
                progress.set(current);
            }
        });
    };
    let on_loaded_metadata = move |_| {
        seek_to(0.0);
        set_volume(*volume.peek());
        spawn(async move {
            let duration = read_progress().await.map(|p| p.duration).unwrap_or(0.0);
            progress.set(PlaybackProgress {
                current_time: 0.0,
                duration,
            });
        });
    };

    rsx! {
        audio {
            id: AUDIO_ELEMENT_ID,
            src: "{src}",
            autoplay: true,
            r#loop: looping,
            preload: "metadata",
            onplay: on_play,
            onpause: on_pause,
            onended: on_ended,
            ontimeupdate: on_time_update,
            onloadedmetadata: on_loaded_metadata,
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn audio_element() -> Option<HtmlAudioElement> {
    window()?
        .document()?
        .get_element_by_id(AUDIO_ELEMENT_ID)?
        .dyn_into::<HtmlAudioElement>()
        .ok()
}

#[cfg(target_arch = "wasm32")]
fn sync_playback(playing: bool) {
    let Some(audio) = audio_element() else {
        return;
    };
    if playing {
        if let Ok(promise) = audio.play() {
            spawn(async move {
                let _ = wasm_bindgen_futures::JsFuture::from(promise).await;
            });
        }
    } else {
        let _ = audio.pause();
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn sync_playback(playing: bool) {
    let call = if playing {
        "play().catch(() => {})"
    } else {
        "pause()"
    };
    run_on_audio(&format!("audio.{call};"));
}

/// Seek the current episode to `position` seconds.
#[cfg(target_arch = "wasm32")]
pub fn seek_to(position: f64) {
    if let Some(audio) = audio_element() {
        audio.set_current_time(position.max(0.0));
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn seek_to(position: f64) {
    run_on_audio(&format!("audio.currentTime = {};", position.max(0.0)));
}

#[cfg(target_arch = "wasm32")]
fn set_volume(volume: f64) {
    if let Some(audio) = audio_element() {
        audio.set_volume(volume.clamp(0.0, 1.0));
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn set_volume(volume: f64) {
    run_on_audio(&format!("audio.volume = {};", volume.clamp(0.0, 1.0)));
}

#[cfg(target_arch = "wasm32")]
async fn read_progress() -> Option<PlaybackProgress> {
    let audio = audio_element()?;
    let duration = audio.duration();
    Some(PlaybackProgress {
        current_time: audio.current_time(),
        duration: if duration.is_finite() { duration } else { 0.0 },
    })
}

#[cfg(not(target_arch = "wasm32"))]
async fn read_progress() -> Option<PlaybackProgress> {
    let eval = document::eval(&format!(
        r#"const audio = document.getElementById("{AUDIO_ELEMENT_ID}");
        if (!audio) return null;
        return {{
            current_time: audio.currentTime,
            duration: Number.isFinite(audio.duration) ? audio.duration : 0,
        }};"#
    ));
    eval.join::<PlaybackProgress>().await.ok()
}

#[cfg(not(target_arch = "wasm32"))]
fn run_on_audio(statement: &str) {
    let script = format!(
        r#"(function () {{
            const audio = document.getElementById("{AUDIO_ELEMENT_ID}");
            if (!audio) return false;
            {statement}
            return true;
        }})();"#
    );
    let _ = document::eval(&script);
}
