use crate::components::{Icon, IconKind, PlayerSnapshot};
use crate::player::PlayerStore;
use dioxus::prelude::*;

const TOGGLE_ON: &str = "control-btn active";
const TOGGLE_OFF: &str = "control-btn";

/// Play/Pause button
#[component]
pub(super) fn PlayPauseButton() -> Element {
    let store = use_context::<PlayerStore>();
    let snapshot = use_context::<PlayerSnapshot>().0;
    let state = snapshot();
    let has_episode = state.current_episode().is_some();

    rsx! {
        button {
            id: "play-pause-btn",
            r#type: "button",
            class: "play-button",
            disabled: !has_episode,
            onclick: move |_| store.toggle_play(),
            if state.is_playing() {
                Icon { kind: IconKind::Pause, class: "w-5 h-5".to_string() }
            } else {
                Icon { kind: IconKind::Play, class: "w-5 h-5".to_string() }
            }
        }
    }
}

#[component]
pub(super) fn PrevButton() -> Element {
    let store = use_context::<PlayerStore>();
    let snapshot = use_context::<PlayerSnapshot>().0;
    let state = snapshot();
    let enabled = state.current_episode().is_some() && state.has_previous();

    rsx! {
        button {
            id: "prev-btn",
            r#type: "button",
            class: TOGGLE_OFF,
            disabled: !enabled,
            onclick: move |_| store.play_previous(),
            Icon { kind: IconKind::Prev, class: "w-5 h-5".to_string() }
        }
    }
}

#[component]
pub(super) fn NextButton() -> Element {
    let store = use_context::<PlayerStore>();
    let snapshot = use_context::<PlayerSnapshot>().0;
    let state = snapshot();
    let enabled = state.current_episode().is_some() && state.has_next();

    rsx! {
        button {
            id: "next-btn",
            r#type: "button",
            class: TOGGLE_OFF,
            disabled: !enabled,
            onclick: move |_| store.play_next(),
            Icon { kind: IconKind::Next, class: "w-5 h-5".to_string() }
        }
    }
}

/// Shuffle only makes sense with more than one queued episode.
#[component]
pub(super) fn ShuffleButton() -> Element {
    let store = use_context::<PlayerStore>();
    let snapshot = use_context::<PlayerSnapshot>().0;
    let state = snapshot();
    let enabled = state.episode_list().len() > 1;

    rsx! {
        button {
            id: "shuffle-btn",
            r#type: "button",
            class: if state.is_shuffling() { TOGGLE_ON } else { TOGGLE_OFF },
            disabled: !enabled,
            onclick: move |_| store.toggle_shuffle(),
            Icon { kind: IconKind::Shuffle, class: "w-5 h-5".to_string() }
        }
    }
}

#[component]
pub(super) fn LoopButton() -> Element {
    let store = use_context::<PlayerStore>();
    let snapshot = use_context::<PlayerSnapshot>().0;
    let state = snapshot();
    let has_episode = state.current_episode().is_some();

    rsx! {
        button {
            id: "loop-btn",
            r#type: "button",
            class: if state.is_looping() { TOGGLE_ON } else { TOGGLE_OFF },
            disabled: !has_episode,
            onclick: move |_| store.toggle_loop(),
            Icon { kind: IconKind::Repeat, class: "w-5 h-5".to_string() }
        }
    }
}
