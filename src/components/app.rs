use crate::api::load_catalog;
use crate::components::{AudioController, EpisodeList, Icon, IconKind, Player};
use crate::player::{PlayerState, PlayerStore};
use crate::settings::{load_settings, save_settings, AppSettings, DEFAULT_VOLUME};
use dioxus::prelude::*;
use serde::Deserialize;
use std::rc::Rc;
use tracing::warn;

/// Latest player state, re-published on every store change.
#[derive(Clone, Copy)]
pub struct PlayerSnapshot(pub Signal<PlayerState>);

#[derive(Clone, Copy)]
pub struct VolumeSignal(pub Signal<f64>);

/// Position and length of the loaded episode, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
pub struct PlaybackProgress {
    pub current_time: f64,
    pub duration: f64,
}

#[derive(Clone, Copy)]
pub struct ProgressSignal(pub Signal<PlaybackProgress>);

fn initial_volume() -> f64 {
    match load_settings() {
        Ok(settings) => settings.volume,
        Err(err) => {
            warn!("failed to load settings, using defaults: {err}");
            DEFAULT_VOLUME
        }
    }
}

#[component]
pub fn AppShell() -> Element {
    let store = use_hook(PlayerStore::new);
    let snapshot = use_signal(|| store.snapshot());
    let volume = use_signal(initial_volume);
    let progress = use_signal(PlaybackProgress::default);
    let catalog = use_hook(|| load_catalog().map_err(|err| err.to_string()));

    // Held for the lifetime of the shell.
    let subscription = use_hook({
        let store = store.clone();
        move || {
            Rc::new(store.subscribe(move |state| {
                let mut snapshot = snapshot;
                snapshot.set(state.clone());
            }))
        }
    });
    use_drop({
        let store = store.clone();
        let id = subscription.id();
        move || {
            store.unsubscribe(id);
        }
    });

    use_context_provider(|| store.clone());
    use_context_provider(|| PlayerSnapshot(snapshot));
    use_context_provider(|| VolumeSignal(volume));
    use_context_provider(|| ProgressSignal(progress));

    use_effect(move || {
        let settings = AppSettings { volume: volume() };
        if let Err(err) = save_settings(&settings) {
            warn!("failed to save settings: {err}");
        }
    });

    let content = match catalog {
        Ok(episodes) => rsx! {
            EpisodeList { episodes: episodes }
        },
        Err(message) => rsx! {
            p { class: "catalog-error", "{message}" }
        },
    };

    rsx! {
        div { class: "app-shell",
            main { class: "app-main",
                header { class: "app-header",
                    Icon { kind: IconKind::Headphones, class: "app-logo".to_string() }
                    h1 { "Podplayer" }
                }
                {content}
            }
            Player {}
            AudioController {}
        }
    }
}
