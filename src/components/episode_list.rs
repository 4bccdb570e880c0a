use crate::api::{format_duration, Episode};
use crate::components::{Icon, IconKind, PlayerSnapshot};
use crate::player::PlayerStore;
use dioxus::prelude::*;
use tracing::warn;

/// Lists every episode; playing one queues the whole list from that point.
#[component]
pub fn EpisodeList(episodes: Vec<Episode>) -> Element {
    let store = use_context::<PlayerStore>();
    let snapshot = use_context::<PlayerSnapshot>().0;
    let playing_id = snapshot()
        .current_episode()
        .map(|episode| episode.id().to_string());

    rsx! {
        section { class: "episode-list",
            h2 { "All episodes" }
            if episodes.is_empty() {
                p { class: "empty-catalog", "No episodes yet." }
            }
            ul {
                for (index, episode) in episodes.iter().enumerate() {
                    EpisodeRow {
                        key: "{index}",
                        episode: episode.clone(),
                        is_current: playing_id.as_deref() == Some(episode.id()),
                        on_play: {
                            let store = store.clone();
                            let queue = episodes.clone();
                            move |_| {
                                if let Err(err) = store.play_list(queue.clone(), index) {
                                    warn!("cannot start queue: {err}");
                                }
                            }
                        },
                        on_play_only: {
                            let store = store.clone();
                            let episode = episode.clone();
                            move |_| store.play(episode.clone())
                        },
                    }
                }
            }
        }
    }
}

#[component]
fn EpisodeRow(
    episode: Episode,
    is_current: bool,
    on_play: EventHandler<()>,
    on_play_only: EventHandler<()>,
) -> Element {
    let thumbnail = episode.thumbnail().to_string();
    let title = episode.title().to_string();
    let members = episode.members().to_string();
    let published_at = episode.published_at().unwrap_or_default().to_string();
    let description = episode.description().unwrap_or_default().to_string();
    let duration = format_duration(episode.duration());

    rsx! {
        li { class: if is_current { "episode-row current" } else { "episode-row" },
            img {
                class: "episode-thumbnail",
                src: "{thumbnail}",
                alt: "{title}",
                width: "120",
                height: "120",
            }
            div { class: "episode-details",
                strong { title: "{description}", "{title}" }
                p { "{members}" }
                span { "{published_at}" }
                span { class: "episode-duration",
                    Icon { kind: IconKind::Clock, class: "w-3 h-3".to_string() }
                    "{duration}"
                }
            }
            button {
                r#type: "button",
                class: "episode-play",
                title: "Play from here",
                onclick: move |_| on_play.call(()),
                Icon { kind: IconKind::Play, class: "w-4 h-4".to_string() }
            }
            button {
                r#type: "button",
                class: "episode-play-only",
                title: "Play only this episode",
                onclick: move |_| on_play_only.call(()),
                "Only this"
            }
        }
    }
}
