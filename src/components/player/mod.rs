use crate::api::format_duration;
use crate::components::{
    seek_to, Icon, IconKind, PlaybackProgress, PlayerSnapshot, ProgressSignal, VolumeSignal,
};
use dioxus::prelude::*;

mod controls;

use controls::{LoopButton, NextButton, PlayPauseButton, PrevButton, ShuffleButton};

#[component]
pub fn Player() -> Element {
    let snapshot = use_context::<PlayerSnapshot>().0;
    let progress = use_context::<ProgressSignal>().0;
    let mut volume = use_context::<VolumeSignal>().0;

    let state = snapshot();
    let has_episode = state.current_episode().is_some();
    let PlaybackProgress {
        current_time,
        duration,
    } = progress();
    let elapsed = format_duration(current_time as u32);
    let total = format_duration(duration as u32);
    let volume_percent = (volume() * 100.0).round();

    let on_seek_input = move |e: Event<FormData>| {
        if let Ok(position) = e.value().parse::<f64>() {
            seek_to(position);
        }
    };

    let on_volume_change = move |e: Event<FormData>| {
        if let Ok(val) = e.value().parse::<f64>() {
            volume.set((val / 100.0).clamp(0.0, 1.0));
        }
    };

    let now_playing = match state.current_episode() {
        Some(episode) => {
            let thumbnail = episode.thumbnail().to_string();
            let title = episode.title().to_string();
            let members = episode.members().to_string();
            rsx! {
                div { class: "current-episode",
                    img {
                        class: "current-thumbnail",
                        src: "{thumbnail}",
                        alt: "{title}",
                        width: "592",
                        height: "592",
                    }
                    strong { "{title}" }
                    span { "{members}" }
                }
            }
        }
        None => rsx! {
            div { class: "empty-player",
                strong { "Select a podcast to listen" }
            }
        },
    };

    rsx! {
        aside { class: "player",
            header { class: "player-header",
                Icon { kind: IconKind::Headphones, class: "w-8 h-8".to_string() }
                strong { "Now playing" }
            }
            {now_playing}
            footer { class: if has_episode { "player-footer" } else { "player-footer empty" },
                div { class: "progress",
                    span { "{elapsed}" }
                    input {
                        r#type: "range",
                        class: "progress-slider",
                        min: "0",
                        max: "{duration}",
                        step: "1",
                        value: "{current_time}",
                        disabled: !has_episode,
                        oninput: on_seek_input,
                    }
                    span { "{total}" }
                }
                div { class: "buttons",
                    ShuffleButton {}
                    PrevButton {}
                    PlayPauseButton {}
                    NextButton {}
                    LoopButton {}
                }
                div { class: "volume",
                    Icon { kind: IconKind::Volume, class: "w-4 h-4".to_string() }
                    input {
                        r#type: "range",
                        class: "volume-slider",
                        min: "0",
                        max: "100",
                        value: "{volume_percent}",
                        oninput: on_volume_change,
                    }
                }
            }
        }
    }
}
