use super::SharedSession;
use crate::components::Icon;
use crate::utils::format_time;
use dioxus::prelude::*;

const PLAYBACK_RATES: [f64; 4] = [0.5, 1.0, 1.5, 2.0];

/// Seek / volume / mute / rate controls for the item that is currently
/// audible. Rendered only while its row is the active one.
#[component]
pub(super) fn PlaybackControls(session: SharedSession) -> Element {
    let mut session = session;

    let (current_time, duration, muted, volume, rate) = {
        let s = session.read();
        (
            s.current_time(),
            s.duration(),
            s.muted(),
            s.volume(),
            s.playback_rate(),
        )
    };

    rsx! {
        div { class: "playback-controls",
            div { class: "seek-row",
                span { class: "time-label", "{format_time(current_time)}" }
                input {
                    r#type: "range",
                    class: "seek-slider",
                    min: "0",
                    max: "{duration.max(0.0)}",
                    step: "0.1",
                    value: "{current_time}",
                    oninput: move |e| {
                        if let Ok(seconds) = e.value().parse::<f64>() {
                            session.write().seek(seconds);
                        }
                    },
                }
                span { class: "time-label", "{format_time(duration)}" }
            }
            div { class: "control-row",
                button {
                    class: "mute-button",
                    aria_label: if muted { "Unmute" } else { "Mute" },
                    onclick: move |_| session.write().toggle_mute(),
                    Icon {
                        name: (if muted { "volume-x" } else { "volume" }).to_string(),
                        class: "icon-sm".to_string(),
                    }
                }
                input {
                    r#type: "range",
                    class: "volume-slider",
                    min: "0",
                    max: "1",
                    step: "0.01",
                    value: "{volume}",
                    oninput: move |e| {
                        if let Ok(level) = e.value().parse::<f64>() {
                            session.write().set_volume(level);
                        }
                    },
                }
                div { class: "rate-buttons",
                    for option in PLAYBACK_RATES {
                        button {
                            key: "{option}",
                            class: if (rate - option).abs() < f64::EPSILON { "rate-button active" } else { "rate-button" },
                            onclick: move |_| session.write().set_playback_rate(option),
                            "{option}x"
                        }
                    }
                }
            }
        }
    }
}
