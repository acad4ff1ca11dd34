//! Browser-backed playback handle. Non-wasm builds get a silent stub so
//! the component tree still compiles for desktop targets.

#[cfg(target_arch = "wasm32")]
mod web {
    use crate::components::audio_preview::session::MediaHandle;
    use dioxus::logger::tracing::warn;
    use dioxus::prelude::spawn;
    use wasm_bindgen_futures::JsFuture;
    use web_sys::HtmlAudioElement;

    /// One detached `<audio>` element per media item. It never enters the
    /// DOM; the browser keeps it alive as long as we hold the reference.
    #[derive(Clone)]
    pub struct WebAudioHandle {
        element: HtmlAudioElement,
    }

    pub fn open(file_url: &str) -> Option<WebAudioHandle> {
        match HtmlAudioElement::new_with_src(file_url) {
            Ok(element) => {
                element.set_preload("metadata");
                Some(WebAudioHandle { element })
            }
            Err(err) => {
                warn!("failed to create audio element: {err:?}");
                None
            }
        }
    }

    impl MediaHandle for WebAudioHandle {
        fn play(&self) {
            // play() hands back a promise; surface rejections (autoplay
            // policy, unsupported codec) in the log instead of letting
            // them vanish.
            if let Ok(promise) = self.element.play() {
                let element = self.element.clone();
                spawn(async move {
                    if let Err(err) = JsFuture::from(promise).await {
                        let detail = element
                            .error()
                            .map(|e| format!("media error code {}", e.code()))
                            .unwrap_or_else(|| format!("{err:?}"));
                        warn!("playback start rejected: {detail}");
                    }
                });
            }
        }

        fn pause(&self) {
            let _ = self.element.pause();
        }

        fn set_volume(&self, volume: f64) {
            self.element.set_volume(volume);
        }

        fn set_playback_rate(&self, rate: f64) {
            self.element.set_playback_rate(rate);
        }

        fn set_position(&self, seconds: f64) {
            self.element.set_current_time(seconds);
        }

        fn position(&self) -> f64 {
            self.element.current_time()
        }

        fn duration(&self) -> f64 {
            self.element.duration()
        }

        fn has_ended(&self) -> bool {
            self.element.ended()
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::{open, WebAudioHandle as PlatformHandle};

#[cfg(not(target_arch = "wasm32"))]
mod stub {
    use crate::components::audio_preview::session::MediaHandle;

    #[derive(Clone, Default)]
    pub struct NullAudioHandle;

    pub fn open(_file_url: &str) -> Option<NullAudioHandle> {
        Some(NullAudioHandle)
    }

    impl MediaHandle for NullAudioHandle {
        fn play(&self) {}
        fn pause(&self) {}
        fn set_volume(&self, _volume: f64) {}
        fn set_playback_rate(&self, _rate: f64) {}
        fn set_position(&self, _seconds: f64) {}
        fn position(&self) -> f64 {
            0.0
        }
        fn duration(&self) -> f64 {
            f64::NAN
        }
        fn has_ended(&self) -> bool {
            false
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use stub::{open, NullAudioHandle as PlatformHandle};
