use dioxus::prelude::*;

mod api;
mod components;
mod download;
mod utils;

use components::AppShell;

const APP_CSS: Asset = asset!("/assets/main.css");

fn main() {
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    rsx! {
        document::Title { "Pustaka Media" }
        document::Meta { name: "theme-color", content: "#1d4ed8" }
        document::Meta { name: "mobile-web-app-capable", content: "yes" }
        document::Stylesheet { href: APP_CSS }

        AppShell {}
    }
}
