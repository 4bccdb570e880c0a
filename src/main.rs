use dioxus::prelude::*;

mod api;
mod components;
mod player;
mod settings;

use components::AppShell;

const APP_CSS: Asset = asset!("/assets/styling/app.css");

fn main() {
    if let Err(err) = dioxus::logger::init(tracing::Level::INFO) {
        eprintln!("Failed to initialize logger: {err}");
    }
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    rsx! {
        document::Title { "Podplayer" }
        document::Meta { name: "theme-color", content: "#8257e5" }
        document::Stylesheet { href: APP_CSS }

        AppShell {}
    }
}
