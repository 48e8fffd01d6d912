mod config;
mod gallery;
mod models;
mod router;
mod utils;

use crate::config::CONFIG;
use crate::router::{switch, Route};
use web_sys::console;
use yew::prelude::*;
use yew_router::prelude::*;

#[function_component(App)]
pub fn app() -> Html {
    html! {
        <BrowserRouter>
            <Switch<Route> render={switch} />
        </BrowserRouter>
    }
}

fn main() {
    yew::Renderer::<App>::new().render();

    console::log_1(
        &format!(
            "NAME: \"{}\", API: \"{}\" DEBUG: \"{}\"",
            CONFIG.app_name, CONFIG.backend_url, CONFIG.debug
        )
        .into(),
    );
}
