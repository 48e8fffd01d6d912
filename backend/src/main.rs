#[macro_use]
extern crate rocket;

mod api;
mod config;
mod error;
mod models;
mod services;
mod utils;

use crate::config::{create_app_state, create_cors, init_logger, load_environment, Config};
use crate::services::youtube_client::VideoSource;
use log::info;
use rocket::{Build, Rocket};

pub struct AppState {
    pub config: Config,
    pub source: Box<dyn VideoSource>,
}

pub fn build_rocket(state: AppState) -> anyhow::Result<Rocket<Build>> {
    let cors = create_cors(&state.config)?;

    Ok(rocket::build()
        .manage(state)
        .mount("/", routes![api::list_videos, api::health::health])
        .attach(cors))
}

#[rocket::main]
async fn main() -> anyhow::Result<()> {
    load_environment();
    init_logger();

    let config = Config::from_env();
    info!(
        "Gallery query {:?} in region {}, {} videos per page",
        config.search_query, config.region_code, config.videos_per_page
    );

    let state = create_app_state(config)?;
    let _rocket = build_rocket(state)?
        .launch()
        .await
        .map_err(|e| anyhow::anyhow!("Rocket failed: {e}"))?;

    Ok(())
}
