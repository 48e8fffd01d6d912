use lazy_static::lazy_static;
use log::warn;

const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";
const DEFAULT_APP_NAME: &str = "Top most viewed music videos in Vietnam";

lazy_static! {
    pub static ref CONFIG: RuntimeConfig = RuntimeConfig::from_window();
}

/// Gallery settings injected by `index.html` as `window.ENV_CONFIG`.
#[derive(Debug, Clone, PartialEq)]
pub struct RuntimeConfig {
    pub backend_url: String,
    pub app_name: String,
    pub debug: bool,
}

impl RuntimeConfig {
    pub fn from_window() -> Self {
        let env_config = web_sys::window()
            .and_then(|window| js_sys::Reflect::get(&window, &"ENV_CONFIG".into()).ok())
            .filter(|value| !value.is_undefined());

        if env_config.is_none() {
            warn!("window.ENV_CONFIG is undefined, using built-in defaults");
        }

        Self::from_lookup(|key| {
            js_sys::Reflect::get(env_config.as_ref()?, &key.into())
                .ok()?
                .as_string()
        })
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        RuntimeConfig {
            backend_url: lookup("BACKEND_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .filter(|url| !url.is_empty())
                .unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string()),
            app_name: lookup("APP_NAME").unwrap_or_else(|| DEFAULT_APP_NAME.to_string()),
            debug: lookup("DEBUG_MODE")
                .and_then(|flag| flag.parse().ok())
                .unwrap_or(false),
        }
    }

    pub fn videos_url(&self, page: usize) -> String {
        format!("{}/videos?page={}", self.backend_url, page)
    }
}
