use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3000/api";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuntimeConfig {
    pub api_base_url: Option<String>,
    pub time_zone: Option<String>,
}

static API_BASE_URL: OnceLock<String> = OnceLock::new();
static TIME_ZONE: OnceLock<Tz> = OnceLock::new();

#[cfg(target_arch = "wasm32")]
mod browser {
    use super::RuntimeConfig;

    fn read_global(name: &str) -> Option<js_sys::Object> {
        let w = web_sys::window()?;
        let any = js_sys::Reflect::get(&w, &name.into()).ok()?;
        if any.is_undefined() || any.is_null() {
            return None;
        }
        Some(js_sys::Object::from(any))
    }

    fn read_key(obj: &js_sys::Object, keys: &[&str]) -> Option<String> {
        keys.iter().find_map(|key| {
            js_sys::Reflect::get(obj, &(*key).into())
                .ok()
                .filter(|v| !v.is_undefined() && !v.is_null())
                .and_then(|v| v.as_string())
        })
    }

    // window.__CARMARKET_ENV (env.js) wins over window.__CARMARKET_CONFIG.
    pub fn snapshot_from_globals() -> Option<RuntimeConfig> {
        let obj = read_global("__CARMARKET_ENV").or_else(|| read_global("__CARMARKET_CONFIG"))?;
        Some(RuntimeConfig {
            api_base_url: read_key(&obj, &["API_BASE_URL", "api_base_url"]),
            time_zone: read_key(&obj, &["TIME_ZONE", "time_zone"]),
        })
    }

    pub async fn fetch_runtime_config() -> Option<RuntimeConfig> {
        let origin = web_sys::window()?.location().origin().ok()?;
        let resp = reqwest::get(format!("{}/config.json", origin)).await.ok()?;
        if !resp.status().is_success() {
            return None;
        }
        resp.json::<RuntimeConfig>().await.ok()
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod host {
    use super::RuntimeConfig;

    pub fn snapshot_from_globals() -> Option<RuntimeConfig> {
        let api_base_url = std::env::var("CARMARKET_API_BASE_URL").ok();
        let time_zone = std::env::var("CARMARKET_TIME_ZONE").ok();
        if api_base_url.is_none() && time_zone.is_none() {
            return None;
        }
        Some(RuntimeConfig {
            api_base_url,
            time_zone,
        })
    }

    pub async fn fetch_runtime_config() -> Option<RuntimeConfig> {
        None
    }
}

#[cfg(target_arch = "wasm32")]
use browser::{fetch_runtime_config, snapshot_from_globals};
#[cfg(not(target_arch = "wasm32"))]
use host::{fetch_runtime_config, snapshot_from_globals};

pub fn parse_time_zone(name: Option<&str>) -> Tz {
    match name.map(str::trim).filter(|n| !n.is_empty()) {
        Some(name) => name.parse::<Tz>().unwrap_or_else(|err| {
            log::warn!("Unknown time zone {:?} ({}), falling back to UTC", name, err);
            Tz::UTC
        }),
        None => Tz::UTC,
    }
}

fn cache(cfg: &RuntimeConfig) -> String {
    let _ = TIME_ZONE.set(parse_time_zone(cfg.time_zone.as_deref()));
    let url = cfg
        .api_base_url
        .clone()
        .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());
    API_BASE_URL.get_or_init(|| url).clone()
}

pub async fn await_api_base_url() -> String {
    if let Some(cached) = API_BASE_URL.get() {
        return cached.clone();
    }
    if let Some(existing) = snapshot_from_globals() {
        return cache(&existing);
    }
    if let Some(cfg) = fetch_runtime_config().await {
        return cache(&cfg);
    }
    cache(&RuntimeConfig::default())
}

pub fn current_time_zone() -> Tz {
    TIME_ZONE.get().copied().unwrap_or(Tz::UTC)
}

pub async fn init() {
    let base = await_api_base_url().await;
    log::info!(
        "Runtime config initialized (api: {}, tz: {})",
        base,
        current_time_zone()
    );
}
