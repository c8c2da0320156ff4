pub(crate) mod weather;

use crate::models::{NewNote, Note, NotePatch, NoteUpdate, Weekday};
use serde::{Deserialize, Serialize};

const NOTES_TABLE: &str = "zettel";
const DEFAULT_BUCKET: &str = "zettel_bilder";
const DEFAULT_API_URL: &str = "http://localhost:54321";

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum ApiErrorKind {
    Unauthorized,
    Network,
    Http,
    Parse,
}

#[derive(Clone, Debug, thiserror::Error)]
#[error("{message}")]
pub(crate) struct ApiError {
    pub kind: ApiErrorKind,
    pub message: String,
}

impl ApiError {
    fn network(e: reqwest::Error) -> Self {
        Self {
            kind: ApiErrorKind::Network,
            message: e.to_string(),
        }
    }

    fn parse(e: impl std::fmt::Display) -> Self {
        Self {
            kind: ApiErrorKind::Parse,
            message: e.to_string(),
        }
    }

    fn unauthorized() -> Self {
        Self {
            kind: ApiErrorKind::Unauthorized,
            message: "Unauthorized".to_string(),
        }
    }

    fn http(status: reqwest::StatusCode, body: String, ctx: &str) -> Self {
        Self {
            kind: ApiErrorKind::Http,
            message: format!("{ctx} ({status}): {body}"),
        }
    }
}

pub(crate) type ApiResult<T> = Result<T, ApiError>;

/// Runtime configuration injected by the hosting page as `window.ENV`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub(crate) struct EnvConfig {
    pub api_url: String,
    pub api_key: String,
    pub image_bucket: String,
    pub weather_lat: f64,
    pub weather_lon: f64,
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_key: String::new(),
            image_bucket: DEFAULT_BUCKET.to_string(),
            weather_lat: weather::DEFAULT_LAT,
            weather_lon: weather::DEFAULT_LON,
        }
    }
}

impl EnvConfig {
    /// Read `window.ENV`, accepting both `SUPABASE_URL` and `supabase_url` style keys.
    pub fn from_window() -> Self {
        let mut config = Self::default();

        let Some(env) = web_sys::window()
            .and_then(|w| w.get("ENV"))
            .filter(|env| !env.is_undefined() && env.is_object())
        else {
            tracing::warn!("window.ENV is missing; using local defaults");
            return config;
        };

        let get = |key: &str| {
            [key.to_string(), key.to_lowercase()]
                .iter()
                .find_map(|k| {
                    js_sys::Reflect::get(&env, &k.as_str().into())
                        .ok()
                        .filter(|v| !v.is_undefined() && !v.is_null())
                })
        };

        if let Some(url) = get("SUPABASE_URL").and_then(|v| v.as_string()) {
            config.api_url = url.trim_end_matches('/').to_string();
        }
        if let Some(key) = get("SUPABASE_KEY").and_then(|v| v.as_string()) {
            config.api_key = key;
        }
        if let Some(bucket) = get("IMAGE_BUCKET").and_then(|v| v.as_string()) {
            config.image_bucket = bucket;
        }
        let number = |v: wasm_bindgen::JsValue| {
            v.as_f64()
                .or_else(|| v.as_string().and_then(|s| parse_coordinate(&s)))
        };
        if let Some(lat) = get("WEATHER_LAT").and_then(number) {
            config.weather_lat = lat;
        }
        if let Some(lon) = get("WEATHER_LON").and_then(number) {
            config.weather_lon = lon;
        }

        config
    }

    /// Websocket endpoint of the realtime service behind the same host.
    pub fn realtime_url(&self) -> String {
        let base = if let Some(rest) = self.api_url.strip_prefix("https://") {
            format!("wss://{rest}")
        } else if let Some(rest) = self.api_url.strip_prefix("http://") {
            format!("ws://{rest}")
        } else {
            self.api_url.clone()
        };
        format!(
            "{}/realtime/v1/websocket?apikey={}&vsn=1.0.0",
            base.trim_end_matches('/'),
            urlencoding::encode(&self.api_key)
        )
    }
}

/// Client for the `zettel` table (PostgREST) and the image bucket (object storage).
#[derive(Clone, Debug)]
pub(crate) struct ApiClient {
    pub(crate) config: EnvConfig,
}

impl ApiClient {
    pub fn new(config: EnvConfig) -> Self {
        Self { config }
    }

    pub fn from_window() -> Self {
        Self::new(EnvConfig::from_window())
    }

    fn table_url(&self) -> String {
        format!("{}/rest/v1/{}", self.config.api_url, NOTES_TABLE)
    }

    pub(crate) fn day_filter_url(&self, day: Weekday) -> String {
        format!(
            "{}?select=*&day=eq.{}",
            self.table_url(),
            urlencoding::encode(day.as_ref())
        )
    }

    pub(crate) fn id_filter_url(&self, id: i64) -> String {
        format!("{}?id=eq.{}", self.table_url(), id)
    }

    fn object_url(&self, name: &str) -> String {
        format!(
            "{}/storage/v1/object/{}/{}",
            self.config.api_url,
            self.config.image_bucket,
            urlencoding::encode(name)
        )
    }

    pub(crate) fn public_image_url(&self, name: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.config.api_url,
            self.config.image_bucket,
            urlencoding::encode(name)
        )
    }

    fn with_auth_headers(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        req.header("apikey", &self.config.api_key)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
    }

    async fn send(&self, req: reqwest::RequestBuilder, ctx: &str) -> ApiResult<reqwest::Response> {
        let res = self
            .with_auth_headers(req)
            .send()
            .await
            .map_err(ApiError::network)?;

        let status = res.status();
        if status.is_success() {
            Ok(res)
        } else if status.as_u16() == 401 || status.as_u16() == 403 {
            Err(ApiError::unauthorized())
        } else {
            let body = res.text().await.unwrap_or_default();
            Err(ApiError::http(status, body, ctx))
        }
    }

    async fn send_json<T: serde::de::DeserializeOwned>(
        &self,
        req: reqwest::RequestBuilder,
        ctx: &str,
    ) -> ApiResult<T> {
        let res = self.send(req, ctx).await?;
        res.json().await.map_err(ApiError::parse)
    }

    pub async fn load_notes(&self, day: Weekday) -> ApiResult<Vec<Note>> {
        let client = reqwest::Client::new();
        let notes: Vec<Note> = self
            .send_json(client.get(self.day_filter_url(day)), "Load notes failed")
            .await?;
        tracing::debug!(day = %day, count = notes.len(), "loaded notes");
        Ok(notes)
    }

    pub async fn insert_note(&self, note: &NewNote) -> ApiResult<Note> {
        let mut created = self.insert_notes(std::slice::from_ref(note)).await?;
        created
            .pop()
            .ok_or_else(|| ApiError::parse("Insert succeeded but returned no row"))
    }

    pub async fn insert_notes(&self, notes: &[NewNote]) -> ApiResult<Vec<Note>> {
        if notes.is_empty() {
            return Ok(vec![]);
        }
        let client = reqwest::Client::new();
        let req = client
            .post(self.table_url())
            .header("Prefer", "return=representation")
            .json(notes);
        self.send_json(req, "Insert failed").await
    }

    pub async fn update_note(&self, id: i64, update: &NoteUpdate) -> ApiResult<()> {
        let client = reqwest::Client::new();
        let req = client.patch(self.id_filter_url(id)).json(update);
        self.send(req, "Update failed").await?;
        Ok(())
    }

    /// Bulk update as an upsert keyed by id. All patches must carry the same columns.
    pub async fn update_notes(&self, patches: &[NotePatch]) -> ApiResult<()> {
        if patches.is_empty() {
            return Ok(());
        }
        let client = reqwest::Client::new();
        let req = client
            .post(self.table_url())
            .header("Prefer", "resolution=merge-duplicates")
            .json(patches);
        self.send(req, "Bulk update failed").await?;
        Ok(())
    }

    pub async fn delete_note(&self, id: i64) -> ApiResult<()> {
        let client = reqwest::Client::new();
        self.send(client.delete(self.id_filter_url(id)), "Delete failed")
            .await?;
        Ok(())
    }

    pub async fn delete_day(&self, day: Weekday) -> ApiResult<()> {
        let client = reqwest::Client::new();
        let url = format!(
            "{}?day=eq.{}",
            self.table_url(),
            urlencoding::encode(day.as_ref())
        );
        self.send(client.delete(url), "Clearing day failed").await?;
        Ok(())
    }

    /// Upload image bytes and return their public URL.
    pub async fn upload_image(&self, name: &str, mime: &str, bytes: Vec<u8>) -> ApiResult<String> {
        let client = reqwest::Client::new();
        let req = client
            .post(self.object_url(name))
            .header("Content-Type", mime)
            .header("cache-control", "max-age=3600")
            .header("x-upsert", "false")
            .body(bytes);
        self.send(req, "Image upload failed").await?;
        Ok(self.public_image_url(name))
    }

    pub async fn remove_images(&self, names: &[String]) -> ApiResult<()> {
        if names.is_empty() {
            return Ok(());
        }
        let client = reqwest::Client::new();
        let url = format!(
            "{}/storage/v1/object/{}",
            self.config.api_url, self.config.image_bucket
        );
        let req = client
            .delete(url)
            .json(&serde_json::json!({ "prefixes": names }));
        self.send(req, "Image removal failed").await?;
        Ok(())
    }

    /// Best-effort removal of the blobs behind public image URLs; failures are only logged.
    pub async fn remove_images_for(&self, urls: impl IntoIterator<Item = &str>) {
        let names: Vec<String> = urls
            .into_iter()
            .filter_map(image_name_from_url)
            .collect();
        if let Err(e) = self.remove_images(&names).await {
            tracing::warn!(error = %e, count = names.len(), "image cleanup failed");
        }
    }
}

/// Coordinate given as text in `window.ENV`, e.g. `"48.7"`.
pub(crate) fn parse_coordinate(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Object name of a stored image: the last path segment of its public URL.
pub(crate) fn image_name_from_url(url: &str) -> Option<String> {
    let segment = url.split(['?', '#']).next()?.rsplit('/').next()?;
    if segment.trim().is_empty() {
        return None;
    }
    Some(
        urlencoding::decode(segment)
            .map(|s| s.into_owned())
            .unwrap_or_else(|_| segment.to_string()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> ApiClient {
        ApiClient::new(EnvConfig {
            api_url: "https://abc.supabase.co".to_string(),
            api_key: "anon-key".to_string(),
            ..EnvConfig::default()
        })
    }

    #[test]
    fn test_env_config_defaults() {
        let config = EnvConfig::default();
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.image_bucket, "zettel_bilder");
    }

    #[test]
    fn test_parse_coordinate() {
        assert_eq!(parse_coordinate("48.7"), Some(48.7));
        assert_eq!(parse_coordinate(" 9.18 "), Some(9.18));
        assert_eq!(parse_coordinate("nord"), None);
        assert_eq!(parse_coordinate("NaN"), None);
    }

    #[test]
    fn test_day_filter_url() {
        assert_eq!(
            client().day_filter_url(Weekday::Mittwoch),
            "https://abc.supabase.co/rest/v1/zettel?select=*&day=eq.Mittwoch"
        );
        assert_eq!(
            client().id_filter_url(42),
            "https://abc.supabase.co/rest/v1/zettel?id=eq.42"
        );
    }

    #[test]
    fn test_realtime_url_switches_scheme() {
        assert_eq!(
            client().config.realtime_url(),
            "wss://abc.supabase.co/realtime/v1/websocket?apikey=anon-key&vsn=1.0.0"
        );

        let local = EnvConfig {
            api_url: "http://localhost:54321/".to_string(),
            api_key: "k".to_string(),
            ..EnvConfig::default()
        };
        assert_eq!(
            local.realtime_url(),
            "ws://localhost:54321/realtime/v1/websocket?apikey=k&vsn=1.0.0"
        );
    }

    #[test]
    fn test_public_image_url_and_back() {
        let url = client().public_image_url("12_1700000000000.png");
        assert_eq!(
            url,
            "https://abc.supabase.co/storage/v1/object/public/zettel_bilder/12_1700000000000.png"
        );
        assert_eq!(
            image_name_from_url(&url).as_deref(),
            Some("12_1700000000000.png")
        );
    }

    #[test]
    fn test_image_name_from_url_edge_cases() {
        assert_eq!(
            image_name_from_url("https://x/a%20b.jpg?t=1").as_deref(),
            Some("a b.jpg")
        );
        assert_eq!(image_name_from_url("https://x/bucket/"), None);
    }

    #[test]
    fn test_api_error_display_is_message() {
        let e = ApiError::unauthorized();
        assert_eq!(e.to_string(), "Unauthorized");
        assert_eq!(e.kind, ApiErrorKind::Unauthorized);
    }
}
