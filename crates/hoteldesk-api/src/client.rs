// Async HTTP client for the hotel management REST API.
//
// Base path: {base}/api/{rooms|guests|bookings}
// No authentication. JSON in, JSON out.

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::collection::Collection;
use crate::envelope;
use crate::error::Error;
use crate::transport::TransportConfig;

// ── Error response shape ─────────────────────────────────────────────

#[derive(serde::Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

// ── Client ───────────────────────────────────────────────────────────

/// Async client for the hotel management API.
///
/// Every collection shares the same verbs, so the generic helpers here are
/// exposed as typed methods (`list_rooms`, `create_guest`, ...) in the
/// `resources` module.
#[derive(Debug, Clone)]
pub struct HotelClient {
    http: reqwest::Client,
    base_url: Url,
}

impl HotelClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build a client for `base_url` using the given transport settings.
    pub fn new(base_url: &str, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Self::with_client(base_url, http)
    }

    /// Wrap an existing `reqwest::Client`.
    pub fn with_client(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        let base_url = Self::normalize_base_url(base_url)?;
        Ok(Self { http, base_url })
    }

    /// Parse the base URL and make sure path segments can be appended.
    fn normalize_base_url(raw: &str) -> Result<Url, Error> {
        let mut url = Url::parse(raw.trim())?;
        if url.cannot_be_a_base() {
            return Err(Error::InvalidBaseUrl(raw.to_owned()));
        }

        let path = url.path().trim_end_matches('/').to_owned();
        url.set_path(&format!("{path}/"));
        url.set_query(None);
        url.set_fragment(None);
        Ok(url)
    }

    /// The API root (always ends with `/`).
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builders ─────────────────────────────────────────────────

    fn endpoint(&self, segments: &[&str]) -> Result<Url, Error> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| Error::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// `{base}/api/{collection}`
    pub fn collection_url(&self, collection: Collection) -> Result<Url, Error> {
        self.endpoint(&["api", collection.path()])
    }

    /// `{base}/api/{collection}/{id}`. The id is percent-encoded.
    pub fn item_url(&self, collection: Collection, id: &str) -> Result<Url, Error> {
        self.endpoint(&["api", collection.path(), id])
    }

    // ── Generic verbs ────────────────────────────────────────────────

    /// GET a whole collection. Records that fail to decode are skipped.
    pub async fn list<T: DeserializeOwned>(&self, collection: Collection) -> Result<Vec<T>, Error> {
        let url = self.collection_url(collection)?;
        debug!("GET {url}");

        let resp = self.http.get(url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(Self::parse_error(status, resp).await);
        }

        let body = resp.text().await?;
        let items = envelope::parse_list_body(collection, &body);
        Ok(envelope::decode_items(collection, items))
    }

    /// POST a new record. Returns the created record when the server echoes
    /// one back in a decodable shape.
    pub async fn create<T, B>(&self, collection: Collection, body: &B) -> Result<Option<T>, Error>
    where
        T: DeserializeOwned,
        B: Serialize + Sync,
    {
        let url = self.collection_url(collection)?;
        debug!("POST {url}");

        let resp = self.http.post(url).json(body).send().await?;
        Self::handle_record(resp).await
    }

    /// PUT a full replacement of record `id`.
    pub async fn update<T, B>(
        &self,
        collection: Collection,
        id: &str,
        body: &B,
    ) -> Result<Option<T>, Error>
    where
        T: DeserializeOwned,
        B: Serialize + Sync,
    {
        let url = self.item_url(collection, id)?;
        debug!("PUT {url}");

        let resp = self.http.put(url).json(body).send().await?;
        Self::handle_record(resp).await
    }

    /// DELETE record `id`.
    pub async fn delete(&self, collection: Collection, id: &str) -> Result<(), Error> {
        let url = self.item_url(collection, id)?;
        debug!("DELETE {url}");

        let resp = self.http.delete(url).send().await?;
        Self::handle_empty(resp).await
    }

    /// Liveness probe: GET `{base}/`.
    ///
    /// `Ok(true)` for a success status, `Ok(false)` for any other status,
    /// `Err` when no response arrived.
    pub async fn ping(&self) -> Result<bool, Error> {
        let url = self.base_url.clone();
        debug!("GET {url}");

        let resp = self.http.get(url).send().await?;
        Ok(resp.status().is_success())
    }

    // ── Response handling ────────────────────────────────────────────

    async fn handle_record<T: DeserializeOwned>(
        resp: reqwest::Response,
    ) -> Result<Option<T>, Error> {
        let status = resp.status();
        if !status.is_success() {
            return Err(Self::parse_error(status, resp).await);
        }

        let body = resp.text().await?;
        if body.trim().is_empty() {
            return Ok(None);
        }

        let record = serde_json::from_str::<serde_json::Value>(&body)
            .map(envelope::unwrap_record)
            .and_then(serde_json::from_value::<T>);

        match record {
            Ok(record) => Ok(Some(record)),
            Err(e) => {
                let preview = envelope::preview(&body);
                debug!("response is not a record: {e} (body preview: {preview:?})");
                Ok(None)
            }
        }
    }

    async fn handle_empty(resp: reqwest::Response) -> Result<(), Error> {
        let status = resp.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(Self::parse_error(status, resp).await)
        }
    }

    async fn parse_error(status: reqwest::StatusCode, resp: reqwest::Response) -> Error {
        let raw = resp.text().await.unwrap_or_default();

        let message = serde_json::from_str::<ErrorResponse>(&raw)
            .ok()
            .and_then(|err| err.error.or(err.message))
            .filter(|m| !m.trim().is_empty());

        if message.is_none() && !raw.is_empty() {
            let preview = envelope::preview(&raw);
            debug!("HTTP {status} without error payload: {preview:?}");
        }

        Error::Api {
            status: status.as_u16(),
            message,
        }
    }
}
