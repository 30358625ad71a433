use core::time::Duration;

use reqwest::{
    Client, Url,
    header::{ACCEPT, HeaderMap, HeaderName, HeaderValue},
};
use serde::de::DeserializeOwned;

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{Directory, DirectoryError, RegionSummary, SubRegion};

/// A fixed header credential sent with every request.
#[derive(Clone, Debug)]
pub struct Credential {
    name: HeaderName,
    value: HeaderValue,
}

impl Credential {
    /// Builds a credential from a header name and its secret value.
    ///
    /// The value is marked sensitive so it never shows up in `Debug` output.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::InvalidCredential`] if either part is not a
    /// valid HTTP header component.
    pub fn new(name: &str, value: &str) -> Result<Self, DirectoryError> {
        let name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
            DirectoryError::InvalidCredential {
                reason: format!("header name {name:?}: {e}"),
            }
        })?;
        let mut value =
            HeaderValue::from_str(value).map_err(|e| DirectoryError::InvalidCredential {
                reason: format!("header value for {name}: {e}"),
            })?;
        value.set_sensitive(true);
        Ok(Self { name, value })
    }

    pub fn header_name(&self) -> &HeaderName {
        &self.name
    }
}

/// [`Directory`] backed by the remote HTTP service.
///
/// Endpoints, relative to `base_url`:
/// - `GET /regions`
/// - `GET /regions/{code}/sub-regions`
#[derive(Clone, Debug)]
pub struct HttpDirectory {
    client: Client,
    base_url: Url,
}

impl HttpDirectory {
    /// Creates a client for the service rooted at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::InvalidBaseUrl`] if `base_url` is not an
    /// absolute URL with a path, and [`DirectoryError::Client`] if the
    /// underlying HTTP client cannot be initialized (e.g. the TLS backend
    /// fails to load).
    pub fn new(
        base_url: &str,
        credential: Option<Credential>,
        timeout: Duration,
    ) -> Result<Self, DirectoryError> {
        let invalid = |reason: String| DirectoryError::InvalidBaseUrl {
            url: base_url.to_owned(),
            reason,
        };
        let base_url = Url::parse(base_url).map_err(|e| invalid(e.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(invalid("cannot carry a path".to_owned()));
        }

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if let Some(Credential { name, value }) = credential {
            headers.insert(name, value);
        }

        let client = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(DirectoryError::Client)?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Appends `segments` to the base path. Each segment is percent-encoded,
    /// so `/`, `?` and `#` inside a service code stay within its segment.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, DirectoryError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| DirectoryError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                reason: "cannot carry a path".to_owned(),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    #[cfg_attr(feature = "tracing", instrument(level = "debug", skip(self, url), fields(url = %url)))]
    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, DirectoryError> {
        let response = match self.client.get(url.clone()).send().await {
            Ok(response) => response,
            Err(source) => {
                return Err(DirectoryError::Transport {
                    url: url.into(),
                    source,
                });
            }
        };

        let status = response.status();
        if !status.is_success() {
            let body = match response.text().await {
                Ok(body) => body,
                Err(e) => format!("<unreadable body: {e}>"),
            };
            return Err(DirectoryError::Status {
                url: url.into(),
                status: status.as_u16(),
                body,
            });
        }

        let bytes = match response.bytes().await {
            Ok(bytes) => bytes,
            Err(source) => {
                return Err(DirectoryError::Transport {
                    url: url.into(),
                    source,
                });
            }
        };
        serde_json::from_slice(&bytes).map_err(|source| DirectoryError::Decode {
            url: url.into(),
            source,
        })
    }
}

impl Directory for HttpDirectory {
    async fn list_regions(&self) -> Result<Vec<RegionSummary>, DirectoryError> {
        self.get_json(self.endpoint(&["regions"])?).await
    }

    async fn list_sub_regions(&self, region_code: &str) -> Result<Vec<SubRegion>, DirectoryError> {
        self.get_json(self.endpoint(&["regions", region_code, "sub-regions"])?)
            .await
    }
}
