//! HTTP client for the ip-api.com JSON endpoint.

use std::fmt;
use std::net::IpAddr;
use std::time::Duration;

use log::{debug, trace, warn};
use tokio_util::sync::CancellationToken;
use url::Url;

use crate::fields::{self, DEFAULT_FIELDS};
use crate::{IpApiError, Response};

/// Free tier, plain HTTP only.
const FREE_BASE: &str = "http://ip-api.com/";
/// Paid tier, requires an API key.
const PRO_BASE: &str = "https://pro.ip-api.com/";

/// Per-request timeout applied by [`Client::new`].
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// ip-api.com client.
///
/// Configuration is changed through `&mut self` setters, while [`query`]
/// only needs `&self`. A `Client` can therefore be shared between tasks
/// (e.g. behind an `Arc`) once configured, and reconfiguring it requires
/// exclusive access.
///
/// [`query`]: Client::query
pub struct Client {
    api_key: Option<String>,
    fields: String,
    timeout: Duration,
    base_url: Option<Url>,
    http: reqwest::Client,
}

impl Client {
    /// Creates a client with the default field selector and timeout.
    ///
    /// With `None` or an empty key the free endpoint is used; otherwise
    /// requests go to the pro endpoint over HTTPS and carry the key.
    ///
    /// # Example
    ///
    /// ```
    /// let free = ipapi::Client::new(None);
    /// assert!(!free.is_pro());
    ///
    /// let pro = ipapi::Client::new(Some("12345"));
    /// assert!(pro.is_pro());
    /// ```
    #[must_use]
    pub fn new(api_key: Option<&str>) -> Self {
        Self::with_http_client(api_key, reqwest::Client::new())
    }

    /// Like [`Client::new`], but reuses an existing `reqwest::Client` and its
    /// connection pool.
    #[must_use]
    pub fn with_http_client(api_key: Option<&str>, http: reqwest::Client) -> Self {
        Client {
            api_key: api_key.filter(|key| !key.is_empty()).map(str::to_owned),
            fields: DEFAULT_FIELDS.to_owned(),
            timeout: DEFAULT_TIMEOUT,
            base_url: None,
            http,
        }
    }

    /// Returns true if an API key is configured.
    #[must_use]
    pub fn is_pro(&self) -> bool {
        self.api_key.is_some()
    }

    #[must_use]
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    /// Current field selector, either a comma list or a decimal bitmask.
    #[must_use]
    pub fn fields(&self) -> &str {
        &self.fields
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Replaces the field selector.
    ///
    /// Unknown names and repeats are dropped and the first-seen order is kept.
    /// With `numeric` the selector becomes the decimal sum of the field bits,
    /// which the API accepts in place of the name list.
    ///
    /// # Example
    ///
    /// ```
    /// let mut client = ipapi::Client::new(None);
    ///
    /// client.set_fields(["status", "message", "query", "invalid1"], false);
    /// assert_eq!(client.fields(), "status,message,query");
    ///
    /// client.set_fields(["status", "query", "query", "message"], true);
    /// assert_eq!(client.fields(), "57344");
    /// ```
    pub fn set_fields<I, S>(&mut self, fields: I, numeric: bool)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let kept = fields::filter(fields);
        self.fields = if numeric {
            fields::encode_numeric(&kept)
        } else {
            fields::encode_names(&kept)
        };
    }

    /// Sets the timeout used by subsequent queries.
    pub fn set_timeout(&mut self, timeout: Duration) {
        self.timeout = timeout;
    }

    /// Sends requests to `base` instead of the ip-api.com host. This is used
    /// for proxies and for local test servers. Any path on `base` is kept as a
    /// prefix.
    pub fn set_base_url(&mut self, base: &str) -> Result<(), IpApiError> {
        let url = Url::parse(base)?;
        if url.cannot_be_a_base() {
            return Err(IpApiError::invalid_url(format!(
                "{base} cannot be a base url"
            )));
        }
        self.base_url = Some(url);
        Ok(())
    }

    /// Builds the request URL for `ip`. An empty `ip` looks up the caller's
    /// own address.
    ///
    /// # Example
    ///
    /// ```
    /// let mut client = ipapi::Client::new(Some("12345"));
    /// client.set_fields(["status", "query"], false);
    /// assert_eq!(
    ///     client.build_url("1.2.3.4").unwrap().as_str(),
    ///     "https://pro.ip-api.com/json/1.2.3.4?apiKey=12345&fields=status%2Cquery"
    /// );
    /// ```
    pub fn build_url(&self, ip: &str) -> Result<Url, IpApiError> {
        // `push` silently skips dot segments, which would turn the lookup
        // into a self-lookup
        if matches!(ip, "." | "..") {
            return Err(IpApiError::invalid_url(format!("invalid ip {ip:?}")));
        }

        let mut url = match &self.base_url {
            Some(base) => base.clone(),
            None if self.is_pro() => Url::parse(PRO_BASE)?,
            None => Url::parse(FREE_BASE)?,
        };

        url.path_segments_mut()
            .map_err(|()| IpApiError::invalid_url("url cannot be a base"))?
            .pop_if_empty()
            .push("json")
            .push(ip);

        {
            // alphabetical: apiKey, fields
            let mut pairs = url.query_pairs_mut();
            pairs.clear();
            if let Some(key) = &self.api_key {
                pairs.append_pair("apiKey", key);
            }
            pairs.append_pair("fields", &self.fields);
        }

        Ok(url)
    }

    /// Looks up `ip`, or the caller's own address when `ip` is empty.
    ///
    /// The request is abandoned when `cancel` fires or the configured timeout
    /// elapses. An answer with `"status": "fail"` is returned as `Ok`; check
    /// [`Response::is_success`] before using the location.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), ipapi::IpApiError> {
    /// use tokio_util::sync::CancellationToken;
    ///
    /// let client = ipapi::Client::new(None);
    /// let response = client.query(&CancellationToken::new(), "8.8.8.8").await?;
    /// match response.failure_reason() {
    ///     Some(reason) => println!("lookup failed: {reason}"),
    ///     None => println!("{:?}, {:?}", response.city, response.country),
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn query(
        &self,
        cancel: &CancellationToken,
        ip: &str,
    ) -> Result<Response, IpApiError> {
        if cancel.is_cancelled() {
            return Err(IpApiError::Cancelled);
        }

        let url = self.build_url(ip)?;
        // the query string may hold the key, so only the path is logged
        debug!("GET {} fields={}", url.path(), self.fields);

        let request = async {
            let response = self.http.get(url).send().await?;
            let status = response.status();
            if !status.is_success() {
                warn!("ip-api returned HTTP {status}");
            }
            Ok::<_, IpApiError>(response.bytes().await?)
        };

        let timeout = self.timeout;
        let body = tokio::select! {
            biased;
            () = cancel.cancelled() => return Err(IpApiError::Cancelled),
            result = tokio::time::timeout(timeout, request) => {
                result.map_err(|_| IpApiError::Timeout(timeout))??
            }
        };
        trace!("received {} byte body", body.len());

        Response::from_json(&body)
    }

    /// Looks up a typed address.
    pub async fn query_ip(
        &self,
        cancel: &CancellationToken,
        ip: IpAddr,
    ) -> Result<Response, IpApiError> {
        self.query(cancel, &ip.to_string()).await
    }

    /// Looks up the public address the request originates from.
    pub async fn query_self(&self, cancel: &CancellationToken) -> Result<Response, IpApiError> {
        self.query(cancel, "").await
    }
}

impl Default for Client {
    fn default() -> Self {
        Client::new(None)
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("fields", &self.fields)
            .field("timeout", &self.timeout)
            .field("base_url", &self.base_url.as_ref().map(Url::as_str))
            .finish_non_exhaustive()
    }
}
