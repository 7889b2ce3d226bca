//! Samotpravil async client implementation.

use crate::models::{ApiResponse, Pagination, SendEmailOptions, StatusQuery};
use crate::request::{self, RequestDescriptor};
use crate::{Error, Result};
use reqwest::StatusCode;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, Secret};
use std::time::Duration;

/// Async client for the Samotpravil transactional email API.
///
/// Use [`Client::new`] for defaults or [`Client::builder`] for a custom host,
/// timeout, proxy or user agent. The client holds no mutable state, so a
/// shared reference can drive any number of concurrent calls.
#[derive(Debug)]
pub struct Client {
    http: reqwest::Client,
    authorization: HeaderValue,
    host: String,
}

impl Client {
    /// Create a builder for configuring the client.
    pub fn builder(api_key: impl Into<String>) -> ClientBuilder {
        ClientBuilder::new(api_key)
    }

    /// Create a client for the production API.
    ///
    /// No network activity happens here.
    ///
    /// # Examples
    /// ```no_run
    /// # use samotpravil_client::Client;
    /// let client = Client::new("secret-key")?;
    /// # Ok::<(), samotpravil_client::Error>(())
    /// ```
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        ClientBuilder::new(api_key).build()
    }

    /// Base host every endpoint is joined onto.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Send an email.
    ///
    /// Both addresses are validated before anything is sent. If
    /// `options.name_from` is set the sender goes out as `"{name} <{email_from}>"`.
    ///
    /// # Examples
    /// ```no_run
    /// # use samotpravil_client::{Client, SendEmailOptions};
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), samotpravil_client::Error> {
    /// let client = Client::new("secret-key")?;
    /// let options = SendEmailOptions::new()
    ///     .name_from("Shop")
    ///     .params(serde_json::json!({"user": "Kate"}))
    ///     .track_open(true);
    /// let response = client
    ///     .send_email(
    ///         "kate@example.com",
    ///         "Hi, {{ params.user }}",
    ///         "<p>Welcome</p>",
    ///         "info@shop.example",
    ///         &options,
    ///     )
    ///     .await?;
    /// println!("{:?}", response.get("issue_id"));
    /// # Ok(())
    /// # }
    /// ```
    pub async fn send_email(
        &self,
        email_to: &str,
        subject: &str,
        message_text: &str,
        email_from: &str,
        options: &SendEmailOptions,
    ) -> Result<ApiResponse> {
        let request = request::send_email(email_to, subject, message_text, email_from, options)?;
        self.execute(request).await
    }

    /// Delivery status of sent mail, filtered by whichever keys of `query` are set.
    ///
    /// # Examples
    /// ```no_run
    /// # use samotpravil_client::{Client, StatusQuery};
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), samotpravil_client::Error> {
    /// let client = Client::new("secret-key")?;
    /// let status = client.get_status(&StatusQuery::by_email("kate@example.com")).await?;
    /// println!("{:?}", status.as_map());
    /// # Ok(())
    /// # }
    /// ```
    pub async fn get_status(&self, query: &StatusQuery) -> Result<ApiResponse> {
        self.execute(request::status(query)?).await
    }

    /// Sending statistics between two dates (`YYYY-MM-DD`).
    pub async fn get_statistics(
        &self,
        date_from: &str,
        date_to: &str,
        page: Pagination,
    ) -> Result<ApiResponse> {
        self.execute(request::statistics(date_from, date_to, page)?).await
    }

    /// Non-delivery report between two dates (`YYYY-MM-DD`).
    pub async fn get_non_delivery_by_date(
        &self,
        date_from: &str,
        date_to: &str,
        page: Pagination,
    ) -> Result<ApiResponse> {
        self.execute(request::non_delivery(date_from, date_to, page)?).await
    }

    /// Feedback-loop (spam complaint) report between two dates (`YYYY-MM-DD`).
    pub async fn get_fbl_report_by_date(
        &self,
        date_from: &str,
        date_to: &str,
        page: Pagination,
    ) -> Result<ApiResponse> {
        self.execute(request::fbl_report(date_from, date_to, page)?).await
    }

    /// Look an address up in the stop-list.
    pub async fn stop_list_search(&self, email: &str) -> Result<ApiResponse> {
        self.execute(request::stop_list_search(email)?).await
    }

    /// Add an address to the stop-list of `info@{domain}`.
    pub async fn stop_list_add(&self, email: &str, domain: &str) -> Result<ApiResponse> {
        self.execute(request::stop_list_add(email, domain)?).await
    }

    /// Remove an address from the stop-list of `info@{domain}`.
    pub async fn stop_list_remove(&self, email: &str, domain: &str) -> Result<ApiResponse> {
        self.execute(request::stop_list_remove(email, domain)?).await
    }

    /// List the sender domains registered on the account.
    pub async fn get_domains(&self) -> Result<ApiResponse> {
        self.execute(request::domains()?).await
    }

    /// Register a sender domain on the account.
    pub async fn domain_add(&self, domain: &str) -> Result<ApiResponse> {
        self.execute(request::domain_add(domain)?).await
    }

    /// Remove a sender domain from the account.
    pub async fn domain_remove(&self, domain: &str) -> Result<ApiResponse> {
        self.execute(request::domain_remove(domain)?).await
    }

    /// Ask the service to re-check the DNS verification records of `domain`.
    pub async fn domain_check_verification(&self, domain: &str) -> Result<ApiResponse> {
        self.execute(request::domain_verify(domain)?).await
    }

    /// Single request path shared by every operation.
    ///
    /// The payload is sent as a JSON body for every method, GET included.
    /// Only a 200 is accepted; its body must be a JSON object whose `status`
    /// is `ok` in any case.
    #[tracing::instrument(
        name = "samotpravil.request",
        skip(self, request),
        fields(method = %request.method, endpoint = request.endpoint)
    )]
    async fn execute(&self, request: RequestDescriptor) -> Result<ApiResponse> {
        let url = self.url(request.endpoint);

        let response = self
            .http
            .request(request.method, &url)
            .headers(self.headers())
            .json(&request.payload)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "request failed");
                Error::network(e)
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            tracing::warn!(%status, "unexpected HTTP status");
            return Err(Error::status(status));
        }

        let body = response.bytes().await.map_err(Error::network)?;
        let decoded: ApiResponse = serde_json::from_slice(&body).map_err(Error::Decode)?;

        if decoded.is_ok() {
            tracing::debug!("request succeeded");
            Ok(decoded)
        } else {
            let message = decoded.message().unwrap_or_default().to_string();
            tracing::warn!(api_status = ?decoded.status(), %message, "API reported failure");
            Err(Error::Api { message })
        }
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.host, endpoint)
    }

    /// Build headers for API requests.
    fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(AUTHORIZATION, self.authorization.clone());
        headers
    }
}

/// Production API base URL.
pub const DEFAULT_HOST: &str = "https://api.samotpravil.com/";
const USER_AGENT_VALUE: &str = concat!("samotpravil-client/", env!("CARGO_PKG_VERSION"));

/// Builder for configuring a Samotpravil client.
///
/// Start with [`Client::builder`] to override defaults.
#[derive(Debug)]
pub struct ClientBuilder {
    api_key: Secret<String>,
    host: String,
    timeout: Option<Duration>,
    proxy: Option<String>,
    danger_accept_invalid_certs: bool,
    user_agent: String,
}

impl ClientBuilder {
    /// Create a new builder with default settings.
    ///
    /// Defaults:
    /// - Production host ([`DEFAULT_HOST`])
    /// - No timeout beyond reqwest's own
    /// - No proxy
    /// - `danger_accept_invalid_certs = false`
    /// - `samotpravil-client/<version>` user agent
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            host: DEFAULT_HOST.to_string(),
            timeout: None,
            proxy: None,
            danger_accept_invalid_certs: false,
            user_agent: USER_AGENT_VALUE.to_string(),
        }
    }

    /// Override the API base URL.
    ///
    /// Useful for testing or for a regional endpoint.
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Give up on a request after `timeout`.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set a proxy URL (e.g., "socks5://127.0.0.1:1080").
    ///
    /// This uses reqwest's proxy support for all requests.
    pub fn proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }

    /// Control whether to accept invalid TLS certificates (default: false).
    pub fn danger_accept_invalid_certs(mut self, value: bool) -> Self {
        self.danger_accept_invalid_certs = value;
        self
    }

    /// Override the default user agent string.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Build the client. Does not contact the API.
    ///
    /// # Examples
    /// ```no_run
    /// # use samotpravil_client::Client;
    /// # use std::time::Duration;
    /// let client = Client::builder("secret-key")
    ///     .host("https://api.samotpravil.com")
    ///     .timeout(Duration::from_secs(10))
    ///     .build()?;
    /// # Ok::<(), samotpravil_client::Error>(())
    /// ```
    pub fn build(self) -> Result<Client> {
        let mut authorization = HeaderValue::from_str(self.api_key.expose_secret())?;
        authorization.set_sensitive(true);

        let mut builder = reqwest::Client::builder()
            .danger_accept_invalid_certs(self.danger_accept_invalid_certs)
            .user_agent(self.user_agent);

        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        if let Some(proxy_url) = &self.proxy {
            let proxy = reqwest::Proxy::all(proxy_url).map_err(Error::Http)?;
            builder = builder.proxy(proxy);
        }

        let http = builder.build().map_err(Error::Http)?;

        Ok(Client {
            http,
            authorization,
            host: self.host.trim_end_matches('/').to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn host_is_joined_without_double_slash() {
        let client = Client::new("key").unwrap();
        assert_eq!(client.host(), "https://api.samotpravil.com");
        assert_eq!(
            client.url("api/v2/mail/send"),
            "https://api.samotpravil.com/api/v2/mail/send"
        );

        let client = Client::builder("key")
            .host("http://localhost:8080")
            .build()
            .unwrap();
        assert_eq!(
            client.url("api/v2/blist/domains"),
            "http://localhost:8080/api/v2/blist/domains"
        );
    }

    #[test]
    fn api_key_sent_verbatim() {
        let client = Client::new("s3cr3t-key").unwrap();
        let headers = client.headers();
        assert_eq!(headers[AUTHORIZATION], "s3cr3t-key");
        assert_eq!(headers[CONTENT_TYPE], "application/json");
    }

    #[test]
    fn api_key_hidden_from_debug() {
        let client = Client::new("s3cr3t-key").unwrap();
        assert!(!format!("{client:?}").contains("s3cr3t-key"));
        let builder = Client::builder("s3cr3t-key");
        assert!(!format!("{builder:?}").contains("s3cr3t-key"));
    }

    #[test]
    fn invalid_api_key_is_rejected() {
        let err = Client::new("bad\nkey").unwrap_err();
        assert!(matches!(err, Error::InvalidApiKey(_)));
    }

    #[test]
    fn invalid_proxy_is_rejected() {
        let err = Client::builder("key")
            .proxy("::not a url::")
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::Http(_)));
    }

    #[test]
    fn client_is_shareable_across_tasks() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Client>();
    }
}
