use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client as ReqwestClient, RequestBuilder, Response};
use serde_json::Value;
use tracing::{debug, error, info, instrument};

use crate::auth::BearerAuth;
use crate::config::ClientConfig;
use crate::credentials::Credentials;
use crate::error::SfError;
use crate::record::Record;
use crate::response::SfResponse;

pub type SfResult<T> = Result<T, SfError>;

/// Characters left alone by JavaScript's `encodeURIComponent`.
const QUERY_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// REST client for one org. Endpoints and token are fixed at construction;
/// clones share the underlying HTTP connection pool.
#[derive(Debug, Clone)]
pub struct SfClient {
    query_url: String,
    sobject_url: String,
    api_version: String,
    client: ReqwestClient,
    auth: BearerAuth,
}

impl SfClient {
    pub fn new(credentials: &Credentials) -> Self {
        Self::with_http_client(credentials, ClientConfig::default(), ReqwestClient::new())
    }

    pub fn with_config(credentials: &Credentials, config: ClientConfig) -> SfResult<Self> {
        let mut builder = ReqwestClient::builder();
        if let Some(user_agent) = &config.user_agent {
            builder = builder.user_agent(user_agent);
        }
        let client = builder.build().map_err(|e| {
            error!("Failed to build HTTP client: {:?}", e);
            SfError::HttpClient(e)
        })?;
        Ok(Self::with_http_client(credentials, config, client))
    }

    /// Use a caller-configured `reqwest::Client`, e.g. one with timeouts.
    pub fn with_http_client(
        credentials: &Credentials,
        config: ClientConfig,
        client: ReqwestClient,
    ) -> Self {
        let base = format!(
            "{}/services/data/{}",
            credentials.instance_url().trim_end_matches('/'),
            config.api_version
        );
        SfClient {
            query_url: format!("{}/query?q=", base),
            sobject_url: format!("{}/sobjects", base),
            api_version: config.api_version,
            client,
            auth: BearerAuth::new(credentials.access_token()),
        }
    }

    pub fn query_url(&self) -> &str {
        &self.query_url
    }

    pub fn sobject_url(&self) -> &str {
        &self.sobject_url
    }

    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    /// Run a SOQL query. Only the first batch of results is returned; follow
    /// `nextRecordsUrl` in the body yourself if you need more.
    #[instrument(skip(self))]
    pub async fn query(&self, soql: &str) -> SfResult<SfResponse> {
        let url = format!(
            "{}{}",
            self.query_url,
            utf8_percent_encode(soql, QUERY_COMPONENT)
        );
        info!("Sending GET request to URL: {}", url);

        let request = self.client.get(&url);
        self.send(request, &url).await
    }

    /// Create a record of `sobject` type. On success the body carries the new id.
    #[instrument(skip(self, record))]
    pub async fn insert(&self, sobject: &str, record: &Record) -> SfResult<SfResponse> {
        let url = format!("{}/{}", self.sobject_url, sobject);
        info!("Sending POST request to URL: {}", url);

        let request = self.with_body(self.client.post(&url), record)?;
        self.send(request, &url).await
    }

    /// Patch the given fields of an existing record.
    #[instrument(skip(self, record))]
    pub async fn update(&self, sobject: &str, id: &str, record: &Record) -> SfResult<SfResponse> {
        let url = format!("{}/{}/{}", self.sobject_url, sobject, id);
        info!("Sending PATCH request to URL: {}", url);

        let request = self.with_body(self.client.patch(&url), record)?;
        self.send(request, &url).await
    }

    fn with_body(&self, request: RequestBuilder, record: &Record) -> SfResult<RequestBuilder> {
        let json_body = serde_json::to_string(record).map_err(|e| {
            error!("Failed to serialize body: {:?}", e);
            SfError::Serialize(e)
        })?;
        debug!("Serialized body: {}", json_body);
        Ok(request.body(json_body))
    }

    async fn send(&self, request: RequestBuilder, url: &str) -> SfResult<SfResponse> {
        let request = self
            .auth
            .apply_auth(request)
            .header(CONTENT_TYPE, "application/json");

        let response = request.send().await.map_err(|e| {
            error!("Network error while sending request to {}: {:?}", url, e);
            SfError::Network(e)
        })?;

        let status = response.status();
        let msg = reason_phrase(&response);
        let text = response.text().await.map_err(|e| {
            error!("Failed to read response body from {}: {:?}", url, e);
            SfError::Network(e)
        })?;
        debug!("Received status {} ({} bytes)", status, text.len());

        let body = if text.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text).map_err(|source| {
                error!("Failed to parse JSON response: {:?}", source);
                SfError::MalformedBody { status, source }
            })?
        };

        Ok(SfResponse::new(status, msg, body))
    }
}

/// The phrase from the status line. Hyper only keeps it when it differs from
/// the canonical one, so fall back to that.
fn reason_phrase(response: &Response) -> String {
    match response.extensions().get::<hyper::ext::ReasonPhrase>() {
        Some(phrase) => String::from_utf8_lossy(phrase.as_bytes()).into_owned(),
        None => response
            .status()
            .canonical_reason()
            .unwrap_or_default()
            .to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfigBuilder;

    fn credentials() -> Credentials {
        Credentials::new("https://acme.my.salesforce.com", "00Dxx!token")
    }

    #[test]
    fn derives_endpoints_from_instance_url() {
        let client = SfClient::new(&credentials());
        assert_eq!(
            client.query_url(),
            "https://acme.my.salesforce.com/services/data/v60.0/query?q="
        );
        assert_eq!(
            client.sobject_url(),
            "https://acme.my.salesforce.com/services/data/v60.0/sobjects"
        );
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let client = SfClient::new(&Credentials::new("https://acme.my.salesforce.com/", "t"));
        assert!(client
            .sobject_url()
            .starts_with("https://acme.my.salesforce.com/services/data/"));
    }

    #[test]
    fn configured_version_is_shared_by_both_endpoints() {
        let config = ClientConfigBuilder::default().api_version("v61.0").build().unwrap();
        let client = SfClient::with_config(&credentials(), config).unwrap();
        assert_eq!(client.api_version(), "v61.0");
        assert!(client.query_url().contains("/services/data/v61.0/query"));
        assert!(client.sobject_url().contains("/services/data/v61.0/sobjects"));
    }

    #[test]
    fn query_encoding_matches_uri_component_rules() {
        let encoded = utf8_percent_encode(
            "SELECT Id FROM Account WHERE Name = 'A & B' AND X__c != (1)",
            QUERY_COMPONENT,
        )
        .to_string();
        assert_eq!(
            encoded,
            "SELECT%20Id%20FROM%20Account%20WHERE%20Name%20%3D%20'A%20%26%20B'%20AND%20X__c%20!%3D%20(1)"
        );
    }

    #[test]
    fn debug_does_not_leak_token() {
        let client = SfClient::new(&credentials());
        assert!(!format!("{:?}", client).contains("00Dxx!token"));
    }
}
