use super::{ClientError, TapoClient};
use async_trait::async_trait;
use reqwest::{
	header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE},
	ClientBuilder, IntoUrl,
};
use std::time::Duration;
use tapo::{TapoRequest, TapoResponse};
use url::Url;

/// Sends plain JSON requests to a device's `/app` endpoint.
///
/// This does not perform any handshake; the device (or a bridge in front of
/// it) must accept unencrypted requests, optionally authorised by a session
/// token.
#[derive(Clone, Debug)]
pub struct HttpClient {
	client: reqwest::Client,
	url: Url,
}

impl HttpClient {
	/// Creates a new device client.
	///
	/// # Arguments
	/// * `host` - The base URL of the device.
	/// * `token` - Session token appended to every request, if any.
	/// * `timeout` - Upper bound on the duration of a single request.
	///
	/// # Errors
	/// Returns an error if the URL is invalid or the HTTP client cannot be
	/// built.
	///
	pub fn new(
		host: impl IntoUrl,
		token: Option<&str>,
		timeout: Duration,
	) -> Result<Self, ClientError> {
		let mut url = host.into_url()?;
		url.set_path("/app");
		if let Some(token) = token {
			url.query_pairs_mut().append_pair("token", token);
		}

		let mut default_headers = HeaderMap::new();
		default_headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
		default_headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

		// Build the HTTP client. This will be reused for all requests.
		//
		let client = ClientBuilder::new()
			.default_headers(default_headers)
			.timeout(timeout)
			.build()?;

		Ok(Self { client, url })
	}

	/// Returns the host name of the device.
	pub fn host(&self) -> &str {
		self.url.host_str().unwrap_or_default()
	}

	#[cfg(test)]
	pub(crate) fn url(&self) -> &Url {
		&self.url
	}
}

#[async_trait]
impl TapoClient for HttpClient {
	async fn execute(&self, request: TapoRequest) -> Result<TapoResponse, ClientError> {
		tracing::trace!("sending '{}' request to {}", request.method, self.host());

		let response = self
			.client
			.post(self.url.clone())
			.json(&request)
			.send()
			.await?;

		let status = response.status();
		if !status.is_success() {
			tracing::warn!(
				"device {} answered '{}' with HTTP status {status}",
				self.host(),
				request.method
			);
			return Err(ClientError::Http(status));
		}

		let body = response.bytes().await?;
		Ok(serde_json::from_slice(&body)?)
	}
}
