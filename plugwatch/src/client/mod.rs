pub mod http;
#[cfg(test)]
pub(crate) mod mock;

use async_trait::async_trait;
use tapo::{response::ControlChildResult, TapoRequest, TapoResponse};

pub use http::HttpClient;

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
	/// The request never produced a response (connection failure, timeout, ...).
	#[error("transport error: {0}")]
	Transport(#[source] BoxError),
	#[error("malformed response: {0}")]
	Decode(#[from] serde_json::Error),
	#[error("device responded with HTTP status {0}")]
	Http(reqwest::StatusCode),
	#[error("device returned an empty response")]
	EmptyResponse,
}

impl From<reqwest::Error> for ClientError {
	fn from(error: reqwest::Error) -> Self {
		Self::Transport(Box::new(error))
	}
}

/// Connection to a single Tapo device.
///
/// Implementations only need to provide [`TapoClient::execute`]; the other
/// operations are expressed in terms of it. A structured device-side error is
/// returned as a non-success [`TapoResponse`], never as an `Err`.
#[async_trait]
pub trait TapoClient: Send + Sync {
	/// Sends one request to the device and returns its response envelope.
	async fn execute(&self, request: TapoRequest) -> Result<TapoResponse, ClientError>;

	async fn get_device_info(&self) -> Result<TapoResponse, ClientError> {
		self.execute(TapoRequest::get_device_info()).await
	}

	async fn get_energy_usage(&self) -> Result<TapoResponse, ClientError> {
		self.execute(TapoRequest::get_energy_usage()).await
	}

	async fn get_current_power(&self) -> Result<TapoResponse, ClientError> {
		self.execute(TapoRequest::get_current_power()).await
	}

	/// Sends `request` to the child device `child_id` through this connection
	/// and returns the child's own response.
	async fn control_child(
		&self,
		child_id: &str,
		request: TapoRequest,
	) -> Result<TapoResponse, ClientError> {
		let response = self
			.execute(TapoRequest::control_child(child_id, request))
			.await?;
		unwrap_child_response(response)
	}
}

/// Extracts the child's response from a `control_child` envelope.
///
/// An error code at any level of the envelope is passed on as a failed
/// response.
fn unwrap_child_response(response: TapoResponse) -> Result<TapoResponse, ClientError> {
	if !response.is_success() {
		return Ok(response);
	}

	let result = response.into_value().ok_or(ClientError::EmptyResponse)?;
	let ControlChildResult { response_data } = serde_json::from_value(result)?;
	if !response_data.is_success() {
		return Ok(TapoResponse {
			error_code: response_data.error_code,
			result: None,
			msg: response_data.msg,
		});
	}

	response_data
		.into_value()
		.and_then(|multiple| multiple.responses.into_iter().next())
		.map(|first| first.response)
		.ok_or(ClientError::EmptyResponse)
}
