//! Test doubles for code that talks to a [`TapoClient`].

use super::{ClientError, TapoClient};
use async_trait::async_trait;
use serde_json::Value;
use std::{
	collections::BTreeMap,
	io,
	sync::{Arc, Mutex},
};
use tapo::{TapoRequest, TapoResponse};
use tracing::subscriber::DefaultGuard;

/// Canned answer for one request method.
#[derive(Clone, Debug)]
pub(crate) enum Reply {
	Success(Value),
	Failure(i32),
	/// Success envelope with no `result`.
	Empty,
	Transport,
	/// Never resolves.
	Pending,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Call {
	Execute(String),
	DeviceInfo,
	EnergyUsage,
	CurrentPower,
	ControlChild { child_id: String, method: String },
}

/// Client that answers each request method with a scripted [`Reply`] and
/// records every call it receives. Unscripted methods fail with error code
/// -1.
#[derive(Debug, Default)]
pub(crate) struct ScriptedClient {
	replies: Mutex<BTreeMap<String, Reply>>,
	calls: Mutex<Vec<Call>>,
}

impl ScriptedClient {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_reply(self, method: &str, reply: Reply) -> Self {
		self.set_reply(method, reply);
		self
	}

	pub fn set_reply(&self, method: &str, reply: Reply) {
		self.replies.lock().unwrap().insert(method.into(), reply);
	}

	pub fn calls(&self) -> Vec<Call> {
		self.calls.lock().unwrap().clone()
	}

	pub fn clear_calls(&self) {
		self.calls.lock().unwrap().clear();
	}

	async fn respond(&self, call: Call, method: &str) -> Result<TapoResponse, ClientError> {
		self.calls.lock().unwrap().push(call);
		let reply = self
			.replies
			.lock()
			.unwrap()
			.get(method)
			.cloned()
			.unwrap_or(Reply::Failure(-1));

		match reply {
			Reply::Success(value) => Ok(TapoResponse::success(value)),
			Reply::Failure(code) => Ok(TapoResponse::failure(code)),
			Reply::Empty => Ok(TapoResponse {
				error_code: 0,
				result: None,
				msg: None,
			}),
			Reply::Transport => Err(ClientError::Transport(Box::new(io::Error::new(
				io::ErrorKind::ConnectionReset,
				"connection reset by peer",
			)))),
			Reply::Pending => std::future::pending().await,
		}
	}
}

#[async_trait]
impl TapoClient for ScriptedClient {
	async fn execute(&self, request: TapoRequest) -> Result<TapoResponse, ClientError> {
		self.respond(Call::Execute(request.method.clone()), &request.method)
			.await
	}

	async fn get_device_info(&self) -> Result<TapoResponse, ClientError> {
		self.respond(Call::DeviceInfo, "get_device_info").await
	}

	async fn get_energy_usage(&self) -> Result<TapoResponse, ClientError> {
		self.respond(Call::EnergyUsage, "get_energy_usage").await
	}

	async fn get_current_power(&self) -> Result<TapoResponse, ClientError> {
		self.respond(Call::CurrentPower, "get_current_power").await
	}

	async fn control_child(
		&self,
		child_id: &str,
		request: TapoRequest,
	) -> Result<TapoResponse, ClientError> {
		let call = Call::ControlChild {
			child_id: child_id.into(),
			method: request.method.clone(),
		};
		self.respond(call, &request.method).await
	}
}

/// In-memory sink for formatted log output.
#[derive(Clone, Debug, Default)]
pub(crate) struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
	pub fn contents(&self) -> String {
		String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
	}
}

impl io::Write for LogBuffer {
	fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
		self.0.lock().unwrap().extend_from_slice(buf);
		Ok(buf.len())
	}

	fn flush(&mut self) -> io::Result<()> {
		Ok(())
	}
}

/// Captures every event at DEBUG or above emitted on the current thread until
/// the returned guard is dropped.
pub(crate) fn capture_logs() -> (LogBuffer, DefaultGuard) {
	let buffer = LogBuffer::default();
	let writer = buffer.clone();
	let subscriber = tracing_subscriber::fmt()
		.with_max_level(tracing::Level::DEBUG)
		.with_ansi(false)
		.with_writer(move || writer.clone())
		.finish();

	(buffer, tracing::subscriber::set_default(subscriber))
}
