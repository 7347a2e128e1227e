use super::DeviceComponent;
use crate::client::{ClientError, TapoClient};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::{fmt, sync::Arc};
use tapo::{EnergyInfo, PowerInfo, TapoRequest, TapoResponse};

/// How telemetry requests reach the outlet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Addressing {
	/// The outlet is the device the client is connected to.
	Direct,
	/// The outlet is a socket of a power strip, addressed by its child ID
	/// through the strip's connection.
	Child(String),
}

impl Addressing {
	pub fn child_id(&self) -> Option<&str> {
		match self {
			Self::Direct => None,
			Self::Child(id) => Some(id),
		}
	}
}

impl From<Option<String>> for Addressing {
	fn from(child_id: Option<String>) -> Self {
		match child_id {
			Some(id) => Self::Child(id),
			None => Self::Direct,
		}
	}
}

impl fmt::Display for Addressing {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Direct => write!(f, "device"),
			Self::Child(id) => write!(f, "child '{id}'"),
		}
	}
}

#[derive(Debug, thiserror::Error)]
enum RefreshError {
	#[error(transparent)]
	Client(#[from] ClientError),
	#[error("malformed {kind} payload: {source}")]
	Decode {
		kind: &'static str,
		#[source]
		source: serde_json::Error,
	},
	#[error("{kind} response carried no result")]
	MissingResult { kind: &'static str },
}

/// Keeps the most recent energy usage and power readings of one outlet.
///
/// Each [`refresh`](Self::refresh) replaces both readings. A reading the
/// device refuses to provide is cleared on its own; any other failure clears
/// both and is only logged.
#[derive(Debug)]
pub struct TelemetryRefresher<C> {
	client: Arc<C>,
	addressing: Addressing,
	energy: Option<EnergyInfo>,
	power: Option<PowerInfo>,
}

impl<C: TapoClient> TelemetryRefresher<C> {
	/// Creates a refresher for the outlet `child_id` of the device behind
	/// `client`, or for the device itself if `child_id` is `None`.
	pub fn new(client: Arc<C>, child_id: Option<String>) -> Self {
		Self {
			client,
			addressing: child_id.into(),
			energy: None,
			power: None,
		}
	}

	pub fn direct(client: Arc<C>) -> Self {
		Self::new(client, None)
	}

	pub fn child(client: Arc<C>, child_id: impl Into<String>) -> Self {
		Self::new(client, Some(child_id.into()))
	}

	pub fn addressing(&self) -> &Addressing {
		&self.addressing
	}

	/// Fetches fresh readings from the device. Never fails.
	///
	/// Neither reading is touched until both requests have completed, so a
	/// cancelled refresh leaves the previous readings in place.
	pub async fn refresh(&mut self, _current_state: Option<&Value>) {
		match self.fetch().await {
			Ok((energy, power)) => {
				self.energy = energy;
				self.power = power;
			}
			Err(error) => {
				tracing::debug!(
					"failed to refresh energy telemetry for child {:?}: {error}",
					self.addressing.child_id()
				);
				self.energy = None;
				self.power = None;
			}
		}
	}

	async fn fetch(&self) -> Result<(Option<EnergyInfo>, Option<PowerInfo>), RefreshError> {
		let (energy, power) = match &self.addressing {
			Addressing::Direct => tokio::try_join!(
				self.client.get_energy_usage(),
				self.client.get_current_power()
			)?,
			Addressing::Child(id) => {
				let energy_request = TapoRequest::get_energy_usage();
				let power_request = TapoRequest::get_current_power();
				tokio::try_join!(
					self.client.control_child(id, energy_request),
					self.client.control_child(id, power_request)
				)?
			}
		};

		Ok((
			decode_reading(energy, "energy usage")?,
			decode_reading(power, "current power")?,
		))
	}

	/// Energy usage from the last refresh, if it succeeded.
	pub fn energy_info(&self) -> Option<&EnergyInfo> {
		self.energy.as_ref()
	}

	/// Power draw from the last refresh, if it succeeded.
	pub fn power_info(&self) -> Option<&PowerInfo> {
		self.power.as_ref()
	}
}

#[async_trait]
impl<C: TapoClient> DeviceComponent for TelemetryRefresher<C> {
	async fn update(&mut self, current_state: Option<&Value>) {
		self.refresh(current_state).await
	}
}

fn decode_reading<T: DeserializeOwned>(
	response: TapoResponse,
	kind: &'static str,
) -> Result<Option<T>, RefreshError> {
	if !response.is_success() {
		tracing::trace!("{kind} request failed with error code {}", response.error_code);
		return Ok(None);
	}

	let decoded = response
		.decode::<T>()
		.map_err(|source| RefreshError::Decode { kind, source })?;
	decoded
		.into_value()
		.map(Some)
		.ok_or(RefreshError::MissingResult { kind })
}
