use crate::{
	client::TapoClient,
	components::{DeviceComponent, TelemetryRefresher},
};
use serde_json::Value;
use std::{collections::BTreeMap, sync::Arc};
use tapo::DeviceInfo;

/// A smart plug or power strip and the components attached to it.
#[derive(Debug)]
pub struct PlugDevice<C> {
	name: String,
	client: Arc<C>,

	state: Option<Value>,
	info: Option<DeviceInfo>,
	energy: Option<TelemetryRefresher<C>>,
	sockets: BTreeMap<String, TelemetryRefresher<C>>,
}

impl<C: TapoClient> PlugDevice<C> {
	/// Creates a new device with the given name and no components.
	pub fn new(name: impl Into<String>, client: Arc<C>) -> Self {
		Self {
			name: name.into(),
			client,
			state: None,
			info: None,
			energy: None,
			sockets: BTreeMap::new(),
		}
	}

	/// Monitors the energy usage of the device itself.
	pub fn with_energy_monitoring(mut self) -> Self {
		self.energy = Some(TelemetryRefresher::direct(Arc::clone(&self.client)));
		self
	}

	/// Monitors the energy usage of the socket with the given child ID.
	pub fn with_socket(mut self, child_id: impl Into<String>) -> Self {
		let child_id = child_id.into();
		let refresher = TelemetryRefresher::child(Arc::clone(&self.client), child_id.clone());
		if self.sockets.insert(child_id.clone(), refresher).is_some() {
			tracing::warn!("device '{}': socket '{child_id}' configured twice", self.name);
		}
		self
	}

	/// Returns the name of the device.
	#[inline(always)]
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Returns the raw device info from the last update, if any.
	pub fn state(&self) -> Option<&Value> {
		self.state.as_ref()
	}

	pub fn info(&self) -> Option<&DeviceInfo> {
		self.info.as_ref()
	}

	pub fn energy(&self) -> Option<&TelemetryRefresher<C>> {
		self.energy.as_ref()
	}

	pub fn socket(&self, child_id: &str) -> Option<&TelemetryRefresher<C>> {
		self.sockets.get(child_id)
	}

	pub fn sockets(&self) -> impl Iterator<Item = (&str, &TelemetryRefresher<C>)> {
		self.sockets.iter().map(|(id, socket)| (id.as_str(), socket))
	}

	/// Fetches the device info and then updates every component with it.
	///
	/// Failing to fetch the device info does not stop the components from
	/// updating; they are passed no state instead.
	pub async fn update(&mut self) {
		self.state = match self.client.get_device_info().await {
			Ok(response) if response.is_success() => response.into_value(),
			Ok(response) => {
				tracing::warn!(
					"device '{}' refused get_device_info with error code {}",
					self.name,
					response.error_code
				);
				None
			}
			Err(error) => {
				tracing::warn!("error fetching device info for '{}': {error}", self.name);
				None
			}
		};

		self.info = self.state.as_ref().and_then(|state| {
			match serde_json::from_value(state.clone()) {
				Ok(info) => Some(info),
				Err(error) => {
					tracing::warn!("unrecognised device info from '{}': {error}", self.name);
					None
				}
			}
		});

		let state = self.state.as_ref();
		if let Some(energy) = self.energy.as_mut() {
			energy.update(state).await;
		}
		for socket in self.sockets.values_mut() {
			socket.update(state).await;
		}
	}
}
