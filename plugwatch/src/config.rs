use serde::Deserialize;
use std::time::Duration;
use url::Url;

#[derive(Debug, Deserialize)]
pub struct Config {
	/// Seconds between device updates.
	#[serde(default = "default_interval_secs")]
	pub interval_secs: u64,

	pub devices: Vec<DeviceConfig>,
}

impl Config {
	pub fn interval(&self) -> Duration {
		Duration::from_secs(self.interval_secs.max(1))
	}
}

#[derive(Clone, Debug, Deserialize)]
pub struct DeviceConfig {
	pub name: String,
	pub host: Url,
	pub token: Option<String>,

	#[serde(default = "default_timeout_secs")]
	pub timeout_secs: u64,

	/// Monitor the energy usage of the device itself. Power strips usually
	/// only report per socket.
	#[serde(default = "default_true")]
	pub energy_monitoring: bool,

	/// Child IDs of the sockets to monitor.
	#[serde(default = "Vec::new")]
	pub sockets: Vec<String>,
}

impl DeviceConfig {
	pub fn timeout(&self) -> Duration {
		Duration::from_secs(self.timeout_secs)
	}
}

fn default_interval_secs() -> u64 {
	30
}

fn default_timeout_secs() -> u64 {
	10
}

fn default_true() -> bool {
	true
}
