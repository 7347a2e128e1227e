use serde::{Deserialize, Serialize};
use time::PrimitiveDateTime;

/// Result of a `get_energy_usage` request.
///
/// Plugs report all of these fields; sockets on some power strips only
/// report the runtime and energy counters.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct EnergyInfo {
	/// Minutes the load has been powered today.
	pub today_runtime: u32,
	/// Minutes the load has been powered this month.
	pub month_runtime: u32,
	/// Energy used today in Watt hours.
	pub today_energy: u32,
	/// Energy used this month in Watt hours.
	pub month_energy: u32,
	/// Clock time of the device in its local timezone.
	#[serde(
		default,
		skip_serializing_if = "Option::is_none",
		with = "crate::datetime::option"
	)]
	pub local_time: Option<PrimitiveDateTime>,
	/// Current power usage in milliWatts.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub current_power: Option<u32>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub electricity_charge: Option<Vec<u32>>,
}

impl EnergyInfo {
	/// Current power usage in Watts, if reported.
	pub fn current_power_watts(&self) -> Option<f32> {
		self.current_power.map(|mw| mw as f32 / 1000.0)
	}
}
