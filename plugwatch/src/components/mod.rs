pub mod energy;
pub use energy::{Addressing, TelemetryRefresher};

use async_trait::async_trait;
use serde_json::Value;

/// A piece of functionality attached to a device that keeps its own view of
/// the device up to date.
#[async_trait]
pub trait DeviceComponent: Send {
	/// Refreshes the component. `current_state` is the device's most recent
	/// `get_device_info` result, if one is available.
	///
	/// Components contain their own failures; updating one never prevents the
	/// device or its other components from updating.
	async fn update(&mut self, current_state: Option<&Value>);
}
