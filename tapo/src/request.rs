use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// A single request understood by a Tapo device.
///
/// On the wire this is `{"method": "...", "params": {...}}`, with `params`
/// omitted for requests that take no arguments.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct TapoRequest {
	pub method: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub params: Option<Value>,
}

impl TapoRequest {
	pub fn new(method: impl Into<String>, params: Option<Value>) -> Self {
		Self {
			method: method.into(),
			params,
		}
	}

	pub fn get_device_info() -> Self {
		Self::new("get_device_info", None)
	}

	/// Requests the runtime and energy counters for today and this month.
	pub fn get_energy_usage() -> Self {
		Self::new("get_energy_usage", None)
	}

	/// Requests the instantaneous power draw.
	pub fn get_current_power() -> Self {
		Self::new("get_current_power", None)
	}

	/// Batches several requests into one round-trip.
	pub fn multiple_request(requests: Vec<TapoRequest>) -> Self {
		let requests: Vec<Value> = requests.into_iter().map(TapoRequest::into_value).collect();
		Self::new("multipleRequest", Some(json!({ "requests": requests })))
	}

	/// Addresses `request` to the child device `device_id` (e.g. one socket of a
	/// power strip) through its parent's connection.
	///
	/// Parents only accept batched requests for their children, so the inner
	/// request is always wrapped in a single-entry `multipleRequest`.
	pub fn control_child(device_id: impl Into<String>, request: TapoRequest) -> Self {
		let request_data = Self::multiple_request(vec![request]).into_value();
		Self::new(
			"control_child",
			Some(json!({
				"device_id": device_id.into(),
				"requestData": request_data,
			})),
		)
	}

	/// Converts the request into its JSON representation.
	pub fn into_value(self) -> Value {
		let mut map = Map::with_capacity(2);
		map.insert("method".into(), Value::String(self.method));
		if let Some(params) = self.params {
			map.insert("params".into(), params);
		}
		Value::Object(map)
	}
}
