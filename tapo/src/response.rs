use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;

/// Envelope returned by a Tapo device for every request.
///
/// A zero `error_code` indicates success; any other value is a device-side
/// error and `result` is usually absent.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct TapoResponse<T = Value> {
	pub error_code: i32,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub result: Option<T>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub msg: Option<String>,
}

impl<T> TapoResponse<T> {
	pub fn success(result: T) -> Self {
		Self {
			error_code: 0,
			result: Some(result),
			msg: None,
		}
	}

	pub fn failure(error_code: i32) -> Self {
		Self {
			error_code,
			result: None,
			msg: None,
		}
	}

	#[inline]
	pub fn is_success(&self) -> bool {
		self.error_code == 0
	}

	/// Returns the result payload, if any.
	pub fn value(&self) -> Option<&T> {
		self.result.as_ref()
	}

	pub fn into_value(self) -> Option<T> {
		self.result
	}
}

impl TapoResponse<Value> {
	/// Decodes the raw result payload into `U`, keeping the envelope.
	pub fn decode<U: DeserializeOwned>(self) -> serde_json::Result<TapoResponse<U>> {
		let result = self.result.map(serde_json::from_value).transpose()?;
		Ok(TapoResponse {
			error_code: self.error_code,
			result,
			msg: self.msg,
		})
	}
}

/// Result of a `multipleRequest`: one entry per batched request, in order.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct MultipleResponse {
	pub responses: Vec<MethodResponse>,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct MethodResponse {
	pub method: String,
	#[serde(flatten)]
	pub response: TapoResponse<Value>,
}

/// Result of a `control_child` request. The child's reply to the wrapped
/// `multipleRequest` is nested under `responseData`.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct ControlChildResult {
	#[serde(rename = "responseData")]
	pub response_data: TapoResponse<MultipleResponse>,
}

#[cfg(test)]
mod tests {
	use super::{ControlChildResult, MultipleResponse, TapoResponse};
	use crate::PowerInfo;
	use serde_json::json;

	#[test]
	fn error_code_determines_success() {
		let ok: TapoResponse = serde_json::from_value(json!({ "error_code": 0, "result": {} })).unwrap();
		assert!(ok.is_success());

		let failed: TapoResponse = serde_json::from_value(json!({ "error_code": -1008 })).unwrap();
		assert!(!failed.is_success());
		assert!(failed.value().is_none());
	}

	#[test]
	fn decode_result_payload() {
		let response = TapoResponse::success(json!({ "current_power": 42 }));
		let decoded = response.decode::<PowerInfo>().unwrap();
		assert!(decoded.is_success());
		assert_eq!(decoded.into_value(), Some(PowerInfo { current_power: 42 }));
	}

	#[test]
	fn decode_rejects_malformed_payload() {
		let response = TapoResponse::success(json!({ "current_power": "lots" }));
		assert!(response.decode::<PowerInfo>().is_err());
	}

	#[test]
	fn parse_control_child_result() {
		let raw = json!({
			"responseData": {
				"error_code": 0,
				"result": {
					"responses": [{
						"method": "get_current_power",
						"error_code": 0,
						"result": { "current_power": 7 }
					}]
				}
			}
		});

		let result: ControlChildResult = serde_json::from_value(raw).unwrap();
		let responses = result.response_data.into_value().unwrap().responses;
		assert_eq!(responses.len(), 1);
		assert_eq!(responses[0].method, "get_current_power");
		assert_eq!(
			responses[0].response.value(),
			Some(&json!({ "current_power": 7 }))
		);
	}

	#[test]
	fn control_child_envelope_round_trip() {
		let raw = json!({
			"error_code": 0,
			"result": {
				"responseData": {
					"error_code": 0,
					"result": {
						"responses": [{
							"method": "get_energy_usage",
							"error_code": -1008
						}]
					}
				}
			}
		});

		let outer: TapoResponse<ControlChildResult> = serde_json::from_value(raw.clone()).unwrap();
		let inner: &TapoResponse<MultipleResponse> = &outer.value().unwrap().response_data;
		assert!(inner.is_success());

		let entry = &inner.value().unwrap().responses[0];
		assert_eq!(entry.method, "get_energy_usage");
		assert!(!entry.response.is_success());
		assert_eq!(entry.response.result, None);

		assert_eq!(serde_json::to_value(&outer).unwrap(), raw);
	}
}
