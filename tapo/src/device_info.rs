use base64::{engine::general_purpose::STANDARD, Engine};
use serde::{Deserialize, Deserializer, Serialize};

/// Subset of the `get_device_info` result used to identify a device.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct DeviceInfo {
	pub device_id: String,
	pub model: String,
	/// User-assigned name. Devices send this base64 encoded.
	#[serde(default, deserialize_with = "decode_nickname")]
	pub nickname: String,
	#[serde(default)]
	pub device_on: Option<bool>,
	#[serde(default)]
	pub fw_ver: Option<String>,
}

// Some firmware sends the nickname in plain text, so fall back to the raw
// string if it isn't valid base64-encoded UTF-8.
fn decode_nickname<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
	let raw = String::deserialize(deserializer)?;
	let decoded = STANDARD
		.decode(raw.as_bytes())
		.ok()
		.and_then(|bytes| String::from_utf8(bytes).ok());
	Ok(decoded.unwrap_or(raw))
}
