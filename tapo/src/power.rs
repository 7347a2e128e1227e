use serde::{Deserialize, Serialize};

/// Result of a `get_current_power` request.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct PowerInfo {
	/// Instantaneous power draw in Watts.
	pub current_power: u32,
}
