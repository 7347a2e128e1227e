// Device information
//
pub mod device_info;
pub use device_info::DeviceInfo;

// Energy monitoring payloads
//
pub mod energy;
pub use energy::EnergyInfo;

pub mod power;
pub use power::PowerInfo;

// Request and response envelopes
//
pub mod request;
pub use request::TapoRequest;

pub mod response;
pub use response::TapoResponse;

use time::format_description::FormatItem;

/// Date-string format used by Tapo devices for their local clock.
pub const DATETIME_FORMAT: &[FormatItem<'_>] =
	time::macros::format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

// Serde helpers for the device clock. Fields that may be missing use the
// generated `option` submodule:
//
// #[serde(default, with = "crate::datetime::option")]
// local_time: Option<PrimitiveDateTime>,
//
time::serde::format_description!(datetime, PrimitiveDateTime, DATETIME_FORMAT);
