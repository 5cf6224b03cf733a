//! Remote log submission for diagnostics gathered on end-user devices.

// self
use crate::{
	_prelude::*,
	api::endpoints,
	client::{ApiRequest, Client},
};

/// Severity accepted by the backend's log sink.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
	/// Verbose diagnostics.
	Debug,
	/// Routine events.
	Info,
	/// Recoverable anomalies.
	Warn,
	/// Failures worth paging over.
	Error,
}

/// Device context attached to each submitted entry.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceInfo {
	/// Platform identifier (ios, android, web).
	#[serde(default)]
	pub platform: String,
	/// Hardware model string.
	#[serde(default)]
	pub model: String,
	/// Operating-system version string.
	#[serde(default)]
	pub os_version: String,
}

/// One log entry destined for the backend sink.
#[derive(Clone, Debug, Serialize)]
pub struct LogEntry {
	level: LogLevel,
	tag: String,
	message: String,
	device_info: DeviceInfo,
}
impl LogEntry {
	/// Creates an entry with empty device context.
	pub fn new(level: LogLevel, tag: impl Into<String>, message: impl Into<String>) -> Self {
		Self { level, tag: tag.into(), message: message.into(), device_info: DeviceInfo::default() }
	}

	/// Attaches device context.
	pub fn with_device_info(mut self, device_info: DeviceInfo) -> Self {
		self.device_info = device_info;

		self
	}
}

impl Client {
	/// Ships one log entry to the backend over the guarded transport.
	pub async fn submit_log(&self, entry: &LogEntry) -> Result<()> {
		let body = serde_json::json!({
			"level": entry.level,
			"tag": entry.tag,
			"message": entry.message,
			"device_info": entry.device_info,
		});

		self.execute(ApiRequest::post(endpoints::LOGS).with_json(body)).await?;

		Ok(())
	}
}
