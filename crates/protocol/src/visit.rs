//! Visit proposal and visit failure payloads.

use std::fmt;

use serde::{Deserialize, Serialize};

/// How a proposed visit affects the navigation stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VisitAction {
	/// Push a new entry above the current one.
	#[default]
	Advance,
	/// Swap the current top entry for a new one.
	Replace,
}

impl fmt::Display for VisitAction {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Advance => f.write_str("advance"),
			Self::Replace => f.write_str("replace"),
		}
	}
}

/// Failure categories the rendering engine reports for a visit.
///
/// Raw codes follow the engine's numbering: `0` is an HTTP failure and `1` is
/// a network failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
	HttpFailure,
	NetworkFailure,
}

impl ErrorCode {
	/// Maps a raw engine code, returning `None` for codes outside the known set.
	pub fn from_raw(code: i64) -> Option<Self> {
		match code {
			0 => Some(Self::HttpFailure),
			1 => Some(Self::NetworkFailure),
			_ => None,
		}
	}

	/// Raw engine code for this category.
	pub fn raw(self) -> i64 {
		match self {
			Self::HttpFailure => 0,
			Self::NetworkFailure => 1,
		}
	}
}

/// A failed visit as reported by the rendering engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisitFailure {
	/// Raw engine error code.
	pub code: i64,
	/// HTTP status for HTTP failures.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub status_code: Option<u16>,
}

impl VisitFailure {
	pub fn http(status_code: u16) -> Self {
		Self {
			code: ErrorCode::HttpFailure.raw(),
			status_code: Some(status_code),
		}
	}

	pub fn network() -> Self {
		Self {
			code: ErrorCode::NetworkFailure.raw(),
			status_code: None,
		}
	}

	/// Known category of this failure, if any.
	pub fn kind(&self) -> Option<ErrorCode> {
		ErrorCode::from_raw(self.code)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn visit_action_uses_lowercase_names() {
		let action: VisitAction = serde_json::from_str(r#""replace""#).unwrap();
		assert_eq!(action, VisitAction::Replace);
		assert_eq!(serde_json::to_string(&VisitAction::Advance).unwrap(), r#""advance""#);
		assert!(serde_json::from_str::<VisitAction>(r#""restore""#).is_err());
	}

	#[test]
	fn failure_kind_maps_known_codes_only() {
		assert_eq!(VisitFailure::http(404).kind(), Some(ErrorCode::HttpFailure));
		assert_eq!(VisitFailure::network().kind(), Some(ErrorCode::NetworkFailure));
		assert_eq!(VisitFailure { code: 7, status_code: None }.kind(), None);
		assert_eq!(VisitFailure { code: -1, status_code: None }.kind(), None);
	}

	#[test]
	fn failure_deserializes_camel_case_status() {
		let failure: VisitFailure = serde_json::from_str(r#"{"code": 0, "statusCode": 503}"#).unwrap();
		assert_eq!(failure, VisitFailure::http(503));

		let failure: VisitFailure = serde_json::from_str(r#"{"code": 1}"#).unwrap();
		assert_eq!(failure.status_code, None);
	}
}
