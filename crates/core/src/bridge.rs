//! Script message bridge.
//!
//! Converts untyped bodies posted by page content into [`ScriptEvent`]s.
//! Anything that does not match the envelope shape is dropped.

use droptune_protocol::{ScriptEnvelope, ScriptMessageName};
use serde_json::{Map, Value};
use tracing::trace;

/// A typed message from page content.
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptEvent {
	pub name: ScriptMessageName,
	pub payload: Map<String, Value>,
}

impl ScriptEvent {
	/// Parses a message body, returning `None` for any malformed input.
	pub fn parse(body: &Value) -> Option<Self> {
		match serde_json::from_value::<ScriptEnvelope>(body.clone()) {
			Ok(envelope) => Some(Self {
				name: envelope.name,
				payload: envelope.data,
			}),
			Err(err) => {
				trace!(target = "droptune.bridge", error = %err, "dropping script message");
				None
			}
		}
	}

	/// String value stored under `key`, if present and a string.
	pub fn string(&self, key: &str) -> Option<&str> {
		self.payload.get(key).and_then(Value::as_str)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn parses_error_raised() {
		let event = ScriptEvent::parse(&json!({"name": "errorRaised", "data": {"error": "x", "alert": "y"}})).unwrap();
		assert_eq!(event.name, ScriptMessageName::ErrorRaised);
		assert_eq!(event.string("error"), Some("x"));
		assert_eq!(event.string("alert"), Some("y"));
		assert_eq!(event.string("missing"), None);
	}

	#[test]
	fn non_string_values_are_not_strings() {
		let event = ScriptEvent::parse(&json!({"name": "errorRaised", "data": {"alert": 3}})).unwrap();
		assert_eq!(event.string("alert"), None);
	}

	#[test]
	fn malformed_bodies_produce_no_event() {
		for body in [
			json!({"name": "pageLoaded", "data": {}}),
			json!({"name": "errorRaised"}),
			json!({"name": "errorRaised", "data": "oops"}),
			json!({"data": {}}),
			json!({"name": 1, "data": {}}),
			json!(["errorRaised", {}]),
			json!("errorRaised"),
			Value::Null,
		] {
			assert!(ScriptEvent::parse(&body).is_none(), "{body} should be dropped");
		}
	}
}
