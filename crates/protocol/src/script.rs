//! Script messages posted by page content through the message handler.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Closed set of message names page content may post.
///
/// Deserializing any other name fails, so unknown messages never reach a
/// handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScriptMessageName {
	#[serde(rename = "errorRaised")]
	ErrorRaised,
}

/// Body of a script message: `{ "name": ..., "data": { ... } }`.
///
/// Only a JSON object is accepted; a `[name, data]` array is rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Map<String, Value>")]
pub struct ScriptEnvelope {
	pub name: ScriptMessageName,
	pub data: Map<String, Value>,
}

#[derive(Deserialize)]
struct EnvelopeFields {
	name: ScriptMessageName,
	data: Map<String, Value>,
}

impl TryFrom<Map<String, Value>> for ScriptEnvelope {
	type Error = serde_json::Error;

	fn try_from(body: Map<String, Value>) -> Result<Self, Self::Error> {
		let fields: EnvelopeFields = serde_json::from_value(Value::Object(body))?;
		Ok(Self {
			name: fields.name,
			data: fields.data,
		})
	}
}
