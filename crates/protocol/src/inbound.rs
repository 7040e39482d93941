//! Inbound message envelope.
//!
//! Every call the rendering engine, page content or native container makes
//! into the shell, as one `type`-tagged JSON object:
//!
//! ```json
//! { "type": "proposeVisit", "url": "https://example.com/songs", "action": "advance" }
//! { "type": "visitFailed", "slot": 2, "error": { "code": 0, "statusCode": 500 } }
//! { "type": "scriptMessage", "body": { "name": "errorRaised", "data": { "error": "boom" } } }
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::visit::{VisitAction, VisitFailure};

/// Discriminated union of inbound shell messages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum InboundMessage {
	/// The engine wants to visit `url`.
	#[serde(rename_all = "camelCase")]
	ProposeVisit {
		url: String,
		#[serde(default)]
		action: VisitAction,
	},
	/// A fetch for `slot` started.
	VisitStarted { slot: u64 },
	/// A fetch for `slot` settled, successfully or not.
	VisitFinished { slot: u64 },
	/// A fetch for `slot` failed.
	VisitFailed { slot: u64, error: VisitFailure },
	/// Page content asked to open a URL outside the app.
	ExternalUrlRequested { url: String },
	/// Untyped body posted through the script message handler.
	ScriptMessage { body: Value },
	/// The user tapped retry on the error overlay of `slot`.
	Retry { slot: u64 },
	/// The native container popped `slot` (back navigation).
	SlotPopped { slot: u64 },
	/// The auth flow's web view is about to navigate to `url`.
	AuthNavigation { flow: u64, url: String },
	/// The user closed the auth flow.
	AuthDismissed { flow: u64 },
}
