//! User-facing content for failed visits.

use std::borrow::Cow;

use droptune_protocol::{ErrorCode, VisitFailure};

/// Title and message shown on a slot's error overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorContent {
	pub title: Cow<'static, str>,
	pub message: Cow<'static, str>,
}

impl ErrorContent {
	pub const fn canned(title: &'static str, message: &'static str) -> Self {
		Self {
			title: Cow::Borrowed(title),
			message: Cow::Borrowed(message),
		}
	}
}

/// Pure lookup from failure data to [`ErrorContent`].
pub struct ErrorCatalog;

impl ErrorCatalog {
	pub const NOT_FOUND: ErrorContent = ErrorContent::canned("Page Not Found", "There doesn’t seem to be anything here.");
	pub const NETWORK: ErrorContent = ErrorContent::canned("Can’t Connect", "Can’t connect to the server");
	/// Defined for completeness; no failure currently resolves to it.
	pub const UNKNOWN: ErrorContent = ErrorContent::canned("Unknown Error", "An unknown error occurred.");

	/// Content for an HTTP response with the given status.
	pub fn http_status(status_code: u16) -> ErrorContent {
		match status_code {
			404 => Self::NOT_FOUND,
			code => ErrorContent {
				title: Cow::Borrowed("Server Error"),
				message: Cow::Owned(format!("The server returned an HTTP {code} response.")),
			},
		}
	}

	/// Resolves a reported failure.
	///
	/// Returns `None` for unrecognized codes and for HTTP failures that carry
	/// no status; callers leave the slot untouched in that case.
	pub fn lookup(failure: &VisitFailure) -> Option<ErrorContent> {
		match failure.kind()? {
			ErrorCode::HttpFailure => failure.status_code.map(Self::http_status),
			ErrorCode::NetworkFailure => Some(Self::NETWORK),
		}
	}
}
