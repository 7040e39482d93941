//! Replays inbound messages through a shell backed by a recording host.

use droptune::fake::{HostAction, RecordingHost};
use droptune::{InboundMessage, NavigationPolicy, RenderState, Shell, ShellConfig};
use serde::Serialize;
use tracing::{debug, info};

use crate::error::{ReplayError, Result};

/// Answer given to one `authNavigation` line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Decision {
	pub line: usize,
	pub flow: u64,
	pub policy: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlotSummary {
	pub slot: u64,
	pub url: String,
	pub state: &'static str,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub error: Option<String>,
}

/// Everything the shell did while replaying, printed as JSON.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplayReport {
	pub actions: Vec<HostAction>,
	pub decisions: Vec<Decision>,
	pub stack: Vec<SlotSummary>,
	pub auth_flow: Option<u64>,
}

/// Parses newline-delimited messages. Blank lines and `#` comments are skipped.
pub fn parse_script(script: &str) -> Result<Vec<(usize, InboundMessage)>> {
	script
		.lines()
		.enumerate()
		.map(|(index, line)| (index + 1, line.trim()))
		.filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
		.map(|(line, text)| {
			serde_json::from_str(text)
				.map(|message| (line, message))
				.map_err(|source| ReplayError::Message { line, source })
		})
		.collect()
}

pub async fn replay(config: ShellConfig, messages: Vec<(usize, InboundMessage)>, start: bool) -> Result<ReplayReport> {
	let (parts, host) = RecordingHost::new().build();
	let (mut shell, handle) = Shell::new(config, parts)?;
	if start {
		shell.start();
	}
	let task = tokio::spawn(shell.run());

	info!(target = "droptune", count = messages.len(), "replaying messages");
	let mut decisions = Vec::new();
	for (line, message) in messages {
		let flow = match &message {
			InboundMessage::AuthNavigation { flow, .. } => Some(*flow),
			_ => None,
		};
		let reply = handle.dispatch(message)?;
		if let (Some(reply), Some(flow)) = (reply, flow) {
			let policy = reply.await.map_err(|_| droptune::ShellError::ChannelClosed)?;
			debug!(target = "droptune", line, flow, ?policy, "auth navigation decided");
			decisions.push(Decision {
				line,
				flow,
				policy: policy_name(policy),
			});
		}
	}

	drop(handle);
	let coordinator = task.await?;

	let stack = coordinator
		.stack()
		.iter()
		.map(|slot| SlotSummary {
			slot: slot.id().0,
			url: slot.url().to_string(),
			state: state_name(slot.state()),
			error: slot.error().map(|content| format!("{}: {}", content.title, content.message)),
		})
		.collect();

	Ok(ReplayReport {
		actions: host.take(),
		decisions,
		stack,
		auth_flow: coordinator.auth_flow().map(|flow| flow.id().0),
	})
}

fn policy_name(policy: NavigationPolicy) -> &'static str {
	match policy {
		NavigationPolicy::Allow => "allow",
		NavigationPolicy::Cancel => "cancel",
	}
}

fn state_name(state: RenderState) -> &'static str {
	match state {
		RenderState::Loading => "loading",
		RenderState::Rendered => "rendered",
		RenderState::Errored => "errored",
	}
}
