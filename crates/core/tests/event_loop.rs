use std::fs;

use droptune::fake::{HostAction, RecordingHost};
use droptune::{FlowId, InboundMessage, NavigationPolicy, RenderState, Shell, ShellConfig, ShellError, VisitAction};
use serde_json::json;
use tempfile::TempDir;
use url::Url;

fn init_tracing() {
	let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

#[tokio::test]
async fn run_loop_answers_auth_navigation_and_stops_with_handles() -> anyhow::Result<()> {
	init_tracing();
	let (parts, host) = RecordingHost::new().build();
	let (mut shell, handle) = Shell::new(ShellConfig::default(), parts)?;
	shell.start();
	let task = tokio::spawn(shell.run());

	handle.propose_visit(Url::parse("https://dwlocal.ngrok.io/users/auth/twitter")?, VisitAction::Advance)?;
	let policy = handle.auth_navigation(FlowId(1), Url::parse("https://api.twitter.com/oauth/authorize")?).await?;
	assert_eq!(policy, NavigationPolicy::Allow);

	let policy = handle.auth_navigation(FlowId(1), Url::parse("https://dwlocal.ngrok.io/")?).await?;
	assert_eq!(policy, NavigationPolicy::Cancel);

	drop(handle);
	let coordinator = task.await?;

	assert!(coordinator.auth_flow().is_none());
	assert_eq!(coordinator.stack().depth(), 1);
	assert_eq!(coordinator.stack().top().map(|slot| slot.state()), Some(RenderState::Loading));

	let actions = host.actions();
	let tail = &actions[actions.len() - 2..];
	assert_eq!(tail, &[HostAction::Reload, HostAction::DismissAuth { flow: 1 }]);
	Ok(())
}

#[tokio::test]
async fn handle_reports_closed_loop() -> anyhow::Result<()> {
	let (parts, _host) = RecordingHost::new().build();
	let (shell, handle) = Shell::new(ShellConfig::default(), parts)?;
	drop(shell);

	let err = handle.auth_navigation(FlowId(1), Url::parse("https://dwlocal.ngrok.io/")?).await.unwrap_err();
	assert!(matches!(err, ShellError::ChannelClosed));
	Ok(())
}

#[test]
fn dispatch_translates_wire_messages() {
	let (parts, host) = RecordingHost::new().build();
	let (mut shell, handle) = Shell::new(ShellConfig::default(), parts).unwrap();

	let messages: Vec<InboundMessage> = serde_json::from_value(json!([
		{"type": "proposeVisit", "url": "https://dwlocal.ngrok.io/"},
		{"type": "visitStarted", "slot": 1},
		{"type": "visitFailed", "slot": 1, "error": {"code": 0, "statusCode": 404}},
		{"type": "visitFinished", "slot": 1},
		{"type": "retry", "slot": 1},
		{"type": "proposeVisit", "url": "https://dwlocal.ngrok.io/users/auth/spotify", "action": "replace"}
	]))
	.unwrap();
	for message in messages {
		assert!(handle.dispatch(message).unwrap().is_none());
	}
	let mut reply = handle
		.dispatch(InboundMessage::AuthNavigation {
			flow: 1,
			url: "https://accounts.spotify.com/login".into(),
		})
		.unwrap()
		.expect("auth navigation should carry a reply");
	shell.pump();

	assert_eq!(reply.try_recv().unwrap(), NavigationPolicy::Allow);
	assert_eq!(shell.coordinator().stack().depth(), 1);
	assert_eq!(host.visits_for(shell.coordinator().stack().top().unwrap().id()), 2);
}

#[test]
fn dispatch_rejects_invalid_urls() {
	let (parts, _host) = RecordingHost::new().build();
	let (_shell, handle) = Shell::new(ShellConfig::default(), parts).unwrap();
	let err = handle
		.dispatch(InboundMessage::ExternalUrlRequested { url: "not a url".into() })
		.unwrap_err();
	assert!(matches!(err, ShellError::Url(_)));
}

#[test]
fn config_file_overrides_defaults() {
	let temp = TempDir::new().unwrap();
	let path = temp.path().join("shell.json");
	fs::write(
		&path,
		r#"{
  "baseUrl": "https://staging.droptune.app",
  "authPaths": ["/users/auth/github"],
  "authSuccessUrl": "https://staging.droptune.app/welcome",
  "version": "2.1",
  "build": "140"
}"#,
	)
	.unwrap();

	let config = ShellConfig::from_file(&path).unwrap();
	assert_eq!(config.base_url.as_str(), "https://staging.droptune.app/");
	assert_eq!(config.auth_paths, vec!["/users/auth/github"]);
	assert_eq!(config.user_agent(), "Droptune - MobileApp iOS - version::2.1 Build(140)");
	assert_eq!(config.auth_title, "Sign in");

	let (parts, host) = RecordingHost::new().build();
	let (mut shell, handle) = Shell::new(config, parts).unwrap();
	shell.start();
	handle
		.propose_visit(Url::parse("https://staging.droptune.app/users/auth/twitter").unwrap(), VisitAction::Advance)
		.unwrap();
	shell.pump();
	assert_eq!(shell.coordinator().stack().depth(), 2);
	assert!(host.actions().iter().all(|a| !matches!(a, HostAction::PresentAuth { .. })));
}

#[test]
fn config_file_errors_are_reported() {
	let temp = TempDir::new().unwrap();

	let missing = ShellConfig::from_file(&temp.path().join("absent.json")).unwrap_err();
	assert!(missing.to_string().contains("Failed to read"));

	let path = temp.path().join("bad.json");
	fs::write(&path, r#"{"authPaths": ["users/auth/github"]}"#).unwrap();
	let invalid = ShellConfig::from_file(&path).unwrap_err();
	assert!(matches!(invalid, ShellError::Config(_)));

	fs::write(&path, r#"{"baseUrl": 12}"#).unwrap();
	let malformed = ShellConfig::from_file(&path).unwrap_err();
	assert!(matches!(malformed, ShellError::Json(_)));
}
