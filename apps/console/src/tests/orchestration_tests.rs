use crossbeam_channel::bounded;

use super::*;
use crate::controller::events::UiErrorContext;
use crate::test_support::credentials;

fn login() -> BackendCommand {
    BackendCommand::Login {
        credentials: credentials(),
    }
}

#[test]
fn queued_command_reaches_worker() {
    let (cmd_tx, cmd_rx) = bounded(1);

    assert_eq!(dispatch_backend_command(&cmd_tx, login()), Ok(()));
    assert_eq!(cmd_rx.try_recv(), Ok(login()));
}

#[test]
fn full_queue_reports_login_failure() {
    let (cmd_tx, _cmd_rx) = bounded(1);
    cmd_tx.send(login()).expect("prefill");

    let failure = dispatch_backend_command(
        &cmd_tx,
        BackendCommand::ExchangeCode {
            code: "abc".into(),
        },
    )
    .expect_err("queue is full");

    match failure {
        UiEvent::LoginFailed(err) => {
            assert_eq!(err.category(), UiErrorCategory::Transport);
            assert_eq!(err.context(), UiErrorContext::Login);
            assert!(err.message().contains("full"));
        }
        other => panic!("unexpected event: {other:?}"),
    }
}

#[test]
fn stopped_worker_reports_creation_failure() {
    let (cmd_tx, cmd_rx) = bounded(1);
    drop(cmd_rx);

    let mut form = shared::protocol::DrainParams::new();
    form.name = "prod".into();
    form.url = "https://logs.example.com".into();
    let failure = dispatch_backend_command(
        &cmd_tx,
        BackendCommand::CreateDrain {
            credentials: credentials(),
            request: form.validate().expect("valid form"),
        },
    )
    .expect_err("receiver dropped");

    match failure {
        UiEvent::DrainCreationFailed(err) => {
            assert_eq!(err.category(), UiErrorCategory::Transport);
            assert_eq!(err.context(), UiErrorContext::CreateDrain);
            assert!(err.message().contains("not running"));
        }
        other => panic!("unexpected event: {other:?}"),
    }
}
