use super::*;

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(std::iter::once("drains").chain(args.iter().copied())).expect("parse")
}

#[test]
fn flags_override_settings() {
    let settings = Settings {
        team_id: Some("team_file".into()),
        access_token: Some("tok_file".into()),
        ..Settings::default()
    };
    let cli = parse(&["--team-id", "team_flag", "--token", "tok_flag", "drains"]);

    let creds = credentials(&apply_overrides(settings, &cli)).expect("credentials");

    assert_eq!(creds.team_id.as_ref().map(|team| team.as_str()), Some("team_flag"));
    assert_eq!(creds.access_token.expose(), "tok_flag");
}

#[test]
fn missing_token_is_an_error() {
    let cli = parse(&["projects"]);
    let err = credentials(&apply_overrides(Settings::default(), &cli)).expect_err("no token");
    assert!(err.to_string().contains("--token"));
}

#[test]
fn create_drain_parses_type() {
    let cli = parse(&[
        "--json",
        "create-drain",
        "--name",
        "audit",
        "--url",
        "https://audit.example.com",
        "--type",
        "SYSLOG",
    ]);
    assert!(cli.json);
    match cli.command {
        Command::CreateDrain {
            drain_type, secret, ..
        } => {
            assert_eq!(drain_type, LogDrainType::Syslog);
            assert_eq!(secret, None);
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn token_flag_falls_back_to_hidden_env() {
    use clap::CommandFactory;

    let command = Cli::command();
    let token = command
        .get_arguments()
        .find(|arg| arg.get_id() == "token")
        .expect("token arg");
    assert_eq!(
        token.get_env().and_then(|value| value.to_str()),
        Some("VERCEL_ACCESS_TOKEN")
    );
    assert!(token.is_hide_env_values_set());
}
