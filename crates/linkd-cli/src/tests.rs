use super::*;
use linkd_core::{Profile, VoteOutcome};

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["linkd"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
}

#[test]
fn parses_search_with_defaults() {
    let cli = Cli::try_parse_from(["linkd", "search", "Alumni in tech"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Search {
            ref query,
            pages: 1,
            no_explain: false,
        }) if query == "Alumni in tech"
    ));
}

#[test]
fn parses_search_pages_and_no_explain() {
    let cli =
        Cli::try_parse_from(["linkd", "search", "finance", "--pages", "3", "--no-explain"])
            .unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Search {
            pages: 3,
            no_explain: true,
            ..
        })
    ));
}

#[test]
fn search_requires_a_query() {
    assert!(Cli::try_parse_from(["linkd", "search"]).is_err());
}

#[test]
fn parses_explain_with_profile_fields() {
    let cli = Cli::try_parse_from([
        "linkd",
        "explain",
        "founders",
        "--name",
        "Ada Lovelace",
        "--company",
        "Analytical Engines",
    ])
    .unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Explain {
            ref name,
            role: None,
            ref company,
            summary: None,
            ..
        }) if name.as_deref() == Some("Ada Lovelace")
            && company.as_deref() == Some("Analytical Engines")
    ));
}

#[test]
fn parses_elo_pair() {
    let cli = Cli::try_parse_from(["linkd", "elo", "pair"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Elo {
            command: EloCommands::Pair
        })
    ));
}

#[test]
fn parses_elo_vote_outcome() {
    let cli = Cli::try_parse_from(["linkd", "elo", "vote", "p1", "p2", "Right"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Elo {
            command: EloCommands::Vote {
                ref left,
                ref right,
                result: VoteOutcome::Right,
            }
        }) if left == "p1" && right == "p2"
    ));
}

#[test]
fn rejects_unknown_vote_outcome() {
    assert!(Cli::try_parse_from(["linkd", "elo", "vote", "p1", "p2", "both"]).is_err());
}

#[test]
fn parses_leaderboard_defaults() {
    let cli = Cli::try_parse_from(["linkd", "leaderboard"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Leaderboard {
            limit: 10,
            skip: 0
        })
    ));
}

#[test]
fn parses_profile_email_after_subcommand() {
    let cli = Cli::try_parse_from(["linkd", "profile", "show", "--email", "ada@example.com"])
        .unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Profile {
            ref email,
            command: ProfileCommands::Show,
        }) if email.as_deref() == Some("ada@example.com")
    ));
}

#[test]
fn parses_profile_update_fields() {
    let cli = Cli::try_parse_from([
        "linkd",
        "profile",
        "update",
        "--role",
        "Principal Engineer",
        "--linkedin-url",
        "https://linkedin.example/in/ada",
    ])
    .unwrap();
    let Some(Commands::Profile {
        command: ProfileCommands::Update(fields),
        ..
    }) = cli.command
    else {
        panic!("expected profile update");
    };
    let update = fields.into_update();
    assert_eq!(update.role.as_deref(), Some("Principal Engineer"));
    assert_eq!(
        update.linkedin_url.as_deref(),
        Some("https://linkedin.example/in/ada")
    );
    assert!(update.name.is_none());
    assert!(!update.is_empty());
}

#[test]
fn profile_delete_defaults_to_unconfirmed() {
    let cli = Cli::try_parse_from(["linkd", "profile", "delete"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Profile {
            command: ProfileCommands::Delete { yes: false },
            ..
        })
    ));
}

#[test]
fn email_flag_wins_over_configured() {
    let email =
        profile::resolve_email(Some("flag@example.com"), Some("env@example.com")).unwrap();
    assert_eq!(email, "flag@example.com");

    let email = profile::resolve_email(None, Some(" env@example.com ")).unwrap();
    assert_eq!(email, "env@example.com");
}

#[test]
fn missing_email_is_an_error() {
    let err = profile::resolve_email(None, None).unwrap_err();
    assert!(err.to_string().contains("LINKD_USER_EMAIL"));
    assert!(profile::resolve_email(Some("  "), None).is_err());
}

#[test]
fn blank_query_is_rejected() {
    assert!(search::validate_query("   ").is_err());
    assert_eq!(
        search::validate_query("  Alumni in tech ").unwrap(),
        "Alumni in tech"
    );
}

#[test]
fn headline_joins_available_fields() {
    let mut profile: Profile = serde_json::from_value(serde_json::json!({
        "_id": "p1",
        "role": "Engineer",
        "company": "Acme",
        "location": "Berlin"
    }))
    .unwrap();
    assert_eq!(
        search::headline(&profile).as_deref(),
        Some("Engineer at Acme, Berlin")
    );

    profile.role = None;
    profile.location = None;
    assert_eq!(search::headline(&profile).as_deref(), Some("Acme"));

    profile.company = Some("  ".to_string());
    assert_eq!(search::headline(&profile), None);
}
