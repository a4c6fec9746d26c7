//! End-to-end tests for the command lifecycle driven by `CliApplication`.

mod common;

use std::sync::Arc;

use common::{Behavior, SpyCommand, app, bare_app};
use studykit_cli::app::SUCCESS_MESSAGE;
use studykit_core::{ArgumentSpec, Command, CommandSpec, OptionSpec};

#[tokio::test]
async fn test_duplicate_registration_keeps_last() {
    let (mut app, _) = app();
    let first = SpyCommand::new(
        CommandSpec::new("study:list", "first"),
        Behavior::Succeed("first"),
    );
    let second = SpyCommand::new(
        CommandSpec::new("study:list", "second"),
        Behavior::Succeed("second"),
    );
    app.register_command(Arc::new(first));
    app.register_command(Arc::new(second));

    assert_eq!(app.list_commands().len(), 1);
    let command = app.get_command("study:list").unwrap();
    assert_eq!(command.spec().description, "second");
}

#[tokio::test]
async fn test_unregister_missing_is_noop() {
    let (mut app, _) = app();
    app.register_command(Arc::new(SpyCommand::named("study:list", Behavior::Succeed("ok"))));

    app.unregister_command("ghost");
    assert_eq!(app.list_commands().len(), 1);

    app.unregister_command("study:list");
    assert!(app.list_commands().is_empty());
    let result = app.execute(["study:list"]).await;
    assert!(!result.success);
}

#[tokio::test]
async fn test_stubbed_study_list_succeeds() {
    let (mut app, _) = app();
    let spy = Arc::new(SpyCommand::named("study:list", Behavior::Succeed("Found 0 studies")));
    app.register_command(spy.clone());

    let result = app.execute(["study:list"]).await;
    assert!(result.success);
    assert_eq!(result.message, SUCCESS_MESSAGE);
    assert!(result.data.is_none());
    assert_eq!(spy.executions(), 1);
}

#[tokio::test]
async fn test_unknown_command_fails_cleanly() {
    let (app, output) = app();

    let result = app.execute(["nope"]).await;
    assert!(!result.success);
    assert_eq!(result.exit_code(), 1);
    assert!(output.error_lines()[0].starts_with("Error: "));
}

#[tokio::test]
async fn test_failed_validation_skips_execute() {
    let (mut app, output) = app();
    let spy = Arc::new(
        SpyCommand::named("study:render", Behavior::Succeed("done")).rejecting("x", "m"),
    );
    app.register_command(spy.clone());

    let result = app.execute(["study:render"]).await;
    assert!(!result.success);
    assert_eq!(result.message, "Validation failed");
    assert_eq!(result.errors, Some(vec!["x: m".to_string()]));
    assert_eq!(spy.executions(), 0);
    assert_eq!(output.error_lines(), ["Error: Validation failed", "  x: m"]);
}

#[tokio::test]
async fn test_command_failure_propagates_message() {
    let (mut app, output) = app();
    app.register_command(Arc::new(SpyCommand::named(
        "study:delete",
        Behavior::Fail("Study not found: history"),
    )));

    let result = app.execute(["study:delete"]).await;
    assert!(!result.success);
    assert_eq!(result.message, "Study not found: history");
    assert_eq!(output.error_lines(), ["Error: Study not found: history"]);
}

#[tokio::test]
async fn test_raised_error_goes_through_error_handler() {
    let (mut app, output) = app();
    app.register_command(Arc::new(SpyCommand::named(
        "study:open",
        Behavior::Raise("ENOENT: no such file, open 'intro.md'"),
    )));

    let result = app.execute(["study:open"]).await;
    assert!(!result.success);
    assert_eq!(
        result.message,
        "File not found: ENOENT: no such file, open 'intro.md'"
    );
    assert!(output.error_lines()[0].starts_with("Execution error: File not found"));
}

#[tokio::test]
async fn test_panicking_command_is_contained() {
    let (mut app, output) = app();
    let spy = Arc::new(SpyCommand::named("study:crash", Behavior::Panic("boom")));
    app.register_command(spy.clone());

    let result = app.execute(["study:crash"]).await;
    assert!(!result.success);
    assert_eq!(result.message, "boom");
    assert_eq!(spy.executions(), 1);
    assert_eq!(output.error_lines(), ["Execution error: boom"]);
}

#[tokio::test]
async fn test_arguments_and_options_reach_command() {
    let (mut app, _) = app();
    let spec = CommandSpec::new("study:render", "Render a study")
        .argument(ArgumentSpec::required("name", "Study name"))
        .option(
            OptionSpec::text("format", "Output format")
                .alias("f")
                .default_value("markdown"),
        )
        .option(OptionSpec::flag("force", "Overwrite").alias("y"));
    let spy = Arc::new(SpyCommand::new(spec, Behavior::Succeed("rendered")));
    app.register_command(spy.clone());

    let result = app.execute(["--codex", "study:render", "intro", "-y"]).await;
    assert!(result.success);
    assert_eq!(spy.last_args(), ["intro"]);

    let options = spy.last_options().unwrap();
    assert_eq!(options.text("format"), Some("markdown"));
    assert!(options.flag("force"));
    assert!(options.flag("codex"));
    assert!(!options.flag("cursor"));
}

#[tokio::test]
async fn test_command_help_flag_renders_command_help() {
    let (mut app, output) = app();
    let spec = CommandSpec::new("study:list", "List all studies")
        .option(OptionSpec::flag("all", "Include archived studies"))
        .option(OptionSpec::text("format", "Output format").alias("f"));
    let spy = Arc::new(SpyCommand::new(spec, Behavior::Succeed("listed")));
    app.register_command(spy.clone());

    let result = app.execute(["study:list", "--help"]).await;
    assert!(result.success);
    assert_eq!(spy.executions(), 0);

    let text = output.text();
    assert!(text.starts_with("study:list\nList all studies"));
    assert!(text.contains("  --format, -f: Output format"));
}

#[tokio::test]
async fn test_general_help_lists_commands() {
    let (mut app, output) = app();
    app.register_command(Arc::new(SpyCommand::named("study:list", Behavior::Succeed("ok"))));

    let result = app.execute(Vec::<String>::new()).await;
    assert!(result.success);
    assert!(output.text().contains("  study:list           Spy for study:list"));
    assert_eq!(app.general_help(), output.text());
}

#[tokio::test]
async fn test_panicking_validation_is_contained() {
    let (mut app, output) = app();
    let spy = Arc::new(
        SpyCommand::named("study:show", Behavior::Succeed("shown"))
            .panicking_in_validate("index out of bounds"),
    );
    app.register_command(spy.clone());

    let result = app.execute(["study:show"]).await;
    assert!(!result.success);
    assert_eq!(result.message, "index out of bounds");
    assert_eq!(spy.executions(), 0);
    assert_eq!(output.error_lines(), ["Execution error: index out of bounds"]);
}

#[tokio::test]
async fn test_colliding_option_aliases_are_not_fatal() {
    let (mut app, output) = app();
    let spec = CommandSpec::new("study:list", "List all studies")
        .option(OptionSpec::text("format", "Output format").alias("f"))
        .option(OptionSpec::flag("force", "Skip checks").alias("f"));
    let spy = Arc::new(SpyCommand::new(spec, Behavior::Succeed("listed")));
    app.register_command(spy.clone());

    let result = app.execute(["study:list", "-f", "json"]).await;
    assert!(result.success);
    let options = spy.last_options().unwrap();
    assert_eq!(options.text("format"), Some("json"));
    assert!(!options.flag("force"));

    app.show_help();
    assert!(output.text().contains("study:list"));
}

#[tokio::test]
async fn test_root_help_uses_parser_text() {
    let (mut app, output) = app();
    app.register_command(Arc::new(SpyCommand::named("study:list", Behavior::Succeed("ok"))));

    let result = app.execute(["--help"]).await;
    assert!(result.success);
    assert_eq!(result.message, "Help displayed");
    let text = output.text();
    assert!(text.contains("Usage: studykit"));
    assert!(text.contains("study:list"));
    assert!(text.contains("--codex"));

    let before = output.lines().len();
    app.show_help();
    assert_eq!(output.lines().len(), before + 1);
    assert!(output.lines()[before].contains("--cursor"));
}

#[tokio::test]
async fn test_missing_collaborators_fall_back_to_console() {
    let mut app = bare_app();
    let spy = Arc::new(SpyCommand::named("study:list", Behavior::Succeed("Found 0 studies")));
    app.register_command(spy.clone());
    app.register_command(Arc::new(SpyCommand::named(
        "study:delete",
        Behavior::Fail("Study not found: history"),
    )));

    assert!(app.execute(["study:list"]).await.success);
    assert_eq!(spy.executions(), 1);

    let result = app.execute(["study:delete"]).await;
    assert!(!result.success);
    assert_eq!(result.message, "Study not found: history");

    assert!(!app.execute(["nope"]).await.success);
    assert!(app.execute(Vec::<String>::new()).await.success);
    app.show_help();
    app.show_version();
}

#[tokio::test]
async fn test_required_option_is_enforced_before_validation() {
    let (mut app, output) = app();
    let spec = CommandSpec::new("study:create", "Create a study")
        .option(OptionSpec::text("title", "Study title").required());
    let spy = Arc::new(SpyCommand::new(spec, Behavior::Succeed("created")));
    app.register_command(spy.clone());

    let result = app.execute(["study:create"]).await;
    assert!(!result.success);
    assert_eq!(spy.executions(), 0);
    assert!(output.error_lines()[0].starts_with("Error: the following required arguments"));

    let result = app.execute(["study:create", "--title", "Rust"]).await;
    assert!(result.success);
    assert_eq!(spy.last_options().unwrap().text("title"), Some("Rust"));
}

#[tokio::test]
async fn test_integration_flag_after_command() {
    let (mut app, _) = app();
    let spec = CommandSpec::new("study:render", "Render a study")
        .argument(ArgumentSpec::required("name", "Study name"));
    let spy = Arc::new(SpyCommand::new(spec, Behavior::Succeed("rendered")));
    app.register_command(spy.clone());

    let result = app.execute(["study:render", "intro", "--cursor"]).await;
    assert!(result.success);
    assert_eq!(spy.last_args(), ["intro"]);
    let options = spy.last_options().unwrap();
    assert!(options.flag("cursor"));
    assert!(!options.flag("codex"));
    assert!(!options.flag("custom"));
}
