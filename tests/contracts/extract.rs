use crate::harness::{API_KEY, TestContext};
use mockito::Matcher;
use predicates::prelude::*;
use serde_json::json;

const KEYS_RESPONSE: &str = r#"{"data":{"uniqueKeysProcessed":2,"processedWithWarnings":false}}"#;

#[test]
fn extract_sends_keys_found_in_sources() {
    let ctx = TestContext::new();
    ctx.write_file(
        "src/App.jsx",
        r#"export const App = () => <h1>{t("home.title")}</h1>; t('home.subtitle');"#,
    );
    ctx.write_file("src/node_modules/lib/index.js", r#"t("vendor.key")"#);
    ctx.write_config("searchDir: ./src\nprojectType: i18next/react-i18next\n");

    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/cli/v1/keys")
        .match_query(Matcher::UrlEncoded("profile".into(), "default".into()))
        .match_header("X-SimpleLocalize-Token", API_KEY)
        .match_body(Matcher::Json(json!({ "keys": ["home.subtitle", "home.title"] })))
        .with_status(200)
        .with_body(KEYS_RESPONSE)
        .expect(1)
        .create();

    ctx.cli_against(&server.url())
        .arg("extract")
        .assert()
        .success()
        .stdout(predicate::str::contains("Extracted 2 key(s) from 1 file(s)"));

    mock.assert();
}

#[test]
fn ignored_keys_and_paths_are_not_sent() {
    let ctx = TestContext::new();
    ctx.write_file("src/app.ts", r#"t("kept"); t("dropped");"#);
    ctx.write_file("src/generated/messages.ts", r#"t("generated.key");"#);
    ctx.write_config(
        "searchDir: ./src\nprojectType: i18next/react-i18next\nprofile: staging\n\
         ignoreKeys:\n  - dropped\nignorePaths:\n  - src/generated\n",
    );

    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/cli/v1/keys")
        .match_query(Matcher::UrlEncoded("profile".into(), "staging".into()))
        .match_body(Matcher::Json(json!({ "keys": ["kept"] })))
        .with_status(200)
        .with_body(KEYS_RESPONSE)
        .expect(1)
        .create();

    ctx.cli_against(&server.url()).arg("extract").assert().success();

    mock.assert();
}

#[test]
fn rejected_batch_is_logged_but_not_fatal() {
    let ctx = TestContext::new();
    ctx.write_file("src/app.js", r#"t("only.key")"#);

    let mut server = mockito::Server::new();
    server
        .mock("POST", "/cli/v1/keys")
        .match_query(Matcher::Any)
        .with_status(500)
        .with_body(r#"{"msg":"Internal error"}"#)
        .create();

    ctx.cli_against(&server.url())
        .args(["extract", "--searchDir", "./src", "--projectType", "i18next/react-i18next"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Internal error"))
        .stdout(predicate::str::contains("Sent 0 of 1 key batch(es)"));
}

#[test]
fn unknown_project_type_is_a_configuration_error() {
    let ctx = TestContext::new();

    ctx.cli()
        .args(["--apiKey", API_KEY, "extract", "--projectType", "flutter/intl"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("flutter/intl"));
}

#[test]
fn malformed_configuration_file_fails() {
    let ctx = TestContext::new();
    ctx.write_config("projectType: [unclosed\n");

    ctx.cli()
        .args(["--apiKey", API_KEY, "extract"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Could not read configuration file"));
}
