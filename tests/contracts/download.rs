use crate::harness::{API_KEY, TestContext};
use mockito::Matcher;
use predicates::prelude::*;
use std::fs;

#[test]
fn multi_language_json_is_written_to_the_configured_path() {
    let ctx = TestContext::new();
    ctx.write_config(
        "downloadPath: ./out/translations.json\ndownloadFormat: multi-language-json\n",
    );

    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/cli/v1/download")
        .match_query(Matcher::Exact("downloadFormat=multi-language-json".into()))
        .match_header("X-SimpleLocalize-Token", API_KEY)
        .with_status(200)
        .with_body(r#"{"en":{"hello":"Hello"},"fr":{"hello":"Bonjour"}}"#)
        .expect(1)
        .create();

    ctx.cli_against(&server.url())
        .arg("download")
        .assert()
        .success()
        .stdout(predicate::str::contains("Downloaded 1 file(s)"));

    mock.assert();
    assert_eq!(
        ctx.read_file("out/translations.json"),
        r#"{"en":{"hello":"Hello"},"fr":{"hello":"Bonjour"}}"#
    );
}

#[test]
fn templated_download_writes_one_file_per_language() {
    let ctx = TestContext::new();
    ctx.write_config(
        "downloadPath: ./locales/{lang}/messages.json\ndownloadFormat: single-language-json\n",
    );

    let mut server = mockito::Server::new();
    let listing_body = format!(
        r#"{{"data":{{"files":[
            {{"url":"{base}/files/en.json","language":"en"}},
            {{"url":"{base}/files/fr.json","language":"fr"}}
        ]}}}}"#,
        base = server.url()
    );
    let listing = server
        .mock("GET", "/cli/v2/download")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("downloadFormat".into(), "single-language-json".into()),
            Matcher::UrlEncoded("downloadOptions".into(), "SPLIT_BY_LANGUAGES".into()),
        ]))
        .with_status(200)
        .with_body(listing_body)
        .expect(1)
        .create();
    let files: Vec<_> = [("en", "Hello"), ("fr", "Bonjour")]
        .iter()
        .map(|(lang, text)| {
            server
                .mock("GET", format!("/files/{lang}.json").as_str())
                .with_status(200)
                .with_body(format!(r#"{{"hello":"{text}"}}"#))
                .expect(1)
                .create()
        })
        .collect();

    ctx.cli_against(&server.url()).arg("download").assert().success();

    listing.assert();
    for mock in files {
        mock.assert();
    }
    assert_eq!(ctx.read_file("locales/en/messages.json"), r#"{"hello":"Hello"}"#);
    assert_eq!(ctx.read_file("locales/fr/messages.json"), r#"{"hello":"Bonjour"}"#);
}

#[test]
fn downloaded_files_can_be_uploaded_again_from_the_same_template() {
    let ctx = TestContext::new();
    ctx.write_config(
        "downloadPath: ./i18n/messages_{lang}.json\ndownloadFormat: single-language-json\n\
         uploadPath: ./i18n/messages_{lang}.json\nuploadFormat: single-language-json\n",
    );

    let mut server = mockito::Server::new();
    let listing_body = format!(
        r#"{{"data":{{"files":[{{"url":"{base}/files/de.json","language":"de"}}]}}}}"#,
        base = server.url()
    );
    server
        .mock("GET", "/cli/v2/download")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(listing_body)
        .create();
    server.mock("GET", "/files/de.json").with_status(200).with_body("{}").create();
    let upload = server
        .mock("POST", "/cli/v1/upload")
        .match_query(Matcher::Any)
        .match_body(Matcher::Regex(r#"name="languageKey"\s+de\s"#.into()))
        .with_status(200)
        .with_body(r#"{"msg":"OK"}"#)
        .expect(1)
        .create();

    ctx.cli_against(&server.url()).arg("download").assert().success();
    ctx.cli_against(&server.url()).arg("upload").assert().success();

    upload.assert();
}

#[test]
fn zipped_bundle_is_extracted_beside_the_placeholder() {
    let ctx = TestContext::new();
    ctx.write_config(
        "downloadPath: ./locales/{lang}.json\ndownloadFormat: single-language-json\n",
    );

    let mut server = mockito::Server::new();
    let listing_body = format!(
        r#"{{"data":{{"files":[{{"url":"{base}/files/bundle.zip"}}]}}}}"#,
        base = server.url()
    );
    server
        .mock("GET", "/cli/v2/download")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(listing_body)
        .create();
    server
        .mock("GET", "/files/bundle.zip")
        .with_status(200)
        .with_body(zip_bundle(&[("en.json", "{\"a\":\"A\"}"), ("de.json", "{\"a\":\"Ä\"}")]))
        .create();

    ctx.cli_against(&server.url()).arg("download").assert().success();

    assert_eq!(ctx.read_file("locales/en.json"), "{\"a\":\"A\"}");
    assert_eq!(ctx.read_file("locales/de.json"), "{\"a\":\"Ä\"}");
    let leftovers: Vec<_> = fs::read_dir(ctx.work_dir().join("locales"))
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .filter(|name| name.ends_with(".zip"))
        .collect();
    assert!(leftovers.is_empty(), "temporary archives left behind: {leftovers:?}");
}

#[test]
fn download_requires_a_format() {
    let ctx = TestContext::new();
    ctx.write_config("downloadPath: ./out.json\n");

    let mut server = mockito::Server::new();
    let mock = server.mock("GET", Matcher::Any).match_query(Matcher::Any).expect(0).create();

    ctx.cli_against(&server.url())
        .arg("download")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("downloadFormat"));

    mock.assert();
    assert!(fs::metadata(ctx.work_dir().join("out.json")).is_err());
}

fn zip_bundle(entries: &[(&str, &str)]) -> Vec<u8> {
    use std::io::Write;
    use zip::write::SimpleFileOptions;

    let mut writer = zip::ZipWriter::new(std::io::Cursor::new(Vec::new()));
    for (name, content) in entries {
        writer
            .start_file(*name, SimpleFileOptions::default())
            .expect("start zip entry");
        writer.write_all(content.as_bytes()).expect("write zip entry");
    }
    writer.finish().expect("finish zip").into_inner()
}
