use std::fs;

use clap::Parser as _;

use schoolportal_login::{cli::Cli, inner_main};

use crate::common::{FakeLookupService, config_arg, write_config};

#[tokio::test]
async fn probe_succeeds_and_ends_previous_session() {
    let service = FakeLookupService::start(&[200]).await;
    let config = write_config("probe_ok", &service.base_url, "");
    let session = config.with_file_name("session.json");
    fs::write(&session, r#"{"token":"stale"}"#).unwrap();

    inner_main(Cli::parse_from(["login", "probe", "--config", &config_arg(&config)]))
        .await
        .unwrap();

    assert_eq!(
        service.requests(),
        ["GET /districts/search?keyword=schoolcafe&role=parent HTTP/1.1"]
    );
    assert!(!session.exists(), "previous session should have been ended");
}

#[tokio::test]
async fn probe_retries_until_service_recovers() {
    let service = FakeLookupService::start(&[500, 503, 200]).await;
    let config = write_config("probe_recovers", &service.base_url, "");

    inner_main(Cli::parse_from(["login", "probe", "--config", &config_arg(&config)]))
        .await
        .unwrap();

    assert_eq!(service.requests().len(), 3);
}

#[tokio::test]
async fn probe_gives_up_after_retry_budget() {
    let service = FakeLookupService::start(&[503]).await;
    let config = write_config(
        "probe_exhausted",
        &service.base_url,
        "",
    );
    fs::write(
        &config,
        fs::read_to_string(&config)
            .unwrap()
            .replace("max_retries = 3", "max_retries = 1"),
    )
    .unwrap();

    let err = inner_main(Cli::parse_from(["login", "probe", "--config", &config_arg(&config)]))
        .await
        .unwrap_err();

    assert!(
        err.to_string().contains("unavailable after 2 attempt(s)"),
        "unexpected error: {err:?}"
    );
    assert_eq!(service.requests().len(), 2);
}

#[tokio::test]
async fn probe_uses_cli_district_and_role() {
    let service = FakeLookupService::start(&[200]).await;
    let config = write_config("probe_override", &service.base_url, "");

    inner_main(Cli::parse_from([
        "login",
        "probe",
        "--config",
        &config_arg(&config),
        "--district",
        "springfield",
        "--role",
        "student",
    ]))
    .await
    .unwrap();

    assert_eq!(
        service.requests(),
        ["GET /districts/search?keyword=springfield&role=student HTTP/1.1"]
    );
}

#[tokio::test]
async fn probe_rejects_blank_district_override() {
    let service = FakeLookupService::start(&[200]).await;
    let config = write_config("probe_blank_override", &service.base_url, "");

    let err = inner_main(Cli::parse_from([
        "login",
        "probe",
        "--config",
        &config_arg(&config),
        "--district",
        " ",
    ]))
    .await
    .unwrap_err();

    assert!(err.to_string().contains("district id must not be empty"));
    assert!(service.requests().is_empty());
}
