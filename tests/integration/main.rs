//! Uses the single integration test approach.
//!
//! This improves parallelism when running the tests, and reduces the number of binaries that have to be built (and linked)
#![expect(
    clippy::tests_outside_test_module,
    reason = "This is the integration test binary, so it's expected that tests are outside of a test module"
)]
#![expect(clippy::indexing_slicing, reason = "This is not problematic in tests")]
#![expect(clippy::unwrap_used, reason = "Using unwrap in tests is fine")]

extern crate alloc;
extern crate core;

mod common;
mod language;
mod probe;

use clap::Parser as _;

use schoolportal_login::{cli::Cli, inner_main};

#[tokio::test]
async fn open_dialog_command_succeeds() {
    inner_main(Cli::parse_from(["login", "open-dialog", "find-my-district"]))
        .await
        .unwrap();
}

#[tokio::test]
async fn missing_config_is_reported() {
    let err = inner_main(Cli::parse_from([
        "login",
        "probe",
        "--config",
        "/definitely/not/here.toml",
    ]))
    .await
    .unwrap_err();
    assert!(
        err.to_string().contains("Config file not found"),
        "unexpected error: {err:?}"
    );
}

#[test]
fn unknown_dialog_is_rejected_by_cli() {
    assert!(Cli::try_parse_from(["login", "open-dialog", "settings"]).is_err());
}
