use std::fs;

use clap::Parser as _;

use schoolportal_common::LanguageCode;
use schoolportal_login::{
    app::set_language, cli::Cli, config, inner_main, services::FileLanguageStore,
};

use crate::common::{config_arg, write_config};

#[tokio::test]
async fn language_command_persists_choice_next_to_config() {
    let config_path = write_config("language_cli", "http://127.0.0.1:9", "");
    let language_file = config_path.with_file_name("language.json");

    inner_main(Cli::parse_from([
        "login",
        "language",
        "--config",
        &config_arg(&config_path),
        "fr",
    ]))
    .await
    .unwrap();
    let persisted: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&language_file).unwrap()).unwrap();
    assert_eq!(persisted["language"], "fr");

    inner_main(Cli::parse_from([
        "login",
        "language",
        "--config",
        &config_arg(&config_path),
    ]))
    .await
    .unwrap();
    let kept: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&language_file).unwrap()).unwrap();
    assert_eq!(kept["language"], "fr", "no argument keeps the preference");
}

#[tokio::test]
async fn configured_default_applies_without_preference() {
    let config_path = write_config(
        "language_default",
        "http://127.0.0.1:9",
        "[language]\ndefault = \"es\"\npath = \"prefs/lang.json\"\n",
    );
    let loaded = config::load(&config_path).await.unwrap();
    let store = FileLanguageStore::new(
        config::resolve_config_relative_paths(&config_path, &loaded.language.path),
        loaded.language.default.clone(),
    );

    assert_eq!(set_language(&store, None), LanguageCode::new("es").unwrap());
    assert!(config_path.with_file_name("prefs").join("lang.json").exists());
}
