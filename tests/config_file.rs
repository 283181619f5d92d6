//! Loading a site from a config file and resolving pages against it.

use std::io::Write;
use std::path::Path;
use std::time::Duration;

use charitable_endpoints::config::watcher::ConfigWatcher;
use charitable_endpoints::config::{load_config, ConfigError};
use charitable_endpoints::endpoints::functions::{get_permalink, is_campaign_donation_page};
use charitable_endpoints::{Application, EndpointArgs};

const PLAIN_SITE: &str = r#"
[listener]
bind_address = "127.0.0.1:8181"

[site]
home_url = "https://example.net/charity"
permalinks = "plain"
donation_receipt_page = 4

[[site.pages]]
id = 4
slug = "receipt"

[[site.campaigns]]
id = 30
slug = "shelter"
donation_form = "same_page"
"#;

#[test]
fn test_plain_site_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(PLAIN_SITE.as_bytes()).unwrap();

    let config = load_config(file.path()).unwrap();
    let app = Application::from_config(config).unwrap();
    let endpoints = app.endpoints();

    assert_eq!(
        get_permalink(endpoints, "campaign_donation", &EndpointArgs::new().campaign(30)).as_deref(),
        Some("https://example.net/charity/?campaign_id=30&donate=1")
    );
    assert_eq!(
        get_permalink(endpoints, "donation_receipt", &EndpointArgs::new().donation(2)).as_deref(),
        Some("https://example.net/charity/?page_id=4&donation_id=2")
    );

    let campaign_page = endpoints.resolve_path("/charity/?campaign_id=30");
    assert!(is_campaign_donation_page(endpoints, &campaign_page, &EndpointArgs::new()));
    assert!(!is_campaign_donation_page(
        endpoints,
        &campaign_page,
        &EndpointArgs::new().strict(true)
    ));

    let receipt = endpoints.resolve_path("/charity/?page_id=4&donation_id=2");
    assert!(endpoints.is_page("donation_receipt", &receipt, &EndpointArgs::new()));
}

#[test]
fn test_missing_file() {
    let err = load_config(std::path::Path::new("/definitely/not/here.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));
}

#[test]
fn test_invalid_file_reports_every_error() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(
        br#"
        [site]
        home_url = "example"
        login_page = 1
        "#,
    )
    .unwrap();

    match load_config(file.path()).unwrap_err() {
        ConfigError::Validation(errors) => assert_eq!(errors.len(), 2),
        other => panic!("unexpected error: {other}"),
    }
}

/// Save the way editors do: write a sibling temp file, then rename it over
/// the original.
fn save_by_rename(path: &Path, contents: &str) {
    let temp = path.with_extension("toml.tmp");
    std::fs::write(&temp, contents).unwrap();
    std::fs::rename(&temp, path).unwrap();
}

#[tokio::test]
async fn test_watcher_publishes_changed_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("site.toml");
    std::fs::write(&path, PLAIN_SITE).unwrap();

    let initial = load_config(&path).unwrap();
    let (watcher, mut updates) = ConfigWatcher::new(&path, initial);
    let _handle = watcher.run().unwrap();

    // Same content: nothing is published.
    save_by_rename(&path, PLAIN_SITE);
    // Unrelated file in the same directory: ignored.
    std::fs::write(dir.path().join("notes.txt"), "hello").unwrap();

    let changed = PLAIN_SITE.replace("slug = \"shelter\"", "slug = \"night-shelter\"");
    save_by_rename(&path, &changed);

    let update = tokio::time::timeout(Duration::from_secs(10), updates.recv())
        .await
        .expect("no config update received")
        .unwrap();
    assert_eq!(update.site.campaigns[0].slug, "night-shelter");

    // Nothing else queued behind it.
    tokio::time::sleep(Duration::from_millis(200)).await;
    assert!(updates.try_recv().is_err());
}
