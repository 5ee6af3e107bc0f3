//! Loading application configs and wiring them into a resolver.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use spa_router::config::{AppConfig, ConfigError, ValidationError, load_app, load_config};
use spa_router::history::HistoryMode;
use spa_router::navigation::RouteResolver;

/// Write `content` to a fresh file under the system temp dir.
fn write_config(name: &str, content: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("spa-router-{}-{name}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join("app.toml");
    fs::write(&path, content).unwrap();
    path
}

const TOUR: &str = r#"
[build]
base_path = "/bit-virtual-tour/"

[build.alias]
"@" = "./src"

[router]
history = "hash"
initial_location = "/"
not_found = "@/views/NotFound.vue"

[logging]
level = "debug"

[[routes]]
path = "/"
name = "home"
component = "@/views/LocalMap.vue"

[[routes]]
path = "/labs"
name = "labs"
component = "@/views/LabsView.vue"

[[routes]]
path = "/labs/:id"
name = "lab"
component = "@/views/LabDetail.vue"

[[routes]]
path = "/*"
component = "@/views/NotFound.vue"
"#;

#[test]
fn test_load_full_config() {
    let path = write_config("full", TOUR);
    let (config, table) = load_app(&path).unwrap();

    assert_eq!(config.router.history, HistoryMode::Hash);
    assert_eq!(config.logging.level, "debug");
    assert_eq!(table.len(), 4);
    assert_eq!(
        config.base_path().unwrap().asset_url("assets/index.js"),
        "/bit-virtual-tour/assets/index.js"
    );
    assert_eq!(
        config.aliases().unwrap().resolve("@/views/LabsView.vue").as_deref(),
        Some("./src/views/LabsView.vue")
    );

    let mut resolver = RouteResolver::new(Arc::new(table), config.router.initial_location.clone());
    let history = config.history();

    let location = history.location("https://example.org/bit-virtual-tour/#/labs/3");
    assert_eq!(resolver.navigate(&location).unwrap().name(), Some("lab"));

    // The catch-all swallows everything the explicit routes do not.
    let fallback = resolver.navigate("/no/such/page").unwrap();
    assert_eq!(fallback.component(), "@/views/NotFound.vue");
    assert_eq!(fallback.param("pathMatch"), Some("no/such/page"));

    let href = history.href(&resolver.href("labs", &[]).unwrap());
    assert_eq!(href, "/bit-virtual-tour/#/labs");
}

#[test]
fn test_invalid_file_reports_all_errors() {
    let path = write_config(
        "invalid",
        r#"
        [build]
        base_path = "relative-without-dot"

        [logging]
        level = "chatty"

        [[routes]]
        path = "/labs"
        component = "A"

        [[routes]]
        path = "/labs"
        component = "B"
        "#,
    );

    match load_config(&path).unwrap_err() {
        ConfigError::Validation(errors) => {
            assert_eq!(errors.len(), 3, "{errors:?}");
            assert!(matches!(errors[0], ValidationError::Route { index: 1, .. }));
            assert!(matches!(errors[1], ValidationError::Build(_)));
            assert!(matches!(errors[2], ValidationError::LogLevel(_)));
        }
        other => panic!("expected validation errors, got {other}"),
    }
}

#[test]
fn test_defaults_reproduce_the_shell() {
    let config = AppConfig::default();
    let table = config.route_table().unwrap();

    let paths: Vec<&str> = table.iter().map(|r| r.path.as_str()).collect();
    assert_eq!(paths, vec!["/", "/labs", "/stories", "/activities", "/dev"]);
    assert!(table.get_by_name("home").is_some());
    assert!(table.get_by_name("stories").is_none());

    assert_eq!(config.history().href("/dev"), "./#/dev");
    assert!(config.base_path().unwrap().is_relative());
}
