//! Shared test fixtures for integration tests.
//!
//! # Available Fixtures
//!
//! - `scenario_outline`: the small Build / Deploy / Rollback outline
//! - `handbook_outline`: a larger outline with body text at several depths
//! - `ready_library`: a [`Library`] with `handbook_outline` installed

use docnav::{Library, RawOutline, RawSection};
use rstest::fixture;
use std::path::PathBuf;
use std::sync::Arc;

/// Returns the fixtures directory.
#[allow(dead_code)] // Used by a subset of the integration test crates
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

/// `root → [A("Build", a1), B("Deploy", b1, child B1("Rollback", c1))]`
#[fixture]
#[allow(dead_code)] // Used by a subset of the integration test crates
pub fn scenario_outline() -> RawOutline {
    RawOutline::new(vec![
        RawSection::new("a1", "Build"),
        RawSection::new("b1", "Deploy").with_children(vec![RawSection::new("c1", "Rollback")]),
    ])
}

#[fixture]
#[allow(dead_code)] // Used by a subset of the integration test crates
pub fn handbook_outline() -> RawOutline {
    RawOutline::new(vec![
        RawSection::new("intro", "Introduction")
            .with_text("What the service does and how the handbook is organized")
            .with_children(vec![
                RawSection::new("intro-install", "Installation")
                    .with_text("Install the binary and write a configuration file"),
                RawSection::new("intro-quickstart", "Quick start")
                    .with_text("Start the service with the default configuration"),
            ]),
        RawSection::new("config", "Configuration")
            .with_text("All settings are read at startup")
            .with_children(vec![
                RawSection::new("config-file", "Configuration file format")
                    .with_text("TOML sections for server, storage and logging"),
                RawSection::new("config-env", "Environment variables")
                    .with_text("Override any configuration key from the environment"),
                RawSection::new("config-reload", "Reloading")
                    .with_text("Send SIGHUP to reload; conflicts are reported"),
            ]),
        RawSection::new("ops", "Operations").with_children(vec![
            RawSection::new("ops-deploy", "Deploying a release")
                .with_text("Roll out a new build behind the load balancer")
                .with_children(vec![
                    RawSection::new("ops-rollback", "Rolling back")
                        .with_text("Revert to the previous release when a deploy fails"),
                ]),
            RawSection::new("ops-logging", "Logging")
                .with_text("Structured logs; the log level comes from configuration"),
        ]),
    ])
}

#[fixture]
#[allow(dead_code)] // Used by a subset of the integration test crates
pub fn ready_library(handbook_outline: RawOutline) -> Arc<Library> {
    let library = Library::default();
    library
        .install(&handbook_outline)
        .expect("handbook outline is valid");
    Arc::new(library)
}

/// Queries exercised by property-style tests.
#[allow(dead_code)] // Used by a subset of the integration test crates
pub const QUERIES: &[&str] = &[
    "",
    "c",
    "conf",
    "configuration",
    "config file",
    "roll",
    "roll back",
    "deploy",
    "release",
    "log",
    "environment variables",
    "the",
    "zzz",
    "install conf",
    "START",
];
