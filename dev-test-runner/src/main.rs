//! Golden-fixture runner: every `fixtures/*.json` declares a model and the
//! sample each root type must produce.
//!
//! ```bash
//! cargo run -p dev-test-runner            # all fixtures
//! cargo run -p dev-test-runner -- generic # fixtures whose name matches a regex
//! ```
use std::path::{Path, PathBuf};
use chrono::{Local, TimeZone};
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;
use sample_json::model::ModelDocument;
use sample_json::{ScalarDefaults, Sampler, TypeModel};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct Fixture {
    #[serde(default)]
    description: String,
    model: ModelDocument,
    #[serde(default)]
    string_placeholder: Option<String>,
    roots: Vec<RootCase>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RootCase {
    #[serde(rename = "type")]
    ty: String,
    /// `null` also stands for "no value".
    expected: Value,
}

#[derive(Debug, Default)]
struct Tally {
    passed: usize,
    failed: usize,
}

fn fixture_paths(filter: Option<&Regex>) -> Vec<PathBuf> {
    let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures");
    let entries = match std::fs::read_dir(&dir) {
        Ok(entries) => entries,
        Err(error) => panic!("cannot list {}: {error}", dir.display()),
    };
    let mut paths: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
        .filter(|path| {
            let name = path.file_stem().map(|s| s.to_string_lossy()).unwrap_or_default();
            filter.is_none_or(|re| re.is_match(&name))
        })
        .collect();
    paths.sort();
    paths
}

fn load_fixture(path: &Path) -> Result<Fixture, String> {
    let source = std::fs::read_to_string(path).map_err(|error| error.to_string())?;
    let de = &mut serde_json::Deserializer::from_str(&source);
    serde_path_to_error::deserialize(de).map_err(|error| format!("at {}: {}", error.path(), error.inner()))
}

fn run_fixture(path: &Path, tally: &mut Tally) {
    let name = path.file_stem().map(|s| s.to_string_lossy().to_string()).unwrap_or_default();
    let fixture = match load_fixture(path) {
        Ok(fixture) => fixture,
        Err(error) => {
            eprintln!("❌ {name}: bad fixture {error}");
            tally.failed += 1;
            return;
        }
    };
    let model = match TypeModel::from_documents(vec![fixture.model]) {
        Ok(model) => model,
        Err(error) => {
            eprintln!("❌ {name}: {error}");
            tally.failed += 1;
            return;
        }
    };
    let clock = Local.with_ymd_and_hms(2024, 5, 19, 22, 8, 0).single().unwrap_or_else(Local::now);
    let defaults = match fixture.string_placeholder.as_deref() {
        Some(placeholder) => ScalarDefaults::at(clock).with_string_placeholder(placeholder),
        None => ScalarDefaults::at(clock),
    };
    let sampler = Sampler::new(&model, &defaults);

    eprintln!("—— {name}: {}", fixture.description);
    for case in fixture.roots {
        let ty = match model.parse_type(&case.ty) {
            Ok(ty) => ty,
            Err(error) => {
                eprintln!("  ❌ {}: {error}", case.ty);
                tally.failed += 1;
                continue;
            }
        };
        let actual = sampler.sample(&ty).unwrap_or(Value::Null);
        if actual == case.expected {
            eprintln!("  ✅ {}", case.ty);
            tally.passed += 1;
        } else {
            eprintln!("  ❌ {}\n     expected: {}\n     actual:   {}", case.ty, case.expected, actual);
            tally.failed += 1;
        }
    }
}

fn main() {
    let filter = std::env::args().nth(1).map(|pattern| match Regex::new(&pattern) {
        Ok(re) => re,
        Err(error) => panic!("invalid fixture filter `{pattern}`: {error}"),
    });
    let mut tally = Tally::default();
    for path in fixture_paths(filter.as_ref()) {
        run_fixture(&path, &mut tally);
    }
    eprintln!("{} passed, {} failed", tally.passed, tally.failed);
    if tally.failed > 0 {
        std::process::exit(1);
    }
}
