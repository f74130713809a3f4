#![allow(missing_docs, clippy::expect_used, clippy::unwrap_used)]

//! End-to-end tests for the artifact pipeline: join, conversion loop, and
//! HTML rendering over a fixture data directory.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{json, Value};
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn sigcat() -> Command {
    Command::cargo_bin("sigcat").expect("sigcat binary builds")
}

fn seed_data_dir(data_dir: &Path) {
    fs::create_dir_all(data_dir.join("joins")).unwrap();

    let numpy = json!([
        {
            "name": "numpy.add",
            "description": "Add arguments element-wise.",
            "signature": "numpy.add(x1, x2)",
            "url": "https://docs.scipy.org/doc/numpy/reference/generated/numpy.add.html"
        },
        {
            "name": "numpy.zeros",
            "description": "Return a new array of zeros.",
            "signature": "numpy.zeros(shape)",
            "url": "https://docs.scipy.org/doc/numpy/reference/generated/numpy.zeros.html"
        }
    ]);
    fs::write(data_dir.join("numpy.json"), numpy.to_string()).unwrap();

    let cupy = json!([
        {
            "name": "cupy.add",
            "description": "Adds two arrays.",
            "signature": "cupy.add(x1, x2)",
            "url": "https://docs-cupy.chainer.org/en/stable/generated/cupy.add.html",
            "numpy": "numpy.add",
            "numpy_url": "https://docs.scipy.org/doc/numpy/reference/generated/numpy.add.html"
        },
        {
            "name": "cupy.stray",
            "description": "Points at a name the reference does not have.",
            "signature": "cupy.stray(x)",
            "url": "https://docs-cupy.chainer.org/en/stable/generated/cupy.stray.html",
            "numpy": "numpy.missing",
            "numpy_url": ""
        }
    ]);
    fs::write(data_dir.join("joins/cupy_numpy.json"), cupy.to_string()).unwrap();

    let pytorch = json!([
        {
            "name": "torch.add",
            "description": "Adds, element-wise.",
            "signature": "torch.add(input, other)",
            "url": "https://pytorch.org/docs/stable/tensors.html#torch.Tensor.add",
            "numpy": "numpy.add"
        }
    ]);
    fs::write(data_dir.join("joins/pytorch_numpy.json"), pytorch.to_string()).unwrap();
}

#[test]
fn join_produces_unified_artifacts() {
    let tmp = tempdir().unwrap();
    seed_data_dir(tmp.path());

    sigcat()
        .args(["join", "--data-dir"])
        .arg(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("joined 3 libraries over 2 numpy names"));

    let joined: Value =
        serde_json::from_str(&fs::read_to_string(tmp.path().join("joins/unified_join.json")).unwrap())
            .unwrap();
    assert_eq!(
        joined,
        json!([
            {"numpy": "numpy.add", "cupy": "add", "pytorch": "add"},
            {"numpy": "numpy.zeros", "cupy": "", "pytorch": ""}
        ])
    );

    let csv = fs::read_to_string(tmp.path().join("joins/unified_join.csv")).unwrap();
    assert_eq!(
        csv,
        "numpy,cupy,pytorch\r\n\
         \"numpy.add\",\"add\",\"add\"\r\n\
         \"numpy.zeros\",\"\",\"\"\r\n"
    );
}

#[test]
fn missing_reference_catalogue_is_fatal() {
    let tmp = tempdir().unwrap();
    fs::create_dir_all(tmp.path().join("joins")).unwrap();

    sigcat()
        .args(["join", "--data-dir"])
        .arg(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot read reference catalogue"));
}

#[test]
fn conversion_loop_round_trips_join_files() {
    let tmp = tempdir().unwrap();
    seed_data_dir(tmp.path());
    let joins_dir = tmp.path().join("joins");
    let before = fs::read_to_string(joins_dir.join("cupy_numpy.json")).unwrap();
    let before: Value = serde_json::from_str(&before).unwrap();

    sigcat()
        .args(["json2csv", "--data-dir"])
        .arg(&joins_dir)
        .assert()
        .success();
    assert!(joins_dir.join("cupy_numpy.csv").exists());

    sigcat()
        .args(["csv2json", "--data-dir"])
        .arg(&joins_dir)
        .assert()
        .success();

    let after: Value =
        serde_json::from_str(&fs::read_to_string(joins_dir.join("cupy_numpy.json")).unwrap())
            .unwrap();
    assert_eq!(before, after);
}

#[test]
fn html_renders_table_into_template() {
    let tmp = tempdir().unwrap();
    seed_data_dir(tmp.path());

    sigcat()
        .args(["join", "--data-dir"])
        .arg(tmp.path())
        .assert()
        .success();

    let template = tmp.path().join("template.html");
    fs::write(&template, "<html><body>{{TABLE}}</body></html>").unwrap();
    let out = tmp.path().join("index.html");

    sigcat()
        .args(["html", "--data-dir"])
        .arg(tmp.path())
        .arg("--template")
        .arg(&template)
        .arg("--out")
        .arg(&out)
        .assert()
        .success();

    let rendered = fs::read_to_string(out).unwrap();
    assert!(rendered.contains("<th>numpy</th>"));
    assert!(rendered.contains("<th>numpy.add</th>"));
    assert!(rendered.contains("<td>add</td>"));
    assert!(!rendered.contains("{{TABLE}}"));
}

#[test]
fn libraries_lists_registered_extractors() {
    sigcat()
        .args(["libraries"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("cupy")
                .and(predicate::str::contains("numpy"))
                .and(predicate::str::contains("tensorflow")),
        );
}

#[test]
fn unknown_library_fails_fast() {
    sigcat()
        .args(["scrape", "jax"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown library"));
}
