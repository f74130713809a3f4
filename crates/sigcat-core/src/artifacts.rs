//! Artifact I/O: catalogue snapshots, join inputs/outputs, and the HTML
//! table rendering.
//!
//! Naming conventions:
//!
//! - per-library catalogue: `{dir}/{library}.json` + `{dir}/{library}.csv`
//! - join inputs: `{dir}/joins/{library}_{reference}.json`; the library
//!   identifier is the filename segment before `_{reference}.`, with `dask`
//!   special-cased to `dask.array`
//! - join outputs: `unified_join.json` / `unified_join.csv` in the joins
//!   directory
//!
//! Per-file failures are reported to the error stream and that file is
//! abandoned; sibling files are still processed.

use crate::unify::{library_prefix, JoinInput};
use crate::{csv, Catalogue, Error, JoinedTable, Result};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

/// Serializes a value as the indented JSON artifact format (trailing newline).
fn to_json_artifact<T: serde::Serialize>(value: &T) -> Result<String> {
    Ok(format!("{}\n", serde_json::to_string_pretty(value)?))
}

/// Writes one library's catalogue as JSON and delimited text.
pub fn write_catalogue(dir: &Path, library: &str, records: &Catalogue) -> Result<()> {
    fs::create_dir_all(dir)?;

    let json_path = dir.join(format!("{library}.json"));
    fs::write(&json_path, to_json_artifact(records)?)?;
    info!("Wrote {}", json_path.display());

    let csv_path = dir.join(format!("{library}.csv"));
    fs::write(&csv_path, csv::encode_value(&serde_json::to_value(records)?)?)?;
    info!("Wrote {}", csv_path.display());
    Ok(())
}

/// Reads a previously serialized catalogue.
pub fn read_catalogue(path: &Path) -> Result<Catalogue> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Files in `dir`, sorted by filename.
///
/// Directory traversal order is platform-dependent; sorting makes the
/// auxiliary overwrite order explicit.
fn sorted_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(std::result::Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .collect();
    files.sort();
    Ok(files)
}

/// Derives the library identifier from a join input filename, or `None` when
/// the file does not follow the `{library}_{reference}.json` convention.
fn join_library(file_name: &str, reference: &str) -> Option<String> {
    if !file_name.ends_with(".json") || file_name.contains("unified_join") {
        return None;
    }
    let marker = format!("_{reference}.");
    let library = file_name.split(&marker).next()?;
    if library == file_name {
        return None;
    }
    // Public dask array names live under `dask.array`.
    Some(if library == "dask" {
        "dask.array".to_string()
    } else {
        library.to_string()
    })
}

/// Loads every auxiliary join catalogue from the joins directory, in
/// alphabetical filename order. Unreadable files are reported and skipped.
pub fn load_join_inputs(joins_dir: &Path, reference: &str) -> Result<Vec<JoinInput>> {
    let mut inputs = Vec::new();
    for path in sorted_files(joins_dir)? {
        let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        let Some(library) = join_library(file_name, reference) else {
            debug!("Ignoring {}", path.display());
            continue;
        };
        match read_catalogue(&path) {
            Ok(records) => inputs.push(JoinInput {
                prefix: library_prefix(&library),
                library,
                source: file_name.to_string(),
                records,
            }),
            Err(err) => error!("{}: {}", path.display(), err),
        }
    }
    Ok(inputs)
}

/// Writes the join output artifacts into the joins directory.
pub fn write_joined(joins_dir: &Path, table: &JoinedTable) -> Result<()> {
    fs::create_dir_all(joins_dir)?;

    let json_path = joins_dir.join("unified_join.json");
    fs::write(&json_path, to_json_artifact(table)?)?;
    info!("Wrote {}", json_path.display());

    let csv_path = joins_dir.join("unified_join.csv");
    fs::write(&csv_path, csv::encode(&table.to_objects()))?;
    info!("Wrote {}", csv_path.display());
    Ok(())
}

/// Regenerates the `.csv` sibling of every `.json` file in `dir`.
pub fn json_dir_to_csv(dir: &Path) -> Result<()> {
    for path in sorted_files(dir)? {
        if path.extension().and_then(|e| e.to_str()) != Some("json") {
            continue;
        }
        if let Err(err) = convert_json_file(&path) {
            error!("{}: {}", path.display(), err);
        }
    }
    Ok(())
}

fn convert_json_file(path: &Path) -> Result<()> {
    let value: Value = serde_json::from_str(&fs::read_to_string(path)?)?;
    let out = path.with_extension("csv");
    fs::write(&out, csv::encode_value(&value)?)?;
    info!("Wrote {}", out.display());
    Ok(())
}

/// Converts every hand-edited `.csv` file in `dir` back to its `.json`
/// sibling — the manual-correction loop for join data.
pub fn csv_dir_to_json(dir: &Path) -> Result<()> {
    for path in sorted_files(dir)? {
        if path.extension().and_then(|e| e.to_str()) != Some("csv") {
            continue;
        }
        if let Err(err) = convert_csv_file(&path) {
            error!("{}: {}", path.display(), err);
        }
    }
    Ok(())
}

fn convert_csv_file(path: &Path) -> Result<()> {
    let rows = csv::decode(&fs::read_to_string(path)?)?;
    let out = path.with_extension("json");
    fs::write(&out, to_json_artifact(&rows)?)?;
    info!("Wrote {}", out.display());
    Ok(())
}

/// Renders joined rows as an HTML table: header from the first row's keys,
/// first column emitted as `<th>`.
pub fn html_table(rows: &[serde_json::Map<String, Value>]) -> String {
    let mut out = String::from("<table>\n");
    let Some(first) = rows.first() else {
        out.push_str("</table>");
        return out;
    };
    let keys: Vec<&String> = first.keys().collect();

    out.push_str("<thead>\n<tr>\n");
    for key in &keys {
        out.push_str(&format!("<th>{key}</th>\n"));
    }
    out.push_str("</tr>\n</thead>\n");

    out.push_str("<tbody>\n");
    for row in rows {
        out.push_str("<tr>\n");
        for (j, key) in keys.iter().enumerate() {
            let value = row.get(*key).and_then(Value::as_str).unwrap_or_default();
            if j == 0 {
                out.push_str(&format!("<th>{value}</th>\n"));
            } else {
                out.push_str(&format!("<td>{value}</td>\n"));
            }
        }
        out.push_str("</tr>\n");
    }
    out.push_str("</tbody>\n</table>");
    out
}

/// Injects the rendered join table into the template at `{{TABLE}}` and
/// writes the result.
pub fn write_html_table(join_json: &Path, template: &Path, out: &Path) -> Result<()> {
    let rows: Vec<serde_json::Map<String, Value>> =
        serde_json::from_str(&fs::read_to_string(join_json)?)?;
    let template_content = fs::read_to_string(template)?;
    if !template_content.contains("{{TABLE}}") {
        return Err(Error::Template(format!(
            "{} has no {{{{TABLE}}}} placeholder",
            template.display()
        )));
    }
    let rendered = template_content.replace("{{TABLE}}", &html_table(&rows));
    fs::write(out, rendered)?;
    info!("Wrote {}", out.display());
    Ok(())
}
