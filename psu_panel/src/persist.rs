//! Persist-on-exit.
//!
//! Rewrites `angle` and `voltage_setting` of every knob entry whose id
//! matches a live knob. The file is edited as a document, so comments,
//! inline tables and key order survive. The new content goes to a sibling
//! temp file which is then renamed over the original.

use crate::error::PanelError;
use crate::knob::KnobState;
use std::fs;
use std::path::{Path, PathBuf};
use toml_edit::{DocumentMut, Item, TableLike, Value};
use tracing::{debug, info};

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Replace `key` in `entry`, keeping the existing value's comments.
fn set_float(entry: &mut dyn TableLike, key: &str, value: f64) {
    match entry.get_mut(key).and_then(Item::as_value_mut) {
        Some(slot) => {
            let decor = slot.decor().clone();
            *slot = Value::from(value);
            *slot.decor_mut() = decor;
        }
        None => {
            entry.insert(key, Item::Value(Value::from(value)));
        }
    }
}

fn rewrite_entry(entry: &mut dyn TableLike, knobs: &[KnobState]) -> bool {
    let Some(id) = entry.get("id").and_then(Item::as_integer) else {
        return false;
    };
    let Some(knob) = knobs.iter().find(|k| i64::from(k.id.get()) == id) else {
        return false;
    };
    set_float(entry, "angle", knob.angle);
    set_float(entry, "voltage_setting", knob.voltage_setting);
    true
}

/// Update knob entries of a configuration document. Returns the number rewritten.
///
/// Both `[[knobs]]` tables and an inline `knobs = [{ .. }]` array are handled.
pub fn rewrite_knobs(doc: &mut DocumentMut, knobs: &[KnobState]) -> usize {
    let Some(item) = doc.get_mut("knobs") else {
        return 0;
    };

    let mut rewritten = 0;
    if let Some(tables) = item.as_array_of_tables_mut() {
        for table in tables.iter_mut() {
            rewritten += usize::from(rewrite_entry(table, knobs));
        }
    } else if let Some(array) = item.as_array_mut() {
        for entry in array.iter_mut() {
            if let Some(table) = entry.as_inline_table_mut() {
                rewritten += usize::from(rewrite_entry(table, knobs));
            }
        }
    }
    rewritten
}

/// Write the live knob settings back into the configuration file at `path`.
///
/// # Errors
/// Returns `PanelError::Persist` if the file cannot be read, parsed or replaced.
pub fn persist_knobs(path: &Path, knobs: &[KnobState]) -> Result<(), PanelError> {
    let fail = |message: String| PanelError::Persist {
        path: path.display().to_string(),
        message,
    };

    let content = fs::read_to_string(path).map_err(|e| fail(format!("read failed: {e}")))?;
    let mut doc: DocumentMut = content
        .parse()
        .map_err(|e: toml_edit::TomlError| fail(format!("parse failed: {e}")))?;

    let rewritten = rewrite_knobs(&mut doc, knobs);

    let tmp = temp_path(path);
    debug!("Writing {} knob settings via {}", rewritten, tmp.display());
    if let Err(e) = fs::write(&tmp, doc.to_string()) {
        let _ = fs::remove_file(&tmp);
        return Err(fail(format!("write {} failed: {e}", tmp.display())));
    }
    if let Err(e) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(fail(format!("rename failed: {e}")));
    }

    info!("Persisted {} knob settings to {}", rewritten, path.display());
    Ok(())
}

// ── Tests ──
