use std::fs;
use std::path::PathBuf;

use crate::error::Result;
use crate::models::BotRecord;

/// Overwrites `{base}.json` (pretty-printed, non-ASCII preserved) and
/// `{base}.csv` with the full record list. Write failures are logged and
/// swallowed: running on a read-only filesystem is an expected mode, not a
/// bug.
pub fn write(base: &str, records: &[BotRecord]) {
    if let Err(e) = try_write(base, records) {
        tracing::info!("Local snapshot skipped (read-only filesystem?): {}", e);
    }
}

fn try_write(base: &str, records: &[BotRecord]) -> Result<()> {
    let json = serde_json::to_string_pretty(records)?;
    fs::write(json_path(base), json)?;
    fs::write(csv_path(base), to_csv(records))?;
    Ok(())
}

/// Reads the JSON snapshot back, returning an empty list if the file is
/// absent or malformed. Used by the read side when the durable store has
/// nothing to offer.
pub fn read(base: &str) -> Vec<BotRecord> {
    let Ok(contents) = fs::read_to_string(json_path(base)) else {
        return Vec::new();
    };
    match serde_json::from_str(&contents) {
        Ok(records) => records,
        Err(e) => {
            tracing::warn!("Malformed local snapshot, ignoring: {}", e);
            Vec::new()
        }
    }
}

fn json_path(base: &str) -> PathBuf {
    PathBuf::from(format!("{}.json", base))
}

fn csv_path(base: &str) -> PathBuf {
    PathBuf::from(format!("{}.csv", base))
}

fn to_csv(records: &[BotRecord]) -> String {
    let mut out = String::new();
    out.push_str(&BotRecord::FIELDS.join(","));
    out.push_str("\r\n");

    for r in records {
        let row = [
            r.name.as_str(),
            r.author.as_str(),
            r.full_name.as_str(),
            r.description.as_deref().unwrap_or(""),
            r.link.as_str(),
            r.category.as_str(),
            r.language.as_deref().unwrap_or(""),
            &r.stars.to_string(),
            &r.forks.to_string(),
            &r.open_issues.to_string(),
            r.last_updated.as_str(),
            r.license.as_str(),
            r.repo_type.as_str(),
            r.what_it_does.as_str(),
            r.how_to_use.as_str(),
        ]
        .iter()
        .map(|field| escape_csv(field))
        .collect::<Vec<_>>()
        .join(",");

        out.push_str(&row);
        out.push_str("\r\n");
    }

    out
}

fn escape_csv(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
