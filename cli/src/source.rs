use std::fs;
use std::io::{self, Read};
use std::path::Path;

use anyhow::{bail, Context, Result};
use tracing::debug;
use weekprofile_core::{parse_observation_args, ObservationSet};

/// Collects observations from inline arguments and/or a JSON file.
pub fn load(args: &[String], file: Option<&Path>) -> Result<ObservationSet> {
    if args.is_empty() && file.is_none() {
        bail!("No observations given: pass DATE:VALUE arguments or --file <PATH>");
    }

    let inline = parse_observation_args(args).context("Invalid inline observation")?;
    let from_file = match file {
        Some(path) => Some(read_json(path)?),
        None => None,
    };

    merge(inline, from_file)
}

fn read_json(path: &Path) -> Result<ObservationSet> {
    let content = if path == Path::new("-") {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read observations from stdin")?;
        buf
    } else {
        fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?
    };

    let set = ObservationSet::from_json(&content)
        .with_context(|| format!("Failed to parse observations in {}", path.display()))?;
    debug!(path = %path.display(), count = set.len(), "loaded observations");
    Ok(set)
}

fn merge(inline: ObservationSet, from_file: Option<ObservationSet>) -> Result<ObservationSet> {
    let mut merged = from_file.unwrap_or_default();
    for (date, value) in inline.iter() {
        if merged.insert(date, value).is_some() {
            bail!("Date {} appears both inline and in the input file", date);
        }
    }
    Ok(merged)
}
