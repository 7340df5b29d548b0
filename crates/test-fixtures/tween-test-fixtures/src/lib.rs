use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;
use serde::Deserialize;

static MANIFEST: Lazy<Manifest> = Lazy::new(|| {
    let raw = include_str!("../../../../fixtures/manifest.json");
    serde_json::from_str(raw).expect("fixtures manifest should parse")
});

#[derive(Debug, Deserialize)]
struct Manifest {
    #[serde(rename = "curve-sets")]
    curve_sets: HashMap<String, CurveSetEntry>,
    configs: HashMap<String, String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CurveSetEntry {
    Path(String),
    Detailed {
        path: String,
        #[serde(default)]
        playhead: Option<f64>,
    },
}

impl CurveSetEntry {
    fn as_path(&self) -> &str {
        match self {
            CurveSetEntry::Path(path) => path,
            CurveSetEntry::Detailed { path, .. } => path,
        }
    }

    fn playhead(&self) -> Option<f64> {
        match self {
            CurveSetEntry::Path(_) => None,
            CurveSetEntry::Detailed { playhead, .. } => *playhead,
        }
    }
}

fn fixtures_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../../fixtures")
}

fn resolve_path(rel: &str) -> PathBuf {
    fixtures_root().join(rel)
}

fn read_to_string(rel: &str) -> Result<String> {
    let path = resolve_path(rel);
    fs::read_to_string(&path)
        .with_context(|| format!("failed to read fixture at {}", path.display()))
}

fn load_json<T: DeserializeOwned>(rel: &str) -> Result<T> {
    let text = read_to_string(rel)?;
    serde_json::from_str(&text).with_context(|| format!("failed to parse JSON fixture {rel}"))
}

fn lookup<'a, T>(map: &'a HashMap<String, T>, kind: &str, name: &str) -> Result<&'a T> {
    map.get(name)
        .ok_or_else(|| anyhow!("unknown {kind} fixture '{name}'"))
}

pub mod curve_sets {
    use super::*;

    pub fn keys() -> Vec<String> {
        MANIFEST.curve_sets.keys().cloned().collect()
    }

    pub fn json(name: &str) -> Result<String> {
        let entry = lookup(&MANIFEST.curve_sets, "curve set", name)?;
        read_to_string(entry.as_path())
    }

    pub fn load<T: DeserializeOwned>(name: &str) -> Result<T> {
        let entry = lookup(&MANIFEST.curve_sets, "curve set", name)?;
        super::load_json(entry.as_path())
    }

    /// Suggested playhead for scenarios that tween at a specific frame.
    pub fn playhead(name: &str) -> Result<Option<f64>> {
        let entry = lookup(&MANIFEST.curve_sets, "curve set", name)?;
        Ok(entry.playhead())
    }

    pub fn path(name: &str) -> Result<PathBuf> {
        let entry = lookup(&MANIFEST.curve_sets, "curve set", name)?;
        Ok(resolve_path(entry.as_path()))
    }
}

pub mod configs {
    use super::*;

    pub fn keys() -> Vec<String> {
        MANIFEST.configs.keys().cloned().collect()
    }

    pub fn json(name: &str) -> Result<String> {
        let rel = lookup(&MANIFEST.configs, "config", name)?;
        read_to_string(rel)
    }

    pub fn load<T: DeserializeOwned>(name: &str) -> Result<T> {
        let rel = lookup(&MANIFEST.configs, "config", name)?;
        super::load_json(rel)
    }
}
