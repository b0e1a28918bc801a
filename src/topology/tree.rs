use std::path::Path;

use anyhow::Context as _;

use crate::foundation::core::Point3;
use crate::foundation::error::{TreevisError, TreevisResult};

/// Static node coordinates for one tree, in LED sequence order.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Topology {
    coords: Vec<Point3>,
}

impl Topology {
    /// Build a topology from coordinates already in LED order.
    pub fn new(coords: Vec<Point3>) -> Self {
        Self { coords }
    }

    /// Parse `x,y,z` lines.
    ///
    /// Blank lines and `#` comments are skipped. A non-numeric first row is taken as a
    /// header; any other malformed row is rejected with its line number.
    pub fn from_csv_str(src: &str) -> TreevisResult<Self> {
        let mut coords = Vec::new();
        let mut seen_row = false;
        for (i, raw) in src.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let first_row = !seen_row;
            seen_row = true;
            match parse_row(line) {
                Some(p) => coords.push(p),
                None if first_row => continue,
                None => {
                    return Err(TreevisError::validation(format!(
                        "topology line {}: expected 'x,y,z', got '{line}'",
                        i + 1
                    )));
                }
            }
        }
        Ok(Self { coords })
    }

    /// Parse a JSON array of `[x, y, z]` triples.
    pub fn from_json_str(src: &str) -> TreevisResult<Self> {
        let raw: Vec<[f64; 3]> =
            serde_json::from_str(src).map_err(|e| TreevisError::serde(e.to_string()))?;
        Ok(Self {
            coords: raw.into_iter().map(Point3::from).collect(),
        })
    }

    /// Load from disk; `.json` files are parsed as JSON, everything else as CSV.
    #[tracing::instrument]
    pub fn load(path: &Path) -> TreevisResult<Self> {
        let src = std::fs::read_to_string(path)
            .with_context(|| format!("read topology '{}'", path.display()))?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let topo = if is_json {
            Self::from_json_str(&src)?
        } else {
            Self::from_csv_str(&src)?
        };
        tracing::debug!(nodes = topo.len(), height = topo.height(), "topology loaded");
        Ok(topo)
    }

    /// Coordinates in LED order.
    pub fn coords(&self) -> &[Point3] {
        &self.coords
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.coords.len()
    }

    /// Whether the tree has no nodes.
    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    /// Highest Z coordinate, or 0 for an empty tree.
    pub fn height(&self) -> f64 {
        self.coords.iter().map(|p| p.z).fold(0.0, f64::max)
    }
}

fn parse_row(line: &str) -> Option<Point3> {
    let mut parts = line.split(',').map(str::trim);
    let x = parts.next()?.parse().ok()?;
    let y = parts.next()?.parse().ok()?;
    let z = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some(Point3::new(x, y, z))
}

#[cfg(test)]
#[path = "../../tests/unit/topology/tree.rs"]
mod tests;
