use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::LazyLock;

use log::{debug, info, warn};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::errors::LatticeError;
use crate::lattice::lattice3d::Lattice;
use crate::lattice::lattice_construction::lattice_from_scalars;
use crate::refinement::reflection::Reflection;

static COLUMN_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^h.+k.+l.+").expect("column header pattern is valid"));

/// Reference cell found in a file header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrystalInfo {
    pub lattice: Lattice,
    /// Free-text space-group label, only used for reporting.
    pub space_group: Option<String>,
}

/// Parsed content of a reflection file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReflectionFile {
    pub crystal_info: Option<CrystalInfo>,
    pub reflections: Vec<Reflection>,
}

/// Split trimmed, non-blank lines into header and body.
///
/// The first line matching `^h.+k.+l.+` is the column header; it is dropped, everything
/// before it is header and everything after it is body. `#` comment lines in the body
/// are dropped. Without a column header all lines end up in the header.
pub fn split_sections<I, S>(lines: I) -> (Vec<String>, Vec<String>)
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut header = Vec::new();
    let mut body = Vec::new();
    let mut in_header = true;

    for line in lines {
        let line = line.as_ref().trim();
        if line.is_empty() {
            continue;
        }
        if in_header {
            if COLUMN_HEADER.is_match(line) {
                in_header = false;
            } else {
                header.push(line.to_string());
            }
        } else if !line.starts_with('#') {
            body.push(line.to_string());
        }
    }

    (header, body)
}

/// Read the reference cell from header lines.
///
/// Recognized keys (optionally behind a `#`): `a`, `b`, `c`, `al`, `be`, `ga` followed by
/// a value, and `Space group <label>`. Returns `None` unless all six constants are present,
/// non-zero and describe a valid cell.
pub fn read_crystal_info<S: AsRef<str>>(header: &[S]) -> Option<CrystalInfo> {
    let mut constants: [Option<f64>; 6] = [None; 6];
    let mut space_group = None;

    for line in header {
        let line = line.as_ref().trim();
        let line = line.strip_prefix('#').unwrap_or(line).trim();

        if let Some(label) = line.strip_prefix("Space group") {
            let label = label.trim();
            if !label.is_empty() {
                space_group = Some(label.to_string());
            }
            continue;
        }

        let mut tokens = line.split_whitespace();
        let slot = match tokens.next() {
            Some("a") => 0,
            Some("b") => 1,
            Some("c") => 2,
            Some("al") => 3,
            Some("be") => 4,
            Some("ga") => 5,
            _ => {
                debug!("Ignoring header line: {}", line);
                continue;
            }
        };
        match (tokens.next().map(str::parse::<f64>), tokens.next()) {
            (Some(Ok(value)), None) => constants[slot] = Some(value),
            _ => debug!("Ignoring malformed header line: {}", line),
        }
    }

    if let Some(label) = &space_group {
        info!("Found space group {}", label);
    }

    let [Some(a), Some(b), Some(c), Some(alpha), Some(beta), Some(gamma)] = constants else {
        debug!("Header does not define all six lattice constants");
        return None;
    };
    if [a, b, c, alpha, beta, gamma].contains(&0.0) {
        debug!("Header lattice constants contain zeros");
        return None;
    }

    match lattice_from_scalars(a, b, c, alpha, beta, gamma) {
        Ok(lattice) => Some(CrystalInfo {
            lattice,
            space_group,
        }),
        Err(e) => {
            warn!("Ignoring header lattice constants: {}", e);
            None
        }
    }
}

/// Parse one `h k l multiplicity d_spacing` row.
pub fn parse_reflection_line(line: &str) -> Result<Reflection, LatticeError> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    let &[h, k, l, multiplicity, d_spacing] = fields.as_slice() else {
        return Err(LatticeError::InvalidParameters(format!(
            "expected 5 columns (h k l multiplicity d_spacing), found {}",
            fields.len()
        )));
    };

    let index = |label: &str, value: &str| {
        value.parse::<i32>().map_err(|_| {
            LatticeError::InvalidParameters(format!("{} = '{}' is not an integer", label, value))
        })
    };
    let h = index("h", h)?;
    let k = index("k", k)?;
    let l = index("l", l)?;
    let d_spacing = d_spacing.parse::<f64>().map_err(|_| {
        LatticeError::InvalidParameters(format!("d_spacing = '{}' is not a number", d_spacing))
    })?;

    let reflection = Reflection::new(h, k, l, d_spacing)?;
    Ok(match multiplicity.parse::<u32>() {
        Ok(m) => reflection.with_multiplicity(m),
        Err(_) => reflection,
    })
}

/// Parse body rows into reflections, skipping (and logging) rows that do not parse.
///
/// Fails with [`LatticeError::NoUsableData`] when no row survives.
pub fn read_reflections<S: AsRef<str>>(body: &[S]) -> Result<Vec<Reflection>, LatticeError> {
    let mut reflections = Vec::with_capacity(body.len());
    for (number, line) in body.iter().enumerate() {
        let line = line.as_ref();
        match parse_reflection_line(line) {
            Ok(reflection) => reflections.push(reflection),
            Err(e) => warn!("Skipping reflection row {} '{}': {}", number + 1, line, e),
        }
    }

    if reflections.is_empty() {
        return Err(LatticeError::NoUsableData(format!(
            "none of {} reflection rows could be parsed",
            body.len()
        )));
    }
    debug!("Read {} of {} reflection rows", reflections.len(), body.len());
    Ok(reflections)
}

/// Parse the full text of a reflection file.
pub fn parse_reflection_text(text: &str) -> Result<ReflectionFile, LatticeError> {
    from_sections(split_sections(text.lines()))
}

/// Read a reflection file from any buffered reader.
pub fn load_reflection_file<R: BufRead>(reader: R) -> Result<ReflectionFile, LatticeError> {
    let lines = reader.lines().collect::<Result<Vec<String>, _>>()?;
    from_sections(split_sections(lines))
}

/// Read a reflection file from disk.
pub fn load_reflection_path<P: AsRef<Path>>(path: P) -> Result<ReflectionFile, LatticeError> {
    let path = path.as_ref();
    debug!("Opening {}", path.display());
    let file = File::open(path)?;
    load_reflection_file(BufReader::new(file))
}

fn from_sections((header, body): (Vec<String>, Vec<String>)) -> Result<ReflectionFile, LatticeError> {
    let crystal_info = read_crystal_info(&header);
    let reflections = read_reflections(&body)?;
    Ok(ReflectionFile {
        crystal_info,
        reflections,
    })
}
