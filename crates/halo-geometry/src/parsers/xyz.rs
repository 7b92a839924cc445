//! Parser for `.xyz` atomic coordinate files.
//!
//! The XYZ format is plain text:
//! ```text
//! <num_atoms>
//! <comment line>
//! <element> <x> <y> <z>
//! ...
//! ```
//!
//! Coordinates are in angstroms and are converted to nanometres on parse.
//! Every atom in the file is kept; the file is never reduced to a single
//! representative point, so an N-atom cluster yields N candidate cell
//! positions for discretisation.

use super::{Atom, LoadError};

const NM_PER_ANGSTROM: f64 = 0.1;

/// Parse the first frame of an XYZ file from a string.
pub fn parse_xyz(content: &str) -> Result<Vec<Atom>, LoadError> {
    let mut lines = content.lines().enumerate();

    let (_, header) = lines.next().ok_or(LoadError::Format {
        line: 1,
        message: "empty file".into(),
    })?;
    let declared: usize = header.trim().parse().map_err(|_| LoadError::Format {
        line: 1,
        message: format!("expected atom count, got '{}'", header.trim()),
    })?;

    // Comment line; content is ignored but the line must exist.
    lines.next().ok_or(LoadError::Format {
        line: 2,
        message: "missing comment line".into(),
    })?;

    let mut atoms = Vec::with_capacity(declared);
    for (idx, raw) in lines {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        // A second frame starts with a bare atom count; stop at the first one.
        if atoms.len() == declared && line.parse::<usize>().is_ok() {
            break;
        }

        let mut fields = line.split_whitespace();
        let element = fields.next().unwrap_or_default();
        let coords: Vec<&str> = fields.take(3).collect();
        if element.is_empty() || coords.len() < 3 {
            return Err(LoadError::Format {
                line: idx + 1,
                message: format!("expected 'element x y z', got '{}'", line),
            });
        }

        let mut position = [0.0_f64; 3];
        for (axis, text) in coords.iter().enumerate() {
            position[axis] = text.parse::<f64>().map_err(|_| LoadError::Format {
                line: idx + 1,
                message: format!("invalid coordinate '{}'", text),
            })? * NM_PER_ANGSTROM;
        }

        atoms.push(Atom {
            position,
            element: element.to_string(),
        });
    }

    if atoms.len() != declared {
        return Err(LoadError::Format {
            line: 1,
            message: format!("header declares {} atoms but file has {}", declared, atoms.len()),
        });
    }

    Ok(atoms)
}
