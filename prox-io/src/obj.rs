//! Wavefront OBJ parsing.
//!
//! Parses the subset of OBJ that describes triangle geometry: `v` and `vn`
//! directives and `f` faces in the `v`, `v//n`, and `v/t/n` forms. Texture
//! coordinates, materials, groups, and all other directives are skipped.
//! Faces with more than three corners are fan triangulated.
//!
//! The output is a triangle soup: each face corner is resolved to a full
//! vertex. Corners without a normal get a zero normal; every loaded vertex
//! gets the default gray color, matching what viewers expect for untextured
//! scans.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use nalgebra::{Point3, Vector3};
use prox_types::{Rgba, TriMesh, Triangle, Vertex};
use tracing::info;

use crate::error::{ObjError, ObjResult};

/// Load a triangle mesh from an OBJ file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or its content is not valid
/// OBJ.
///
/// # Example
///
/// ```no_run
/// use prox_io::load_obj;
///
/// let mesh = load_obj("monkey.obj").unwrap();
/// println!("loaded {} triangles", mesh.tri_count());
/// ```
pub fn load_obj<P: AsRef<Path>>(path: P) -> ObjResult<TriMesh> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ObjError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            ObjError::Io(e)
        }
    })?;

    let mesh = parse_obj(BufReader::new(file))?;
    info!(
        path = %path.display(),
        triangles = mesh.tri_count(),
        "Loaded OBJ mesh"
    );
    Ok(mesh)
}

/// Parse OBJ content from a reader.
///
/// # Errors
///
/// Returns a [`ObjError::Parse`] carrying the 1-based line number when a
/// directive is malformed or a face references an unknown vertex.
pub fn parse_obj<R: BufRead>(reader: R) -> ObjResult<TriMesh> {
    let mut positions: Vec<Point3<f64>> = Vec::new();
    let mut normals: Vec<Vector3<f64>> = Vec::new();
    let mut tris: Vec<Triangle> = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line_no = index + 1;
        let line = line?;
        let mut tokens = line.split_whitespace();

        match tokens.next() {
            Some("v") => {
                let [x, y, z] = parse_floats(&mut tokens, line_no, "v")?;
                positions.push(Point3::new(x, y, z));
            }
            Some("vn") => {
                let [x, y, z] = parse_floats(&mut tokens, line_no, "vn")?;
                normals.push(Vector3::new(x, y, z));
            }
            Some("f") => {
                let corners = parse_face(tokens, line_no, &positions, &normals)?;
                // Fan triangulation around the first corner
                for window in corners.windows(2).skip(1) {
                    tris.push(Triangle::new(corners[0], window[0], window[1]));
                }
            }
            // Comments, texcoords, groups, materials, and anything else
            _ => {}
        }
    }

    Ok(TriMesh::new(tris))
}

/// Parse exactly three floats from the remaining tokens of a directive.
///
/// Extra tokens (the optional `w` component, vertex colors) are ignored.
fn parse_floats<'a>(
    tokens: &mut impl Iterator<Item = &'a str>,
    line_no: usize,
    directive: &str,
) -> ObjResult<[f64; 3]> {
    let mut out = [0.0; 3];
    for value in &mut out {
        let token = tokens
            .next()
            .ok_or_else(|| ObjError::parse(line_no, format!("'{directive}' needs 3 components")))?;
        *value = token
            .parse()
            .map_err(|_| ObjError::parse(line_no, format!("invalid number '{token}'")))?;
    }
    Ok(out)
}

/// Parse the corners of an `f` directive into resolved vertices.
fn parse_face<'a>(
    tokens: impl Iterator<Item = &'a str>,
    line_no: usize,
    positions: &[Point3<f64>],
    normals: &[Vector3<f64>],
) -> ObjResult<Vec<Vertex>> {
    let mut corners = Vec::new();

    for token in tokens {
        corners.push(parse_corner(token, line_no, positions, normals)?);
    }

    if corners.len() < 3 {
        return Err(ObjError::parse(line_no, "face needs at least 3 corners"));
    }
    Ok(corners)
}

/// Parse one face corner: `i`, `i/t`, `i//n`, or `i/t/n`.
fn parse_corner(
    token: &str,
    line_no: usize,
    positions: &[Point3<f64>],
    normals: &[Vector3<f64>],
) -> ObjResult<Vertex> {
    let mut parts = token.split('/');

    let position = match parts.next() {
        Some(raw) if !raw.is_empty() => {
            let at = resolve_index(raw, positions.len(), line_no)?;
            positions[at]
        }
        _ => return Err(ObjError::parse(line_no, format!("bad face corner '{token}'"))),
    };

    // Second slot is the texture coordinate; unused
    let _ = parts.next();

    let normal = match parts.next() {
        Some(raw) if !raw.is_empty() => {
            let at = resolve_index(raw, normals.len(), line_no)?;
            normals[at]
        }
        _ => Vector3::zeros(),
    };

    Ok(Vertex::new(position, normal, Rgba::GRAY))
}

/// Resolve an OBJ index (1-based, negative counts from the end) against the
/// current element count.
fn resolve_index(raw: &str, len: usize, line_no: usize) -> ObjResult<usize> {
    let index: i64 = raw
        .parse()
        .map_err(|_| ObjError::parse(line_no, format!("invalid index '{raw}'")))?;

    #[allow(clippy::cast_possible_wrap)] // element counts stay far below i64::MAX
    let resolved = if index > 0 {
        index - 1
    } else if index < 0 {
        len as i64 + index
    } else {
        return Err(ObjError::parse(line_no, "index 0 is not valid in OBJ"));
    };

    #[allow(clippy::cast_possible_wrap)]
    if resolved < 0 || resolved >= len as i64 {
        return Err(ObjError::parse(
            line_no,
            format!("index {index} out of range (have {len})"),
        ));
    }

    #[allow(clippy::cast_sign_loss)] // checked non-negative above
    Ok(resolved as usize)
}
