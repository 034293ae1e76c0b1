//! Wavefront OBJ loader for 3D models

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use thiserror::Error;

use crate::foundation::math::Vec3;
use crate::render::Mesh;

/// Errors surfaced while loading mesh assets.
///
/// These are environment failures (missing or corrupt files) and are
/// propagated to the caller without retry; the scene composer decides
/// whether to substitute a placeholder or abort.
#[derive(Error, Debug)]
pub enum AssetError {
    /// Underlying file IO failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// A numeric field could not be parsed
    #[error("Parse error: {0}")]
    Parse(String),
    /// The file structure is not usable as a triangle mesh
    #[error("Invalid format: {0}")]
    InvalidFormat(String),
}

/// Wavefront OBJ mesh loader
pub struct ObjLoader;

impl ObjLoader {
    /// Load an OBJ file and return a mesh.
    ///
    /// Supports `v`, `vn`, and `f` records; faces with more than three
    /// vertices are fan-triangulated. When the file carries no usable
    /// normals, area-weighted vertex normals are computed from the faces.
    pub fn load_obj<P: AsRef<Path>>(path: P) -> Result<Mesh, AssetError> {
        let file = File::open(path.as_ref())?;
        let mesh = Self::parse_obj(BufReader::new(file))?;
        log::debug!(
            "loaded {:?}: {} vertices, {} faces",
            path.as_ref(),
            mesh.vertex_count(),
            mesh.face_count()
        );
        Ok(mesh)
    }

    /// Parse OBJ data from any buffered reader
    pub fn parse_obj<R: BufRead>(reader: R) -> Result<Mesh, AssetError> {
        let mut positions: Vec<Vec3> = Vec::new();
        let mut normals: Vec<Vec3> = Vec::new();
        let mut indices: Vec<[u32; 3]> = Vec::new();

        for line in reader.lines() {
            let line = line?;
            let line = line.trim();

            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let parts: Vec<&str> = line.split_whitespace().collect();
            match parts[0] {
                "v" => {
                    positions.push(parse_vec3(&parts[1..], "vertex")?);
                }
                "vn" => {
                    normals.push(parse_vec3(&parts[1..], "normal")?);
                }
                "f" => {
                    if parts.len() < 4 {
                        return Err(AssetError::InvalidFormat(format!(
                            "face with fewer than 3 vertices: {line}"
                        )));
                    }
                    let mut face_indices = Vec::with_capacity(parts.len() - 1);
                    for part in &parts[1..] {
                        face_indices.push(parse_face_index(part, positions.len())?);
                    }
                    // Fan-triangulate anything beyond a triangle.
                    for i in 1..face_indices.len() - 1 {
                        indices.push([face_indices[0], face_indices[i], face_indices[i + 1]]);
                    }
                }
                // Texture coordinates, groups, materials: not consumed here.
                _ => {}
            }
        }

        if positions.is_empty() {
            return Err(AssetError::InvalidFormat("no vertices in file".to_string()));
        }

        // Normal indices in OBJ files need not match position indices; only
        // a fully parallel normal list is taken as-is.
        if normals.len() == positions.len() {
            Ok(Mesh::new(positions, normals, indices))
        } else {
            Ok(Mesh::from_positions(positions, indices))
        }
    }
}

fn parse_vec3(fields: &[&str], what: &str) -> Result<Vec3, AssetError> {
    if fields.len() < 3 {
        return Err(AssetError::Parse(format!("{what} needs 3 components")));
    }
    let mut out = [0.0f32; 3];
    for (slot, field) in out.iter_mut().zip(fields) {
        *slot = field
            .parse()
            .map_err(|_| AssetError::Parse(format!("invalid {what} component: {field}")))?;
    }
    Ok(Vec3::new(out[0], out[1], out[2]))
}

/// Parse one `f` vertex reference (`pos`, `pos/tex`, `pos/tex/norm`, or
/// `pos//norm`) into a zero-based position index.
fn parse_face_index(part: &str, vertex_count: usize) -> Result<u32, AssetError> {
    let index_field = part.split('/').next().unwrap_or(part);
    let index: usize = index_field
        .parse()
        .map_err(|_| AssetError::Parse(format!("invalid face index: {part}")))?;
    if index == 0 || index > vertex_count {
        return Err(AssetError::InvalidFormat(format!(
            "face index {index} out of bounds (1..={vertex_count})"
        )));
    }
    Ok((index - 1) as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::io::Cursor;

    const TRIANGLE: &str = "\
# a single triangle
v 0 0 0
v 1 0 0
v 0 1 0
vn 0 0 1
vn 0 0 1
vn 0 0 1
f 1 2 3
";

    #[test]
    fn parses_triangle_with_normals() {
        let mesh = ObjLoader::parse_obj(Cursor::new(TRIANGLE)).expect("valid file");
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.face_count(), 1);
        assert_relative_eq!(mesh.normals[0], Vec3::new(0.0, 0.0, 1.0));
        assert_relative_eq!(mesh.bounds.max, Vec3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn computes_normals_when_missing() {
        let data = "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n";
        let mesh = ObjLoader::parse_obj(Cursor::new(data)).expect("valid file");
        assert_relative_eq!(mesh.normals[0], Vec3::new(0.0, 0.0, 1.0), epsilon = 1e-5);
    }

    #[test]
    fn fan_triangulates_quads() {
        let data = "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1 2 3 4\n";
        let mesh = ObjLoader::parse_obj(Cursor::new(data)).expect("valid file");
        assert_eq!(mesh.face_count(), 2);
        assert_eq!(mesh.indices[0], [0, 1, 2]);
        assert_eq!(mesh.indices[1], [0, 2, 3]);
    }

    #[test]
    fn slash_formats_use_position_index() {
        let data = "v 0 0 0\nv 1 0 0\nv 0 1 0\nvn 0 0 1\nf 1//1 2//1 3//1\n";
        let mesh = ObjLoader::parse_obj(Cursor::new(data)).expect("valid file");
        assert_eq!(mesh.indices[0], [0, 1, 2]);
    }

    #[test]
    fn out_of_bounds_index_is_invalid() {
        let data = "v 0 0 0\nf 1 2 3\n";
        assert!(matches!(
            ObjLoader::parse_obj(Cursor::new(data)),
            Err(AssetError::InvalidFormat(_))
        ));
    }

    #[test]
    fn garbage_component_is_a_parse_error() {
        let data = "v 0 zero 0\n";
        assert!(matches!(
            ObjLoader::parse_obj(Cursor::new(data)),
            Err(AssetError::Parse(_))
        ));
    }

    #[test]
    fn empty_file_is_invalid() {
        assert!(matches!(
            ObjLoader::parse_obj(Cursor::new("# nothing\n")),
            Err(AssetError::InvalidFormat(_))
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        assert!(matches!(
            ObjLoader::load_obj("definitely/not/here.obj"),
            Err(AssetError::Io(_))
        ));
    }
}
