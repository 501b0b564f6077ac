//! Wavefront OBJ loading.
//!
//! Models are expanded into a flat triangle list: every face corner becomes
//! its own [`ModelVertex`] built from that corner's position, normal and
//! texture coordinate indices. The result is drawn without an index buffer.

use std::{
    io::{BufRead, Read},
    path::Path,
};

use glam::{Vec2, Vec3};

/// A single vertex as laid out in the GPU vertex buffer.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[repr(C)]
pub struct ModelVertex {
    pub position: Vec3,
    pub normal: Vec3,
    pub tex_coord: Vec2,
}

/// A model loaded from disk, ready to be uploaded.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelData {
    pub name: String,
    pub vertices: Vec<ModelVertex>,
}

impl ModelData {
    /// Returns the number of triangles in the model.
    pub fn triangle_count(&self) -> usize {
        self.vertices.len() / 3
    }
}

fn load_options() -> tobj::LoadOptions {
    tobj::LoadOptions {
        triangulate: true,
        single_index: false,
        ignore_points: true,
        ignore_lines: true,
        ..Default::default()
    }
}

/// Loads an OBJ file from disk. Material libraries are not read.
pub fn load_obj(path: impl AsRef<Path>) -> Result<ModelData, String> {
    let path = path.as_ref();
    let source = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to load {}: {}", path.display(), e))?;
    load_obj_str(&source, &path.display().to_string())
}

/// Loads an OBJ model from any buffered reader. `name` is only used in error
/// messages and as the model name.
pub fn load_obj_buf<R: BufRead>(reader: &mut R, name: &str) -> Result<ModelData, String> {
    let mut source = String::new();
    reader
        .read_to_string(&mut source)
        .map_err(|e| format!("Failed to load {}: {}", name, e))?;
    load_obj_str(&source, name)
}

fn load_obj_str(source: &str, name: &str) -> Result<ModelData, String> {
    let (models, _materials) = tobj::load_obj_buf(&mut source.as_bytes(), &load_options(), |_| {
        Ok((Vec::new(), Default::default()))
    })
    .map_err(|e| format!("Failed to load {}: {}", name, e))?;
    expand(name, models, &scan_faces(source))
}

/// Which optional attributes the face a triangle came from listed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FaceAttributes {
    normal: bool,
    tex_coord: bool,
}

/// Reads the `f` statements of an OBJ source and returns one entry per
/// triangle they turn into, in file order.
fn scan_faces(source: &str) -> Vec<FaceAttributes> {
    let mut triangles = Vec::new();
    for line in source.lines() {
        let mut tokens = line.split_whitespace();
        if tokens.next() != Some("f") {
            continue;
        }
        let corners: Vec<&str> = tokens.collect();
        if corners.len() < 3 {
            continue;
        }
        // Every corner of a face uses the same v, v/vt, v//vn or v/vt/vn form.
        let mut parts = corners[0].split('/');
        let _position = parts.next();
        let tex_coord = parts.next().is_some_and(|t| !t.is_empty());
        let normal = parts.next().is_some_and(|n| !n.is_empty());
        let attributes = FaceAttributes { normal, tex_coord };
        triangles.extend(std::iter::repeat_n(attributes, corners.len() - 2));
    }
    triangles
}

fn expand(name: &str, models: Vec<tobj::Model>, faces: &[FaceAttributes]) -> Result<ModelData, String> {
    let triangles: usize = models.iter().map(|m| m.mesh.indices.len() / 3).sum();
    let faces = if faces.len() == triangles {
        Some(faces)
    } else {
        log::warn!(
            "{}: found {} triangles in the face list but {} after parsing, trusting per-mesh attributes",
            name,
            faces.len(),
            triangles
        );
        None
    };

    let mut vertices = Vec::new();
    let mut first_triangle = 0;
    for model in &models {
        let count = model.mesh.indices.len() / 3;
        let mesh_faces = faces.map(|f| &f[first_triangle..first_triangle + count]);
        expand_mesh(name, &model.mesh, mesh_faces, &mut vertices)?;
        first_triangle += count;
    }

    if vertices.is_empty() {
        return Err(format!("{} contains no faces", name));
    }

    log::debug!(
        "Expanded {} ({} objects) into {} vertices",
        name,
        models.len(),
        vertices.len()
    );

    Ok(ModelData {
        name: name.to_string(),
        vertices,
    })
}

fn expand_mesh(
    name: &str,
    mesh: &tobj::Mesh,
    faces: Option<&[FaceAttributes]>,
    out: &mut Vec<ModelVertex>,
) -> Result<(), String> {
    let corners = mesh.indices.len();
    if corners % 3 != 0 {
        return Err(format!("{}: face list is not triangulated", name));
    }
    let mesh_has_normals = !mesh.normals.is_empty() && mesh.normal_indices.len() == corners;
    let mesh_has_tex_coords = !mesh.texcoords.is_empty() && mesh.texcoord_indices.len() == corners;

    for (triangle_index, base) in (0..corners).step_by(3).enumerate() {
        // tobj fills attribute indices for every corner once any face has
        // them, so faces that listed none must be told apart here.
        let face = faces.map(|f| f[triangle_index]);
        let has_normals = mesh_has_normals && face.is_none_or(|f| f.normal);
        let has_tex_coords = mesh_has_tex_coords && face.is_none_or(|f| f.tex_coord);

        let mut triangle = [ModelVertex::default(); 3];
        for (corner, vertex) in triangle.iter_mut().enumerate() {
            let i = base + corner;
            vertex.position = fetch_vec3(&mesh.positions, mesh.indices[i])
                .ok_or_else(|| out_of_range(name, "position", mesh.indices[i]))?;
            if has_normals {
                vertex.normal = fetch_vec3(&mesh.normals, mesh.normal_indices[i])
                    .ok_or_else(|| out_of_range(name, "normal", mesh.normal_indices[i]))?;
            }
            if has_tex_coords {
                vertex.tex_coord = fetch_vec2(&mesh.texcoords, mesh.texcoord_indices[i])
                    .ok_or_else(|| out_of_range(name, "texture coordinate", mesh.texcoord_indices[i]))?;
            }
        }

        if !has_normals {
            let normal = flat_normal(
                triangle[0].position,
                triangle[1].position,
                triangle[2].position,
            );
            for vertex in &mut triangle {
                vertex.normal = normal;
            }
        }

        out.extend_from_slice(&triangle);
    }

    Ok(())
}

fn fetch_vec3(data: &[f32], index: u32) -> Option<Vec3> {
    let start = index as usize * 3;
    data.get(start..start + 3).map(Vec3::from_slice)
}

fn fetch_vec2(data: &[f32], index: u32) -> Option<Vec2> {
    let start = index as usize * 2;
    data.get(start..start + 2).map(Vec2::from_slice)
}

fn out_of_range(name: &str, attribute: &str, index: u32) -> String {
    format!("{}: {} index {} is out of range", name, attribute, index)
}

/// Returns the normal of a counter-clockwise triangle, or zero for a
/// degenerate one.
fn flat_normal(a: Vec3, b: Vec3, c: Vec3) -> Vec3 {
    (b - a).cross(c - a).normalize_or_zero()
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEXTURED_QUAD: &str = "\
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0
vt 0 0
vt 1 0
vt 1 1
vt 0 1
vn 0 0 1
f 1/1/1 2/2/1 3/3/1 4/4/1
";

    #[test]
    fn test_quad_is_triangulated_and_expanded() {
        let model = load_obj_buf(&mut TEXTURED_QUAD.as_bytes(), "quad").unwrap();
        assert_eq!(model.name, "quad");
        assert_eq!(model.vertices.len(), 6);
        assert_eq!(model.triangle_count(), 2);

        assert_eq!(model.vertices[0].position, Vec3::new(0.0, 0.0, 0.0));
        assert_eq!(model.vertices[1].position, Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(model.vertices[2].position, Vec3::new(1.0, 1.0, 0.0));
        assert_eq!(model.vertices[1].tex_coord, Vec2::new(1.0, 0.0));
        assert_eq!(model.vertices[2].tex_coord, Vec2::new(1.0, 1.0));
        for vertex in &model.vertices {
            assert_eq!(vertex.normal, Vec3::Z);
        }
    }

    #[test]
    fn test_corners_use_their_own_attribute_indices() {
        let obj = "\
v 0 0 0
v 2 0 0
v 0 2 0
vt 0.5 0.5
vt 0.25 0.75
vn 1 0 0
vn 0 1 0
f 1/2/2 2/1/1 3/2/2
";
        let model = load_obj_buf(&mut obj.as_bytes(), "mixed").unwrap();
        assert_eq!(model.vertices.len(), 3);
        assert_eq!(model.vertices[0].tex_coord, Vec2::new(0.25, 0.75));
        assert_eq!(model.vertices[0].normal, Vec3::Y);
        assert_eq!(model.vertices[1].position, Vec3::new(2.0, 0.0, 0.0));
        assert_eq!(model.vertices[1].tex_coord, Vec2::new(0.5, 0.5));
        assert_eq!(model.vertices[1].normal, Vec3::X);
    }

    #[test]
    fn test_missing_normals_get_flat_normal() {
        let obj = "\
v 0 0 0
v 1 0 0
v 0 1 0
f 1 2 3
";
        let model = load_obj_buf(&mut obj.as_bytes(), "bare").unwrap();
        assert_eq!(model.vertices.len(), 3);
        for vertex in &model.vertices {
            assert_eq!(vertex.normal, Vec3::Z);
            assert_eq!(vertex.tex_coord, Vec2::ZERO);
        }
    }

    #[test]
    fn test_face_without_normals_next_to_face_with_normals() {
        let obj = "\
v 0 0 0
v 1 0 0
v 0 1 0
vn 1 0 0
f 1//1 2//1 3//1
f 1 2 3
";
        let model = load_obj_buf(&mut obj.as_bytes(), "mixed-normals").unwrap();
        assert_eq!(model.triangle_count(), 2);
        for vertex in &model.vertices[0..3] {
            assert_eq!(vertex.normal, Vec3::X);
        }
        for vertex in &model.vertices[3..6] {
            assert_eq!(vertex.normal, Vec3::Z);
        }
    }

    #[test]
    fn test_face_without_tex_coords_next_to_textured_face() {
        let obj = "\
v 0 0 0
v 1 0 0
v 0 1 0
vt 0.5 0.25
f 1/1 2/1 3/1
f 1 2 3
";
        let model = load_obj_buf(&mut obj.as_bytes(), "mixed-uvs").unwrap();
        assert_eq!(model.triangle_count(), 2);
        for vertex in &model.vertices[0..3] {
            assert_eq!(vertex.tex_coord, Vec2::new(0.5, 0.25));
        }
        for vertex in &model.vertices[3..6] {
            assert_eq!(vertex.tex_coord, Vec2::ZERO);
            assert_eq!(vertex.normal, Vec3::Z);
        }
    }

    #[test]
    fn test_scan_faces_counts_fan_triangles() {
        let faces = scan_faces("f 1 2 3 4 5\nf 1/1/1 2/2/1 3/3/1\nl 1 2\nf 1//2 2//2 3//2\n");
        assert_eq!(faces.len(), 5);
        assert!(faces[..3].iter().all(|f| !f.normal && !f.tex_coord));
        assert_eq!(faces[3], FaceAttributes { normal: true, tex_coord: true });
        assert_eq!(faces[4], FaceAttributes { normal: true, tex_coord: false });
    }

    #[test]
    fn test_all_objects_are_concatenated() {
        let obj = "\
v 0 0 0
v 1 0 0
v 0 1 0
v 0 0 1
o first
f 1 2 3
o second
f 1 3 4
";
        let model = load_obj_buf(&mut obj.as_bytes(), "two").unwrap();
        assert_eq!(model.triangle_count(), 2);
        assert_eq!(model.vertices[5].position, Vec3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn test_empty_file_is_an_error() {
        let err = load_obj_buf(&mut "# nothing here\n".as_bytes(), "empty").unwrap_err();
        assert!(err.contains("empty"));
    }

    #[test]
    fn test_out_of_range_index_is_an_error() {
        let obj = "\
v 0 0 0
v 1 0 0
v 0 1 0
f 1 2 9
";
        assert!(load_obj_buf(&mut obj.as_bytes(), "broken").is_err());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let err = load_obj("./definitely/not/here.obj").unwrap_err();
        assert!(err.contains("not/here.obj"));
    }

    #[test]
    fn test_degenerate_triangle_has_zero_normal() {
        assert_eq!(flat_normal(Vec3::ZERO, Vec3::X, Vec3::X * 2.0), Vec3::ZERO);
    }
}
