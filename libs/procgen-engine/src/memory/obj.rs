//! Minimal Wavefront OBJ codec.
//!
//! Only `v` and `f` records are read; texture and normal references in face
//! records are ignored.

use std::fmt::Write;

use procgen_shape::InitialShapeGeometry;

/// Decodes OBJ text into geometry. Returns a human-readable reason on failure.
pub fn decode(bytes: &[u8]) -> Result<InitialShapeGeometry, String> {
    let text = std::str::from_utf8(bytes).map_err(|e| format!("not UTF-8: {e}"))?;

    let mut vertices: Vec<f64> = Vec::new();
    let mut indices: Vec<u32> = Vec::new();
    let mut face_counts: Vec<u32> = Vec::new();

    for (line_no, line) in text.lines().enumerate() {
        let mut fields = line.split_whitespace();
        match fields.next() {
            Some("v") => {
                let coords: Vec<f64> = fields
                    .take(3)
                    .map(str::parse)
                    .collect::<Result<_, _>>()
                    .map_err(|e| format!("line {}: bad vertex: {e}", line_no + 1))?;
                if coords.len() != 3 {
                    return Err(format!("line {}: vertex needs 3 coordinates", line_no + 1));
                }
                vertices.extend(coords);
            }
            Some("f") => {
                let vertex_count = (vertices.len() / 3) as i64;
                let mut count = 0u32;
                for field in fields {
                    let index = parse_face_index(field, vertex_count)
                        .ok_or_else(|| format!("line {}: bad face index '{field}'", line_no + 1))?;
                    indices.push(index);
                    count += 1;
                }
                if count < 3 {
                    return Err(format!("line {}: face needs 3 vertices", line_no + 1));
                }
                face_counts.push(count);
            }
            _ => {}
        }
    }

    if face_counts.is_empty() {
        return Err("no faces".to_string());
    }
    InitialShapeGeometry::from_buffers(vertices, indices, face_counts).map_err(|e| e.to_string())
}

/// 1-based index, negative values count back from the last vertex.
fn parse_face_index(field: &str, vertex_count: i64) -> Option<u32> {
    let raw: i64 = field.split('/').next()?.parse().ok()?;
    let index = match raw {
        0 => return None,
        i if i > 0 => i - 1,
        i => vertex_count + i,
    };
    if (0..vertex_count).contains(&index) {
        u32::try_from(index).ok()
    } else {
        None
    }
}

/// Encodes geometry blocks into one OBJ document.
pub fn encode(name: &str, blocks: &[InitialShapeGeometry]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "o {name}");

    let mut offset = 1;
    for block in blocks {
        for i in 0..block.vertex_count() as u32 {
            let v = block.vertex(i);
            let _ = writeln!(out, "v {} {} {}", v.x, v.y, v.z);
        }
        for face in block.faces() {
            out.push('f');
            for index in face {
                let _ = write!(out, " {}", index + offset);
            }
            out.push('\n');
        }
        offset += block.vertex_count() as u32;
    }
    out
}
