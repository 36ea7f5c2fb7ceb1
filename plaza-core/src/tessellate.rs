/// Parametric surface tessellation into triangle strips
use crate::error::GeometryError;
use crate::geometry::{MeshBuffer, Topology, Vertex, VERTEX_SIZE};

/// Sample `surface` on a `columns` x `rows` grid over `[0, 1]^2`.
///
/// Each of the `rows - 1` bands is walked left to right; every column step
/// emits the four corners `(u, v0) (u, v1) (u + du, v0) (u + du, v1)`, two
/// triangles sharing an edge. Bands are appended back to back rather than
/// stitched, so drawing the whole buffer as one strip leaves degenerate
/// triangles at every band seam.
///
/// `u` is accumulated step by step and may land slightly above 1 on the
/// last column; surfaces must tolerate that.
pub fn create_mesh<F>(columns: usize, rows: usize, surface: F) -> Result<MeshBuffer, GeometryError>
where
    F: Fn(f32, f32) -> Vertex,
{
    if columns == 1 && rows == 1 {
        return Err(GeometryError::DegenerateResolution { columns, rows });
    }

    let steps = columns.saturating_sub(1);
    let bands = rows.saturating_sub(1);
    let dx = 1.0 / steps as f32;
    let dy = 1.0 / bands as f32;

    let mut data = Vec::with_capacity(4 * steps * bands * VERTEX_SIZE);
    let mut add_point = |u: f32, v: f32| data.extend_from_slice(&surface(u, v).to_array());

    for r in 1..rows {
        let v_low = (r - 1) as f32 * dy;
        let v_high = r as f32 * dy;
        let mut c = 0.0f32;

        for _ in 0..steps {
            if c > 1.0 {
                break;
            }
            add_point(c, v_low);
            add_point(c, v_high);
            c += dx;
            add_point(c, v_low);
            add_point(c, v_high);
        }
    }

    let mesh = MeshBuffer::from_raw(Topology::TriangleStrip, data)?;
    log::debug!(
        "Tessellated {}x{} grid into {} vertices",
        columns,
        rows,
        mesh.vertex_count()
    );
    Ok(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plane(u: f32, v: f32) -> Vertex {
        Vertex::new([u, v, 0.0], [0.0, 0.0, 1.0], [u, v])
    }

    #[test]
    fn test_minimum_resolution_is_one_quad() {
        let mesh = create_mesh(2, 2, plane).unwrap();
        assert_eq!(mesh.as_slice().len(), 32);

        let corners: Vec<(f32, f32)> = mesh.vertices().map(|v| (v.uv.x, v.uv.y)).collect();
        assert_eq!(corners, vec![(0.0, 0.0), (0.0, 1.0), (1.0, 0.0), (1.0, 1.0)]);
    }

    #[test]
    fn test_single_point_grid_is_rejected() {
        let result = create_mesh(1, 1, plane);
        assert_eq!(
            result,
            Err(GeometryError::DegenerateResolution { columns: 1, rows: 1 })
        );
    }

    #[test]
    fn test_single_column_or_row_is_empty() {
        assert!(create_mesh(1, 5, plane).unwrap().is_empty());
        assert!(create_mesh(5, 1, plane).unwrap().is_empty());
    }

    #[test]
    fn test_vertex_count_for_scene_resolution() {
        let mesh = create_mesh(30, 30, plane).unwrap();
        assert_eq!(mesh.vertex_count(), 4 * 29 * 29);
        assert_eq!(mesh.topology(), Topology::TriangleStrip);
    }

    #[test]
    fn test_bands_are_not_stitched() {
        let mesh = create_mesh(3, 3, plane).unwrap();
        assert_eq!(mesh.vertex_count(), 16);

        // Band one ends on the top-right corner, band two restarts at u = 0.
        let end_of_first = mesh.vertex(7);
        let start_of_second = mesh.vertex(8);
        assert!((end_of_first.uv.x - 1.0).abs() < 1e-6);
        assert!((end_of_first.uv.y - 0.5).abs() < 1e-6);
        assert_eq!(start_of_second.uv.x, 0.0);
        assert!((start_of_second.uv.y - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_columns_repeat_across_steps() {
        let mesh = create_mesh(4, 2, plane).unwrap();
        let us: Vec<f32> = mesh.vertices().map(|v| v.uv.x).collect();
        // The trailing edge of one step is the leading edge of the next.
        assert_eq!(us[2], us[4]);
        assert_eq!(us[3], us[5]);
        assert!((us[us.len() - 1] - 1.0).abs() < 1e-6);
    }
}
