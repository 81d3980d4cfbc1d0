use crate::error::{NebulaError, Result};

/// Largest per-axis subdivision whose vertex count still fits 16-bit indices.
pub const MAX_SEGMENTS: u32 = 255;

/// A flat rectangle in the XY plane, centred on the origin and subdivided
/// into a regular grid of quads.
#[derive(Debug, Clone)]
pub struct PlaneGeometry {
    /// xyz triples.
    pub positions: Vec<f32>,
    /// uv pairs, v = 1 along the top edge.
    pub uvs: Vec<f32>,
    pub indices: Vec<u16>,
}

impl PlaneGeometry {
    pub fn new(width: f32, height: f32, segments_x: u32, segments_y: u32) -> Result<Self> {
        // Counted in u64 so huge segment counts are reported, not wrapped.
        let vertices = (u64::from(segments_x.max(1)) + 1)
            .saturating_mul(u64::from(segments_y.max(1)) + 1);
        if vertices > u64::from(u16::MAX) + 1 {
            return Err(NebulaError::GeometryTooLarge { vertices });
        }
        let vertices = vertices as usize;

        let gx = segments_x.max(1) as usize;
        let gy = segments_y.max(1) as usize;
        let gx1 = gx + 1;
        let gy1 = gy + 1;

        let half_w = width / 2.0;
        let half_h = height / 2.0;
        let seg_w = width / gx as f32;
        let seg_h = height / gy as f32;

        let mut positions = Vec::with_capacity(vertices * 3);
        let mut uvs = Vec::with_capacity(vertices * 2);
        for iy in 0..gy1 {
            let y = half_h - iy as f32 * seg_h;
            for ix in 0..gx1 {
                let x = ix as f32 * seg_w - half_w;
                positions.extend_from_slice(&[x, y, 0.0]);
                uvs.extend_from_slice(&[ix as f32 / gx as f32, 1.0 - iy as f32 / gy as f32]);
            }
        }

        let mut indices = Vec::with_capacity(gx * gy * 6);
        for iy in 0..gy {
            for ix in 0..gx {
                let a = (ix + gx1 * iy) as u16;
                let b = (ix + gx1 * (iy + 1)) as u16;
                let c = (ix + 1 + gx1 * (iy + 1)) as u16;
                let d = (ix + 1 + gx1 * iy) as u16;
                indices.extend_from_slice(&[a, b, d, b, c, d]);
            }
        }

        Ok(Self {
            positions,
            uvs,
            indices,
        })
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_counts() {
        let g = PlaneGeometry::new(2.0, 2.0, 128, 128).unwrap();
        assert_eq!(g.vertex_count(), 129 * 129);
        assert_eq!(g.uvs.len(), 129 * 129 * 2);
        assert_eq!(g.indices.len(), 128 * 128 * 6);
        assert!(g.indices.iter().all(|&i| (i as usize) < g.vertex_count()));
    }

    #[test]
    fn corners_and_uvs() {
        let g = PlaneGeometry::new(2.0, 2.0, 2, 2).unwrap();
        // first vertex is top-left
        assert_eq!(&g.positions[0..3], &[-1.0, 1.0, 0.0]);
        assert_eq!(&g.uvs[0..2], &[0.0, 1.0]);
        // last vertex is bottom-right
        let n = g.vertex_count();
        assert_eq!(&g.positions[(n - 1) * 3..], &[1.0, -1.0, 0.0]);
        assert_eq!(&g.uvs[(n - 1) * 2..], &[1.0, 0.0]);
        // centre
        assert_eq!(&g.positions[4 * 3..5 * 3], &[0.0, 0.0, 0.0]);
    }

    #[test]
    fn triangles_wind_counter_clockwise() {
        let g = PlaneGeometry::new(2.0, 2.0, 3, 5).unwrap();
        for tri in g.indices.chunks(3) {
            let p = |i: u16| {
                let i = i as usize * 3;
                (g.positions[i], g.positions[i + 1])
            };
            let (a, b, c) = (p(tri[0]), p(tri[1]), p(tri[2]));
            let cross = (b.0 - a.0) * (c.1 - a.1) - (b.1 - a.1) * (c.0 - a.0);
            assert!(cross > 0.0);
        }
    }

    #[test]
    fn oversized_grid_is_rejected() {
        let err = PlaneGeometry::new(2.0, 2.0, 256, 256).unwrap_err();
        assert!(matches!(err, NebulaError::GeometryTooLarge { vertices: 66049 }));
    }

    #[test]
    fn largest_allowed_grid_fits_u16_indices() {
        let g = PlaneGeometry::new(2.0, 2.0, MAX_SEGMENTS, MAX_SEGMENTS).unwrap();
        assert_eq!(g.vertex_count(), 65536);
        assert_eq!(g.indices.iter().copied().max(), Some(u16::MAX));
    }

    #[test]
    fn extreme_segment_counts_are_rejected_without_overflow() {
        let err = PlaneGeometry::new(2.0, 2.0, u32::MAX, u32::MAX).unwrap_err();
        assert!(matches!(err, NebulaError::GeometryTooLarge { vertices: u64::MAX }));

        // 65536 * 65536 wraps to 0 in 32-bit arithmetic
        let err = PlaneGeometry::new(2.0, 2.0, 65535, 65535).unwrap_err();
        assert!(matches!(err, NebulaError::GeometryTooLarge { vertices: 4_294_967_296 }));

        let err = PlaneGeometry::new(2.0, 2.0, u32::MAX, 1).unwrap_err();
        assert!(matches!(err, NebulaError::GeometryTooLarge { .. }));
    }
}
