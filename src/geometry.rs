//! Merged strip geometry for the beam field.
//!
//! All strips live in one vertex/index buffer so the whole field is a single
//! draw call.

use bytemuck::{Pod, Zeroable};

/// Per-vertex attributes in the order the shader prefix binds them.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct StripVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

/// Whether `count` strips of `height_segments` quads can be addressed with
/// `u32` indices.
pub fn index_range_fits(count: u32, height_segments: u32) -> bool {
    (u64::from(height_segments) + 1)
        .checked_mul(2)
        .and_then(|per_strip| per_strip.checked_mul(u64::from(count)))
        .is_some_and(|total| total <= u64::from(u32::MAX))
}

/// `count` parallel vertical strips, each cut into `height_segments` quads.
///
/// Immutable once built: the counts are fixed and the buffers are only ever
/// read.
#[derive(Clone, Debug)]
pub struct PlaneStack {
    count: u32,
    width: f32,
    height: f32,
    spacing: f32,
    height_segments: u32,
    positions: Vec<[f32; 3]>,
    normals: Vec<[f32; 3]>,
    uvs: Vec<[f32; 2]>,
    indices: Vec<u32>,
}

impl PlaneStack {
    pub fn build(count: u32, width: f32, height: f32, spacing: f32, height_segments: u32) -> Self {
        debug_assert!(count >= 1, "strip count must be at least 1");
        debug_assert!(height_segments >= 1, "height segments must be at least 1");
        debug_assert!(width > 0.0 && height > 0.0, "strip dimensions must be positive");
        assert!(
            index_range_fits(count, height_segments),
            "{count} strips of {height_segments} segments overflow u32 indices"
        );

        let per_strip = (height_segments as usize + 1) * 2;
        let vertex_count = count as usize * per_strip;
        let mut positions = Vec::with_capacity(vertex_count);
        let mut normals = Vec::with_capacity(vertex_count);
        let mut uvs = Vec::with_capacity(vertex_count);
        let mut indices = Vec::with_capacity(count as usize * height_segments as usize * 6);

        let half_width = width / 2.0;
        let mut vertex_offset = 0u32;

        for i in 0..count {
            let z = strip_depth(i, count, spacing);

            for j in 0..=height_segments {
                let t = j as f32 / height_segments as f32;
                let y = (t - 0.5) * height;

                positions.push([-half_width, y, z]);
                positions.push([half_width, y, z]);
                normals.push([0.0, 0.0, 1.0]);
                normals.push([0.0, 0.0, 1.0]);
                uvs.push([0.0, t]);
                uvs.push([1.0, t]);
            }

            for j in 0..height_segments {
                let base = vertex_offset + j * 2;
                indices.extend_from_slice(&[base, base + 1, base + 3]);
                indices.extend_from_slice(&[base, base + 3, base + 2]);
            }

            vertex_offset += (height_segments + 1) * 2;
        }

        Self {
            count,
            width,
            height,
            spacing,
            height_segments,
            positions,
            normals,
            uvs,
            indices,
        }
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn spacing(&self) -> f32 {
        self.spacing
    }

    pub fn height_segments(&self) -> u32 {
        self.height_segments
    }

    pub fn positions(&self) -> &[[f32; 3]] {
        &self.positions
    }

    pub fn normals(&self) -> &[[f32; 3]] {
        &self.normals
    }

    pub fn uvs(&self) -> &[[f32; 2]] {
        &self.uvs
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Vertices emitted per strip; strip `i` owns `[i * n, (i + 1) * n)`.
    pub fn vertices_per_strip(&self) -> usize {
        (self.height_segments as usize + 1) * 2
    }

    /// Interleaved copy of the attribute streams, one entry per vertex.
    pub fn interleaved(&self) -> Vec<StripVertex> {
        self.positions
            .iter()
            .zip(&self.normals)
            .zip(&self.uvs)
            .map(|((&position, &normal), &uv)| StripVertex {
                position,
                normal,
                uv,
            })
            .collect()
    }
}

/// Depth of strip `i`, centred on zero.
pub fn strip_depth(i: u32, count: u32, spacing: f32) -> f32 {
    (i as f32 - (count as f32 - 1.0) / 2.0) * spacing
}

pub fn build_plane_stack(
    count: u32,
    width: f32,
    height: f32,
    spacing: f32,
    height_segments: u32,
) -> PlaneStack {
    PlaneStack::build(count, width, height, spacing, height_segments)
}
