use beams_wasm::geometry::{build_plane_stack, index_range_fits, strip_depth, PlaneStack};

#[test]
fn vertex_and_triangle_counts() {
    for count in 1..=5u32 {
        for segments in [1u32, 2, 7, 100] {
            let stack = PlaneStack::build(count, 2.0, 15.0, 0.5, segments);
            let c = count as usize;
            let h = segments as usize;
            assert_eq!(stack.vertex_count(), c * (h + 1) * 2);
            assert_eq!(stack.triangle_count(), c * h * 2);
            assert_eq!(stack.normals().len(), stack.vertex_count());
            assert_eq!(stack.uvs().len(), stack.vertex_count());
        }
    }
}

#[test]
fn vertex_pairs_share_height_and_depth() {
    let width = 3.5;
    let stack = build_plane_stack(3, width, 10.0, 1.25, 4);
    for pair in stack.positions().chunks_exact(2) {
        let (left, right) = (pair[0], pair[1]);
        assert_eq!(left[1], right[1]);
        assert_eq!(left[2], right[2]);
        assert!((right[0] - left[0] - width).abs() < 1e-6);
    }
}

#[test]
fn depths_are_symmetric_about_zero() {
    let depths: Vec<f32> = (0..4).map(|i| strip_depth(i, 4, 2.0)).collect();
    assert_eq!(depths, vec![-3.0, -1.0, 1.0, 3.0]);

    let stack = PlaneStack::build(4, 1.0, 1.0, 2.0, 1);
    let per_strip = stack.vertices_per_strip();
    let built: Vec<f32> = stack
        .positions()
        .chunks(per_strip)
        .map(|strip| strip[0][2])
        .collect();
    assert_eq!(built, depths);
}

#[test]
fn indices_stay_inside_their_strip() {
    let stack = PlaneStack::build(5, 2.0, 15.0, 0.0, 10);
    let per_strip = stack.vertices_per_strip() as u32;
    let per_strip_indices = 10 * 6;
    for (strip, chunk) in stack.indices().chunks(per_strip_indices).enumerate() {
        let lo = strip as u32 * per_strip;
        let hi = lo + per_strip;
        assert!(chunk.iter().all(|&i| i >= lo && i < hi), "strip {strip} leaks");
    }
}

#[test]
fn zero_spacing_keeps_strips_separately_indexed() {
    let stack = PlaneStack::build(2, 2.0, 4.0, 0.0, 2);
    assert!(stack.positions().iter().all(|p| p[2] == 0.0));
    let max = *stack.indices().iter().max().unwrap();
    assert_eq!(max as usize, stack.vertex_count() - 1);
}

#[test]
fn heights_and_uvs_span_the_strip() {
    let stack = PlaneStack::build(1, 2.0, 15.0, 0.0, 100);
    let first = stack.positions()[0];
    let last = stack.positions()[stack.vertex_count() - 1];
    assert!((first[1] + 7.5).abs() < 1e-5);
    assert!((last[1] - 7.5).abs() < 1e-5);
    assert_eq!(stack.uvs()[0], [0.0, 0.0]);
    assert_eq!(stack.uvs()[stack.vertex_count() - 1], [1.0, 1.0]);
    assert!(stack.normals().iter().all(|n| *n == [0.0, 0.0, 1.0]));
}

#[test]
fn triangles_face_the_camera() {
    let stack = PlaneStack::build(1, 2.0, 2.0, 0.0, 1);
    let p = stack.positions();
    for tri in stack.indices().chunks(3) {
        let [a, b, c] = [p[tri[0] as usize], p[tri[1] as usize], p[tri[2] as usize]];
        let e1 = [b[0] - a[0], b[1] - a[1]];
        let e2 = [c[0] - a[0], c[1] - a[1]];
        let cross_z = e1[0] * e2[1] - e1[1] * e2[0];
        assert!(cross_z > 0.0, "triangle {tri:?} is clockwise");
    }
}

#[test]
fn interleaved_matches_streams() {
    let stack = PlaneStack::build(2, 1.0, 1.0, 1.0, 3);
    let vertices = stack.interleaved();
    assert_eq!(vertices.len(), stack.vertex_count());
    for (i, v) in vertices.iter().enumerate() {
        assert_eq!(v.position, stack.positions()[i]);
        assert_eq!(v.normal, stack.normals()[i]);
        assert_eq!(v.uv, stack.uvs()[i]);
    }
    assert_eq!(std::mem::size_of_val(&vertices[0]), 8 * 4);
}

#[test]
fn index_range_limit() {
    assert!(index_range_fits(12, 100));
    // 2^31 vertices per strip: one strip fits, two do not.
    assert!(index_range_fits(1, (1 << 30) - 1));
    assert!(!index_range_fits(2, 1 << 30));
    assert!(!index_range_fits(4_000_000_000, 100));
    assert!(!index_range_fits(u32::MAX, u32::MAX));
}

#[test]
#[should_panic(expected = "overflow u32 indices")]
fn build_refuses_unaddressable_stacks() {
    PlaneStack::build(4_000_000_000, 2.0, 15.0, 0.0, 100);
}
