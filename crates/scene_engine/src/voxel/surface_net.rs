//! Surface-net edge table for isosurface extraction
//!
//! Voxel chunks are meshed by looking at each cell's eight corners: an 8-bit
//! configuration records which corners lie inside the isosurface, and the
//! table below maps every configuration to the set of cube edges the surface
//! crosses. The table is generated once from the cube's topology rather than
//! hand-enumerated, and is immutable after first access.

use once_cell::sync::Lazy;

/// Edge length of a voxel chunk in cells
pub const CHUNK_SIZE: usize = 128;

/// Total number of cells in a chunk
pub const CHUNK_CELLS: usize = CHUNK_SIZE * CHUNK_SIZE * CHUNK_SIZE;

/// Linear index of a cell within one chunk layer
pub fn flat_idx_2d(x: u16, y: u16) -> usize {
    usize::from(y) * CHUNK_SIZE + usize::from(x)
}

/// Linear index of a cell within a chunk
pub fn flat_idx(x: u16, y: u16, z: u16) -> usize {
    usize::from(z) * (CHUNK_SIZE * CHUNK_SIZE) + flat_idx_2d(x, y)
}

/// Corner `i` of the unit cube sits at `(i & 1, i >> 1 & 1, i >> 2 & 1)`;
/// the twelve edges are exactly the corner pairs whose indices differ in one
/// coordinate bit, listed in ascending `(low, high)` order.
fn cube_edges() -> [(u8, u8); 12] {
    let mut edges = [(0u8, 0u8); 12];
    let mut count = 0;
    for corner in 0..8u8 {
        for bit in [1u8, 2, 4] {
            if corner & bit == 0 {
                edges[count] = (corner, corner | bit);
                count += 1;
            }
        }
    }
    debug_assert_eq!(count, 12);
    edges
}

/// Maps an 8-bit inside-corner configuration to a 12-bit mask of crossed
/// edges.
///
/// Bit `e` of an entry is set iff edge `e`'s two endpoint corners disagree
/// on being inside the surface.
pub static EDGE_TABLE: Lazy<[u32; 256]> = Lazy::new(|| {
    let edges = cube_edges();
    let mut table = [0u32; 256];
    for (config, entry) in table.iter_mut().enumerate() {
        let mut mask = 0u32;
        for (e, &(a, b)) in edges.iter().enumerate() {
            let inside_a = config >> a & 1;
            let inside_b = config >> b & 1;
            if inside_a != inside_b {
                mask |= 1 << e;
            }
        }
        *entry = mask;
    }
    table
});

/// Crossed-edge mask for an inside-corner configuration
pub fn crossed_edges(config: u8) -> u32 {
    EDGE_TABLE[usize::from(config)]
}
