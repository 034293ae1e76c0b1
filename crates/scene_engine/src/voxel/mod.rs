//! Voxel chunk indexing and isosurface lookup tables

mod surface_net;

pub use surface_net::{crossed_edges, flat_idx, flat_idx_2d, EDGE_TABLE, CHUNK_CELLS, CHUNK_SIZE};
