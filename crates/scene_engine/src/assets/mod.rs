//! Asset loading and the shared mesh cache

mod library;
pub mod obj_loader;

pub use library::MeshLibrary;
pub use obj_loader::{AssetError, ObjLoader};
