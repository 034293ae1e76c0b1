//! Shared mesh cache
//!
//! Many model instances may reference one mesh loaded from disk once. The
//! library keys loaded meshes by path and hands out `Arc` references, so
//! geometry is shared and instances never own it.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use super::obj_loader::{AssetError, ObjLoader};
use crate::render::Mesh;

/// Path-keyed cache of loaded meshes
pub struct MeshLibrary {
    root: PathBuf,
    cache: HashMap<PathBuf, Arc<Mesh>>,
}

impl MeshLibrary {
    /// Create a library resolving names relative to `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            cache: HashMap::new(),
        }
    }

    /// Load a mesh by file name, reusing a previously loaded copy when the
    /// same name was requested before.
    pub fn load(&mut self, name: &str) -> Result<Arc<Mesh>, AssetError> {
        let path = self.root.join(name);
        if let Some(mesh) = self.cache.get(&path) {
            return Ok(Arc::clone(mesh));
        }
        let mesh = Arc::new(ObjLoader::load_obj(&path)?);
        self.cache.insert(path, Arc::clone(&mesh));
        Ok(mesh)
    }

    /// Register a procedurally built mesh under a name.
    ///
    /// Later [`MeshLibrary::load`] calls for the same name return the
    /// registered mesh instead of touching the filesystem.
    pub fn insert(&mut self, name: &str, mesh: Mesh) -> Arc<Mesh> {
        let mesh = Arc::new(mesh);
        self.cache.insert(self.root.join(name), Arc::clone(&mesh));
        mesh
    }

    /// Number of cached meshes
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    /// Whether the cache is empty
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_are_shared_per_path() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("tri.obj");
        let mut file = std::fs::File::create(&path).expect("create file");
        writeln!(file, "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3").expect("write obj");

        let mut library = MeshLibrary::new(dir.path());
        let a = library.load("tri.obj").expect("first load");
        let b = library.load("tri.obj").expect("cached load");
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(library.len(), 1);
    }

    #[test]
    fn registered_meshes_bypass_the_filesystem() {
        let mut library = MeshLibrary::new("does/not/exist");
        library.insert("cube.obj", Mesh::cube(1.0));
        let mesh = library.load("cube.obj").expect("registered mesh");
        assert_eq!(mesh.face_count(), 12);
    }

    #[test]
    fn missing_files_propagate_errors() {
        let mut library = MeshLibrary::new("does/not/exist");
        assert!(library.load("nope.obj").is_err());
        assert!(library.is_empty());
    }
}
