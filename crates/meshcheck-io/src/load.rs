use std::fs;
use std::path::Path;

use meshcheck_base::{Error, Result};
use meshcheck_geometry::Mesh;
use tracing::info;

use crate::document::MeshDocument;

pub fn parse_mesh(text: &str) -> Result<Mesh> {
    let document: MeshDocument =
        serde_json::from_str(text).map_err(|err| Error::malformed(err.to_string()))?;
    document.into_mesh()
}

pub fn load_mesh(path: impl AsRef<Path>) -> Result<Mesh> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    let mesh = parse_mesh(&text)?;
    info!(
        path = %path.display(),
        vertices = mesh.vertices().len(),
        faces = mesh.faces().len(),
        "mesh loaded"
    );
    Ok(mesh)
}
