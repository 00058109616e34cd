pub mod document;
pub mod load;

pub use document::{MeshDocument, NamedEntries};
pub use load::{load_mesh, parse_mesh};
