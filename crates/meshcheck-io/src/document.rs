use std::fmt;
use std::marker::PhantomData;

use meshcheck_base::Result;
use meshcheck_geometry::{Mesh, MeshBuilder};
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};

/// A JSON object read as an ordered list of `(key, value)` pairs.
///
/// Keys are kept in file order and repeated keys are kept as separate
/// entries, so the mesh builder gets to reject them by name.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NamedEntries<T>(pub Vec<(String, T)>);

impl<T> NamedEntries<T> {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.0.iter().map(|(name, value)| (name.as_str(), value))
    }
}

impl<'de, T> Deserialize<'de> for NamedEntries<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(EntriesVisitor(PhantomData))
    }
}

struct EntriesVisitor<T>(PhantomData<T>);

impl<'de, T> Visitor<'de> for EntriesVisitor<T>
where
    T: Deserialize<'de>,
{
    type Value = NamedEntries<T>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an object keyed by name")
    }

    fn visit_map<A>(self, mut map: A) -> std::result::Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
        while let Some((name, value)) = map.next_entry::<String, T>()? {
            entries.push((name, value));
        }
        Ok(NamedEntries(entries))
    }
}

/// On-disk mesh description: named vertex positions and named faces listing
/// vertex names in winding order. Unknown top-level keys are ignored.
#[derive(Clone, Debug, Deserialize)]
pub struct MeshDocument {
    pub verts: NamedEntries<[f64; 3]>,
    pub faces: NamedEntries<Vec<String>>,
}

impl MeshDocument {
    /// Adds every vertex, then every face, in file order.
    pub fn into_mesh(self) -> Result<Mesh> {
        let mut builder = MeshBuilder::new();
        for (name, [x, y, z]) in self.verts.0 {
            builder.add_vertex(name, x, y, z)?;
        }
        for (name, vertices) in self.faces.0 {
            builder.add_face(name, vertices.as_slice())?;
        }
        Ok(builder.build())
    }
}
