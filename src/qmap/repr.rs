#[cfg(feature = "hashbrown")]
use hashbrown::HashMap;

#[cfg(not(feature = "hashbrown"))]
use std::collections::HashMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use glam::{DVec2, DVec3};
use std::{string::String, vec::Vec};

use crate::qmap::plane::Plane;

pub type Point = DVec3;
pub type Vec3 = DVec3;
pub type Vec2 = DVec2;

pub const WORLDSPAWN_CLASS: &str = "worldspawn";
const CLASSNAME_KEY: &str = "classname";
const WAD_KEY: &str = "wad";
const WAD_SEPARATOR: char = ';';

/// A parsed `.map` file: its entities in source order plus every texture
/// name the faces refer to.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MapDocument {
    pub entities: Vec<Entity>,
    pub textures: TextureRegistry,
}

impl MapDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// First entity whose classname is `worldspawn`. On well-formed maps
    /// this is the first entity.
    pub fn worldspawn(&self) -> Option<&Entity> {
        self.entities
            .iter()
            .find(|ent| ent.classname() == Some(WORLDSPAWN_CLASS))
    }

    /// WAD files listed in the worldspawn's `wad` property.
    pub fn wad_paths(&self) -> Vec<&str> {
        self.worldspawn()
            .and_then(|world| world.get(WAD_KEY))
            .map(|wads| {
                wads.split(WAD_SEPARATOR)
                    .map(str::trim)
                    .filter(|path| !path.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn brush_count(&self) -> usize {
        self.entities.iter().map(|ent| ent.brushes.len()).sum()
    }

    pub fn face_count(&self) -> usize {
        self.entities
            .iter()
            .flat_map(|ent| ent.brushes.iter())
            .map(Vec::len)
            .sum()
    }

    /// Texture name of a face in this document.
    pub fn texture_name(&self, face: &Face) -> Option<&str> {
        self.textures.name(face.texture_idx)
    }
}

/// Append-only texture name table. Each distinct name is stored once and
/// keeps the index it was first registered with.
#[derive(Debug, Clone, Default)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(from = "Vec<String>", into = "Vec<String>")
)]
pub struct TextureRegistry {
    names: Vec<String>,
    indices: HashMap<String, usize>,
}

impl TextureRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of `name`, adding it to the end of the table if unseen.
    pub fn register(&mut self, name: &str) -> usize {
        if let Some(&idx) = self.indices.get(name) {
            return idx;
        }

        let idx = self.names.len();
        self.names.push(String::from(name));
        self.indices.insert(String::from(name), idx);
        idx
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.indices.get(name).copied()
    }

    pub fn name(&self, idx: usize) -> Option<&str> {
        self.names.get(idx).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

impl PartialEq for TextureRegistry {
    fn eq(&self, other: &Self) -> bool {
        self.names == other.names
    }
}

impl From<Vec<String>> for TextureRegistry {
    fn from(names: Vec<String>) -> Self {
        let mut registry = Self::new();
        for name in &names {
            registry.register(name);
        }
        registry
    }
}

impl From<TextureRegistry> for Vec<String> {
    fn from(registry: TextureRegistry) -> Self {
        registry.names
    }
}

/// Marks an entity as committed to its document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SpawnType {
    #[default]
    Entity,
}

#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Entity {
    pub properties: Edict,
    /// Empty for point entities.
    pub brushes: Vec<Brush>,
    pub spawn_type: SpawnType,
}

impl Entity {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.properties.get(key)
    }

    pub fn classname(&self) -> Option<&str> {
        self.get(CLASSNAME_KEY)
    }

    pub fn is_point(&self) -> bool {
        self.brushes.is_empty()
    }
}

/// Entity key/value pairs in the order their keys first appeared.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Edict {
    entries: Vec<(String, String)>,
}

impl Edict {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `key` to `value`, returning the replaced value. A replaced key
    /// keeps its original position.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Option<String> {
        let key = key.into();
        let value = value.into();

        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => Some(std::mem::replace(existing, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Edict {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut edict = Edict::new();
        for (key, value) in iter {
            edict.insert(key, value);
        }
        edict
    }
}

/// Convex solid, the intersection of its faces' half-spaces.
pub type Brush = Vec<Face>;

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Face {
    /// The three points as written in the source, in winding order.
    pub plane_points: [Point; 3],
    pub plane: Plane,
    pub texture_idx: usize,
    pub alignment: Alignment,
}

impl Face {
    pub fn normal(&self) -> Vec3 {
        self.plane.normal
    }

    pub fn distance(&self) -> f64 {
        self.plane.distance
    }

    pub fn is_valve_uv(&self) -> bool {
        self.alignment.is_valve()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Alignment {
    Standard { offset: Vec2, base: BaseAlignment },
    Valve220 { axes: [TextureAxis; 2], base: BaseAlignment },
}

impl Alignment {
    pub fn base(&self) -> &BaseAlignment {
        match self {
            Alignment::Standard { base, .. } => base,
            Alignment::Valve220 { base, .. } => base,
        }
    }

    pub fn is_valve(&self) -> bool {
        matches!(self, Alignment::Valve220 { .. })
    }

    /// Texture offsets along U and V, whichever form they were written in.
    pub fn offset(&self) -> Vec2 {
        match self {
            Alignment::Standard { offset, .. } => *offset,
            Alignment::Valve220 { axes: [u, v], .. } => {
                Vec2::new(u.offset, v.offset)
            }
        }
    }
}

/// Rotation and scale shared by both alignment forms.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BaseAlignment {
    pub rotation: f64,
    pub scale: Vec2,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TextureAxis {
    pub axis: Vec3,
    pub offset: f64,
}
