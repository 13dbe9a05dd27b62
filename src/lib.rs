//! Reads Quake `.map` source into a [`MapDocument`]: entities with their
//! key/value properties, brushes, and faces carrying a plane equation plus a
//! standard or Valve 220 texture alignment.
//!
//! ```
//! let source = b"{\n\"classname\" \"worldspawn\"\n}\n";
//! let map = qmap_scene::parse(&source[..]).unwrap();
//!
//! assert_eq!(map.entities[0].classname(), Some("worldspawn"));
//! ```

pub mod qmap;

pub use qmap::{
    load, parse, Alignment, BaseAlignment, Brush, CheckWritable, Edict,
    Entity, Error, Face, LineError, MapDocument, MapParser, NumberFormat,
    ParseState, ParserOptions, Plane, Point, PropertyValueMode, Result,
    SpawnType, TextureAxis, TextureRegistry, Vec2, Vec3, WriteError, Writes,
};
