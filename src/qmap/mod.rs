mod builder;
mod lexer;
mod number;
mod options;
mod parser;
mod plane;
mod repr;
mod result;
mod write;

pub use lexer::{is_comment, lex_line, Token};
pub use number::{parse_invariant, NumberFormat};
pub use options::{ParserOptions, PropertyValueMode};
pub use parser::{load, parse, MapParser, ParseState};
pub use plane::Plane;
pub use repr::{
    Alignment, BaseAlignment, Brush, Edict, Entity, Face, MapDocument, Point,
    SpawnType, TextureAxis, TextureRegistry, Vec2, Vec3, WORLDSPAWN_CLASS,
};
pub use result::{
    Error, LineError, Result, ValidationResult, WriteAttempt, WriteError,
};
pub use write::{CheckWritable, Writes};


#[cfg(test)]
mod number_test;

#[cfg(test)]
mod plane_test;



#[cfg(test)]
mod write_test;
