use std::io;

use crate::qmap;
use qmap::repr::{Alignment, Brush, Edict, Entity, Face, MapDocument, TextureRegistry};
use qmap::result::{ValidationResult, WriteAttempt, WriteError};

pub trait CheckWritable {
    fn check_writable(&self) -> ValidationResult;
}

/// Writes `.map` source. Numbers are always written with a `.` decimal point,
/// so output only reads back unchanged when standard texture offsets are
/// parsed with [`NumberFormat::INVARIANT`], e.g. with
/// `ParserOptions::strict_invariant_parsing` set.
///
/// [`NumberFormat::INVARIANT`]: crate::qmap::NumberFormat::INVARIANT
pub trait Writes<W: io::Write> {
    fn write_to(&self, writer: &mut W) -> WriteAttempt;
}

impl<W: io::Write> Writes<W> for MapDocument {
    /// Writes the document as `.map` source after checking that it can be
    /// read back unchanged.
    fn write_to(&self, writer: &mut W) -> WriteAttempt {
        self.check_writable().map_err(WriteError::Validation)?;

        for ent in &self.entities {
            write_entity(ent, &self.textures, writer)?;
        }

        Ok(())
    }
}

impl CheckWritable for MapDocument {
    fn check_writable(&self) -> ValidationResult {
        self.textures.check_writable()?;

        for ent in &self.entities {
            ent.properties.check_writable()?;

            for face in ent.brushes.iter().flatten() {
                if self.textures.name(face.texture_idx).is_none() {
                    return Err(format!(
                        "Texture index {} out of range",
                        face.texture_idx
                    ));
                }

                face.check_writable()?;
            }
        }

        Ok(())
    }
}

impl CheckWritable for TextureRegistry {
    fn check_writable(&self) -> ValidationResult {
        for name in self.iter() {
            if name.is_empty() {
                return Err(String::from("Empty texture name"));
            }

            check_chars(name, &[' ', '\t', '\r', '\n'])?;
        }

        Ok(())
    }
}

impl CheckWritable for Edict {
    fn check_writable(&self) -> ValidationResult {
        for (key, value) in self.iter() {
            check_chars(key, &['"', '\r', '\n'])?;
            check_chars(value, &['"', '\r', '\n'])?;
        }

        Ok(())
    }
}

impl CheckWritable for Face {
    fn check_writable(&self) -> ValidationResult {
        for point in &self.plane_points {
            check_finite(point.to_array())?;
        }

        let base = self.alignment.base();
        check_finite([base.rotation, base.scale.x, base.scale.y])?;

        match &self.alignment {
            Alignment::Standard { offset, .. } => check_finite(offset.to_array()),
            Alignment::Valve220 { axes, .. } => {
                for axis in axes {
                    check_finite(axis.axis.to_array())?;
                    check_finite([axis.offset])?;
                }
                Ok(())
            }
        }
    }
}

fn check_chars(s: &str, bad_chars: &[char]) -> ValidationResult {
    match s.chars().find(|ch| bad_chars.contains(ch)) {
        Some(ch) => Err(format!("`{}` has illegal character ({:?})", s, ch)),
        None => Ok(()),
    }
}

fn check_finite<const N: usize>(nums: [f64; N]) -> ValidationResult {
    for num in nums {
        if !num.is_finite() {
            return Err(format!("Non-finite number ({})", num));
        }
    }

    Ok(())
}

fn write_entity<W: io::Write>(
    ent: &Entity,
    textures: &TextureRegistry,
    writer: &mut W,
) -> io::Result<()> {
    writer.write_all(b"{\r\n")?;

    for (key, value) in ent.properties.iter() {
        write!(writer, "\"{}\" \"{}\"\r\n", key, value)?;
    }

    for brush in &ent.brushes {
        write_brush(brush, textures, writer)?;
    }

    writer.write_all(b"}\r\n")?;
    Ok(())
}

fn write_brush<W: io::Write>(
    brush: &Brush,
    textures: &TextureRegistry,
    writer: &mut W,
) -> io::Result<()> {
    writer.write_all(b"{\r\n")?;

    for face in brush {
        write_face(face, textures, writer)?;
        writer.write_all(b"\r\n")?;
    }

    writer.write_all(b"}\r\n")?;
    Ok(())
}

fn write_face<W: io::Write>(
    face: &Face,
    textures: &TextureRegistry,
    writer: &mut W,
) -> io::Result<()> {
    for pt in &face.plane_points {
        write!(writer, "( {} {} {} ) ", pt.x, pt.y, pt.z)?;
    }

    writer.write_all(textures.name(face.texture_idx).unwrap_or_default().as_bytes())?;
    writer.write_all(b" ")?;

    match &face.alignment {
        Alignment::Standard { offset, base } => {
            write!(
                writer,
                "{} {} {} {} {}",
                offset.x, offset.y, base.rotation, base.scale.x, base.scale.y
            )?;
        }
        Alignment::Valve220 { axes: [u, v], base } => {
            write!(
                writer,
                "[ {} {} {} {} ] [ {} {} {} {} ] {} {} {}",
                u.axis.x,
                u.axis.y,
                u.axis.z,
                u.offset,
                v.axis.x,
                v.axis.y,
                v.axis.z,
                v.offset,
                base.rotation,
                base.scale.x,
                base.scale.y
            )?;
        }
    }

    Ok(())
}
