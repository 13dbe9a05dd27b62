use std::{
    fs::File,
    io::{BufRead, BufReader, Read},
    mem,
    num::NonZeroU64,
    path::Path,
    string::String,
    vec::Vec,
};

use log::{debug, trace, warn};

use crate::qmap;
use qmap::builder::{BrushBuilder, EntityBuilder, FaceBuilder};
use qmap::lexer::{lex_line, Token};
use qmap::number::{parse_invariant, NumberFormat};
use qmap::options::{ParserOptions, PropertyValueMode};
use qmap::repr::MapDocument;

const BYTE_ORDER_MARK: char = '\u{feff}';
const LINE_CAPACITY: usize = 128;

/// Position of the parser within the `.map` grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseState {
    File,
    Entity,
    PropertyValue,
    Brush,
    Plane0,
    Plane1,
    Plane2,
    Texture,
    U,
    V,
    ValveU,
    ValveV,
    Rot,
    UScale,
    VScale,
}

/// Single-pass `.map` parser filling a caller-owned [`MapDocument`].
///
/// The parser keeps its place between calls to [`parse_line`], so a document
/// can be fed in pieces. It is meant for one document; call [`reset`] before
/// reusing it.
///
/// [`parse_line`]: MapParser::parse_line
/// [`reset`]: MapParser::reset
pub struct MapParser<'m> {
    map: &'m mut MapDocument,
    options: ParserOptions,
    offset_format: NumberFormat,
    state: ParseState,
    component_idx: usize,
    line_number: NonZeroU64,
    property_key: String,
    property_value: String,
    entity: EntityBuilder,
    brush: BrushBuilder,
    face: FaceBuilder,
}

impl<'m> MapParser<'m> {
    pub fn new(map: &'m mut MapDocument) -> Self {
        Self::with_options(map, ParserOptions::default())
    }

    pub fn with_options(map: &'m mut MapDocument, options: ParserOptions) -> Self {
        let offset_format = options.resolve_offset_format();

        Self {
            map,
            options,
            offset_format,
            state: ParseState::File,
            component_idx: 0,
            line_number: NonZeroU64::MIN,
            property_key: String::new(),
            property_value: String::new(),
            entity: EntityBuilder::default(),
            brush: BrushBuilder::default(),
            face: FaceBuilder::default(),
        }
    }

    pub fn state(&self) -> ParseState {
        self.state
    }

    /// Drops all work in progress so the next line starts a new file. The
    /// document keeps whatever was already committed to it.
    pub fn reset(&mut self) {
        self.state = ParseState::File;
        self.component_idx = 0;
        self.line_number = NonZeroU64::MIN;
        self.property_key.clear();
        self.property_value.clear();
        self.entity = EntityBuilder::default();
        self.brush = BrushBuilder::default();
        self.face = FaceBuilder::default();
    }

    /// Opens and parses the file at `path`. The file is closed whether or not
    /// parsing succeeds.
    pub fn load(&mut self, path: impl AsRef<Path>) -> qmap::Result<()> {
        let path = path.as_ref();
        debug!("Loading map {}", path.display());

        let file = File::open(path).map_err(qmap::Error::from_io)?;
        self.parse_reader(BufReader::new(file))
    }

    /// Parses every line of `reader`.
    ///
    /// Lines end at `\n`, `\r\n` or a lone `\r`. Bytes that are not valid
    /// UTF-8 are replaced rather than rejected.
    pub fn parse_reader<R: BufRead>(&mut self, mut reader: R) -> qmap::Result<()> {
        let mut buffer = Vec::with_capacity(LINE_CAPACITY);
        let mut first = true;

        loop {
            buffer.clear();

            if reader
                .read_until(b'\n', &mut buffer)
                .map_err(qmap::Error::from_io)?
                == 0
            {
                break;
            }

            let decoded = String::from_utf8_lossy(&buffer);
            let mut text: &str = &decoded;
            text = text.strip_suffix('\n').unwrap_or(text);
            text = text.strip_suffix('\r').unwrap_or(text);

            if first {
                text = text.strip_prefix(BYTE_ORDER_MARK).unwrap_or(text);
                first = false;
            }

            for line in text.split('\r') {
                self.parse_line(line)?;
            }
        }

        debug!(
            "Parsed {} entities, {} brushes, {} faces, {} textures",
            self.map.entities.len(),
            self.map.brush_count(),
            self.map.face_count(),
            self.map.textures.len(),
        );

        Ok(())
    }

    /// Feeds one line of source text, without its line terminator.
    pub fn parse_line(&mut self, line: &str) -> qmap::Result<()> {
        for token in lex_line(line, self.line_number) {
            self.parse_token(token)?;
        }

        self.line_number = self.line_number.saturating_add(1);
        Ok(())
    }

    fn parse_token(&mut self, token: Token) -> qmap::Result<()> {
        match self.state {
            ParseState::File => {
                if token.match_byte(b'{') {
                    self.state = ParseState::Entity;
                } else {
                    self.ignore(&token);
                }
            }
            ParseState::Entity => {
                if token.opens_quote() {
                    self.begin_property(&token);
                } else if token.match_byte(b'{') {
                    self.state = ParseState::Brush;
                } else if token.match_byte(b'}') {
                    self.commit_entity();
                    self.state = ParseState::File;
                } else {
                    self.ignore(&token);
                }
            }
            ParseState::PropertyValue => self.accumulate_value(&token),
            ParseState::Brush => {
                if token.match_byte(b'(') {
                    self.component_idx = 0;
                    self.state = ParseState::Plane0;
                } else if token.match_byte(b'}') {
                    self.commit_brush();
                    self.state = ParseState::Entity;
                } else {
                    self.ignore(&token);
                }
            }
            ParseState::Plane0 => {
                self.plane_point(&token, 0, ParseState::Plane1, false)?
            }
            ParseState::Plane1 => {
                self.plane_point(&token, 1, ParseState::Plane2, true)?
            }
            ParseState::Plane2 => {
                self.plane_point(&token, 2, ParseState::Texture, true)?
            }
            ParseState::Texture => {
                self.face.texture_idx = self.map.textures.register(token.text);
                self.state = ParseState::U;
            }
            ParseState::U => {
                if token.match_byte(b'[') {
                    self.face.valve = true;
                    self.component_idx = 0;
                    self.state = ParseState::ValveU;
                } else {
                    self.face.valve = false;
                    self.face.offset.x = self.expect_offset(&token)?;
                    self.state = ParseState::V;
                }
            }
            ParseState::V => {
                self.face.offset.y = self.expect_offset(&token)?;
                self.state = ParseState::Rot;
            }
            ParseState::ValveU => {
                if token.match_byte(b']') {
                    self.component_idx = 0;
                    self.state = ParseState::ValveV;
                } else {
                    self.valve_axis(&token, 0, false)?;
                }
            }
            ParseState::ValveV => {
                if token.match_byte(b']') {
                    self.state = ParseState::Rot;
                } else {
                    self.valve_axis(&token, 1, true)?;
                }
            }
            ParseState::Rot => {
                self.face.base.rotation = expect_float(&token)?;
                self.state = ParseState::UScale;
            }
            ParseState::UScale => {
                self.face.base.scale.x = expect_float(&token)?;
                self.state = ParseState::VScale;
            }
            ParseState::VScale => {
                self.face.base.scale.y = expect_float(&token)?;
                self.commit_face();
                self.state = ParseState::Brush;
            }
        }

        Ok(())
    }

    fn begin_property(&mut self, token: &Token) {
        let key = &token.text[1..];

        if key.ends_with('"') {
            self.property_key = String::from(key.trim_end_matches('"'));
            self.state = ParseState::PropertyValue;
        } else {
            // Keys never span tokens in practice; wait for the next quote
            self.property_key = String::from(key);
            trace!("Unterminated key {}", token);
        }
    }

    fn accumulate_value(&mut self, token: &Token) {
        let is_first = token.opens_quote();
        let is_last = token.closes_quote();

        match self.options.property_values {
            PropertyValueMode::Legacy => {
                if is_first && !self.property_value.is_empty() {
                    self.property_value.clear();
                }

                if is_first || is_last {
                    self.property_value.push_str(token.text);
                } else {
                    self.property_value.push(' ');
                    self.property_value.push_str(token.text);
                    self.property_value.push(' ');
                }
            }
            PropertyValueMode::Joined => {
                if is_first {
                    self.property_value.clear();
                } else if !self.property_value.is_empty() {
                    self.property_value.push(' ');
                }

                self.property_value.push_str(token.text);
            }
        }

        if is_last {
            let value = strip_outer(&self.property_value);
            self.entity
                .properties
                .insert(self.property_key.as_str(), value);
            self.state = ParseState::Entity;

            if self.options.property_values == PropertyValueMode::Joined {
                self.property_value.clear();
            }
        }
    }

    /// `allow_open` skips a `(`, which only belongs in the states entered on
    /// the previous point's `)`. Plane0 is entered on the `(` itself.
    fn plane_point(
        &mut self,
        token: &Token,
        point: usize,
        next: ParseState,
        allow_open: bool,
    ) -> qmap::Result<()> {
        if token.match_byte(b')') {
            self.component_idx = 0;
            self.state = next;
        } else if allow_open && token.match_byte(b'(') {
            self.ignore(token);
        } else {
            let value = expect_float(token)?;
            self.face
                .set_point_component(point, self.component_idx, value);
            self.component_idx += 1;
        }

        Ok(())
    }

    fn valve_axis(
        &mut self,
        token: &Token,
        axis: usize,
        allow_open: bool,
    ) -> qmap::Result<()> {
        if allow_open && token.match_byte(b'[') {
            self.ignore(token);
        } else {
            let value = expect_float(token)?;
            self.face.set_axis_component(axis, self.component_idx, value);
            self.component_idx += 1;
        }

        Ok(())
    }

    fn expect_offset(&self, token: &Token) -> qmap::Result<f64> {
        self.offset_format
            .parse(token.text)
            .ok_or_else(|| number_error(token))
    }

    fn commit_face(&mut self) {
        let face = mem::take(&mut self.face).finish();

        if !face.plane.is_finite() {
            warn!(
                "Line {}: face points do not span a plane",
                self.line_number
            );
        }

        trace!("Committed face {:?}", face.plane);
        self.brush.faces.push(face);
    }

    fn commit_brush(&mut self) {
        let brush = mem::take(&mut self.brush).finish();
        trace!("Committed brush with {} faces", brush.len());
        self.entity.brushes.push(brush);
    }

    fn commit_entity(&mut self) {
        let entity = mem::take(&mut self.entity).finish();

        debug!(
            "Committed entity {} ({}) with {} brushes",
            self.map.entities.len(),
            entity.classname().unwrap_or("<no classname>"),
            entity.brushes.len(),
        );

        self.map.entities.push(entity);
    }

    fn ignore(&self, token: &Token) {
        trace!("Ignoring {} in state {:?}", token, self.state);
    }
}

fn expect_float(token: &Token) -> qmap::Result<f64> {
    parse_invariant(token.text).ok_or_else(|| number_error(token))
}

fn number_error(token: &Token) -> qmap::Error {
    qmap::Error::from_number(
        format!("Expected number, got `{}`", token.text),
        token.line_number,
    )
}

/// Drops the first and last character of an accumulated value, which are
/// its quotes on well-formed input.
fn strip_outer(value: &str) -> &str {
    let mut chars = value.chars();
    chars.next();
    chars.next_back();
    chars.as_str()
}

/// Parses a whole map with default options.
pub fn parse<R: Read>(reader: R) -> qmap::Result<MapDocument> {
    let mut map = MapDocument::new();
    MapParser::new(&mut map).parse_reader(BufReader::new(reader))?;
    Ok(map)
}

/// Reads and parses the map file at `path` with default options.
pub fn load(path: impl AsRef<Path>) -> qmap::Result<MapDocument> {
    let mut map = MapDocument::new();
    MapParser::new(&mut map).load(path)?;
    Ok(map)
}
