use crate::qmap;
use glam::dvec3;
use qmap::{
    CheckWritable, MapDocument, MapParser, NumberFormat, ParserOptions, Plane,
    WriteError, Writes,
};
use std::io::sink;
use std::string::String;
use std::vec::Vec;

const SOURCE: &str = "{\n\"classname\" \"worldspawn\"\n\"message\" \"The Gate\"\n{\n\
    ( -64 -64 -16 ) ( -64 -63 -16 ) ( -64 -64 -15 ) wall 8 -4 90 0.5 2\n\
    ( -64 -64 -16 ) ( -64 -64 -15 ) ( -63 -64 -16 ) *lava1 [ 1 0 0 0.25 ] [ 0 0 -1 -16 ] 0 1 1\n\
    }\n}\n{\n\"classname\" \"light\"\n\"origin\" \"0 0 24\"\n}\n";

fn parse_invariant_source(source: &str) -> MapDocument {
    let mut map = MapDocument::new();
    let options = ParserOptions::default().offset_number_format(NumberFormat::INVARIANT);
    MapParser::with_options(&mut map, options)
        .parse_reader(source.as_bytes())
        .unwrap();
    map
}

fn write_to_string(map: &MapDocument) -> String {
    let mut dest: Vec<u8> = vec![];
    map.write_to(&mut dest).unwrap();
    String::from_utf8(dest).unwrap()
}

fn expect_validation_err(map: &MapDocument, text: &str) {
    match map.write_to(&mut sink()) {
        Err(WriteError::Validation(msg)) => {
            assert!(msg.contains(text), "Expected {:?} to contain '{}'", msg, text)
        }
        Err(err) => panic!("Unexpected error {}", err),
        Ok(()) => panic!("Expected error"),
    }
}

// Successes

#[test]
fn write_empty_map() {
    assert_eq!(write_to_string(&MapDocument::new()), "");
}

#[test]
fn write_simple_map() {
    let text = write_to_string(&parse_invariant_source(SOURCE));

    assert!(text.starts_with("{\r\n\"classname\" \"worldspawn\"\r\n"));
    assert!(text.contains("( -64 -64 -16 ) ( -64 -63 -16 ) ( -64 -64 -15 ) wall 8 -4 90 0.5 2\r\n"));
    assert!(text.contains("*lava1 [ 1 0 0 0.25 ] [ 0 0 -1 -16 ] 0 1 1\r\n"));
    assert!(text.ends_with("\"origin\" \"0 0 24\"\r\n}\r\n"));
}

#[test]
fn written_map_reads_back_the_same() {
    let map = parse_invariant_source(SOURCE);
    let reread = parse_invariant_source(&write_to_string(&map));

    assert_eq!(map, reread);
}

#[test]
fn locale_offsets_need_invariant_reread() {
    let comma_decimal = NumberFormat {
        decimal_separator: ',',
        group_separator: '.',
    };
    let map = parse_invariant_source(
        "{\n{\n( 0 0 0 ) ( 0 1 0 ) ( 1 0 0 ) wall 0.5 -4 0 1 1\n}\n}\n",
    );
    let text = write_to_string(&map);
    let offset = |options: ParserOptions| {
        let mut reread = MapDocument::new();
        MapParser::with_options(&mut reread, options)
            .parse_reader(text.as_bytes())
            .unwrap();
        reread.entities[0].brushes[0][0].alignment.offset()
    };

    let localized = ParserOptions::default().offset_number_format(comma_decimal);
    assert_eq!(offset(localized.clone()), glam::dvec2(5.0, -4.0));

    let strict = localized.strict_invariant_parsing(true);
    assert_eq!(offset(strict), glam::dvec2(0.5, -4.0));
}

// Failures

#[test]
fn write_bad_value() {
    let mut map = parse_invariant_source(SOURCE);
    map.entities[1].properties.insert("message", "line\nbreak");

    expect_validation_err(&map, "illegal character");
}

#[test]
fn write_bad_texture_name() {
    let mut map = parse_invariant_source(SOURCE);
    let idx = map.textures.register("two words");
    map.entities[0].brushes[0][0].texture_idx = idx;

    expect_validation_err(&map, "two words");
}

#[test]
fn write_empty_texture_name() {
    let mut map = parse_invariant_source(SOURCE);
    map.textures.register("");

    expect_validation_err(&map, "Empty texture name");
}

#[test]
fn write_texture_index_out_of_range() {
    let mut map = parse_invariant_source(SOURCE);
    map.entities[0].brushes[0][1].texture_idx = 99;

    expect_validation_err(&map, "out of range");
}

#[test]
fn write_non_finite_point() {
    let mut map = parse_invariant_source(SOURCE);
    let face = &mut map.entities[0].brushes[0][0];
    face.plane_points[2] = dvec3(f64::NAN, 0.0, 0.0);
    face.plane = Plane::from_points(face.plane_points);

    assert!(face.check_writable().is_err());
    expect_validation_err(&map, "finite");
}

#[test]
fn write_non_finite_alignment() {
    let mut map = parse_invariant_source(SOURCE);

    if let qmap::Alignment::Valve220 { axes, .. } =
        &mut map.entities[0].brushes[0][1].alignment
    {
        axes[0].offset = f64::INFINITY;
    } else {
        panic!("Expected Valve 220 alignment");
    }

    expect_validation_err(&map, "finite");
}
