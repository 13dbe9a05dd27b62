#![feature(test)]

extern crate test;

use std::fs;
use std::io::sink;
use test::Bencher;

use qmap_scene::{
    MapDocument, MapParser, ParserOptions, PropertyValueMode, Writes,
};

#[cfg(test)]
mod benchmarks {

    use crate::*;

    const PROPERTY_ENTITIES: usize = 2_000;

    fn parse_source(source: &str, options: ParserOptions) -> MapDocument {
        let mut map = MapDocument::new();
        MapParser::with_options(&mut map, options)
            .parse_reader(source.as_bytes())
            .unwrap();
        map
    }

    fn strict() -> ParserOptions {
        ParserOptions::default().strict_invariant_parsing(true)
    }

    fn long_values_source() -> String {
        let mut source = String::new();

        for idx in 0..PROPERTY_ENTITIES {
            source.push_str("{\n\"classname\" \"trigger_message\"\n");
            source.push_str(&format!(
                "\"message\" \"Entity {idx} says\nsomething spread\nover several lines\"\n"
            ));
            source.push_str("}\n");
        }

        source
    }

    #[bench]
    fn parse_standard_file(bench: &mut Bencher) {
        let source = fs::read_to_string("test-res/standard.map").unwrap();
        bench.iter(|| parse_source(&source, strict()));
    }

    #[bench]
    fn parse_standard_file_localized(bench: &mut Bencher) {
        let source = fs::read_to_string("test-res/standard.map").unwrap();
        bench.iter(|| parse_source(&source, ParserOptions::default()));
    }

    #[bench]
    fn parse_valve_file(bench: &mut Bencher) {
        let source = fs::read_to_string("test-res/valve.map").unwrap();
        bench.iter(|| parse_source(&source, strict()));
    }

    #[bench]
    fn parse_long_values_legacy(bench: &mut Bencher) {
        let source = long_values_source();
        bench.iter(|| parse_source(&source, strict()));
    }

    #[bench]
    fn parse_long_values_joined(bench: &mut Bencher) {
        let source = long_values_source();
        let options = strict().property_values(PropertyValueMode::Joined);
        bench.iter(|| parse_source(&source, options.clone()));
    }

    #[bench]
    fn write_valve_file(bench: &mut Bencher) {
        let source = fs::read_to_string("test-res/valve.map").unwrap();
        let map = parse_source(&source, strict());
        bench.iter(|| map.write_to(&mut sink()).unwrap());
    }
}
