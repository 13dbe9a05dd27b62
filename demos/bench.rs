use benchmarking::measure_function_with_times;
use std::fmt::Write;
use std::time::Duration;

use qmap_scene::{MapDocument, MapParser, ParserOptions};

const BRUSH_COUNT: usize = 20_000;

fn synthesize_map(valve: bool) -> String {
    let mut source = String::from("{\n\"classname\" \"worldspawn\"\n");

    for idx in 0..BRUSH_COUNT {
        let lo = (idx as f64) * 16.0;
        let hi = lo + 8.0;
        let texture = format!("tex{}", idx % 64);
        let uv = if valve {
            "[ 1 0 0 0 ] [ 0 -1 0 0 ] 0 1 1"
        } else {
            "0 0 0 1 1"
        };

        source.push_str("{\n");
        for (a, b, c) in [
            ((lo, lo, lo), (lo, lo + 1.0, lo), (lo, lo, lo + 1.0)),
            ((lo, lo, lo), (lo, lo, lo + 1.0), (lo + 1.0, lo, lo)),
            ((lo, lo, lo), (lo + 1.0, lo, lo), (lo, lo + 1.0, lo)),
            ((hi, hi, hi), (hi, hi + 1.0, hi), (hi + 1.0, hi, hi)),
            ((hi, hi, hi), (hi + 1.0, hi, hi), (hi, hi, hi + 1.0)),
            ((hi, hi, hi), (hi, hi, hi + 1.0), (hi, hi + 1.0, hi)),
        ] {
            writeln!(
                source,
                "( {} {} {} ) ( {} {} {} ) ( {} {} {} ) {texture} {uv}",
                a.0, a.1, a.2, b.0, b.1, b.2, c.0, c.1, c.2
            )
            .unwrap();
        }
        source.push_str("}\n");
    }

    source.push_str("}\n");
    source
}

fn measure_parse(source: String) -> Duration {
    let results = measure_function_with_times(1, move |measurer| {
        measurer.measure(|| {
            let mut map = MapDocument::new();
            let options = ParserOptions::default().strict_invariant_parsing(true);
            MapParser::with_options(&mut map, options)
                .parse_reader(source.as_bytes())
                .unwrap();
        });
    })
    .unwrap();

    results.elapsed()
}

fn main() {
    for (name, valve) in [("standard", false), ("valve", true)] {
        let source = synthesize_map(valve);
        let size = source.len();

        println!(
            "Took {:?} to parse {} map ({} bytes)",
            measure_parse(source),
            name,
            size
        );
    }
}
