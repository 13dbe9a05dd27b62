fn main() {
    use qmap_scene::{MapDocument, MapParser, ParserOptions, Writes};
    use std::env::args;
    use std::io;

    let mut arguments = args();
    arguments.next();

    let inpath = if let Some(path) = arguments.next() {
        path
    } else {
        panic!("No input path");
    };

    let outpath = if let Some(path) = arguments.next() {
        path
    } else {
        panic!("No output path");
    };

    let mut map = MapDocument::new();
    let options = ParserOptions::default().strict_invariant_parsing(true);
    MapParser::with_options(&mut map, options)
        .load(inpath)
        .unwrap();

    let outfile = std::fs::File::create(outpath).unwrap();
    let mut writer = io::BufWriter::new(outfile);
    map.write_to(&mut writer).unwrap();
}
