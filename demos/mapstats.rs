fn main() {
    use std::env::args;

    let mut arguments = args();

    let map_path = if let Some(path) = arguments.nth(1) {
        path
    } else {
        panic!("No arguments");
    };

    let map = match qmap_scene::load(&map_path) {
        Ok(map) => map,
        Err(err) => panic!("{}: {}", map_path, err),
    };

    let map_name = map
        .worldspawn()
        .and_then(|world| world.get("message"))
        .map(|message| format!("\"{message}\""))
        .unwrap_or_else(|| String::from("<None>"));

    let wads = map.wad_paths().join(", ");
    let point_entities = map.entities.iter().filter(|e| e.is_point()).count();
    let valve_faces = map
        .entities
        .iter()
        .flat_map(|e| e.brushes.iter())
        .flatten()
        .filter(|face| face.is_valve_uv())
        .count();

    println!(
        r"Map Name: {map_name}
WADs: {wads}
Entities: {} ({point_entities} point)
Brushes: {}
Faces: {} ({valve_faces} Valve 220)
Textures: {}",
        map.entities.len(),
        map.brush_count(),
        map.face_count(),
        map.textures.len(),
    );
}
