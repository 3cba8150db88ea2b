//! Saving and loading graphs through the filesystem.

use attrgraph::{
    load_graph, load_graph_as, save_graph, AttributeGraph, CodecError, Format, SaveOptions,
    TypedValue,
};
use tempfile::TempDir;

fn create_test_graph() -> AttributeGraph {
    let mut graph = AttributeGraph::directed();
    graph.add_vertices(4);
    graph.add_edges(&[(0, 1), (0, 2), (2, 3)]).unwrap();
    graph.set_vertex_attribute("name", 0, "main").unwrap();
    graph.set_vertex_attribute("size", 3, 42).unwrap();
    graph.set_edge_attribute("weight", 2, 0.75).unwrap();
    graph
}

fn assert_loaded(graph: &AttributeGraph) {
    assert!(graph.is_directed());
    assert_eq!(graph.vertex_count(), 4);
    assert_eq!(graph.edges(), &[(0, 1), (0, 2), (2, 3)]);
    assert_eq!(graph.vertex_attribute("name", 0).unwrap(), TypedValue::from("main"));
    assert_eq!(graph.vertex_attribute("size", 3).unwrap(), TypedValue::Numeric(42.0));
    assert_eq!(graph.edge_attribute("weight", 2).unwrap(), TypedValue::Numeric(0.75));
}

#[test]
fn test_save_and_load_by_extension() {
    let dir = TempDir::new().unwrap();
    let graph = create_test_graph();

    for (file, format) in [("graph.bin", Format::Binary), ("graph.json", Format::Json)] {
        let path = dir.path().join(file);
        assert_eq!(graph.save(&path).unwrap(), format);
        let loaded = AttributeGraph::load(&path, true).unwrap();
        assert_loaded(&loaded);
    }
}

#[test]
fn test_unknown_extension_defaults_to_binary() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("graph.dat");

    let format = save_graph(&create_test_graph(), &path, SaveOptions::default()).unwrap();
    assert_eq!(format, Format::Binary);
    assert_loaded(&load_graph(&path, true).unwrap());
}

#[test]
fn test_explicit_format_overrides_extension() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("graph.bin");
    let options = SaveOptions {
        format: Some(Format::Json),
        pretty_json: false,
    };

    assert_eq!(save_graph(&create_test_graph(), &path, options).unwrap(), Format::Json);

    let contents = std::fs::read_to_string(&path).unwrap();
    assert!(contents.starts_with(r#"{"num_vertices":4"#));
    assert!(!contents.contains('\n'));

    // Extension says binary, contents say JSON
    assert!(load_graph(&path, true).is_err());
    assert_loaded(&load_graph_as(&path, Format::Json, true).unwrap());
}

#[test]
fn test_pretty_json_is_indented() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("graph.json");
    create_test_graph().save(&path).unwrap();

    let contents = std::fs::read_to_string(&path).unwrap();
    assert!(contents.contains("\n  \"num_vertices\": 4"));
}

#[test]
fn test_unsupported_graph_leaves_no_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("graph.json");

    let mut graph = create_test_graph();
    graph.set_vertex_boolean("seen", 1, true).unwrap();

    let result = graph.save(&path);
    assert!(matches!(
        result,
        Err(CodecError::UnsupportedAttributeType { .. })
    ));
    assert!(!path.exists());
}

#[test]
fn test_load_missing_file_is_io_error() {
    let dir = TempDir::new().unwrap();
    let result = load_graph(dir.path().join("missing.bin"), false);
    assert!(matches!(result, Err(CodecError::Io { .. })));
}

#[test]
fn test_save_into_missing_directory_is_io_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("no").join("such").join("graph.bin");
    let result = create_test_graph().save(&path);
    assert!(matches!(result, Err(CodecError::Io { .. })));
}

#[test]
fn test_loaded_direction_comes_from_caller() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("graph.bin");
    create_test_graph().save(&path).unwrap();

    let undirected = load_graph(&path, false).unwrap();
    assert!(!undirected.is_directed());
    assert_eq!(undirected.edges(), &[(0, 1), (0, 2), (2, 3)]);
}

fn dir_entries(dir: &TempDir) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn test_save_leaves_only_the_target_file() {
    let dir = TempDir::new().unwrap();
    create_test_graph().save(dir.path().join("graph.json")).unwrap();
    create_test_graph().save(dir.path().join("graph.bin")).unwrap();

    assert_eq!(dir_entries(&dir), vec!["graph.bin", "graph.json"]);
}

#[test]
fn test_failed_write_leaves_no_partial_file() {
    let dir = TempDir::new().unwrap();
    // A directory in the way makes the final rename fail after the bytes are
    // already written.
    let blocked = dir.path().join("graph.bin");
    std::fs::create_dir(&blocked).unwrap();

    let result = create_test_graph().save(&blocked);
    assert!(matches!(result, Err(CodecError::Io { .. })));
    assert!(blocked.is_dir());
    assert_eq!(dir_entries(&dir), vec!["graph.bin"]);
}

#[test]
fn test_failed_save_keeps_previous_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("graph.bin");
    create_test_graph().save(&path).unwrap();
    let before = std::fs::read(&path).unwrap();

    let mut graph = create_test_graph();
    graph.set_graph_attribute("title", "rejected").unwrap();
    assert!(graph.save(&path).is_err());

    assert_eq!(std::fs::read(&path).unwrap(), before);
    assert_eq!(dir_entries(&dir), vec!["graph.bin"]);
}

#[test]
fn test_save_overwrites_existing_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("graph.bin");
    std::fs::write(&path, b"stale contents").unwrap();

    create_test_graph().save(&path).unwrap();
    assert_loaded(&load_graph(&path, true).unwrap());
}
