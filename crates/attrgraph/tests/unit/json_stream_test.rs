//! Unit tests for the JSON sink and source.

use attrgraph::{CodecError, GraphSink, GraphSource, JsonOptions, JsonSink, JsonSource};
use serde_json::json;

fn compact_sink() -> JsonSink<Vec<u8>> {
    JsonSink::with_options(Vec::new(), JsonOptions { pretty: false })
}

#[test]
fn test_document_shape() {
    let mut sink = compact_sink();
    sink.write_count("num_vertices", 2).unwrap();
    sink.begin_array("edges", 2).unwrap();
    sink.write_integer(0).unwrap();
    sink.write_integer(1).unwrap();
    sink.end_array().unwrap();
    sink.begin_array("vertex_attr:w", 2).unwrap();
    sink.write_number(0.5).unwrap();
    sink.write_number(f64::NAN).unwrap();
    sink.end_array().unwrap();
    sink.finish().unwrap();

    let text = String::from_utf8(sink.into_inner()).unwrap();
    assert_eq!(
        text,
        r#"{"num_vertices":2,"edges":[0,1],"vertex_attr:w":[0.5,"NaN"]}"#
    );
}

#[test]
fn test_nothing_written_before_finish() {
    let mut sink = compact_sink();
    sink.write_count("n", 1).unwrap();
    sink.begin_array("a", 0).unwrap();
    sink.end_array().unwrap();
    assert!(sink.into_inner().is_empty());
}

#[test]
fn test_pretty_output() {
    let mut sink = JsonSink::new(Vec::new());
    sink.write_count("n", 1).unwrap();
    sink.finish().unwrap();
    assert_eq!(String::from_utf8(sink.into_inner()).unwrap(), "{\n  \"n\": 1\n}");
}

#[test]
fn test_source_reads_fields_in_order() {
    let document = json!({
        "n": 2,
        "names": ["a", ""],
        "values": [1.5, "inf", "-inf", 3]
    });
    let mut source = JsonSource::from_value(document).unwrap();

    assert_eq!(source.read_count("n").unwrap(), 2);
    assert_eq!(source.begin_array("names").unwrap(), 2);
    assert_eq!(source.read_text().unwrap(), "a");
    assert_eq!(source.read_text().unwrap(), "");
    source.end_array().unwrap();
    assert_eq!(source.begin_array("values").unwrap(), 4);
    assert_eq!(source.read_number().unwrap(), 1.5);
    assert_eq!(source.read_number().unwrap(), f64::INFINITY);
    assert_eq!(source.read_number().unwrap(), f64::NEG_INFINITY);
    assert_eq!(source.read_number().unwrap(), 3.0);
    source.end_array().unwrap();
    source.finish().unwrap();
}

#[test]
fn test_source_rejects_wrong_shapes() {
    let mut source = JsonSource::from_value(json!({"n": "two"})).unwrap();
    assert!(matches!(
        source.read_count("n"),
        Err(CodecError::CorruptStream { .. })
    ));

    let mut source = JsonSource::from_value(json!({"a": 3})).unwrap();
    assert!(matches!(
        source.begin_array("a"),
        Err(CodecError::CorruptStream { .. })
    ));

    let mut source = JsonSource::from_value(json!({"a": [1.5]})).unwrap();
    source.begin_array("a").unwrap();
    assert!(matches!(
        source.read_integer(),
        Err(CodecError::CorruptStream { .. })
    ));

    assert!(matches!(
        JsonSource::from_value(json!([1, 2])),
        Err(CodecError::CorruptStream { .. })
    ));
}

#[test]
fn test_source_missing_field() {
    let mut source = JsonSource::from_value(json!({})).unwrap();
    let err = source.read_count("num_vertices").unwrap_err();
    assert!(err.to_string().contains("num_vertices"));
}

#[test]
fn test_unread_elements_reported() {
    let mut source = JsonSource::from_value(json!({"a": [1, 2]})).unwrap();
    source.begin_array("a").unwrap();
    source.read_integer().unwrap();
    assert!(matches!(
        source.end_array(),
        Err(CodecError::InvalidOperation { .. })
    ));
}

#[test]
fn test_from_reader_syntax_error() {
    let result = JsonSource::from_reader(&b"{\"n\": }"[..]);
    assert!(matches!(result, Err(CodecError::CorruptStream { .. })));
}
