//! Round-trip tests: encode a graph, decode it, compare.

use attrgraph::{
    codec, from_bytes, to_bytes, AttributeGraph, AttributedGraph, BinarySink, BinarySource,
    CodecError, Format, Scope, TypedValue,
};

const FORMATS: [Format; 2] = [Format::Binary, Format::Json];

/// 25 vertices, edges (j, j % 10 + 1) for j in 1..25, a few sparse attributes.
fn sample_graph() -> AttributeGraph {
    let mut graph = AttributeGraph::undirected();
    graph.add_vertices(25);
    for j in 1..25 {
        graph.add_edge(j, (j % 10) + 1).unwrap();
    }

    graph.set_vertex_attribute("id", 1, 12).unwrap();
    graph.set_vertex_attribute("id", 24, 2).unwrap();
    graph.set_vertex_attribute("type", 1, 2.9).unwrap();
    graph.set_edge_attribute("id", 1, 3.1).unwrap();
    graph
}

fn roundtrip(graph: &AttributeGraph, format: Format) -> AttributeGraph {
    let bytes = to_bytes(graph, format).unwrap();
    from_bytes(&bytes, format, graph.is_directed()).unwrap()
}

fn assert_same_graph(expected: &AttributeGraph, actual: &AttributeGraph) {
    assert_eq!(actual.vertex_count(), expected.vertex_count());
    assert_eq!(actual.edge_count(), expected.edge_count());
    assert_eq!(actual.edges(), expected.edges());

    for scope in [Scope::Vertex, Scope::Edge] {
        let descriptors = expected.attribute_descriptors(scope);
        assert_eq!(actual.attribute_descriptors(scope), descriptors);

        for descriptor in descriptors {
            let want = expected.attribute_values(scope, &descriptor.name).unwrap();
            let got = actual.attribute_values(scope, &descriptor.name).unwrap();
            assert_eq!(got.len(), want.len());
            for (index, (w, g)) in want.iter().zip(&got).enumerate() {
                assert!(
                    w.bit_eq(g),
                    "{scope} attribute '{}' differs at {index}: {w:?} vs {g:?}",
                    descriptor.name
                );
            }
        }
    }
}

#[test]
fn test_sample_graph_roundtrip() {
    let graph = sample_graph();

    for format in FORMATS {
        let decoded = roundtrip(&graph, format);

        assert_eq!(decoded.vertex_count(), 25);
        assert_eq!(decoded.edge_count(), 24);
        assert_eq!(decoded.vertex_attribute("id", 1).unwrap(), TypedValue::Numeric(12.0));
        assert_eq!(decoded.vertex_attribute("id", 24).unwrap(), TypedValue::Numeric(2.0));
        assert_eq!(decoded.vertex_attribute("type", 1).unwrap(), TypedValue::Numeric(2.9));
        assert_eq!(decoded.edge_attribute("id", 1).unwrap(), TypedValue::Numeric(3.1));

        // Unset slots keep the numeric default
        let unset = decoded.vertex_attribute("id", 0).unwrap();
        assert!(unset.as_numeric().unwrap().is_nan());

        assert_same_graph(&graph, &decoded);
    }
}

#[test]
fn test_empty_graph_roundtrip() {
    let graph = AttributeGraph::undirected();

    for format in FORMATS {
        let decoded = roundtrip(&graph, format);
        assert!(decoded.is_empty());
        assert!(decoded.attribute_descriptors(Scope::Vertex).is_empty());
        assert!(decoded.attribute_descriptors(Scope::Edge).is_empty());
    }
}

#[test]
fn test_text_attributes_roundtrip() {
    let mut graph = AttributeGraph::directed();
    graph.add_vertices(4);
    graph.add_edges(&[(0, 1), (1, 2), (2, 3)]).unwrap();
    graph.set_vertex_attribute("name", 0, "").unwrap();
    graph.set_vertex_attribute("name", 1, "ünïcødé ✓").unwrap();
    graph.set_vertex_attribute("name", 2, "line\nbreak, \"quoted\"").unwrap();
    graph.set_edge_attribute("kind", 2, "calls").unwrap();

    for format in FORMATS {
        let decoded = roundtrip(&graph, format);
        assert!(decoded.is_directed());
        assert_eq!(decoded.vertex_attribute("name", 0).unwrap(), TypedValue::from(""));
        assert_eq!(
            decoded.vertex_attribute("name", 1).unwrap(),
            TypedValue::from("ünïcødé ✓")
        );
        assert_eq!(decoded.edge_attribute("kind", 0).unwrap(), TypedValue::from(""));
        assert_eq!(decoded.edge_attribute("kind", 2).unwrap(), TypedValue::from("calls"));
        assert_same_graph(&graph, &decoded);
    }
}

#[test]
fn test_attribute_order_independence() {
    let mut forward = AttributeGraph::undirected();
    forward.add_vertices(3);
    forward.set_vertex_attribute("id", 0, 1.0).unwrap();
    forward.set_vertex_attribute("type", 2, "leaf").unwrap();

    let mut reversed = AttributeGraph::undirected();
    reversed.add_vertices(3);
    reversed.set_vertex_attribute("type", 2, "leaf").unwrap();
    reversed.set_vertex_attribute("id", 0, 1.0).unwrap();

    for format in FORMATS {
        let a = roundtrip(&forward, format);
        let b = roundtrip(&reversed, format);
        assert_same_graph(&forward, &a);
        assert_same_graph(&reversed, &b);

        for graph in [&a, &b] {
            assert_eq!(graph.vertex_attribute("id", 0).unwrap(), TypedValue::Numeric(1.0));
            assert_eq!(graph.vertex_attribute("type", 2).unwrap(), TypedValue::from("leaf"));
        }
    }

    // Same data, different catalog order, different bytes
    assert_ne!(
        to_bytes(&forward, Format::Binary).unwrap(),
        to_bytes(&reversed, Format::Binary).unwrap()
    );
}

#[test]
fn test_edge_order_and_multi_edges_preserved() {
    let mut graph = AttributeGraph::directed();
    graph.add_vertices(4);
    let pairs = [(3, 0), (0, 3), (2, 2), (3, 0), (1, 0)];
    graph.add_edges(&pairs).unwrap();
    for edge in 0..pairs.len() {
        graph.set_edge_attribute("pos", edge, edge as f64).unwrap();
    }

    for format in FORMATS {
        let decoded = roundtrip(&graph, format);
        assert_eq!(decoded.edges(), &pairs[..]);
        for edge in 0..pairs.len() {
            assert_eq!(
                decoded.edge_attribute("pos", edge).unwrap(),
                TypedValue::Numeric(edge as f64)
            );
        }
    }
}

#[test]
fn test_special_numbers_binary_bit_exact() {
    let specials = [
        -0.0,
        f64::INFINITY,
        f64::NEG_INFINITY,
        f64::from_bits(0x7ff8_0000_0000_0001),
        f64::MIN_POSITIVE / 2.0,
        f64::MAX,
    ];
    let mut graph = AttributeGraph::undirected();
    graph.add_vertices(specials.len());
    for (vertex, value) in specials.iter().enumerate() {
        graph.set_vertex_attribute("x", vertex, *value).unwrap();
    }

    let decoded = roundtrip(&graph, Format::Binary);
    assert_same_graph(&graph, &decoded);
}

#[test]
fn test_non_finite_numbers_json() {
    let mut graph = AttributeGraph::undirected();
    graph.add_vertices(3);
    graph.set_vertex_attribute("x", 0, f64::INFINITY).unwrap();
    graph.set_vertex_attribute("x", 1, f64::NEG_INFINITY).unwrap();

    let decoded = roundtrip(&graph, Format::Json);
    assert_same_graph(&graph, &decoded);
}

#[test]
fn test_finite_numbers_json_bit_exact() {
    // xorshift64 over raw bit patterns covers every exponent range
    let mut state: u64 = 0x9e37_79b9_7f4a_7c15;
    let mut numbers = Vec::new();
    while numbers.len() < 20_000 {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        let value = f64::from_bits(state);
        if value.is_finite() {
            numbers.push(value);
        }
    }
    numbers.extend([0.1, 2.9, 3.1, 1e-320, f64::MIN_POSITIVE, f64::MAX, f64::MIN, -0.0]);

    let mut graph = AttributeGraph::undirected();
    graph.add_vertices(numbers.len());
    for (vertex, value) in numbers.iter().enumerate() {
        graph.set_vertex_attribute("x", vertex, *value).unwrap();
    }

    let decoded = roundtrip(&graph, Format::Json);
    let values = decoded.attribute_values(Scope::Vertex, "x").unwrap();
    let mismatches: Vec<_> = numbers
        .iter()
        .zip(&values)
        .filter(|(want, got)| got.as_numeric().map(f64::to_bits) != Some(want.to_bits()))
        .take(5)
        .collect();
    assert!(mismatches.is_empty(), "JSON changed numbers: {mismatches:?}");
}

#[test]
fn test_boolean_attribute_rejected_without_output() {
    let mut graph = sample_graph();
    graph.set_vertex_boolean("visited", 3, true).unwrap();

    let mut sink = BinarySink::new(Vec::new());
    let err = codec::encode(&graph, &mut sink).unwrap_err();
    match err {
        CodecError::UnsupportedAttributeType { scope, name, tag } => {
            assert_eq!(scope, Scope::Vertex);
            assert_eq!(name, "visited");
            assert_eq!(tag, 2);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(sink.into_inner().is_empty());
}

#[test]
fn test_boolean_edge_attribute_rejected_without_output() {
    let mut graph = sample_graph();
    graph.set_edge_boolean("tree", 0, true).unwrap();

    let mut sink = attrgraph::JsonSink::new(Vec::new());
    let result = codec::encode(&graph, &mut sink);
    assert!(matches!(
        result,
        Err(CodecError::UnsupportedAttributeType { scope: Scope::Edge, .. })
    ));
    assert!(sink.into_inner().is_empty());
}

#[test]
fn test_graph_attribute_rejected_without_output() {
    let mut graph = sample_graph();
    graph.set_graph_attribute("title", "sample").unwrap();

    let mut sink = BinarySink::new(Vec::new());
    let result = codec::encode(&graph, &mut sink);
    assert!(matches!(result, Err(CodecError::UnsupportedFeature { .. })));
    assert!(sink.into_inner().is_empty());
}

#[test]
fn test_decode_into_non_empty_graph_rejected() {
    let bytes = to_bytes(&sample_graph(), Format::Binary).unwrap();

    let mut target = AttributeGraph::undirected();
    target.add_vertex();
    let result = codec::decode_into(&mut BinarySource::new(&bytes[..]), target);
    assert!(matches!(result, Err(CodecError::InvalidOperation { .. })));
}

#[test]
fn test_decode_into_graph_with_graph_attribute_rejected() {
    let bytes = to_bytes(&sample_graph(), Format::Binary).unwrap();

    let mut target = AttributeGraph::undirected();
    target.set_graph_attribute("title", "stale").unwrap();
    let result = codec::decode_into(&mut BinarySource::new(&bytes[..]), target);
    assert!(matches!(result, Err(CodecError::InvalidOperation { .. })));
}

#[test]
fn test_json_field_order() {
    let bytes = to_bytes(&sample_graph(), Format::Json).unwrap();
    let document: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    let keys: Vec<&str> = document
        .as_object()
        .unwrap()
        .keys()
        .map(String::as_str)
        .collect();

    assert_eq!(
        keys,
        vec![
            "num_vertices",
            "num_edges",
            "edges",
            "vertex_attr_names",
            "vertex_attr_types",
            "vertex_attr:id",
            "vertex_attr:type",
            "edge_attr_names",
            "edge_attr_types",
            "edge_attr:id",
        ]
    );
    assert_eq!(document["vertex_attr_types"], serde_json::json!([1, 1]));
    assert_eq!(document["edges"].as_array().unwrap().len(), 48);
    assert_eq!(document["vertex_attr:id"][0], serde_json::json!("NaN"));
}

#[test]
fn test_binary_and_json_decode_to_same_graph() {
    let graph = sample_graph();
    let from_binary = roundtrip(&graph, Format::Binary);
    let from_json = roundtrip(&graph, Format::Json);
    assert_same_graph(&from_binary, &from_json);
}
