//! Sample round trip for attrgraph
//!
//! This example demonstrates:
//! - Building a small attributed graph
//! - Saving it as JSON and as binary
//! - Loading it back and inspecting attributes

use attrgraph::{AttributeGraph, AttributedGraph, Format, SaveOptions, Scope};
use std::env;

fn main() -> attrgraph::Result<()> {
    let dir = env::temp_dir();

    println!("Building sample graph...\n");

    let mut graph = AttributeGraph::undirected();
    graph.add_vertices(25);
    for j in 1..25 {
        graph.add_edge(j, (j % 10) + 1)?;
    }
    println!("✓ {} vertices, {} edges", graph.vertex_count(), graph.edge_count());

    graph.set_vertex_attribute("id", 1, 12)?;
    graph.set_vertex_attribute("id", 24, 2)?;
    graph.set_vertex_attribute("type", 1, 2.9)?;
    graph.set_edge_attribute("id", 1, 3.1)?;
    println!("✓ Set vertex attributes 'id' and 'type', edge attribute 'id'");

    for format in [Format::Json, Format::Binary] {
        let path = dir.join(format!("attrgraph_sample.{}", format.extension()));
        let options = SaveOptions {
            format: Some(format),
            ..SaveOptions::default()
        };
        attrgraph::save_graph(&graph, &path, options)?;
        let size = std::fs::metadata(&path).map(|m| m.len()).unwrap_or(0);
        println!("\n✓ Saved {format} to {} ({size} bytes)", path.display());

        let loaded = AttributeGraph::load(&path, false)?;
        println!(
            "  Loaded {} vertices, {} edges",
            loaded.vertex_count(),
            loaded.edge_count()
        );
        for scope in [Scope::Vertex, Scope::Edge] {
            for descriptor in loaded.attribute_descriptors(scope) {
                println!("  {scope} attribute '{}' (tag {})", descriptor.name, descriptor.tag);
            }
        }
        println!("  vertex 1 id   = {:?}", loaded.vertex_attribute("id", 1)?);
        println!("  vertex 24 id  = {:?}", loaded.vertex_attribute("id", 24)?);
        println!("  vertex 1 type = {:?}", loaded.vertex_attribute("type", 1)?);
        println!("  edge 1 id     = {:?}", loaded.edge_attribute("id", 1)?);

        let _ = std::fs::remove_file(&path);
    }

    println!("\n✓ Example completed successfully!");
    Ok(())
}
