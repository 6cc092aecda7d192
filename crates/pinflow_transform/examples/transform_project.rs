//! Transform Project Example
//!
//! Builds a small counter graph in memory, transforms it and prints the
//! node table the runtime would receive, followed by any diagnostics.
//!
//! Run with `RUST_LOG=debug` to see merge and resolution logging.

use pinflow_transform::prelude::*;
use serde_json::json;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let clock = NodeType::new()
        .with_setup(json!({ "interval": 1000 }))
        .with_pin(NodeTypePin::output("tick", PinType::Pulse));
    let counter = NodeType::new()
        .with_evaluate(json!("count"))
        .with_pin(NodeTypePin::input("inc", PinType::Pulse))
        .with_pin(NodeTypePin::output("value", PinType::Number));
    let display = NodeType::new()
        .with_evaluate(json!("print"))
        .with_pin(NodeTypePin::input("text", PinType::String));

    let graph = Patch::new("@/main")
        .with_node(Node::new("clock", "clock"))
        .with_node(Node::new("counter", "counter"))
        .with_pin(Pin::new("clock.tick", "clock", "tick"))
        .with_pin(Pin::new("counter.inc", "counter", "inc"))
        .with_pin(Pin::new("counter.value", "counter", "value"))
        .with_link(Link::new("l1", "clock.tick", "counter.inc"));
    let ui = Patch::new("@/ui")
        .with_node(Node::new("display", "display"))
        .with_pin(Pin::new("display.text", "display", "text"))
        .with_link(Link::new("l2", "counter.value", "display.text"));

    let project = Project::new()
        .with_patch(graph)
        .with_patch(ui)
        .with_node_type("clock", clock)
        .with_node_type("counter", counter)
        .with_node_type("display", display);

    let report = Transformer::new(&project).run();

    match to_json_value(&report.nodes).and_then(|value| serde_json::to_string_pretty(&value)) {
        Ok(text) => println!("{}", text),
        Err(e) => eprintln!("Failed to render nodes: {}", e),
    }

    for diagnostic in &report.diagnostics {
        println!("[{:?}] {}", diagnostic.severity(), diagnostic);
    }
}
