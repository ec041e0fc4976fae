//! UI description tree.
//!
//! A [`Node`] is a generic element with a type name, a property bag and
//! children. The client renders it; this crate only builds and serializes it.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Type name of text leaves.
pub const TEXT_NODE: &str = "#text";

/// One element of the UI tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Element type (`div`, `table`, `Chart`, `#text`, ...).
    #[serde(rename = "type")]
    pub node_type: String,
    /// Element properties.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub props: Map<String, Value>,
    /// Child elements, in display order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
}

impl Node {
    /// Creates an element with no props.
    pub fn new(node_type: impl Into<String>, children: Vec<Node>) -> Self {
        Self {
            node_type: node_type.into(),
            props: Map::new(),
            children,
        }
    }

    /// Sets a property, replacing any previous value.
    pub fn with_prop(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.props.insert(key.into(), value.into());
        self
    }

    /// Appends a child.
    pub fn push(&mut self, child: Node) {
        self.children.push(child);
    }

    /// Serializes the node to a JSON value.
    pub fn to_json(&self) -> Value {
        // Node only holds strings, maps and vectors
        serde_json::to_value(self).unwrap_or(Value::Null)
    }

    /// Concatenated text of this node and its descendants.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        if self.node_type == TEXT_NODE {
            if let Some(value) = self.props.get("value").and_then(Value::as_str) {
                out.push_str(value);
            }
        }
        for child in &self.children {
            child.collect_text(out);
        }
    }

    /// Depth-first search for the first node of the given type.
    pub fn find(&self, node_type: &str) -> Option<&Node> {
        if self.node_type == node_type {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(node_type))
    }
}

/// Text leaf.
pub fn text(value: impl Into<String>) -> Node {
    let value: String = value.into();
    Node::new(TEXT_NODE, Vec::new()).with_prop("value", value)
}

pub fn div(children: Vec<Node>) -> Node {
    Node::new("div", children)
}

pub fn h1(children: Vec<Node>) -> Node {
    Node::new("h1", children)
}

pub fn h2(children: Vec<Node>) -> Node {
    Node::new("h2", children)
}

pub fn p(children: Vec<Node>) -> Node {
    Node::new("p", children)
}

pub fn space(children: Vec<Node>) -> Node {
    Node::new("Space", children)
}

pub fn button(children: Vec<Node>) -> Node {
    Node::new("Button", children)
}

pub fn table(children: Vec<Node>) -> Node {
    Node::new("table", children)
}

pub fn thead(children: Vec<Node>) -> Node {
    Node::new("thead", children)
}

pub fn tbody(children: Vec<Node>) -> Node {
    Node::new("tbody", children)
}

pub fn tr(children: Vec<Node>) -> Node {
    Node::new("tr", children)
}

pub fn th(children: Vec<Node>) -> Node {
    Node::new("th", children)
}

pub fn td(children: Vec<Node>) -> Node {
    Node::new("td", children)
}

/// Kind of chart the client should draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Line,
    Bar,
    Pie,
}

impl ChartKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ChartKind::Line => "line",
            ChartKind::Bar => "bar",
            ChartKind::Pie => "pie",
        }
    }
}

/// A data series drawn from one key of the chart rows.
#[derive(Debug, Clone, Serialize)]
pub struct Series {
    pub key: String,
    pub label: String,
}

impl Series {
    pub fn new(key: &str, label: &str) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
        }
    }
}

/// Chart element. `x_key` names the category field of each row.
pub fn chart(kind: ChartKind, x_key: &str, series: &[Series], data: Vec<Value>) -> Node {
    let series: Vec<Value> = series
        .iter()
        .map(|s| serde_json::json!({ "key": s.key, "label": s.label }))
        .collect();

    Node::new("Chart", Vec::new())
        .with_prop("chartType", kind.as_str())
        .with_prop("xKey", x_key)
        .with_prop("series", series)
        .with_prop("data", data)
}

/// Table with a header row and one body row per entry of `rows`.
pub fn simple_table(headers: &[&str], rows: Vec<Vec<String>>) -> Node {
    let header_row = tr(headers.iter().map(|h| th(vec![text(*h)])).collect());
    let body_rows = rows
        .into_iter()
        .map(|cells| tr(cells.into_iter().map(|c| td(vec![text(c)])).collect()))
        .collect();

    table(vec![thead(vec![header_row]), tbody(body_rows)])
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_text_node_shape() {
        assert_eq!(
            text("Close").to_json(),
            json!({"type": "#text", "props": {"value": "Close"}})
        );
    }

    #[test]
    fn test_empty_props_and_children_omitted() {
        let value = div(vec![h1(vec![text("Title")])]).to_json();
        assert_eq!(
            value,
            json!({
                "type": "div",
                "children": [{
                    "type": "h1",
                    "children": [{"type": "#text", "props": {"value": "Title"}}]
                }]
            })
        );
    }

    #[test]
    fn test_with_prop_replaces() {
        let node = div(vec![])
            .with_prop("className", "a")
            .with_prop("className", "b");
        assert_eq!(node.props.len(), 1);
        assert_eq!(node.props["className"], "b");
    }

    #[test]
    fn test_chart_props() {
        let node = chart(
            ChartKind::Bar,
            "day",
            &[Series::new("total", "Total")],
            vec![json!({"day": "2024-03-01", "total": 1.0})],
        );
        let value = node.to_json();

        assert_eq!(value["type"], "Chart");
        assert_eq!(value["props"]["chartType"], "bar");
        assert_eq!(value["props"]["xKey"], "day");
        assert_eq!(value["props"]["series"][0]["key"], "total");
        assert_eq!(value["props"]["data"][0]["total"], 1.0);
        assert!(value.get("children").is_none());
    }

    #[test]
    fn test_simple_table() {
        let node = simple_table(
            &["IP", "Logs"],
            vec![vec!["10.0.0.1".to_string(), "3".to_string()]],
        );

        assert_eq!(node.node_type, "table");
        assert_eq!(node.children[0].node_type, "thead");
        assert_eq!(node.children[1].children.len(), 1);
        assert_eq!(node.text_content(), "IPLogs10.0.0.13");
        assert!(node.find("td").is_some());
        assert!(node.find("Chart").is_none());
    }

    #[test]
    fn test_deserialize_roundtrip_of_nested_tree() {
        let tree = div(vec![p(vec![text("a")]), space(vec![button(vec![text("b")])])]);
        let back: Node = serde_json::from_value(tree.to_json()).unwrap();
        assert_eq!(back, tree);
    }
}
