use std::borrow::Cow;
use std::fs;
use std::io;

use dot::{self, Edges, GraphWalk, Id, LabelText, Labeller, Nodes, Style};

type Nd = usize;
type Ed = (usize, usize);

const OUTPUT_FILE: &str = "state-space.dot";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Type {
    Queued,
    Duplicate,
    Unique,
}

/// Every node created during a search, indexed by order of creation.
#[derive(Debug, Default)]
pub(crate) struct Graph {
    nodes: Vec<(String, Type)>,
    edges: Vec<Ed>,
}

impl Graph {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Nodes must be added in the order they're created, the first one has no parent.
    pub(crate) fn add(&mut self, label: String, parent: Option<usize>) {
        let index = self.nodes.len();
        self.nodes.push((label, Type::Queued));
        if let Some(parent) = parent {
            self.edges.push((parent, index));
        }
    }

    pub(crate) fn mark_duplicate(&mut self, index: usize) {
        self.nodes[index].1 = Type::Duplicate;
    }

    pub(crate) fn mark_unique(&mut self, index: usize) {
        self.nodes[index].1 = Type::Unique;
    }

    pub(crate) fn draw(&self) {
        match self.write_dot() {
            Ok(()) => info!("Wrote {} nodes to {}", self.nodes.len(), OUTPUT_FILE),
            Err(err) => warn!("Can't write {}: {}", OUTPUT_FILE, err),
        }
    }

    fn write_dot(&self) -> io::Result<()> {
        let mut writer = Vec::new();
        dot::render(self, &mut writer)?;
        let s = String::from_utf8_lossy(&writer).replace(
            "digraph G {",
            "digraph G {\n    graph [fontname = \"hack\"];\n    node [fontname = \"hack\"];\n    edge [fontname = \"hack\"];",
        );
        fs::write(OUTPUT_FILE, s)
    }
}

impl<'a> GraphWalk<'a, Nd, Ed> for Graph {
    fn nodes(&'a self) -> Nodes<'a, Nd> {
        (0..self.nodes.len()).collect()
    }

    fn edges(&'a self) -> Edges<'a, Ed> {
        Cow::from(&self.edges)
    }

    fn source(&'a self, e: &Ed) -> Nd {
        e.0
    }

    fn target(&'a self, e: &Ed) -> Nd {
        e.1
    }
}

impl<'a> Labeller<'a, Nd, Ed> for Graph {
    fn graph_id(&'a self) -> Id<'a> {
        Id::new("G").unwrap()
    }

    fn node_id(&'a self, n: &Nd) -> Id<'a> {
        Id::new(format!("N{}", n)).unwrap()
    }

    fn node_label(&'a self, n: &Nd) -> LabelText<'a> {
        LabelText::EscStr(self.nodes[*n].0.replace('\n', "\\l").into())
    }

    fn node_style(&'a self, n: &Nd) -> Style {
        if self.nodes[*n].1 == Type::Queued {
            Style::Solid
        } else {
            Style::Filled
        }
    }

    fn node_color(&'a self, n: &Nd) -> Option<LabelText<'a>> {
        let color = match self.nodes[*n].1 {
            Type::Unique => "red",
            Type::Duplicate => "gray",
            Type::Queued => return None,
        };
        Some(LabelText::LabelStr(color.into()))
    }
}
