//! Pass orchestration.
//!
//! Passes are organized in a dependency graph and executed in topological
//! order, so a dependent pass always runs after its prerequisites. Edges
//! are added only for dependencies that are actually registered: absent
//! prerequisites (e.g. ruleset splitting performed upstream of this crate)
//! stay documented preconditions.

use petgraph::algo::toposort;
use petgraph::graph::{Graph, NodeIndex};
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::ast::CssTree;

use super::{Pass, PassContext};

pub struct Pipeline {
    graph: Graph<Box<dyn Pass>, ()>,
    node_indices: FxHashMap<String, NodeIndex>,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl Pipeline {
    pub fn new() -> Self {
        Pipeline {
            graph: Graph::new(),
            node_indices: FxHashMap::default(),
        }
    }

    /// Register a pass, wiring edges from its already-registered
    /// dependencies.
    pub fn add_pass(&mut self, pass: Box<dyn Pass>) {
        let id = pass.id().to_string();
        let dependencies = pass.dependencies();
        let node = self.graph.add_node(pass);
        for dep_id in dependencies {
            if let Some(&dep_node) = self.node_indices.get(*dep_id) {
                self.graph.add_edge(dep_node, node, ());
            }
        }
        self.node_indices.insert(id, node);
    }

    /// Run every registered pass in dependency order over the shared tree.
    /// A dependency cycle is a pipeline-construction bug, not a stylesheet
    /// problem.
    pub fn run(&mut self, tree: &mut CssTree, ctx: &mut PassContext<'_>) {
        let order = toposort(&self.graph, None)
            .unwrap_or_else(|_| panic!("pass dependency graph contains a cycle"));
        for node_idx in order {
            let pass = &mut self.graph[node_idx];
            debug!(pass = pass.id(), "running pass");
            pass.run(tree, ctx);
        }
    }
}
