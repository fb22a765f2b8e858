//! Inheritance graph over the named types of a [`Schema`].
//!
//! Every named complex and simple type becomes a [`TypeNode`]. A complex type
//! whose `complexContent/extension` names a known base is linked to the base
//! node through `extends_from`. Nothing prevents a schema from declaring a
//! cyclic chain, so [`TypeGraph::chain`] tracks visited nodes.

use crate::error::XMLGeneratorError;
use crate::schema::Schema;
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    Complex,
    Simple,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeNode {
    pub name: String,
    pub kind: TypeKind,
    pub is_abstract: bool,
    pub extends_from: Option<NodeId>,
}

#[derive(Debug, Default)]
pub struct TypeGraph {
    nodes: Vec<TypeNode>,
    index: HashMap<String, NodeId>,
}

impl TypeGraph {
    pub fn build(schema: &Schema) -> TypeGraph {
        let mut graph = TypeGraph::default();

        for (name, complex_type) in schema.complex_types.iter() {
            graph.add(TypeNode {
                name: name.clone(),
                kind: TypeKind::Complex,
                is_abstract: complex_type.is_abstract,
                extends_from: None,
            });
        }

        for name in schema.simple_types.keys() {
            graph.add(TypeNode {
                name: name.clone(),
                kind: TypeKind::Simple,
                is_abstract: false,
                extends_from: None,
            });
        }

        for (name, complex_type) in schema.complex_types.iter() {
            let Some(base) = complex_type.base_name() else {
                continue;
            };

            // complex types were added first and keep their node on a clash
            match (graph.node(name), graph.node(base)) {
                (Some(child), Some(parent)) => graph.nodes[child.0].extends_from = Some(parent),
                _ => debug!("Base {} of type {} cannot be resolved", base, name),
            }
        }

        graph
    }

    fn add(&mut self, node: TypeNode) {
        if self.index.contains_key(&node.name) {
            debug!("Type {} declared as complex and simple type", node.name);
            return;
        }

        let id = NodeId(self.nodes.len());
        self.index.insert(node.name.clone(), id);
        self.nodes.push(node);
    }

    pub fn node(&self, name: &str) -> Option<NodeId> {
        self.index.get(name).copied()
    }

    pub fn get(&self, id: NodeId) -> &TypeNode {
        &self.nodes[id.0]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Walk `extends_from` up to the root. Returns the nodes visited and
    /// whether the walk stopped on a node it had already seen.
    fn walk(&self, id: NodeId) -> (Vec<NodeId>, bool) {
        let mut visited = HashSet::new();
        let mut chain = vec![];
        let mut current = Some(id);

        while let Some(node) = current {
            if !visited.insert(node) {
                return (chain, true);
            }
            chain.push(node);
            current = self.get(node).extends_from;
        }

        (chain, false)
    }

    /// Inheritance chain of a type, base type first and `id` last.
    ///
    /// Fails with [`XMLGeneratorError::CycleDetected`] when the chain loops.
    pub fn chain(&self, id: NodeId) -> Result<Vec<NodeId>, XMLGeneratorError> {
        let (mut chain, cyclic) = self.walk(id);
        if cyclic {
            return Err(XMLGeneratorError::CycleDetected(self.get(id).name.clone()));
        }

        chain.reverse();
        Ok(chain)
    }

    /// Like [`TypeGraph::chain`], but a loop is cut at the first repeated
    /// node and only logged.
    pub(crate) fn chain_truncated(&self, id: NodeId) -> Vec<NodeId> {
        let (mut chain, cyclic) = self.walk(id);
        if cyclic {
            warn!(
                "Cycle detected in extension chain of type {}, truncating",
                self.get(id).name
            );
        }

        chain.reverse();
        chain
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::type_generator::{ComplexTypeGenerator, ExtensionGenerator, SimpleTypeGenerator};

    fn extending(name: &str, base: &str) -> ComplexTypeGenerator {
        ComplexTypeGenerator::named(name).with_extension(ExtensionGenerator::new(base))
    }

    fn names(graph: &TypeGraph, chain: &[NodeId]) -> Vec<String> {
        chain.iter().map(|id| graph.get(*id).name.clone()).collect()
    }

    #[test]
    fn test_build_links_bases() {
        let schema = Schema::new(
            vec![],
            vec![
                ComplexTypeGenerator::named("tBaseElement").abstract_type(),
                extending("tUnNaming", "tBaseElement"),
                extending("tHeader", "tUnNaming"),
                extending("tOrphan", "tMissing"),
            ],
            vec![SimpleTypeGenerator::new("tName")],
            vec![],
        );
        let graph = TypeGraph::build(&schema);

        assert_eq!(graph.len(), 5);
        let base = graph.node("tBaseElement").unwrap();
        assert!(graph.get(base).is_abstract);
        assert_eq!(graph.get(base).kind, TypeKind::Complex);
        assert_eq!(graph.get(graph.node("tName").unwrap()).kind, TypeKind::Simple);

        let header = graph.node("tHeader").unwrap();
        assert_eq!(
            names(&graph, &graph.chain(header).unwrap()),
            vec!["tBaseElement", "tUnNaming", "tHeader"]
        );

        let orphan = graph.node("tOrphan").unwrap();
        assert_eq!(graph.get(orphan).extends_from, None);
        assert_eq!(names(&graph, &graph.chain(orphan).unwrap()), vec!["tOrphan"]);
    }

    #[test]
    fn test_extends_simple_type() {
        let schema = Schema::new(
            vec![],
            vec![extending("tValue", "tName")],
            vec![SimpleTypeGenerator::new("tName")],
            vec![],
        );
        let graph = TypeGraph::build(&schema);

        let value = graph.node("tValue").unwrap();
        assert_eq!(graph.get(value).extends_from, graph.node("tName"));
    }

    #[test]
    fn test_self_extension_is_detected() {
        let schema = Schema::new(vec![], vec![extending("tLoop", "tLoop")], vec![], vec![]);
        let graph = TypeGraph::build(&schema);
        let id = graph.node("tLoop").unwrap();

        match graph.chain(id) {
            Err(XMLGeneratorError::CycleDetected(name)) => assert_eq!(name, "tLoop"),
            other => panic!("Unexpected result: {:?}", other),
        }
        assert_eq!(names(&graph, &graph.chain_truncated(id)), vec!["tLoop"]);
    }

    #[test]
    fn test_mutual_extension_is_detected() {
        let schema = Schema::new(
            vec![],
            vec![extending("tA", "tB"), extending("tB", "tA"), extending("tC", "tA")],
            vec![],
            vec![],
        );
        let graph = TypeGraph::build(&schema);
        let c = graph.node("tC").unwrap();

        assert!(graph.chain(c).is_err());
        assert_eq!(names(&graph, &graph.chain_truncated(c)), vec!["tB", "tA", "tC"]);
    }
}
