use crate::attribute_generator::AttributeGenerator;
use crate::element_generator::ElementGenerator;
use crate::schema::Schema;
use crate::type_generator::ComplexTypeGenerator;
use crate::type_graph::{NodeId, TypeGraph, TypeKind};
use std::collections::HashSet;
use tracing::debug;

/// Flattens the elements and attributes a type inherits along its
/// extension chain, base type first.
pub struct Accumulator<'a> {
    schema: &'a Schema,
    graph: &'a TypeGraph,
}

impl<'a> Accumulator<'a> {
    pub fn new(schema: &'a Schema, graph: &'a TypeGraph) -> Self {
        Accumulator { schema, graph }
    }

    fn definition(&self, id: NodeId) -> Option<&'a ComplexTypeGenerator> {
        let node = self.graph.get(id);
        match node.kind {
            TypeKind::Complex => self.schema.complex_type(&node.name),
            TypeKind::Simple => None,
        }
    }

    pub fn elements(&self, id: NodeId) -> Vec<&'a ElementGenerator> {
        let mut elements = vec![];
        for node in self.graph.chain_truncated(id) {
            if let Some(complex) = self.definition(node) {
                elements.extend(self.type_elements(complex));
            }
        }

        elements
    }

    pub fn attributes(&self, id: NodeId) -> Vec<&'a AttributeGenerator> {
        let mut attributes = vec![];
        for node in self.graph.chain_truncated(id) {
            if let Some(complex) = self.definition(node) {
                attributes.extend(self.type_attributes(complex));
            }
        }

        attributes
    }

    /// Elements declared by one type, without inheritance
    pub fn type_elements(&self, complex: &'a ComplexTypeGenerator) -> Vec<&'a ElementGenerator> {
        complex.declared_elements().collect()
    }

    /// Attributes declared by one type, including its attribute groups
    pub fn type_attributes(
        &self,
        complex: &'a ComplexTypeGenerator,
    ) -> Vec<&'a AttributeGenerator> {
        let mut attributes: Vec<&'a AttributeGenerator> = complex.declared_attributes().collect();
        for group in complex.declared_attribute_groups() {
            let mut visited = HashSet::new();
            self.group_attributes(group, &mut visited, &mut attributes);
        }

        attributes
    }

    fn group_attributes(
        &self,
        name: &str,
        visited: &mut HashSet<String>,
        attributes: &mut Vec<&'a AttributeGenerator>,
    ) {
        if !visited.insert(name.to_string()) {
            return;
        }

        let Some(group) = self.schema.attribute_group(name) else {
            debug!("Attribute group {} is not declared", name);
            return;
        };

        attributes.extend(group.attributes.iter());
        for nested in group.groups.iter() {
            self.group_attributes(nested, visited, attributes);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::group_generator::AttributeGroupGenerator;
    use crate::type_generator::{ExtensionGenerator, SimpleTypeGenerator};

    fn schema() -> Schema {
        Schema::new(
            vec![],
            vec![
                ComplexTypeGenerator::named("tBaseElement")
                    .with_element(ElementGenerator::named("Private"))
                    .with_attribute(AttributeGenerator::new("base")),
                ComplexTypeGenerator::named("tUnNaming").with_extension(
                    ExtensionGenerator::new("tBaseElement")
                        .with_element(ElementGenerator::named("Text"))
                        .with_attribute_group("agDesc"),
                ),
                ComplexTypeGenerator::named("tHeader").with_extension(
                    ExtensionGenerator::new("tUnNaming")
                        .with_element(ElementGenerator::named("History"))
                        .with_attribute(AttributeGenerator::new("id").required())
                        .with_attribute(AttributeGenerator::new("version")),
                ),
                ComplexTypeGenerator::named("tValue")
                    .with_extension(ExtensionGenerator::new("tName").with_attribute(
                        AttributeGenerator::new("unit"),
                    )),
            ],
            vec![SimpleTypeGenerator::new("tName")],
            vec![
                AttributeGroupGenerator::new("agDesc")
                    .with_attribute(AttributeGenerator::new("desc"))
                    .with_group("agLoop")
                    .with_group("agMissing"),
                AttributeGroupGenerator::new("agLoop")
                    .with_attribute(AttributeGenerator::new("loop"))
                    .with_group("agDesc"),
            ],
        )
    }

    fn attribute_names(attributes: &[&AttributeGenerator]) -> Vec<String> {
        attributes.iter().map(|a| a.name.clone()).collect()
    }

    #[test]
    fn test_elements_root_to_leaf() {
        let schema = schema();
        let graph = TypeGraph::build(&schema);
        let accumulator = Accumulator::new(&schema, &graph);

        let elements = accumulator.elements(graph.node("tHeader").unwrap());
        let names: Vec<_> = elements.iter().map(|e| e.get_name().unwrap().as_str()).collect();
        assert_eq!(names, vec!["Private", "Text", "History"]);
    }

    #[test]
    fn test_attributes_root_to_leaf() {
        let schema = schema();
        let graph = TypeGraph::build(&schema);
        let accumulator = Accumulator::new(&schema, &graph);

        let attributes = accumulator.attributes(graph.node("tHeader").unwrap());
        assert_eq!(
            attribute_names(&attributes),
            vec!["base", "desc", "loop", "id", "version"]
        );

        let per_level: usize = ["tBaseElement", "tUnNaming", "tHeader"]
            .iter()
            .map(|name| {
                accumulator
                    .type_attributes(schema.complex_type(name).unwrap())
                    .len()
            })
            .sum();
        assert_eq!(attributes.len(), per_level);
    }

    #[test]
    fn test_simple_base_contributes_nothing() {
        let schema = schema();
        let graph = TypeGraph::build(&schema);
        let accumulator = Accumulator::new(&schema, &graph);

        let attributes = accumulator.attributes(graph.node("tValue").unwrap());
        assert_eq!(attribute_names(&attributes), vec!["unit"]);
        assert!(accumulator.elements(graph.node("tName").unwrap()).is_empty());
    }
}
