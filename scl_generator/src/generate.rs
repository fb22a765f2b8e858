use crate::accumulator::Accumulator;
use crate::attribute_generator::AttributeGenerator;
use crate::attribute_resolver::{AttributeResolver, AttributeSuppliers};
use crate::config::GeneratorOptions;
use crate::element_generator::ElementGenerator;
use crate::error::XMLGeneratorError;
use crate::instance::InstanceNode;
use crate::schema::Schema;
use crate::type_generator::ComplexTypeGenerator;
use crate::type_graph::{NodeId, TypeGraph, TypeKind};
use rand::Rng;
use tracing::{debug, trace, warn};

/// Node budget of one top-level generation call
#[derive(Debug)]
pub struct GenerationSession {
    created: usize,
    budget: usize,
    exhausted: bool,
}

impl GenerationSession {
    pub fn new(budget: usize) -> Self {
        GenerationSession {
            created: 0,
            budget,
            exhausted: false,
        }
    }

    /// Count an entry into the recursive step. Returns false once the
    /// budget is spent.
    fn enter(&mut self) -> bool {
        self.created += 1;
        if self.created <= self.budget {
            return true;
        }

        if !self.exhausted {
            warn!(
                "Node budget of {} exhausted, remaining elements are omitted",
                self.budget
            );
            self.exhausted = true;
        }
        false
    }

    pub fn created(&self) -> usize {
        self.created
    }
}

/// Complex type governing the content of an element
enum Governing<'a> {
    Named(NodeId),
    Inline(&'a ComplexTypeGenerator),
}

type Contents<'a> = (Vec<&'a ElementGenerator>, Vec<&'a AttributeGenerator>);

/// Builds random instance trees for a decoded schema
pub struct InstanceGenerator<'a, R: Rng> {
    schema: &'a Schema,
    graph: &'a TypeGraph,
    options: &'a GeneratorOptions,
    suppliers: AttributeSuppliers,
    rng: R,
}

impl<'a, R: Rng> InstanceGenerator<'a, R> {
    /// Configured `attribute_values` are added to `suppliers` as constants
    pub fn new(
        schema: &'a Schema,
        graph: &'a TypeGraph,
        options: &'a GeneratorOptions,
        suppliers: AttributeSuppliers,
        rng: R,
    ) -> Self {
        InstanceGenerator {
            schema,
            graph,
            options,
            suppliers: suppliers.with_constants(&options.attribute_values),
            rng,
        }
    }

    /// Generate one instance of the configured root element.
    ///
    /// The root node carries the `@xmlns` declaration as its first entry.
    pub fn generate(&mut self) -> Result<InstanceNode, XMLGeneratorError> {
        let schema = self.schema;
        let options = self.options;
        let root_name = options.root_element.as_str();

        let root = schema
            .element(root_name)
            .ok_or_else(|| XMLGeneratorError::RootNotFound(root_name.to_string()))?;

        let mut session = GenerationSession::new(options.node_budget);
        let mut node = self
            .generate_element(root, root_name, &mut session)
            .ok_or_else(|| {
                XMLGeneratorError::DataTypeError(format!(
                    "Root element {} does not have a complex type",
                    root_name
                ))
            })?;

        if let Some(namespace) = options.root_namespace(schema.target_namespace.as_deref()) {
            node.prepend_attribute("xmlns", namespace.to_string());
        }

        debug!(
            "Generated {} with {} nodes",
            root_name,
            node.node_count()
        );
        Ok(node)
    }

    /// Generate one instance of `element`, or nothing when it has no complex
    /// content or the session budget is spent.
    pub fn generate_element(
        &mut self,
        element: &'a ElementGenerator,
        selector: &str,
        session: &mut GenerationSession,
    ) -> Option<InstanceNode> {
        if !session.enter() {
            return None;
        }

        let (elements, attributes) = self.contents(element)?;
        trace!(
            "Generating {} with {} elements and {} attributes",
            selector,
            elements.len(),
            attributes.len()
        );

        let mut node = InstanceNode::new();
        let resolver = AttributeResolver::new(self.schema, self.options, &self.suppliers);
        resolver.apply(&mut node, &attributes, selector, &mut self.rng);

        for child in elements {
            let key = match child.get_name() {
                Ok(key) => key,
                Err(err) => {
                    debug!("Skipping child of {}: {}", selector, err);
                    continue;
                }
            };

            let count = child.occurrences(&mut self.rng, self.options.unbounded_max);
            let child_selector = format!("{}.{}", selector, key);
            for _ in 0..count {
                if let Some(instance) = self.generate_element(child, &child_selector, session) {
                    node.push_child(key, instance);
                }
            }
        }

        Some(node)
    }

    /// Accumulated child elements and attributes of an element, base type
    /// first
    fn contents(&self, element: &'a ElementGenerator) -> Option<Contents<'a>> {
        let accumulator = Accumulator::new(self.schema, self.graph);

        match self.governing_type(element)? {
            Governing::Named(id) => Some((accumulator.elements(id), accumulator.attributes(id))),
            Governing::Inline(complex) => {
                let mut elements = vec![];
                let mut attributes = vec![];

                if let Some(base) = complex.base_name() {
                    match self.graph.node(base) {
                        Some(id) => {
                            elements.extend(accumulator.elements(id));
                            attributes.extend(accumulator.attributes(id));
                        }
                        None => debug!("Base {} of inline type cannot be resolved", base),
                    }
                }

                elements.extend(accumulator.type_elements(complex));
                attributes.extend(accumulator.type_attributes(complex));
                Some((elements, attributes))
            }
        }
    }

    fn governing_type(&self, element: &'a ElementGenerator) -> Option<Governing<'a>> {
        if let Some(complex) = element.complex_type.as_deref() {
            return Some(Governing::Inline(complex));
        }

        if let Some(reference) = &element.reference {
            let Some(target) = self.schema.element(reference) else {
                debug!("Referenced element {} is not declared", reference);
                return None;
            };
            if let Some(complex) = target.complex_type.as_deref() {
                return Some(Governing::Inline(complex));
            }
            return self.named_type(target.type_info.as_deref()?);
        }

        self.named_type(element.type_info.as_deref()?)
    }

    fn named_type(&self, name: &str) -> Option<Governing<'a>> {
        let Some(id) = self.graph.node(name) else {
            trace!("Type {} has no complex content", name);
            return None;
        };

        match self.graph.get(id).kind {
            TypeKind::Complex => Some(Governing::Named(id)),
            TypeKind::Simple => None,
        }
    }
}
