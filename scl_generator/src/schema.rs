use crate::element_generator::ElementGenerator;
use crate::group_generator::AttributeGroupGenerator;
use crate::type_generator::{ComplexTypeGenerator, SimpleTypeGenerator};
use std::collections::HashMap;
use tracing::debug;

/// Name-keyed definitions of a decoded schema.
///
/// A later definition with the same name replaces an earlier one.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    pub target_namespace: Option<String>,
    pub elements: HashMap<String, ElementGenerator>,
    pub complex_types: HashMap<String, ComplexTypeGenerator>,
    pub simple_types: HashMap<String, SimpleTypeGenerator>,
    pub attribute_groups: HashMap<String, AttributeGroupGenerator>,
}

impl Schema {
    pub fn new(
        elements: Vec<ElementGenerator>,
        complex_types: Vec<ComplexTypeGenerator>,
        simple_types: Vec<SimpleTypeGenerator>,
        attribute_groups: Vec<AttributeGroupGenerator>,
    ) -> Schema {
        let mut schema = Schema::default();

        for element in elements {
            match element.name.clone() {
                Some(name) => insert(&mut schema.elements, name, element, "element"),
                None => debug!("Skipping global element without a name"),
            }
        }

        for complex_type in complex_types {
            match complex_type.name.clone() {
                Some(name) => insert(&mut schema.complex_types, name, complex_type, "complex type"),
                None => debug!("Skipping global complex type without a name"),
            }
        }

        for simple_type in simple_types {
            if simple_type.name.is_empty() {
                debug!("Skipping global simple type without a name");
                continue;
            }
            insert(
                &mut schema.simple_types,
                simple_type.name.clone(),
                simple_type,
                "simple type",
            );
        }

        for group in attribute_groups {
            if group.name.is_empty() {
                debug!("Skipping attribute group without a name");
                continue;
            }
            insert(
                &mut schema.attribute_groups,
                group.name.clone(),
                group,
                "attribute group",
            );
        }

        schema
    }

    pub fn with_target_namespace(mut self, namespace: &str) -> Schema {
        self.target_namespace = Some(namespace.to_string());
        self
    }

    pub fn element(&self, name: &str) -> Option<&ElementGenerator> {
        self.elements.get(name)
    }

    pub fn complex_type(&self, name: &str) -> Option<&ComplexTypeGenerator> {
        self.complex_types.get(name)
    }

    pub fn simple_type(&self, name: &str) -> Option<&SimpleTypeGenerator> {
        self.simple_types.get(name)
    }

    pub fn attribute_group(&self, name: &str) -> Option<&AttributeGroupGenerator> {
        self.attribute_groups.get(name)
    }
}

fn insert<T>(map: &mut HashMap<String, T>, name: String, value: T, kind: &str) {
    if map.insert(name.clone(), value).is_some() {
        debug!("Duplicate {} {} replaces earlier definition", kind, name);
    }
}
