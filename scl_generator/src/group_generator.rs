use crate::attribute_generator::AttributeGenerator;

/// A named `xs:attributeGroup` definition
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AttributeGroupGenerator {
    pub name: String,
    pub attributes: Vec<AttributeGenerator>,
    /// Nested `xs:attributeGroup ref="..."` entries
    pub groups: Vec<String>,
}

impl AttributeGroupGenerator {
    pub fn new(name: &str) -> AttributeGroupGenerator {
        AttributeGroupGenerator {
            name: name.to_string(),
            attributes: vec![],
            groups: vec![],
        }
    }

    pub fn with_attribute(mut self, attribute: AttributeGenerator) -> Self {
        self.attributes.push(attribute);
        self
    }

    pub fn with_group(mut self, group: &str) -> Self {
        self.groups.push(group.to_string());
        self
    }
}
