use crate::attribute_generator::AttributeGenerator;
use crate::element_generator::ElementGenerator;
use crate::restriction_generator::RestrictionGenerator;

/// The `complexContent/extension` block of a complex type
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExtensionGenerator {
    pub base: String,
    pub elements: Vec<ElementGenerator>,
    pub attributes: Vec<AttributeGenerator>,
    pub attribute_groups: Vec<String>,
}

impl ExtensionGenerator {
    pub fn new(base: &str) -> Self {
        ExtensionGenerator {
            base: base.to_string(),
            ..Default::default()
        }
    }

    pub fn with_element(mut self, element: ElementGenerator) -> Self {
        self.elements.push(element);
        self
    }

    pub fn with_attribute(mut self, attribute: AttributeGenerator) -> Self {
        self.attributes.push(attribute);
        self
    }

    pub fn with_attribute_group(mut self, group: &str) -> Self {
        self.attribute_groups.push(group.to_string());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ComplexTypeGenerator {
    /// `None` for an anonymous type declared inside an element
    pub name: Option<String>,
    pub is_abstract: bool,
    pub elements: Vec<ElementGenerator>,
    pub attributes: Vec<AttributeGenerator>,
    pub attribute_groups: Vec<String>,
    pub extension: Option<ExtensionGenerator>,
}

impl ComplexTypeGenerator {
    pub fn new() -> Self {
        ComplexTypeGenerator::default()
    }

    pub fn named(name: &str) -> Self {
        ComplexTypeGenerator {
            name: Some(name.to_string()),
            ..Default::default()
        }
    }

    pub fn abstract_type(mut self) -> Self {
        self.is_abstract = true;
        self
    }

    pub fn with_element(mut self, element: ElementGenerator) -> Self {
        self.elements.push(element);
        self
    }

    pub fn with_attribute(mut self, attribute: AttributeGenerator) -> Self {
        self.attributes.push(attribute);
        self
    }

    pub fn with_attribute_group(mut self, group: &str) -> Self {
        self.attribute_groups.push(group.to_string());
        self
    }

    pub fn with_extension(mut self, extension: ExtensionGenerator) -> Self {
        self.extension = Some(extension);
        self
    }

    pub fn base_name(&self) -> Option<&str> {
        self.extension.as_ref().map(|extension| extension.base.as_str())
    }

    /// Child elements declared directly on this type, own sequence first
    pub fn declared_elements(&self) -> impl Iterator<Item = &ElementGenerator> {
        let extension = self
            .extension
            .iter()
            .flat_map(|extension| extension.elements.iter());
        self.elements.iter().chain(extension)
    }

    /// Attributes declared directly on this type, own list first
    pub fn declared_attributes(&self) -> impl Iterator<Item = &AttributeGenerator> {
        let extension = self
            .extension
            .iter()
            .flat_map(|extension| extension.attributes.iter());
        self.attributes.iter().chain(extension)
    }

    /// Attribute group references declared directly on this type
    pub fn declared_attribute_groups(&self) -> impl Iterator<Item = &String> {
        let extension = self
            .extension
            .iter()
            .flat_map(|extension| extension.attribute_groups.iter());
        self.attribute_groups.iter().chain(extension)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SimpleTypeGenerator {
    pub name: String,
    pub restriction: Option<RestrictionGenerator>,
}

impl SimpleTypeGenerator {
    pub fn new(name: &str) -> Self {
        SimpleTypeGenerator {
            name: name.to_string(),
            restriction: None,
        }
    }
}
