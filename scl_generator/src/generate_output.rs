use crate::error::XMLGeneratorError;
use crate::instance::InstanceNode;
use std::string::String;
use xml_builder::{XMLBuilder, XMLElement, XMLVersion};

fn build_element(name: &str, node: &InstanceNode) -> Result<XMLElement, XMLGeneratorError> {
    let mut element = XMLElement::new(name);

    for (attribute, value) in node.attributes() {
        element.add_attribute(attribute, value);
    }

    for (key, children) in node.child_groups() {
        for child in children {
            let child_element = build_element(key, child)?;
            element
                .add_child(child_element)
                .map_err(|err| XMLGeneratorError::XMLBuilderError(err.to_string()))?;
        }
    }

    Ok(element)
}

/// Render an instance tree as an XML 1.0 document rooted at `root_name`
pub fn generate_output(root: &InstanceNode, root_name: &str) -> Result<String, XMLGeneratorError> {
    let mut xml = XMLBuilder::new()
        .version(XMLVersion::XML1_0)
        .encoding("UTF-8".into())
        .build();

    let root_element = build_element(root_name, root)?;

    let mut writer: Vec<u8> = Vec::new();
    xml.set_root_element(root_element);
    xml.generate(&mut writer)
        .map_err(|err| XMLGeneratorError::XMLBuilderError(err.to_string()))?;

    String::from_utf8(writer).map_err(|err| XMLGeneratorError::XMLBuilderError(err.to_string()))
}
