use crate::error::XMLGeneratorError;
use crate::instance::InstanceNode;
use roxmltree::{Document, Node};

fn read_element(node: Node, instance: &mut InstanceNode) {
    for attribute in node.attributes() {
        instance.set_attribute(attribute.name(), attribute.value().to_string());
    }

    for child in node.children().filter(|child| child.is_element()) {
        let mut child_instance = InstanceNode::new();
        read_element(child, &mut child_instance);
        instance.push_child(child.tag_name().name(), child_instance);
    }
}

/// Decode an XML document into its root element name and instance tree.
///
/// Namespace declarations on the root element are kept as `@xmlns` and
/// `@xmlns:<prefix>` attributes ahead of the other attributes. Text content
/// is ignored.
pub fn read_instance(string: &str) -> Result<(String, InstanceNode), XMLGeneratorError> {
    let document =
        Document::parse(string).map_err(|err| XMLGeneratorError::XMLReadError(err.to_string()))?;
    let root = document.root_element();

    let mut instance = InstanceNode::new();
    for namespace in root.namespaces() {
        match namespace.name() {
            Some("xml") => continue,
            Some(prefix) => {
                instance.set_attribute(&format!("xmlns:{}", prefix), namespace.uri().to_string())
            }
            None => instance.set_attribute("xmlns", namespace.uri().to_string()),
        }
    }
    read_element(root, &mut instance);

    Ok((root.tag_name().name().to_string(), instance))
}
