use crate::error::XMLGeneratorError;
use crate::fetch_elements::fetch_elements;
use crate::fetch_types::{fetch_attribute_groups, fetch_types, is_xs};
use crate::schema::Schema;
use roxmltree::Document;
use tracing::debug;

const DECODED: [&str; 4] = ["element", "complexType", "simpleType", "attributeGroup"];

/// Decode XSD text into a [`Schema`]
pub fn generate_schema(string: &str) -> Result<Schema, XMLGeneratorError> {
    let document =
        Document::parse(string).map_err(|err| XMLGeneratorError::XSDParserError(err.to_string()))?;

    let root = document.root_element();
    if !is_xs(&root, "schema") {
        return Err(XMLGeneratorError::XSDParserError(format!(
            "Document element is {}, expected xs:schema",
            root.tag_name().name()
        )));
    }

    for content in root.children().filter(|child| child.is_element()) {
        let name = content.tag_name().name();
        if !DECODED.contains(&name) {
            debug!("Skipping top-level {}", name);
        }
    }

    let elements = fetch_elements(root)?;
    let (complex_types, simple_types) = fetch_types(root)?;
    let attribute_groups = fetch_attribute_groups(root)?;

    debug!(
        "Decoded {} elements, {} complex types, {} simple types, {} attribute groups",
        elements.len(),
        complex_types.len(),
        simple_types.len(),
        attribute_groups.len()
    );

    let mut schema = Schema::new(elements, complex_types, simple_types, attribute_groups);
    schema.target_namespace = root.attribute("targetNamespace").map(str::to_string);

    Ok(schema)
}
