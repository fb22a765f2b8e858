use crate::attribute_generator::{AttributeGenerator, AttributeUse};
use crate::element_generator::ElementGenerator;
use crate::error::XMLGeneratorError;
use crate::group_generator::AttributeGroupGenerator;
use crate::restriction_generator::{Facet, RestrictionGenerator};
use crate::type_generator::{ComplexTypeGenerator, ExtensionGenerator, SimpleTypeGenerator};
use roxmltree::Node;
use tracing::debug;

pub(crate) const XSD_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema";

pub(crate) fn is_xs(node: &Node, name: &str) -> bool {
    node.is_element()
        && node.tag_name().name() == name
        && node.tag_name().namespace() == Some(XSD_NAMESPACE)
}

pub(crate) fn xs_children<'a, 'input>(
    node: Node<'a, 'input>,
    name: &'static str,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children().filter(move |child| is_xs(child, name))
}

/// Strip the namespace prefix from a QName reference
pub(crate) fn get_qname(qname: &str) -> String {
    match qname.rsplit_once(':') {
        Some((_prefix, local)) => local.to_string(),
        None => qname.to_string(),
    }
}

fn get_occurs(node: &Node) -> Result<(usize, Option<usize>), XMLGeneratorError> {
    let min = match node.attribute("minOccurs") {
        Some(value) => value.trim().parse::<usize>().map_err(|_| {
            XMLGeneratorError::DataTypesFormatError(format!("Invalid minOccurs: {}", value))
        })?,
        None => 0,
    };

    let max = match node.attribute("maxOccurs") {
        None => None,
        Some("unbounded") => None,
        Some(value) => Some(value.trim().parse::<usize>().map_err(|_| {
            XMLGeneratorError::DataTypesFormatError(format!("Invalid maxOccurs: {}", value))
        })?),
    };

    Ok((min, max))
}

fn get_attribute(node: &Node) -> Result<AttributeGenerator, XMLGeneratorError> {
    let name = match (node.attribute("name"), node.attribute("ref")) {
        (Some(name), _) => name.to_string(),
        (None, Some(reference)) => get_qname(reference),
        (None, None) => {
            return Err(XMLGeneratorError::DataTypesFormatError(
                "Attribute does not have a name or a reference".to_string(),
            ));
        }
    };

    let mut generator = AttributeGenerator::new(&name);
    generator.type_name = node.attribute("type").map(get_qname);
    if let Some(attribute_use) = node.attribute("use") {
        generator.attribute_use = AttributeUse::parse(attribute_use)?;
    }
    generator.default = node.attribute("default").map(str::to_string);
    generator.fixed = node.attribute("fixed").map(str::to_string);

    Ok(generator)
}

fn get_attributes(node: Node) -> Result<Vec<AttributeGenerator>, XMLGeneratorError> {
    xs_children(node, "attribute")
        .map(|attribute| get_attribute(&attribute))
        .collect()
}

fn get_attribute_group_refs(node: Node) -> Vec<String> {
    xs_children(node, "attributeGroup")
        .filter_map(|group| group.attribute("ref"))
        .map(get_qname)
        .collect()
}

fn get_sequence_content(
    sequence: Node,
    elements: &mut Vec<ElementGenerator>,
) -> Result<(), XMLGeneratorError> {
    for child in sequence.children().filter(|child| child.is_element()) {
        if is_xs(&child, "element") {
            elements.push(get_element_type(child)?);
        } else if is_xs(&child, "sequence") {
            get_sequence_content(child, elements)?;
        } else {
            debug!("Skipping sequence content {}", child.tag_name().name());
        }
    }

    Ok(())
}

fn get_sequence(node: Node) -> Result<Vec<ElementGenerator>, XMLGeneratorError> {
    let mut elements = vec![];
    for sequence in xs_children(node, "sequence") {
        get_sequence_content(sequence, &mut elements)?;
    }

    Ok(elements)
}

fn get_extension(node: Node) -> Result<ExtensionGenerator, XMLGeneratorError> {
    let base = node.attribute("base").ok_or_else(|| {
        XMLGeneratorError::DataTypesFormatError("Extension does not have a base".to_string())
    })?;

    let mut generator = ExtensionGenerator::new(&get_qname(base));
    generator.elements = get_sequence(node)?;
    generator.attributes = get_attributes(node)?;
    generator.attribute_groups = get_attribute_group_refs(node);

    Ok(generator)
}

pub(crate) fn get_complex_type(node: Node) -> Result<ComplexTypeGenerator, XMLGeneratorError> {
    let mut generator = ComplexTypeGenerator::new();
    generator.name = node.attribute("name").map(str::to_string);
    generator.is_abstract = matches!(node.attribute("abstract"), Some("true") | Some("1"));
    generator.elements = get_sequence(node)?;
    generator.attributes = get_attributes(node)?;
    generator.attribute_groups = get_attribute_group_refs(node);

    for content in xs_children(node, "complexContent") {
        if let Some(extension) = xs_children(content, "extension").next() {
            generator.extension = Some(get_extension(extension)?);
        } else {
            debug!(
                "Complex content of {:?} is not an extension, skipping",
                generator.name
            );
        }
    }

    if xs_children(node, "simpleContent").next().is_some() {
        debug!("Skipping simple content of {:?}", generator.name);
    }

    Ok(generator)
}

fn get_restriction(node: Node) -> RestrictionGenerator {
    let mut generator = RestrictionGenerator::new();
    generator.base = node.attribute("base").map(get_qname);

    for facet in node.children().filter(|child| child.is_element()) {
        if let Some(value) = facet.attribute("value") {
            generator
                .facets
                .push(Facet::from_parts(facet.tag_name().name(), value));
        }
    }

    generator
}

pub(crate) fn get_simple_type(node: Node) -> SimpleTypeGenerator {
    let mut generator = SimpleTypeGenerator::new(node.attribute("name").unwrap_or(""));
    generator.restriction = xs_children(node, "restriction").next().map(get_restriction);
    generator
}

pub(crate) fn get_attribute_group(
    node: Node,
) -> Result<AttributeGroupGenerator, XMLGeneratorError> {
    let mut generator = AttributeGroupGenerator::new(node.attribute("name").unwrap_or(""));
    generator.attributes = get_attributes(node)?;
    generator.groups = get_attribute_group_refs(node);
    Ok(generator)
}

pub(crate) fn get_element_type(node: Node) -> Result<ElementGenerator, XMLGeneratorError> {
    let mut generator = ElementGenerator::new();
    generator.name = node.attribute("name").map(str::to_string);
    generator.reference = node.attribute("ref").map(get_qname);
    generator.type_info = node.attribute("type").map(get_qname);

    let (min, max) = get_occurs(&node)?;
    generator.min = min;
    generator.max = max;

    if let Some(complex) = xs_children(node, "complexType").next() {
        generator.complex_type = Some(Box::new(get_complex_type(complex)?));
    }

    Ok(generator)
}

pub(crate) fn fetch_types(
    schema: Node,
) -> Result<(Vec<ComplexTypeGenerator>, Vec<SimpleTypeGenerator>), XMLGeneratorError> {
    let complex_types = xs_children(schema, "complexType")
        .map(get_complex_type)
        .collect::<Result<Vec<_>, _>>()?;
    let simple_types = xs_children(schema, "simpleType").map(get_simple_type).collect();

    Ok((complex_types, simple_types))
}

pub(crate) fn fetch_attribute_groups(
    schema: Node,
) -> Result<Vec<AttributeGroupGenerator>, XMLGeneratorError> {
    xs_children(schema, "attributeGroup")
        .map(get_attribute_group)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use roxmltree::Document;

    fn wrap(body: &str) -> String {
        format!(
            "<xs:schema xmlns:xs=\"http://www.w3.org/2001/XMLSchema\">{}</xs:schema>",
            body
        )
    }

    #[test]
    fn test_get_qname() {
        assert_eq!(get_qname("xs:string"), "string");
        assert_eq!(get_qname("scl:tBaseElement"), "tBaseElement");
        assert_eq!(get_qname("tHeader"), "tHeader");
    }

    #[test]
    fn test_single_attribute_is_a_list() {
        let text = wrap(
            r#"<xs:complexType name="tText">
                 <xs:attribute name="source" type="xs:anyURI" use="required"/>
               </xs:complexType>"#,
        );
        let doc = Document::parse(&text).unwrap();
        let (complex, _) = fetch_types(doc.root_element()).unwrap();

        assert_eq!(complex.len(), 1);
        assert_eq!(complex[0].attributes.len(), 1);
        let attribute = &complex[0].attributes[0];
        assert_eq!(attribute.name, "source");
        assert_eq!(attribute.type_name.as_deref(), Some("anyURI"));
        assert_eq!(attribute.attribute_use, AttributeUse::Required);
    }

    #[test]
    fn test_extension() {
        let text = wrap(
            r#"<xs:complexType name="tHeader" abstract="true">
                 <xs:complexContent>
                   <xs:extension base="scl:tBaseElement">
                     <xs:sequence>
                       <xs:element name="Text" type="tText" minOccurs="0"/>
                       <xs:element name="History" type="tHistory" maxOccurs="unbounded"/>
                     </xs:sequence>
                     <xs:attribute name="id" type="xs:normalizedString" use="required"/>
                     <xs:attribute name="version" default="1.0"/>
                     <xs:attributeGroup ref="agDesc"/>
                   </xs:extension>
                 </xs:complexContent>
               </xs:complexType>"#,
        );
        let doc = Document::parse(&text).unwrap();
        let (complex, _) = fetch_types(doc.root_element()).unwrap();

        let header = &complex[0];
        assert!(header.is_abstract);
        assert!(header.elements.is_empty());
        let extension = header.extension.as_ref().unwrap();
        assert_eq!(extension.base, "tBaseElement");
        assert_eq!(extension.elements.len(), 2);
        assert_eq!(extension.elements[0].min, 0);
        assert_eq!(extension.elements[0].max, None);
        assert_eq!(extension.elements[1].type_info.as_deref(), Some("tHistory"));
        assert_eq!(extension.attributes.len(), 2);
        assert_eq!(extension.attributes[1].default.as_deref(), Some("1.0"));
        assert_eq!(extension.attribute_groups, vec!["agDesc".to_string()]);
    }

    #[test]
    fn test_simple_type_facets() {
        let text = wrap(
            r#"<xs:simpleType name="tPredefinedTypeOfSecurityEnum">
                 <xs:restriction base="xs:normalizedString">
                   <xs:enumeration value="None"/>
                   <xs:enumeration value="Signature"/>
                 </xs:restriction>
               </xs:simpleType>"#,
        );
        let doc = Document::parse(&text).unwrap();
        let (_, simple) = fetch_types(doc.root_element()).unwrap();

        let restriction = simple[0].restriction.as_ref().unwrap();
        assert_eq!(restriction.base.as_deref(), Some("normalizedString"));
        assert_eq!(restriction.enumerations(), vec!["None", "Signature"]);
    }

    #[test]
    fn test_invalid_occurs() {
        let text = wrap(
            r#"<xs:complexType name="tBad">
                 <xs:sequence><xs:element name="A" maxOccurs="many"/></xs:sequence>
               </xs:complexType>"#,
        );
        let doc = Document::parse(&text).unwrap();
        let error = fetch_types(doc.root_element()).unwrap_err();
        match error {
            XMLGeneratorError::DataTypesFormatError(message) => {
                assert_eq!(message, "Invalid maxOccurs: many")
            }
            other => panic!("Unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_attribute_group() {
        let text = wrap(
            r#"<xs:attributeGroup name="agDesc">
                 <xs:attribute name="desc" type="xs:normalizedString" default=""/>
                 <xs:attributeGroup ref="agExtra"/>
               </xs:attributeGroup>"#,
        );
        let doc = Document::parse(&text).unwrap();
        let groups = fetch_attribute_groups(doc.root_element()).unwrap();

        assert_eq!(groups[0].name, "agDesc");
        assert_eq!(groups[0].attributes[0].default.as_deref(), Some(""));
        assert_eq!(groups[0].groups, vec!["agExtra".to_string()]);
    }
}
