use crate::element_generator::ElementGenerator;
use crate::error::XMLGeneratorError;
use crate::fetch_types::{get_element_type, xs_children};
use roxmltree::Node;

pub(crate) fn fetch_elements(schema: Node) -> Result<Vec<ElementGenerator>, XMLGeneratorError> {
    xs_children(schema, "element").map(get_element_type).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use roxmltree::Document;

    #[test]
    fn test_fetch_global_elements() {
        let text = r#"<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema">
              <xs:element name="SCL">
                <xs:complexType>
                  <xs:complexContent>
                    <xs:extension base="tBaseElement">
                      <xs:sequence>
                        <xs:element name="Header" type="tHeader"/>
                      </xs:sequence>
                    </xs:extension>
                  </xs:complexContent>
                </xs:complexType>
              </xs:element>
              <xs:element name="Private" type="tPrivate"/>
              <xs:complexType name="tPrivate"/>
            </xs:schema>"#;
        let doc = Document::parse(text).unwrap();
        let elements = fetch_elements(doc.root_element()).unwrap();

        assert_eq!(elements.len(), 2);
        let scl = &elements[0];
        assert_eq!(scl.name.as_deref(), Some("SCL"));
        let complex = scl.complex_type.as_ref().unwrap();
        assert_eq!(complex.name, None);
        assert_eq!(complex.base_name(), Some("tBaseElement"));
        assert_eq!(elements[1].type_info.as_deref(), Some("tPrivate"));
    }
}
