use crate::error::XMLGeneratorError;

/// How an attribute may appear on an instance element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AttributeUse {
    Required,
    #[default]
    Optional,
    Prohibited,
}

impl AttributeUse {
    pub(crate) fn parse(value: &str) -> Result<Self, XMLGeneratorError> {
        match value {
            "required" => Ok(AttributeUse::Required),
            "optional" => Ok(AttributeUse::Optional),
            "prohibited" => Ok(AttributeUse::Prohibited),
            other => Err(XMLGeneratorError::DataTypesFormatError(format!(
                "Unknown attribute use: {}",
                other
            ))),
        }
    }
}

/// A declared attribute of a complex type, extension or attribute group
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AttributeGenerator {
    pub name: String,
    pub type_name: Option<String>,
    pub attribute_use: AttributeUse,
    pub default: Option<String>,
    pub fixed: Option<String>,
}

impl AttributeGenerator {
    pub fn new(name: &str) -> Self {
        AttributeGenerator {
            name: name.to_string(),
            ..Default::default()
        }
    }

    pub fn required(mut self) -> Self {
        self.attribute_use = AttributeUse::Required;
        self
    }

    pub fn prohibited(mut self) -> Self {
        self.attribute_use = AttributeUse::Prohibited;
        self
    }

    pub fn with_type(mut self, type_name: &str) -> Self {
        self.type_name = Some(type_name.to_string());
        self
    }

    pub fn with_default(mut self, value: &str) -> Self {
        self.default = Some(value.to_string());
        self
    }

    pub fn with_fixed(mut self, value: &str) -> Self {
        self.fixed = Some(value.to_string());
        self
    }

    /// Value declared by the schema itself; `fixed` wins over `default`
    pub fn declared_value(&self) -> Option<&str> {
        self.fixed.as_deref().or(self.default.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribute_use() {
        assert_eq!(AttributeUse::parse("required").unwrap(), AttributeUse::Required);
        assert_eq!(AttributeUse::parse("optional").unwrap(), AttributeUse::Optional);
        assert_eq!(AttributeUse::parse("prohibited").unwrap(), AttributeUse::Prohibited);
        assert!(AttributeUse::parse("sometimes").is_err());
        assert_eq!(AttributeUse::default(), AttributeUse::Optional);
    }

    #[test]
    fn test_fixed_wins_over_default() {
        let attribute = AttributeGenerator::new("version")
            .with_default("2003")
            .with_fixed("2007");
        assert_eq!(attribute.declared_value(), Some("2007"));

        let attribute = AttributeGenerator::new("revision").with_default("B");
        assert_eq!(attribute.declared_value(), Some("B"));

        assert_eq!(AttributeGenerator::new("desc").declared_value(), None);
    }
}
