/// A constraining facet of a simple type restriction
#[derive(Debug, Clone, PartialEq)]
pub enum Facet {
    Enumeration(String),
    Pattern(String),
    Length(String),
    MinLength(String),
    MaxLength(String),
    MinInclusive(String),
    MaxInclusive(String),
    /// Any facet the generator does not interpret
    Other(String, String),
}

impl Facet {
    pub(crate) fn from_parts(kind: &str, value: &str) -> Facet {
        let value = value.to_string();
        match kind {
            "enumeration" => Facet::Enumeration(value),
            "pattern" => Facet::Pattern(value),
            "length" => Facet::Length(value),
            "minLength" => Facet::MinLength(value),
            "maxLength" => Facet::MaxLength(value),
            "minInclusive" => Facet::MinInclusive(value),
            "maxInclusive" => Facet::MaxInclusive(value),
            other => Facet::Other(other.to_string(), value),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct RestrictionGenerator {
    pub base: Option<String>,
    pub facets: Vec<Facet>,
}

impl RestrictionGenerator {
    pub(crate) fn new() -> RestrictionGenerator {
        RestrictionGenerator::default()
    }

    pub fn enumerations(&self) -> Vec<&str> {
        self.facets
            .iter()
            .filter_map(|facet| match facet {
                Facet::Enumeration(value) => Some(value.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn pattern(&self) -> Option<&str> {
        self.facets.iter().find_map(|facet| match facet {
            Facet::Pattern(value) => Some(value.as_str()),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_facet_lookup() {
        let mut restriction = RestrictionGenerator::new();
        restriction.base = Some("normalizedString".to_string());
        for (kind, value) in [
            ("enumeration", "IED"),
            ("maxLength", "64"),
            ("enumeration", "SSD"),
            ("pattern", "[A-Z]+"),
            ("whiteSpace", "collapse"),
        ] {
            restriction.facets.push(Facet::from_parts(kind, value));
        }

        assert_eq!(restriction.enumerations(), vec!["IED", "SSD"]);
        assert_eq!(restriction.pattern(), Some("[A-Z]+"));
        assert_eq!(
            restriction.facets[4],
            Facet::Other("whiteSpace".to_string(), "collapse".to_string())
        );
    }
}
