use crate::error::XMLGeneratorError;
use crate::type_generator::ComplexTypeGenerator;
use rand::Rng;

/// An element declaration, either global or part of a sequence
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ElementGenerator {
    pub name: Option<String>,
    pub reference: Option<String>,
    pub type_info: Option<String>,
    pub complex_type: Option<Box<ComplexTypeGenerator>>,
    pub min: usize,
    /// `None` when `maxOccurs` is unbounded or absent
    pub max: Option<usize>,
}

impl ElementGenerator {
    pub fn new() -> Self {
        ElementGenerator::default()
    }

    pub fn named(name: &str) -> Self {
        ElementGenerator {
            name: Some(name.to_string()),
            ..Default::default()
        }
    }

    pub fn typed(name: &str, type_info: &str) -> Self {
        ElementGenerator {
            name: Some(name.to_string()),
            type_info: Some(type_info.to_string()),
            ..Default::default()
        }
    }

    pub fn reference(reference: &str) -> Self {
        ElementGenerator {
            reference: Some(reference.to_string()),
            ..Default::default()
        }
    }

    pub fn with_complex_type(mut self, complex_type: ComplexTypeGenerator) -> Self {
        self.complex_type = Some(Box::new(complex_type));
        self
    }

    pub fn occurs(mut self, min: usize, max: Option<usize>) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    /// Key under which instances of this element are stored in the parent.
    ///
    /// A reference takes precedence over a declared name.
    pub fn get_name(&self) -> Result<&String, XMLGeneratorError> {
        if let Some(reference) = &self.reference {
            return Ok(reference);
        }

        if let Some(name) = &self.name {
            return Ok(name);
        }

        Err(XMLGeneratorError::DataTypesFormatError(
            "Element does not have a name or a reference".to_string(),
        ))
    }

    /// Draw how many instances of this element to generate.
    ///
    /// Uniform over `[min, max]`, with `unbounded_max` standing in for an
    /// unbounded or absent `maxOccurs`.
    pub fn occurrences<R: Rng + ?Sized>(&self, rng: &mut R, unbounded_max: usize) -> usize {
        let max = self.max.unwrap_or(unbounded_max);
        if max <= self.min {
            return self.min;
        }

        rng.random_range(self.min..=max)
    }
}
