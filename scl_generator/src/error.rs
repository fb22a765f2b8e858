use thiserror::Error;

/// XML generator error
///
/// Enum which manages errors in the SCL generator crate
#[derive(Error, Debug)]
pub enum XMLGeneratorError {
    /// The generated root element did not produce any content
    #[error("Data type error: {0}")]
    DataTypeError(String),
    /// Error parsing the input XSD file contents
    #[error("XSD parser error: {0}")]
    XSDParserError(String),
    /// Definitions in the schema are in an invalid format
    #[error("Invalid schema data: {0}")]
    DataTypesFormatError(String),
    /// The requested root element is not declared in the schema
    #[error("Root element not found: {0}")]
    RootNotFound(String),
    /// An extension chain leads back to a type already visited
    #[error("Cycle detected in extension chain of type {0}")]
    CycleDetected(String),
    /// Error generating the output XML structure
    #[error("XML builder error: {0}")]
    XMLBuilderError(String),
    /// Error reading a generated XML document back into a tree
    #[error("XML read error: {0}")]
    XMLReadError(String),
    /// Error loading the generator configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
