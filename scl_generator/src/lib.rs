pub mod accumulator;
pub mod attribute_generator;
pub mod attribute_resolver;
pub mod config;
pub mod element_generator;
pub mod error;
mod fake_value;
mod fetch_elements;
mod fetch_types;
pub mod generate;
pub mod generate_output;
pub mod generate_schema;
pub mod group_generator;
pub mod instance;
pub mod read_instance;
pub mod restriction_generator;
pub mod schema;
pub mod type_generator;
pub mod type_graph;

pub use attribute_resolver::{AttributeSupplier, AttributeSuppliers};
pub use config::{GeneratorOptions, ValueMode};
pub use error::XMLGeneratorError;
pub use generate::{GenerationSession, InstanceGenerator};
pub use generate_output::generate_output;
pub use generate_schema::generate_schema;
pub use instance::{InstanceNode, InstanceValue};
pub use read_instance::read_instance;
pub use schema::Schema;
pub use type_graph::TypeGraph;

use tracing::debug;

/// Generate a random instance tree for an XSD schema
///
/// Decodes the XSD text into a [`Schema`], builds the type inheritance graph and
/// generates one instance of `options.root_element`. Attribute values come from
/// fixed and default declarations first, then from `suppliers` and the
/// configured `attribute_values`, then from the placeholder.
///
/// Returns an `XMLGeneratorError::XSDParserError` if the text is not an XSD
/// schema, an `XMLGeneratorError::RootNotFound` if the root element is not
/// declared, and an `XMLGeneratorError::DataTypeError` if the root element has
/// no complex content.
pub fn generate_instance(
    xsd_string: &str,
    options: &GeneratorOptions,
    suppliers: AttributeSuppliers,
) -> Result<InstanceNode, XMLGeneratorError> {
    let schema = generate_schema(xsd_string)?;
    let graph = TypeGraph::build(&schema);
    debug!("Built type graph with {} types", graph.len());

    let mut generator = InstanceGenerator::new(&schema, &graph, options, suppliers, rand::rng());
    generator.generate()
}

/// Generate an XML string containing random data
///
/// Using an XSD file contents as a string, generate an XML document of the
/// same format rooted at `options.root_element`. See [`generate_instance`]
/// for the errors returned before encoding; if the `XMLBuilder` fails when
/// writing the document, an `XMLGeneratorError::XMLBuilderError` is returned.
pub fn generate_xml(
    xsd_string: &str,
    options: &GeneratorOptions,
    suppliers: AttributeSuppliers,
) -> Result<String, XMLGeneratorError> {
    let root = generate_instance(xsd_string, options, suppliers)?;
    generate_output(&root, &options.root_element)
}
