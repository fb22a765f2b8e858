use crate::error::XMLGeneratorError;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

pub const SCL_NAMESPACE: &str = "http://www.iec.ch/61850/2003/SCL";
pub const DEFAULT_ROOT_ELEMENT: &str = "SCL";
pub const DEFAULT_NODE_BUDGET: usize = 1500;
pub const DEFAULT_UNBOUNDED_MAX: usize = 2;
pub const DEFAULT_PLACEHOLDER: &str = "FOO";

/// What to emit for an attribute with no fixed, default or supplied value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueMode {
    /// Always the configured placeholder
    #[default]
    Constant,
    /// A value derived from the attribute's simple type where possible
    Synthesized,
}

/// Generator configuration.
///
/// Every field has a default, so a TOML file only lists what it changes:
///
/// ```toml
/// root_element = "SCL"
/// node_budget = 800
/// value_mode = "synthesized"
///
/// [attribute_values]
/// "SCL.Header#id" = "Sample"
/// ```
///
/// An empty `namespace` falls back to the schema's `targetNamespace`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GeneratorOptions {
    pub root_element: String,
    pub namespace: Option<String>,
    pub node_budget: usize,
    pub unbounded_max: usize,
    pub placeholder: String,
    pub value_mode: ValueMode,
    /// Constant values keyed by `<element path>#<attribute>` selectors
    pub attribute_values: HashMap<String, String>,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        GeneratorOptions {
            root_element: DEFAULT_ROOT_ELEMENT.to_string(),
            namespace: Some(SCL_NAMESPACE.to_string()),
            node_budget: DEFAULT_NODE_BUDGET,
            unbounded_max: DEFAULT_UNBOUNDED_MAX,
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            value_mode: ValueMode::Constant,
            attribute_values: HashMap::new(),
        }
    }
}

impl GeneratorOptions {
    pub fn from_toml_str(string: &str) -> Result<Self, XMLGeneratorError> {
        toml::from_str(string).map_err(|err| XMLGeneratorError::ConfigError(err.to_string()))
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, XMLGeneratorError> {
        let contents = std::fs::read_to_string(path)?;
        GeneratorOptions::from_toml_str(&contents)
    }

    pub fn with_root_element(mut self, root: &str) -> Self {
        self.root_element = root.to_string();
        self
    }

    pub fn with_node_budget(mut self, budget: usize) -> Self {
        self.node_budget = budget;
        self
    }

    pub fn with_value_mode(mut self, mode: ValueMode) -> Self {
        self.value_mode = mode;
        self
    }

    pub fn with_attribute_value(mut self, selector: &str, value: &str) -> Self {
        self.attribute_values
            .insert(selector.to_string(), value.to_string());
        self
    }

    /// Namespace declared on the generated root element
    pub(crate) fn root_namespace<'a>(&'a self, target: Option<&'a str>) -> Option<&'a str> {
        match self.namespace.as_deref() {
            Some(namespace) if !namespace.is_empty() => Some(namespace),
            _ => target,
        }
    }
}
