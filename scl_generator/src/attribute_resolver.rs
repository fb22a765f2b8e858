use crate::attribute_generator::{AttributeGenerator, AttributeUse};
use crate::config::{GeneratorOptions, ValueMode};
use crate::fake_value::synthesize;
use crate::instance::InstanceNode;
use crate::schema::Schema;
use rand::Rng;
use std::collections::HashMap;
use std::fmt;
use tracing::trace;

/// Computes an attribute value from the node generated so far
pub type AttributeSupplier = Box<dyn Fn(&InstanceNode) -> String>;

/// Attribute value suppliers keyed by `<element path>#<attribute>`,
/// e.g. `SCL.Header#id`.
#[derive(Default)]
pub struct AttributeSuppliers {
    suppliers: HashMap<String, AttributeSupplier>,
}

impl fmt::Debug for AttributeSuppliers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut selectors: Vec<_> = self.suppliers.keys().collect();
        selectors.sort();
        f.debug_struct("AttributeSuppliers")
            .field("selectors", &selectors)
            .finish()
    }
}

impl AttributeSuppliers {
    pub fn new() -> Self {
        AttributeSuppliers::default()
    }

    pub fn insert<F>(&mut self, selector: &str, supplier: F)
    where
        F: Fn(&InstanceNode) -> String + 'static,
    {
        self.suppliers
            .insert(selector.to_string(), Box::new(supplier));
    }

    pub fn with<F>(mut self, selector: &str, supplier: F) -> Self
    where
        F: Fn(&InstanceNode) -> String + 'static,
    {
        self.insert(selector, supplier);
        self
    }

    pub fn get(&self, selector: &str) -> Option<&AttributeSupplier> {
        self.suppliers.get(selector)
    }

    pub fn len(&self) -> usize {
        self.suppliers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.suppliers.is_empty()
    }

    /// Add constant suppliers for configured values. Selectors that already
    /// have a supplier keep it.
    pub(crate) fn with_constants(mut self, values: &HashMap<String, String>) -> Self {
        for (selector, value) in values.iter() {
            if self.suppliers.contains_key(selector) {
                continue;
            }
            let value = value.clone();
            self.insert(selector, move |_| value.clone());
        }
        self
    }
}

/// Fills in the attributes of a generated element
pub(crate) struct AttributeResolver<'a> {
    schema: &'a Schema,
    options: &'a GeneratorOptions,
    suppliers: &'a AttributeSuppliers,
}

impl<'a> AttributeResolver<'a> {
    pub(crate) fn new(
        schema: &'a Schema,
        options: &'a GeneratorOptions,
        suppliers: &'a AttributeSuppliers,
    ) -> Self {
        AttributeResolver {
            schema,
            options,
            suppliers,
        }
    }

    /// Decide which of `attributes` appear on `node` and set their values.
    ///
    /// Prohibited attributes never appear, required ones always do and
    /// optional ones on a fair coin flip.
    pub(crate) fn apply<R: Rng + ?Sized>(
        &self,
        node: &mut InstanceNode,
        attributes: &[&AttributeGenerator],
        selector: &str,
        rng: &mut R,
    ) {
        for attribute in attributes.iter() {
            let emit = match attribute.attribute_use {
                AttributeUse::Prohibited => false,
                AttributeUse::Required => true,
                AttributeUse::Optional => rng.random_bool(0.5),
            };
            if !emit {
                trace!("Skipping attribute {}#{}", selector, attribute.name);
                continue;
            }

            let value = self.value(attribute, node, selector, rng);
            node.set_attribute(&attribute.name, value);
        }
    }

    /// Fixed value, then default, then a registered supplier, then a
    /// placeholder.
    fn value<R: Rng + ?Sized>(
        &self,
        attribute: &AttributeGenerator,
        node: &InstanceNode,
        selector: &str,
        rng: &mut R,
    ) -> String {
        if let Some(value) = attribute.declared_value() {
            return value.to_string();
        }

        let key = format!("{}#{}", selector, attribute.name);
        if let Some(supplier) = self.suppliers.get(&key) {
            return supplier(node);
        }

        match self.options.value_mode {
            ValueMode::Constant => self.options.placeholder.clone(),
            ValueMode::Synthesized => attribute
                .type_name
                .as_deref()
                .and_then(|type_name| synthesize(self.schema, type_name, rng))
                .unwrap_or_else(|| self.options.placeholder.clone()),
        }
    }
}
