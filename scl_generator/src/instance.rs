/// Prefix distinguishing attribute keys from child element keys
pub const ATTRIBUTE_PREFIX: char = '@';

#[derive(Debug, Clone, PartialEq)]
pub enum InstanceValue {
    Scalar(String),
    Nodes(Vec<InstanceNode>),
}

/// Generic document tree produced by the generator.
///
/// Entries keep insertion order. Attribute keys start with `@`; every
/// occurrence of a child element is stored in the one sequence under its name.
/// Attribute value as an XML reader reports it: tabs and line breaks are
/// read back as spaces, with `\r\n` counting as one line break.
fn normalize_value(value: String) -> String {
    if !value.contains(['\t', '\n', '\r']) {
        return value;
    }

    value.replace("\r\n", " ").replace(['\t', '\n', '\r'], " ")
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct InstanceNode {
    entries: Vec<(String, InstanceValue)>,
}

impl InstanceNode {
    pub fn new() -> Self {
        InstanceNode::default()
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.entries.iter().position(|(name, _)| name == key)
    }

    pub fn get(&self, key: &str) -> Option<&InstanceValue> {
        self.position(key).map(|index| &self.entries[index].1)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &InstanceValue)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Set an attribute, replacing an earlier value in place.
    ///
    /// Tabs and line breaks in `value` are stored as spaces.
    pub fn set_attribute(&mut self, name: &str, value: String) {
        let key = format!("{}{}", ATTRIBUTE_PREFIX, name);
        let value = normalize_value(value);
        match self.position(&key) {
            Some(index) => self.entries[index].1 = InstanceValue::Scalar(value),
            None => self.entries.push((key, InstanceValue::Scalar(value))),
        }
    }

    /// Set an attribute ahead of every other entry
    pub fn prepend_attribute(&mut self, name: &str, value: String) {
        let key = format!("{}{}", ATTRIBUTE_PREFIX, name);
        let value = normalize_value(value);
        if let Some(index) = self.position(&key) {
            self.entries.remove(index);
        }
        self.entries.insert(0, (key, InstanceValue::Scalar(value)));
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        match self.get(&format!("{}{}", ATTRIBUTE_PREFIX, name)) {
            Some(InstanceValue::Scalar(value)) => Some(value.as_str()),
            _ => None,
        }
    }

    /// Attributes in insertion order, without the `@` prefix
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().filter_map(|(key, value)| {
            match (key.strip_prefix(ATTRIBUTE_PREFIX), value) {
                (Some(name), InstanceValue::Scalar(value)) => Some((name, value.as_str())),
                _ => None,
            }
        })
    }

    /// Append a child to the sequence stored under `name`
    pub fn push_child(&mut self, name: &str, child: InstanceNode) {
        match self.position(name) {
            Some(index) => match &mut self.entries[index].1 {
                InstanceValue::Nodes(nodes) => nodes.push(child),
                value => *value = InstanceValue::Nodes(vec![child]),
            },
            None => self
                .entries
                .push((name.to_string(), InstanceValue::Nodes(vec![child]))),
        }
    }

    pub fn children(&self, name: &str) -> &[InstanceNode] {
        match self.get(name) {
            Some(InstanceValue::Nodes(nodes)) => nodes.as_slice(),
            _ => &[],
        }
    }

    /// Child sequences in insertion order
    pub fn child_groups(&self) -> impl Iterator<Item = (&str, &[InstanceNode])> {
        self.entries.iter().filter_map(|(key, value)| match value {
            InstanceValue::Nodes(nodes) => Some((key.as_str(), nodes.as_slice())),
            InstanceValue::Scalar(_) => None,
        })
    }

    /// Number of nodes in this tree, including this one
    pub fn node_count(&self) -> usize {
        1 + self
            .child_groups()
            .flat_map(|(_, nodes)| nodes.iter())
            .map(InstanceNode::node_count)
            .sum::<usize>()
    }
}
