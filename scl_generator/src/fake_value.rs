use crate::restriction_generator::{Facet, RestrictionGenerator};
use crate::schema::Schema;
use fake::{Fake, Faker};
use rand::Rng;
use rand::seq::IndexedRandom;
use tracing::debug;

/// Restriction bases followed before giving up on a simple type
const MAX_RESTRICTION_DEPTH: usize = 16;

/// Repetition limit for unbounded quantifiers in sampled patterns
const MAX_PATTERN_REPEAT: u32 = 8;

/// Width of the range drawn from when only one inclusive bound is declared
const OPEN_RANGE_WIDTH: i64 = 1000;

const INTEGER_TYPES: &[&str] = &[
    "integer",
    "int",
    "long",
    "short",
    "byte",
    "nonNegativeInteger",
    "positiveInteger",
    "unsignedInt",
    "unsignedLong",
    "unsignedShort",
    "unsignedByte",
];

const STRING_TYPES: &[&str] = &["string", "normalizedString", "token", "Name", "NCName", "NMTOKEN"];

fn make_fake<Output: fake::Dummy<Faker> + ToString>() -> Option<String> {
    Some(Faker.fake::<Output>().to_string())
}

/// Fake value for a built-in XSD type
pub(crate) fn generate(type_name: &str) -> Option<String> {
    match type_name {
        "boolean" => make_fake::<bool>(),
        "decimal" | "float" => make_fake::<f32>(),
        "double" => make_fake::<f64>(),
        "integer" | "int" => make_fake::<i32>(),
        "long" => make_fake::<i64>(),
        "short" => make_fake::<i16>(),
        "byte" => make_fake::<i8>(),
        "nonNegativeInteger" | "unsignedInt" => make_fake::<u32>(),
        "unsignedLong" => make_fake::<u64>(),
        "unsignedShort" => make_fake::<u16>(),
        "unsignedByte" => make_fake::<u8>(),
        "positiveInteger" => Some((1..u32::MAX).fake::<u32>().to_string()),
        name if STRING_TYPES.contains(&name) => make_fake::<String>(),
        _ => None,
    }
}

/// Length and inclusive range facets met along a restriction chain. The
/// most derived restriction is added first and wins.
#[derive(Debug, Default)]
struct Bounds {
    min_length: Option<usize>,
    max_length: Option<usize>,
    min_inclusive: Option<i64>,
    max_inclusive: Option<i64>,
}

impl Bounds {
    fn add(&mut self, restriction: &RestrictionGenerator) {
        for facet in restriction.facets.iter() {
            match facet {
                Facet::Length(value) => {
                    let length = value.trim().parse().ok();
                    self.min_length = self.min_length.or(length);
                    self.max_length = self.max_length.or(length);
                }
                Facet::MinLength(value) => {
                    self.min_length = self.min_length.or(value.trim().parse().ok())
                }
                Facet::MaxLength(value) => {
                    self.max_length = self.max_length.or(value.trim().parse().ok())
                }
                Facet::MinInclusive(value) => {
                    self.min_inclusive = self.min_inclusive.or(value.trim().parse().ok())
                }
                Facet::MaxInclusive(value) => {
                    self.max_inclusive = self.max_inclusive.or(value.trim().parse().ok())
                }
                _ => {}
            }
        }
    }

    fn integer<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<i64> {
        let (low, high) = match (self.min_inclusive, self.max_inclusive) {
            (None, None) => return None,
            (Some(low), Some(high)) => (low, high),
            (Some(low), None) => (low, low.saturating_add(OPEN_RANGE_WIDTH)),
            (None, Some(high)) => (high.min(0), high),
        };

        if low > high {
            debug!("Empty inclusive range {}..={}", low, high);
            return None;
        }
        Some(rng.random_range(low..=high))
    }

    fn fit_length(&self, value: String) -> String {
        let mut chars: Vec<char> = value.chars().collect();
        if let Some(max) = self.max_length {
            chars.truncate(max);
        }
        if let Some(min) = self.min_length {
            chars.resize(chars.len().max(min), 'x');
        }

        chars.into_iter().collect()
    }

    /// Fake value for a built-in type, kept within these bounds
    fn builtin<R: Rng + ?Sized>(&self, type_name: &str, rng: &mut R) -> Option<String> {
        if INTEGER_TYPES.contains(&type_name) {
            if let Some(value) = self.integer(rng) {
                return Some(value.to_string());
            }
        }

        let value = generate(type_name)?;
        if STRING_TYPES.contains(&type_name) {
            return Some(self.fit_length(value));
        }

        Some(value)
    }
}

fn sample_pattern<R: Rng + ?Sized>(pattern: &str, rng: &mut R) -> Option<String> {
    match rand_regex::Regex::compile(pattern, MAX_PATTERN_REPEAT) {
        Ok(regex) => Some(rng.sample::<String, _>(&regex)),
        Err(err) => {
            debug!("Pattern {} cannot be sampled: {}", pattern, err);
            None
        }
    }
}

/// Derive a value for an attribute of type `type_name`.
///
/// Walks the simple type's restriction bases and uses the first of: an
/// enumeration value, a sample of a pattern facet, a fake built-in value.
/// Fake values respect the length and inclusive range facets of the chain.
pub(crate) fn synthesize<R: Rng + ?Sized>(
    schema: &Schema,
    type_name: &str,
    rng: &mut R,
) -> Option<String> {
    let mut current = type_name.to_string();
    let mut bounds = Bounds::default();

    for _ in 0..MAX_RESTRICTION_DEPTH {
        let Some(simple) = schema.simple_type(&current) else {
            return bounds.builtin(&current, rng);
        };
        let restriction = simple.restriction.as_ref()?;
        bounds.add(restriction);

        if let Some(value) = restriction.enumerations().choose(rng) {
            return Some(value.to_string());
        }

        if let Some(value) = restriction.pattern().and_then(|p| sample_pattern(p, rng)) {
            return Some(value);
        }

        current = restriction.base.clone()?;
    }

    debug!("Restriction chain of {} is too deep", type_name);
    None
}
