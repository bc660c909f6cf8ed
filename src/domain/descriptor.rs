//! The component descriptor schema.
//!
//! Every component directory carries a `descriptor.json` document. Optional
//! fields are resolved to their defaults during deserialization, so a
//! [`Descriptor`] that exists is always ready to render.

use std::fmt;

use serde::{Deserialize, Deserializer};
use serde_json::{Number, Value};

/// The metadata describing a single component.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Descriptor {
    /// Free-text description of the component.
    pub description: String,

    /// Named connections the component exposes.
    pub links: Option<Links>,

    /// References held by the component.
    ///
    /// Same shape as [`Descriptor::links`], rendered as a separate table.
    pub refs: Option<Links>,

    /// Configurable parameters accepted by the component.
    pub properties: Option<Vec<PropertyDescriptor>>,
}

/// A pair of input and output connection lists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Links {
    /// Incoming connections, in declaration order.
    pub input: Option<Vec<LinkRef>>,
    /// Outgoing connections, in declaration order.
    pub output: Option<Vec<LinkRef>>,
}

impl Links {
    /// Whether either side is present.
    ///
    /// An empty list still counts as present.
    #[must_use]
    pub const fn is_renderable(&self) -> bool {
        self.input.is_some() || self.output.is_some()
    }

    /// Iterates over every entry, inputs first.
    ///
    /// Each item carries the entry's index within its own list, not its
    /// position in the combined sequence.
    pub fn entries(&self) -> impl Iterator<Item = (Direction, usize, &LinkRef)> {
        side(Direction::Input, self.input.as_deref())
            .chain(side(Direction::Output, self.output.as_deref()))
    }
}

fn side(
    direction: Direction,
    list: Option<&[LinkRef]>,
) -> impl Iterator<Item = (Direction, usize, &LinkRef)> {
    list.into_iter()
        .flatten()
        .enumerate()
        .map(move |(index, link)| (direction, index, link))
}

/// Which list a [`LinkRef`] was declared in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Declared under `input`.
    Input,
    /// Declared under `output`.
    Output,
}

impl Direction {
    /// The label used in rendered tables.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Input => "Input",
            Self::Output => "Output",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single named, typed connection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LinkRef {
    /// Connection name. Empty when the descriptor omits it.
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,

    /// Connection type. Empty when the descriptor omits it.
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub kind: String,

    /// Whether the connection must be wired.
    #[serde(default, deserialize_with = "null_as_default")]
    pub mandatory: bool,
}

/// A configurable parameter of a component.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawProperty")]
pub struct PropertyDescriptor {
    /// Display name of the property.
    pub label: String,
    /// What the property controls.
    pub description: String,
    /// The property's type, with the allowed values for choice properties.
    pub kind: PropertyKind,
    /// Whether a value must be supplied.
    pub mandatory: bool,
    /// Lower bound, if any.
    pub min: Option<i64>,
    /// Upper bound, if any.
    pub max: Option<i64>,
    /// Text form of the default value, if any.
    pub default: Option<String>,
}

/// The declared type of a property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyKind {
    /// `"type": "choice"`, with its allowed values in declaration order.
    Choice(Vec<String>),
    /// Any other type name.
    ///
    /// A `choice` list on such a property is dropped.
    Other(String),
}

impl PropertyKind {
    /// The type name as written in the descriptor.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Choice(_) => CHOICE,
            Self::Other(name) => name,
        }
    }

    /// The allowed values. Empty unless this is a choice.
    #[must_use]
    pub fn choices(&self) -> &[String] {
        match self {
            Self::Choice(choices) => choices,
            Self::Other(_) => &[],
        }
    }
}

const CHOICE: &str = "choice";

/// A property descriptor violated a rule that serde alone cannot express.
#[derive(Debug, thiserror::Error)]
pub enum PropertyError {
    /// A choice property without a `choice` list.
    #[error("property '{label}' has type 'choice' but no 'choice' list")]
    MissingChoices {
        /// The offending property's label.
        label: String,
    },
}

#[derive(Deserialize)]
struct RawProperty {
    label: String,
    description: String,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default, deserialize_with = "null_as_default")]
    mandatory: bool,
    #[serde(default, deserialize_with = "truncated_integer")]
    min: Option<i64>,
    #[serde(default, deserialize_with = "truncated_integer")]
    max: Option<i64>,
    default: Option<Value>,
    choice: Option<Vec<Value>>,
}

impl TryFrom<RawProperty> for PropertyDescriptor {
    type Error = PropertyError;

    fn try_from(raw: RawProperty) -> Result<Self, Self::Error> {
        let RawProperty {
            label,
            description,
            kind,
            mandatory,
            min,
            max,
            default,
            choice,
        } = raw;

        let kind = if kind == CHOICE {
            let choices = choice.ok_or_else(|| PropertyError::MissingChoices {
                label: label.clone(),
            })?;
            PropertyKind::Choice(choices.into_iter().map(text_form).collect())
        } else {
            PropertyKind::Other(kind)
        };

        Ok(Self {
            label,
            description,
            kind,
            mandatory,
            min,
            max,
            default: default.map(text_form),
        })
    }
}

/// Strings render bare; every other value renders as JSON text.
fn text_form(value: Value) -> String {
    match value {
        Value::String(text) => text,
        other => other.to_string(),
    }
}

/// Accepts any JSON number, dropping the fractional part of floats.
#[allow(clippy::cast_possible_truncation)]
fn truncated_integer<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let number = Option::<Number>::deserialize(deserializer)?;
    Ok(number.and_then(|n| n.as_i64().or_else(|| n.as_f64().map(|f| f as i64))))
}

/// Treats an explicit `null` the same as an absent field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}
