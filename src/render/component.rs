//! Rendering of a single component descriptor.

use crate::{
    domain::{Descriptor, Links, PropertyDescriptor},
    render::lines::{heading, paragraph, table, Parity},
};

const LINK_HEADER: [&str; 4] = ["Direction", "Name", "Type", "Mandatory"];
const PROPERTY_HEADER: [&str; 8] = [
    "Name",
    "Description",
    "Mandatory",
    "Type",
    "Min",
    "Max",
    "Default",
    "Choices",
];

/// Renders a component found at `depth`.
///
/// The heading is the directory `name`, one level below `depth`. It is
/// followed by the description and, when the descriptor has data for them,
/// the links, references and properties tables. A table with nothing to show
/// is omitted together with its heading.
#[must_use]
pub fn render_component(depth: usize, name: &str, descriptor: &Descriptor) -> Vec<String> {
    let mut lines = vec![heading(depth + 1, name), paragraph(&descriptor.description)];

    if let Some(links) = descriptor.links.as_ref().filter(|l| l.is_renderable()) {
        lines.push(heading(depth + 2, "Links"));
        lines.extend(link_table(links));
    }

    if let Some(refs) = descriptor.refs.as_ref().filter(|r| r.is_renderable()) {
        lines.push(heading(depth + 2, "References"));
        lines.extend(link_table(refs));
    }

    if let Some(properties) = descriptor.properties.as_deref().filter(|p| !p.is_empty()) {
        lines.push(heading(depth + 2, "Properties"));
        lines.extend(property_table(properties));
    }

    lines
}

fn link_table(links: &Links) -> Vec<String> {
    let rows = links.entries().map(|(direction, index, link)| {
        let cells = vec![
            direction.to_string(),
            link.name.clone(),
            link.kind.clone(),
            yes_no(link.mandatory),
        ];
        (cells, Parity::of(index))
    });

    table(&LINK_HEADER, rows)
}

fn property_table(properties: &[PropertyDescriptor]) -> Vec<String> {
    let rows = properties
        .iter()
        .enumerate()
        .map(|(index, property)| (property_cells(property), Parity::of(index)));

    table(&PROPERTY_HEADER, rows)
}

fn property_cells(property: &PropertyDescriptor) -> Vec<String> {
    let optional = |value: Option<i64>| value.map(|v| v.to_string()).unwrap_or_default();

    vec![
        property.label.clone(),
        property.description.clone(),
        yes_no(property.mandatory),
        property.kind.name().to_string(),
        optional(property.min),
        optional(property.max),
        property.default.clone().unwrap_or_default(),
        property.kind.choices().join(", "),
    ]
}

fn yes_no(flag: bool) -> String {
    String::from(if flag { "yes" } else { "no" })
}
