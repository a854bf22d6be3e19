//! Property descriptors and the property registry.
//!
//! The registry is a read-only collaborator: O(1) lookup, static for the
//! run. It supplies the shorthand relationships the redundancy engine uses
//! for shadowing analysis and the positional flag the abbreviation pass
//! keys on. Unknown names get a synthesized descriptor so lookup is total.

use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;

/// Browser vendor owning a prefixed property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Vendor {
    Webkit,
    Mozilla,
    Microsoft,
    Opera,
}

impl Vendor {
    fn from_prefix(name: &str) -> Option<(Vendor, &str)> {
        for (prefix, vendor) in [
            ("-webkit-", Vendor::Webkit),
            ("-moz-", Vendor::Mozilla),
            ("-ms-", Vendor::Microsoft),
            ("-o-", Vendor::Opera),
        ] {
            if let Some(rest) = name.strip_prefix(prefix) {
                return Some((vendor, rest));
            }
        }
        None
    }
}

/// Everything the core knows about one property name.
#[derive(Debug, Clone)]
pub struct PropertyDescriptor {
    /// Canonical (lowercased) name, vendor prefix included.
    pub name: String,
    pub vendor: Option<Vendor>,
    /// Shorthand properties this property is a longhand of
    /// (e.g. `margin-top` → `margin`).
    pub shorthands: Vec<String>,
    /// Whether the value list follows the top/right/bottom/left pattern.
    pub has_positional_parameters: bool,
    /// Whether this is a custom (`--x`) property.
    pub is_custom: bool,
}

/// The registry contract consumed by the passes.
pub trait PropertyRegistry {
    fn lookup(&self, name: &str) -> PropertyDescriptor;
}

struct StaticEntry {
    shorthands: &'static [&'static str],
    positional: bool,
}

const fn entry(shorthands: &'static [&'static str], positional: bool) -> StaticEntry {
    StaticEntry {
        shorthands,
        positional,
    }
}

static PROPERTIES: Lazy<FxHashMap<&'static str, StaticEntry>> = Lazy::new(|| {
    let mut table: FxHashMap<&'static str, StaticEntry> = FxHashMap::default();

    table.insert("margin", entry(&[], true));
    table.insert("margin-top", entry(&["margin"], false));
    table.insert("margin-right", entry(&["margin"], false));
    table.insert("margin-bottom", entry(&["margin"], false));
    table.insert("margin-left", entry(&["margin"], false));

    table.insert("padding", entry(&[], true));
    table.insert("padding-top", entry(&["padding"], false));
    table.insert("padding-right", entry(&["padding"], false));
    table.insert("padding-bottom", entry(&["padding"], false));
    table.insert("padding-left", entry(&["padding"], false));

    table.insert("border", entry(&[], false));
    table.insert("border-width", entry(&["border"], true));
    table.insert("border-style", entry(&["border"], true));
    table.insert("border-color", entry(&["border"], true));
    table.insert("border-radius", entry(&[], true));
    table.insert("border-top", entry(&["border"], false));
    table.insert("border-right", entry(&["border"], false));
    table.insert("border-bottom", entry(&["border"], false));
    table.insert("border-left", entry(&["border"], false));
    table.insert(
        "border-top-width",
        entry(&["border-top", "border-width", "border"], false),
    );
    table.insert(
        "border-right-width",
        entry(&["border-right", "border-width", "border"], false),
    );
    table.insert(
        "border-bottom-width",
        entry(&["border-bottom", "border-width", "border"], false),
    );
    table.insert(
        "border-left-width",
        entry(&["border-left", "border-width", "border"], false),
    );
    table.insert(
        "border-top-style",
        entry(&["border-top", "border-style", "border"], false),
    );
    table.insert(
        "border-right-style",
        entry(&["border-right", "border-style", "border"], false),
    );
    table.insert(
        "border-bottom-style",
        entry(&["border-bottom", "border-style", "border"], false),
    );
    table.insert(
        "border-left-style",
        entry(&["border-left", "border-style", "border"], false),
    );
    table.insert(
        "border-top-color",
        entry(&["border-top", "border-color", "border"], false),
    );
    table.insert(
        "border-right-color",
        entry(&["border-right", "border-color", "border"], false),
    );
    table.insert(
        "border-bottom-color",
        entry(&["border-bottom", "border-color", "border"], false),
    );
    table.insert(
        "border-left-color",
        entry(&["border-left", "border-color", "border"], false),
    );

    table.insert("background", entry(&[], false));
    table.insert("background-color", entry(&["background"], false));
    table.insert("background-image", entry(&["background"], false));
    table.insert("background-repeat", entry(&["background"], false));
    table.insert("background-position", entry(&["background"], false));
    table.insert("background-attachment", entry(&["background"], false));

    table.insert("font", entry(&[], false));
    table.insert("font-family", entry(&["font"], false));
    table.insert("font-size", entry(&["font"], false));
    table.insert("font-style", entry(&["font"], false));
    table.insert("font-variant", entry(&["font"], false));
    table.insert("font-weight", entry(&["font"], false));
    table.insert("line-height", entry(&["font"], false));

    table.insert("list-style", entry(&[], false));
    table.insert("list-style-type", entry(&["list-style"], false));
    table.insert("list-style-position", entry(&["list-style"], false));
    table.insert("list-style-image", entry(&["list-style"], false));

    table.insert("outline", entry(&[], false));
    table.insert("outline-color", entry(&["outline"], false));
    table.insert("outline-style", entry(&["outline"], false));
    table.insert("outline-width", entry(&["outline"], false));

    table.insert("overflow", entry(&[], false));
    table.insert("overflow-x", entry(&["overflow"], false));
    table.insert("overflow-y", entry(&["overflow"], false));

    table
});

/// Registry over the built-in static table. Vendor prefixes are stripped
/// before the table lookup so `-moz-border-radius` inherits the structure
/// of `border-radius`.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultPropertyRegistry;

impl PropertyRegistry for DefaultPropertyRegistry {
    fn lookup(&self, name: &str) -> PropertyDescriptor {
        let canonical = name.to_ascii_lowercase();
        if canonical.starts_with("--") {
            return PropertyDescriptor {
                name: canonical,
                vendor: None,
                shorthands: Vec::new(),
                has_positional_parameters: false,
                is_custom: true,
            };
        }
        let (vendor, unprefixed) = match Vendor::from_prefix(&canonical) {
            Some((vendor, rest)) => (Some(vendor), rest),
            None => (None, canonical.as_str()),
        };
        let (shorthands, positional) = match PROPERTIES.get(unprefixed) {
            Some(entry) => (
                entry.shorthands.iter().map(|s| s.to_string()).collect(),
                entry.positional,
            ),
            None => (Vec::new(), false),
        };
        PropertyDescriptor {
            name: canonical.clone(),
            vendor,
            shorthands,
            has_positional_parameters: positional,
            is_custom: false,
        }
    }
}
