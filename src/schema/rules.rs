//! The template schema rule set
//!
//! Pure data, no behavior. Both the validator and the fixer read their
//! enumerations and mapping tables from here so the two engines cannot
//! drift apart.

/// Valid values for a property's `type` field.
pub const PROPERTY_TYPES: &[&str] = &[
    "text", "number", "boolean", "dropdown", "radio", "checkbox", "media", "image", "date",
    "time", "datetime", "location",
];

/// Recognized language codes, in fallback priority order.
///
/// `de` is the preferred default; when it is absent the fixer falls back to
/// the remaining codes in table order. The validator treats any other code
/// in a `translations` map as a soft issue, not an error.
pub const LANGUAGES: &[&str] = &["de", "en", "nb", "fr", "it", "es"];

/// The preferred default language.
pub const DEFAULT_LANGUAGE: &str = "de";

/// Superseded type aliases and their canonical replacements.
pub const TYPE_ALIASES: &[(&str, &str)] = &[
    ("multiselect", "checkbox"),
    ("select", "dropdown"),
    ("textarea", "text"),
];

/// Property types that require an `options` list.
pub const OPTION_TYPES: &[&str] = &["dropdown", "radio", "checkbox"];

/// Valid values for a media property's `mode` field.
pub const MEDIA_MODES: &[&str] = &["photo", "video", "any"];

/// Valid entries in a media property's `sources` list.
pub const MEDIA_SOURCES: &[&str] = &["camera", "library"];

/// Numeric bound fields on a number property.
pub const NUMBER_BOUNDS: &[&str] = &["min", "max", "step"];

/// Valid values for the `timeframe` field on exports and graphs.
pub const TIMEFRAMES: &[&str] = &["daily", "weekly", "monthly", "yearly"];

/// Valid values for a graph's `chartType` field.
pub const CHART_TYPES: &[&str] = &["bar", "line", "pie", "doughnut", "area"];

/// Valid values for a graph's `scope` field.
pub const GRAPH_SCOPES: &[&str] = &["all", "per-object", "perObject"];

/// Valid values for a data series' `type` field.
pub const SERIES_TYPES: &[&str] = &["value", "occurrence", "count"];

/// Valid values for a formula element's `operator` field.
pub const FORMULA_OPERATORS: &[&str] = &["+", "-", "*", "/"];

/// Top-level document fields that carry TranslatedText. Export repair
/// visits them in this order.
pub const TRANSLATED_FIELDS: &[&str] = &["title", "name", "description", "unit"];

/// Look up the canonical type for a superseded alias.
pub fn canonical_type(alias: &str) -> Option<&'static str> {
    TYPE_ALIASES
        .iter()
        .find(|(from, _)| *from == alias)
        .map(|(_, to)| *to)
}

/// Whether `code` is a recognized language code.
pub fn is_language(code: &str) -> bool {
    LANGUAGES.contains(&code)
}
