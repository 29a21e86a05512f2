//! Template validation with accumulated error and warning records
//!
//! The validator walks the four zones of a template tree and checks every
//! document against the rule set in [`crate::schema::rules`]. It never
//! prints; it returns a [`ValidationReport`] and leaves rendering to the
//! CLI layer.

use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::path::Path;

use crate::core::{load_document, Layout, Zone};
use crate::schema::rules;

/// A single validation issue (error or warning), scoped to one file.
#[derive(Debug, Clone, Serialize)]
pub struct Issue {
    pub file: String,
    pub message: String,
}

/// Result of a full validation run.
///
/// A run passes iff no errors were recorded; warnings never affect the
/// verdict.
#[derive(Debug, Default, Serialize)]
pub struct ValidationReport {
    pub errors: Vec<Issue>,
    pub warnings: Vec<Issue>,
}

impl ValidationReport {
    pub fn passed(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Format a JSON value for inclusion in a diagnostic message.
///
/// Strings render bare; everything else falls back to its JSON form.
fn display(value: &Value) -> String {
    match value.as_str() {
        Some(s) => s.to_string(),
        None => value.to_string(),
    }
}

/// The validation engine.
pub struct TemplateValidator<'a> {
    layout: &'a Layout,
    report: ValidationReport,
}

impl<'a> TemplateValidator<'a> {
    pub fn new(layout: &'a Layout) -> Self {
        Self {
            layout,
            report: ValidationReport::default(),
        }
    }

    /// Run all validations and return the accumulated report.
    pub fn run(mut self) -> ValidationReport {
        self.check_structure();
        self.check_object();
        self.check_reports();
        self.check_exports();
        self.check_graphs();
        self.report
    }

    fn error(&mut self, file: impl Into<String>, message: impl Into<String>) {
        self.report.errors.push(Issue {
            file: file.into(),
            message: message.into(),
        });
    }

    fn warning(&mut self, file: impl Into<String>, message: impl Into<String>) {
        self.report.warnings.push(Issue {
            file: file.into(),
            message: message.into(),
        });
    }

    /// Load a document, converting a read/parse failure into one error
    /// record. Returns the document and its root-relative path.
    fn load(&mut self, path: &Path) -> Option<(Value, String)> {
        let rel = self.layout.rel(path);
        match load_document(path) {
            Ok(value) => Some((value, rel)),
            Err(e) => {
                self.error(rel, e.to_string());
                None
            }
        }
    }

    /// Each required zone directory must exist. One error per missing zone;
    /// the zone walkers stay silent about directories reported here.
    fn check_structure(&mut self) {
        for zone in Zone::all() {
            if !zone.required() {
                continue;
            }
            let path = self.layout.zone_path(*zone);
            if !path.exists() {
                self.error(zone.name(), "Required directory does not exist");
            } else if !path.is_dir() {
                self.error(zone.name(), "Must be a directory");
            }
        }
    }

    /// `object.json`: a flat mapping from property id to a property
    /// definition without the `id` field. The file itself is optional.
    fn check_object(&mut self) {
        let path = self.layout.zone_path(Zone::Object);
        if !path.exists() {
            self.warning(Zone::Object.name(), "File does not exist");
            return;
        }
        let Some((data, rel)) = self.load(&path) else {
            return;
        };
        let Some(map) = data.as_object() else {
            self.error(rel, "Must be a JSON object");
            return;
        };
        for (prop_id, prop_def) in map {
            let Some(prop) = prop_def.as_object() else {
                self.error(&rel, format!("Property '{prop_id}' must be an object"));
                continue;
            };
            self.check_property_def(prop, prop_id, &format!("{prop_id}.label"), &rel);
        }
    }

    /// `report/*.json` are categories; each category with a directory named
    /// after its id owns the actions inside it.
    fn check_reports(&mut self) {
        let dir = self.layout.zone_path(Zone::Report);
        if !dir.is_dir() {
            return;
        }
        for category_file in self.layout.json_files_in(&dir) {
            let Some(category_id) = self.check_report_category(&category_file) else {
                continue;
            };
            let action_dir = dir.join(&category_id);
            if !action_dir.is_dir() {
                continue;
            }
            let action_files = self.layout.json_files_in(&action_dir);
            if action_files.is_empty() {
                self.warning(
                    format!("report/{category_id}/"),
                    "Category has directory but no action files",
                );
            }
            for action_file in action_files {
                self.check_report_action(&action_file);
            }
        }
    }

    /// Returns the category id so the caller can look for its action
    /// directory. A category without a usable id is not walked further.
    fn check_report_category(&mut self, path: &Path) -> Option<String> {
        let (data, rel) = self.load(path)?;
        let Some(map) = data.as_object() else {
            self.error(rel, "Must be a JSON object");
            return None;
        };
        let Some(id) = map.get("id") else {
            self.error(rel, "Missing required field 'id'");
            return None;
        };

        match map.get("name") {
            None => self.error(&rel, "Missing required field 'name'"),
            Some(name) => self.check_translated_text(name, "name", &rel),
        }
        self.check_visibility_filter(map, &rel);
        self.check_bound_properties(map, &rel);

        id.as_str().map(|s| s.to_string())
    }

    fn check_report_action(&mut self, path: &Path) {
        let Some((data, rel)) = self.load(path) else {
            return;
        };
        let Some(map) = data.as_object() else {
            self.error(rel, "Must be a JSON object");
            return;
        };
        if !map.contains_key("id") {
            self.error(rel, "Missing required field 'id'");
            return;
        }

        match map.get("name") {
            None => self.error(&rel, "Missing required field 'name'"),
            Some(name) => self.check_translated_text(name, "name", &rel),
        }

        if let Some(icon) = map.get("icon") {
            if !icon.is_string() {
                self.error(&rel, "'icon' must be a string");
            }
        }

        if let Some(properties) = map.get("properties") {
            match properties.as_array() {
                None => self.error(&rel, "'properties' must be an array"),
                Some(list) => self.check_properties(list, &rel),
            }
        }

        self.check_visibility_filter(map, &rel);
        self.check_bound_properties(map, &rel);
    }

    fn check_visibility_filter(&mut self, map: &Map<String, Value>, file: &str) {
        if let Some(filter) = map.get("visibilityFilter") {
            if !filter.is_null() && !filter.is_object() {
                self.error(file, "'visibilityFilter' must be null or object");
            }
        }
    }

    fn check_bound_properties(&mut self, map: &Map<String, Value>, file: &str) {
        if let Some(bound) = map.get("boundToProperties") {
            if !bound.is_array() {
                self.error(file, "'boundToProperties' must be an array");
            }
        }
    }

    /// A property list, as found on report actions. Duplicate ids are
    /// detected first-seen-wins, in list order.
    fn check_properties(&mut self, properties: &[Value], file: &str) {
        let mut property_ids: HashSet<String> = HashSet::new();

        for (i, prop) in properties.iter().enumerate() {
            let Some(map) = prop.as_object() else {
                self.error(file, format!("Property at index {i} must be an object"));
                continue;
            };
            let Some(id) = map.get("id") else {
                self.error(file, format!("Property at index {i} missing 'id'"));
                continue;
            };
            let prop_id = display(id);
            if !property_ids.insert(prop_id.clone()) {
                self.error(file, format!("Duplicate property ID '{prop_id}'"));
            }

            self.check_property_def(map, &prop_id, &format!("properties[{i}].label"), file);
        }
    }

    /// The rules shared between property-list entries and `object.json`
    /// entries: type, label, and the type-conditional fields.
    fn check_property_def(
        &mut self,
        prop: &Map<String, Value>,
        prop_id: &str,
        label_field: &str,
        file: &str,
    ) {
        let Some(prop_type) = prop.get("type") else {
            self.error(file, format!("Property '{prop_id}' missing 'type'"));
            return;
        };
        let type_name = prop_type.as_str().unwrap_or_default();
        if !rules::PROPERTY_TYPES.contains(&type_name) {
            self.error(
                file,
                format!(
                    "Property '{prop_id}' has invalid type '{}'",
                    display(prop_type)
                ),
            );
        }

        match prop.get("label") {
            None => self.error(file, format!("Property '{prop_id}' missing 'label'")),
            Some(label) => self.check_translated_text(label, label_field, file),
        }

        if rules::OPTION_TYPES.contains(&type_name) {
            match prop.get("options") {
                None => self.error(
                    file,
                    format!("Property '{prop_id}' with type '{type_name}' must have 'options'"),
                ),
                Some(options) => match options.as_array() {
                    None => self.error(file, format!("Property '{prop_id}.options' must be an array")),
                    Some(list) => self.check_options(list, prop_id, file),
                },
            }
        }

        if type_name == "media" {
            if let Some(mode) = prop.get("mode") {
                if !rules::MEDIA_MODES.contains(&mode.as_str().unwrap_or_default()) {
                    self.error(
                        file,
                        format!("Property '{prop_id}' has invalid mode '{}'", display(mode)),
                    );
                }
            }
            if let Some(sources) = prop.get("sources") {
                match sources.as_array() {
                    None => self.error(file, format!("Property '{prop_id}.sources' must be an array")),
                    Some(list) => {
                        for source in list {
                            if !rules::MEDIA_SOURCES.contains(&source.as_str().unwrap_or_default()) {
                                self.error(
                                    file,
                                    format!(
                                        "Property '{prop_id}' has invalid source '{}'",
                                        display(source)
                                    ),
                                );
                            }
                        }
                    }
                }
            }
        }

        if type_name == "number" {
            for field in rules::NUMBER_BOUNDS {
                if let Some(bound) = prop.get(*field) {
                    if !bound.is_number() {
                        self.error(file, format!("Property '{prop_id}.{field}' must be a number"));
                    }
                }
            }
        }
    }

    fn check_options(&mut self, options: &[Value], prop_id: &str, file: &str) {
        let mut option_ids: HashSet<String> = HashSet::new();

        for (i, option) in options.iter().enumerate() {
            let Some(map) = option.as_object() else {
                self.error(
                    file,
                    format!("Option at index {i} in property '{prop_id}' must be an object"),
                );
                continue;
            };
            let Some(id) = map.get("id") else {
                self.error(
                    file,
                    format!("Option at index {i} in property '{prop_id}' missing 'id'"),
                );
                continue;
            };
            let option_id = display(id);
            if !option_ids.insert(option_id.clone()) {
                self.error(
                    file,
                    format!("Duplicate option ID '{option_id}' in property '{prop_id}'"),
                );
            }

            match map.get("label") {
                None => self.error(
                    file,
                    format!("Option '{option_id}' in property '{prop_id}' missing 'label'"),
                ),
                Some(label) => self.check_translated_text(
                    label,
                    &format!("{prop_id}.options[{i}].label"),
                    file,
                ),
            }
        }
    }

    /// TranslatedText: a plain string, or an object carrying a string
    /// `default` and optionally a `translations` map of strings. Unknown
    /// language codes are soft issues; non-string translation values are
    /// errors and stop checking of that field.
    fn check_translated_text(&mut self, value: &Value, field_name: &str, file: &str) {
        if value.is_string() {
            return;
        }
        let Some(map) = value.as_object() else {
            self.error(file, format!("'{field_name}' must be string or object"));
            return;
        };

        match map.get("default") {
            None => {
                self.error(file, format!("'{field_name}' object must have 'default' field"));
                return;
            }
            Some(default) => {
                if !default.is_string() {
                    self.error(file, format!("'{field_name}.default' must be a string"));
                    return;
                }
            }
        }

        if let Some(translations) = map.get("translations") {
            let Some(entries) = translations.as_object() else {
                self.error(file, format!("'{field_name}.translations' must be an object"));
                return;
            };
            for (lang, text) in entries {
                if !rules::is_language(lang) {
                    self.warning(file, format!("Unknown language code '{lang}' in {field_name}"));
                }
                if !text.is_string() {
                    self.error(file, format!("Translation for '{lang}' must be a string"));
                    return;
                }
            }
        }
    }

    /// `export/**/*.json`, recursively.
    fn check_exports(&mut self) {
        let dir = self.layout.zone_path(Zone::Export);
        if !dir.is_dir() {
            return;
        }
        for file in self.layout.json_files_under(&dir) {
            self.check_export_node(&file);
        }
    }

    fn check_export_node(&mut self, path: &Path) {
        let Some((data, rel)) = self.load(path) else {
            return;
        };
        let Some(map) = data.as_object() else {
            self.error(rel, "Must be a JSON object");
            return;
        };

        if !map.contains_key("id") {
            self.error(&rel, "Missing required field 'id'");
        }

        match map.get("title") {
            None => self.error(&rel, "Missing required field 'title'"),
            Some(title) => self.check_translated_text(title, "title", &rel),
        }

        if let Some(timeframe) = map.get("timeframe") {
            if !rules::TIMEFRAMES.contains(&timeframe.as_str().unwrap_or_default()) {
                self.error(&rel, format!("Invalid timeframe '{}'", display(timeframe)));
            }
        }

        if let Some(formula) = map.get("formula") {
            match formula.as_array() {
                None => self.error(&rel, "'formula' must be an array"),
                Some(elements) => self.check_formula(elements, &rel),
            }
        }
    }

    fn check_formula(&mut self, formula: &[Value], file: &str) {
        for (i, element) in formula.iter().enumerate() {
            let Some(map) = element.as_object() else {
                self.error(file, format!("Formula element at index {i} must be an object"));
                continue;
            };
            // The element id is only used to name follow-up diagnostics.
            let element_id = map.get("id").map(display).unwrap_or_else(|| i.to_string());
            if !map.contains_key("id") {
                self.error(file, format!("Formula element at index {i} missing 'id'"));
            }
            let Some(element_type) = map.get("type") else {
                self.error(file, format!("Formula element at index {i} missing 'type'"));
                continue;
            };

            match element_type.as_str().unwrap_or_default() {
                "occurrence" => {
                    for field in ["categoryId", "actionId"] {
                        if !map.contains_key(field) {
                            self.error(
                                file,
                                format!(
                                    "Formula element '{element_id}' of type 'occurrence' missing '{field}'"
                                ),
                            );
                        }
                    }
                }
                "value" => {
                    for field in ["categoryId", "actionId", "propertyId"] {
                        if !map.contains_key(field) {
                            self.error(
                                file,
                                format!(
                                    "Formula element '{element_id}' of type 'value' missing '{field}'"
                                ),
                            );
                        }
                    }
                }
                "operator" => match map.get("operator") {
                    None => self.error(
                        file,
                        format!("Formula element '{element_id}' of type 'operator' missing 'operator'"),
                    ),
                    Some(op) => {
                        if !rules::FORMULA_OPERATORS.contains(&op.as_str().unwrap_or_default()) {
                            self.error(file, format!("Invalid operator '{}'", display(op)));
                        }
                    }
                },
                _ => self.error(
                    file,
                    format!(
                        "Invalid formula element type '{}'",
                        display(element_type)
                    ),
                ),
            }
        }
    }

    /// `graph/**/*.json`, recursively.
    fn check_graphs(&mut self) {
        let dir = self.layout.zone_path(Zone::Graph);
        if !dir.is_dir() {
            return;
        }
        for file in self.layout.json_files_under(&dir) {
            self.check_graph_node(&file);
        }
    }

    fn check_graph_node(&mut self, path: &Path) {
        let Some((data, rel)) = self.load(path) else {
            return;
        };
        let Some(map) = data.as_object() else {
            self.error(rel, "Must be a JSON object");
            return;
        };

        if !map.contains_key("id") {
            self.error(&rel, "Missing required field 'id'");
        }

        match map.get("title") {
            None => self.error(&rel, "Missing required field 'title'"),
            Some(title) => self.check_translated_text(title, "title", &rel),
        }

        if let Some(chart_type) = map.get("chartType") {
            if !rules::CHART_TYPES.contains(&chart_type.as_str().unwrap_or_default()) {
                self.error(&rel, format!("Invalid chartType '{}'", display(chart_type)));
            }
        }

        if let Some(timeframe) = map.get("timeframe") {
            if !rules::TIMEFRAMES.contains(&timeframe.as_str().unwrap_or_default()) {
                self.error(&rel, format!("Invalid timeframe '{}'", display(timeframe)));
            }
        }

        if let Some(scope) = map.get("scope") {
            if !rules::GRAPH_SCOPES.contains(&scope.as_str().unwrap_or_default()) {
                self.error(&rel, format!("Invalid scope '{}'", display(scope)));
            }
        }

        if let Some(series) = map.get("dataSeries") {
            match series.as_array() {
                None => self.error(&rel, "'dataSeries' must be an array"),
                Some(list) => self.check_data_series(list, &rel),
            }
        }
    }

    fn check_data_series(&mut self, data_series: &[Value], file: &str) {
        let mut series_ids: HashSet<String> = HashSet::new();

        for (i, series) in data_series.iter().enumerate() {
            let Some(map) = series.as_object() else {
                self.error(file, format!("Data series at index {i} must be an object"));
                continue;
            };
            let Some(id) = map.get("id") else {
                self.error(file, format!("Data series at index {i} missing 'id'"));
                continue;
            };
            let series_id = display(id);
            if !series_ids.insert(series_id.clone()) {
                self.error(file, format!("Duplicate series ID '{series_id}'"));
            }

            let Some(series_type) = map.get("type") else {
                self.error(file, format!("Data series '{series_id}' missing 'type'"));
                continue;
            };
            if !rules::SERIES_TYPES.contains(&series_type.as_str().unwrap_or_default()) {
                self.error(
                    file,
                    format!(
                        "Data series '{series_id}' has invalid type '{}'",
                        display(series_type)
                    ),
                );
            }

            for field in ["categoryId", "actionId"] {
                if !map.contains_key(field) {
                    self.error(file, format!("Data series '{series_id}' missing '{field}'"));
                }
            }

            if let Some(label) = map.get("label") {
                if !label.is_string() {
                    self.error(file, format!("Data series '{series_id}' label must be a string"));
                }
            }

            if let Some(color) = map.get("color") {
                let well_formed = color
                    .as_str()
                    .map_or(false, |c| c.starts_with('#') || c.starts_with("rgb"));
                if !well_formed {
                    self.warning(
                        file,
                        format!("Data series '{series_id}' color should be hex or rgb format"),
                    );
                }
            }
        }
    }
}
