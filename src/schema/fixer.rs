//! Deterministic auto-repair of known-recoverable template documents
//!
//! The fixer walks `object.json`, the `report` zone, and the `export` zone
//! (graphs are never touched), applies the normalization transforms from the
//! rule set, and rewrites a file only when at least one transform changed
//! it. Every atomic change is recorded as one [`FixEvent`]; a second pass
//! over an already-fixed tree produces zero events.

use serde::Serialize;
use serde_json::{json, Map, Value};
use std::path::Path;

use crate::core::{load_document, write_document, Layout, Zone};
use crate::schema::rules;

/// One atomic, counted correction applied to a single field or element.
#[derive(Debug, Clone, Serialize)]
pub struct FixEvent {
    pub file: String,
    pub detail: String,
}

/// A per-file failure that did not stop the run.
#[derive(Debug, Clone, Serialize)]
pub struct FixFailure {
    pub file: String,
    pub message: String,
}

/// Result of a full fixer run.
#[derive(Debug, Default, Serialize)]
pub struct FixReport {
    pub events: Vec<FixEvent>,
    pub modified_files: Vec<String>,
    pub failures: Vec<FixFailure>,
    /// Every file visited, including clean ones and ones that failed to load.
    pub files_processed: usize,
}

impl FixReport {
    pub fn fixes_applied(&self) -> usize {
        self.events.len()
    }

    pub fn files_modified(&self) -> usize {
        self.modified_files.len()
    }
}

/// Which transform set applies to a document.
#[derive(Debug, Clone, Copy)]
enum DocumentKind {
    Object,
    Report,
    Export,
}

/// How a missing TranslatedText `default` gets injected.
enum Injection {
    /// Add a `default` entry, leaving the rest of the object alone.
    Field(Value),
    /// Replace the whole value with a rebuilt `{default[, translations]}`.
    Whole(Value),
}

/// The fixer engine.
pub struct TemplateFixer<'a> {
    layout: &'a Layout,
    dry_run: bool,
    report: FixReport,
}

impl<'a> TemplateFixer<'a> {
    pub fn new(layout: &'a Layout, dry_run: bool) -> Self {
        Self {
            layout,
            dry_run,
            report: FixReport::default(),
        }
    }

    /// Apply all transforms across the tree and return the accumulated
    /// report. In dry-run mode nothing is written, but intended changes are
    /// still recorded and counted.
    pub fn run(mut self) -> FixReport {
        let object_path = self.layout.zone_path(Zone::Object);
        if object_path.exists() {
            self.process(&object_path, DocumentKind::Object);
        }

        let report_dir = self.layout.zone_path(Zone::Report);
        if report_dir.is_dir() {
            for file in self.layout.json_files_under(&report_dir) {
                self.process(&file, DocumentKind::Report);
            }
        }

        let export_dir = self.layout.zone_path(Zone::Export);
        if export_dir.is_dir() {
            for file in self.layout.json_files_under(&export_dir) {
                self.process(&file, DocumentKind::Export);
            }
        }

        self.report
    }

    fn event(&mut self, file: &str, detail: String) {
        self.report.events.push(FixEvent {
            file: file.to_string(),
            detail,
        });
    }

    /// Load, transform, and (if anything changed) rewrite one document.
    /// Read and write failures are recorded and the run continues.
    fn process(&mut self, path: &Path, kind: DocumentKind) {
        self.report.files_processed += 1;
        let rel = self.layout.rel(path);
        let mut doc = match load_document(path) {
            Ok(doc) => doc,
            Err(e) => {
                self.report.failures.push(FixFailure {
                    file: rel,
                    message: e.to_string(),
                });
                return;
            }
        };

        let before = self.report.events.len();
        if let Some(map) = doc.as_object_mut() {
            match kind {
                DocumentKind::Object => self.fix_object_document(map, &rel),
                DocumentKind::Report => self.fix_report_document(map, &rel),
                DocumentKind::Export => self.fix_export_document(map, &rel),
            }
        }
        if self.report.events.len() == before {
            return;
        }

        self.report.modified_files.push(rel.clone());
        if !self.dry_run {
            if let Err(e) = write_document(path, &doc) {
                self.report.failures.push(FixFailure {
                    file: rel,
                    message: e.to_string(),
                });
            }
        }
    }

    /// `object.json`: every object-valued entry is a property definition
    /// keyed by its id; the full per-property transform set applies.
    fn fix_object_document(&mut self, map: &mut Map<String, Value>, file: &str) {
        for (prop_id, prop_def) in map.iter_mut() {
            let prop_id = prop_id.clone();
            if let Some(prop) = prop_def.as_object_mut() {
                self.fix_property(prop, &prop_id, &prop_id, file);
            }
        }
    }

    /// Report categories and actions: top-level TranslatedText fields, then
    /// the property list.
    fn fix_report_document(&mut self, map: &mut Map<String, Value>, file: &str) {
        for field in ["name", "description"] {
            if let Some(value) = map.get_mut(field) {
                self.fix_translated_text(value, field, file);
            }
        }

        if let Some(Value::Array(properties)) = map.get_mut("properties") {
            for (i, prop) in properties.iter_mut().enumerate() {
                if let Some(prop) = prop.as_object_mut() {
                    self.fix_property(prop, &format!("index_{i}"), &format!("properties[{i}]"), file);
                }
            }
        }
    }

    /// Export nodes: synthesize a missing title, then inject defaults into
    /// the top-level TranslatedText fields.
    fn fix_export_document(&mut self, map: &mut Map<String, Value>, file: &str) {
        if !map.contains_key("title") {
            if let Some(name) = map.get("name").cloned() {
                map.insert("title".to_string(), name);
                self.event(file, "Added 'title' field (copied from 'name')".to_string());
            } else if let Some(id) = map.get("id").and_then(Value::as_str) {
                let title = title_case(&id.replace(['-', '_'], " "));
                map.insert("title".to_string(), json!(title));
                self.event(
                    file,
                    format!("Added 'title' field (generated from id: '{title}')"),
                );
            }
        }

        for field in rules::TRANSLATED_FIELDS {
            if let Some(value) = map.get_mut(*field) {
                self.fix_translated_text(value, field, file);
            }
        }
    }

    /// The per-property transform sequence: type remap, checkbox demotion,
    /// TranslatedText injection on label/placeholder/unit, then option id
    /// synthesis and option label injection.
    fn fix_property(
        &mut self,
        prop: &mut Map<String, Value>,
        fallback_id: &str,
        field_prefix: &str,
        file: &str,
    ) {
        let prop_id = prop
            .get("id")
            .and_then(Value::as_str)
            .unwrap_or(fallback_id)
            .to_string();

        if let Some(old_type) = prop.get("type").and_then(Value::as_str) {
            if let Some(new_type) = rules::canonical_type(old_type) {
                let detail = format!("Property '{prop_id}' type '{old_type}' -> '{new_type}'");
                prop.insert("type".to_string(), json!(new_type));
                self.event(file, detail);
            }
        }

        // A checkbox without a fixed option set is semantically a toggle.
        // "Without" covers any empty or false-ish value, not just a
        // missing key or an empty array.
        if prop.get("type").and_then(Value::as_str) == Some("checkbox") {
            let options_empty = match prop.get("options") {
                None | Some(Value::Null) => true,
                Some(Value::Bool(flag)) => !flag,
                Some(Value::Number(n)) => n.as_f64() == Some(0.0),
                Some(Value::String(s)) => s.is_empty(),
                Some(Value::Array(options)) => options.is_empty(),
                Some(Value::Object(options)) => options.is_empty(),
            };
            if options_empty {
                prop.insert("type".to_string(), json!("boolean"));
                self.event(
                    file,
                    format!("Property '{prop_id}' type 'checkbox' -> 'boolean' (no options)"),
                );
            }
        }

        for field in ["label", "placeholder", "unit"] {
            if let Some(value) = prop.get_mut(field) {
                self.fix_translated_text(value, &format!("{field_prefix}.{field}"), file);
            }
        }

        if let Some(Value::Array(options)) = prop.get_mut("options") {
            for (j, option) in options.iter_mut().enumerate() {
                let Some(option) = option.as_object_mut() else {
                    continue;
                };
                if !option.contains_key("id") {
                    let option_id = match option.get("value").cloned() {
                        Some(value) => value,
                        None => json!(format!("option_{j}")),
                    };
                    let shown = option_id
                        .as_str()
                        .map(str::to_string)
                        .unwrap_or_else(|| option_id.to_string());
                    option.insert("id".to_string(), option_id);
                    self.event(
                        file,
                        format!("Added 'id' to option in property '{prop_id}' (id='{shown}')"),
                    );
                }
                if let Some(label) = option.get_mut("label") {
                    self.fix_translated_text(
                        label,
                        &format!("{field_prefix}.options[{j}].label"),
                        file,
                    );
                }
            }
        }
    }

    fn fix_translated_text(&mut self, value: &mut Value, field_path: &str, file: &str) {
        if let Some(detail) = fix_translated_text_value(value, field_path) {
            self.event(file, detail);
        }
    }
}

/// Inject a missing `default` into a value that structurally looks like a
/// TranslatedText object. Returns the event detail if anything changed.
///
/// Detection is deliberately duck-typed (a `translations` key, or any direct
/// recognized-language key); incidental objects carrying such a key are
/// treated the same way the original data always was.
fn fix_translated_text_value(value: &mut Value, field_path: &str) -> Option<String> {
    let injection = {
        let map = value.as_object()?;
        let looks_translated = map.contains_key("translations")
            || map.keys().any(|key| rules::is_language(key));
        if !looks_translated || map.contains_key("default") {
            return None;
        }
        plan_injection(map)?
    };

    match injection {
        Injection::Field(default) => {
            if let Some(map) = value.as_object_mut() {
                map.insert("default".to_string(), default);
            }
        }
        Injection::Whole(rebuilt) => *value = rebuilt,
    }
    Some(format!("Added 'default' to {field_path}"))
}

/// Decide where the synthesized `default` comes from.
fn plan_injection(map: &Map<String, Value>) -> Option<Injection> {
    // Prefer the translations map: its default-language entry, else its
    // first entry in insertion order.
    if let Some(translations) = map.get("translations").and_then(Value::as_object) {
        let from_translations = translations
            .get(rules::DEFAULT_LANGUAGE)
            .or_else(|| translations.values().next());
        if let Some(default) = from_translations {
            return Some(Injection::Field(default.clone()));
        }
    }

    // A direct default-language key rebuilds the whole object, relocating
    // the other recognized language keys under `translations`. Anything
    // else in the flat object is dropped.
    if let Some(default) = map.get(rules::DEFAULT_LANGUAGE) {
        let mut rebuilt = Map::new();
        rebuilt.insert("default".to_string(), default.clone());
        let translations: Map<String, Value> = map
            .iter()
            .filter(|(key, _)| rules::is_language(key) && key.as_str() != rules::DEFAULT_LANGUAGE)
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        if !translations.is_empty() {
            rebuilt.insert("translations".to_string(), Value::Object(translations));
        }
        return Some(Injection::Whole(Value::Object(rebuilt)));
    }

    // Otherwise the first present language key in priority order, left in
    // place alongside the new default.
    for lang in rules::LANGUAGES {
        if *lang == rules::DEFAULT_LANGUAGE {
            continue;
        }
        if let Some(default) = map.get(*lang) {
            return Some(Injection::Field(default.clone()));
        }
    }

    None
}

/// Title-case a string: the first letter of every alphabetic run is
/// uppercased, the rest lowercased.
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_alphabetic = false;
    for ch in s.chars() {
        if ch.is_alphabetic() {
            if prev_alphabetic {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            prev_alphabetic = true;
        } else {
            out.push(ch);
            prev_alphabetic = false;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::{tempdir, TempDir};

    fn setup_tree() -> (TempDir, PathBuf) {
        let tmp = tempdir().unwrap();
        let root = tmp.path().to_path_buf();
        for dir in ["report", "export", "graph"] {
            fs::create_dir(root.join(dir)).unwrap();
        }
        (tmp, root)
    }

    fn write_json(path: &Path, value: &Value) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, serde_json::to_string_pretty(value).unwrap()).unwrap();
    }

    fn read_json(path: &Path) -> Value {
        serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
    }

    fn fix(root: &Path, dry_run: bool) -> FixReport {
        let layout = Layout::open(root).unwrap();
        TemplateFixer::new(&layout, dry_run).run()
    }

    #[test]
    fn test_flat_language_label_restructured() {
        let (_tmp, root) = setup_tree();
        let path = root.join("report/c/a.json");
        write_json(
            &path,
            &json!({
                "id": "a",
                "name": "A",
                "properties": [
                    {"id": "p", "type": "text", "label": {"de": "Ja", "en": "Yes"}}
                ]
            }),
        );

        let report = fix(&root, false);
        assert_eq!(report.fixes_applied(), 1);
        assert_eq!(report.events[0].detail, "Added 'default' to properties[0].label");

        let doc = read_json(&path);
        assert_eq!(
            doc["properties"][0]["label"],
            json!({"default": "Ja", "translations": {"en": "Yes"}})
        );
    }

    #[test]
    fn test_flat_de_only_label_has_no_translations() {
        let (_tmp, root) = setup_tree();
        let path = root.join("report/a.json");
        write_json(&path, &json!({"id": "a", "name": {"de": "Bericht"}}));

        fix(&root, false);
        assert_eq!(read_json(&path)["name"], json!({"default": "Bericht"}));
    }

    #[test]
    fn test_default_pulled_from_translations() {
        let (_tmp, root) = setup_tree();
        let path = root.join("report/a.json");
        write_json(
            &path,
            &json!({"id": "a", "name": {"translations": {"en": "Report", "nb": "Rapport"}}}),
        );

        let report = fix(&root, false);
        assert_eq!(report.fixes_applied(), 1);
        // No `de` entry, so the first translation wins; the translations
        // map stays in place.
        assert_eq!(
            read_json(&path)["name"],
            json!({"translations": {"en": "Report", "nb": "Rapport"}, "default": "Report"})
        );
    }

    #[test]
    fn test_fallback_language_leaves_flat_keys() {
        let (_tmp, root) = setup_tree();
        let path = root.join("report/a.json");
        write_json(&path, &json!({"id": "a", "name": {"nb": "Rapport"}}));

        fix(&root, false);
        assert_eq!(
            read_json(&path)["name"],
            json!({"nb": "Rapport", "default": "Rapport"})
        );
    }

    #[test]
    fn test_object_without_language_data_untouched() {
        let (_tmp, root) = setup_tree();
        let path = root.join("report/a.json");
        let doc = json!({"id": "a", "name": {"value": "not translated"}});
        write_json(&path, &doc);

        let report = fix(&root, false);
        assert_eq!(report.fixes_applied(), 0);
        assert!(report.modified_files.is_empty());
        assert_eq!(read_json(&path), doc);
    }

    #[test]
    fn test_object_with_default_untouched() {
        let (_tmp, root) = setup_tree();
        let path = root.join("report/a.json");
        let doc = json!({"id": "a", "name": {"default": "A", "translations": {"de": "A"}}});
        write_json(&path, &doc);

        let report = fix(&root, false);
        assert_eq!(report.fixes_applied(), 0);
    }

    #[test]
    fn test_type_remap_table() {
        let (_tmp, root) = setup_tree();
        let path = root.join("report/c/a.json");
        write_json(
            &path,
            &json!({
                "id": "a",
                "properties": [
                    {"id": "p1", "type": "select", "label": "P1"},
                    {"id": "p2", "type": "textarea", "label": "P2"},
                    {"id": "p3", "type": "text", "label": "P3"}
                ]
            }),
        );

        let report = fix(&root, false);
        assert_eq!(report.fixes_applied(), 2);

        let doc = read_json(&path);
        assert_eq!(doc["properties"][0]["type"], "dropdown");
        assert_eq!(doc["properties"][1]["type"], "text");
        assert_eq!(doc["properties"][2]["type"], "text");
    }

    #[test]
    fn test_multiselect_with_empty_options_becomes_boolean() {
        let (_tmp, root) = setup_tree();
        let path = root.join("report/c/a.json");
        write_json(
            &path,
            &json!({
                "id": "a",
                "properties": [{"id": "p1", "type": "multiselect", "options": []}]
            }),
        );

        let report = fix(&root, false);
        // Two events: the remap, then the demotion.
        assert_eq!(report.fixes_applied(), 2);
        assert_eq!(
            report.events[0].detail,
            "Property 'p1' type 'multiselect' -> 'checkbox'"
        );
        assert_eq!(
            report.events[1].detail,
            "Property 'p1' type 'checkbox' -> 'boolean' (no options)"
        );
        assert_eq!(read_json(&path)["properties"][0]["type"], "boolean");
    }

    #[test]
    fn test_checkbox_with_falsy_options_demoted() {
        let (_tmp, root) = setup_tree();
        let path = root.join("report/c/a.json");
        write_json(
            &path,
            &json!({
                "id": "a",
                "properties": [
                    {"id": "p1", "type": "checkbox", "label": "P1", "options": {}},
                    {"id": "p2", "type": "checkbox", "label": "P2", "options": ""},
                    {"id": "p3", "type": "checkbox", "label": "P3", "options": 0},
                    {"id": "p4", "type": "checkbox", "label": "P4", "options": false}
                ]
            }),
        );

        let report = fix(&root, false);
        assert_eq!(report.fixes_applied(), 4);

        let doc = read_json(&path);
        for i in 0..4 {
            assert_eq!(doc["properties"][i]["type"], "boolean");
        }
    }

    #[test]
    fn test_checkbox_with_options_not_demoted() {
        let (_tmp, root) = setup_tree();
        let path = root.join("report/c/a.json");
        write_json(
            &path,
            &json!({
                "id": "a",
                "properties": [
                    {"id": "p", "type": "checkbox", "label": "P",
                     "options": [{"id": "o", "label": "O"}]}
                ]
            }),
        );

        let report = fix(&root, false);
        assert_eq!(report.fixes_applied(), 0);
    }

    #[test]
    fn test_option_id_from_value_and_index() {
        let (_tmp, root) = setup_tree();
        let path = root.join("report/c/a.json");
        write_json(
            &path,
            &json!({
                "id": "a",
                "properties": [
                    {"id": "p", "type": "radio", "label": "P", "options": [
                        {"value": "red", "label": "Red"},
                        {"label": "Green"},
                        {"id": "blue", "label": "Blue"}
                    ]}
                ]
            }),
        );

        let report = fix(&root, false);
        assert_eq!(report.fixes_applied(), 2);
        assert_eq!(
            report.events[0].detail,
            "Added 'id' to option in property 'p' (id='red')"
        );
        assert_eq!(
            report.events[1].detail,
            "Added 'id' to option in property 'p' (id='option_1')"
        );

        let doc = read_json(&path);
        assert_eq!(doc["properties"][0]["options"][0]["id"], "red");
        assert_eq!(doc["properties"][0]["options"][1]["id"], "option_1");
        assert_eq!(doc["properties"][0]["options"][2]["id"], "blue");
    }

    #[test]
    fn test_export_title_copied_from_name() {
        let (_tmp, root) = setup_tree();
        let path = root.join("export/e.json");
        write_json(&path, &json!({"id": "e", "name": "Totals"}));

        let report = fix(&root, false);
        assert_eq!(report.fixes_applied(), 1);
        assert_eq!(
            report.events[0].detail,
            "Added 'title' field (copied from 'name')"
        );
        assert_eq!(read_json(&path)["title"], "Totals");
    }

    #[test]
    fn test_export_title_generated_from_id() {
        let (_tmp, root) = setup_tree();
        let path = root.join("export/monthly-summary.json");
        write_json(&path, &json!({"id": "monthly-summary"}));

        let report = fix(&root, false);
        assert_eq!(report.fixes_applied(), 1);
        assert_eq!(read_json(&path)["title"], "Monthly Summary");
    }

    #[test]
    fn test_export_without_name_or_id_untouched() {
        let (_tmp, root) = setup_tree();
        let path = root.join("export/e.json");
        write_json(&path, &json!({"timeframe": "daily"}));

        let report = fix(&root, false);
        assert_eq!(report.fixes_applied(), 0);
        assert!(!read_json(&path).as_object().unwrap().contains_key("title"));
    }

    #[test]
    fn test_export_synthesized_title_then_default_injected() {
        let (_tmp, root) = setup_tree();
        let path = root.join("export/e.json");
        write_json(&path, &json!({"id": "e", "name": {"de": "Summen"}}));

        let report = fix(&root, false);
        // Copy name into title, then inject defaults into both.
        assert_eq!(report.fixes_applied(), 3);

        let doc = read_json(&path);
        assert_eq!(doc["title"], json!({"default": "Summen"}));
        assert_eq!(doc["name"], json!({"default": "Summen"}));
    }

    #[test]
    fn test_export_defaults_injected_title_first() {
        let (_tmp, root) = setup_tree();
        let path = root.join("export/e.json");
        write_json(
            &path,
            &json!({
                "id": "e",
                "name": {"de": "Summen"},
                "unit": {"de": "kg"},
                "title": {"de": "Summen"}
            }),
        );

        let report = fix(&root, false);
        let details: Vec<_> = report.events.iter().map(|e| e.detail.as_str()).collect();
        assert_eq!(
            details,
            [
                "Added 'default' to title",
                "Added 'default' to name",
                "Added 'default' to unit"
            ]
        );
    }

    #[test]
    fn test_object_json_gets_full_transform_set() {
        let (_tmp, root) = setup_tree();
        let path = root.join("object.json");
        write_json(
            &path,
            &json!({
                "color": {"type": "select", "label": {"en": "Color"},
                          "options": [{"value": "red", "label": "Red"}]},
                "flag": {"type": "checkbox", "label": "Flag"}
            }),
        );

        let report = fix(&root, false);
        let details: Vec<_> = report.events.iter().map(|e| e.detail.as_str()).collect();
        assert!(details.contains(&"Property 'color' type 'select' -> 'dropdown'"));
        assert!(details.contains(&"Added 'default' to color.label"));
        assert!(details.contains(&"Added 'id' to option in property 'color' (id='red')"));
        assert!(details.contains(&"Property 'flag' type 'checkbox' -> 'boolean' (no options)"));
        assert_eq!(report.fixes_applied(), 4);

        let doc = read_json(&path);
        assert_eq!(doc["color"]["type"], "dropdown");
        assert_eq!(doc["flag"]["type"], "boolean");
    }

    #[test]
    fn test_graphs_never_touched() {
        let (_tmp, root) = setup_tree();
        let path = root.join("graph/g.json");
        let doc = json!({"id": "g", "title": {"de": "Graph"}});
        write_json(&path, &doc);

        let report = fix(&root, false);
        assert_eq!(report.fixes_applied(), 0);
        assert_eq!(read_json(&path), doc);
    }

    #[test]
    fn test_fix_is_idempotent() {
        let (_tmp, root) = setup_tree();
        write_json(
            &root.join("report/c/a.json"),
            &json!({
                "id": "a",
                "name": {"de": "Aktion", "en": "Action"},
                "properties": [
                    {"id": "p1", "type": "multiselect", "options": []},
                    {"id": "p2", "type": "radio", "label": {"en": "Pick"},
                     "options": [{"value": "a", "label": {"de": "A", "it": "A"}}]}
                ]
            }),
        );
        write_json(&root.join("export/e.json"), &json!({"id": "week_total"}));

        let first = fix(&root, false);
        assert!(first.fixes_applied() > 0);

        let second = fix(&root, false);
        assert_eq!(second.fixes_applied(), 0);
        assert!(second.modified_files.is_empty());
    }

    #[test]
    fn test_dry_run_counts_but_does_not_write() {
        let (_tmp, root) = setup_tree();
        let path = root.join("export/e.json");
        write_json(&path, &json!({"id": "monthly-summary"}));
        let before = fs::read_to_string(&path).unwrap();

        let report = fix(&root, true);
        assert_eq!(report.fixes_applied(), 1);
        assert_eq!(report.files_modified(), 1);
        assert_eq!(fs::read_to_string(&path).unwrap(), before);
    }

    #[test]
    fn test_malformed_file_recorded_and_run_continues() {
        let (_tmp, root) = setup_tree();
        fs::write(root.join("report/bad.json"), "{broken").unwrap();
        write_json(&root.join("report/ok.json"), &json!({"id": "ok", "name": {"de": "Ok"}}));

        let report = fix(&root, false);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].file, "report/bad.json");
        assert_eq!(report.fixes_applied(), 1);
        assert_eq!(report.files_processed, 2);
    }

    #[test]
    fn test_clean_files_counted_as_processed() {
        let (_tmp, root) = setup_tree();
        write_json(
            &root.join("report/clean.json"),
            &json!({"id": "c", "name": "Clean"}),
        );
        write_json(&root.join("export/e.json"), &json!({"id": "e", "name": "Totals"}));

        let report = fix(&root, false);
        assert_eq!(report.files_processed, 2);
        assert_eq!(report.files_modified(), 1);
        assert_eq!(report.modified_files, ["export/e.json"]);
    }

    #[test]
    fn test_written_file_has_trailing_newline_and_indent() {
        let (_tmp, root) = setup_tree();
        let path = root.join("export/e.json");
        write_json(&path, &json!({"id": "e", "name": "Totals"}));

        fix(&root, false);
        let written = fs::read_to_string(&path).unwrap();
        assert!(written.ends_with("}\n"));
        assert!(written.contains("\n  \"id\""));
        // Title is appended after the existing keys.
        let id_pos = written.find("\"id\"").unwrap();
        let title_pos = written.find("\"title\"").unwrap();
        assert!(title_pos > id_pos);
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("monthly summary"), "Monthly Summary");
        assert_eq!(title_case("week total"), "Week Total");
        assert_eq!(title_case("ALL CAPS"), "All Caps");
        assert_eq!(title_case(""), "");
    }
}
