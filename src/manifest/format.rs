//! Compact pretty-printing for manifest files.
//!
//! Values that fit on one line (with `": "` and `", "` separators) within the
//! line budget stay inline; anything longer is broken one item per line.
//! Object keys keep their document order.

use serde_json::Value;

/// Line budget used for manifests
pub const MANIFEST_MAX_LENGTH: usize = 35;
/// Indentation used for manifests
pub const MANIFEST_INDENT: &str = "\t";

/// Formatting options
#[derive(Debug, Clone, Copy)]
pub struct CompactOptions<'a> {
    /// Indentation unit
    pub indent: &'a str,
    /// Maximum line length, counted in characters
    pub max_length: usize,
}

impl Default for CompactOptions<'_> {
    fn default() -> Self {
        Self {
            indent: MANIFEST_INDENT,
            max_length: MANIFEST_MAX_LENGTH,
        }
    }
}

/// Render `value` with the given options; no trailing newline
pub fn to_compact_string(value: &Value, options: CompactOptions<'_>) -> String {
    render(value, options, "", 0)
}

fn render(
    value: &Value,
    options: CompactOptions<'_>,
    current_indent: &str,
    reserved: usize,
) -> String {
    let inline = value.to_string();
    let available = options
        .max_length
        .saturating_sub(current_indent.chars().count() + reserved);

    if inline.chars().count() <= available {
        let spaced = add_separator_spaces(&inline);
        if spaced.chars().count() <= available {
            return spaced;
        }
    }

    let next_indent = format!("{current_indent}{}", options.indent);
    let (start, end, items) = match value {
        Value::Array(values) => {
            let last = values.len().saturating_sub(1);
            let items: Vec<String> = values
                .iter()
                .enumerate()
                .map(|(i, v)| render(v, options, &next_indent, usize::from(i != last)))
                .collect();
            ('[', ']', items)
        }
        Value::Object(map) => {
            let last = map.len().saturating_sub(1);
            let items: Vec<String> = map
                .iter()
                .enumerate()
                .map(|(i, (key, v))| {
                    let key_part = format!("{}: ", Value::String(key.clone()));
                    let reserved = key_part.chars().count() + usize::from(i != last);
                    format!("{key_part}{}", render(v, options, &next_indent, reserved))
                })
                .collect();
            ('{', '}', items)
        }
        _ => return inline,
    };

    if items.is_empty() {
        return inline;
    }

    format!(
        "{start}\n{next_indent}{}\n{current_indent}{end}",
        items.join(&format!(",\n{next_indent}"))
    )
}

/// Insert a space after every `:` and `,` that is outside a string literal
fn add_separator_spaces(json: &str) -> String {
    let mut out = String::with_capacity(json.len() + json.len() / 4);
    let mut in_string = false;
    let mut escaped = false;

    for c in json.chars() {
        out.push(c);
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
        } else if c == '"' {
            in_string = true;
        } else if c == ':' || c == ',' {
            out.push(' ');
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn short_values_stay_inline() {
        let value = json!({"a": 1, "b": [1, 2]});
        assert_eq!(
            to_compact_string(&value, CompactOptions::default()),
            r#"{"a": 1, "b": [1, 2]}"#
        );
    }

    #[test]
    fn long_objects_break_per_key_with_tabs() {
        let value = json!({
            "name": "hero6e",
            "title": "HERO System 6th Edition",
            "esmodules": ["hero6e.js"]
        });
        let expected = "{\n\t\"name\": \"hero6e\",\n\t\"title\": \"HERO System 6th Edition\",\n\t\"esmodules\": [\"hero6e.js\"]\n}";
        assert_eq!(to_compact_string(&value, CompactOptions::default()), expected);
    }

    #[test]
    fn nested_arrays_wrap_when_too_long() {
        let value = json!({"styles": ["styles/hero6e.css", "styles/extra-long-name.css"]});
        let expected = "{\n\t\"styles\": [\n\t\t\"styles/hero6e.css\",\n\t\t\"styles/extra-long-name.css\"\n\t]\n}";
        assert_eq!(to_compact_string(&value, CompactOptions::default()), expected);
    }

    #[test]
    fn separators_inside_strings_are_untouched() {
        assert_eq!(add_separator_spaces(r#"{"a:b":"c,d\",e"}"#), r#"{"a:b": "c,d\",e"}"#);
    }

    #[test]
    fn empty_containers_render_inline() {
        let value = json!({"packs": [], "dependencies": {}, "longer_key_to_force_a_break": true});
        let out = to_compact_string(&value, CompactOptions::default());
        assert!(out.contains("\t\"packs\": [],"));
        assert!(out.contains("\t\"dependencies\": {},"));
    }
}
