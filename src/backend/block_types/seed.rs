//! Built-in block types inserted at startup.
//!
//! Seeding is idempotent: a name that already exists is left untouched, so
//! operators can adjust a system type's schema in the database without it
//! being reset on the next boot.

use serde_json::{json, Value};

use crate::shared::JsonMap;

pub struct SystemType {
    pub name: &'static str,
    pub category: &'static str,
    pub display_name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub default_metadata: JsonMap,
    pub metadata_schema: JsonMap,
}

fn object(value: Value) -> JsonMap {
    match value {
        Value::Object(map) => map,
        _ => JsonMap::new(),
    }
}

fn system_type(
    name: &'static str,
    category: &'static str,
    display_name: &'static str,
    description: &'static str,
    icon: &'static str,
    default_metadata: Value,
    metadata_schema: Value,
) -> SystemType {
    SystemType {
        name,
        category,
        display_name,
        description,
        icon,
        default_metadata: object(default_metadata),
        metadata_schema: object(metadata_schema),
    }
}

pub fn system_types() -> Vec<SystemType> {
    vec![
        system_type("paragraph", "text", "Text", "Plain text paragraph", "¶", json!({}), json!({})),
        system_type(
            "heading",
            "text",
            "Heading",
            "Section heading, levels 1 to 3",
            "H",
            json!({"level": 1}),
            json!({
                "type": "object",
                "properties": {
                    "level": {"type": "integer", "minimum": 1, "maximum": 3}
                },
                "required": ["level"]
            }),
        ),
        system_type(
            "todo",
            "list",
            "To-do",
            "Checklist item",
            "☐",
            json!({"checked": false}),
            json!({
                "type": "object",
                "properties": {
                    "checked": {"type": "boolean"}
                },
                "required": ["checked"]
            }),
        ),
        system_type("bulleted_list", "list", "Bulleted list", "Unordered list item", "•", json!({}), json!({})),
        system_type("numbered_list", "list", "Numbered list", "Ordered list item", "1.", json!({}), json!({})),
        system_type("quote", "text", "Quote", "Quoted passage", "❝", json!({}), json!({})),
        system_type(
            "code",
            "media",
            "Code",
            "Preformatted code with a language hint",
            "</>",
            json!({"language": "plain"}),
            json!({
                "type": "object",
                "properties": {
                    "language": {"type": "string", "minLength": 1},
                    "wrap": {"type": "boolean"}
                }
            }),
        ),
        system_type("divider", "layout", "Divider", "Horizontal rule", "—", json!({}), json!({})),
        system_type(
            "callout",
            "text",
            "Callout",
            "Highlighted note with an icon",
            "💡",
            json!({"icon": "💡", "color": "default"}),
            json!({
                "type": "object",
                "properties": {
                    "icon": {"type": "string"},
                    "color": {"type": "string"}
                }
            }),
        ),
        system_type(
            "toggle",
            "layout",
            "Toggle",
            "Collapsible container for child blocks",
            "▸",
            json!({"expanded": false}),
            json!({
                "type": "object",
                "properties": {
                    "expanded": {"type": "boolean"}
                }
            }),
        ),
        system_type(
            "image",
            "media",
            "Image",
            "Embedded image",
            "🖼",
            json!({}),
            json!({
                "type": "object",
                "properties": {
                    "url": {"type": "string", "minLength": 1},
                    "caption": {"type": "string"},
                    "width": {"type": "integer", "minimum": 1}
                },
                "required": ["url"]
            }),
        ),
    ]
}
