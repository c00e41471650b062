//! Log message payloads
//!
//! A message is either plain text, written as-is, or a structured value
//! (record or sequence) rendered as indented JSON.

use std::borrow::Cow;

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::Value;

/// Placeholder values accepted alongside a message
pub type Context = serde_json::Map<String, Value>;

const JSON_INDENT: &[u8] = b"    ";

/// Payload of a single log call
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    /// Plain text, written unchanged
    Text(String),
    /// Record or sequence, written as pretty-printed JSON
    Structured(Value),
}

impl Message {
    /// Build a message from any serializable value
    ///
    /// Objects and arrays become `Structured`; strings and other scalars
    /// become `Text`.
    pub fn from_serialize<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<Self> {
        Ok(Self::from(serde_json::to_value(value)?))
    }

    /// Render the text that goes after the level tag
    pub fn render(&self) -> Cow<'_, str> {
        match self {
            Message::Text(text) => Cow::Borrowed(text),
            Message::Structured(value) => Cow::Owned(to_pretty_json(value)),
        }
    }
}

impl From<&str> for Message {
    fn from(text: &str) -> Self {
        Message::Text(text.to_string())
    }
}

impl From<String> for Message {
    fn from(text: String) -> Self {
        Message::Text(text)
    }
}

impl From<Value> for Message {
    fn from(value: Value) -> Self {
        match value {
            Value::String(text) => Message::Text(text),
            Value::Object(_) | Value::Array(_) => Message::Structured(value),
            scalar => Message::Text(scalar.to_string()),
        }
    }
}

fn to_pretty_json(value: &Value) -> String {
    let mut out = Vec::new();
    let formatter = PrettyFormatter::with_indent(JSON_INDENT);
    let mut ser = serde_json::Serializer::with_formatter(&mut out, formatter);
    if value.serialize(&mut ser).is_err() {
        return value.to_string();
    }
    String::from_utf8(out).unwrap_or_else(|_| value.to_string())
}

/// Replace `{key}` placeholders in `message` with values from `context`
///
/// Strings are inserted verbatim, numbers and booleans in their JSON form and
/// null as an empty string. Arrays, objects and keys missing from the context
/// leave their placeholder untouched. Inserted text is not scanned again.
pub fn interpolate(message: &str, context: &Context) -> String {
    let mut out = String::with_capacity(message.len());
    let mut rest = message;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let Some(close) = after.find('}') else {
            rest = &rest[open..];
            break;
        };

        let key = &after[..close];
        if key.contains('{') {
            // `{{key}`: the first brace is literal
            out.push('{');
            rest = after;
            continue;
        }
        match context.get(key).and_then(placeholder_value) {
            Some(value) => out.push_str(&value),
            None => {
                out.push('{');
                out.push_str(key);
                out.push('}');
            }
        }
        rest = &after[close + 1..];
    }

    out.push_str(rest);
    out
}

fn placeholder_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Null => Some(String::new()),
        Value::Bool(_) | Value::Number(_) => Some(value.to_string()),
        Value::Array(_) | Value::Object(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_text_passes_through() {
        let msg = Message::from("hello [world] {x}");
        assert_eq!(msg.render(), "hello [world] {x}");
    }

    #[test]
    fn test_record_renders_as_indented_json() {
        let msg = Message::from(json!({"b": 2, "a": 1}));
        assert_eq!(msg.render(), "{\n    \"a\": 1,\n    \"b\": 2\n}");
    }

    #[test]
    fn test_sequence_is_structured() {
        let msg = Message::from(json!(["x", "y"]));
        assert!(matches!(msg, Message::Structured(_)));
        assert_eq!(msg.render(), "[\n    \"x\",\n    \"y\"\n]");
    }

    #[test]
    fn test_scalars_become_text() {
        assert_eq!(Message::from(json!("plain")), Message::Text("plain".into()));
        assert_eq!(Message::from(json!(42)), Message::Text("42".into()));
        assert_eq!(Message::from(json!(true)), Message::Text("true".into()));
    }

    #[test]
    fn test_from_serialize_struct() {
        #[derive(Serialize)]
        struct Job {
            id: u32,
            name: &'static str,
        }

        let msg = Message::from_serialize(&Job { id: 7, name: "build" }).unwrap();
        let rendered = msg.render();
        assert!(rendered.contains("\"id\": 7"));
        assert!(rendered.contains("\"name\": \"build\""));
    }

    #[test]
    fn test_interpolate_replaces_scalars() {
        let mut context = Context::new();
        context.insert("user".into(), json!("ana"));
        context.insert("count".into(), json!(3));
        context.insert("gone".into(), Value::Null);

        let out = interpolate("{user} has {count} items{gone}", &context);
        assert_eq!(out, "ana has 3 items");
    }

    #[test]
    fn test_interpolate_leaves_unknown_and_nested() {
        let mut context = Context::new();
        context.insert("list".into(), json!([1, 2]));

        let out = interpolate("{list} {missing}", &context);
        assert_eq!(out, "{list} {missing}");
    }

    #[test]
    fn test_interpolate_does_not_expand_inserted_text() {
        let mut context = Context::new();
        context.insert("a".into(), json!("{b}"));
        context.insert("b".into(), json!("SECRET"));

        assert_eq!(interpolate("{a}", &context), "{b}");
        assert_eq!(interpolate("{b} {a}", &context), "SECRET {b}");
    }

    #[test]
    fn test_interpolate_stray_braces() {
        let mut context = Context::new();
        context.insert("user".into(), json!("ana"));

        assert_eq!(interpolate("{{user}}", &context), "{ana}");
        assert_eq!(interpolate("hi {user} {", &context), "hi ana {");
        assert_eq!(interpolate("} {user", &context), "} {user");
    }
}
