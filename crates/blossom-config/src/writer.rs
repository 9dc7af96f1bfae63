//! JSON5 pretty-printer over [`Value`] trees.
//!
//! Output is tab indented. Comments are looked up by dotted field path and
//! rendered as `//` lines above the key in multi-line mode, or as inline
//! `/* */` blocks on a single line. Floats keep `Infinity` and `NaN`, and
//! strings escape every control character plus U+2028 and U+2029.

use crate::codec::Value;
use crate::grammar::JsonGrammar;

/// Renders a [`Value`] according to a [`JsonGrammar`].
pub struct Json5Writer<'a> {
    grammar: JsonGrammar,
    comments: &'a [(&'a str, &'a str)],
    out: String,
}

impl<'a> Json5Writer<'a> {
    /// Creates a writer with no comments attached.
    pub fn new(grammar: JsonGrammar) -> Self {
        Self {
            grammar,
            comments: &[],
            out: String::new(),
        }
    }

    /// Attaches comments keyed by dotted field path.
    #[must_use]
    pub fn with_comments(mut self, comments: &'a [(&'a str, &'a str)]) -> Self {
        self.comments = comments;
        self
    }

    /// Consumes the writer and returns the rendered document.
    pub fn render(mut self, value: &Value) -> String {
        if let Some(header) = self.comment_for("") {
            self.write_comment(header, 0);
        }
        self.write_value(value, "", 0);
        self.out
    }

    fn write_value(&mut self, value: &Value, path: &str, depth: usize) {
        match value {
            Value::Object(entries) => self.write_object(entries, path, depth),
            Value::Array(items) => self.write_array(items, path, depth),
            Value::String(text) => write_string(&mut self.out, text),
            Value::Number(number) => self.out.push_str(&number.to_string()),
            Value::Bool(flag) => self.out.push_str(if *flag { "true" } else { "false" }),
            Value::Null => self.out.push_str("null"),
        }
    }

    fn write_object(&mut self, entries: &[(String, Value)], path: &str, depth: usize) {
        if entries.is_empty() {
            self.out.push_str("{}");
            return;
        }

        self.out.push('{');
        let last = entries.len() - 1;
        for (index, (key, value)) in entries.iter().enumerate() {
            let child_path = if path.is_empty() {
                key.clone()
            } else {
                format!("{path}.{key}")
            };

            self.begin_entry(depth + 1);
            if let Some(comment) = self.comment_for(&child_path) {
                self.write_comment(comment, depth + 1);
            }
            self.write_key(key);
            self.out.push_str(": ");
            self.write_value(value, &child_path, depth + 1);
            self.end_entry(index == last);
        }
        self.close(depth, '}');
    }

    fn write_array(&mut self, items: &[Value], path: &str, depth: usize) {
        if items.is_empty() {
            self.out.push_str("[]");
            return;
        }

        if items.iter().all(Value::is_scalar) {
            self.out.push('[');
            for (index, item) in items.iter().enumerate() {
                if index > 0 {
                    self.out.push_str(", ");
                }
                self.write_value(item, path, depth);
            }
            self.out.push(']');
            return;
        }

        self.out.push('[');
        let last = items.len() - 1;
        for (index, item) in items.iter().enumerate() {
            self.begin_entry(depth + 1);
            self.write_value(item, path, depth + 1);
            self.end_entry(index == last);
        }
        self.close(depth, ']');
    }

    fn write_key(&mut self, key: &str) {
        if self.grammar.unquoted_keys && is_identifier(key) {
            self.out.push_str(key);
        } else {
            write_string(&mut self.out, key);
        }
    }

    /// Writes a comment, leaving the cursor where the commented item starts.
    fn write_comment(&mut self, comment: &str, depth: usize) {
        if self.grammar.newlines {
            for line in comment.lines() {
                self.out.push_str("// ");
                self.out.push_str(line);
                self.newline(depth);
            }
        } else {
            let inline = comment.lines().collect::<Vec<_>>().join(" ");
            self.out.push_str("/* ");
            self.out.push_str(&inline.replace("*/", "* /"));
            self.out.push_str(" */ ");
        }
    }

    fn begin_entry(&mut self, depth: usize) {
        if self.grammar.newlines {
            self.newline(depth);
        } else {
            self.out.push(' ');
        }
    }

    fn end_entry(&mut self, is_last: bool) {
        if !is_last || (self.grammar.newlines && self.grammar.trailing_commas) {
            self.out.push(',');
        }
    }

    fn close(&mut self, depth: usize, bracket: char) {
        if self.grammar.newlines {
            self.newline(depth);
        } else {
            self.out.push(' ');
        }
        self.out.push(bracket);
    }

    fn newline(&mut self, depth: usize) {
        self.out.push('\n');
        for _ in 0..depth {
            self.out.push('\t');
        }
    }

    fn comment_for(&self, path: &str) -> Option<&'a str> {
        if !self.grammar.comments {
            return None;
        }
        self.comments
            .iter()
            .find(|(key, _)| *key == path)
            .map(|(_, comment)| *comment)
    }
}

fn write_string(out: &mut String, text: &str) {
    out.push('"');
    for c in text.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{8}' => out.push_str("\\b"),
            '\u{c}' => out.push_str("\\f"),
            // line and paragraph separators end a line in JavaScript source
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            c if c.is_control() => out.push_str(&format!("\\u{:04x}", u32::from(c))),
            c => out.push(c),
        }
    }
    out.push('"');
}

fn is_identifier(key: &str) -> bool {
    let mut chars = key.chars();
    chars
        .next()
        .is_some_and(|first| first.is_ascii_alphabetic() || first == '_' || first == '$')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}
