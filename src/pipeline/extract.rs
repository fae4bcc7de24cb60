/*!
Tolerant extraction of JSON from generated text.

Generated text often wraps the requested JSON in markdown fences or prose.
Extraction strips any fences, then decodes the first balanced `{…}` or `[…]` span, skipping over brackets inside string literals.

```rust
# use logicbench::pipeline::extract::extract_value;
let response = "Claro! Aqui está:\n```json\n{\"p\": \"chove {muito}\"}\n```";
let value = extract_value(response).unwrap();
assert_eq!(value["p"], "chove {muito}");
```
*/

use serde::de::DeserializeOwned;

use crate::types::err::{self};

/// `text` with any markdown code fences (and their language tags) removed.
pub fn strip_fences(text: &str) -> String {
    text.lines()
        .filter(|line| !line.trim_start().starts_with("```"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// The byte range of the first balanced JSON structure in `text`.
pub fn balanced_span(text: &str) -> Result<std::ops::Range<usize>, err::ExtractError> {
    let start = text.find(['{', '[']).ok_or(err::ExtractError::NoStructure)?;

    let mut stack = Vec::default();
    let mut in_string = false;
    let mut escaped = false;

    for (offset, character) in text[start..].char_indices() {
        if in_string {
            match character {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match character {
            '"' => in_string = true,
            '{' => stack.push('}'),
            '[' => stack.push(']'),
            '}' | ']' => {
                if stack.pop() != Some(character) {
                    return Err(err::ExtractError::Unbalanced(start));
                }
                if stack.is_empty() {
                    return Ok(start..start + offset + 1);
                }
            }
            _ => {}
        }
    }

    Err(err::ExtractError::Unbalanced(start))
}

/// The first JSON structure in `text`, decoded.
pub fn extract_value(text: &str) -> Result<serde_json::Value, err::ExtractError> {
    let text = strip_fences(text);
    let span = balanced_span(&text)?;
    serde_json::from_str(&text[span]).map_err(|e| err::ExtractError::Decode(e.to_string()))
}

/// The first JSON structure in `text`, as an object.
pub fn extract_object(text: &str) -> Result<serde_json::Map<String, serde_json::Value>, err::ExtractError> {
    match extract_value(text)? {
        serde_json::Value::Object(map) => Ok(map),
        _ => Err(err::ExtractError::Shape("an object")),
    }
}

/// The first JSON structure in `text`, as an array.
///
/// A lone object is read as an array of one object.
pub fn extract_array(text: &str) -> Result<Vec<serde_json::Value>, err::ExtractError> {
    match extract_value(text)? {
        serde_json::Value::Array(values) => Ok(values),
        object @ serde_json::Value::Object(_) => Ok(vec![object]),
        _ => Err(err::ExtractError::Shape("an array")),
    }
}

/// The first JSON structure in `text`, decoded to `T`.
pub fn extract_typed<T: DeserializeOwned>(text: &str) -> Result<T, err::ExtractError> {
    let value = extract_value(text)?;
    serde_json::from_value(value).map_err(|e| err::ExtractError::Decode(e.to_string()))
}

#[cfg(test)]
mod extract_tests {
    use super::*;

    #[test]
    fn prose_and_fences() {
        let response = "Here you go:\n```json\n[{\"p\": \"a\"}, {\"p\": \"b\"}]\n```\nAnything else?";
        let values = extract_array(response).unwrap();
        assert_eq!(values.len(), 2);
        assert_eq!(values[1]["p"], "b");
    }

    #[test]
    fn brackets_in_strings() {
        let text = r#"{"p": "a } b", "q": "c \" ] d"} trailing {"#;
        let object = extract_object(text).unwrap();
        assert_eq!(object["p"], "a } b");
        assert_eq!(object["q"], "c \" ] d");
    }

    #[test]
    fn lone_object_as_array() {
        let values = extract_array(r#"{"p": "a"}"#).unwrap();
        assert_eq!(values.len(), 1);
    }

    #[test]
    fn failures() {
        assert_eq!(extract_value("no json here"), Err(err::ExtractError::NoStructure));
        assert_eq!(extract_value("text {\"p\": 1"), Err(err::ExtractError::Unbalanced(5)));
        assert_eq!(extract_value("[1, 2}"), Err(err::ExtractError::Unbalanced(0)));
        assert!(matches!(extract_value("{p: 1}"), Err(err::ExtractError::Decode(_))));
        assert_eq!(extract_object("[1]"), Err(err::ExtractError::Shape("an object")));
    }

    #[test]
    fn typed() {
        #[derive(serde::Deserialize)]
        struct Pair {
            p: String,
        }

        let pair: Pair = extract_typed("```\n{\"p\": \"chove\"}\n```").unwrap();
        assert_eq!(pair.p, "chove");
    }
}
