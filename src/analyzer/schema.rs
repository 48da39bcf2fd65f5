//! Versioned response schemas
//!
//! A schema version lists the fields the model is asked to produce, each with a hint
//! describing what the field means. The hints are rendered into the prompt; the kinds
//! are checked against the parsed response.

use serde_json::{Map, Number, Value};
use std::fmt;
use std::str::FromStr;

/// JSON type expected for a response field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// A string
    Text,
    /// A number; numeric strings are converted
    Number,
    /// An array of strings
    TextList,
    /// One of `Positive`, `Negative` or `Neutral`
    Sentiment,
}

/// One field of a response schema
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    /// JSON key
    pub name: &'static str,
    /// Expected JSON type
    pub kind: FieldKind,
    /// Natural-language description shown to the model
    pub hint: &'static str,
    /// Whether a response must carry a non-null value for this field
    pub required: bool,
}

const V1_FIELDS: &[FieldSpec] = &[
    FieldSpec {
        name: "title",
        kind: FieldKind::Text,
        hint: "A fitting title for this content",
        required: true,
    },
    FieldSpec {
        name: "shortSummary",
        kind: FieldKind::Text,
        hint: "A 2-3 sentence summary of the content",
        required: true,
    },
    FieldSpec {
        name: "category",
        kind: FieldKind::Text,
        hint: "Tech, Lifestyle, Finance, etc.",
        required: true,
    },
    FieldSpec {
        name: "clickbaitScore",
        kind: FieldKind::Number,
        hint: "A number from 1 (Wikipedia) to 10 (tabloid): how clickbait is the original title compared to the content?",
        required: true,
    },
    FieldSpec {
        name: "targetAudience",
        kind: FieldKind::TextList,
        hint: "List of target audiences in a few words each",
        required: true,
    },
    FieldSpec {
        name: "keyEntities",
        kind: FieldKind::TextList,
        hint: "List of specific libraries, companies, or people mentioned",
        required: true,
    },
];

const V2_FIELDS: &[FieldSpec] = &[
    V1_FIELDS[0],
    V1_FIELDS[1],
    V1_FIELDS[2],
    V1_FIELDS[3],
    V1_FIELDS[4],
    V1_FIELDS[5],
    FieldSpec {
        name: "sentiment",
        kind: FieldKind::Sentiment,
        hint: "Positive, Negative, or Neutral",
        required: false,
    },
    FieldSpec {
        name: "readingLevel",
        kind: FieldKind::Text,
        hint: "Reading level of the text, e.g. 8th Grade, College",
        required: false,
    },
    FieldSpec {
        name: "tldr",
        kind: FieldKind::TextList,
        hint: "3-5 short bullet points capturing the key takeaways",
        required: false,
    },
    FieldSpec {
        name: "topics",
        kind: FieldKind::TextList,
        hint: "List of topics covered, most prominent first",
        required: false,
    },
];

/// Shape requested from the model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum SchemaVersion {
    /// Title, summary, category, clickbait score, audience and entities
    V1,
    /// Everything in `V1` plus sentiment, reading level, tl;dr and topics
    #[default]
    V2,
}

impl SchemaVersion {
    /// Fields requested by this version, in prompt order
    pub fn fields(&self) -> &'static [FieldSpec] {
        match self {
            SchemaVersion::V1 => V1_FIELDS,
            SchemaVersion::V2 => V2_FIELDS,
        }
    }

    /// Render the JSON shape with a hint in place of every value
    pub fn describe(&self) -> String {
        let lines: Vec<String> = self
            .fields()
            .iter()
            .map(|field| {
                let hint = Value::String(field.hint.to_string());
                match field.kind {
                    FieldKind::TextList => format!("  \"{}\": [{}]", field.name, hint),
                    _ => format!("  \"{}\": {}", field.name, hint),
                }
            })
            .collect();
        format!("{{\n{}\n}}", lines.join(",\n"))
    }

    /// Check a parsed response against this version.
    ///
    /// Required fields must be present and non-null; optional fields may be absent or
    /// `null`. Fields that are present must have the expected type. Unknown fields are kept
    /// untouched. Numeric strings in number fields are converted, and sentiment values are
    /// matched case-insensitively.
    pub fn validate(&self, value: Value) -> Result<Map<String, Value>, String> {
        let mut fields = match value {
            Value::Object(fields) => fields,
            other => return Err(format!("expected a JSON object, got {}", type_name(&other))),
        };

        for spec in self.fields() {
            match fields.get_mut(spec.name) {
                Some(field) if !field.is_null() => check_field(spec, field)?,
                _ if spec.required => {
                    return Err(format!("missing required field '{}'", spec.name));
                }
                _ => {}
            }
        }

        Ok(fields)
    }
}

fn check_field(spec: &FieldSpec, field: &mut Value) -> Result<(), String> {
    let mismatch = |expected: &str, found: &Value| {
        format!(
            "field '{}' should be {}, got {}",
            spec.name,
            expected,
            type_name(found)
        )
    };

    match spec.kind {
        FieldKind::Text => {
            if !field.is_string() {
                return Err(mismatch("a string", field));
            }
        }
        FieldKind::Number => {
            if let Value::String(text) = field {
                let number = parse_number(text.trim())
                    .ok_or_else(|| format!("field '{}' is not a number: {:?}", spec.name, text))?;
                *field = Value::Number(number);
            } else if !field.is_number() {
                return Err(mismatch("a number", field));
            }
        }
        FieldKind::TextList => {
            let all_strings = field
                .as_array()
                .is_some_and(|items| items.iter().all(Value::is_string));
            if !all_strings {
                return Err(mismatch("an array of strings", field));
            }
        }
        FieldKind::Sentiment => {
            let Some(text) = field.as_str() else {
                return Err(mismatch("a string", field));
            };
            let sentiment = text
                .parse::<Sentiment>()
                .map_err(|e| format!("field '{}': {}", spec.name, e))?;
            *field = Value::String(sentiment.to_string());
        }
    }
    Ok(())
}

fn parse_number(text: &str) -> Option<Number> {
    if let Ok(int) = text.parse::<i64>() {
        return Some(Number::from(int));
    }
    text.parse::<f64>().ok().and_then(Number::from_f64)
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Overall tone of a document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Sentiment::Positive => "Positive",
            Sentiment::Negative => "Negative",
            Sentiment::Neutral => "Neutral",
        };
        f.write_str(text)
    }
}

impl FromStr for Sentiment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "positive" => Ok(Sentiment::Positive),
            "negative" => Ok(Sentiment::Negative),
            "neutral" => Ok(Sentiment::Neutral),
            _ => Err(format!("unknown sentiment {:?}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    /// A response carrying every required field, with `overrides` applied on top
    fn response(overrides: Value) -> Value {
        let mut base = json!({
            "title": "T",
            "shortSummary": "S",
            "category": "Tech",
            "clickbaitScore": 3,
            "targetAudience": ["developers"],
            "keyEntities": ["Rust"]
        });
        if let (Some(fields), Value::Object(extra)) = (base.as_object_mut(), overrides) {
            fields.extend(extra);
        }
        base
    }

    #[test]
    fn test_v2_extends_v1() {
        let v1: Vec<_> = SchemaVersion::V1.fields().iter().map(|f| f.name).collect();
        let v2: Vec<_> = SchemaVersion::V2.fields().iter().map(|f| f.name).collect();

        assert_eq!(v1.len(), 6);
        assert_eq!(&v2[..6], &v1[..]);
        assert!(v2.contains(&"sentiment"));
        assert!(v2.contains(&"topics"));
    }

    #[test]
    fn test_only_v1_fields_are_required() {
        let required: Vec<_> = SchemaVersion::V2
            .fields()
            .iter()
            .filter(|f| f.required)
            .map(|f| f.name)
            .collect();
        let v1: Vec<_> = SchemaVersion::V1.fields().iter().map(|f| f.name).collect();

        assert_eq!(required, v1);
    }

    #[test]
    fn test_describe_renders_hints() {
        let shape = SchemaVersion::V1.describe();

        assert!(shape.starts_with('{'));
        assert!(shape.ends_with('}'));
        assert!(shape.contains("\"title\": \"A fitting title for this content\""));
        assert!(shape.contains(
            "\"keyEntities\": [\"List of specific libraries, companies, or people mentioned\"]"
        ));
        assert!(!shape.contains("sentiment"));
    }

    #[test]
    fn test_validate_keeps_unknown_fields() {
        let fields = SchemaVersion::V2
            .validate(response(json!({"extra": 42})))
            .unwrap();

        assert_eq!(fields["title"], "T");
        assert_eq!(fields["extra"], 42);
    }

    #[test]
    fn test_validate_rejects_non_object() {
        let err = SchemaVersion::V1.validate(json!(["a", "b"])).unwrap_err();
        assert!(err.contains("object"));
    }

    #[test]
    fn test_validate_rejects_missing_required_field() {
        let err = SchemaVersion::V1.validate(json!({})).unwrap_err();
        assert!(err.contains("title"));

        let mut partial = response(json!({}));
        if let Some(fields) = partial.as_object_mut() {
            fields.remove("keyEntities");
        }
        let err = SchemaVersion::V2.validate(partial).unwrap_err();
        assert_eq!(err, "missing required field 'keyEntities'");
    }

    #[test]
    fn test_validate_rejects_null_required_field() {
        let err = SchemaVersion::V1
            .validate(response(json!({"category": null})))
            .unwrap_err();
        assert!(err.contains("category"));
    }

    #[test]
    fn test_validate_rejects_wrong_types() {
        let v1 = SchemaVersion::V1;
        assert!(v1.validate(response(json!({"title": 3}))).is_err());
        assert!(v1.validate(response(json!({"keyEntities": "Rust"}))).is_err());
        assert!(v1.validate(response(json!({"keyEntities": ["Rust", 1]}))).is_err());
        assert!(v1.validate(response(json!({"clickbaitScore": "very"}))).is_err());
        assert!(
            SchemaVersion::V2
                .validate(response(json!({"sentiment": "Ecstatic"})))
                .is_err()
        );
    }

    #[test]
    fn test_validate_converts_numeric_strings() {
        let fields = SchemaVersion::V1
            .validate(response(json!({"clickbaitScore": " 7 "})))
            .unwrap();
        assert_eq!(fields["clickbaitScore"], json!(7));

        let fields = SchemaVersion::V1
            .validate(response(json!({"clickbaitScore": "2.5"})))
            .unwrap();
        assert_eq!(fields["clickbaitScore"], json!(2.5));
    }

    #[test]
    fn test_validate_does_not_clamp_scores() {
        let fields = SchemaVersion::V1
            .validate(response(json!({"clickbaitScore": 42})))
            .unwrap();
        assert_eq!(fields["clickbaitScore"], json!(42));
    }

    #[test]
    fn test_validate_canonicalizes_sentiment() {
        let fields = SchemaVersion::V2
            .validate(response(json!({"sentiment": "negative"})))
            .unwrap();
        assert_eq!(fields["sentiment"], "Negative");
    }

    #[test]
    fn test_v1_ignores_v2_fields() {
        let fields = SchemaVersion::V1
            .validate(response(json!({"sentiment": "Ecstatic"})))
            .unwrap();
        assert_eq!(fields["sentiment"], "Ecstatic");
    }

    #[test]
    fn test_optional_fields_may_be_null_or_absent() {
        assert!(
            SchemaVersion::V2
                .validate(response(json!({"readingLevel": null})))
                .is_ok()
        );
        assert!(SchemaVersion::V2.validate(response(json!({}))).is_ok());
    }
}
