use manabi_grammar_types::DEFAULT_VARIANT;
use serde_json::{Map, Value};

// Older YAML files use snake_case; the database payload is camelCase.
const TOP_LEVEL_RENAMES: [(&str, &str); 5] = [
    ("jmdict_id", "jmdictId"),
    ("alternative_forms", "alternativeForms"),
    ("example_sentences", "exampleSentences"),
    ("test_data", "testData"),
    ("level_label", "levelLabel"),
];

fn rename_key(map: &mut Map<String, Value>, old: &str, new: &str) -> Result<(), String> {
    let Some(value) = map.remove(old) else {
        return Ok(());
    };
    if let Some(existing) = map.get(new)
        && *existing != value
    {
        return Err(format!("Conflicting keys '{}' and '{}' encountered.", old, new));
    }
    map.insert(new.to_string(), value);
    Ok(())
}

/// Rewrite snake_case keys of a YAML record into the camelCase payload form.
///
/// Non-object items in `exampleSentences` are dropped.
pub fn normalize_record(mut record: Map<String, Value>) -> Result<Map<String, Value>, String> {
    for (old, new) in TOP_LEVEL_RENAMES {
        rename_key(&mut record, old, new)?;
    }

    if let Some(Value::Array(sentences)) = record.get_mut("exampleSentences") {
        let mut normalized = Vec::with_capacity(sentences.len());
        for item in sentences.drain(..) {
            if let Value::Object(mut sentence) = item {
                rename_key(&mut sentence, "source_url", "sourceUrl")?;
                normalized.push(Value::Object(sentence));
            }
        }
        *sentences = normalized;
    }

    if let Some(Value::Object(test_data)) = record.get_mut("testData") {
        rename_key(test_data, "non_matching_sentences", "nonMatchingSentences")?;
    }

    Ok(record)
}

/// Interpret the `variant` field of a YAML record.
pub fn coerce_variant(value: Option<&Value>) -> Result<u32, String> {
    let parsed = match value {
        None | Some(Value::Null) => return Ok(DEFAULT_VARIANT),
        Some(Value::Bool(_)) => return Err("variant cannot be a boolean".to_string()),
        Some(Value::Number(n)) => n.as_i64(),
        Some(Value::String(s)) if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) => {
            Some(s.parse::<i64>().unwrap_or(i64::MAX))
        }
        Some(_) => None,
    };

    match parsed {
        Some(n) if n < DEFAULT_VARIANT as i64 => Err("variant must be >= 1".to_string()),
        Some(n) => u32::try_from(n).map_err(|_| "variant is too large".to_string()),
        None => Err("variant must be a positive integer".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_renames_snake_case_keys() {
        let record = object(json!({
            "jmdict_id": 2028930,
            "alternative_forms": ["ガ"],
            "example_sentences": [
                { "sentence": "太郎が学校に行く。", "source_url": "https://example.com/s" },
                "not an object"
            ],
            "test_data": { "non_matching_sentences": ["太郎は学校に行く。"] },
            "level_label": "N5"
        }));

        let normalized = normalize_record(record).unwrap();
        assert_eq!(normalized["jmdictId"], 2028930);
        assert_eq!(normalized["alternativeForms"][0], "ガ");
        assert_eq!(normalized["levelLabel"], "N5");

        let sentences = normalized["exampleSentences"].as_array().unwrap();
        assert_eq!(sentences.len(), 1);
        assert_eq!(sentences[0]["sourceUrl"], "https://example.com/s");
        assert!(sentences[0].get("source_url").is_none());

        assert_eq!(
            normalized["testData"]["nonMatchingSentences"][0],
            "太郎は学校に行く。"
        );
        assert!(normalized.get("jmdict_id").is_none());
    }

    #[test]
    fn test_identical_duplicate_keys_are_merged() {
        let record = object(json!({ "level_label": "N5", "levelLabel": "N5" }));
        let normalized = normalize_record(record).unwrap();
        assert_eq!(normalized.len(), 1);
    }

    #[test]
    fn test_conflicting_keys() {
        let record = object(json!({ "level_label": "N5", "levelLabel": "N4" }));
        let err = normalize_record(record).unwrap_err();
        assert_eq!(err, "Conflicting keys 'level_label' and 'levelLabel' encountered.");
    }

    #[test]
    fn test_coerce_variant() {
        assert_eq!(coerce_variant(None), Ok(1));
        assert_eq!(coerce_variant(Some(&Value::Null)), Ok(1));
        assert_eq!(coerce_variant(Some(&json!(3))), Ok(3));
        assert_eq!(coerce_variant(Some(&json!("2"))), Ok(2));
    }

    #[test]
    fn test_coerce_variant_rejects() {
        assert_eq!(
            coerce_variant(Some(&json!(true))),
            Err("variant cannot be a boolean".to_string())
        );
        assert_eq!(
            coerce_variant(Some(&json!(0))),
            Err("variant must be >= 1".to_string())
        );
        assert_eq!(
            coerce_variant(Some(&json!("0"))),
            Err("variant must be >= 1".to_string())
        );
        assert_eq!(
            coerce_variant(Some(&json!("two"))),
            Err("variant must be a positive integer".to_string())
        );
        assert_eq!(
            coerce_variant(Some(&json!(1.5))),
            Err("variant must be a positive integer".to_string())
        );
        assert_eq!(
            coerce_variant(Some(&json!(-1))),
            Err("variant must be >= 1".to_string())
        );
    }
}
