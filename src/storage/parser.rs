use serde_json::{Map, Value};
use crate::core::error::{Error, Result};
use crate::core::types::{Dataset, DatasetCounts, DatasetMeta, Domain, Term, Word};

type Object = Map<String, Value>;

/// Converts JSON trees into dataset entities.
///
/// Record-level problems never fail: an element that is not an object, or
/// lacks its key field (`koName` for terms and words, `name` for domains), is
/// dropped. Only document structure (root shape, `version`, container types)
/// produces an error.
#[derive(Debug, Default, Clone, Copy)]
pub struct DatasetParser;

impl DatasetParser {
    pub fn new() -> Self {
        DatasetParser
    }

    /// Parse a full override document `{version, meta?, terms?, words?, domains?}`.
    ///
    /// Returns the trimmed version alongside the dataset.
    pub fn parse_document(&self, root: &Value) -> Result<(String, Dataset)> {
        let obj = root
            .as_object()
            .ok_or_else(|| Error::invalid_dataset("root must be a JSON object"))?;

        let version = obj
            .get("version")
            .and_then(primitive_string)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .ok_or_else(|| Error::invalid_dataset("missing required field: version"))?;

        let meta = match present(obj, "meta") {
            None => None,
            Some(Value::Object(meta)) => Some(self.parse_meta(meta)),
            Some(_) => return Err(Error::invalid_dataset("meta must be an object")),
        };

        let terms = self.parse_terms(array_field(obj, "terms")?);
        let words = self.parse_words(array_field(obj, "words")?);
        let domains = self.parse_domains(array_field(obj, "domains")?);

        Ok((version, Dataset { meta, terms, words, domains }))
    }

    pub fn parse_meta(&self, obj: &Object) -> DatasetMeta {
        let counts = obj.get("counts").and_then(Value::as_object).map(|counts| DatasetCounts {
            terms: uint_or_none(counts.get("terms")).unwrap_or(0),
            words: uint_or_none(counts.get("words")).unwrap_or(0),
            domains: uint_or_none(counts.get("domains")).unwrap_or(0),
        });

        DatasetMeta {
            dataset_version: string_or_none(obj, "dataset_version"),
            source: string_or_none(obj, "source"),
            generated_at: string_or_none(obj, "generated_at"),
            counts,
        }
    }

    pub fn parse_terms(&self, array: &[Value]) -> Vec<Term> {
        array.iter()
            .filter_map(Value::as_object)
            .filter_map(|obj| {
                let ko_name = required_string(obj, "koName")?;
                Some(Term {
                    ko_name,
                    abbr: string_or_none(obj, "abbr"),
                    description: string_or_none(obj, "description"),
                    domain_name: string_or_none(obj, "domainName"),
                    synonyms: string_list(obj, "synonyms"),
                })
            })
            .collect()
    }

    pub fn parse_words(&self, array: &[Value]) -> Vec<Word> {
        array.iter()
            .filter_map(Value::as_object)
            .filter_map(|obj| {
                let ko_name = required_string(obj, "koName")?;
                Some(Word {
                    ko_name,
                    en_name: string_or_none(obj, "enName"),
                    abbr: string_or_none(obj, "abbr"),
                    description: string_or_none(obj, "description"),
                    synonyms: string_list(obj, "synonyms"),
                    is_form_word: obj.get("isFormWord").and_then(Value::as_bool).unwrap_or(false),
                })
            })
            .collect()
    }

    pub fn parse_domains(&self, array: &[Value]) -> Vec<Domain> {
        array.iter()
            .filter_map(Value::as_object)
            .filter_map(|obj| {
                let name = required_string(obj, "name")?;
                Some(Domain {
                    name,
                    data_type: string_or_none(obj, "dataType"),
                    length: uint_or_none(obj.get("length")),
                    scale: uint_or_none(obj.get("scale")),
                    storage_format: string_or_none(obj, "storageFormat"),
                    display_format: string_or_none(obj, "displayFormat"),
                    allowed_values: string_or_none(obj, "allowedValues"),
                })
            })
            .collect()
    }
}

/// Field value unless absent or JSON null.
fn present<'a>(obj: &'a Object, name: &str) -> Option<&'a Value> {
    obj.get(name).filter(|value| !value.is_null())
}

fn array_field<'a>(obj: &'a Object, name: &str) -> Result<&'a [Value]> {
    match present(obj, name) {
        None => Ok(&[]),
        Some(Value::Array(items)) => Ok(items.as_slice()),
        Some(_) => Err(Error::invalid_dataset(format!("{name} must be an array"))),
    }
}

pub(crate) fn primitive_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Primitives read as text; nested values keep their JSON form.
fn string_or_none(obj: &Object, name: &str) -> Option<String> {
    let value = present(obj, name)?;
    primitive_string(value).or_else(|| Some(value.to_string()))
}

fn required_string(obj: &Object, name: &str) -> Option<String> {
    string_or_none(obj, name).filter(|s| !s.trim().is_empty())
}

fn string_list(obj: &Object, name: &str) -> Vec<String> {
    match obj.get(name) {
        Some(Value::Array(items)) => items.iter()
            .filter_map(|item| item.as_str().map(str::to_string))
            .collect(),
        _ => Vec::new(),
    }
}

/// JSON number (fraction truncated) or numeric string; anything else, including
/// negative values, yields `None`.
fn uint_or_none(value: Option<&Value>) -> Option<u32> {
    match value? {
        Value::Number(n) => n.as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f.trunc() as u64))
            .and_then(|n| u32::try_from(n).ok()),
        Value::String(s) => s.trim().parse::<u32>().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use crate::core::error::ErrorKind;

    #[test]
    fn drops_records_without_key_field() {
        let parser = DatasetParser::new();
        let terms = parser.parse_terms(&[
            json!({"koName": "고객번호", "abbr": "CUST_NO"}),
            json!({"abbr": "ORPHAN"}),
            json!({"koName": "   "}),
            json!("not an object"),
            Value::Null,
        ]);
        assert_eq!(terms.len(), 1);
        assert_eq!(terms[0].ko_name, "고객번호");
        assert_eq!(terms[0].abbr.as_deref(), Some("CUST_NO"));
    }

    #[test]
    fn field_defaults_are_lenient() {
        let parser = DatasetParser::new();
        let words = parser.parse_words(&[json!({
            "koName": "등록",
            "enName": null,
            "synonyms": ["기록", 3, null, "기재"],
            "isFormWord": "yes"
        })]);
        let word = &words[0];
        assert_eq!(word.en_name, None);
        assert_eq!(word.synonyms, vec!["기록", "기재"]);
        assert!(!word.is_form_word);

        let words = parser.parse_words(&[json!({"koName": "및", "isFormWord": true, "synonyms": "x"})]);
        assert!(words[0].is_form_word);
        assert!(words[0].synonyms.is_empty());
    }

    #[test]
    fn numeric_fields_accept_numbers_and_numeric_strings() {
        let parser = DatasetParser::new();
        let domains = parser.parse_domains(&[
            json!({"name": "금액", "dataType": "NUMERIC", "length": 15, "scale": "2"}),
            json!({"name": "명", "length": "long", "scale": -1}),
            json!({"name": "비율", "length": 5.7}),
        ]);
        assert_eq!(domains[0].length, Some(15));
        assert_eq!(domains[0].scale, Some(2));
        assert_eq!(domains[1].length, None);
        assert_eq!(domains[1].scale, None);
        assert_eq!(domains[2].length, Some(5));
    }

    #[test]
    fn version_only_document_is_valid() {
        let (version, dataset) = DatasetParser::new()
            .parse_document(&json!({"version": " 2024.1 "}))
            .unwrap();
        assert_eq!(version, "2024.1");
        assert!(dataset.meta.is_none());
        assert!(dataset.is_empty());
    }

    #[test]
    fn rejects_bad_document_structure() {
        let parser = DatasetParser::new();
        for doc in [
            json!([]),
            json!({"terms": []}),
            json!({"version": "  "}),
            json!({"version": "1", "terms": {}}),
            json!({"version": "1", "meta": []}),
        ] {
            let err = parser.parse_document(&doc).unwrap_err();
            assert_eq!(err.kind, ErrorKind::InvalidDataset, "{doc}");
        }
    }

    #[test]
    fn parses_meta_with_partial_counts() {
        let meta = DatasetParser::new().parse_meta(
            json!({"dataset_version": "v3", "source": "std", "counts": {"terms": 10, "words": "4"}})
                .as_object()
                .unwrap(),
        );
        assert_eq!(meta.dataset_version.as_deref(), Some("v3"));
        assert_eq!(meta.generated_at, None);
        assert_eq!(meta.counts, Some(DatasetCounts { terms: 10, words: 4, domains: 0 }));
    }
}
