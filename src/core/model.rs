//! Serializable output records.
//!
//! These are the records handed to the documentation renderer: one
//! [`TypeDescription`] per requested export, each with zero or more
//! [`FieldDescription`]s (table rows).

use serde::{Deserialize, Serialize};

/// Description of one exported symbol.
///
/// At least one of `type_text`/`fields` is set. Functions set both: the rendered
/// signature and one field per parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeDescription {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub type_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<FieldDescription>>,
}

/// One member (or function parameter) of a [`TypeDescription`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDescription {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
    #[serde(rename = "type")]
    pub type_text: String,
    /// Default value text, from the parameter initializer or a default-value tag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preset: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub reactive: bool,
}

impl FieldDescription {
    pub fn new(name: impl Into<String>, type_text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            summary: None,
            remarks: None,
            type_text: type_text.into(),
            preset: None,
            reactive: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_omits_absent_values() {
        let field = FieldDescription::new("id", "string");
        let json = serde_json::to_string(&field).unwrap();
        assert_eq!(json, r#"{"name":"id","type":"string"}"#);
    }

    #[test]
    fn test_type_description_serializes_type_key() {
        let desc = TypeDescription {
            name: "Size".to_string(),
            summary: Some("Button size".to_string()),
            remarks: None,
            type_text: Some(r#""sm" | "lg""#.to_string()),
            fields: None,
        };
        insta::assert_json_snapshot!(desc, @r#"
        {
          "name": "Size",
          "summary": "Button size",
          "type": "\"sm\" | \"lg\""
        }
        "#);
    }

    #[test]
    fn test_reactive_field_round_trips() {
        let json = r#"{"name":"fontSize","type":"string","preset":"16px","reactive":true}"#;
        let field: FieldDescription = serde_json::from_str(json).unwrap();
        assert!(field.reactive);
        assert_eq!(field.preset.as_deref(), Some("16px"));
        assert_eq!(serde_json::to_string(&field).unwrap(), json);
    }
}
