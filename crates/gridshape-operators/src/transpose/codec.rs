//! Parameter record <-> `TransposeConfig`.
//!
//! Record layout (keys are persisted in operation histories):
//! ```json
//! { "op": "transpose-columns-into-rows",
//!   "description": "Transpose cells in 3 column(s) starting with Q1 into rows",
//!   "startColumnName": "Q1", "columnCount": 3, "combinedColumnName": "Quarter",
//!   "prependColumnName": false, "separator": ":", "ignoreBlankCells": true }
//! ```

use serde::{Deserialize, Serialize};

use super::config::TransposeConfig;
use crate::registry::OpKind;
use crate::traits::OpError;

#[derive(Serialize)]
struct RecordOut<'a> {
    op: &'static str,
    description: String,
    #[serde(flatten)]
    config: &'a TransposeConfig,
}

impl<'a> RecordOut<'a> {
    fn new(config: &'a TransposeConfig) -> Self {
        Self {
            op: OpKind::TransposeColumnsIntoRows.id(),
            description: config.describe(),
            config,
        }
    }
}

/// Read the six parameter fields; `op`, `description` and unknown keys are ignored.
pub fn decode(record: &serde_json::Value) -> Result<TransposeConfig, OpError> {
    let config = TransposeConfig::deserialize(record)?;
    config.validate()?;
    Ok(config)
}

pub fn encode(config: &TransposeConfig) -> Result<serde_json::Value, OpError> {
    serde_json::to_value(RecordOut::new(config)).map_err(|e| OpError::Schema(e.to_string()))
}

/// JSON text with keys in persisted order (`encode` yields a key-sorted map).
pub fn encode_string(config: &TransposeConfig) -> Result<String, OpError> {
    serde_json::to_string(&RecordOut::new(config)).map_err(|e| OpError::Schema(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::ConfigError;
    use serde_json::json;

    fn record() -> serde_json::Value {
        json!({
            "op": "transpose-columns-into-rows",
            "description": "whatever was stored",
            "startColumnName": "Q1",
            "columnCount": 3,
            "combinedColumnName": "Quarter",
            "prependColumnName": true,
            "separator": ": ",
            "ignoreBlankCells": false
        })
    }

    #[test]
    fn decodes_all_fields() {
        let cfg = decode(&record()).unwrap();
        assert_eq!(cfg.start_column_name, "Q1");
        assert_eq!(cfg.column_count, 3);
        assert_eq!(cfg.combined_column_name, "Quarter");
        assert!(cfg.prepend_column_name);
        assert_eq!(cfg.separator, ": ");
        assert!(!cfg.ignore_blank_cells);
    }

    #[test]
    fn missing_required_field_fails() {
        for key in [
            "startColumnName",
            "columnCount",
            "prependColumnName",
            "separator",
            "ignoreBlankCells",
        ] {
            let mut rec = record();
            rec.as_object_mut().unwrap().remove(key);
            let err = decode(&rec).unwrap_err();
            assert!(
                matches!(&err, OpError::Deserialize(msg) if msg.contains(key)),
                "{key}: {err}"
            );
        }
    }

    #[test]
    fn mistyped_fields_fail() {
        let cases = [
            ("columnCount", json!("3")),
            ("columnCount", json!(-1)),
            ("columnCount", json!(2.5)),
            ("startColumnName", json!(7)),
            ("prependColumnName", json!("true")),
            ("separator", json!(null)),
            ("ignoreBlankCells", json!(1)),
        ];
        for (key, value) in cases {
            let mut rec = record();
            rec[key] = value.clone();
            assert!(
                matches!(decode(&rec), Err(OpError::Deserialize(_))),
                "{key} = {value}"
            );
        }
    }

    #[test]
    fn combined_name_may_be_absent_or_null() {
        let mut rec = record();
        rec["combinedColumnName"] = json!(null);
        assert_eq!(decode(&rec).unwrap().combined_column_name, "");

        rec.as_object_mut().unwrap().remove("combinedColumnName");
        assert_eq!(decode(&rec).unwrap().combined_column_name, "");
    }

    #[test]
    fn zero_column_count_is_a_config_error() {
        let mut rec = record();
        rec["columnCount"] = json!(0);
        assert!(matches!(
            decode(&rec),
            Err(OpError::Config(ConfigError::ZeroColumnCount))
        ));
    }

    #[test]
    fn non_object_record_fails() {
        assert!(matches!(decode(&json!([1, 2])), Err(OpError::Deserialize(_))));
    }

    #[test]
    fn encode_adds_op_and_description() {
        let cfg = decode(&record()).unwrap();
        let out = encode(&cfg).unwrap();
        assert_eq!(out["op"], "transpose-columns-into-rows");
        assert_eq!(
            out["description"],
            "Transpose cells in 3 column(s) starting with Q1 into rows"
        );
        assert_eq!(out["columnCount"], 3);
        assert_eq!(out.as_object().unwrap().len(), 8);
        assert_eq!(decode(&out).unwrap(), cfg);
    }

    #[test]
    fn encoded_text_keeps_persisted_key_order() {
        let text = encode_string(&TransposeConfig::new("A", 2)).unwrap();
        assert_eq!(
            text,
            r#"{"op":"transpose-columns-into-rows","description":"Transpose cells in 2 column(s) starting with A into rows","startColumnName":"A","columnCount":2,"combinedColumnName":"","prependColumnName":false,"separator":":","ignoreBlankCells":true}"#
        );
    }
}
