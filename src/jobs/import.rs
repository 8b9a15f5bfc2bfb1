use serde_json::Value;

use crate::BoardError;

use super::Job;

fn has_text(record: &Value, field: &str) -> bool {
    record
        .get(field)
        .and_then(Value::as_str)
        .is_some_and(|value| !value.is_empty())
}

/// Parses an exported job list. All or nothing: one bad record rejects the
/// whole payload.
pub fn parse_import(text: &str) -> Result<Vec<Job>, BoardError> {
    let parsed: Value = serde_json::from_str(text)
        .map_err(|err| BoardError::ImportFormat(format!("not valid JSON ({err})")))?;

    let Value::Array(records) = parsed else {
        return Err(BoardError::ImportFormat("expected a JSON array".to_owned()));
    };

    if let Some(index) = records
        .iter()
        .position(|record| !has_text(record, "id") || !has_text(record, "jobTitle"))
    {
        return Err(BoardError::ImportFormat(format!(
            "record {index} lacks an id or jobTitle"
        )));
    }

    records
        .into_iter()
        .enumerate()
        .map(|(index, record)| {
            serde_json::from_value(record)
                .map_err(|err| BoardError::ImportFormat(format!("record {index}: {err}")))
        })
        .collect()
}
