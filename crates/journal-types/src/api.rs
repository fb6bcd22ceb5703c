use serde::{Deserialize, Serialize};

use crate::models::Reactions;

// Fields are optional so that absent and `null` values both reach the store
// and fail there as validation errors instead of in the JSON extractor.

// -- Entries --

#[derive(Debug, Default, Deserialize)]
pub struct CreateEntryRequest {
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub entry: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateEntryResponse {
    pub success: bool,
    pub id: String,
}

// -- Reactions --

#[derive(Debug, Serialize, Deserialize)]
pub struct ReactResponse {
    pub success: bool,
    pub reactions: Reactions,
}

// -- Comments --

#[derive(Debug, Default, Deserialize)]
pub struct AddCommentRequest {
    #[serde(default)]
    pub entry_id: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
}

// -- Generic --

#[derive(Debug, Serialize, Deserialize)]
pub struct SuccessResponse {
    pub success: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_and_absent_fields_deserialize_to_none() {
        let req: CreateEntryRequest =
            serde_json::from_str(r#"{"author": null, "title": "t"}"#).unwrap();
        assert_eq!(req.author, None);
        assert_eq!(req.title.as_deref(), Some("t"));
        assert_eq!(req.entry, None);

        let req: AddCommentRequest = serde_json::from_str(r#"{"comment": null}"#).unwrap();
        assert_eq!(req.entry_id, None);
        assert_eq!(req.comment, None);
    }
}
