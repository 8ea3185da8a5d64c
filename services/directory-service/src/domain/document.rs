// Document details, form fields and rendered drafts
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DocumentDetails {
    pub slug: String,
    pub title: String,
    pub create_hint: String,
    pub image: Option<String>,
    pub guidance: Vec<String>,
    pub where_to_get: Vec<String>,
    pub types_required: Vec<String>,
    pub verification: Vec<String>,
    pub submission: Vec<String>,
    pub printing: Vec<String>,
    pub filling: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct FormField {
    pub key: String,
    pub label: String,
    pub placeholder: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DocumentFieldsResponse {
    pub slug: String,
    pub title: String,
    /// Fields every draft asks for
    pub common: Vec<FormField>,
    /// Fields specific to this document type
    pub fields: Vec<FormField>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RenderRequest {
    #[serde(default)]
    pub applicant_name: String,
    #[serde(default)]
    pub address: String,
    /// YYYY-MM-DD; today (UTC) when omitted
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub fields: HashMap<String, String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RenderedDocument {
    pub slug: String,
    pub title: String,
    pub lines: Vec<String>,
    /// Lines joined with newlines, ready to print
    pub text: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TemplatePreview {
    pub slug: String,
    pub title: String,
    pub image: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TemplateListResponse {
    pub items: Vec<TemplatePreview>,
}
