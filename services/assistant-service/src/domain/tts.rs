use serde::Deserialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TtsRequest {
    #[serde(default)]
    pub text: String,
    pub lang: Option<String>,
    /// Specific Google voice, e.g. "hi-IN-Wavenet-A"
    pub voice_name: Option<String>,
}
