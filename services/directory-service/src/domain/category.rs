// Category listings and the guidance checklist behind each one
use serde::Serialize;
use utoipa::ToSchema;

use shared::legal::{Category, Guidance};

use super::lawyer::Lawyer;

fn owned(lines: &[&str]) -> Vec<String> {
    lines.iter().map(|line| line.to_string()).collect()
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategorySummary {
    pub slug: String,
    pub name: String,
    pub image: Option<String>,
    pub create_hint: String,
}

impl From<&Category> for CategorySummary {
    fn from(category: &Category) -> Self {
        Self {
            slug: category.slug.to_string(),
            name: category.name.to_string(),
            image: category.image.map(str::to_string),
            create_hint: category.create_hint.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GuidanceResponse {
    pub where_to_get: Vec<String>,
    pub type_required: Vec<String>,
    pub verification_contacts: Vec<String>,
    pub submission_offices: Vec<String>,
    pub print_guidance: Vec<String>,
    pub steps: Vec<String>,
}

impl From<&Guidance> for GuidanceResponse {
    fn from(guidance: &Guidance) -> Self {
        Self {
            where_to_get: owned(guidance.where_to_get),
            type_required: owned(guidance.type_required),
            verification_contacts: owned(guidance.verification_contacts),
            submission_offices: owned(guidance.submission_offices),
            print_guidance: owned(guidance.print_guidance),
            steps: owned(guidance.steps),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CategoryListResponse {
    pub items: Vec<CategorySummary>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CategoryDetailResponse {
    #[serde(flatten)]
    pub category: CategorySummary,
    pub guidance: Option<GuidanceResponse>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategorySearchHit {
    pub slug: String,
    pub name: String,
    pub image: Option<String>,
    /// First line of the guidance, shown under the result
    pub snippet: String,
}

impl CategorySearchHit {
    pub fn new(category: &Category, guidance: Option<&Guidance>) -> Self {
        let snippet = guidance
            .and_then(|g| {
                g.steps
                    .first()
                    .or_else(|| g.where_to_get.first())
                    .or_else(|| g.type_required.first())
            })
            .copied()
            .unwrap_or("Guidance and templates");

        Self {
            slug: category.slug.to_string(),
            name: category.name.to_string(),
            image: category.image.map(str::to_string),
            snippet: snippet.to_string(),
        }
    }
}

#[derive(Debug, serde::Deserialize, utoipa::IntoParams)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SearchResponse {
    pub query: String,
    pub categories: Vec<CategorySearchHit>,
    pub lawyers: Vec<Lawyer>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::legal::{find_category, guidance_for};

    #[test]
    fn test_snippet_prefers_first_step() {
        let category = find_category("rental").unwrap();
        let hit = CategorySearchHit::new(category, guidance_for("rental"));
        assert_eq!(hit.snippet, guidance_for("rental").unwrap().steps[0]);
    }

    #[test]
    fn test_snippet_without_guidance() {
        let category = find_category("land").unwrap();
        let hit = CategorySearchHit::new(category, None);
        assert_eq!(hit.snippet, "Guidance and templates");
        assert_eq!(hit.image.as_deref(), Some("/images/categories/land.jpg"));
    }

    #[test]
    fn test_detail_flattens_category() {
        let category = find_category("affidavit").unwrap();
        let detail = CategoryDetailResponse {
            category: category.into(),
            guidance: guidance_for("affidavit").map(Into::into),
        };
        let json = serde_json::to_value(&detail).unwrap();
        assert_eq!(json["slug"], "affidavit");
        assert!(json["createHint"].is_string());
        assert!(json["guidance"]["whereToGet"].is_array());
    }
}
