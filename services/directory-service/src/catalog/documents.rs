// Document checklists, draft form fields and the plain-text draft templates
use std::collections::HashMap;

use shared::legal::find_category;
use shared::utils::validation::{clamp_text, MAX_FIELD_CHARS};

use crate::domain::{DocumentDetails, FormField, RenderRequest, TemplatePreview};

type Lines = &'static [&'static str];

struct DetailSet {
    guidance: Lines,
    where_to_get: Lines,
    types_required: Lines,
    verification: Lines,
    submission: Lines,
}

static GENERIC: DetailSet = DetailSet {
    guidance: &[
        "Purpose and use cases of the document",
        "Key fields to fill and common mistakes to avoid",
        "Keep copies and supporting proofs ready",
    ],
    where_to_get: &[
        "Download a template from this site or state portal",
        "Visit nearby eSeva/MeeSeva/Common Service Center if offline required",
    ],
    types_required: &[
        "Self-attested ID proof",
        "Address proof",
        "Any supporting case/property details",
    ],
    verification: &[
        "Local notary/lawyer for attestation",
        "Concerned department staff for acceptance",
    ],
    submission: &[
        "Submit to the appropriate department (Tehsildar/Municipal/Registration office)",
        "Take an acknowledgement receipt",
    ],
};

static PRINTING: Lines = &[
    "Use A4 white bond paper",
    "Black ink, clear margins (1 inch)",
    "Sign on each page if required",
];

static FILLING: Lines = &[
    "Write names as per ID proofs",
    "Double-check dates, addresses, survey/door numbers",
    "Strike off non-applicable clauses",
];

static IP_DETAILS: DetailSet = DetailSet {
    guidance: &[
        "Ownership, license or assignment terms",
        "Notice and takedown (DMCA) where applicable",
    ],
    where_to_get: &["Template here", "IP India portal for filings"],
    types_required: &["Work details", "Owner details"],
    verification: &["Lawyer/IP agent review"],
    submission: &["IP office portal (for filings)"],
};

static OVERRIDES: &[(&str, DetailSet)] = &[
    (
        "land",
        DetailSet {
            guidance: &[
                "Sale deed / gift deed / land purchase agreement basics",
                "Encumbrance certificate and property identifiers (survey no./plot no.)",
            ],
            where_to_get: &["Sub-Registrar office forms", "Download template"],
            types_required: &["Seller & buyer ID/address proofs", "Property documents, tax receipts"],
            verification: &["Registered document at Sub-Registrar", "Lawyer/notary review"],
            submission: &["Sub-Registrar office on appointment"],
        },
    ),
    (
        "rental",
        DetailSet {
            guidance: &[
                "Leave & License vs Rental—choose correct term",
                "Tenant/Owner details and duration",
            ],
            where_to_get: &["Template here", "State e-registration portal (if available)"],
            types_required: &["Owner & tenant ID proofs", "Address proof of premises"],
            verification: &[
                "Notarization if required by locality",
                "Police intimation as per state rules",
            ],
            submission: &["Keep 2 signed copies for both parties"],
        },
    ),
    (
        "affidavit",
        DetailSet {
            guidance: &[
                "Affidavit purpose: name change/lost docs/address proof",
                "Declarant’s details and statements",
            ],
            where_to_get: &["Template here", "Notary/lawyer counters for stamping"],
            types_required: &["ID proof", "Any supporting evidence"],
            verification: &["Notary attestation"],
            submission: &["Submit to the department asking the affidavit"],
        },
    ),
    (
        "income-declaration",
        DetailSet {
            guidance: &["Self‑declaration for scholarship/reservation/hostel"],
            where_to_get: &["Template here"],
            types_required: &["Applicant ID", "Parent/guardian details"],
            verification: &["Institute/office may counter‑sign"],
            submission: &["Submit to the requesting institute/office"],
        },
    ),
    (
        "agreement",
        DetailSet {
            guidance: &["Define parties, scope, term, payment, termination"],
            where_to_get: &["Template here"],
            types_required: &["Parties’ IDs", "Scope/fee details"],
            verification: &["Lawyer review recommended for high‑value contracts"],
            submission: &["Execute in duplicate; share one signed copy each"],
        },
    ),
];

fn overrides_for(slug: &str) -> Option<&'static DetailSet> {
    match slug {
        "copyright" | "ipr" => Some(&IP_DETAILS),
        _ => OVERRIDES.iter().find(|(s, _)| *s == slug).map(|(_, set)| set),
    }
}

// Category-specific list when it has lines, generic otherwise
fn pick(specific: Option<Lines>, generic: Lines) -> Vec<String> {
    specific
        .filter(|lines| !lines.is_empty())
        .unwrap_or(generic)
        .iter()
        .map(|line| line.to_string())
        .collect()
}

pub fn title_for(slug: &str) -> String {
    find_category(slug)
        .map(|c| c.name.to_string())
        .unwrap_or_else(|| slug.to_string())
}

/// Checklist for a document; unknown slugs get the generic checklist
pub fn document_details(slug: &str) -> DocumentDetails {
    let category = find_category(slug);
    let specific = overrides_for(slug);

    DocumentDetails {
        slug: slug.to_string(),
        title: title_for(slug),
        create_hint: category
            .map(|c| c.create_hint)
            .filter(|hint| !hint.is_empty())
            .unwrap_or("Guidance and templates.")
            .to_string(),
        image: category.and_then(|c| c.image).map(str::to_string),
        guidance: pick(specific.map(|s| s.guidance), GENERIC.guidance),
        where_to_get: pick(specific.map(|s| s.where_to_get), GENERIC.where_to_get),
        types_required: pick(specific.map(|s| s.types_required), GENERIC.types_required),
        verification: pick(specific.map(|s| s.verification), GENERIC.verification),
        submission: pick(specific.map(|s| s.submission), GENERIC.submission),
        printing: pick(None, PRINTING),
        filling: pick(None, FILLING),
    }
}

struct FieldDef {
    key: &'static str,
    label: &'static str,
    placeholder: Option<&'static str>,
}

const fn field(key: &'static str, label: &'static str) -> FieldDef {
    FieldDef { key, label, placeholder: None }
}

impl From<&FieldDef> for FormField {
    fn from(def: &FieldDef) -> Self {
        Self {
            key: def.key.to_string(),
            label: def.label.to_string(),
            placeholder: def.placeholder.map(str::to_string),
        }
    }
}

static COMMON_FIELDS: &[FieldDef] = &[
    field("applicantName", "Applicant/Party Name"),
    field("address", "Address"),
    field("date", "Date"),
    field("city", "City"),
];

static CATEGORY_FIELDS: &[(&str, &[FieldDef])] = &[
    (
        "land",
        &[
            field("seller", "Seller Name"),
            field("buyer", "Buyer Name"),
            FieldDef {
                key: "propertyDesc",
                label: "Property Description",
                placeholder: Some("Survey/Plot no., area, location"),
            },
            field("consideration", "Consideration (Amount)"),
        ],
    ),
    (
        "rental",
        &[
            field("landlord", "Landlord Name"),
            field("tenant", "Tenant Name"),
            field("premises", "Premises Address"),
            field("term", "Term (months)"),
            field("rent", "Monthly Rent"),
        ],
    ),
    (
        "affidavit",
        &[
            FieldDef {
                key: "purpose",
                label: "Affidavit Purpose",
                placeholder: Some("Name change / Lost document / Address proof"),
            },
            field("statement1", "Statement 1"),
            field("statement2", "Statement 2"),
        ],
    ),
    (
        "income-declaration",
        &[
            field("relation", "Relation (Self/Parent/Guardian)"),
            field("annualIncome", "Annual Income (INR)"),
            field("forUse", "Purpose/Institution"),
        ],
    ),
    (
        "agreement",
        &[
            field("partyA", "Party A"),
            field("partyB", "Party B"),
            field("scope", "Scope/Services"),
            field("payment", "Payment/Fees"),
        ],
    ),
    (
        "copyright",
        &[
            field("owner", "Owner/Website Name"),
            field("work", "Work/Content Description"),
            field("year", "Year of Publication"),
        ],
    ),
];

/// (common fields, document-specific fields)
pub fn document_fields(slug: &str) -> (Vec<FormField>, Vec<FormField>) {
    let specific = CATEGORY_FIELDS
        .iter()
        .find(|(s, _)| *s == slug)
        .map(|(_, fields)| fields.iter().map(FormField::from).collect())
        .unwrap_or_default();

    (COMMON_FIELDS.iter().map(FormField::from).collect(), specific)
}

/// Draft input after trimming and length capping
#[derive(Debug, Clone, Default)]
pub struct RenderInput {
    pub applicant_name: String,
    pub address: String,
    pub date: String,
    pub city: String,
    fields: HashMap<String, String>,
}

impl RenderInput {
    /// `date` is used only when the request leaves it blank
    pub fn new(request: &RenderRequest, today: &str) -> Self {
        let clamp = |value: &str| clamp_text(value, MAX_FIELD_CHARS);
        let date = request
            .date
            .as_deref()
            .map(clamp)
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| today.to_string());

        Self {
            applicant_name: clamp(&request.applicant_name),
            address: clamp(&request.address),
            date,
            city: clamp(&request.city),
            fields: request
                .fields
                .iter()
                .map(|(key, value)| (key.clone(), clamp(value)))
                .collect(),
        }
    }

    fn field(&self, key: &str) -> &str {
        self.fields.get(key).map(String::as_str).unwrap_or("")
    }
}

/// Plain-text draft, one entry per line
pub fn render_document(slug: &str, input: &RenderInput) -> Vec<String> {
    let f = |key: &str| input.field(key);

    match slug {
        "land" => vec![
            format!("SALE/TRANSFER AGREEMENT — {}, dated {}", input.city, input.date),
            format!("Seller: {}  Buyer: {}", f("seller"), f("buyer")),
            format!("Property: {}", f("propertyDesc")),
            format!("Consideration: ₹{}", f("consideration")),
            "Both parties agree to execute and register the final deed at the Sub‑Registrar office."
                .to_string(),
        ],
        "rental" => vec![
            format!("RENTAL AGREEMENT — dated {}", input.date),
            format!("Landlord: {}  Tenant: {}", f("landlord"), f("tenant")),
            format!("Premises: {}", f("premises")),
            format!("Term: {} months  Rent: ₹{}/month", f("term"), f("rent")),
            "Tenant shall maintain the premises; either party may terminate with notice as per terms."
                .to_string(),
        ],
        "affidavit" => vec![
            format!("AFFIDAVIT — {}, dated {}", input.city, input.date),
            format!(
                "{}, residing at {}, solemnly declares:",
                input.applicant_name, input.address
            ),
            format!("1) {}", f("purpose")),
            format!("2) {}", f("statement1")),
            format!("3) {}", f("statement2")),
            "I affirm the above are true to the best of my knowledge and belief.".to_string(),
        ],
        "income-declaration" => vec![
            format!("INCOME SELF‑DECLARATION — dated {}", input.date),
            format!(
                "I, {}, as {}, declare my/our annual income is ₹{}.",
                input.applicant_name,
                f("relation"),
                f("annualIncome")
            ),
            format!("This declaration is submitted to {}.", f("forUse")),
        ],
        "agreement" => vec![
            format!("SERVICE AGREEMENT — dated {}", input.date),
            format!("Parties: {} and {}", f("partyA"), f("partyB")),
            format!("Scope: {}", f("scope")),
            format!("Payment: {}", f("payment")),
            "Term & termination as mutually agreed; disputes subject to local jurisdiction."
                .to_string(),
        ],
        "copyright" => vec![
            format!("COPYRIGHT NOTICE — {} {}. All rights reserved.", f("year"), f("owner")),
            format!(
                "This notice covers: {}. Unauthorized copying, reproduction or distribution is prohibited.",
                f("work")
            ),
        ],
        _ => vec![
            format!("{} — {}", title_for(slug), input.date),
            format!("Applicant: {}, {}", input.applicant_name, input.address),
        ],
    }
}

static TEMPLATES: &[(&str, &str, &str)] = &[
    ("affidavit", "Affidavit", "/images/categories/affidavit.jpg"),
    ("copyright", "Copyright Notice", "/images/categories/copyright.jpg"),
    ("rental", "Lease / Rental Agreement", "/images/categories/rental.jpg"),
    ("land", "Land Purchase Agreement", "/images/categories/land.jpg"),
];

pub fn template_previews() -> Vec<TemplatePreview> {
    TEMPLATES
        .iter()
        .map(|(slug, title, image)| TemplatePreview {
            slug: slug.to_string(),
            title: title.to_string(),
            image: image.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(fields: &[(&str, &str)]) -> RenderRequest {
        RenderRequest {
            applicant_name: "  Asha Verma ".to_string(),
            address: "12 MG Road".to_string(),
            date: Some("2025-03-01".to_string()),
            city: "Hyderabad".to_string(),
            fields: fields
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    #[test]
    fn test_land_details_override_generic() {
        let details = document_details("land");
        assert_eq!(details.title, "Land");
        assert_eq!(details.where_to_get, vec!["Sub-Registrar office forms", "Download template"]);
        assert_eq!(details.printing[0], "Use A4 white bond paper");
        assert_eq!(details.filling.len(), 3);
    }

    #[test]
    fn test_ipr_shares_copyright_details() {
        assert_eq!(document_details("ipr").submission, document_details("copyright").submission);
        assert_eq!(document_details("ipr").submission, vec!["IP office portal (for filings)"]);
    }

    #[test]
    fn test_unknown_slug_gets_generic_details() {
        let details = document_details("will");
        assert_eq!(details.title, "will");
        assert_eq!(details.create_hint, "Guidance and templates.");
        assert_eq!(details.guidance.len(), 3);
        assert_eq!(details.submission[1], "Take an acknowledgement receipt");
        assert!(details.image.is_none());
    }

    #[test]
    fn test_fields() {
        let (common, specific) = document_fields("affidavit");
        assert_eq!(common.len(), 4);
        assert_eq!(common[0].key, "applicantName");
        assert_eq!(specific.len(), 3);
        assert_eq!(
            specific[0].placeholder.as_deref(),
            Some("Name change / Lost document / Address proof")
        );

        let (_, none) = document_fields("security");
        assert!(none.is_empty());
    }

    #[test]
    fn test_render_rental() {
        let input = RenderInput::new(
            &request(&[("landlord", "R. Kumar"), ("tenant", "Asha"), ("term", "11"), ("rent", "15000")]),
            "2030-01-01",
        );
        let lines = render_document("rental", &input);
        assert_eq!(lines[0], "RENTAL AGREEMENT — dated 2025-03-01");
        assert_eq!(lines[1], "Landlord: R. Kumar  Tenant: Asha");
        // premises was not supplied
        assert_eq!(lines[2], "Premises: ");
        assert_eq!(lines[3], "Term: 11 months  Rent: ₹15000/month");
    }

    #[test]
    fn test_render_affidavit_trims_values() {
        let input = RenderInput::new(&request(&[("purpose", "Name change")]), "2030-01-01");
        let lines = render_document("affidavit", &input);
        assert_eq!(lines[0], "AFFIDAVIT — Hyderabad, dated 2025-03-01");
        assert_eq!(lines[1], "Asha Verma, residing at 12 MG Road, solemnly declares:");
        assert_eq!(lines[2], "1) Name change");
        assert_eq!(lines.len(), 6);
    }

    #[test]
    fn test_render_default_template_and_missing_date() {
        let mut req = request(&[]);
        req.date = Some("   ".to_string());
        let input = RenderInput::new(&req, "2030-01-01");
        let lines = render_document("mou", &input);
        assert_eq!(lines[0], "MOU — 2030-01-01");
        assert_eq!(lines[1], "Applicant: Asha Verma, 12 MG Road");
    }

    #[test]
    fn test_values_are_capped() {
        let long = "x".repeat(MAX_FIELD_CHARS + 50);
        let input = RenderInput::new(&request(&[("owner", long.as_str())]), "2030-01-01");
        let lines = render_document("copyright", &input);
        assert!(lines[0].contains(&"x".repeat(MAX_FIELD_CHARS)));
        assert!(!lines[0].contains(&"x".repeat(MAX_FIELD_CHARS + 1)));
    }

    #[test]
    fn test_template_order() {
        let slugs: Vec<String> = template_previews().into_iter().map(|t| t.slug).collect();
        assert_eq!(slugs, vec!["affidavit", "copyright", "rental", "land"]);
    }
}
