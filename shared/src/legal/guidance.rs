use serde::Serialize;

/// Static checklist shown on category pages and injected into chat prompts
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Guidance {
    pub where_to_get: &'static [&'static str],
    pub type_required: &'static [&'static str],
    pub verification_contacts: &'static [&'static str],
    pub submission_offices: &'static [&'static str],
    pub print_guidance: &'static [&'static str],
    pub steps: &'static [&'static str],
}

impl Guidance {
    // All guidance lines joined and lower-cased, for text search
    pub fn haystack(&self) -> String {
        [
            self.where_to_get,
            self.type_required,
            self.verification_contacts,
            self.submission_offices,
            self.print_guidance,
            self.steps,
        ]
        .iter()
        .flat_map(|lines| lines.iter())
        .copied()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
    }
}

static GUIDANCE: &[(&str, Guidance)] = &[
    (
        "land",
        Guidance {
            where_to_get: &["Local sub-registrar office", "Revenue department website"],
            type_required: &["Sale deed / Gift deed / Partition deed (as applicable)", "ID proofs of parties"],
            verification_contacts: &["Licensed advocate", "Sub-registrar office"],
            submission_offices: &["Sub-registrar office", "Municipal/Revenue department"],
            print_guidance: &["A4 bond paper", "Black ink, legible fonts"],
            steps: &[
                "Collect ownership documents and encumbrance certificate",
                "Draft deed as per purpose (sale/gift/lease)",
                "Get stamp duty estimation",
                "Book appointment at sub-registrar",
                "Execute and register deed with witnesses",
            ],
        },
    ),
    (
        "agreement",
        Guidance {
            where_to_get: &["Template from legal services website", "Drafted by an advocate"],
            type_required: &["Parties' details", "Scope/terms, consideration, timelines"],
            verification_contacts: &["Advocate/Notary"],
            submission_offices: &["Not required unless registration mandatory"],
            print_guidance: &["A4 paper", "Both party signatures on all pages"],
            steps: &["Draft terms", "Review risks", "Sign and notarize if needed"],
        },
    ),
    (
        "rental",
        Guidance {
            where_to_get: &["State's rent agreement portal", "Notary/Advocate"],
            type_required: &["Owner and tenant KYC", "Property details, rent, tenure"],
            verification_contacts: &["Notary public", "Lawyer"],
            submission_offices: &[
                "E-registration portal (state-wise)",
                "Sub-registrar if tenure>11 months (varies by state)",
            ],
            print_guidance: &["Non-judicial stamp paper as per state", "Two witnesses"],
            steps: &["Draft agreement", "Calculate stamp duty", "E-register or notarize", "Share copies with parties"],
        },
    ),
    (
        "affidavit",
        Guidance {
            where_to_get: &["Notary office", "District court complex"],
            type_required: &["Declarant details", "Statement of facts"],
            verification_contacts: &["Notary public"],
            submission_offices: &["As per use-case: university, bank, govt dept"],
            print_guidance: &["Non-judicial stamp paper (denomination varies)", "Sign before notary"],
            steps: &["Prepare draft", "Visit notary with ID", "Sign and notarize", "Submit to requesting authority"],
        },
    ),
    (
        "income-declaration",
        Guidance {
            where_to_get: &["Chartered accountant", "Government forms"],
            type_required: &["Income sources", "Bank statements (if needed)"],
            verification_contacts: &["CA/Notary"],
            submission_offices: &["As specified by requesting authority"],
            print_guidance: &["A4 paper", "Attest supporting documents"],
            steps: &["Collect proofs", "Draft declaration", "Notarize if required", "Submit"],
        },
    ),
    (
        "ipr",
        Guidance {
            where_to_get: &["IP India portal", "Patent/design/trademark agent"],
            type_required: &["Type: patent/design/trademark", "Owner details, description"],
            verification_contacts: &["Registered IP agent", "Lawyer"],
            submission_offices: &["https://ipindia.gov.in"],
            print_guidance: &["Follow portal formats", "Annex drawings/specifications"],
            steps: &["Choose category", "Prepare specification", "File online", "Track examination"],
        },
    ),
    (
        "application-form-creation",
        Guidance {
            where_to_get: &["Concerned department website", "CSC/e-Seva"],
            type_required: &["Applicant details", "Purpose-specific attachments"],
            verification_contacts: &["Helpline of department", "Facilitator"],
            submission_offices: &["Online portal", "Local office"],
            print_guidance: &["A4 paper", "Attach photocopies as per checklist"],
            steps: &["Download latest form", "Fill carefully", "Attach required docs", "Submit online/offline"],
        },
    ),
    (
        "design-patents",
        Guidance {
            where_to_get: &["IP India Designs Office", "Registered patent/design agent"],
            type_required: &["Novel design details", "Drawings/images"],
            verification_contacts: &["IP agent"],
            submission_offices: &["IP India portal"],
            print_guidance: &["As per design rules", "High-quality prints of drawings"],
            steps: &["Prior art search", "Prepare drawings", "File application", "Respond to examination"],
        },
    ),
    (
        "copyright",
        Guidance {
            where_to_get: &["Copyright Office of India", "Online portal"],
            type_required: &["Work details (literary/artistic/software)", "Author/owner details"],
            verification_contacts: &["Lawyer/Agent"],
            submission_offices: &["https://copyright.gov.in"],
            print_guidance: &["Digital submission preferred", "Attach source code extracts for software"],
            steps: &["Prepare work samples", "File online", "Track diary number", "Respond to objections"],
        },
    ),
    (
        "mou",
        Guidance {
            where_to_get: &["Advocate-drafted", "Templates reviewed by lawyer"],
            type_required: &["Party details", "Scope, deliverables, term"],
            verification_contacts: &["Lawyer"],
            submission_offices: &["Not mandatory (kept between parties)"],
            print_guidance: &["A4 paper", "Initial every page"],
            steps: &["Draft terms", "Review", "Sign by both parties", "Notarize if needed"],
        },
    ),
    (
        "security",
        Guidance {
            where_to_get: &["Bank-prescribed formats", "Lawyer-drafted"],
            type_required: &["Type: pledge/mortgage/hypothecation", "Asset and borrower details"],
            verification_contacts: &["Bank/legal advisor"],
            submission_offices: &["Bank/Registrar depending on instrument"],
            print_guidance: &["Stamp duty as per state", "Witness signatures"],
            steps: &["Choose instrument", "Draft terms", "Execute and register if applicable"],
        },
    ),
    (
        "surety",
        Guidance {
            where_to_get: &["Bank/company formats", "Notary"],
            type_required: &["Surety and principal details", "Obligations and limits"],
            verification_contacts: &["Bank/legal advisor"],
            submission_offices: &["Bank/company"],
            print_guidance: &["Non-judicial stamp paper (as required)", "Witness signatures"],
            steps: &["Collect KYC", "Draft surety terms", "Execute and notarize if required"],
        },
    ),
];

pub fn guidance_for(slug: &str) -> Option<&'static Guidance> {
    GUIDANCE.iter().find(|(s, _)| *s == slug).map(|(_, g)| g)
}
