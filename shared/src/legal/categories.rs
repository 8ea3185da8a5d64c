use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub slug: &'static str,
    pub name: &'static str,
    pub image: Option<&'static str>,
    pub create_hint: &'static str,
    /// Words and phrases that point a chat query at this category
    #[serde(skip)]
    pub keywords: &'static [&'static str],
}

pub static CATEGORIES: &[Category] = &[
    Category {
        slug: "land",
        name: "Land",
        image: Some("/images/categories/land.jpg"),
        create_hint: "Sale deed, land purchase/sale agreement, gift deed, PoA, encumbrance certificate requests.",
        keywords: &[
            "plot", "property", "sale deed", "gift deed", "partition deed", "encumbrance",
            "survey number", "mutation", "sub registrar", "power of attorney", "land purchase",
            "sale agreement", "patta", "khata",
        ],
    },
    Category {
        slug: "agreement",
        name: "Agreement",
        image: Some("/images/categories/agreement.jpg"),
        create_hint: "Service agreement, NDA, partnership deed, consultancy, employment/offer letter.",
        keywords: &[
            "contract", "nda", "non disclosure", "partnership deed", "service agreement",
            "consultancy", "employment", "offer letter", "freelance",
        ],
    },
    Category {
        slug: "rental",
        name: "Rental",
        image: Some("/images/categories/rental.jpg"),
        create_hint: "House rent agreement, leave & license, commercial lease, rent receipt, notice to vacate.",
        keywords: &[
            "rent", "rent agreement", "rental agreement", "lease", "lease agreement", "tenant",
            "tenant agreement", "tenancy agreement", "house rent", "landlord", "leave and license",
            "leave license", "eviction", "vacate",
            "security deposit", "rent receipt",
        ],
    },
    Category {
        slug: "affidavit",
        name: "Affidavit",
        image: Some("/images/categories/affidavit.jpg"),
        create_hint: "Name change, address proof, identity proof, lost document, self‑declaration affidavits.",
        keywords: &[
            "name change", "lost document", "address proof", "identity proof", "notary",
            "notarize", "sworn statement", "oath", "declarant",
        ],
    },
    Category {
        slug: "income-declaration",
        name: "Income Declaration",
        image: None,
        create_hint: "Self‑declaration of income for scholarships/reservations/hostel/admissions.",
        keywords: &[
            "income", "income certificate", "annual income", "scholarship", "hostel",
            "reservation", "admission", "salary certificate",
        ],
    },
    Category {
        slug: "ipr",
        name: "IPR",
        image: None,
        create_hint: "Trademark application, copyright notice, license agreements, cease & desist.",
        keywords: &[
            "intellectual property", "trademark", "trade mark", "brand name", "logo", "patent",
            "cease and desist", "infringement", "license agreement",
        ],
    },
    Category {
        slug: "application-form-creation",
        name: "Application Form Creation",
        image: None,
        create_hint: "Custom application forms for society, school, office, tenders, and registrations.",
        keywords: &[
            "application form", "form", "apply", "registration form", "tender", "society",
            "application",
        ],
    },
    Category {
        slug: "design-patents",
        name: "Design Patents",
        image: None,
        create_hint: "Design application cover, declaration, drawings list, and class details sheets.",
        keywords: &[
            "design patent", "design registration", "industrial design", "design application",
            "drawings", "prior art",
        ],
    },
    Category {
        slug: "copyright",
        name: "Copyright",
        image: Some("/images/categories/copyright.jpg"),
        create_hint: "Copyright notice, assignment agreement, license grant, DMCA takedown letter.",
        keywords: &[
            "dmca", "takedown", "piracy", "plagiarism", "copied my", "song", "music", "novel",
            "software code", "content theft",
        ],
    },
    Category {
        slug: "mou",
        name: "MOU",
        image: None,
        create_hint: "Memorandum of Understanding between parties outlining intent and key terms.",
        keywords: &["memorandum of understanding", "memorandum", "letter of intent"],
    },
    Category {
        slug: "security",
        name: "Security",
        image: None,
        create_hint: "Security bond, indemnity, surety undertakings, background verification consent.",
        keywords: &[
            "security bond", "indemnity", "pledge", "mortgage", "hypothecation", "collateral",
            "background verification",
        ],
    },
    Category {
        slug: "surety",
        name: "Surety",
        image: None,
        create_hint: "Surety bond/undertaking for employment, tenancy, loans, and government forms.",
        keywords: &["surety bond", "guarantor", "guarantee", "bail bond", "undertaking"],
    },
];

pub fn find_category(slug: &str) -> Option<&'static Category> {
    CATEGORIES.iter().find(|c| c.slug == slug)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_slugs_are_unique() {
        let slugs: HashSet<_> = CATEGORIES.iter().map(|c| c.slug).collect();
        assert_eq!(slugs.len(), CATEGORIES.len());
        assert_eq!(CATEGORIES.len(), 12);
    }

    #[test]
    fn test_find_category() {
        assert_eq!(find_category("rental").map(|c| c.name), Some("Rental"));
        assert!(find_category("divorce").is_none());
    }

    #[test]
    fn test_keywords_are_lowercase() {
        for c in CATEGORIES {
            for kw in c.keywords {
                assert_eq!(*kw, kw.to_lowercase(), "{} keyword {}", c.slug, kw);
            }
        }
    }
}
