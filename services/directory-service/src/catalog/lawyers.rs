use crate::domain::{Lawyer, LawyerFilter};

pub struct LawyerEntry {
    pub id: &'static str,
    pub name: &'static str,
    pub practices: &'static [&'static str],
    pub experience_years: i32,
    pub location: &'static str,
    pub fee: f64,
}

impl From<&LawyerEntry> for Lawyer {
    fn from(entry: &LawyerEntry) -> Self {
        Self {
            id: entry.id.to_string(),
            name: entry.name.to_string(),
            practices: entry.practices.iter().map(|p| p.to_string()).collect(),
            experience_years: entry.experience_years,
            location: entry.location.to_string(),
            fee: entry.fee,
        }
    }
}

pub static LAWYERS: &[LawyerEntry] = &[
    LawyerEntry {
        id: "l1",
        name: "Adv. Aditi Rao",
        practices: &["Civil", "Property", "Contracts"],
        experience_years: 7,
        location: "Hyderabad",
        fee: 1500.0,
    },
    LawyerEntry {
        id: "l2",
        name: "Adv. Karthik Menon",
        practices: &["Criminal", "Cyber"],
        experience_years: 5,
        location: "Bengaluru",
        fee: 2000.0,
    },
    LawyerEntry {
        id: "l3",
        name: "Adv. Nisha Sharma",
        practices: &["IPR", "Design Patents", "Trademarks"],
        experience_years: 9,
        location: "Mumbai",
        fee: 2500.0,
    },
    LawyerEntry {
        id: "l4",
        name: "Adv. Rohan Gupta",
        practices: &["Family", "Rental", "Civil"],
        experience_years: 6,
        location: "Delhi",
        fee: 1200.0,
    },
    LawyerEntry {
        id: "l5",
        name: "Adv. Priya Desai",
        practices: &["Corporate", "MOU", "Agreements"],
        experience_years: 8,
        location: "Pune",
        fee: 1800.0,
    },
];

/// Built-in lawyers passing `filter`, in listing order
pub fn builtin_lawyers(filter: &LawyerFilter) -> Vec<Lawyer> {
    LAWYERS
        .iter()
        .map(Lawyer::from)
        .filter(|lawyer| filter.matches(lawyer))
        .collect()
}

pub fn find_builtin_lawyer(id: &str) -> Option<Lawyer> {
    LAWYERS.iter().find(|entry| entry.id == id).map(Lawyer::from)
}
