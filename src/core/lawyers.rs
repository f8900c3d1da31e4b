//! # Lawyer Directory
//!
//! Lookup contract for lawyer search. `StaticDirectory` is the built-in
//! fixture: three records, returned whatever the criteria.

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct LawyerRecord {
    pub name: String,
    pub specialization: String,
    pub location: String,
    pub experience_years: u8,
    pub contact: String,
}

/// Search criteria. Empty fields match everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LawyerQuery {
    pub location: Option<String>,
    pub specialization: Option<String>,
}

pub trait LawyerDirectory: Send + Sync {
    fn search(&self, query: &LawyerQuery) -> Vec<LawyerRecord>;
}

pub struct StaticDirectory;

impl StaticDirectory {
    pub fn records() -> Vec<LawyerRecord> {
        vec![
            LawyerRecord {
                name: "Adv. Priya Sharma".into(),
                specialization: "Criminal Law".into(),
                location: "New Delhi".into(),
                experience_years: 12,
                contact: "+91 98110 00001".into(),
            },
            LawyerRecord {
                name: "Adv. Rahul Deshmukh".into(),
                specialization: "Family Law".into(),
                location: "Mumbai".into(),
                experience_years: 8,
                contact: "+91 98200 00002".into(),
            },
            LawyerRecord {
                name: "Adv. Ananya Reddy".into(),
                specialization: "Property & Civil Law".into(),
                location: "Hyderabad".into(),
                experience_years: 15,
                contact: "+91 98490 00003".into(),
            },
        ]
    }
}

impl LawyerDirectory for StaticDirectory {
    fn search(&self, _query: &LawyerQuery) -> Vec<LawyerRecord> {
        Self::records()
    }
}
