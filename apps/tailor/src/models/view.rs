use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Skills partitioned against the job description.
///
/// `core` and `nice` may share entries; `other` never repeats either of them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkillGroups {
    pub core: Vec<String>,
    pub nice: Vec<String>,
    pub other: Vec<String>,
}

impl SkillGroups {
    /// `core ++ nice ++ other`, order preserved.
    pub fn flatten(&self) -> Vec<String> {
        self.core
            .iter()
            .chain(&self.nice)
            .chain(&self.other)
            .cloned()
            .collect()
    }
}

/// The merged, de-duplicated view-model every resume template renders from.
/// Every field is always present; absent inputs become empty strings or lists.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NormalizedView {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub links: Vec<String>,
    #[serde(rename = "jobTitle")]
    pub job_title: String,
    #[serde(rename = "jobCompany")]
    pub job_company: String,
    pub summary: String,
    pub skills: Vec<String>,
    pub skills_grouped: SkillGroups,
    pub experience: Vec<Value>,
    pub education: Vec<Value>,
    pub projects: Vec<Value>,
    pub achievements: Vec<Value>,
    pub certifications: Vec<Value>,
    pub awards: Vec<Value>,
    pub publications: Vec<Value>,
    pub languages: Vec<Value>,
    pub hobbies: Vec<Value>,
}

impl NormalizedView {
    /// Title handed to the print/export mechanism.
    pub fn document_title(&self) -> &str {
        if self.name.trim().is_empty() {
            "Resume"
        } else {
            &self.name
        }
    }
}
