use serde::Deserialize;
use serde_json::Value;

use crate::models::lenient;

/// Full success body of `POST /api/parse`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ParseResponse {
    #[serde(deserialize_with = "lenient::record")]
    pub resume: RawResume,
    #[serde(deserialize_with = "lenient::record")]
    pub job: RawJob,
    #[serde(deserialize_with = "lenient::record")]
    pub meta: ParseMeta,
}

/// Resume fields as extracted by the parse service. Every field is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawResume {
    #[serde(deserialize_with = "lenient::string")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub email: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub phone: Option<String>,
    #[serde(deserialize_with = "lenient::string_list")]
    pub links: Option<Vec<String>>,
    #[serde(deserialize_with = "lenient::string_list")]
    pub profiles: Option<Vec<String>>,
    #[serde(deserialize_with = "lenient::string")]
    pub summary: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub objective: Option<String>,
    #[serde(deserialize_with = "lenient::strings")]
    pub skills: Vec<String>,
    #[serde(deserialize_with = "lenient::list")]
    pub experience: Option<Vec<Value>>,
    #[serde(deserialize_with = "lenient::list")]
    pub education: Option<Vec<Value>>,
    #[serde(flatten)]
    pub extras: SharedLists,
}

/// Job description fields as extracted by the parse service.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawJob {
    #[serde(deserialize_with = "lenient::string")]
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub company: Option<String>,
    #[serde(deserialize_with = "lenient::strings")]
    pub skills_required: Vec<String>,
    #[serde(deserialize_with = "lenient::strings")]
    pub nice_to_have: Vec<String>,
    #[serde(flatten)]
    pub extras: SharedLists,
}

/// List sections that may come from either the resume or the job description.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SharedLists {
    #[serde(deserialize_with = "lenient::list")]
    pub projects: Option<Vec<Value>>,
    #[serde(deserialize_with = "lenient::list")]
    pub achievements: Option<Vec<Value>>,
    #[serde(deserialize_with = "lenient::list")]
    pub certifications: Option<Vec<Value>>,
    #[serde(deserialize_with = "lenient::list")]
    pub awards: Option<Vec<Value>>,
    #[serde(deserialize_with = "lenient::list")]
    pub publications: Option<Vec<Value>>,
    #[serde(deserialize_with = "lenient::list")]
    pub languages: Option<Vec<Value>>,
    #[serde(deserialize_with = "lenient::list")]
    pub hobbies: Option<Vec<Value>>,
}

/// Optional scoring metadata attached by the parse service.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ParseMeta {
    #[serde(deserialize_with = "lenient::number")]
    pub ats_score: Option<f64>,
    #[serde(deserialize_with = "lenient::record")]
    pub ats: AtsBreakdown,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AtsBreakdown {
    #[serde(deserialize_with = "lenient::record")]
    pub required: MissingSkills,
    #[serde(deserialize_with = "lenient::record")]
    pub nice: MissingSkills,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MissingSkills {
    #[serde(deserialize_with = "lenient::strings")]
    pub missing: Vec<String>,
}
