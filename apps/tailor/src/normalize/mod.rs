//! Normalization engine: reconciles the parsed resume with the parsed job
//! description into the single view-model consumed by every template.

pub mod merge;
pub mod skills;

use serde_json::Value;

use crate::models::raw::ParseResponse;
use crate::models::view::NormalizedView;

use self::merge::{merge_list, MergeKey};
use self::skills::group_skills;

const DEFAULT_NAME: &str = "Your Name";

/// Builds the complete `NormalizedView` for one parse response.
pub fn normalize_data(parsed: &ParseResponse) -> NormalizedView {
    let r = &parsed.resume;
    let j = &parsed.job;

    let skills_grouped = group_skills(&r.skills, &j.skills_required, &j.nice_to_have);

    let merged = |a: &Option<Vec<Value>>, b: &Option<Vec<Value>>, key: MergeKey<'static>| {
        merge_list(
            a.as_deref().unwrap_or_default(),
            b.as_deref().unwrap_or_default(),
            key,
        )
    };
    let (rx, jx) = (&r.extras, &j.extras);

    NormalizedView {
        name: non_empty(&r.name).unwrap_or(DEFAULT_NAME).to_string(),
        email: non_empty(&r.email).unwrap_or_default().to_string(),
        phone: non_empty(&r.phone).unwrap_or_default().to_string(),
        links: r.links.clone().or_else(|| r.profiles.clone()).unwrap_or_default(),
        job_title: non_empty(&j.title).unwrap_or_default().to_string(),
        job_company: non_empty(&j.company).unwrap_or_default().to_string(),
        summary: non_empty(&r.summary)
            .or_else(|| non_empty(&r.objective))
            .unwrap_or_default()
            .to_string(),
        skills: skills_grouped.flatten(),
        skills_grouped,
        // resume-only sections, never merged with job data
        experience: r.experience.clone().unwrap_or_default(),
        education: r.education.clone().unwrap_or_default(),
        projects: merged(&rx.projects, &jx.projects, MergeKey::Field("name")),
        achievements: merged(&rx.achievements, &jx.achievements, MergeKey::Structural),
        certifications: merged(&rx.certifications, &jx.certifications, MergeKey::Field("name")),
        awards: merged(&rx.awards, &jx.awards, MergeKey::Field("title")),
        publications: merged(&rx.publications, &jx.publications, MergeKey::Field("title")),
        languages: merged(&rx.languages, &jx.languages, MergeKey::Structural),
        hobbies: merged(&rx.hobbies, &jx.hobbies, MergeKey::Structural),
    }
}

fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}
