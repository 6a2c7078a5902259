//! Skill labeling: collapses synonymous spellings from the resume and the job
//! description into one display label, then partitions skills into groups.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use crate::models::view::SkillGroups;

/// Canonical spelling → display label. Keys are already in `canon` form.
static SKILL_ALIASES: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        ("react.js", "ReactJS"),
        ("react", "ReactJS"),
        ("html", "HTML"),
        ("css", "CSS"),
        ("html/css", "HTML/CSS"),
        ("oop", "Object-Oriented Programming"),
        ("o.o.p", "Object-Oriented Programming"),
        ("dsa", "Data Structures and Algorithms"),
        ("ds&a", "Data Structures and Algorithms"),
        ("hibernate jpa", "Hibernate/JPA"),
        ("jpa", "JPA"),
        ("spring boot", "Spring Boot"),
        ("javascript", "JavaScript"),
    ])
});

/// Lower-cases, collapses whitespace runs to a single space and trims.
pub fn canon(s: &str) -> String {
    s.to_lowercase().split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Display label for a free-text skill.
///
/// Dots are dropped and underscores become spaces before canonicalizing, so
/// "React.js", "react_js" and "REACT" all meet the same alias. A skill with no
/// alias is returned untouched, casing and punctuation included: two unmatched
/// skills that differ only in case stay distinct.
pub fn label(s: &str) -> String {
    let stripped: String = s
        .chars()
        .filter(|&c| c != '.')
        .map(|c| if c == '_' { ' ' } else { c })
        .collect();
    let c = canon(&stripped);

    if let Some(alias) = SKILL_ALIASES.get(c.as_str()) {
        return (*alias).to_string();
    }
    match c.as_str() {
        "reactjs" => "ReactJS".to_string(),
        "hibernate" => "Hibernate".to_string(),
        _ => s.to_string(),
    }
}

/// Labels `skills` in order, keeping the first occurrence of each label.
fn unique_labels<'a>(skills: impl IntoIterator<Item = &'a String>) -> Vec<String> {
    let mut seen = HashSet::new();
    skills
        .into_iter()
        .map(|s| label(s))
        .filter(|l| seen.insert(l.clone()))
        .collect()
}

/// Partitions skills into `core` (required by the job), `nice` (nice-to-have)
/// and `other` (resume skills claimed by neither).
///
/// `core` and `nice` are built independently, so a skill listed in both job
/// lists shows up in both groups.
pub fn group_skills(resume: &[String], required: &[String], nice_to_have: &[String]) -> SkillGroups {
    let core = unique_labels(required);
    let nice = unique_labels(nice_to_have);

    let claimed: HashSet<&str> = core.iter().chain(&nice).map(String::as_str).collect();
    let other = unique_labels(resume)
        .into_iter()
        .filter(|l| !claimed.contains(l.as_str()))
        .collect();

    SkillGroups { core, nice, other }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_canon_collapses_whitespace_and_case() {
        assert_eq!(canon("  Spring \t  BOOT\n"), "spring boot");
        assert_eq!(canon(""), "");
    }

    #[test]
    fn test_react_spellings_share_a_label() {
        assert_eq!(label("React.js"), "ReactJS");
        assert_eq!(label("react"), "ReactJS");
        assert_eq!(label("REACT"), "ReactJS");
        assert_eq!(label("ReactJS"), "ReactJS");
        assert_eq!(label("react_js"), "react_js");
    }

    #[test]
    fn test_aliases_ignore_punctuation_and_spacing() {
        assert_eq!(label("O.O.P"), "Object-Oriented Programming");
        assert_eq!(label("DS&A"), "Data Structures and Algorithms");
        assert_eq!(label("hibernate_jpa"), "Hibernate/JPA");
        assert_eq!(label("Spring   Boot"), "Spring Boot");
        assert_eq!(label("javascript"), "JavaScript");
        assert_eq!(label("Hibernate"), "Hibernate");
        assert_eq!(label("html"), "HTML");
    }

    #[test]
    fn test_unmatched_skill_is_returned_verbatim() {
        assert_eq!(label("Unmatched Skill"), "Unmatched Skill");
        assert_eq!(label("  node.JS "), "  node.JS ");
    }

    #[test]
    fn test_label_is_idempotent_on_alias_targets() {
        for target in SKILL_ALIASES.values() {
            assert_eq!(label(target), *target);
        }
    }

    #[test]
    fn test_core_and_nice_may_overlap() {
        let groups = group_skills(&[], &strings(&["Python", "Go"]), &strings(&["Go", "Rust"]));
        assert_eq!(groups.core, vec!["Python", "Go"]);
        assert_eq!(groups.nice, vec!["Go", "Rust"]);
        assert!(groups.other.is_empty());
    }

    #[test]
    fn test_other_excludes_job_skills() {
        let groups = group_skills(
            &strings(&["Python", "Java"]),
            &strings(&["Python", "Go"]),
            &strings(&["Go", "Rust"]),
        );
        assert_eq!(groups.other, vec!["Java"]);
        assert_eq!(groups.flatten(), vec!["Python", "Go", "Go", "Rust", "Java"]);
    }

    #[test]
    fn test_groups_dedupe_by_label() {
        let groups = group_skills(
            &strings(&["react", "Docker", "docker", "Docker"]),
            &strings(&["React.js", "REACT", "HTML", "html"]),
            &[],
        );
        assert_eq!(groups.core, vec!["ReactJS", "HTML"]);
        // unmatched skills differing in case are distinct
        assert_eq!(groups.other, vec!["Docker", "docker"]);
    }
}
