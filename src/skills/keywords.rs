//! Offline keyword classification, used when the model is unavailable.

use super::record::{OrderedMap, SkillRecord};

/// Category key and the candidate skills searched for, in output order.
pub const KEYWORD_TABLE: &[(&str, &[&str])] = &[
    (
        "programming_languages",
        &[
            "Python",
            "JavaScript",
            "Java",
            "C++",
            "C#",
            "Go",
            "Rust",
            "TypeScript",
            "SQL",
            "R",
            "Swift",
            "Kotlin",
        ],
    ),
    (
        "frameworks",
        &[
            "React",
            "Vue",
            "Angular",
            "Django",
            "Flask",
            "FastAPI",
            "Spring",
            "Node.js",
            "Express",
            "TensorFlow",
            "PyTorch",
        ],
    ),
    (
        "tools",
        &[
            "Git",
            "Docker",
            "Kubernetes",
            "AWS",
            "Azure",
            "GCP",
            "Jenkins",
            "CI/CD",
            "Linux",
            "MongoDB",
            "PostgreSQL",
            "Redis",
        ],
    ),
];

/// Case-insensitive substring scan of `text` against [`KEYWORD_TABLE`].
///
/// Every category is present in the result, possibly empty. Matches keep
/// table order. Short names match inside longer words ("R" matches almost
/// any resume); that is the accepted cost of a dependency-free fallback.
pub fn keyword_classify(text: &str) -> SkillRecord {
    let haystack = text.to_lowercase();

    let technical: OrderedMap<Vec<String>> = KEYWORD_TABLE
        .iter()
        .map(|(category, keywords)| {
            let found = keywords
                .iter()
                .filter(|keyword| haystack.contains(&keyword.to_lowercase()))
                .map(|keyword| keyword.to_string())
                .collect::<Vec<_>>();
            (*category, found)
        })
        .collect();

    SkillRecord {
        technical,
        ..SkillRecord::default()
    }
}
