// src/classify.rs
// =============================================================================
// Derives a category label and an icon for a repository.
//
// The rules form an ordered decision table. Each rule looks at:
// - keywords in the lower-cased description (substring match)
// - keywords in the lower-cased repository name (substring match)
// - the exact declared language
// The first rule with any hit wins. Later rules are shadowed by earlier ones
// when their conditions overlap: a description mentioning both "web" and
// "react" is Web Development, never Frontend.
// =============================================================================

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub category: &'static str,
    /// Font Awesome icon class, e.g. "fa-globe"
    pub icon: &'static str,
}

struct Rule {
    category: &'static str,
    icon: &'static str,
    description_keywords: &'static [&'static str],
    name_keywords: &'static [&'static str],
    languages: &'static [&'static str],
}

impl Rule {
    fn matches(&self, name: &str, description: &str, language: Option<&str>) -> bool {
        self.description_keywords.iter().any(|k| description.contains(k))
            || self.name_keywords.iter().any(|k| name.contains(k))
            || language.is_some_and(|lang| self.languages.iter().any(|l| *l == lang))
    }
}

const DEFAULT: Classification = Classification {
    category: "Software Project",
    icon: "fa-code",
};

const RULES: &[Rule] = &[
    Rule {
        category: "Web Development",
        icon: "fa-globe",
        description_keywords: &["web", "website"],
        name_keywords: &[],
        languages: &["HTML", "CSS", "SCSS", "Sass", "Less"],
    },
    Rule {
        category: "Mobile App",
        icon: "fa-mobile-alt",
        description_keywords: &["app", "android"],
        name_keywords: &[],
        languages: &["Kotlin", "Swift", "Dart", "Java", "Objective-C"],
    },
    Rule {
        category: "Backend",
        icon: "fa-server",
        description_keywords: &["api", "backend", "server"],
        name_keywords: &[],
        languages: &[],
    },
    // No dedicated icon for this category
    Rule {
        category: "Frontend",
        icon: DEFAULT.icon,
        description_keywords: &["react", "vue", "angular"],
        name_keywords: &[],
        languages: &[],
    },
    Rule {
        category: "Data Science",
        icon: "fa-chart-bar",
        description_keywords: &["data", "analysis"],
        name_keywords: &[],
        languages: &["Python", "R", "Jupyter Notebook", "Julia"],
    },
    Rule {
        category: "Game Development",
        icon: "fa-gamepad",
        description_keywords: &["game"],
        name_keywords: &["game"],
        languages: &[],
    },
    Rule {
        category: "AR/VR",
        icon: "fa-cube",
        description_keywords: &["ar", "augmented reality"],
        name_keywords: &[],
        languages: &[],
    },
    Rule {
        category: "Database",
        icon: "fa-database",
        description_keywords: &["database", "db"],
        name_keywords: &[],
        languages: &[],
    },
    Rule {
        category: "System Programming",
        icon: "fa-cogs",
        description_keywords: &[],
        name_keywords: &[],
        languages: &["C", "C++", "Rust", "Go", "Assembly"],
    },
];

/// Classifies a repository. Pure: equal inputs always give equal output.
pub fn classify(name: &str, description: Option<&str>, language: Option<&str>) -> Classification {
    let description = description.unwrap_or("").to_lowercase();
    let name = name.to_lowercase();

    RULES
        .iter()
        .find(|rule| rule.matches(&name, &description, language))
        .map(|rule| Classification {
            category: rule.category,
            icon: rule.icon,
        })
        .unwrap_or(DEFAULT)
}
