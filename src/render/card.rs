// src/render/card.rs
// =============================================================================
// Turns enriched projects into gallery markup.
//
// Everything in here is a pure function of its inputs: the same projects,
// config and clock value always produce the same string. Writing the string
// somewhere is target.rs's job.
// =============================================================================

use chrono::{DateTime, Utc};

use crate::config::GalleryConfig;
use crate::github::{spaced_name, RepositorySummary};
use crate::pipeline::{EnrichedProject, MediaKind, MediaReference};

/// Badge color for languages missing from LANGUAGE_COLORS
pub const FALLBACK_COLOR: &str = "#64ffda";

const LANGUAGE_COLORS: &[(&str, &str)] = &[
    ("JavaScript", "#f1e05a"),
    ("TypeScript", "#3178c6"),
    ("Python", "#3572A5"),
    ("Java", "#b07219"),
    ("Kotlin", "#A97BFF"),
    ("Swift", "#F05138"),
    ("Dart", "#00B4AB"),
    ("HTML", "#e34c26"),
    ("CSS", "#563d7c"),
    ("SCSS", "#c6538c"),
    ("Vue", "#41b883"),
    ("C", "#555555"),
    ("C++", "#f34b7d"),
    ("C#", "#178600"),
    ("Go", "#00ADD8"),
    ("Rust", "#dea584"),
    ("PHP", "#4F5D95"),
    ("Ruby", "#701516"),
    ("Shell", "#89e051"),
    ("Jupyter Notebook", "#DA5B0B"),
];

const DAY_MS: i64 = 24 * 60 * 60 * 1000;

/// Renders every project card, in order, as one fragment.
pub fn render_gallery(
    projects: &[EnrichedProject],
    config: &GalleryConfig,
    now: DateTime<Utc>,
) -> String {
    projects
        .iter()
        .map(|project| render_card(project, config, now))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_card(project: &EnrichedProject, config: &GalleryConfig, now: DateTime<Utc>) -> String {
    let repo = &project.repo;
    let live_demo = live_demo_url(repo, config);
    let mut buf = String::new();

    buf.push_str(&format!(
        "<div class=\"project-card\" data-category=\"{}\">\n",
        escape_html(project.classification.category)
    ));

    // Preview: first media item, else the category icon
    buf.push_str("  <div class=\"project-media\">\n");
    match project.media.first() {
        Some(media) => buf.push_str(&render_media(media, &repo.name)),
        None => buf.push_str(&format!(
            "    <div class=\"project-icon\"><i class=\"fas {} text-4xl text-accent\"></i><span>{}</span></div>\n",
            project.classification.icon,
            escape_html(project.classification.category)
        )),
    }
    buf.push_str("  </div>\n");

    buf.push_str("  <div class=\"p-6\">\n");

    // Header: title plus icon links
    buf.push_str("    <div class=\"flex items-start justify-between mb-4\">\n");
    buf.push_str(&format!(
        "      <h3 class=\"text-xl font-semibold text-white\">{}</h3>\n",
        escape_html(&display_name(&repo.name))
    ));
    buf.push_str("      <div class=\"flex space-x-2\">\n");
    buf.push_str(&format!(
        "        <a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\" class=\"text-gray-400 hover:text-accent\"><i class=\"fab fa-github text-lg\"></i></a>\n",
        escape_html(&repo.html_url)
    ));
    if let Some(url) = &live_demo {
        buf.push_str(&format!(
            "        <a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\" class=\"text-gray-400 hover:text-accent\"><i class=\"fas fa-external-link-alt text-lg\"></i></a>\n",
            escape_html(url)
        ));
    }
    buf.push_str("      </div>\n");
    buf.push_str("    </div>\n");

    buf.push_str(&format!(
        "    <span class=\"project-category\">{}</span>\n",
        escape_html(project.classification.category)
    ));
    buf.push_str(&format!(
        "    <p class=\"text-gray-400 mb-4 line-clamp-3\">{}</p>\n",
        escape_html(repo.description_text().unwrap_or("No description available"))
    ));

    if let Some(language) = repo.language_name() {
        buf.push_str(&format!(
            "    <div class=\"mb-4\"><span class=\"project-tech\" style=\"background-color: {}\">{}</span></div>\n",
            language_color(language),
            escape_html(language)
        ));
    }

    buf.push_str("    <div class=\"project-stats\">\n");
    buf.push_str(&format!(
        "      <div class=\"project-stat\"><i class=\"fas fa-star text-yellow-400 mr-1\"></i><span>{}</span></div>\n",
        repo.stargazers_count
    ));
    buf.push_str(&format!(
        "      <div class=\"project-stat\"><i class=\"fas fa-code-branch text-green-400 mr-1\"></i><span>{}</span></div>\n",
        repo.forks_count
    ));
    buf.push_str(&format!(
        "      <div class=\"project-stat\"><i class=\"fas fa-circle text-accent mr-1\"></i><span class=\"text-xs\">{}</span></div>\n",
        relative_age(repo.updated_at, now)
    ));
    buf.push_str("    </div>\n");

    buf.push_str(&render_actions(&repo.html_url, live_demo.as_deref()));

    buf.push_str("  </div>\n");
    buf.push_str("</div>");
    buf
}

fn render_media(media: &MediaReference, name: &str) -> String {
    match media.kind {
        MediaKind::Image => format!(
            "    <img src=\"{}\" alt=\"{} preview\" loading=\"lazy\" class=\"w-full h-48 object-cover\">\n",
            escape_html(&media.url),
            escape_html(&display_name(name))
        ),
        MediaKind::Video => format!(
            "    <video src=\"{}\" class=\"w-full h-48 object-cover\" muted loop autoplay playsinline></video>\n",
            escape_html(&media.url)
        ),
    }
}

// Two buttons side by side with a live demo, one full-width button without
fn render_actions(code_url: &str, live_demo: Option<&str>) -> String {
    match live_demo {
        Some(demo) => format!(
            "    <div class=\"project-actions grid grid-cols-2 gap-3 mt-4\">\n\
             \x20     <a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\" class=\"btn-secondary text-center\"><i class=\"fab fa-github mr-2\"></i>Code</a>\n\
             \x20     <a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\" class=\"btn-primary text-center\"><i class=\"fas fa-external-link-alt mr-2\"></i>Live Demo</a>\n\
             \x20   </div>\n",
            escape_html(code_url),
            escape_html(demo)
        ),
        None => format!(
            "    <div class=\"project-actions grid grid-cols-1 mt-4\">\n\
             \x20     <a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\" class=\"btn-primary w-full text-center\"><i class=\"fab fa-github mr-2\"></i>View Code</a>\n\
             \x20   </div>\n",
            escape_html(code_url)
        ),
    }
}

/// Error state for a failed listing, with a retry control.
pub fn render_error(message: &str) -> String {
    format!(
        "<div class=\"col-span-full text-center\">\n\
         \x20 <div class=\"bg-red-500/10 border border-red-500/20 rounded-lg p-6\">\n\
         \x20   <i class=\"fas fa-exclamation-triangle text-red-400 text-2xl mb-2\"></i>\n\
         \x20   <p class=\"text-red-400 mb-2\">Unable to load GitHub projects</p>\n\
         \x20   <p class=\"text-gray-400 text-sm\">{}</p>\n\
         \x20   <button type=\"button\" data-action=\"retry\" class=\"mt-4 btn-primary\"><i class=\"fas fa-redo mr-2\"></i>Try Again</button>\n\
         \x20 </div>\n\
         </div>",
        escape_html(message)
    )
}

/// Shown when a listing succeeds but leaves nothing to display.
pub fn render_empty() -> String {
    "<div class=\"col-span-full text-center\">\n\
     \x20 <p class=\"text-gray-400\">No repositories found. Please check back later!</p>\n\
     </div>"
        .to_string()
}

/// "my-cool_project" -> "My Cool Project", "my.app-x" -> "My.App X"
///
/// A letter is upper-cased when it starts a word, meaning the character
/// before it is not a letter or digit. "2d-game" stays "2d Game".
pub fn display_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut in_word = false;
    for c in spaced_name(name).chars() {
        if c.is_alphanumeric() {
            if in_word {
                out.push(c);
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }
    out
}

/// Human label for how long ago `updated_at` was, rounding up to whole units.
pub fn relative_age(updated_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed_ms = (now - updated_at).num_milliseconds().abs();
    let days = (elapsed_ms + DAY_MS - 1) / DAY_MS;

    if days == 1 {
        "1 day ago".to_string()
    } else if days < 7 {
        format!("{} days ago", days)
    } else if days < 30 {
        format!("{} weeks ago", ceil_div(days, 7))
    } else if days < 365 {
        format!("{} months ago", ceil_div(days, 30))
    } else {
        format!("{} years ago", ceil_div(days, 365))
    }
}

fn ceil_div(value: i64, divisor: i64) -> i64 {
    (value + divisor - 1) / divisor
}

pub fn language_color(language: &str) -> &'static str {
    LANGUAGE_COLORS
        .iter()
        .find(|(name, _)| *name == language)
        .map(|(_, color)| *color)
        .unwrap_or(FALLBACK_COLOR)
}

/// Homepage if set, else the Pages site if the repository publishes one.
pub fn live_demo_url(repo: &RepositorySummary, config: &GalleryConfig) -> Option<String> {
    match repo.homepage_url() {
        Some(homepage) => Some(homepage.to_string()),
        None if repo.has_pages => Some(config.pages_url(&repo.name)),
        None => None,
    }
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
