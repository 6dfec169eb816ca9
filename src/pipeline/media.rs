// src/pipeline/media.rs
// =============================================================================
// Finds embedded media in a README.
//
// - Images: Markdown image syntax ![alt](path) pointing at png/jpg/jpeg/gif/webp
// - Videos: bare filenames ending in .mp4, only looked for when the text
//   mentions "video" or ".mp4" at all
//
// Relative paths are resolved against the repository's raw-content URL for
// its default branch. Paths starting with "http" are kept as they are.
// =============================================================================

use once_cell::sync::Lazy;
use pulldown_cmark::{Event, Parser, Tag};
use regex::Regex;
use serde::Serialize;
use url::Url;

pub const MAX_IMAGES: usize = 3;
pub const MAX_VIDEOS: usize = 2;

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp"];

static MP4_FILENAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\w\-./:%~]+\.mp4\b").expect("valid mp4 pattern"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    Image,
    Video,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MediaReference {
    pub kind: MediaKind,
    /// Absolute URL of the media file
    pub url: String,
}

/// Scans README text for media, images first, then videos.
///
/// `base` is the directory URL relative paths are joined onto.
pub fn scan_media(readme: &str, base: &Url) -> Vec<MediaReference> {
    let images = extract_image_paths(readme)
        .into_iter()
        .filter_map(|path| resolve_media_path(base, &path))
        .map(|url| MediaReference {
            kind: MediaKind::Image,
            url,
        });

    let videos = extract_video_paths(readme)
        .into_iter()
        .filter_map(|path| resolve_media_path(base, &path))
        .map(|url| MediaReference {
            kind: MediaKind::Video,
            url,
        });

    images.chain(videos).collect()
}

/// Image destinations of Markdown image tags, at most MAX_IMAGES.
pub fn extract_image_paths(markdown: &str) -> Vec<String> {
    let mut paths = Vec::new();

    for event in Parser::new(markdown) {
        // In pulldown-cmark 0.9 an image is Tag::Image(link_type, dest_url, title)
        if let Event::Start(Tag::Image(_link_type, dest_url, _title)) = event {
            if has_image_extension(&dest_url) {
                paths.push(dest_url.to_string());
                if paths.len() == MAX_IMAGES {
                    break;
                }
            }
        }
    }

    paths
}

/// Bare .mp4 filenames, at most MAX_VIDEOS.
pub fn extract_video_paths(text: &str) -> Vec<String> {
    if !text.contains("video") && !text.contains(".mp4") {
        return Vec::new();
    }

    MP4_FILENAME
        .find_iter(text)
        .take(MAX_VIDEOS)
        .map(|m| m.as_str().to_string())
        .collect()
}

fn has_image_extension(path: &str) -> bool {
    // Ignore ?query and #fragment suffixes
    let path = path.split(['?', '#']).next().unwrap_or(path);

    match path.rsplit_once('.') {
        Some((_, ext)) => IMAGE_EXTENSIONS
            .iter()
            .any(|known| ext.eq_ignore_ascii_case(known)),
        None => false,
    }
}

fn resolve_media_path(base: &Url, path: &str) -> Option<String> {
    if path.starts_with("http") {
        return Some(path.to_string());
    }

    let relative = path.trim_start_matches("./").trim_start_matches('/');
    match base.join(relative) {
        Ok(url) => Some(url.to_string()),
        Err(e) => {
            tracing::debug!(%path, error = %e, "skipping unresolvable media path");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://raw.githubusercontent.com/octo/demo/main/").unwrap()
    }

    #[test]
    fn test_relative_image_is_resolved() {
        let media = scan_media("![shot](docs/screen.png)", &base());
        assert_eq!(
            media,
            vec![MediaReference {
                kind: MediaKind::Image,
                url: "https://raw.githubusercontent.com/octo/demo/main/docs/screen.png".to_string(),
            }]
        );
    }

    #[test]
    fn test_leading_dot_slash_and_slash_are_stripped() {
        let media = scan_media("![a](./a.png) ![b](/b.gif)", &base());
        let urls: Vec<_> = media.iter().map(|m| m.url.as_str()).collect();
        assert_eq!(
            urls,
            vec![
                "https://raw.githubusercontent.com/octo/demo/main/a.png",
                "https://raw.githubusercontent.com/octo/demo/main/b.gif",
            ]
        );
    }

    #[test]
    fn test_absolute_image_kept_as_is() {
        let media = scan_media("![x](https://cdn.example.com/x.webp)", &base());
        assert_eq!(media[0].url, "https://cdn.example.com/x.webp");
    }

    #[test]
    fn test_non_image_links_ignored() {
        let markdown = "[docs](guide.png) ![badge](https://img.shields.io/badge/x.svg)";
        assert!(extract_image_paths(markdown).is_empty());
    }

    #[test]
    fn test_extension_case_and_query() {
        let paths = extract_image_paths("![a](A.PNG) ![b](b.jpeg?raw=true)");
        assert_eq!(paths, vec!["A.PNG", "b.jpeg?raw=true"]);
    }

    #[test]
    fn test_at_most_three_images_in_order() {
        let markdown = "![1](1.png)\n![2](2.jpg)\n![3](3.gif)\n![4](4.webp)\n";
        let paths = extract_image_paths(markdown);
        assert_eq!(paths, vec!["1.png", "2.jpg", "3.gif"]);
    }

    #[test]
    fn test_videos_need_trigger_word() {
        // No "video" and no ".mp4" substring: nothing is scanned
        assert!(extract_video_paths("clip.MP4 is here").is_empty());
    }

    #[test]
    fn test_at_most_two_videos() {
        let text = "Demo video: intro.mp4, part2.mp4 and assets/part3.mp4";
        let paths = extract_video_paths(text);
        assert_eq!(paths, vec!["intro.mp4", "part2.mp4"]);
    }

    #[test]
    fn test_media_limits_hold_for_busy_readme() {
        let mut readme = String::from("# Video gallery\n");
        for i in 0..10 {
            readme.push_str(&format!("![s{i}](s{i}.png)\nclip{i}.mp4\n"));
        }
        let media = scan_media(&readme, &base());
        let images = media.iter().filter(|m| m.kind == MediaKind::Image).count();
        let videos = media.iter().filter(|m| m.kind == MediaKind::Video).count();
        assert_eq!(images, 3);
        assert_eq!(videos, 2);
        // Images come before videos
        assert_eq!(media[0].kind, MediaKind::Image);
        assert_eq!(media[4].kind, MediaKind::Video);
    }

    #[test]
    fn test_absolute_video_url() {
        let media = scan_media("Watch https://cdn.example.com/demo.mp4", &base());
        assert_eq!(
            media,
            vec![MediaReference {
                kind: MediaKind::Video,
                url: "https://cdn.example.com/demo.mp4".to_string(),
            }]
        );
    }
}
