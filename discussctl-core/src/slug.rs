use std::collections::HashMap;

/// Directory name used when a title has no ASCII letters or digits at all.
pub const FALLBACK_SLUG: &str = "untitled";

/// Tracks which titles produced each slug during a run.
///
/// Collisions are reported, not resolved: the later post still overwrites
/// the earlier one on disk.
#[derive(Default)]
pub struct SlugRegistry {
    titles: HashMap<String, String>,
}

impl SlugRegistry {
    pub fn new() -> Self {
        Self {
            titles: HashMap::new(),
        }
    }

    /// Record `slug` for `title`. Returns the title that claimed the slug
    /// earlier in the run, identical titles included.
    pub fn record(&mut self, slug: &str, title: &str) -> Option<String> {
        self.titles.insert(slug.to_string(), title.to_string())
    }
}

pub fn slugify(input: &str) -> String {
    let mut slug = String::new();
    let mut pending_dash = false;

    for ch in input.to_lowercase().chars() {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            slug.push(ch);
            pending_dash = false;
        } else {
            pending_dash = true;
        }
    }

    slug
}

/// Slug used for the post directory; never empty.
pub fn post_slug(title: &str) -> String {
    let slug = slugify(title);
    if slug.is_empty() {
        FALLBACK_SLUG.to_string()
    } else {
        slug
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn slugify_basic_cases() {
        assert_eq!(slugify("Hello, World!"), "hello-world");
        assert_eq!(slugify("Launch Week"), "launch-week");
        assert_eq!(slugify("foo/bar\\baz"), "foo-bar-baz");
        assert_eq!(slugify("---dashes---"), "dashes");
        assert_eq!(slugify("Release v2.0.1"), "release-v2-0-1");
    }

    #[test]
    fn slugify_non_ascii_becomes_separator() {
        assert_eq!(slugify("Café Menu"), "caf-menu");
        assert_eq!(slugify("emoji 😀 test"), "emoji-test");
        assert_eq!(slugify("日本語"), "");
    }

    #[test]
    fn post_slug_falls_back_when_empty() {
        assert_eq!(post_slug("!!!"), FALLBACK_SLUG);
        assert_eq!(post_slug("News"), "news");
    }

    #[test]
    fn registry_reports_every_reuse() {
        let mut registry = SlugRegistry::new();
        assert_eq!(registry.record("hello-world", "Hello World"), None);
        assert_eq!(
            registry.record("hello-world", "Hello World"),
            Some("Hello World".to_string())
        );
        assert_eq!(
            registry.record("hello-world", "Hello, World!"),
            Some("Hello World".to_string())
        );
        assert_eq!(registry.record("other", "Other"), None);
    }

    proptest! {
        #[test]
        fn slug_uses_only_safe_characters(input in "\\PC*") {
            let slug = slugify(&input);
            prop_assert!(slug
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'));
            prop_assert!(!slug.starts_with('-'));
            prop_assert!(!slug.ends_with('-'));
            prop_assert!(!slug.contains("--"));
        }

        #[test]
        fn slug_is_stable(input in "\\PC*") {
            let once = slugify(&input);
            prop_assert_eq!(slugify(&once), once.clone());
        }
    }
}
