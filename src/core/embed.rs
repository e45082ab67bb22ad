//! Local image embed discovery and rewriting
//!
//! Notes reference attached images with `![[name.ext]]`. Before upload the note
//! text is normalized (quote markup removed) and scanned; each embed that gets
//! uploaded is then rewritten to either a bare URL (inside the front matter) or
//! a standard markdown image.

use regex::Regex;
use std::sync::LazyLock;

/// One or more `>` markers at the start of a line, each optionally preceded by
/// blanks, plus at most one blank after the last marker.
static BLOCKQUOTE_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^([ \t]*>)+[ \t]?").expect("blockquote pattern is valid"));

/// Extensions are matched case-sensitively.
static IMAGE_EMBED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"!\[\[([^\]]+\.(?:png|jpg|jpeg|gif|bmp|svg))\]\]")
        .expect("image embed pattern is valid")
});

const FRONT_MATTER_DELIMITER: &str = "---";

/// A local image embed found in note text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageMatch {
    /// The full matched token, e.g. `![[cat.png]]`
    pub token: String,
    /// The image name inside the brackets, e.g. `cat.png`
    pub name: String,
    /// Byte offset of the token in the scanned text
    pub offset: usize,
}

impl ImageMatch {
    /// Whether this match sits inside the front matter block
    pub fn is_in_front_matter(&self, boundary: Option<usize>) -> bool {
        boundary.is_some_and(|end| self.offset < end)
    }

    /// Text that replaces this embed once the image lives at `url`
    pub fn replacement(&self, url: &str, boundary: Option<usize>) -> String {
        if self.is_in_front_matter(boundary) {
            url.to_string()
        } else {
            format!("![]({url})")
        }
    }
}

/// Remove blockquote markup from the start of every line
pub fn strip_blockquotes(text: &str) -> String {
    BLOCKQUOTE_PREFIX.replace_all(text, "").into_owned()
}

/// All local image embeds, in order of appearance
pub fn find_image_embeds(text: &str) -> Vec<ImageMatch> {
    IMAGE_EMBED
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let name = caps.get(1)?;
            Some(ImageMatch {
                token: whole.as_str().to_string(),
                name: name.as_str().to_string(),
                offset: whole.start(),
            })
        })
        .collect()
}

/// Offset of the closing front matter delimiter.
///
/// Only text that starts with `---` has front matter; the boundary is the next
/// `---` at or after offset 3, wherever it occurs.
pub fn front_matter_boundary(text: &str) -> Option<usize> {
    if !text.starts_with(FRONT_MATTER_DELIMITER) {
        return None;
    }
    let start = FRONT_MATTER_DELIMITER.len();
    text[start..]
        .find(FRONT_MATTER_DELIMITER)
        .map(|index| index + start)
}

/// Replace every literal occurrence of `token`.
///
/// Duplicate embeds are all rewritten by the first replacement.
pub fn substitute(text: &str, token: &str, replacement: &str) -> String {
    text.replace(token, replacement)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_strip_blockquotes() {
        let text = "> quoted\n>> nested\n  > > spaced\n>\tTabbed\nplain > not a quote";
        assert_eq!(
            strip_blockquotes(text),
            "quoted\nnested\nspaced\nTabbed\nplain > not a quote"
        );
    }

    #[test]
    fn test_strip_blockquotes_preserves_remainder() {
        // Only one blank after the last marker is removed
        assert_eq!(strip_blockquotes(">   indented"), "  indented");
        assert_eq!(strip_blockquotes("> ![[a.png]]"), "![[a.png]]");
    }

    #[test]
    fn test_find_image_embeds() {
        let text = "intro ![[cat.png]] and ![[dir/dog.jpeg]]\n![[doc.pdf]] ![[x.PNG]] ![[y.svg]]";
        let matches = find_image_embeds(text);
        let names: Vec<_> = matches.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["cat.png", "dir/dog.jpeg", "y.svg"]);
        assert_eq!(matches[0].token, "![[cat.png]]");
        assert_eq!(matches[0].offset, 6);
    }

    #[test]
    fn test_find_image_embeds_none() {
        assert!(find_image_embeds("no images ![](remote.png) [[note]]").is_empty());
    }

    #[test]
    fn test_front_matter_boundary() {
        assert_eq!(front_matter_boundary("---\ntitle: a\n---\nbody"), Some(13));
        assert_eq!(front_matter_boundary("---\ntitle: a\n"), None);
        assert_eq!(front_matter_boundary("body\n---\nmore\n---"), None);
        // The search starts right after the opening delimiter
        assert_eq!(front_matter_boundary("------"), Some(3));
    }

    #[test]
    fn test_replacement_policy() {
        let text = "---\nfeature_image: ![[hero.jpg]]\n---\nBody ![[cat.png]]";
        let boundary = front_matter_boundary(text);
        let matches = find_image_embeds(text);
        assert_eq!(matches.len(), 2);

        assert_eq!(
            matches[0].replacement("https://cdn/hero.jpg", boundary),
            "https://cdn/hero.jpg"
        );
        assert_eq!(
            matches[1].replacement("https://cdn/cat.png", boundary),
            "![](https://cdn/cat.png)"
        );
    }

    #[test]
    fn test_replacement_without_front_matter() {
        let m = ImageMatch {
            token: "![[a.png]]".to_string(),
            name: "a.png".to_string(),
            offset: 0,
        };
        assert_eq!(m.replacement("u", None), "![](u)");
        // At the boundary itself counts as body
        assert_eq!(m.replacement("u", Some(0)), "![](u)");
    }

    #[test]
    fn test_substitute_replaces_duplicates() {
        let text = "![[a.png]] middle ![[a.png]] ![[b.png]]";
        assert_eq!(
            substitute(text, "![[a.png]]", "![](u)"),
            "![](u) middle ![](u) ![[b.png]]"
        );
    }
}
