use crate::config::FileFormat;
use rand::Rng;
use url::{ParseError, Url};

/// Marker the archive uses for a literal `/` inside a tag name.
///
/// A tag is always exactly one path segment of the catalog URL; without this
/// rewrite a slash would inject an extra segment boundary.
const SLASH_MARKER: &str = "*s*";

/// Rewrites every `/` in a tag to the archive's reserved marker
///
/// Percent-encoding of the remaining reserved characters is left to the URL
/// builder, which encodes the tag as a single path segment.
pub fn encode_tag(tag: &str) -> String {
    tag.replace('/', SLASH_MARKER)
}

/// Returns a random cache-busting value in `0..10_000`
///
/// Appended as the `v` query parameter to defeat HTTP caching between runs.
pub fn cache_buster() -> u32 {
    rand::thread_rng().gen_range(0..10_000)
}

/// Builds a catalog page URL: `{host}/tags/{encoded-tag}/works?page={n}&v={buster}`
pub fn build_page_url(host: &str, tag: &str, page: u32) -> Result<Url, ParseError> {
    let mut url = Url::parse(host)?;
    url.path_segments_mut()
        .map_err(|_| ParseError::RelativeUrlWithCannotBeABaseBase)?
        .pop_if_empty()
        .push("tags")
        .push(&encode_tag(tag))
        .push("works");
    url.query_pairs_mut()
        .append_pair("page", &page.to_string())
        .append_pair("v", &cache_buster().to_string());
    Ok(url)
}

/// Builds a file download URL: `{host}/downloads/{id}/fic.{format}?v={buster}`
pub fn build_file_url(host: &str, id: &str, format: FileFormat) -> Result<Url, ParseError> {
    let mut url = Url::parse(host)?;
    url.path_segments_mut()
        .map_err(|_| ParseError::RelativeUrlWithCannotBeABaseBase)?
        .pop_if_empty()
        .push("downloads")
        .push(id)
        .push(&format!("fic.{}", format.extension()));
    url.query_pairs_mut()
        .append_pair("v", &cache_buster().to_string());
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_tag_plain() {
        assert_eq!(encode_tag("Fluff"), "Fluff");
    }

    #[test]
    fn test_encode_tag_single_slash() {
        assert_eq!(encode_tag("Character A/Character B"), "Character A*s*Character B");
    }

    #[test]
    fn test_encode_tag_multiple_slashes() {
        assert_eq!(encode_tag("a/b/c"), "a*s*b*s*c");
    }

    #[test]
    fn test_cache_buster_range() {
        for _ in 0..100 {
            assert!(cache_buster() < 10_000);
        }
    }

    #[test]
    fn test_page_url_shape() {
        let url = build_page_url("https://example.org", "Fluff", 3).unwrap();
        assert_eq!(url.path(), "/tags/Fluff/works");
        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        assert_eq!(pairs[0], ("page".to_string(), "3".to_string()));
        assert_eq!(pairs[1].0, "v");
    }

    #[test]
    fn test_page_url_tag_is_one_segment() {
        let url = build_page_url("https://example.org", "Character A/Character B", 1).unwrap();
        let segments: Vec<&str> = url.path_segments().unwrap().collect();
        assert_eq!(segments.len(), 3, "tag must occupy exactly one segment");
        assert_eq!(segments[0], "tags");
        assert_eq!(segments[2], "works");
    }

    #[test]
    fn test_page_url_percent_encodes_tag() {
        let url = build_page_url("https://example.org", "Hurt/Comfort & Angst", 1).unwrap();
        let segments: Vec<&str> = url.path_segments().unwrap().collect();
        assert_eq!(segments.len(), 3);
        // The space must not survive raw in the URL
        assert!(!url.as_str().contains(' '));
    }

    #[test]
    fn test_file_url_shape() {
        let url = build_file_url("https://dl.example.org", "123456", FileFormat::Epub).unwrap();
        assert_eq!(url.path(), "/downloads/123456/fic.epub");
        assert!(url.query().unwrap().starts_with("v="));
    }

    #[test]
    fn test_host_with_port() {
        let url = build_page_url("http://127.0.0.1:8080", "tag", 1).unwrap();
        assert_eq!(url.path(), "/tags/tag/works");
    }

    #[test]
    fn test_file_url_fresh_buster() {
        // Two builds of the same URL should (almost always) differ in the
        // cache buster; equality of everything else is what matters here.
        let a = build_file_url("https://dl.example.org", "1", FileFormat::Pdf).unwrap();
        let b = build_file_url("https://dl.example.org", "1", FileFormat::Pdf).unwrap();
        assert_eq!(a.path(), b.path());
    }
}
