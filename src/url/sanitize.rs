/// Characters replaced by `_` in filesystem-facing names.
///
/// Windows-reserved characters plus the literal space.
const UNSAFE_CHARS: &[char] = &['\\', '/', ':', '*', '?', '|', '<', '>', '"', ' '];

/// Replaces every filesystem-unsafe character in a name component with `_`
///
/// Used for both the tag-derived output directory and per-work filenames.
/// The transform is idempotent: sanitizing an already-sanitized name is a
/// no-op.
pub fn sanitize_component(name: &str) -> String {
    name.chars()
        .map(|c| if UNSAFE_CHARS.contains(&c) { '_' } else { c })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_name_untouched() {
        assert_eq!(sanitize_component("a_plain_title"), "a_plain_title");
    }

    #[test]
    fn test_each_unsafe_char_replaced() {
        for c in super::UNSAFE_CHARS {
            let name = format!("a{}b", c);
            assert_eq!(sanitize_component(&name), "a_b", "failed for {:?}", c);
        }
    }

    #[test]
    fn test_spaces_replaced() {
        assert_eq!(sanitize_component("my fic title"), "my_fic_title");
    }

    #[test]
    fn test_mixed_title() {
        assert_eq!(
            sanitize_component(r#"What If... / A "Story": Part 2?"#),
            "What_If...___A__Story___Part_2_"
        );
    }

    #[test]
    fn test_idempotent() {
        let inputs = ["plain", "with space", r#"a\b/c:d*e?f|g<h>i"j"#, ""];
        for input in inputs {
            let once = sanitize_component(input);
            let twice = sanitize_component(&once);
            assert_eq!(once, twice, "failed for {:?}", input);
        }
    }

    #[test]
    fn test_unicode_preserved() {
        assert_eq!(sanitize_component("café draft"), "café_draft");
    }
}
