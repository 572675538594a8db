//! String helpers

use regex::Regex;

/// Lowercase the text, then uppercase the first letter of every
/// space-separated word.
///
/// ```
/// use motus_utils::text::capitalize_each_word;
///
/// assert_eq!(capitalize_each_word("hi all, i'm a REPO"), "Hi All, I'm A Repo");
/// ```
pub fn capitalize_each_word(text: &str) -> String {
    text.to_lowercase()
        .split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Remove every character of `to_remove` from `text`.
///
/// Characters are matched literally; regex metacharacters need no escaping.
pub fn remove_chars(text: &str, to_remove: &str) -> Result<String, regex::Error> {
    if to_remove.is_empty() {
        return Ok(text.to_string());
    }
    let class = Regex::new(&format!("[{}]", regex::escape(to_remove)))?;
    Ok(class.replace_all(text, "").into_owned())
}

/// Short name of a type, for log tags: `motus_core::view::ViewTree`
/// becomes `ViewTree` and `Vec<u8>` becomes `Vec`
pub fn type_tag<T: ?Sized>() -> &'static str {
    let name = std::any::type_name::<T>();
    let base = name.split('<').next().unwrap_or(name);
    base.rsplit("::").next().unwrap_or(base)
}

/// Latin letters (lowercase first) followed by the ASCII digits
pub fn alphanumeric() -> Vec<char> {
    ('a'..='z').chain('A'..='Z').chain('0'..='9').collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capitalize_keeps_spacing() {
        assert_eq!(capitalize_each_word("  double  space"), "  Double  Space");
        assert_eq!(capitalize_each_word(""), "");
    }

    #[test]
    fn test_remove_chars() {
        assert_eq!(remove_chars("abcd", "bc").unwrap(), "ad");
        assert_eq!(remove_chars("a-b]c^d\\e", "-]^\\").unwrap(), "abcde");
        assert_eq!(remove_chars("unchanged", "").unwrap(), "unchanged");
    }

    #[test]
    fn test_type_tag() {
        struct Marker;
        assert_eq!(type_tag::<Marker>(), "Marker");
        assert_eq!(type_tag::<Vec<String>>(), "Vec");
        assert_eq!(type_tag::<motus_core::ViewTree>(), "ViewTree");
    }

    #[test]
    fn test_alphanumeric() {
        let chars = alphanumeric();
        assert_eq!(chars.len(), 62);
        assert_eq!(chars.first(), Some(&'a'));
        assert_eq!(chars[26], 'A');
        assert_eq!(chars.last(), Some(&'9'));
    }
}
