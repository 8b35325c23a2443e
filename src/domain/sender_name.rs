use unicode_segmentation::UnicodeSegmentation;

/// Display name shown next to the sender address in the recipient's inbox.
#[derive(Debug, Clone)]
pub struct SenderName(String);

impl SenderName {
    pub fn parse(name: String) -> Result<Self, String> {
        let is_empty_or_whitespace = name.trim().is_empty();

        // `å` is a single grapheme made of two characters, so count graphemes
        // rather than chars or bytes.
        let is_too_long = name.graphemes(true).count() > 256;

        let forbidden_characters = ['/', '(', ')', '"', '<', '>', '\\', '{', '}'];
        let contains_forbidden_characters = name.chars().any(|c| forbidden_characters.contains(&c));

        if is_empty_or_whitespace || is_too_long || contains_forbidden_characters {
            Err(format!("{} is not a valid sender name.", name))
        } else {
            Ok(Self(name))
        }
    }
}

impl AsRef<str> for SenderName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
