//! Language validator - accepts Han script only / 语言校验
//!
//! Every term that reaches the store must be written in Chinese characters.
//! Validation walks `char`s, so multi-byte input is handled correctly.

use crate::error::{FlashcardError, FlashcardResult};

/// Language reported in validation errors / 期望语言
pub const EXPECTED_LANGUAGE: &str = "Chinese";

/// Check if a character belongs to the Han script / 检测字符是否为汉字
pub fn is_han(c: char) -> bool {
    matches!(c,
        '\u{2e80}'..='\u{2e99}' |    // CJK Radicals Supplement
        '\u{2e9b}'..='\u{2ef3}' |
        '\u{2f00}'..='\u{2fd5}' |    // Kangxi Radicals
        '\u{3005}' | '\u{3007}' |    // 々 〇
        '\u{3021}'..='\u{3029}' |    // Hangzhou numerals
        '\u{3038}'..='\u{303b}' |
        '\u{3400}'..='\u{4dbf}' |    // CJK Extension A
        '\u{4e00}'..='\u{9fff}' |    // CJK Unified Ideographs
        '\u{f900}'..='\u{fa6d}' |    // CJK Compatibility Ideographs
        '\u{fa70}'..='\u{fad9}' |
        '\u{16fe2}' | '\u{16fe3}' |
        '\u{16ff0}' | '\u{16ff1}' |
        '\u{20000}'..='\u{2a6df}' |  // CJK Extension B
        '\u{2a700}'..='\u{2b739}' |  // CJK Extension C
        '\u{2b740}'..='\u{2b81d}' |  // CJK Extension D
        '\u{2b820}'..='\u{2cea1}' |  // CJK Extension E
        '\u{2ceb0}'..='\u{2ebe0}' |  // CJK Extension F
        '\u{2ebf0}'..='\u{2ee5d}' |  // CJK Extension I
        '\u{2f800}'..='\u{2fa1d}' |  // Compatibility Supplement
        '\u{30000}'..='\u{323af}'    // CJK Extension G-H
    )
}

/// Validate that every character of `text` is Han / 校验文本只包含汉字
///
/// Reports the first offending character. Empty text passes.
pub fn validate(text: &str) -> FlashcardResult<()> {
    match text.chars().find(|c| !is_han(*c)) {
        Some(character) => Err(FlashcardError::UnexpectedLanguage {
            expected_language: EXPECTED_LANGUAGE,
            character,
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_chinese() {
        assert!(validate("我").is_ok());
        assert!(validate("我们").is_ok());
        assert!(validate("中华人民共和国").is_ok());
        assert!(validate("愛國").is_ok());
        assert!(validate("人々").is_ok());
        assert!(validate("𠀀").is_ok());
    }

    #[test]
    fn test_empty_is_accepted() {
        assert!(validate("").is_ok());
    }

    #[test]
    fn test_reports_first_offending_character() {
        match validate("我c们d") {
            Err(FlashcardError::UnexpectedLanguage { expected_language, character }) => {
                assert_eq!(expected_language, "Chinese");
                assert_eq!(character, 'c');
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_rejects_other_scripts() {
        for text in ["c", "ひらがな", "カタカナ", "한국", "我 们", "你好!", "１"] {
            assert!(validate(text).is_err(), "{} should be rejected", text);
        }
    }

    #[test]
    fn test_punctuation_is_not_han() {
        assert!(!is_han('，'));
        assert!(!is_han('。'));
        assert!(!is_han('、'));
        assert!(is_han('〇'));
    }

    #[test]
    fn test_unassigned_holes_between_extensions() {
        assert!(is_han('\u{2b739}'));
        assert!(!is_han('\u{2b73a}'));
        assert!(!is_han('\u{2b73f}'));
        assert!(is_han('\u{2b740}'));
        assert!(!is_han('\u{2b81e}'));
        assert!(!is_han('\u{2cea2}'));
        assert!(!is_han('\u{2ceaf}'));
        assert!(is_han('\u{2ceb0}'));
        assert!(!is_han('\u{2ebe1}'));
        assert!(is_han('\u{2ee5d}'));
        assert!(validate("我\u{2b73a}").is_err());
    }
}
