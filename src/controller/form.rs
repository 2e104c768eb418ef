use crate::types::wire::{AugmentOptions, PreprocessOptions};

/// Checkbox and number-input state exactly as the user left it. Number inputs stay as text
/// so that whatever was typed is parsed at request time.
#[derive(Debug, Clone, PartialEq)]
pub struct FormState {
    pub remove_punctuation: bool,
    pub tokenize: bool,
    pub pad_text: bool,
    pub pad_length: String,
    pub random_insertion: bool,
    pub random_insertion_count: String,
    pub synonym_replacement: bool,
    pub synonym_replacement_count: String,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            remove_punctuation: false,
            tokenize: false,
            pad_text: false,
            pad_length: "50".to_string(),
            random_insertion: false,
            random_insertion_count: "1".to_string(),
            synonym_replacement: false,
            synonym_replacement_count: "1".to_string(),
        }
    }
}

impl FormState {
    pub fn preprocess_options(&self) -> PreprocessOptions {
        PreprocessOptions {
            remove_punctuation: self.remove_punctuation,
            tokenize: self.tokenize,
            pad_length: if self.pad_text { parse_int_prefix(&self.pad_length) } else { None },
        }
    }

    pub fn augment_options(&self) -> AugmentOptions {
        AugmentOptions {
            random_insertion: if self.random_insertion {
                parse_int_prefix(&self.random_insertion_count)
            } else {
                None
            },
            synonym_replacement: if self.synonym_replacement {
                parse_int_prefix(&self.synonym_replacement_count)
            } else {
                None
            },
        }
    }
}

/// Which optional field groups are on screen. Only changes when a checkbox reports a change.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Visibility {
    pub pad_length_group: bool,
    pub augment_params_group: bool,
}

/// Leading integer of `input`, like a browser's `parseInt`: "12px" is 12, "  -3" is -3,
/// "abc" and "" are nothing. Runs too long for an `i64` saturate instead of vanishing.
pub fn parse_int_prefix(input: &str) -> Option<i64> {
    let trimmed = input.trim_start();
    let (sign, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (-1, &trimmed[1..]),
        Some(b'+') => (1, &trimmed[1..]),
        _ => (1, trimmed),
    };
    let digits_len = rest.bytes().take_while(|b| b.is_ascii_digit()).count();
    if digits_len == 0 {
        return None;
    }
    // a run of ASCII digits only fails to parse on overflow
    Some(match rest[..digits_len].parse::<i64>() {
        Ok(n) => sign * n,
        Err(_) if sign < 0 => i64::MIN,
        Err(_) => i64::MAX,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn int_prefix_parsing() {
        assert_eq!(parse_int_prefix("20"), Some(20));
        assert_eq!(parse_int_prefix("  7 words"), Some(7));
        assert_eq!(parse_int_prefix("12.9"), Some(12));
        assert_eq!(parse_int_prefix("-4"), Some(-4));
        assert_eq!(parse_int_prefix("+5"), Some(5));
        assert_eq!(parse_int_prefix(""), None);
        assert_eq!(parse_int_prefix("abc"), None);
        assert_eq!(parse_int_prefix("-"), None);
    }

    #[test]
    fn oversized_counts_saturate_and_stay_active() {
        assert_eq!(parse_int_prefix("99999999999999999999"), Some(i64::MAX));
        assert_eq!(parse_int_prefix("-99999999999999999999"), Some(i64::MIN));
        assert_eq!(parse_int_prefix("-9223372036854775808"), Some(i64::MIN));
        let form = FormState {
            random_insertion: true,
            random_insertion_count: "99999999999999999999".to_string(),
            ..FormState::default()
        };
        assert_eq!(form.augment_options().random_insertion, Some(i64::MAX));
        assert!(form.augment_options().is_active());
    }

    #[test]
    fn unchecked_padding_sends_no_length() {
        let form = FormState { tokenize: true, pad_length: "30".to_string(), ..FormState::default() };
        assert_eq!(
            form.preprocess_options(),
            PreprocessOptions { remove_punctuation: false, tokenize: true, pad_length: None }
        );
    }

    #[test]
    fn checked_padding_reads_the_input() {
        let form = FormState { pad_text: true, pad_length: "30".to_string(), ..FormState::default() };
        assert_eq!(form.preprocess_options().pad_length, Some(30));
        assert!(form.preprocess_options().is_active());
    }

    #[test]
    fn garbage_count_is_absent_and_inactive() {
        let form = FormState {
            random_insertion: true,
            random_insertion_count: "lots".to_string(),
            ..FormState::default()
        };
        let opts = form.augment_options();
        assert_eq!(opts.random_insertion, None);
        assert!(!opts.is_active());
    }

    #[test]
    fn default_form_is_inactive() {
        let form = FormState::default();
        assert!(!form.preprocess_options().is_active());
        assert!(!form.augment_options().is_active());
    }
}
