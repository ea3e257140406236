use crate::constants;

/// Input mask for phone numbers. `9` marks a digit slot, everything else is
/// literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhoneMask {
    pattern: &'static str,
    placeholder: char,
}

impl Default for PhoneMask {
    fn default() -> Self {
        Self::new(constants::PHONE_MASK, constants::PHONE_MASK_CHAR)
    }
}

impl PhoneMask {
    const SLOT: char = '9';

    pub fn new(pattern: &'static str, placeholder: char) -> Self {
        Self {
            pattern,
            placeholder,
        }
    }

    /// Literal text before the first digit slot, e.g. `+380`.
    fn prefix(&self) -> &str {
        let end = self.pattern.find(Self::SLOT).unwrap_or(self.pattern.len());
        self.pattern[..end].trim_end()
    }

    /// Fills the digit slots with the digits typed by the user. A leading
    /// copy of the literal prefix is not counted as typed digits.
    pub fn apply(&self, input: &str) -> String {
        let body = input.trim_start();
        let body = body.strip_prefix(self.prefix()).unwrap_or(body);
        let mut digits = body.chars().filter(char::is_ascii_digit);

        self.pattern
            .chars()
            .map(|c| {
                if c == Self::SLOT {
                    digits.next().unwrap_or(self.placeholder)
                } else {
                    c
                }
            })
            .collect()
    }

    /// Number of digit slots that hold a digit.
    pub fn filled_slots(&self, value: &str) -> usize {
        self.pattern
            .chars()
            .zip(value.chars())
            .filter(|(slot, c)| *slot == Self::SLOT && c.is_ascii_digit())
            .count()
    }

    pub fn is_complete(&self, value: &str) -> bool {
        self.filled_slots(value) == self.pattern.matches(Self::SLOT).count()
    }

    /// The value as validators should see it: empty when no slot is filled,
    /// otherwise the masked text without placeholder characters.
    pub fn unmasked(&self, value: &str) -> String {
        if self.filled_slots(value) == 0 {
            String::new()
        } else {
            value
                .chars()
                .filter(|c| *c != self.placeholder)
                .collect::<String>()
                .trim_end()
                .to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_fills_slots() {
        let mask = PhoneMask::default();
        assert_eq!(mask.apply("991234567"), "+380 99 123 45 67");
        assert_eq!(mask.apply("+380 99 123 45 67"), "+380 99 123 45 67");
        assert_eq!(mask.apply("99 1"), "+380 99 1__ __ __");
        assert_eq!(mask.apply(""), "+380 __ ___ __ __");
    }

    #[test]
    fn test_extra_digits_are_dropped() {
        let mask = PhoneMask::default();
        assert_eq!(mask.apply("9912345678901"), "+380 99 123 45 67");
    }

    #[test]
    fn test_unmasked() {
        let mask = PhoneMask::default();
        assert_eq!(mask.unmasked("+380 __ ___ __ __"), "");
        assert_eq!(mask.unmasked(""), "");
        assert_eq!(mask.unmasked("+380 99 1__ __ __"), "+380 99 1");
        assert_eq!(mask.unmasked("+380 99 123 45 67"), "+380 99 123 45 67");
    }

    #[test]
    fn test_is_complete() {
        let mask = PhoneMask::default();
        assert!(mask.is_complete("+380 99 123 45 67"));
        assert!(!mask.is_complete("+380 99 123 4_ __"));
    }
}
