//! Partial redaction formats

use super::{group, Masker};
use regex::Captures;

/// `PREFIX-****-LAST4`
pub struct PhoneMasker;

impl Masker for PhoneMasker {
    fn mask(&self, captures: &Captures<'_>) -> String {
        format!(
            "{}-****-{}",
            group(captures, "prefix"),
            group(captures, "last")
        )
    }

    fn required_groups(&self) -> &'static [&'static str] {
        &["prefix", "last"]
    }
}

/// First character of the local part, then `***@DOMAIN`
pub struct EmailMasker;

impl Masker for EmailMasker {
    fn mask(&self, captures: &Captures<'_>) -> String {
        let local = group(captures, "local");
        let first: String = local.chars().take(1).collect();
        format!("{first}***@{}", group(captures, "domain"))
    }

    fn required_groups(&self) -> &'static [&'static str] {
        &["local", "domain"]
    }
}

/// `****-****-****-LAST4`
pub struct CardMasker;

impl Masker for CardMasker {
    fn mask(&self, captures: &Captures<'_>) -> String {
        format!("****-****-****-{}", group(captures, "last"))
    }

    fn required_groups(&self) -> &'static [&'static str] {
        &["last"]
    }
}

/// `LETTER****LAST4`
pub struct PassportMasker;

impl Masker for PassportMasker {
    fn mask(&self, captures: &Captures<'_>) -> String {
        format!(
            "{}****{}",
            group(captures, "letter"),
            group(captures, "last")
        )
    }

    fn required_groups(&self) -> &'static [&'static str] {
        &["letter", "last"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;

    fn mask_with(masker: &dyn Masker, pattern: &str, text: &str) -> String {
        let regex = Regex::new(pattern).unwrap();
        let captures = regex.captures(text).unwrap();
        masker.mask(&captures)
    }

    #[test]
    fn test_phone_format() {
        let masked = mask_with(
            &PhoneMasker,
            r"(?P<prefix>01[016789])-?(?P<middle>\d{3,4})-?(?P<last>\d{4})",
            "01098765432",
        );
        assert_eq!(masked, "010-****-5432");
    }

    #[test]
    fn test_email_keeps_first_character_and_domain() {
        let masked = mask_with(
            &EmailMasker,
            r"(?P<local>[\w.]+)@(?P<domain>[\w.]+)",
            "x@travel.co.kr",
        );
        assert_eq!(masked, "x***@travel.co.kr");
    }

    #[test]
    fn test_card_format() {
        let masked = mask_with(&CardMasker, r"\d{12}(?P<last>\d{4})", "4111111111111111");
        assert_eq!(masked, "****-****-****-1111");
    }

    #[test]
    fn test_passport_format() {
        let masked = mask_with(
            &PassportMasker,
            r"(?P<letter>[A-Z])\d{4}(?P<last>\d{4})",
            "S98761234",
        );
        assert_eq!(masked, "S****1234");
    }

    #[test]
    fn test_missing_group_yields_empty_segment() {
        let masked = mask_with(&CardMasker, r"\d{16}", "4111111111111111");
        assert_eq!(masked, "****-****-****-");
    }
}
