//! Field-level validators shared by employees, drafts and news articles.

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;
use url::{Host, Url};

/// Message reported for a malformed Telegram handle.
pub const TELEGRAM_NICK_MESSAGE: &str =
    "Ник в Telegram должен начинаться с @ и содержать только буквы, цифры и подчеркивания";

pub const FULL_NAME_MAX: usize = 255;
pub const CITY_MAX: usize = 100;
pub const COUNTRY_MAX: usize = 100;
pub const TELEGRAM_NICK_MAX: usize = 100;
pub const ABOUT_MAX: usize = 1000;
pub const AUTHOR_MAX: usize = 255;
pub const TITLE_MAX: usize = 255;
pub const SOURCE_URL_MAX: usize = 200;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{}", TELEGRAM_NICK_MESSAGE)]
    TelegramNick,
    #[error("{field}: at most {max} characters allowed, got {actual}")]
    TooLong {
        field: &'static str,
        max: usize,
        actual: usize,
    },
    #[error("{field}: this field cannot be blank")]
    Required { field: &'static str },
    #[error("{field}: {value:?} is not a valid choice")]
    InvalidChoice { field: &'static str, value: String },
    #[error("{field}: enter a valid http(s) URL")]
    InvalidUrl { field: &'static str },
}

impl ValidationError {
    /// Name of the offending field.
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::TelegramNick => "telegram_nick",
            ValidationError::TooLong { field, .. }
            | ValidationError::Required { field }
            | ValidationError::InvalidChoice { field, .. }
            | ValidationError::InvalidUrl { field } => field,
        }
    }
}

/// Blank handles are allowed; anything else must be `@` followed by word characters.
///
/// ```
/// use entity::validation::validate_telegram_nick;
/// assert!(validate_telegram_nick("@ivan_99").is_ok());
/// assert!(validate_telegram_nick("ivan_99").is_err());
/// ```
pub fn validate_telegram_nick(nick: &str) -> Result<(), ValidationError> {
    static RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^@[\w]+$").expect("valid regex"));
    if nick.is_empty() {
        return Ok(());
    }
    validate_max_chars("telegram_nick", nick, TELEGRAM_NICK_MAX)?;
    if RE.is_match(nick) {
        Ok(())
    } else {
        Err(ValidationError::TelegramNick)
    }
}

/// Length limits count characters, so Cyrillic text gets the same budget as ASCII.
pub fn validate_max_chars(
    field: &'static str,
    value: &str,
    max: usize,
) -> Result<(), ValidationError> {
    let actual = value.chars().count();
    if actual > max {
        return Err(ValidationError::TooLong { field, max, actual });
    }
    Ok(())
}

pub fn validate_required(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::Required { field })
    } else {
        Ok(())
    }
}

/// Blank, or an absolute http(s) URL with a real host.
pub fn validate_source_url(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Ok(());
    }
    validate_max_chars("source_url", value, SOURCE_URL_MAX)?;
    let invalid = ValidationError::InvalidUrl {
        field: "source_url",
    };
    let url = Url::parse(value).map_err(|_| invalid.clone())?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid);
    }
    match url.host() {
        Some(Host::Domain(domain)) if is_hostname(domain) => Ok(()),
        Some(Host::Ipv4(_) | Host::Ipv6(_)) => Ok(()),
        _ => Err(invalid),
    }
}

/// DNS host names: every label is letters, digits or inner hyphens.
fn is_hostname(domain: &str) -> bool {
    let domain = domain.strip_suffix('.').unwrap_or(domain);
    !domain.is_empty()
        && domain.split('.').all(|label| {
            !label.is_empty()
                && !label.starts_with('-')
                && !label.ends_with('-')
                && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn telegram_nick_accepts_word_characters() {
        assert_eq!(validate_telegram_nick("@ivan_99"), Ok(()));
        assert_eq!(validate_telegram_nick("@иван"), Ok(()));
    }

    #[test]
    fn telegram_nick_requires_leading_at() {
        assert_eq!(
            validate_telegram_nick("ivan_99"),
            Err(ValidationError::TelegramNick)
        );
    }

    #[test]
    fn telegram_nick_rejects_punctuation() {
        assert_eq!(
            validate_telegram_nick("@иван!"),
            Err(ValidationError::TelegramNick)
        );
        assert_eq!(validate_telegram_nick("@"), Err(ValidationError::TelegramNick));
        assert_eq!(
            validate_telegram_nick("@ivan petrov"),
            Err(ValidationError::TelegramNick)
        );
    }

    #[test]
    fn telegram_nick_may_be_blank() {
        assert_eq!(validate_telegram_nick(""), Ok(()));
    }

    #[test]
    fn telegram_error_carries_fixed_message() {
        let err = validate_telegram_nick("nope").unwrap_err();
        assert_eq!(err.to_string(), TELEGRAM_NICK_MESSAGE);
        assert_eq!(err.field(), "telegram_nick");
    }

    #[test]
    fn max_chars_counts_characters_not_bytes() {
        let about = "я".repeat(ABOUT_MAX);
        assert!(validate_max_chars("about", &about, ABOUT_MAX).is_ok());
        let too_long = format!("{about}я");
        assert_eq!(
            validate_max_chars("about", &too_long, ABOUT_MAX),
            Err(ValidationError::TooLong {
                field: "about",
                max: ABOUT_MAX,
                actual: ABOUT_MAX + 1
            })
        );
    }

    #[test]
    fn required_rejects_whitespace() {
        assert!(validate_required("full_name", "   ").is_err());
        assert!(validate_required("full_name", "Иванов").is_ok());
    }

    #[test]
    fn source_url_must_be_http() {
        assert!(validate_source_url("").is_ok());
        assert!(validate_source_url("https://habr.com/ru/news/1/").is_ok());
        assert!(validate_source_url("http://example.test:8080?id=3").is_ok());
        assert!(validate_source_url("ftp://example.test").is_err());
        assert!(validate_source_url("not a url").is_err());
    }

    #[test]
    fn source_url_accepts_ip_hosts_and_credentials() {
        assert!(validate_source_url("http://[::1]/news").is_ok());
        assert!(validate_source_url("http://127.0.0.1:8000/feed").is_ok());
        assert!(validate_source_url("http://user:pw@host.test/").is_ok());
    }

    #[test]
    fn source_url_rejects_malformed_hosts() {
        let invalid = Err(ValidationError::InvalidUrl {
            field: "source_url",
        });
        assert_eq!(validate_source_url("http://..../"), invalid);
        assert_eq!(validate_source_url("https://a_b!$/x"), invalid);
        assert_eq!(validate_source_url("mailto:hr@example.test"), invalid);
    }

    #[test]
    fn source_url_length_is_checked_before_parsing() {
        let long = format!("https://example.test/{}", "a".repeat(SOURCE_URL_MAX));
        assert!(matches!(
            validate_source_url(&long),
            Err(ValidationError::TooLong {
                field: "source_url",
                ..
            })
        ));
    }
}
