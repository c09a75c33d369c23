//! Book title data model with copy-count bookkeeping.
//!
//! Copies are a counter, not individual units. A new title starts with
//! every copy available; issuing a loan decrements the available count and
//! nothing increments it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Maximum number of characters in a title string.
pub const TITLE_MAX: usize = 200;
/// Maximum number of characters in an authors string.
pub const AUTHORS_MAX: usize = 100;
/// Minimum number of characters in an ISBN.
pub const ISBN_MIN: usize = 10;
/// Maximum number of characters in an ISBN.
pub const ISBN_MAX: usize = 13;

/// Validation errors raised while building title values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TitleValidationError {
    /// Title string was blank once trimmed.
    EmptyTitle,
    /// Title string exceeded [`TITLE_MAX`] characters.
    TitleTooLong {
        /// Maximum permitted length.
        max: usize,
    },
    /// Authors string was blank once trimmed.
    EmptyAuthors,
    /// Authors string exceeded [`AUTHORS_MAX`] characters.
    AuthorsTooLong {
        /// Maximum permitted length.
        max: usize,
    },
    /// ISBN length fell outside [`ISBN_MIN`]..=[`ISBN_MAX`].
    InvalidIsbn,
    /// Publication year was negative or out of range.
    InvalidYear,
    /// Total copies was zero, negative or out of range.
    InvalidTotalCopies,
    /// Title status was not one of the recognised values.
    InvalidStatus,
}

impl TitleValidationError {
    /// Request field the error refers to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyTitle | Self::TitleTooLong { .. } => "title",
            Self::EmptyAuthors | Self::AuthorsTooLong { .. } => "authors",
            Self::InvalidIsbn => "isbn",
            Self::InvalidYear => "year",
            Self::InvalidTotalCopies => "totalCopies",
            Self::InvalidStatus => "status",
        }
    }

    /// Stable machine-readable error code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyTitle => "empty_title",
            Self::TitleTooLong { .. } => "title_too_long",
            Self::EmptyAuthors => "empty_authors",
            Self::AuthorsTooLong { .. } => "authors_too_long",
            Self::InvalidIsbn => "invalid_isbn",
            Self::InvalidYear => "invalid_year",
            Self::InvalidTotalCopies => "invalid_total_copies",
            Self::InvalidStatus => "invalid_title_status",
        }
    }
}

impl fmt::Display for TitleValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "title must not be empty"),
            Self::TitleTooLong { max } => write!(f, "title must be at most {max} characters"),
            Self::EmptyAuthors => write!(f, "authors must not be empty"),
            Self::AuthorsTooLong { max } => {
                write!(f, "authors must be at most {max} characters")
            }
            Self::InvalidIsbn => write!(
                f,
                "isbn must be between {ISBN_MIN} and {ISBN_MAX} characters"
            ),
            Self::InvalidYear => write!(f, "year must not be negative"),
            Self::InvalidTotalCopies => write!(f, "totalCopies must be greater than zero"),
            Self::InvalidStatus => write!(f, "title status must be AVAILABLE or UNAVAILABLE"),
        }
    }
}

impl std::error::Error for TitleValidationError {}

/// Surrogate key assigned by storage when a title is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TitleId(i64);

impl TitleId {
    /// Wrap a raw storage identifier.
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Raw storage identifier.
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for TitleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Catalogue status. Set on creation and not derived from copy counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TitleStatus {
    /// Title is on the shelf.
    #[default]
    Available,
    /// Title withdrawn from circulation.
    Unavailable,
}

impl TitleStatus {
    /// Stored and serialised representation.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Available => "AVAILABLE",
            Self::Unavailable => "UNAVAILABLE",
        }
    }
}

impl FromStr for TitleStatus {
    type Err = TitleValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "AVAILABLE" => Ok(Self::Available),
            "UNAVAILABLE" => Ok(Self::Unavailable),
            _ => Err(TitleValidationError::InvalidStatus),
        }
    }
}

fn bounded_text(
    raw: &str,
    max: usize,
    empty: TitleValidationError,
    too_long: TitleValidationError,
) -> Result<String, TitleValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(empty);
    }
    if trimmed.chars().count() > max {
        return Err(too_long);
    }
    Ok(trimmed.to_owned())
}

fn optional_text(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|value| !value.is_empty())
}

/// Validated registration request for a new title.
///
/// ## Invariants
/// - `title` and `authors` are trimmed, non-empty and within their limits.
/// - `isbn`, when present, is 10 to 13 characters.
/// - `year`, when present, is not negative.
/// - `total_copies` is greater than zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTitle {
    title: String,
    authors: String,
    isbn: Option<String>,
    edition: Option<String>,
    year: Option<i32>,
    total_copies: i32,
}

impl NewTitle {
    /// Validate raw request values, reporting the first offending field.
    ///
    /// Blank `isbn` and `edition` values are treated as absent.
    ///
    /// # Examples
    /// ```
    /// use circulation::domain::NewTitle;
    ///
    /// let title = NewTitle::try_from_parts("Dom Casmurro", "Machado de Assis", Some(""), None, Some(1899), 2)
    ///     .expect("valid title");
    /// assert_eq!(title.total_copies(), 2);
    /// assert!(title.isbn().is_none());
    ///
    /// assert!(NewTitle::try_from_parts("T", "A", None, None, None, 0).is_err());
    /// ```
    pub fn try_from_parts(
        title: &str,
        authors: &str,
        isbn: Option<&str>,
        edition: Option<&str>,
        year: Option<i64>,
        total_copies: i64,
    ) -> Result<Self, TitleValidationError> {
        let title = bounded_text(
            title,
            TITLE_MAX,
            TitleValidationError::EmptyTitle,
            TitleValidationError::TitleTooLong { max: TITLE_MAX },
        )?;
        let authors = bounded_text(
            authors,
            AUTHORS_MAX,
            TitleValidationError::EmptyAuthors,
            TitleValidationError::AuthorsTooLong { max: AUTHORS_MAX },
        )?;

        let isbn = optional_text(isbn)
            .map(|raw| {
                let length = raw.chars().count();
                if (ISBN_MIN..=ISBN_MAX).contains(&length) {
                    Ok(raw.to_owned())
                } else {
                    Err(TitleValidationError::InvalidIsbn)
                }
            })
            .transpose()?;
        let edition = optional_text(edition).map(str::to_owned);

        let year = year
            .map(|raw| {
                i32::try_from(raw)
                    .ok()
                    .filter(|value| *value >= 0)
                    .ok_or(TitleValidationError::InvalidYear)
            })
            .transpose()?;

        let total_copies = i32::try_from(total_copies)
            .ok()
            .filter(|value| *value > 0)
            .ok_or(TitleValidationError::InvalidTotalCopies)?;

        Ok(Self {
            title,
            authors,
            isbn,
            edition,
            year,
            total_copies,
        })
    }

    /// Title string.
    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    /// Authors string.
    pub fn authors(&self) -> &str {
        self.authors.as_str()
    }

    /// Optional ISBN.
    pub fn isbn(&self) -> Option<&str> {
        self.isbn.as_deref()
    }

    /// Optional edition.
    pub fn edition(&self) -> Option<&str> {
        self.edition.as_deref()
    }

    /// Optional publication year.
    pub fn year(&self) -> Option<i32> {
        self.year
    }

    /// Number of copies owned; also the initial available count.
    pub fn total_copies(&self) -> i32 {
        self.total_copies
    }
}

/// Persisted title record.
///
/// ## Invariants
/// - `0 <= available_copies <= total_copies`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Title {
    /// Storage-assigned identifier.
    pub id: TitleId,
    /// Title string.
    pub title: String,
    /// Authors string.
    pub authors: String,
    /// Optional ISBN.
    pub isbn: Option<String>,
    /// Optional edition.
    pub edition: Option<String>,
    /// Optional publication year.
    pub year: Option<i32>,
    /// Number of copies owned.
    pub total_copies: i32,
    /// Number of copies on the shelf.
    pub available_copies: i32,
    /// Catalogue status.
    pub status: TitleStatus,
}

impl Title {
    /// Assemble a freshly created record with every copy available.
    pub fn from_new(id: TitleId, new: NewTitle) -> Self {
        Self {
            id,
            available_copies: new.total_copies,
            total_copies: new.total_copies,
            title: new.title,
            authors: new.authors,
            isbn: new.isbn,
            edition: new.edition,
            year: new.year,
            status: TitleStatus::Available,
        }
    }

    /// Whether at least one copy can be lent.
    pub fn has_available_copy(&self) -> bool {
        self.available_copies > 0
    }
}
