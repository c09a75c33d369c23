//! Library member data model.
//!
//! Members are created once by the registry and never updated. Validation
//! here mirrors the storage constraints so malformed input is rejected
//! before any write is attempted.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Maximum number of characters in a member name.
pub const MEMBER_NAME_MAX: usize = 100;
/// Maximum number of characters in an email address.
pub const EMAIL_MAX: usize = 254;

/// Validation errors raised while building member values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemberValidationError {
    /// Name was blank once trimmed.
    EmptyName,
    /// Name exceeded [`MEMBER_NAME_MAX`] characters.
    NameTooLong {
        /// Maximum permitted length.
        max: usize,
    },
    /// Registration number was not exactly five ASCII digits.
    InvalidRegistrationNumber,
    /// Member type was not one of the recognised values.
    InvalidMemberType,
    /// Email was malformed or too long.
    InvalidEmail,
    /// Member status was not one of the recognised values.
    InvalidStatus,
}

impl MemberValidationError {
    /// Request field the error refers to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyName | Self::NameTooLong { .. } => "name",
            Self::InvalidRegistrationNumber => "registrationNumber",
            Self::InvalidMemberType => "memberType",
            Self::InvalidEmail => "email",
            Self::InvalidStatus => "status",
        }
    }

    /// Stable machine-readable error code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyName => "empty_name",
            Self::NameTooLong { .. } => "name_too_long",
            Self::InvalidRegistrationNumber => "invalid_registration_number",
            Self::InvalidMemberType => "invalid_member_type",
            Self::InvalidEmail => "invalid_email",
            Self::InvalidStatus => "invalid_member_status",
        }
    }
}

impl fmt::Display for MemberValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "name must not be empty"),
            Self::NameTooLong { max } => write!(f, "name must be at most {max} characters"),
            Self::InvalidRegistrationNumber => {
                write!(f, "registration number must be exactly 5 digits")
            }
            Self::InvalidMemberType => {
                write!(f, "member type must be one of STUDENT, TEACHER, STAFF")
            }
            Self::InvalidEmail => write!(f, "email must look like local@domain.tld"),
            Self::InvalidStatus => {
                write!(f, "member status must be one of ACTIVE, INACTIVE, SUSPENDED")
            }
        }
    }
}

impl std::error::Error for MemberValidationError {}

/// Surrogate key assigned by storage when a member is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemberId(i64);

impl MemberId {
    /// Wrap a raw storage identifier.
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Raw storage identifier.
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Category of member; drives the loan period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MemberType {
    /// Enrolled student; borrows for 14 days.
    Student,
    /// Teaching staff; borrows for 30 days.
    Teacher,
    /// Non-teaching staff; borrows for 30 days.
    Staff,
}

impl MemberType {
    /// Stored and serialised representation.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Student => "STUDENT",
            Self::Teacher => "TEACHER",
            Self::Staff => "STAFF",
        }
    }

    /// Number of days a member of this type may keep a loan.
    pub const fn loan_period_days(self) -> u64 {
        match self {
            Self::Student => 14,
            Self::Teacher | Self::Staff => 30,
        }
    }
}

impl FromStr for MemberType {
    type Err = MemberValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "STUDENT" => Ok(Self::Student),
            "TEACHER" => Ok(Self::Teacher),
            "STAFF" => Ok(Self::Staff),
            _ => Err(MemberValidationError::InvalidMemberType),
        }
    }
}

impl fmt::Display for MemberType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Administrative status of a member. Only `Active` is ever written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MemberStatus {
    /// Member in good standing.
    #[default]
    Active,
    /// Member no longer borrowing.
    Inactive,
    /// Member barred from borrowing.
    Suspended,
}

impl MemberStatus {
    /// Stored and serialised representation.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Inactive => "INACTIVE",
            Self::Suspended => "SUSPENDED",
        }
    }
}

impl FromStr for MemberStatus {
    type Err = MemberValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ACTIVE" => Ok(Self::Active),
            "INACTIVE" => Ok(Self::Inactive),
            "SUSPENDED" => Ok(Self::Suspended),
            _ => Err(MemberValidationError::InvalidStatus),
        }
    }
}

/// Member display name, trimmed and at most [`MEMBER_NAME_MAX`] characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MemberName(String);

impl MemberName {
    /// Validate and construct a [`MemberName`].
    pub fn new(name: impl AsRef<str>) -> Result<Self, MemberValidationError> {
        let trimmed = name.as_ref().trim();
        if trimmed.is_empty() {
            return Err(MemberValidationError::EmptyName);
        }
        if trimmed.chars().count() > MEMBER_NAME_MAX {
            return Err(MemberValidationError::NameTooLong {
                max: MEMBER_NAME_MAX,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for MemberName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl From<MemberName> for String {
    fn from(value: MemberName) -> Self {
        value.0
    }
}

impl TryFrom<String> for MemberName {
    type Error = MemberValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

static REGISTRATION_NUMBER_RE: OnceLock<Regex> = OnceLock::new();

fn registration_number_regex() -> &'static Regex {
    REGISTRATION_NUMBER_RE.get_or_init(|| {
        Regex::new("^[0-9]{5}$")
            .unwrap_or_else(|error| panic!("registration number regex failed to compile: {error}"))
    })
}

/// Five-digit registration number ("matricula"), unique across members.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RegistrationNumber(String);

impl RegistrationNumber {
    /// Validate and construct a [`RegistrationNumber`].
    ///
    /// Surrounding whitespace is not tolerated: `" 12345"` is rejected.
    ///
    /// # Examples
    /// ```
    /// use circulation::domain::RegistrationNumber;
    ///
    /// assert!(RegistrationNumber::new("12345").is_ok());
    /// assert!(RegistrationNumber::new("123").is_err());
    /// assert!(RegistrationNumber::new("ABC12").is_err());
    /// ```
    pub fn new(value: impl AsRef<str>) -> Result<Self, MemberValidationError> {
        let value = value.as_ref();
        if !registration_number_regex().is_match(value) {
            return Err(MemberValidationError::InvalidRegistrationNumber);
        }
        Ok(Self(value.to_owned()))
    }
}

impl AsRef<str> for RegistrationNumber {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for RegistrationNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<RegistrationNumber> for String {
    fn from(value: RegistrationNumber) -> Self {
        value.0
    }
}

impl TryFrom<String> for RegistrationNumber {
    type Error = MemberValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        // Non-empty local part, then a domain of two or more non-empty labels.
        Regex::new(r"^[^\s@]+@[^\s@.]+(\.[^\s@.]+)+$")
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Contact email address, unique across members when present.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// Validate and construct an [`Email`] from trimmed input.
    pub fn new(value: impl AsRef<str>) -> Result<Self, MemberValidationError> {
        let trimmed = value.as_ref().trim();
        if trimmed.chars().count() > EMAIL_MAX || !email_regex().is_match(trimmed) {
            return Err(MemberValidationError::InvalidEmail);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Treat blank input as absent, otherwise validate it.
    ///
    /// # Examples
    /// ```
    /// use circulation::domain::Email;
    ///
    /// assert_eq!(Email::optional(Some("   ")), Ok(None));
    /// assert!(Email::optional(Some("ana@example.org")).expect("valid").is_some());
    /// assert!(Email::optional(Some("ana@localhost")).is_err());
    /// ```
    pub fn optional(value: Option<&str>) -> Result<Option<Self>, MemberValidationError> {
        match value.map(str::trim) {
            None | Some("") => Ok(None),
            Some(raw) => Self::new(raw).map(Some),
        }
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl From<Email> for String {
    fn from(value: Email) -> Self {
        value.0
    }
}

impl TryFrom<String> for Email {
    type Error = MemberValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Validated registration request for a new member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMember {
    /// Display name.
    pub name: MemberName,
    /// Unique five-digit registration number.
    pub registration_number: RegistrationNumber,
    /// Member category.
    pub member_type: MemberType,
    /// Optional unique email.
    pub email: Option<Email>,
}

impl NewMember {
    /// Validate raw request values, reporting the first offending field.
    ///
    /// # Examples
    /// ```
    /// use circulation::domain::{MemberType, NewMember};
    ///
    /// let member = NewMember::try_from_parts("Ana", "88888", "STUDENT", Some(""))
    ///     .expect("valid member");
    /// assert_eq!(member.member_type, MemberType::Student);
    /// assert!(member.email.is_none());
    /// ```
    pub fn try_from_parts(
        name: &str,
        registration_number: &str,
        member_type: &str,
        email: Option<&str>,
    ) -> Result<Self, MemberValidationError> {
        Ok(Self {
            name: MemberName::new(name)?,
            registration_number: RegistrationNumber::new(registration_number)?,
            member_type: member_type.parse()?,
            email: Email::optional(email)?,
        })
    }
}

/// Persisted member record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    /// Storage-assigned identifier.
    pub id: MemberId,
    /// Display name.
    pub name: MemberName,
    /// Unique five-digit registration number.
    pub registration_number: RegistrationNumber,
    /// Member category.
    pub member_type: MemberType,
    /// Optional unique email.
    pub email: Option<Email>,
    /// Date the member was registered.
    pub registered_on: NaiveDate,
    /// Administrative status.
    pub status: MemberStatus,
}

impl Member {
    /// Assemble a record from a validated request and storage-assigned data.
    pub fn from_new(id: MemberId, new: NewMember, registered_on: NaiveDate) -> Self {
        Self {
            id,
            name: new.name,
            registration_number: new.registration_number,
            member_type: new.member_type,
            email: new.email,
            registered_on,
            status: MemberStatus::Active,
        }
    }
}

#[cfg(test)]
mod tests {
    //! Validation coverage for member primitives.

    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("12345", true)]
    #[case("00000", true)]
    #[case("123", false)]
    #[case("123456", false)]
    #[case("ABC12", false)]
    #[case(" 1234", false)]
    #[case("１２３４５", false)]
    fn registration_number_requires_five_ascii_digits(#[case] raw: &str, #[case] ok: bool) {
        assert_eq!(RegistrationNumber::new(raw).is_ok(), ok);
    }

    #[rstest]
    #[case("ana@example.org", true)]
    #[case("a.b+c@mail.example.co", true)]
    #[case("@example.org", false)]
    #[case("ana@", false)]
    #[case("ana@localhost", false)]
    #[case("ana@example.", false)]
    #[case("ana@.org", false)]
    #[case("ana@exa mple.org", false)]
    #[case("ana", false)]
    fn email_shape_is_checked(#[case] raw: &str, #[case] ok: bool) {
        assert_eq!(Email::new(raw).is_ok(), ok);
    }

    #[rstest]
    #[case(None)]
    #[case(Some(""))]
    #[case(Some("   "))]
    fn blank_email_is_absent(#[case] raw: Option<&str>) {
        assert_eq!(Email::optional(raw), Ok(None));
    }

    #[rstest]
    #[case("STUDENT", MemberType::Student, 14)]
    #[case("TEACHER", MemberType::Teacher, 30)]
    #[case("STAFF", MemberType::Staff, 30)]
    fn member_type_parses_and_sets_period(
        #[case] raw: &str,
        #[case] expected: MemberType,
        #[case] days: u64,
    ) {
        let parsed: MemberType = raw.parse().expect("known member type");
        assert_eq!(parsed, expected);
        assert_eq!(parsed.loan_period_days(), days);
        assert_eq!(parsed.as_str(), raw);
    }

    #[rstest]
    #[case("student")]
    #[case("ALUNO")]
    #[case("")]
    fn member_type_rejects_unknown_values(#[case] raw: &str) {
        assert_eq!(
            raw.parse::<MemberType>(),
            Err(MemberValidationError::InvalidMemberType)
        );
    }

    #[rstest]
    fn name_is_trimmed_and_bounded() {
        let name = MemberName::new("  Ana  ").expect("valid name");
        assert_eq!(name.as_ref(), "Ana");

        let too_long = "x".repeat(MEMBER_NAME_MAX + 1);
        assert_eq!(
            MemberName::new(too_long),
            Err(MemberValidationError::NameTooLong {
                max: MEMBER_NAME_MAX
            })
        );
        assert_eq!(MemberName::new("   "), Err(MemberValidationError::EmptyName));
    }

    #[rstest]
    fn try_from_parts_reports_first_invalid_field() {
        let err = NewMember::try_from_parts("Ana", "123", "BOGUS", None)
            .expect_err("registration number is invalid");
        assert_eq!(err.field(), "registrationNumber");
        assert_eq!(err.code(), "invalid_registration_number");
    }

    #[rstest]
    fn from_new_defaults_to_active() {
        let new = NewMember::try_from_parts("Ana", "88888", "STUDENT", None).expect("valid");
        let registered_on = NaiveDate::from_ymd_opt(2024, 1, 2).expect("valid date");
        let member = Member::from_new(MemberId::new(7), new, registered_on);
        assert_eq!(member.status, MemberStatus::Active);
        assert_eq!(member.registered_on, registered_on);
    }
}
