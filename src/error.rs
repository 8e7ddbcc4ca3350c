/// Errors from reading a date/time pattern string such as `dd/MM/yyyy`.
#[derive(thiserror::Error, Debug, PartialEq, Eq, Clone)]
pub enum PatternError {
    /// The pattern string was empty.
    #[error("Pattern should not be empty")]
    Empty,

    /// A quoted literal was opened but never closed.
    #[error("Quoted literal starting at byte {index} should be terminated with a matching `{quote}`")]
    UnterminatedQuote {
        /// The quote character that opened the literal.
        quote: char,
        /// Byte offset of the opening quote in the pattern.
        index: usize,
    },

    /// A `\` or `%` was the last character of the pattern.
    #[error("`{escape}` at the end of the pattern should be followed by a character")]
    TrailingEscape {
        /// The escape character.
        escape: char,
    },

    /// A specifier letter was repeated more times than its longest form allows.
    #[error("Specifier `{pattern}` is too long: `{letter}` may repeat at most {max} times")]
    SpecifierTooLong {
        /// The offending run of letters.
        pattern: String,
        /// The letter that was repeated.
        letter: char,
        /// The longest allowed run.
        max: usize,
    },

    /// A specifier this library does not handle, like time zone offsets.
    #[error("Specifier `{pattern}` is not supported")]
    UnsupportedSpecifier {
        /// The offending specifier.
        pattern: String,
    },

    /// A one-character pattern that is not a standard pattern.
    #[error("`{pattern}` is not a standard date/time pattern")]
    UnknownStandardPattern {
        /// The offending pattern.
        pattern: char,
    },
}

/// The error type for this library.
#[derive(thiserror::Error, Debug, PartialEq, Eq, Clone)]
pub enum Error {
    /// A date part abbreviation that is not recognized by
    /// [`DatePart::from_str`](crate::DatePart).
    #[error("DatePart \"{part}\" is unknown")]
    UnknownDatePart {
        /// The token as it was given, before trimming and lowercasing.
        part: String,
    },

    /// A culture name that is not in the culture table.
    #[error("Culture \"{name}\" is not supported")]
    UnknownCulture {
        /// The culture name as it was given.
        name: String,
    },

    /// A date/time pattern could not be read.
    #[error("Invalid date/time pattern")]
    Pattern(#[from] PatternError),
}

/// Why a date string was rejected by [`parse_exact_with`](crate::parse_exact_with).
#[derive(thiserror::Error, Debug, PartialEq, Eq, Clone)]
pub enum ParseError {
    /// The pattern or culture was unusable. The cause is the [`Error`].
    #[error("Date pattern or culture is unusable")]
    Setup(#[from] Error),

    /// The input stopped matching the pattern.
    #[error("Date string should match `{expected}` at byte {index}")]
    Mismatch {
        /// Byte offset in the input where matching failed.
        index: usize,
        /// A description of what the pattern expected there.
        expected: String,
    },

    /// Input remained after the whole pattern matched.
    #[error("Date string has unexpected trailing text at byte {index}")]
    TrailingInput {
        /// Byte offset of the first unconsumed byte.
        index: usize,
    },

    /// The same component was given twice with different values.
    #[error("Date string gives {component} twice with different values")]
    Conflict {
        /// The component name, e.g. `day`.
        component: &'static str,
    },

    /// All parts matched, but they do not form a real date and time.
    #[error("Year ({year}), month ({month}), and day ({day}) cannot be made into a valid date")]
    InvalidDate {
        /// Parsed year.
        year: i32,
        /// Parsed month.
        month: u32,
        /// Parsed day.
        day: u32,
    },

    /// Hour, minute, or second out of range.
    #[error("Hour ({hour}), minute ({minute}), and second ({second}) cannot be made into a valid time")]
    InvalidTime {
        /// Parsed hour (24-hour clock).
        hour: u32,
        /// Parsed minute.
        minute: u32,
        /// Parsed second.
        second: u32,
    },

    /// A day name was given that disagrees with the parsed date.
    #[error("Day of week does not match the date")]
    WeekdayMismatch,
}

/// A specialized [`Result`](std::result::Result) for this library.
pub type Result<T> = std::result::Result<T, Error>;
