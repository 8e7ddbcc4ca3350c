//! # coreext
//!
//! Small, stateless helpers for three everyday chores:
//!
//! - **Dates**: parse a date string strictly against a pattern like `dd/MM/yyyy` in a given
//!   culture, test whether two date intervals touch, and measure the difference between two
//!   date-times in SQL `DATEDIFF` style.
//! - **Enum labels**: give enum variants human-readable labels and fall back to the variant's
//!   name when there is none.
//! - **Error messages**: render an error and all of its causes as one string, with the outermost
//!   trace if one was captured.
//!
//! Every function is pure. Nothing reads a global culture or calendar: the culture is always an
//! argument, and all cultures use the proleptic Gregorian calendar.
//!
//! ## Examples
//!
//! Parse a date. Any kind of failure gives `None`:
//!
//! ```
//! use chrono::NaiveDate;
//! use coreext::prelude::*;
//!
//! let date = parse_exact("31/12/2023", "dd/MM/yyyy", "vi-VN");
//! assert_eq!(NaiveDate::from_ymd_opt(2023, 12, 31).unwrap().and_hms_opt(0, 0, 0), date);
//!
//! // or with the defaults, `dd/MM/yyyy` and `vi-VN`
//! assert_eq!(date, parse_exact_default("31/12/2023"));
//! assert_eq!(None, parse_exact_default("13/13/2023"));
//! ```
//!
//! Measure and compare:
//!
//! ```
//! use coreext::prelude::*;
//!
//! let start = parse_exact_default("01/01/2020").unwrap();
//! let end = parse_exact_default("01/03/2021").unwrap();
//!
//! assert_eq!(14, start.date_diff(end, DatePart::Month));
//! assert_eq!(Ok(425), start.date_diff_str(end, "dd"));
//! assert!(start.date_diff_str(end, "xx").is_err());
//! assert!(start.intersects(end, end, end));
//! ```
//!
//! Label enum variants:
//!
//! ```
//! use coreext::prelude::*;
//!
//! display_enum! {
//!     pub enum Gender {
//!         Male => "Nam",
//!         Female => "Nữ",
//!         Other,
//!     }
//! }
//!
//! assert_eq!("Nữ", Gender::Female.display_name());
//! assert_eq!("Other", Gender::Other.display_name());
//! ```
//!
//! Render an error chain:
//!
//! ```
//! use anyhow::anyhow;
//! use coreext::prelude::*;
//!
//! let error = anyhow!("B").context("A");
//! assert_eq!("A\nB", error.to_error_message(false));
//! ```
//!
//! ## Patterns
//!
//! Date patterns follow .NET custom date and time format strings. See [`Format`] for the table of
//! specifiers, and [`Culture`] for the cultures that are available.
//!
//! ## Date Parts
//!
//! See [`DatePart`] for the units and their SQL abbreviations.
//!
//! ## Prelude
//!
//! coreext provides a prelude module for convenience. It contains everything needed to interact
//! with the library.
//!
//! Use it with:
//!
//! ```
//! use coreext::prelude::*;
//! ```
#![warn(missing_docs)]

mod culture;
mod date_part;
mod datetime;
mod display_name;
mod error;
mod error_message;
mod format;
mod parse;

pub use crate::culture::{Culture, DEFAULT_CULTURE};
pub use crate::date_part::DatePart;
pub use crate::datetime::{date_diff, date_diff_str, intersects, DateTimeExt};
pub use crate::display_name::DisplayName;
pub use crate::error::{Error, ParseError, PatternError, Result};
pub use crate::error_message::{format_error, Chain, ErrorMessage, MAX_CHAIN_DEPTH};
pub use crate::format::{format_date, Format, DEFAULT_FORMAT};
pub use crate::parse::{parse_exact, parse_exact_default, parse_exact_with};

/// A convenience module appropriate for glob imports (`use coreext::prelude::*;`).
pub mod prelude {
    #[doc(no_inline)]
    pub use crate::display_enum;
    #[doc(no_inline)]
    pub use crate::Culture;
    #[doc(no_inline)]
    pub use crate::DatePart;
    #[doc(no_inline)]
    pub use crate::DateTimeExt;
    #[doc(no_inline)]
    pub use crate::DisplayName;
    #[doc(no_inline)]
    pub use crate::Error;
    #[doc(no_inline)]
    pub use crate::ErrorMessage;
    #[doc(no_inline)]
    pub use crate::Format;
    #[doc(no_inline)]
    pub use crate::ParseError;
    #[doc(no_inline)]
    pub use crate::{format_date, format_error, parse_exact, parse_exact_default, parse_exact_with};
}
