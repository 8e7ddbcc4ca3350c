use crate::{
    culture::Culture,
    error::{Error, PatternError},
};
use chrono::{Datelike, NaiveDateTime, Timelike};
use core::fmt::{self, Display, Write};

/// The pattern used when none is given.
pub const DEFAULT_FORMAT: &str = "dd/MM/yyyy";

/// Greatest number of digits a fraction specifier (`f` or `F`) may ask for.
const MAX_FRACTION_DIGITS: usize = 7;

/// The date/time component a specifier reads or writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Field {
    Day,
    Month,
    Year,
    Hour12,
    Hour24,
    Minute,
    Second,
    /// `f`: an exact number of fraction digits.
    Fraction,
    /// `F`: at most that many fraction digits.
    OptionalFraction,
    AmPm,
}

impl Field {
    fn from_letter(letter: char) -> Option<Self> {
        Some(match letter {
            'd' => Field::Day,
            'M' => Field::Month,
            'y' => Field::Year,
            'h' => Field::Hour12,
            'H' => Field::Hour24,
            'm' => Field::Minute,
            's' => Field::Second,
            'f' => Field::Fraction,
            'F' => Field::OptionalFraction,
            't' => Field::AmPm,
            _ => return None,
        })
    }

    fn letter(&self) -> char {
        match self {
            Field::Day => 'd',
            Field::Month => 'M',
            Field::Year => 'y',
            Field::Hour12 => 'h',
            Field::Hour24 => 'H',
            Field::Minute => 'm',
            Field::Second => 's',
            Field::Fraction => 'f',
            Field::OptionalFraction => 'F',
            Field::AmPm => 't',
        }
    }

    /// The longest run of this letter that still means something, or `None` if any length is
    /// fine (`dddd`, `MMMM`, and `tt` absorb extra letters).
    fn max_len(&self) -> Option<usize> {
        match self {
            Field::Day | Field::Month | Field::AmPm => None,
            Field::Year => Some(5),
            Field::Hour12 | Field::Hour24 | Field::Minute | Field::Second => Some(2),
            Field::Fraction | Field::OptionalFraction => Some(MAX_FRACTION_DIGITS),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum FormatToken {
    /// A run of `len` identical specifier letters, e.g. `dd` is `{ Day, 2 }`.
    Specifier { field: Field, len: usize },

    /// `/`, replaced by the culture's date separator.
    DateSeparator,

    /// `:`, replaced by the culture's time separator.
    TimeSeparator,

    /// Literal text, already unquoted and unescaped.
    Literal(String),
}

impl Display for FormatToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatToken::Specifier { field, len } => {
                for _ in 0..*len {
                    f.write_char(field.letter())?;
                }
                Ok(())
            }
            FormatToken::DateSeparator => f.write_char('/'),
            FormatToken::TimeSeparator => f.write_char(':'),
            FormatToken::Literal(text) => {
                // always quote, so the output reads back as the same tokens
                f.write_char('\'')?;
                for c in text.chars() {
                    if c == '\'' || c == '\\' {
                        f.write_char('\\')?;
                    }
                    f.write_char(c)?;
                }
                f.write_char('\'')
            }
        }
    }
}

/// A Format describes how a date and time are written: a sequence of *specifiers* (like `dd` or
/// `MMMM`) and *literal text*, in the same pattern language as .NET's custom date and time format
/// strings.
///
/// A one-character pattern is a *standard* pattern and expands to one of the culture's patterns,
/// e.g. `d` is the culture's short date pattern.
///
/// | Specifier | Meaning |
/// |---|---|
/// | `d`, `dd` | Day of month, 1–2 digits or exactly 2 |
/// | `ddd`, `dddd` | Abbreviated or full day name |
/// | `M`, `MM` | Month, 1–2 digits or exactly 2 |
/// | `MMM`, `MMMM` | Abbreviated or full month name |
/// | `y`, `yy` | Two-digit year (`00`–`49` are 20xx, `50`–`99` are 19xx) |
/// | `yyy`, `yyyy`, `yyyyy` | Year with exactly that many digits, from 1 to 9999 when parsing |
/// | `h`, `hh` | Hour on a 12-hour clock |
/// | `H`, `HH` | Hour on a 24-hour clock |
/// | `m`, `mm` | Minute |
/// | `s`, `ss` | Second |
/// | `f`…`fffffff` | Fraction of a second, exactly that many digits |
/// | `F`…`FFFFFFF` | Fraction of a second, at most that many digits |
/// | `t`, `tt` | First character of, or the whole, AM/PM designator. Must agree with `H` |
/// | `/`, `:` | The culture's date or time separator |
/// | `'text'`, `"text"` | Literal text |
/// | `\c` | The literal character `c` |
/// | `%c` | The specifier `c` on its own, e.g. `%d` |
///
/// Any other character is literal. Where both designators start with the same character, as in
/// `ja-JP`, `t` matches that character but cannot tell AM from PM.
///
/// # Example
///
/// ```
/// use coreext::{Culture, Format};
///
/// let format = Format::parse("dd/MM/yyyy", Culture::vietnamese()).unwrap();
/// assert_eq!("dd/MM/yyyy", format.to_string());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Format {
    pub(crate) tokens: Vec<FormatToken>,
}

impl Format {
    /// Reads a pattern string. `culture` supplies the expansion of standard one-character
    /// patterns.
    ///
    /// # Errors
    ///
    /// Returns a [`PatternError`] if the pattern is empty, has an unterminated quote or a trailing
    /// escape, repeats a specifier letter too often, uses a specifier this library does not
    /// support (time zones and eras), or is an unknown one-character standard pattern.
    pub fn parse(pattern: &str, culture: &Culture) -> Result<Self, PatternError> {
        let mut chars = pattern.chars();
        match (chars.next(), chars.next()) {
            (None, _) => Err(PatternError::Empty),
            (Some(standard), None) => Self::parse_custom(&expand_standard(standard, culture)?),
            _ => Self::parse_custom(pattern),
        }
    }

    fn parse_custom(pattern: &str) -> Result<Self, PatternError> {
        let mut tokens: Vec<FormatToken> = Vec::new();
        let mut rest = pattern.char_indices().peekable();

        while let Some((index, c)) = rest.next() {
            let token = match c {
                '\'' | '"' => {
                    let mut text = String::new();
                    loop {
                        match rest.next() {
                            Some((_, close)) if close == c => break,
                            Some((_, '\\')) => match rest.next() {
                                Some((_, escaped)) => text.push(escaped),
                                None => return Err(PatternError::UnterminatedQuote { quote: c, index }),
                            },
                            Some((_, other)) => text.push(other),
                            None => return Err(PatternError::UnterminatedQuote { quote: c, index }),
                        }
                    }
                    FormatToken::Literal(text)
                }
                '\\' => match rest.next() {
                    Some((_, escaped)) => FormatToken::Literal(escaped.to_string()),
                    None => return Err(PatternError::TrailingEscape { escape: c }),
                },
                '%' => match rest.next() {
                    // `%` marks the next character as a lone custom specifier, so a run like
                    // `%dd` still reads as `d` then `d`.
                    Some((_, next)) => match Field::from_letter(next) {
                        Some(field) => FormatToken::Specifier { field, len: 1 },
                        None => single_char_token(next)?,
                    },
                    None => return Err(PatternError::TrailingEscape { escape: c }),
                },
                '/' => FormatToken::DateSeparator,
                ':' => FormatToken::TimeSeparator,
                _ => match Field::from_letter(c) {
                    Some(field) => {
                        let mut len = 1;
                        while rest.next_if(|&(_, next)| next == c).is_some() {
                            len += 1;
                        }
                        if let Some(max) = field.max_len() {
                            if len > max {
                                return Err(PatternError::SpecifierTooLong {
                                    pattern: c.to_string().repeat(len),
                                    letter: c,
                                    max,
                                });
                            }
                        }
                        FormatToken::Specifier { field, len }
                    }
                    None => single_char_token(c)?,
                },
            };

            // merge adjacent literals so matching compares whole runs of text at once
            if let FormatToken::Literal(text) = &token {
                if let Some(FormatToken::Literal(last)) = tokens.last_mut() {
                    last.push_str(text);
                    continue;
                }
            }
            tokens.push(token);
        }

        Ok(Self { tokens })
    }

    /// Writes `date_time` with this format, using the names and separators of `culture`.
    ///
    /// # Example
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use coreext::{Culture, Format};
    ///
    /// let culture = Culture::from_name("en-US").unwrap();
    /// let format = Format::parse("dddd, MMMM d, yyyy h:mm tt", culture).unwrap();
    /// let date_time = NaiveDate::from_ymd_opt(2023, 12, 31)
    ///     .unwrap()
    ///     .and_hms_opt(15, 4, 0)
    ///     .unwrap();
    /// assert_eq!(
    ///     "Sunday, December 31, 2023 3:04 PM",
    ///     format.format(&date_time, culture)
    /// );
    /// ```
    pub fn format(&self, date_time: &NaiveDateTime, culture: &Culture) -> String {
        let mut out = String::new();
        for token in &self.tokens {
            match token {
                FormatToken::Specifier { field, len } => {
                    write_field(&mut out, *field, *len, date_time, culture)
                }
                FormatToken::DateSeparator => out.push_str(culture.date_separator),
                FormatToken::TimeSeparator => out.push_str(culture.time_separator),
                FormatToken::Literal(text) => out.push_str(text),
            }
        }
        out
    }
}

impl Display for Format {
    /// Display a format as a pattern string. Literal text is always quoted, so the result may
    /// differ from the string the format was parsed from, but it parses to the same format.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut prev: Option<&FormatToken> = None;
        let lone = self.tokens.len() == 1;
        for token in &self.tokens {
            // a lone letter or separator would read as a standard pattern, and a letter after the
            // same letter would join its run
            let needs_percent = match token {
                FormatToken::Specifier { field, len: 1 } => {
                    lone || matches!(
                        prev,
                        Some(FormatToken::Specifier { field: prev_field, .. }) if prev_field == field
                    )
                }
                FormatToken::DateSeparator | FormatToken::TimeSeparator => lone,
                _ => false,
            };
            if needs_percent {
                f.write_char('%')?;
            }
            write!(f, "{}", token)?;
            prev = Some(token);
        }
        Ok(())
    }
}

/// Writes `date_time` with `pattern`, using the names and separators of `culture`.
///
/// # Errors
///
/// Returns [`Error::Pattern`] if the pattern cannot be read.
pub fn format_date(date_time: &NaiveDateTime, pattern: &str, culture: &Culture) -> Result<String, Error> {
    Ok(Format::parse(pattern, culture)?.format(date_time, culture))
}

fn single_char_token(c: char) -> Result<FormatToken, PatternError> {
    match c {
        // time zone offsets and eras
        'z' | 'K' | 'g' => Err(PatternError::UnsupportedSpecifier {
            pattern: c.to_string(),
        }),
        '/' => Ok(FormatToken::DateSeparator),
        ':' => Ok(FormatToken::TimeSeparator),
        _ => Ok(FormatToken::Literal(c.to_string())),
    }
}

fn expand_standard(standard: char, culture: &Culture) -> Result<String, PatternError> {
    let expanded = match standard {
        'd' => culture.short_date_pattern.to_owned(),
        'D' => culture.long_date_pattern.to_owned(),
        't' => culture.short_time_pattern.to_owned(),
        'T' => culture.long_time_pattern.to_owned(),
        'f' => format!("{} {}", culture.long_date_pattern, culture.short_time_pattern),
        'F' => format!("{} {}", culture.long_date_pattern, culture.long_time_pattern),
        'g' => format!("{} {}", culture.short_date_pattern, culture.short_time_pattern),
        'G' => format!("{} {}", culture.short_date_pattern, culture.long_time_pattern),
        'M' | 'm' => culture.month_day_pattern.to_owned(),
        'Y' | 'y' => culture.year_month_pattern.to_owned(),
        's' => "yyyy'-'MM'-'dd'T'HH':'mm':'ss".to_owned(),
        'u' => "yyyy'-'MM'-'dd HH':'mm':'ss'Z'".to_owned(),
        _ => return Err(PatternError::UnknownStandardPattern { pattern: standard }),
    };
    Ok(expanded)
}

fn write_field(
    out: &mut String,
    field: Field,
    len: usize,
    date_time: &NaiveDateTime,
    culture: &Culture,
) {
    // writing to a String cannot fail
    let _ = match field {
        Field::Day => match len {
            1 | 2 => write!(out, "{:0len$}", date_time.day()),
            3 => write!(
                out,
                "{}",
                culture.abbreviated_day_names[date_time.weekday().num_days_from_sunday() as usize]
            ),
            _ => write!(
                out,
                "{}",
                culture.day_names[date_time.weekday().num_days_from_sunday() as usize]
            ),
        },
        Field::Month => match len {
            1 | 2 => write!(out, "{:0len$}", date_time.month()),
            3 => write!(out, "{}", culture.abbreviated_month_names[date_time.month0() as usize]),
            _ => write!(out, "{}", culture.month_names[date_time.month0() as usize]),
        },
        Field::Year => match len {
            1 | 2 => write!(out, "{:0len$}", date_time.year().rem_euclid(100)),
            _ => write!(out, "{:0len$}", date_time.year()),
        },
        Field::Hour12 => {
            let hour = match date_time.hour() % 12 {
                0 => 12,
                hour => hour,
            };
            write!(out, "{:0len$}", hour)
        }
        Field::Hour24 => write!(out, "{:0len$}", date_time.hour()),
        Field::Minute => write!(out, "{:0len$}", date_time.minute()),
        Field::Second => write!(out, "{:0len$}", date_time.second()),
        Field::Fraction | Field::OptionalFraction => {
            // leap seconds are carried as nanos past 1_000_000_000
            let nanos = date_time.nanosecond() % 1_000_000_000;
            let digits = format!("{:09}", nanos);
            let digits = &digits[..len];
            if field == Field::Fraction {
                write!(out, "{}", digits)
            } else {
                write!(out, "{}", digits.trim_end_matches('0'))
            }
        }
        Field::AmPm => {
            let designator = if date_time.hour() < 12 {
                culture.am_designator
            } else {
                culture.pm_designator
            };
            if len == 1 {
                write!(out, "{}", designator.chars().next().map(String::from).unwrap_or_default())
            } else {
                write!(out, "{}", designator)
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rstest::*;

    #[fixture]
    fn new_year_eve() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2023, 12, 31)
            .unwrap()
            .and_hms_milli_opt(23, 5, 9, 120)
            .unwrap()
    }

    #[test]
    fn test_tokens() {
        let format = Format::parse("dd/MM/yyyy HH:mm", Culture::invariant()).unwrap();
        assert_eq!(
            vec![
                FormatToken::Specifier { field: Field::Day, len: 2 },
                FormatToken::DateSeparator,
                FormatToken::Specifier { field: Field::Month, len: 2 },
                FormatToken::DateSeparator,
                FormatToken::Specifier { field: Field::Year, len: 4 },
                FormatToken::Literal(" ".to_owned()),
                FormatToken::Specifier { field: Field::Hour24, len: 2 },
                FormatToken::TimeSeparator,
                FormatToken::Specifier { field: Field::Minute, len: 2 },
            ],
            format.tokens
        );
    }

    #[test]
    fn test_literals_merge() {
        let format = Format::parse(r#"'Ngày' d \o\f "the" M"#, Culture::invariant()).unwrap();
        assert_eq!(
            vec![
                FormatToken::Literal("Ngày ".to_owned()),
                FormatToken::Specifier { field: Field::Day, len: 1 },
                FormatToken::Literal(" of the ".to_owned()),
                FormatToken::Specifier { field: Field::Month, len: 1 },
            ],
            format.tokens
        );
    }

    #[rstest]
    #[case("dd/MM/yyyy")]
    #[case("'at' HH:mm")]
    #[case("dddd, MMMM d tt")]
    #[case("%d")]
    #[case("%/")]
    #[case("%:")]
    #[case("%x")]
    fn test_display_reads_back(#[case] pattern: &str) {
        let format = Format::parse(pattern, Culture::invariant()).unwrap();
        let displayed = format.to_string();
        assert_eq!(Ok(&format), Format::parse(&displayed, Culture::invariant()).as_ref());
    }

    #[rstest]
    #[case("", PatternError::Empty)]
    #[case("dd 'MM", PatternError::UnterminatedQuote { quote: '\'', index: 3 })]
    #[case("yyyy\\", PatternError::TrailingEscape { escape: '\\' })]
    #[case("HHH:mm", PatternError::SpecifierTooLong { pattern: "HHH".to_owned(), letter: 'H', max: 2 })]
    #[case("HH:mm zzz", PatternError::UnsupportedSpecifier { pattern: "z".to_owned() })]
    #[case("x", PatternError::UnknownStandardPattern { pattern: 'x' })]
    fn test_parse_err(#[case] pattern: &str, #[case] expected: PatternError) {
        assert_eq!(Err(expected), Format::parse(pattern, Culture::invariant()));
    }

    #[test]
    fn test_percent_single_specifier() {
        let format = Format::parse("%d", Culture::invariant()).unwrap();
        assert_eq!(
            vec![FormatToken::Specifier { field: Field::Day, len: 1 }],
            format.tokens
        );
        assert_eq!("%d", format.to_string());

        let split = Format::parse("%d%d", Culture::invariant()).unwrap();
        assert_eq!(2, split.tokens.len());
        assert_eq!("d%d", split.to_string());
    }

    #[rstest]
    #[case("%/", "%/")]
    #[case("%:", "%:")]
    #[case("d/", "d/")]
    fn test_percent_lone_separator(#[case] pattern: &str, #[case] expected: &str) {
        let format = Format::parse(pattern, Culture::invariant()).unwrap();
        assert_eq!(expected, format.to_string());
    }

    #[rstest]
    #[case("dd/MM/yyyy", "vi-VN", "31/12/2023")]
    #[case("d", "vi-VN", "31/12/2023")]
    #[case("d", "en-US", "12/31/2023")]
    #[case("d", "de-DE", "31.12.2023")]
    #[case("D", "vi-VN", "Chủ Nhật, 31 Tháng Mười Hai 2023")]
    #[case("MMM yy", "fr-FR", "déc. 23")]
    #[case("T", "en-US", "11:05:09 PM")]
    #[case("h:mm t", "en-GB", "11:05 p")]
    #[case("HH:mm:ss.fff", "", "23:05:09.120")]
    #[case("ss.FFFF", "", "09.12")]
    #[case("s", "ja-JP", "2023-12-31T23:05:09")]
    #[case("yyyy'年'M'月'", "ja-JP", "2023年12月")]
    fn test_format(
        new_year_eve: NaiveDateTime,
        #[case] pattern: &str,
        #[case] culture: &str,
        #[case] expected: &str,
    ) {
        let culture = Culture::from_name(culture).unwrap();
        assert_eq!(Ok(expected.to_owned()), format_date(&new_year_eve, pattern, culture));
    }

    #[test]
    fn test_format_midnight_is_twelve_am() {
        let midnight = NaiveDate::from_ymd_opt(2024, 2, 3)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let culture = Culture::from_name("en-US").unwrap();
        assert_eq!(
            Ok("12:00 AM".to_owned()),
            format_date(&midnight, "t", culture)
        );
    }
}
