use crate::{
    culture::{Culture, DEFAULT_CULTURE},
    error::ParseError,
    error_message::format_error,
    format::{Field, Format, FormatToken, DEFAULT_FORMAT},
};
use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Weekday};

/// Years written with one or two digits up to this value land in the 2000s, the rest in the 1900s.
const TWO_DIGIT_YEAR_PIVOT: u32 = 49;

/// The last year a parsed date may fall in. Years start at 1.
const MAX_YEAR: i32 = 9999;

/// Parses `date_str` strictly against the pattern `format`, using the conventions of the culture
/// named `culture`. Returns `None` if anything about the input, the pattern, or the culture name
/// is wrong.
///
/// See [`Format`] for the pattern language. Components missing from the pattern default to
/// year 1, January, day 1, midnight.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use coreext::parse_exact;
///
/// let parsed = parse_exact("31/12/2023", "dd/MM/yyyy", "vi-VN");
/// assert_eq!(NaiveDate::from_ymd_opt(2023, 12, 31).unwrap().and_hms_opt(0, 0, 0), parsed);
///
/// assert_eq!(None, parse_exact("13/13/2023", "dd/MM/yyyy", "vi-VN"));
/// ```
pub fn parse_exact(date_str: &str, format: &str, culture: &str) -> Option<NaiveDateTime> {
    let culture = Culture::from_name(culture).ok()?;
    parse_exact_with(date_str, format, culture)
        .map_err(|err| {
            log::debug!(
                "{date_str:?} does not parse as {format:?}: {}",
                format_error(Some(&err), None).replace('\n', ": ")
            )
        })
        .ok()
}

/// [`parse_exact`] with the default pattern `dd/MM/yyyy` and culture `vi-VN`.
pub fn parse_exact_default(date_str: &str) -> Option<NaiveDateTime> {
    parse_exact(date_str, DEFAULT_FORMAT, DEFAULT_CULTURE)
}

/// Like [`parse_exact`], but takes a [`Culture`] directly and says why parsing failed.
///
/// # Errors
///
/// - [`ParseError::Setup`] if the pattern cannot be read.
/// - [`ParseError::Mismatch`] or [`ParseError::TrailingInput`] if the input does not follow the
///   pattern.
/// - [`ParseError::Conflict`] if a component appears twice with different values.
/// - [`ParseError::InvalidDate`], [`ParseError::InvalidTime`], or
///   [`ParseError::WeekdayMismatch`] if the components do not make a real date and time.
pub fn parse_exact_with(
    date_str: &str,
    format: &str,
    culture: &Culture,
) -> Result<NaiveDateTime, ParseError> {
    let format = Format::parse(format, culture).map_err(crate::Error::from)?;
    Parser {
        input: date_str,
        pos: 0,
        culture,
        parsed: Parsed::default(),
    }
    .run(&format)
}

/// Components read so far. `None` means the pattern had no specifier for it.
#[derive(Debug, Default)]
struct Parsed {
    year: Option<i32>,
    month: Option<u32>,
    day: Option<u32>,
    weekday: Option<Weekday>,
    hour24: Option<u32>,
    hour12: Option<u32>,
    minute: Option<u32>,
    second: Option<u32>,
    nanos: Option<u32>,
    pm: Option<bool>,
}

/// Records `value` in `slot`, failing if a different value was already recorded.
fn set<T: PartialEq>(slot: &mut Option<T>, value: T, component: &'static str) -> Result<(), ParseError> {
    if slot.as_ref().is_some_and(|existing| *existing != value) {
        return Err(ParseError::Conflict { component });
    }
    *slot = Some(value);
    Ok(())
}

struct Parser<'a> {
    input: &'a str,
    pos: usize,
    culture: &'a Culture,
    parsed: Parsed,
}

impl<'a> Parser<'a> {
    fn run(mut self, format: &Format) -> Result<NaiveDateTime, ParseError> {
        for token in &format.tokens {
            match token {
                FormatToken::Specifier { field, len } => self.field(*field, *len, token)?,
                FormatToken::DateSeparator => self.literal(self.culture.date_separator, token)?,
                FormatToken::TimeSeparator => self.literal(self.culture.time_separator, token)?,
                FormatToken::Literal(text) => self.literal(text, token)?,
            }
        }

        if self.pos != self.input.len() {
            return Err(ParseError::TrailingInput { index: self.pos });
        }

        self.parsed.build()
    }

    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn mismatch(&self, token: &FormatToken) -> ParseError {
        ParseError::Mismatch {
            index: self.pos,
            expected: token.to_string(),
        }
    }

    fn literal(&mut self, text: &str, token: &FormatToken) -> Result<(), ParseError> {
        if self.rest().starts_with(text) {
            self.pos += text.len();
            Ok(())
        } else {
            Err(self.mismatch(token))
        }
    }

    /// Consumes between `min` and `max` ASCII digits, as many as are there.
    fn digits(&mut self, min: usize, max: usize, token: &FormatToken) -> Result<(u32, usize), ParseError> {
        let count = self
            .rest()
            .bytes()
            .take(max)
            .take_while(u8::is_ascii_digit)
            .count();
        if count < min {
            return Err(self.mismatch(token));
        }
        let digits = &self.rest()[..count];
        // specifiers ask for at most seven digits, so this fits
        let value = digits.bytes().fold(0u32, |acc, b| acc * 10 + u32::from(b - b'0'));
        self.pos += count;
        Ok((value, count))
    }

    /// Digits for a numeric specifier written with `len` letters: one letter takes one or two
    /// digits, more letters take exactly that many.
    fn number(&mut self, len: usize, token: &FormatToken) -> Result<u32, ParseError> {
        let (min, max) = if len == 1 { (1, 2) } else { (len, len) };
        self.digits(min, max, token).map(|(value, _)| value)
    }

    /// Matches the longest of `names` at the current position, ignoring case. Returns its index.
    fn name(&mut self, names: &[&str], token: &FormatToken) -> Result<usize, ParseError> {
        let rest = self.rest();
        let best = names
            .iter()
            .enumerate()
            .filter(|(_, name)| !name.is_empty())
            .filter_map(|(index, name)| prefix_len_ignore_case(rest, name).map(|len| (index, len)))
            .max_by_key(|&(_, len)| len);

        match best {
            Some((index, len)) => {
                self.pos += len;
                Ok(index)
            }
            None => Err(self.mismatch(token)),
        }
    }

    fn field(&mut self, field: Field, len: usize, token: &FormatToken) -> Result<(), ParseError> {
        let culture = self.culture;
        match field {
            Field::Day if len >= 4 => {
                let index = self.name(&culture.day_names, token)?;
                set(&mut self.parsed.weekday, weekday_from_sunday(index), "day of week")
            }
            Field::Day if len == 3 => {
                let index = self.name(&culture.abbreviated_day_names, token)?;
                set(&mut self.parsed.weekday, weekday_from_sunday(index), "day of week")
            }
            Field::Day => {
                let day = self.number(len, token)?;
                set(&mut self.parsed.day, day, "day")
            }
            Field::Month if len >= 4 => {
                let index = self.name(&culture.month_names, token)?;
                set(&mut self.parsed.month, index as u32 + 1, "month")
            }
            Field::Month if len == 3 => {
                let index = self.name(&culture.abbreviated_month_names, token)?;
                set(&mut self.parsed.month, index as u32 + 1, "month")
            }
            Field::Month => {
                let month = self.number(len, token)?;
                set(&mut self.parsed.month, month, "month")
            }
            Field::Year => {
                let value = self.number(len, token)?;
                let year = if len <= 2 {
                    if value <= TWO_DIGIT_YEAR_PIVOT {
                        2000 + value
                    } else {
                        1900 + value
                    }
                } else {
                    value
                };
                set(&mut self.parsed.year, year as i32, "year")
            }
            Field::Hour12 => {
                let hour = self.number(len, token)?;
                set(&mut self.parsed.hour12, hour, "hour")
            }
            Field::Hour24 => {
                let hour = self.number(len, token)?;
                set(&mut self.parsed.hour24, hour, "hour")
            }
            Field::Minute => {
                let minute = self.number(len, token)?;
                set(&mut self.parsed.minute, minute, "minute")
            }
            Field::Second => {
                let second = self.number(len, token)?;
                set(&mut self.parsed.second, second, "second")
            }
            Field::Fraction | Field::OptionalFraction => {
                let min = if field == Field::Fraction { len } else { 0 };
                let (value, count) = self.digits(min, len, token)?;
                if count == 0 {
                    return Ok(());
                }
                let nanos = value * 10u32.pow(9 - count as u32);
                set(&mut self.parsed.nanos, nanos, "fraction of a second")
            }
            Field::AmPm => {
                let (am, pm) = if len == 1 {
                    (first_char(culture.am_designator), first_char(culture.pm_designator))
                } else {
                    (culture.am_designator, culture.pm_designator)
                };
                if am.is_empty() && pm.is_empty() {
                    // cultures without designators use a 24-hour clock
                    return Ok(());
                }
                if am == pm {
                    // e.g. `t` in ja-JP, where both start with 午
                    self.name(&[am], token)?;
                    return Ok(());
                }
                let index = self.name(&[am, pm], token)?;
                set(&mut self.parsed.pm, index == 1, "AM/PM designator")
            }
        }
    }
}

impl Parsed {
    fn build(self) -> Result<NaiveDateTime, ParseError> {
        let year = self.year.unwrap_or(1);
        let month = self.month.unwrap_or(1);
        let day = self.day.unwrap_or(1);
        let date = NaiveDate::from_ymd_opt(year, month, day)
            .filter(|_| (1..=MAX_YEAR).contains(&year))
            .ok_or(ParseError::InvalidDate { year, month, day })?;

        if let Some(weekday) = self.weekday {
            if weekday != date.weekday() {
                return Err(ParseError::WeekdayMismatch);
            }
        }

        let hour12 = match (self.hour12, self.pm) {
            (Some(hour), _) if hour > 12 => {
                return Err(ParseError::InvalidTime {
                    hour,
                    minute: self.minute.unwrap_or(0),
                    second: self.second.unwrap_or(0),
                })
            }
            (Some(hour), Some(true)) => Some(hour % 12 + 12),
            (Some(hour), Some(false)) => Some(hour % 12),
            (hour, _) => hour,
        };
        let hour = match (self.hour24, hour12) {
            (Some(a), Some(b)) if a != b => return Err(ParseError::Conflict { component: "hour" }),
            (Some(hour), _) | (None, Some(hour)) => hour,
            (None, None) => 0,
        };
        if let (Some(hour), Some(pm)) = (self.hour24, self.pm) {
            if pm != (hour >= 12) {
                return Err(ParseError::Conflict {
                    component: "AM/PM designator",
                });
            }
        }
        let minute = self.minute.unwrap_or(0);
        let second = self.second.unwrap_or(0);
        let time = NaiveTime::from_hms_nano_opt(hour, minute, second, self.nanos.unwrap_or(0))
            .filter(|_| second < 60)
            .ok_or(ParseError::InvalidTime {
                hour,
                minute,
                second,
            })?;

        Ok(date.and_time(time))
    }
}

fn weekday_from_sunday(index: usize) -> Weekday {
    match index {
        0 => Weekday::Sun,
        1 => Weekday::Mon,
        2 => Weekday::Tue,
        3 => Weekday::Wed,
        4 => Weekday::Thu,
        5 => Weekday::Fri,
        _ => Weekday::Sat,
    }
}

fn first_char(s: &str) -> &str {
    s.char_indices().nth(1).map_or(s, |(end, _)| &s[..end])
}

/// If `haystack` starts with `prefix` ignoring case, returns how many bytes of `haystack` that
/// prefix covers.
fn prefix_len_ignore_case(haystack: &str, prefix: &str) -> Option<usize> {
    let mut consumed = 0;
    let mut haystack_chars = haystack.chars();
    for expected in prefix.chars() {
        let actual = haystack_chars.next()?;
        if !actual.to_lowercase().eq(expected.to_lowercase()) {
            return None;
        }
        consumed += actual.len_utf8();
    }
    Some(consumed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;
    use rstest::rstest;

    fn ymd_hms(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, s)
            .unwrap()
    }

    #[test]
    fn test_default_pattern() {
        assert_eq!(Some(ymd_hms(2023, 12, 31, 0, 0, 0)), parse_exact_default("31/12/2023"));
    }

    #[rstest]
    #[case("13/13/2023")]
    #[case("31/02/2023")]
    #[case("1/12/2023")]
    #[case("31/12/23")]
    #[case("31-12-2023")]
    #[case("31/12/2023 ")]
    #[case("")]
    fn test_default_pattern_rejects(#[case] date_str: &str) {
        assert_eq!(None, parse_exact_default(date_str));
    }

    #[rstest]
    #[case("1/2/2024", "d/M/yyyy", "vi-VN", ymd_hms(2024, 2, 1, 0, 0, 0))]
    #[case("12/31/2023", "d", "en-US", ymd_hms(2023, 12, 31, 0, 0, 0))]
    #[case("31.12.2023", "dd/MM/yyyy", "de-DE", ymd_hms(2023, 12, 31, 0, 0, 0))]
    #[case("31 tháng mười hai 2023", "dd MMMM yyyy", "vi", ymd_hms(2023, 12, 31, 0, 0, 0))]
    #[case("Thứ Hai, 01 Tháng Giêng 2024", "D", "vi-VN", ymd_hms(2024, 1, 1, 0, 0, 0))]
    #[case("3 févr. 24", "d MMM yy", "fr-FR", ymd_hms(2024, 2, 3, 0, 0, 0))]
    #[case("03/02/99", "dd/MM/yy", "vi-VN", ymd_hms(1999, 2, 3, 0, 0, 0))]
    #[case("3:04 PM", "h:mm tt", "en-US", ymd_hms(1, 1, 1, 15, 4, 0))]
    #[case("12:30 SA", "hh:mm tt", "vi-VN", ymd_hms(1, 1, 1, 0, 30, 0))]
    #[case("12:30 CH", "hh:mm tt", "vi-VN", ymd_hms(1, 1, 1, 12, 30, 0))]
    #[case("2023-12-31T23:59:58", "s", "", ymd_hms(2023, 12, 31, 23, 59, 58))]
    #[case("2023年12月", "Y", "ja-JP", ymd_hms(2023, 12, 1, 0, 0, 0))]
    #[case("Ngày 05", "'Ngày' dd", "vi-VN", ymd_hms(1, 1, 5, 0, 0, 0))]
    fn test_parse_ok(
        #[case] date_str: &str,
        #[case] format: &str,
        #[case] culture: &str,
        #[case] expected: NaiveDateTime,
    ) {
        assert_eq!(Some(expected), parse_exact(date_str, format, culture));
    }

    #[test]
    fn test_fractions() {
        let culture = Culture::invariant();
        let exact = parse_exact_with("10:00:00.250", "HH:mm:ss.fff", culture).unwrap();
        assert_eq!(250_000_000, exact.nanosecond());

        let optional = parse_exact_with("10:00:00.5", "HH:mm:ss.FFF", culture).unwrap();
        assert_eq!(500_000_000, optional.nanosecond());

        assert!(parse_exact_with("10:00:00.5", "HH:mm:ss.fff", culture).is_err());
    }

    #[test]
    fn test_unknown_culture_is_none() {
        assert_eq!(None, parse_exact("31/12/2023", "dd/MM/yyyy", "xx-XX"));
    }

    #[test]
    fn test_bad_pattern_is_none() {
        assert_eq!(None, parse_exact("31/12/2023", "dd/MM/yyyy'", "vi-VN"));
    }

    #[test]
    fn test_mismatch_position() {
        assert_eq!(
            Err(ParseError::Mismatch {
                index: 2,
                expected: "/".to_owned()
            }),
            parse_exact_with("31-12-2023", "dd/MM/yyyy", Culture::vietnamese())
        );
    }

    #[test]
    fn test_trailing_input() {
        assert_eq!(
            Err(ParseError::TrailingInput { index: 4 }),
            parse_exact_with("20245", "yyyy", Culture::invariant())
        );
    }

    #[test]
    fn test_invalid_components() {
        let culture = Culture::vietnamese();
        assert_eq!(
            Err(ParseError::InvalidDate { year: 2023, month: 13, day: 13 }),
            parse_exact_with("13/13/2023", "dd/MM/yyyy", culture)
        );
        assert_eq!(
            Err(ParseError::InvalidTime { hour: 24, minute: 0, second: 0 }),
            parse_exact_with("24:00", "HH:mm", culture)
        );
        assert_eq!(
            Err(ParseError::InvalidTime { hour: 10, minute: 0, second: 60 }),
            parse_exact_with("10:00:60", "HH:mm:ss", culture)
        );
    }

    #[test]
    fn test_conflicting_repeat() {
        let culture = Culture::invariant();
        assert_eq!(
            Ok(ymd_hms(1, 1, 5, 0, 0, 0)),
            parse_exact_with("05 05", "dd dd", culture)
        );
        assert_eq!(
            Err(ParseError::Conflict { component: "day" }),
            parse_exact_with("05 06", "dd dd", culture)
        );
    }

    #[test]
    fn test_weekday_must_agree() {
        let culture = Culture::from_name("en-US").unwrap();
        assert!(parse_exact_with("Sunday 31/12/2023", "dddd dd/MM/yyyy", culture).is_ok());
        assert_eq!(
            Err(ParseError::WeekdayMismatch),
            parse_exact_with("Monday 31/12/2023", "dddd dd/MM/yyyy", culture)
        );
    }

    #[test]
    fn test_longest_month_name_wins() {
        // "Tháng Mười" is a prefix of "Tháng Mười Một"
        let culture = Culture::vietnamese();
        assert_eq!(
            Ok(ymd_hms(2023, 11, 1, 0, 0, 0)),
            parse_exact_with("Tháng Mười Một 2023", "MMMM yyyy", culture)
        );
        assert_eq!(
            Ok(ymd_hms(2023, 10, 1, 0, 0, 0)),
            parse_exact_with("Tháng Mười 2023", "MMMM yyyy", culture)
        );
    }

    #[rstest]
    #[case("Tháng Giêng 2024", Some(ymd_hms(2024, 1, 1, 0, 0, 0)))]
    #[case("tháng giêng 2024", Some(ymd_hms(2024, 1, 1, 0, 0, 0)))]
    #[case("Tháng Hai 2024", Some(ymd_hms(2024, 2, 1, 0, 0, 0)))]
    #[case("Tháng Một 2024", None)]
    fn test_vietnamese_month_names(
        #[case] date_str: &str,
        #[case] expected: Option<NaiveDateTime>,
    ) {
        assert_eq!(expected, parse_exact(date_str, "MMMM yyyy", "vi-VN"));
    }

    #[rstest]
    #[case("15 SA")]
    #[case("03 CH")]
    #[case("00 CH")]
    fn test_designator_contradicts_24_hour(#[case] date_str: &str) {
        assert_eq!(
            Err(ParseError::Conflict {
                component: "AM/PM designator"
            }),
            parse_exact_with(date_str, "HH tt", Culture::vietnamese())
        );
    }

    #[test]
    fn test_designator_agrees_with_24_hour() {
        assert_eq!(
            Ok(ymd_hms(1, 1, 1, 15, 0, 0)),
            parse_exact_with("15 CH", "HH tt", Culture::vietnamese())
        );
    }

    #[rstest]
    #[case("10000", 10000)]
    #[case("99999", 99999)]
    #[case("00000", 0)]
    fn test_year_out_of_range(#[case] date_str: &str, #[case] year: i32) {
        assert_eq!(
            Err(ParseError::InvalidDate { year, month: 1, day: 1 }),
            parse_exact_with(date_str, "yyyyy", Culture::invariant())
        );
    }

    #[test]
    fn test_five_digit_year_in_range() {
        assert_eq!(
            Ok(ymd_hms(9999, 12, 31, 0, 0, 0)),
            parse_exact_with("09999/12/31", "yyyyy/MM/dd", Culture::invariant())
        );
    }

    #[test]
    fn test_shared_designator_letter_is_not_read() {
        // 午前 and 午後 both start with 午
        let culture = Culture::from_name("ja-JP").unwrap();
        assert_eq!(
            Ok(ymd_hms(1, 1, 1, 10, 0, 0)),
            parse_exact_with("10 午", "hh t", culture)
        );
    }

    #[test]
    fn test_input_untouched_and_repeatable() {
        let input = String::from("31/12/2023");
        let first = parse_exact_default(&input);
        let second = parse_exact_default(&input);
        assert_eq!(first, second);
        assert_eq!("31/12/2023", input);
    }
}
