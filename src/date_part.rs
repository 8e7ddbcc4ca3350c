use crate::error::Error;
use core::{
    fmt::{self, Display},
    str::FromStr,
};

/// A unit of calendar granularity in which [`date_diff`](crate::date_diff) measures the
/// difference between two date-times.
///
/// Year, quarter, and month differences count calendar boundaries. The rest divide the elapsed time
/// and drop the remainder.
#[derive(PartialEq, Eq, Debug, Clone, Copy, Hash)]
pub enum DatePart {
    /// Difference of calendar years.
    Year,
    /// Difference of calendar quarters (`year * 4 + quarter`).
    Quarter,
    /// Difference of calendar months (`year * 12 + month`).
    Month,
    /// Whole days elapsed.
    Day,
    /// Whole weeks (7 days) elapsed.
    Week,
    /// Whole hours elapsed.
    Hour,
    /// Whole minutes elapsed.
    Minute,
    /// Whole seconds elapsed.
    Second,
    /// Whole milliseconds elapsed.
    Millisecond,
}

impl DatePart {
    /// Every date part, from the coarsest to the finest.
    pub const ALL: [DatePart; 9] = [
        DatePart::Year,
        DatePart::Quarter,
        DatePart::Month,
        DatePart::Day,
        DatePart::Week,
        DatePart::Hour,
        DatePart::Minute,
        DatePart::Second,
        DatePart::Millisecond,
    ];

    /// The full lowercase name, e.g. `quarter`.
    pub fn name(&self) -> &'static str {
        match self {
            DatePart::Year => "year",
            DatePart::Quarter => "quarter",
            DatePart::Month => "month",
            DatePart::Day => "day",
            DatePart::Week => "week",
            DatePart::Hour => "hour",
            DatePart::Minute => "minute",
            DatePart::Second => "second",
            DatePart::Millisecond => "millisecond",
        }
    }

    /// The canonical SQL `DATEDIFF` abbreviation, e.g. `qq`.
    pub fn abbreviation(&self) -> &'static str {
        match self {
            DatePart::Year => "yy",
            DatePart::Quarter => "qq",
            DatePart::Month => "mm",
            DatePart::Day => "dd",
            DatePart::Week => "wk",
            DatePart::Hour => "hh",
            DatePart::Minute => "mi",
            DatePart::Second => "ss",
            DatePart::Millisecond => "ms",
        }
    }
}

impl Display for DatePart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DatePart {
    type Err = Error;

    /// Reads a SQL-style date part, ignoring case and surrounding whitespace.
    ///
    /// | Part | Accepted |
    /// |---|---|
    /// | year | `year`, `yy`, `yyyy` |
    /// | quarter | `quarter`, `qq`, `q` |
    /// | month | `month`, `mm`, `m` |
    /// | day | `day`, `dd`, `d` |
    /// | week | `week`, `wk`, `ww` |
    /// | hour | `hour`, `hh` |
    /// | minute | `minute`, `mi`, `n` |
    /// | second | `second`, `ss`, `s` |
    /// | millisecond | `millisecond`, `ms` |
    ///
    /// # Example
    ///
    /// ```
    /// use coreext::{DatePart, Error};
    ///
    /// assert_eq!(Ok(DatePart::Quarter), " QQ ".parse());
    /// assert_eq!(
    ///     Err(Error::UnknownDatePart { part: "xx".to_owned() }),
    ///     "xx".parse::<DatePart>()
    /// );
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let part = match s.trim().to_lowercase().as_str() {
            "year" | "yy" | "yyyy" => DatePart::Year,
            "quarter" | "qq" | "q" => DatePart::Quarter,
            "month" | "mm" | "m" => DatePart::Month,
            "day" | "dd" | "d" => DatePart::Day,
            "week" | "wk" | "ww" => DatePart::Week,
            "hour" | "hh" => DatePart::Hour,
            "minute" | "mi" | "n" => DatePart::Minute,
            "second" | "ss" | "s" => DatePart::Second,
            "millisecond" | "ms" => DatePart::Millisecond,
            _ => {
                return Err(Error::UnknownDatePart {
                    part: s.to_owned(),
                })
            }
        };
        Ok(part)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("yy", DatePart::Year)]
    #[case("YYYY", DatePart::Year)]
    #[case("q", DatePart::Quarter)]
    #[case("m", DatePart::Month)]
    #[case("MM", DatePart::Month)]
    #[case("d", DatePart::Day)]
    #[case("ww", DatePart::Week)]
    #[case("hh", DatePart::Hour)]
    #[case("n", DatePart::Minute)]
    #[case("mi", DatePart::Minute)]
    #[case(" s ", DatePart::Second)]
    #[case("Millisecond", DatePart::Millisecond)]
    fn test_from_str(#[case] s: &str, #[case] expected: DatePart) {
        assert_eq!(Ok(expected), s.parse());
    }

    #[rstest]
    #[case("xx")]
    #[case("")]
    #[case("w")]
    #[case("h")]
    #[case("years")]
    fn test_from_str_unknown(#[case] s: &str) {
        assert_eq!(
            Err(Error::UnknownDatePart { part: s.to_owned() }),
            s.parse::<DatePart>()
        );
    }

    #[test]
    fn test_unknown_message_names_token() {
        let err = "xx".parse::<DatePart>().unwrap_err();
        assert_eq!("DatePart \"xx\" is unknown", err.to_string());
    }

    /// every variant's own names must be accepted, so the enum never reaches the unknown path
    #[test]
    fn test_own_names_accepted() {
        for part in DatePart::ALL {
            assert_eq!(Ok(part), part.abbreviation().parse());
            assert_eq!(Ok(part), part.name().parse());
            assert_eq!(Ok(part), part.to_string().parse());
        }
    }
}
