use crate::error::Error;
use core::fmt::{self, Display};

/// The name of the culture used when none is given.
pub const DEFAULT_CULTURE: &str = "vi-VN";

/// The string conventions of one culture: separators, month and day names, AM/PM designators, and
/// the patterns behind the one-letter standard formats.
///
/// All cultures use the proleptic Gregorian calendar.
///
/// Cultures are looked up by name with [`Culture::from_name`] and are `'static`, so they can be
/// shared freely between threads.
#[derive(Debug, PartialEq, Eq)]
pub struct Culture {
    /// The canonical name, e.g. `vi-VN`. Empty for the invariant culture.
    pub name: &'static str,
    /// Replaces `/` in patterns.
    pub date_separator: &'static str,
    /// Replaces `:` in patterns.
    pub time_separator: &'static str,
    /// Matched by `tt` for hours before noon. May be empty.
    pub am_designator: &'static str,
    /// Matched by `tt` for hours from noon. May be empty.
    pub pm_designator: &'static str,
    /// Full month names, January first.
    pub month_names: [&'static str; 12],
    /// Matched by `MMM`.
    pub abbreviated_month_names: [&'static str; 12],
    /// Full day names, Sunday first.
    pub day_names: [&'static str; 7],
    /// Matched by `ddd`.
    pub abbreviated_day_names: [&'static str; 7],
    /// Standard pattern `d`.
    pub short_date_pattern: &'static str,
    /// Standard pattern `D`.
    pub long_date_pattern: &'static str,
    /// Standard pattern `t`.
    pub short_time_pattern: &'static str,
    /// Standard pattern `T`.
    pub long_time_pattern: &'static str,
    /// Standard pattern `M` or `m`.
    pub month_day_pattern: &'static str,
    /// Standard pattern `Y` or `y`.
    pub year_month_pattern: &'static str,
}

const INVARIANT_CULTURE: Culture = Culture {
    name: "",
    date_separator: "/",
    time_separator: ":",
    am_designator: "AM",
    pm_designator: "PM",
    month_names: [
        "January",
        "February",
        "March",
        "April",
        "May",
        "June",
        "July",
        "August",
        "September",
        "October",
        "November",
        "December",
    ],
    abbreviated_month_names: [
        "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
    ],
    day_names: [
        "Sunday",
        "Monday",
        "Tuesday",
        "Wednesday",
        "Thursday",
        "Friday",
        "Saturday",
    ],
    abbreviated_day_names: ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"],
    short_date_pattern: "MM/dd/yyyy",
    long_date_pattern: "dddd, dd MMMM yyyy",
    short_time_pattern: "HH:mm",
    long_time_pattern: "HH:mm:ss",
    month_day_pattern: "MMMM dd",
    year_month_pattern: "yyyy MMMM",
};

static INVARIANT: Culture = INVARIANT_CULTURE;

static VI_VN: Culture = Culture {
    name: "vi-VN",
    date_separator: "/",
    time_separator: ":",
    am_designator: "SA",
    pm_designator: "CH",
    month_names: [
        "Tháng Giêng",
        "Tháng Hai",
        "Tháng Ba",
        "Tháng Tư",
        "Tháng Năm",
        "Tháng Sáu",
        "Tháng Bảy",
        "Tháng Tám",
        "Tháng Chín",
        "Tháng Mười",
        "Tháng Mười Một",
        "Tháng Mười Hai",
    ],
    abbreviated_month_names: [
        "Thg1", "Thg2", "Thg3", "Thg4", "Thg5", "Thg6", "Thg7", "Thg8", "Thg9", "Thg10", "Thg11",
        "Thg12",
    ],
    day_names: [
        "Chủ Nhật",
        "Thứ Hai",
        "Thứ Ba",
        "Thứ Tư",
        "Thứ Năm",
        "Thứ Sáu",
        "Thứ Bảy",
    ],
    abbreviated_day_names: ["CN", "T2", "T3", "T4", "T5", "T6", "T7"],
    short_date_pattern: "dd/MM/yyyy",
    long_date_pattern: "dddd, dd MMMM yyyy",
    short_time_pattern: "HH:mm",
    long_time_pattern: "HH:mm:ss",
    month_day_pattern: "dd MMMM",
    year_month_pattern: "MMMM yyyy",
};

static EN_US: Culture = Culture {
    name: "en-US",
    short_date_pattern: "M/d/yyyy",
    long_date_pattern: "dddd, MMMM d, yyyy",
    short_time_pattern: "h:mm tt",
    long_time_pattern: "h:mm:ss tt",
    month_day_pattern: "MMMM d",
    year_month_pattern: "MMMM yyyy",
    ..INVARIANT_CULTURE
};

static EN_GB: Culture = Culture {
    name: "en-GB",
    am_designator: "am",
    pm_designator: "pm",
    short_date_pattern: "dd/MM/yyyy",
    long_date_pattern: "dddd, d MMMM yyyy",
    month_day_pattern: "d MMMM",
    year_month_pattern: "MMMM yyyy",
    ..INVARIANT_CULTURE
};

static FR_FR: Culture = Culture {
    name: "fr-FR",
    date_separator: "/",
    time_separator: ":",
    am_designator: "",
    pm_designator: "",
    month_names: [
        "janvier",
        "février",
        "mars",
        "avril",
        "mai",
        "juin",
        "juillet",
        "août",
        "septembre",
        "octobre",
        "novembre",
        "décembre",
    ],
    abbreviated_month_names: [
        "janv.", "févr.", "mars", "avr.", "mai", "juin", "juil.", "août", "sept.", "oct.", "nov.",
        "déc.",
    ],
    day_names: [
        "dimanche", "lundi", "mardi", "mercredi", "jeudi", "vendredi", "samedi",
    ],
    abbreviated_day_names: ["dim.", "lun.", "mar.", "mer.", "jeu.", "ven.", "sam."],
    short_date_pattern: "dd/MM/yyyy",
    long_date_pattern: "dddd d MMMM yyyy",
    short_time_pattern: "HH:mm",
    long_time_pattern: "HH:mm:ss",
    month_day_pattern: "d MMMM",
    year_month_pattern: "MMMM yyyy",
};

static DE_DE: Culture = Culture {
    name: "de-DE",
    date_separator: ".",
    time_separator: ":",
    am_designator: "",
    pm_designator: "",
    month_names: [
        "Januar",
        "Februar",
        "März",
        "April",
        "Mai",
        "Juni",
        "Juli",
        "August",
        "September",
        "Oktober",
        "November",
        "Dezember",
    ],
    abbreviated_month_names: [
        "Jan.", "Feb.", "März", "Apr.", "Mai", "Juni", "Juli", "Aug.", "Sept.", "Okt.", "Nov.",
        "Dez.",
    ],
    day_names: [
        "Sonntag",
        "Montag",
        "Dienstag",
        "Mittwoch",
        "Donnerstag",
        "Freitag",
        "Samstag",
    ],
    abbreviated_day_names: ["So", "Mo", "Di", "Mi", "Do", "Fr", "Sa"],
    short_date_pattern: "dd.MM.yyyy",
    long_date_pattern: "dddd, d. MMMM yyyy",
    short_time_pattern: "HH:mm",
    long_time_pattern: "HH:mm:ss",
    month_day_pattern: "d. MMMM",
    year_month_pattern: "MMMM yyyy",
};

static JA_JP: Culture = Culture {
    name: "ja-JP",
    date_separator: "/",
    time_separator: ":",
    am_designator: "午前",
    pm_designator: "午後",
    month_names: [
        "1月", "2月", "3月", "4月", "5月", "6月", "7月", "8月", "9月", "10月", "11月", "12月",
    ],
    abbreviated_month_names: [
        "1月", "2月", "3月", "4月", "5月", "6月", "7月", "8月", "9月", "10月", "11月", "12月",
    ],
    day_names: [
        "日曜日",
        "月曜日",
        "火曜日",
        "水曜日",
        "木曜日",
        "金曜日",
        "土曜日",
    ],
    abbreviated_day_names: ["日", "月", "火", "水", "木", "金", "土"],
    short_date_pattern: "yyyy/MM/dd",
    long_date_pattern: "yyyy'年'M'月'd'日'dddd",
    short_time_pattern: "H:mm",
    long_time_pattern: "H:mm:ss",
    month_day_pattern: "M'月'd'日'",
    year_month_pattern: "yyyy'年'M'月'",
};

static ALL: [&Culture; 7] = [&INVARIANT, &VI_VN, &EN_US, &EN_GB, &FR_FR, &DE_DE, &JA_JP];

impl Culture {
    /// Looks up a culture by name, e.g. `vi-VN`. Matching ignores case and accepts `_` in place of
    /// `-`. A neutral name like `vi` resolves to its specific culture, and an empty name or `iv`
    /// to the invariant culture.
    ///
    /// # Example
    ///
    /// ```
    /// use coreext::Culture;
    ///
    /// assert_eq!(Culture::from_name("vi-vn").unwrap().name, "vi-VN");
    /// assert_eq!(Culture::from_name("de").unwrap().date_separator, ".");
    /// assert!(Culture::from_name("xx-XX").is_err());
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownCulture`] when no culture has that name.
    pub fn from_name(name: &str) -> Result<&'static Culture, Error> {
        let wanted = name.trim().replace('_', "-");
        if wanted.is_empty() || wanted.eq_ignore_ascii_case("iv") {
            return Ok(&INVARIANT);
        }

        ALL.iter()
            .copied()
            .filter(|culture| !culture.name.is_empty())
            .find(|culture| {
                culture.name.eq_ignore_ascii_case(&wanted)
                    || culture
                        .neutral_name()
                        .eq_ignore_ascii_case(&wanted)
            })
            .ok_or_else(|| {
                log::debug!("no culture named {name:?}");
                Error::UnknownCulture {
                    name: name.to_owned(),
                }
            })
    }

    /// The culture named by [`DEFAULT_CULTURE`].
    pub fn vietnamese() -> &'static Culture {
        &VI_VN
    }

    /// The culture-independent conventions.
    pub fn invariant() -> &'static Culture {
        &INVARIANT
    }

    /// Every culture this library knows, invariant first.
    pub fn all() -> &'static [&'static Culture] {
        &ALL
    }

    /// The language part of the name, e.g. `vi` for `vi-VN`.
    pub fn neutral_name(&self) -> &'static str {
        self.name.split('-').next().unwrap_or(self.name)
    }
}

impl Display for Culture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.name.is_empty() {
            f.write_str("invariant")
        } else {
            f.write_str(self.name)
        }
    }
}
