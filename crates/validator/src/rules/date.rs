//! Calendar date rule for `DD/MM/YYYY` strings.

use std::sync::LazyLock;

static DATE_REGEX: LazyLock<regex::Regex> = LazyLock::new(|| {
    regex::Regex::new(r"^([0-9]{2})/(0[1-9]|1[0-2])/([0-9]{4})$").expect("date regex is valid")
});

crate::rule! {
    /// Passes for `DD/MM/YYYY` strings naming an existing day.
    ///
    /// February has 29 days in Gregorian leap years and 28 otherwise. Other
    /// months alternate by parity: even-numbered months have 30 days and
    /// odd-numbered months 31.
    pub DateRule = "date";
    check(value, _) { value.as_str().is_some_and(is_date) }
    message(_, _) { "date is invalid" }
    fn date();
}

/// Returns true when `input` is a `DD/MM/YYYY` date accepted by [`DateRule`].
pub fn is_date(input: &str) -> bool {
    let Some(caps) = DATE_REGEX.captures(input) else {
        return false;
    };
    let (Ok(day), Ok(month), Ok(year)) = (
        caps[1].parse::<u32>(),
        caps[2].parse::<u32>(),
        caps[3].parse::<u32>(),
    ) else {
        return false;
    };
    (1..=days_in_month(month, year)).contains(&day)
}

fn days_in_month(month: u32, year: u32) -> u32 {
    if month == 2 {
        if is_leap_year(year) { 29 } else { 28 }
    } else if month % 2 == 0 {
        30
    } else {
        31
    }
}

fn is_leap_year(year: u32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}
