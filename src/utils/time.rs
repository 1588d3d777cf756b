use chrono::{DateTime, Timelike, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};

pub const MIDNIGHT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const WALL_CLOCK_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// Anything that sits on a calendar day. Time of day is discarded.
pub trait CalendarDate {
    fn calendar_date(&self) -> NaiveDate;
}

impl CalendarDate for NaiveDate {
    fn calendar_date(&self) -> NaiveDate {
        return *self;
    }
}

impl CalendarDate for NaiveDateTime {
    fn calendar_date(&self) -> NaiveDate {
        return self.date();
    }
}

impl<Tz: TimeZone> CalendarDate for DateTime<Tz> {
    fn calendar_date(&self) -> NaiveDate {
        return self.date_naive();
    }
}

pub fn midnight(date: &impl CalendarDate) -> NaiveDateTime {
    return date.calendar_date().and_time(NaiveTime::MIN);
}

pub fn format_midnight(date: &impl CalendarDate) -> String {
    return midnight(date).format(MIDNIGHT_FORMAT).to_string();
}

/// Microsecond stamp; the fraction is left out when it is zero.
pub fn format_wall_clock(at: &NaiveDateTime) -> String {
    if at.nanosecond() / 1_000 == 0 {
        return at.format(MIDNIGHT_FORMAT).to_string();
    }
    return at.format(WALL_CLOCK_FORMAT).to_string();
}

pub fn now() -> NaiveDateTime {
    return Local::now().naive_local();
}
