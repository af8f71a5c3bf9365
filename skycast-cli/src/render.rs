//! Terminal rendering of a weather report.

use chrono::{DateTime, FixedOffset, Utc};
use skycast_core::{CurrentConditions, ForecastEntry, Units, WeatherReport};

pub fn print_report(report: &WeatherReport) {
    print_current(&report.current, report.units);

    if !report.daily.is_empty() {
        println!();
        println!("5-day forecast");
        for entry in &report.daily {
            print_entry(entry, report.units, report.current.utc_offset_secs);
        }
    }
}

fn print_current(current: &CurrentConditions, units: Units) {
    let offset = current.utc_offset_secs;

    println!("{}, {}", current.city, current.country);
    println!("{}", long_date(current.observed_at, offset));
    println!();
    println!(
        "  {} {:.0}{}  {}",
        icon_glyph(&current.icon),
        current.temperature.round(),
        units.temp_symbol(),
        current.description,
    );
    println!("  Feels like {:.0}{}", current.feels_like.round(), units.temp_symbol());
    println!();
    println!("  Humidity   {}%", current.humidity_pct);
    println!("  Wind       {} {}", current.wind_speed, units.wind_symbol());
    println!("  Pressure   {} hPa", current.pressure_hpa);
    println!("  Sunrise    {}", local_time(current.sunrise, offset));
    println!("  Sunset     {}", local_time(current.sunset, offset));
    if let Some(visibility) = current.visibility_m {
        println!("  Visibility {:.1} km", f64::from(visibility) / 1000.0);
    }
}

fn print_entry(entry: &ForecastEntry, units: Units, offset: i32) {
    println!(
        "  {:<4} {} {:>4.0}{}  {}",
        weekday(entry.at, offset),
        icon_glyph(&entry.icon),
        entry.temperature.round(),
        units.temp_symbol(),
        entry.description,
    );
}

fn to_local(at: DateTime<Utc>, offset_secs: i32) -> DateTime<FixedOffset> {
    match FixedOffset::east_opt(offset_secs) {
        Some(offset) => at.with_timezone(&offset),
        None => at.fixed_offset(),
    }
}

fn long_date(at: DateTime<Utc>, offset_secs: i32) -> String {
    to_local(at, offset_secs).format("%A, %B %-d").to_string()
}

fn local_time(at: DateTime<Utc>, offset_secs: i32) -> String {
    to_local(at, offset_secs).format("%H:%M").to_string()
}

fn weekday(at: DateTime<Utc>, offset_secs: i32) -> String {
    to_local(at, offset_secs).format("%a").to_string()
}

/// OpenWeather icon codes (day or night variants) to a terminal glyph.
fn icon_glyph(code: &str) -> &'static str {
    match code.get(..2) {
        Some("01") => "☀",
        Some("02") => "⛅",
        Some("03" | "04") => "☁",
        Some("09") => "🌧",
        Some("10") => "🌦",
        Some("11") => "⛈",
        Some("13") => "❄",
        Some("50") => "🌫",
        _ => "·",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(secs: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(secs, 0).expect("valid test timestamp")
    }

    #[test]
    fn icon_glyphs_cover_day_and_night_codes() {
        assert_eq!(icon_glyph("01d"), "☀");
        assert_eq!(icon_glyph("01n"), "☀");
        assert_eq!(icon_glyph("04n"), "☁");
        assert_eq!(icon_glyph("10d"), "🌦");
        assert_eq!(icon_glyph(""), "·");
        assert_eq!(icon_glyph("99x"), "·");
    }

    #[test]
    fn local_time_applies_the_location_offset() {
        // 2024-08-05 10:00:00 UTC
        let at = ts(1_722_852_000);

        assert_eq!(local_time(at, 0), "10:00");
        assert_eq!(local_time(at, 3600), "11:00");
        assert_eq!(local_time(at, -5 * 3600), "05:00");
    }

    #[test]
    fn long_date_names_weekday_and_month() {
        // 2024-08-05 10:00:00 UTC, a Monday
        let at = ts(1_722_852_000);

        assert_eq!(long_date(at, 0), "Monday, August 5");
    }

    #[test]
    fn weekday_shifts_across_midnight_with_offset() {
        // 2024-08-05 23:30:00 UTC, a Monday
        let at = ts(1_722_900_600);

        assert_eq!(weekday(at, 0), "Mon");
        assert_eq!(weekday(at, 3600), "Tue");
    }

    #[test]
    fn out_of_range_offset_falls_back_to_utc() {
        let at = ts(1_722_852_000);

        assert_eq!(local_time(at, 999_999), "10:00");
    }
}
