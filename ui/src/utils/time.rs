use jiff::civil::DateTime;

/// Submission date as shown in admin tables, e.g. `3 Mar 2025`.
pub fn format_date(datetime: &DateTime) -> String {
    datetime.strftime("%-d %b %Y").to_string()
}

/// Wines the backend sent without a timestamp show a dash.
pub fn format_optional_date(datetime: Option<&DateTime>) -> String {
    datetime.map(format_date).unwrap_or_else(|| "-".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::civil::date;

    #[test]
    fn dates_use_day_month_year() {
        let datetime = date(2025, 3, 3).at(14, 5, 0, 0);
        assert_eq!(format_date(&datetime), "3 Mar 2025");
        assert_eq!(format_optional_date(None), "-");
    }
}
