//! Display formatting for the bills list.

use chrono::Datelike;
use shared::{domain::BillStatus, error::BillFieldError, validation::parse_bill_date};

const MONTHS_FR: [&str; 12] = [
    "Jan", "Fév", "Mar", "Avr", "Mai", "Jui", "Jui", "Aoû", "Sep", "Oct", "Nov", "Déc",
];

/// `2004-04-04` -> `4 Avr. 04`.
pub fn format_date(raw: &str) -> Result<String, BillFieldError> {
    let date = parse_bill_date(raw)?;
    let month = MONTHS_FR[date.month0() as usize];
    Ok(format!(
        "{} {month}. {:02}",
        date.day(),
        date.year().rem_euclid(100)
    ))
}

pub fn format_status(status: BillStatus) -> &'static str {
    match status {
        BillStatus::Pending => "En attente",
        BillStatus::Accepted => "Accepté",
        BillStatus::Refused => "Refused",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_dates_with_french_month_abbreviations() {
        assert_eq!(format_date("2004-04-04").as_deref(), Ok("4 Avr. 04"));
        assert_eq!(format_date("2001-01-01").as_deref(), Ok("1 Jan. 01"));
        assert_eq!(format_date("2021-12-25").as_deref(), Ok("25 Déc. 21"));
        assert_eq!(format_date("2019-08-10").as_deref(), Ok("10 Aoû. 19"));
    }

    #[test]
    fn rejects_malformed_dates() {
        assert!(format_date("2004-13-45").is_err());
        assert!(format_date("").is_err());
        assert!(format_date("hier").is_err());
    }

    #[test]
    fn formats_statuses() {
        assert_eq!(format_status(BillStatus::Pending), "En attente");
        assert_eq!(format_status(BillStatus::Accepted), "Accepté");
        assert_eq!(format_status(BillStatus::Refused), "Refused");
    }
}
