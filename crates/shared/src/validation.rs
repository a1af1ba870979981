//! Receipt-file and form-field checks shared by the new bill workflow.

use chrono::NaiveDate;

use crate::{
    domain::ExpenseType,
    error::{BillFieldError, ReceiptFileError},
};

pub const ALLOWED_RECEIPT_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];
pub const DEFAULT_PCT: u32 = 20;
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Strips any directory part from a file input value (`C:\fakepath\a.png` -> `a.png`).
pub fn receipt_file_name(input_value: &str) -> &str {
    input_value
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(input_value)
        .trim()
}

pub fn validate_receipt_file_name(file_name: &str) -> Result<(), ReceiptFileError> {
    let file_name = receipt_file_name(file_name);
    if file_name.is_empty() {
        return Err(ReceiptFileError::Missing);
    }

    let extension = match file_name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => ext.to_ascii_lowercase(),
        _ => {
            return Err(ReceiptFileError::InvalidExtension {
                file_name: file_name.to_string(),
            })
        }
    };

    if ALLOWED_RECEIPT_EXTENSIONS.contains(&extension.as_str()) {
        Ok(())
    } else {
        Err(ReceiptFileError::InvalidExtension {
            file_name: file_name.to_string(),
        })
    }
}

pub fn parse_expense_type(raw: &str) -> Result<ExpenseType, BillFieldError> {
    raw.parse::<ExpenseType>()
        .map_err(|_| BillFieldError::ExpenseType(raw.trim().to_string()))
}

pub fn parse_amount(raw: &str) -> Result<u64, BillFieldError> {
    raw.trim()
        .parse::<u64>()
        .map_err(|_| BillFieldError::Amount(raw.trim().to_string()))
}

pub fn parse_bill_date(raw: &str) -> Result<NaiveDate, BillFieldError> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
        .map_err(|_| BillFieldError::Date(raw.trim().to_string()))
}

pub fn parse_vat(raw: &str) -> Result<Option<f64>, BillFieldError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    match raw.parse::<f64>() {
        Ok(vat) if vat.is_finite() && vat >= 0.0 => Ok(Some(vat)),
        _ => Err(BillFieldError::Vat(raw.to_string())),
    }
}

/// Empty and zero both fall back to [`DEFAULT_PCT`].
pub fn parse_pct(raw: &str) -> Result<u32, BillFieldError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(DEFAULT_PCT);
    }
    match raw.parse::<u32>() {
        Ok(0) => Ok(DEFAULT_PCT),
        Ok(pct) => Ok(pct),
        Err(_) => Err(BillFieldError::Pct(raw.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_image_extensions_case_insensitively() {
        for name in ["photo.png", "photo.jpg", "scan.JPEG", "C:\\fakepath\\ticket.Png"] {
            assert_eq!(validate_receipt_file_name(name), Ok(()), "{name}");
        }
    }

    #[test]
    fn rejects_other_extensions() {
        assert_eq!(
            validate_receipt_file_name("mon_fichier.hhh"),
            Err(ReceiptFileError::InvalidExtension {
                file_name: "mon_fichier.hhh".into()
            })
        );
        assert!(validate_receipt_file_name("facture.pdf").is_err());
        assert!(validate_receipt_file_name("png").is_err());
        assert!(validate_receipt_file_name(".png").is_err());
        assert_eq!(
            validate_receipt_file_name(""),
            Err(ReceiptFileError::Missing)
        );
    }

    #[test]
    fn strips_directories_from_input_value() {
        assert_eq!(receipt_file_name("C:\\fakepath\\photo.png"), "photo.png");
        assert_eq!(receipt_file_name("/tmp/receipts/photo.png"), "photo.png");
        assert_eq!(receipt_file_name("photo.png"), "photo.png");
    }

    #[test]
    fn coerces_numeric_fields() {
        assert_eq!(parse_amount(" 750 "), Ok(750));
        assert!(parse_amount("").is_err());
        assert!(parse_amount("-3").is_err());
        assert_eq!(parse_vat(""), Ok(None));
        assert_eq!(parse_vat("70"), Ok(Some(70.0)));
        assert!(parse_vat("abc").is_err());
        assert_eq!(parse_pct(""), Ok(20));
        assert_eq!(parse_pct("0"), Ok(20));
        assert_eq!(parse_pct("10"), Ok(10));
    }

    #[test]
    fn parses_iso_dates_only() {
        assert_eq!(
            parse_bill_date("2020-01-01"),
            Ok(NaiveDate::from_ymd_opt(2020, 1, 1).expect("date"))
        );
        assert!(parse_bill_date("01/01/2020").is_err());
        assert!(parse_bill_date("2020-13-01").is_err());
    }
}
