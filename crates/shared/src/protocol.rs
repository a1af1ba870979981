use chrono::NaiveDate;
use serde::{
    de::{value::StrDeserializer, IgnoredAny, IntoDeserializer},
    Deserialize, Deserializer, Serialize,
};

use crate::domain::{BillId, BillStatus, ExpenseType};

/// A bill as returned by the store's list operation.
///
/// Stored records are loosely typed (numbers may arrive as strings, dates may be
/// malformed, null or numeric), so no field can fail the decode of a list:
/// numbers are parsed from text, `date` is kept as text and an unknown
/// `status` reads as the default one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawBill {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<BillId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub expense_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub amount: Option<f64>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub date: String,
    #[serde(default, deserialize_with = "lenient_number")]
    pub vat: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub pct: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commentary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_status")]
    pub status: BillStatus,
}

/// A complete bill assembled on submit. `file_url` and `file_name` are not
/// optional: a record cannot be built before the receipt upload resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillRecord {
    pub email: String,
    #[serde(rename = "type")]
    pub expense_type: ExpenseType,
    pub name: String,
    pub amount: u64,
    pub date: NaiveDate,
    #[serde(default)]
    pub vat: Option<f64>,
    pub pct: u32,
    #[serde(default)]
    pub commentary: String,
    pub file_url: String,
    pub file_name: String,
    pub status: BillStatus,
}

impl BillRecord {
    pub fn into_raw(self, id: Option<BillId>) -> RawBill {
        RawBill {
            id,
            email: Some(self.email),
            expense_type: Some(self.expense_type.label().to_string()),
            name: Some(self.name),
            amount: Some(self.amount as f64),
            date: self.date.format("%Y-%m-%d").to_string(),
            vat: self.vat,
            pct: Some(f64::from(self.pct)),
            commentary: Some(self.commentary),
            file_url: Some(self.file_url),
            file_name: Some(self.file_name),
            status: self.status,
        }
    }
}

/// Response of the store's create (receipt upload) operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedBill {
    pub file_url: String,
    pub key: BillId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(f64),
    Text(String),
}

fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<NumberOrText>::deserialize(deserializer)?;
    Ok(match value {
        Some(NumberOrText::Number(n)) => Some(n),
        Some(NumberOrText::Text(text)) => text.trim().parse::<f64>().ok(),
        None => None,
    })
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LooseValue {
    Text(String),
    Integer(i64),
    Number(f64),
    Other(IgnoredAny),
}

fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<LooseValue>::deserialize(deserializer)?;
    Ok(match value {
        Some(LooseValue::Text(text)) => text,
        Some(LooseValue::Integer(n)) => n.to_string(),
        Some(LooseValue::Number(n)) => n.to_string(),
        Some(LooseValue::Other(_)) | None => String::new(),
    })
}

fn lenient_status<'de, D>(deserializer: D) -> Result<BillStatus, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(LooseValue::Text(text)) = Option::<LooseValue>::deserialize(deserializer)? else {
        return Ok(BillStatus::default());
    };
    let label: StrDeserializer<'_, D::Error> = text.as_str().into_deserializer();
    Ok(BillStatus::deserialize(label).unwrap_or_default())
}
