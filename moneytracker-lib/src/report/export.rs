use anyhow::Context;
use moneytracker_repo::transaction_repo::{Transaction, TransactionType};
use rust_decimal::prelude::ToPrimitive;
use rust_xlsxwriter::{Format, Workbook};

pub const CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

const HEADERS: [&str; 6] = [
    "Fecha",
    "Tipo",
    "Categoría",
    "Subcategoría",
    "Descripción",
    "Monto",
];

const COLUMN_WIDTHS: [f64; 6] = [12.0, 10.0, 18.0, 18.0, 40.0, 14.0];

fn type_label(transaction_type: TransactionType) -> &'static str {
    match transaction_type {
        TransactionType::Income => "Ingreso",
        TransactionType::Expense => "Gasto",
    }
}

/// Renders the given transactions as a single-sheet xlsx workbook, one row
/// per transaction under a bold header row. Row order follows the input.
pub fn build_workbook(transactions: &[Transaction]) -> anyhow::Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet
        .set_name("Transacciones")
        .context("Unable to name worksheet")?;

    let bold = Format::new().set_bold();
    for (col, header) in HEADERS.iter().enumerate() {
        worksheet
            .write_string_with_format(0, col as u16, *header, &bold)
            .context("Unable to write header row")?;
    }
    for (col, width) in COLUMN_WIDTHS.iter().enumerate() {
        worksheet
            .set_column_width(col as u16, *width)
            .context("Unable to size columns")?;
    }

    for (index, transaction) in transactions.iter().enumerate() {
        let row = (index + 1) as u32;
        worksheet
            .write_string(row, 0, transaction.date.format("%Y-%m-%d").to_string())
            .context("Unable to write row")?;
        worksheet
            .write_string(row, 1, type_label(transaction.transaction_type))
            .context("Unable to write row")?;
        worksheet
            .write_string(row, 2, &transaction.category)
            .context("Unable to write row")?;
        worksheet
            .write_string(row, 3, &transaction.subcategory)
            .context("Unable to write row")?;
        worksheet
            .write_string(row, 4, transaction.description.as_deref().unwrap_or(""))
            .context("Unable to write row")?;
        worksheet
            .write_number(row, 5, transaction.amount.to_f64().unwrap_or(0.0))
            .context("Unable to write row")?;
    }

    workbook
        .save_to_buffer()
        .context("Unable to serialize workbook")
}

const FULL_HEADERS: [&str; 8] = [
    "Id",
    "Fecha",
    "Tipo",
    "Categoría",
    "Subcategoría",
    "Descripción",
    "Monto",
    "Creado",
];

/// Full-history dump: every transaction with its row id and creation
/// timestamp. Column widths are sized to the longest literal in each
/// column, header included.
pub fn build_full_workbook(transactions: &[Transaction]) -> anyhow::Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet
        .set_name("Transacciones")
        .context("Unable to name worksheet")?;

    let bold = Format::new().set_bold();
    let mut widths: Vec<usize> = FULL_HEADERS.iter().map(|h| h.chars().count()).collect();
    for (col, header) in FULL_HEADERS.iter().enumerate() {
        worksheet
            .write_string_with_format(0, col as u16, *header, &bold)
            .context("Unable to write header row")?;
    }

    for (index, transaction) in transactions.iter().enumerate() {
        let row = (index + 1) as u32;
        let cells = [
            transaction.id.to_string(),
            transaction.date.format("%Y-%m-%d").to_string(),
            type_label(transaction.transaction_type).to_owned(),
            transaction.category.clone(),
            transaction.subcategory.clone(),
            transaction.description.clone().unwrap_or_default(),
            transaction.amount.to_string(),
            transaction
                .created_at
                .format("%Y-%m-%d %H:%M:%S")
                .to_string(),
        ];
        for (col, value) in cells.iter().enumerate() {
            widths[col] = widths[col].max(value.chars().count());
        }
        worksheet
            .write_number(row, 0, transaction.id as f64)
            .context("Unable to write row")?;
        worksheet
            .write_string(row, 1, &cells[1])
            .context("Unable to write row")?;
        worksheet
            .write_string(row, 2, &cells[2])
            .context("Unable to write row")?;
        worksheet
            .write_string(row, 3, &cells[3])
            .context("Unable to write row")?;
        worksheet
            .write_string(row, 4, &cells[4])
            .context("Unable to write row")?;
        worksheet
            .write_string(row, 5, &cells[5])
            .context("Unable to write row")?;
        worksheet
            .write_number(row, 6, transaction.amount.to_f64().unwrap_or(0.0))
            .context("Unable to write row")?;
        worksheet
            .write_string(row, 7, &cells[7])
            .context("Unable to write row")?;
    }

    for (col, width) in widths.iter().enumerate() {
        worksheet
            .set_column_width(col as u16, *width as f64)
            .context("Unable to size columns")?;
    }

    workbook
        .save_to_buffer()
        .context("Unable to serialize workbook")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use rust_decimal::Decimal;
    use std::str::FromStr;

    #[test]
    fn workbook_is_a_zip_container() {
        let transactions = vec![Transaction::new(
            1,
            Decimal::from_str("125000.50").unwrap(),
            TransactionType::Expense,
            "Alimentación".to_owned(),
            "Restaurantes".to_owned(),
            Some("Almuerzo".to_owned()),
            NaiveDate::from_str("2024-01-05").unwrap(),
            Utc::now(),
        )];
        let bytes = build_workbook(&transactions).unwrap();
        // xlsx is zip under the hood
        assert_eq!(&bytes[..2], b"PK");
    }

    #[test]
    fn empty_input_still_yields_a_valid_workbook() {
        let bytes = build_workbook(&[]).unwrap();
        assert_eq!(&bytes[..2], b"PK");
    }

    #[test]
    fn full_workbook_is_a_zip_container() {
        let transactions = vec![Transaction::new(
            7,
            Decimal::from_str("99000").unwrap(),
            TransactionType::Income,
            "Salario".to_owned(),
            "Mensual".to_owned(),
            None,
            NaiveDate::from_str("2024-02-01").unwrap(),
            Utc::now(),
        )];
        let bytes = build_full_workbook(&transactions).unwrap();
        assert_eq!(&bytes[..2], b"PK");
    }

    #[test]
    fn type_labels_are_localized() {
        assert_eq!(type_label(TransactionType::Income), "Ingreso");
        assert_eq!(type_label(TransactionType::Expense), "Gasto");
    }
}
