use std::collections::BTreeSet;

use bizcard_core::models::card::{CardEntry, ExtractedRecord, NOT_AVAILABLE};
use rusqlite::{params, Row, Transaction};
use tracing::info;

use crate::error::{Result, StoreError};
use crate::CardStore;

const SELECT_COLUMNS: &str = "SELECT name, designation, company_name, contact, email, website, address, pin_code, image
     FROM bizcard_info";

fn text_column(row: &Row, column: &str) -> rusqlite::Result<String> {
    let value: Option<String> = row.get(column)?;
    Ok(value.unwrap_or_else(|| NOT_AVAILABLE.to_string()))
}

fn row_to_card(row: &Row) -> rusqlite::Result<CardEntry> {
    let record = ExtractedRecord {
        name: text_column(row, "name")?,
        designation: text_column(row, "designation")?,
        company_name: text_column(row, "company_name")?,
        contact: text_column(row, "contact")?,
        email: text_column(row, "email")?,
        website: text_column(row, "website")?,
        address: text_column(row, "address")?,
        pincode: text_column(row, "pin_code")?,
    };
    let image: Option<Vec<u8>> = row.get("image")?;

    Ok(CardEntry::new(record, image.unwrap_or_default()))
}

fn insert_row(tx: &Transaction<'_>, entry: &CardEntry) -> Result<()> {
    let record = &entry.record;
    tx.execute(
        "INSERT INTO bizcard_info (name, designation, company_name, contact, email, website, address, pin_code, image)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            record.name,
            record.designation,
            record.company_name,
            record.contact,
            record.email,
            record.website,
            record.address,
            record.pincode,
            entry.image,
        ],
    )
    .map_err(|source| StoreError::Insert {
        name: record.name.clone(),
        source,
    })?;
    Ok(())
}

fn query_cards(tx: &Transaction<'_>, sql: &str, args: &[&dyn rusqlite::ToSql]) -> Result<Vec<CardEntry>> {
    let mut stmt = tx.prepare(sql)?;
    let cards = stmt
        .query_map(args, row_to_card)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(cards)
}

impl CardStore {
    /// Save a card. On failure nothing is written and the error is
    /// retryable with the same entry.
    pub fn insert(&self, entry: &CardEntry) -> Result<()> {
        self.with_transaction("insert", |tx| insert_row(tx, entry))?;
        info!("Saved card for {:?}", entry.name());
        Ok(())
    }

    /// All cards in insertion order.
    pub fn select_all(&self) -> Result<Vec<CardEntry>> {
        self.with_transaction("select all", |tx| {
            query_cards(tx, &format!("{SELECT_COLUMNS} ORDER BY rowid"), &[])
        })
    }

    /// Cards whose name matches exactly, in insertion order.
    pub fn select_by_name(&self, name: &str) -> Result<Vec<CardEntry>> {
        self.with_transaction("select by name", |tx| {
            query_cards(
                tx,
                &format!("{SELECT_COLUMNS} WHERE name = ?1 ORDER BY rowid"),
                &[&name],
            )
        })
    }

    /// Distinct card names.
    pub fn select_distinct_names(&self) -> Result<BTreeSet<String>> {
        self.with_transaction("select names", |tx| {
            let mut stmt = tx.prepare("SELECT DISTINCT name FROM bizcard_info WHERE name IS NOT NULL")?;
            let names = stmt
                .query_map([], |row| row.get::<_, String>(0))?
                .collect::<rusqlite::Result<BTreeSet<_>>>()?;
            Ok(names)
        })
    }

    /// Designations of every card with this name, duplicates included.
    pub fn select_designations_for_name(&self, name: &str) -> Result<Vec<String>> {
        self.with_transaction("select designations", |tx| {
            let mut stmt = tx.prepare(
                "SELECT designation FROM bizcard_info
                 WHERE name = ?1
                 ORDER BY rowid",
            )?;
            let designations = stmt
                .query_map(params![name], |row| {
                    let value: Option<String> = row.get(0)?;
                    Ok(value.unwrap_or_else(|| NOT_AVAILABLE.to_string()))
                })?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(designations)
        })
    }

    /// Delete every card with this name. Returns the number of rows removed.
    pub fn delete_by_name(&self, name: &str) -> Result<usize> {
        let removed = self.with_transaction("delete by name", |tx| {
            Ok(tx.execute("DELETE FROM bizcard_info WHERE name = ?1", params![name])?)
        })?;
        info!("Deleted {} card(s) named {:?}", removed, name);
        Ok(removed)
    }

    /// Delete every card matching both name and designation.
    pub fn delete_by_name_and_designation(&self, name: &str, designation: &str) -> Result<usize> {
        let removed = self.with_transaction("delete by name and designation", |tx| {
            Ok(tx.execute(
                "DELETE FROM bizcard_info WHERE name = ?1 AND designation = ?2",
                params![name, designation],
            )?)
        })?;
        info!(
            "Deleted {} card(s) named {:?} with designation {:?}",
            removed, name, designation
        );
        Ok(removed)
    }

    /// Replace every card named `name` with `entry` in a single transaction.
    ///
    /// Returns the number of rows replaced. If the insert fails the old rows
    /// are kept.
    pub fn replace_by_name(&self, name: &str, entry: &CardEntry) -> Result<usize> {
        let removed = self.with_transaction("replace by name", |tx| {
            let removed = tx.execute("DELETE FROM bizcard_info WHERE name = ?1", params![name])?;
            insert_row(tx, entry)?;
            Ok(removed)
        })?;
        info!(
            "Replaced {} card(s) named {:?} with {:?}",
            removed,
            name,
            entry.name()
        );
        Ok(removed)
    }
}
