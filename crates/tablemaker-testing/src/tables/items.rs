// @generated by tablemaker. Do not edit by hand.
// Table: Items

use serde::{Deserialize, Serialize};
use tablemaker_runtime::{coerce, FromRow, RowValue, Table, TableEnum, TypeCoercionError};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Items {
    pub records: Vec<ItemsRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemsRecord {
    #[serde(rename = "ID")]
    pub id: i32,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Kind")]
    pub kind: Kind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Kind {
    #[serde(rename = "Weapon")]
    Weapon,
    #[serde(rename = "Armor")]
    Armor,
}

impl TableEnum for Kind {
    const LITERALS: &'static [&'static str] = &["Weapon", "Armor"];

    fn from_literal(literal: &str) -> Option<Self> {
        match literal {
            "Weapon" => Some(Self::Weapon),
            "Armor" => Some(Self::Armor),
            _ => None,
        }
    }
}

impl Items {
    /// First record whose `ID` equals `id`.
    pub fn get(&self, id: i32) -> Option<&ItemsRecord> {
        self.records.iter().find(|record| record.id == id)
    }

    pub fn add_record(&mut self, record: ItemsRecord) {
        self.records.push(record);
    }
}

impl FromRow for ItemsRecord {
    fn from_row(row: &RowValue) -> Result<Self, TypeCoercionError> {
        Ok(Self {
            id: coerce::int(row, "ID")?,
            name: coerce::string(row, "Name")?,
            kind: coerce::enumeration(row, "Kind")?,
        })
    }
}

impl Table for Items {
    const NAME: &'static str = "Items";
    type Record = ItemsRecord;

    fn records(&self) -> &[ItemsRecord] {
        &self.records
    }

    fn push_record(&mut self, record: ItemsRecord) {
        self.add_record(record);
    }
}
