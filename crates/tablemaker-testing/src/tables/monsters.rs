// @generated by tablemaker. Do not edit by hand.
// Table: Monsters

use serde::{Deserialize, Serialize};
use tablemaker_runtime::{coerce, FromRow, RowValue, Table, TableEnum, TypeCoercionError};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Monsters {
    pub records: Vec<MonstersRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonstersRecord {
    #[serde(rename = "ID")]
    pub id: i32,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Health")]
    pub health: i64,
    #[serde(rename = "Speed")]
    pub speed: f32,
    #[serde(rename = "Experience")]
    pub experience: f64,
    #[serde(rename = "Boss")]
    pub boss: bool,
    #[serde(rename = "Element")]
    pub element: Element,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Element {
    #[serde(rename = "Water")]
    Water,
    #[serde(rename = "Fire")]
    Fire,
}

impl TableEnum for Element {
    const LITERALS: &'static [&'static str] = &["Water", "Fire"];

    fn from_literal(literal: &str) -> Option<Self> {
        match literal {
            "Water" => Some(Self::Water),
            "Fire" => Some(Self::Fire),
            _ => None,
        }
    }
}

impl Monsters {
    /// First record whose `ID` equals `id`.
    pub fn get(&self, id: i32) -> Option<&MonstersRecord> {
        self.records.iter().find(|record| record.id == id)
    }

    pub fn add_record(&mut self, record: MonstersRecord) {
        self.records.push(record);
    }
}

impl FromRow for MonstersRecord {
    fn from_row(row: &RowValue) -> Result<Self, TypeCoercionError> {
        Ok(Self {
            id: coerce::int(row, "ID")?,
            name: coerce::string(row, "Name")?,
            health: coerce::long(row, "Health")?,
            speed: coerce::float(row, "Speed")?,
            experience: coerce::double(row, "Experience")?,
            boss: coerce::boolean(row, "Boss")?,
            element: coerce::enumeration(row, "Element")?,
        })
    }
}

impl Table for Monsters {
    const NAME: &'static str = "Monsters";
    type Record = MonstersRecord;

    fn records(&self) -> &[MonstersRecord] {
        &self.records
    }

    fn push_record(&mut self, record: MonstersRecord) {
        self.add_record(record);
    }
}
