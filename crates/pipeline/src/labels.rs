//! Static class-id → name tables for both models.
//!
//! A lookup is total: every id yields a [`Label`], either `Known` with the
//! table's name or `Unknown` carrying the raw id unchanged.

use serde::Serialize;

/// Integer class id emitted by a classifier (after truncation)
pub type ClassId = i64;

/// Result of mapping a class id through a table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Label {
    Known { id: ClassId, name: &'static str },
    Unknown { raw_id: ClassId },
}

impl Label {
    pub fn is_known(&self) -> bool {
        matches!(self, Label::Known { .. })
    }

    /// The class id this label was looked up from
    pub fn id(&self) -> ClassId {
        match self {
            Label::Known { id, .. } => *id,
            Label::Unknown { raw_id } => *raw_id,
        }
    }

    pub fn name(&self) -> Option<&'static str> {
        match self {
            Label::Known { name, .. } => Some(*name),
            Label::Unknown { .. } => None,
        }
    }
}

/// Contiguous id range starting at `first_id`, one name per id
#[derive(Debug)]
pub struct LabelTable {
    /// What the table names ("crop", "fertilizer")
    pub kind: &'static str,
    first_id: ClassId,
    names: &'static [&'static str],
}

impl LabelTable {
    pub const fn new(kind: &'static str, first_id: ClassId, names: &'static [&'static str]) -> Self {
        Self {
            kind,
            first_id,
            names,
        }
    }

    pub fn lookup(&self, id: ClassId) -> Label {
        let name = id
            .checked_sub(self.first_id)
            .and_then(|offset| usize::try_from(offset).ok())
            .and_then(|offset| self.names.get(offset))
            .copied();

        match name {
            Some(name) => Label::Known { id, name },
            None => Label::Unknown { raw_id: id },
        }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// All `(id, name)` entries in id order
    pub fn entries(&self) -> impl Iterator<Item = (ClassId, &'static str)> + '_ {
        self.names
            .iter()
            .enumerate()
            .map(move |(offset, name)| (self.first_id + offset as ClassId, *name))
    }
}

pub static CROPS: LabelTable = LabelTable::new(
    "crop",
    0,
    &[
        "Wheat",
        "Mungbean",
        "Maize",
        "Pigeonpeas",
        "Cotton",
        "Blackgram",
        "Mothbeans",
        "Lentil",
        "Jute",
        "Chickpea",
        "Coffee",
        "Kidneybeans",
        "Muskmelon",
        "Rice",
        "Groundnuts",
        "Soybeans",
        "Potatoes",
        "Beans",
        "Peas",
        "Sugarcane",
        "Barley",
        "Millet",
        "Sorghum",
        "Lentils",
        "Apple",
        "Orange",
        "Mango",
        "Grapes",
        "Banana",
        "Pomegranate",
        "Watermelon",
        "Coconut",
    ],
);

pub static FERTILIZERS: LabelTable = LabelTable::new(
    "fertilizer",
    1,
    &[
        "Urea", "DAP", "14-35-14", "28-28", "17-17-17", "20-20", "10-26-26",
    ],
);

pub fn crop_label(id: ClassId) -> Label {
    CROPS.lookup(id)
}

pub fn fertilizer_label(id: ClassId) -> Label {
    FERTILIZERS.lookup(id)
}
