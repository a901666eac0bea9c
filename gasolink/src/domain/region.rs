//! Administrative regions used to scope station queries.

/// A province (`idProvincia`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Province {
    pub id: u32,
    pub name: String,
}

/// A locality (municipality) within a province.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locality {
    pub id: u32,
    pub name: String,
    pub province_id: u32,
}
