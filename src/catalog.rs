use std::fmt;

use crate::focus::Selection;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnitStatus {
    #[default]
    Available,
    Sold,
    Reserved,
}

impl UnitStatus {
    pub fn is_available(self) -> bool {
        self == UnitStatus::Available
    }
}

impl fmt::Display for UnitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            UnitStatus::Available => "AVAILABLE",
            UnitStatus::Sold => "SOLD",
            UnitStatus::Reserved => "RESERVED",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Unit {
    pub name: String,
    pub status: UnitStatus,
}

impl Unit {
    pub fn new(name: impl Into<String>, status: UnitStatus) -> Self {
        Self {
            name: name.into(),
            status,
        }
    }
}

/// A building offered for sale, split into units that map to rooms in its model.
#[derive(Debug, Clone, PartialEq)]
pub struct Listing {
    pub id: u32,
    pub title: String,
    pub location: String,
    pub price: String,
    pub model_path: String,
    pub units: Vec<Unit>,
}

impl Listing {
    pub fn available_units(&self) -> impl Iterator<Item = &Unit> {
        self.units.iter().filter(|unit| unit.status.is_available())
    }

    /// Focus request for the named unit. Sold, reserved and unknown units yield nothing.
    pub fn select_unit(&self, name: &str) -> Option<Selection> {
        let unit = self
            .units
            .iter()
            .find(|unit| unit.name.eq_ignore_ascii_case(name.trim()))?;

        if !unit.status.is_available() {
            log::debug!("{} in {} is {}", unit.name, self.title, unit.status);
            return None;
        }

        Some(Selection::Room(unit.name.clone()))
    }
}

pub fn sample_listings() -> Vec<Listing> {
    use UnitStatus::*;

    let listing = |id, title: &str, location: &str, price: &str, units: Vec<Unit>| Listing {
        id,
        title: title.to_string(),
        location: location.to_string(),
        price: price.to_string(),
        model_path: "assets/tower_house_design.glb".to_string(),
        units,
    };

    vec![
        listing(
            1,
            "Luxury Tower A",
            "Building A",
            "$250,000",
            vec![
                Unit::new("Floor 15 - Unit A1", Available),
                Unit::new("Floor 15 - Unit A2", Available),
                Unit::new("Floor 15 - Unit A3", Available),
                Unit::new("Floor 15 - Unit A4", Available),
            ],
        ),
        listing(
            2,
            "Family Block B",
            "Building B",
            "$180,000",
            vec![
                Unit::new("Floor 12 - Unit B1", Sold),
                Unit::new("Floor 12 - Unit B2", Sold),
                Unit::new("Floor 12 - Unit B3", Available),
            ],
        ),
        listing(
            3,
            "Premium Block C",
            "Building C",
            "$350,000",
            vec![
                Unit::new("Floor 20 - Unit C1", Sold),
                Unit::new("Floor 20 - Unit C2", Available),
                Unit::new("Floor 20 - Unit C3", Available),
            ],
        ),
        listing(
            4,
            "Studio Block D",
            "Building D",
            "$120,000",
            vec![
                Unit::new("Floor 8 - Unit D1", Available),
                Unit::new("Floor 8 - Unit D2", Available),
                Unit::new("Floor 8 - Unit D3", Reserved),
            ],
        ),
    ]
}
