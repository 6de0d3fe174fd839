//! Marble catalog

use serde::{Deserialize, Serialize};

/// Cardinal elements. Each matches itself or Salt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Element {
    Earth,
    Fire,
    Wind,
    Water,
}

/// Metals in unlock order (Lead first, Gold last)
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Metal {
    Lead,
    Tin,
    Iron,
    Copper,
    Silver,
    Gold,
}

/// Life marbles. Mors only matches Vitae and vice versa.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Life {
    Mors,
    Vitae,
}

/// A marble category. Marbles have no identity beyond their category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Marble {
    Salt,
    Element(Element),
    Metal(Metal),
    Quicksilver,
    Life(Life),
}

/// Display symbol for an empty cell
pub const EMPTY_SYMBOL: char = '_';

impl Element {
    pub const ALL: [Element; 4] = [Element::Earth, Element::Fire, Element::Wind, Element::Water];
}

impl Metal {
    pub const ALL: [Metal; 6] = [
        Metal::Lead,
        Metal::Tin,
        Metal::Iron,
        Metal::Copper,
        Metal::Silver,
        Metal::Gold,
    ];

    /// Position in the unlock order, 0 for Lead through 5 for Gold
    pub fn rank(self) -> u8 {
        self as u8
    }

    pub fn from_rank(rank: u8) -> Option<Metal> {
        Self::ALL.get(rank as usize).copied()
    }

    /// Next metal in unlock order, `None` after Gold
    pub fn next(self) -> Option<Metal> {
        Self::from_rank(self.rank() + 1)
    }

    /// Previous metal in unlock order, `None` before Lead
    pub fn prev(self) -> Option<Metal> {
        self.rank().checked_sub(1).and_then(Self::from_rank)
    }
}

impl Marble {
    /// Every category, in catalog order
    pub const ALL: [Marble; 14] = [
        Marble::Salt,
        Marble::Element(Element::Earth),
        Marble::Element(Element::Fire),
        Marble::Element(Element::Wind),
        Marble::Element(Element::Water),
        Marble::Metal(Metal::Lead),
        Marble::Metal(Metal::Tin),
        Marble::Metal(Metal::Iron),
        Marble::Metal(Metal::Copper),
        Marble::Metal(Metal::Silver),
        Marble::Metal(Metal::Gold),
        Marble::Quicksilver,
        Marble::Life(Life::Mors),
        Marble::Life(Life::Vitae),
    ];

    pub const EARTH: Marble = Marble::Element(Element::Earth);
    pub const FIRE: Marble = Marble::Element(Element::Fire);
    pub const WIND: Marble = Marble::Element(Element::Wind);
    pub const WATER: Marble = Marble::Element(Element::Water);
    pub const LEAD: Marble = Marble::Metal(Metal::Lead);
    pub const TIN: Marble = Marble::Metal(Metal::Tin);
    pub const IRON: Marble = Marble::Metal(Metal::Iron);
    pub const COPPER: Marble = Marble::Metal(Metal::Copper);
    pub const SILVER: Marble = Marble::Metal(Metal::Silver);
    pub const GOLD: Marble = Marble::Metal(Metal::Gold);
    pub const MORS: Marble = Marble::Life(Life::Mors);
    pub const VITAE: Marble = Marble::Life(Life::Vitae);

    /// Numeric category code. Metals occupy 16..=21 so that their codes
    /// sort in unlock order.
    pub fn code(self) -> u8 {
        match self {
            Marble::Salt => 0,
            Marble::Element(e) => 1 + e as u8,
            Marble::Metal(m) => 16 + m.rank(),
            Marble::Quicksilver => 32,
            Marble::Life(Life::Mors) => 64,
            Marble::Life(Life::Vitae) => 65,
        }
    }

    pub fn from_code(code: u8) -> Option<Marble> {
        Self::ALL.iter().copied().find(|m| m.code() == code)
    }

    /// Short display code, stable per category
    pub fn symbol(self) -> char {
        match self {
            Marble::Salt => '0',
            Marble::Element(Element::Earth) => 'e',
            Marble::Element(Element::Fire) => 'f',
            Marble::Element(Element::Wind) => '~',
            Marble::Element(Element::Water) => 'w',
            Marble::Metal(Metal::Lead) => 'l',
            Marble::Metal(Metal::Tin) => 't',
            Marble::Metal(Metal::Iron) => 'i',
            Marble::Metal(Metal::Copper) => 'c',
            Marble::Metal(Metal::Silver) => 's',
            Marble::Metal(Metal::Gold) => 'g',
            Marble::Quicksilver => 'q',
            Marble::Life(Life::Mors) => 'm',
            Marble::Life(Life::Vitae) => 'v',
        }
    }

    pub fn from_symbol(symbol: char) -> Option<Marble> {
        Self::ALL.iter().copied().find(|m| m.symbol() == symbol)
    }

    pub fn name(self) -> &'static str {
        match self {
            Marble::Salt => "salt",
            Marble::Element(Element::Earth) => "earth",
            Marble::Element(Element::Fire) => "fire",
            Marble::Element(Element::Wind) => "wind",
            Marble::Element(Element::Water) => "water",
            Marble::Metal(Metal::Lead) => "lead",
            Marble::Metal(Metal::Tin) => "tin",
            Marble::Metal(Metal::Iron) => "iron",
            Marble::Metal(Metal::Copper) => "copper",
            Marble::Metal(Metal::Silver) => "silver",
            Marble::Metal(Metal::Gold) => "gold",
            Marble::Quicksilver => "quicksilver",
            Marble::Life(Life::Mors) => "mors",
            Marble::Life(Life::Vitae) => "vitae",
        }
    }

    pub fn metal(self) -> Option<Metal> {
        match self {
            Marble::Metal(m) => Some(m),
            _ => None,
        }
    }
}

/// Display symbol for an optional marble
pub fn symbol_of(marble: Option<Marble>) -> char {
    marble.map_or(EMPTY_SYMBOL, Marble::symbol)
}

impl std::fmt::Display for Marble {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
