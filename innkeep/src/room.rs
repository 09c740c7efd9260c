//! Room entities: room categories, bed configurations, and cached state.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Identifier for a room row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomId(i64);

impl RoomId {
    /// Creates a room id from a raw row id.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw row id.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Room category, ordered from plainest to grandest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomType {
    /// Standard room.
    Standard,
    /// Deluxe room.
    Deluxe,
    /// Suite.
    Suite,
    /// Executive suite.
    Executive,
    /// Presidential suite.
    Presidential,
}

impl RoomType {
    /// Price multiplier for this category.
    #[must_use]
    pub fn multiplier(self) -> Decimal {
        match self {
            Self::Standard => Decimal::new(110, 2),
            Self::Deluxe => Decimal::new(115, 2),
            Self::Suite => Decimal::new(120, 2),
            Self::Executive => Decimal::new(130, 2),
            Self::Presidential => Decimal::new(145, 2),
        }
    }

    /// Stable text form used for storage.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Deluxe => "deluxe",
            Self::Suite => "suite",
            Self::Executive => "executive",
            Self::Presidential => "presidential",
        }
    }

    /// Decodes the stable text form.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidStoredValue`] for unknown text.
    pub fn parse(value: &str) -> Result<Self> {
        match value {
            "standard" => Ok(Self::Standard),
            "deluxe" => Ok(Self::Deluxe),
            "suite" => Ok(Self::Suite),
            "executive" => Ok(Self::Executive),
            "presidential" => Ok(Self::Presidential),
            _ => Err(Error::InvalidStoredValue {
                kind: "room type",
                value: value.to_string(),
            }),
        }
    }
}

impl fmt::Display for RoomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bed configuration of a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BedType {
    /// Single bed.
    Single,
    /// Double bed.
    Double,
    /// Queen-size bed.
    Queen,
    /// King-size bed.
    King,
    /// Twin beds.
    Twin,
}

impl BedType {
    /// Price multiplier for this bed configuration.
    #[must_use]
    pub fn multiplier(self) -> Decimal {
        match self {
            Self::Single => Decimal::new(105, 2),
            Self::Double => Decimal::new(110, 2),
            Self::Queen => Decimal::new(120, 2),
            Self::King => Decimal::new(125, 2),
            Self::Twin => Decimal::new(135, 2),
        }
    }

    /// Stable text form used for storage.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::Double => "double",
            Self::Queen => "queen",
            Self::King => "king",
            Self::Twin => "twin",
        }
    }

    /// Decodes the stable text form.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidStoredValue`] for unknown text.
    pub fn parse(value: &str) -> Result<Self> {
        match value {
            "single" => Ok(Self::Single),
            "double" => Ok(Self::Double),
            "queen" => Ok(Self::Queen),
            "king" => Ok(Self::King),
            "twin" => Ok(Self::Twin),
            _ => Err(Error::InvalidStoredValue {
                kind: "bed type",
                value: value.to_string(),
            }),
        }
    }
}

impl fmt::Display for BedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Cached occupancy state of a room.
///
/// This is a denormalized projection of the room's booking periods,
/// maintained inside the same transactions that change those periods.
/// Availability checks never consult it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomState {
    /// No active booking period.
    Free,
    /// Held by an active reservation.
    Reserved,
    /// Administratively blocked.
    Blocked,
    /// Out of service.
    Maintenance,
}

impl RoomState {
    /// Stable text form used for storage.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Reserved => "reserved",
            Self::Blocked => "blocked",
            Self::Maintenance => "maintenance",
        }
    }

    /// Decodes the stable text form.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidStoredValue`] for unknown text.
    pub fn parse(value: &str) -> Result<Self> {
        match value {
            "free" => Ok(Self::Free),
            "reserved" => Ok(Self::Reserved),
            "blocked" => Ok(Self::Blocked),
            "maintenance" => Ok(Self::Maintenance),
            _ => Err(Error::InvalidStoredValue {
                kind: "room state",
                value: value.to_string(),
            }),
        }
    }
}

impl fmt::Display for RoomState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Input for creating a room. The nightly price is not part of the input;
/// it is computed from these attributes at creation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRoom {
    /// Hotel floor, numbered from 1.
    pub floor: i32,
    /// Number of beds, 1 to 4.
    pub number_of_beds: i64,
    /// Bed configuration.
    pub bed_type: BedType,
    /// How many people the room accommodates, 1 to 4.
    pub people_capacity: i64,
    /// Room category.
    pub room_type: RoomType,
}

impl NewRoom {
    /// Validates floor, capacity, and the bed-count rules.
    ///
    /// Bed-count rules: bed count is always 1 to 4; King and Queen rooms
    /// have exactly one bed; Double rooms at most two.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidFloor`], [`Error::InvalidCapacity`], or
    /// [`Error::Validation`] describing the first rule violated.
    pub fn validate(&self) -> Result<()> {
        if self.floor < 1 {
            return Err(Error::InvalidFloor { floor: self.floor });
        }
        if !(1..=4).contains(&self.people_capacity) {
            return Err(Error::InvalidCapacity {
                capacity: self.people_capacity,
            });
        }
        if !(1..=4).contains(&self.number_of_beds) {
            return Err(Error::Validation {
                field: "number_of_beds".to_string(),
                message: format!("a room has 1 to 4 beds, got {}", self.number_of_beds),
            });
        }
        match self.bed_type {
            BedType::King | BedType::Queen if self.number_of_beds != 1 => {
                Err(Error::Validation {
                    field: "number_of_beds".to_string(),
                    message: format!("{} rooms have exactly one bed", self.bed_type),
                })
            }
            BedType::Double if self.number_of_beds > 2 => Err(Error::Validation {
                field: "number_of_beds".to_string(),
                message: "double rooms have at most two beds".to_string(),
            }),
            _ => Ok(()),
        }
    }
}

/// A stored room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    id: RoomId,
    floor: i32,
    number_of_beds: i64,
    bed_type: BedType,
    people_capacity: i64,
    room_type: RoomType,
    price_per_night: Decimal,
    state: RoomState,
    times_booked: i64,
}

impl Room {
    /// Assembles a room from stored fields.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub const fn new(
        id: RoomId,
        floor: i32,
        number_of_beds: i64,
        bed_type: BedType,
        people_capacity: i64,
        room_type: RoomType,
        price_per_night: Decimal,
        state: RoomState,
        times_booked: i64,
    ) -> Self {
        Self {
            id,
            floor,
            number_of_beds,
            bed_type,
            people_capacity,
            room_type,
            price_per_night,
            state,
            times_booked,
        }
    }

    /// The room's row id.
    #[must_use]
    pub const fn id(&self) -> RoomId {
        self.id
    }

    /// Hotel floor, numbered from 1.
    #[must_use]
    pub const fn floor(&self) -> i32 {
        self.floor
    }

    /// Number of beds.
    #[must_use]
    pub const fn number_of_beds(&self) -> i64 {
        self.number_of_beds
    }

    /// Bed configuration.
    #[must_use]
    pub const fn bed_type(&self) -> BedType {
        self.bed_type
    }

    /// How many people the room accommodates.
    #[must_use]
    pub const fn people_capacity(&self) -> i64 {
        self.people_capacity
    }

    /// Room category.
    #[must_use]
    pub const fn room_type(&self) -> RoomType {
        self.room_type
    }

    /// Price per night, fixed at creation.
    #[must_use]
    pub const fn price_per_night(&self) -> Decimal {
        self.price_per_night
    }

    /// Cached occupancy state.
    #[must_use]
    pub const fn state(&self) -> RoomState {
        self.state
    }

    /// How many reservations this room has received.
    #[must_use]
    pub const fn times_booked(&self) -> i64 {
        self.times_booked
    }
}
