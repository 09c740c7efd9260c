//! Nightly price calculation.
//!
//! Prices are pure functions of a room's attributes, computed once when
//! the room is created. All arithmetic is exact decimal arithmetic.

use rust_decimal::Decimal;

use crate::error::{Error, Result};
use crate::room::{BedType, RoomType};

/// Floors above this one all share the top floor factor.
pub const FLOOR_FACTOR_CAP: i32 = 15;

/// Base nightly price before any multipliers.
#[must_use]
pub fn base_nightly_price() -> Decimal {
    Decimal::new(20, 0)
}

/// Floor factor: `1 + floor/100` for floors 1 to 15, `1.15` above.
///
/// # Errors
///
/// Returns [`Error::InvalidFloor`] for floors below 1.
pub fn floor_factor(floor: i32) -> Result<Decimal> {
    if floor < 1 {
        return Err(Error::InvalidFloor { floor });
    }
    if floor > FLOOR_FACTOR_CAP {
        return Ok(Decimal::new(115, 2));
    }
    Ok(Decimal::ONE + Decimal::new(i64::from(floor), 2))
}

/// Capacity factor for rooms holding 1 to 4 people.
///
/// # Errors
///
/// Returns [`Error::InvalidCapacity`] for any other capacity.
pub fn capacity_factor(people_capacity: i64) -> Result<Decimal> {
    match people_capacity {
        1 => Ok(Decimal::new(110, 2)),
        2 => Ok(Decimal::new(118, 2)),
        3 => Ok(Decimal::new(125, 2)),
        4 => Ok(Decimal::new(133, 2)),
        capacity => Err(Error::InvalidCapacity { capacity }),
    }
}

/// Computes a room's nightly price from its attributes.
///
/// The price is the base price scaled by the room type, bed type, floor,
/// and capacity factors.
///
/// # Errors
///
/// Returns [`Error::InvalidFloor`] or [`Error::InvalidCapacity`] when the
/// attributes are out of range.
///
/// # Examples
///
/// ```
/// use innkeep::pricing::nightly_price;
/// use innkeep::{BedType, RoomType};
/// use rust_decimal::Decimal;
///
/// let price = nightly_price(RoomType::Standard, BedType::Single, 5, 2).unwrap();
/// // 20 x 1.10 x 1.05 x 1.05 x 1.18
/// assert_eq!(price, "28.6209".parse::<Decimal>().unwrap());
/// ```
pub fn nightly_price(
    room_type: RoomType,
    bed_type: BedType,
    floor: i32,
    people_capacity: i64,
) -> Result<Decimal> {
    let price = base_nightly_price()
        * room_type.multiplier()
        * bed_type.multiplier()
        * floor_factor(floor)?
        * capacity_factor(people_capacity)?;
    Ok(price)
}

/// Total price for a stay: nightly price times the number of nights.
///
/// # Errors
///
/// Returns [`Error::Validation`] when `nights` is below 1.
pub fn total_price(nightly: Decimal, nights: i64) -> Result<Decimal> {
    if nights < 1 {
        return Err(Error::Validation {
            field: "nights".to_string(),
            message: format!("a stay is at least one night, got {nights}"),
        });
    }
    Ok(nightly * Decimal::from(nights))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_floor_factor_in_range() {
        assert_eq!(floor_factor(1).unwrap(), dec("1.01"));
        assert_eq!(floor_factor(7).unwrap(), dec("1.07"));
        assert_eq!(floor_factor(15).unwrap(), dec("1.15"));
    }

    #[test]
    fn test_floor_factor_capped_above_fifteen() {
        assert_eq!(floor_factor(16).unwrap(), dec("1.15"));
        assert_eq!(floor_factor(40).unwrap(), dec("1.15"));
    }

    #[test]
    fn test_floor_factor_rejects_nonpositive() {
        assert!(matches!(
            floor_factor(0),
            Err(Error::InvalidFloor { floor: 0 })
        ));
        assert!(floor_factor(-3).is_err());
    }

    #[test]
    fn test_capacity_factor_table() {
        assert_eq!(capacity_factor(1).unwrap(), dec("1.10"));
        assert_eq!(capacity_factor(2).unwrap(), dec("1.18"));
        assert_eq!(capacity_factor(3).unwrap(), dec("1.25"));
        assert_eq!(capacity_factor(4).unwrap(), dec("1.33"));
    }

    #[test]
    fn test_capacity_factor_rejects_out_of_range() {
        assert!(matches!(
            capacity_factor(0),
            Err(Error::InvalidCapacity { capacity: 0 })
        ));
        assert!(capacity_factor(5).is_err());
    }

    #[test]
    fn test_nightly_price_exact() {
        // 20 x 1.10 x 1.05 x 1.05 x 1.18 = 28.6209
        let price = nightly_price(RoomType::Standard, BedType::Single, 5, 2).unwrap();
        assert_eq!(price, dec("28.6209"));

        // 20 x 1.45 x 1.25 x 1.15 x 1.33 = 55.429375
        let price = nightly_price(RoomType::Presidential, BedType::King, 20, 4).unwrap();
        assert_eq!(price, dec("55.429375"));
    }

    #[test]
    fn test_nightly_price_deterministic() {
        let a = nightly_price(RoomType::Suite, BedType::Queen, 9, 3).unwrap();
        let b = nightly_price(RoomType::Suite, BedType::Queen, 9, 3).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_nightly_price_propagates_attribute_errors() {
        assert!(nightly_price(RoomType::Standard, BedType::Single, 0, 2).is_err());
        assert!(nightly_price(RoomType::Standard, BedType::Single, 2, 9).is_err());
    }

    #[test]
    fn test_price_monotonic_in_floor_until_cap() {
        let mut last = Decimal::ZERO;
        for floor in 1..=FLOOR_FACTOR_CAP {
            let price = nightly_price(RoomType::Deluxe, BedType::Double, floor, 2).unwrap();
            assert!(price > last, "price must rise with floor {floor}");
            last = price;
        }
        let above_cap = nightly_price(RoomType::Deluxe, BedType::Double, 16, 2).unwrap();
        assert_eq!(above_cap, last);
    }

    #[test]
    fn test_total_price() {
        assert_eq!(total_price(dec("28.6209"), 4).unwrap(), dec("114.4836"));
        assert_eq!(total_price(dec("10"), 1).unwrap(), dec("10"));
    }

    #[test]
    fn test_total_price_rejects_zero_nights() {
        assert!(total_price(dec("10"), 0).is_err());
        assert!(total_price(dec("10"), -2).is_err());
    }

    #[cfg(feature = "property-tests")]
    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn floor_factor_never_exceeds_cap(floor in 1i32..1000) {
                let factor = floor_factor(floor).unwrap();
                prop_assert!(factor <= dec("1.15"));
                prop_assert!(factor >= dec("1.01"));
            }

            #[test]
            fn nightly_price_is_positive(floor in 1i32..100, capacity in 1i64..=4) {
                let price = nightly_price(
                    RoomType::Standard,
                    BedType::Single,
                    floor,
                    capacity,
                ).unwrap();
                prop_assert!(price > Decimal::ZERO);
            }
        }
    }
}
