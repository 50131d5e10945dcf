//! Room: a listing owned by a user, filed under a category, offering amenities.
//!
//! A [`Room`] only stores references (owner, category, amenity ids). The
//! expanded wire forms, [`RoomSummary`] for lists and [`RoomDetail`] for single
//! rooms, are assembled by the application layer once the referenced records
//! have been loaded.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::amenity::Amenity;
use crate::category::Category;
use crate::error::{FieldErrors, RoomHubError, ValidationError};
use crate::id::{AmenityId, CategoryId, RoomId, UserId};
use crate::time::{Timestamp, now};
use crate::user::User;

pub const NAME_MAX: usize = 180;
pub const COUNTRY_MAX: usize = 50;
pub const CITY_MAX: usize = 80;
pub const ADDRESS_MAX: usize = 250;

pub const DEFAULT_COUNTRY: &str = "한국";
pub const DEFAULT_CITY: &str = "서울";

/// How much of the place the guest gets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomKind {
    EntirePlace,
    PrivateRoom,
    SharedRoom,
}

impl RoomKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::EntirePlace => "entire_place",
            Self::PrivateRoom => "private_room",
            Self::SharedRoom => "shared_room",
        }
    }
}

impl fmt::Display for RoomKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown room kind string.
#[derive(Debug, thiserror::Error)]
#[error("unknown room kind: {0}")]
pub struct UnknownRoomKind(String);

impl FromStr for RoomKind {
    type Err = UnknownRoomKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "entire_place" => Ok(Self::EntirePlace),
            "private_room" => Ok(Self::PrivateRoom),
            "shared_room" => Ok(Self::SharedRoom),
            other => Err(UnknownRoomKind(other.to_string())),
        }
    }
}

/// A bookable listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    pub id: RoomId,
    pub owner_id: UserId,
    pub category_id: CategoryId,
    /// Attached amenities in attachment order, without duplicates.
    pub amenity_ids: Vec<AmenityId>,
    pub name: String,
    pub country: String,
    pub city: String,
    pub price: u32,
    pub rooms: u32,
    pub toilets: u32,
    pub description: String,
    pub address: String,
    pub pet_friendly: bool,
    pub kind: RoomKind,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Descriptive room fields as supplied by a caller.
///
/// On creation every field without a default must be present; on update only
/// the supplied fields are merged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoomFields {
    pub name: Option<String>,
    pub country: Option<String>,
    pub city: Option<String>,
    pub price: Option<u32>,
    pub rooms: Option<u32>,
    pub toilets: Option<u32>,
    pub description: Option<String>,
    pub address: Option<String>,
    pub pet_friendly: Option<bool>,
    pub kind: Option<RoomKind>,
}

fn required<T>(field: &'static str, value: Option<T>) -> Result<T, ValidationError> {
    value.ok_or(ValidationError::Missing { field })
}

impl RoomFields {
    /// Check that these fields can create a room: every field without a
    /// default is present and every supplied text fits its limit.
    ///
    /// # Errors
    ///
    /// Returns [`RoomHubError::Validation`] naming every offending field.
    pub fn validate_new(&self) -> Result<(), RoomHubError> {
        let mut errors = FieldErrors::default();
        check_text(&mut errors, "name", self.name.as_deref(), NAME_MAX, true);
        check_text(&mut errors, "country", self.country.as_deref(), COUNTRY_MAX, false);
        check_text(&mut errors, "city", self.city.as_deref(), CITY_MAX, false);
        check_present(&mut errors, "price", self.price.as_ref());
        check_present(&mut errors, "rooms", self.rooms.as_ref());
        check_present(&mut errors, "toilets", self.toilets.as_ref());
        check_text(
            &mut errors,
            "description",
            self.description.as_deref(),
            usize::MAX,
            true,
        );
        check_text(&mut errors, "address", self.address.as_deref(), ADDRESS_MAX, true);
        check_present(&mut errors, "kind", self.kind.as_ref());
        errors.into_result()?;
        Ok(())
    }
}

fn check_present<T>(errors: &mut FieldErrors, field: &'static str, value: Option<&T>) {
    if value.is_none() {
        errors.push(ValidationError::Missing { field });
    }
}

fn check_text(
    errors: &mut FieldErrors,
    field: &'static str,
    value: Option<&str>,
    max: usize,
    mandatory: bool,
) {
    match value {
        Some(value) => errors.check(ValidationError::check_required(field, value, max)),
        None if mandatory => errors.push(ValidationError::Missing { field }),
        None => {}
    }
}

impl Room {
    /// Create a new room owned by `owner_id` and filed under `category_id`.
    ///
    /// `country`, `city`, and `pet_friendly` fall back to their defaults; every
    /// other descriptive field is required. The category kind is not checked
    /// here since the room only holds the id.
    ///
    /// # Errors
    ///
    /// Returns [`RoomHubError::Validation`] when a required field is missing
    /// or a text field is blank or too long.
    pub fn new(
        owner_id: UserId,
        category_id: CategoryId,
        fields: RoomFields,
    ) -> Result<Self, RoomHubError> {
        fields.validate_new()?;
        let created_at = now();
        let room = Self {
            id: RoomId::new(),
            owner_id,
            category_id,
            amenity_ids: Vec::new(),
            name: required("name", fields.name)?,
            country: fields
                .country
                .unwrap_or_else(|| DEFAULT_COUNTRY.to_string()),
            city: fields.city.unwrap_or_else(|| DEFAULT_CITY.to_string()),
            price: required("price", fields.price)?,
            rooms: required("rooms", fields.rooms)?,
            toilets: required("toilets", fields.toilets)?,
            description: required("description", fields.description)?,
            address: required("address", fields.address)?,
            pet_friendly: fields.pet_friendly.unwrap_or(true),
            kind: required("kind", fields.kind)?,
            created_at,
            updated_at: created_at,
        };
        room.validate()?;
        Ok(room)
    }

    /// Check domain invariants on the descriptive fields.
    ///
    /// # Errors
    ///
    /// Returns [`RoomHubError::Validation`] naming every offending field.
    pub fn validate(&self) -> Result<(), RoomHubError> {
        let mut errors = FieldErrors::default();
        errors.check(ValidationError::check_required("name", &self.name, NAME_MAX));
        errors.check(ValidationError::check_required("country", &self.country, COUNTRY_MAX));
        errors.check(ValidationError::check_required("city", &self.city, CITY_MAX));
        errors.check(ValidationError::check_required(
            "description",
            &self.description,
            usize::MAX,
        ));
        errors.check(ValidationError::check_required("address", &self.address, ADDRESS_MAX));
        errors.into_result()?;
        Ok(())
    }

    /// Merge the supplied descriptive fields and re-validate.
    ///
    /// # Errors
    ///
    /// Returns [`RoomHubError::Validation`] if the merged room is invalid;
    /// `self` is left unchanged in that case.
    pub fn apply(&mut self, fields: RoomFields) -> Result<(), RoomHubError> {
        let mut next = self.clone();
        if let Some(name) = fields.name {
            next.name = name;
        }
        if let Some(country) = fields.country {
            next.country = country;
        }
        if let Some(city) = fields.city {
            next.city = city;
        }
        if let Some(price) = fields.price {
            next.price = price;
        }
        if let Some(rooms) = fields.rooms {
            next.rooms = rooms;
        }
        if let Some(toilets) = fields.toilets {
            next.toilets = toilets;
        }
        if let Some(description) = fields.description {
            next.description = description;
        }
        if let Some(address) = fields.address {
            next.address = address;
        }
        if let Some(pet_friendly) = fields.pet_friendly {
            next.pet_friendly = pet_friendly;
        }
        if let Some(kind) = fields.kind {
            next.kind = kind;
        }
        next.validate()?;
        next.updated_at = now();
        *self = next;
        Ok(())
    }

    /// Replace the attached amenities, keeping the first occurrence of each id.
    pub fn set_amenities(&mut self, ids: impl IntoIterator<Item = AmenityId>) {
        let mut seen = HashSet::new();
        self.amenity_ids = ids.into_iter().filter(|id| seen.insert(*id)).collect();
    }

    /// Whether `user` owns this room.
    #[must_use]
    pub fn is_owned_by(&self, user: &User) -> bool {
        self.owner_id == user.id
    }
}

/// List form of a room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomSummary {
    pub id: RoomId,
    pub name: String,
    pub country: String,
    pub city: String,
    pub price: u32,
}

impl From<Room> for RoomSummary {
    fn from(room: Room) -> Self {
        Self {
            id: room.id,
            name: room.name,
            country: room.country,
            city: room.city,
            price: room.price,
        }
    }
}

/// Detail form of a room with its owner, category, and amenities expanded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoomDetail {
    pub id: RoomId,
    pub owner: User,
    pub category: Category,
    pub amenities: Vec<Amenity>,
    pub name: String,
    pub country: String,
    pub city: String,
    pub price: u32,
    pub rooms: u32,
    pub toilets: u32,
    pub description: String,
    pub address: String,
    pub pet_friendly: bool,
    pub kind: RoomKind,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl RoomDetail {
    /// Combine a room with its loaded references.
    ///
    /// `amenities` is expected in the room's attachment order.
    #[must_use]
    pub fn new(room: Room, owner: User, category: Category, amenities: Vec<Amenity>) -> Self {
        Self {
            id: room.id,
            owner,
            category,
            amenities,
            name: room.name,
            country: room.country,
            city: room.city,
            price: room.price,
            rooms: room.rooms,
            toilets: room.toilets,
            description: room.description,
            address: room.address,
            pet_friendly: room.pet_friendly,
            kind: room.kind,
            created_at: room.created_at,
            updated_at: room.updated_at,
        }
    }
}
