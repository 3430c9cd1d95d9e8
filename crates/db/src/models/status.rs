//! Enum helpers mapping to SMALLSERIAL/SMALLINT lookup tables.
//!
//! Each enum variant's discriminant matches the seed data order (1-based)
//! in the corresponding lookup table from `db/migrations`. The domain
//! enums in `memopark-core` carry the API-facing names; conversions in
//! both directions live here so storage ids never leak past this crate.

use memopark_core::parking::{ParkingStatus, ParkingType};

/// Status ID type matching SMALLINT/SMALLSERIAL in the database.
pub type StatusId = i16;

macro_rules! define_lookup_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident = $val:expr ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[repr(i16)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub enum $name {
            $( $(#[$vmeta])* $variant = $val ),+
        }

        impl $name {
            /// Return the database lookup id.
            pub fn id(self) -> StatusId {
                self as StatusId
            }

            /// Resolve a database lookup id back to a variant.
            pub fn from_id(id: StatusId) -> Option<Self> {
                match id {
                    $( x if x == $val => Some(Self::$variant), )+
                    _ => None,
                }
            }
        }

        impl From<$name> for StatusId {
            fn from(value: $name) -> Self {
                value as StatusId
            }
        }
    };
}

define_lookup_enum! {
    /// Parking-event lifecycle status (`parking_event_statuses` table).
    ParkingEventStatus {
        Active = 1,
        Retrieving = 2,
        Retrieved = 3,
        ScoreWatched = 4,
        Expired = 5,
    }
}

define_lookup_enum! {
    /// Parking location kind (`parking_types` table).
    ParkingLocationType {
        Outside = 1,
        InsideBuilding = 2,
    }
}

define_lookup_enum! {
    /// User account kind (`user_types` table).
    UserType {
        Admin = 1,
        User = 2,
    }
}

impl ParkingEventStatus {
    /// Convert the domain state into its storage variant.
    pub fn from_domain(status: ParkingStatus) -> Self {
        match status {
            ParkingStatus::Active => Self::Active,
            ParkingStatus::Retrieving => Self::Retrieving,
            ParkingStatus::Retrieved => Self::Retrieved,
            ParkingStatus::ScoreWatched => Self::ScoreWatched,
            ParkingStatus::Expired => Self::Expired,
        }
    }

    /// Convert the storage variant into the domain state.
    pub fn to_domain(self) -> ParkingStatus {
        match self {
            Self::Active => ParkingStatus::Active,
            Self::Retrieving => ParkingStatus::Retrieving,
            Self::Retrieved => ParkingStatus::Retrieved,
            Self::ScoreWatched => ParkingStatus::ScoreWatched,
            Self::Expired => ParkingStatus::Expired,
        }
    }
}

impl ParkingLocationType {
    pub fn from_domain(kind: ParkingType) -> Self {
        match kind {
            ParkingType::Outside => Self::Outside,
            ParkingType::InsideBuilding => Self::InsideBuilding,
        }
    }

    pub fn to_domain(self) -> ParkingType {
        match self {
            Self::Outside => ParkingType::Outside,
            Self::InsideBuilding => ParkingType::InsideBuilding,
        }
    }
}
