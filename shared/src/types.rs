//! # Domain Enums
//!
//! Closed value sets shared by the backend and the client. Each enum
//! serializes to the exact label the API exposes and round-trips through
//! `Display` / `FromStr` so the store can persist it as text.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Raised when a stored or submitted label does not name a variant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {kind}: {value}")]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
}

macro_rules! labeled_enum {
    (
        $(#[$meta:meta])*
        $name:ident as $kind:literal {
            $( $(#[$vmeta:meta])* $variant:ident => $label:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $( $(#[$vmeta])* #[serde(rename = $label)] $variant ),+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Wire/storage label.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = ParseEnumError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($label => Ok($name::$variant),)+
                    _ => Err(ParseEnumError { kind: $kind, value: s.to_string() }),
                }
            }
        }

        impl TryFrom<String> for $name {
            type Error = ParseEnumError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                value.parse()
            }
        }
    };
}

labeled_enum! {
    /// Garment category of a listing.
    Category as "category" {
        Tops => "Tops",
        Bottoms => "Bottoms",
        Dresses => "Dresses",
        Outerwear => "Outerwear",
        Accessories => "Accessories",
        Footwear => "Footwear",
        Other => "Other",
    }
}

labeled_enum! {
    /// Wear condition of a listing.
    Condition as "condition" {
        NewWithTags => "New with tags",
        LikeNew => "Like new",
        Good => "Good",
        Fair => "Fair",
        Poor => "Poor",
    }
}

labeled_enum! {
    /// Intended wearer of a listing.
    Gender as "gender" {
        Men => "Men",
        Women => "Women",
        Unisex => "Unisex",
        Kids => "Kids",
    }
}

labeled_enum! {
    /// Moderation and lifecycle status of a listing.
    ///
    /// Reachable transitions: `pending -> approved | rejected`,
    /// `approved -> pending` (owner edit), `approved -> swapped` (settlement).
    ItemStatus as "item status" {
        Pending => "pending",
        Approved => "approved",
        Rejected => "rejected",
        Swapped => "swapped",
    }
}

impl ItemStatus {
    /// Only approved listings may be requested or offered in a swap.
    pub fn is_offerable(&self) -> bool {
        matches!(self, ItemStatus::Approved)
    }

    /// Whether moving from `self` to `next` is a legal listing transition.
    pub fn can_transition_to(&self, next: ItemStatus) -> bool {
        use ItemStatus::*;
        matches!(
            (self, next),
            (Pending, Approved) | (Pending, Rejected) | (Approved, Pending) | (Approved, Swapped)
        )
    }
}

labeled_enum! {
    /// Lifecycle status of a swap request.
    ///
    /// `pending` is the only entry state. `accepted` is transient and leads
    /// only to `completed`. `rejected`, `completed` and `cancelled` are terminal.
    SwapStatus as "swap status" {
        Pending => "pending",
        Accepted => "accepted",
        Rejected => "rejected",
        Completed => "completed",
        Cancelled => "cancelled",
    }
}

impl SwapStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, SwapStatus::Rejected | SwapStatus::Completed | SwapStatus::Cancelled)
    }

    /// The status a swap must currently hold for `self` to be applied as a target.
    ///
    /// Returns `None` for `pending`, which is never a valid target.
    pub fn required_current(&self) -> Option<SwapStatus> {
        match self {
            SwapStatus::Accepted | SwapStatus::Rejected | SwapStatus::Cancelled => {
                Some(SwapStatus::Pending)
            }
            SwapStatus::Completed => Some(SwapStatus::Accepted),
            SwapStatus::Pending => None,
        }
    }

    /// Whether the swap thread still accepts new messages.
    pub fn accepts_messages(&self) -> bool {
        !matches!(self, SwapStatus::Rejected | SwapStatus::Cancelled)
    }
}
