//! Pickup/delivery location selection.
//!
//! The selection is updated through discrete events by a pure reducer. While
//! `linked` is set, delivery always equals pickup and only the reducer writes it.

use serde::{Deserialize, Serialize};

/// Identifier of a delegation used as a pickup or return location
pub type LocationId = String;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationSelection {
    pub pickup: Option<LocationId>,
    pub delivery: Option<LocationId>,
    pub linked: bool,
}

/// A single user interaction with the location fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionEvent {
    PickupChanged(Option<LocationId>),
    DeliveryChanged(Option<LocationId>),
    LinkChanged(bool),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectionError {
    #[error("Return location follows the pickup location while 'same location' is checked")]
    DeliveryLinked,
}

impl LocationSelection {
    pub fn new(pickup: Option<LocationId>, delivery: Option<LocationId>, linked: bool) -> Self {
        let selection = Self {
            pickup,
            delivery,
            linked: false,
        };
        set_linked_location(selection, linked)
    }

    /// Delivery location the booking will use
    pub fn effective_delivery(&self) -> Option<&LocationId> {
        if self.linked {
            self.pickup.as_ref()
        } else {
            self.delivery.as_ref()
        }
    }
}

/// Toggle the "same location" flag.
///
/// Linking copies pickup into delivery, even when pickup is unset. Unlinking
/// leaves delivery holding its last mirrored value.
pub fn set_linked_location(selection: LocationSelection, is_linked: bool) -> LocationSelection {
    if is_linked {
        LocationSelection {
            delivery: selection.pickup.clone(),
            linked: true,
            ..selection
        }
    } else {
        LocationSelection {
            linked: false,
            ..selection
        }
    }
}

/// Apply one event to a selection.
///
/// Writing delivery directly while linked is rejected and leaves the
/// selection unchanged.
pub fn reduce(selection: LocationSelection, event: SelectionEvent) -> Result<LocationSelection, SelectionError> {
    match event {
        SelectionEvent::PickupChanged(pickup) => {
            let delivery = if selection.linked {
                pickup.clone()
            } else {
                selection.delivery
            };
            Ok(LocationSelection {
                pickup,
                delivery,
                linked: selection.linked,
            })
        }
        SelectionEvent::DeliveryChanged(_) if selection.linked => Err(SelectionError::DeliveryLinked),
        SelectionEvent::DeliveryChanged(delivery) => Ok(LocationSelection { delivery, ..selection }),
        SelectionEvent::LinkChanged(linked) => Ok(set_linked_location(selection, linked)),
    }
}
