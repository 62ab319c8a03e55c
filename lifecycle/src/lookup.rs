//! Store lookups that surface missing rows as typed `NotFound` errors.

use crate::error::{CoreError, EntityKind};
use podium_store::{EventRecord, PresentationRecord, Store, StoreError};
use podium_types::{EventId, PresentationId};

pub(crate) fn event(store: &dyn Store, id: &EventId) -> Result<EventRecord, CoreError> {
    store.get_event(id).map_err(|e| match e {
        StoreError::NotFound(_) => CoreError::not_found(EntityKind::Event, id.as_str()),
        other => CoreError::Store(other),
    })
}

pub(crate) fn presentation(
    store: &dyn Store,
    id: &PresentationId,
) -> Result<PresentationRecord, CoreError> {
    store.get_presentation(id).map_err(|e| match e {
        StoreError::NotFound(_) => CoreError::not_found(EntityKind::Presentation, id.as_str()),
        other => CoreError::Store(other),
    })
}
