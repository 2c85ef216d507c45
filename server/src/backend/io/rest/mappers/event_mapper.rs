//! Conversion between domain events and their wire representation.

use crate::backend::domain::models::event::{Event as DomainEvent, EventValidationError};
use shared::Event as EventDto;

pub struct EventMapper;

impl EventMapper {
    /// Convert a domain event to its DTO representation
    pub fn to_dto(event: DomainEvent) -> EventDto {
        EventDto {
            timestamp: event.format_timestamp(),
            activity: event.activity.clone(),
            amount_ml: event.amount_ml,
            weight_kg: event.weight_kg,
            length_cm: event.length_cm,
        }
    }

    /// Convert a wire event back into a validated, normalized domain event
    pub fn to_domain(dto: &EventDto) -> Result<DomainEvent, EventValidationError> {
        let timestamp = DomainEvent::parse_timestamp(&dto.timestamp)?;
        DomainEvent::new(
            timestamp,
            dto.activity.clone(),
            dto.amount_ml,
            dto.weight_kg,
            dto.length_cm,
        )
    }
}
