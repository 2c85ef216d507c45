//! Event logging domain logic: the entry form's submit path, the raw table
//! listing, and the admin bulk edit.

use anyhow::Result;
use chrono::{Local, Timelike};
use tracing::info;

use crate::backend::domain::models::event::Event;
use crate::backend::io::rest::mappers::event_mapper::EventMapper;
use crate::backend::storage::{Connection, EventStorage};
use shared::{
    CreateEventRequest, CreateEventResponse, EventListResponse, ReplaceEventsRequest,
    ReplaceEventsResponse,
};

#[derive(Clone)]
pub struct EventService<C: Connection> {
    event_repository: C::EventRepository,
}

impl<C: Connection> EventService<C> {
    pub fn new(connection: &C) -> Self {
        Self {
            event_repository: connection.create_event_repository(),
        }
    }

    /// Log one new event.
    ///
    /// The timestamp defaults to the current local time truncated to whole
    /// seconds; the payload is validated against the activity and normalized
    /// before it reaches storage.
    pub async fn log_event(&self, request: CreateEventRequest) -> Result<CreateEventResponse> {
        let timestamp = match &request.timestamp {
            Some(raw) => Event::parse_timestamp(raw)?,
            None => {
                let now = Local::now().naive_local();
                now.with_nanosecond(0).unwrap_or(now)
            }
        };

        let event = Event::new(
            timestamp,
            request.activity,
            request.amount_ml,
            request.weight_kg,
            request.length_cm,
        )?;

        let table = self.event_repository.append_event(&event).await?;
        info!(
            "Logged {} event, table now holds {} rows",
            event.activity,
            table.len()
        );

        let success_message = match event.value() {
            Some(value) => format!(
                "Recorded: {} of {} on {}",
                event.activity,
                value,
                event.format_timestamp()
            ),
            None => format!("Recorded: {} on {}", event.activity, event.format_timestamp()),
        };

        Ok(CreateEventResponse {
            event: EventMapper::to_dto(event),
            success_message,
        })
    }

    /// Full event table, newest first
    pub async fn list_events(&self) -> Result<EventListResponse> {
        let events = self.event_repository.load_events().await?;
        Ok(EventListResponse {
            events: events.into_iter().map(EventMapper::to_dto).collect(),
        })
    }

    /// Admin bulk edit: re-validate every submitted row and overwrite the
    /// whole table with the result.
    pub async fn replace_events(
        &self,
        request: ReplaceEventsRequest,
    ) -> Result<ReplaceEventsResponse> {
        let mut events = Vec::with_capacity(request.events.len());
        for dto in &request.events {
            events.push(EventMapper::to_domain(dto)?);
        }

        self.event_repository.replace_events(&events).await?;
        info!("Admin edit replaced event table with {} rows", events.len());

        Ok(ReplaceEventsResponse {
            count: events.len(),
            success_message: "Changes saved successfully".to_string(),
        })
    }
}
