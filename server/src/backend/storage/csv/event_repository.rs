//! CSV-backed event table.
//!
//! The table is one flat `history.csv`. Because rows are kept sorted by
//! timestamp descending, every mutation loads the whole file, rewrites it to
//! a temp file, and renames it into place; there is no true append path.

use anyhow::{Context, Result};
use async_trait::async_trait;
use csv::{Reader, StringRecord, Writer};
use std::fs::{File, OpenOptions};
use std::io::{BufReader, BufWriter};
use tracing::info;

use super::connection::CsvConnection;
use crate::backend::domain::models::event::Event;
use crate::backend::storage::EventStorage;
use shared::Activity;

/// CSV-based event repository
#[derive(Clone)]
pub struct EventRepository {
    connection: CsvConnection,
}

impl EventRepository {
    pub fn new(connection: CsvConnection) -> Self {
        Self { connection }
    }

    /// Read all events from the CSV file, in file order
    fn read_events(&self) -> Result<Vec<Event>> {
        self.connection.ensure_events_file_exists()?;

        let file_path = self.connection.events_file_path();
        let file = File::open(&file_path)?;
        let reader = BufReader::new(file);
        let mut csv_reader = Reader::from_reader(reader);

        let mut events = Vec::new();

        for (index, result) in csv_reader.records().enumerate() {
            let record = result?;
            // Header is line 1, so the first record is line 2
            let event = Self::parse_record(&record)
                .with_context(|| format!("row {} of {}", index + 2, file_path.display()))?;
            events.push(event);
        }

        Ok(events)
    }

    /// Parse one CSV record into an event.
    ///
    /// The timestamp must match the fixed format: a malformed timestamp is
    /// an error rather than a dropped row, because a dropped row would be
    /// deleted from disk by the next read-modify-write. Numeric cells are
    /// lenient; anything unparseable or zero counts as "not recorded".
    fn parse_record(record: &StringRecord) -> Result<Event> {
        let raw_timestamp = record.get(0).unwrap_or("");
        let timestamp = Event::parse_timestamp(raw_timestamp)
            .with_context(|| format!("invalid Date-Time value '{}'", raw_timestamp))?;

        let activity = Activity::from_label(record.get(1).unwrap_or("").trim());

        let amount_ml = record
            .get(2)
            .and_then(|v| v.trim().parse::<f64>().ok())
            .filter(|&ml| ml > 0.0)
            .map(|ml| ml.round() as u32);
        let weight_kg = record
            .get(3)
            .and_then(|v| v.trim().parse::<f64>().ok())
            .filter(|&kg| kg > 0.0);
        let length_cm = record
            .get(4)
            .and_then(|v| v.trim().parse::<f64>().ok())
            .filter(|&cm| cm > 0.0);

        Ok(Event {
            timestamp,
            activity,
            amount_ml,
            weight_kg,
            length_cm,
        })
    }

    /// Write the whole table back to the CSV file
    fn write_events(&self, events: &[Event]) -> Result<()> {
        let file_path = self.connection.events_file_path();

        // Temp file plus rename keeps a crashed write from tearing the table
        let temp_path = file_path.with_extension("tmp");

        {
            let file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&temp_path)?;

            let writer = BufWriter::new(file);
            let mut csv_writer = Writer::from_writer(writer);

            csv_writer.write_record(["Date-Time", "Activity", "Amount Consumed", "Weight", "Length"])?;

            for event in events {
                csv_writer.write_record([
                    event.format_timestamp(),
                    event.activity.label().to_string(),
                    event.amount_ml.map(|v| v.to_string()).unwrap_or_default(),
                    event.weight_kg.map(|v| v.to_string()).unwrap_or_default(),
                    event.length_cm.map(|v| v.to_string()).unwrap_or_default(),
                ])?;
            }

            csv_writer.flush()?;
        }

        std::fs::rename(&temp_path, &file_path)?;

        Ok(())
    }

    fn sort_newest_first(events: &mut [Event]) {
        events.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    }
}

#[async_trait]
impl EventStorage for EventRepository {
    async fn append_event(&self, event: &Event) -> Result<Vec<Event>> {
        info!(
            "Appending {} event at {}",
            event.activity,
            event.format_timestamp()
        );

        let mut events = self.read_events()?;
        events.push(event.clone());
        Self::sort_newest_first(&mut events);

        self.write_events(&events)?;

        info!("Event table now holds {} rows", events.len());
        Ok(events)
    }

    async fn load_events(&self) -> Result<Vec<Event>> {
        let mut events = self.read_events()?;
        // Storage order is whatever the last write produced; consumers
        // always get newest first
        Self::sort_newest_first(&mut events);
        Ok(events)
    }

    async fn replace_events(&self, events: &[Event]) -> Result<()> {
        info!("Replacing event table with {} rows", events.len());

        let mut rows = events.to_vec();
        Self::sort_newest_first(&mut rows);
        self.write_events(&rows)
    }
}
