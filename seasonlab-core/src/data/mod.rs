//! Data access boundary: provider traits and the in-memory implementation.

pub mod memory;
pub mod provider;

pub use memory::StaticData;
pub use provider::{
    EventFilter, EventOccurrenceProvider, PriceSeriesProvider, ProviderError,
};
