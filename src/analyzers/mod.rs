//! Trip statistics over a filtered working subset.
//!
//! Every aggregator is a pure function of the table it receives: busiest
//! times, busiest stations, trip durations and rider demographics. The
//! `report` module bundles them into a [`types::TripReport`].

pub mod demographics;
pub mod duration;
pub mod frequency;
pub mod report;
pub mod stations;
pub mod types;
pub mod utility;
