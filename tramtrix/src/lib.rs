//! Tram traffic light.
//!
//! Polls the OJP trip planner for the next trams between two stops and
//! shows one GREEN/AMBER/RED colored label per line on an AWTRIX clock.

pub mod awtrix;
pub mod config;
pub mod domain;
pub mod ojp;
pub mod poller;
pub mod traffic_light;
