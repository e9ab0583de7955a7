//! Board-agnostic core logic for the Fahrtafel departure board
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Hardware abstraction traits (network, HTTP, storage, clock, system)
//! - Local time resolution (CET/CEST without a timezone database)
//! - Connectivity state management with bounded reconnects
//! - Live and offline schedule acquisition
//! - The crash-safe daily dataset self-update
//! - The cooperative main controller loop
//!
//! Board bring-up (Wi-Fi radio, panel driver, flash filesystem, RTC/NTP,
//! reset line) lives out of tree and plugs in through the traits; the
//! `hal::mock` implementations allow running the whole controller on a
//! desktop.

#![no_std]
#![deny(unsafe_code)]

pub mod clock;
pub mod config;
pub mod controller;
pub mod hal;
pub mod net;
pub mod schedule;
pub mod traits;
pub mod update;
