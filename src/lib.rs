//! FactShield library.
//!
//! A small content site: a public post listing with an admin dashboard,
//! backed by one of several interchangeable post stores (SQLite, a local
//! JSON store reconciled with seed data, a remote HTTP backend, or a
//! fixed read-only collection).

pub mod auth;
pub mod components;
pub mod config;
pub mod constants;
pub mod db;
pub mod store;
pub mod web;
