//! Shared layout helpers for popups and overlays

pub mod popup;
