//! # Base types for chesstrack
//!
//! This is an auxiliary crate for `chesstrack`, which contains coordinates, sides, piece kinds
//! and square sets. It was split from the main crate so the types stay free of any engine logic.
//!
//! Normally you don't want to use this crate directly. Use `chesstrack` instead, which re-exports
//! everything declared here.

pub mod bitboard;
pub mod geometry;
pub mod types;
