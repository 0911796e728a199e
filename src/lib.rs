//! Core library for music-tag-renamer
pub mod config;
pub mod error;
pub mod identity;
pub mod renamer;
pub mod slug;
pub mod tag_io;
pub mod track;
