//! Songbook - browse and edit a songs catalog over its REST API
//!
//! This library fetches songs, artists and genres from a remote catalog,
//! renders them as HTML fragments into explicit view regions and re-renders
//! after every action a user takes on those fragments.

/// Action dispatch and view state
pub mod app;
/// Client modules for the catalog REST API
pub mod clients;
/// Catalog API settings
pub mod config;
/// Structured input for new songs, artists and genres
pub mod dialog;
/// Artist and genre name resolution for songs
pub mod lookup;
/// Interactive command loop
pub mod shell;
/// View regions and HTML rendering
pub mod view;

#[cfg(test)]
mod testing;
