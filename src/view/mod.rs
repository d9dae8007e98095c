//! View regions and the controls a rendering exposes.

/// HTML renderers for the song list, artist detail and creation form
pub mod render;

use crate::clients::entities::{ArtistId, SongId};

pub use render::EMPTY_SONG_LIST;

/// Id of the region holding the song list or the artist detail.
pub const SONG_CONTAINER: &str = "song-container";
/// Id of the region holding the creation form.
pub const NEW_SONG_FORM: &str = "new-song-form";

/// A region of the page whose whole content a renderer replaces.
pub trait ViewTarget {
    /// Discard the current content and install `html`.
    fn replace(&mut self, html: String);
}

/// In-memory view region.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Region {
    id: String,
    html: String,
    renders: usize,
}

impl Region {
    pub fn new(id: impl Into<String>) -> Self {
        Region {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn html(&self) -> &str {
        &self.html
    }

    /// How many times the content has been replaced.
    pub fn renders(&self) -> usize {
        self.renders
    }

    /// The region wrapped in its container element.
    pub fn to_document(&self) -> String {
        format!("<div id=\"{}\">{}</div>", self.id, self.html)
    }
}

impl ViewTarget for Region {
    fn replace(&mut self, html: String) {
        self.html = html;
        self.renders += 1;
    }
}

/// Something a user can act on in the current rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    /// `button.delete-button[data-id]`
    DeleteSong(SongId),
    /// `a.artist-link[data-id]`
    ArtistLink(ArtistId),
    /// `button.back-button`
    Back,
    /// submit of the song form
    SubmitSong,
    /// submit of `form.new-genre-form`
    AddGenre,
    /// submit of `form.new-artist-form`
    AddArtist,
}

impl std::fmt::Display for Control {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Control::DeleteSong(id) => write!(f, "delete button for song {id}"),
            Control::ArtistLink(id) => write!(f, "link to artist {id}"),
            Control::Back => f.write_str("back button"),
            Control::SubmitSong => f.write_str("add song form"),
            Control::AddGenre => f.write_str("new genre form"),
            Control::AddArtist => f.write_str("new artist form"),
        }
    }
}

/// Escape text for use in element content and quoted attribute values.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
