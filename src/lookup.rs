use log::debug;

use crate::clients::{CatalogApi, entities::Song, errors::Result};

/// Display names behind a song's foreign keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedNames {
    pub artist_name: String,
    pub genre_name: String,
}

/// Resolve the artist and genre names of `song`.
///
/// Issues two reads, artist first, and awaits each before the next. Nothing is
/// cached: songs sharing an artist repeat the round trip.
pub async fn resolve_names<A: CatalogApi>(api: &A, song: &Song) -> Result<ResolvedNames> {
    let artist = api.get_artist(song.artist_id).await?;
    let genre = api.get_genre(song.genre_id).await?;
    debug!(
        "Song {} resolved to artist {:?}, genre {:?}",
        song.id, artist.name, genre.name
    );
    Ok(ResolvedNames {
        artist_name: artist.name,
        genre_name: genre.name,
    })
}
