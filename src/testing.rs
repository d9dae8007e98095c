//! In-memory catalog that records every call made against it.

use std::sync::Mutex;

use reqwest::StatusCode;

use crate::clients::{
    CatalogApi, Collection,
    entities::{Artist, ArtistId, Genre, GenreId, NewArtist, NewGenre, NewSong, Song, SongId},
    errors::{Error, Result},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    ListSongs,
    GetSong(SongId),
    CreateSong(NewSong),
    DeleteSong(SongId),
    ListArtists,
    GetArtist(ArtistId),
    CreateArtist(NewArtist),
    ListGenres,
    GetGenre(GenreId),
    CreateGenre(NewGenre),
}

#[derive(Default)]
struct State {
    songs: Vec<Song>,
    artists: Vec<Artist>,
    genres: Vec<Genre>,
    calls: Vec<Call>,
    offline: bool,
    artist_listing_broken: bool,
}

#[derive(Default)]
pub struct FakeCatalog {
    state: Mutex<State>,
}

fn not_found(collection: Collection, id: u64) -> Error {
    Error::UnexpectedStatus {
        status: StatusCode::NOT_FOUND,
        url: format!("fake://{}/{id}", collection.as_str()),
    }
}

impl FakeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// One song "A" by "Artist X", genre "Pop".
    pub fn scenario() -> Self {
        Self::new()
            .with_artist(10, "Artist X")
            .with_genre(20, "Pop")
            .with_song(1, "A", 10, 20, "2020-01-01")
    }

    pub fn with_song(
        self,
        id: SongId,
        title: &str,
        artist_id: ArtistId,
        genre_id: GenreId,
        release_date: &str,
    ) -> Self {
        self.state.lock().unwrap().songs.push(Song {
            id,
            title: title.into(),
            artist_id,
            genre_id,
            release_date: release_date.into(),
        });
        self
    }

    pub fn with_artist(self, id: ArtistId, name: &str) -> Self {
        self.state.lock().unwrap().artists.push(Artist {
            id,
            name: name.into(),
            bio: Some(format!("{name} bio")),
            image_url: Some(format!("https://img.example/{id}.png")),
        });
        self
    }

    pub fn with_genre(self, id: GenreId, name: &str) -> Self {
        self.state.lock().unwrap().genres.push(Genre {
            id,
            name: name.into(),
        });
        self
    }

    /// Every subsequent call fails as if the network were down.
    pub fn go_offline(&self) {
        self.state.lock().unwrap().offline = true;
    }

    pub fn go_online(&self) {
        self.state.lock().unwrap().offline = false;
    }

    /// Only `list_artists` fails; every other call keeps working.
    pub fn break_artist_listing(&self) {
        self.state.lock().unwrap().artist_listing_broken = true;
    }

    pub fn song(&self, id: SongId) -> Song {
        let state = self.state.lock().unwrap();
        state.songs.iter().find(|s| s.id == id).cloned().unwrap()
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.state.lock().unwrap().calls.clear();
    }

    fn record(&self, call: Call) -> Result<std::sync::MutexGuard<'_, State>> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(call);
        if state.offline {
            return Err(Error::UnexpectedStatus {
                status: StatusCode::SERVICE_UNAVAILABLE,
                url: "fake://offline".into(),
            });
        }
        Ok(state)
    }
}

fn next_id<T>(items: &[T], id: impl Fn(&T) -> u64) -> u64 {
    items.iter().map(id).max().unwrap_or(0) + 1
}

impl CatalogApi for FakeCatalog {
    async fn list_songs(&self) -> Result<Vec<Song>> {
        Ok(self.record(Call::ListSongs)?.songs.clone())
    }

    async fn get_song(&self, id: SongId) -> Result<Song> {
        let state = self.record(Call::GetSong(id))?;
        state
            .songs
            .iter()
            .find(|s| s.id == id)
            .cloned()
            .ok_or_else(|| not_found(Collection::Songs, id))
    }

    async fn create_song(&self, song: &NewSong) -> Result<Song> {
        let mut state = self.record(Call::CreateSong(song.clone()))?;
        let created = Song {
            id: next_id(&state.songs, |s| s.id),
            title: song.title.clone(),
            artist_id: song.artist_id,
            genre_id: song.genre_id,
            release_date: song.release_date.clone(),
        };
        state.songs.push(created.clone());
        Ok(created)
    }

    async fn delete_song(&self, id: SongId) -> Result<Option<Song>> {
        let mut state = self.record(Call::DeleteSong(id))?;
        let index = state
            .songs
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| not_found(Collection::Songs, id))?;
        Ok(Some(state.songs.remove(index)))
    }

    async fn list_artists(&self) -> Result<Vec<Artist>> {
        let state = self.record(Call::ListArtists)?;
        if state.artist_listing_broken {
            return Err(Error::UnexpectedStatus {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                url: format!("fake://{}", Collection::Artists.as_str()),
            });
        }
        Ok(state.artists.clone())
    }

    async fn get_artist(&self, id: ArtistId) -> Result<Artist> {
        let state = self.record(Call::GetArtist(id))?;
        state
            .artists
            .iter()
            .find(|a| a.id == id)
            .cloned()
            .ok_or_else(|| not_found(Collection::Artists, id))
    }

    async fn create_artist(&self, artist: &NewArtist) -> Result<Artist> {
        let mut state = self.record(Call::CreateArtist(artist.clone()))?;
        let created = Artist {
            id: next_id(&state.artists, |a| a.id),
            name: artist.name.clone(),
            bio: Some(artist.bio.clone()),
            image_url: Some(artist.image_url.clone()),
        };
        state.artists.push(created.clone());
        Ok(created)
    }

    async fn list_genres(&self) -> Result<Vec<Genre>> {
        Ok(self.record(Call::ListGenres)?.genres.clone())
    }

    async fn get_genre(&self, id: GenreId) -> Result<Genre> {
        let state = self.record(Call::GetGenre(id))?;
        state
            .genres
            .iter()
            .find(|g| g.id == id)
            .cloned()
            .ok_or_else(|| not_found(Collection::Genres, id))
    }

    async fn create_genre(&self, genre: &NewGenre) -> Result<Genre> {
        let mut state = self.record(Call::CreateGenre(genre.clone()))?;
        let created = Genre {
            id: next_id(&state.genres, |g| g.id),
            name: genre.name.clone(),
        };
        state.genres.push(created.clone());
        Ok(created)
    }
}
