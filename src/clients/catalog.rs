use log::{debug, warn};
use reqwest::{Client, Response, Url};
use serde::{Serialize, de::DeserializeOwned};

use crate::clients::{
    entities::{Artist, ArtistId, Genre, GenreId, NewArtist, NewGenre, NewSong, Song, SongId},
    errors::{Error, Result},
};

/// The three REST collections the catalog exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Songs,
    Artists,
    Genres,
}

impl Collection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Songs => "songs",
            Collection::Artists => "artists",
            Collection::Genres => "genres",
        }
    }
}

/// Operations the views need from the catalog.
///
/// [`CatalogClient`] is the HTTP implementation; anything else (an in-memory
/// catalog in tests, for instance) can stand in for it.
#[allow(async_fn_in_trait)]
pub trait CatalogApi {
    async fn list_songs(&self) -> Result<Vec<Song>>;
    async fn get_song(&self, id: SongId) -> Result<Song>;
    async fn create_song(&self, song: &NewSong) -> Result<Song>;
    /// Returns the deleted song when the server echoes it back.
    async fn delete_song(&self, id: SongId) -> Result<Option<Song>>;

    async fn list_artists(&self) -> Result<Vec<Artist>>;
    async fn get_artist(&self, id: ArtistId) -> Result<Artist>;
    async fn create_artist(&self, artist: &NewArtist) -> Result<Artist>;

    async fn list_genres(&self) -> Result<Vec<Genre>>;
    async fn get_genre(&self, id: GenreId) -> Result<Genre>;
    async fn create_genre(&self, genre: &NewGenre) -> Result<Genre>;
}

pub struct CatalogClient {
    http: Client,
    base_url: Url,
}

impl CatalogClient {
    pub fn new(http: Client, base_url: Url) -> Self {
        CatalogClient { http, base_url }
    }

    pub fn try_new(base_url: Url) -> Result<Self> {
        let http = Client::builder()
            .user_agent(concat!("songbook/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(CatalogClient::new(http, base_url))
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `{base}/{collection}`
    pub fn collection_url(&self, collection: Collection) -> String {
        format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            collection.as_str()
        )
    }

    /// `{base}/{collection}/{id}`
    pub fn item_url(&self, collection: Collection, id: u64) -> String {
        format!("{}/{id}", self.collection_url(collection))
    }

    async fn get<T: DeserializeOwned>(&self, url: String) -> Result<T> {
        debug!("GET {url}");
        let response = self.http.get(&url).send().await?;
        parse_json(check_status(response, &url)?).await
    }

    async fn post<B: Serialize, T: DeserializeOwned>(&self, url: String, body: &B) -> Result<T> {
        debug!("POST {url}");
        // `json` sets Content-Type: application/json
        let response = self.http.post(&url).json(body).send().await?;
        parse_json(check_status(response, &url)?).await
    }
}

fn check_status(response: Response, url: &str) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        debug!("{url} answered {status}");
        Err(Error::UnexpectedStatus {
            status,
            url: url.to_string(),
        })
    }
}

async fn parse_json<T: DeserializeOwned>(response: Response) -> Result<T> {
    let bytes = response.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}

impl CatalogApi for CatalogClient {
    async fn list_songs(&self) -> Result<Vec<Song>> {
        let songs: Vec<Song> = self.get(self.collection_url(Collection::Songs)).await?;
        debug!("Fetched {} songs", songs.len());
        Ok(songs)
    }

    async fn get_song(&self, id: SongId) -> Result<Song> {
        self.get(self.item_url(Collection::Songs, id)).await
    }

    async fn create_song(&self, song: &NewSong) -> Result<Song> {
        self.post(self.collection_url(Collection::Songs), song).await
    }

    async fn delete_song(&self, id: SongId) -> Result<Option<Song>> {
        let url = self.item_url(Collection::Songs, id);
        debug!("DELETE {url}");
        let response = self.http.delete(&url).send().await?;
        let bytes = check_status(response, &url)?.bytes().await?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }
        // the song is gone whatever the body says; only an echoed song is kept
        match serde_json::from_slice(&bytes) {
            Ok(song) => Ok(Some(song)),
            Err(e) => {
                warn!("Ignoring DELETE {url} response body: {e}");
                Ok(None)
            }
        }
    }

    async fn list_artists(&self) -> Result<Vec<Artist>> {
        self.get(self.collection_url(Collection::Artists)).await
    }

    async fn get_artist(&self, id: ArtistId) -> Result<Artist> {
        self.get(self.item_url(Collection::Artists, id)).await
    }

    async fn create_artist(&self, artist: &NewArtist) -> Result<Artist> {
        self.post(self.collection_url(Collection::Artists), artist)
            .await
    }

    async fn list_genres(&self) -> Result<Vec<Genre>> {
        self.get(self.collection_url(Collection::Genres)).await
    }

    async fn get_genre(&self, id: GenreId) -> Result<Genre> {
        self.get(self.item_url(Collection::Genres, id)).await
    }

    async fn create_genre(&self, genre: &NewGenre) -> Result<Genre> {
        self.post(self.collection_url(Collection::Genres), genre)
            .await
    }
}
