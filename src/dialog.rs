//! Structured input for songs, artists and genres.
//!
//! A draft holds raw field values the way a form submits them: `None` for a
//! field that was never filled in. Converting a draft into its create payload
//! trims every value and rejects missing required fields. [`Dialog`] fills in
//! the missing fields of a draft by asking for them one line at a time.

use log::debug;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, Lines};

use crate::clients::{
    entities::{NewArtist, NewGenre, NewSong},
    errors::{Error, Result},
};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SongDraft {
    pub title: Option<String>,
    pub artist_id: Option<String>,
    pub genre_id: Option<String>,
    pub release_date: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArtistDraft {
    pub name: Option<String>,
    pub bio: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenreDraft {
    pub name: Option<String>,
}

fn required(field: &str, value: Option<&str>) -> Result<String> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(Error::InvalidInput(format!("{field} is required"))),
    }
}

fn optional(value: Option<&str>) -> String {
    value.map(str::trim).unwrap_or_default().to_string()
}

fn id(field: &str, value: Option<&str>) -> Result<u64> {
    let raw = required(field, value)?;
    raw.parse()
        .map_err(|_| Error::InvalidInput(format!("{field} must be a numeric id, got {raw:?}")))
}

impl TryFrom<&SongDraft> for NewSong {
    type Error = Error;

    fn try_from(draft: &SongDraft) -> Result<Self> {
        Ok(NewSong {
            title: required("title", draft.title.as_deref())?,
            artist_id: id("artist", draft.artist_id.as_deref())?,
            genre_id: id("genre", draft.genre_id.as_deref())?,
            release_date: required("release date", draft.release_date.as_deref())?,
        })
    }
}

impl TryFrom<&ArtistDraft> for NewArtist {
    type Error = Error;

    fn try_from(draft: &ArtistDraft) -> Result<Self> {
        Ok(NewArtist {
            name: required("artist name", draft.name.as_deref())?,
            bio: optional(draft.bio.as_deref()),
            image_url: optional(draft.image_url.as_deref()),
        })
    }
}

impl TryFrom<&GenreDraft> for NewGenre {
    type Error = Error;

    fn try_from(draft: &GenreDraft) -> Result<Self> {
        Ok(NewGenre {
            name: required("genre name", draft.name.as_deref())?,
        })
    }
}

/// Line-oriented question and answer session.
pub struct Dialog<R, W> {
    lines: Lines<R>,
    output: W,
}

impl<R, W> Dialog<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(input: R, output: W) -> Self {
        Dialog {
            lines: input.lines(),
            output,
        }
    }

    /// Print `question` and read one line. `None` once input is exhausted.
    pub async fn ask(&mut self, question: &str) -> Result<Option<String>> {
        self.output.write_all(question.as_bytes()).await?;
        self.output.flush().await?;
        Ok(self.lines.next_line().await?)
    }

    pub async fn say(&mut self, text: &str) -> Result<()> {
        self.output.write_all(text.as_bytes()).await?;
        self.output.write_all(b"\n").await?;
        self.output.flush().await?;
        Ok(())
    }

    async fn fill(&mut self, slot: &mut Option<String>, question: &str) -> Result<()> {
        if slot.is_none() {
            let answer = self
                .ask(question)
                .await?
                .ok_or_else(|| Error::InvalidInput("input closed mid-dialog".into()))?;
            *slot = Some(answer);
        }
        Ok(())
    }

    /// Ask for every song field the draft is missing.
    pub async fn complete_song(&mut self, mut draft: SongDraft) -> Result<SongDraft> {
        self.fill(&mut draft.title, "Title: ").await?;
        self.fill(&mut draft.artist_id, "Artist id: ").await?;
        self.fill(&mut draft.genre_id, "Genre id: ").await?;
        self.fill(&mut draft.release_date, "Release date (YYYY-MM-DD): ")
            .await?;
        debug!("Song dialog finished with {draft:?}");
        Ok(draft)
    }

    pub async fn song(&mut self, draft: SongDraft) -> Result<NewSong> {
        NewSong::try_from(&self.complete_song(draft).await?)
    }

    /// Ask for every artist field the draft is missing.
    pub async fn complete_artist(&mut self, mut draft: ArtistDraft) -> Result<ArtistDraft> {
        self.fill(&mut draft.name, "Enter the name of the new artist: ")
            .await?;
        self.fill(&mut draft.bio, "Enter the bio of the new artist: ")
            .await?;
        self.fill(&mut draft.image_url, "Enter the image url of the new artist: ")
            .await?;
        debug!("Artist dialog finished with {draft:?}");
        Ok(draft)
    }

    pub async fn artist(&mut self, draft: ArtistDraft) -> Result<NewArtist> {
        NewArtist::try_from(&self.complete_artist(draft).await?)
    }

    pub async fn complete_genre(&mut self, mut draft: GenreDraft) -> Result<GenreDraft> {
        self.fill(&mut draft.name, "Enter the name of the new genre: ")
            .await?;
        Ok(draft)
    }

    pub async fn genre(&mut self, draft: GenreDraft) -> Result<NewGenre> {
        NewGenre::try_from(&self.complete_genre(draft).await?)
    }
}
