//! Wires user actions to catalog calls and re-renders.
//!
//! Every render replaces the controls bound for its region, the same way
//! re-rendering a DOM region drops the listeners attached to the old
//! elements. An action is only accepted when the control it comes from is
//! part of the current rendering.

use std::collections::HashSet;

use log::{debug, info, warn};

use crate::clients::{
    CatalogApi,
    entities::{ArtistId, NewArtist, NewGenre, NewSong, SongId},
    errors::{Error, Result},
};
use crate::dialog::{ArtistDraft, GenreDraft, SongDraft};
use crate::view::{
    Control, ViewTarget,
    render::{render_artist_detail, render_create_form, render_failure, render_song_list},
};

/// What the song region currently shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    SongList,
    ArtistDetail(ArtistId),
    /// An error notice replaced the song region.
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Click on a song's delete button.
    DeleteSong(SongId),
    /// Click on an artist link.
    ShowArtist(ArtistId),
    /// Click on the artist detail's back button.
    Back,
    /// Submit of the song form.
    SubmitSong(SongDraft),
    /// Submit of the new genre form.
    AddGenre(GenreDraft),
    /// Submit of the new artist form.
    AddArtist(ArtistDraft),
    /// Refetch and re-render the song list, whatever is showing.
    Refresh,
}

impl Action {
    /// The control this action originates from, if any.
    pub fn control(&self) -> Option<Control> {
        match self {
            Action::DeleteSong(id) => Some(Control::DeleteSong(*id)),
            Action::ShowArtist(id) => Some(Control::ArtistLink(*id)),
            Action::Back => Some(Control::Back),
            Action::SubmitSong(_) => Some(Control::SubmitSong),
            Action::AddGenre(_) => Some(Control::AddGenre),
            Action::AddArtist(_) => Some(Control::AddArtist),
            Action::Refresh => None,
        }
    }
}

pub struct App<A, T> {
    api: A,
    song_view: T,
    form_view: T,
    state: ViewState,
    song_controls: HashSet<Control>,
    form_controls: HashSet<Control>,
}

impl<A, T> App<A, T>
where
    A: CatalogApi,
    T: ViewTarget,
{
    pub fn new(api: A, song_view: T, form_view: T) -> Self {
        App {
            api,
            song_view,
            form_view,
            state: ViewState::SongList,
            song_controls: HashSet::new(),
            form_controls: HashSet::new(),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn state(&self) -> ViewState {
        self.state
    }

    pub fn song_view(&self) -> &T {
        &self.song_view
    }

    pub fn form_view(&self) -> &T {
        &self.form_view
    }

    pub fn is_bound(&self, control: Control) -> bool {
        self.song_controls.contains(&control) || self.form_controls.contains(&control)
    }

    /// Fetch the songs, then render the creation form and the song list.
    ///
    /// The two regions are independent: a form that fails to load shows its
    /// error in the form region and the song list is rendered regardless.
    pub async fn bootstrap(&mut self) -> Result<()> {
        info!("Loading catalog ...");
        let songs = self.api.list_songs().await?;
        debug!("Bootstrapping with {} songs", songs.len());
        if let Err(e) = self.render_form().await {
            warn!("Creation form unavailable: {e}");
        }
        let controls = render_song_list(&self.api, &mut self.song_view, &songs).await?;
        self.song_controls = controls.into_iter().collect();
        self.state = ViewState::SongList;
        Ok(())
    }

    /// Refetch the song list and fully re-render it.
    pub async fn refresh(&mut self) -> Result<()> {
        let songs = self.api.list_songs().await?;
        let controls = render_song_list(&self.api, &mut self.song_view, &songs).await?;
        self.song_controls = controls.into_iter().collect();
        self.state = ViewState::SongList;
        Ok(())
    }

    // on failure the form region shows the error and exposes no controls
    async fn render_form(&mut self) -> Result<()> {
        match render_create_form(&self.api, &mut self.form_view).await {
            Ok(controls) => {
                self.form_controls = controls.into_iter().collect();
                Ok(())
            }
            Err(e) => {
                render_failure(&mut self.form_view, &e);
                self.form_controls.clear();
                Err(e)
            }
        }
    }

    pub async fn dispatch(&mut self, action: Action) -> Result<()> {
        if let Some(control) = action.control()
            && !self.is_bound(control)
        {
            return Err(Error::UnboundControl(control.to_string()));
        }

        match action {
            Action::DeleteSong(id) => {
                let deleted = self.api.delete_song(id).await?;
                info!(
                    "Deleted song {id}{}",
                    deleted.map(|s| format!(" ({})", s.title)).unwrap_or_default()
                );
                self.refresh().await
            }
            Action::ShowArtist(id) => {
                let artist = self.api.get_artist(id).await?;
                info!("Showing artist {}", artist.name);
                let controls = render_artist_detail(&mut self.song_view, &artist);
                self.song_controls = controls.into_iter().collect();
                self.state = ViewState::ArtistDetail(id);
                Ok(())
            }
            Action::Back | Action::Refresh => self.refresh().await,
            Action::SubmitSong(draft) => {
                let song = NewSong::try_from(&draft)?;
                let created = self.api.create_song(&song).await?;
                info!("Created song {} ({})", created.id, created.title);
                self.refresh().await
            }
            Action::AddGenre(draft) => {
                let genre = NewGenre::try_from(&draft)?;
                let created = self.api.create_genre(&genre).await?;
                info!("Created genre {} ({})", created.id, created.name);
                self.render_form().await
            }
            Action::AddArtist(draft) => {
                let artist = NewArtist::try_from(&draft)?;
                let created = self.api.create_artist(&artist).await?;
                info!("Created artist {} ({})", created.id, created.name);
                self.render_form().await
            }
        }
    }

    /// Show `error` in the song region. Only a refresh leads back from there.
    pub fn fail(&mut self, error: &Error) {
        warn!("{error}");
        render_failure(&mut self.song_view, error);
        self.song_controls.clear();
        self.state = ViewState::Failed;
    }
}
