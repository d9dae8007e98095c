use log::debug;

use crate::clients::{
    CatalogApi,
    entities::{Artist, Genre, Song},
    errors::{Error, Result},
};
use crate::lookup::resolve_names;
use crate::view::{Control, ViewTarget, escape};

pub const EMPTY_SONG_LIST: &str = "<h3>No songs yet!</h3>";

/// Render `songs` into `target`, resolving each song's names first.
///
/// Songs are resolved one at a time, in order, so a list of n songs costs 2n
/// sequential reads. The region is only replaced once every block is built;
/// a failed lookup leaves it untouched.
pub async fn render_song_list<A, T>(
    api: &A,
    target: &mut T,
    songs: &[Song],
) -> Result<Vec<Control>>
where
    A: CatalogApi,
    T: ViewTarget,
{
    if songs.is_empty() {
        target.replace(EMPTY_SONG_LIST.to_string());
        return Ok(Vec::new());
    }

    let mut html = String::new();
    let mut controls = Vec::with_capacity(songs.len() * 2);
    for song in songs {
        let names = resolve_names(api, song).await?;
        html.push_str(&format!(
            r##"
<div class="song">
    <h3>{title}</h3>
    <p><a href="#" class="artist-link" data-id="{artist_id}">{artist}</a></p>
    <p>{genre}</p>
    <p>{release_date}</p>
    <button class="delete-button" data-id="{id}">Delete</button>
</div>
"##,
            title = escape(&song.title),
            artist_id = song.artist_id,
            artist = escape(&names.artist_name),
            genre = escape(&names.genre_name),
            release_date = escape(&song.release_date),
            id = song.id,
        ));
        controls.push(Control::ArtistLink(song.artist_id));
        controls.push(Control::DeleteSong(song.id));
    }

    debug!("Rendered {} songs", songs.len());
    target.replace(html);
    Ok(controls)
}

pub fn render_artist_detail<T: ViewTarget>(target: &mut T, artist: &Artist) -> Vec<Control> {
    let html = format!(
        r#"
<h3>{name}</h3>
<p>{bio}</p>
<img src="{image_url}">
<button class="back-button">Back</button>
"#,
        name = escape(&artist.name),
        bio = escape(artist.bio.as_deref().unwrap_or_default()),
        image_url = escape(artist.image_url.as_deref().unwrap_or_default()),
    );
    target.replace(html);
    vec![Control::Back]
}

/// Fetch artists and genres in parallel, then render the creation form.
pub async fn render_create_form<A, T>(api: &A, target: &mut T) -> Result<Vec<Control>>
where
    A: CatalogApi,
    T: ViewTarget,
{
    let (artists, genres) = futures::try_join!(api.list_artists(), api.list_genres())?;
    debug!(
        "Creation form has {} artists and {} genres",
        artists.len(),
        genres.len()
    );
    target.replace(create_form_html(&artists, &genres));
    Ok(vec![
        Control::SubmitSong,
        Control::AddGenre,
        Control::AddArtist,
    ])
}

fn options<T>(items: &[T], value: impl Fn(&T) -> u64, label: impl Fn(&T) -> &str) -> String {
    items
        .iter()
        .map(|item| {
            format!(
                r#"<option value="{}">{}</option>"#,
                value(item),
                escape(label(item))
            )
        })
        .collect::<Vec<_>>()
        .join("")
}

pub fn create_form_html(artists: &[Artist], genres: &[Genre]) -> String {
    format!(
        r#"
<h3>Add a new song</h3>
<form class="new-song">
    <label for="title">Title</label>
    <input type="text" id="title" name="title" required>
    <select id="artist" name="artist" required>
        <option value="" disabled selected>Select an artist</option>
        {artist_options}
    </select>
    <select id="genre" name="genre" required>
        <option value="" disabled selected>Select a genre</option>
        {genre_options}
    </select>
    <label for="release-date">Release Date</label>
    <input type="date" id="release-date" name="release-date" required>
    <button type="submit">Add Song</button>
</form>
<form class="new-genre-form">
    <label for="genre-name">Genre name</label>
    <input type="text" id="genre-name" name="name" required>
    <button type="submit">Add New Genre</button>
</form>
<form class="new-artist-form">
    <label for="artist-name">Artist name</label>
    <input type="text" id="artist-name" name="name" required>
    <label for="artist-bio">Bio</label>
    <textarea id="artist-bio" name="bio"></textarea>
    <label for="artist-image-url">Image URL</label>
    <input type="url" id="artist-image-url" name="image_url">
    <button type="submit">Add New Artist</button>
</form>
"#,
        artist_options = options(artists, |a| a.id, |a| a.name.as_str()),
        genre_options = options(genres, |g| g.id, |g| g.name.as_str()),
    )
}

/// Replace `target` with a notice describing `error`.
pub fn render_failure<T: ViewTarget>(target: &mut T, error: &Error) {
    target.replace(format!(
        r#"<div class="error"><h3>Something went wrong</h3><p>{}</p></div>"#,
        escape(&error.to_string())
    ));
}
