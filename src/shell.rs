//! Line-oriented session over an [`App`]: one action per line, the page
//! rewritten after every action that changes it.

use log::warn;
use tokio::io::{AsyncBufRead, AsyncWrite, AsyncWriteExt};

use crate::app::{Action, App};
use crate::clients::{
    CatalogApi,
    errors::{Error, Result},
};
use crate::dialog::{ArtistDraft, Dialog, GenreDraft, SongDraft};
use crate::view::Region;

const HELP: &str = "\
commands:
  delete <song id>    click a song's delete button
  artist <artist id>  follow an artist link
  back                leave the artist page
  refresh             refetch the song list
  add-song            fill in and submit the song form
  add-artist          fill in and submit the new artist form
  add-genre           fill in and submit the new genre form
  help                show this message
  quit                leave the shell";

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Act(Action),
    AddSong,
    AddArtist,
    AddGenre,
    Help,
    Quit,
}

fn parse_id(arg: Option<&str>, what: &str) -> Result<u64> {
    let raw = arg.ok_or_else(|| Error::InvalidInput(format!("missing {what} id")))?;
    raw.parse()
        .map_err(|_| Error::InvalidInput(format!("{what} id must be a number, got {raw:?}")))
}

// Blank lines parse to None
fn parse(line: &str) -> Result<Option<Command>> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Ok(None);
    };
    let arg = words.next();
    let command = match verb {
        "delete" => Command::Act(Action::DeleteSong(parse_id(arg, "song")?)),
        "artist" => Command::Act(Action::ShowArtist(parse_id(arg, "artist")?)),
        "back" => Command::Act(Action::Back),
        "refresh" => Command::Act(Action::Refresh),
        "add-song" => Command::AddSong,
        "add-artist" => Command::AddArtist,
        "add-genre" => Command::AddGenre,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => {
            return Err(Error::InvalidInput(format!(
                "unknown command {other:?}, try \"help\""
            )));
        }
    };
    Ok(Some(command))
}

/// Write both regions as documents, song region first.
pub async fn write_page<A, P>(app: &App<A, Region>, page: &mut P) -> Result<()>
where
    A: CatalogApi,
    P: AsyncWrite + Unpin,
{
    let text = format!(
        "{}\n{}\n",
        app.song_view().to_document(),
        app.form_view().to_document()
    );
    page.write_all(text.as_bytes()).await?;
    page.flush().await?;
    Ok(())
}

/// Read commands from `dialog` until `quit` or end of input.
///
/// Bad lines and actions on controls the page does not show are answered in
/// the dialog. Any other failure is rendered into the page and the session
/// goes on.
pub async fn run<A, R, W, P>(
    app: &mut App<A, Region>,
    dialog: &mut Dialog<R, W>,
    page: &mut P,
) -> Result<()>
where
    A: CatalogApi,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
    P: AsyncWrite + Unpin,
{
    write_page(app, page).await?;
    while let Some(line) = dialog.ask("songbook> ").await? {
        let command = match parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                dialog.say(&e.to_string()).await?;
                continue;
            }
        };

        let filled = match command {
            Command::Quit => break,
            Command::Help => {
                dialog.say(HELP).await?;
                continue;
            }
            Command::Act(action) => Ok(action),
            Command::AddSong => dialog
                .complete_song(SongDraft::default())
                .await
                .map(Action::SubmitSong),
            Command::AddArtist => dialog
                .complete_artist(ArtistDraft::default())
                .await
                .map(Action::AddArtist),
            Command::AddGenre => dialog
                .complete_genre(GenreDraft::default())
                .await
                .map(Action::AddGenre),
        };

        let outcome = match filled {
            Ok(action) => app.dispatch(action).await,
            Err(e) => Err(e),
        };
        match outcome {
            Ok(()) => write_page(app, page).await?,
            // the page is unchanged, just tell the user
            Err(e @ (Error::InvalidInput(_) | Error::UnboundControl(_))) => {
                warn!("{e}");
                dialog.say(&e.to_string()).await?;
            }
            Err(e) => {
                app.fail(&e);
                write_page(app, page).await?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::ViewState;
    use crate::testing::{Call, FakeCatalog};
    use crate::view::{EMPTY_SONG_LIST, NEW_SONG_FORM, SONG_CONTAINER};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    async fn booted(catalog: FakeCatalog) -> App<FakeCatalog, Region> {
        let mut app = App::new(
            catalog,
            Region::new(SONG_CONTAINER),
            Region::new(NEW_SONG_FORM),
        );
        app.bootstrap().await.unwrap();
        app.api().clear_calls();
        app
    }

    // runs one session and returns (dialog transcript, page output)
    async fn session(app: &mut App<FakeCatalog, Region>, input: &[u8]) -> (String, String) {
        let mut transcript = Vec::new();
        let mut page = Vec::new();
        let mut dialog = Dialog::new(input, &mut transcript);
        run(app, &mut dialog, &mut page).await.unwrap();
        (
            String::from_utf8(transcript).unwrap(),
            String::from_utf8(page).unwrap(),
        )
    }

    #[rstest]
    #[case("delete 3", Command::Act(Action::DeleteSong(3)))]
    #[case("  artist   10 ", Command::Act(Action::ShowArtist(10)))]
    #[case("back", Command::Act(Action::Back))]
    #[case("refresh", Command::Act(Action::Refresh))]
    #[case("add-song", Command::AddSong)]
    #[case("add-artist", Command::AddArtist)]
    #[case("add-genre", Command::AddGenre)]
    #[case("?", Command::Help)]
    #[case("exit", Command::Quit)]
    fn parses_commands(#[case] line: &str, #[case] expected: Command) {
        assert_eq!(parse(line).unwrap(), Some(expected));
    }

    #[test]
    fn blank_line_is_ignored() {
        assert_eq!(parse("   ").unwrap(), None);
    }

    #[rstest]
    #[case("delete")]
    #[case("artist x")]
    #[case("dance")]
    fn rejects_bad_lines(#[case] line: &str) {
        assert!(matches!(parse(line), Err(Error::InvalidInput(_))));
    }

    #[tokio::test]
    async fn delete_rewrites_page_without_the_song() {
        let mut app = booted(FakeCatalog::scenario()).await;

        let (_, page) = session(&mut app, b"delete 1\nquit\n").await;

        assert_eq!(
            app.api().calls(),
            vec![Call::DeleteSong(1), Call::ListSongs]
        );
        assert!(page.ends_with(&format!(
            "<div id=\"{SONG_CONTAINER}\">{EMPTY_SONG_LIST}</div>\n{}\n",
            app.form_view().to_document()
        )));
    }

    #[tokio::test]
    async fn session_survives_failures_and_bad_clicks() {
        let mut app = booted(FakeCatalog::scenario()).await;
        app.api().go_offline();

        let (transcript, page) =
            session(&mut app, b"delete 99\nbogus\ndelete 1\ndelete 1\nquit\n").await;

        // only the bound click reaches the catalog
        assert_eq!(app.api().calls(), vec![Call::DeleteSong(1)]);
        assert_eq!(transcript.matches("No such control").count(), 2);
        assert!(transcript.contains("unknown command \"bogus\""));
        assert!(page.contains("Something went wrong"));
        assert_eq!(app.state(), ViewState::Failed);
    }

    #[tokio::test]
    async fn refresh_recovers_after_failure() {
        let mut app = booted(FakeCatalog::scenario()).await;
        app.api().go_offline();
        session(&mut app, b"delete 1\n").await;
        app.api().go_online();

        let (_, page) = session(&mut app, b"refresh\ndelete 1\n").await;

        assert_eq!(app.state(), ViewState::SongList);
        assert!(page.contains(EMPTY_SONG_LIST));
        assert!(app.api().calls().ends_with(&[Call::DeleteSong(1), Call::ListSongs]));
    }

    #[tokio::test]
    async fn add_genre_asks_for_the_name() {
        let mut app = booted(FakeCatalog::scenario()).await;

        let (transcript, page) = session(&mut app, b"help\nadd-genre\nRock\nquit\n").await;

        assert!(transcript.contains("commands:"));
        assert!(transcript.contains("name of the new genre"));
        assert_eq!(
            app.api().calls().first(),
            Some(&Call::CreateGenre(crate::clients::entities::NewGenre {
                name: "Rock".into()
            }))
        );
        assert!(page.contains("Rock"));
    }

    #[tokio::test]
    async fn end_of_input_ends_the_session() {
        let mut app = booted(FakeCatalog::scenario()).await;

        let (_, page) = session(&mut app, b"").await;

        assert!(app.api().calls().is_empty());
        assert!(page.contains("<h3>A</h3>"));
    }
}
