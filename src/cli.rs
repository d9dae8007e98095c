use clap::{Parser, Subcommand};
use log::info;
use songbook::{
    app::{Action, App},
    clients::errors::Result,
    config::{BASE_URL_ENV, ConfigBuilder},
    dialog::{ArtistDraft, Dialog, GenreDraft, SongDraft},
    shell::{self, write_page},
    view::{NEW_SONG_FORM, Region, SONG_CONTAINER},
};
use tokio::io::{BufReader, stderr, stdin, stdout};

#[derive(Parser)]
#[command(name = "songbook")]
#[command(version, about = "Browse and edit a songs catalog", long_about = None)]
struct Cli {
    /// Base URL of the catalog API
    #[arg(long, global = true, env = BASE_URL_ENV)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the song list and the creation form
    List,
    /// Follow the link to an artist
    Artist { id: u64 },
    /// Delete a song
    Delete { id: u64 },
    /// Add a song
    AddSong {
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        artist_id: Option<String>,
        #[arg(long)]
        genre_id: Option<String>,
        #[arg(long)]
        release_date: Option<String>,
    },
    /// Add an artist, asking for any field not given
    AddArtist {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        bio: Option<String>,
        #[arg(long)]
        image_url: Option<String>,
    },
    /// Add a genre, asking for the name if not given
    AddGenre {
        #[arg(long)]
        name: Option<String>,
    },
    /// Interactive session
    Shell,
}

pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    let mut builder = ConfigBuilder::new();
    if let Some(url) = cli.base_url {
        builder = builder.base_url(url);
    }
    let config = builder.build()?;
    info!("Catalog API: {}", config.base_url);

    let mut app = App::new(
        config.client()?,
        Region::new(SONG_CONTAINER),
        Region::new(NEW_SONG_FORM),
    );
    // questions go to stderr so stdout carries only the rendered page
    let mut dialog = Dialog::new(BufReader::new(stdin()), stderr());
    let mut page = stdout();

    if let Err(e) = app.bootstrap().await {
        app.fail(&e);
        write_page(&app, &mut page).await?;
        return Err(e);
    }

    let action = match cli.command {
        Commands::List => None,
        Commands::Artist { id } => Some(Action::ShowArtist(id)),
        Commands::Delete { id } => Some(Action::DeleteSong(id)),
        Commands::AddSong {
            title,
            artist_id,
            genre_id,
            release_date,
        } => {
            let draft = SongDraft {
                title,
                artist_id,
                genre_id,
                release_date,
            };
            Some(Action::SubmitSong(dialog.complete_song(draft).await?))
        }
        Commands::AddArtist {
            name,
            bio,
            image_url,
        } => {
            let draft = ArtistDraft {
                name,
                bio,
                image_url,
            };
            Some(Action::AddArtist(dialog.complete_artist(draft).await?))
        }
        Commands::AddGenre { name } => {
            let draft = GenreDraft { name };
            Some(Action::AddGenre(dialog.complete_genre(draft).await?))
        }
        Commands::Shell => return shell::run(&mut app, &mut dialog, &mut page).await,
    };

    if let Some(action) = action
        && let Err(e) = app.dispatch(action).await
    {
        app.fail(&e);
        write_page(&app, &mut page).await?;
        return Err(e);
    }
    write_page(&app, &mut page).await
}
