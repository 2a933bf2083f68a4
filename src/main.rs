//! linkboard: command-line front end over the local store.
//!
//! Every command mounts the screen it acts on from scratch, so each
//! invocation sees the fixtures merged with whatever earlier commands
//! persisted.

use std::error::Error;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use linkboard::commit::CommitError;
use linkboard::config::{self, Overrides, Resolved};
use linkboard::connections::ConnectOutcome;
use linkboard::model::{Candidate, Post};
use linkboard::screens::{FeedScreen, JobsScreen, LoadState, NetworkScreen, ProfileScreen};
use linkboard::session::{self, Route};
use linkboard::storage::LocalStore;

/// Single-device professional network demo.
///
/// Configuration can be set via CLI arguments, environment variables or
/// `config.toml` in the data directory, in that order of precedence.
#[derive(Parser, Debug)]
#[command(name = "linkboard", version, about)]
struct Cli {
    /// Data directory holding the database and config.toml [env: LINKBOARD_HOME] [default: ~/.linkboard]
    #[arg(long, short = 'd', global = true)]
    data_dir: Option<PathBuf>,

    /// Fixture directory or base URL [env: LINKBOARD_FIXTURES]
    #[arg(long, short = 'f', global = true)]
    fixtures: Option<String>,

    /// Act as this user id [env: LINKBOARD_VIEWER] [default: 101]
    #[arg(long, global = true)]
    viewer: Option<u32>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Set the login flag
    Login,
    /// Clear the login flag
    Logout,
    /// Show where navigating to a path would land
    Route { path: String },
    /// Show the home feed
    Feed,
    /// Like a post on the home feed
    Like { post: u32 },
    /// Comment on a post on the home feed
    Comment { post: u32, text: String },
    /// Show connections and people you may know
    Network,
    /// Connect with a suggested person
    Connect { id: u32 },
    /// Remove an accepted connection
    RemoveConnection { id: u32 },
    /// Show a user's profile
    Profile { user: u32 },
    /// Edit the viewer's own bio and job title
    EditProfile {
        #[arg(long)]
        bio: String,
        #[arg(long)]
        job_title: String,
    },
    /// List jobs, optionally filtered
    Jobs {
        #[arg(long, short = 's')]
        search: Option<String>,
    },
    /// Save a job
    SaveJob { id: u32 },
    /// Import a JSON dump of the browser app's local storage
    Import { file: PathBuf },
}

fn main() {
    if let Err(error) = run() {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    linkboard::logging::init();

    let resolved = config::resolve(Overrides {
        data_dir: cli.data_dir,
        fixtures: cli.fixtures,
        viewer: cli.viewer,
    })?;
    linkboard::llog!(
        "linkboard: data directory {}, fixtures {}",
        resolved.data_dir.display(),
        resolved.loader.source()
    );

    match cli.command {
        Command::Login => {
            session::login(&resolved.store)?;
            println!("logged in as {}", resolved.viewer.name);
        }
        Command::Logout => {
            session::logout(&resolved.store)?;
            println!("logged out");
        }
        Command::Route { path } => {
            let route = Route::parse(&path).ok_or_else(|| format!("unknown route: {path}"))?;
            let landed = session::resolve(route, session::is_logged_in(&resolved.store)?);
            println!("{}", landed.path());
        }
        Command::Feed => {
            require_login(&resolved.store, Route::Home)?;
            let feed = mount_feed(&resolved)?;
            for post in feed.posts() {
                print_post(post);
            }
            print_suggestions(feed.graph().suggestions());
        }
        Command::Like { post } => {
            require_login(&resolved.store, Route::Home)?;
            let mut feed = mount_feed(&resolved)?;
            let likes = feed.like(&resolved.store, post)?;
            println!("post {post} now has {likes} like(s)");
        }
        Command::Comment { post, text } => {
            require_login(&resolved.store, Route::Home)?;
            let mut feed = mount_feed(&resolved)?;
            let comment = feed.comment(&resolved.store, post, &text)?;
            println!("comment {} added to post {post}", comment.id);
        }
        Command::Network => {
            require_login(&resolved.store, Route::Network)?;
            let network = NetworkScreen::mount(&resolved.store, &resolved.viewer)?;
            println!("Connections ({}):", network.graph().connections().len());
            for conn in network.graph().connections() {
                println!("  [{}] {} - {}", conn.id(), conn.person.name, conn.person.title);
            }
            print_suggestions(network.graph().suggestions());
        }
        Command::Connect { id } => {
            require_login(&resolved.store, Route::Network)?;
            let outcome = connect_anywhere(&resolved, id)?;
            match outcome.acknowledgment() {
                Some(msg) => println!("{msg}"),
                None => println!("already connected with {id}"),
            }
        }
        Command::RemoveConnection { id } => {
            require_login(&resolved.store, Route::Network)?;
            let mut network = NetworkScreen::mount(&resolved.store, &resolved.viewer)?;
            if network.remove_connection(&resolved.store, id)? {
                println!("removed connection {id}");
            } else {
                println!("{id} is not a connection");
            }
        }
        Command::Profile { user } => {
            require_login(&resolved.store, Route::Profile(user))?;
            let profile = mount_profile(&resolved, user)?;
            let u = profile.user();
            println!("{} ({})", u.name, u.headline);
            println!("  {} at {}", u.job_title, u.company);
            if !u.bio.is_empty() {
                println!("  {}", u.bio);
            }
            println!("  {} connection(s)", u.connections);
            for post in profile.posts() {
                print_post(post);
            }
            print_suggestions(profile.graph().suggestions());
        }
        Command::EditProfile { bio, job_title } => {
            let own = resolved.viewer.user_id;
            require_login(&resolved.store, Route::Profile(own))?;
            let mut profile = mount_profile(&resolved, own)?;
            profile.save_profile(&resolved.store, &bio, &job_title)?;
            println!("profile updated: {}", profile.user().headline);
        }
        Command::Jobs { search } => {
            require_login(&resolved.store, Route::Jobs)?;
            let jobs = JobsScreen::mount(&resolved.loader, &resolved.store)?;
            let term = search.unwrap_or_default();
            for job in jobs.search(&term) {
                let marker = if jobs.is_saved(job.id) { "*" } else { " " };
                println!(
                    "{marker}[{}] {} - {} ({}) posted {}",
                    job.id, job.title, job.company, job.location, job.posted
                );
            }
        }
        Command::SaveJob { id } => {
            require_login(&resolved.store, Route::Jobs)?;
            let mut jobs = JobsScreen::mount(&resolved.loader, &resolved.store)?;
            let outcome = jobs.save_job(&resolved.store, id)?;
            println!("{}", outcome.message());
        }
        Command::Import { file } => {
            let report = resolved
                .store
                .import_browser_export(&file, &resolved.viewer)?;
            println!("{report}");
        }
    }
    Ok(())
}

fn require_login(store: &LocalStore, route: Route) -> Result<(), Box<dyn Error>> {
    if session::resolve(route, session::is_logged_in(store)?) == Route::Login {
        return Err(format!("{} requires login; run `linkboard login` first", route.path()).into());
    }
    Ok(())
}

fn mount_feed(resolved: &Resolved) -> Result<FeedScreen, Box<dyn Error>> {
    Ok(FeedScreen::mount(
        &resolved.loader,
        &resolved.store,
        &resolved.viewer,
    )?)
}

fn mount_profile(resolved: &Resolved, user: u32) -> Result<ProfileScreen, Box<dyn Error>> {
    let mut rng = rand::thread_rng();
    match ProfileScreen::mount(
        &resolved.loader,
        &resolved.store,
        &resolved.viewer,
        user,
        &mut rng,
    )? {
        LoadState::Ready(profile) => Ok(profile),
        LoadState::NotFound(msg) | LoadState::Failed(msg) => Err(msg.into()),
        LoadState::Loading => Err("profile is still loading".into()),
    }
}

/// Connect from the network suggestions, falling back to the feed's.
fn connect_anywhere(resolved: &Resolved, id: u32) -> Result<ConnectOutcome, Box<dyn Error>> {
    let mut network = NetworkScreen::mount(&resolved.store, &resolved.viewer)?;
    match network.connect(&resolved.store, id) {
        Err(CommitError::UnknownCandidate(_)) => {
            let mut feed = mount_feed(resolved)?;
            Ok(feed.connect(&resolved.store, id)?)
        }
        other => Ok(other?),
    }
}

fn print_post(post: &Post) {
    println!();
    println!("[{}] {} - {}", post.id, post.user.name, post.timestamp);
    println!("  {}", post.content);
    println!(
        "  {} like(s), {} comment(s)",
        post.likes,
        post.comments.len()
    );
    for comment in &post.comments {
        println!("    {}: {}", comment.user.name, comment.content);
    }
}

fn print_suggestions(suggestions: &[Candidate]) {
    if suggestions.is_empty() {
        return;
    }
    println!();
    println!("People you may know:");
    for c in suggestions {
        match c.mutual_connections {
            Some(m) => println!("  [{}] {} - {} ({m} mutual)", c.id, c.name, c.title),
            None => println!("  [{}] {} - {}", c.id, c.name, c.title),
        }
    }
}
