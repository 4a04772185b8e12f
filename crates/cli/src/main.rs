use anyhow::Result;
use clap::{Parser, Subcommand};
use engage_comments::{AuthorDirectory, CommentThread};
use engage_protocol::{
    remaining_chars, Comment, Post, SearchFilter, Session, UserProfile, DEFAULT_CATEGORY,
};
use engage_remote::{HttpRemoteStore, MemoryStore, RemoteStore};
use engage_search::{post_by_slug, recent_posts, SearchEngine};
use std::sync::Arc;

mod demo;

#[derive(Parser)]
#[command(name = "engage")]
#[command(about = "Drive the content sync engines against a blog API", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Base URL of the content API (falls back to ENGAGE_BASE_URL)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Access token issued at sign-in, sent as the auth cookie (falls
    /// back to ENGAGE_ACCESS_TOKEN)
    #[arg(long, global = true)]
    token: Option<String>,

    /// Act as this user id
    #[arg(long, global = true)]
    user_id: Option<String>,

    /// Display name for the acting identity (defaults to the user id)
    #[arg(long, global = true)]
    username: Option<String>,

    /// Run against a seeded in-memory store instead of a live server
    #[arg(long, global = true)]
    demo: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Search posts and page through the results
    Search {
        /// Free-text term matched against title and content
        #[arg(long, default_value = "")]
        term: String,

        /// Sort order: desc (latest first) or asc (oldest first)
        #[arg(long, default_value = "desc")]
        sort: String,

        #[arg(long, default_value = DEFAULT_CATEGORY)]
        category: String,

        /// Extra pages to fetch after the first
        #[arg(long, default_value_t = 0)]
        pages: usize,
    },

    /// Show one post by slug, with recent siblings and its comments
    Post { slug: String },

    /// List the comments on a post
    Comments { post_id: String },

    /// Submit a comment on a post (requires --user-id)
    Comment { post_id: String, text: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    let store = make_store(&cli);
    let session = make_session(&cli);

    match &cli.command {
        Commands::Search {
            term,
            sort,
            category,
            pages,
        } => {
            let filter = SearchFilter::new(
                term.clone(),
                sort.parse().unwrap_or_default(),
                category.clone(),
            );
            run_search(store, filter, *pages).await;
        }
        Commands::Post { slug } => run_post(store, session, slug).await,
        Commands::Comments { post_id } => run_comments(store, session, post_id).await,
        Commands::Comment { post_id, text } => run_submit(store, session, post_id, text).await?,
    }

    Ok(())
}

fn make_store(cli: &Cli) -> Arc<dyn RemoteStore> {
    if cli.demo {
        let mut store = demo::seeded_store();
        if let Some(user_id) = &cli.user_id {
            store = store.with_viewer(user_id.clone());
        }
        return Arc::new(store);
    }
    let base_url = cli
        .base_url
        .clone()
        .or_else(|| std::env::var("ENGAGE_BASE_URL").ok())
        .unwrap_or_else(|| "http://localhost:3000".to_string());
    let mut store = HttpRemoteStore::new(base_url);
    let token = cli
        .token
        .clone()
        .or_else(|| std::env::var("ENGAGE_ACCESS_TOKEN").ok());
    if let Some(token) = token {
        store = store.with_access_token(token);
    }
    Arc::new(store)
}

fn make_session(cli: &Cli) -> Session {
    match &cli.user_id {
        Some(user_id) => Session::signed_in(UserProfile {
            id: user_id.clone(),
            username: cli.username.clone().unwrap_or_else(|| user_id.clone()),
            profile_picture: String::new(),
            is_admin: false,
        }),
        None => Session::anonymous(),
    }
}

async fn run_search(store: Arc<dyn RemoteStore>, filter: SearchFilter, pages: usize) {
    let engine = SearchEngine::new(store);
    engine.apply_filter(filter).await;
    for _ in 0..pages {
        engine.load_more().await;
    }

    let window = engine.window().await;
    println!("query: {}", engine.query_string().await);
    if window.posts.is_empty() {
        println!("no posts found");
        return;
    }
    for post in &window.posts {
        println!("  [{}] {}  ({})", post.category, post.title, post.slug);
    }
    println!(
        "{} posts{}",
        window.posts.len(),
        if window.has_more {
            ", more available"
        } else {
            ""
        }
    );
}

async fn run_post(store: Arc<dyn RemoteStore>, session: Session, slug: &str) {
    let Some(post) = post_by_slug(store.as_ref(), slug).await else {
        println!("post '{slug}' not found");
        return;
    };
    println!("{}", post.title);
    println!("category: {}  ~{} min read", post.category, read_minutes(&post));

    let recent = recent_posts(store.as_ref(), 3).await;
    if !recent.is_empty() {
        println!("recent articles:");
        for sibling in &recent {
            println!("  {}  ({})", sibling.title, sibling.slug);
        }
    }

    print_thread(store, session, &post.id).await;
}

async fn run_comments(store: Arc<dyn RemoteStore>, session: Session, post_id: &str) {
    print_thread(store, session, post_id).await;
}

async fn print_thread(store: Arc<dyn RemoteStore>, session: Session, post_id: &str) {
    let thread = CommentThread::new(post_id, session, store.clone());
    thread.load().await;
    let comments = thread.comments().await;
    if comments.is_empty() {
        println!("no comments yet");
        return;
    }

    let directory = AuthorDirectory::new(store);
    println!("comments ({}):", comments.len());
    for comment in &comments {
        let author = match directory.resolve(&comment.author_id).await {
            Some(profile) => format!("@{}", profile.username),
            None => "anonymous user".to_string(),
        };
        println!("  {author}: {}{}", comment.content, like_label(comment));
    }
}

async fn run_submit(
    store: Arc<dyn RemoteStore>,
    session: Session,
    post_id: &str,
    text: &str,
) -> Result<()> {
    let thread = CommentThread::new(post_id, session, store)
        .on_sign_in_required(|| println!("you must be signed in; visit /sign-in"));
    log::debug!("{} characters remaining", remaining_chars(text));
    let created = thread.submit(text).await?;
    println!("comment {} posted on {post_id}", created.id);
    Ok(())
}

fn like_label(comment: &Comment) -> String {
    match comment.number_of_likes {
        0 => String::new(),
        1 => "  (1 like)".to_string(),
        n => format!("  ({n} likes)"),
    }
}

/// Rough reading time the way the post page shows it: one minute per
/// thousand characters of content.
fn read_minutes(post: &Post) -> usize {
    post.content.chars().count() / 1000
}
