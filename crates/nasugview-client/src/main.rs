//! Terminal front-end for the NasugView consumer client.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;

use nasugview_client::navigation::{BusinessParams, ProfileParams, Route, Tab};
use nasugview_client::notice::Notice;
use nasugview_client::screens::calendar::CalendarScreen;
use nasugview_client::screens::directory::{BusinessDetails, DirectoryScreen, NOT_FOUND_MESSAGE};
use nasugview_client::screens::lock_nav;
use nasugview_client::screens::reviews::ReviewScreen;
use nasugview_client::session::Session;
use nasugview_client::{init_tracing, AppState, ClientConfig};
use nasugview_shared::calendar::DayMarking;
use nasugview_shared::media::ImageSource;
use nasugview_shared::validation::{LoginForm, RatingDimension, SignupForm};
use nasugview_shared::{Category, PhotoKind, ReviewTag, UserProfile};

#[derive(Parser)]
#[command(name = "nasugview")]
#[command(about = "NasugView - Nasugbu business directory and reviews", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Backend base URL (overrides NASUGVIEW_BASE_URL)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Directory for the local session database (overrides NASUGVIEW_DATA_DIR)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum PhotoArg {
    Profile,
    Cover,
}

impl From<PhotoArg> for PhotoKind {
    fn from(arg: PhotoArg) -> Self {
        match arg {
            PhotoArg::Profile => PhotoKind::Profile,
            PhotoArg::Cover => PhotoKind::Cover,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in and remember the username
    Login {
        #[arg(short, long)]
        username: String,
        #[arg(short, long, env = "NASUGVIEW_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Create an account and sign in
    Signup {
        #[arg(long)]
        email: String,
        #[arg(short, long)]
        username: String,
        #[arg(short, long)]
        password: String,
        #[arg(long)]
        confirm: String,
    },

    /// Forget the stored username
    Logout,

    /// List directory businesses
    Businesses {
        /// Clothes, Resorts or Restaurants
        #[arg(short, long)]
        category: Option<Category>,
    },

    /// Show one business
    Business { name: String },

    /// Show reviews and the rating breakdown of a business
    Reviews {
        business: String,
        /// All, "Good Service" or "Excellent Quality"
        #[arg(short, long, default_value = "All")]
        tag: ReviewTag,
    },

    /// Keep the review list of a business up to date until interrupted
    Watch {
        business: String,
        #[arg(short, long, default_value = "All")]
        tag: ReviewTag,
    },

    /// Review a business
    SubmitReview {
        business: String,
        /// Excellent quality, 1-5
        #[arg(long)]
        excellent: u8,
        /// Good service, 1-5
        #[arg(long)]
        service: u8,
        #[arg(short, long)]
        comment: String,
        #[arg(short, long)]
        image: Option<PathBuf>,
    },

    /// List your own reviews
    MyReviews,

    /// Show your profile and posts
    Posts,

    /// Publish a post
    Post {
        #[arg(short, long, default_value = "")]
        caption: String,
        #[arg(short, long)]
        image: Option<PathBuf>,
    },

    /// Replace your profile or cover photo
    UploadPhoto {
        #[arg(value_enum)]
        kind: PhotoArg,
        path: PathBuf,
    },

    /// Show the event calendar
    Calendar {
        /// Day to select, YYYY-MM-DD
        #[arg(short, long)]
        date: Option<NaiveDate>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = ClientConfig::from_env();
    if let Some(url) = cli.base_url {
        config.base_url = url.trim_end_matches('/').to_string();
    }
    if let Some(dir) = cli.data_dir {
        config.data_dir = Some(dir);
    }
    info!(?config, "Loaded configuration");

    let state = AppState::open(config).context("failed to start client")?;

    match cli.command {
        Commands::Login { username, password } => {
            let mut screen = state.login_screen();
            screen.form = LoginForm { username, password };
            let result = screen.submit().await;
            print_notice(screen.notice());
            let profile = result?;
            println!("Welcome, {}!", profile.username);
        }

        Commands::Signup {
            email,
            username,
            password,
            confirm,
        } => {
            lock_nav(&state.nav).navigate(Route::Signup)?;
            let mut screen = state.signup_screen();
            screen.form = SignupForm {
                email,
                username,
                password,
                confirm_password: confirm,
            };
            let result = screen.submit().await;
            print_notice(screen.notice());
            result?;
        }

        Commands::Logout => {
            state.sign_out()?;
            println!("Signed out.");
        }

        Commands::Businesses { category } => {
            let mut screen = DirectoryScreen::new(state.nav.clone());
            screen.set_category(category);
            for business in screen.listing() {
                let category = business.category.map(|c| c.label()).unwrap_or("-");
                println!(
                    "{:<22} {:>3.1}★  {:<12} {}",
                    business.name, business.rating, category, business.address
                );
            }
        }

        Commands::Business { name } => match BusinessDetails::load(&name) {
            BusinessDetails::Found { business, region } => {
                println!("{}", business.name);
                println!("  {}", business.address);
                println!("  {}  |  {}", business.phone, business.hours);
                println!(
                    "  {:.1}★  pin {:.6},{:.6} (span {}°)",
                    business.rating,
                    region.center.latitude,
                    region.center.longitude,
                    region.latitude_delta
                );
            }
            BusinessDetails::NotFound { .. } => bail!(NOT_FOUND_MESSAGE),
        },

        Commands::Reviews { business, tag } => {
            let mut screen = state.review_screen(&business)?;
            screen.set_tag(tag);
            screen.load().await?;
            print_reviews(&screen);
        }

        Commands::Watch { business, tag } => {
            let mut screen = state.review_screen(&business)?;
            screen.set_tag(tag);
            if let Err(e) = screen.mount(state.config.refresh_policy()).await {
                tracing::warn!(error = %e, "First load failed, retrying in background");
            }

            let mut last_seen = None;
            let mut ticker = tokio::time::interval(Duration::from_millis(250));
            let ctrl_c = tokio::signal::ctrl_c();
            tokio::pin!(ctrl_c);
            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        let snapshot = screen.snapshot();
                        let fingerprint = (snapshot.reviews.clone(), snapshot.histogram);
                        if last_seen.as_ref() != Some(&fingerprint) {
                            print_reviews(&screen);
                            last_seen = Some(fingerprint);
                        }
                    }
                    _ = &mut ctrl_c => break,
                }
            }
            screen.unmount();
        }

        Commands::SubmitReview {
            business,
            excellent,
            service,
            comment,
            image,
        } => {
            require_session(&state)?;
            {
                let mut nav = lock_nav(&state.nav);
                nav.navigate(Route::BusinessDetails(BusinessParams::new(&business)))?;
                nav.navigate(Route::Review(BusinessParams::new(&business)))?;
                nav.navigate(Route::SubmitReview(BusinessParams::new(&business)))?;
            }

            let screen = state.submit_review_screen(&business)?;
            screen.rate(RatingDimension::ExcellentQuality, excellent)?;
            screen.rate(RatingDimension::GoodService, service)?;
            screen.set_comment(comment);
            screen.pick_image(image);

            let result = screen.submit().await;
            print_notice(screen.notice().as_ref());
            result?;
            println!("Review submitted for {business}.");
        }

        Commands::MyReviews => {
            let username = require_session(&state)?;
            {
                let mut nav = lock_nav(&state.nav);
                nav.select_tab(Tab::More)?;
                nav.navigate(Route::MyReviews { username })?;
            }

            let mut screen = state.my_reviews_screen();
            screen.load().await?;
            if let Some(empty) = screen.empty_message() {
                println!("{empty}");
            }
            for review in screen.reviews() {
                println!(
                    "#{} {}  quality {}★  service {}★  {}",
                    review.id,
                    review.business_name,
                    review.excellent_rating,
                    review.service_rating,
                    review.created_at
                );
                println!("    {}", review.comment);
                if let Some(url) = screen.image_url(review) {
                    println!("    photo: {url}");
                }
            }
        }

        Commands::Posts => {
            let username = require_session(&state)?;
            open_profile(&state, username)?;

            let mut screen = state.profile_screen();
            screen.load_posts().await?;
            println!("profile: {}", describe_image(screen.photo(PhotoKind::Profile)));
            println!("cover:   {}", describe_image(screen.photo(PhotoKind::Cover)));
            for post in screen.posts() {
                println!("[{}] {}", post.created_at, post.caption);
                if let Some(url) = screen.post_image_url(post) {
                    println!("    {url}");
                }
            }
        }

        Commands::Post { caption, image } => {
            let username = require_session(&state)?;
            open_profile(&state, username)?;

            let mut screen = state.profile_screen();
            screen.compose.caption = caption;
            screen.compose.image = image;
            let result = screen.submit_post().await;
            print_notice(screen.notice());
            result?;
            println!("{} post(s) on your profile.", screen.posts().len());
        }

        Commands::UploadPhoto { kind, path } => {
            let username = require_session(&state)?;
            open_profile(&state, username)?;

            let kind = PhotoKind::from(kind);
            let mut screen = state.profile_screen();
            let result = screen.change_photo(kind, &path).await;
            print_notice(screen.notice());
            result?;
            println!("{}: {}", kind.label(), describe_image(screen.photo(kind)));
        }

        Commands::Calendar { date } => {
            let screen = CalendarScreen::new(Local::now().date_naive(), date);
            for (day, marking) in screen.markings() {
                let label = match marking {
                    DayMarking::Today => "today",
                    DayMarking::Selected => "selected",
                    DayMarking::Event => "event",
                };
                println!("{day}  {label}");
            }
            match screen.selected_event() {
                Some(event) => println!(
                    "\n{}: {} at {}, {}",
                    screen.selected(),
                    event.name,
                    event.location,
                    event.time
                ),
                None => println!("\n{}: no events", screen.selected()),
            }
        }
    }

    Ok(())
}

fn require_session(state: &AppState) -> Result<String> {
    match state.session.current() {
        Session::SignedIn(profile) => Ok(profile.username),
        Session::SignedOut => bail!("Not signed in. Run `nasugview login` first."),
    }
}

fn open_profile(state: &AppState, username: String) -> Result<()> {
    let mut nav = lock_nav(&state.nav);
    nav.select_tab(Tab::More)?;
    nav.navigate(Route::Profile(ProfileParams {
        profile: UserProfile::named(username),
    }))?;
    Ok(())
}

fn print_notice(notice: Option<&Notice>) {
    match notice {
        Some(Notice::Alert { title, message }) => eprintln!("[{title}] {message}"),
        Some(Notice::Status(status)) => eprintln!("{}", status.message),
        None => {}
    }
}

fn describe_image(source: ImageSource) -> String {
    match source {
        ImageSource::Remote(url) => url,
        ImageSource::Bundled(asset) => format!("{asset} (default)"),
    }
}

fn print_reviews(screen: &ReviewScreen) {
    let business = screen.business();
    println!("{} - {}", business.name, screen.tag());
    for bar in screen.histogram_bars() {
        let width = (bar.percent / 5.0).round() as usize;
        println!(
            "  {}★ {:<20} {:>5.1}% ({})",
            bar.stars,
            "█".repeat(width),
            bar.percent,
            bar.count
        );
    }
    let reviews = screen.visible_reviews();
    if reviews.is_empty() {
        println!("  No reviews yet.");
    }
    for review in reviews {
        println!(
            "  {}  quality {}★  service {}★  {}",
            review.username, review.excellent_rating, review.service_rating, review.created_at
        );
        println!("    {}", review.comment);
    }
}
