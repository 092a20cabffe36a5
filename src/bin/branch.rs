use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, bail};
use branch::adapter::api::client::HttpBranchClient;
use branch::adapter::notify::terminal::TerminalNotifier;
use branch::application::dto::dashboard::{AvatarFile, DashboardSession};
use branch::application::interactors::draft_sync::{DraftSyncController, MutationOutcome};
use branch::application::interface::remote::ProfileSource;
use branch::domain::entities::id::Id;
use branch::domain::entities::link::Link;
use branch::domain::entities::theme::{ButtonStyle, PageBackground};
use branch::domain::render::{LinkSection, ProfileResolver, ProfileView, RemoteRecord, RenderModel};
use branch::infra::setup::init_cli_tracing;
use bytes::Bytes;
use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "branch", version, about = "Edit and inspect a Branch link-in-bio page")]
struct Cli {
    /// Base URL of the Branch server
    #[arg(long, env = "BRANCH_API_URL", default_value = "http://127.0.0.1:8000")]
    api_url: String,

    /// Session id issued at sign-in
    #[arg(long, env = "BRANCH_TOKEN", hide_env_values = true)]
    token: Option<String>,

    #[arg(long, env = "BRANCH_USERNAME")]
    username: Option<String>,

    /// Public origin used to print the page address
    #[arg(long, env = "BRANCH_PUBLIC_ORIGIN", default_value = "http://localhost:3000")]
    public_origin: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print someone's public page
    Show { username: Option<String> },
    /// Print your page with unsaved edits applied
    Preview(DraftArgs),
    AddLink(LinkArgs),
    EditLink {
        id: String,
        #[command(flatten)]
        link: LinkArgs,
    },
    RemoveLink { id: String },
    /// Save name, bio and optionally a new avatar
    SetProfile {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        bio: Option<String>,
        #[arg(long)]
        avatar: Option<PathBuf>,
    },
    /// Save page background, button style and font
    SetTheme(ThemeArgs),
}

#[derive(Args)]
struct LinkArgs {
    #[arg(long)]
    title: String,
    #[arg(long)]
    url: String,
}

#[derive(Args)]
struct ThemeArgs {
    /// Background token or label, e.g. `bg-black` or `dark-gray`
    #[arg(long, value_parser = parse_background)]
    background: Option<PageBackground>,
    #[arg(long, value_parser = parse_button_style)]
    button_style: Option<ButtonStyle>,
    #[arg(long)]
    font: Option<String>,
}

#[derive(Args)]
struct DraftArgs {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    bio: Option<String>,
    #[command(flatten)]
    theme: ThemeArgs,
}

fn parse_background(value: &str) -> Result<PageBackground, String> {
    let label = value.trim().replace(['-', '_'], " ");
    PageBackground::ALL
        .into_iter()
        .find(|bg| bg.token() == value.trim() || bg.label().eq_ignore_ascii_case(&label))
        .ok_or_else(|| {
            let known: Vec<&str> = PageBackground::ALL.iter().map(|bg| bg.token()).collect();
            format!("unknown background `{}` (expected one of {})", value, known.join(", "))
        })
}

fn parse_button_style(value: &str) -> Result<ButtonStyle, String> {
    value.parse().map_err(|_| {
        let known: Vec<&str> = ButtonStyle::ALL.iter().map(|s| s.as_str()).collect();
        format!("unknown button style `{}` (expected one of {})", value, known.join(", "))
    })
}

fn guess_content_type(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        _ => "application/octet-stream",
    }
}

async fn read_avatar(path: &Path) -> anyhow::Result<AvatarFile> {
    let data = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("avatar")
        .to_string();

    Ok(AvatarFile {
        file_name,
        content_type: guess_content_type(path).to_string(),
        data: Bytes::from(data),
    })
}

fn print_page(model: &RenderModel) {
    println!("{} (@{})", model.display_name, model.username);
    if let Some(bio) = &model.bio {
        println!("{}", bio);
    }
    println!("avatar:     {}", model.avatar_url);
    println!("background: {} ({})", model.page_background.label(), model.page_background.token());
    println!("buttons:    {}", model.button_variant);
    println!("font:       {}", model.font_family);
    println!();
    match model.link_section() {
        LinkSection::NoLinks => println!("No links yet"),
        LinkSection::Links(links) => {
            for link in links {
                println!("  [{}] {} -> {}", link.id, link.title, link.url);
            }
        }
    }
}

fn print_view(view: &ProfileView, username: &str) -> anyhow::Result<()> {
    match view {
        ProfileView::Resolved(model) => {
            print_page(model);
            Ok(())
        }
        ProfileView::NotFound => bail!("User @{} not found", username),
        ProfileView::Loading => bail!("Profile of @{} is not available", username),
    }
}

fn apply_theme(controller: &mut DraftSyncController, theme: ThemeArgs) {
    if let Some(background) = theme.background {
        controller.set_page_background(background);
    }
    if let Some(button_style) = theme.button_style {
        controller.set_button_style(button_style);
    }
    if let Some(font) = theme.font {
        controller.set_font_family(font);
    }
}

const LINK_FIELDS_REQUIRED: &str = "Title and url are both required";
const NOTHING_SENT: &str = "Nothing was sent";

fn finish(outcome: MutationOutcome, skipped: &str) -> anyhow::Result<()> {
    match outcome {
        MutationOutcome::Applied => Ok(()),
        MutationOutcome::Skipped => bail!("{}", skipped),
        MutationOutcome::Busy => bail!("Another change is still being saved"),
        MutationOutcome::Failed => bail!("The change was not saved"),
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let client = Arc::new(HttpBranchClient::new(&cli.api_url)?);

    if let Command::Show { username } = &cli.command {
        let username = username
            .clone()
            .or_else(|| cli.username.clone())
            .context("No username given")?;
        let record = RemoteRecord::from(client.fetch_profile_by_username(&username).await?);
        return print_view(&ProfileResolver::resolve(&record), &username);
    }

    let token = cli.token.context("A session token is required (--token or BRANCH_TOKEN)")?;
    let username = cli.username.context("A username is required (--username or BRANCH_USERNAME)")?;
    let session = DashboardSession::new(username, token);

    let mut controller = DraftSyncController::new(
        session,
        client.clone(),
        client.clone(),
        client,
        Arc::new(TerminalNotifier::stdio()),
    );
    controller.initialize().await;
    if !matches!(controller.record(), RemoteRecord::Loaded(_)) {
        bail!("Could not load your profile from {}", cli.api_url);
    }

    let result = match cli.command {
        Command::Show { .. } => Ok(()),
        Command::Preview(draft) => {
            if let Some(name) = draft.name {
                controller.set_name(name);
            }
            if let Some(bio) = draft.bio {
                controller.set_bio(bio);
            }
            apply_theme(&mut controller, draft.theme);
            let view = controller.preview();
            print_view(&view, &controller.session().username)?;
            println!();
            println!("{}", controller.public_url(&cli.public_origin));
            Ok(())
        }
        Command::AddLink(link) => {
            controller.set_link_title(link.title);
            controller.set_link_url(link.url);
            finish(controller.add_link().await, LINK_FIELDS_REQUIRED)
        }
        Command::EditLink { id, link } => {
            let link_id: Id<Link> = id.parse()?;
            controller.set_link_title(link.title);
            controller.set_link_url(link.url);
            finish(controller.edit_link(&link_id).await, LINK_FIELDS_REQUIRED)
        }
        Command::RemoveLink { id } => {
            let link_id: Id<Link> = id.parse()?;
            finish(controller.remove_link(&link_id).await, NOTHING_SENT)
        }
        Command::SetProfile { name, bio, avatar } => {
            if let Some(name) = name {
                controller.set_name(name);
            }
            if let Some(bio) = bio {
                controller.set_bio(bio);
            }
            if let Some(path) = avatar {
                controller.queue_avatar(read_avatar(&path).await?);
            }
            finish(controller.save_profile().await, NOTHING_SENT)
        }
        Command::SetTheme(theme) => {
            apply_theme(&mut controller, theme);
            finish(controller.save_theme().await, NOTHING_SENT)
        }
    };

    controller.teardown();
    result
}

#[tokio::main]
async fn main() -> ExitCode {
    init_cli_tracing();

    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}
