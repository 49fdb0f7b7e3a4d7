use super::render::{print_messages, Renderer};
use super::session::Session;
use super::setup::{init_tracing, Cli, Commands};
use clap::Parser;
use directories::ProjectDirs;
use folio::api::{CmdMessage, CmdResult, ConfigAction, FolioApi, FolioPaths};
use folio::book::Book;
use folio::commands;
use folio::config::{FolioConfig, KEYS};
use folio::error::{FolioError, Result};
use folio::listing::ListingMode;
use folio::prefs::{FontSize, ReaderPrefs};
use folio::store::fs::FileStore;
use folio::views::Screen;
use std::path::PathBuf;

struct AppContext {
    api: FolioApi<FileStore>,
    config: FolioConfig,
    renderer: Renderer,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let use_color = !cli.no_color && console::Term::stdout().features().colors_supported();
    colored::control::set_override(use_color);

    let paths = FolioPaths::new(resolve_data_dir(&cli)?);
    tracing::debug!(data_dir = %paths.data_dir.display(), "resolved data directory");

    // Config must stay reachable even when the configured book is broken.
    if let Some(Commands::Config { key, value, unset }) = &cli.command {
        return handle_config(&paths, key.clone(), value.clone(), *unset);
    }

    let mut ctx = init_context(&cli, paths, use_color)?;

    match cli.command {
        Some(Commands::Toc { bookmarks: true }) | Some(Commands::Bookmarks) => {
            handle_contents(&mut ctx, ListingMode::Bookmarks)
        }
        Some(Commands::Toc { bookmarks: false }) | None => {
            handle_contents(&mut ctx, ListingMode::All)
        }
        Some(Commands::Read {
            locator,
            size,
            highlight,
            sizes,
        }) => handle_read(&mut ctx, &locator, size, highlight, sizes),
        Some(Commands::Next) => {
            let result = ctx.api.next()?;
            show(&ctx, &result)
        }
        Some(Commands::Prev) => {
            let result = ctx.api.prev()?;
            show(&ctx, &result)
        }
        Some(Commands::Continue) => {
            let result = ctx.api.resume()?;
            show(&ctx, &result)
        }
        Some(Commands::Bookmark { locator }) => {
            let result = ctx.api.toggle_bookmark(locator.as_deref())?;
            show(&ctx, &result)
        }
        Some(Commands::Session) => handle_session(&mut ctx),
        Some(Commands::Config { .. }) => Ok(()),
    }
}

fn resolve_data_dir(cli: &Cli) -> Result<PathBuf> {
    if let Some(dir) = &cli.data_dir {
        return Ok(dir.clone());
    }
    ProjectDirs::from("com", "folio", "folio")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| {
            FolioError::Config("Could not determine a data directory; pass --data-dir".to_string())
        })
}

fn init_context(cli: &Cli, paths: FolioPaths, use_color: bool) -> Result<AppContext> {
    let config = FolioConfig::load(&paths.data_dir).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "ignoring unreadable config, using defaults");
        FolioConfig::default()
    });

    let book = match cli.book.as_ref().or(config.book.as_ref()) {
        Some(path) => Book::load(path)?,
        None => Book::embedded()?,
    };
    tracing::debug!(title = %book.title, sections = book.section_count(), "book ready");

    let store = FileStore::new(paths.data_dir.clone());
    let api = FolioApi::new(book, store, paths);

    Ok(AppContext {
        api,
        config,
        renderer: Renderer::new(use_color)?,
    })
}

fn show(ctx: &AppContext, result: &CmdResult) -> Result<()> {
    show_with(ctx, result, &ReaderPrefs::new(ctx.config.font_size))
}

fn show_with(ctx: &AppContext, result: &CmdResult, prefs: &ReaderPrefs) -> Result<()> {
    if let Some(screen) = &result.screen {
        print!("{}", ctx.renderer.screen(screen, prefs, "")?);
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_contents(ctx: &mut AppContext, mode: ListingMode) -> Result<()> {
    let result = ctx.api.contents(mode)?;
    show(ctx, &result)
}

fn handle_read(
    ctx: &mut AppContext,
    locator: &str,
    size: Option<FontSize>,
    highlight: Option<usize>,
    sizes: bool,
) -> Result<()> {
    let mut result = ctx.api.open(locator)?;

    let mut prefs = ReaderPrefs::new(size.unwrap_or(ctx.config.font_size));
    if sizes {
        prefs.toggle_font_menu();
    }
    let paragraph_count = match &result.screen {
        Some(Screen::Reading(view)) => view.paragraphs.len(),
        _ => 0,
    };
    if let Some(n) = highlight {
        if (1..=paragraph_count).contains(&n) {
            prefs.toggle_highlight(n - 1);
        } else {
            result.add_message(CmdMessage::warning(format!(
                "No paragraph {} (this section has {})",
                n, paragraph_count
            )));
        }
    }
    show_with(ctx, &result, &prefs)
}

fn handle_session(ctx: &mut AppContext) -> Result<()> {
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut session = Session::new(&mut ctx.api, &ctx.renderer, ctx.config.font_size);
    session.run(stdin.lock(), &mut stdout.lock())
}

fn handle_config(
    paths: &FolioPaths,
    key: Option<String>,
    value: Option<String>,
    unset: bool,
) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(key), _) if unset => ConfigAction::Unset(key),
        (Some(key), None) => ConfigAction::ShowKey(key),
        (Some(key), Some(value)) => ConfigAction::Set(key, value),
    };
    let show_all = action == ConfigAction::ShowAll;

    let result = commands::config::run(paths, action)?;
    if let (true, Some(config)) = (show_all, &result.config) {
        for key in KEYS {
            let value = config.get(key)?.unwrap_or_else(|| "(not set)".to_string());
            println!("{} = {}", key, value);
        }
    }
    print_messages(&result.messages);
    Ok(())
}
