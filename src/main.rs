use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use iced::{window, Task, Theme};

use apbl_studio::app::App;
use apbl_studio::assets::Icons;
use apbl_studio::layout::Layout;
use apbl_studio::settings::Settings;
use apbl_studio::{apbl, logging, run};

#[derive(Parser, Debug)]
#[command(name = "apbl-studio", version, about = "APBL editor and compiler front-end")]
struct Cli {
    /// Settings file to use instead of the platform default
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Tokenize and parse a source file, writing the analysis reports
    Compile {
        file: PathBuf,

        /// Where lexical_analysis.txt and syntax_analysis.txt go
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
    },
}

fn main() -> Result<()> {
    logging::init();
    let cli = Cli::parse();

    match cli.command {
        Some(Command::Compile { file, out_dir }) => compile(&file, &out_dir),
        None => open_window(cli.config),
    }
}

fn compile(file: &Path, out_dir: &Path) -> Result<()> {
    match apbl::compile_file(file, out_dir) {
        Ok(compilation) => {
            println!(
                "{}: {} tokens, {} statements",
                file.display(),
                compilation.tokens.len(),
                compilation.program.statements.len()
            );
            Ok(())
        }
        Err(apbl::CompileError::Io { path, source }) => {
            Err(source).with_context(|| format!("compiling {}", path.display()))
        }
        Err(e) => {
            eprint!("{}", e.report());
            bail!("{}", e)
        }
    }
}

fn open_window(config: Option<PathBuf>) -> Result<()> {
    let settings = Settings::load(config.as_deref()).context("loading settings")?;
    let icons = Icons::load(settings.asset_dir.as_deref()).context("loading icons")?;
    let handler = run::handler_for(settings.on_run);
    let window = window::Settings {
        size: settings.window_size.to_size(),
        min_size: Some(Layout::default().min_window_size(settings.font.size)),
        ..window::Settings::default()
    };
    tracing::info!(on_run = ?settings.on_run, "opening editor window");

    let app = App::new(settings, icons, handler);
    iced::application("", App::update, App::view)
        .theme(|_| Theme::Dark)
        .window(window)
        .run_with(move || (app, Task::none()))
        .context("running the editor window")
}
