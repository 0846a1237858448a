//! Valentine Card Studio CLI
//!
//! Thin wrapper around valentine-core functions for command-line usage.
//!
//! ## Usage
//!
//! ```bash
//! # Print the share link for a card
//! valentine encode --to Alex --msg "Hi & bye" --theme dark --align right
//!
//! # Reconstruct a card from a share link
//! valentine decode "https://valentine.cards/card/view?to=Alex&msg=Hi"
//!
//! # Export a card as PNG, JPEG or PDF
//! valentine export --format pdf --to Alex --msg "Hi" --out ./cards
//!
//! # Step through compose, preview and share interactively
//! valentine wizard
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tokio::io::AsyncBufReadExt;
use valentine_core::{
    Alignment, CardConfig, CardError, CardResult, CardState, Clipboard, DirectorySink,
    ExportFormat, ExportPipeline, LinkCodec, ShareLink, SystemClipboard, Theme, WizardController,
    WizardStep,
};

/// Valentine Card Studio - compose, share and export cards
#[derive(Parser)]
#[command(name = "valentine")]
#[command(version = "0.1.0")]
#[command(about = "Valentine Card Studio - compose, share and export cards")]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Origin of share links (default: $VALENTINE_ORIGIN or https://valentine.cards)
    #[arg(long, global = true)]
    origin: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the share link for a card
    Encode {
        #[command(flatten)]
        card: CardArgs,

        /// Also copy the link to the system clipboard
        #[arg(long)]
        copy: bool,
    },

    /// Reconstruct a card from a share link or query string
    Decode {
        /// Share link or bare query (`to=..&msg=..`)
        link: String,

        /// Print the card as JSON
        #[arg(long)]
        json: bool,
    },

    /// Render a card and save it to disk
    Export {
        /// Output format: png, jpeg or pdf
        #[arg(short, long, default_value = "png")]
        format: String,

        /// Output directory (default: the download directory)
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Export the card carried by this share link
        #[arg(long, conflicts_with_all = ["to", "msg", "theme", "align", "font"])]
        link: Option<String>,

        #[command(flatten)]
        card: CardArgs,
    },

    /// Step through compose, preview and share interactively
    Wizard {
        /// Output directory for exports (default: the download directory)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}

/// Card fields given as flags
#[derive(Args)]
struct CardArgs {
    /// Recipient name
    #[arg(long, default_value = "")]
    to: String,

    /// Card message (at most 500 characters)
    #[arg(long, default_value = "")]
    msg: String,

    /// Theme: romantic, dark or pastel
    #[arg(long, default_value = "romantic")]
    theme: String,

    /// Alignment: left, center or right
    #[arg(long, default_value = "center")]
    align: String,

    /// Message font family
    #[arg(long, default_value = "serif")]
    font: String,
}

impl CardArgs {
    fn to_card(&self) -> Result<CardState> {
        let theme: Theme = self.theme.parse()?;
        let alignment: Alignment = self.align.parse()?;
        Ok(CardState::new(
            self.to.as_str(),
            self.msg.as_str(),
            theme,
            alignment,
            &self.font,
        ))
    }
}


/// Setup logging based on verbosity level
fn setup_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .init();
}

/// Default export directory (the OS download directory, else the current one)
fn default_out_dir() -> PathBuf {
    dirs::download_dir().unwrap_or_else(|| PathBuf::from("."))
}

fn load_config(origin: Option<&str>) -> Result<CardConfig> {
    let config = CardConfig::from_env()?;
    match origin {
        Some(origin) => Ok(config.with_origin(origin)?),
        None => Ok(config),
    }
}

fn print_card(card: &CardState) {
    let recipient = if card.recipient().is_empty() { "(empty)" } else { card.recipient() };
    let message = if card.message().is_empty() { "(empty)" } else { card.message() };
    println!("To:        {}", recipient);
    println!("Message:   {}", message);
    println!("           {}", card.counter_label());
    println!("Theme:     {}", card.theme());
    println!("Alignment: {}", card.alignment());
    println!("Font:      {}", card.font());
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose);

    let config = load_config(cli.origin.as_deref())?;

    match cli.command {
        Commands::Encode { card, copy } => {
            let card = card.to_card()?;
            let link = ShareLink::new(&config.origin, &card);
            println!("{}", link);
            if copy {
                SystemClipboard.set_text(link.as_str())?;
                eprintln!("Link copied");
            }
        }

        Commands::Decode { link, json } => {
            let card = LinkCodec::decode(&link)?;
            if json {
                let json = serde_json::to_string_pretty(&card).context("Failed to serialize card")?;
                println!("{}", json);
            } else {
                print_card(&card);
            }
        }

        Commands::Export {
            format,
            out,
            link,
            card,
        } => {
            let format: ExportFormat = format.parse()?;
            let card = match link {
                Some(link) => LinkCodec::decode(&link)?,
                None => card.to_card()?,
            };
            let sink = DirectorySink::new(out.unwrap_or_else(default_out_dir));
            let pipeline = ExportPipeline::new().with_config(config);

            let filename = match pipeline.deliver(&card, format, &sink).await {
                Ok(filename) => filename,
                Err(e) => {
                    eprintln!("{}", e.user_notice());
                    return Err(e.into());
                }
            };
            println!("{}", sink.path_for(&filename).display());
        }

        Commands::Wizard { out } => {
            let sink = DirectorySink::new(out.unwrap_or_else(default_out_dir));
            run_wizard(config, sink).await?;
        }
    }

    Ok(())
}

const WIZARD_HELP: &str = "\
Commands:
  to <name>          set the recipient
  msg <text>         set the message
  theme <name>       romantic, dark or pastel
  align <side>       left, center or right
  font <family>      message font family
  next / back        move between compose, preview and share
  export <format>    png, jpeg or pdf (preview step)
  link               print the share link
  copy               copy the share link (share step)
  reset              clear the card, stay on this step
  show               print the card
  quit               leave the wizard";

async fn run_wizard(config: CardConfig, sink: DirectorySink) -> Result<()> {
    let mut wizard = WizardController::new().with_origin(&config.origin);
    let pipeline = ExportPipeline::new().with_config(config);

    println!("Valentine Card Studio");
    println!("Exports go to {}", sink.dir().display());
    println!();
    println!("{}", WIZARD_HELP);
    println!();
    println!("[{}]", wizard.step().label());

    let stdin = tokio::io::stdin();
    let reader = tokio::io::BufReader::new(stdin);
    let mut lines = reader.lines();

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                println!();
                println!("Received shutdown signal...");
                break;
            }
            line = lines.next_line() => {
                match line {
                    Ok(Some(text)) => {
                        wizard.clear_expired();
                        let text = text.trim();
                        if text.is_empty() {
                            continue;
                        }
                        let (command, arg) = text.split_once(' ').unwrap_or((text, ""));
                        if command == "quit" || command == "exit" {
                            break;
                        }
                        if let Err(e) = wizard_command(&mut wizard, &pipeline, &sink, command, arg.trim()).await {
                            eprintln!("Error: {}", e);
                        }
                    }
                    Ok(None) => {
                        // EOF - stdin closed
                        break;
                    }
                    Err(e) => {
                        eprintln!("Read error: {}", e);
                        break;
                    }
                }
            }
        }
    }

    println!("Goodbye.");
    Ok(())
}

async fn wizard_command(
    wizard: &mut WizardController,
    pipeline: &ExportPipeline,
    sink: &DirectorySink,
    command: &str,
    arg: &str,
) -> CardResult<()> {
    match command {
        "to" => wizard.set_recipient(arg),
        "msg" => {
            wizard.set_message(arg)?;
            println!("{}", wizard.card().counter_label());
        }
        "theme" => wizard.set_theme(arg.parse()?),
        "align" => wizard.set_alignment(arg.parse()?),
        "font" => {
            wizard.set_font(arg);
            println!("Font: {}", wizard.card().font());
        }
        "next" => {
            let step = wizard.next()?;
            println!("[{}]", step.label());
            if step == WizardStep::Share {
                println!("{}", wizard.share_link());
            }
        }
        "back" => {
            let step = wizard.back()?;
            println!("[{}]", step.label());
        }
        "export" => {
            let format: ExportFormat = arg.parse()?;
            match wizard.export(pipeline, sink, format).await {
                Ok(filename) => {
                    println!("Card sealed & delivered: {}", sink.path_for(&filename).display());
                }
                Err(e) => {
                    println!("{}", e.user_notice());
                    return Err(e);
                }
            }
        }
        "link" => println!("{}", wizard.share_link()),
        "copy" => {
            wizard.copy_link(&SystemClipboard)?;
            println!("Link copied");
        }
        "reset" => {
            wizard.reset();
            println!("Card cleared");
        }
        "show" => {
            println!("[{}]", wizard.step().label());
            print_card(wizard.card());
        }
        "help" => println!("{}", WIZARD_HELP),
        other => {
            return Err(CardError::InvalidOperation(format!(
                "Unknown command '{}'. Type 'help' for commands.",
                other
            )))
        }
    }
    Ok(())
}
