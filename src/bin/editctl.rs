use clap::{Parser, Subcommand, ValueEnum};
use ai_photo_editor::editor::adjustments::Adjustment;
use ai_photo_editor::editor::image::ImageState;
use ai_photo_editor::editor::orchestrator::EditOutcome;
use ai_photo_editor::prompt::presets::{find_lut, quick_action, Panel, LUT_CATEGORIES, QUICK_ACTIONS};
use ai_photo_editor::prompt::suggestions::{SuggestionKind, CARD_THEMES};
use ai_photo_editor::{Config, EditOrchestrator, RelayClient};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "editctl", about = "CLI for the AI photo editor relay", version)]
struct Cli {
    /// Override EDITOR_API_BASE_URL
    #[arg(global = true, long)]
    api_base_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Check that the relay is reachable
    Health,
    /// Edit an image through the relay and save the result
    Edit {
        /// Image to upload as the original
        input: PathBuf,
        /// Slider values, sent as one adjustment instruction before anything else
        #[arg(long)]
        brightness: Option<i32>,
        #[arg(long)]
        contrast: Option<i32>,
        #[arg(long)]
        saturation: Option<i32>,
        #[arg(long)]
        sepia: Option<i32>,
        #[arg(long)]
        hue: Option<i32>,
        #[arg(long, allow_hyphen_values = true)]
        sharpness: Option<i32>,
        #[arg(long)]
        vignette: Option<i32>,
        /// Quick action by name (repeatable), e.g. `enhance`, `bw`, `magic`
        #[arg(long = "preset", value_name = "NAME")]
        presets: Vec<String>,
        /// LUT preset name or free-form look description
        #[arg(long, value_name = "LOOK")]
        lut: Option<String>,
        /// Greeting-card theme
        #[arg(long, value_name = "THEME")]
        card: Option<String>,
        /// Custom instruction (repeatable, applied in order)
        #[arg(long = "prompt", value_name = "TEXT")]
        prompts: Vec<String>,
        /// Step back this many versions before saving
        #[arg(long, default_value_t = 0)]
        undo: usize,
        /// Output path; defaults to `edited-<input name>` next to the input
        #[arg(long, value_name = "PATH")]
        out: Option<PathBuf>,
    },
    /// Ask the relay for a prompt idea
    Suggest {
        kind: SuggestArg,
        /// Theme for inspiration ideas
        #[arg(long, default_value = "")]
        theme: String,
    },
    /// List panels, sliders, quick actions, LUT presets and card themes
    Presets {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum SuggestArg {
    Inspiration,
    Magic,
    Lut,
}

impl From<SuggestArg> for SuggestionKind {
    fn from(arg: SuggestArg) -> Self {
        match arg {
            SuggestArg::Inspiration => SuggestionKind::Inspiration,
            SuggestArg::Magic => SuggestionKind::Magic,
            SuggestArg::Lut => SuggestionKind::Lut,
        }
    }
}

fn report(step: &str, outcome: EditOutcome) {
    match outcome {
        EditOutcome::Committed => println!("{}: applied", step),
        EditOutcome::Skipped => println!("{}: nothing to apply", step),
        EditOutcome::Discarded => println!("{}: result discarded", step),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load env and parse CLI
    Config::dotenv_load();
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut conf = Config::new()?;
    if let Some(url) = cli.api_base_url {
        conf.editor_api_base_url = url;
    }
    let client = RelayClient::new(&conf.editor_api_base_url);

    match cli.command {
        Commands::Health => match client.health().await {
            Ok(status) => println!("{} ({})", status, client.base_url()),
            Err(e) => {
                eprintln!("Error: {}", e.user_message());
                std::process::exit(1);
            }
        },
        Commands::Edit {
            input, brightness, contrast, saturation, sepia, hue, sharpness, vignette,
            presets, lut, card, prompts, undo, out,
        } => {
            let image = ImageState::read_file(&input).await?;
            let name = input.file_name().map(|n| n.to_string_lossy().into_owned());
            let orchestrator = EditOrchestrator::new(client);
            orchestrator.upload(image, name).await?;

            let sliders = [
                (Adjustment::Brightness, brightness),
                (Adjustment::Contrast, contrast),
                (Adjustment::Saturation, saturation),
                (Adjustment::Sepia, sepia),
                (Adjustment::Hue, hue),
                (Adjustment::Sharpness, sharpness),
                (Adjustment::Vignette, vignette),
            ];
            for (adjustment, value) in sliders {
                if let Some(v) = value {
                    orchestrator.set_adjustment(adjustment, v).await;
                }
            }

            let result = async {
                report("adjustments", orchestrator.apply_adjustments().await?);
                for name in &presets {
                    let Some(action) = quick_action(name) else {
                        eprintln!("Warning: unknown preset '{}', skipping", name);
                        continue;
                    };
                    report(action.label, orchestrator.apply_quick_action(action).await?);
                }
                if let Some(lut) = &lut {
                    let look = find_lut(lut).map(|p| p.look).unwrap_or(lut.as_str());
                    report("lut", orchestrator.apply_panel(Panel::Lut, look).await?);
                }
                if let Some(theme) = &card {
                    report("card", orchestrator.apply_panel(Panel::Card, theme).await?);
                }
                for prompt in &prompts {
                    report("prompt", orchestrator.apply_panel(Panel::Custom, prompt).await?);
                }
                Ok::<_, ai_photo_editor::error::AppError>(())
            }
            .await;
            if let Err(e) = result {
                eprintln!("Error: {}", e.user_message());
                std::process::exit(1);
            }

            for _ in 0..undo {
                orchestrator.undo().await?;
            }

            let session = orchestrator.session();
            let session = session.read().await;
            let Some(current) = session.current() else {
                eprintln!("No image in session");
                std::process::exit(1);
            };
            let path = out.unwrap_or_else(|| input.with_file_name(session.download_name()));
            tokio::fs::write(&path, current.data()).await?;
            println!(
                "Saved {} ({} bytes, version {} of {})",
                path.display(),
                current.data().len(),
                session.cursor().map(|c| c + 1).unwrap_or(0),
                session.len()
            );
        }
        Commands::Suggest { kind, theme } => {
            match client.suggest(kind.into(), &theme).await {
                Ok(prompt) => println!("{}", prompt),
                Err(e) => {
                    eprintln!("Error: {}", e.user_message());
                    std::process::exit(1);
                }
            }
        }
        Commands::Presets { json } => {
            if json {
                let v = serde_json::json!({
                    "panels": Panel::ALL,
                    "sliders": Adjustment::ALL,
                    "quickActions": QUICK_ACTIONS,
                    "luts": LUT_CATEGORIES,
                    "cardThemes": CARD_THEMES,
                });
                println!("{}", serde_json::to_string_pretty(&v)?);
            } else {
                println!("Panels:");
                for p in Panel::ALL {
                    println!("  {}", p.label());
                }
                println!("Sliders:");
                for a in Adjustment::ALL {
                    let range = a.range();
                    let mode = if a.is_previewable() { "preview" } else { "server only" };
                    println!("  {:<18} {}..={} ({})", a.label(), range.start(), range.end(), mode);
                }
                println!("Quick actions:");
                for a in QUICK_ACTIONS {
                    println!("  {:<18} {}", a.name, a.label);
                }
                for c in LUT_CATEGORIES {
                    println!("{}:", c.name);
                    for l in c.luts {
                        println!("  {}", l.name);
                    }
                }
                println!("Card themes:");
                for t in CARD_THEMES {
                    println!("  {}", t);
                }
            }
        }
    }
    Ok(())
}
