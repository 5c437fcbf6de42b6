use assist_core::{AssistConfig, Mode, Responder, ThinkingDelay};
use clap::{Parser, Subcommand};
use knowledge::KnowledgeBase;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "assist")]
#[command(about = "Role-aware healthcare assistant CLI")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Ask a question, falling back to the remote service when no local table matches
    Ask {
        /// Question text
        text: String,
        /// patient, doctor or researcher
        #[arg(long, default_value = "patient")]
        mode: Mode,
        /// Remote service base URL (overrides ASSIST_REMOTE_URL)
        #[arg(long)]
        remote_url: Option<String>,
        /// Skip the thinking pause before local answers
        #[arg(long)]
        no_delay: bool,
    },
    /// Look a question up in the local tables only
    Lookup {
        /// Question text
        text: String,
        /// patient, doctor or researcher
        #[arg(long, default_value = "patient")]
        mode: Mode,
    },
    /// Print the welcome message for a persona
    Greet {
        #[arg(long, default_value = "patient")]
        mode: Mode,
    },
    /// List the doctor suggested prompts
    Samples,
    /// Load and validate knowledge tables
    CheckKnowledge {
        /// Override directory (defaults to ASSIST_KNOWLEDGE_DIR, then the embedded tables)
        #[arg(long)]
        dir: Option<PathBuf>,
    },
    /// Write the embedded tables to a directory as a starting point for an override
    ExportKnowledge {
        /// Target directory. Existing table files are never overwritten.
        dir: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("assist_core=warn".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Ask {
            text,
            mode,
            remote_url,
            no_delay,
        }) => {
            let mut cfg = AssistConfig::from_env()?;
            if let Some(url) = remote_url {
                cfg = cfg.with_remote_base_url(url)?;
            }
            if no_delay {
                cfg = cfg.with_thinking_delay(ThinkingDelay::none());
            }
            let responder = Responder::from_config(&cfg)?;
            println!("{}", responder.query(&text, mode).await);
        }
        Some(Commands::Lookup { text, mode }) => {
            let responder = Responder::from_config(&AssistConfig::from_env()?)?;
            match responder.local_answer(&text, mode) {
                Some(reply) => {
                    println!("[{}]", reply.resolution);
                    println!("{}", reply.text);
                }
                None => println!("No local match"),
            }
        }
        Some(Commands::Greet { mode }) => {
            let responder = Responder::from_config(&AssistConfig::from_env()?)?;
            println!("{}", responder.greeting(mode));
        }
        Some(Commands::Samples) => {
            let responder = Responder::from_config(&AssistConfig::from_env()?)?;
            for (i, sample) in responder.samples().iter().enumerate() {
                println!("{}. {}", i + 1, sample.question);
            }
        }
        Some(Commands::CheckKnowledge { dir }) => {
            let dir = match dir {
                Some(dir) => Some(dir),
                None => AssistConfig::from_env()?.knowledge_dir().map(PathBuf::from),
            };
            let kb = KnowledgeBase::load(dir.as_deref())?;
            match &dir {
                Some(dir) => println!("Knowledge tables in {} are valid", dir.display()),
                None => println!("Embedded knowledge tables are valid"),
            }
            println!("  symptoms: {}", kb.symptoms().len());
            println!("  clinical: {}", kb.clinical().len());
            println!("  research: {}", kb.research().len());
            println!("  samples:  {}", kb.samples().len());
        }
        Some(Commands::ExportKnowledge { dir }) => {
            KnowledgeBase::write_defaults(&dir)?;
            println!("Wrote knowledge tables to {}", dir.display());
        }
        None => {
            println!("Use 'assist --help' for commands");
        }
    }

    Ok(())
}
