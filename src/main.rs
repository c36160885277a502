use clap::Parser;
use log::{info, warn};
use ranker::ComponentType;
use ranker::core::config::{CliOverrides, ReportFormat, load_config, resolve};
use ranker::core::emit::{Emitter, JsonLinesEmitter};
use ranker::core::sequence::Sequence;
use ranker::core::state::Ranker;
use ranker::host::report::write_report;
use ranker::host::Host;
use ranker::host::payload::load_payload;
use simplelog::{ConfigBuilder, WriteLogger};
use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;

/// Emissions file used by the terminal ranker when none is configured.
const TUI_EMIT_PATH: &str = "ranker-emissions.jsonl";

#[derive(Parser)]
#[command(name = "ranker", about = "Drag-and-drop ranking of videos and audio clips")]
struct Args {
    /// Items JSON: `{"component_type": ..., "items": [...]}` or a bare array
    items: Option<PathBuf>,

    /// Item schema to use when the payload doesn't name one
    #[arg(short, long, value_enum)]
    component_type: Option<ComponentType>,

    /// Replay JSON-lines gestures instead of opening the terminal UI
    #[arg(long)]
    headless: bool,

    /// Gesture file for --headless (default: stdin)
    #[arg(long, requires = "headless")]
    gestures: Option<PathBuf>,

    /// Write emissions here as JSON lines
    #[arg(long)]
    emit: Option<PathBuf>,

    /// Write a ranking report here on exit
    #[arg(long)]
    report: Option<PathBuf>,

    /// Report layout
    #[arg(long, value_enum)]
    report_format: Option<ReportFormat>,

    /// Shorthand for `--report-format csv`
    #[arg(long, conflicts_with = "report_format")]
    csv: bool,
}

fn main() -> io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    let config = load_config()?;
    let resolved = resolve(
        &config,
        &CliOverrides {
            component_type: args.component_type,
            emit_path: args.emit.clone(),
            report_path: args.report.clone(),
            report_format: args
                .report_format
                .or(args.csv.then_some(ReportFormat::Csv)),
        },
    );

    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    if let Ok(log_file) = File::create(&resolved.log_path) {
        let _ = WriteLogger::init(resolved.log_level, log_config, log_file);
    }
    info!("Ranker starting up: {:?}", resolved);

    // Headless gestures on stdin leave stdin unavailable for the payload
    let gestures_on_stdin = args.headless && args.gestures.is_none();
    let ranker = if args.items.is_none() && gestures_on_stdin {
        warn!("No items file; waiting for a load gesture");
        Ranker::with_items(resolved.component_type, Sequence::default())
    } else {
        let payload = load_payload(args.items.as_deref(), resolved.component_type)?;
        Ranker::with_items(payload.component_type, payload.items)
    };

    let emitter: Box<dyn Emitter> = match (&resolved.emit_path, args.headless) {
        (Some(path), _) => Box::new(JsonLinesEmitter::new(File::create(path)?)),
        (None, true) => Box::new(JsonLinesEmitter::new(io::stdout())),
        (None, false) => Box::new(JsonLinesEmitter::new(File::create(TUI_EMIT_PATH)?)),
    };
    let mut host = Host::new(ranker, emitter);

    if args.headless {
        let summary = match &args.gestures {
            Some(path) => host.replay(BufReader::new(File::open(path)?))?,
            None => host.replay(io::stdin().lock())?,
        };
        info!("Headless run done: {:?}", summary);
    } else {
        ranker::tui::run(&mut host)?;
    }

    if let Some(path) = &resolved.report_path {
        write_report(
            path,
            resolved.report_format,
            &resolved.report_title,
            host.ranker.schema,
            host.sequence(),
        )?;
    }
    Ok(())
}
