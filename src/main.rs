// SPDX-License-Identifier: MPL-2.0
use pixel_studio::app::{script, App};
use pixel_studio::config;
use pixel_studio::error::Result;
use pixel_studio::infrastructure::HttpImageProcessor;
use pixel_studio::media::ImageRef;
use pixel_studio::session::{Event, Message};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info, warn, Level};
use tracing_subscriber::FmtSubscriber;

const USAGE: &str = "\
Usage: pixel-studio [OPTIONS] --output FILE INPUT [--op SPEC]...

Options:
  --config DIR             Config directory (default: platform config dir)
  --endpoint URL           Processing service base URL
  --op SPEC                Operation to apply, repeatable:
                             name | name:key=value,... |
                             perspective:x,y;x,y;x,y;x,y | undo | redo | reset
  -o, --output FILE        Where to write the final image
  --no-preserve-original   Do not ask the service to keep the upload
  --save-config            Persist the effective settings to the config dir
  -v, --verbose            Debug logging
  -h, --help               Show this help";

struct Flags {
    config_dir: Option<PathBuf>,
    endpoint: Option<String>,
    ops: Vec<String>,
    output: PathBuf,
    no_preserve_original: bool,
    save_config: bool,
    verbose: bool,
    input: PathBuf,
}

fn parse_flags() -> std::result::Result<Option<Flags>, pico_args::Error> {
    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        return Ok(None);
    }

    let flags = Flags {
        config_dir: args.opt_value_from_str("--config")?,
        endpoint: args.opt_value_from_str("--endpoint")?,
        ops: args.values_from_str("--op")?,
        output: args.value_from_str(["-o", "--output"])?,
        no_preserve_original: args.contains("--no-preserve-original"),
        save_config: args.contains("--save-config"),
        verbose: args.contains(["-v", "--verbose"]),
        input: args.free_from_str()?,
    };

    let rest = args.finish();
    if !rest.is_empty() {
        return Err(pico_args::Error::ArgumentParsingFailed {
            cause: format!("unexpected arguments: {rest:?}"),
        });
    }
    Ok(Some(flags))
}

#[tokio::main]
async fn main() -> ExitCode {
    let flags = match parse_flags() {
        Ok(Some(flags)) => flags,
        Ok(None) => {
            println!("{USAGE}");
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            eprintln!("error: {err}\n\n{USAGE}");
            return ExitCode::from(2);
        }
    };

    let level = if flags.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .compact()
        .init();

    match run(flags).await {
        Ok(0) => ExitCode::SUCCESS,
        Ok(failed) => {
            warn!(failed, "some operations failed");
            ExitCode::FAILURE
        }
        Err(err) => {
            error!(error = %err, "aborted");
            ExitCode::FAILURE
        }
    }
}

/// Runs every op in order and saves the result. Returns the number of
/// operations the service failed.
async fn run(flags: Flags) -> Result<usize> {
    let (mut config, warning) = config::load_with_override(flags.config_dir.clone());
    if let Some(key) = warning {
        warn!(key = %key, "config could not be read, using defaults");
    }
    if let Some(endpoint) = flags.endpoint {
        config.service.endpoint = endpoint;
    }
    if flags.no_preserve_original {
        config.editing.preserve_original = false;
    }
    if flags.save_config {
        config::save_with_override(&config, flags.config_dir.clone())?;
        info!("settings saved");
    }

    // Parse everything up front so a typo fails before any request
    let scripts = flags
        .ops
        .iter()
        .map(|spec| script::parse(spec).map(|messages| (spec, messages)))
        .collect::<std::result::Result<Vec<_>, _>>()?;

    let processor = HttpImageProcessor::new(&config.service.endpoint, &config.service.route)?;
    info!(url = %processor.url(), "processing service");
    let mut app = App::new(processor, &config);

    let source = ImageRef::open(&flags.input)?;
    app.dispatch(Message::SelectSource(source)).await;

    let mut failed = 0;
    for (spec, messages) in scripts {
        for message in messages {
            match app.dispatch(message).await {
                Event::HistoryChanged => {
                    info!(op = %spec, entries = app.session().ledger().len(), "applied");
                }
                Event::ProcessingFailed(err) => {
                    failed += 1;
                    warn!(op = %spec, error = %err, key = err.i18n_key(), "processing failed");
                }
                Event::ParameterRejected(err) => {
                    warn!(op = %spec, error = %err, "parameter rejected");
                }
                Event::ProcessingRequested(_) | Event::None => {}
            }
        }
    }

    if let Some(image) = app.session().current_image() {
        image.save_to_path(&flags.output)?;
        info!(
            path = %flags.output.display(),
            width = image.width(),
            height = image.height(),
            "saved"
        );
    }
    Ok(failed)
}
