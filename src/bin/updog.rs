use clap::Parser;
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{error, info};
use updog_rs::plugin::Registry;
use updog_rs::record::JsonLinesSource;
use updog_rs::engine::write_report;
use updog_rs::{Error, RunConfig, analyse};

#[derive(Debug, Parser)]
#[command(
    name = "updog",
    about = "Summarise decoded capture records (one JSON object per line) into JSON and HTML reports"
)]
struct Args {
    /// Decoded records to analyse (NDJSON, `-` for stdin)
    #[arg(short, long, required_unless_present = "list_plugins")]
    input: Option<PathBuf>,

    /// File to write the summary JSON to
    #[arg(short = 'o', long, required_unless_present = "list_plugins")]
    output_json: Option<PathBuf>,

    /// File to write the HTML report to
    #[arg(long)]
    output_html: Option<PathBuf>,

    /// Run configuration (JSON)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Only run these plugins, comma separated (registry order is kept)
    #[arg(long, value_delimiter = ',')]
    plugins: Option<Vec<String>>,

    /// Report progress every N records (0 disables)
    #[arg(long)]
    progress_interval: Option<u64>,

    /// Capture name shown in the summary; defaults to the input file name
    #[arg(long)]
    source_name: Option<String>,

    /// Print the available plugins and exit
    #[arg(long)]
    list_plugins: bool,
}

fn load_config(args: &Args) -> Result<RunConfig, Error> {
    let mut config = match &args.config {
        Some(path) => {
            let raw = fs::read_to_string(path)?;
            serde_json::from_str(&raw)?
        }
        None => RunConfig::default(),
    };

    if let Some(name) = &args.source_name {
        config.source_name = name.clone();
    } else if config.source_name.is_empty() {
        config.source_name = args
            .input
            .as_deref()
            .and_then(Path::file_name)
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
    }
    if let Some(plugins) = &args.plugins {
        config.plugins = Some(plugins.iter().map(|p| p.trim().to_string()).collect());
    }
    if let Some(interval) = args.progress_interval {
        config.progress_interval = interval;
    }
    Ok(config)
}

fn run(args: Args) -> Result<(), Error> {
    if args.list_plugins {
        for name in Registry::builtin().names() {
            println!("{name}");
        }
        return Ok(());
    }

    let config = load_config(&args)?;
    let (Some(input), Some(output_json)) = (&args.input, &args.output_json) else {
        return Err(Error::Config("--input and --output-json are required".to_string()));
    };

    let reader: Box<dyn io::BufRead> = if input.as_os_str() == "-" {
        Box::new(io::stdin().lock())
    } else {
        Box::new(BufReader::new(File::open(input)?))
    };
    let source = JsonLinesSource::new(reader);

    // 分析成功之前不创建任何输出文件
    let mut json_buf = Vec::new();
    let analysis = analyse(source, &config, &mut json_buf, None)?;

    fs::write(output_json, &json_buf)?;
    info!(path = %output_json.display(), "wrote JSON output");

    if let Some(path) = &args.output_html {
        let mut html_out = BufWriter::new(File::create(path)?);
        write_report(&analysis.report, &config, &mut html_out)?;
        info!(path = %path.display(), "wrote HTML output");
    }
    for (plugin, skipped) in &analysis.update_failures {
        if *skipped > 0 {
            info!(plugin = %plugin, skipped, "records skipped due to malformed fields");
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    // 初始化 tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .init();

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "analysis failed");
            ExitCode::FAILURE
        }
    }
}
