use std::io::IsTerminal;
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

#[cfg(target_env = "msvc")]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use errauditor::{AuditOptions, OutputOptions, ProcessingOptions, render_report, run_main};
use errauditor_error::Result;
use errauditor_go::LangGo;

#[derive(Parser, Debug)]
#[command(
    name = "errauditor",
    about = "errauditor: where do the errors your Go functions return come from",
    version
)]
pub struct Cli {
    /// Files, directories, `dir/...` trees or package paths [default: ./...]
    #[arg(value_name = "TARGET")]
    targets: Vec<String>,

    #[command(flatten)]
    output: OutputOptions,

    #[command(flatten)]
    processing: ProcessingOptions,
}

pub fn run(args: Cli) -> Result<()> {
    let total_start = Instant::now();

    // Initialize tracing subscriber for logging
    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .init();
    }

    let opts = AuditOptions {
        targets: args.targets,
        output: args.output,
        processing: args.processing,
    };

    let report = run_main::<LangGo>(&opts)?;

    let is_tty = std::io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none();
    print!("{}", render_report(&report, opts.output.color.should_use_colors(is_tty)));

    let total_secs = total_start.elapsed().as_secs_f64();
    tracing::info!(total_secs, "complete");
    Ok(())
}

fn main() -> ExitCode {
    let args = match Cli::try_parse() {
        Ok(args) => args,
        Err(err) => {
            let _ = err.print();
            return if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("errauditor: failed to run with: {}", err.message());
            tracing::error!(error = %err, "execution failed");
            ExitCode::FAILURE
        }
    }
}
