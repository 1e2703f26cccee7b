use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use console::style;
use std::path::PathBuf;
use std::thread;
use std::time::Duration;
use tracing::info;

use busyline::cmd::Cmd;
use busyline::config::Config;
use busyline::spinner::{
    Spinner, SpinnerStyle, TermRenderer, TerminalRenderer, frame_set_for, wave_frames,
};
use busyline::logger;

#[derive(Parser)]
#[command(name = "busyline", version, about = "Animated busy indicator for the terminal")]
struct Cli {
    /// Path to a config file (defaults to ~/.config/busyline/config.yaml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Draw the spinner on stderr instead of stdout
    #[arg(long, global = true)]
    stderr: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Args)]
struct SpinnerArgs {
    /// Message shown next to the spinner
    #[arg(short, long)]
    message: Option<String>,

    /// Style name or id (see `busyline styles`); random when omitted
    #[arg(short, long)]
    style: Option<SpinnerStyle>,
}

#[derive(Subcommand)]
enum Command {
    /// Show a spinner for a fixed number of seconds
    Spin {
        #[command(flatten)]
        spinner: SpinnerArgs,

        /// How long to spin
        #[arg(long, default_value_t = 3)]
        seconds: u64,
    },
    /// Run a command with a spinner, then print its output
    Run {
        #[command(flatten)]
        spinner: SpinnerArgs,

        /// Command and arguments to run
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        command: Vec<String>,
    },
    /// List the available spinner styles
    Styles,
}

fn main() -> Result<()> {
    let _log_guard = logger::init()?;
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;

    let use_stderr = cli.stderr;
    let renderer = || -> Box<dyn TerminalRenderer> {
        if use_stderr {
            Box::new(TermRenderer::stderr())
        } else {
            Box::new(TermRenderer::stdout())
        }
    };

    match cli.command {
        Command::Spin { spinner, seconds } => {
            let options = config.spinner_options(spinner.message, spinner.style);
            let mut spinner = Spinner::with_options(options, renderer());
            info!(style = %spinner.style(), seconds, "spin");
            thread::sleep(Duration::from_secs(seconds));
            spinner.stop();
            Ok(())
        }
        Command::Run { spinner, command } => {
            let Some((program, args)) = command.split_first() else {
                bail!("No command given");
            };
            let cmd = Cmd::new(program.as_str()).args(args.iter().cloned());
            let message = spinner.message.or_else(|| Some(cmd.display()));
            let options = config.spinner_options(message, spinner.style);

            let mut spinner = Spinner::with_options(options, renderer());
            let result = cmd.run();
            spinner.stop();

            let output = result?;
            print!("{}", String::from_utf8_lossy(&output.stdout));
            eprint!("{}", String::from_utf8_lossy(&output.stderr));
            Ok(())
        }
        Command::Styles => {
            print_styles();
            Ok(())
        }
    }
}

fn print_styles() {
    for style_id in SpinnerStyle::ALL {
        let frames = match frame_set_for(style_id.id()) {
            Ok(frames) => frames.iter().collect::<Vec<_>>().join(" "),
            Err(_) => wave_frames("wave").iter().collect::<Vec<_>>().join(" "),
        };
        println!(
            "{:>2}  {:<20} {:<20} {}",
            style(style_id.id()).dim(),
            style(style_id.name()).bold().cyan(),
            style_id.description(),
            frames
        );
    }
}
