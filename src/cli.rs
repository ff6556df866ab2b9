// src/cli.rs
use std::path::PathBuf;

use color_eyre::eyre::{Result, WrapErr, bail, eyre};

use crate::{
    config::{self, WidgetOptions, consts::CONFIG_FILE},
    core::net,
    digest,
    present::Presenter,
    runner, shell,
};

#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    Show,
    Open(usize),
    Fetch,
    Digest { refresh: bool },
    Help,
}

/// Parsed command line: where the config lives, what to override, what to do.
#[derive(Clone, Debug, PartialEq)]
pub struct Invocation {
    pub config: PathBuf,
    pub overrides: Vec<(&'static str, String)>,
    pub command: Command,
}

impl Invocation {
    /// Config file first, then flag overrides on top.
    pub fn options(&self) -> Result<WidgetOptions> {
        let mut opts = config::file::load(&self.config)?;
        for (key, val) in &self.overrides {
            config::file::apply(&mut opts, key, val)?;
        }
        Ok(opts)
    }
}

pub fn run() -> Result<()> {
    let inv = parse_args(std::env::args().skip(1))?;
    if inv.command == Command::Help {
        eprintln!(include_str!("cli_help.txt"));
        return Ok(());
    }
    let opts = inv.options()?;
    logf!("CLI: {:?}", inv.command);

    match inv.command {
        Command::Show => show(&opts),
        Command::Open(line) => open(&opts, line),
        Command::Fetch => fetch(&opts),
        Command::Digest { refresh } => {
            let sum = digest::run(&opts.digest, refresh)?;
            println!(
                "Read {} row(s), kept {}, {} station(s) → wrote {} line(s) to {}",
                sum.rows_read, sum.rows_kept, sum.stations, sum.lines_written,
                opts.digest.output.display()
            );
            Ok(())
        }
        Command::Help => Ok(()),
    }
}

pub fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Result<Invocation> {
    let mut config = PathBuf::from(CONFIG_FILE);
    let mut overrides: Vec<(&'static str, String)> = Vec::new();
    let mut command: Option<Command> = None;
    let mut refresh = false;

    let mut args = args.into_iter();
    while let Some(a) = args.next() {
        let mut value = |flag: &str| args.next().ok_or_else(|| eyre!("Missing value for {flag}"));
        match a.as_str() {
            "--config"    => config = PathBuf::from(value("--config")?),
            "--file"      => overrides.push(("prices_path", value("--file")?)),
            "--url"       => overrides.push(("remote_url", value("--url")?)),
            "--no-fetch"  => overrides.push(("fetch_on_start", s!("0"))),
            "--trace"     => overrides.push(("trace_path", value("--trace")?)),
            "--no-trace"  => overrides.push(("trace_path", s!())),
            "--input"     => overrides.push(("digest_input", value("--input")?)),
            "--output"    => overrides.push(("digest_output", value("--output")?)),
            "--refresh"   => refresh = true,
            "-h" | "--help" => command = Some(Command::Help),

            "show"   => set(&mut command, Command::Show)?,
            "fetch"  => set(&mut command, Command::Fetch)?,
            "digest" => set(&mut command, Command::Digest { refresh: false })?,
            "open"   => {
                let v = value("open")?;
                let line: usize = v.parse().wrap_err_with(|| format!("Bad line number: {v}"))?;
                set(&mut command, Command::Open(line))?;
            }
            _ => bail!("Unknown arg: {}", a),
        }
    }

    let command = match command.unwrap_or(Command::Show) {
        Command::Digest { .. } => Command::Digest { refresh },
        other if refresh => bail!("--refresh only applies to digest (got {:?})", other),
        other => other,
    };

    Ok(Invocation { config, overrides, command })
}

fn set(slot: &mut Option<Command>, cmd: Command) -> Result<()> {
    match slot {
        Some(Command::Help) => Ok(()),
        Some(prev) => bail!("Only one command allowed (already have {:?})", prev),
        None => { *slot = Some(cmd); Ok(()) }
    }
}

fn show(opts: &WidgetOptions) -> Result<()> {
    let startup = runner::startup(opts);
    if let Some(w) = &startup.warning {
        eprintln!("Warning: {w}");
    }
    println!("{}", Presenter::new(&startup.table, &opts.trip).render_text());
    Ok(())
}

fn open(opts: &WidgetOptions, line: usize) -> Result<()> {
    let cat = Presenter::line_index_to_category(line)
        .ok_or_else(|| eyre!("Line {line} is not a price line (0..=3)"))?;

    let table = runner::load(opts);
    let (lat, lon) = table
        .coordinates_of(cat)
        .ok_or_else(|| eyre!("No {cat} price in {}", opts.prices.path.display()))?;

    println!("{}", shell::map_url(lat, lon));
    shell::open_map(lat, lon);
    Ok(())
}

fn fetch(opts: &WidgetOptions) -> Result<()> {
    let bytes = net::try_fetch(&opts.net.remote_url, &opts.prices.path, opts.net.timeout())?;
    println!("Wrote {} ({bytes} bytes)", opts.prices.path.display());
    Ok(())
}
