use std::io::{self, BufRead, Write};
use std::path::Path;

use anyhow::Context;
use colored::Colorize;
use serde_json::json;

use cg_sdk::{Report, SdkError, SdkResult, WatchNet};
use cg_server::{CigilanteServer, ServerConfig};
use cg_types::{ANONYMOUS_ADDRESS, WATCH_CHAIN_REF};

use crate::cli::*;

const PREVIEW_CHARS: usize = 60;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Serve(args) => cmd_serve(args),
        Command::Repl(args) => cmd_repl(args, cli.format),
        Command::Config(args) => cmd_config(args, cli.format),
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<ServerConfig> {
    match path {
        Some(path) => ServerConfig::load(path)
            .with_context(|| format!("failed to load config from {}", path.display())),
        None => Ok(ServerConfig::default()),
    }
}

fn cmd_serve(args: ServeArgs) -> anyhow::Result<()> {
    let mut config = load_config(args.config.as_deref())?;
    if let Some(bind) = &args.bind {
        config.bind_addr = bind
            .parse()
            .with_context(|| format!("invalid bind address `{bind}`"))?;
    }
    println!(
        "{} Cigilante HTTP on {} ({})",
        "✓".green().bold(),
        config.bind_addr.to_string().bold(),
        WATCH_CHAIN_REF.cyan()
    );
    let runtime = tokio::runtime::Runtime::new().context("failed to start tokio runtime")?;
    runtime.block_on(CigilanteServer::new(config).serve())?;
    Ok(())
}

fn cmd_repl(args: ReplArgs, format: OutputFormat) -> anyhow::Result<()> {
    let config = load_config(args.config.as_deref())?;
    let net = WatchNet::new(config.watch_config());
    let repl = Repl::new(&net, format, config.default_event_count);
    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    repl.run(stdin.lock(), &mut stdout)?;
    Ok(())
}

fn cmd_config(args: ConfigArgs, format: OutputFormat) -> anyhow::Result<()> {
    let config = load_config(args.config.as_deref())?;
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&config)?),
        OutputFormat::Text => {
            println!("{}", "Cigilante configuration".bold());
            println!("  bind:           {}", config.bind_addr.to_string().yellow());
            println!("  max body len:   {}", config.limits.max_body_len);
            println!("  max reports:    {}", config.limits.max_reports);
            println!("  max bounty wei: {}", config.limits.max_bounty_wei);
            println!("  batch limit:    {}", config.limits.batch_limit);
            println!("  event capacity: {}", config.events.capacity);
            println!("  chain ref:      {}", WATCH_CHAIN_REF.cyan());
        }
    }
    Ok(())
}

/// Line-oriented console over one ledger. Submissions and claims are made
/// by the anonymous address with no bounty.
pub struct Repl<'a> {
    net: &'a WatchNet,
    format: OutputFormat,
    default_events: usize,
}

impl<'a> Repl<'a> {
    pub fn new(net: &'a WatchNet, format: OutputFormat, default_events: usize) -> Self {
        Self {
            net,
            format,
            default_events,
        }
    }

    /// Read commands until `quit`, `exit`, or end of input.
    pub fn run<R: BufRead, W: Write>(&self, input: R, out: &mut W) -> io::Result<()> {
        writeln!(
            out,
            "Cigilante CLI, watch net. Commands: submit <body>, list, unclaimed, claim <id>, show <id>, stats, events [n], quit"
        )?;
        let mut lines = input.lines();
        loop {
            write!(out, "> ")?;
            out.flush()?;
            let Some(line) = lines.next() else { break };
            let line = line?;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if line.eq_ignore_ascii_case("quit") || line.eq_ignore_ascii_case("exit") {
                break;
            }
            self.execute(line, out)?;
        }
        writeln!(out)
    }

    fn execute<W: Write>(&self, line: &str, out: &mut W) -> io::Result<()> {
        let (cmd, rest) = match line.split_once(char::is_whitespace) {
            Some((cmd, rest)) => (cmd, rest.trim()),
            None => (line, ""),
        };
        match self.dispatch(&cmd.to_ascii_lowercase(), rest) {
            Ok(text) => writeln!(out, "{text}"),
            Err(e) => {
                tracing::debug!(error = %e, command = cmd, "repl command failed");
                writeln!(out, "{} {}", "Error:".red(), error_code(&e))
            }
        }
    }

    fn dispatch(&self, cmd: &str, rest: &str) -> SdkResult<String> {
        match cmd {
            "submit" => {
                if rest.is_empty() {
                    return Ok("Usage: submit <body>".into());
                }
                let id = self.net.submit_report(rest, ANONYMOUS_ADDRESS, 0)?;
                Ok(match self.format {
                    OutputFormat::Json => json!({ "id": id }).to_string(),
                    OutputFormat::Text => format!("Report id: {}", id.to_string().yellow()),
                })
            }
            "list" => {
                let reports = self.net.list_reports(0, self.net.limits().batch_limit)?;
                Ok(self.render_reports(&reports))
            }
            "unclaimed" => {
                let reports = self
                    .net
                    .list_unclaimed_reports(0, self.net.limits().batch_limit)?;
                Ok(self.render_reports(&reports))
            }
            "claim" => {
                if rest.is_empty() {
                    return Ok("Usage: claim <reportId>".into());
                }
                let report = self.net.claim_bounty(rest, ANONYMOUS_ADDRESS)?;
                Ok(match self.format {
                    OutputFormat::Json => json!({ "claimed": true, "report": report }).to_string(),
                    OutputFormat::Text => format!("{} Claimed {}.", "✓".green(), report.id()),
                })
            }
            "show" => {
                if rest.is_empty() {
                    return Ok("Usage: show <reportId>".into());
                }
                let report = self.net.get_report(rest)?;
                Ok(match self.format {
                    OutputFormat::Json => json!(report).to_string(),
                    OutputFormat::Text => render_detail(&report),
                })
            }
            "stats" => {
                let stats = self.net.stats()?;
                Ok(match self.format {
                    OutputFormat::Json => json!(stats).to_string(),
                    OutputFormat::Text => format!(
                        "Reports: {} | Total bounty: {} | Claimed: {}",
                        stats.report_count, stats.total_bounty_wei, stats.claimed_count
                    ),
                })
            }
            "events" => {
                let n = if rest.is_empty() {
                    self.default_events as i64
                } else {
                    match rest.parse::<i64>() {
                        Ok(n) => n,
                        Err(_) => return Ok("Usage: events [n]".into()),
                    }
                };
                let events = self
                    .net
                    .recent_events(usize::try_from(n.max(0)).unwrap_or(usize::MAX));
                Ok(match self.format {
                    OutputFormat::Json => json!(events).to_string(),
                    OutputFormat::Text if events.is_empty() => "No events.".into(),
                    OutputFormat::Text => events
                        .iter()
                        .map(ToString::to_string)
                        .collect::<Vec<_>>()
                        .join("\n"),
                })
            }
            "help" => Ok(
                "Commands: submit <body>, list, unclaimed, claim <id>, show <id>, stats, events [n], quit"
                    .into(),
            ),
            _ => Ok("Unknown command.".into()),
        }
    }

    fn render_reports(&self, reports: &[Report]) -> String {
        match self.format {
            OutputFormat::Json => json!(reports).to_string(),
            OutputFormat::Text if reports.is_empty() => "No reports.".into(),
            OutputFormat::Text => reports
                .iter()
                .map(render_line)
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }
}

fn error_code(e: &SdkError) -> String {
    match e.kind() {
        Some(kind) => kind.code().to_string(),
        None => e.to_string(),
    }
}

fn preview(body: &str) -> String {
    let mut chars = body.chars();
    let head: String = chars.by_ref().take(PREVIEW_CHARS).collect();
    if chars.next().is_some() {
        format!("{head}...")
    } else {
        head
    }
}

fn render_line(report: &Report) -> String {
    let status = match report.claimed_by() {
        Some(claimer) => format!("claimed by {claimer}").dimmed().to_string(),
        None => "open".green().to_string(),
    };
    format!(
        "{} | {} | {} wei | {}",
        report.id().to_string().yellow(),
        preview(report.body()),
        report.bounty_wei(),
        status
    )
}

fn render_detail(report: &Report) -> String {
    let mut lines = vec![
        format!("Report {}", report.id().to_string().yellow().bold()),
        format!("  From:   {}", report.submitter()),
        format!("  Bounty: {} wei", report.bounty_wei()),
    ];
    match report.claimed_by() {
        Some(claimer) => lines.push(format!("  Status: claimed by {}", claimer.cyan())),
        None => lines.push(format!("  Status: {}", "open".green())),
    }
    lines.push(format!("  Body:   {}", report.body()));
    lines.join("\n")
}
