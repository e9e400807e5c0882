//! Terminal harness for the card entry state machine.
//!
//! Replays a key script through a [`CardEntry`] and prints the resulting
//! state. Digits are key presses, `<` is backspace, whitespace is ignored.
//!
//! # Usage
//!
//! ```bash
//! # Type a number, an expiry and a CVC
//! cardentry "4111 1111 1111 1111 1230 123"
//!
//! # Prefill the number, then type the rest
//! cardentry --seed 378282246310005 "0931 1234"
//!
//! # Show every keystroke and pin the current month
//! cardentry --trace --today 2026-10 "4111<<"
//!
//! # Hide the middle digits
//! cardentry --masked "5105 1051 0510 5100"
//!
//! # JSON output, debug logs on stderr
//! RUST_LOG=card_entry=debug cardentry --output json "5500000000000004"
//! ```

use card_entry::mask;
use card_entry::stream::{parse_keys, ReplayExt};
use card_entry::{CardEntry, Clock, EntryConfig, FixedClock, KeyEvent, SystemClock};
use clap::{Parser, ValueEnum};
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "cardentry")]
#[command(author, version, about = "Replay key presses through a card entry field")]
struct Cli {
    /// Key script: digits, '<' for backspace; whitespace is ignored
    keys: Vec<String>,

    /// Number to prefill before replaying the keys
    #[arg(short, long)]
    seed: Option<String>,

    /// Current month as YYYY-MM (defaults to the system date)
    #[arg(long, value_parser = parse_year_month)]
    today: Option<FixedClock>,

    /// Separator between number groups
    #[arg(long, default_value = " ")]
    separator: char,

    /// Print the outcome of every key
    #[arg(short, long)]
    trace: bool,

    /// Show only the BIN and last four digits of the number
    #[arg(short, long)]
    masked: bool,

    /// Output format
    #[arg(short, long, default_value = "text")]
    output: OutputFormat,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn parse_year_month(input: &str) -> Result<FixedClock, String> {
    let (year, month) = input
        .split_once('-')
        .ok_or_else(|| format!("expected YYYY-MM, got '{}'", input))?;
    let year: u16 = year.parse().map_err(|_| format!("invalid year '{}'", year))?;
    let month: u8 = month.parse().map_err(|_| format!("invalid month '{}'", month))?;
    FixedClock::new(year, month).ok_or_else(|| format!("month {} is not 1-12", month))
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "card_entry=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let Some(config) = EntryConfig::default().with_number_separator(cli.separator) else {
        eprintln!("Error: separator '{}' must not be a digit", cli.separator);
        return ExitCode::FAILURE;
    };

    let result = match cli.today {
        Some(clock) => run(&cli, CardEntry::with_config(config, clock)),
        None => run(&cli, CardEntry::with_config(config, SystemClock)),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run<C: Clock>(cli: &Cli, mut entry: CardEntry<C>) -> Result<(), Box<dyn std::error::Error>> {
    entry.set_completion_listener(Some(Box::new(|completed: bool| {
        tracing::info!(completed, "completion changed");
    })));

    if let Some(seed) = cli.seed.as_deref() {
        entry.reset(Some(seed))?;
    }

    let keys = parse_keys(&cli.keys.join(" "))?;
    for (event, result) in keys.into_iter().replay_into(&mut entry) {
        let outcome = result?;
        if cli.trace {
            let key = match event {
                KeyEvent::Digit(d) => char::from(b'0' + d),
                KeyEvent::Backspace => '<',
            };
            println!("{} {:?}", key, outcome);
        }
    }

    match cli.output {
        OutputFormat::Text => print_text(&entry, cli.masked),
        OutputFormat::Json => print_json(&entry, cli.masked)?,
    }
    Ok(())
}

fn display_number<C: Clock>(entry: &CardEntry<C>, masked: bool) -> String {
    if masked {
        mask::mask_with_bin(entry.number_digits())
    } else {
        entry.formatted_number().to_string()
    }
}

fn print_text<C: Clock>(entry: &CardEntry<C>, masked: bool) {
    let or_hint = |value: &str, hint: &str| {
        if value.is_empty() {
            format!("({})", hint)
        } else {
            value.to_string()
        }
    };

    println!("Brand:     {}", entry.brand());
    println!("Phase:     {:?}", entry.phase());
    println!(
        "Number:    {}",
        or_hint(display_number(entry, masked).as_str(), card_entry::NUMBER_HINT)
    );
    println!(
        "Expiry:    {}",
        or_hint(entry.formatted_expiry(), card_entry::EXPIRY_HINT)
    );
    println!("CVC:       {}", or_hint(entry.cvc_display(), entry.cvc_hint()));
    println!("Error:     {}", if entry.is_error() { "YES" } else { "no" });
    println!("Completed: {}", if entry.is_completed() { "YES" } else { "no" });
    if let Some(expiry) = entry.expiry() {
        println!("Expires:   {}", expiry.format_long());
    }
}

fn print_json<C: Clock>(entry: &CardEntry<C>, masked: bool) -> Result<(), serde_json::Error> {
    let mut state = entry.snapshot();
    if masked {
        state.formatted_number = display_number(entry, masked);
    }
    let json = serde_json::json!({
        "state": state,
        "expiry": entry.expiry(),
        "cvc_hint": entry.cvc_hint(),
    });
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
