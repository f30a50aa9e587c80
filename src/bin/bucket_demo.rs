//! Bucket demo
//!
//! Sends a repeating cycle of payloads through a leaky or token bucket and
//! logs which ones are admitted.
//!
//! # Usage
//!
//! ```bash
//! # Pick the algorithm from a menu
//! bucket-demo
//!
//! # Token bucket, 3 rounds, one payload every 250 ms
//! bucket-demo --algorithm token --rounds 3 --interval-ms 250
//!
//! # Show every admitted payload
//! RUST_LOG=debug bucket-demo --algorithm leaky
//! ```

use std::io::{self, BufRead, Write};
use std::thread;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use bucket_guard_core::buckets::{LeakyBucket, TokenBucket};
use bucket_guard_core::config::{LeakyBucketConfig, TokenBucketConfig};
use bucket_guard_core::Admission;
use clap::{Parser, ValueEnum};
use tracing::{debug, info, warn};

const DEFAULT_PAYLOADS: &[u64] = &[10, 15, 20, 25, 30, 35, 40, 45, 50, 105];

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Algorithm {
    /// Reservoir draining at a constant rate
    Leaky,
    /// Token pool refilling at a constant rate
    Token,
}

/// Drive a bucket with a repeating payload cycle
#[derive(Parser, Debug)]
#[command(name = "bucket-demo")]
#[command(about = "Send payloads through a leaky or token bucket")]
#[command(version)]
struct Args {
    /// Algorithm to run; prompts for a choice when omitted
    #[arg(short, long, value_enum)]
    algorithm: Option<Algorithm>,

    /// Bucket capacity
    #[arg(short, long, default_value_t = 100.0)]
    capacity: f64,

    /// Leak or refill rate, in units per second
    #[arg(short, long, default_value_t = 20.0)]
    rate: f64,

    /// Comma-separated payload sizes sent in order, then repeated
    #[arg(short, long, value_delimiter = ',', default_values_t = DEFAULT_PAYLOADS.to_vec())]
    payloads: Vec<u64>,

    /// Pause between two payloads, in milliseconds
    #[arg(short, long, default_value_t = 500)]
    interval_ms: u64,

    /// Number of payload cycles to send; runs until interrupted when omitted
    #[arg(long)]
    rounds: Option<u64>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let args = Args::parse();
    if args.payloads.is_empty() {
        bail!("at least one payload size is required");
    }

    let algorithm = match args.algorithm {
        Some(algorithm) => algorithm,
        None => match prompt_algorithm(&mut io::stdin().lock(), &mut io::stdout())? {
            Some(algorithm) => algorithm,
            None => return Ok(()),
        },
    };

    let bucket = build_bucket(algorithm, args.capacity, args.rate)?;
    info!(
        ?algorithm,
        capacity = args.capacity,
        rate = args.rate,
        interval_ms = args.interval_ms,
        "bucket ready"
    );

    run(bucket.as_ref(), &args.payloads, Duration::from_millis(args.interval_ms), args.rounds);
    Ok(())
}

/// Prints the menu to `output` and reads the choice from `input`.
/// Any number other than 1 or 2 quits.
fn prompt_algorithm(input: &mut impl BufRead, output: &mut impl Write) -> Result<Option<Algorithm>> {
    writeln!(output, "Please choose which algorithm to run:")?;
    writeln!(output, "1) Leaky Bucket")?;
    writeln!(output, "2) Token Bucket")?;
    output.flush().context("failed to flush menu")?;

    let mut answer = String::new();
    input
        .read_line(&mut answer)
        .context("failed to read menu choice")?;

    let choice: u32 = answer
        .trim()
        .parse()
        .with_context(|| format!("invalid menu choice: {:?}", answer.trim()))?;

    Ok(match choice {
        1 => Some(Algorithm::Leaky),
        2 => Some(Algorithm::Token),
        _ => None,
    })
}

fn build_bucket(algorithm: Algorithm, capacity: f64, rate: f64) -> Result<Box<dyn Admission>> {
    let bucket: Box<dyn Admission> = match algorithm {
        Algorithm::Leaky => Box::new(
            LeakyBucket::try_from(LeakyBucketConfig::new(capacity, rate))
                .context("invalid leaky bucket configuration")?,
        ),
        Algorithm::Token => Box::new(
            TokenBucket::try_from(TokenBucketConfig::new(capacity, rate))
                .context("invalid token bucket configuration")?,
        ),
    };
    Ok(bucket)
}

fn run(bucket: &dyn Admission, payloads: &[u64], interval: Duration, rounds: Option<u64>) {
    let mut round = 0u64;
    while rounds.map_or(true, |limit| round < limit) {
        for &size in payloads {
            match bucket.admit(size) {
                Ok(()) => debug!(size, level = bucket.current(), "payload sent"),
                Err(e) if e.is_permanent() => warn!(size, "error sending payload: {e}"),
                Err(e) => info!(size, retry_after = ?e.retry_after(), "error sending payload: {e}"),
            }
            thread::sleep(interval);
        }
        round += 1;
    }
}
