//! # Tally Terminal Library
//!
//! Presentation host for the Tally engine: a keypad driven by lines of text
//! on stdin, one display line printed back per input line.
//!
//! ## Module Organization
//! ```text
//! tally_terminal/
//! ├── lib.rs          ◄─── You are here (tracing setup, stdin driver)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── calculator.rs ◄─ Engine behind Arc<Mutex>, one per session
//! │   ├── tape.rs     ◄─── Tape of completed calculations
//! │   └── config.rs   ◄─── Configuration state
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   ├── keypad.rs   ◄─── Key press commands
//! │   ├── tape.rs     ◄─── Tape commands
//! │   └── config.rs   ◄─── Config command
//! └── error.rs        ◄─── API error type for commands
//! ```
//!
//! ## Driver Protocol
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  input line            output line (plain)                              │
//! │  ──────────            ───────────────────                              │
//! │  12+3=                 15                                               │
//! │  × 2 Enter             30                                               │
//! │  ÷0=                   Error                                            │
//! │  AC                    0                                                │
//! │  2^3                   ! Invalid input token: ^                         │
//! │  tape                  12 + 3 = 15 / 15 × 2 = 30 (one per line)         │
//! │  tape clear            (tape cleared)                                   │
//! │  config                {"errorIndicator":"Error",...}                   │
//! │  quit                  (exit)                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//! With `TALLY_OUTPUT=json` every response is a JSON object instead.

pub mod commands;
pub mod error;
pub mod state;

use serde::Serialize;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use error::ApiError;
use state::{CalculatorState, ConfigState, OutputMode, TapeEntry, TapeState};

/// All state for one calculator session.
///
/// Each `Session::new` owns a fresh engine; nothing is process-wide.
#[derive(Debug, Clone)]
pub struct Session {
    pub calculator: CalculatorState,
    pub tape: TapeState,
    pub config: ConfigState,
}

impl Session {
    pub fn new(config: ConfigState) -> Self {
        Session {
            calculator: CalculatorState::new(),
            tape: TapeState::new(config.tape_limit),
            config,
        }
    }
}

/// Runs the terminal keypad on stdin/stdout until EOF or `quit`.
///
/// ## Startup Sequence
/// 1. Initialize tracing (stderr, so stdout stays the display)
/// 2. Load configuration from the environment
/// 3. Create the session state
/// 4. Drive the session from stdin
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let config = ConfigState::from_env();
    info!(
        output = %config.output,
        tape_limit = config.tape_limit,
        "Starting Tally terminal"
    );

    let session = Session::new(config);
    info!(session_id = %session.calculator.id(), "Session created");

    let stdin = BufReader::new(tokio::io::stdin());
    drive(stdin, tokio::io::stdout(), &session).await?;

    info!("Input closed, exiting");
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=tally_core=trace` - Show every key the engine sees
/// - Default: INFO, DEBUG for tally crates
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tally_core=debug,tally_terminal=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Reads lines from `input`, applies them to the session and writes one
/// response line per non-empty input line to `output`.
///
/// A line that is not valid UTF-8 is reported like any other rejected line
/// and reading continues.
pub async fn drive<R, W>(mut input: R, mut output: W, session: &Session) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut buf = Vec::new();

    loop {
        buf.clear();
        if input.read_until(b'\n', &mut buf).await? == 0 {
            break;
        }

        let Ok(line) = std::str::from_utf8(&buf) else {
            warn!(bytes = buf.len(), "line is not valid UTF-8");
            let err = ApiError::invalid_input("Input line is not valid UTF-8");
            write_line(&mut output, &render_error(&err, session)?).await?;
            continue;
        };

        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let rendered = match line {
            "quit" | "exit" => break,
            "tape" => render_tape(&commands::tape::get_tape(&session.tape), session)?,
            "tape clear" => {
                commands::tape::clear_tape(&session.tape);
                render_tape(&[], session)?
            }
            "config" => serde_json::to_string(&commands::config::get_config(&session.config))?,
            keys => match commands::keypad::press_keys(
                &session.calculator,
                &session.tape,
                &session.config,
                keys,
            ) {
                Ok(response) => match session.config.output {
                    OutputMode::Plain => response.display,
                    OutputMode::Json => serde_json::to_string(&response)?,
                },
                Err(err) => {
                    debug!(error = %err, "line rejected");
                    render_error(&err, session)?
                }
            },
        };

        write_line(&mut output, &rendered).await?;
    }

    Ok(())
}

async fn write_line<W: AsyncWrite + Unpin>(output: &mut W, line: &str) -> std::io::Result<()> {
    output.write_all(line.as_bytes()).await?;
    output.write_all(b"\n").await?;
    output.flush().await
}

fn render_tape(entries: &[TapeEntry], session: &Session) -> std::io::Result<String> {
    match session.config.output {
        OutputMode::Plain => Ok(entries
            .iter()
            .map(|e| format!("{} = {}", e.expression, e.result))
            .collect::<Vec<_>>()
            .join("\n")),
        OutputMode::Json => Ok(serde_json::to_string(entries)?),
    }
}

fn render_error(err: &ApiError, session: &Session) -> std::io::Result<String> {
    #[derive(Serialize)]
    struct ErrorLine<'a> {
        error: &'a ApiError,
    }

    match session.config.output {
        OutputMode::Plain => Ok(format!("! {}", err.message)),
        OutputMode::Json => Ok(serde_json::to_string(&ErrorLine { error: err })?),
    }
}
