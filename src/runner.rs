use std::fmt::Display;
use std::io;
use std::path::Path;
use std::sync::Arc;

use bytes::BytesMut;
use futures::StreamExt;
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};
use tokio_util::codec::{Decoder, FramedRead, LinesCodec, LinesCodecError};
use tracing::{info, warn};

use crate::config::{GarageConfig, RateConfig};
use crate::engine::{Engine, EngineError, Ledger};
use crate::instructions::{self, Command, ParseError};
use crate::limits::MAX_LINE_LEN;
use crate::model::*;
use crate::notify::NotifyHub;
use crate::report::{Outcome, OutputFormat};

#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    pub rates: RateConfig,
    pub format: OutputFormat,
}

/// Totals over one instruction stream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub accepted: usize,
    pub rejected: usize,
    pub exited: usize,
    pub failed: usize,
    pub fees: Fee,
}

impl RunSummary {
    fn record(&mut self, outcome: &Outcome) {
        match outcome {
            Outcome::Accepted { .. } => self.accepted += 1,
            Outcome::Rejected { .. } => self.rejected += 1,
            Outcome::Exited { fee, .. } => {
                self.exited += 1;
                self.fees += fee;
            }
            Outcome::Failed { .. } => self.failed += 1,
        }
    }
}

#[derive(Debug)]
pub enum RunError {
    Io(io::Error),
    Lines(LinesCodecError),
    MissingHeader,
    Header(ParseError),
    Encode(serde_json::Error),
}

impl std::fmt::Display for RunError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunError::Io(e) => write!(f, "I/O error: {e}"),
            RunError::Lines(e) => write!(f, "read error: {e}"),
            RunError::MissingHeader => write!(f, "instruction stream has no header line"),
            RunError::Header(e) => write!(f, "bad header: {e}"),
            RunError::Encode(e) => write!(f, "encode error: {e}"),
        }
    }
}

impl std::error::Error for RunError {}

impl From<io::Error> for RunError {
    fn from(e: io::Error) -> Self {
        RunError::Io(e)
    }
}

impl From<LinesCodecError> for RunError {
    fn from(e: LinesCodecError) -> Self {
        RunError::Lines(e)
    }
}

impl From<serde_json::Error> for RunError {
    fn from(e: serde_json::Error) -> Self {
        RunError::Encode(e)
    }
}

/// A line that could not be read as an instruction. The stream goes on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineError {
    TooLong,
    NotUtf8,
}

impl std::fmt::Display for LineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LineError::TooLong => write!(f, "instruction longer than {MAX_LINE_LEN} bytes"),
            LineError::NotUtf8 => write!(f, "instruction is not valid UTF-8"),
        }
    }
}

impl std::error::Error for LineError {}

/// `LinesCodec` that yields per-line failures as items.
///
/// `FramedRead` ends the stream after any decoder error, so only errors from
/// the underlying reader are returned as `Err`.
struct InstructionCodec {
    lines: LinesCodec,
}

impl InstructionCodec {
    fn new() -> Self {
        Self {
            lines: LinesCodec::new_with_max_length(MAX_LINE_LEN),
        }
    }

    fn per_line(
        decoded: Result<Option<String>, LinesCodecError>,
    ) -> Result<Option<Result<String, LineError>>, LinesCodecError> {
        match decoded {
            Ok(line) => Ok(line.map(Ok)),
            // The codec discards up to the next newline and resumes.
            Err(LinesCodecError::MaxLineLengthExceeded) => Ok(Some(Err(LineError::TooLong))),
            // The offending line is already consumed from the buffer.
            Err(LinesCodecError::Io(e)) if e.kind() == io::ErrorKind::InvalidData => {
                Ok(Some(Err(LineError::NotUtf8)))
            }
            Err(e) => Err(e),
        }
    }
}

impl Decoder for InstructionCodec {
    type Item = Result<String, LineError>;
    type Error = LinesCodecError;

    fn decode(&mut self, buf: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        Self::per_line(self.lines.decode(buf))
    }

    fn decode_eof(&mut self, buf: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        Self::per_line(self.lines.decode_eof(buf))
    }
}

/// Read an instruction file and stream one output line per instruction.
pub async fn run_file<W>(
    path: impl AsRef<Path>,
    writer: W,
    options: &RunOptions,
    notify: Arc<NotifyHub>,
) -> Result<RunSummary, RunError>
where
    W: AsyncWrite + Unpin,
{
    let path = path.as_ref();
    if !tokio::fs::metadata(path).await?.is_file() {
        return Err(RunError::Io(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("not a file: {}", path.display()),
        )));
    }
    let file = tokio::fs::File::open(path).await?;
    run(file, writer, options, notify).await
}

/// Drive a fresh engine from an instruction stream.
///
/// The first non-blank line is the header and must parse. After that, a bad
/// instruction is reported as `Outcome::Failed` and processing continues.
pub async fn run<R, W>(
    reader: R,
    mut writer: W,
    options: &RunOptions,
    notify: Arc<NotifyHub>,
) -> Result<RunSummary, RunError>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = FramedRead::new(reader, InstructionCodec::new());
    let mut line_no = 0usize;

    let header = loop {
        let Some(line) = lines.next().await else {
            return Err(RunError::MissingHeader);
        };
        line_no += 1;
        let line = line?.map_err(|e| RunError::Header(ParseError::Parse(e.to_string())))?;
        if line.trim().is_empty() {
            continue;
        }
        break instructions::parse_header(&line).map_err(RunError::Header)?;
    };

    let config =
        GarageConfig::from_header(header.car_lots, header.motorcycle_lots, &options.rates);
    info!(
        "garage: {} car lots at {}/h, {} motorcycle lots at {}/h",
        header.car_lots, options.rates.car, header.motorcycle_lots, options.rates.motorcycle
    );
    let mut engine = Engine::new(&config, notify);
    let mut summary = RunSummary::default();

    while let Some(line) = lines.next().await {
        line_no += 1;
        let outcome = match line? {
            Ok(line) if line.trim().is_empty() => continue,
            Ok(line) => apply_line(&mut engine, &line, line_no),
            Err(e) => failed(None, line_no, e),
        };
        summary.record(&outcome);

        let mut out = outcome.render(options.format)?;
        out.push('\n');
        writer.write_all(out.as_bytes()).await?;
    }
    writer.flush().await?;

    info!(
        "processed {} instructions: {} accepted, {} rejected, {} exited, {} failed, fees {}",
        summary.accepted + summary.rejected + summary.exited + summary.failed,
        summary.accepted,
        summary.rejected,
        summary.exited,
        summary.failed,
        summary.fees
    );
    Ok(summary)
}

fn apply_line<L: Ledger>(engine: &mut Engine<L>, line: &str, line_no: usize) -> Outcome {
    let cmd = match instructions::parse_command(line) {
        Ok(cmd) => cmd,
        Err(e) => return failed(None, line_no, e),
    };
    match apply(engine, &cmd) {
        Ok(outcome) => outcome,
        Err(e) => failed(Some(&cmd), line_no, e),
    }
}

fn apply<L: Ledger>(engine: &mut Engine<L>, cmd: &Command) -> Result<Outcome, EngineError> {
    match cmd {
        Command::Enter {
            category,
            vehicle_id,
            timestamp,
        } => Ok(match engine.enter(*category, vehicle_id, *timestamp)? {
            Admission::Accepted(lot) => Outcome::Accepted {
                vehicle_id: vehicle_id.clone(),
                lot,
            },
            Admission::Rejected => Outcome::Rejected {
                vehicle_id: vehicle_id.clone(),
            },
        }),
        Command::Exit {
            vehicle_id,
            timestamp,
        } => {
            let departure = engine.exit(vehicle_id, *timestamp)?;
            Ok(Outcome::Exited {
                vehicle_id: vehicle_id.clone(),
                lot: departure.lot,
                fee: departure.fee,
            })
        }
    }
}

fn failed(cmd: Option<&Command>, line: usize, error: impl Display) -> Outcome {
    warn!("line {line}: {error}");
    metrics::counter!(
        crate::observability::INSTRUCTION_ERRORS_TOTAL,
        "command" => crate::observability::command_label(cmd)
    )
    .increment(1);
    Outcome::Failed {
        line,
        error: error.to_string(),
    }
}
