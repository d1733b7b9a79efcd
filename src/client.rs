//! Blocking AT command client.
//!
//! One [`AtClient`] owns the serial port. Every exchange is: flush stale
//! input, write the command line, then accumulate the reply in
//! [`READ_CHUNK_LEN`] sized reads until the completion predicate of the
//! variant holds or the command timeout elapses. Failed attempts are repeated
//! with the same command line and the same parser.

use embassy_time::Duration;
use embedded_io::{Error as _, ErrorKind};
use heapless::{String, Vec};

use crate::command::mqtt::PublishMessage;
use crate::command::{catalog, AtResponse, Command, CommandType, Response};
use crate::error::{Error, ParseError};
use crate::module_timing;
use crate::traits::{Clock, Transport};

/// Longest command line, terminator included
pub const CMD_MAX_LEN: usize = 256;
/// Capacity of the raw response buffer
pub const RESPONSE_MAX_LEN: usize = 512;
/// Bytes requested per read
pub const READ_CHUNK_LEN: usize = 32;

/// Scratch space for encoding a typed command
const ENCODE_MAX_LEN: usize = 512;

const OK_TERMINATOR: &[u8] = b"\r\nOK\r\n";
const ERROR_TERMINATOR: &[u8] = b"\r\nERROR\r\n";
const CME_ERROR: &[u8] = b"+CME ERROR:";
const PROMPT: u8 = b'>';

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|w| w == needle)
}

/// `+CME ERROR: <err>` followed by its line end.
fn has_cme_error(raw: &[u8]) -> bool {
    raw.windows(CME_ERROR.len())
        .position(|w| w == CME_ERROR)
        .map_or(false, |i| contains(&raw[i..], b"\r\n"))
}

fn has_terminator(raw: &[u8]) -> bool {
    contains(raw, OK_TERMINATOR) || contains(raw, ERROR_TERMINATOR) || has_cme_error(raw)
}

/// When an accumulated reply is considered complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Completion {
    /// Final result code only
    Terminator,
    /// A `+` data line as well as a final result code
    Data,
    /// The `>` prompt of a two phase command, or an error result
    Prompt,
}

impl Completion {
    pub fn for_variant(ty: CommandType) -> Self {
        match ty {
            CommandType::Write | CommandType::Execute => Self::Terminator,
            CommandType::Read | CommandType::Test => Self::Data,
        }
    }

    pub fn is_complete(self, raw: &[u8]) -> bool {
        match self {
            Self::Terminator => has_terminator(raw),
            Self::Data => has_terminator(raw) && raw.contains(&b'+'),
            Self::Prompt => {
                raw.contains(&PROMPT) || contains(raw, ERROR_TERMINATOR) || has_cme_error(raw)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ResponseStatus {
    Ok,
    DeviceError,
    Unexpected,
}

/// Classify a complete reply by its final result code.
pub fn classify(raw: &[u8], completion: Completion) -> ResponseStatus {
    if completion == Completion::Prompt && raw.contains(&PROMPT) {
        return ResponseStatus::Ok;
    }

    if contains(raw, OK_TERMINATOR) {
        ResponseStatus::Ok
    } else if contains(raw, ERROR_TERMINATOR) || contains(raw, CME_ERROR) {
        ResponseStatus::DeviceError
    } else if contains(raw, b"OK") {
        ResponseStatus::Ok
    } else if contains(raw, b"ERROR") {
        ResponseStatus::DeviceError
    } else {
        ResponseStatus::Unexpected
    }
}

/// Build the wire line of a command variant.
///
/// Write variants require arguments. Execute variants take them only when the
/// command carries its parameter inline (`ATE0`).
pub fn format_command(
    command: Command,
    ty: CommandType,
    args: Option<&str>,
) -> Result<String<CMD_MAX_LEN>, Error> {
    let variant = command
        .descriptor()
        .variant(ty)
        .map_err(|_| Error::InvalidArgument)?;

    let args = match (ty, args) {
        (CommandType::Write, Some(args)) if !args.is_empty() => args,
        (CommandType::Write, _) => return Err(Error::InvalidArgument),
        (CommandType::Execute, args) => args.unwrap_or(""),
        _ => "",
    };

    let mut line = String::new();
    for part in [variant.command, args, "\r\n"] {
        line.push_str(part).map_err(|_| Error::InvalidArgument)?;
    }
    Ok(line)
}

/// Encode a typed command into its wire line.
pub fn encode<A: atat::AtatCmd>(cmd: &A) -> Result<String<CMD_MAX_LEN>, Error> {
    if A::MAX_LEN > ENCODE_MAX_LEN {
        return Err(Error::InvalidArgument);
    }
    let mut buf = [0u8; ENCODE_MAX_LEN];
    let n = cmd.write(&mut buf);
    let line = core::str::from_utf8(&buf[..n]).map_err(|_| Error::InvalidArgument)?;
    String::try_from(line).map_err(|_| Error::InvalidArgument)
}

/// Timeout and retry policy of a single command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HandlerConfig {
    pub timeout: Duration,
    pub retry_delay: Duration,
    pub max_retries: u8,
}

impl HandlerConfig {
    pub fn for_command(command: Command, ty: CommandType) -> Self {
        Self {
            timeout: module_timing::command_timeout(command, ty),
            retry_delay: module_timing::retry_delay(),
            max_retries: module_timing::MAX_RETRIES,
        }
    }

    /// The timeout a typed command declares for itself.
    pub fn for_cmd<A: atat::AtatCmd>() -> Self {
        Self {
            timeout: Duration::from_millis(u64::from(A::MAX_TIMEOUT_MS)),
            retry_delay: module_timing::retry_delay(),
            max_retries: module_timing::MAX_RETRIES,
        }
    }

    /// Same timeout, but no retries.
    pub fn single_attempt(self) -> Self {
        Self {
            max_retries: 1,
            ..self
        }
    }
}

pub struct AtClient<T, C> {
    transport: T,
    clock: C,
    ready: bool,
    buf: Vec<u8, RESPONSE_MAX_LEN>,
}

impl<T, C> AtClient<T, C>
where
    T: Transport,
    C: Clock,
{
    pub fn new(transport: T, clock: C) -> Self {
        Self {
            transport,
            clock,
            ready: false,
            buf: Vec::new(),
        }
    }

    /// Mark the transport as (un)initialized. Nothing is sent while it is not.
    pub fn set_ready(&mut self, ready: bool) {
        self.ready = ready;
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    pub fn clock(&mut self) -> &mut C {
        &mut self.clock
    }

    pub fn release(self) -> (T, C) {
        (self.transport, self.clock)
    }

    /// Send a typed command with its documented timeout and the default retry
    /// policy.
    pub fn send<A>(&mut self, cmd: &A) -> Result<A::Response, Error>
    where
        A: atat::AtatCmd,
        A::Response: AtResponse,
    {
        self.send_with(cmd, HandlerConfig::for_cmd::<A>())
    }

    /// The encoded line decides which catalog entry and response parser
    /// apply. Lines that match no entry are not sent.
    pub fn send_with<A>(&mut self, cmd: &A, config: HandlerConfig) -> Result<A::Response, Error>
    where
        A: atat::AtatCmd,
        A::Response: AtResponse,
    {
        if !self.ready {
            return Err(Error::NotReady);
        }
        let line = encode(cmd)?;
        let (command, ty, args) = catalog::identify(&line).ok_or(Error::InvalidArgument)?;
        self.run(&line, command, ty, args, &config, <A::Response as AtResponse>::parse)
    }

    /// Run one command variant and parse the reply into `R`.
    pub fn execute<R: AtResponse>(
        &mut self,
        command: Command,
        ty: CommandType,
        args: Option<&str>,
        config: &HandlerConfig,
    ) -> Result<R, Error> {
        let line = format_command(command, ty, args)?;
        self.run(&line, command, ty, args, config, R::parse)
    }

    /// Like [`execute`](Self::execute), with the parser picked from `command`.
    pub fn execute_raw(
        &mut self,
        command: Command,
        ty: CommandType,
        args: Option<&str>,
        config: &HandlerConfig,
    ) -> Result<Response, Error> {
        let line = format_command(command, ty, args)?;
        self.run(&line, command, ty, args, config, |raw, ty, args| {
            command.parse(raw, ty, args)
        })
    }

    /// Publish an MQTT message in two phases: the `AT+SMPUB` header up to the
    /// `>` prompt, then the body. Only the header phase is retried, a body
    /// that was written once must not be written again.
    ///
    /// This is the only way an `AT+SMPUB` header reaches the module.
    pub fn publish(&mut self, msg: &PublishMessage<'_>) -> Result<(), Error> {
        if !self.ready {
            return Err(Error::NotReady);
        }
        let line = encode(&msg.header()?)?;
        trace!("Sending: [{}]", line.trim_end());
        let config = HandlerConfig::for_command(Command::Smpub, CommandType::Write);

        self.retry(Command::Smpub, &config, |client| {
            let raw = client.exchange(line.as_bytes(), Completion::Prompt, config.timeout)?;
            match classify(raw, Completion::Prompt) {
                ResponseStatus::Ok => Ok(()),
                ResponseStatus::DeviceError => Err(Error::DeviceError),
                ResponseStatus::Unexpected => Err(Error::Timeout),
            }
        })?;

        debug!("Publishing {} bytes to {}", msg.payload.len(), msg.topic);
        self.write_all(msg.payload)?;
        self.write_all(b"\r\n")?;
        let raw = self.read_response(Completion::Terminator, config.timeout)?;
        match classify(raw, Completion::Terminator) {
            ResponseStatus::Ok => Ok(()),
            ResponseStatus::DeviceError => Err(Error::DeviceError),
            ResponseStatus::Unexpected => Err(Error::Timeout),
        }
    }

    fn run<R>(
        &mut self,
        line: &str,
        command: Command,
        ty: CommandType,
        args: Option<&str>,
        config: &HandlerConfig,
        parse: impl Fn(&str, CommandType, Option<&str>) -> Result<R, ParseError>,
    ) -> Result<R, Error> {
        if !self.ready {
            return Err(Error::NotReady);
        }
        // A header sent here would leave the module waiting for a payload
        if (command, ty) == (Command::Smpub, CommandType::Write) {
            return Err(Error::InvalidArgument);
        }
        let completion = Completion::for_variant(ty);
        trace!("Sending: [{}]", line.trim_end());

        self.retry(command, config, |client| {
            let raw = client.exchange(line.as_bytes(), completion, config.timeout)?;
            match classify(raw, completion) {
                ResponseStatus::Ok => {}
                ResponseStatus::DeviceError => return Err(Error::DeviceError),
                ResponseStatus::Unexpected => return Err(Error::Timeout),
            }
            let raw = core::str::from_utf8(raw).map_err(|_| ParseError::Malformed)?;
            Ok(parse(raw, ty, args)?)
        })
    }

    fn retry<R>(
        &mut self,
        command: Command,
        config: &HandlerConfig,
        mut attempt: impl FnMut(&mut Self) -> Result<R, Error>,
    ) -> Result<R, Error> {
        let attempts = config.max_retries.max(1);
        let mut last_err = Error::CommandFailed;

        for n in 1..=attempts {
            if n > 1 {
                self.clock.sleep(config.retry_delay);
            }
            match attempt(self) {
                Ok(res) => return Ok(res),
                Err(e) if !e.is_retryable() => return Err(e),
                Err(e) => {
                    warn!("{} attempt {}/{} failed: {:?}", command.name(), n, attempts, e);
                    last_err = e;
                }
            }
        }

        error!(
            "{} failed after {} attempts, last error: {:?}",
            command.name(),
            attempts,
            last_err
        );
        Err(Error::CommandFailed)
    }

    fn exchange(
        &mut self,
        line: &[u8],
        completion: Completion,
        timeout: Duration,
    ) -> Result<&[u8], Error> {
        self.transport.flush().map_err(|e| Error::Io(e.kind()))?;
        self.write_all(line)?;
        self.read_response(completion, timeout)
    }

    fn write_all(&mut self, mut bytes: &[u8]) -> Result<(), Error> {
        while !bytes.is_empty() {
            match self.transport.write(bytes).map_err(|e| Error::Io(e.kind()))? {
                0 => return Err(Error::Io(ErrorKind::Other)),
                n => bytes = &bytes[n..],
            }
        }
        Ok(())
    }

    /// Accumulate a reply until `completion` holds. Exactly filling the buffer
    /// is fine, more than that is an [`Error::Overflow`].
    fn read_response(&mut self, completion: Completion, timeout: Duration) -> Result<&[u8], Error> {
        self.buf.clear();
        let start = self.clock.now();
        let mut chunk = [0u8; READ_CHUNK_LEN];

        while !completion.is_complete(&self.buf) {
            if self.clock.now().saturating_duration_since(start) >= timeout {
                return Err(Error::Timeout);
            }

            let n = self
                .transport
                .read(&mut chunk, module_timing::read_interval())
                .map_err(|e| Error::Io(e.kind()))?;
            if n == 0 {
                self.clock.sleep(module_timing::idle_delay());
                continue;
            }
            self.buf
                .extend_from_slice(&chunk[..n])
                .map_err(|_| Error::Overflow)?;
        }

        Ok(self.buf.as_slice())
    }
}
