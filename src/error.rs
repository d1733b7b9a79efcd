use embedded_io::ErrorKind;

/// Reasons a per-command parser rejects a completed response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// The `+CMD:` echo prefix is not present in the response
    MissingPrefix,
    /// Fewer (or more) fields than the command grammar allows
    FieldCountMismatch,
    /// A numeric field outside the documented range, or more records than fit
    OutOfRange,
    /// A string field longer than its destination capacity
    BufferTooSmall,
    /// A field that could not be converted at all, e.g. a non-numeric integer
    Malformed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NetworkError {
    /// SIM never reported `READY` within the poll budget
    SimNotReady,
    /// The PDP context never reported activated with an address
    ActivationFailed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[non_exhaustive]
pub enum Error {
    // Caller errors, never retried
    InvalidArgument,
    NotReady,

    // Exchange errors, retried by the client
    Io(ErrorKind),
    Timeout,
    Overflow,
    DeviceError,
    InvalidResponse(ParseError),

    /// Retries exhausted
    CommandFailed,

    // Sequence errors
    Network(NetworkError),
}

impl Error {
    /// Whether the client should re-send the command after this error.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Io(_) | Self::Timeout | Self::Overflow | Self::DeviceError | Self::InvalidResponse(_)
        )
    }
}

impl From<ParseError> for Error {
    fn from(e: ParseError) -> Self {
        Self::InvalidResponse(e)
    }
}

impl From<atat::serde_at::de::Error> for ParseError {
    fn from(e: atat::serde_at::de::Error) -> Self {
        match e {
            // heapless strings report an overflowing value as a custom error
            atat::serde_at::de::Error::CustomError => Self::BufferTooSmall,
            _ => Self::Malformed,
        }
    }
}

impl core::fmt::Display for ParseError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::MissingPrefix => f.write_str("response prefix missing"),
            Self::FieldCountMismatch => f.write_str("unexpected number of fields"),
            Self::OutOfRange => f.write_str("value out of range"),
            Self::BufferTooSmall => f.write_str("string field too long"),
            Self::Malformed => f.write_str("malformed field"),
        }
    }
}

impl From<NetworkError> for Error {
    fn from(e: NetworkError) -> Self {
        Self::Network(e)
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidArgument => f.write_str("invalid argument"),
            Self::NotReady => f.write_str("transport not initialized"),
            Self::Io(kind) => write!(f, "transport I/O failure: {:?}", kind),
            Self::Timeout => f.write_str("no complete response within timeout"),
            Self::Overflow => f.write_str("response exceeded buffer capacity"),
            Self::DeviceError => f.write_str("device answered ERROR"),
            Self::InvalidResponse(e) => write!(f, "invalid response: {:?}", e),
            Self::CommandFailed => f.write_str("command failed after all retries"),
            Self::Network(NetworkError::SimNotReady) => f.write_str("SIM not ready"),
            Self::Network(NetworkError::ActivationFailed) => {
                f.write_str("PDP context activation failed")
            }
        }
    }
}
