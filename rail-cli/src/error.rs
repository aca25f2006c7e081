use rail_booking::BookingError;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("Console I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Input ended before the booking was complete")]
    UnexpectedEof,

    #[error(transparent)]
    Booking(#[from] BookingError),
}
