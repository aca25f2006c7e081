use std::sync::Arc;

use rail_booking::{
    validate_name, BookingError, BookingLedger, BookingReceipt, BookingRequest, PartySummary,
    Passenger, TravelWindow, Trip,
};
use rail_catalog::{CoachType, TrainCatalog};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, Lines};

use crate::error::CliError;

/// How a console session ended. Only I/O problems are errors; everything
/// the passenger got wrong is an outcome.
#[derive(Debug)]
pub enum SessionOutcome {
    /// Every passenger got a seat
    Booked(Vec<BookingReceipt>),
    /// Trip details were rejected before anything was booked
    Aborted(String),
    /// The ledger refused a booking. Earlier passengers keep their seats.
    Failed {
        receipts: Vec<BookingReceipt>,
        error: BookingError,
    },
}

struct Prompter<R, W> {
    lines: Lines<R>,
    out: W,
}

impl<R, W> Prompter<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    async fn say(&mut self, text: &str) -> Result<(), CliError> {
        self.out.write_all(text.as_bytes()).await?;
        self.out.write_all(b"\n").await?;
        self.out.flush().await?;
        Ok(())
    }

    async fn ask(&mut self, prompt: &str) -> Result<String, CliError> {
        self.out.write_all(prompt.as_bytes()).await?;
        self.out.flush().await?;
        match self.lines.next_line().await? {
            Some(line) => Ok(line.trim().to_string()),
            None => Err(CliError::UnexpectedEof),
        }
    }

    /// Re-asks until the answer parses
    async fn ask_number<T: std::str::FromStr>(
        &mut self,
        prompt: &str,
        hint: &str,
    ) -> Result<T, CliError> {
        loop {
            let answer = self.ask(prompt).await?;
            match answer.parse::<T>() {
                Ok(value) => return Ok(value),
                Err(_) => self.say(hint).await?,
            }
        }
    }
}

/// Interactive booking flow for one party on the route
pub struct Session {
    ledger: Arc<BookingLedger>,
    catalog: TrainCatalog,
    window: TravelWindow,
    route_name: String,
}

impl Session {
    pub fn new(
        ledger: Arc<BookingLedger>,
        catalog: TrainCatalog,
        window: TravelWindow,
        route_name: impl Into<String>,
    ) -> Self {
        Self {
            ledger,
            catalog,
            window,
            route_name: route_name.into(),
        }
    }

    pub async fn run<R, W>(&self, reader: R, writer: W) -> Result<SessionOutcome, CliError>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut io = Prompter {
            lines: reader.lines(),
            out: writer,
        };

        io.say(&format!(
            "Welcome to My Online Railway Booking System ({})",
            self.route_name
        ))
        .await?;
        io.say("\n------------------------------------------------------------").await?;

        let party_size = loop {
            let seats: u32 = io
                .ask_number(
                    "Enter Number of Seats Required: ",
                    "Please enter the number of seats as a whole number.",
                )
                .await?;
            let available = self.ledger.available_seats()?;
            if seats == 0 {
                io.say("At least one seat is required.").await?;
            } else if seats > available {
                io.say(&format!("Only {} seats are available.", available)).await?;
            } else {
                break seats;
            }
        };

        let mut passengers = Vec::new();
        for i in 1..=party_size {
            io.say(&format!("Passenger {} Details:", i)).await?;

            let name = loop {
                let name = io.ask("Name: ").await?;
                match validate_name(&name) {
                    Ok(()) => break name,
                    Err(err) => io.say(&format!("{}. Please enter a valid name.", err)).await?,
                }
            };
            let age: i32 = io.ask_number("Age: ", "Please enter age as a whole number.").await?;

            passengers.push(Passenger::new(&name, age)?);
        }

        let date_input = io.ask("Date of Travel (DD/MM/YYYY): ").await?;
        let date = match self.window.parse_date(&date_input) {
            Ok(date) => date,
            Err(err) => return abort(&mut io, err.to_string()).await,
        };

        let origin = io.ask("From (Getting in): ").await?;
        let destination = io.ask("To (Destination): ").await?;

        let numbers = self
            .catalog
            .numbers()
            .iter()
            .map(|n| n.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        let train_input = io.ask(&format!("Select Train Number ({}): ", numbers)).await?;
        let train = match train_input.parse::<u32>() {
            Ok(number) => match self.catalog.find(number) {
                Ok(train) => train,
                Err(err) => return abort(&mut io, err.to_string()).await,
            },
            Err(_) => return abort(&mut io, format!("Invalid train number: {}", train_input)).await,
        };

        let capacity = self.ledger.capacity()?;
        io.say(&train.describe(capacity)).await?;
        io.say(&format!(
            "Available Time Options: [{}]",
            train.departure_labels().join(", ")
        ))
        .await?;

        let time_input = io.ask("Enter Preferred Time (HH:mm): ").await?;
        let departure = match train.departure_at(&time_input) {
            Ok(time) => time,
            Err(err) => return abort(&mut io, err.to_string()).await,
        };

        let coach_labels = CoachType::ALL.iter().map(|c| c.label()).collect::<Vec<_>>().join("/");
        let coach_input = io.ask(&format!("Preferred Coach Type ({}): ", coach_labels)).await?;
        let coach_type = match coach_input.parse::<CoachType>() {
            Ok(coach) => coach,
            Err(err) => return abort(&mut io, err.to_string()).await,
        };

        let payment_method = io
            .ask("Select Payment Method (Google Pay/Amazon Pay/PhonePe): ")
            .await?;

        let trip = Trip::new(date, &origin, &destination, train, departure, coach_type);
        tracing::info!(
            train = trip.train_number,
            date = %trip.date,
            passengers = passengers.len(),
            "Booking party"
        );

        let mut receipts = Vec::new();
        for passenger in passengers {
            let request = BookingRequest::new(passenger, trip.clone(), 1, payment_method.as_str());
            match self.ledger.book_seats(request) {
                Ok(receipt) => {
                    io.say(&receipt.to_string()).await?;
                    receipts.push(receipt);
                }
                Err(error) => {
                    io.say(&format!("Booking failed: {}", error)).await?;
                    return Ok(SessionOutcome::Failed { receipts, error });
                }
            }
        }

        if let Some(summary) = PartySummary::from_receipts(&receipts) {
            io.say("").await?;
            io.say(&summary.to_string()).await?;
        }

        Ok(SessionOutcome::Booked(receipts))
    }
}

async fn abort<R, W>(io: &mut Prompter<R, W>, reason: String) -> Result<SessionOutcome, CliError>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    tracing::warn!(%reason, "Session aborted");
    io.say(&reason).await?;
    Ok(SessionOutcome::Aborted(reason))
}
