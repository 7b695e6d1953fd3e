use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PokerError {
    #[error("'{0}' is not a valid card abbreviation")]
    InvalidAbbreviation(String),
    #[error("There are no cards left in the deck")]
    NotEnoughCards,
    #[error("The seat {0} is already occupied")]
    SeatOccupied(usize),
    #[error("Seat {seat} does not exist (table has {seats} seats)")]
    InvalidSeat { seat: usize, seats: usize },
    #[error("No occupied seats at the table")]
    EmptyTable,
    #[error("Not enough free seats at the table")]
    TableFull,
    #[error("Got {seats} seats for {players} players")]
    SeatCountMismatch { players: usize, seats: usize },
    #[error("The {hand} hand already holds {capacity} cards")]
    HandFull { hand: String, capacity: usize },
    #[error("'{0}' is not a valid hand (expected top, middle or bottom)")]
    InvalidHandTarget(String),
    #[error("Insufficient chips: requested {requested}, available {available}")]
    InsufficientChips { requested: u64, available: u64 },
    #[error("'{0}' is not a valid range description")]
    InvalidRange(String),
    #[error("Range {0} has no playable hands left")]
    EmptyRange(usize),
    #[error("Equity needs at least two ranges, got {0}")]
    NotEnoughRanges(usize),
    #[error("Simulation needs at least one trial")]
    NoTrials,
    #[error("Could not deal non-overlapping hands from the given ranges")]
    RangeConflict,
}
