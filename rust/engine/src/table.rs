use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::EngineConfig;
use crate::deck::Deck;
use crate::errors::PokerError;
use crate::player::HandHolder;
use crate::round::Round;

/// Game variants differ at the table only by how many cards each player starts with.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Five-card stud/draw style games.
    Stud,
    /// Texas Hold'em, two hole cards.
    Holdem,
    /// 13-card Chinese poker.
    Chinese,
}

impl Variant {
    pub fn starting_cards(self) -> usize {
        match self {
            Variant::Stud => 5,
            Variant::Holdem => 2,
            Variant::Chinese => 13,
        }
    }
}

/// Seating arrangement that survives across rounds: who sits where and who
/// holds the dealer button.
///
/// # Examples
///
/// ```
/// use bluff_engine::player::{HandHolder, Player};
/// use bluff_engine::table::{Table, Variant};
///
/// let mut table = Table::with_seed(6, Variant::Holdem, 11).unwrap();
/// table.add_player(Player::new("Chris", 500), 1).unwrap();
/// table.add_player(Player::new("Sam", 500), 4).unwrap();
///
/// let round = table.new_round().unwrap();
/// assert_eq!(round.players().len(), 2);
/// assert!(round.players().iter().all(|p| p.hand().len() == 2));
/// ```
#[derive(Debug)]
pub struct Table<P: HandHolder> {
    seats: Vec<Option<P>>,
    dealer: usize,
    variant: Variant,
    rng: ChaCha20Rng,
}

impl<P: HandHolder> Table<P> {
    pub fn new(n_seats: usize, variant: Variant) -> Result<Self, PokerError> {
        Self::from_rng(n_seats, variant, ChaCha20Rng::from_rng(&mut rand::rng()))
    }

    pub fn with_seed(n_seats: usize, variant: Variant, seed: u64) -> Result<Self, PokerError> {
        Self::from_rng(n_seats, variant, ChaCha20Rng::seed_from_u64(seed))
    }

    /// Table sized and seeded from the resolved configuration.
    pub fn from_config(config: &EngineConfig, variant: Variant) -> Result<Self, PokerError> {
        match config.seed {
            Some(seed) => Self::with_seed(config.seats, variant, seed),
            None => Self::new(config.seats, variant),
        }
    }

    /// The dealer button starts on a uniformly random seat.
    pub fn from_rng(
        n_seats: usize,
        variant: Variant,
        mut rng: ChaCha20Rng,
    ) -> Result<Self, PokerError> {
        if n_seats == 0 {
            return Err(PokerError::EmptyTable);
        }
        let dealer = rng.random_range(0..n_seats);
        Ok(Self {
            seats: (0..n_seats).map(|_| None).collect(),
            dealer,
            variant,
            rng,
        })
    }

    pub fn seats(&self) -> &[Option<P>] {
        &self.seats
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn dealer(&self) -> usize {
        self.dealer
    }

    pub fn set_dealer(&mut self, seat: usize) -> Result<(), PokerError> {
        self.check_seat(seat)?;
        self.dealer = seat;
        Ok(())
    }

    pub fn occupied(&self) -> usize {
        self.seats.iter().filter(|s| s.is_some()).count()
    }

    pub fn add_player(&mut self, player: P, seat: usize) -> Result<(), PokerError> {
        self.check_seat(seat)?;
        match &mut self.seats[seat] {
            Some(_) => Err(PokerError::SeatOccupied(seat)),
            slot => {
                *slot = Some(player);
                Ok(())
            }
        }
    }

    /// Seats every player. Without explicit seats each player takes a random
    /// free seat; with seats, players and seats are paired in order. Every
    /// seat is checked first, so on error nobody is seated.
    pub fn add_players(
        &mut self,
        players: Vec<P>,
        seats: Option<&[usize]>,
    ) -> Result<(), PokerError> {
        let seats: Vec<usize> = match seats {
            Some(seats) => {
                if seats.len() != players.len() {
                    return Err(PokerError::SeatCountMismatch {
                        players: players.len(),
                        seats: seats.len(),
                    });
                }
                for (i, &seat) in seats.iter().enumerate() {
                    self.check_seat(seat)?;
                    if self.seats[seat].is_some() || seats[..i].contains(&seat) {
                        return Err(PokerError::SeatOccupied(seat));
                    }
                }
                seats.to_vec()
            }
            None => {
                let mut free: Vec<usize> = (0..self.seats.len())
                    .filter(|&i| self.seats[i].is_none())
                    .collect();
                if free.len() < players.len() {
                    return Err(PokerError::TableFull);
                }
                (0..players.len())
                    .map(|_| {
                        let pick = self.rng.random_range(0..free.len());
                        free.swap_remove(pick)
                    })
                    .collect()
            }
        };
        for (player, seat) in players.into_iter().zip(seats) {
            self.seats[seat] = Some(player);
        }
        Ok(())
    }

    /// Frees the seat and hands back whoever sat there.
    pub fn remove_player(&mut self, seat: usize) -> Option<P> {
        self.seats.get_mut(seat).and_then(Option::take)
    }

    /// Moves the button forward (wrapping) until it sits on an occupied seat.
    fn validate_dealer(&mut self) -> Result<(), PokerError> {
        let n = self.seats.len();
        let shift = (0..n)
            .find(|&step| self.seats[(self.dealer + step) % n].is_some())
            .ok_or(PokerError::EmptyTable)?;
        if shift > 0 {
            let from = self.dealer;
            self.dealer = (self.dealer + shift) % n;
            debug!(from, to = self.dealer, "dealer moved to occupied seat");
        }
        Ok(())
    }

    /// Deals a new round to the seated players, starting with the dealer.
    pub fn new_round(&mut self) -> Result<Round<'_, P>, PokerError> {
        self.validate_dealer()?;
        let deck = Deck::from_rng(ChaCha20Rng::from_rng(&mut self.rng));
        let n = self.seats.len();
        let dealer = self.dealer;
        let variant = self.variant;

        let mut ordered: Vec<(usize, &mut P)> = self
            .seats
            .iter_mut()
            .enumerate()
            .filter_map(|(i, seat)| seat.as_mut().map(|p| ((i + n - dealer) % n, p)))
            .collect();
        ordered.sort_by_key(|(order, _)| *order);
        let players = ordered.into_iter().map(|(_, p)| p).collect();

        let mut round = Round::new(players, variant.starting_cards(), deck);
        round.new_hand()?;
        debug!(dealer, ?variant, "new round");
        Ok(round)
    }

    fn check_seat(&self, seat: usize) -> Result<(), PokerError> {
        if seat >= self.seats.len() {
            return Err(PokerError::InvalidSeat {
                seat,
                seats: self.seats.len(),
            });
        }
        Ok(())
    }
}
