//! # bluff-engine: Poker Hand Evaluation, Dealing and Equity
//!
//! Turns cards into totally ordered hand strengths, deals rounds at a
//! seated table for stud, Texas Hold'em and Chinese poker, scores Chinese
//! poker royalties, and estimates preflop equity between ranges by
//! simulation. Every random source is a seedable ChaCha20 generator.
//!
//! ## Core Modules
//!
//! - [`cards`] - Card representation (Suit, Rank, Card) and abbreviations
//! - [`deck`] - Seeded 52-card deck
//! - [`hand`] - Hand strength encoding and categories
//! - [`player`] - Players and the `HandHolder` trait
//! - [`round`] - One dealt hand and its winner
//! - [`table`] - Seats, dealer button and round creation
//! - [`chinese`] - Chinese poker hands and royalties
//! - [`equity`] - Ranges, percentile ranking and Monte-Carlo equity
//! - [`config`] - TOML/environment configuration
//! - [`logging`] - `tracing` subscriber setup
//! - [`errors`] - Error types for engine operations
//!
//! ## Quick Start
//!
//! ```rust
//! use bluff_engine::hand::{Category, Hand};
//!
//! // Any number of cards can be valued; seven cards work like five.
//! let hand: Hand = "Ah Kh Qh Jh Th 2c 3d".parse().unwrap();
//! assert_eq!(hand.category(), Category::RoyalStraightFlush);
//!
//! let pair: Hand = "As Ad 9c".parse().unwrap();
//! assert!(hand.value() > pair.value());
//! ```
//!
//! ## Deterministic Dealing
//!
//! ```rust
//! use bluff_engine::deck::Deck;
//!
//! // Same seed produces same shuffle
//! let deck1 = Deck::new_with_seed(42);
//! let deck2 = Deck::new_with_seed(42);
//! assert_eq!(deck1.cards(), deck2.cards());
//! ```
//!
//! ## Equity
//!
//! ```rust
//! use bluff_engine::equity::{Range, Simulation};
//!
//! let hero = Range::parse("AA").unwrap();
//! let villain = Range::parse("55 AT A8s").unwrap();
//! let report = Simulation::new(2_000).with_seed(3).run(&[hero, villain]).unwrap();
//! assert!(report.equities[0] > report.equities[1]);
//! ```

pub mod cards;
pub mod chinese;
pub mod config;
pub mod deck;
pub mod equity;
pub mod errors;
pub mod hand;
pub mod logging;
pub mod player;
pub mod round;
pub mod table;
