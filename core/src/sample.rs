//! Deterministic sample games.
//!
//! RULE: a sample game is a pure function of its seed and player count.
//! Nothing here reads the platform RNG or the wall clock; callers pass the
//! start time in.
//!
//! Samples drive the tool's `demo` command and the round-trip tests, so
//! they cover every board format, vacant seats, robots, all three card
//! states, and scenario pieces on sea boards.

use crate::{
    board::BoardEncodingFormat,
    card::{DevCardType, InventoryState},
    element::ResourceType,
    game::{Board, Game, Player},
    options::{GameOptions, OptionValue, MAX_PLAYERS_KEY},
    piece::{PieceType, PlayingPiece},
    types::{Coord, GameState, SeatNumber, Version},
};
use chrono::{DateTime, Utc};
use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg64Mcg;

/// Seeded RNG for sample generation.
pub struct SampleRng {
    inner: Pcg64Mcg,
}

impl SampleRng {
    pub fn new(seed: u64) -> Self {
        Self {
            inner: Pcg64Mcg::seed_from_u64(seed ^ 0x9e37_79b9_7f4a_7c15),
        }
    }

    /// Roll a float in [0.0, 1.0).
    pub fn next_f64(&mut self) -> f64 {
        let bits = self.inner.next_u64();
        (bits >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    /// Roll a u64 in [0, n).
    pub fn next_u64_below(&mut self, n: u64) -> u64 {
        assert!(n > 0, "n must be > 0");
        self.inner.next_u64() % n
    }

    /// Bernoulli trial: returns true with probability p.
    pub fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    /// Roll an integer in [lo, hi].
    pub fn range(&mut self, lo: i32, hi: i32) -> i32 {
        assert!(lo <= hi, "empty range {lo}..={hi}");
        let span = (i64::from(hi) - i64::from(lo) + 1) as u64;
        lo + self.next_u64_below(span) as i32
    }

    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[self.next_u64_below(items.len() as u64) as usize]
    }
}

const PLAYER_NAMES: &[&str] = &[
    "Ada", "Bram", "Cleo", "Dario", "Edda", "Finn", "Greta", "Hugo", "Ines", "Jory",
    "Kasia", "Lars", "Mira", "Nils", "Odile", "Pavel", "Quinn", "Rosa", "Sven", "Tamsin",
];

/// Class reported by robots shipped with the server.
pub const BUILT_IN_ROBOT_CLASS: &str = "builtin.Robot";
const THIRD_PARTY_ROBOT_CLASS: &str = "bots.SmartRobot";

const RESUMABLE_STATES: [GameState; 4] = [
    GameState::ROLL_OR_CARD,
    GameState::PLAY1,
    GameState::PLACING_ROBBER,
    GameState::WAITING_FOR_DISCARDS,
];

const PLAYABLE_CARDS: [DevCardType; 4] = [
    DevCardType::Knight,
    DevCardType::Roads,
    DevCardType::Discovery,
    DevCardType::Monopoly,
];

const VP_CARDS: [DevCardType; 5] = [
    DevCardType::Capitol,
    DevCardType::Market,
    DevCardType::University,
    DevCardType::Temple,
    DevCardType::Chapel,
];

/// Oldest client able to play on each board format.
pub fn min_version_for(format: BoardEncodingFormat) -> Version {
    match format {
        BoardEncodingFormat::Original  => 1000,
        BoardEncodingFormat::SixPlayer => 1108,
        BoardEncodingFormat::Large     => 2000,
    }
}

/// A game in progress, past initial placement.
///
/// Seat 0 is always occupied. Boards with more than four seats use the
/// six-player format; smaller games get the original or the large sea board.
///
/// Panics if `max_players` is 0.
pub fn sample_game(seed: u64, max_players: usize, started: DateTime<Utc>) -> Game {
    let mut rng = SampleRng::new(seed);

    let format = if max_players > 4 {
        BoardEncodingFormat::SixPlayer
    } else if rng.chance(0.5) {
        BoardEncodingFormat::Large
    } else {
        BoardEncodingFormat::Original
    };
    let board = sample_board(&mut rng, format);

    let mut game = Game::new(format!("sample-{seed}"), max_players, board, started);
    game.client_version_min_required = min_version_for(format);
    game.options = Some(sample_options(&mut rng, max_players, format.has_sea()));

    let has_sea = game.has_sea_board();
    let mut seated = Vec::new();
    for pn in 0..max_players {
        if pn > 0 && rng.chance(0.25) {
            continue;
        }
        let name = *rng.pick(PLAYER_NAMES);
        game.set_seat_vacant(pn, false);
        if let Some(player) = game.player_mut(pn) {
            fill_player(&mut rng, player, name, has_sea);
        }
        seated.push(pn);
    }

    let shared: Vec<Coord> = (0..rng.range(0, 4)).map(|i| 0x40 + i * 2).collect();
    let per_seat = rng.chance(0.5);
    for player in &mut game.players {
        player.potential_settlements = if per_seat {
            let base = 0x60 + (player.number as Coord) * 0x10;
            (0..rng.range(0, 3)).map(|i| base + i * 2).collect()
        } else {
            shared.clone()
        };
        if has_sea && per_seat {
            let base = 0x0200 + (player.number as Coord) * 0x20;
            player.legal_sea_edges = vec![(0..rng.range(1, 4)).map(|i| base + i).collect()];
        }
    }
    if has_sea && rng.chance(0.5) {
        game.board.land_area_count = 2;
        game.board.starting_land_area = 1;
        game.board.land_areas_legal_nodes = vec![Vec::new(), shared.clone(), vec![0x0a05, 0x0a07]];
    }

    game.state = *rng.pick(&RESUMABLE_STATES);
    game.current_dice = match game.state {
        GameState::ROLL_OR_CARD => 0,
        GameState::PLACING_ROBBER | GameState::WAITING_FOR_DISCARDS => 7,
        _ => rng.range(2, 12),
    };
    game.current_player_number = *rng.pick(&seated) as i32;

    log::debug!(
        "sample {seed}: {format:?} board, {} of {max_players} seats taken, state {}",
        seated.len(),
        game.state
    );
    game
}

fn sample_options(rng: &mut SampleRng, max_players: usize, has_sea: bool) -> GameOptions {
    let mut values = vec![
        (MAX_PLAYERS_KEY, OptionValue::Int(max_players as i32)),
        ("RD", OptionValue::Bool(rng.chance(0.5))),
        ("VP", OptionValue::IntBool(true, *rng.pick(&[10, 12, 13]))),
    ];
    if has_sea {
        values.push(("SBL", OptionValue::Bool(true)));
    }

    let mut options = GameOptions::new();
    for (key, value) in values {
        if let Err(err) = options.insert(key, value) {
            log::warn!("sample option {key} skipped: {err}");
        }
    }
    options
}

fn sample_board(rng: &mut SampleRng, format: BoardEncodingFormat) -> Board {
    let mut board = Board::new(format);
    let hex_count = match format {
        BoardEncodingFormat::Original  => 37,
        BoardEncodingFormat::SixPlayer => 56,
        BoardEncodingFormat::Large     => 48,
    };
    board.hex_layout = (0..hex_count).map(|_| rng.range(0, 6)).collect();
    board.number_layout = board
        .hex_layout
        .iter()
        .map(|&hex| if hex == 0 { -1 } else { rng.range(0, 9) })
        .collect();
    board.robber_hex = 0x55 + rng.range(0, 4) * 2;

    if format != BoardEncodingFormat::Original {
        board.port_layout = (0..rng.range(5, 9)).map(|_| rng.range(0, 5)).collect();
    }
    if format.has_sea() {
        board.land_hexes = (0..rng.range(8, 16)).map(|i| 0x0103 + i * 2).collect();
        board.pirate_hex = if rng.chance(0.5) { 0x0a0b } else { 0 };
    }
    board
}

fn fill_player(rng: &mut SampleRng, player: &mut Player, name: &str, has_sea: bool) {
    let pn = player.number;
    player.name = Some(name.to_string());
    player.face_id = rng.range(1, 70);
    if pn > 0 && rng.chance(0.5) {
        player.is_robot = true;
        player.is_built_in_robot = rng.chance(0.7);
        let class = if player.is_built_in_robot {
            BUILT_IN_ROBOT_CLASS
        } else {
            THIRD_PARTY_ROBOT_CLASS
        };
        player.robot_class = Some(class.to_string());
    }

    for resource in ResourceType::ALL {
        if resource != ResourceType::Unknown {
            player.resources.set_amount(resource, rng.range(0, 4));
        }
    }
    player.num_knights = rng.range(0, 3);

    let base = node_base(pn);
    let settlements = rng.range(2, 4);
    for i in 0..settlements {
        player.place_piece(PlayingPiece::new(PieceType::Settlement, base + i * 4, pn));
        player.place_piece(PlayingPiece::new(PieceType::Road, base + i * 4 + 1, pn));
    }
    let cities = rng.range(0, 1);
    for i in 0..cities {
        player.place_piece(PlayingPiece::new(PieceType::City, base + i * 4, pn));
    }

    if has_sea {
        for i in 0..rng.range(0, 3) {
            player.place_piece(PlayingPiece::new(PieceType::Ship, base + 0x21 + i * 2, pn));
        }
        player.num_warships = rng.range(0, 2);
        if pn == 0 && rng.chance(0.5) {
            player.fortress = Some(PlayingPiece::fortress(0x0c05, pn, rng.range(1, 6)));
        }
    }

    if rng.chance(0.4) {
        let card = *rng.pick(&PLAYABLE_CARDS);
        player.inventory.add_dev_card(card, InventoryState::New);
    }
    for _ in 0..rng.range(0, 2) {
        let card = *rng.pick(&PLAYABLE_CARDS);
        player.inventory.add_dev_card(card, InventoryState::Playable);
    }
    let mut kept_vp = 0;
    if rng.chance(0.3) {
        player.inventory.add_dev_card(*rng.pick(&VP_CARDS), InventoryState::Kept);
        kept_vp += 1;
    }

    player.total_vp = (settlements - cities) + 2 * cities + kept_vp;
}

fn node_base(pn: SeatNumber) -> Coord {
    0x23 + (pn as Coord) * 0x20
}
