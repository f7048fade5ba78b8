//! Build a placeholder game from a loaded snapshot.
//!
//! RULE: the game comes out in `LOADING`. Only `SnapshotModel::resume_play`
//! moves it to the saved state, after seats have been checked or filled.

use crate::{
    board::PotentialSettlements,
    card::{DevCardType, InventoryState},
    clock::{Clock, SystemClock},
    element::ElementType,
    error::{SaveGameError, SaveResult},
    game::{Board, Game, Player},
    options::GameOptions,
    seat::SeatSnapshot,
    snapshot::SnapshotModel,
    types::{GameState, SeatSelector},
};
use chrono::Duration;

/// Build a game from `model`, timed against the system clock.
pub fn create_loaded_game(model: &SnapshotModel) -> SaveResult<Game> {
    create_loaded_game_at(model, &SystemClock)
}

/// Build a game from `model`. Its start time is `clock.now()` minus the
/// saved duration, so the game's age carries over.
pub fn create_loaded_game_at<C>(model: &SnapshotModel, clock: &C) -> SaveResult<Game>
where
    C: Clock + ?Sized,
{
    model.check_loadable()?;

    let options = match model.game_options.as_deref() {
        Some(packed) => Some(GameOptions::parse(packed)?),
        None => None,
    };
    let max_players = model.player_seats.len();
    if let Some(declared) = options.as_ref().and_then(GameOptions::max_players) {
        if declared != max_players {
            log::warn!(
                "game '{}': options declare {declared} players, saved game has {max_players} seats",
                model.game_name
            );
        }
    }

    let board = Board::from_layout(&model.board_info.layout)?;
    let start_time = clock.now() - Duration::seconds(i64::from(model.game_duration_seconds));

    let mut game = Game::new(model.game_name.clone(), max_players, board, start_time);
    game.options = options;
    game.current_player_number = model.current_player_number;
    game.current_dice = model.current_dice;
    game.client_version_min_required = model.game_min_version;
    game.state = GameState::LOADING;

    let has_sea = game.has_sea_board();
    for (pn, seat) in model.player_seats.iter().enumerate() {
        game.set_seat_vacant(pn, seat.is_seat_vacant);
        if let Some(player) = game.player_mut(pn) {
            restore_seat(player, seat, has_sea);
        }
    }

    if let Some(first) = model.board_info.player_potentials.first() {
        game.board.restore_land_areas(first);
    }
    for record in &model.board_info.player_potentials {
        match record.player_number {
            SeatSelector::All => {
                for player in &mut game.players {
                    restore_potentials(player, record);
                }
            }
            SeatSelector::Seat(pn) => {
                let player = game.player_mut(pn).ok_or(SaveGameError::MissingSeat {
                    seat: pn,
                    max_players,
                })?;
                restore_potentials(player, record);
            }
        }
    }

    log::debug!(
        "game '{}': loaded {} seats ({} occupied), waiting to resume in {}",
        game.name,
        max_players,
        game.seated_players().count(),
        model.game_state
    );
    Ok(game)
}

fn restore_seat(player: &mut Player, seat: &SeatSnapshot, has_sea: bool) {
    *player = Player::new(player.number, has_sea);
    player.name = seat.name.clone();
    player.total_vp = seat.total_vp;
    player.is_robot = seat.is_robot;
    player.is_built_in_robot = seat.is_built_in_robot;
    player.robot_class = seat.robot_class.clone();
    player.face_id = seat.face_id;

    if seat.is_seat_vacant {
        return;
    }

    for (element, value) in seat.elements.iter() {
        if let Some(resource) = element.resource() {
            player.resources.set_amount(resource, value);
        } else if let Some(piece) = element.remaining_pieces() {
            player.set_remaining_pieces(piece, value);
        } else {
            match element {
                ElementType::NumKnights => player.num_knights = value,
                ElementType::ScenarioWarshipCount => player.num_warships = value,
                _ => {}
            }
        }
    }

    for &card in &seat.new_dev_cards {
        player.inventory.add_dev_card(card, InventoryState::New);
    }
    for &card in &seat.old_dev_cards {
        player.inventory.add_dev_card(card, old_card_state(card));
    }

    player.pieces = seat.pieces.clone();
    player.fortress = seat.fortress_piece.clone();
}

fn restore_potentials(player: &mut Player, record: &PotentialSettlements) {
    player.potential_settlements = record.nodes.clone();
    player.legal_sea_edges = record.legal_sea_edges.clone();
}

/// Old cards are saved as one list. VP cards are kept, the rest playable.
fn old_card_state(card: DevCardType) -> InventoryState {
    if card.is_vp_card() {
        InventoryState::Kept
    } else {
        InventoryState::Playable
    }
}
