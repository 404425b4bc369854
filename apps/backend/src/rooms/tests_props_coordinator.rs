/// Property-based tests for the room coordinator
use proptest::prelude::*;
use uuid::Uuid;

use crate::domain::rules::CELLS;
use crate::domain::{test_gens, test_prelude, Symbol};
use crate::errors::GameError;
use crate::rooms::room::{ConnId, Phase, Room, RoomId};

fn started() -> (Room, ConnId, ConnId) {
    let mut room = Room::new(RoomId::normalize("prop").unwrap());
    let x = Uuid::new_v4();
    let o = Uuid::new_v4();
    room.join(x, "x").unwrap();
    room.join(o, "o").unwrap();
    room.start(x).unwrap();
    (room, x, o)
}

/// Every move the rules allow right now, as `(big, small)`.
fn legal_moves(room: &Room) -> Vec<(u8, u8)> {
    let bigs: Vec<u8> = match room.forced_cell() {
        Some(big) => vec![big],
        None => (0..CELLS as u8)
            .filter(|b| !room.board().is_closed(*b))
            .collect(),
    };
    bigs.into_iter()
        .flat_map(|big| {
            (0..CELLS as u8)
                .filter(move |small| room.board().cell(big, *small).is_none())
                .map(move |small| (big, small))
        })
        .collect()
}

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    /// Property: along any legal game, turns alternate, the forced cell is
    /// always open, completions never change, and the off-turn player is
    /// always refused without touching the room.
    #[test]
    fn prop_random_games_keep_invariants(choices in test_gens::move_choices(81)) {
        let (mut room, x, o) = started();

        for choice in choices {
            if room.phase() == Phase::Finished {
                break;
            }
            let mover = room.current_turn().expect("turn while playing");
            let (mover_conn, waiting_conn) = match mover {
                Symbol::X => (x, o),
                Symbol::O => (o, x),
            };

            let before = room.clone();
            prop_assert_eq!(
                room.apply_move(waiting_conn, 0, 0).map(|_| ()),
                Err(GameError::NotYourTurn)
            );
            prop_assert_eq!(room.board(), before.board());

            let moves = legal_moves(&room);
            prop_assert!(!moves.is_empty(), "ongoing game must have a legal move");
            let (big, small) = moves[choice % moves.len()];

            let mv = room
                .apply_move(mover_conn, i64::from(big), i64::from(small))
                .expect("legal move accepted");
            prop_assert_eq!(mv.symbol, mover);

            for b in 0..CELLS as u8 {
                if let Some(state) = before.board().completion(b) {
                    prop_assert_eq!(room.board().completion(b), Some(state));
                }
            }

            match mv.game_over {
                Some(_) => {
                    prop_assert_eq!(room.phase(), Phase::Finished);
                    prop_assert_eq!(mv.next_turn, None);
                    prop_assert_eq!(mv.forced_cell, None);
                }
                None => {
                    prop_assert_eq!(mv.next_turn, Some(mover.other()));
                    if let Some(forced) = mv.forced_cell {
                        prop_assert_eq!(forced, small);
                        prop_assert!(!room.board().is_closed(forced));
                    } else {
                        prop_assert!(room.board().is_closed(small));
                    }
                }
            }
        }
    }

    /// Property: a move outside the forced big cell is always refused.
    #[test]
    fn prop_wrong_big_cell_rejected(first_small in 0u8..9, other_big in 0u8..9) {
        let (mut room, x, o) = started();
        room.apply_move(x, 4, i64::from(first_small)).unwrap();
        prop_assume!(other_big != first_small);

        prop_assert_eq!(
            room.apply_move(o, i64::from(other_big), 0).map(|_| ()),
            Err(GameError::WrongBigCell)
        );
    }
}
