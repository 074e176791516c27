use bingo_core::{
    Board, CellRect, Coordinate, GestureController, GestureEffect, GestureEvent,
    PointerDragController, PointerPress, SeededContent, TileId,
};

fn coord(row: usize, col: usize) -> Coordinate {
    Coordinate::new(row, col).expect("coordinate in range")
}

fn board() -> Board {
    Board::create(&mut SeededContent::new(2024))
}

fn tile_at(board: &Board, row: usize, col: usize) -> TileId {
    board.tile(coord(row, col)).id.clone()
}

fn press(pointer_id: i32) -> PointerPress {
    PointerPress {
        pointer_id,
        x: 110.0,
        y: 215.0,
        rect: CellRect {
            left: 100.0,
            top: 200.0,
            width: 80.0,
            height: 60.0,
        },
    }
}

#[test]
fn pointer_down_captures_and_spawns_clone() {
    let board = board();
    let mut controller = PointerDragController::new();
    let source = tile_at(&board, 1, 1);
    let effects = controller.pointer_down(&board, "1,1", press(7));
    assert_eq!(
        effects,
        vec![
            GestureEffect::CapturePointer { pointer_id: 7 },
            GestureEffect::SuppressInteraction {
                tile: source.clone()
            },
            GestureEffect::SpawnClone {
                tile: source.clone(),
                width: 80.0,
                height: 60.0,
                x: 100.0,
                y: 200.0,
            },
            GestureEffect::Highlight { tile: source },
        ]
    );
    assert_eq!(controller.tracked_pointer(), Some(7));
}

#[test]
fn second_pointer_down_is_ignored_while_tracking() {
    let board = board();
    let mut controller = PointerDragController::new();
    controller.pointer_down(&board, "1,1", press(1));
    assert!(controller.pointer_down(&board, "2,2", press(2)).is_empty());
    assert_eq!(controller.tracked_pointer(), Some(1));
}

#[test]
fn pointer_move_keeps_the_grab_offset() {
    let board = board();
    let mut controller = PointerDragController::new();
    controller.pointer_down(&board, "1,1", press(1));
    let effects = controller.pointer_move(&board, 1, 160.0, 265.0, None);
    assert_eq!(effects, vec![GestureEffect::MoveClone { x: 150.0, y: 250.0 }]);
}

#[test]
fn pointer_move_highlights_the_hovered_cell() {
    let board = board();
    let mut controller = PointerDragController::new();
    controller.pointer_down(&board, "1,1", press(1));

    let over_source = controller.pointer_move(&board, 1, 112.0, 215.0, Some("1,1"));
    assert_eq!(over_source.len(), 1);

    let over_other = controller.pointer_move(&board, 1, 200.0, 215.0, Some("1,2"));
    assert_eq!(
        over_other[1..],
        [GestureEffect::Highlight {
            tile: tile_at(&board, 1, 2)
        }]
    );
    assert_eq!(controller.hover(), Some(coord(1, 2)));

    let off_board = controller.pointer_move(&board, 1, 900.0, 900.0, None);
    assert_eq!(
        off_board[1..],
        [GestureEffect::ClearHighlight {
            tile: tile_at(&board, 1, 2)
        }]
    );
    assert_eq!(controller.hover(), None);
}

#[test]
fn events_for_other_pointers_are_ignored() {
    let board = board();
    let mut controller = PointerDragController::new();
    controller.pointer_down(&board, "0,0", press(3));
    assert!(controller.pointer_move(&board, 4, 0.0, 0.0, None).is_empty());
    assert!(controller.pointer_up(&board, 4, Some("1,1")).is_empty());
    assert!(controller.pointer_cancel(4).is_empty());
    assert!(controller.is_active());
}

#[test]
fn events_while_idle_are_ignored() {
    let board = board();
    let mut controller = PointerDragController::new();
    assert!(controller.pointer_move(&board, 1, 0.0, 0.0, Some("1,1")).is_empty());
    assert!(controller.pointer_up(&board, 1, Some("1,1")).is_empty());
    assert!(controller.pointer_cancel(1).is_empty());
}

#[test]
fn pointer_up_over_another_cell_swaps_after_teardown() {
    let board = board();
    let mut controller = PointerDragController::new();
    let source = tile_at(&board, 0, 0);
    let hovered = tile_at(&board, 3, 4);
    controller.pointer_down(&board, "0,0", press(5));
    controller.pointer_move(&board, 5, 400.0, 400.0, Some("3,4"));
    let effects = controller.pointer_up(&board, 5, Some("3,4"));
    assert_eq!(
        effects,
        vec![
            GestureEffect::ReleasePointer { pointer_id: 5 },
            GestureEffect::RestoreInteraction {
                tile: source.clone()
            },
            GestureEffect::ClearHighlight { tile: source },
            GestureEffect::ClearHighlight { tile: hovered },
            GestureEffect::RemoveClone,
            GestureEffect::Swap {
                from: coord(0, 0),
                to: coord(3, 4)
            },
        ]
    );
    assert!(!controller.is_active());
}

#[test]
fn pointer_up_over_source_or_chrome_does_not_swap() {
    let board = board();
    let mut controller = PointerDragController::new();
    controller.pointer_down(&board, "2,2", press(1));
    let effects = controller.pointer_up(&board, 1, Some("2,2"));
    assert!(!effects
        .iter()
        .any(|effect| matches!(effect, GestureEffect::Swap { .. })));
    assert_eq!(effects.last(), Some(&GestureEffect::RemoveClone));

    controller.pointer_down(&board, "2,2", press(1));
    let effects = controller.pointer_up(&board, 1, None);
    assert_eq!(effects.last(), Some(&GestureEffect::RemoveClone));
}

#[test]
fn pointer_cancel_never_swaps() {
    let board = board();
    let mut controller = PointerDragController::new();
    controller.pointer_down(&board, "4,0", press(9));
    controller.pointer_move(&board, 9, 300.0, 300.0, Some("0,4"));
    let effects = controller.pointer_cancel(9);
    assert!(!effects
        .iter()
        .any(|effect| matches!(effect, GestureEffect::Swap { .. })));
    assert_eq!(effects.first(), Some(&GestureEffect::ReleasePointer { pointer_id: 9 }));
    assert_eq!(effects.last(), Some(&GestureEffect::RemoveClone));
    assert!(!controller.is_active());
}

#[test]
fn click_after_a_moved_drag_is_swallowed_once() {
    let board = board();
    let mut controller = PointerDragController::new();
    controller.pointer_down(&board, "1,1", press(1));
    controller.pointer_move(&board, 1, 150.0, 215.0, None);
    controller.pointer_up(&board, 1, None);
    assert!(controller.take_click_suppression());
    assert!(!controller.take_click_suppression());
}

#[test]
fn swap_within_the_slop_still_swallows_the_click() {
    let board = board();
    let mut controller = PointerDragController::new();
    controller.pointer_down(&board, "0,0", press(1));
    controller.pointer_move(&board, 1, 112.0, 215.0, Some("0,1"));
    let effects = controller.pointer_up(&board, 1, Some("0,1"));
    assert_eq!(
        effects.last(),
        Some(&GestureEffect::Swap {
            from: coord(0, 0),
            to: coord(0, 1)
        })
    );
    assert!(controller.take_click_suppression());
}

#[test]
fn tap_without_movement_keeps_the_click() {
    let board = board();
    let mut controller = PointerDragController::new();
    controller.pointer_down(&board, "1,1", press(1));
    controller.pointer_move(&board, 1, 111.0, 216.0, Some("1,1"));
    controller.pointer_up(&board, 1, Some("1,1"));
    assert!(!controller.take_click_suppression());
}

#[test]
fn handle_ignores_native_drag_events() {
    let board = board();
    let mut controller = PointerDragController::new();
    let effects = controller.handle(
        &board,
        &GestureEvent::DragStart {
            source: "0,0".to_string(),
        },
    );
    assert!(effects.is_empty());
    assert!(!controller.is_active());
}
