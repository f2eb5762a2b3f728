// Copyright (c) Addison Crump, 2025, licensed under the EUPL-1.2-or-later.

use crate::{Board, BoardValue, Position, TileId, position};

/// Find the anchor (bottom-left cell) of a solved block: tiles 1 and 2 side by side at `y`, with
/// 3 and 4 directly above them. Anchors are scanned with `x` in the outer loop and `y` in the
/// inner one, both ascending, and the first match is returned.
pub fn find_win<V: BoardValue>(board: &Board<V>) -> Option<Position<V>> {
    let last = board.dimension().side_len().saturating_sub(1);
    for x in 0..last {
        for y in 0..last {
            let block = [(x, y), (x + 1, y), (x, y + 1), (x + 1, y + 1)];
            let solved = block.into_iter().zip(TileId::ALL).all(|((cx, cy), tile)| {
                position::<V>(cx, cy).and_then(|p| board.tile_at(p)) == Some(tile)
            });
            if solved {
                return position(x, y);
            }
        }
    }
    None
}
