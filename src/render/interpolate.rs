//! Sub-tick draw positions for the snake body
//!
//! Between two ticks every segment is drawn part of the way toward the segment
//! ahead of it, so the snake appears to glide instead of jumping a full cell.
//! Nothing here touches simulation state; the same inputs always give the
//! same quads.

use std::collections::VecDeque;

use crate::game::{Board, Direction, GameMode, Position, Rgb};

/// Per-segment darkening applied from head to tail
const GRADIENT_FACTOR: f32 = 0.999;

/// Role of a segment within the body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    Head,
    Body,
    /// Neighbours differ on both axes
    Corner,
    Tail,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuadVariant {
    /// Segment offset toward where it is heading
    Sliding,
    /// Second copy on the far side of the board while wrapping
    WrapGhost,
    /// Segment at its own cell, fills the gap left at turns
    Anchor,
}

/// One square to draw, in board cell units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quad {
    pub x: f32,
    pub y: f32,
    pub color: Rgb,
    pub kind: SegmentKind,
    pub variant: QuadVariant,
}

/// Turns a body and a tick fraction into quads
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interpolator {
    board: Board,
    mode: GameMode,
    head_color: Rgb,
}

impl Interpolator {
    pub fn new(board: Board, mode: GameMode, head_color: Rgb) -> Self {
        Self {
            board,
            mode,
            head_color,
        }
    }

    /// Quads for `body` (tail first) moving in `direction`, `fraction` of the way to the next tick
    pub fn quads(&self, body: &VecDeque<Position>, direction: Direction, fraction: f32) -> Vec<Quad> {
        let len = body.len();
        let colors = self.gradient(len);
        let mut quads = Vec::with_capacity(len * 2);

        for (i, &cell) in body.iter().enumerate() {
            let color = colors[i];
            let kind = segment_kind(body, i);

            let (offset, wrapping) = if kind == SegmentKind::Head {
                (direction.delta(), false)
            } else {
                let next = body[i + 1];
                let (dx, dy) = (next.x - cell.x, next.y - cell.y);
                let wrapping = dx.abs() > 1 || dy.abs() > 1;
                let offset = (dx.signum(), dy.signum());
                // Keep sliding toward the border being left rather than across the board
                if wrapping {
                    ((-offset.0, -offset.1), true)
                } else {
                    (offset, false)
                }
            };

            let x = cell.x as f32 + fraction * offset.0 as f32;
            let y = cell.y as f32 + fraction * offset.1 as f32;
            quads.push(Quad {
                x,
                y,
                color,
                kind,
                variant: QuadVariant::Sliding,
            });

            if self.mode.wraps() {
                if wrapping {
                    let next = body[i + 1];
                    quads.push(Quad {
                        x: next.x as f32,
                        y: next.y as f32,
                        color,
                        kind,
                        variant: QuadVariant::WrapGhost,
                    });
                } else if kind == SegmentKind::Head {
                    if let Some((gx, gy)) = self.head_ghost(cell, x, y) {
                        quads.push(Quad {
                            x: gx,
                            y: gy,
                            color,
                            kind,
                            variant: QuadVariant::WrapGhost,
                        });
                    }
                }
            }

            if matches!(kind, SegmentKind::Corner | SegmentKind::Head) {
                quads.push(Quad {
                    x: cell.x as f32,
                    y: cell.y as f32,
                    color,
                    kind,
                    variant: QuadVariant::Anchor,
                });
            }
        }

        quads
    }

    /// Where the part of a head sliding off one edge reappears
    fn head_ghost(&self, cell: Position, x: f32, y: f32) -> Option<(f32, f32)> {
        let extra_x = (x - cell.x as f32).abs();
        let extra_y = (y - cell.y as f32).abs();
        let max_x = (self.board.width - 1) as f32;
        let max_y = (self.board.height - 1) as f32;

        if x < 0.0 {
            Some((self.board.width as f32 - extra_x, cell.y as f32))
        } else if x > max_x {
            Some((-1.0 + extra_x, cell.y as f32))
        } else if y < 0.0 {
            Some((cell.x as f32, self.board.height as f32 - extra_y))
        } else if y > max_y {
            Some((cell.x as f32, -1.0 + extra_y))
        } else {
            None
        }
    }

    /// Colors tail first, head last, darkening one step per segment away from the head
    fn gradient(&self, len: usize) -> Vec<Rgb> {
        let mut colors = Vec::with_capacity(len);
        let mut color = self.head_color;
        for _ in 0..len {
            colors.push(color);
            color = color.scaled(GRADIENT_FACTOR);
        }
        colors.reverse();
        colors
    }
}

fn segment_kind(body: &VecDeque<Position>, i: usize) -> SegmentKind {
    if i + 1 == body.len() {
        SegmentKind::Head
    } else if i == 0 {
        SegmentKind::Tail
    } else {
        let prev = body[i - 1];
        let next = body[i + 1];
        if prev.x != next.x && prev.y != next.y {
            SegmentKind::Corner
        } else {
            SegmentKind::Body
        }
    }
}
