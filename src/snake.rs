use serde::Serialize;

use crate::grid::Position;
use crate::input::Direction;

/// Ordered snake body, head first.
///
/// A `Snake` is a value: movement builds a new body instead of editing the
/// old one, so frames holding a clone never observe later ticks.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct Snake {
    #[serde(rename = "path")]
    body: Vec<Position>,
    facing: Direction,
}

impl Snake {
    /// Creates a one-cell snake at `start`.
    #[must_use]
    pub fn new(start: Position, facing: Direction) -> Self {
        Self {
            body: vec![start],
            facing,
        }
    }

    /// Creates a straight snake of `length` cells with the body trailing
    /// behind `head`, opposite to `facing`. A zero length yields one cell.
    #[must_use]
    pub fn straight(head: Position, length: usize, facing: Direction) -> Self {
        let behind = facing.opposite();
        let mut body = Vec::with_capacity(length.max(1));
        let mut cell = head;

        for _ in 0..length.max(1) {
            body.push(cell);
            cell = cell.step(behind);
        }

        Self { body, facing }
    }

    /// Creates a snake from explicit body segments (front is head).
    ///
    /// Returns `None` for an empty segment list.
    #[must_use]
    pub fn from_segments(segments: Vec<Position>, facing: Direction) -> Option<Self> {
        if segments.is_empty() {
            return None;
        }

        Some(Self {
            body: segments,
            facing,
        })
    }

    /// Returns the snake after its head moved to `head`.
    ///
    /// With `grow` the tail is kept (length + 1), otherwise it is dropped.
    #[must_use]
    pub fn advanced(&self, head: Position, grow: bool) -> Self {
        let kept = if grow {
            self.body.len()
        } else {
            self.body.len() - 1
        };

        let mut body = Vec::with_capacity(kept + 1);
        body.push(head);
        body.extend_from_slice(&self.body[..kept]);

        Self {
            body,
            facing: self.facing,
        }
    }

    /// Returns the same body facing `facing`.
    #[must_use]
    pub fn facing_towards(mut self, facing: Direction) -> Self {
        self.facing = facing;
        self
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Returns the last body segment.
    #[must_use]
    pub fn tail(&self) -> Position {
        self.body[self.body.len() - 1]
    }

    /// Returns true if any segment occupies `position`.
    #[must_use]
    pub fn occupies(&self, position: Position) -> bool {
        self.body.contains(&position)
    }

    /// Returns current segment count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Always false; a snake has at least one segment.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Returns the presentation direction of the head.
    #[must_use]
    pub fn facing(&self) -> Direction {
        self.facing
    }

    /// Body segments from head to tail.
    #[must_use]
    pub fn segments(&self) -> &[Position] {
        &self.body
    }
}
