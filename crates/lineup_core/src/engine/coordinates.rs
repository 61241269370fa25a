//! Line → coordinate mapping
//!
//! All values are percentages of the diagram (see [`FieldPosition`]). The
//! reference side defends the near extreme (`goalkeeper_y`) and attacks the
//! far one (`attack_y`); x runs left to right as seen by that team.
//!
//! ## Within one line
//! - Left/right tagged players are pinned `wide_x` from their touchline; a
//!   second one on the same side steps inward by `wide_step`.
//! - Central players share the open interval between the innermost pins
//!   (or `[span_min, span_max]` without pins): `x_i = a + (b - a)(i + 1)/(n + 1)`.
//! - A slot index past the pre-computed list lands at `x = 50`.
//!
//! ## Grid source
//! `x = span_min + (span_max - span_min) * column / (max_column + 1)` using
//! the widest column of that row; y from [`LineCoordinateMapper::grid_row_y`].

use super::config::{Band, LayoutConfig};
use crate::models::FieldPosition;
use crate::tactics::{GridPosition, Side, GOALKEEPER_ROW};
use tracing::debug;

/// x used for goalkeepers and for players past the end of a slot list.
pub const CENTER_X: f32 = 50.0;

/// One player of a line, as far as horizontal placement is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineMember {
    pub side: Side,
    /// Order among central players: -1 centre-left, 0, +1 centre-right
    pub lean: i8,
}

impl LineMember {
    pub fn new(side: Side, lean: i8) -> Self {
        Self { side, lean }
    }
}

pub struct LineCoordinateMapper<'a> {
    config: &'a LayoutConfig,
}

impl<'a> LineCoordinateMapper<'a> {
    pub fn new(config: &'a LayoutConfig) -> Self {
        Self { config }
    }

    pub fn goalkeeper(&self) -> FieldPosition {
        FieldPosition::new(CENTER_X, self.config.goalkeeper_y)
    }

    pub fn band_y(&self, band: Band) -> f32 {
        self.config.band_y(band)
    }

    pub fn midfield_y(&self) -> f32 {
        self.config.midfield_y()
    }

    /// y of midfield line `index` out of `count`, spread from the defensive
    /// to the attacking midfield band. A single line sits on the neutral band.
    pub fn midfield_line_y(&self, index: usize, count: usize) -> f32 {
        if count <= 1 {
            return self.midfield_y();
        }
        let dm = self.band_y(Band::DefensiveMidfield);
        let am = self.band_y(Band::AttackingMidfield);
        let t = index.min(count - 1) as f32 / (count - 1) as f32;
        dm + (am - dm) * t
    }

    /// Evenly spaced x values over the open interval `(a, b)`.
    pub fn spread(a: f32, b: f32, n: usize) -> Vec<f32> {
        (0..n).map(|i| a + (b - a) * (i + 1) as f32 / (n + 1) as f32).collect()
    }

    /// x for every member, in input order.
    ///
    /// `capacity` is the line size the formation expects; central players
    /// beyond `capacity` minus the wide players fall past the slot list.
    pub fn line_xs(&self, members: &[LineMember], capacity: Option<usize>) -> Vec<f32> {
        let mut xs = vec![CENTER_X; members.len()];

        let mut left = 0usize;
        let mut right = 0usize;
        let mut inner_left: Option<f32> = None;
        let mut inner_right: Option<f32> = None;
        for (i, member) in members.iter().enumerate() {
            match member.side {
                Side::Left => {
                    let x = self.config.wide_left_x() + self.config.wide_step * left as f32;
                    left += 1;
                    inner_left = Some(x);
                    xs[i] = x;
                }
                Side::Right => {
                    let x = self.config.wide_right_x() - self.config.wide_step * right as f32;
                    right += 1;
                    inner_right = Some(x);
                    xs[i] = x;
                }
                Side::Center | Side::None => {}
            }
        }

        let mut central: Vec<usize> =
            (0..members.len()).filter(|&i| !members[i].side.is_wide()).collect();
        central.sort_by_key(|&i| members[i].lean);

        let slot_count = match capacity {
            Some(cap) => central.len().min(cap.saturating_sub(left + right)),
            None => central.len(),
        };
        let a = inner_left.unwrap_or(self.config.span_min);
        let b = inner_right.unwrap_or(self.config.span_max);
        let slots = Self::spread(a, b, slot_count);

        for (slot, &i) in central.iter().enumerate() {
            xs[i] = self.slot_x(&slots, slot);
        }
        xs
    }

    /// x at `index` of a pre-computed slot list; past the end → centred.
    pub fn slot_x(&self, slots: &[f32], index: usize) -> f32 {
        match slots.get(index) {
            Some(&x) => x,
            None => {
                debug!(index, slots = slots.len(), "line overflow, using centred slot");
                CENTER_X
            }
        }
    }

    /// Positions for one line at height `y`, in member order.
    pub fn place_line(
        &self,
        members: &[LineMember],
        y: f32,
        capacity: Option<usize>,
    ) -> Vec<FieldPosition> {
        self.line_xs(members, capacity).into_iter().map(|x| FieldPosition::new(x, y)).collect()
    }

    pub fn grid_x(&self, column: u16, max_column: u16) -> f32 {
        let width = self.config.span_max - self.config.span_min;
        let max_column = max_column.max(column).max(1);
        self.config.span_min + width * column as f32 / (max_column as f32 + 1.0)
    }

    /// Row → y. `top_row` is the highest occupied row of the roster.
    ///
    /// | grid depth | row 2   | row 3    | row 4    | top row |
    /// |------------|---------|----------|----------|---------|
    /// | ≤ 4 rows   | defence | midfield | -        | attack  |
    /// | 5 rows     | defence | DM band  | AM band  | attack  |
    /// | > 5 rows   | interpolated defence → attack           |
    pub fn grid_row_y(&self, row: u16, top_row: u16) -> f32 {
        if row <= GOALKEEPER_ROW {
            return self.config.goalkeeper_y;
        }
        if row >= top_row && top_row >= 3 {
            return self.band_y(Band::Attack);
        }
        match (top_row, row) {
            (_, 2) => self.band_y(Band::Defence),
            (0..=4, _) => self.midfield_y(),
            (5, 3) => self.band_y(Band::DefensiveMidfield),
            (5, _) => self.band_y(Band::AttackingMidfield),
            _ => {
                let defence = self.band_y(Band::Defence);
                let attack = self.band_y(Band::Attack);
                let t = (row - 2) as f32 / (top_row - 2) as f32;
                defence + (attack - defence) * t
            }
        }
    }

    pub fn grid_position(&self, grid: GridPosition, max_column: u16, top_row: u16) -> FieldPosition {
        FieldPosition::new(self.grid_x(grid.column, max_column), self.grid_row_y(grid.row, top_row))
    }
}
