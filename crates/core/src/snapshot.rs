use serde::Serialize;

use crate::row::Row;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RowSnapshot {
    pub slot: u8,
    pub bottom_offset: f32,
    pub ready_to_drop: bool,
}

impl From<&Row> for RowSnapshot {
    fn from(row: &Row) -> Self {
        Self {
            slot: row.slot(),
            bottom_offset: row.bottom_offset(),
            ready_to_drop: row.is_ready_to_drop(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct GameSnapshot {
    pub columns: u8,
    pub level: u8,
    pub surface_width: u32,
    pub surface_height: u32,
    pub column_width: f32,
    pub row_height: f32,
    pub rows: Vec<RowSnapshot>,
    pub tick_count: f32,
    pub ticks: u64,
    pub running: bool,
    pub failed: bool,
}

impl GameSnapshot {
    /// Reset to an empty snapshot, keeping the row allocation.
    pub fn clear(&mut self) {
        self.rows.clear();
        self.columns = 0;
        self.level = 0;
        self.surface_width = 0;
        self.surface_height = 0;
        self.column_width = 0.0;
        self.row_height = 0.0;
        self.tick_count = 0.0;
        self.ticks = 0;
        self.running = false;
        self.failed = false;
    }
}
