//! Multiplication stages.

pub mod session;

pub use session::*;

use crate::core::constants::STAGE_COUNT;

const STAGE_ICONS: [&str; 9] = ["1️⃣", "2️⃣", "3️⃣", "4️⃣", "5️⃣", "6️⃣", "7️⃣", "8️⃣", "9️⃣"];

/// True for stage numbers 1-9.
pub fn is_valid_stage(stage_number: u32) -> bool {
    (1..=STAGE_COUNT).contains(&stage_number)
}

/// Heading shown while playing a stage.
pub fn stage_title(stage_number: u32) -> String {
    format!("Stage {} - {} times table", stage_number, stage_number)
}

/// Keycap icon for the stage grid.
pub fn stage_icon(stage_number: u32) -> &'static str {
    if is_valid_stage(stage_number) {
        STAGE_ICONS[(stage_number - 1) as usize]
    } else {
        "❔"
    }
}
