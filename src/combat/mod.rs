//! Combat: strike resolution, forecasts and experience

pub mod experience;
pub mod resolution;

pub use experience::{calculate_experience, grant_experience};
pub use resolution::{
    calculate_magical_damage, calculate_physical_damage, can_attack, check_attack, execute,
    execute_at_cells, forecast, get_distance, is_in_range, strike_damage, CombatForecast,
    CombatResult,
};
