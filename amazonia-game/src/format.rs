//! Text helpers shared by reports and status panels.
use crate::constants::HOURS_PER_DAY;
use crate::error::GameError;
use crate::numbers::floor_f64_to_u32;
use crate::player::Player;

/// `HH:MM` for an elapsed duration; hours are not wrapped.
#[must_use]
pub fn format_duration(hours: f64) -> String {
    let whole = floor_f64_to_u32(hours);
    let minutes = floor_f64_to_u32((hours - f64::from(whole)) * 60.0).min(59);
    format!("{whole:02}:{minutes:02}")
}

/// `HH:MM` for a clock reading in `[0, 24)`.
///
/// # Errors
///
/// Returns [`GameError::InvalidArgument`] for readings outside the clock face.
pub fn format_clock(time: f64) -> Result<String, GameError> {
    if !(0.0..HOURS_PER_DAY).contains(&time) {
        return Err(GameError::invalid(
            "time",
            format!("{time} is outside 0..24"),
        ));
    }
    Ok(format_duration(time))
}

#[must_use]
pub fn format_float(value: f64, decimals: usize) -> String {
    format!("{value:.decimals$}")
}

/// Render a `[0, 1]` rate as a percentage with two decimals.
#[must_use]
pub fn format_percent(rate: f64) -> String {
    format!("{}%", format_float(rate * 100.0, 2))
}

/// One-line vitals summary, e.g. `HP 18.50/20 | Hunger 12.00/20 | Energy 9.00/16`.
#[must_use]
pub fn vitals_line(player: &Player) -> String {
    format!(
        "HP {}/{} | Hunger {}/{} | Energy {}/{}",
        format_float(player.hp().current(), 2),
        player.hp().max(),
        format_float(player.hunger().current(), 2),
        player.hunger().max(),
        format_float(player.energy().current(), 2),
        player.energy().max(),
    )
}

/// Skill averages as shown on the status panel.
#[must_use]
pub fn skills_line(player: &Player) -> String {
    format!(
        "Fishing Average Delay: {}s | Hunt Average Success Rate: {} | Run Average Success Rate: {}",
        format_float(player.fish_pull_delay().average(), 2),
        format_percent(player.hunt_success_rate().average()),
        format_percent(player.run_success_rate().average()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player_class::PlayerClass;

    #[test]
    fn durations_render_hours_and_minutes() {
        assert_eq!(format_duration(8.5), "08:30");
        assert_eq!(format_duration(0.25), "00:15");
        assert_eq!(format_duration(48.0), "48:00");
    }

    #[test]
    fn clock_rejects_out_of_range_readings() {
        assert_eq!(format_clock(23.75).unwrap(), "23:45");
        assert!(format_clock(24.0).is_err());
        assert!(format_clock(-0.1).is_err());
    }

    #[test]
    fn floats_and_percentages_round() {
        assert_eq!(format_float(1.23456, 3), "1.235");
        assert_eq!(format_float(2.0, 0), "2");
        assert_eq!(format_percent(0.35), "35.00%");
    }

    #[test]
    fn status_lines_describe_a_new_player() {
        let player = Player::new("Ana", PlayerClass::Hunter).unwrap();
        assert_eq!(
            vitals_line(&player),
            "HP 20.00/20 | Hunger 20.00/20 | Energy 16.00/16"
        );
        assert!(skills_line(&player).contains("Fishing Average Delay: 0.35s"));
        assert!(skills_line(&player).contains("Hunt Average Success Rate: 35.00%"));
    }
}
