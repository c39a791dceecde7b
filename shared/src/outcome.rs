use serde::{Deserialize, Serialize};

pub const WIN_ENERGY: i64 = 1_000_000;
pub const WIN_ENV_FLOOR: f64 = -100.0;
pub const LOSE_ENERGY: i64 = 0;
pub const LOSE_ENV_CEILING: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "result", content = "reason", rename_all = "snake_case")]
pub enum GameOutcome {
    Win(WinReason),
    Lose(LoseReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WinReason {
    EnergyProduction,
    EnvironmentFullyExploited,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoseReason {
    RanOutOfEnergy,
    EnvironmentCollapsed,
}

impl GameOutcome {
    pub const fn is_win(self) -> bool {
        matches!(self, GameOutcome::Win(_))
    }

    pub const fn description(self) -> &'static str {
        match self {
            GameOutcome::Win(WinReason::EnergyProduction) => "energy production",
            GameOutcome::Win(WinReason::EnvironmentFullyExploited) => {
                "environment fully exploited"
            }
            GameOutcome::Lose(LoseReason::RanOutOfEnergy) => "ran out of energy",
            GameOutcome::Lose(LoseReason::EnvironmentCollapsed) => "environment collapsed",
        }
    }
}

/// End-of-game check, run after every applied tick. Predicates are ordered:
/// both a win and a lose threshold can be satisfied by the same counters,
/// and the win checks take precedence.
pub fn evaluate_outcome(energy: i64, env_bar: f64) -> Option<GameOutcome> {
    if energy >= WIN_ENERGY {
        return Some(GameOutcome::Win(WinReason::EnergyProduction));
    }
    if env_bar <= WIN_ENV_FLOOR {
        return Some(GameOutcome::Win(WinReason::EnvironmentFullyExploited));
    }
    if energy <= LOSE_ENERGY {
        return Some(GameOutcome::Lose(LoseReason::RanOutOfEnergy));
    }
    if env_bar >= LOSE_ENV_CEILING {
        return Some(GameOutcome::Lose(LoseReason::EnvironmentCollapsed));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::{GameOutcome, LoseReason, WinReason, evaluate_outcome};

    #[test]
    fn mid_game_counters_have_no_outcome() {
        assert_eq!(evaluate_outcome(500, 12.5), None);
        assert_eq!(evaluate_outcome(999_999, -99.9), None);
    }

    #[test]
    fn win_thresholds() {
        assert_eq!(
            evaluate_outcome(1_000_000, 0.0),
            Some(GameOutcome::Win(WinReason::EnergyProduction))
        );
        assert_eq!(
            evaluate_outcome(500, -100.0),
            Some(GameOutcome::Win(WinReason::EnvironmentFullyExploited))
        );
    }

    #[test]
    fn lose_thresholds() {
        assert_eq!(
            evaluate_outcome(0, 0.0),
            Some(GameOutcome::Lose(LoseReason::RanOutOfEnergy))
        );
        assert_eq!(
            evaluate_outcome(500, 100.0),
            Some(GameOutcome::Lose(LoseReason::EnvironmentCollapsed))
        );
    }

    #[test]
    fn win_is_checked_before_lose() {
        // Both the energy win and the environment collapse thresholds hold.
        let outcome = evaluate_outcome(2_000_000, 150.0).expect("terminal");
        assert_eq!(outcome, GameOutcome::Win(WinReason::EnergyProduction));
        assert!(outcome.is_win());
        assert_eq!(outcome.description(), "energy production");
    }
}
