use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerUp {
    TimeBonus,
    DoubleScore,
    EasyMode,
}

impl PowerUp {
    pub fn all() -> [PowerUp; 3] {
        [PowerUp::TimeBonus, PowerUp::DoubleScore, PowerUp::EasyMode]
    }

    /// Charges added to the bank when this power-up is granted.
    pub fn charges_per_grant(&self) -> u32 {
        match self {
            PowerUp::TimeBonus => 1,
            PowerUp::DoubleScore => 3,
            PowerUp::EasyMode => 2,
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            PowerUp::TimeBonus => "⏱️",
            PowerUp::DoubleScore => "✨",
            PowerUp::EasyMode => "🎯",
        }
    }

    pub fn announcement(&self) -> &'static str {
        match self {
            PowerUp::TimeBonus => "Time Bonus: +5 seconds!",
            PowerUp::DoubleScore => "Double Score: next 3 answers!",
            PowerUp::EasyMode => "Easy Mode: next 2 rounds!",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PowerUpBank {
    pub time_bonus_charges: u32,
    pub double_score_charges: u32,
    pub easy_mode_charges: u32,
}

impl PowerUpBank {
    fn slot(&mut self, power_up: PowerUp) -> &mut u32 {
        match power_up {
            PowerUp::TimeBonus => &mut self.time_bonus_charges,
            PowerUp::DoubleScore => &mut self.double_score_charges,
            PowerUp::EasyMode => &mut self.easy_mode_charges,
        }
    }

    pub fn charges(&self, power_up: PowerUp) -> u32 {
        match power_up {
            PowerUp::TimeBonus => self.time_bonus_charges,
            PowerUp::DoubleScore => self.double_score_charges,
            PowerUp::EasyMode => self.easy_mode_charges,
        }
    }

    pub fn grant(&mut self, power_up: PowerUp) {
        *self.slot(power_up) += power_up.charges_per_grant();
    }

    /// Takes one charge if available; returns whether the power-up is active.
    pub fn consume(&mut self, power_up: PowerUp) -> bool {
        let slot = self.slot(power_up);
        if *slot == 0 {
            return false;
        }
        *slot -= 1;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grant_adds_charges() {
        let mut bank = PowerUpBank::default();
        bank.grant(PowerUp::DoubleScore);
        bank.grant(PowerUp::EasyMode);
        bank.grant(PowerUp::TimeBonus);
        assert_eq!(bank.charges(PowerUp::DoubleScore), 3);
        assert_eq!(bank.charges(PowerUp::EasyMode), 2);
        assert_eq!(bank.charges(PowerUp::TimeBonus), 1);
    }

    #[test]
    fn test_consume_never_goes_negative() {
        let mut bank = PowerUpBank::default();
        bank.grant(PowerUp::EasyMode);
        assert!(bank.consume(PowerUp::EasyMode));
        assert!(bank.consume(PowerUp::EasyMode));
        assert!(!bank.consume(PowerUp::EasyMode));
        assert_eq!(bank.easy_mode_charges, 0);
    }
}
