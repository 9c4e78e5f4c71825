use std::fmt;
use std::str::FromStr;

use super::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Plan {
    Premium,
    Lifetime,
}

impl Plan {
    pub fn as_str(self) -> &'static str {
        match self {
            Plan::Premium => "premium",
            Plan::Lifetime => "lifetime",
        }
    }

    /// Description shown on the payer's statement and the gateway dashboard.
    pub fn payment_description(self) -> &'static str {
        match self {
            Plan::Premium => "Vibraze Premium - Assinatura Mensal",
            Plan::Lifetime => "Vibraze Lifetime - Acesso Vitalício",
        }
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Plan {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "premium" => Ok(Plan::Premium),
            "lifetime" => Ok(Plan::Lifetime),
            other => Err(DomainError::InvalidPlan(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Plan;
    use crate::domain::DomainError;

    #[test]
    fn parses_known_plans() {
        assert_eq!("premium".parse::<Plan>(), Ok(Plan::Premium));
        assert_eq!(" lifetime ".parse::<Plan>(), Ok(Plan::Lifetime));
    }

    #[test]
    fn rejects_unknown_plan() {
        assert_eq!(
            "monthly".parse::<Plan>(),
            Err(DomainError::InvalidPlan("monthly".to_string()))
        );
    }

    #[test]
    fn description_depends_on_plan() {
        assert!(Plan::Premium.payment_description().contains("Mensal"));
        assert!(Plan::Lifetime.payment_description().contains("Vitalício"));
    }
}
