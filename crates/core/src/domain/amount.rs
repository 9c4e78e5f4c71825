use super::DomainError;

/// Transaction amount in BRL.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Amount(f64);

impl Amount {
    pub fn new(value: f64) -> Result<Self, DomainError> {
        if value.is_finite() && value > 0.0 {
            Ok(Self(value))
        } else {
            Err(DomainError::InvalidAmount(value.to_string()))
        }
    }

    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let value: f64 = raw
            .trim()
            .parse()
            .map_err(|_| DomainError::InvalidAmount(raw.to_string()))?;
        Self::new(value)
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::Amount;

    #[test]
    fn accepts_positive_values() {
        assert_eq!(Amount::new(19.9).map(Amount::value), Ok(19.9));
        assert_eq!(Amount::parse(" 29.90 ").map(Amount::value), Ok(29.9));
    }

    #[test]
    fn rejects_zero_negative_and_garbage() {
        assert!(Amount::new(0.0).is_err());
        assert!(Amount::new(-5.0).is_err());
        assert!(Amount::new(f64::NAN).is_err());
        assert!(Amount::parse("abc").is_err());
    }
}
