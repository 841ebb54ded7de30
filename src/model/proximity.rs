use crate::utils::constants::{CHECK_IN_RADIUS_METERS, NEAR_RADIUS_METERS};

/// Discrete proximity band between the device and the destination.
/// Recomputed from scratch on every reading; there is no hysteresis, so
/// a device oscillating around a boundary flips band on every update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Proximity {
    /// Within the check-in radius.
    Arrived,
    /// Outside the check-in radius but within the "almost there" band.
    Near,
    Far,
}

/// Categorical display hint attached to a proximity band. The caller
/// maps this to colors; no numeric data here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProximityHint {
    Success,
    Warning,
    Danger,
}

impl Proximity {
    /// Classifies a non-negative distance in meters. Both boundaries are
    /// inclusive on the lower side: exactly 100 m still counts as
    /// arrived, exactly 500 m still counts as near.
    pub fn classify(meters: f64) -> Self {
        if meters <= CHECK_IN_RADIUS_METERS {
            Proximity::Arrived
        } else if meters <= NEAR_RADIUS_METERS {
            Proximity::Near
        } else {
            Proximity::Far
        }
    }

    /// Whether this band gates the check-in action open.
    pub fn can_check_in(&self) -> bool {
        matches!(self, Proximity::Arrived)
    }

    pub fn hint(&self) -> ProximityHint {
        match self {
            Proximity::Arrived => ProximityHint::Success,
            Proximity::Near => ProximityHint::Warning,
            Proximity::Far => ProximityHint::Danger,
        }
    }

    /// User-facing message for this band.
    pub fn message(&self) -> &'static str {
        match self {
            Proximity::Arrived => "チェックイン可能！",
            Proximity::Near => "もう少し！",
            Proximity::Far => "まだ遠いです",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_in_boundary_is_inclusive() {
        assert_eq!(Proximity::classify(100.0), Proximity::Arrived);
        assert!(Proximity::classify(100.0).can_check_in());
    }

    #[test]
    fn just_past_the_check_in_boundary_is_near() {
        assert_eq!(Proximity::classify(100.01), Proximity::Near);
        assert!(!Proximity::classify(100.01).can_check_in());
    }

    #[test]
    fn near_boundary_is_inclusive() {
        assert_eq!(Proximity::classify(500.0), Proximity::Near);
        assert_eq!(Proximity::classify(500.01), Proximity::Far);
    }

    #[test]
    fn only_arrived_allows_check_in() {
        assert!(Proximity::classify(0.0).can_check_in());
        assert!(!Proximity::classify(250.0).can_check_in());
        assert!(!Proximity::classify(10_000.0).can_check_in());
    }

    #[test]
    fn hints_follow_the_bands() {
        assert_eq!(Proximity::Arrived.hint(), ProximityHint::Success);
        assert_eq!(Proximity::Near.hint(), ProximityHint::Warning);
        assert_eq!(Proximity::Far.hint(), ProximityHint::Danger);
    }
}
