//! Decoded trip requests.

use super::{Coord, DomainError};

/// One passenger: where to pick them up and where to drop them off.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Passenger {
    pub pickup: Coord,
    pub dropoff: Coord,
}

impl Passenger {
    pub fn new(pickup: Coord, dropoff: Coord) -> Self {
        Self { pickup, dropoff }
    }
}

/// Drivers and passengers to be routed together.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TripRequest {
    /// Driver start positions, in request order.
    pub drivers: Vec<Coord>,

    /// Passenger pickup/drop-off pairs, in request order.
    pub passengers: Vec<Passenger>,
}

impl TripRequest {
    /// Create a new trip request.
    pub fn new(drivers: Vec<Coord>, passengers: Vec<Passenger>) -> Self {
        Self {
            drivers,
            passengers,
        }
    }

    /// Reject requests that cannot produce any route.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.drivers.is_empty() {
            return Err(DomainError::NoDrivers);
        }
        if self.passengers.is_empty() {
            return Err(DomainError::NoPassengers);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn passenger() -> Passenger {
        Passenger::new(Coord::new(1.0, 1.0), Coord::new(2.0, 2.0))
    }

    #[test]
    fn valid_request() {
        let request = TripRequest::new(vec![Coord::new(0.0, 0.0)], vec![passenger()]);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn rejects_missing_drivers() {
        let request = TripRequest::new(vec![], vec![passenger()]);
        assert_eq!(request.validate(), Err(DomainError::NoDrivers));
    }

    #[test]
    fn rejects_missing_passengers() {
        let request = TripRequest::new(vec![Coord::new(0.0, 0.0)], vec![]);
        assert_eq!(request.validate(), Err(DomainError::NoPassengers));
    }
}
