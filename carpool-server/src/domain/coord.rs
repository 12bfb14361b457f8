//! Coordinates and graph nodes.

use std::fmt;

/// A geographic point in decimal degrees.
///
/// No range checking is done. NaN or out-of-range values are carried
/// through unchanged and compared by bit pattern.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coord {
    pub lat: f64,
    pub lng: f64,
}

impl Coord {
    /// Create a coordinate from latitude and longitude.
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Hashable identity of this coordinate.
    ///
    /// `-0.0` is folded into `0.0` so that numerically equal inputs intern
    /// to the same node.
    pub fn key(&self) -> (u64, u64) {
        (canonical_bits(self.lat), canonical_bits(self.lng))
    }

    /// The `(longitude, latitude)` pair used in responses.
    pub fn lng_lat(&self) -> (f64, f64) {
        (self.lng, self.lat)
    }
}

fn canonical_bits(x: f64) -> u64 {
    if x == 0.0 { 0.0f64.to_bits() } else { x.to_bits() }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.lat, self.lng)
    }
}

/// What a node stands for in a trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Role {
    /// A driver's starting position.
    Driver,
    /// A passenger pickup.
    PassengerSource,
    /// A passenger drop-off.
    PassengerDest,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Role::Driver => "Driver",
            Role::PassengerSource => "PassengerSrc",
            Role::PassengerDest => "PassengerDst",
        };
        f.write_str(name)
    }
}

/// Position of a node in the per-request node sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeIndex(pub usize);

impl fmt::Display for NodeIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A graph vertex: a coordinate plus its role.
///
/// Role is part of identity, so a driver standing on a pickup point is a
/// different node from that pickup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Node {
    pub coord: Coord,
    pub role: Role,
}

/// Interning key for a [`Node`].
pub(crate) type NodeKey = (u64, u64, Role);

impl Node {
    pub fn new(coord: Coord, role: Role) -> Self {
        Self { coord, role }
    }

    pub(crate) fn key(&self) -> NodeKey {
        let (lat, lng) = self.coord.key();
        (lat, lng, self.role)
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "lat={}, lng={}, type={}",
            self.coord.lat, self.coord.lng, self.role
        )
    }
}
