//! Customer locations.

/// A customer (or the depot) of a capacitated routing instance.
///
/// Customer 0 is conventionally the depot. A customer has planar
/// coordinates and a non-negative demand.
///
/// # Examples
///
/// ```
/// use u_savings::models::Customer;
///
/// let depot = Customer::depot(0.0, 0.0);
/// assert_eq!(depot.id(), 0);
/// assert_eq!(depot.demand(), 0);
///
/// let c = Customer::new(1, 0.0, 10.0, 5);
/// assert_eq!(c.demand(), 5);
/// assert!((depot.distance_to(&c) - 10.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Customer {
    id: usize,
    x: f64,
    y: f64,
    demand: i32,
}

impl Customer {
    /// Creates a new customer.
    pub fn new(id: usize, x: f64, y: f64, demand: i32) -> Self {
        Self { id, x, y, demand }
    }

    /// Creates a depot at the given coordinates (id=0, demand=0).
    pub fn depot(x: f64, y: f64) -> Self {
        Self::new(0, x, y, 0)
    }

    /// Customer ID (0 = depot).
    pub fn id(&self) -> usize {
        self.id
    }

    /// X-coordinate.
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Y-coordinate.
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Units delivered to this customer.
    pub fn demand(&self) -> i32 {
        self.demand
    }

    /// Euclidean distance to another customer.
    pub fn distance_to(&self, other: &Customer) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_depot_has_no_demand() {
        let d = Customer::depot(3.0, 4.0);
        assert_eq!(d.id(), 0);
        assert_eq!(d.demand(), 0);
        assert_eq!(d.x(), 3.0);
        assert_eq!(d.y(), 4.0);
    }

    #[test]
    fn test_distance_pythagorean() {
        let a = Customer::new(1, 0.0, 0.0, 1);
        let b = Customer::new(2, 3.0, 4.0, 1);
        assert!((a.distance_to(&b) - 5.0).abs() < 1e-10);
        assert!((b.distance_to(&a) - 5.0).abs() < 1e-10);
    }
}
