//! Problem data trait.

/// Read-only view of a capacitated vehicle routing instance.
///
/// Solvers consume instances only through this trait. Node ids are opaque
/// `usize` values; the depot is one of them. Implementations must return
/// `nodes()` and `edges()` in a stable order, since the savings list
/// breaks ties by edge enumeration order.
///
/// # Examples
///
/// ```
/// use u_savings::models::CvrpData;
///
/// struct Line;
///
/// impl CvrpData for Line {
///     fn depot(&self) -> usize { 0 }
///     fn nodes(&self) -> Vec<usize> { vec![0, 1, 2] }
///     fn distance(&self, a: usize, b: usize) -> f64 { (a as f64 - b as f64).abs() }
///     fn capacity(&self) -> i32 { 10 }
///     fn demand(&self, id: usize) -> i32 { if id == 0 { 0 } else { 5 } }
/// }
///
/// assert_eq!(Line.edges(), vec![(0, 1), (0, 2), (1, 2)]);
/// assert_eq!(Line.num_customers(), 2);
/// ```
pub trait CvrpData: Send + Sync {
    /// Id of the depot every route starts and ends at.
    fn depot(&self) -> usize;

    /// All node ids, depot included.
    fn nodes(&self) -> Vec<usize>;

    /// Node pairs without self-pairs, in a stable enumeration order.
    ///
    /// Defaults to every `(i, j)` where `i` precedes `j` in `nodes()`.
    fn edges(&self) -> Vec<(usize, usize)> {
        let nodes = self.nodes();
        let mut edges = Vec::with_capacity(nodes.len() * nodes.len().saturating_sub(1) / 2);
        for (k, &i) in nodes.iter().enumerate() {
            for &j in &nodes[k + 1..] {
                edges.push((i, j));
            }
        }
        edges
    }

    /// Travel distance from `a` to `b`.
    fn distance(&self, a: usize, b: usize) -> f64;

    /// Capacity shared by every vehicle.
    fn capacity(&self) -> i32;

    /// Demand of node `id` (0 for the depot).
    fn demand(&self, id: usize) -> i32;

    /// Number of non-depot nodes.
    fn num_customers(&self) -> usize {
        let depot = self.depot();
        self.nodes().into_iter().filter(|&id| id != depot).count()
    }
}

impl<T: CvrpData + ?Sized> CvrpData for &T {
    fn depot(&self) -> usize {
        (**self).depot()
    }
    fn nodes(&self) -> Vec<usize> {
        (**self).nodes()
    }
    fn edges(&self) -> Vec<(usize, usize)> {
        (**self).edges()
    }
    fn distance(&self, a: usize, b: usize) -> f64 {
        (**self).distance(a, b)
    }
    fn capacity(&self) -> i32 {
        (**self).capacity()
    }
    fn demand(&self, id: usize) -> i32 {
        (**self).demand(id)
    }
    fn num_customers(&self) -> usize {
        (**self).num_customers()
    }
}
