/// Boxed future returned by connection pools, so pool traits stay object friendly.
pub type BoxFuture<'a, T> = futures::future::BoxFuture<'a, T>;
