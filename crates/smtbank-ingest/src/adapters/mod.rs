//! One adapter per era of the competition's result-publishing history.
//! Each is a pure transform from that era's raw row shape to
//! [`ResultRecord`](crate::record::ResultRecord); reading the archives
//! themselves is the caller's business, except for the two formats that
//! are plain enough to read here (the gzipped JSON dump and the
//! incremental-track logs).

pub mod early;
pub mod incremental;
pub mod json;
pub mod smtexec;
pub mod starexec;

/// Splits a `family/rest...` benchmark path at the first slash. Paths
/// without a family component yield an empty family, which never matches
/// the catalog and is counted as a miss downstream.
pub(crate) fn split_family(path: &str) -> (&str, &str) {
    match path.split_once('/') {
        Some((family, rest)) => (family, rest),
        None => ("", path),
    }
}
