//! Assertion macros for topix harnesses.
//!
//! They compare id lists with `pretty_assertions` so a failure shows which
//! concept went missing or appeared out of order.

/// Assert the matched ids of a `Resolution`, in order.
///
/// ```rust
/// assert_matches!(resolution, ["c2", "c3", "c5"]);
/// ```
#[macro_export]
macro_rules! assert_matches {
    ($resolution:expr, [$($id:expr),* $(,)?]) => {{
        let resolution: &topix_core::Resolution = &$resolution;
        let actual: Vec<&str> = resolution.matches.iter().map(|m| m.id.as_str()).collect();
        let expected: Vec<&str> = vec![$($id),*];
        pretty_assertions::assert_eq!(actual, expected, "matched ids differ");
    }};
}

/// Assert the `local_identifier`s of the topic nodes of a `TopicGraph`, in
/// graph order.
#[macro_export]
macro_rules! assert_topics {
    ($graph:expr, [$($id:expr),* $(,)?]) => {{
        let graph: &topix_core::TopicGraph = &$graph;
        let actual: Vec<&str> = graph.topics().map(|t| t.local_identifier.as_str()).collect();
        let expected: Vec<&str> = vec![$($id),*];
        pretty_assertions::assert_eq!(actual, expected, "topic nodes differ");
    }};
}

/// Assert the ancestor chain of one concept.
#[macro_export]
macro_rules! assert_ancestors {
    ($index:expr, $id:expr, [$($ancestor:expr),* $(,)?]) => {{
        let index: &topix_core::ConceptIndex = &$index;
        let actual = index.ancestors($id).expect("hierarchy is consistent");
        let expected: Vec<&str> = vec![$($ancestor),*];
        pretty_assertions::assert_eq!(actual, expected, "ancestors of {:?}", $id);
    }};
}
