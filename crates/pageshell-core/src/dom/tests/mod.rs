// DOM capability test module
#[cfg(test)]
mod memory_tests;

#[cfg(test)]
mod tests {
    use crate::dom::{NodeId, NodeSet, ReadyState};

    #[test]
    fn test_ready_state_default() {
        assert_eq!(ReadyState::default(), ReadyState::Loading);
    }

    #[test]
    fn test_ready_state_is_parsed() {
        assert!(!ReadyState::Loading.is_parsed());
        assert!(ReadyState::Interactive.is_parsed());
        assert!(ReadyState::Complete.is_parsed());
    }

    #[test]
    fn test_node_set_basics() {
        let empty = NodeSet::empty();
        assert!(empty.is_empty());
        assert_eq!(empty.first(), None);

        let set: NodeSet = vec![NodeId(3), NodeId(7)].into_iter().collect();
        assert_eq!(set.len(), 2);
        assert_eq!(set.first(), Some(NodeId(3)));
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![NodeId(3), NodeId(7)]);
    }

    #[test]
    fn test_node_id_display() {
        assert_eq!(NodeId(42).to_string(), "node#42");
    }
}
