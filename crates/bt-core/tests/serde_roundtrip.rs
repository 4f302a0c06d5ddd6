#![cfg(feature = "serde")]

use bt_core::{NodeKind, TokenState};

#[test]
fn token_state_json_roundtrip() {
    for state in [
        TokenState::Ready,
        TokenState::Running,
        TokenState::Success,
        TokenState::CleanFail,
        TokenState::UnexpectedFail,
    ] {
        let json = serde_json::to_string(&state).expect("serialize");
        let roundtrip: TokenState = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(roundtrip, state);
    }
}

#[test]
fn node_kind_json_roundtrip() {
    for kind in [
        NodeKind::Selector,
        NodeKind::Sequence,
        NodeKind::Decorator,
        NodeKind::Leaf,
    ] {
        let json = serde_json::to_string(&kind).expect("serialize");
        let roundtrip: NodeKind = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(roundtrip, kind);
    }
}
