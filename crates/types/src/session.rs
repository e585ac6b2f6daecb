use serde::Serialize;

/// The persisted-state contract for a completed challenge run. The engine only ever
/// produces these; it never reads them back, so no `Deserialize` is
/// derived.
#[derive(Clone, Debug, Serialize)]
pub struct SessionRecord {
    pub session_id: String,
    pub player_id: String,
    pub challenge: String,
    pub score: f32,
    pub accuracy: f32,
    pub duration_ms: u64,
    pub shared: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_the_contracted_field_names() {
        let record = SessionRecord {
            session_id: "s1".into(),
            player_id: "p1".into(),
            challenge: "accuracy".into(),
            score: 42.0,
            accuracy: 0.5,
            duration_ms: 1234,
            shared: false,
        };
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["session_id"], "s1");
        assert_eq!(value["player_id"], "p1");
        assert_eq!(value["challenge"], "accuracy");
        assert_eq!(value["duration_ms"], 1234);
        assert_eq!(value["shared"], false);
    }
}
