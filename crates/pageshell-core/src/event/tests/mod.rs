
#[cfg(test)]
mod tests {
    use serde::Deserialize;
    use serde_json::json;

    use crate::event::NotificationEvent;

    #[test]
    fn test_notification_event_serializes_type_and_detail() {
        let event = NotificationEvent::new("new_message", json!({"text": "hello"}));
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value, json!({"type": "new_message", "detail": {"text": "hello"}}));
    }

    #[test]
    fn test_notification_event_missing_detail_defaults_to_null() {
        let event: NotificationEvent = serde_json::from_str(r#"{"type": "ping"}"#).unwrap();
        assert_eq!(event.name, "ping");
        assert!(event.detail.is_null());
    }

    #[test]
    fn test_detail_as_typed_payload() {
        #[derive(Debug, Deserialize, PartialEq)]
        struct Message {
            text: String,
        }

        let event = NotificationEvent::new("new_message", json!({"text": "hello"}));
        assert_eq!(event.detail_as::<Message>(), Some(Message { text: "hello".to_string() }));
        assert_eq!(event.detail_as::<u32>(), None);
    }
}
