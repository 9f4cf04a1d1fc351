#[cfg(test)]
mod test {
    use crate::req::HttpRequest;

    #[test]
    fn test_set_and_get_request_data() {
        let mut req = HttpRequest::new();
        req.set_data("data_key", "data_value");

        assert_eq!(req.get_data("data_key"), Some("data_value".to_string()));
        assert_eq!(req.get_data("missing"), None);
    }

    #[test]
    fn test_request_data_contains_and_remove() {
        let mut req = HttpRequest::new();
        req.set_data("data_key", "data_value");

        assert!(req.data.contains("data_key"));

        req.data.remove("data_key");
        assert!(!req.data.contains("data_key"));
    }

    #[test]
    fn test_request_data_iter() {
        let mut req = HttpRequest::new();
        req.set_data("a", "1");
        req.set_data("b", "2");

        let mut pairs: Vec<_> = req.data.iter().collect();
        pairs.sort();
        assert_eq!(pairs, vec![("a", "1"), ("b", "2")]);
    }
}
