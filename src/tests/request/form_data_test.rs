#[cfg(test)]
mod form_data_tests {
    use crate::req::body::FormData;

    #[test]
    fn test_form_data_new() {
        let form = FormData::new();
        assert!(form.is_empty());
        assert_eq!(form.len(), 0);
    }

    #[test]
    fn test_form_data_insert_and_get() {
        let mut form = FormData::new();
        form.insert("username", "alice");

        assert_eq!(form.get("username"), Some("alice"));
        assert_eq!(form.get("missing"), None);
    }

    #[test]
    fn test_form_data_repeated_key_upgrades_to_list() {
        let mut form = FormData::new();
        form.insert("tag", "rust");
        form.insert("tag", "async");

        assert_eq!(form.get("tag"), Some("rust"));
        assert_eq!(form.get_all("tag"), Some(vec!["rust", "async"]));
    }

    #[test]
    fn test_form_data_len_and_is_empty() {
        let mut form = FormData::new();
        assert!(form.is_empty());

        form.insert("field1", "value1");
        assert_eq!(form.len(), 1);
        assert!(!form.is_empty());
    }

    #[test]
    fn test_form_data_iter() {
        let mut form = FormData::new();
        form.insert("key1", "value1");
        form.insert("key2", "value2");

        let mut count = 0;
        for (key, value) in form.iter() {
            assert!(key == "key1" || key == "key2");
            assert!(value.first() == "value1" || value.first() == "value2");
            count += 1;
        }
        assert_eq!(count, 2);
    }

    #[test]
    fn test_form_data_from_query_string() {
        let form = FormData::from_query_string("name=John&age=30").unwrap();
        assert_eq!(form.len(), 2);
        assert_eq!(form.get("name"), Some("John"));
        assert_eq!(form.get("age"), Some("30"));
    }

    #[test]
    fn test_form_data_display_round_trips() {
        let form = FormData::from_query_string("title=Hello%20World").unwrap();
        assert_eq!(form.to_string(), "title=Hello+World");
    }

    #[test]
    fn test_form_data_special_characters() {
        let mut form = FormData::new();
        form.insert("special_chars", "hello world!@#$%");
        form.insert("unicode", "こんにちは");

        assert_eq!(form.get("special_chars"), Some("hello world!@#$%"));
        assert_eq!(form.get("unicode"), Some("こんにちは"));
    }

    #[test]
    fn test_form_data_empty_values() {
        let mut form = FormData::new();
        form.insert("empty", "");

        assert_eq!(form.get("empty"), Some(""));
    }
}
