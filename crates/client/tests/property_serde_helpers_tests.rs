//! Property tests for numeric normalization at the transport boundary.

use proptest::prelude::*;
use saviynt_client::ApiStatus;

proptest! {
    #[test]
    fn error_code_number_and_string_agree(code in -1000i64..1000) {
        let as_number: ApiStatus =
            serde_json::from_value(serde_json::json!({"errorCode": code, "msg": "m"})).unwrap();
        let as_string: ApiStatus =
            serde_json::from_value(serde_json::json!({"errorcode": code.to_string(), "msg": "m"})).unwrap();
        prop_assert_eq!(as_number.error_code, code);
        prop_assert_eq!(as_string.error_code, code);
        prop_assert_eq!(as_number.is_success(), code == 0);
    }
}
