use super::*;

parameterized_test! {can_map_exit_code, (error, expected), {
    can_map_exit_code_impl(error, expected);
}}

can_map_exit_code! {
    case_01: (Error::Internal("bug".to_string()), 1),
    case_02: (Error::Input("bad field".to_string()), 2),
    case_03: (Error::Routing("no matrix".to_string()), 3),
}

fn can_map_exit_code_impl(error: Error, expected: i32) {
    assert_eq!(error.code(), expected);
}

#[test]
fn can_format_error_kind() {
    assert_eq!(Error::Input("oops".to_string()).to_string(), "input error: oops");
    assert_eq!(Error::Routing("oops".to_string()).to_string(), "routing error: oops");
    assert_eq!(Error::Internal("oops".to_string()).to_string(), "internal error: oops");
}
