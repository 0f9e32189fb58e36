use super::*;

mod time_window {
    use super::*;

    parameterized_test! {can_check_contains, (window, time, expected), {
        can_check_contains_impl(TimeWindow::new(window.0, window.1), time, expected);
    }}

    can_check_contains! {
        case_01: ((0, 10), 0, true),
        case_02: ((0, 10), 9, true),
        case_03: ((0, 10), 10, false),
        case_04: ((5, 10), 4, false),
    }

    fn can_check_contains_impl(window: TimeWindow, time: Duration, expected: bool) {
        assert_eq!(window.contains(time), expected);
    }

    parameterized_test! {can_check_intersects, (first, second, expected), {
        can_check_intersects_impl(TimeWindow::new(first.0, first.1), TimeWindow::new(second.0, second.1), expected);
    }}

    can_check_intersects! {
        case_01: ((0, 10), (5, 20), true),
        case_02: ((0, 10), (10, 20), false),
        case_03: ((10, 20), (0, 10), false),
        case_04: ((0, 10), (0, 10), true),
    }

    fn can_check_intersects_impl(first: TimeWindow, second: TimeWindow, expected: bool) {
        assert_eq!(first.intersects(&second), expected);
    }

    #[test]
    fn can_use_universal_window() {
        let window = TimeWindow::max();

        assert!(window.contains(0));
        assert!(window.contains(1_000_000_000));
        assert_eq!(window.latest_start(), MAX_TIME - 1);
    }
}

mod eval {
    use super::*;

    #[test]
    fn can_add_and_subtract() {
        let first = Eval::new(10, 20, 30);
        let second = Eval::new(1, 2, 3);

        assert_eq!(first + second, Eval::new(11, 22, 33));
        assert_eq!(first - second, Eval::new(9, 18, 27));
        assert_eq!(-second, Eval::new(-1, -2, -3));
    }

    #[test]
    fn can_sum_iterator() {
        let total: Eval = [Eval::new(1, 1, 1), Eval::new(2, 2, 2)].into_iter().sum();

        assert_eq!(total, Eval::new(3, 3, 3));
    }
}
