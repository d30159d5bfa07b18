use apex_core::core::arch::flags::ConditionFlags;
use rstest::rstest;

#[rstest]
#[case(3, 3, true, false, false)]
#[case(1, 5, false, true, false)]
#[case(9, -2, false, false, true)]
#[case(i32::MIN, i32::MAX, false, true, false)]
fn compare_sets_exactly_one_flag(
    #[case] lhs: i32,
    #[case] rhs: i32,
    #[case] zero: bool,
    #[case] negative: bool,
    #[case] positive: bool,
) {
    let flags = ConditionFlags::compare(lhs, rhs);
    assert_eq!(
        flags,
        ConditionFlags {
            zero,
            negative,
            positive
        }
    );
    let set = [flags.zero, flags.negative, flags.positive]
        .iter()
        .filter(|f| **f)
        .count();
    assert_eq!(set, 1);
}

#[test]
fn arithmetic_only_touches_zero() {
    let mut flags = ConditionFlags::compare(1, 2);
    flags.set_zero_from(0);
    assert!(flags.zero);
    assert!(flags.negative, "negative flag survives an arithmetic update");

    flags.set_zero_from(-7);
    assert!(!flags.zero);
    assert!(flags.negative);
}
