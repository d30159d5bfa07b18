use apex_core::core::arch::gpr::Gpr;

#[test]
fn new_file_is_zeroed() {
    let gpr = Gpr::new(16);
    assert_eq!(gpr.len(), 16);
    assert!(gpr.as_slice().iter().all(|v| *v == 0));
}

#[test]
fn r0_is_an_ordinary_register() {
    let mut gpr = Gpr::default();
    gpr.write(0, 42);
    assert_eq!(gpr.read(0), 42, "R0 is not hardwired to zero");
}

#[test]
fn write_then_read_each_register() {
    let mut gpr = Gpr::new(8);
    for i in 0..8 {
        gpr.write(i, (i as i32) * -3);
    }
    for i in 0..8 {
        assert_eq!(gpr.read(i), (i as i32) * -3, "R{i}");
    }
}

#[test]
fn out_of_range_access_is_harmless() {
    let mut gpr = Gpr::new(4);
    gpr.write(4, 99);
    assert_eq!(gpr.read(4), 0);
    assert_eq!(gpr.as_slice(), &[0, 0, 0, 0]);
}
