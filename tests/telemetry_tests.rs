use chart_plan::telemetry::init_default_tracing;

#[test]
fn second_initialization_is_a_no_op() {
    let _ = init_default_tracing();

    assert!(!init_default_tracing());
}
